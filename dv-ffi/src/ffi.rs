//! Extern "C" API for FFI consumers.
//!
//! # Conventions
//!
//! - Handles (`DvVar *`) are created by `dv_var_new`, `dv_var_unitless`,
//!   `dv_var_clone` and every operation that produces a new variable. Each one
//!   must be released exactly once with [`dv_var_free`].
//! - Constructors return the handle directly, or null on failure.
//! - Everything else returns an `i32` status (`DV_OK` or a negative
//!   `DV_ERR_*` code) and writes its result through an out-pointer.
//! - After a failure, [`dv_last_error_code`] and [`dv_last_error_message`]
//!   describe it. The record is per thread and is cleared by the next
//!   successful call.
//! - Panics are caught and reported as `DV_ERR_PANIC`; they never unwind into
//!   the caller.

use crate::types::{
    status_code, DvRational, DvVar, DV_ERR_INVALID_UTF8, DV_ERR_NULL_POINTER, DV_ERR_PANIC, DV_OK,
};
use core::ffi::c_char;
use core::ptr;
use dv_core::{DimensionalVariable, DvError, DvResult, BASE_COUNT};
use std::cell::RefCell;
use std::ffi::CStr;

// =============================================================================
// Panic and error plumbing
// =============================================================================

/// Catches any panic and returns `$default` instead of unwinding across FFI.
macro_rules! catch_panic {
    ($default:expr, $body:expr) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(result) => result,
            Err(_) => $default,
        }
    }};
}

thread_local! {
    static LAST_ERROR: RefCell<Option<(i32, String)>> = const { RefCell::new(None) };
}

fn set_last_error(code: i32, message: String) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some((code, message)));
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

fn fail(err: DvError) -> i32 {
    let code = status_code(err.kind());
    set_last_error(code, err.to_string());
    code
}

fn null_argument(name: &str) -> i32 {
    set_last_error(DV_ERR_NULL_POINTER, format!("argument `{name}` is null"));
    DV_ERR_NULL_POINTER
}

fn panicked() -> i32 {
    set_last_error(DV_ERR_PANIC, "panic caught at the dv-ffi boundary".to_string());
    DV_ERR_PANIC
}

/// Runs `body` under the panic guard and turns its outcome into a status code.
fn run(body: impl FnOnce() -> Result<(), i32>) -> i32 {
    catch_panic!(panicked(), {
        match body() {
            Ok(()) => {
                clear_last_error();
                DV_OK
            }
            Err(code) => code,
        }
    })
}

/// Like [`run`], for functions that hand back a fresh handle or null.
fn run_handle(body: impl FnOnce() -> Result<DimensionalVariable, i32>) -> *mut DvVar {
    catch_panic!(
        {
            panicked();
            ptr::null_mut()
        },
        match body() {
            Ok(v) => {
                clear_last_error();
                Box::into_raw(Box::new(DvVar::from(v)))
            }
            Err(_) => ptr::null_mut(),
        }
    )
}

/// # Safety
///
/// `ptr` must be null or a live handle from this library.
unsafe fn var<'a>(ptr: *const DvVar, name: &str) -> Result<&'a DimensionalVariable, i32> {
    // SAFETY: guaranteed by the caller
    unsafe { ptr.as_ref() }
        .map(DvVar::get)
        .ok_or_else(|| null_argument(name))
}

/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn text<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, i32> {
    if ptr.is_null() {
        return Err(null_argument(name));
    }
    // SAFETY: checked non-null; termination guaranteed by the caller
    unsafe { CStr::from_ptr(ptr) }.to_str().map_err(|_| {
        set_last_error(DV_ERR_INVALID_UTF8, format!("argument `{name}` is not UTF-8"));
        DV_ERR_INVALID_UTF8
    })
}

/// # Safety
///
/// `out` must be null or valid for a write of `T`.
unsafe fn put<T>(out: *mut T, value: T) -> Result<(), i32> {
    if out.is_null() {
        return Err(null_argument("out"));
    }
    // SAFETY: checked non-null; validity guaranteed by the caller
    unsafe { out.write(value) };
    Ok(())
}

/// # Safety
///
/// `out` must be null or valid for a write of a handle pointer.
unsafe fn put_var(out: *mut *mut DvVar, value: DimensionalVariable) -> Result<(), i32> {
    if out.is_null() {
        return Err(null_argument("out"));
    }
    // SAFETY: checked non-null; validity guaranteed by the caller
    unsafe { out.write(Box::into_raw(Box::new(DvVar::from(value)))) };
    Ok(())
}

/// Copies `s` into `buf` (truncating, always NUL-terminated when `len > 0`)
/// and returns the full byte length of `s`.
///
/// # Safety
///
/// `buf` must be null or valid for `len` bytes of writes.
unsafe fn write_c_string(s: &str, buf: *mut c_char, len: usize) -> i32 {
    let bytes = s.as_bytes();
    if !buf.is_null() && len > 0 {
        let n = bytes.len().min(len - 1);
        // SAFETY: `n + 1 <= len` bytes fit in `buf`
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr().cast::<c_char>(), buf, n);
            buf.add(n).write(0);
        }
    }
    i32::try_from(bytes.len()).unwrap_or(i32::MAX)
}

unsafe fn unary(
    v: *const DvVar,
    out: *mut *mut DvVar,
    op: impl FnOnce(&DimensionalVariable) -> DvResult<DimensionalVariable>,
) -> i32 {
    run(|| {
        // SAFETY: forwarded from the exported function's contract
        let x = unsafe { var(v, "v") }?;
        let result = op(x).map_err(fail)?;
        unsafe { put_var(out, result) }
    })
}

unsafe fn binary(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut *mut DvVar,
    op: impl FnOnce(&DimensionalVariable, &DimensionalVariable) -> DvResult<DimensionalVariable>,
) -> i32 {
    run(|| {
        // SAFETY: forwarded from the exported function's contract
        let (x, y) = unsafe { (var(a, "a")?, var(b, "b")?) };
        let result = op(x, y).map_err(fail)?;
        unsafe { put_var(out, result) }
    })
}

unsafe fn predicate(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut bool,
    op: impl FnOnce(&DimensionalVariable, &DimensionalVariable) -> DvResult<bool>,
) -> i32 {
    run(|| {
        // SAFETY: forwarded from the exported function's contract
        let (x, y) = unsafe { (var(a, "a")?, var(b, "b")?) };
        let result = op(x, y).map_err(fail)?;
        unsafe { put(out, result) }
    })
}

// =============================================================================
// Version and error reporting
// =============================================================================

/// Returns the library version as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn dv_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr().cast()
}

/// Returns the ABI version. Incremented only on breaking ABI changes.
#[no_mangle]
pub extern "C" fn dv_ffi_abi_version() -> u32 {
    1
}

/// Status code of the last failed call on this thread, or `DV_OK` if the
/// most recent call succeeded.
#[no_mangle]
pub extern "C" fn dv_last_error_code() -> i32 {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map_or(DV_OK, |(code, _)| *code))
}

/// Copies the last error message of this thread into `buf`.
///
/// Returns the full message length in bytes (excluding the NUL), or `0` if
/// there is no pending error. Pass a null `buf` to query the length.
///
/// # Safety
///
/// `buf` must be null or valid for `len` bytes of writes.
#[no_mangle]
pub unsafe extern "C" fn dv_last_error_message(buf: *mut c_char, len: usize) -> i32 {
    catch_panic!(DV_ERR_PANIC, {
        LAST_ERROR.with(|slot| match slot.borrow().as_ref() {
            // SAFETY: forwarded from this function's contract
            Some((_, message)) => unsafe { write_c_string(message, buf, len) },
            None => unsafe { write_c_string("", buf, len) },
        })
    })
}

// =============================================================================
// Construction and lifetime
// =============================================================================

/// Creates a variable from `value` expressed in `unit`.
///
/// Returns null on failure; see [`dv_last_error_code`].
///
/// # Safety
///
/// `unit` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dv_var_new(value: f64, unit: *const c_char) -> *mut DvVar {
    run_handle(|| {
        // SAFETY: forwarded from this function's contract
        let unit = unsafe { text(unit, "unit") }?;
        DimensionalVariable::new(value, unit).map_err(fail)
    })
}

/// Creates a unitless variable.
#[no_mangle]
pub extern "C" fn dv_var_unitless(value: f64) -> *mut DvVar {
    run_handle(|| Ok(DimensionalVariable::unitless(value)))
}

/// Returns an independent copy of `v`, or null if `v` is null.
///
/// # Safety
///
/// `v` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn dv_var_clone(v: *const DvVar) -> *mut DvVar {
    // SAFETY: forwarded from this function's contract
    run_handle(|| unsafe { var(v, "v") }.cloned())
}

/// Releases a handle. Null is ignored.
///
/// # Safety
///
/// `v` must be null or a live handle that is not used afterwards.
#[no_mangle]
pub unsafe extern "C" fn dv_var_free(v: *mut DvVar) {
    if v.is_null() {
        return;
    }
    catch_panic!((), {
        // SAFETY: the handle came from Box::into_raw and is released once
        drop(unsafe { Box::from_raw(v) });
    })
}

// =============================================================================
// Queries
// =============================================================================

/// Writes the SI value of `v` to `out`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_value(v: *const DvVar, out: *mut f64) -> i32 {
    run(|| {
        // SAFETY: forwarded from this function's contract
        let x = unsafe { var(v, "v") }?;
        unsafe { put(out, x.value()) }
    })
}

/// Writes the value of `v` expressed in `unit` to `out`.
///
/// # Returns
///
/// * `DV_OK` on success
/// * `DV_ERR_INVALID_UNIT_SYNTAX` / `DV_ERR_UNKNOWN_UNIT` if `unit` does not parse
/// * `DV_ERR_DIMENSION_MISMATCH` if `unit` has a different dimension
///
/// # Safety
///
/// `v` must be null or a live handle; `unit` must be null or a NUL-terminated
/// string; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_value_in(
    v: *const DvVar,
    unit: *const c_char,
    out: *mut f64,
) -> i32 {
    run(|| {
        // SAFETY: forwarded from this function's contract
        let x = unsafe { var(v, "v") }?;
        let unit = unsafe { text(unit, "unit") }?;
        let value = x.value_in(unit).map_err(fail)?;
        unsafe { put(out, value) }
    })
}

/// Writes whether `v` is dimensionless to `out`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_is_unitless(v: *const DvVar, out: *mut bool) -> i32 {
    run(|| {
        // SAFETY: forwarded from this function's contract
        let x = unsafe { var(v, "v") }?;
        unsafe { put(out, x.is_unitless()) }
    })
}

/// Writes the eight dimension exponents of `v` to `out`, in the order
/// m, kg, s, K, A, mol, cd, rad.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or valid for eight
/// `DvRational` writes.
#[no_mangle]
pub unsafe extern "C" fn dv_var_base_units(v: *const DvVar, out: *mut DvRational) -> i32 {
    run(|| {
        // SAFETY: forwarded from this function's contract
        let x = unsafe { var(v, "v") }?;
        if out.is_null() {
            return Err(null_argument("out"));
        }
        for (i, e) in x.base_units().into_iter().enumerate().take(BASE_COUNT) {
            // SAFETY: the caller provides room for BASE_COUNT entries
            unsafe { out.add(i).write(DvRational::from(e)) };
        }
        Ok(())
    })
}

/// Formats `v` as `"<value> <unit>"` into `buf`.
///
/// Returns the full length in bytes (excluding the NUL), or a negative status
/// code. The output is truncated to `len - 1` bytes; pass a null `buf` to
/// query the length.
///
/// # Safety
///
/// `v` must be null or a live handle; `buf` must be null or valid for `len`
/// bytes of writes.
#[no_mangle]
pub unsafe extern "C" fn dv_var_to_string(v: *const DvVar, buf: *mut c_char, len: usize) -> i32 {
    catch_panic!(panicked(), {
        // SAFETY: forwarded from this function's contract
        match unsafe { var(v, "v") } {
            Ok(x) => {
                clear_last_error();
                unsafe { write_c_string(&x.to_string(), buf, len) }
            }
            Err(code) => code,
        }
    })
}

// =============================================================================
// Arithmetic
// =============================================================================

/// `a + b`. Fails with `DV_ERR_DIMENSION_MISMATCH` on differing dimensions.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_add(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut *mut DvVar,
) -> i32 {
    unsafe { binary(a, b, out, DimensionalVariable::try_add) }
}

/// `a - b`. Fails with `DV_ERR_DIMENSION_MISMATCH` on differing dimensions.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_sub(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut *mut DvVar,
) -> i32 {
    unsafe { binary(a, b, out, DimensionalVariable::try_sub) }
}

/// `a * b`.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_mul(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut *mut DvVar,
) -> i32 {
    unsafe { binary(a, b, out, DimensionalVariable::mul) }
}

/// `a / b`.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_div(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut *mut DvVar,
) -> i32 {
    unsafe { binary(a, b, out, DimensionalVariable::div) }
}

/// `v * s`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_mul_scalar(v: *const DvVar, s: f64, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, |x| Ok(x.mul_scalar(s))) }
}

/// `v / s`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_div_scalar(v: *const DvVar, s: f64, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, |x| Ok(x.div_scalar(s))) }
}

/// `s / v`; the dimension is inverted.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_rdiv_scalar(v: *const DvVar, s: f64, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, |x| Ok(x.rdiv_scalar(s))) }
}

/// `v` raised to the integer power `n`.
///
/// Fails with `DV_ERR_EXPONENT_OVERFLOW` when a resulting exponent would leave
/// the representable range.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_powi(v: *const DvVar, n: i64, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, |x| x.powi(n)) }
}

/// `v` raised to the real power `e`.
///
/// Fails with `DV_ERR_NON_INTEGRAL_DIMENSION` when a dimensioned `v` would
/// end up with fractional exponents.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_powf(v: *const DvVar, e: f64, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, |x| x.powf(e)) }
}

/// Square root of `v`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_sqrt(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::sqrt) }
}

/// `-v`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_neg(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, |x| Ok(x.neg())) }
}

/// `|v|`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_abs(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, |x| Ok(x.abs())) }
}

// =============================================================================
// Transcendental functions
// =============================================================================

/// Natural logarithm of a unitless `v`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_ln(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::ln) }
}

/// Base-2 logarithm of a unitless `v`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_log2(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::log2) }
}

/// Base-10 logarithm of a unitless `v`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_log10(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::log10) }
}

/// Sine of an angle or unitless `v`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_sin(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::sin) }
}

/// Cosine of an angle or unitless `v`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_cos(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::cos) }
}

/// Tangent of an angle or unitless `v`.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_tan(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::tan) }
}

/// Arcsine of a unitless `v`, as an angle.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_asin(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::asin) }
}

/// Arccosine of a unitless `v`, as an angle.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_acos(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::acos) }
}

/// Arctangent of a unitless `v`, as an angle.
///
/// # Safety
///
/// `v` must be null or a live handle; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_atan(v: *const DvVar, out: *mut *mut DvVar) -> i32 {
    unsafe { unary(v, out, DimensionalVariable::atan) }
}

/// Arcsine of a plain number, as an angle.
///
/// # Safety
///
/// `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_asin_scalar(x: f64, out: *mut *mut DvVar) -> i32 {
    run(|| {
        let angle = dv_core::asin_scalar(x).map_err(fail)?;
        // SAFETY: forwarded from this function's contract
        unsafe { put_var(out, angle) }
    })
}

/// Arccosine of a plain number, as an angle.
///
/// # Safety
///
/// `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_acos_scalar(x: f64, out: *mut *mut DvVar) -> i32 {
    run(|| {
        let angle = dv_core::acos_scalar(x).map_err(fail)?;
        // SAFETY: forwarded from this function's contract
        unsafe { put_var(out, angle) }
    })
}

/// Arctangent of a plain number, as an angle.
///
/// # Safety
///
/// `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_atan_scalar(x: f64, out: *mut *mut DvVar) -> i32 {
    run(|| {
        let angle = dv_core::atan_scalar(x).map_err(fail)?;
        // SAFETY: forwarded from this function's contract
        unsafe { put_var(out, angle) }
    })
}

// =============================================================================
// Comparisons
// =============================================================================

/// Writes `a == b` to `out`. Differing dimensions are an error, not `false`.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_equals(a: *const DvVar, b: *const DvVar, out: *mut bool) -> i32 {
    unsafe { predicate(a, b, out, DimensionalVariable::equals) }
}

/// Writes `a != b` to `out`.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_not_equals(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut bool,
) -> i32 {
    unsafe { predicate(a, b, out, DimensionalVariable::not_equals) }
}

/// Writes `a < b` to `out`.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_less_than(a: *const DvVar, b: *const DvVar, out: *mut bool) -> i32 {
    unsafe { predicate(a, b, out, DimensionalVariable::less_than) }
}

/// Writes `a <= b` to `out`.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_less_equal(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut bool,
) -> i32 {
    unsafe { predicate(a, b, out, DimensionalVariable::less_equal) }
}

/// Writes `a > b` to `out`.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_greater_than(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut bool,
) -> i32 {
    unsafe { predicate(a, b, out, DimensionalVariable::greater_than) }
}

/// Writes `a >= b` to `out`.
///
/// # Safety
///
/// `a`, `b` must be null or live handles; `out` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn dv_var_greater_equal(
    a: *const DvVar,
    b: *const DvVar,
    out: *mut bool,
) -> i32 {
    unsafe { predicate(a, b, out, DimensionalVariable::greater_equal) }
}
