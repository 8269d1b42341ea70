//! C-compatible FFI bindings (and optional Python bindings) for `dv-core`.
//!
//! `dv-ffi` exposes the dimensional-analysis engine through a stable C ABI so
//! that C, C++ or any language with C interop can construct variables, combine
//! them with dimension checking and read values back in arbitrary units.
//!
//! # Quick Start (C)
//!
//! ```c
//! #include "dv_ffi.h"
//!
//! DvVar *mass = dv_var_new(10.0, "kg");
//! DvVar *accel = dv_var_new(9.81, "m/s^2");
//! DvVar *force = NULL;
//! if (dv_var_mul(mass, accel, &force) == DV_OK) {
//!     double newtons;
//!     dv_var_value_in(force, "N", &newtons); // 98.1
//! }
//! dv_var_free(force);
//! dv_var_free(accel);
//! dv_var_free(mass);
//! ```
//!
//! The header `include/dv_ffi.h` is regenerated by `cbindgen` on every build.
//!
//! # Error Handling
//!
//! Fallible functions return [`DV_OK`] or one of the negative `DV_ERR_*`
//! codes, one per engine [`ErrorKind`](dv_core::ErrorKind) plus
//! [`DV_ERR_NULL_POINTER`], [`DV_ERR_INVALID_UTF8`] and [`DV_ERR_PANIC`].
//! The message of the last failure on the calling thread is available through
//! [`dv_last_error_message`].
//!
//! # Python
//!
//! With the `python` feature the crate also builds a `dv` extension module
//! (pyo3) exposing `DimensionalVariable` with operator overloads and one
//! exception class per error kind.
//!
//! # Thread Safety
//!
//! Handles may be shared read-only between threads. The unit registry is
//! immutable after first use. The last-error record is thread-local.

#![deny(missing_docs)]
// PyO3 generated code contains unsafe operations, so we can't enforce this when python feature is enabled
#![cfg_attr(not(feature = "python"), deny(unsafe_op_in_unsafe_fn))]

mod ffi;
#[cfg(feature = "python")]
mod python;
mod types;

pub use ffi::{
    dv_acos_scalar, dv_asin_scalar, dv_atan_scalar, dv_ffi_abi_version, dv_last_error_code,
    dv_last_error_message, dv_var_abs, dv_var_acos, dv_var_add, dv_var_asin, dv_var_atan,
    dv_var_base_units, dv_var_clone, dv_var_cos, dv_var_div, dv_var_div_scalar, dv_var_equals,
    dv_var_free, dv_var_greater_equal, dv_var_greater_than, dv_var_is_unitless, dv_var_less_equal,
    dv_var_less_than, dv_var_ln, dv_var_log10, dv_var_log2, dv_var_mul, dv_var_mul_scalar,
    dv_var_neg, dv_var_new, dv_var_not_equals, dv_var_powf, dv_var_powi, dv_var_rdiv_scalar,
    dv_var_sin, dv_var_sqrt, dv_var_sub, dv_var_tan, dv_var_to_string, dv_var_unitless,
    dv_var_value, dv_var_value_in, dv_version,
};

pub use types::{
    status_code, DvRational, DvVar, DV_ERR_DIMENSION_MISMATCH, DV_ERR_DOMAIN,
    DV_ERR_EXPONENT_OVERFLOW, DV_ERR_INVALID_UNIT_SYNTAX, DV_ERR_INVALID_UTF8,
    DV_ERR_NON_INTEGRAL_DIMENSION, DV_ERR_NULL_POINTER, DV_ERR_PANIC,
    DV_ERR_REQUIRES_ANGLE_OR_UNITLESS, DV_ERR_REQUIRES_UNITLESS, DV_ERR_UNKNOWN_UNIT, DV_OK,
};
