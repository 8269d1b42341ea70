//! ABI types and status codes.
//!
//! Status code values and the layout of [`DvRational`] are part of the ABI
//! contract: existing values never change, new codes are only appended.

use dv_core::{DimensionalVariable, ErrorKind, Exponent};

/// Success.
pub const DV_OK: i32 = 0;
/// The unit string is malformed.
pub const DV_ERR_INVALID_UNIT_SYNTAX: i32 = -1;
/// The unit string names a symbol the registry does not know.
pub const DV_ERR_UNKNOWN_UNIT: i32 = -2;
/// Operands (or operand and target unit) have different dimensions.
pub const DV_ERR_DIMENSION_MISMATCH: i32 = -3;
/// The operation needs a unitless operand.
pub const DV_ERR_REQUIRES_UNITLESS: i32 = -4;
/// The operation needs an angle or unitless operand.
pub const DV_ERR_REQUIRES_ANGLE_OR_UNITLESS: i32 = -5;
/// The value is outside the mathematical domain of the operation.
pub const DV_ERR_DOMAIN: i32 = -6;
/// A power would leave non-integral dimension exponents.
pub const DV_ERR_NON_INTEGRAL_DIMENSION: i32 = -7;
/// A required pointer argument was null.
pub const DV_ERR_NULL_POINTER: i32 = -8;
/// A string argument is not valid UTF-8.
pub const DV_ERR_INVALID_UTF8: i32 = -9;
/// A panic was caught at the boundary.
pub const DV_ERR_PANIC: i32 = -10;
/// A product, quotient or power would overflow a dimension exponent.
pub const DV_ERR_EXPONENT_OVERFLOW: i32 = -11;

/// Maps an engine error kind to its C status code.
pub const fn status_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::InvalidUnitSyntax => DV_ERR_INVALID_UNIT_SYNTAX,
        ErrorKind::UnknownUnitSymbol => DV_ERR_UNKNOWN_UNIT,
        ErrorKind::DimensionMismatch => DV_ERR_DIMENSION_MISMATCH,
        ErrorKind::RequiresUnitless => DV_ERR_REQUIRES_UNITLESS,
        ErrorKind::RequiresAngleOrUnitless => DV_ERR_REQUIRES_ANGLE_OR_UNITLESS,
        ErrorKind::DomainError => DV_ERR_DOMAIN,
        ErrorKind::NonIntegralDimension => DV_ERR_NON_INTEGRAL_DIMENSION,
        ErrorKind::ExponentOverflow => DV_ERR_EXPONENT_OVERFLOW,
    }
}

/// One dimension exponent as an exact fraction `num / den`, with `den > 0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DvRational {
    /// Numerator.
    pub num: i64,
    /// Denominator, always positive.
    pub den: i64,
}

impl Default for DvRational {
    fn default() -> Self {
        Self { num: 0, den: 1 }
    }
}

impl From<Exponent> for DvRational {
    fn from(e: Exponent) -> Self {
        Self {
            num: *e.numer(),
            den: *e.denom(),
        }
    }
}

impl DvRational {
    /// The exponent as a float.
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

/// Opaque handle to a heap-allocated dimensional variable.
///
/// Created by `dv_var_new` and the operation functions; released with
/// `dv_var_free`.
#[derive(Debug, Clone)]
pub struct DvVar {
    pub(crate) inner: DimensionalVariable,
}

impl DvVar {
    /// Borrows the wrapped variable.
    pub fn get(&self) -> &DimensionalVariable {
        &self.inner
    }
}

impl From<DimensionalVariable> for DvVar {
    fn from(inner: DimensionalVariable) -> Self {
        Self { inner }
    }
}
