//! Operator overloads.
//!
//! Scalar `*` and `/` and unary `-` are infallible and return a
//! [`DimensionalVariable`]. Between two variables, `+` and `-` fail on a
//! dimension mismatch and `*` and `/` on exponent overflow, so all four return
//! a [`DvResult`]; apply `?` to the result.
//!
//! ```rust
//! use dv_core::DimensionalVariable;
//!
//! # fn main() -> Result<(), dv_core::DvError> {
//! let d = DimensionalVariable::new(100.0, "m")?;
//! let t = DimensionalVariable::new(20.0, "s")?;
//! let v = (&d / &t)?;
//! let faster = (&v + &DimensionalVariable::new(1.0, "m/s")?)?;
//! assert_eq!((2.0 * &t).value(), 40.0);
//! assert_eq!(faster.value(), 6.0);
//! assert!((&d + &t).is_err());
//! # Ok(())
//! # }
//! ```

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::DvResult;
use crate::variable::DimensionalVariable;

/// Implements a binary operator for every owned/borrowed combination by
/// delegating to the inherent method `$method(&self, &other)`.
macro_rules! impl_binary_op {
    ($trait:ident, $fn:ident, $method:ident, $out:ty) => {
        impl<'a, 'b> $trait<&'b DimensionalVariable> for &'a DimensionalVariable {
            type Output = $out;
            #[inline]
            fn $fn(self, rhs: &'b DimensionalVariable) -> $out {
                DimensionalVariable::$method(self, rhs)
            }
        }

        impl $trait<DimensionalVariable> for DimensionalVariable {
            type Output = $out;
            #[inline]
            fn $fn(self, rhs: DimensionalVariable) -> $out {
                DimensionalVariable::$method(&self, &rhs)
            }
        }

        impl<'b> $trait<&'b DimensionalVariable> for DimensionalVariable {
            type Output = $out;
            #[inline]
            fn $fn(self, rhs: &'b DimensionalVariable) -> $out {
                DimensionalVariable::$method(&self, rhs)
            }
        }

        impl<'a> $trait<DimensionalVariable> for &'a DimensionalVariable {
            type Output = $out;
            #[inline]
            fn $fn(self, rhs: DimensionalVariable) -> $out {
                DimensionalVariable::$method(self, &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, try_add, DvResult<DimensionalVariable>);
impl_binary_op!(Sub, sub, try_sub, DvResult<DimensionalVariable>);
impl_binary_op!(Mul, mul, mul, DvResult<DimensionalVariable>);
impl_binary_op!(Div, div, div, DvResult<DimensionalVariable>);

/// `dv * s`, `dv / s`, `s * dv` and `s / dv` for owned and borrowed operands.
macro_rules! impl_scalar_ops {
    ($($lhs:ty),*) => {$(
        impl Mul<f64> for $lhs {
            type Output = DimensionalVariable;
            #[inline]
            fn mul(self, rhs: f64) -> DimensionalVariable {
                self.mul_scalar(rhs)
            }
        }

        impl Div<f64> for $lhs {
            type Output = DimensionalVariable;
            #[inline]
            fn div(self, rhs: f64) -> DimensionalVariable {
                self.div_scalar(rhs)
            }
        }

        impl Mul<$lhs> for f64 {
            type Output = DimensionalVariable;
            #[inline]
            fn mul(self, rhs: $lhs) -> DimensionalVariable {
                rhs.mul_scalar(self)
            }
        }

        impl Div<$lhs> for f64 {
            type Output = DimensionalVariable;
            #[inline]
            fn div(self, rhs: $lhs) -> DimensionalVariable {
                rhs.rdiv_scalar(self)
            }
        }

        impl Neg for $lhs {
            type Output = DimensionalVariable;
            #[inline]
            fn neg(self) -> DimensionalVariable {
                DimensionalVariable::neg(&self)
            }
        }
    )*};
}

impl_scalar_ops!(DimensionalVariable, &DimensionalVariable);
