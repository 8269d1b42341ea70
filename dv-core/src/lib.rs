//! Runtime dimensional analysis.
//!
//! `dv-core` tracks the physical dimension of floating-point values at run
//! time. A [`DimensionalVariable`] is an `f64` stored in SI base units together
//! with a [`Dimension`]: eight exact rational exponents over
//! `[m, kg, s, K, A, mol, cd, rad]`.
//!
//! - Unit strings such as `"kg*m/s^2"`, `"BTU-in/hr-ft^2-F"` or `"km^(1/2)"` are
//!   parsed against a fixed unit and SI-prefix table ([`parse_unit`]).
//! - Arithmetic combines dimensions; addition, subtraction and every comparison
//!   require identical dimensions. Exponents are bounded, so products and
//!   powers report overflow instead of wrapping.
//! - Logarithms need unitless operands, trigonometric functions accept unitless
//!   values or angles, and the inverse trigonometric functions return angles.
//!
//! Every illegal operation returns a [`DvError`]; nothing panics on bad input.
//!
//! # Quick start
//!
//! ```rust
//! use dv_core::DimensionalVariable;
//!
//! # fn main() -> Result<(), dv_core::DvError> {
//! let distance = DimensionalVariable::new(100.0, "m")?;
//! let time = DimensionalVariable::new(9.58, "s")?;
//! let speed = (&distance / &time)?;
//!
//! let mph = speed.value_in("mi/hr")?;
//! assert!((mph - 23.35).abs() < 0.01);
//!
//! // Adding a length to a time is an error, not a panic.
//! assert!((&distance + &time).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`DimensionalVariable`] as
//!   `{"value": .., "unit": ..}`.

mod dimension;
mod error;
mod math;
mod ops;
mod parser;
mod registry;
#[cfg(feature = "serde")]
mod serde_impl;
mod variable;

pub use dimension::{BaseQuantity, Dimension, Exponent, BASE_COUNT, BASE_SYMBOLS, MAX_EXPONENT_PART};
pub use error::{DvError, DvResult, ErrorKind};
pub use math::{acos_scalar, asin_scalar, atan_scalar};
pub use parser::parse_unit;
pub use registry::{registry, PrefixDescriptor, Registry, UnitDescriptor, PREFIXES};
pub use variable::DimensionalVariable;

/// Rational type used for exponents, re-exported for callers that build
/// dimensions by hand.
pub use num_rational::Ratio;

/// Version of this crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_manifest() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
        assert!(version().split('.').count() >= 3);
    }

    #[test]
    fn value_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DimensionalVariable>();
        assert_send_sync::<Dimension>();
        assert_send_sync::<DvError>();
        assert_send_sync::<&'static Registry>();
    }
}
