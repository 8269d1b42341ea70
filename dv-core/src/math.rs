//! Transcendental functions with dimensional preconditions.
//!
//! | function              | operand                    | result    |
//! |-----------------------|----------------------------|-----------|
//! | `ln`, `log2`, `log10` | unitless, value > 0        | unitless  |
//! | `sin`, `cos`, `tan`   | unitless or exactly `rad`  | unitless  |
//! | `asin`, `acos`        | unitless, value in [-1, 1] | `rad`     |
//! | `atan`                | unitless                   | `rad`     |
//!
//! Angles are always read and produced in radians; a value built from `deg`
//! already holds radians internally.

use crate::dimension::Dimension;
use crate::error::{DvError, DvResult};
use crate::variable::DimensionalVariable;

impl DimensionalVariable {
    fn require_unitless(&self, op: &'static str) -> DvResult<()> {
        if self.is_unitless() {
            Ok(())
        } else {
            Err(DvError::RequiresUnitless {
                op,
                dimension: *self.dimension(),
            })
        }
    }

    fn require_angle_or_unitless(&self, op: &'static str) -> DvResult<()> {
        if self.is_unitless() || self.is_angle() {
            Ok(())
        } else {
            Err(DvError::RequiresAngleOrUnitless {
                op,
                dimension: *self.dimension(),
            })
        }
    }

    fn logarithm(&self, op: &'static str, f: fn(f64) -> f64) -> DvResult<Self> {
        self.require_unitless(op)?;
        let v = self.value();
        // `!(v > 0)` also rejects NaN
        if !(v > 0.0) {
            return Err(DvError::DomainError { op, value: v });
        }
        Ok(Self::unitless(f(v)))
    }

    fn trig(&self, op: &'static str, f: fn(f64) -> f64) -> DvResult<Self> {
        self.require_angle_or_unitless(op)?;
        Ok(Self::unitless(f(self.value())))
    }

    pub fn ln(&self) -> DvResult<Self> {
        self.logarithm("ln", f64::ln)
    }

    pub fn log2(&self) -> DvResult<Self> {
        self.logarithm("log2", f64::log2)
    }

    pub fn log10(&self) -> DvResult<Self> {
        self.logarithm("log10", f64::log10)
    }

    /// Sine of a unitless number or an angle, in radians.
    pub fn sin(&self) -> DvResult<Self> {
        self.trig("sin", f64::sin)
    }

    pub fn cos(&self) -> DvResult<Self> {
        self.trig("cos", f64::cos)
    }

    pub fn tan(&self) -> DvResult<Self> {
        self.trig("tan", f64::tan)
    }

    /// Arcsine of a unitless ratio; the result is an angle.
    pub fn asin(&self) -> DvResult<Self> {
        self.require_unitless("asin")?;
        asin_scalar(self.value())
    }

    /// Arccosine of a unitless ratio; the result is an angle.
    pub fn acos(&self) -> DvResult<Self> {
        self.require_unitless("acos")?;
        acos_scalar(self.value())
    }

    /// Arctangent of a unitless ratio; the result is an angle.
    pub fn atan(&self) -> DvResult<Self> {
        self.require_unitless("atan")?;
        atan_scalar(self.value())
    }
}

fn inverse_trig(op: &'static str, x: f64, f: fn(f64) -> f64) -> DvResult<DimensionalVariable> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(DvError::DomainError { op, value: x });
    }
    Ok(DimensionalVariable::from_si(f(x), Dimension::ANGLE))
}

/// `asin(x)` as an angle. `x` must lie in `[-1, 1]`.
pub fn asin_scalar(x: f64) -> DvResult<DimensionalVariable> {
    inverse_trig("asin", x, f64::asin)
}

/// `acos(x)` as an angle. `x` must lie in `[-1, 1]`.
pub fn acos_scalar(x: f64) -> DvResult<DimensionalVariable> {
    inverse_trig("acos", x, f64::acos)
}

/// `atan(x)` as an angle. Never fails; the `Result` keeps the three inverse
/// functions interchangeable.
pub fn atan_scalar(x: f64) -> DvResult<DimensionalVariable> {
    Ok(DimensionalVariable::from_si(x.atan(), Dimension::ANGLE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn dv(value: f64, unit: &str) -> DimensionalVariable {
        DimensionalVariable::new(value, unit).unwrap()
    }

    #[test]
    fn logs_of_unitless() {
        let x = DimensionalVariable::unitless(8.0);
        assert_relative_eq!(x.ln().unwrap().value(), 8f64.ln());
        assert_relative_eq!(x.log2().unwrap().value(), 3.0);
        assert_relative_eq!(x.log10().unwrap().value(), 8f64.log10());
        assert!(x.ln().unwrap().is_unitless());
    }

    #[test]
    fn logs_reject_dimensioned_operands() {
        let m = dv(10.0, "m");
        for result in [m.ln(), m.log2(), m.log10()] {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::RequiresUnitless);
        }
        // angle is not unitless for logarithms
        assert_eq!(
            dv(1.0, "rad").ln().unwrap_err().kind(),
            ErrorKind::RequiresUnitless
        );
    }

    #[test]
    fn logs_reject_non_positive() {
        for v in [0.0, -1.0, f64::NAN] {
            let x = DimensionalVariable::unitless(v);
            assert_eq!(x.ln().unwrap_err().kind(), ErrorKind::DomainError);
            assert_eq!(x.log2().unwrap_err().kind(), ErrorKind::DomainError);
            assert_eq!(x.log10().unwrap_err().kind(), ErrorKind::DomainError);
        }
    }

    #[test]
    fn trig_accepts_unitless_and_angles() {
        assert_relative_eq!(
            DimensionalVariable::unitless(FRAC_PI_2).sin().unwrap().value(),
            1.0
        );
        assert_relative_eq!(dv(FRAC_PI_2, "rad").sin().unwrap().value(), 1.0);
        assert_relative_eq!(dv(90.0, "deg").sin().unwrap().value(), 1.0);
        assert_relative_eq!(dv(180.0, "deg").cos().unwrap().value(), -1.0);
        assert_relative_eq!(dv(45.0, "deg").tan().unwrap().value(), 1.0, max_relative = 1e-12);
        assert!(dv(1.0, "rad").cos().unwrap().is_unitless());
    }

    #[test]
    fn trig_rejects_other_dimensions() {
        for unit in ["m", "rad^2", "rad/s", "s"] {
            let err = dv(1.0, unit).sin().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::RequiresAngleOrUnitless, "{unit}");
        }
    }

    #[test]
    fn inverse_trig_returns_angles() {
        let a = asin_scalar(1.0).unwrap();
        assert!(a.is_angle());
        assert_relative_eq!(a.value(), FRAC_PI_2);
        assert_relative_eq!(a.value_in("deg").unwrap(), 90.0, max_relative = 1e-12);

        let c = DimensionalVariable::unitless(-1.0).acos().unwrap();
        assert_relative_eq!(c.value(), PI);

        let t = atan_scalar(1.0).unwrap();
        assert!(t.is_angle());
        assert_relative_eq!(t.value(), FRAC_PI_4);
        assert_abs_diff_eq!(DimensionalVariable::unitless(0.0).atan().unwrap().value(), 0.0);
    }

    #[test]
    fn inverse_trig_domain_and_dimension() {
        assert_eq!(asin_scalar(1.5).unwrap_err().kind(), ErrorKind::DomainError);
        assert_eq!(acos_scalar(-1.01).unwrap_err().kind(), ErrorKind::DomainError);
        assert_eq!(asin_scalar(f64::NAN).unwrap_err().kind(), ErrorKind::DomainError);

        let m = dv(0.5, "m");
        assert_eq!(m.asin().unwrap_err().kind(), ErrorKind::RequiresUnitless);
        assert_eq!(m.acos().unwrap_err().kind(), ErrorKind::RequiresUnitless);
        assert_eq!(m.atan().unwrap_err().kind(), ErrorKind::RequiresUnitless);
        assert_eq!(
            dv(0.5, "rad").asin().unwrap_err().kind(),
            ErrorKind::RequiresUnitless
        );
    }
}
