//! The [`DimensionalVariable`] value type: construction, conversion, arithmetic
//! and dimension-checked comparison.

use core::cmp::Ordering;
use core::fmt;

use num_rational::Ratio;

use crate::dimension::{Dimension, Exponent, BASE_COUNT};
use crate::error::{DvError, DvResult};
use crate::parser::parse_unit;

/// Largest denominator tried when matching a float exponent to a rational.
const MAX_EXPONENT_DENOM: i64 = 16;

/// Absolute distance from `p/q` still accepted as that rational.
const EXPONENT_TOLERANCE: f64 = 1e-9;

/// A number carrying a physical dimension.
///
/// The value is stored in SI base units; the unit string given at construction
/// only affects the stored magnitude. Every operation returns a fresh value.
///
/// Comparing values of different dimensions is an error rather than `false`,
/// so the type has no `PartialEq`/`PartialOrd`; use [`equals`](Self::equals),
/// [`less_than`](Self::less_than) and the other named comparisons.
#[derive(Debug, Clone)]
pub struct DimensionalVariable {
    value: f64,
    dimension: Dimension,
}

impl DimensionalVariable {
    /// Creates a variable from a value expressed in `unit`.
    ///
    /// ```rust
    /// use dv_core::DimensionalVariable;
    ///
    /// let v = DimensionalVariable::new(1.0, "km").unwrap();
    /// assert_eq!(v.value(), 1000.0);
    /// ```
    pub fn new(value: f64, unit: &str) -> DvResult<Self> {
        let (dimension, scale) = parse_unit(unit)?;
        Ok(Self {
            value: value * scale,
            dimension,
        })
    }

    /// Creates a variable directly from an SI value and its dimension.
    pub const fn from_si(value: f64, dimension: Dimension) -> Self {
        Self { value, dimension }
    }

    /// A dimensionless value.
    pub const fn unitless(value: f64) -> Self {
        Self::from_si(value, Dimension::UNITLESS)
    }

    /// Raw value in SI base units.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value expressed in `unit`.
    ///
    /// Fails with [`DvError::DimensionMismatch`] when `unit` does not have
    /// exactly this variable's dimension.
    pub fn value_in(&self, unit: &str) -> DvResult<f64> {
        let (dimension, scale) = parse_unit(unit)?;
        if dimension != self.dimension {
            return Err(DvError::mismatch(self.dimension, dimension));
        }
        Ok(self.value / scale)
    }

    /// Dimension of this variable.
    #[inline]
    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    /// The eight rational exponents `[m, kg, s, K, A, mol, cd, rad]`.
    pub fn base_units(&self) -> [Exponent; BASE_COUNT] {
        *self.dimension.exponents()
    }

    /// `true` when every exponent is zero.
    #[inline]
    pub fn is_unitless(&self) -> bool {
        self.dimension.is_unitless()
    }

    /// `true` when the dimension is exactly `rad¹`.
    #[inline]
    pub fn is_angle(&self) -> bool {
        self.dimension.is_angle()
    }

    fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            dimension: self.dimension,
        }
    }

    fn same_dimension(&self, other: &Self) -> DvResult<()> {
        if self.dimension == other.dimension {
            Ok(())
        } else {
            Err(DvError::mismatch(self.dimension, other.dimension))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Arithmetic
    // ─────────────────────────────────────────────────────────────────────────

    /// Sum of two variables of identical dimension.
    pub fn try_add(&self, other: &Self) -> DvResult<Self> {
        self.same_dimension(other)?;
        Ok(self.with_value(self.value + other.value))
    }

    /// Difference of two variables of identical dimension.
    pub fn try_sub(&self, other: &Self) -> DvResult<Self> {
        self.same_dimension(other)?;
        Ok(self.with_value(self.value - other.value))
    }

    /// Product; exponents add.
    ///
    /// Fails with [`DvError::ExponentOverflow`] only when a resulting exponent
    /// leaves the representable range.
    pub fn mul(&self, other: &Self) -> DvResult<Self> {
        let dimension = self
            .dimension
            .checked_mul(&other.dimension)
            .ok_or_else(|| DvError::overflow("mul", self.dimension))?;
        Ok(Self {
            value: self.value * other.value,
            dimension,
        })
    }

    /// Quotient; exponents subtract. Zero divisors follow IEEE rules.
    pub fn div(&self, other: &Self) -> DvResult<Self> {
        let dimension = self
            .dimension
            .checked_div(&other.dimension)
            .ok_or_else(|| DvError::overflow("div", self.dimension))?;
        Ok(Self {
            value: self.value / other.value,
            dimension,
        })
    }

    pub fn mul_scalar(&self, s: f64) -> Self {
        self.with_value(self.value * s)
    }

    pub fn div_scalar(&self, s: f64) -> Self {
        self.with_value(self.value / s)
    }

    /// `s / self`: the dimension is inverted.
    pub fn rdiv_scalar(&self, s: f64) -> Self {
        Self {
            value: s / self.value,
            dimension: self.dimension.recip(),
        }
    }

    /// Integer power. `powi(0)` is unitless `1`.
    pub fn powi(&self, n: i64) -> DvResult<Self> {
        let dimension = self
            .dimension
            .checked_powi(n)
            .ok_or_else(|| DvError::overflow("powi", self.dimension))?;
        let value = match i32::try_from(n) {
            Ok(n) => self.value.powi(n),
            Err(_) => self.value.powf(n as f64),
        };
        Ok(Self { value, dimension })
    }

    /// Real power.
    ///
    /// Unitless operands accept any exponent. For a dimensioned operand the
    /// exponent must be a rational `p/q` (with `q ≤ 16`) that leaves every
    /// exponent of the result integral, otherwise
    /// [`DvError::NonIntegralDimension`] is returned. So `m^2` may be raised to
    /// `0.5` and `m^3` to `1/3` (approximately), but `m` may not be raised to `0.5`.
    pub fn powf(&self, exp: f64) -> DvResult<Self> {
        if self.is_unitless() {
            return Ok(self.with_value(self.value.powf(exp)));
        }

        let non_integral = DvError::NonIntegralDimension {
            op: "powf",
            dimension: self.dimension,
            exponent: exp,
        };
        let Some(r) = rational_exponent(exp) else {
            return Err(non_integral);
        };
        if r.is_integer() {
            return self.powi(*r.numer());
        }

        let dimension = self
            .dimension
            .checked_scale(r)
            .ok_or_else(|| DvError::overflow("powf", self.dimension))?;
        if !dimension.is_integral() {
            return Err(non_integral);
        }
        Ok(Self {
            value: self.value.powf(exp),
            dimension,
        })
    }

    /// Square root. Every exponent must be even and the value non-negative.
    pub fn sqrt(&self) -> DvResult<Self> {
        let Some(dimension) = self
            .dimension
            .checked_scale(Ratio::new(1, 2))
            .filter(Dimension::is_integral)
        else {
            return Err(DvError::NonIntegralDimension {
                op: "sqrt",
                dimension: self.dimension,
                exponent: 0.5,
            });
        };
        if self.value < 0.0 {
            return Err(DvError::DomainError {
                op: "sqrt",
                value: self.value,
            });
        }
        Ok(Self {
            value: self.value.sqrt(),
            dimension,
        })
    }

    pub fn neg(&self) -> Self {
        self.with_value(-self.value)
    }

    pub fn abs(&self) -> Self {
        self.with_value(self.value.abs())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Comparison
    // ─────────────────────────────────────────────────────────────────────────

    /// Ordering of the SI values, or `None` if either is NaN.
    ///
    /// Fails with [`DvError::DimensionMismatch`] if the dimensions differ.
    pub fn compare(&self, other: &Self) -> DvResult<Option<Ordering>> {
        self.same_dimension(other)?;
        Ok(self.value.partial_cmp(&other.value))
    }

    /// Exact equality of SI values. Mismatched dimensions are an error.
    pub fn equals(&self, other: &Self) -> DvResult<bool> {
        self.same_dimension(other)?;
        Ok(self.value == other.value)
    }

    pub fn not_equals(&self, other: &Self) -> DvResult<bool> {
        self.same_dimension(other)?;
        Ok(self.value != other.value)
    }

    pub fn less_than(&self, other: &Self) -> DvResult<bool> {
        self.same_dimension(other)?;
        Ok(self.value < other.value)
    }

    pub fn less_equal(&self, other: &Self) -> DvResult<bool> {
        self.same_dimension(other)?;
        Ok(self.value <= other.value)
    }

    pub fn greater_than(&self, other: &Self) -> DvResult<bool> {
        self.same_dimension(other)?;
        Ok(self.value > other.value)
    }

    pub fn greater_equal(&self, other: &Self) -> DvResult<bool> {
        self.same_dimension(other)?;
        Ok(self.value >= other.value)
    }
}

/// Matches `exp` to `p/q` with the smallest `q ≤ MAX_EXPONENT_DENOM`.
fn rational_exponent(exp: f64) -> Option<Exponent> {
    if !exp.is_finite() || exp.abs() > f64::from(i32::MAX) {
        return None;
    }
    (1..=MAX_EXPONENT_DENOM).find_map(|q| {
        let scaled = exp * q as f64;
        let p = scaled.round();
        ((scaled - p).abs() <= EXPONENT_TOLERANCE).then(|| Ratio::new(p as i64, q))
    })
}

impl fmt::Display for DimensionalVariable {
    /// `<value> <unit>`, e.g. `9.81 m/s^2`, `60 1/s` or `42 (unitless)`.
    ///
    /// A precision (`{:.3}`) applies to the value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} {}", p, self.value, self.dimension),
            None => write!(f, "{} {}", self.value, self.dimension),
        }
    }
}

impl Default for DimensionalVariable {
    fn default() -> Self {
        Self::unitless(0.0)
    }
}
