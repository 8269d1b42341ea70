//! Rational dimension vectors.
//!
//! A [`Dimension`] stores one exact rational exponent per base quantity, in the
//! fixed order `[L, M, T, Θ, I, N, J, Φ]`. Multiplying quantities adds
//! exponents, dividing subtracts them and raising to a power scales them.
//! Angle is kept as an independent base quantity so `rad` and a plain number
//! remain distinguishable.
//!
//! Every numerator and denominator stays within `±MAX_EXPONENT_PART`. The
//! combining operations are checked and return `None` when a result would
//! leave that range, so negation and display can never overflow.

use core::fmt;

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Signed, Zero};

/// Exact exponent of one base quantity.
pub type Exponent = Ratio<i64>;

/// Largest magnitude allowed for the numerator or denominator of an exponent.
pub const MAX_EXPONENT_PART: i64 = i32::MAX as i64;

/// Number of base quantities tracked by a [`Dimension`].
pub const BASE_COUNT: usize = 8;

/// Canonical SI symbol of each slot, in vector order.
pub const BASE_SYMBOLS: [&str; BASE_COUNT] = ["m", "kg", "s", "K", "A", "mol", "cd", "rad"];

const ZERO: Exponent = Ratio::new_raw(0, 1);
const ONE: Exponent = Ratio::new_raw(1, 1);

/// The eight irreducible quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseQuantity {
    Length,
    Mass,
    Time,
    Temperature,
    Current,
    Substance,
    LuminousIntensity,
    Angle,
}

impl BaseQuantity {
    /// All base quantities in vector order.
    pub const ALL: [BaseQuantity; BASE_COUNT] = [
        BaseQuantity::Length,
        BaseQuantity::Mass,
        BaseQuantity::Time,
        BaseQuantity::Temperature,
        BaseQuantity::Current,
        BaseQuantity::Substance,
        BaseQuantity::LuminousIntensity,
        BaseQuantity::Angle,
    ];

    /// Slot of this quantity inside a [`Dimension`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical SI symbol (`m`, `kg`, ...).
    #[inline]
    pub const fn symbol(self) -> &'static str {
        BASE_SYMBOLS[self as usize]
    }
}

/// Vector of rational exponents over the eight base quantities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimension([Exponent; BASE_COUNT]);

impl Default for Dimension {
    fn default() -> Self {
        Self::UNITLESS
    }
}

impl Dimension {
    /// The all-zero vector.
    pub const UNITLESS: Dimension = Dimension([ZERO; BASE_COUNT]);

    /// Pure plane angle (`rad¹`).
    pub const ANGLE: Dimension = Dimension([ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE]);

    /// Builds a dimension from explicit rational exponents, or `None` if a
    /// numerator or denominator exceeds [`MAX_EXPONENT_PART`].
    pub fn try_new(exponents: [Exponent; BASE_COUNT]) -> Option<Self> {
        exponents
            .iter()
            .all(in_range)
            .then_some(Dimension(exponents))
    }

    /// Builds a dimension from integer exponents.
    pub fn from_integers(exponents: [i32; BASE_COUNT]) -> Self {
        Dimension(exponents.map(|e| Ratio::from_integer(i64::from(e))))
    }

    /// Exponent 1 on `quantity`, zero elsewhere.
    pub fn base(quantity: BaseQuantity) -> Self {
        let mut out = Self::UNITLESS;
        out.0[quantity.index()] = ONE;
        out
    }

    /// Exponent of a single base quantity.
    #[inline]
    pub fn exponent(&self, quantity: BaseQuantity) -> Exponent {
        self.0[quantity.index()]
    }

    /// All eight exponents in vector order.
    #[inline]
    pub fn exponents(&self) -> &[Exponent; BASE_COUNT] {
        &self.0
    }

    /// Exponents as `f64`, for consumers that cannot carry rationals.
    pub fn exponents_f64(&self) -> [f64; BASE_COUNT] {
        self.0.map(|e| *e.numer() as f64 / *e.denom() as f64)
    }

    /// `true` when every exponent is zero.
    #[inline]
    pub fn is_unitless(&self) -> bool {
        self.0.iter().all(Zero::is_zero)
    }

    /// `true` when the dimension is exactly `rad¹`.
    #[inline]
    pub fn is_angle(&self) -> bool {
        *self == Self::ANGLE
    }

    /// `true` when every exponent is an integer.
    pub fn is_integral(&self) -> bool {
        self.0.iter().all(Ratio::is_integer)
    }

    /// Every exponent negated (the dimension of a reciprocal).
    pub fn recip(&self) -> Self {
        Dimension(self.0.map(|e| -e))
    }

    /// Dimension of a product: exponents add.
    pub fn checked_mul(&self, rhs: &Dimension) -> Option<Self> {
        self.try_zip(rhs, |a, b| a.checked_add(b))
    }

    /// Dimension of a quotient: exponents subtract.
    pub fn checked_div(&self, rhs: &Dimension) -> Option<Self> {
        self.try_zip(rhs, |a, b| a.checked_sub(b))
    }

    /// Every exponent multiplied by `factor`.
    pub fn checked_scale(&self, factor: Exponent) -> Option<Self> {
        self.try_map(|e| e.checked_mul(&factor))
    }

    /// Every exponent multiplied by an integer power.
    pub fn checked_powi(&self, n: i64) -> Option<Self> {
        self.checked_scale(Ratio::from_integer(n))
    }

    fn try_map(&self, f: impl Fn(&Exponent) -> Option<Exponent>) -> Option<Self> {
        let mut out = [ZERO; BASE_COUNT];
        for (slot, e) in out.iter_mut().zip(self.0.iter()) {
            *slot = f(e).filter(in_range)?;
        }
        Some(Dimension(out))
    }

    fn try_zip(
        &self,
        rhs: &Dimension,
        f: impl Fn(&Exponent, &Exponent) -> Option<Exponent>,
    ) -> Option<Self> {
        let mut out = [ZERO; BASE_COUNT];
        for ((slot, a), b) in out.iter_mut().zip(self.0.iter()).zip(rhs.0.iter()) {
            *slot = f(a, b).filter(in_range)?;
        }
        Some(Dimension(out))
    }

    /// Canonical unit expression of this dimension, e.g. `m*kg/s^2`.
    ///
    /// Numerator symbols are joined with `*` and each denominator symbol is
    /// introduced by its own `/`, so the result parses back to the same
    /// dimension. A purely inverse dimension starts with `1` (`1/s`) and the
    /// unitless dimension renders as an empty string.
    pub fn unit_string(&self) -> String {
        let mut numer = Vec::new();
        let mut denom = Vec::new();

        for (symbol, exp) in BASE_SYMBOLS.iter().zip(self.0.iter()) {
            if exp.is_zero() {
                continue;
            }
            let term = format_term(symbol, exp.abs());
            if exp.is_positive() {
                numer.push(term);
            } else {
                denom.push(term);
            }
        }

        let mut out = if numer.is_empty() {
            if denom.is_empty() {
                return String::new();
            }
            String::from("1")
        } else {
            numer.join("*")
        };

        for term in denom {
            out.push('/');
            out.push_str(&term);
        }
        out
    }
}

fn in_range(e: &Exponent) -> bool {
    (-MAX_EXPONENT_PART..=MAX_EXPONENT_PART).contains(e.numer()) && *e.denom() <= MAX_EXPONENT_PART
}

fn format_term(symbol: &str, exp: Exponent) -> String {
    if exp == ONE {
        symbol.to_string()
    } else if exp.is_integer() {
        format!("{}^{}", symbol, exp.numer())
    } else {
        format!("{}^({}/{})", symbol, exp.numer(), exp.denom())
    }
}

impl fmt::Display for Dimension {
    /// Same text as [`Dimension::unit_string`], with `(unitless)` for the zero vector.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unitless() {
            f.write_str("(unitless)")
        } else {
            f.write_str(&self.unit_string())
        }
    }
}

impl From<[i32; BASE_COUNT]> for Dimension {
    fn from(exponents: [i32; BASE_COUNT]) -> Self {
        Dimension::from_integers(exponents)
    }
}
