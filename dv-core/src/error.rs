//! Error values returned by every fallible DV operation.
//!
//! Nothing in this crate panics on bad input: parse failures, dimensional
//! mismatches and domain violations all come back as a [`DvError`]. The
//! [`ErrorKind`] discriminant survives embedding layers that cannot carry the
//! full payload (C status codes, Python exception classes).

use crate::dimension::Dimension;

/// Convenience alias for results produced by this crate.
pub type DvResult<T> = Result<T, DvError>;

/// Tagged failure of a DV operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DvError {
    /// The unit string is malformed (dangling operator, bad exponent, stray character, ...).
    #[error("invalid unit syntax in {unit:?}: {reason}")]
    InvalidUnitSyntax { unit: String, reason: String },

    /// A symbol is neither registered nor a valid prefix + prefixable unit.
    #[error("unknown unit symbol {symbol:?} in {unit:?}")]
    UnknownUnitSymbol { unit: String, symbol: String },

    /// The operation requires both operands (or operand and target) to share a dimension.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: Dimension, right: Dimension },

    /// The operation only accepts dimensionless operands.
    #[error("{op} requires a unitless operand, got {dimension}")]
    RequiresUnitless {
        op: &'static str,
        dimension: Dimension,
    },

    /// The operation only accepts dimensionless or pure-angle operands.
    #[error("{op} requires an angle or unitless operand, got {dimension}")]
    RequiresAngleOrUnitless {
        op: &'static str,
        dimension: Dimension,
    },

    /// The raw value lies outside the mathematical domain of the operation.
    #[error("{op} is undefined for value {value}")]
    DomainError { op: &'static str, value: f64 },

    /// Raising a dimensioned operand would produce non-integral exponents.
    #[error("{op} by {exponent} of {dimension} does not yield integral exponents")]
    NonIntegralDimension {
        op: &'static str,
        dimension: Dimension,
        exponent: f64,
    },

    /// A result exponent would exceed the representable range.
    #[error("{op} of {dimension} overflows the exponent range")]
    ExponentOverflow {
        op: &'static str,
        dimension: Dimension,
    },
}

/// Payload-free discriminant of [`DvError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidUnitSyntax,
    UnknownUnitSymbol,
    DimensionMismatch,
    RequiresUnitless,
    RequiresAngleOrUnitless,
    DomainError,
    NonIntegralDimension,
    ExponentOverflow,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::InvalidUnitSyntax,
        ErrorKind::UnknownUnitSymbol,
        ErrorKind::DimensionMismatch,
        ErrorKind::RequiresUnitless,
        ErrorKind::RequiresAngleOrUnitless,
        ErrorKind::DomainError,
        ErrorKind::NonIntegralDimension,
        ErrorKind::ExponentOverflow,
    ];

    /// Stable identifier, suitable for logs and for naming foreign exception types.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidUnitSyntax => "InvalidUnitSyntax",
            ErrorKind::UnknownUnitSymbol => "UnknownUnitSymbol",
            ErrorKind::DimensionMismatch => "DimensionMismatch",
            ErrorKind::RequiresUnitless => "RequiresUnitless",
            ErrorKind::RequiresAngleOrUnitless => "RequiresAngleOrUnitless",
            ErrorKind::DomainError => "DomainError",
            ErrorKind::NonIntegralDimension => "NonIntegralDimension",
            ErrorKind::ExponentOverflow => "ExponentOverflow",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DvError {
    /// Returns the tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DvError::InvalidUnitSyntax { .. } => ErrorKind::InvalidUnitSyntax,
            DvError::UnknownUnitSymbol { .. } => ErrorKind::UnknownUnitSymbol,
            DvError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            DvError::RequiresUnitless { .. } => ErrorKind::RequiresUnitless,
            DvError::RequiresAngleOrUnitless { .. } => ErrorKind::RequiresAngleOrUnitless,
            DvError::DomainError { .. } => ErrorKind::DomainError,
            DvError::NonIntegralDimension { .. } => ErrorKind::NonIntegralDimension,
            DvError::ExponentOverflow { .. } => ErrorKind::ExponentOverflow,
        }
    }

    pub(crate) fn syntax(unit: &str, reason: impl Into<String>) -> Self {
        DvError::InvalidUnitSyntax {
            unit: unit.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(left: Dimension, right: Dimension) -> Self {
        DvError::DimensionMismatch { left, right }
    }

    pub(crate) fn overflow(op: &'static str, dimension: Dimension) -> Self {
        DvError::ExponentOverflow { op, dimension }
    }
}
