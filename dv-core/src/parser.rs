//! Unit-string parser.
//!
//! Turns a unit expression such as `kg*m/s^2` or `BTU-in/hr-ft^2-F` into a
//! [`Dimension`] and the factor that converts a value in that unit to SI.
//!
//! ```text
//! unit     := ws* ( "" | expr ) ws*
//! expr     := group ( ("*" | "/") group )*
//! group    := factor ( "-" factor )*
//! factor   := atom exponent?
//! atom     := "1" | "(" expr ")" | prefix? symbol
//! exponent := "^" ( int | "(" int ( "/" uint )? ")" )
//!           | uint                       (directly after a symbol: m2 == m^2)
//! ```
//!
//! `*` and `/` are left-associative and each applies to the following group
//! only: `m/s*kg` is `m·kg/s`. A hyphen binds tighter, so everything in a
//! hyphenated group shares one side of the fraction: `W/m-K` is `W/(m·K)`.

use num_rational::Ratio;

use crate::dimension::{Dimension, Exponent};
use crate::error::{DvError, DvResult};
use crate::registry::registry;

/// Deepest parenthesis nesting accepted before the input is rejected.
const MAX_DEPTH: usize = 64;

/// Parses `unit` into its dimension and SI scale factor.
///
/// The empty (or all-whitespace) string is the unitless unit with scale `1`.
///
/// # Errors
///
/// * [`DvError::UnknownUnitSymbol`] if a symbol is neither registered nor a
///   prefix applied to a prefixable unit.
/// * [`DvError::InvalidUnitSyntax`] for anything the grammar rejects: dangling
///   operators, empty terms, malformed or out-of-range exponents, unbalanced
///   parentheses and stray characters.
pub fn parse_unit(unit: &str) -> DvResult<(Dimension, f64)> {
    if unit.trim().is_empty() {
        return Ok((Dimension::UNITLESS, 1.0));
    }

    let mut parser = Parser {
        src: unit,
        pos: 0,
        depth: 0,
    };
    let term = parser.expr()?;
    parser.skip_ws();
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!(
            "unexpected {:?} at offset {}",
            c, parser.pos
        )));
    }

    log::trace!(
        "parsed unit {:?}: dimension {}, scale {}",
        unit,
        term.dimension,
        term.scale
    );
    Ok((term.dimension, term.scale))
}

/// Partial result: the dimension and SI scale of a sub-expression.
#[derive(Debug, Clone, Copy)]
struct Term {
    dimension: Dimension,
    scale: f64,
}

impl Term {
    const ONE: Term = Term {
        dimension: Dimension::UNITLESS,
        scale: 1.0,
    };

    fn mul(self, rhs: Term) -> Option<Term> {
        Some(Term {
            dimension: self.dimension.checked_mul(&rhs.dimension)?,
            scale: self.scale * rhs.scale,
        })
    }

    fn div(self, rhs: Term) -> Option<Term> {
        Some(Term {
            dimension: self.dimension.checked_div(&rhs.dimension)?,
            scale: self.scale / rhs.scale,
        })
    }

    fn pow(self, exp: Exponent) -> Option<Term> {
        Some(Term {
            dimension: self.dimension.checked_scale(exp)?,
            scale: pow_scale(self.scale, exp),
        })
    }
}

fn pow_scale(base: f64, exp: Exponent) -> f64 {
    if exp.is_integer() {
        if let Ok(n) = i32::try_from(*exp.numer()) {
            return base.powi(n);
        }
    }
    base.powf(*exp.numer() as f64 / *exp.denom() as f64)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: impl Into<String>) -> DvError {
        DvError::syntax(self.src, reason)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn overflow(&self) -> DvError {
        self.error("exponent overflow")
    }

    fn expect(&mut self, want: char, what: &str) -> DvResult<()> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!(
                "expected {} at offset {}, found {:?}",
                what, self.pos, c
            ))),
            None => Err(self.error(format!("expected {} but the string ended", what))),
        }
    }

    fn expr(&mut self) -> DvResult<Term> {
        let mut acc = self.group()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('*') => {
                    self.bump();
                    let rhs = self.group()?;
                    acc = acc.mul(rhs).ok_or_else(|| self.overflow())?;
                }
                Some('/') => {
                    self.bump();
                    let rhs = self.group()?;
                    acc = acc.div(rhs).ok_or_else(|| self.overflow())?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn group(&mut self) -> DvResult<Term> {
        let mut acc = self.factor()?;
        loop {
            self.skip_ws();
            if self.peek() != Some('-') {
                return Ok(acc);
            }
            self.bump();
            let rhs = self.factor()?;
            acc = acc.mul(rhs).ok_or_else(|| self.overflow())?;
        }
    }

    fn factor(&mut self) -> DvResult<Term> {
        self.skip_ws();
        let start = self.pos;

        let (term, is_symbol) = match self.peek() {
            Some('(') => {
                if self.depth >= MAX_DEPTH {
                    return Err(self.error("parentheses nested too deeply"));
                }
                self.bump();
                self.depth += 1;
                let inner = self.expr()?;
                self.depth -= 1;
                self.expect(')', "')'")?;
                (inner, false)
            }
            Some(c) if c.is_ascii_digit() => {
                let digits = self.take_while(|c| c.is_ascii_digit());
                if digits != "1" {
                    return Err(self.error(format!(
                        "numeric factor {:?} at offset {}; only 1 may stand alone",
                        digits, start
                    )));
                }
                (Term::ONE, false)
            }
            Some(c) if c.is_alphabetic() => {
                let symbol = self.take_while(char::is_alphabetic);
                let (dimension, scale) =
                    registry()
                        .resolve(symbol)
                        .ok_or_else(|| DvError::UnknownUnitSymbol {
                            unit: self.src.to_string(),
                            symbol: symbol.to_string(),
                        })?;
                (Term { dimension, scale }, true)
            }
            Some(c) => {
                return Err(self.error(format!(
                    "expected a unit at offset {}, found {:?}",
                    start, c
                )))
            }
            None => return Err(self.error("expected a unit but the string ended")),
        };

        // `m2` shorthand: digits glued to a symbol.
        if is_symbol && self.peek().is_some_and(|c| c.is_ascii_digit()) {
            let n = self.unsigned_integer()?;
            return term
                .pow(Ratio::from_integer(n))
                .ok_or_else(|| self.overflow());
        }

        let save = self.pos;
        self.skip_ws();
        if self.peek() == Some('^') {
            self.bump();
            let exp = self.exponent()?;
            return term.pow(exp).ok_or_else(|| self.overflow());
        }
        self.pos = save;
        Ok(term)
    }

    fn exponent(&mut self) -> DvResult<Exponent> {
        self.skip_ws();
        if self.peek() != Some('(') {
            return Ok(Ratio::from_integer(self.signed_integer()?));
        }

        self.bump();
        self.skip_ws();
        let numer = self.signed_integer()?;
        self.skip_ws();
        let denom = if self.peek() == Some('/') {
            self.bump();
            self.skip_ws();
            self.unsigned_integer()?
        } else {
            1
        };
        self.expect(')', "')' closing the exponent")?;

        if denom == 0 {
            return Err(self.error("zero denominator in exponent"));
        }
        Ok(Ratio::new(numer, denom))
    }

    fn signed_integer(&mut self) -> DvResult<i64> {
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };
        let magnitude = self.unsigned_integer()?;
        Ok(if negative { -magnitude } else { magnitude })
    }

    /// Exponent magnitudes are limited to the `i32` range.
    fn unsigned_integer(&mut self) -> DvResult<i64> {
        let start = self.pos;
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.error(format!(
                    "missing exponent at offset {}, found {:?}",
                    start, c
                )),
                None => self.error("missing exponent at end of string"),
            });
        }
        digits
            .parse::<i32>()
            .map(i64::from)
            .map_err(|_| self.error(format!("exponent {:?} is out of range", digits)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::BaseQuantity;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    fn dim(e: [i32; 8]) -> Dimension {
        Dimension::from_integers(e)
    }

    fn kind(unit: &str) -> ErrorKind {
        parse_unit(unit).unwrap_err().kind()
    }

    #[test]
    fn empty_is_unitless() {
        assert_eq!(parse_unit("").unwrap(), (Dimension::UNITLESS, 1.0));
        assert_eq!(parse_unit("   ").unwrap(), (Dimension::UNITLESS, 1.0));
    }

    #[test]
    fn simple_quotient() {
        let (d, s) = parse_unit("m/s").unwrap();
        assert_eq!(d, dim([1, 0, -1, 0, 0, 0, 0, 0]));
        assert_eq!(s, 1.0);

        let (d, s) = parse_unit("mi/hr").unwrap();
        assert_eq!(d, dim([1, 0, -1, 0, 0, 0, 0, 0]));
        assert_relative_eq!(s, 0.44704, max_relative = 1e-12);
    }

    #[test]
    fn newton_spelled_out() {
        let (d, s) = parse_unit("kg*m/s^2").unwrap();
        assert_eq!(d, parse_unit("N").unwrap().0);
        assert_eq!(s, 1.0);
    }

    #[test]
    fn slash_applies_to_next_group_only() {
        let (d, _) = parse_unit("m/s*kg").unwrap();
        assert_eq!(d, dim([1, 1, -1, 0, 0, 0, 0, 0]));

        let (d, _) = parse_unit("m/s/s").unwrap();
        assert_eq!(d, dim([1, 0, -2, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn hyphen_groups_share_a_side() {
        let (d, s) = parse_unit("BTU-in/hr-ft^2-F").unwrap();
        assert_eq!(d, dim([1, 1, -3, -1, 0, 0, 0, 0]));
        assert_relative_eq!(s, 0.1442278885061242, max_relative = 1e-12);

        let (d, _) = parse_unit("W/m-K").unwrap();
        assert_eq!(d, dim([1, 1, -3, -1, 0, 0, 0, 0]));
    }

    #[test]
    fn exponent_forms() {
        let area = dim([2, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(parse_unit("m2").unwrap().0, area);
        assert_eq!(parse_unit("m^2").unwrap().0, area);
        assert_eq!(parse_unit("m ^ 2").unwrap().0, area);
        assert_eq!(parse_unit("m^+2").unwrap().0, area);
        assert_eq!(parse_unit("m^-2").unwrap().0, area.recip());
        assert_eq!(parse_unit("1/m^2").unwrap().0, area.recip());

        let (d, s) = parse_unit("km^2").unwrap();
        assert_eq!(d, area);
        assert_relative_eq!(s, 1e6);
    }

    #[test]
    fn rational_exponent() {
        let (d, s) = parse_unit("km^(1/2)").unwrap();
        assert_eq!(
            d,
            Dimension::base(BaseQuantity::Length)
                .checked_scale(Ratio::new(1, 2))
                .unwrap()
        );
        assert_relative_eq!(s, 1e3_f64.sqrt(), max_relative = 1e-12);

        let (d, _) = parse_unit("s^(-3/2)").unwrap();
        assert_eq!(
            d,
            Dimension::base(BaseQuantity::Time)
                .checked_scale(Ratio::new(-3, 2))
                .unwrap()
        );
    }

    #[test]
    fn parentheses() {
        let (d, _) = parse_unit("kg/(m*s^2)").unwrap();
        assert_eq!(d, dim([-1, 1, -2, 0, 0, 0, 0, 0]));

        let (d, s) = parse_unit("(km/hr)^2").unwrap();
        assert_eq!(d, dim([2, 0, -2, 0, 0, 0, 0, 0]));
        assert_relative_eq!(s, (1000.0 / 3600.0_f64).powi(2), max_relative = 1e-12);
    }

    #[test]
    fn prefixes() {
        assert_relative_eq!(parse_unit("km").unwrap().1, 1e3);
        assert_relative_eq!(parse_unit("µs").unwrap().1, 1e-6);
        assert_relative_eq!(parse_unit("us").unwrap().1, 1e-6);
        assert_relative_eq!(parse_unit("mmol").unwrap().1, 1e-3);
        assert_relative_eq!(parse_unit("GW").unwrap().1, 1e9);
        assert!(parse_unit("mrad").unwrap().0.is_angle());
    }

    #[test]
    fn angle_units() {
        let (d, s) = parse_unit("deg").unwrap();
        assert!(d.is_angle());
        assert_relative_eq!(s, core::f64::consts::PI / 180.0);
        assert_eq!(parse_unit("rad").unwrap(), (Dimension::ANGLE, 1.0));
        assert_eq!(parse_unit("rad/s").unwrap().0.unit_string(), "rad/s");
    }

    #[test]
    fn unknown_symbols() {
        assert_eq!(kind("qq"), ErrorKind::UnknownUnitSymbol);
        assert_eq!(kind("m/furlong"), ErrorKind::UnknownUnitSymbol);
        assert_eq!(kind("M"), ErrorKind::UnknownUnitSymbol);

        match parse_unit("kg*blarg").unwrap_err() {
            DvError::UnknownUnitSymbol { unit, symbol } => {
                assert_eq!(unit, "kg*blarg");
                assert_eq!(symbol, "blarg");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn case_sensitive() {
        assert!(parse_unit("Pa").is_ok());
        assert_eq!(kind("pa"), ErrorKind::UnknownUnitSymbol);
        assert_eq!(kind("KG"), ErrorKind::UnknownUnitSymbol);
    }

    #[test]
    fn syntax_errors() {
        for bad in [
            "m/", "m*", "/s", "*m", "m**s", "m//s", "m-", "m^", "m^x", "m^-", "(m", "m)",
            "()", "kg m", "2/s", "10*m", "m^(1/0)", "m^(1/2", "m^99999999999", "m;s", "m^2.5",
        ] {
            assert_eq!(kind(bad), ErrorKind::InvalidUnitSyntax, "{bad:?}");
        }
    }

    #[test]
    fn exponent_overflow_is_an_error() {
        let unit = "((m^2147483647)^2147483647)^2147483647";
        assert_eq!(kind(unit), ErrorKind::InvalidUnitSyntax);
        assert_eq!(kind("m^2147483647*m"), ErrorKind::InvalidUnitSyntax);
        assert_eq!(
            kind("m^(1/2147483647)*m^(1/2147483629)"),
            ErrorKind::InvalidUnitSyntax
        );
        assert!(parse_unit("m^2147483647").is_ok());
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let unit = format!("{}m{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(kind(&unit), ErrorKind::InvalidUnitSyntax);

        let unit = format!("{}m{}", "(".repeat(10), ")".repeat(10));
        assert!(parse_unit(&unit).is_ok());
    }

    #[test]
    fn canonical_strings_reparse() {
        for exps in [
            [1, 1, -2, 0, 0, 0, 0, 0],
            [0, 0, -1, 0, 0, 0, 0, 0],
            [2, 1, -3, -1, 0, 0, 0, 0],
            [-3, 0, 0, 0, 1, 2, -1, 1],
        ] {
            let d = dim(exps);
            let (parsed, scale) = parse_unit(&d.unit_string()).unwrap();
            assert_eq!(parsed, d);
            assert_eq!(scale, 1.0);
        }
    }
}
