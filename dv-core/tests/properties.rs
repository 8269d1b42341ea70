//! Algebraic laws checked with proptest.

use dv_core::{Dimension, DimensionalVariable as Dv, ErrorKind};
use proptest::prelude::*;

const UNITS: &[&str] = &[
    "m", "km", "ft", "mi/hr", "kg", "lb", "s", "min", "K", "F", "A", "mol", "cd", "rad", "deg",
    "N", "J", "kWh", "W", "Pa", "psi", "V", "Ohm", "m/s^2", "BTU-in/hr-ft^2-F", "1/s", "",
];

fn unit() -> impl Strategy<Value = &'static str> {
    prop::sample::select(UNITS)
}

fn finite() -> impl Strategy<Value = f64> {
    prop_oneof![-1e6..1e6f64, 1e-6..1e6f64]
}

fn exponents() -> impl Strategy<Value = [i32; 8]> {
    prop::array::uniform8(-4i32..=4)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1e-300)
}

proptest! {
    #[test]
    fn value_in_round_trips(v in finite(), u in unit()) {
        let x = Dv::new(v, u).unwrap();
        let back = x.value_in(u).unwrap();
        prop_assert!(close(back, v), "{} {} -> {}", v, u, back);
    }

    #[test]
    fn mul_div_are_homomorphic(a in finite(), b in finite(), ua in unit(), ub in unit()) {
        let x = Dv::new(a, ua).unwrap();
        let y = Dv::new(b, ub).unwrap();
        prop_assert_eq!(*(&x * &y).unwrap().dimension(), x.dimension().checked_mul(y.dimension()).unwrap());
        prop_assert_eq!(*(&x / &y).unwrap().dimension(), x.dimension().checked_div(y.dimension()).unwrap());
    }

    #[test]
    fn mul_commutes(a in finite(), b in finite(), ua in unit(), ub in unit()) {
        let x = Dv::new(a, ua).unwrap();
        let y = Dv::new(b, ub).unwrap();
        let xy = (&x * &y).unwrap();
        let yx = (&y * &x).unwrap();
        prop_assert!(xy.equals(&yx).unwrap());
    }

    #[test]
    fn add_succeeds_iff_dimensions_match(a in finite(), b in finite(), ua in unit(), ub in unit()) {
        let x = Dv::new(a, ua).unwrap();
        let y = Dv::new(b, ub).unwrap();
        let same = x.dimension() == y.dimension();
        prop_assert_eq!(x.try_add(&y).is_ok(), same);
        prop_assert_eq!(x.try_sub(&y).is_ok(), same);
        prop_assert_eq!(x.less_than(&y).is_ok(), same);
        prop_assert_eq!(x.equals(&y).is_ok(), same);
        if !same {
            prop_assert_eq!(x.try_add(&y).unwrap_err().kind(), ErrorKind::DimensionMismatch);
        }
    }

    #[test]
    fn sqrt_of_square_recovers_magnitude(v in 1e-3..1e3f64, u in unit()) {
        let x = Dv::new(v, u).unwrap();
        let root = x.powi(2).unwrap().sqrt().unwrap();
        prop_assert_eq!(root.dimension(), x.dimension());
        prop_assert!(close(root.value(), x.value().abs()));
        let square = root.powi(2).unwrap();
        prop_assert!(close(square.value(), x.powi(2).unwrap().value()));
    }

    #[test]
    fn powi_matches_repeated_mul(v in 0.1..10.0f64, u in unit(), n in 0i64..5) {
        let x = Dv::new(v, u).unwrap();
        let mut acc = Dv::unitless(1.0);
        for _ in 0..n {
            acc = (&acc * &x).unwrap();
        }
        let p = x.powi(n).unwrap();
        prop_assert_eq!(p.dimension(), acc.dimension());
        prop_assert!(close(p.value(), acc.value()));
    }

    #[test]
    fn repeated_powers_report_overflow(u in unit(), a in any::<i64>(), b in any::<i64>()) {
        let x = Dv::new(2.0, u).unwrap();
        match x.powi(a).and_then(|y| y.powi(b)).and_then(|z| Dv::mul(&z, &z)) {
            Ok(z) => {
                let in_range = z.dimension().exponents().iter().all(|e| {
                    e.numer().abs() <= dv_core::MAX_EXPONENT_PART
                });
                prop_assert!(in_range)
            }
            Err(err) => prop_assert_eq!(err.kind(), ErrorKind::ExponentOverflow),
        }
    }

    #[test]
    fn canonical_unit_string_reparses(e in exponents()) {
        let d = Dimension::from_integers(e);
        let (parsed, scale) = dv_core::parse_unit(&d.unit_string()).unwrap();
        prop_assert_eq!(parsed, d);
        prop_assert_eq!(scale, 1.0);
    }

    #[test]
    fn logs_reject_dimensioned(v in 1e-3..1e3f64, u in unit()) {
        let x = Dv::new(v, u).unwrap();
        if x.is_unitless() {
            prop_assert!(x.ln().is_ok());
        } else {
            prop_assert_eq!(x.ln().unwrap_err().kind(), ErrorKind::RequiresUnitless);
            prop_assert_eq!(x.log10().unwrap_err().kind(), ErrorKind::RequiresUnitless);
        }
    }

    #[test]
    fn parser_never_panics(s in "\\PC{0,24}") {
        let _ = dv_core::parse_unit(&s);
    }

    #[test]
    fn parser_never_panics_on_unit_alphabet(s in "[a-zA-Z0-9*/^()\\- +]{0,24}") {
        let _ = dv_core::parse_unit(&s);
    }
}
