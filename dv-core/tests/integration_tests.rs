//! End-to-end usage of the public API.

use approx::assert_relative_eq;
use dv_core::{
    asin_scalar, parse_unit, registry, BaseQuantity, Dimension, DimensionalVariable as Dv,
    DvError, ErrorKind, Ratio,
};

fn dv(value: f64, unit: &str) -> Dv {
    Dv::new(value, unit).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Reference scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn construct_keeps_si_value() {
    assert_eq!(dv(10.0, "m/s").value(), 10.0);
}

#[test]
fn meters_read_back_as_kilometers() {
    assert_eq!(dv(1000.0, "m").value_in("km").unwrap(), 1.0);
}

#[test]
fn mass_times_acceleration_is_force() {
    let f = dv(10.0, "kg").mul(&dv(9.81, "m/s^2")).unwrap();
    assert_relative_eq!(f.value_in("N").unwrap(), 98.1, max_relative = 1e-12);
}

#[test]
fn adding_length_and_time_fails() {
    let err = dv(10.0, "m").try_add(&dv(5.0, "s")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    match err {
        DvError::DimensionMismatch { left, right } => {
            assert_eq!(left, Dimension::base(BaseQuantity::Length));
            assert_eq!(right, Dimension::base(BaseQuantity::Time));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn ratio_of_lengths_is_unitless() {
    let r = dv(100.0, "m").div(&dv(10.0, "m")).unwrap();
    assert!(r.is_unitless());
    assert_eq!(r.value(), 10.0);
    assert_relative_eq!(r.log10().unwrap().value(), 1.0);
}

#[test]
fn sqrt_then_cube() {
    let s = dv(4.0, "m^2").sqrt().unwrap();
    assert_eq!(s.value_in("m").unwrap(), 2.0);
    assert_eq!(s.powi(3).unwrap().value_in("m^3").unwrap(), 8.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Worked problems
// ─────────────────────────────────────────────────────────────────────────────

/// Steady conduction through a slab: q = k·A·ΔT / L, with mixed imperial input.
#[test]
fn conduction_through_a_wall() {
    let k = dv(0.8, "BTU-in/hr-ft^2-F");
    let area = dv(2.0, "m^2");
    let delta_t = dv(20.0, "K");
    let thickness = dv(2.0, "cm");

    let q = (&(&(&k * &area).unwrap() * &delta_t).unwrap() / &thickness).unwrap();
    assert_eq!(q.dimension(), dv(1.0, "W").dimension());
    assert_relative_eq!(q.value_in("W").unwrap(), 230.7646216097987, max_relative = 1e-12);
    assert_relative_eq!(
        q.value_in("BTU/hr").unwrap(),
        230.7646216097987 * 3600.0 / 1055.05585,
        max_relative = 1e-12
    );
}

#[test]
fn kinetic_energy_in_mixed_units() {
    let m = dv(1500.0, "kg");
    let v = dv(100.0, "km/hr");
    let ke = m.mul(&v.powi(2).unwrap()).unwrap().mul_scalar(0.5);
    let expected = 0.5 * 1500.0 * (100.0 / 3.6_f64).powi(2);
    assert_relative_eq!(ke.value_in("J").unwrap(), expected, max_relative = 1e-12);
    assert_relative_eq!(ke.value_in("kJ").unwrap(), expected / 1e3, max_relative = 1e-12);
}

#[test]
fn pendulum_period() {
    let length = dv(1.0, "m");
    let g = dv(9.80665, "m/s^2");
    let period = length.div(&g).unwrap().sqrt().unwrap().mul_scalar(2.0 * core::f64::consts::PI);
    assert_eq!(period.dimension(), &Dimension::base(BaseQuantity::Time));
    assert_relative_eq!(period.value_in("s").unwrap(), 2.00640929, max_relative = 1e-8);
}

#[test]
fn incline_angle_from_ratio() {
    let rise = dv(1.0, "m");
    let run = dv(100.0, "cm");
    let angle = rise.div(&run).unwrap().atan().unwrap();
    assert!(angle.is_angle());
    assert_relative_eq!(angle.value_in("deg").unwrap(), 45.0, max_relative = 1e-12);

    let back = angle.tan().unwrap();
    assert_relative_eq!(back.value(), 1.0, max_relative = 1e-12);
}

// ─────────────────────────────────────────────────────────────────────────────
// Angle handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn radians_and_degrees() {
    let pi = core::f64::consts::PI;
    assert_relative_eq!(dv(pi, "rad").value_in("deg").unwrap(), 180.0, max_relative = 1e-12);
    assert_relative_eq!(dv(180.0, "deg").value_in("rad").unwrap(), pi, max_relative = 1e-12);
    assert_relative_eq!(dv(1.0, "deg").value_in("arcmin").unwrap(), 60.0, max_relative = 1e-12);
    assert_relative_eq!(dv(1.0, "arcmin").value_in("arcsec").unwrap(), 60.0, max_relative = 1e-12);
}

#[test]
fn angle_is_distinct_from_unitless() {
    let a = dv(1.0, "rad");
    let n = Dv::unitless(1.0);
    assert!(!a.is_unitless());
    assert_eq!(a.equals(&n).unwrap_err().kind(), ErrorKind::DimensionMismatch);
    assert!(asin_scalar(1.0).unwrap().is_angle());
}

#[test]
fn angular_velocity_display() {
    let w = dv(10.0, "rev").div(&dv(1.0, "s")).unwrap();
    assert_eq!(w.dimension().unit_string(), "rad/s");
    assert_relative_eq!(w.value(), 20.0 * core::f64::consts::PI, max_relative = 1e-12);
}

// ─────────────────────────────────────────────────────────────────────────────
// Public surface
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn base_units_are_exact_rationals() {
    let v = dv(1.0, "km^(3/2)");
    let units = v.base_units();
    assert_eq!(units[BaseQuantity::Length.index()], Ratio::new(3, 2));
    assert!(units[1..].iter().all(|e| *e == Ratio::from_integer(0)));
    assert_eq!(v.to_string(), format!("{} m^(3/2)", 1e3_f64.powf(1.5)));
}

#[test]
fn display_of_canonical_forms() {
    assert_eq!(dv(5.0, "m").to_string(), "5 m");
    assert_eq!(dv(1.0, "kg*m/s^2").to_string(), "1 m*kg/s^2");
    assert_eq!(dv(100.0, "J").mul(&dv(1.0, "")).unwrap().to_string(), "100 m^2*kg/s^2");
    assert_eq!(Dv::unitless(42.0).to_string(), "42 (unitless)");
    assert_eq!(dv(60.0, "Hz").to_string(), "60 1/s");
}

#[test]
fn displayed_units_parse_back() {
    for unit in ["W/m-K", "V/A", "mol/m^3", "cd*rad/m^2", "A*s", "J/mol/K"] {
        let v = dv(1.0, unit);
        let canonical = v.dimension().unit_string();
        let (dim, scale) = parse_unit(&canonical).unwrap();
        assert_eq!(&dim, v.dimension(), "{unit} -> {canonical}");
        assert_eq!(scale, 1.0);
    }
}

#[test]
fn registry_is_shared_and_read_only() {
    let a = registry() as *const _;
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| registry() as *const _ as usize))
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), a as usize);
    }
    assert!(registry().unit("m").is_some());
    assert!(registry().units().any(|u| u.symbol == "BTU"));
}

#[test]
fn concurrent_parsing_agrees() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let v = Dv::new(i as f64, "BTU-in/hr-ft^2-F").unwrap();
                v.value_in("W/m-K").unwrap()
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        assert_relative_eq!(
            h.join().unwrap(),
            i as f64 * 0.1442278885061242,
            max_relative = 1e-12
        );
    }
}
