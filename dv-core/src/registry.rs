//! Fixed unit and prefix registry.
//!
//! The unit table is generated at build time from `units.csv` and indexed once,
//! on first use, into a process-wide read-only map. Lookups never lock.
//!
//! # Symbol resolution
//!
//! A symbol resolves in two steps:
//!
//! 1. an exact match in the unit table (`min`, `mol`, `cd`, `Pa`, `kg`, ...);
//! 2. otherwise a single-character SI prefix followed by a *prefixable* unit
//!    (`km`, `ms`, `µs`, `kWh`, `mrad`, ...).
//!
//! Exact matches always win, so `min` is a minute and never milli-inch.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::dimension::{Dimension, BASE_COUNT};

/// One row of the generated unit table.
#[derive(Debug, Clone, Copy)]
struct UnitRow {
    symbol: &'static str,
    name: &'static str,
    exponents: [i32; BASE_COUNT],
    scale: f64,
    prefixable: bool,
}

static UNIT_TABLE: &[UnitRow] = include!(concat!(env!("OUT_DIR"), "/unit_table.rs"));

/// A registered unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDescriptor {
    /// Symbol as written in unit strings.
    pub symbol: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Dimension of one of this unit.
    pub dimension: Dimension,
    /// Factor converting a raw value in this unit to SI: `si = raw * scale`.
    pub scale: f64,
    /// Reserved for affine units. Always `0.0`; never applied.
    pub offset: f64,
    /// Whether an SI prefix may be attached.
    pub prefixable: bool,
}

/// A decimal SI prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefixDescriptor {
    pub symbol: &'static str,
    pub name: &'static str,
    pub multiplier: f64,
}

const fn prefix(symbol: &'static str, name: &'static str, multiplier: f64) -> PrefixDescriptor {
    PrefixDescriptor {
        symbol,
        name,
        multiplier,
    }
}

/// Single-character SI prefixes. `u` and `µ` both mean micro.
pub static PREFIXES: [PrefixDescriptor; 21] = [
    prefix("Y", "yotta", 1e24),
    prefix("Z", "zetta", 1e21),
    prefix("E", "exa", 1e18),
    prefix("P", "peta", 1e15),
    prefix("T", "tera", 1e12),
    prefix("G", "giga", 1e9),
    prefix("M", "mega", 1e6),
    prefix("k", "kilo", 1e3),
    prefix("h", "hecto", 1e2),
    prefix("d", "deci", 1e-1),
    prefix("c", "centi", 1e-2),
    prefix("m", "milli", 1e-3),
    prefix("u", "micro", 1e-6),
    prefix("µ", "micro", 1e-6),
    prefix("n", "nano", 1e-9),
    prefix("p", "pico", 1e-12),
    prefix("f", "femto", 1e-15),
    prefix("a", "atto", 1e-18),
    prefix("z", "zepto", 1e-21),
    prefix("y", "yocto", 1e-24),
    // U+03BC (Greek mu), alongside the micro sign U+00B5 above
    prefix("μ", "micro", 1e-6),
];

/// Read-only index over the unit and prefix tables.
#[derive(Debug)]
pub struct Registry {
    units: HashMap<&'static str, UnitDescriptor>,
    prefixes: HashMap<&'static str, PrefixDescriptor>,
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::build);

/// Returns the process-wide registry, building it on first call.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

impl Registry {
    fn build() -> Registry {
        let units: HashMap<_, _> = UNIT_TABLE
            .iter()
            .map(|row| {
                (
                    row.symbol,
                    UnitDescriptor {
                        symbol: row.symbol,
                        name: row.name,
                        dimension: Dimension::from_integers(row.exponents),
                        scale: row.scale,
                        offset: 0.0,
                        prefixable: row.prefixable,
                    },
                )
            })
            .collect();
        let prefixes = PREFIXES.iter().map(|p| (p.symbol, *p)).collect();

        log::debug!(
            "unit registry initialized: {} units, {} prefixes",
            units.len(),
            PREFIXES.len()
        );

        Registry { units, prefixes }
    }

    /// Exact-symbol lookup, without prefix decomposition.
    pub fn unit(&self, symbol: &str) -> Option<&UnitDescriptor> {
        self.units.get(symbol)
    }

    /// Prefix lookup by symbol.
    pub fn prefix(&self, symbol: &str) -> Option<&PrefixDescriptor> {
        self.prefixes.get(symbol)
    }

    /// Resolves a symbol to `(dimension, scale)`, trying an exact match first and
    /// then a one-character prefix on a prefixable unit.
    pub fn resolve(&self, symbol: &str) -> Option<(Dimension, f64)> {
        if let Some(unit) = self.units.get(symbol) {
            return Some((unit.dimension, unit.scale));
        }

        let first = symbol.chars().next()?;
        let split = first.len_utf8();
        if split >= symbol.len() {
            return None;
        }

        let (head, rest) = symbol.split_at(split);
        let prefix = self.prefixes.get(head)?;
        let unit = self.units.get(rest).filter(|u| u.prefixable)?;

        log::trace!(
            "resolved {:?} as {} + {}",
            symbol,
            prefix.name,
            unit.name
        );
        Some((unit.dimension, prefix.multiplier * unit.scale))
    }

    /// Iterates over every registered unit, in no particular order.
    pub fn units(&self) -> impl Iterator<Item = &UnitDescriptor> {
        self.units.values()
    }

    /// Iterates over the SI prefixes in table order.
    pub fn prefixes(&self) -> impl Iterator<Item = &PrefixDescriptor> {
        PREFIXES.iter()
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// `true` if no unit is registered.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
