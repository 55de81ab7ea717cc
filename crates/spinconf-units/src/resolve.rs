//! Unit name resolution
//!
//! Names are resolved in two steps:
//!
//! 1. exact match against the base table (`A`, `T`, `bohr-magneton`, ...);
//! 2. SI prefix + base name, unless the name is reserved (`nm` = nano-meter,
//!    `mT` = milli-tesla, `meV` = milli-electron-volt).
//!
//! Reserved names are never decomposed: `m` is the meter, not milli-nothing,
//! and `A` is the Ångström, not an atto prefix.

use crate::unit::{Quantity, Unit};
use crate::{Convert, UnitError};

/// SI prefixes with their decimal exponent.
const SI_PREFIXES: &[(&str, i32)] = &[
    ("G", 9),   // giga
    ("M", 6),   // mega
    ("k", 3),   // kilo
    ("h", 2),   // hecto
    ("da", 1),  // deca
    ("d", -1),  // deci
    ("c", -2),  // centi
    ("m", -3),  // milli
    ("u", -6),  // micro (ASCII)
    ("n", -9),  // nano
    ("p", -12), // pico
    ("f", -15), // femto
    ("a", -18), // atto
];

/// Units that must NOT be decomposed with prefix parsing.
const RESERVED_UNITS: &[&str] = &[
    "m",  // meter (not milli)
    "A",  // angstrom (not atto)
    "G",  // gauss (not giga)
    "T",  // tesla
    "s",  // second
    "K",  // kelvin
    "J",  // joule
    "Oe", // oersted
];

/// The default unit table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiUnits;

impl Convert for SiUnits {
    fn convert(&self, unit: &str, value: f64) -> Result<Quantity, UnitError> {
        Ok(resolve_unit(unit)?.apply(value))
    }
}

fn try_parse_prefix(name: &str) -> Option<(f64, &str)> {
    // Try two-character prefixes first (da)
    if name.len() > 2 {
        if let Some(&(_, exp)) = SI_PREFIXES
            .iter()
            .find(|(p, _)| p.len() == 2 && name.starts_with(p))
        {
            return Some((10.0_f64.powi(exp), &name[2..]));
        }
    }

    if name.len() > 1 {
        if let Some(&(_, exp)) = SI_PREFIXES
            .iter()
            .find(|(p, _)| p.len() == 1 && name.starts_with(p))
        {
            return Some((10.0_f64.powi(exp), &name[1..]));
        }
    }

    None
}

/// Exact match only, no prefix parsing.
fn try_exact_base_unit(name: &str) -> Option<Unit> {
    match name {
        // Length
        "A" | "Angstrom" | "angstrom" => Some(Unit::angstroms()),
        "m" => Some(Unit::meters()),

        // Field
        "T" => Some(Unit::teslas()),
        "Oe" | "G" => Some(Unit::oersteds()),

        // Energy
        "J" => Some(Unit::joules()),
        "eV" => Some(Unit::electron_volts()),
        "Ry" => Some(Unit::rydbergs()),

        // Moment
        "bohr-magneton" | "mu_B" | "muB" => Some(Unit::bohr_magnetons()),
        "J/T" => Some(Unit::joules_per_tesla()),

        // Magnetisation
        "A/m" => Some(Unit::amperes_per_meter()),
        "emu/cc" => Some(Unit::amperes_per_meter().scaled(1e3)),

        // Anisotropy
        "J/atom" => Some(Unit::joules_per_atom()),
        "eV/atom" => Some(Unit::joules_per_atom().scaled(crate::unit::ELECTRON_VOLT)),

        // Time, temperature
        "s" => Some(Unit::seconds()),
        "K" => Some(Unit::kelvin()),

        _ => None,
    }
}

/// Resolve a unit name, applying an SI prefix if needed.
pub fn resolve_unit(name: &str) -> Result<Unit, UnitError> {
    if let Some(unit) = try_exact_base_unit(name) {
        return Ok(unit);
    }

    if !RESERVED_UNITS.contains(&name) {
        if let Some((prefix_scale, base_name)) = try_parse_prefix(name) {
            if let Some(base) = try_exact_base_unit(base_name) {
                return Ok(base.scaled(prefix_scale));
            }
        }
    }

    Err(UnitError::Unknown(name.to_string()))
}
