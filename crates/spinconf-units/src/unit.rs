//! Dimensions and scaled units
//!
//! A [`Unit`] pairs a [`Dimension`] with the factor that takes a value
//! expressed in that unit into the internal unit of the dimension.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Dimension
// ============================================================================

/// Physical dimension a unit resolves to.
///
/// The set is closed: it covers exactly the quantities that appear in
/// control and material files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    Length,
    Field,
    Energy,
    Moment,
    Magnetisation,
    Anisotropy,
    Time,
    Temperature,
}

impl Dimension {
    /// Name used in diagnostics (`"length"`, `"field"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Dimension::Length => "length",
            Dimension::Field => "field",
            Dimension::Energy => "energy",
            Dimension::Moment => "moment",
            Dimension::Magnetisation => "magnetisation",
            Dimension::Anisotropy => "anisotropy",
            Dimension::Time => "time",
            Dimension::Temperature => "temperature",
        }
    }

    /// Symbol of the internal unit for this dimension.
    pub const fn internal_symbol(self) -> &'static str {
        match self {
            Dimension::Length => "A",
            Dimension::Field => "T",
            Dimension::Energy => "J",
            Dimension::Moment => "bohr-magneton",
            Dimension::Magnetisation => "A/m",
            Dimension::Anisotropy => "J/atom",
            Dimension::Time => "s",
            Dimension::Temperature => "K",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Unit
// ============================================================================

/// A unit of a given dimension.
///
/// `scale` converts a value in this unit into the internal unit:
/// `internal = value * scale`. One nanometre is ten Ångström, so
/// `nm` has scale `10.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    dimension: Dimension,
    scale: f64,
}

impl Unit {
    pub const fn new(dimension: Dimension, scale: f64) -> Self {
        Self { dimension, scale }
    }

    /// The internal unit of `dimension` (scale 1).
    pub const fn internal(dimension: Dimension) -> Self {
        Self::new(dimension, 1.0)
    }

    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Same unit scaled by an additional factor (SI prefix application).
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.dimension, self.scale * factor)
    }

    /// Rescale `value` into internal units.
    pub fn apply(&self, value: f64) -> Quantity {
        Quantity {
            value: value * self.scale,
            dimension: self.dimension,
        }
    }

    // --- Named constructors ---

    pub const fn angstroms() -> Self {
        Self::internal(Dimension::Length)
    }

    pub const fn meters() -> Self {
        Self::new(Dimension::Length, 1e10)
    }

    pub const fn teslas() -> Self {
        Self::internal(Dimension::Field)
    }

    pub const fn oersteds() -> Self {
        Self::new(Dimension::Field, 1e-4)
    }

    pub const fn joules() -> Self {
        Self::internal(Dimension::Energy)
    }

    pub const fn electron_volts() -> Self {
        Self::new(Dimension::Energy, ELECTRON_VOLT)
    }

    pub const fn rydbergs() -> Self {
        Self::new(Dimension::Energy, RYDBERG)
    }

    pub const fn bohr_magnetons() -> Self {
        Self::internal(Dimension::Moment)
    }

    pub const fn joules_per_tesla() -> Self {
        Self::new(Dimension::Moment, INVERSE_BOHR_MAGNETON)
    }

    pub const fn amperes_per_meter() -> Self {
        Self::internal(Dimension::Magnetisation)
    }

    pub const fn joules_per_atom() -> Self {
        Self::internal(Dimension::Anisotropy)
    }

    pub const fn seconds() -> Self {
        Self::internal(Dimension::Time)
    }

    pub const fn kelvin() -> Self {
        Self::internal(Dimension::Temperature)
    }
}

/// A value already expressed in internal units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub dimension: Dimension,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.dimension.internal_symbol())
    }
}

/// Electron volt in joules.
pub const ELECTRON_VOLT: f64 = 1.602_176_634e-19;
/// Rydberg energy in joules.
pub const RYDBERG: f64 = 2.179_872_361_1e-18;
/// Bohr magneton in J/T.
pub const BOHR_MAGNETON: f64 = 9.274_010_078_3e-24;
const INVERSE_BOHR_MAGNETON: f64 = 1.0 / BOHR_MAGNETON;
