// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Physical units for spinconf input files
//!
//! Input values may carry a unit suffix (`dimensions:a=0.3!nm`). This crate
//! resolves such a suffix to a [`Unit`], classifies it by [`Dimension`] and
//! rescales the value into the internal unit system used by the simulation.
//!
//! # Internal units
//!
//! | Dimension | Internal unit |
//! |-----------|---------------|
//! | length | Ångström |
//! | field | tesla |
//! | energy | joule |
//! | moment | Bohr magneton |
//! | magnetisation | A/m |
//! | anisotropy | joule per atom |
//! | time | second |
//! | temperature | kelvin |
//!
//! The ingestion engine only depends on the [`Convert`] trait; [`SiUnits`] is
//! the table shipped with the tools.
//!
//! ```rust
//! # use spinconf_units::*;
//! let q = SiUnits.convert("nm", 0.3).unwrap();
//! assert_eq!(q.dimension, Dimension::Length);
//! assert!((q.value - 3.0).abs() < 1e-12);
//! ```

pub mod resolve;
pub mod unit;

pub use resolve::SiUnits;
pub use unit::{Dimension, Quantity, Unit};

use thiserror::Error;

/// Unit resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("unit '{0}' is not recognised")]
    Unknown(String),
}

/// Resolves a unit string and rescales a value into internal units.
pub trait Convert {
    fn convert(&self, unit: &str, value: f64) -> Result<Quantity, UnitError>;
}

impl<C: Convert + ?Sized> Convert for &C {
    fn convert(&self, unit: &str, value: f64) -> Result<Quantity, UnitError> {
        (**self).convert(unit, value)
    }
}
