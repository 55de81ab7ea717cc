// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Configuration ingestion for spinconf.
//!
//! Reads a control file (and the material and geometry files it refers
//! to) into a [`Configuration`]:
//!
//! ```text
//! control file ──► tokenize ──► Dispatcher ──► category matcher ──► Configuration
//!                                  │
//!                                  └─ material:file ──► Builder ──► Vec<Material>
//! ```
//!
//! The caller owns the configuration and passes it by mutable reference.
//! Loading stops at the first rejected directive; the returned
//! [`InputError`] carries file, line and [`Severity`].
//!
//! ```no_run
//! use spinconf_input::{load, Options};
//! use std::path::Path;
//!
//! let config = load(Path::new("input"), &Options::default())?;
//! println!("{} materials", config.materials.len());
//! # Ok::<(), spinconf_input::InputError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod material;
pub mod matchers;

pub use config::Configuration;
pub use dispatch::{Category, Dispatcher};
pub use error::{InputError, Reason, Result, Severity};
pub use geometry::Polygon;
pub use loader::{
    load, load_control_file, load_material_file, read_control, read_materials, Options,
};
pub use material::{Material, MaterialTable, MomentSpec, SpinInit};
