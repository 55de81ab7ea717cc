//! `dimensions:`: Lattice constants and system size, all lengths.

use spinconf_units::Dimension;

use super::{Directive, Table};
use crate::config::Dimensions;
use crate::error::Reason;

pub const TABLE: Table<Dimensions> = &[
    ("a", |dims, d| {
        dims.lattice_constant = [length(d)?; 3];
        Ok(())
    }),
    ("c", |dims, d| {
        dims.lattice_constant[2] = length(d)?;
        Ok(())
    }),
    ("ax", |dims, d| {
        dims.lattice_constant[0] = length(d)?;
        Ok(())
    }),
    ("ay", |dims, d| {
        dims.lattice_constant[1] = length(d)?;
        Ok(())
    }),
    ("az", |dims, d| {
        dims.lattice_constant[2] = length(d)?;
        Ok(())
    }),
    ("d", |dims, d| {
        dims.system_size = [length(d)?; 3];
        Ok(())
    }),
    ("dx", |dims, d| {
        dims.system_size[0] = length(d)?;
        Ok(())
    }),
    ("dy", |dims, d| {
        dims.system_size[1] = length(d)?;
        Ok(())
    }),
    ("dz", |dims, d| {
        dims.system_size[2] = length(d)?;
        Ok(())
    }),
    ("particle-size", |dims, d| {
        dims.particle_size = length(d)?;
        Ok(())
    }),
    ("particle-spacing", |dims, d| {
        dims.particle_spacing = length(d)?;
        Ok(())
    }),
    ("cell-size", |dims, d| {
        dims.cell_size = length(d)?;
        Ok(())
    }),
];

fn length(d: &Directive<'_>) -> Result<f64, Reason> {
    d.measured(Dimension::Length)
}
