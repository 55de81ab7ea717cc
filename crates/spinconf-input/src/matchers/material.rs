//! Material file fields, `material[super]:word[sub]=value!unit`.
//!
//! Every handler writes to the record addressed by the super index. The
//! key itself is not checked.

use std::path::{Path, PathBuf};

use spinconf_units::Dimension;
use tracing::{debug, warn};

use super::{Directive, Interval, Table};
use crate::error::{Reason, Severity};
use crate::geometry::load_polygon;
use crate::material::{Material, MaterialTable, MomentSpec, SpinInit};

/// Material table under construction plus the directory relative paths
/// resolve against.
#[derive(Debug)]
pub struct Builder {
    table: MaterialTable,
    dir: PathBuf,
}

impl Builder {
    pub fn new(max_materials: usize, dir: impl Into<PathBuf>) -> Self {
        Self {
            table: MaterialTable::new(max_materials),
            dir: dir.into(),
        }
    }

    pub fn table(&self) -> &MaterialTable {
        &self.table
    }

    pub fn apply(&mut self, directive: &Directive<'_>) -> Result<(), Reason> {
        super::apply(TABLE, self, directive)
    }

    pub fn finish(self) -> Vec<Material> {
        self.table.finish()
    }

    fn record(&mut self, d: &Directive<'_>) -> Result<&mut Material, Reason> {
        self.table.record_mut(d.token().super_index)
    }

    fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }
}

pub const TABLE: Table<Builder> = &[
    ("num-materials", |b, d| {
        let n: i64 = d.number()?;
        b.table.set_num_materials(d.statement(), n)
    }),
    ("name", |b, d| {
        b.record(d)?.name = d.text();
        Ok(())
    }),
    ("alpha", |b, d| {
        b.record(d)?.alpha = d.number()?;
        Ok(())
    }),
    ("Jij_matrix", |b, d| {
        let value = d.measured_or_internal(Dimension::Energy)?;
        *partner(&mut b.record(d)?.exchange, d)? = value;
        Ok(())
    }),
    ("mu_s", |b, d| {
        b.record(d)?.moment = MomentSpec::Moment(d.measured_or_internal(Dimension::Moment)?);
        Ok(())
    }),
    ("magnetisation", |b, d| {
        b.record(d)?.moment =
            MomentSpec::Magnetisation(d.measured_or_internal(Dimension::Magnetisation)?);
        Ok(())
    }),
    ("Ku1", |b, d| {
        b.record(d)?.ku1 = d.measured_or_internal(Dimension::Anisotropy)?;
        Ok(())
    }),
    ("gamma-rel", |b, d| {
        b.record(d)?.gamma_rel = d.number()?;
        Ok(())
    }),
    ("Sx", |b, d| spin_component(b, d, 0)),
    ("Sy", |b, d| spin_component(b, d, 1)),
    ("Sz", |b, d| spin_component(b, d, 2)),
    ("random-spins", |b, d| {
        let random = d.boolean()?;
        let record = b.record(d)?;
        match (random, record.initial_spin) {
            (true, _) => record.initial_spin = SpinInit::Random,
            (false, SpinInit::Random) => {
                record.initial_spin = SpinInit::Fixed(SpinInit::DEFAULT_DIRECTION)
            }
            (false, SpinInit::Fixed(_)) => {}
        }
        Ok(())
    }),
    ("hamiltonian", |b, d| {
        b.record(d)?.hamiltonian = d.text();
        Ok(())
    }),
    ("element", |b, d| {
        let (symbol, truncated) = Material::element_symbol(&d.text());
        if truncated {
            warn!(
                "element '{}' in '{}' truncated to '{}'",
                d.value(),
                d.statement(),
                symbol
            );
        }
        b.record(d)?.element = symbol;
        Ok(())
    }),
    ("crystal-structure", |b, d| {
        b.record(d)?.crystal_structure = d.text();
        Ok(())
    }),
    ("geometry", |b, d| {
        let path = b.resolve(&d.filename()?);
        let polygon = load_polygon(&path)?;
        debug!(
            path = %path.display(),
            vertices = polygon.len(),
            "loaded geometry for {}",
            d.statement()
        );
        b.record(d)?.geometry = Some(polygon);
        Ok(())
    }),
    ("alloy-master", |b, d| {
        b.record(d)?.alloy_master = d.flag()?;
        Ok(())
    }),
    ("alloy-class", |b, d| {
        let class = d.integer(Interval::closed(-1.0, 3.0), Severity::Recoverable)?;
        b.record(d)?.alloy_class = class as i32;
        Ok(())
    }),
    ("alloy", |b, d| {
        let value = fraction(d)?;
        *partner(&mut b.record(d)?.alloy, d)? = value;
        Ok(())
    }),
    ("min", |b, d| {
        b.record(d)?.min = fraction(d)?;
        Ok(())
    }),
    ("max", |b, d| {
        b.record(d)?.max = fraction(d)?;
        Ok(())
    }),
    ("core-shell-size", |b, d| {
        b.record(d)?.core_shell_size = fraction(d)?;
        Ok(())
    }),
    ("interface-roughness", |b, d| {
        b.record(d)?.interface_roughness = fraction(d)?;
        Ok(())
    }),
    ("density", |b, d| {
        b.record(d)?.density = fraction(d)?;
        Ok(())
    }),
    ("continuous", |b, d| {
        b.record(d)?.continuous = d.boolean()?;
        Ok(())
    }),
    ("intermixing", |b, d| {
        let value = fraction(d)?;
        *partner(&mut b.record(d)?.intermixing, d)? = value;
        Ok(())
    }),
];

fn spin_component(b: &mut Builder, d: &Directive<'_>, axis: usize) -> Result<(), Reason> {
    let value: f64 = d.number()?;
    b.record(d)?.initial_spin.set_component(axis, value);
    Ok(())
}

fn fraction(d: &Directive<'_>) -> Result<f64, Reason> {
    d.bounded(Interval::closed(0.0, 1.0), Severity::Recoverable)
}

/// Entry for the partner material named by the sub index.
fn partner<'m>(values: &'m mut [f64], d: &Directive<'_>) -> Result<&'m mut f64, Reason> {
    let max = values.len();
    let index = d.token().sub_index;
    values
        .get_mut(index)
        .ok_or(Reason::Index(spinconf_lexer::LexError::IndexOutOfRange {
            index: index as i64,
            max,
        }))
}
