//! Material records and the material table.
//!
//! The table is built from a material file in two stages: records are
//! written into a scratch table holding `max_materials` defaults, addressed
//! by the `[super]` index of each line, and [`MaterialTable::finish`] then
//! copies the first `num_materials` records into the final table.

use serde::Serialize;

use crate::error::Reason;
use crate::geometry::Polygon;

/// Size of a material record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MomentSpec {
    /// Atomic moment in Bohr magnetons.
    Moment(f64),
    /// Saturation magnetisation in A/m.
    Magnetisation(f64),
}

/// Initial spin state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SpinInit {
    /// Every spin starts along this direction.
    Fixed([f64; 3]),
    Random,
}

impl SpinInit {
    pub const DEFAULT_DIRECTION: [f64; 3] = [0.0, 0.0, 1.0];

    /// Set one component, switching to a fixed direction if needed.
    pub fn set_component(&mut self, axis: usize, value: f64) {
        let mut direction = match *self {
            SpinInit::Fixed(direction) => direction,
            SpinInit::Random => Self::DEFAULT_DIRECTION,
        };
        direction[axis] = value;
        *self = SpinInit::Fixed(direction);
    }

    pub fn is_random(&self) -> bool {
        matches!(self, SpinInit::Random)
    }
}

/// One magnetic species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub name: String,
    /// Gilbert damping.
    pub alpha: f64,
    pub moment: MomentSpec,
    /// Uniaxial anisotropy in J/atom.
    pub ku1: f64,
    pub gamma_rel: f64,
    pub initial_spin: SpinInit,
    pub hamiltonian: String,
    /// Element symbol, always three characters.
    pub element: String,
    pub crystal_structure: String,
    pub geometry: Option<Polygon>,
    pub alloy_master: bool,
    pub alloy_class: i32,
    pub min: f64,
    pub max: f64,
    pub core_shell_size: f64,
    pub interface_roughness: f64,
    pub density: f64,
    pub continuous: bool,
    /// Exchange constant with each partner material, in joules.
    pub exchange: Vec<f64>,
    pub alloy: Vec<f64>,
    pub intermixing: Vec<f64>,
}

impl Material {
    /// Default record at `index` with partner arrays sized for
    /// `max_materials` partners.
    pub fn new(index: usize, max_materials: usize) -> Self {
        Self {
            name: format!("material#{index}"),
            alpha: 1.0,
            moment: MomentSpec::Moment(1.72),
            ku1: 0.0,
            gamma_rel: 1.0,
            initial_spin: SpinInit::Fixed(SpinInit::DEFAULT_DIRECTION),
            hamiltonian: "generic".to_string(),
            element: "Fe ".to_string(),
            crystal_structure: "sc".to_string(),
            geometry: None,
            alloy_master: false,
            alloy_class: -1,
            min: 0.0,
            max: 1.0,
            core_shell_size: 0.0,
            interface_roughness: 0.0,
            density: 1.0,
            continuous: false,
            exchange: vec![0.0; max_materials],
            alloy: vec![0.0; max_materials],
            intermixing: vec![0.0; max_materials],
        }
    }

    /// Element symbol padded or truncated to three characters.
    ///
    /// Returns the symbol and whether anything was cut off.
    pub fn element_symbol(raw: &str) -> (String, bool) {
        let truncated = raw.chars().count() > 3;
        let symbol: String = raw.chars().chain(std::iter::repeat(' ')).take(3).collect();
        (symbol, truncated)
    }
}

/// Scratch table filled while reading a material file.
#[derive(Debug, Clone)]
pub struct MaterialTable {
    records: Vec<Material>,
    num_materials: usize,
}

impl MaterialTable {
    pub fn new(max_materials: usize) -> Self {
        Self {
            records: (0..max_materials)
                .map(|i| Material::new(i, max_materials))
                .collect(),
            num_materials: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    pub fn num_materials(&self) -> usize {
        self.num_materials
    }

    /// Declare how many records survive [`finish`](Self::finish).
    pub fn set_num_materials(&mut self, statement: &str, n: i64) -> Result<(), Reason> {
        let capacity = self.capacity();
        self.num_materials = usize::try_from(n)
            .ok()
            .filter(|&n| n <= capacity)
            .ok_or_else(|| Reason::OutOfRange {
                statement: statement.to_string(),
                value: n.to_string(),
                range: format!("[0, {capacity}]"),
                severity: crate::error::Severity::Fatal,
            })?;
        Ok(())
    }

    /// Record at `index`, checked against the capacity.
    pub fn record_mut(&mut self, index: usize) -> Result<&mut Material, Reason> {
        let max = self.capacity();
        self.records
            .get_mut(index)
            .ok_or(Reason::Index(spinconf_lexer::LexError::IndexOutOfRange {
                index: index as i64,
                max,
            }))
    }

    pub fn record(&self, index: usize) -> Option<&Material> {
        self.records.get(index)
    }

    /// Copy records `[0, num_materials)` into the final table.
    pub fn finish(self) -> Vec<Material> {
        let n = self.num_materials.min(self.records.len());
        self.records[..n].to_vec()
    }
}
