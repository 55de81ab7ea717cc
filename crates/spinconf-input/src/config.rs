//! Simulation configuration state.
//!
//! [`Configuration`] is created with defaults by the driver, populated in
//! place by the loader and then only read. Every field can be assigned any
//! number of times; the last assignment wins.

use serde::Serialize;

use crate::material::Material;

/// Everything the control file (and the material file it references)
/// can set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Configuration {
    pub create: CreateParams,
    pub dimensions: Dimensions,
    pub sim: SimParams,
    pub output: OutputSelection,
    pub atoms: AtomsOutput,
    pub materials: Vec<Material>,
}

/// Declares an enumeration whose variants carry fixed integer codes and
/// the literals accepted for them in input files.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $code:literal => $literal:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[repr(u8)]
        pub enum $name {
            $(#[serde(rename = $literal)] $variant = $code,)+
        }

        impl $name {
            /// Accepted literals, in declaration order.
            pub const LITERALS: &'static [(&'static str, $name)] = &[
                $(($literal, $name::$variant),)+
            ];

            pub const fn code(self) -> u8 {
                self as u8
            }

            pub const fn literal(self) -> &'static str {
                match self {
                    $($name::$variant => $literal,)+
                }
            }
        }
    };
}

// ============================================================================
// create
// ============================================================================

coded_enum! {
    /// Shape cut out of the crystal.
    pub enum Shape {
        Full = 0 => "full",
        Cube = 1 => "cube",
        Cylinder = 2 => "cylinder",
        Ellipsinder = 3 => "ellipsinder",
        Sphere = 4 => "sphere",
        TruncatedOctahedron = 5 => "truncated-octahedron",
    }
}

coded_enum! {
    /// How particles are arranged in the system.
    pub enum SystemType {
        Particle = 0 => "particle",
        ParticleArray = 1 => "particle-array",
        HexParticleArray = 2 => "hex-particle-array",
        VoronoiFilm = 3 => "voronoi-film",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoronoiParams {
    pub variance: f64,
    pub parity: i32,
    pub seed: i64,
    pub rounded: bool,
    pub area_cutoff: f64,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self {
            variance: 0.1,
            parity: 0,
            seed: 10,
            rounded: false,
            area_cutoff: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateParams {
    pub shape: Shape,
    pub system: SystemType,
    /// Exchange interactions are read explicitly instead of generated.
    pub explicit_exchange: bool,
    pub voronoi: VoronoiParams,
    pub particle_parity: i32,
    pub crystal_structure: String,
    pub single_spin: bool,
}

impl Default for CreateParams {
    fn default() -> Self {
        Self {
            shape: Shape::Full,
            system: SystemType::Particle,
            explicit_exchange: false,
            voronoi: VoronoiParams::default(),
            particle_parity: 0,
            crystal_structure: "sc".to_string(),
            single_spin: false,
        }
    }
}

// ============================================================================
// dimensions
// ============================================================================

/// System geometry, all lengths in Ångström.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimensions {
    pub lattice_constant: [f64; 3],
    pub system_size: [f64; 3],
    pub particle_size: f64,
    pub particle_spacing: f64,
    pub cell_size: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            lattice_constant: [3.54; 3],
            system_size: [100.0; 3],
            particle_size: 50.0,
            particle_spacing: 10.0,
            cell_size: 2.0,
        }
    }
}

// ============================================================================
// sim
// ============================================================================

coded_enum! {
    pub enum Integrator {
        LlgHeun = 0 => "LLG-Heun",
        MonteCarlo = 1 => "Monte-Carlo",
        LlgMidpoint = 2 => "LLG-Midpoint",
        ConstrainedMonteCarlo = 3 => "Constrained-Monte-Carlo",
    }
}

coded_enum! {
    /// Simulation program run by the driver.
    pub enum Program {
        Benchmark = 0 => "Benchmark",
        TimeSeries = 1 => "Time-Series",
        HysteresisLoop = 2 => "Hysteresis-Loop",
        StaticHysteresisLoop = 3 => "Static-Hysteresis-Loop",
        CurieTemperature = 4 => "Curie-Temperature",
        FieldCool = 5 => "Field-Cool",
        TwoTemperaturePulse = 6 => "Two-Temperature-Pulse",
        HamrSimulation = 7 => "HAMR-Simulation",
        DiagnosticBoltzmann = 50 => "Diagnostic-Boltzmann",
    }
}

coded_enum! {
    /// Temperature profile used while cooling.
    pub enum CoolingFunction {
        Exponential = 0 => "exponential",
        Gaussian = 1 => "gaussian",
        DoubleGaussian = 2 => "double-gaussian",
        Linear = 3 => "linear",
    }
}

coded_enum! {
    pub enum MpiMode {
        GeometricDecomposition = 0 => "geometric-decomposition",
        ReplicatedData = 1 => "replicated-data",
    }
}

/// Terms included in the spin Hamiltonian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HamiltonianTerms {
    pub exchange: bool,
    pub anisotropy: bool,
    pub applied: bool,
    pub thermal: bool,
    pub dipolar: bool,
    pub fmr: bool,
}

impl Default for HamiltonianTerms {
    fn default() -> Self {
        Self {
            exchange: true,
            anisotropy: true,
            applied: true,
            thermal: true,
            dipolar: false,
            fmr: false,
        }
    }
}

/// Integration, timing, temperature and field parameters.
///
/// Times are step counts except `dt`, `cooling_time` and `pump_time`
/// (seconds). Fields are in tesla, temperatures in kelvin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimParams {
    pub integrator: Integrator,
    pub program: Program,
    pub cooling_function: CoolingFunction,
    pub mpi_mode: MpiMode,
    pub hamiltonian: HamiltonianTerms,
    pub fast_dipolar: bool,
    pub dipolar_update_rate: u64,
    pub external_demag: bool,

    pub dt: f64,
    pub total_time: u64,
    pub loop_time: u64,
    pub partial_time: u64,
    pub equilibration_time: u64,
    pub runs: u64,

    pub maximum_temperature: f64,
    pub minimum_temperature: f64,
    pub equilibration_temperature: f64,
    pub temperature: f64,
    pub delta_temperature: f64,
    pub cooling_time: f64,
    pub pump_time: f64,
    pub pump_power: f64,

    pub applied_field: f64,
    pub minimum_field: f64,
    pub maximum_field: f64,
    pub equilibration_field: f64,
    pub field_increment: f64,
    pub field_direction: [f64; 3],
    pub demag_factor: [f64; 3],

    pub integrator_seed: i64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            integrator: Integrator::LlgHeun,
            program: Program::Benchmark,
            cooling_function: CoolingFunction::Exponential,
            mpi_mode: MpiMode::GeometricDecomposition,
            hamiltonian: HamiltonianTerms::default(),
            fast_dipolar: false,
            dipolar_update_rate: 1000,
            external_demag: false,
            dt: 1.0e-15,
            total_time: 10_000,
            loop_time: 0,
            partial_time: 1000,
            equilibration_time: 0,
            runs: 1,
            maximum_temperature: 1000.0,
            minimum_temperature: 0.0,
            equilibration_temperature: 0.0,
            temperature: 0.0,
            delta_temperature: 10.0,
            cooling_time: 1.0e-12,
            pump_time: 20.0e-15,
            pump_power: 20.0,
            applied_field: 0.0,
            minimum_field: -1.0,
            maximum_field: 1.0,
            equilibration_field: 0.0,
            field_increment: 0.1,
            field_direction: [0.0, 0.0, 1.0],
            demag_factor: [0.0; 3],
            integrator_seed: 12345,
        }
    }
}

// ============================================================================
// output lists
// ============================================================================

coded_enum! {
    /// Derived quantity written to an output stream.
    ///
    /// Whole-system and per-grain quantities that are computed differently
    /// have distinct codes.
    pub enum Observable {
        Time = 0 => "time",
        RealTime = 1 => "real-time",
        Temperature = 2 => "temperature",
        AppliedField = 3 => "field",
        FieldVector = 4 => "field-vector",
        Magnetisation = 5 => "magnetisation",
        MagnetisationLength = 6 => "mag-m",
        MeanMagnetisationLength = 7 => "mean-mag-m",
        MaterialMagnetisation = 8 => "material-magnetisation",
        MaterialMeanMagnetisationLength = 9 => "material-mean-mag-m",
        GrainMagnetisation = 10 => "grain-magnetisation",
        GrainMagnetisationLength = 11 => "grain-mag-m",
        FieldAlignment = 12 => "field-alignment",
        GrainMaterialMagnetisation = 13 => "grain-material-magnetisation",
    }
}

/// Ordered output selector lists. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSelection {
    /// Per-step file output (`vmag`).
    pub file: Vec<Observable>,
    pub screen: Vec<Observable>,
    pub grain: Vec<Observable>,
    pub grain_output_rate: u64,
}

impl Default for OutputSelection {
    fn default() -> Self {
        Self {
            file: Vec::new(),
            screen: Vec::new(),
            grain: Vec::new(),
            grain_output_rate: 1,
        }
    }
}

impl OutputSelection {
    pub fn file_codes(&self) -> Vec<u8> {
        self.file.iter().map(|o| o.code()).collect()
    }

    pub fn screen_codes(&self) -> Vec<u8> {
        self.screen.iter().map(|o| o.code()).collect()
    }

    pub fn grain_codes(&self) -> Vec<u8> {
        self.grain.iter().map(|o| o.code()).collect()
    }
}

// ============================================================================
// config
// ============================================================================

/// Atomic configuration snapshots. Bounds are fractions of the system size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomsOutput {
    pub enabled: bool,
    pub output_rate: u64,
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Default for AtomsOutput {
    fn default() -> Self {
        Self {
            enabled: false,
            output_rate: 1000,
            min: [0.0; 3],
            max: [1.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Integrator::LlgHeun.code(), 0);
        assert_eq!(Program::DiagnosticBoltzmann.code(), 50);
        assert_eq!(Observable::MagnetisationLength.code(), 6);
        assert_eq!(Observable::FieldAlignment.code(), 12);
        assert_eq!(Shape::TruncatedOctahedron.code(), 5);
    }

    #[test]
    fn test_literals_in_declaration_order() {
        let names: Vec<_> = CoolingFunction::LITERALS.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["exponential", "gaussian", "double-gaussian", "linear"]);
        assert_eq!(MpiMode::ReplicatedData.literal(), "replicated-data");
    }

    #[test]
    fn test_serialize_uses_literals() {
        let json = serde_json::to_string(&Program::FieldCool).unwrap();
        assert_eq!(json, "\"Field-Cool\"");
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert_eq!(config.sim.integrator, Integrator::LlgHeun);
        assert_eq!(config.output.grain_output_rate, 1);
        assert!(config.materials.is_empty());
        assert!(config.sim.hamiltonian.exchange);
        assert!(!config.sim.hamiltonian.dipolar);
    }
}
