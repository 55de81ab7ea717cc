//! `sim:`: Integrator, program, timing, temperature and field settings.

use spinconf_units::Dimension;

use super::{Directive, Interval, Table};
use crate::config::{CoolingFunction, Integrator, MpiMode, Program, SimParams};
use crate::error::{Reason, Severity};

const TIME_STEP: Interval = Interval::half_open(1.0e-20, 1.0e-6);
const TEMPERATURE: Interval = Interval::half_open(0.0, 1.0e10);
const PUMP_POWER: Interval = Interval::half_open(0.0, 1.0e40);

pub const TABLE: Table<SimParams> = &[
    ("integrator", |s, d| {
        s.integrator = d.choice(Integrator::LITERALS)?;
        Ok(())
    }),
    ("program", |s, d| {
        s.program = d.choice(Program::LITERALS)?;
        Ok(())
    }),
    ("cooling-function", |s, d| {
        s.cooling_function = d.choice(CoolingFunction::LITERALS)?;
        Ok(())
    }),
    ("mpi-mode", |s, d| {
        s.mpi_mode = d.choice(MpiMode::LITERALS)?;
        Ok(())
    }),
    // Hamiltonian terms
    ("exchange", |s, d| {
        s.hamiltonian.exchange = d.boolean()?;
        Ok(())
    }),
    ("anisotropy", |s, d| {
        s.hamiltonian.anisotropy = d.boolean()?;
        Ok(())
    }),
    ("applied", |s, d| {
        s.hamiltonian.applied = d.boolean()?;
        Ok(())
    }),
    ("thermal", |s, d| {
        s.hamiltonian.thermal = d.boolean()?;
        Ok(())
    }),
    ("dipolar", |s, d| {
        s.hamiltonian.dipolar = d.boolean()?;
        Ok(())
    }),
    ("fmr", |s, d| {
        s.hamiltonian.fmr = d.boolean()?;
        Ok(())
    }),
    ("fast-dipolar", |s, d| {
        s.fast_dipolar = d.boolean()?;
        Ok(())
    }),
    ("dipolar-update-rate", |s, d| {
        s.dipolar_update_rate = d.count(Interval::at_least(1.0), Severity::Fatal)?;
        Ok(())
    }),
    ("External-Demag", |s, d| {
        s.external_demag = d.boolean()?;
        Ok(())
    }),
    // Timing
    ("dt", |s, d| {
        s.dt = d.bounded(TIME_STEP, Severity::Fatal)?;
        Ok(())
    }),
    ("total-time", |s, d| {
        s.total_time = steps(d)?;
        Ok(())
    }),
    ("loop-time", |s, d| {
        s.loop_time = steps(d)?;
        Ok(())
    }),
    ("partial-time", |s, d| {
        s.partial_time = steps(d)?;
        Ok(())
    }),
    ("equilibration-time", |s, d| {
        s.equilibration_time = steps(d)?;
        Ok(())
    }),
    ("runs", |s, d| {
        s.runs = d.count(Interval::above(0.0), Severity::Fatal)?;
        Ok(())
    }),
    // Temperatures
    ("maximum-temperature", |s, d| {
        s.maximum_temperature = temperature(d)?;
        Ok(())
    }),
    ("minimum-temperature", |s, d| {
        s.minimum_temperature = temperature(d)?;
        Ok(())
    }),
    ("equilibration-temperature", |s, d| {
        s.equilibration_temperature = temperature(d)?;
        Ok(())
    }),
    ("temperature", |s, d| {
        s.temperature = temperature(d)?;
        Ok(())
    }),
    ("delta-temperature", |s, d| {
        s.delta_temperature = temperature(d)?;
        Ok(())
    }),
    ("cooling-time", |s, d| {
        s.cooling_time = temperature(d)?;
        Ok(())
    }),
    ("pump-time", |s, d| {
        s.pump_time = temperature(d)?;
        Ok(())
    }),
    ("pump-power", |s, d| {
        s.pump_power = d.bounded(PUMP_POWER, Severity::Fatal)?;
        Ok(())
    }),
    // Applied field
    ("H-applied", |s, d| {
        s.applied_field = field(d)?;
        Ok(())
    }),
    ("Hmin", |s, d| {
        s.minimum_field = field(d)?;
        Ok(())
    }),
    ("Hmax", |s, d| {
        s.maximum_field = field(d)?;
        Ok(())
    }),
    ("Heq", |s, d| {
        s.equilibration_field = field(d)?;
        Ok(())
    }),
    ("Hinc", |s, d| {
        s.field_increment = field(d)?;
        Ok(())
    }),
    ("Hx", |s, d| {
        s.field_direction[0] = d.number()?;
        Ok(())
    }),
    ("Hy", |s, d| {
        s.field_direction[1] = d.number()?;
        Ok(())
    }),
    ("Hz", |s, d| {
        s.field_direction[2] = d.number()?;
        Ok(())
    }),
    ("Dx", |s, d| {
        s.demag_factor[0] = d.number()?;
        Ok(())
    }),
    ("Dy", |s, d| {
        s.demag_factor[1] = d.number()?;
        Ok(())
    }),
    ("Dz", |s, d| {
        s.demag_factor[2] = d.number()?;
        Ok(())
    }),
    ("integrator-seed", |s, d| {
        s.integrator_seed = d.number()?;
        Ok(())
    }),
];

fn steps(d: &Directive<'_>) -> Result<u64, Reason> {
    d.count(Interval::at_least(0.0), Severity::Fatal)
}

fn temperature(d: &Directive<'_>) -> Result<f64, Reason> {
    d.bounded(TEMPERATURE, Severity::Fatal)
}

fn field(d: &Directive<'_>) -> Result<f64, Reason> {
    d.measured_or_internal(Dimension::Field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::testing::run;

    #[test]
    fn test_integrator_heun() {
        let mut s = SimParams {
            integrator: Integrator::MonteCarlo,
            ..SimParams::default()
        };
        run(TABLE, &mut s, "sim:integrator=LLG-Heun").unwrap();
        assert_eq!(s.integrator, Integrator::LlgHeun);
        assert_eq!(s.integrator.code(), 0);
    }

    #[test]
    fn test_program_field_cool() {
        let mut s = SimParams::default();
        run(TABLE, &mut s, "sim:program=Field-Cool").unwrap();
        assert_eq!(s.program, Program::FieldCool);
        run(TABLE, &mut s, "sim:program=Diagnostic-Boltzmann").unwrap();
        assert_eq!(s.program.code(), 50);
    }

    #[test]
    fn test_invalid_enumeration_lists_literals() {
        let mut s = SimParams::default();
        let err = run(TABLE, &mut s, "sim:integrator=Euler").unwrap_err();
        assert_eq!(err.severity(), Severity::Fatal);
        let message = err.to_string();
        for (literal, _) in Integrator::LITERALS {
            assert!(message.contains(literal), "missing {literal} in {message}");
        }
    }

    #[test]
    fn test_enumeration_is_case_sensitive() {
        let mut s = SimParams::default();
        assert!(run(TABLE, &mut s, "sim:cooling-function=Linear").is_err());
        run(TABLE, &mut s, "sim:cooling-function=linear").unwrap();
        assert_eq!(s.cooling_function, CoolingFunction::Linear);
    }

    #[test]
    fn test_dt_out_of_range_names_statement() {
        let mut s = SimParams::default();
        let err = run(TABLE, &mut s, "sim:dt=2.0e-5").unwrap_err();
        assert_eq!(err.severity(), Severity::Fatal);
        assert!(err.to_string().contains("sim:dt"));
        assert_eq!(s.dt, SimParams::default().dt);
    }

    #[test]
    fn test_dt_boundaries() {
        let mut s = SimParams::default();
        run(TABLE, &mut s, "sim:dt=1.0e-20").unwrap();
        assert_eq!(s.dt, 1.0e-20);
        assert!(run(TABLE, &mut s, "sim:dt=1.0e-6").is_err());
        assert!(run(TABLE, &mut s, "sim:dt=0").is_err());
    }

    #[test]
    fn test_hamiltonian_toggles() {
        let mut s = SimParams::default();
        run(TABLE, &mut s, "sim:dipolar=true").unwrap();
        run(TABLE, &mut s, "sim:exchange=false").unwrap();
        assert!(s.hamiltonian.dipolar);
        assert!(!s.hamiltonian.exchange);
        assert!(run(TABLE, &mut s, "sim:fmr=1").is_err());
    }

    #[test]
    fn test_runs_and_update_rate() {
        let mut s = SimParams::default();
        assert!(run(TABLE, &mut s, "sim:runs=0").is_err());
        run(TABLE, &mut s, "sim:runs=3").unwrap();
        assert_eq!(s.runs, 3);

        assert!(run(TABLE, &mut s, "sim:dipolar-update-rate=0").is_err());
        run(TABLE, &mut s, "sim:dipolar-update-rate=1").unwrap();
        assert_eq!(s.dipolar_update_rate, 1);
    }

    #[test]
    fn test_temperature_range() {
        let mut s = SimParams::default();
        run(TABLE, &mut s, "sim:temperature=0").unwrap();
        run(TABLE, &mut s, "sim:maximum-temperature=900").unwrap();
        assert_eq!(s.maximum_temperature, 900.0);
        assert!(run(TABLE, &mut s, "sim:minimum-temperature=-1").is_err());
        assert!(run(TABLE, &mut s, "sim:equilibration-temperature=1e10").is_err());
    }

    #[test]
    fn test_step_counts() {
        let mut s = SimParams::default();
        run(TABLE, &mut s, "sim:total-time=50000").unwrap();
        run(TABLE, &mut s, "sim:equilibration-time=1000").unwrap();
        assert_eq!(s.total_time, 50_000);
        assert_eq!(s.equilibration_time, 1000);
        assert!(matches!(
            run(TABLE, &mut s, "sim:loop-time=ten"),
            Err(Reason::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_field_units() {
        let mut s = SimParams::default();
        run(TABLE, &mut s, "sim:H-applied=0.5").unwrap();
        assert_eq!(s.applied_field, 0.5);

        run(TABLE, &mut s, "sim:Hmax=500!mT").unwrap();
        assert!((s.maximum_field - 0.5).abs() < 1e-12);

        let err = run(TABLE, &mut s, "sim:Hmin=-1!nm").unwrap_err();
        assert!(matches!(err, Reason::UnitMismatch { .. }));
    }

    #[test]
    fn test_vectors() {
        let mut s = SimParams::default();
        run(TABLE, &mut s, "sim:Hx=1").unwrap();
        run(TABLE, &mut s, "sim:Hz=0").unwrap();
        run(TABLE, &mut s, "sim:Dz=0.33").unwrap();
        assert_eq!(s.field_direction, [1.0, 0.0, 0.0]);
        assert_eq!(s.demag_factor, [0.0, 0.0, 0.33]);
    }

    #[test]
    fn test_last_write_wins() {
        let mut s = SimParams::default();
        run(TABLE, &mut s, "sim:integrator-seed=1").unwrap();
        run(TABLE, &mut s, "sim:integrator-seed=2").unwrap();
        assert_eq!(s.integrator_seed, 2);
    }
}
