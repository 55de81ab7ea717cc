//! Field-cool temperature schedule.
//!
//! Reads the timing and temperature fields of a loaded configuration and
//! produces the temperature the field-cool program applies at every
//! sampling point. Each run first equilibrates at the equilibration
//! temperature until the step counter reaches `equilibration_time`, then
//! cools for `total_time` steps. The step counter is shared by all runs,
//! so only the first run equilibrates.

use serde::Serialize;
use spinconf_input::config::{CoolingFunction, Program, SimParams};
use spinconf_input::Configuration;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("no materials defined, set num-materials in the material file")]
    NoMaterials,

    #[error("sim:partial-time must be at least 1 to sample the schedule")]
    ZeroPartialTime,

    #[error("sim:cooling-time must be positive, got {0}")]
    NonPositiveCoolingTime(f64),
}

/// Temperature as a function of time since cooling started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingSchedule {
    pub function: CoolingFunction,
    pub maximum: f64,
    pub minimum: f64,
    /// Characteristic time in seconds.
    pub cooling_time: f64,
}

impl CoolingSchedule {
    pub fn from_sim(sim: &SimParams) -> Self {
        Self {
            function: sim.cooling_function,
            maximum: sim.maximum_temperature,
            minimum: sim.minimum_temperature,
            cooling_time: sim.cooling_time,
        }
    }

    /// Temperature `t` seconds after cooling started.
    pub fn temperature_at(&self, t: f64) -> f64 {
        let span = self.maximum - self.minimum;
        let tc = self.cooling_time;
        match self.function {
            CoolingFunction::Exponential => self.minimum + span * (-t / tc).exp(),
            CoolingFunction::Gaussian => self.minimum + span * (-(t * t) / (tc * tc)).exp(),
            CoolingFunction::DoubleGaussian => {
                let from_centre = t - 3.0 * tc;
                self.minimum + span * (-(from_centre * from_centre) / (tc * tc)).exp()
            }
            CoolingFunction::Linear => (self.maximum - span * (t / tc)).max(self.minimum),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Equilibration,
    Cooling,
}

/// Temperature applied for the `partial_time` steps starting at `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub run: u64,
    pub step: u64,
    pub phase: Phase,
    pub temperature: f64,
}

/// Sampling plan of a field-cool run.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCoolPlan {
    pub schedule: CoolingSchedule,
    pub dt: f64,
    pub runs: u64,
    pub equilibration_time: u64,
    pub equilibration_temperature: f64,
    pub total_time: u64,
    pub partial_time: u64,
}

impl FieldCoolPlan {
    pub fn from_config(config: &Configuration) -> Result<Self, ScheduleError> {
        if config.materials.is_empty() {
            return Err(ScheduleError::NoMaterials);
        }

        let sim = &config.sim;
        if sim.program != Program::FieldCool {
            warn!(
                "sim:program is {}, showing the field-cool schedule anyway",
                sim.program.literal()
            );
        }
        if sim.partial_time == 0 {
            return Err(ScheduleError::ZeroPartialTime);
        }
        if sim.cooling_time <= 0.0 {
            return Err(ScheduleError::NonPositiveCoolingTime(sim.cooling_time));
        }

        Ok(Self {
            schedule: CoolingSchedule::from_sim(sim),
            dt: sim.dt,
            runs: sim.runs,
            equilibration_time: sim.equilibration_time,
            equilibration_temperature: sim.equilibration_temperature,
            total_time: sim.total_time,
            partial_time: sim.partial_time,
        })
    }

    pub fn samples(&self) -> Vec<Sample> {
        let mut samples = Vec::new();
        let mut step: u64 = 0;

        for run in 0..self.runs {
            while step < self.equilibration_time {
                samples.push(Sample {
                    run,
                    step,
                    phase: Phase::Equilibration,
                    temperature: self.equilibration_temperature,
                });
                step = step.saturating_add(self.partial_time);
            }

            let start = step;
            let end = start.saturating_add(self.total_time);
            while step < end {
                let elapsed = self.dt * (step - start) as f64;
                samples.push(Sample {
                    run,
                    step,
                    phase: Phase::Cooling,
                    temperature: self.schedule.temperature_at(elapsed),
                });
                step = step.saturating_add(self.partial_time);
            }
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use spinconf_input::Material;

    use super::*;

    fn schedule(function: CoolingFunction) -> CoolingSchedule {
        CoolingSchedule {
            function,
            maximum: 600.0,
            minimum: 100.0,
            cooling_time: 1.0e-12,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_exponential() {
        let s = schedule(CoolingFunction::Exponential);
        assert!(close(s.temperature_at(0.0), 600.0));
        assert!(close(s.temperature_at(1.0e-12), 100.0 + 500.0 * (-1.0f64).exp()));
    }

    #[test]
    fn test_gaussian() {
        let s = schedule(CoolingFunction::Gaussian);
        assert!(close(s.temperature_at(0.0), 600.0));
        assert!(close(s.temperature_at(2.0e-12), 100.0 + 500.0 * (-4.0f64).exp()));
    }

    #[test]
    fn test_double_gaussian_peaks_at_three_cooling_times() {
        let s = schedule(CoolingFunction::DoubleGaussian);
        assert!(close(s.temperature_at(3.0e-12), 600.0));
        assert!(s.temperature_at(0.0) < 101.0);
        assert!(close(s.temperature_at(2.0e-12), s.temperature_at(4.0e-12)));
    }

    #[test]
    fn test_linear_clamps_at_minimum() {
        let s = schedule(CoolingFunction::Linear);
        assert!(close(s.temperature_at(0.5e-12), 350.0));
        assert!(close(s.temperature_at(1.0e-12), 100.0));
        assert!(close(s.temperature_at(5.0e-12), 100.0));
    }

    fn config() -> Configuration {
        let mut config = Configuration::default();
        config.materials.push(Material::new(0, 1));
        config.sim.program = Program::FieldCool;
        config.sim.cooling_function = CoolingFunction::Linear;
        config.sim.maximum_temperature = 500.0;
        config.sim.minimum_temperature = 0.0;
        config.sim.equilibration_temperature = 500.0;
        config.sim.cooling_time = 1.0e-12;
        config.sim.dt = 1.0e-15;
        config.sim.equilibration_time = 200;
        config.sim.total_time = 1000;
        config.sim.partial_time = 250;
        config.sim.runs = 2;
        config
    }

    #[test]
    fn test_plan_samples() {
        let plan = FieldCoolPlan::from_config(&config()).unwrap();
        let samples = plan.samples();

        let equilibration: Vec<_> = samples
            .iter()
            .filter(|s| s.phase == Phase::Equilibration)
            .collect();
        assert_eq!(equilibration.len(), 1);
        assert_eq!(equilibration[0].temperature, 500.0);

        // first run cools from step 250 (first sample past equilibration)
        let first: Vec<_> = samples
            .iter()
            .filter(|s| s.run == 0 && s.phase == Phase::Cooling)
            .map(|s| (s.step, s.temperature))
            .collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first[0], (250, 500.0));
        assert!(close(first[1].1, 375.0));

        // second run does not equilibrate again
        let second: Vec<_> = samples.iter().filter(|s| s.run == 1).collect();
        assert!(second.iter().all(|s| s.phase == Phase::Cooling));
        assert_eq!(second[0].step, 1250);
        assert_eq!(second[0].temperature, 500.0);
    }

    #[test]
    fn test_step_counter_saturates() {
        let huge = i64::MAX as u64;
        let mut config = config();
        config.sim.equilibration_time = 0;
        config.sim.total_time = huge;
        config.sim.partial_time = huge;
        config.sim.runs = 3;

        let steps: Vec<_> = FieldCoolPlan::from_config(&config)
            .unwrap()
            .samples()
            .iter()
            .map(|s| (s.run, s.step))
            .collect();
        assert_eq!(steps, [(0, 0), (1, huge), (2, 2 * huge)]);
    }

    #[test]
    fn test_plan_requires_materials() {
        let mut config = config();
        config.materials.clear();
        assert_eq!(
            FieldCoolPlan::from_config(&config),
            Err(ScheduleError::NoMaterials)
        );
    }

    #[test]
    fn test_plan_rejects_zero_partial_time() {
        let mut config = config();
        config.sim.partial_time = 0;
        assert_eq!(
            FieldCoolPlan::from_config(&config),
            Err(ScheduleError::ZeroPartialTime)
        );
    }
}
