//! Field-cool schedule built from control files on disk.

use std::fs;

use spinconf_input::{load, Options};
use spinconf_tools::schedule::{FieldCoolPlan, Phase, ScheduleError};

const MATERIAL: &str = "material:num-materials=1\nmaterial[0]:name=Co\n";

fn plan(control: &str) -> Result<FieldCoolPlan, ScheduleError> {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Co.mat"), MATERIAL).unwrap();
    let input = dir.path().join("input");
    fs::write(&input, control).unwrap();

    let config = load(&input, &Options::default()).unwrap();
    FieldCoolPlan::from_config(&config)
}

#[test]
fn test_exponential_cooling_from_control_file() {
    let plan = plan(
        "\
material:file=Co.mat
sim:program=Field-Cool
sim:cooling-function=exponential
sim:maximum-temperature=700
sim:minimum-temperature=100
sim:cooling-time=1.0e-13
sim:dt=1.0e-16
sim:total-time=3000
sim:partial-time=1000
",
    )
    .unwrap();

    let samples = plan.samples();
    let temperatures: Vec<_> = samples.iter().map(|s| s.temperature).collect();
    assert_eq!(temperatures.len(), 3);
    assert_eq!(temperatures[0], 700.0);
    assert!((temperatures[1] - (100.0 + 600.0 * (-1.0f64).exp())).abs() < 1e-9);
    assert!(temperatures[2] < temperatures[1]);
    assert!(samples.iter().all(|s| s.phase == Phase::Cooling));
}

#[test]
fn test_equilibration_samples() {
    let plan = plan(
        "\
material:file=Co.mat
sim:equilibration-time=2000
sim:equilibration-temperature=300
sim:total-time=1000
sim:partial-time=1000
",
    )
    .unwrap();

    let steps: Vec<_> = plan.samples().iter().map(|s| (s.step, s.phase)).collect();
    assert_eq!(
        steps,
        [
            (0, Phase::Equilibration),
            (1000, Phase::Equilibration),
            (2000, Phase::Cooling),
        ]
    );
}

#[test]
fn test_missing_materials() {
    let err = plan("sim:program=Field-Cool\n").unwrap_err();
    assert_eq!(err, ScheduleError::NoMaterials);
}

#[test]
fn test_zero_cooling_time() {
    let err = plan("material:file=Co.mat\nsim:cooling-time=0\n").unwrap_err();
    assert_eq!(err, ScheduleError::NonPositiveCoolingTime(0.0));
}
