//! `create:`: System shape and construction.

use super::{Interval, Table};
use crate::config::{CreateParams, Shape, SystemType};
use crate::error::{Reason, Severity};

pub const TABLE: Table<CreateParams> = &[
    ("full", |c, _| shape(c, Shape::Full)),
    ("cube", |c, _| shape(c, Shape::Cube)),
    ("cylinder", |c, _| shape(c, Shape::Cylinder)),
    ("ellipsinder", |c, _| shape(c, Shape::Ellipsinder)),
    ("sphere", |c, _| shape(c, Shape::Sphere)),
    ("truncated-octahedron", |c, _| shape(c, Shape::TruncatedOctahedron)),
    ("particle", |c, _| system(c, SystemType::Particle)),
    ("particle-array", |c, _| system(c, SystemType::ParticleArray)),
    ("hex-particle-array", |c, _| system(c, SystemType::HexParticleArray)),
    ("voronoi-film", |c, _| system(c, SystemType::VoronoiFilm)),
    ("voronoi-variance", |c, d| {
        c.voronoi.variance = d.bounded(Interval::closed(0.0, 1.0), Severity::Recoverable)?;
        Ok(())
    }),
    ("voronoi-parity", |c, d| {
        c.voronoi.parity = d.integer(Interval::closed(0.0, 1.0), Severity::Recoverable)? as i32;
        Ok(())
    }),
    ("voronoi-seed", |c, d| {
        c.voronoi.seed = d.number()?;
        Ok(())
    }),
    ("voronoi-rounded", |c, d| {
        c.voronoi.rounded = d.boolean()?;
        Ok(())
    }),
    ("voronoi-area-cutoff", |c, d| {
        c.voronoi.area_cutoff = d.bounded(Interval::closed(0.0, 1.0), Severity::Recoverable)?;
        Ok(())
    }),
    ("Jij-explicit", |c, _| {
        c.explicit_exchange = true;
        Ok(())
    }),
    ("particle-parity", |c, d| {
        c.particle_parity = d.number()?;
        Ok(())
    }),
    ("crystal-structure", |c, d| {
        c.crystal_structure = d.required_text()?;
        Ok(())
    }),
    ("single-spin", |c, _| {
        c.single_spin = true;
        Ok(())
    }),
];

fn shape(c: &mut CreateParams, shape: Shape) -> Result<(), Reason> {
    c.shape = shape;
    Ok(())
}

fn system(c: &mut CreateParams, system: SystemType) -> Result<(), Reason> {
    c.system = system;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::testing::run;

    #[test]
    fn test_shape_words() {
        let mut c = CreateParams::default();
        run(TABLE, &mut c, "create:cube").unwrap();
        assert_eq!(c.shape, Shape::Cube);
        run(TABLE, &mut c, "create:truncated-octahedron").unwrap();
        assert_eq!(c.shape.code(), 5);
    }

    #[test]
    fn test_system_words() {
        let mut c = CreateParams::default();
        run(TABLE, &mut c, "create:voronoi-film").unwrap();
        assert_eq!(c.system, SystemType::VoronoiFilm);
    }

    #[test]
    fn test_voronoi_variance_boundaries() {
        let mut c = CreateParams::default();
        run(TABLE, &mut c, "create:voronoi-variance=0.0").unwrap();
        assert_eq!(c.voronoi.variance, 0.0);
        run(TABLE, &mut c, "create:voronoi-variance=1.0").unwrap();
        assert_eq!(c.voronoi.variance, 1.0);

        let err = run(TABLE, &mut c, "create:voronoi-variance=1.0001").unwrap_err();
        assert_eq!(err.severity(), Severity::Recoverable);
        assert!(matches!(err, Reason::OutOfRange { .. }));
        assert_eq!(c.voronoi.variance, 1.0);
    }

    #[test]
    fn test_voronoi_parity() {
        let mut c = CreateParams::default();
        run(TABLE, &mut c, "create:voronoi-parity=1").unwrap();
        assert_eq!(c.voronoi.parity, 1);
        assert!(run(TABLE, &mut c, "create:voronoi-parity=2").is_err());
    }

    #[test]
    fn test_voronoi_rounded_is_strict() {
        let mut c = CreateParams::default();
        run(TABLE, &mut c, "create:voronoi-rounded=true").unwrap();
        assert!(c.voronoi.rounded);

        let err = run(TABLE, &mut c, "create:voronoi-rounded=yes").unwrap_err();
        assert!(matches!(err, Reason::InvalidBoolean { .. }));
        assert_eq!(err.severity(), Severity::Fatal);
    }

    #[test]
    fn test_crystal_structure_strips_quotes() {
        let mut c = CreateParams::default();
        run(TABLE, &mut c, "create:crystal-structure=\"fcc\"").unwrap();
        assert_eq!(c.crystal_structure, "fcc");

        let err = run(TABLE, &mut c, "create:crystal-structure=\"\"").unwrap_err();
        assert!(matches!(err, Reason::EmptyValue { .. }));
        assert_eq!(
            err.to_string(),
            "empty value in control statement 'create:crystal-structure'"
        );
    }

    #[test]
    fn test_flags() {
        let mut c = CreateParams::default();
        run(TABLE, &mut c, "create:Jij-explicit").unwrap();
        run(TABLE, &mut c, "create:single-spin").unwrap();
        assert!(c.explicit_exchange);
        assert!(c.single_spin);
    }

    #[test]
    fn test_unknown_word() {
        let mut c = CreateParams::default();
        let err = run(TABLE, &mut c, "create:pyramid").unwrap_err();
        assert_eq!(err.to_string(), "unknown control statement 'create:pyramid'");
        assert_eq!(err.severity(), Severity::Recoverable);
    }
}
