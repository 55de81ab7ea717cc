//! `config:`: Atomic configuration snapshots.

use super::{Directive, Interval, Table};
use crate::config::AtomsOutput;
use crate::error::{Reason, Severity};

pub const TABLE: Table<AtomsOutput> = &[
    ("atoms", |a, _| {
        a.enabled = true;
        Ok(())
    }),
    ("atoms-output-rate", |a, d| {
        a.output_rate = d.count(Interval::at_least(0.0), Severity::Recoverable)?;
        Ok(())
    }),
    ("atoms-min-x", |a, d| {
        a.min[0] = fraction(d)?;
        Ok(())
    }),
    ("atoms-min-y", |a, d| {
        a.min[1] = fraction(d)?;
        Ok(())
    }),
    ("atoms-min-z", |a, d| {
        a.min[2] = fraction(d)?;
        Ok(())
    }),
    ("atoms-max-x", |a, d| {
        a.max[0] = fraction(d)?;
        Ok(())
    }),
    ("atoms-max-y", |a, d| {
        a.max[1] = fraction(d)?;
        Ok(())
    }),
    ("atoms-max-z", |a, d| {
        a.max[2] = fraction(d)?;
        Ok(())
    }),
];

fn fraction(d: &Directive<'_>) -> Result<f64, Reason> {
    d.bounded(Interval::closed(0.0, 1.0), Severity::Recoverable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::testing::run;

    #[test]
    fn test_enable_and_rate() {
        let mut a = AtomsOutput::default();
        run(TABLE, &mut a, "config:atoms").unwrap();
        run(TABLE, &mut a, "config:atoms-output-rate=250").unwrap();
        assert!(a.enabled);
        assert_eq!(a.output_rate, 250);
    }

    #[test]
    fn test_bounds_are_fractions() {
        let mut a = AtomsOutput::default();
        run(TABLE, &mut a, "config:atoms-min-z=0.25").unwrap();
        run(TABLE, &mut a, "config:atoms-max-x=0.75").unwrap();
        assert_eq!(a.min, [0.0, 0.0, 0.25]);
        assert_eq!(a.max, [0.75, 1.0, 1.0]);

        let err = run(TABLE, &mut a, "config:atoms-max-y=1.5").unwrap_err();
        assert_eq!(err.severity(), Severity::Recoverable);
    }
}
