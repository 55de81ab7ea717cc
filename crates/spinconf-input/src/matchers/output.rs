//! `vmag:`, `screen:` and `vgrain:`: Output selector lists.
//!
//! File and screen output share one table. Grain output has its own codes
//! for the quantities that are averaged per grain, plus the output rate.

use super::{Interval, Table};
use crate::config::{Observable, OutputSelection};
use crate::error::{Reason, Severity};

/// Words for the whole-system streams (`vmag`, `screen`).
pub const STREAM: Table<Vec<Observable>> = &[
    ("time", |l, _| push(l, Observable::Time)),
    ("real-time", |l, _| push(l, Observable::RealTime)),
    ("temperature", |l, _| push(l, Observable::Temperature)),
    ("field", |l, _| push(l, Observable::AppliedField)),
    ("field-vector", |l, _| push(l, Observable::FieldVector)),
    ("magnetisation", |l, _| push(l, Observable::Magnetisation)),
    ("mag-m", |l, _| push(l, Observable::MagnetisationLength)),
    ("mean-mag-m", |l, _| push(l, Observable::MeanMagnetisationLength)),
    ("material-magnetisation", |l, _| {
        push(l, Observable::MaterialMagnetisation)
    }),
    ("material-mean-mag-m", |l, _| {
        push(l, Observable::MaterialMeanMagnetisationLength)
    }),
    ("field-alignment", |l, _| push(l, Observable::FieldAlignment)),
];

/// Words for the per-grain stream (`vgrain`).
pub const GRAIN: Table<OutputSelection> = &[
    ("time", |o, _| push(&mut o.grain, Observable::Time)),
    ("real-time", |o, _| push(&mut o.grain, Observable::RealTime)),
    ("temperature", |o, _| push(&mut o.grain, Observable::Temperature)),
    ("field", |o, _| push(&mut o.grain, Observable::AppliedField)),
    ("field-vector", |o, _| push(&mut o.grain, Observable::FieldVector)),
    ("magnetisation", |o, _| {
        push(&mut o.grain, Observable::GrainMagnetisation)
    }),
    ("mag-m", |o, _| push(&mut o.grain, Observable::GrainMagnetisationLength)),
    ("material-magnetisation", |o, _| {
        push(&mut o.grain, Observable::GrainMaterialMagnetisation)
    }),
    ("output-rate", |o, d| {
        o.grain_output_rate = d.count(Interval::above(0.0), Severity::Fatal)?;
        Ok(())
    }),
];

fn push(list: &mut Vec<Observable>, observable: Observable) -> Result<(), Reason> {
    list.push(observable);
    Ok(())
}
