//! Category matchers.
//!
//! Each category owns a keyword table mapping a `word` to a [`Handler`].
//! Lookup is exact, case-sensitive string equality and the first entry
//! wins. A word that is not in the table is an unknown statement.
//!
//! Handlers only see the part of the configuration their category owns,
//! plus the [`Directive`] which wraps the token and the helpers shared by
//! all handler classes (enumeration, boolean, bounded and unit-checked
//! numbers, strings).

pub mod atoms;
pub mod create;
pub mod dimensions;
pub mod material;
pub mod output;
pub mod sim;

use std::fmt;
use std::str::FromStr;

use spinconf_lexer::Token;
use spinconf_units::{Convert, Dimension, UnitError};

use crate::error::{Reason, Severity};

/// Validates a directive and assigns it to `T`.
pub type Handler<T> = fn(&mut T, &Directive<'_>) -> Result<(), Reason>;

/// Keyword table of one category.
pub type Table<T> = &'static [(&'static str, Handler<T>)];

/// Route a directive through `table`.
pub fn apply<T>(table: Table<T>, target: &mut T, directive: &Directive<'_>) -> Result<(), Reason> {
    match table.iter().find(|(word, _)| *word == directive.word()) {
        Some((_, handler)) => handler(target, directive),
        None => Err(directive.unknown()),
    }
}

/// Words accepted by a table, in lookup order.
pub fn words<T>(table: Table<T>) -> impl Iterator<Item = &'static str> {
    table.iter().map(|(word, _)| *word)
}

/// A token in the context of its category.
pub struct Directive<'a> {
    token: &'a Token,
    statement: String,
    converter: &'a dyn Convert,
}

impl<'a> Directive<'a> {
    /// Control-file directive, named `key:word` in diagnostics.
    pub fn new(token: &'a Token, converter: &'a dyn Convert) -> Self {
        Self {
            statement: token.statement(),
            token,
            converter,
        }
    }

    /// Material-file directive, named `key[super]:word`.
    pub fn material(token: &'a Token, converter: &'a dyn Convert) -> Self {
        Self {
            statement: format!("{}[{}]:{}", token.key, token.super_index, token.word),
            token,
            converter,
        }
    }

    pub fn token(&self) -> &Token {
        self.token
    }

    pub fn word(&self) -> &str {
        &self.token.word
    }

    pub fn value(&self) -> &str {
        &self.token.value
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn unknown(&self) -> Reason {
        Reason::UnknownStatement {
            statement: self.statement.clone(),
        }
    }

    /// Parse the value with `FromStr`.
    pub fn number<N: FromStr>(&self) -> Result<N, Reason> {
        self.token
            .value
            .parse()
            .map_err(|_| Reason::InvalidNumber {
                statement: self.statement.clone(),
                value: self.token.value.clone(),
            })
    }

    /// `"true"` or `"false"`, nothing else.
    pub fn boolean(&self) -> Result<bool, Reason> {
        match self.token.value.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(Reason::InvalidBoolean {
                statement: self.statement.clone(),
                value: other.to_string(),
            }),
        }
    }

    /// A bare word sets the flag; an explicit value must be a boolean.
    pub fn flag(&self) -> Result<bool, Reason> {
        if self.token.value.is_empty() {
            Ok(true)
        } else {
            self.boolean()
        }
    }

    /// Value matched against the literals of a coded enumeration.
    pub fn choice<E: Copy>(&self, literals: &'static [(&'static str, E)]) -> Result<E, Reason> {
        literals
            .iter()
            .find(|(literal, _)| *literal == self.token.value)
            .map(|(_, variant)| *variant)
            .ok_or_else(|| Reason::InvalidChoice {
                statement: self.statement.clone(),
                value: self.token.value.clone(),
                choices: literals.iter().map(|(literal, _)| *literal).collect(),
            })
    }

    /// Real number within `interval`.
    pub fn bounded(&self, interval: Interval, severity: Severity) -> Result<f64, Reason> {
        let value: f64 = self.number()?;
        self.check(value, interval, severity)?;
        Ok(value)
    }

    /// Integer within `interval`.
    pub fn integer(&self, interval: Interval, severity: Severity) -> Result<i64, Reason> {
        let value: i64 = self.number()?;
        self.check(value as f64, interval, severity)?;
        Ok(value)
    }

    /// Non-negative integer within `interval`.
    pub fn count(&self, interval: Interval, severity: Severity) -> Result<u64, Reason> {
        let value = self.integer(interval, severity)?;
        u64::try_from(value).map_err(|_| self.out_of_range(interval, severity))
    }

    /// Number converted with the directive's unit; the unit must resolve
    /// to `expected`.
    pub fn measured(&self, expected: Dimension) -> Result<f64, Reason> {
        let raw: f64 = self.number()?;
        let quantity = self
            .converter
            .convert(&self.token.unit, raw)
            .map_err(|err| match err {
                UnitError::Unknown(unit) => Reason::UnknownUnit {
                    statement: self.statement.clone(),
                    unit,
                },
            })?;
        if quantity.dimension != expected {
            return Err(Reason::UnitMismatch {
                statement: self.statement.clone(),
                found: quantity.dimension,
                expected,
            });
        }
        Ok(quantity.value)
    }

    /// Like [`measured`](Self::measured), but an empty unit means the
    /// value is already in internal units.
    pub fn measured_or_internal(&self, expected: Dimension) -> Result<f64, Reason> {
        if self.token.unit.is_empty() {
            self.number()
        } else {
            self.measured(expected)
        }
    }

    /// Value with quote characters removed.
    pub fn text(&self) -> String {
        self.token.value.replace('"', "")
    }

    /// Quote-stripped value that must not be empty.
    pub fn required_text(&self) -> Result<String, Reason> {
        let text = self.text();
        if text.is_empty() {
            return Err(Reason::EmptyValue {
                statement: self.statement.clone(),
            });
        }
        Ok(text)
    }

    /// Like [`required_text`](Self::required_text), for a file path.
    pub fn filename(&self) -> Result<String, Reason> {
        let text = self.text();
        if text.is_empty() {
            return Err(Reason::EmptyFilename {
                statement: self.statement.clone(),
            });
        }
        Ok(text)
    }

    fn check(&self, value: f64, interval: Interval, severity: Severity) -> Result<(), Reason> {
        if interval.contains(value) {
            Ok(())
        } else {
            Err(self.out_of_range(interval, severity))
        }
    }

    fn out_of_range(&self, interval: Interval, severity: Severity) -> Reason {
        Reason::OutOfRange {
            statement: self.statement.clone(),
            value: self.token.value.clone(),
            range: interval.to_string(),
            severity,
        }
    }
}

/// Accepted range of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
    lo_open: bool,
    hi_open: bool,
}

impl Interval {
    /// `[lo, hi]`
    pub const fn closed(lo: f64, hi: f64) -> Self {
        Self {
            lo,
            hi,
            lo_open: false,
            hi_open: false,
        }
    }

    /// `[lo, hi)`
    pub const fn half_open(lo: f64, hi: f64) -> Self {
        Self {
            lo,
            hi,
            lo_open: false,
            hi_open: true,
        }
    }

    /// `[lo, inf)`
    pub const fn at_least(lo: f64) -> Self {
        Self::half_open(lo, f64::INFINITY)
    }

    /// `(lo, inf)`
    pub const fn above(lo: f64) -> Self {
        Self {
            lo,
            hi: f64::INFINITY,
            lo_open: true,
            hi_open: true,
        }
    }

    /// Any finite value.
    pub const fn any() -> Self {
        Self {
            lo: f64::NEG_INFINITY,
            hi: f64::INFINITY,
            lo_open: true,
            hi_open: true,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_lo = if self.lo_open { value > self.lo } else { value >= self.lo };
        let below_hi = if self.hi_open { value < self.hi } else { value <= self.hi };
        above_lo && below_hi
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}",
            if self.lo_open { '(' } else { '[' },
            Bound(self.lo),
            Bound(self.hi),
            if self.hi_open { ')' } else { ']' },
        )
    }
}

/// Interval endpoint, in exponent notation when very small or large.
struct Bound(f64);

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        if self.0.is_infinite() || magnitude == 0.0 || (1e-3..1e6).contains(&magnitude) {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{:e}", self.0)
        }
    }
}
