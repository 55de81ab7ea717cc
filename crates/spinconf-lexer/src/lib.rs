// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Line tokenizer for spinconf input files.
//!
//! Every directive occupies a single line:
//!
//! ```text
//! control file:   key[:word][=value][!unit][#comment]
//! material file:  key[super][:word[sub]][=value][!unit][#comment]
//! ```
//!
//! Whitespace is insignificant and stripped before scanning. Segments may
//! appear in any order after the key, and a repeated delimiter restarts its
//! segment, so the last occurrence wins. A line whose key is empty (blank
//! lines, pure comments) yields an empty [`Token`].
//!
//! # Design
//!
//! - `Mark`: logos lexer splitting a stripped line into delimiters and text runs
//! - [`tokenize`]: state machine assembling a [`Token`] from the marks
//! - [`Variant`]: control files treat `[`/`]` as text, material files parse indices
//!
//! # Examples
//!
//! ```
//! # use spinconf_lexer::*;
//! let token = tokenize("dimensions:a = 0.354 !nm  # fcc Co", Variant::Control).unwrap();
//! assert_eq!(token.key, "dimensions");
//! assert_eq!(token.word, "a");
//! assert_eq!(token.value, "0.354");
//! assert_eq!(token.unit, "nm");
//! ```

use logos::{Lexer, Logos};
use thiserror::Error;

/// Tokenizer errors. Only the material variant can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid index number '[{index}]'")]
    InvalidIndex { index: String },

    #[error("index [{index}] is outside the valid range 0-{}", .max.saturating_sub(1))]
    IndexOutOfRange { index: i64, max: usize },

    #[error("missing ']' after index '[{index}'")]
    UnterminatedIndex { index: String },
}

/// Which grammar a line follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Main control file: no indices, quotes kept.
    Control,
    /// Material file: quotes stripped, `[super]` and `[sub]` indices
    /// checked against `max_index` (exclusive).
    Material { max_index: usize },
}

/// One tokenized directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    pub key: String,
    pub word: String,
    pub value: String,
    pub unit: String,
    pub super_index: usize,
    pub sub_index: usize,
}

impl Token {
    /// A token without a key is skipped by callers.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// `key:word`, used to name the directive in diagnostics.
    pub fn statement(&self) -> String {
        format!("{}:{}", self.key, self.word)
    }

    /// Format the token back into a line of the given variant.
    ///
    /// Tokenizing the result reproduces the token, provided no field
    /// contains a delimiter, whitespace, or (material variant) a quote or
    /// bracket.
    pub fn render(&self, variant: Variant) -> String {
        let mut line = self.key.clone();
        let material = matches!(variant, Variant::Material { .. });

        if material {
            line.push_str(&format!("[{}]", self.super_index));
        }
        if !self.word.is_empty() || (material && self.sub_index != 0) {
            line.push(':');
            line.push_str(&self.word);
            if material && self.sub_index != 0 {
                line.push_str(&format!("[{}]", self.sub_index));
            }
        }
        if !self.value.is_empty() {
            line.push('=');
            line.push_str(&self.value);
        }
        if !self.unit.is_empty() {
            line.push('!');
            line.push_str(&self.unit);
        }
        line
    }

    fn push(&mut self, segment: Segment, text: &str) {
        match segment {
            Segment::Key => self.key.push_str(text),
            Segment::Word => self.word.push_str(text),
            Segment::Value => self.value.push_str(text),
            Segment::Unit => self.unit.push_str(text),
            Segment::Ignore => {}
        }
    }

    fn restart(&mut self, segment: Segment) -> Segment {
        match segment {
            Segment::Word => self.word.clear(),
            Segment::Value => self.value.clear(),
            Segment::Unit => self.unit.clear(),
            Segment::Key | Segment::Ignore => {}
        }
        segment
    }
}

/// Delimiters and text runs of a stripped line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,
    #[token("!")]
    Bang,
    #[token("#")]
    Hash,
    #[token("[")]
    Open,
    #[token("]")]
    Close,
    #[regex(r"[^:=!#\[\]]+")]
    Text,
}

/// Segment currently receiving characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Key,
    Word,
    Value,
    Unit,
    /// After an index: text up to the next delimiter is dropped.
    Ignore,
}

/// Tokenize one raw line.
pub fn tokenize(line: &str, variant: Variant) -> Result<Token, LexError> {
    let stripped = strip(line, variant);
    let mut token = Token::default();
    let mut segment = Segment::Key;
    let mut lexer = Mark::lexer(&stripped);

    while let Some(mark) = lexer.next() {
        match mark.unwrap_or(Mark::Text) {
            Mark::Hash => break,
            Mark::Colon => segment = token.restart(Segment::Word),
            Mark::Equals => segment = token.restart(Segment::Value),
            Mark::Bang => segment = token.restart(Segment::Unit),
            Mark::Open => match (variant, segment) {
                (Variant::Material { max_index }, Segment::Key) => {
                    token.super_index = read_index(&mut lexer, max_index)?;
                    segment = Segment::Ignore;
                }
                (Variant::Material { max_index }, Segment::Word) => {
                    token.sub_index = read_index(&mut lexer, max_index)?;
                    segment = Segment::Ignore;
                }
                _ => token.push(segment, lexer.slice()),
            },
            Mark::Close => match (variant, segment) {
                (Variant::Material { .. }, Segment::Key) => segment = Segment::Ignore,
                _ => token.push(segment, lexer.slice()),
            },
            Mark::Text => token.push(segment, lexer.slice()),
        }
    }

    if token.key.is_empty() {
        return Ok(Token::default());
    }
    Ok(token)
}

fn strip(line: &str, variant: Variant) -> String {
    let material = matches!(variant, Variant::Material { .. });
    line.chars()
        .filter(|&c| c != ' ' && c != '\t' && !(material && c == '"'))
        .collect()
}

/// Consume marks up to the closing `]` and validate the enclosed index.
fn read_index(lexer: &mut Lexer<'_, Mark>, max_index: usize) -> Result<usize, LexError> {
    let mut digits = String::new();
    loop {
        match lexer.next() {
            Some(Ok(Mark::Close)) => break,
            Some(_) => digits.push_str(lexer.slice()),
            None => return Err(LexError::UnterminatedIndex { index: digits }),
        }
    }

    let index: i64 = digits
        .parse()
        .map_err(|_| LexError::InvalidIndex { index: digits.clone() })?;

    usize::try_from(index)
        .ok()
        .filter(|&i| i < max_index)
        .ok_or(LexError::IndexOutOfRange {
            index,
            max: max_index,
        })
}
