//! Raw CSV rows and the field-extraction machinery that turns them into
//! typed transaction attributes.
//!
//! Each transaction variant declares an ordered sequence of extractions
//! (attribute name, source column, coercion). Extraction short-circuits on
//! the first failure: the failure is recorded under the attribute's name and
//! the remaining fields are skipped. Callers check the failure set, not
//! individual attributes, so partial attribute state is acceptable.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// One CSV record, keyed by column name. Immutable once read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Row(HashMap<String, String>);

impl Row {
    /// Returns the raw value of a column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Row {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Row(pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}

/// Why a single field extraction failed.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The row has no value for the source column.
    #[error("missing column {0:?}")]
    MissingColumn(String),

    /// The date cell did not parse as `YYYY-MM-DD`.
    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),

    /// The amount cell did not parse as a currency decimal.
    #[error("invalid amount: {0}")]
    Amount(#[from] rust_decimal::Error),

    /// The category cell is not one of the known codes.
    #[error("unknown category code {0:?}")]
    UnknownCategory(String),
}

/// A field failure recorded under the attribute it was extracting.
#[derive(Debug)]
pub struct Failure {
    /// The attribute being filled when the failure occurred.
    pub attribute: &'static str,

    /// What went wrong.
    pub reason: FieldError,
}

/// The named failure set for one row.
///
/// Extraction short-circuits, so in practice this holds at most one entry.
#[derive(Debug, Default)]
pub struct Failures(Vec<Failure>);

impl Failures {
    /// Returns `true` if no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if a failure was recorded under the given attribute.
    pub fn contains(&self, attribute: &str) -> bool {
        self.0.iter().any(|f| f.attribute == attribute)
    }

    /// Iterates over the recorded failures.
    pub fn iter(&self) -> impl Iterator<Item = &Failure> {
        self.0.iter()
    }
}

/// Evaluates an ordered sequence of field extractions against a row.
///
/// Fields are extracted with [`RowReader::field`] (or the [`RowReader::text`]
/// shorthand for identity coercions) in declaration order. After the first
/// failure every later call returns `None` without touching the row.
pub struct RowReader<'a> {
    row: &'a Row,
    failures: Failures,
}

impl<'a> RowReader<'a> {
    /// Starts reading the given row.
    pub fn new(row: &'a Row) -> Self {
        RowReader {
            row,
            failures: Failures::default(),
        }
    }

    /// Extracts one attribute from a column via a fallible coercion.
    ///
    /// Returns `None` and records a failure under `attribute` if the column
    /// is missing or the coercion fails, or if an earlier field already
    /// failed (short-circuit).
    pub fn field<T>(
        &mut self,
        attribute: &'static str,
        column: &str,
        coerce: impl FnOnce(&str) -> Result<T, FieldError>,
    ) -> Option<T> {
        if !self.failures.is_empty() {
            return None;
        }

        let raw = match self.row.get(column) {
            Some(value) => value,
            None => {
                self.fail(attribute, FieldError::MissingColumn(column.to_string()));
                return None;
            }
        };

        match coerce(raw) {
            Ok(value) => Some(value),
            Err(reason) => {
                self.fail(attribute, reason);
                None
            }
        }
    }

    /// Extracts a column verbatim (identity coercion).
    pub fn text(&mut self, attribute: &'static str, column: &str) -> Option<String> {
        self.field(attribute, column, |s| Ok(s.to_string()))
    }

    /// Finishes reading and yields the failure set.
    pub fn into_failures(self) -> Failures {
        self.failures
    }

    fn fail(&mut self, attribute: &'static str, reason: FieldError) {
        self.failures.0.push(Failure { attribute, reason });
    }
}
