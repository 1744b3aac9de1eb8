//! The record × attribute table clustered by ROCK.
//!
//! An [`AttributeProfile`] keeps the raw tokens exactly as loaded so reports can
//! reproduce them verbatim. Binary decoding happens on demand through
//! [`AttributeProfile::binary_matrix`], which is where malformed values surface.

use std::collections::HashSet;

use ndarray::Array2;

use crate::error::{Error, Result};

/// One input row.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Position in the input (0-based).
    pub index: usize,
    /// Display name: the row label, or the position when none was given.
    pub label: &'a str,
    /// Raw attribute tokens.
    pub values: &'a [String],
}

/// Immutable record × attribute table with row and column labels.
#[derive(Debug, Clone)]
pub struct AttributeProfile {
    rows: Vec<Vec<String>>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
}

impl AttributeProfile {
    /// Build a profile from raw tokens, labelling rows and columns by position.
    ///
    /// Fails with [`Error::EmptyInput`] when there are no rows and with
    /// [`Error::DimensionMismatch`] when rows differ in length.
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyInput)?;
        let d = first.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != d) {
            return Err(Error::DimensionMismatch {
                row,
                expected: d,
                found: r.len(),
            });
        }

        Ok(Self {
            row_labels: (0..rows.len()).map(|i| i.to_string()).collect(),
            col_labels: (0..d).map(|i| i.to_string()).collect(),
            rows,
        })
    }

    /// Build a profile from already-decoded binary rows.
    pub fn from_binary(rows: &[Vec<u8>]) -> Result<Self> {
        Self::new(
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    /// Replace the record labels.
    pub fn with_row_labels(mut self, labels: Vec<String>) -> Result<Self> {
        check_labels("row", &labels, self.rows.len())?;
        self.row_labels = labels;
        Ok(self)
    }

    /// Replace the attribute labels.
    pub fn with_col_labels(mut self, labels: Vec<String>) -> Result<Self> {
        check_labels("column", &labels, self.n_attributes())?;
        self.col_labels = labels;
        Ok(self)
    }

    /// Number of records.
    pub fn n_records(&self) -> usize {
        self.rows.len()
    }

    /// Number of attributes per record.
    pub fn n_attributes(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Record labels in input order.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Attribute labels in input order.
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Record at `index`, if any.
    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|values| Record {
            index,
            label: &self.row_labels[index],
            values,
        })
    }

    /// Iterate over records in input order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        (0..self.rows.len()).filter_map(move |i| self.record(i))
    }

    /// Position of the record carrying `label`.
    pub fn index_of(&self, label: &str) -> Result<usize> {
        self.row_labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))
    }

    /// Decode every token as a binary attribute.
    ///
    /// Surrounding whitespace is ignored; anything other than `0` or `1` is a
    /// [`Error::NonBinaryValue`].
    pub fn binary_matrix(&self) -> Result<Array2<u8>> {
        let (n, d) = (self.n_records(), self.n_attributes());
        let mut out = Array2::zeros((n, d));
        for (i, row) in self.rows.iter().enumerate() {
            for (j, token) in row.iter().enumerate() {
                out[[i, j]] = parse_binary(token).ok_or_else(|| Error::NonBinaryValue {
                    row: i,
                    col: j,
                    value: token.clone(),
                })?;
            }
        }
        Ok(out)
    }
}

fn parse_binary(token: &str) -> Option<u8> {
    match token.trim() {
        "0" => Some(0),
        "1" => Some(1),
        _ => None,
    }
}

fn check_labels(axis: &'static str, labels: &[String], expected: usize) -> Result<()> {
    if labels.len() != expected {
        return Err(Error::LabelCountMismatch {
            axis,
            expected,
            found: labels.len(),
        });
    }
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(Error::DuplicateLabel {
                axis,
                label: label.clone(),
            });
        }
    }
    Ok(())
}
