//! Pairwise similarity between binary attribute vectors.
//!
//! | Metric | Formula | Absent/absent positions |
//! |--------|---------|-------------------------|
//! | Jaccard (`JC`) | \|a ∧ b\| / \|a ∨ b\| | ignored |
//! | Simple matching (`SMC`) | matches / d | count as matches |
//!
//! Both return values in `[0, 1]`. Two vectors with no present attributes are
//! treated as identical under Jaccard (`1.0`), so the self-similarity of every
//! record is exactly `1.0` regardless of content.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use tracing::info;

#[cfg(feature = "parallel")]
use ndarray::parallel::prelude::*;

use crate::error::{Error, Result};

/// Similarity metric identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// Jaccard coefficient over present attributes.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "JC"))]
    Jaccard,
    /// Fraction of positions where both vectors agree.
    #[cfg_attr(feature = "serde", serde(rename = "SMC"))]
    SimpleMatching,
}

impl Metric {
    /// Short identifier used on the command line and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Jaccard => "JC",
            Metric::SimpleMatching => "SMC",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "JC" => Ok(Metric::Jaccard),
            "SMC" => Ok(Metric::SimpleMatching),
            other => Err(Error::UnsupportedMetric(other.to_string())),
        }
    }
}

/// Similarity between two binary vectors.
///
/// Fails with [`Error::LengthMismatch`] when the lengths differ and with
/// [`Error::NonBinaryValue`] when a value is not `0` or `1`; there `row` is
/// the argument position (`0` for `a`, `1` for `b`).
pub fn similarity(a: &[u8], b: &[u8], metric: Metric) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    for (row, v) in [a, b].into_iter().enumerate() {
        if let Some((col, &x)) = v.iter().enumerate().find(|&(_, &x)| x > 1) {
            return Err(Error::NonBinaryValue {
                row,
                col,
                value: x.to_string(),
            });
        }
    }
    Ok(score(ArrayView1::from(a), ArrayView1::from(b), metric))
}

#[inline]
fn score(a: ArrayView1<'_, u8>, b: ArrayView1<'_, u8>, metric: Metric) -> f64 {
    let (mut both, mut either, mut matches) = (0usize, 0usize, 0usize);
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x != 0, y != 0);
        both += usize::from(x && y);
        either += usize::from(x || y);
        matches += usize::from(x == y);
    }
    match metric {
        Metric::Jaccard if either == 0 => 1.0,
        Metric::Jaccard => both as f64 / either as f64,
        Metric::SimpleMatching if a.is_empty() => 1.0,
        Metric::SimpleMatching => matches as f64 / a.len() as f64,
    }
}

/// Full n×n similarity matrix over the rows of `data`.
///
/// Every value must be `0` or `1`; the first offender is reported as
/// [`Error::NonBinaryValue`]. The result is symmetric with a unit diagonal.
pub fn similarity_matrix(data: ArrayView2<'_, u8>, metric: Metric) -> Result<Array2<f64>> {
    if let Some(((row, col), v)) = data.indexed_iter().find(|&(_, &v)| v > 1) {
        return Err(Error::NonBinaryValue {
            row,
            col,
            value: v.to_string(),
        });
    }

    let n = data.nrows();
    let mut out = Array2::<f64>::zeros((n, n));

    #[cfg(feature = "parallel")]
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            for j in 0..n {
                row[j] = score(data.row(i), data.row(j), metric);
            }
        });

    #[cfg(not(feature = "parallel"))]
    for (i, mut row) in out.axis_iter_mut(Axis(0)).enumerate() {
        for j in 0..n {
            row[j] = score(data.row(i), data.row(j), metric);
        }
    }

    info!(records = n, metric = %metric, "computed similarity matrix");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn jaccard_ignores_shared_absence() {
        let s = similarity(&[1, 1, 0, 0], &[1, 0, 1, 0], Metric::Jaccard).unwrap();
        assert!((s - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn smc_counts_shared_absence() {
        let s = similarity(&[1, 1, 0, 0], &[1, 0, 1, 0], Metric::SimpleMatching).unwrap();
        assert!((s - 0.5).abs() < 1e-12);
    }

    #[test]
    fn all_zero_vectors_are_identical() {
        assert_eq!(similarity(&[0, 0], &[0, 0], Metric::Jaccard).unwrap(), 1.0);
        assert_eq!(similarity(&[], &[], Metric::SimpleMatching).unwrap(), 1.0);
    }

    #[test]
    fn unequal_lengths_fail() {
        assert!(matches!(
            similarity(&[1, 0], &[1], Metric::Jaccard),
            Err(Error::LengthMismatch { left: 2, right: 1 })
        ));
    }

    #[test]
    fn pairwise_rejects_non_binary() {
        assert!(matches!(
            similarity(&[2, 0, 7], &[1, 0, 1], Metric::Jaccard),
            Err(Error::NonBinaryValue { row: 0, col: 0, .. })
        ));
        match similarity(&[1, 0, 1], &[1, 0, 9], Metric::SimpleMatching) {
            Err(Error::NonBinaryValue { row, col, value }) => {
                assert_eq!((row, col), (1, 2));
                assert_eq!(value, "9");
            }
            other => panic!("expected NonBinaryValue, got {other:?}"),
        }
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let data = array![[1u8, 1, 0], [1, 0, 0], [0, 0, 1], [0, 0, 0]];
        for metric in [Metric::Jaccard, Metric::SimpleMatching] {
            let m = similarity_matrix(data.view(), metric).unwrap();
            for i in 0..4 {
                assert_eq!(m[[i, i]], 1.0);
                for j in 0..4 {
                    assert_eq!(m[[i, j]], m[[j, i]]);
                    assert!((0.0..=1.0).contains(&m[[i, j]]));
                }
            }
        }
    }

    #[test]
    fn matrix_rejects_non_binary() {
        let data = array![[1u8, 0], [0, 3]];
        assert!(matches!(
            similarity_matrix(data.view(), Metric::Jaccard),
            Err(Error::NonBinaryValue { row: 1, col: 1, .. })
        ));
    }

    #[test]
    fn metric_parses_identifiers() {
        assert_eq!("JC".parse::<Metric>().unwrap(), Metric::Jaccard);
        assert_eq!("SMC".parse::<Metric>().unwrap(), Metric::SimpleMatching);
        assert!(matches!(
            "cosine".parse::<Metric>(),
            Err(Error::UnsupportedMetric(_))
        ));
        assert_eq!(Metric::default().to_string(), "JC");
    }
}
