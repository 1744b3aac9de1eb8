//! Goodness measure used to pick the next merge.
//!
//! Raw link counts favour large clusters, which accumulate links simply by
//! being large. ROCK divides by the number of cross links expected if the two
//! clusters were merged:
//!
//! ```text
//! θ = (1 − τ) / (1 + τ)
//! e = 1 + 2θ
//!
//!                        links(A, B)
//! g(A, B) = ─────────────────────────────────────────
//!           (d_A + d_B)^e − d_A^e − d_B^e
//! ```
//!
//! where `d_X` is the number of live clusters X shares at least one link with.
//! When the denominator is not a positive finite number (τ = 1 makes `e = 1`,
//! collapsing it to zero) the pair scores `0.0`.

use std::cmp::Ordering;

use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::links::{ClusterId, LinkTable};

/// Candidate merge with its goodness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessEntry {
    /// Cluster that survives the merge (earlier in matrix order).
    pub a: ClusterId,
    /// Cluster folded into `a`.
    pub b: ClusterId,
    /// Goodness of merging `a` and `b`.
    pub score: f64,
}

/// Exponent-shaping parameter derived from the neighbor threshold.
#[inline]
pub fn theta(threshold: f64) -> f64 {
    (1.0 - threshold) / (1.0 + threshold)
}

/// Goodness of merging two clusters with the given link count and degrees.
pub fn goodness(links: u64, deg_a: usize, deg_b: usize, theta: f64) -> f64 {
    let e = 1.0 + 2.0 * theta;
    let (da, db) = (deg_a as f64, deg_b as f64);
    let denom = (da + db).powf(e) - da.powf(e) - db.powf(e);
    if denom > 0.0 && denom.is_finite() {
        links as f64 / denom
    } else {
        trace!(links, deg_a, deg_b, denom, "degenerate goodness denominator");
        0.0
    }
}

/// Every unordered pair of live clusters, enumerated in matrix order.
fn pairs(table: &LinkTable) -> Vec<(ClusterId, ClusterId)> {
    let ids: Vec<_> = table.live_ids().collect();
    ids.iter()
        .enumerate()
        .flat_map(|(i, &a)| ids[i + 1..].iter().map(move |&b| (a, b)))
        .collect()
}

/// Degree of every slot; dead slots read as zero.
fn degrees(table: &LinkTable) -> Vec<usize> {
    let mut deg = vec![0; table.n_items()];
    for id in table.live_ids() {
        deg[id] = table.degree(id);
    }
    deg
}

fn score_pairs(table: &LinkTable, theta: f64) -> Vec<FitnessEntry> {
    let deg = degrees(table);
    let pairs = pairs(table);
    let entry = |&(a, b): &(ClusterId, ClusterId)| FitnessEntry {
        a,
        b,
        score: goodness(table.links(a, b), deg[a], deg[b], theta),
    };

    #[cfg(feature = "parallel")]
    let entries = pairs.par_iter().map(entry).collect();
    #[cfg(not(feature = "parallel"))]
    let entries = pairs.iter().map(entry).collect();

    entries
}

fn by_score_desc(x: &FitnessEntry, y: &FitnessEntry) -> Ordering {
    y.score.partial_cmp(&x.score).unwrap_or(Ordering::Equal)
}

/// All candidate merges, best first.
///
/// The sort is stable: pairs with equal goodness stay in enumeration order, so
/// the first-enumerated pair wins a tie.
pub fn rank(table: &LinkTable, theta: f64) -> Vec<FitnessEntry> {
    let mut entries = score_pairs(table, theta);
    entries.sort_by(by_score_desc);
    entries
}

/// The head of [`rank`] without sorting the whole list.
pub fn best(table: &LinkTable, theta: f64) -> Option<FitnessEntry> {
    score_pairs(table, theta)
        .into_iter()
        .fold(None, |acc: Option<FitnessEntry>, e| match acc {
            Some(top) if by_score_desc(&top, &e) != Ordering::Greater => Some(top),
            _ => Some(e),
        })
}
