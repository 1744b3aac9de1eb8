//! Merge history of a ROCK run.
//!
//! Each merge folds one cluster into another, recording:
//! - Which clusters were merged (by stable slot id)
//! - The goodness at which they merged
//! - The size of the resulting cluster
//!
//! Goodness is not monotone across merges, so the history is replayed by merge
//! count rather than cut at a height.

use crate::error::{Error, Result};

/// A single merge operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Surviving cluster.
    pub cluster_a: usize,
    /// Cluster folded into `cluster_a`.
    pub cluster_b: usize,
    /// Goodness of the merge.
    pub goodness: f64,
    /// Size of the resulting cluster.
    pub size: usize,
}

/// Ordered merge history over `n_items` records.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    merges: Vec<Merge>,
    n_items: usize,
}

impl Dendrogram {
    /// Empty history for n items.
    pub fn new(n_items: usize) -> Self {
        Self {
            merges: Vec::with_capacity(n_items.saturating_sub(1)),
            n_items,
        }
    }

    /// Record a merge operation.
    pub fn add_merge(&mut self, cluster_a: usize, cluster_b: usize, goodness: f64, size: usize) {
        self.merges.push(Merge {
            cluster_a,
            cluster_b,
            goodness,
            size,
        });
    }

    /// Flat labels after replaying merges until `k` clusters remain.
    ///
    /// Labels are dense and numbered by each cluster's surviving slot, so they
    /// agree with the live order of the clustering state. `k` must lie between
    /// the number of clusters left after the full history and `n_items`.
    pub fn labels_at(&self, k: usize) -> Result<Vec<usize>> {
        let floor = self.n_items.saturating_sub(self.merges.len());
        if k < floor.max(1) || k > self.n_items {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: self.n_items,
            });
        }

        // parent[i] = slot that absorbed i, or i itself while it is a root.
        let mut parent: Vec<usize> = (0..self.n_items).collect();
        for m in self.merges.iter().take(self.n_items - k) {
            parent[m.cluster_b] = m.cluster_a;
        }

        let root = |mut i: usize| {
            while parent[i] != i {
                i = parent[i];
            }
            i
        };
        let roots: Vec<usize> = (0..self.n_items).map(root).collect();

        let mut dense = vec![usize::MAX; self.n_items];
        let mut next = 0;
        for slot in 0..self.n_items {
            if parent[slot] == slot {
                dense[slot] = next;
                next += 1;
            }
        }

        Ok(roots.into_iter().map(|r| dense[r]).collect())
    }

    /// Number of original items.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// Iterate over merges.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> {
        self.merges.iter()
    }

    /// Goodness of every merge, in order.
    pub fn goodness(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.goodness).collect()
    }
}
