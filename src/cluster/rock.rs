//! ROCK driver: rank, merge, repeat.
//!
//! ```text
//! Initialized ──(live > k)──▶ Merging ──(live == k)──▶ Done
//!      │                                                 ▲
//!      └──────────────(k ≥ n: no merges)─────────────────┘
//! ```
//!
//! Each merge changes memberships and degrees, so every pass re-scores all
//! live pairs from scratch and exactly one merge is applied per pass. The run
//! therefore takes `n − k` passes.

use ndarray::{Array2, ArrayView2};
use petgraph::algo::connected_components;
use tracing::{debug, enabled, info, Level};

use super::goodness::{best, theta};
use super::links::{ClusterId, LinkTable};
use super::traits::Clustering;
use crate::config::RockConfig;
use crate::error::{Error, Result};
use crate::hierarchy::Dendrogram;
use crate::neighbors::{check_threshold, link_matrix, neighbor_graph, neighbor_matrix};
use crate::profile::AttributeProfile;
use crate::similarity::{similarity_matrix, Metric};

/// ROCK (RObust Clustering using linKs).
#[derive(Debug, Clone)]
pub struct Rock {
    /// Number of clusters to stop at.
    n_clusters: usize,
    /// Neighbor threshold τ.
    threshold: f64,
    /// Similarity metric.
    metric: Metric,
}

impl Rock {
    /// Create a new ROCK clusterer with τ = 0.5 and Jaccard similarity.
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            threshold: 0.5,
            metric: Metric::Jaccard,
        }
    }

    /// Clusterer matching a run configuration.
    pub fn from_config(config: &RockConfig) -> Self {
        Self::new(config.kclusters)
            .with_threshold(config.threshold)
            .with_metric(config.metric)
    }

    /// Set the neighbor threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the similarity metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Neighbor threshold τ.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Similarity metric.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    fn validate(&self, n_items: usize) -> Result<()> {
        if n_items == 0 {
            return Err(Error::EmptyInput);
        }
        if self.n_clusters == 0 {
            return Err(Error::InvalidClusterCount {
                requested: 0,
                n_items,
            });
        }
        check_threshold(self.threshold)
    }

    /// Cluster the rows of a 0/1 matrix.
    pub fn fit(&self, data: ArrayView2<'_, u8>) -> Result<RockFit> {
        self.validate(data.nrows())?;
        let sim = similarity_matrix(data, self.metric)?;
        let neighbors = neighbor_matrix(sim.view(), self.threshold)?;
        if enabled!(Level::DEBUG) {
            let graph = neighbor_graph(sim.view(), self.threshold)?;
            debug!(
                edges = graph.edge_count(),
                components = connected_components(&graph),
                "neighbor graph"
            );
        }
        self.fit_links(link_matrix(neighbors.view()))
    }

    /// Cluster the records of a loaded profile.
    pub fn fit_profile(&self, profile: &AttributeProfile) -> Result<RockFit> {
        self.fit(profile.binary_matrix()?.view())
    }

    /// Run the merge loop from a precomputed link matrix.
    pub fn fit_links(&self, links: Array2<u64>) -> Result<RockFit> {
        self.validate(links.nrows())?;
        let mut table = LinkTable::new(links)?;
        let mut dendrogram = Dendrogram::new(table.n_items());
        let theta = theta(self.threshold);

        info!(
            records = table.n_items(),
            target = self.n_clusters,
            theta,
            "starting merge loop"
        );

        while table.n_live() > self.n_clusters {
            let Some(top) = best(&table, theta) else {
                break;
            };
            let merged = table.merge(top.a, top.b)?;
            let size = table.members(merged).len();
            dendrogram.add_merge(top.a, top.b, top.score, size);
            debug!(
                a = top.a,
                b = top.b,
                goodness = top.score,
                size,
                live = table.n_live(),
                "merged clusters"
            );
        }

        info!(
            clusters = table.n_live(),
            merges = dendrogram.n_merges(),
            "clustering done"
        );

        Ok(RockFit {
            table,
            dendrogram,
            threshold: self.threshold,
            metric: self.metric,
        })
    }
}

impl Clustering for Rock {
    fn fit_predict(&self, data: &[Vec<u8>]) -> Result<Vec<usize>> {
        let first = data.first().ok_or(Error::EmptyInput)?;
        let d = first.len();
        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != d) {
            return Err(Error::DimensionMismatch {
                row,
                expected: d,
                found: r.len(),
            });
        }
        let arr = Array2::from_shape_fn((data.len(), d), |(i, j)| data[i][j]);
        Ok(self.fit(arr.view())?.labels())
    }

    fn n_clusters(&self) -> usize {
        self.n_clusters
    }
}

/// Final partition of a ROCK run.
#[derive(Debug, Clone)]
pub struct RockFit {
    table: LinkTable,
    dendrogram: Dendrogram,
    threshold: f64,
    metric: Metric,
}

impl RockFit {
    /// Number of final clusters.
    pub fn n_clusters(&self) -> usize {
        self.table.n_live()
    }

    /// Number of clustered records.
    pub fn n_items(&self) -> usize {
        self.table.n_items()
    }

    /// Final cluster ids in matrix order.
    pub fn cluster_ids(&self) -> Vec<ClusterId> {
        self.table.live_ids().collect()
    }

    /// Member record ids of each final cluster, in merge order.
    pub fn clusters(&self) -> Vec<&[usize]> {
        self.table
            .live_ids()
            .map(|id| self.table.members(id))
            .collect()
    }

    /// One dense label per record; cluster `i` is the i-th in [`Self::clusters`].
    pub fn labels(&self) -> Vec<usize> {
        let mut labels = vec![0; self.n_items()];
        for (label, members) in self.clusters().into_iter().enumerate() {
            for &m in members {
                labels[m] = label;
            }
        }
        labels
    }

    /// Comma-joined member names of each final cluster.
    pub fn composite_labels<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        self.table
            .live_ids()
            .map(|id| self.table.composite_label(id, names))
            .collect()
    }

    /// Final link-count state.
    pub fn link_table(&self) -> &LinkTable {
        &self.table
    }

    /// Merge history.
    pub fn dendrogram(&self) -> &Dendrogram {
        &self.dendrogram
    }

    /// Threshold the run used.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Metric the run used.
    pub fn metric(&self) -> Metric {
        self.metric
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn separates_disjoint_groups() {
        let data = array![[1u8, 1, 0], [1, 1, 0], [0, 0, 1], [0, 0, 1]];
        let fit = Rock::new(2).fit(data.view()).unwrap();
        assert_eq!(fit.clusters(), vec![&[0usize, 1][..], &[2, 3][..]]);
        assert_eq!(fit.labels(), vec![0, 0, 1, 1]);
        assert_eq!(fit.dendrogram().n_merges(), 2);
    }

    #[test]
    fn k_at_least_n_means_no_merges() {
        let data = array![[1u8, 0], [0, 1], [1, 1]];
        let fit = Rock::new(5).fit(data.view()).unwrap();
        assert_eq!(fit.n_clusters(), 3);
        assert_eq!(fit.dendrogram().n_merges(), 0);
    }

    #[test]
    fn zero_clusters_is_rejected() {
        let data = array![[1u8, 0], [0, 1]];
        assert!(matches!(
            Rock::new(0).fit(data.view()),
            Err(Error::InvalidClusterCount { requested: 0, .. })
        ));
    }

    #[test]
    fn bad_threshold_is_rejected_before_work() {
        let data = array![[1u8, 0], [0, 1]];
        assert!(matches!(
            Rock::new(1).with_threshold(2.0).fit(data.view()),
            Err(Error::InvalidParameter {
                name: "threshold",
                ..
            })
        ));
    }

    #[test]
    fn threshold_one_still_terminates() {
        // θ = 0 makes every denominator vanish; ties fall to enumeration order.
        let data = array![[1u8, 0], [0, 1], [1, 1]];
        let fit = Rock::new(1).with_threshold(1.0).fit(data.view()).unwrap();
        assert_eq!(fit.n_clusters(), 1);
        assert_eq!(fit.clusters()[0], &[0, 1, 2]);
    }

    #[test]
    fn dendrogram_replay_agrees_with_labels() {
        let data = array![
            [1u8, 1, 0, 0],
            [1, 1, 1, 0],
            [0, 0, 1, 1],
            [0, 1, 1, 1],
            [1, 0, 0, 0]
        ];
        let fit = Rock::new(2).with_threshold(0.3).fit(data.view()).unwrap();
        assert_eq!(fit.dendrogram().labels_at(2).unwrap(), fit.labels());
    }

    #[test]
    fn asymmetric_links_are_rejected() {
        assert!(matches!(
            Rock::new(1).fit_links(array![[1u64, 5], [0, 1]]),
            Err(Error::InvalidParameter { name: "links", .. })
        ));
    }

    #[test]
    fn fit_predict_checks_dimensions() {
        let rows = vec![vec![1u8, 0], vec![1]];
        assert!(matches!(
            Rock::new(1).fit_predict(&rows),
            Err(Error::DimensionMismatch { row: 1, .. })
        ));
    }

    #[test]
    fn composite_labels_follow_merge_order() {
        let data = array![[0u8, 0, 1], [1, 1, 0], [0, 0, 1], [1, 1, 0]];
        let fit = Rock::new(2).fit(data.view()).unwrap();
        let names = ["p0", "p1", "p2", "p3"];
        assert_eq!(fit.composite_labels(&names), vec!["p0,p2", "p1,p3"]);
    }
}
