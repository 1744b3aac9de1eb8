//! Run configuration.

use crate::error::{Error, Result};
use crate::neighbors::check_threshold;
use crate::similarity::Metric;

/// Parameters of one ROCK run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RockConfig {
    /// Number of clusters to stop at.
    pub kclusters: usize,
    /// Similarity metric.
    pub metric: Metric,
    /// Minimum similarity for two records to be neighbors.
    pub threshold: f64,
    /// Dataset name, used only to name outputs.
    pub data_name: String,
}

impl Default for RockConfig {
    fn default() -> Self {
        Self {
            kclusters: 2,
            metric: Metric::Jaccard,
            threshold: 0.5,
            data_name: default_data_name(),
        }
    }
}

/// Current UTC time as `YYYY-MM-DD_HH:MM:SS`.
pub fn default_data_name() -> String {
    chrono::Utc::now().format("%Y-%m-%d_%H:%M:%S").to_string()
}

impl RockConfig {
    /// Set the target cluster count.
    pub fn with_kclusters(mut self, kclusters: usize) -> Self {
        self.kclusters = kclusters;
        self
    }

    /// Set the similarity metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the neighbor threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the dataset name.
    pub fn with_data_name(mut self, data_name: impl Into<String>) -> Self {
        self.data_name = data_name.into();
        self
    }

    /// Reject parameters the merge loop cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.kclusters == 0 {
            return Err(Error::InvalidParameter {
                name: "kclusters",
                message: "must be at least 1".to_string(),
            });
        }
        check_threshold(self.threshold)?;
        if self.data_name.is_empty() || self.data_name.contains(['/', '\\']) {
            return Err(Error::InvalidParameter {
                name: "data_name",
                message: format!("'{}' is not a valid output name", self.data_name),
            });
        }
        Ok(())
    }
}
