//! Per-cluster membership listings and attribute-frequency summaries.
//!
//! The text form (`Display`) is tab-separated:
//!
//! ```text
//! clusterID_0
//! patID   a1   a2   a3
//! r0      1    1    0
//! r1      1    0    0
//! total_atts_in_cluster_0   2   1   0
//!
//! clusterID_1
//! ...
//! ```

use std::fmt;

use crate::cluster::RockFit;
use crate::config::RockConfig;
use crate::error::{Error, Result};
use crate::profile::AttributeProfile;

/// One member record as listed in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberRow {
    /// Record index in the profile.
    pub index: usize,
    /// Record label.
    pub label: String,
    /// Raw attribute tokens.
    pub values: Vec<String>,
}

/// A final cluster with its members and attribute counts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterSummary {
    /// Position of the cluster in the report.
    pub id: usize,
    /// Members in merge order.
    pub members: Vec<MemberRow>,
    /// Number of members with each attribute present.
    pub frequencies: Vec<u64>,
}

impl ClusterSummary {
    /// Comma-joined member labels, in merge order.
    pub fn composite_label(&self) -> String {
        self.members
            .iter()
            .map(|m| m.label.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Report over every final cluster of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterReport {
    /// Attribute labels, in column order.
    pub attribute_names: Vec<String>,
    /// Clusters in final matrix order.
    pub clusters: Vec<ClusterSummary>,
}

impl ClusterReport {
    /// Expand a fit back onto the profile it was computed from.
    ///
    /// Attribute values must be `0` or `1` to be counted; any other token is a
    /// [`Error::NonBinaryValue`].
    pub fn build(fit: &RockFit, profile: &AttributeProfile) -> Result<Self> {
        if fit.n_items() != profile.n_records() {
            return Err(Error::DimensionMismatch {
                row: 0,
                expected: profile.n_records(),
                found: fit.n_items(),
            });
        }

        let binary = profile.binary_matrix()?;
        let d = profile.n_attributes();

        let clusters = fit
            .clusters()
            .into_iter()
            .enumerate()
            .map(|(id, ids)| {
                let mut frequencies = vec![0u64; d];
                let mut members = Vec::with_capacity(ids.len());
                for &i in ids {
                    for (f, &v) in frequencies.iter_mut().zip(binary.row(i)) {
                        *f += u64::from(v);
                    }
                    if let Some(rec) = profile.record(i) {
                        members.push(MemberRow {
                            index: i,
                            label: rec.label.to_string(),
                            values: rec.values.to_vec(),
                        });
                    }
                }
                ClusterSummary {
                    id,
                    members,
                    frequencies,
                }
            })
            .collect();

        Ok(Self {
            attribute_names: profile.col_labels().to_vec(),
            clusters,
        })
    }

    /// Total number of listed records.
    pub fn n_records(&self) -> usize {
        self.clusters.iter().map(|c| c.members.len()).sum()
    }
}

impl fmt::Display for ClusterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cluster in &self.clusters {
            writeln!(f, "clusterID_{}", cluster.id)?;
            write!(f, "patID")?;
            for name in &self.attribute_names {
                write!(f, "\t{name}")?;
            }
            writeln!(f)?;
            for m in &cluster.members {
                writeln!(f, "{}\t{}", m.label, m.values.join("\t"))?;
            }
            write!(f, "total_atts_in_cluster_{}", cluster.id)?;
            for n in &cluster.frequencies {
                write!(f, "\t{n}")?;
            }
            writeln!(f)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parameters record written next to the report.
pub fn parameters_text(config: &RockConfig) -> String {
    format!(
        "clusters: {}\nsimilarity_Metric: {}\nmin_threshold_for_similarity:{:?}",
        config.kclusters, config.metric, config.threshold
    )
}
