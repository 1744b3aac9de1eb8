//! # rock
//!
//! ROCK (RObust Clustering using linKs) for categorical and binary attribute
//! data: records are grouped by how many neighbors they share rather than by
//! raw distance.
//!
//! ```rust
//! use rock::{AttributeProfile, ClusterReport, Rock};
//!
//! let profile = AttributeProfile::from_binary(&[
//!     vec![1, 1, 0],
//!     vec![1, 1, 0],
//!     vec![0, 0, 1],
//!     vec![0, 0, 1],
//! ])
//! .unwrap();
//!
//! let fit = Rock::new(2).fit_profile(&profile).unwrap();
//! let report = ClusterReport::build(&fit, &profile).unwrap();
//! assert_eq!(report.clusters[0].frequencies, vec![2, 2, 0]);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;
/// Error types used across `rock`.
pub mod error;
pub mod hierarchy;
pub mod io;
pub mod neighbors;
pub mod profile;
pub mod report;
pub mod similarity;

pub use cluster::{Clustering, FitnessEntry, LinkTable, Rock, RockFit};
pub use config::RockConfig;
pub use error::{Error, ErrorKind, Result};
pub use hierarchy::Dendrogram;
pub use neighbors::{link_matrix, neighbor_graph, neighbor_matrix};
pub use profile::{AttributeProfile, Record};
pub use report::{ClusterReport, ClusterSummary};
pub use similarity::{similarity, similarity_matrix, Metric};
