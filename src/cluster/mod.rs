//! Link-based agglomerative clustering (ROCK).
//!
//! Distance-based methods struggle with categorical data: two records that
//! share a handful of rare attributes may be far apart in any vector sense,
//! while records with nothing in common can look close because they agree on
//! absences. ROCK (Guha, Rastogi & Shim, 1999) clusters on **links** instead:
//! the number of common neighbors two records have.
//!
//! ## Pipeline
//!
//! ```text
//! rows ─▶ similarity ─▶ neighbors (sim ≥ τ) ─▶ links = N·N ─▶ merge loop ─▶ k clusters
//! ```
//!
//! The merge loop repeatedly picks the pair of live clusters with the highest
//! goodness (see [`goodness`]) and folds them together in the [`LinkTable`],
//! adding their link rows so that links between merged groups stay exact.
//!
//! ## Usage
//!
//! ```rust
//! use rock::cluster::{Clustering, Rock};
//!
//! let data = vec![
//!     vec![1, 1, 0],
//!     vec![1, 1, 0],
//!     vec![0, 0, 1],
//!     vec![0, 0, 1],
//! ];
//!
//! let labels = Rock::new(2).with_threshold(0.5).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[3]);
//! assert_ne!(labels[0], labels[2]);
//! ```

pub mod goodness;
mod links;
mod rock;
mod traits;

pub use goodness::{rank, theta, FitnessEntry};
pub use links::{ClusterId, LinkTable};
pub use rock::{Rock, RockFit};
pub use traits::Clustering;
