//! Merge history.
//!
//! [`Dendrogram`] records every merge of a run in order, so a single fit can
//! be replayed to any partition between the initial singletons and the final
//! clusters without re-clustering.

mod dendrogram;

pub use dendrogram::{Dendrogram, Merge};
