//! Neighbor graph and link counts.
//!
//! Two records are **neighbors** when their similarity reaches the threshold
//! τ. The number of **links** between records i and j is the number of records
//! that are neighbors of both:
//!
//! ```text
//! links = N · N      where N[i][j] = 1 iff sim(i, j) ≥ τ
//! ```
//!
//! Because sim(i, i) = 1 every record is its own neighbor, so the diagonal of
//! the link matrix is each record's neighbor count.

use ndarray::{Array2, ArrayView2};
use petgraph::graph::UnGraph;
use tracing::info;

use crate::error::{Error, Result};

/// Reject thresholds outside `[0, 1]` (including NaN).
pub fn check_threshold(threshold: f64) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "threshold",
            message: format!("must lie in [0, 1], got {threshold}"),
        })
    }
}

/// Binary adjacency matrix: `1` iff similarity ≥ `threshold`.
pub fn neighbor_matrix(similarity: ArrayView2<'_, f64>, threshold: f64) -> Result<Array2<u8>> {
    check_threshold(threshold)?;
    Ok(similarity.mapv(|s| u8::from(s >= threshold)))
}

/// Shared-neighbor counts: the neighbor matrix multiplied by itself.
pub fn link_matrix(neighbors: ArrayView2<'_, u8>) -> Array2<u64> {
    let n = neighbors.mapv(u64::from);
    let links = n.dot(&n);
    info!(
        records = links.nrows(),
        total_links = links.sum(),
        "computed link matrix"
    );
    links
}

/// Neighbor relation as an undirected graph.
///
/// Nodes carry the record index, edges the similarity. Self-neighborhood is
/// implied and not stored as loops.
pub fn neighbor_graph(
    similarity: ArrayView2<'_, f64>,
    threshold: f64,
) -> Result<UnGraph<usize, f64>> {
    check_threshold(threshold)?;

    let n = similarity.nrows();
    let mut graph = UnGraph::with_capacity(n, 0);
    let nodes: Vec<_> = (0..n).map(|i| graph.add_node(i)).collect();

    for i in 0..n {
        for j in (i + 1)..n {
            let s = similarity[[i, j]];
            if s >= threshold {
                graph.add_edge(nodes[i], nodes[j], s);
            }
        }
    }

    Ok(graph)
}
