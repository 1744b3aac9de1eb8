//! Mutable link-count state for the merge loop.
//!
//! The table is an arena of cluster slots over a fixed n×n link matrix. Slot
//! `i` starts as the singleton `{i}`. Merging `b` into `a` folds `b`'s row and
//! column into `a`'s and marks `b` dead; nothing is reallocated. Live slots are
//! always visited in ascending order, which is the same order a shrinking
//! matrix would present its surviving rows in.

use ndarray::Array2;

use crate::error::{Error, Result};

/// Stable identifier of a cluster: the slot of its first record.
pub type ClusterId = usize;

/// Link counts between the live clusters of a partition.
#[derive(Debug, Clone)]
pub struct LinkTable {
    links: Array2<u64>,
    live: Vec<bool>,
    n_live: usize,
    /// Original record ids per slot, in merge order.
    members: Vec<Vec<usize>>,
}

impl LinkTable {
    /// Start from a square, symmetric link matrix with one singleton cluster
    /// per row.
    pub fn new(links: Array2<u64>) -> Result<Self> {
        let (rows, cols) = links.dim();
        if rows != cols {
            return Err(Error::DimensionMismatch {
                row: 0,
                expected: rows,
                found: cols,
            });
        }
        if let Some(((i, j), _)) = links
            .indexed_iter()
            .find(|&((i, j), &v)| v != links[[j, i]])
        {
            return Err(Error::InvalidParameter {
                name: "links",
                message: format!(
                    "matrix is not symmetric: ({i}, {j}) = {}, ({j}, {i}) = {}",
                    links[[i, j]],
                    links[[j, i]]
                ),
            });
        }
        Ok(Self {
            links,
            live: vec![true; rows],
            n_live: rows,
            members: (0..rows).map(|i| vec![i]).collect(),
        })
    }

    /// Number of original records.
    pub fn n_items(&self) -> usize {
        self.live.len()
    }

    /// Number of live clusters.
    pub fn n_live(&self) -> usize {
        self.n_live
    }

    /// Whether `id` names a live cluster.
    pub fn is_live(&self, id: ClusterId) -> bool {
        self.live.get(id).copied().unwrap_or(false)
    }

    /// Live cluster ids in matrix order.
    pub fn live_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.live
            .iter()
            .enumerate()
            .filter_map(|(i, &alive)| alive.then_some(i))
    }

    /// Link count between two live clusters (or a cluster's self-links).
    ///
    /// # Panics
    ///
    /// Panics if either id is not below [`Self::n_items`].
    pub fn links(&self, a: ClusterId, b: ClusterId) -> u64 {
        self.links[[a, b]]
    }

    /// Number of live clusters `id` shares at least one link with, itself included.
    pub fn degree(&self, id: ClusterId) -> usize {
        self.live_ids().filter(|&c| self.links[[id, c]] != 0).count()
    }

    /// Original record ids of a cluster, in merge order. Empty once retired.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not below [`Self::n_items`].
    pub fn members(&self, id: ClusterId) -> &[usize] {
        &self.members[id]
    }

    /// Sum of every live entry, self-links included.
    pub fn total_links(&self) -> u64 {
        let live: Vec<_> = self.live_ids().collect();
        live.iter()
            .flat_map(|&a| live.iter().map(move |&b| (a, b)))
            .map(|(a, b)| self.links[[a, b]])
            .sum()
    }

    /// Comma-joined labels of a cluster's members, in merge order.
    pub fn composite_label<S: AsRef<str>>(&self, id: ClusterId, names: &[S]) -> String {
        self.members[id]
            .iter()
            .map(|&m| names.get(m).map_or_else(|| m.to_string(), |s| s.as_ref().to_string()))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Compact K×K link matrix over the live clusters, with their ids.
    pub fn live_matrix(&self) -> (Vec<ClusterId>, Array2<u64>) {
        let ids: Vec<_> = self.live_ids().collect();
        let m = Array2::from_shape_fn((ids.len(), ids.len()), |(i, j)| {
            self.links[[ids[i], ids[j]]]
        });
        (ids, m)
    }

    /// Merge cluster `b` into cluster `a`.
    ///
    /// Every other live cluster `c` ends with `links(a, c) = old(a, c) + old(b, c)`;
    /// the self-link entry of `a` absorbs `old(a,a) + 2·old(a,b) + old(b,b)`.
    /// `b`'s members are appended after `a`'s and `b` is retired. Returns `a`.
    pub fn merge(&mut self, a: ClusterId, b: ClusterId) -> Result<ClusterId> {
        if a == b || !self.is_live(a) || !self.is_live(b) {
            return Err(Error::InvalidParameter {
                name: "merge",
                message: format!("clusters {a} and {b} must be distinct and live"),
            });
        }

        let self_links =
            self.links[[a, a]] + self.links[[a, b]] + self.links[[b, a]] + self.links[[b, b]];
        for c in 0..self.live.len() {
            if !self.live[c] || c == a || c == b {
                continue;
            }
            let v = self.links[[a, c]] + self.links[[b, c]];
            self.links[[a, c]] = v;
            self.links[[c, a]] = v;
        }
        self.links[[a, a]] = self_links;

        self.live[b] = false;
        self.n_live -= 1;
        let moved = std::mem::take(&mut self.members[b]);
        self.members[a].extend(moved);

        Ok(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn table() -> LinkTable {
        LinkTable::new(array![
            [2, 2, 0, 1],
            [2, 3, 1, 2],
            [0, 1, 2, 2],
            [1, 2, 2, 3],
        ])
        .unwrap()
    }

    #[test]
    fn singletons_at_start() {
        let t = table();
        assert_eq!(t.n_live(), 4);
        assert_eq!(t.members(2), &[2]);
        assert_eq!(t.degree(0), 3);
        assert_eq!(t.degree(1), 4);
    }

    #[test]
    fn merge_sums_rows_and_columns() {
        let mut t = table();
        let total = t.total_links();
        assert_eq!(t.merge(0, 1).unwrap(), 0);

        assert_eq!(t.n_live(), 3);
        assert!(!t.is_live(1));
        assert_eq!(t.links(0, 2), 1);
        assert_eq!(t.links(2, 0), 1);
        assert_eq!(t.links(0, 3), 3);
        assert_eq!(t.links(0, 0), 2 + 2 + 2 + 3);
        assert_eq!(t.total_links(), total);
        assert_eq!(t.members(0), &[0, 1]);
    }

    #[test]
    fn merge_keeps_history_order() {
        let mut t = table();
        t.merge(2, 3).unwrap();
        t.merge(0, 2).unwrap();
        assert_eq!(t.members(0), &[0, 2, 3]);
        let names = ["a", "b", "c", "d"];
        assert_eq!(t.composite_label(0, &names), "a,c,d");
        assert_eq!(t.live_ids().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn live_matrix_is_symmetric() {
        let mut t = table();
        t.merge(1, 3).unwrap();
        let (ids, m) = t.live_matrix();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(m, m.t());
    }

    #[test]
    fn merge_rejects_dead_or_equal() {
        let mut t = table();
        assert!(t.merge(1, 1).is_err());
        t.merge(0, 1).unwrap();
        assert!(t.merge(0, 1).is_err());
        assert!(t.merge(0, 9).is_err());
    }

    #[test]
    fn non_square_is_rejected() {
        assert!(LinkTable::new(Array2::zeros((2, 3))).is_err());
    }

    #[test]
    fn asymmetric_is_rejected() {
        assert!(matches!(
            LinkTable::new(array![[1, 5], [0, 1]]),
            Err(Error::InvalidParameter { name: "links", .. })
        ));
    }

    #[test]
    #[should_panic]
    fn out_of_range_members_panics() {
        let t = table();
        let _ = t.members(4);
    }
}
