//! A comparator-ordered interval index over `(key, inf, sup)` entries.
//!
//! The index is a balanced binary tree keyed by `inf`; every node carries
//! the maximum `sup` found in its subtree, so a query can prune any subtree
//! whose intervals all end before the query begins. Construction is
//! O(n log n), queries are O(log n + k).
//!
//! The index is built once over a snapshot of rows and never observes later
//! mutation. Querying an index that is stale with respect to its source is
//! the caller's contract to avoid; results are then stale, not corrupt.

use std::cmp::Ordering;

use tracing::debug;

/// Tie-break policy determining result ordering within equal-start groups.
pub trait IntervalComparator {
    fn compare(&self, a: (i64, i64), b: (i64, i64)) -> Ordering;
}

/// Orders by `inf` ascending, then by `sup` descending, so that within a
/// group of intervals starting together the longest comes first.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIntervalComparator;

impl IntervalComparator for DefaultIntervalComparator {
    fn compare(&self, a: (i64, i64), b: (i64, i64)) -> Ordering {
        a.0.cmp(&b.0).then(b.1.cmp(&a.1))
    }
}

const NIL: u32 = u32::MAX;

#[derive(Debug)]
struct Node {
    inf: i64,
    sup: i64,
    max_sup: i64,
    left: u32,
    right: u32,
}

/// A balanced augmented interval tree. `K` is the caller's row key type and
/// is returned verbatim by queries.
#[derive(Debug)]
pub struct IntervalTree<K> {
    nodes: Vec<Node>,
    keys: Vec<K>,
    root: u32,
}

impl<K: Copy> IntervalTree<K> {
    /// Builds the tree from `(key, inf, sup)` entries. The comparator fixes
    /// the in-order traversal order and thereby the order of query results.
    pub fn build<C>(mut entries: Vec<(K, i64, i64)>, comparator: &C) -> Self
    where
        C: IntervalComparator + ?Sized,
    {
        entries.sort_by(|a, b| comparator.compare((a.1, a.2), (b.1, b.2)));
        let mut tree = IntervalTree {
            nodes: Vec::with_capacity(entries.len()),
            keys: Vec::with_capacity(entries.len()),
            root: NIL,
        };
        tree.root = tree.build_range(&entries, 0, entries.len());
        debug!(intervals = tree.keys.len(), "interval index built");
        tree
    }

    // median split over the sorted entries keeps the tree balanced
    fn build_range(&mut self, entries: &[(K, i64, i64)], lo: usize, hi: usize) -> u32 {
        if lo >= hi {
            return NIL;
        }
        let mid = lo + (hi - lo) / 2;
        let left = self.build_range(entries, lo, mid);
        let right = self.build_range(entries, mid + 1, hi);
        let (key, inf, sup) = entries[mid];
        let mut max_sup = sup;
        if left != NIL {
            max_sup = max_sup.max(self.nodes[left as usize].max_sup);
        }
        if right != NIL {
            max_sup = max_sup.max(self.nodes[right as usize].max_sup);
        }
        self.nodes.push(Node {
            inf,
            sup,
            max_sup,
            left,
            right,
        });
        self.keys.push(key);
        (self.nodes.len() - 1) as u32
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys whose interval equals `[inf, sup]` exactly.
    pub fn matching(&self, inf: i64, sup: i64) -> Vec<K> {
        let mut result = Vec::new();
        self.collect_matching(self.root, inf, sup, &mut result);
        result
    }

    /// All keys whose interval intersects `[inf, sup]`.
    pub fn overlapping(&self, inf: i64, sup: i64) -> Vec<K> {
        let mut result = Vec::new();
        self.collect_overlapping(self.root, inf, sup, &mut result);
        result
    }

    /// All keys whose interval lies fully inside `[inf, sup]`.
    pub fn contained_in(&self, inf: i64, sup: i64) -> Vec<K> {
        let mut result = Vec::new();
        self.collect_contained(self.root, inf, sup, &mut result);
        result
    }

    fn collect_matching(&self, index: u32, inf: i64, sup: i64, result: &mut Vec<K>) {
        if index == NIL {
            return;
        }
        let node = &self.nodes[index as usize];
        if node.max_sup < sup {
            return;
        }
        match inf.cmp(&node.inf) {
            Ordering::Less => self.collect_matching(node.left, inf, sup, result),
            Ordering::Greater => self.collect_matching(node.right, inf, sup, result),
            Ordering::Equal => {
                self.collect_matching(node.left, inf, sup, result);
                if node.sup == sup {
                    result.push(self.keys[index as usize]);
                }
                self.collect_matching(node.right, inf, sup, result);
            }
        }
    }

    fn collect_overlapping(&self, index: u32, inf: i64, sup: i64, result: &mut Vec<K>) {
        if index == NIL {
            return;
        }
        let node = &self.nodes[index as usize];
        // every interval below this node ends before the query begins
        if node.max_sup < inf {
            return;
        }
        self.collect_overlapping(node.left, inf, sup, result);
        if node.inf <= sup && node.sup >= inf {
            result.push(self.keys[index as usize]);
        }
        // intervals to the right start no earlier than this one
        if node.inf <= sup {
            self.collect_overlapping(node.right, inf, sup, result);
        }
    }

    fn collect_contained(&self, index: u32, inf: i64, sup: i64, result: &mut Vec<K>) {
        if index == NIL {
            return;
        }
        let node = &self.nodes[index as usize];
        if node.max_sup < inf {
            return;
        }
        self.collect_contained(node.left, inf, sup, result);
        if node.inf >= inf && node.sup <= sup {
            result.push(self.keys[index as usize]);
        }
        if node.inf <= sup {
            self.collect_contained(node.right, inf, sup, result);
        }
    }
}
