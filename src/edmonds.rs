//! Edmonds' blossom algorithm for maximum matchings in general graphs.
//!
//! Augmenting paths are searched for breadth first from each unmatched
//! vertex. An edge between two outer vertices of the same search tree closes
//! an odd cycle (a blossom) which is contracted onto its base so the search
//! can continue through it. Every phase is O(V^2) and each vertex is tried
//! as a root once.

use bit_set::BitSet;
use tracing::debug;

use crate::matching::Matching;

const NIL: usize = usize::MAX;

/// Working state of one maximization. Only vertices in `subset` take part.
pub struct EdmondsMaximumMatching<'a> {
    graph: &'a [Vec<usize>],
    subset: &'a BitSet,
    mate: Vec<usize>,
    parent: Vec<usize>,
    base: Vec<usize>,
    used: Vec<bool>,
    blossom: Vec<bool>,
    queue: Vec<usize>,
}

impl<'a> EdmondsMaximumMatching<'a> {
    /// Grow `matching` into a maximum matching of the subgraph induced by
    /// `subset`. Existing edges inside `subset` are kept or rerouted along
    /// augmenting paths, never dropped. Seeded edges with an end outside
    /// `subset` are left exactly as they are.
    pub fn maximize(matching: Matching, graph: &'a [Vec<usize>], subset: &'a BitSet) -> Matching {
        let n = graph.len();
        let mate = (0..n).map(|v| matching.partner(v).unwrap_or(NIL)).collect();
        let mut edmonds = Self {
            graph,
            subset,
            mate,
            parent: vec![NIL; n],
            base: (0..n).collect(),
            used: vec![false; n],
            blossom: vec![false; n],
            queue: Vec::with_capacity(n),
        };

        let mut augmented = 0;
        for root in subset.iter().filter(|&v| v < n) {
            if edmonds.mate[root] != NIL {
                continue;
            }
            if let Some(end) = edmonds.find_path(root) {
                edmonds.augment(end);
                augmented += 1;
            }
        }
        debug!(augmented, "maximum matching");

        let mut maximum = Matching::with_capacity(matching.capacity().max(n));
        for (u, &v) in edmonds.mate.iter().enumerate() {
            if v != NIL && u < v {
                maximum.pair(u, v);
            }
        }
        maximum
    }

    fn in_subset(&self, v: usize) -> bool {
        v < self.graph.len() && self.subset.contains(v)
    }

    /// Flip the matched and unmatched edges along the path ending at the
    /// unmatched vertex `v`.
    fn augment(&mut self, mut v: usize) {
        while v != NIL {
            let pv = self.parent[v];
            let ppv = self.mate[pv];
            self.mate[v] = pv;
            self.mate[pv] = v;
            v = ppv;
        }
    }

    /// Lowest common ancestor of `a` and `b` in the alternating tree, taken
    /// over blossom bases.
    fn lca(&self, mut a: usize, mut b: usize) -> usize {
        let mut seen = vec![false; self.graph.len()];
        loop {
            a = self.base[a];
            seen[a] = true;
            if self.mate[a] == NIL {
                break;
            }
            a = self.parent[self.mate[a]];
        }
        loop {
            b = self.base[b];
            if seen[b] {
                return b;
            }
            b = self.parent[self.mate[b]];
        }
    }

    /// Walk from `v` to the blossom base `b`, flagging the blossom and
    /// pointing parents back along the odd cycle.
    fn mark_path(&mut self, mut v: usize, b: usize, mut child: usize) {
        while self.base[v] != b {
            let w = self.mate[v];
            self.blossom[self.base[v]] = true;
            self.blossom[self.base[w]] = true;
            self.parent[v] = child;
            child = w;
            v = self.parent[w];
        }
    }

    /// Search for an augmenting path from the unmatched `root`; returns the
    /// unmatched vertex it ends on.
    fn find_path(&mut self, root: usize) -> Option<usize> {
        let n = self.graph.len();
        self.used.fill(false);
        self.parent.fill(NIL);
        for (i, b) in self.base.iter_mut().enumerate() {
            *b = i;
        }

        self.used[root] = true;
        self.queue.clear();
        self.queue.push(root);
        let mut head = 0;
        while head < self.queue.len() {
            let v = self.queue[head];
            head += 1;
            for &to in &self.graph[v] {
                if !self.in_subset(to) || self.base[v] == self.base[to] || self.mate[v] == to {
                    continue;
                }
                // pairs reaching outside the subset are fixed
                if self.mate[to] != NIL && !self.in_subset(self.mate[to]) {
                    continue;
                }
                if to == root || (self.mate[to] != NIL && self.parent[self.mate[to]] != NIL) {
                    let b = self.lca(v, to);
                    self.blossom.fill(false);
                    self.mark_path(v, b, to);
                    self.mark_path(to, b, v);
                    for i in 0..n {
                        if self.blossom[self.base[i]] {
                            self.base[i] = b;
                            if !self.used[i] {
                                self.used[i] = true;
                                self.queue.push(i);
                            }
                        }
                    }
                } else if self.parent[to] == NIL {
                    self.parent[to] = v;
                    if self.mate[to] == NIL {
                        return Some(to);
                    }
                    let next = self.mate[to];
                    self.used[next] = true;
                    self.queue.push(next);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{from_edges, ring};

    fn all(n: usize) -> BitSet {
        (0..n).collect()
    }

    #[test]
    fn benzene_is_perfect() {
        let graph = ring(6);
        let m = EdmondsMaximumMatching::maximize(Matching::with_capacity(6), &graph, &all(6));
        let pairs: Vec<_> = m.pairs().collect();
        assert!(pairs == vec![(0, 1), (2, 3), (4, 5)] || pairs == vec![(0, 5), (1, 2), (3, 4)]);
    }

    #[test]
    fn excluded_vertex_is_untouched() {
        let graph = ring(5);
        let subset: BitSet = (1..5).collect();
        let m = EdmondsMaximumMatching::maximize(Matching::with_capacity(5), &graph, &subset);
        assert_eq!(m.pairs().collect::<Vec<_>>(), vec![(1, 2), (3, 4)]);
        assert!(m.unmatched(0));
    }

    #[test]
    fn seeded_pairs_leaving_the_subset_are_kept() {
        // 0 is outside the subset but paired with 1; only 0-3 could free it
        let graph = from_edges(4, &[(0, 1), (1, 2), (0, 3)]);
        let subset: BitSet = (1..4).collect();
        let mut seed = Matching::with_capacity(4);
        seed.pair(0, 1);
        let m = EdmondsMaximumMatching::maximize(seed, &graph, &subset);
        assert_eq!(m.partner(0), Some(1));
        assert!(m.unmatched(2));
        assert!(m.unmatched(3));
    }

    #[test]
    fn augments_through_a_blossom() {
        // triangle 0-1-2 with 1-2 matched and a pendant 3 on 1
        let graph = from_edges(4, &[(0, 1), (0, 2), (1, 2), (1, 3)]);
        let mut seed = Matching::with_capacity(4);
        seed.pair(1, 2);
        let m = EdmondsMaximumMatching::maximize(seed, &graph, &all(4));
        assert_eq!(m.partner(0), Some(2));
        assert_eq!(m.partner(1), Some(3));
    }

    #[test]
    fn odd_cycle_leaves_one_vertex() {
        let graph = ring(7);
        let m = EdmondsMaximumMatching::maximize(Matching::with_capacity(7), &graph, &all(7));
        assert_eq!(m.pairs().count(), 3);
    }

    #[test]
    fn large_ladder() {
        // a 2 x 500 ladder always has a perfect matching
        let n = 500;
        let mut edges = Vec::new();
        for i in 0..n {
            edges.push((i, i + n));
            if i + 1 < n {
                edges.push((i, i + 1));
                edges.push((i + n, i + n + 1));
            }
        }
        let graph = from_edges(2 * n, &edges);
        let m = EdmondsMaximumMatching::maximize(Matching::with_capacity(2 * n), &graph, &all(2 * n));
        assert_eq!(m.pairs().count(), n);
    }
}
