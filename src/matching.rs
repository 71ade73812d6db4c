//! Vertex matchings over a subset of a graph, as used for Kekulé structure
//! assignment.

use bit_set::BitSet;
use tracing::trace;

use crate::{
    edmonds::EdmondsMaximumMatching,
    error::{Error, Result},
};

/// A set of vertex-disjoint edges, stored as a partner per vertex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    partner: Vec<Option<usize>>,
}

impl Matching {
    /// An empty matching over `n` vertices.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            partner: vec![None; n],
        }
    }

    pub fn capacity(&self) -> usize {
        self.partner.len()
    }

    /// Match `u` with `v`, first unmatching any previous partners of either.
    pub fn pair(&mut self, u: usize, v: usize) {
        self.unmatch(u);
        self.unmatch(v);
        self.partner[u] = Some(v);
        self.partner[v] = Some(u);
    }

    /// Remove the edge at `v`, if any. Its partner becomes unmatched too.
    pub fn unmatch(&mut self, v: usize) {
        if let Some(w) = self.partner.get_mut(v).and_then(Option::take) {
            self.partner[w] = None;
        }
    }

    pub fn matched(&self, v: usize) -> bool {
        matches!(self.partner.get(v), Some(Some(_)))
    }

    pub fn unmatched(&self, v: usize) -> bool {
        !self.matched(v)
    }

    /// The partner of `v`, which must be matched.
    pub fn other(&self, v: usize) -> Result<usize> {
        self.partner(v).ok_or(Error::Unmatched(v))
    }

    pub fn partner(&self, v: usize) -> Option<usize> {
        self.partner.get(v).copied().flatten()
    }

    /// Matched edges `(u, v)` with `u < v`, ordered by `u`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.partner
            .iter()
            .enumerate()
            .filter_map(|(u, &w)| w.filter(|&v| u < v).map(|v| (u, v)))
    }

    pub fn to_vec(&self) -> Vec<Option<usize>> {
        self.partner.clone()
    }

    /// Greedily match the unmatched vertices of `subset` to unmatched
    /// neighbors in `subset`, preferring vertices with a single such
    /// neighbor left. Returns whether every vertex of `subset` ends up
    /// matched.
    pub fn arbitrary_matching(&mut self, graph: &[Vec<usize>], subset: &BitSet) -> bool {
        let mut unmatched = BitSet::with_capacity(graph.len());
        let mut degree = vec![0usize; graph.len()];
        let mut singles = Vec::new();

        for v in subset.iter().filter(|&v| v < graph.len()) {
            if self.unmatched(v) {
                unmatched.insert(v);
            }
        }
        for v in unmatched.iter() {
            degree[v] = graph[v].iter().filter(|&&w| unmatched.contains(w)).count();
            if degree[v] == 1 {
                singles.push(v);
            }
        }

        let mut head = 0;
        loop {
            let mut next = None;
            while head < singles.len() {
                let v = singles[head];
                head += 1;
                if unmatched.contains(v) {
                    next = Some(v);
                    break;
                }
            }
            let Some(v) = next.or_else(|| unmatched.iter().next()) else {
                break;
            };
            unmatched.remove(v);

            let Some(w) = graph[v].iter().copied().find(|&w| unmatched.contains(w)) else {
                continue;
            };
            unmatched.remove(w);
            self.pair(v, w);
            for &u in graph[v].iter().chain(&graph[w]) {
                if unmatched.contains(u) {
                    degree[u] = degree[u].saturating_sub(1);
                    if degree[u] == 1 {
                        singles.push(u);
                    }
                }
            }
        }

        subset.iter().all(|v| self.matched(v))
    }

    /// Try to extend the current matching to a perfect matching of
    /// `subset`, keeping existing edges where possible.
    pub fn perfect(&mut self, graph: &[Vec<usize>], subset: &BitSet) -> Result<bool> {
        if graph.len() != self.capacity() {
            return Err(Error::CapacityMismatch {
                graph: graph.len(),
                matching: self.capacity(),
            });
        }
        if subset.len() % 2 == 1 {
            return Ok(false);
        }
        if self.arbitrary_matching(graph, subset) {
            return Ok(true);
        }
        trace!(size = subset.len(), "greedy matching incomplete, maximizing");
        *self = EdmondsMaximumMatching::maximize(std::mem::take(self), graph, subset);
        Ok(subset.iter().all(|v| self.matched(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{from_edges, naphthalene, ring};

    fn all(n: usize) -> BitSet {
        (0..n).collect()
    }

    #[test]
    fn pair_replaces_previous_partners() {
        let mut m = Matching::with_capacity(4);
        m.pair(0, 1);
        m.pair(1, 2);
        assert!(m.unmatched(0));
        assert_eq!(m.partner(1), Some(2));
        assert_eq!(m.other(2).unwrap(), 1);
    }

    #[test]
    fn unmatch_is_symmetric() {
        let mut m = Matching::with_capacity(4);
        m.pair(2, 3);
        m.unmatch(3);
        assert!(m.unmatched(2));
        assert!(m.unmatched(3));
        m.unmatch(0);
        m.unmatch(42);
    }

    #[test]
    fn other_of_unmatched_is_an_error() {
        let m = Matching::with_capacity(2);
        assert!(matches!(m.other(1), Err(Error::Unmatched(1))));
    }

    #[test]
    fn benzene_greedy() {
        let graph = ring(6);
        let mut m = Matching::with_capacity(6);
        assert!(m.arbitrary_matching(&graph, &all(6)));
        assert_eq!(m.pairs().collect::<Vec<_>>(), vec![(0, 1), (2, 3), (4, 5)]);
    }

    #[test]
    fn pyrrole_without_nitrogen() {
        let graph = ring(5);
        let subset: BitSet = (1..5).collect();
        let mut m = Matching::with_capacity(5);
        assert!(m.perfect(&graph, &subset).unwrap());
        assert!(m.unmatched(0));
        assert_eq!(m.pairs().collect::<Vec<_>>(), vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn odd_subset_is_never_perfect() {
        let mut m = Matching::with_capacity(5);
        assert!(!m.perfect(&ring(5), &all(5)).unwrap());
    }

    #[test]
    fn capacity_must_match() {
        let mut m = Matching::with_capacity(3);
        assert!(matches!(
            m.perfect(&ring(6), &all(6)),
            Err(Error::CapacityMismatch { graph: 6, matching: 3 })
        ));
    }

    #[test]
    fn perfect_repairs_a_bad_seed() {
        // 0-1-2-3 with the middle edge matched leaves 0 and 3 stranded
        let graph = from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let mut m = Matching::with_capacity(4);
        m.pair(1, 2);
        assert!(!m.clone().arbitrary_matching(&graph, &all(4)));
        assert!(m.perfect(&graph, &all(4)).unwrap());
        assert_eq!(m.pairs().collect::<Vec<_>>(), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn naphthalene_kekule() {
        let graph = naphthalene();
        let mut m = Matching::with_capacity(10);
        assert!(m.perfect(&graph, &all(10)).unwrap());
        assert_eq!(m.pairs().count(), 5);
        for (u, v) in m.pairs() {
            assert!(graph[u].contains(&v));
        }
    }
}
