//! Breadth-first shortest paths that remember every shortest route.
//!
//! [`ShortestPaths`] records, for each vertex, all predecessors at minimum
//! distance from the source so that every shortest path can be enumerated
//! later. In ranked mode (used to build initial cycles) a vertex only keeps
//! routes whose vertices all rank below the source.

use std::cell::OnceCell;

use tracing::trace;

use crate::{error::Result, graph::check_vertex};

/// Shortest paths from one source vertex.
#[derive(Debug, Clone, Default)]
pub struct ShortestPaths {
    start: usize,
    dist_to: Vec<usize>,
    n_paths_to: Vec<usize>,
    routes: Vec<Vec<usize>>,
    precedes: Vec<bool>,
}

impl ShortestPaths {
    /// Shortest paths from `start` to every reachable vertex. An empty graph
    /// yields empty results; a `start` outside a non-empty graph is an error.
    pub fn new(graph: &[Vec<usize>], start: usize) -> Result<Self> {
        Self::with_limit(graph, start, usize::MAX)
    }

    /// Like [`ShortestPaths::new`] but stop exploring at depth `limit`;
    /// vertices further away report as unreachable.
    pub fn with_limit(graph: &[Vec<usize>], start: usize, limit: usize) -> Result<Self> {
        if graph.is_empty() {
            return Ok(Self::default());
        }
        check_vertex(graph, start)?;
        Ok(Self::compute(graph, start, limit, None))
    }

    /// Shortest paths where routes are restricted to vertices ranked below
    /// `start` (see [`ShortestPaths::is_preceding_path_to`]).
    pub fn ranked(graph: &[Vec<usize>], start: usize, limit: usize, rank: &[usize]) -> Result<Self> {
        if graph.is_empty() {
            return Ok(Self::default());
        }
        check_vertex(graph, start)?;
        Ok(Self::compute(graph, start, limit, Some(rank)))
    }

    /// Unchecked breadth-first search; `start` must be a vertex of `graph`.
    pub(crate) fn compute(
        graph: &[Vec<usize>],
        start: usize,
        limit: usize,
        rank: Option<&[usize]>,
    ) -> Self {
        let n = graph.len();
        let mut sp = Self {
            start,
            dist_to: vec![usize::MAX; n],
            n_paths_to: vec![0; n],
            routes: vec![Vec::new(); n],
            precedes: vec![false; n],
        };
        sp.dist_to[start] = 0;
        sp.n_paths_to[start] = 1;
        sp.precedes[start] = true;

        let below = |w: usize| rank.map_or(true, |r| r[w] < r[start]);

        let mut queue = Vec::with_capacity(n);
        queue.push(start);
        let mut head = 0;
        while head < queue.len() {
            let v = queue[head];
            head += 1;

            let dist = sp.dist_to[v] + 1;
            if dist > limit {
                continue;
            }
            for &w in &graph[v] {
                if w >= n {
                    continue;
                }
                let via_lower = sp.precedes[v] && below(w);
                if dist < sp.dist_to[w] {
                    sp.dist_to[w] = dist;
                    sp.routes[w] = vec![v];
                    sp.n_paths_to[w] = sp.n_paths_to[v];
                    sp.precedes[w] = via_lower;
                    queue.push(w);
                } else if dist == sp.dist_to[w] {
                    if via_lower && !sp.precedes[w] {
                        // the first route through lower ranked vertices
                        // replaces the others
                        sp.routes[w] = vec![v];
                        sp.n_paths_to[w] = sp.n_paths_to[v];
                        sp.precedes[w] = true;
                    } else if via_lower == sp.precedes[w] {
                        sp.routes[w].push(v);
                        sp.n_paths_to[w] = sp.n_paths_to[w].saturating_add(sp.n_paths_to[v]);
                    }
                }
            }
        }

        trace!(start, reached = queue.len(), "shortest paths computed");
        sp
    }

    fn reachable(&self, v: usize) -> bool {
        v < self.dist_to.len() && self.dist_to[v] != usize::MAX
    }

    /// The source vertex.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of edges on a shortest path to `v`, `usize::MAX` if `v` is
    /// unreachable or not a vertex.
    pub fn distance_to(&self, v: usize) -> usize {
        self.dist_to.get(v).copied().unwrap_or(usize::MAX)
    }

    /// One shortest path from the source to `v` (both included), empty if
    /// there is none. When several exist, the one found first is returned.
    pub fn path_to(&self, v: usize) -> Vec<usize> {
        if !self.reachable(v) {
            return Vec::new();
        }
        let mut path = Vec::with_capacity(self.dist_to[v] + 1);
        let mut curr = v;
        path.push(curr);
        while curr != self.start {
            curr = self.routes[curr][0];
            path.push(curr);
        }
        path.reverse();
        path
    }

    /// Every shortest path from the source to `v`, in discovery order.
    pub fn paths_to(&self, v: usize) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        if self.reachable(v) {
            let mut suffix = Vec::with_capacity(self.dist_to[v] + 1);
            self.append_paths(v, &mut suffix, &mut paths);
        }
        paths
    }

    fn append_paths(&self, v: usize, suffix: &mut Vec<usize>, paths: &mut Vec<Vec<usize>>) {
        suffix.push(v);
        if v == self.start {
            paths.push(suffix.iter().rev().copied().collect());
        } else {
            for &u in &self.routes[v] {
                self.append_paths(u, suffix, paths);
            }
        }
        suffix.pop();
    }

    /// Number of distinct shortest paths to `v`, zero if unreachable.
    pub fn n_paths_to(&self, v: usize) -> usize {
        if self.reachable(v) {
            self.n_paths_to[v]
        } else {
            0
        }
    }

    /// [`ShortestPaths::path_to`] mapped onto the caller's atoms.
    pub fn atoms_to<T: Copy>(&self, v: usize, atoms: &[T]) -> Vec<T> {
        self.path_to(v)
            .into_iter()
            .filter_map(|u| atoms.get(u).copied())
            .collect()
    }

    /// Whether `v` is reached by a shortest path whose vertices (other than
    /// the source) all rank below the source. Always true for reachable
    /// vertices when the paths were not computed in ranked mode.
    pub fn is_preceding_path_to(&self, v: usize) -> bool {
        self.reachable(v) && self.precedes[v]
    }
}

/// Shortest paths between every pair of vertices, computed per source on
/// first access.
#[derive(Debug)]
pub struct AllPairsShortestPaths<'a> {
    graph: &'a [Vec<usize>],
    from: Vec<OnceCell<ShortestPaths>>,
}

impl<'a> AllPairsShortestPaths<'a> {
    pub fn new(graph: &'a [Vec<usize>]) -> Self {
        Self {
            graph,
            from: (0..graph.len()).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Shortest paths from `start`, or `None` if it is not a vertex.
    pub fn from(&self, start: usize) -> Option<&ShortestPaths> {
        let cell = self.from.get(start)?;
        Some(cell.get_or_init(|| ShortestPaths::compute(self.graph, start, usize::MAX, None)))
    }

    pub fn distance(&self, u: usize, v: usize) -> usize {
        self.from(u).map_or(usize::MAX, |sp| sp.distance_to(v))
    }

    pub fn path(&self, u: usize, v: usize) -> Vec<usize> {
        self.from(u).map(|sp| sp.path_to(v)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        rank,
        tests::{from_edges, naphthalene, ring},
    };

    #[test]
    fn benzene_distances() {
        let sp = ShortestPaths::new(&ring(6), 0).unwrap();
        let dists: Vec<_> = (0..6).map(|v| sp.distance_to(v)).collect();
        assert_eq!(dists, vec![0, 1, 2, 3, 2, 1]);
    }

    #[test]
    fn benzene_all_paths_in_order() {
        let sp = ShortestPaths::new(&ring(6), 0).unwrap();
        assert_eq!(sp.path_to(3), vec![0, 1, 2, 3]);
        assert_eq!(sp.paths_to(3), vec![vec![0, 1, 2, 3], vec![0, 5, 4, 3]]);
        assert_eq!(sp.n_paths_to(3), 2);
        assert_eq!(sp.n_paths_to(2), 1);
    }

    #[test]
    fn source_path() {
        let sp = ShortestPaths::new(&ring(6), 2).unwrap();
        assert_eq!(sp.path_to(2), vec![2]);
        assert_eq!(sp.paths_to(2), vec![vec![2]]);
        assert_eq!(sp.distance_to(2), 0);
    }

    #[test]
    fn unreachable_is_not_an_error() {
        let graph = from_edges(4, &[(0, 1), (2, 3)]);
        let sp = ShortestPaths::new(&graph, 0).unwrap();
        assert_eq!(sp.distance_to(3), usize::MAX);
        assert!(sp.path_to(3).is_empty());
        assert!(sp.paths_to(3).is_empty());
        assert_eq!(sp.n_paths_to(3), 0);
        assert!(!sp.is_preceding_path_to(3));
    }

    #[test]
    fn out_of_range_target() {
        let sp = ShortestPaths::new(&ring(6), 0).unwrap();
        assert_eq!(sp.distance_to(99), usize::MAX);
        assert!(sp.path_to(99).is_empty());
        assert_eq!(sp.n_paths_to(99), 0);
    }

    #[test]
    fn start_outside_graph_is_an_error() {
        assert!(ShortestPaths::new(&ring(6), 6).is_err());
    }

    #[test]
    fn empty_graph_gives_empty_results() {
        let sp = ShortestPaths::new(&[], 0).unwrap();
        assert_eq!(sp.distance_to(0), usize::MAX);
        assert!(sp.path_to(0).is_empty());
    }

    #[test]
    fn depth_limit() {
        let sp = ShortestPaths::with_limit(&ring(6), 0, 2).unwrap();
        assert_eq!(sp.distance_to(2), 2);
        assert_eq!(sp.distance_to(3), usize::MAX);
    }

    #[test]
    fn atoms_to_maps_indices() {
        let sp = ShortestPaths::new(&ring(4), 0).unwrap();
        let atoms = ['C', 'N', 'O', 'S'];
        assert_eq!(sp.atoms_to(2, &atoms), vec!['C', 'N', 'O']);
    }

    #[test]
    fn preceding_paths_in_ranked_mode() {
        let graph = naphthalene();
        let rank = rank(&graph);
        // 4 and 5 have degree 3 so 5 is ranked highest
        assert_eq!(rank[5], 9);
        let sp = ShortestPaths::ranked(&graph, 5, usize::MAX, &rank).unwrap();
        assert!((0..10).all(|v| sp.is_preceding_path_to(v)));

        let sp = ShortestPaths::ranked(&graph, 0, usize::MAX, &rank).unwrap();
        assert!(sp.is_preceding_path_to(0));
        assert!(!sp.is_preceding_path_to(1));
    }

    #[test]
    fn all_pairs_is_lazy_and_cached() {
        let graph = ring(6);
        let all = AllPairsShortestPaths::new(&graph);
        let first = all.from(1).unwrap() as *const ShortestPaths;
        let second = all.from(1).unwrap() as *const ShortestPaths;
        assert_eq!(first, second);
        assert_eq!(all.distance(1, 4), 3);
        assert_eq!(all.path(0, 2), vec![0, 1, 2]);
        assert!(all.from(6).is_none());
        assert_eq!(all.distance(6, 0), usize::MAX);
    }
}
