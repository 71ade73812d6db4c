//! Candidate cycles from which every cycle-set algorithm is built.
//!
//! Uses Vismara's construction: vertices are ranked by degree and, for each
//! vertex `r`, shortest paths from `r` through lower ranked vertices are
//! joined pairwise at a far vertex `y` into odd cycles (`r..y`, `z..r` with
//! `y`–`z` an edge) or even cycles (`r..p`, `y`, `q..r`). The result is a
//! polynomial set of cycles containing a representative of every relevant
//! cycle. A candidate stands for a *family*: every combination of the
//! shortest paths it was joined from.

use std::{collections::BTreeMap, sync::Arc};

use bit_set::BitSet;
use tracing::debug;

use crate::{
    error::{Error, Result},
    graph::{rank, vertices_in_order, EdgeTable},
    shortest_paths::ShortestPaths,
};

#[derive(Debug, Clone)]
enum Family {
    Single,
    Even {
        paths: Arc<ShortestPaths>,
        p: usize,
        y: usize,
        q: usize,
    },
    Odd {
        paths: Arc<ShortestPaths>,
        y: usize,
        z: usize,
    },
}

/// A closed walk (first vertex repeated last) with its edge vector.
#[derive(Debug, Clone)]
pub struct Cycle {
    path: Vec<usize>,
    edge_vector: BitSet,
    family: Family,
}

impl Cycle {
    /// A cycle with no alternatives; its family is just itself.
    pub fn new(path: Vec<usize>, edge_vector: BitSet) -> Self {
        Self {
            path,
            edge_vector,
            family: Family::Single,
        }
    }

    fn even(paths: Arc<ShortestPaths>, p: &[usize], y: usize, q: &[usize], edges: &EdgeTable) -> Self {
        let path = join_even(p, y, q);
        Self {
            edge_vector: edges.to_edge_vector(&path),
            path,
            family: Family::Even {
                p: p[p.len() - 1],
                q: q[q.len() - 1],
                y,
                paths,
            },
        }
    }

    fn odd(paths: Arc<ShortestPaths>, py: &[usize], pz: &[usize], edges: &EdgeTable) -> Self {
        let path = join_odd(py, pz);
        Self {
            edge_vector: edges.to_edge_vector(&path),
            path,
            family: Family::Odd {
                y: py[py.len() - 1],
                z: pz[pz.len() - 1],
                paths,
            },
        }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Number of edges in the cycle.
    pub fn length(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn edge_vector(&self) -> &BitSet {
        &self.edge_vector
    }

    /// Every cycle obtained by swapping in the other shortest paths this
    /// cycle was joined from. The cycle itself is among them.
    pub fn family(&self) -> Vec<Vec<usize>> {
        match &self.family {
            Family::Single => vec![self.path.clone()],
            Family::Even { paths, p, y, q } => {
                let qs = paths.paths_to(*q);
                let mut family = Vec::with_capacity(self.size_of_family());
                for pp in paths.paths_to(*p) {
                    for pq in &qs {
                        family.push(join_even(&pp, *y, pq));
                    }
                }
                family
            }
            Family::Odd { paths, y, z } => {
                let zs = paths.paths_to(*z);
                let mut family = Vec::with_capacity(self.size_of_family());
                for py in paths.paths_to(*y) {
                    for pz in &zs {
                        family.push(join_odd(&py, pz));
                    }
                }
                family
            }
        }
    }

    pub fn size_of_family(&self) -> usize {
        match &self.family {
            Family::Single => 1,
            Family::Even { paths, p, q, .. } => paths.n_paths_to(*p).saturating_mul(paths.n_paths_to(*q)),
            Family::Odd { paths, y, z } => paths.n_paths_to(*y).saturating_mul(paths.n_paths_to(*z)),
        }
    }
}

/// `r..p`, `y`, `q..r`
fn join_even(p: &[usize], y: usize, q: &[usize]) -> Vec<usize> {
    let mut path = Vec::with_capacity(p.len() + q.len() + 1);
    path.extend_from_slice(p);
    path.push(y);
    path.extend(q.iter().rev());
    path
}

/// `r..y`, `z..r`
fn join_odd(py: &[usize], pz: &[usize]) -> Vec<usize> {
    let mut path = Vec::with_capacity(py.len() + pz.len());
    path.extend_from_slice(py);
    path.extend(pz.iter().rev());
    path
}

/// Normalise a closed path: start at its smallest vertex and walk toward
/// the smaller of that vertex's two neighbors. Two closed paths describe the
/// same cycle iff their normal forms are equal.
pub fn lexicographic(path: &[usize]) -> Vec<usize> {
    let ring = match path {
        [first, .., last] if first == last => &path[..path.len() - 1],
        _ => path,
    };
    let n = ring.len();
    let Some((start, _)) = ring.iter().enumerate().min_by_key(|&(_, v)| *v) else {
        return Vec::new();
    };

    let forward = ring[(start + 1) % n] <= ring[(start + n - 1) % n];
    let mut normal = Vec::with_capacity(n + 1);
    for k in 0..n {
        let i = if forward { start + k } else { start + n - k };
        normal.push(ring[i % n]);
    }
    normal.push(ring[start]);
    normal
}

/// Two paths from the same source share no vertex but the source.
fn singleton_intersect(p: &[usize], q: &[usize]) -> bool {
    p.iter().skip(1).all(|v| !q[1..].contains(v))
}

/// The initial (candidate) cycles of a graph, grouped by length.
#[derive(Debug, Clone)]
pub struct InitialCycles<'a> {
    graph: &'a [Vec<usize>],
    rank: Vec<usize>,
    edges: EdgeTable,
    cycles: BTreeMap<usize, Vec<Cycle>>,
    limit: usize,
    biconnected: bool,
}

impl<'a> InitialCycles<'a> {
    /// Candidate cycles of any length.
    pub fn new(graph: &'a [Vec<usize>]) -> Self {
        Self::build(graph, graph.len(), false)
    }

    /// Candidate cycles of at most `limit` edges.
    pub fn with_limit(graph: &'a [Vec<usize>], limit: usize) -> Result<Self> {
        check_limit(graph, limit)?;
        Ok(Self::build(graph, limit, false))
    }

    /// Candidate cycles of a graph known to be one biconnected component.
    /// Vertices of degree below two never start a search.
    pub fn of_biconnected_component(graph: &'a [Vec<usize>], limit: usize) -> Result<Self> {
        check_limit(graph, limit)?;
        Ok(Self::build(graph, limit, true))
    }

    fn build(graph: &'a [Vec<usize>], limit: usize, biconnected: bool) -> Self {
        let mut initial = Self {
            graph,
            rank: rank(graph),
            edges: EdgeTable::new(graph),
            cycles: BTreeMap::new(),
            limit,
            biconnected,
        };
        initial.compute();
        debug!(
            vertices = graph.len(),
            edges = initial.edges.len(),
            cycles = initial.number_of_cycles(),
            "initial cycles computed"
        );
        initial
    }

    fn compute(&mut self) {
        let graph = self.graph;
        let n = graph.len();
        let vertices = vertices_in_order(&self.rank);
        let mut s = Vec::new();

        for (i, &r) in vertices.iter().enumerate().skip(1) {
            if self.biconnected && graph[r].len() < 2 {
                continue;
            }
            let paths = Arc::new(ShortestPaths::compute(graph, r, self.limit / 2, Some(&self.rank)));

            for &y in &vertices[..i] {
                if !paths.is_preceding_path_to(y) {
                    continue;
                }
                let dist_y = paths.distance_to(y);

                s.clear();
                for &z in &graph[y] {
                    if z >= n || !paths.is_preceding_path_to(z) {
                        continue;
                    }
                    let dist_z = paths.distance_to(z);
                    if dist_z + 1 == dist_y {
                        s.push(z);
                    } else if dist_z == dist_y && self.rank[z] < self.rank[y] {
                        let py = paths.path_to(y);
                        let pz = paths.path_to(z);
                        if singleton_intersect(&py, &pz) {
                            self.add(Cycle::odd(Arc::clone(&paths), &py, &pz, &self.edges));
                        }
                    }
                }

                for k in 0..s.len() {
                    for l in k + 1..s.len() {
                        let pp = paths.path_to(s[k]);
                        let pq = paths.path_to(s[l]);
                        if singleton_intersect(&pp, &pq) {
                            self.add(Cycle::even(Arc::clone(&paths), &pp, y, &pq, &self.edges));
                        }
                    }
                }
            }
        }
    }

    fn add(&mut self, cycle: Cycle) {
        let length = cycle.length();
        if length >= 3 && length <= self.limit {
            self.cycles.entry(length).or_default().push(cycle);
        }
    }

    pub fn graph(&self) -> &'a [Vec<usize>] {
        self.graph
    }

    pub fn rank(&self) -> &[usize] {
        &self.rank
    }

    pub fn edges(&self) -> &EdgeTable {
        &self.edges
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn number_of_cycles(&self) -> usize {
        self.cycles.values().map(Vec::len).sum()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of_edge(&self, u: usize, v: usize) -> Option<usize> {
        self.edges.index_of(u, v)
    }

    pub fn to_edge_vector(&self, path: &[usize]) -> BitSet {
        self.edges.to_edge_vector(path)
    }

    /// Distinct cycle lengths, ascending.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.cycles.keys().copied()
    }

    pub fn cycles_of_length(&self, length: usize) -> &[Cycle] {
        self.cycles.get(&length).map_or(&[], Vec::as_slice)
    }

    /// All candidates, ordered by length and then by discovery.
    pub fn cycles(&self) -> impl Iterator<Item = &Cycle> + '_ {
        self.cycles.values().flatten()
    }
}

fn check_limit(graph: &[Vec<usize>], limit: usize) -> Result<()> {
    if limit <= graph.len() {
        Ok(())
    } else {
        Err(Error::InvalidLimit {
            limit,
            order: graph.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{bicyclo_octane, complete, from_edges, naphthalene, ring};

    #[test]
    fn benzene_has_one_even_cycle() {
        let graph = ring(6);
        let initial = InitialCycles::new(&graph);
        assert_eq!(initial.number_of_cycles(), 1);
        assert_eq!(initial.lengths().collect::<Vec<_>>(), vec![6]);
        let cycle = &initial.cycles_of_length(6)[0];
        assert_eq!(cycle.length(), 6);
        assert_eq!(cycle.path().first(), cycle.path().last());
        assert_eq!(cycle.edge_vector().len(), 6);
        assert_eq!(cycle.size_of_family(), 1);
    }

    #[test]
    fn odd_ring_has_one_odd_cycle() {
        let graph = ring(5);
        let initial = InitialCycles::new(&graph);
        assert_eq!(initial.number_of_cycles(), 1);
        assert_eq!(initial.cycles_of_length(5).len(), 1);
    }

    #[test]
    fn naphthalene_candidates() {
        let graph = naphthalene();
        let initial = InitialCycles::new(&graph);
        assert_eq!(initial.cycles_of_length(6).len(), 2);
        assert_eq!(initial.number_of_edges(), 11);
        for cycle in initial.cycles() {
            assert_eq!(cycle.path()[0], *cycle.path().last().unwrap());
            assert_eq!(cycle.edge_vector().len(), cycle.length());
        }
    }

    #[test]
    fn families_of_bicyclo_octane() {
        let graph = bicyclo_octane();
        let initial = InitialCycles::new(&graph);
        let sixes = initial.cycles_of_length(6);
        let family_size: usize = sixes.iter().map(Cycle::size_of_family).sum();
        // the three six-membered rings
        let mut all: Vec<_> = sixes.iter().flat_map(Cycle::family).map(|p| initial.to_edge_vector(&p)).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 3);
        assert!(family_size >= 2);
        for cycle in sixes {
            assert_eq!(cycle.family().len(), cycle.size_of_family());
            assert!(cycle.family().contains(&cycle.path().to_vec()));
        }
    }

    #[test]
    fn square_is_found_once() {
        let graph = from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let initial = InitialCycles::new(&graph);
        assert_eq!(initial.number_of_cycles(), 1);
    }

    #[test]
    fn limit_drops_long_cycles() {
        let graph = naphthalene();
        let initial = InitialCycles::with_limit(&graph, 5).unwrap();
        assert_eq!(initial.number_of_cycles(), 0);
        assert!(InitialCycles::with_limit(&graph, 11).is_err());
    }

    #[test]
    fn complete_graph_triangles() {
        let graph = complete(4);
        let initial = InitialCycles::new(&graph);
        assert_eq!(initial.cycles_of_length(3).len(), 4);
    }

    #[test]
    fn biconnected_matches_unrestricted() {
        let graph = naphthalene();
        let a = InitialCycles::new(&graph);
        let b = InitialCycles::of_biconnected_component(&graph, graph.len()).unwrap();
        let paths = |i: &InitialCycles| i.cycles().map(|c| c.path().to_vec()).collect::<Vec<_>>();
        assert_eq!(paths(&a), paths(&b));
    }

    #[test]
    fn lexicographic_rotation() {
        assert_eq!(lexicographic(&[3, 4, 0, 1, 2, 3]), vec![0, 1, 2, 3, 4, 0]);
        assert_eq!(lexicographic(&[3, 2, 1, 0, 4, 3]), vec![0, 1, 2, 3, 4, 0]);
        assert_eq!(lexicographic(&[5, 9, 2, 5]), vec![2, 5, 9, 2]);
        assert!(lexicographic(&[]).is_empty());
    }

    #[test]
    fn edge_lookup() {
        let graph = ring(6);
        let initial = InitialCycles::new(&graph);
        assert_eq!(initial.index_of_edge(1, 0), Some(0));
        assert_eq!(initial.index_of_edge(0, 3), None);
    }
}
