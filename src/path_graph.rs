//! Path graphs for exhaustive cycle enumeration by vertex elimination.
//!
//! Every edge of a path graph stands for a simple path of the original
//! graph. Removing a vertex `x` joins each pair of path edges meeting at `x`
//! whose interiors are disjoint into one longer path edge. A join whose two
//! ends meet is a cycle. Once every vertex has been removed each simple
//! cycle of the original graph has been reported exactly once.
//!
//! An edge is only stored with its lower ranked endpoint, so removing the
//! vertices in rank order always finds every edge still incident to the
//! vertex being removed in that vertex's own list.

use std::fmt::Debug;

use bit_set::BitSet;

use crate::graph::EdgeTable;

/// Vertex elimination over some path graph representation.
pub trait PathGraph {
    /// Number of path edges currently incident to `x`.
    fn degree(&self, x: usize) -> usize;

    /// Eliminate `x`, appending every cycle closed by the elimination to
    /// `cycles`. Removing a vertex twice is a no-op.
    fn remove(&mut self, x: usize, cycles: &mut Vec<Vec<usize>>);
}

/// The interior vertices of a path edge.
pub trait VertexSet: Clone + Debug {
    fn empty(order: usize) -> Self;
    fn add_vertex(&mut self, v: usize);
    fn merge(&mut self, other: &Self);
    fn disjoint(&self, other: &Self) -> bool;
}

impl VertexSet for u64 {
    fn empty(_: usize) -> Self {
        0
    }

    fn add_vertex(&mut self, v: usize) {
        *self |= 1 << v;
    }

    fn merge(&mut self, other: &Self) {
        *self |= other;
    }

    fn disjoint(&self, other: &Self) -> bool {
        self & other == 0
    }
}

impl VertexSet for BitSet {
    fn empty(order: usize) -> Self {
        BitSet::with_capacity(order)
    }

    fn add_vertex(&mut self, v: usize) {
        self.insert(v);
    }

    fn merge(&mut self, other: &Self) {
        self.union_with(other);
    }

    fn disjoint(&self, other: &Self) -> bool {
        self.is_disjoint(other)
    }
}

/// A simple path `u .. v` of the original graph with its interior.
#[derive(Debug, Clone)]
pub struct PathEdge<S> {
    u: usize,
    v: usize,
    path: Vec<usize>,
    xs: S,
}

impl<S: VertexSet> PathEdge<S> {
    fn simple(u: usize, v: usize, order: usize) -> Self {
        Self {
            u,
            v,
            path: vec![u, v],
            xs: S::empty(order),
        }
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.u, self.v)
    }

    pub fn other(&self, x: usize) -> usize {
        if x == self.u {
            self.v
        } else {
            self.u
        }
    }

    /// Vertices from `u` to `v`.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Number of original edges on the path.
    pub fn len(&self) -> usize {
        self.path.len() - 1
    }

    pub fn is_loop(&self) -> bool {
        self.u == self.v
    }

    /// Whether the two paths share no interior vertex.
    fn disjoint(&self, other: &Self) -> bool {
        self.xs.disjoint(&other.xs)
    }

    /// The path oriented to end at `x`.
    fn ending_at(&self, x: usize) -> impl Iterator<Item = usize> + '_ {
        let reverse = self.u == x;
        let n = self.path.len();
        (0..n).map(move |i| if reverse { self.path[n - 1 - i] } else { self.path[i] })
    }

    /// Join `self` and `other` at their shared endpoint `x`.
    fn reduce(&self, other: &Self, x: usize) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + other.path.len() - 1);
        path.extend(self.ending_at(x));
        path.extend(other.ending_at(x).collect::<Vec<_>>().into_iter().rev().skip(1));

        let mut xs = self.xs.clone();
        xs.merge(&other.xs);
        xs.add_vertex(x);
        Self {
            u: self.other(x),
            v: other.other(x),
            path,
            xs,
        }
    }
}

/// Path graph storing each vertex's path edges in a list, generic over the
/// interior set representation.
#[derive(Debug, Clone)]
pub struct IncidencePathGraph<S> {
    graph: Vec<Vec<PathEdge<S>>>,
    rank: Vec<usize>,
    limit: usize,
}

/// Interiors as 64-bit masks; only for graphs with fewer than 64 vertices.
pub type RegularPathGraph = IncidencePathGraph<u64>;

/// Interiors as growable bit sets, for graphs of any size.
pub type JumboPathGraph = IncidencePathGraph<BitSet>;

impl<S: VertexSet> IncidencePathGraph<S> {
    /// The path graph of `mol` where vertices will be removed in order of
    /// `rank` and cycles longer than `limit` are never built.
    pub fn new(mol: &[Vec<usize>], rank: &[usize], limit: usize) -> Self {
        let order = mol.len();
        let mut pg = Self {
            graph: vec![Vec::new(); order],
            rank: rank.to_vec(),
            limit,
        };
        let edges = EdgeTable::new(mol);
        for i in 0..edges.len() {
            if let Some(edge) = edges.edge(i) {
                let (u, v) = edge.endpoints();
                pg.add(PathEdge::simple(u, v, order));
            }
        }
        pg
    }

    fn add(&mut self, edge: PathEdge<S>) {
        let (u, v) = edge.endpoints();
        if self.rank[u] < self.rank[v] {
            self.graph[u].push(edge);
        } else {
            self.graph[v].push(edge);
        }
    }

    /// Path edges currently stored with `x`.
    pub fn edges(&self, x: usize) -> &[PathEdge<S>] {
        self.graph.get(x).map_or(&[], Vec::as_slice)
    }
}

impl<S: VertexSet> PathGraph for IncidencePathGraph<S> {
    fn degree(&self, x: usize) -> usize {
        self.graph.get(x).map_or(0, Vec::len)
    }

    fn remove(&mut self, x: usize, cycles: &mut Vec<Vec<usize>>) {
        let Some(slot) = self.graph.get_mut(x) else {
            return;
        };
        let edges = std::mem::take(slot);
        for i in 0..edges.len() {
            for j in i + 1..edges.len() {
                let (e, f) = (&edges[i], &edges[j]);
                if !e.disjoint(f) {
                    continue;
                }
                let reduced = e.reduce(f, x);
                if reduced.is_loop() {
                    if reduced.len() >= 3 && reduced.len() <= self.limit {
                        cycles.push(reduced.path);
                    }
                } else if reduced.len() < self.limit {
                    self.add(reduced);
                }
            }
        }
    }
}
