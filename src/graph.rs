//! Adjacency-list helpers shared by the ring perception algorithms.
//!
//! A graph is a plain `&[Vec<usize>]`: `graph[v]` lists the neighbors of `v`
//! and every edge appears in both endpoint lists. Edges are numbered in order
//! of first discovery when scanning vertices in order and only counting
//! neighbors with a larger index.

use std::collections::HashMap;

use bit_set::BitSet;
use petgraph::unionfind::UnionFind;

use crate::error::{Error, Result};

/// An unordered pair of vertices. `Edge::new(u, v) == Edge::new(v, u)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    u: usize,
    v: usize,
}

impl Edge {
    pub fn new(u: usize, v: usize) -> Self {
        Self {
            u: u.min(v),
            v: u.max(v),
        }
    }

    /// Return the endpoint with the smaller index.
    pub fn either(&self) -> usize {
        self.u
    }

    /// Return the endpoint opposite `x`.
    pub fn other(&self, x: usize) -> usize {
        if x == self.u {
            self.v
        } else {
            self.u
        }
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.u, self.v)
    }
}

/// Stable numbering of the edges of a graph.
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    edges: Vec<Edge>,
    index: HashMap<Edge, usize>,
}

impl EdgeTable {
    pub fn new(graph: &[Vec<usize>]) -> Self {
        let mut table = Self::default();
        for (u, adj) in graph.iter().enumerate() {
            for &v in adj {
                if v > u {
                    let edge = Edge::new(u, v);
                    if !table.index.contains_key(&edge) {
                        table.index.insert(edge, table.edges.len());
                        table.edges.push(edge);
                    }
                }
            }
        }
        table
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge(&self, i: usize) -> Option<Edge> {
        self.edges.get(i).copied()
    }

    pub fn index_of(&self, u: usize, v: usize) -> Option<usize> {
        self.index.get(&Edge::new(u, v)).copied()
    }

    /// Convert a closed walk into the set of edge indices it uses. Vertex
    /// pairs that are not edges of the graph are skipped.
    pub fn to_edge_vector(&self, path: &[usize]) -> BitSet {
        let mut edges = BitSet::with_capacity(self.len());
        for pair in path.windows(2) {
            if let Some(e) = self.index_of(pair[0], pair[1]) {
                edges.insert(e);
            }
        }
        edges
    }

    /// Turn a set of edge indices forming one simple cycle back into a closed
    /// vertex path, starting from the lowest vertex. Returns `None` if the
    /// edges are not a single simple cycle.
    pub fn to_path(&self, edge_vector: &BitSet) -> Option<Vec<usize>> {
        let mut incident: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut n_edges = 0;
        for e in edge_vector.iter() {
            let (u, v) = self.edge(e)?.endpoints();
            incident.entry(u).or_default().push(v);
            incident.entry(v).or_default().push(u);
            n_edges += 1;
        }
        if n_edges < 3 || incident.values().any(|adj| adj.len() != 2) {
            return None;
        }

        let start = *incident.keys().min()?;
        let mut path = vec![start];
        let mut prev = start;
        let mut curr = incident[&start][0].min(incident[&start][1]);
        while curr != start {
            path.push(curr);
            let adj = &incident[&curr];
            let next = if adj[0] == prev { adj[1] } else { adj[0] };
            prev = curr;
            curr = next;
        }
        path.push(start);

        // a shorter closed walk means the edges split into several cycles
        (path.len() - 1 == n_edges).then_some(path)
    }
}

/// Fail if `v` is not a vertex of `graph`.
pub(crate) fn check_vertex(graph: &[Vec<usize>], v: usize) -> Result<()> {
    if v < graph.len() {
        Ok(())
    } else {
        Err(Error::VertexOutOfRange {
            vertex: v,
            order: graph.len(),
        })
    }
}

/// Rank vertices by ascending degree, ties broken by vertex index.
/// `rank[v]` is the position of `v` in that order.
pub fn rank(graph: &[Vec<usize>]) -> Vec<usize> {
    let max_degree = graph.iter().map(Vec::len).max().unwrap_or(0);
    let mut count = vec![0usize; max_degree + 2];
    for adj in graph {
        count[adj.len() + 1] += 1;
    }
    for d in 1..count.len() {
        count[d] += count[d - 1];
    }

    let mut rank = vec![0; graph.len()];
    for (v, adj) in graph.iter().enumerate() {
        rank[v] = count[adj.len()];
        count[adj.len()] += 1;
    }
    rank
}

/// Invert a rank: the vertices listed from lowest to highest rank.
pub fn vertices_in_order(rank: &[usize]) -> Vec<usize> {
    let mut vertices = vec![0; rank.len()];
    for (v, &r) in rank.iter().enumerate() {
        vertices[r] = v;
    }
    vertices
}

/// Number of connected components, isolated vertices included.
pub fn number_of_components(graph: &[Vec<usize>]) -> usize {
    let mut components = UnionFind::<usize>::new(graph.len());
    let mut n = graph.len();
    for (u, adj) in graph.iter().enumerate() {
        for &v in adj {
            if v < graph.len() && components.union(u, v) {
                n -= 1;
            }
        }
    }
    n
}

/// Number of independent cycles, `|E| - |V| + components`.
pub fn circuit_rank(graph: &[Vec<usize>]) -> usize {
    let edges = EdgeTable::new(graph).len();
    (edges + number_of_components(graph)).saturating_sub(graph.len())
}

/// Induced subgraph on `vertices`. Vertex `i` of the result is
/// `vertices[i]` of the parent graph.
pub fn subgraph(graph: &[Vec<usize>], vertices: &[usize]) -> Vec<Vec<usize>> {
    let mut mapping = vec![usize::MAX; graph.len()];
    for (i, &v) in vertices.iter().enumerate() {
        mapping[v] = i;
    }
    vertices
        .iter()
        .map(|&v| {
            graph[v]
                .iter()
                .filter_map(|&w| (mapping[w] != usize::MAX).then_some(mapping[w]))
                .collect()
        })
        .collect()
}

/// Map a path in a [`subgraph`] back onto the parent graph's vertices.
pub fn lift(path: &[usize], vertices: &[usize]) -> Vec<usize> {
    path.iter().map(|&i| vertices[i]).collect()
}

/// Walk the single simple cycle spanned by `vertices`, every one of which has
/// exactly two neighbors inside the set. The walk starts at `vertices[0]`.
pub fn cycle(graph: &[Vec<usize>], vertices: &[usize]) -> Vec<usize> {
    let Some(&start) = vertices.first() else {
        return Vec::new();
    };
    let mut member = BitSet::with_capacity(graph.len());
    member.extend(vertices.iter().copied());

    let mut path = vec![start];
    let mut prev = start;
    let mut curr = start;
    loop {
        let next = graph[curr]
            .iter()
            .copied()
            .find(|&w| member.contains(w) && w != prev);
        match next {
            Some(w) if w == start => {
                path.push(start);
                return path;
            }
            Some(w) if path.len() <= vertices.len() => {
                path.push(w);
                prev = curr;
                curr = w;
            }
            _ => return Vec::new(),
        }
    }
}
