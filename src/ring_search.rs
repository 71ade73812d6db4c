//! Cyclic vertex and edge perception from biconnected components.
//!
//! A biconnected component with at least three edges is a ring system. It is
//! *isolated* when it has as many edges as vertices (a single simple cycle)
//! and *fused* when it has more. Bridges form one-edge components and are
//! never cyclic. A spiro vertex belongs to two ring systems.

use bit_set::BitSet;
use tracing::debug;

use crate::graph::EdgeTable;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct RingSearch {
    edges: EdgeTable,
    cyclic: BitSet,
    cyclic_edges: BitSet,
    isolated: Vec<Vec<usize>>,
    fused: Vec<Vec<usize>>,
}

impl RingSearch {
    pub fn new(graph: &[Vec<usize>]) -> Self {
        let edges = EdgeTable::new(graph);
        let mut search = Self {
            cyclic: BitSet::with_capacity(graph.len()),
            cyclic_edges: BitSet::with_capacity(edges.len()),
            edges,
            isolated: Vec::new(),
            fused: Vec::new(),
        };
        for component in biconnected_components(graph) {
            search.add_component(component);
        }
        debug!(
            cyclic = search.cyclic.len(),
            isolated = search.isolated.len(),
            fused = search.fused.len(),
            "ring search"
        );
        search
    }

    fn add_component(&mut self, component: Vec<(usize, usize)>) {
        let mut vertices = BitSet::new();
        let mut indices = BitSet::with_capacity(self.edges.len());
        for &(u, v) in &component {
            vertices.insert(u);
            vertices.insert(v);
            if let Some(e) = self.edges.index_of(u, v) {
                indices.insert(e);
            }
        }
        let n_edges = indices.len();
        if n_edges < 3 {
            return;
        }
        self.cyclic.union_with(&vertices);
        self.cyclic_edges.union_with(&indices);
        let members: Vec<usize> = vertices.iter().collect();
        if n_edges == members.len() {
            self.isolated.push(members);
        } else {
            self.fused.push(members);
        }
    }

    /// Every vertex on some cycle, ascending.
    pub fn cyclic(&self) -> Vec<usize> {
        self.cyclic.iter().collect()
    }

    pub fn cyclic_vertex(&self, v: usize) -> bool {
        self.cyclic.contains(v)
    }

    pub fn cyclic_edge(&self, u: usize, v: usize) -> bool {
        self.edges
            .index_of(u, v)
            .is_some_and(|e| self.cyclic_edges.contains(e))
    }

    /// Vertex sets of the ring systems that are a single cycle.
    pub fn isolated(&self) -> Vec<Vec<usize>> {
        self.isolated.clone()
    }

    /// Vertex sets of the ring systems with more than one cycle.
    pub fn fused(&self) -> Vec<Vec<usize>> {
        self.fused.clone()
    }

    pub fn num_ring_systems(&self) -> usize {
        self.isolated.len() + self.fused.len()
    }
}

/// Edge lists of the biconnected components, found with an iterative
/// Hopcroft-Tarjan search.
pub fn biconnected_components(graph: &[Vec<usize>]) -> Vec<Vec<(usize, usize)>> {
    let n = graph.len();
    let mut disc = vec![NIL; n];
    let mut low = vec![0; n];
    let mut time = 0;
    let mut edge_stack: Vec<(usize, usize)> = Vec::new();
    let mut components = Vec::new();
    // (vertex, parent, next neighbor)
    let mut frames: Vec<(usize, usize, usize)> = Vec::new();

    for root in 0..n {
        if disc[root] != NIL {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;
        frames.push((root, NIL, 0));

        while let Some(frame) = frames.last_mut() {
            let (v, parent, next) = *frame;
            if let Some(&w) = graph[v].get(next) {
                frame.2 += 1;
                if w >= n || w == parent {
                    continue;
                }
                if disc[w] == NIL {
                    edge_stack.push((v, w));
                    disc[w] = time;
                    low[w] = time;
                    time += 1;
                    frames.push((w, v, 0));
                } else if disc[w] < disc[v] {
                    edge_stack.push((v, w));
                    low[v] = low[v].min(disc[w]);
                }
                continue;
            }

            frames.pop();
            if parent == NIL {
                continue;
            }
            low[parent] = low[parent].min(low[v]);
            if low[v] >= disc[parent] {
                let mut component = Vec::new();
                while let Some(edge) = edge_stack.pop() {
                    component.push(edge);
                    if edge == (parent, v) {
                        break;
                    }
                }
                components.push(component);
            }
        }
    }
    components
}
