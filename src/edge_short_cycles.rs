//! The shortest cycle through each edge (or vertex) of a graph.

use bit_set::BitSet;
use tracing::debug;

use crate::initial_cycles::InitialCycles;

/// For every edge the shortest cycle passing through it, ties going to the
/// cycle discovered first. A cycle shared by several edges is kept once.
#[derive(Debug, Clone)]
pub struct EdgeShortCycles {
    paths: Vec<Vec<usize>>,
}

impl EdgeShortCycles {
    pub fn new(graph: &[Vec<usize>]) -> Self {
        Self::from_initial(&InitialCycles::new(graph))
    }

    pub fn from_initial(initial: &InitialCycles) -> Self {
        let mut covered = BitSet::with_capacity(initial.number_of_edges());
        let mut paths = Vec::new();
        for cycle in initial.cycles() {
            for path in cycle.family() {
                let edges = initial.to_edge_vector(&path);
                if !edges.is_subset(&covered) {
                    covered.union_with(&edges);
                    paths.push(path);
                }
            }
        }
        debug!(edges = initial.number_of_edges(), found = paths.len(), "edge short cycles");
        Self { paths }
    }

    pub fn paths(&self) -> Vec<Vec<usize>> {
        self.paths.clone()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// For every cyclic vertex the shortest cycle passing through it.
#[derive(Debug, Clone)]
pub struct VertexShortCycles {
    paths: Vec<Vec<usize>>,
}

impl VertexShortCycles {
    pub fn new(graph: &[Vec<usize>]) -> Self {
        Self::from_initial(&InitialCycles::new(graph))
    }

    pub fn from_initial(initial: &InitialCycles) -> Self {
        let mut covered = BitSet::with_capacity(initial.graph().len());
        let mut paths = Vec::new();
        for cycle in initial.cycles() {
            for path in cycle.family() {
                let vertices: BitSet = path.iter().copied().collect();
                if !vertices.is_subset(&covered) {
                    covered.union_with(&vertices);
                    paths.push(path);
                }
            }
        }
        debug!(found = paths.len(), "vertex short cycles");
        Self { paths }
    }

    pub fn paths(&self) -> Vec<Vec<usize>> {
        self.paths.clone()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
