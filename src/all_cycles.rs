//! Every simple cycle of a graph.

use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    graph::{rank, vertices_in_order},
    path_graph::{JumboPathGraph, PathGraph, RegularPathGraph},
};

/// All simple cycles found by eliminating the vertices of a path graph in
/// degree order.
///
/// The number of cycles can grow exponentially. Enumeration stops as soon as
/// a vertex about to be removed has more path edges than the threshold; the
/// cycles found so far are kept and [`AllCycles::completed`] reports false.
#[derive(Debug, Clone)]
pub struct AllCycles {
    paths: Vec<Vec<usize>>,
    completed: bool,
}

impl AllCycles {
    /// Path graph degree at which enumeration gives up.
    pub const DEFAULT_THRESHOLD: usize = 684;

    /// Cycles of at most `max_cycle_size` edges, giving up once a path
    /// graph vertex has more than `threshold` path edges.
    pub fn new(graph: &[Vec<usize>], max_cycle_size: usize, threshold: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(Error::InvalidThreshold);
        }
        if max_cycle_size > graph.len() {
            return Err(Error::InvalidLimit {
                limit: max_cycle_size,
                order: graph.len(),
            });
        }
        Ok(Self::compute(graph, max_cycle_size, threshold))
    }

    /// Cycles of any length. Never gives up, however many paths build up.
    pub fn unlimited(graph: &[Vec<usize>]) -> Self {
        Self::compute(graph, graph.len(), usize::MAX)
    }

    fn compute(graph: &[Vec<usize>], max_cycle_size: usize, threshold: usize) -> Self {
        let rank = rank(graph);
        let order = vertices_in_order(&rank);
        let (paths, completed) = if graph.len() < 64 {
            eliminate(RegularPathGraph::new(graph, &rank, max_cycle_size), &order, threshold)
        } else {
            eliminate(JumboPathGraph::new(graph, &rank, max_cycle_size), &order, threshold)
        };
        debug!(cycles = paths.len(), completed, "all cycles");
        Self { paths, completed }
    }

    /// Closed vertex paths in the order they were found.
    pub fn paths(&self) -> Vec<Vec<usize>> {
        self.paths.clone()
    }

    pub fn count(&self) -> usize {
        self.paths.len()
    }

    /// False if enumeration stopped early; `count` is then a lower bound.
    pub fn completed(&self) -> bool {
        self.completed
    }
}

fn eliminate<G: PathGraph>(mut pg: G, order: &[usize], threshold: usize) -> (Vec<Vec<usize>>, bool) {
    let mut cycles = Vec::new();
    for &v in order {
        let degree = pg.degree(v);
        if degree > threshold {
            warn!(vertex = v, degree, threshold, found = cycles.len(), "too many paths, cycle enumeration stopped");
            return (cycles, false);
        }
        pg.remove(v, &mut cycles);
    }
    (cycles, true)
}
