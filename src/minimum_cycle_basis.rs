//! A minimum cycle basis, the smallest set of smallest rings.

use tracing::debug;

use crate::{
    graph::circuit_rank,
    greedy_basis::GreedyBasis,
    initial_cycles::{Cycle, InitialCycles},
};

/// One minimum-weight cycle basis. Candidates are tried shortest first and
/// kept when independent of those already kept; equal-length ties go to the
/// candidate discovered first.
#[derive(Debug, Clone)]
pub struct MinimumCycleBasis {
    basis: GreedyBasis,
}

impl MinimumCycleBasis {
    pub fn new(graph: &[Vec<usize>]) -> Self {
        Self::from_initial(&InitialCycles::new(graph))
    }

    /// Build the basis from precomputed candidates. A length-limited
    /// candidate set may leave the basis short of the circuit rank.
    pub fn from_initial(initial: &InitialCycles) -> Self {
        let expected = circuit_rank(initial.graph());
        let mut basis = GreedyBasis::new(expected, initial.number_of_edges());
        for cycle in initial.cycles() {
            if basis.is_full() {
                break;
            }
            if basis.is_independent(cycle) {
                basis.add(cycle.clone());
            }
        }
        debug!(expected, found = basis.len(), "minimum cycle basis");
        Self { basis }
    }

    /// The basis cycles, shortest first.
    pub fn members(&self) -> &[Cycle] {
        self.basis.members()
    }

    /// Closed vertex paths of the basis cycles. The vectors are fresh copies.
    pub fn paths(&self) -> Vec<Vec<usize>> {
        self.basis.members().iter().map(|c| c.path().to_vec()).collect()
    }

    pub fn len(&self) -> usize {
        self.basis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{anthracene, bicyclo_octane, complete, from_edges, naphthalene, norbornane, ring};

    fn lengths(mcb: &MinimumCycleBasis) -> Vec<usize> {
        mcb.members().iter().map(Cycle::length).collect()
    }

    #[test]
    fn naphthalene_has_two_six_rings() {
        let mcb = MinimumCycleBasis::new(&naphthalene());
        assert_eq!(lengths(&mcb), vec![6, 6]);
        for path in mcb.paths() {
            assert_eq!(path.first(), path.last());
        }
    }

    #[test]
    fn fused_and_bridged() {
        assert_eq!(MinimumCycleBasis::new(&anthracene()).len(), 3);
        assert_eq!(lengths(&MinimumCycleBasis::new(&norbornane())), vec![5, 5]);
        assert_eq!(lengths(&MinimumCycleBasis::new(&bicyclo_octane())), vec![6, 6]);
    }

    #[test]
    fn complete_graph_is_all_triangles() {
        let mcb = MinimumCycleBasis::new(&complete(4));
        assert_eq!(lengths(&mcb), vec![3, 3, 3]);
    }

    #[test]
    fn one_ring_per_component() {
        let graph = from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        assert_eq!(MinimumCycleBasis::new(&graph).len(), 2);
    }

    #[test]
    fn acyclic_graph_has_empty_basis() {
        let graph = from_edges(3, &[(0, 1), (1, 2)]);
        assert!(MinimumCycleBasis::new(&graph).is_empty());
    }

    #[test]
    fn paths_are_copies() {
        let mcb = MinimumCycleBasis::new(&ring(6));
        let mut paths = mcb.paths();
        paths[0][0] = 99;
        paths.clear();
        assert_eq!(mcb.paths().len(), 1);
        assert_ne!(mcb.paths()[0][0], 99);
    }
}
