//! Relevant cycles: every cycle that belongs to at least one minimum cycle
//! basis.

use tracing::debug;

use crate::{
    greedy_basis::GreedyBasis,
    initial_cycles::{Cycle, InitialCycles},
};

#[derive(Debug, Clone)]
pub struct RelevantCycles {
    basis: GreedyBasis,
}

impl RelevantCycles {
    pub fn new(graph: &[Vec<usize>]) -> Self {
        Self::from_initial(&InitialCycles::new(graph))
    }

    /// Keep every candidate that is independent of the strictly shorter
    /// cycles already kept. Candidates of one length are tested together
    /// before any of them joins the basis, so equal-length siblings never
    /// exclude each other.
    pub fn from_initial(initial: &InitialCycles) -> Self {
        let mut basis = GreedyBasis::new(initial.number_of_cycles(), initial.number_of_edges());
        for length in initial.lengths() {
            let relevant: Vec<Cycle> = initial
                .cycles_of_length(length)
                .iter()
                .filter(|cycle| basis.is_independent(cycle))
                .cloned()
                .collect();
            basis.add_all(relevant);
        }
        debug!(prototypes = basis.len(), "relevant cycles");
        Self { basis }
    }

    /// The kept candidates, each standing for its whole family.
    pub fn prototypes(&self) -> &[Cycle] {
        self.basis.members()
    }

    /// Every relevant cycle as a closed vertex path, families expanded,
    /// shortest first.
    pub fn paths(&self) -> Vec<Vec<usize>> {
        let mut paths = Vec::with_capacity(self.len());
        for cycle in self.basis.members() {
            paths.extend(cycle.family());
        }
        paths
    }

    /// Number of relevant cycles, counting every member of each family.
    pub fn len(&self) -> usize {
        self.basis
            .members()
            .iter()
            .fold(0usize, |n, c| n.saturating_add(c.size_of_family()))
    }

    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{anthracene, bicyclo_octane, complete, cube, from_edges, naphthalene, ring};

    #[test]
    fn naphthalene_has_no_extra_relevant_cycles() {
        let relevant = RelevantCycles::new(&naphthalene());
        assert_eq!(relevant.len(), 2);
        assert!(relevant.paths().iter().all(|p| p.len() == 7));
    }

    #[test]
    fn bicyclo_octane_has_three() {
        let relevant = RelevantCycles::new(&bicyclo_octane());
        assert_eq!(relevant.len(), 3);
        assert_eq!(relevant.paths().len(), 3);
    }

    #[test]
    fn linear_acene() {
        assert_eq!(RelevantCycles::new(&anthracene()).len(), 3);
    }

    #[test]
    fn every_triangle_of_k4() {
        assert_eq!(RelevantCycles::new(&complete(4)).len(), 4);
    }

    #[test]
    fn cube_faces() {
        let relevant = RelevantCycles::new(&cube());
        assert_eq!(relevant.len(), 6);
        assert!(relevant.paths().iter().all(|p| p.len() == 5));
    }

    #[test]
    fn acyclic() {
        assert!(RelevantCycles::new(&from_edges(2, &[(0, 1)])).is_empty());
        assert_eq!(RelevantCycles::new(&ring(3)).len(), 1);
    }
}
