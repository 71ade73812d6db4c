//! Essential cycles: the cycles shared by every minimum cycle basis.

use tracing::debug;

use crate::{
    graph::circuit_rank,
    greedy_basis::GreedyBasis,
    initial_cycles::{Cycle, InitialCycles},
    relevant_cycles::RelevantCycles,
};

#[derive(Debug, Clone)]
pub struct EssentialCycles {
    essential: Vec<Cycle>,
}

impl EssentialCycles {
    pub fn new(graph: &[Vec<usize>]) -> Self {
        let initial = InitialCycles::new(graph);
        let relevant = RelevantCycles::from_initial(&initial);
        Self::from_relevant(&relevant, &initial)
    }

    /// A minimum basis member is essential when the other relevant cycles
    /// of at most its length cannot produce it.
    pub fn from_relevant(relevant: &RelevantCycles, initial: &InitialCycles) -> Self {
        let cycles: Vec<Cycle> = relevant
            .paths()
            .into_iter()
            .map(|path| {
                let edges = initial.to_edge_vector(&path);
                Cycle::new(path, edges)
            })
            .collect();

        let expected = circuit_rank(initial.graph());
        let mut basis = GreedyBasis::new(expected, initial.number_of_edges());
        let mut members = Vec::with_capacity(expected);
        for (i, cycle) in cycles.iter().enumerate() {
            if basis.is_full() {
                break;
            }
            if basis.is_independent(cycle) {
                basis.add(cycle.clone());
                members.push(i);
            }
        }

        let mut essential = Vec::new();
        for &i in &members {
            let candidate = &cycles[i];
            if is_essential(candidate, i, &cycles, &basis, initial.number_of_edges()) {
                essential.push(candidate.clone());
            }
        }
        debug!(relevant = cycles.len(), essential = essential.len(), "essential cycles");
        Self { essential }
    }

    pub fn members(&self) -> &[Cycle] {
        &self.essential
    }

    pub fn paths(&self) -> Vec<Vec<usize>> {
        self.essential.iter().map(|c| c.path().to_vec()).collect()
    }

    pub fn len(&self) -> usize {
        self.essential.len()
    }

    pub fn is_empty(&self) -> bool {
        self.essential.is_empty()
    }
}

/// Whether `candidate` (the `index`th relevant cycle) is outside the span of
/// the shorter basis members together with the other relevant cycles of the
/// same length.
fn is_essential(candidate: &Cycle, index: usize, relevant: &[Cycle], basis: &GreedyBasis, n_edges: usize) -> bool {
    let length = candidate.length();
    let shorter = basis.members().iter().filter(|c| c.length() < length);
    let siblings = relevant
        .iter()
        .enumerate()
        .filter(|&(j, c)| j != index && c.length() == length)
        .map(|(_, c)| c);

    let mut alternatives = GreedyBasis::new(0, n_edges);
    alternatives.add_all(shorter.chain(siblings).cloned());
    alternatives.is_independent(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::tests::{anthracene, bicyclo_octane, cube, naphthalene, norbornane, ring},
        minimum_cycle_basis::MinimumCycleBasis,
    };

    #[test]
    fn both_naphthalene_rings_are_essential() {
        let essential = EssentialCycles::new(&naphthalene());
        assert_eq!(essential.len(), 2);
        assert!(essential.paths().iter().all(|p| p.len() == 7));
    }

    #[test]
    fn bicyclo_octane_has_none() {
        assert!(EssentialCycles::new(&bicyclo_octane()).is_empty());
    }

    #[test]
    fn cube_has_none() {
        assert!(EssentialCycles::new(&cube()).is_empty());
    }

    #[test]
    fn norbornane_five_rings() {
        let essential = EssentialCycles::new(&norbornane());
        assert_eq!(essential.len(), 2);
        assert!(essential.members().iter().all(|c| c.length() == 5));
    }

    #[test]
    fn subset_law() {
        for graph in [naphthalene(), anthracene(), bicyclo_octane(), norbornane(), cube(), ring(7)] {
            let essential = EssentialCycles::new(&graph).len();
            let mcb = MinimumCycleBasis::new(&graph).len();
            let relevant = RelevantCycles::new(&graph).len();
            assert!(essential <= mcb && mcb <= relevant);
        }
    }
}
