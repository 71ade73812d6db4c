//! Triplet short cycles: a minimum cycle basis assembled from normalised
//! representatives.
//!
//! Every candidate stands in for its family by one closed path in
//! [`lexicographic`] normal form. In canonical mode the representative is the
//! smallest normal form in the family, and equal-length representatives are
//! offered to the basis in ascending lexicographic order. The chosen rings
//! then follow from the vertex labels alone, not from the order the
//! candidates happened to be discovered in. A relabelled graph yields a basis
//! of the same size, but not necessarily the same rings.

use std::cmp::Ordering;

use tracing::debug;

use crate::{
    graph::circuit_rank,
    greedy_basis::GreedyBasis,
    initial_cycles::{lexicographic, Cycle, InitialCycles},
};

#[derive(Debug, Clone)]
pub struct TripletShortCycles {
    basis: GreedyBasis,
    canonical: bool,
}

impl TripletShortCycles {
    pub fn new(graph: &[Vec<usize>], canonical: bool) -> Self {
        Self::from_initial(&InitialCycles::new(graph), canonical)
    }

    /// Fill a basis up to the circuit rank with one representative per
    /// candidate. Without `canonical` the representative is the candidate's
    /// own path, normalised, and ties go to the candidate found first.
    pub fn from_initial(initial: &InitialCycles, canonical: bool) -> Self {
        let mut candidates: Vec<Cycle> = initial
            .cycles()
            .map(|cycle| {
                let path = if canonical { smallest_of_family(cycle) } else { lexicographic(cycle.path()) };
                let edges = initial.to_edge_vector(&path);
                Cycle::new(path, edges)
            })
            .collect();
        if canonical {
            candidates.sort_by(by_length_then_path);
        }

        let expected = circuit_rank(initial.graph());
        let mut basis = GreedyBasis::new(expected, initial.number_of_edges());
        for cycle in candidates {
            if basis.is_full() {
                break;
            }
            if basis.is_independent(&cycle) {
                basis.add(cycle);
            }
        }

        debug!(expected, found = basis.len(), canonical, "triplet short cycles");
        Self { basis, canonical }
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical
    }

    pub fn members(&self) -> &[Cycle] {
        self.basis.members()
    }

    /// Closed vertex paths in normal form, shortest first.
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

fn smallest_of_family(cycle: &Cycle) -> Vec<usize> {
    cycle
        .family()
        .iter()
        .map(|path| lexicographic(path))
        .min()
        .unwrap_or_else(|| lexicographic(cycle.path()))
}

fn by_length_then_path(a: &Cycle, b: &Cycle) -> Ordering {
    a.length().cmp(&b.length()).then_with(|| a.path().cmp(b.path()))
}
