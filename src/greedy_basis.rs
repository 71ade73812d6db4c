//! A growing set of cycles tested for linear independence over GF(2).

use bit_set::BitSet;

use crate::{bit_matrix::BitMatrix, initial_cycles::Cycle};

/// Cycles accepted so far plus the union of their edges and the rank of
/// their span. Members are only ever appended.
#[derive(Debug, Clone)]
pub struct GreedyBasis {
    members: Vec<Cycle>,
    edges_of_basis: BitSet,
    capacity: usize,
    rank: usize,
}

impl GreedyBasis {
    /// A basis expected to hold `capacity` cycles over `n_edges` edges.
    pub fn new(capacity: usize, n_edges: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            edges_of_basis: BitSet::with_capacity(n_edges),
            capacity,
            rank: 0,
        }
    }

    pub fn members(&self) -> &[Cycle] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Dimension of the space spanned by the members. Equals [`len`] unless
    /// dependent cycles were added.
    ///
    /// [`len`]: GreedyBasis::len
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether the expected number of cycles has been reached.
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    pub fn add(&mut self, cycle: Cycle) {
        if self.is_independent(&cycle) {
            self.rank += 1;
        }
        self.edges_of_basis.union_with(cycle.edge_vector());
        self.members.push(cycle);
    }

    pub fn add_all(&mut self, cycles: impl IntoIterator<Item = Cycle>) {
        for cycle in cycles {
            self.add(cycle);
        }
    }

    /// Whether every edge of `cycle` is already used by some member.
    fn covers_edges(&self, cycle: &Cycle) -> bool {
        cycle.edge_vector().is_subset(&self.edges_of_basis)
    }

    /// Whether `cycle` cannot be written as a sum of current members.
    pub fn is_independent(&self, cycle: &Cycle) -> bool {
        if self.members.is_empty() || !self.covers_edges(cycle) {
            return true;
        }
        let mut matrix = BitMatrix::from_cycles_with(&self.members, cycle);
        matrix.eliminate() > self.rank
    }

    /// Whether `cycle` lies in the span of the current members.
    pub fn is_subset_of_basis(&self, cycle: &Cycle) -> bool {
        !self.is_independent(cycle)
    }
}
