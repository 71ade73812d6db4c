//! Gaussian elimination over GF(2) on cycle edge vectors.
//!
//! Each row is a [`BitSet`] whose bits are edge indices. Rows are never moved
//! in memory: `order` maps a logical position to the storage slot a row was
//! added into, so swapping two positions is O(1) and a row keeps the index it
//! was added with.

use std::fmt::{self, Display};

use bit_set::BitSet;

use crate::initial_cycles::Cycle;

#[derive(Debug, Clone, Default)]
pub struct BitMatrix {
    columns: usize,
    rows: Vec<BitSet>,
    /// logical position -> storage slot
    order: Vec<usize>,
    /// storage slot -> logical position
    position: Vec<usize>,
    rank: Option<usize>,
}

impl BitMatrix {
    /// An empty matrix whose rows have `columns` significant bits.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// One row per cycle edge vector, in cycle order.
    pub fn from_cycles<'a>(cycles: impl IntoIterator<Item = &'a Cycle>) -> Self {
        let rows: Vec<BitSet> = cycles.into_iter().map(|c| c.edge_vector().clone()).collect();
        let columns = rows
            .iter()
            .filter_map(|row| row.iter().last())
            .max()
            .map_or(0, |bit| bit + 1);
        let mut matrix = Self::new(columns);
        for row in rows {
            matrix.add(row);
        }
        matrix
    }

    /// Like [`BitMatrix::from_cycles`] with `extra` appended as the last row.
    pub fn from_cycles_with<'a>(cycles: impl IntoIterator<Item = &'a Cycle>, extra: &Cycle) -> Self {
        let mut matrix = Self::from_cycles(cycles);
        if let Some(bit) = extra.edge_vector().iter().last() {
            matrix.columns = matrix.columns.max(bit + 1);
        }
        matrix.add(extra.edge_vector().clone());
        matrix
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Append a row; it keeps index `self.len()` (before the call) for
    /// [`BitMatrix::eliminated`].
    pub fn add(&mut self, row: BitSet) {
        let slot = self.rows.len();
        self.rows.push(row);
        self.order.push(slot);
        self.position.push(slot);
        self.rank = None;
    }

    /// The row currently at logical position `i`.
    pub fn row(&self, i: usize) -> &BitSet {
        &self.rows[self.order[i]]
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
        self.position[self.order[i]] = i;
        self.position[self.order[j]] = j;
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.order.clear();
        self.position.clear();
        self.rank = None;
    }

    /// Logical position of the first row at or after position `from` with
    /// `column` set.
    pub fn index_of(&self, column: usize, from: usize) -> Option<usize> {
        (from..self.len()).find(|&i| self.row(i).contains(column))
    }

    /// The sum of two rows over GF(2), leaving both untouched.
    pub fn xor(u: &BitSet, v: &BitSet) -> BitSet {
        let mut w = u.clone();
        w.symmetric_difference_with(v);
        w
    }

    /// Reduce the matrix to row echelon form and return its rank. Rows that
    /// end up below the rank (zero, duplicate or otherwise dependent on
    /// earlier rows) are flagged as eliminated.
    pub fn eliminate(&mut self) -> usize {
        let (mut x, mut y) = (0, 0);
        while x < self.columns && y < self.len() {
            let Some(i) = self.index_of(x, y) else {
                x += 1;
                continue;
            };
            if i != y {
                self.swap(i, y);
            }
            let pivot = self.rows[self.order[y]].clone();
            for j in y + 1..self.len() {
                let slot = self.order[j];
                if self.rows[slot].contains(x) {
                    self.rows[slot].symmetric_difference_with(&pivot);
                }
            }
            x += 1;
            y += 1;
        }
        self.rank = Some(y);
        y
    }

    /// Whether the row added as the `j`th was found dependent by the last
    /// call to [`BitMatrix::eliminate`].
    pub fn eliminated(&self, j: usize) -> bool {
        match (self.rank, self.position.get(j)) {
            (Some(rank), Some(&p)) => p >= rank,
            _ => false,
        }
    }
}

impl Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            let row = self.row(i);
            for x in 0..self.columns {
                write!(f, "{}", if row.contains(x) { '1' } else { '0' })?;
            }
            writeln!(f, " {}", self.order[i])?;
        }
        Ok(())
    }
}
