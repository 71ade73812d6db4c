//! Graph-theoretic representation of a molecule.
//!
//! A [`Molecule`] is a petgraph graph of atoms and bonds. The ring perception
//! and matching routines never see it directly: they work on the plain
//! adjacency list returned by [`Molecule::adjacency`], whose vertex `i` is
//! node `i` of the molecule graph, and their results are mapped back onto
//! node and edge indices here.

use std::{collections::HashSet, fmt::Display};

use bit_set::BitSet;
use petgraph::{
    dot::Dot,
    graph::{EdgeIndex, Graph, NodeIndex},
    Undirected,
};

use crate::{
    cycles::{CycleFinder, Cycles},
    error::Result,
    matching::Matching,
};

pub(crate) type Index = u32;
pub type MGraph = Graph<Atom, Bond, Undirected, Index>;

/// The nodes of a [`Molecule`] graph, identified by their element symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom {
    symbol: String,
}

impl Atom {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// The edges of a [`Molecule`] graph, with `.mol` bond type codes 1 to 4.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bond {
    Single,
    Double,
    Triple,
    Aromatic,
}

/// Thrown by [`Bond::try_from`] when given anything other than 1, 2, 3 or 4.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseBondError;

impl TryFrom<usize> for Bond {
    type Error = ParseBondError;
    fn try_from(value: usize) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Bond::Single),
            2 => Ok(Bond::Double),
            3 => Ok(Bond::Triple),
            4 => Ok(Bond::Aromatic),
            _ => Err(ParseBondError),
        }
    }
}

/// A simple, loopless graph with [`Atom`]s as nodes and [`Bond`]s as edges.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    graph: MGraph,
}

impl Molecule {
    pub fn from_graph(g: MGraph) -> Self {
        Self { graph: g }
    }

    pub fn graph(&self) -> &MGraph {
        &self.graph
    }

    /// Return a pretty-printable representation of this molecule.
    pub fn info(&self) -> String {
        let dot = Dot::new(&self.graph);
        format!("{dot:?}")
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` iff this molecule contains self-loops or multiple edges
    /// between any pair of nodes.
    pub fn is_malformed(&self) -> bool {
        let mut uniq = HashSet::new();
        !self.graph.edge_indices().all(|ix| {
            self.graph.edge_endpoints(ix).is_some_and(|(src, dst)| {
                src != dst && uniq.insert((src.min(dst), src.max(dst)))
            })
        })
    }

    /// Neighbors of every atom by node index, in petgraph's edge order.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for ix in self.graph.edge_indices() {
            if let Some((u, v)) = self.graph.edge_endpoints(ix) {
                adjacency[u.index()].push(v.index());
                adjacency[v.index()].push(u.index());
            }
        }
        adjacency
    }

    /// Run a cycle finder over every ring size this molecule can hold.
    pub fn rings(&self, finder: &impl CycleFinder) -> Result<Cycles> {
        finder.find(&self.adjacency(), self.atom_count())
    }

    /// The bonds of cycle `i` of `cycles`, in path order.
    pub fn ring_bonds(&self, cycles: &Cycles, i: usize) -> Vec<EdgeIndex<Index>> {
        cycles
            .edges(i)
            .into_iter()
            .filter_map(|(u, v)| self.bond_between(u, v))
            .collect()
    }

    /// Atoms incident to at least one aromatic bond.
    pub fn aromatic_atoms(&self) -> BitSet {
        let mut atoms = BitSet::with_capacity(self.atom_count());
        for ix in self.graph.edge_indices() {
            if self.graph.edge_weight(ix) == Some(&Bond::Aromatic) {
                if let Some((u, v)) = self.graph.edge_endpoints(ix) {
                    atoms.insert(u.index());
                    atoms.insert(v.index());
                }
            }
        }
        atoms
    }

    /// Bonds forming a perfect matching of the atoms in `subset`, i.e. the
    /// double bonds of one Kekulé structure, or `None` if there is none.
    pub fn kekule_bonds(&self, subset: &BitSet) -> Result<Option<Vec<EdgeIndex<Index>>>> {
        let adjacency = self.adjacency();
        let mut matching = Matching::with_capacity(adjacency.len());
        if !matching.perfect(&adjacency, subset)? {
            return Ok(None);
        }
        Ok(matching.pairs().map(|(u, v)| self.bond_between(u, v)).collect())
    }

    fn bond_between(&self, u: usize, v: usize) -> Option<EdgeIndex<Index>> {
        self.graph
            .find_edge(NodeIndex::new(u), NodeIndex::new(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::Finder;

    fn benzene(bond: Bond) -> Molecule {
        let mut g = MGraph::default();
        let atoms: Vec<_> = (0..6).map(|_| g.add_node(Atom::new("C"))).collect();
        for i in 0..6 {
            g.add_edge(atoms[i], atoms[(i + 1) % 6], bond);
        }
        Molecule::from_graph(g)
    }

    #[test]
    fn bond_from_code() {
        assert_eq!(Bond::try_from(4), Ok(Bond::Aromatic));
        assert!(Bond::try_from(7).is_err());
    }

    #[test]
    fn adjacency_is_symmetric() {
        let mol = benzene(Bond::Single);
        let adjacency = mol.adjacency();
        for (u, adj) in adjacency.iter().enumerate() {
            assert_eq!(adj.len(), 2);
            for &v in adj {
                assert!(adjacency[v].contains(&u));
            }
        }
    }

    #[test]
    fn malformed_multigraph() {
        let mut g = MGraph::default();
        let a = g.add_node(Atom::new("C"));
        let b = g.add_node(Atom::new("O"));
        g.add_edge(a, b, Bond::Single);
        assert!(!Molecule::from_graph(g.clone()).is_malformed());
        g.add_edge(b, a, Bond::Double);
        assert!(Molecule::from_graph(g).is_malformed());
    }

    #[test]
    fn benzene_ring_bonds() {
        let mol = benzene(Bond::Aromatic);
        let rings = mol.rings(&Finder::MinimumCycleBasis).unwrap();
        assert_eq!(rings.number_of_cycles(), 1);
        assert_eq!(mol.ring_bonds(&rings, 0).len(), 6);
    }

    #[test]
    fn benzene_kekule() {
        let mol = benzene(Bond::Aromatic);
        let subset = mol.aromatic_atoms();
        assert_eq!(subset.len(), 6);
        let doubles = mol.kekule_bonds(&subset).unwrap().unwrap();
        assert_eq!(doubles.len(), 3);
        let atoms: BitSet = doubles
            .iter()
            .filter_map(|&ix| mol.graph().edge_endpoints(ix))
            .flat_map(|(u, v)| [u.index(), v.index()])
            .collect();
        assert_eq!(atoms, subset);
    }

    #[test]
    fn kekule_over_part_of_a_molecule() {
        // only the four carbons of the ring; the fifth atom stays unmatched
        let mut g = MGraph::default();
        let atoms: Vec<_> = (0..5).map(|_| g.add_node(Atom::new("C"))).collect();
        for i in 0..5 {
            g.add_edge(atoms[i], atoms[(i + 1) % 5], Bond::Single);
        }
        let mol = Molecule::from_graph(g);
        let subset: BitSet = (1..5).collect();
        let doubles = mol.kekule_bonds(&subset).unwrap().unwrap();
        assert_eq!(doubles.len(), 2);
        assert!(doubles
            .iter()
            .filter_map(|&ix| mol.graph().edge_endpoints(ix))
            .all(|(u, v)| u.index() != 0 && v.index() != 0));
    }

    #[test]
    fn no_kekule_for_odd_rings() {
        let mut g = MGraph::default();
        let atoms: Vec<_> = (0..5).map(|_| g.add_node(Atom::new("C"))).collect();
        for i in 0..5 {
            g.add_edge(atoms[i], atoms[(i + 1) % 5], Bond::Aromatic);
        }
        let mol = Molecule::from_graph(g);
        assert_eq!(mol.kekule_bonds(&mol.aromatic_atoms()).unwrap(), None);
    }
}
