// Errors
pub mod error;

// Adjacency-list helpers
pub mod graph;

// Shortest paths and GF(2) linear algebra
pub mod bit_matrix;
pub mod greedy_basis;
pub mod shortest_paths;

// Cycle sets built on Vismara's initial cycles
pub mod edge_short_cycles;
pub mod essential_cycles;
pub mod initial_cycles;
pub mod minimum_cycle_basis;
pub mod relevant_cycles;
pub mod triplet_short_cycles;

// Exhaustive enumeration
pub mod all_cycles;
pub mod path_graph;

// Matchings
pub mod edmonds;
pub mod matching;

// Ring systems and fragments
pub mod ring_search;
pub mod spanning_tree;

// One entry point for every cycle set
pub mod cycles;

// Molecule definition
pub mod molecule;

// Data IO
pub mod loader;

// Python library
#[cfg(feature = "python")]
pub mod python;

pub use cycles::{CycleFinder, Cycles, Finder};
pub use error::{Error, Result};
