use pyo3::{exceptions::PyValueError, prelude::*};

use crate::{
    cycles::{CycleFinder, Finder},
    error::Error,
    loader::parse_molfile_str,
};

impl From<Error> for PyErr {
    fn from(err: Error) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Rings of a molfile as lists of atom indices, the first atom repeated last.
/// `finder` is one of `all`, `mcb`, `relevant`, `essential`, `triplet-short`,
/// `edge-short`, `vertex-short` or `all-or-vertex-short`.
#[pyfunction]
#[pyo3(signature = (mol_block, finder = "mcb", length = None))]
fn rings(mol_block: &str, finder: &str, length: Option<usize>) -> PyResult<Vec<Vec<usize>>> {
    let finder: Finder = finder
        .parse()
        .map_err(|_| PyValueError::new_err(format!("unknown cycle finder {finder:?}")))?;
    let mol = parse_molfile_str(mol_block)?;
    if mol.is_malformed() {
        return Err(PyValueError::new_err("molecule has self-loops or doubled edges"));
    }
    let adjacency = mol.adjacency();
    let cycles = finder.find(&adjacency, length.unwrap_or(adjacency.len()))?;
    Ok(cycles.paths())
}

/// Atom index pairs of the double bonds of one Kekulé structure over the
/// aromatic atoms, or `None` when there is none.
#[pyfunction]
fn kekule(mol_block: &str) -> PyResult<Option<Vec<(usize, usize)>>> {
    let mol = parse_molfile_str(mol_block)?;
    let bonds = mol.kekule_bonds(&mol.aromatic_atoms())?;
    Ok(bonds.map(|bonds| {
        bonds
            .into_iter()
            .filter_map(|ix| mol.graph().edge_endpoints(ix))
            .map(|(u, v)| (u.index(), v.index()))
            .collect()
    }))
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn ring_perception(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rings, m)?)?;
    m.add_function(wrap_pyfunction!(kekule, m)?)?;
    Ok(())
}
