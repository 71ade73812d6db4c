//! Read MDL V2000 molfiles and SD files into [`Molecule`]s.

use std::{fs, path::Path};

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::{
    error::{Error, Result},
    molecule::{Atom, Bond, MGraph, Molecule},
};

/// Read every record of a molfile or SD file.
pub fn parse(p: &Path) -> Result<Vec<Molecule>> {
    let contents = fs::read_to_string(p)?;
    let molecules = parse_sdfile_str(&contents)?;
    debug!(path = %p.display(), records = molecules.len(), "loaded");
    Ok(molecules)
}

/// Read a single molfile.
pub fn parse_molfile_str(input: &str) -> Result<Molecule> {
    let lines: Vec<&str> = input.lines().collect();
    let end = lines.iter().position(|l| l.trim_end() == "M  END").unwrap_or(lines.len());
    parse_one_molecule(&lines[..end], 0).map(Molecule::from_graph)
}

/// Read the records of an SD file, separated by `$$$$` lines. Data items
/// after a record's `M  END` are skipped.
pub fn parse_sdfile_str(input: &str) -> Result<Vec<Molecule>> {
    let mut molecules = Vec::new();
    let mut curr: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut done = false;

    for (i, line) in input.lines().enumerate() {
        match line.trim_end() {
            "$$$$" => {
                if !done && curr.iter().any(|l| !l.trim().is_empty()) {
                    molecules.push(Molecule::from_graph(parse_one_molecule(&curr, start)?));
                }
                curr.clear();
                start = i + 1;
                done = false;
            }
            "M  END" if !done => {
                molecules.push(Molecule::from_graph(parse_one_molecule(&curr, start)?));
                done = true;
            }
            _ if !done => curr.push(line),
            _ => {}
        }
    }
    if !done && curr.iter().any(|l| !l.trim().is_empty()) {
        molecules.push(Molecule::from_graph(parse_one_molecule(&curr, start)?));
    }
    Ok(molecules)
}

/// Parse the header, counts, atom and bond blocks of one record. `offset` is
/// the zero-based line number of the record's first line in its file.
fn parse_one_molecule(mol_data: &[&str], offset: usize) -> Result<MGraph> {
    let err = |line: usize, reason: &str| Error::Parse {
        line: offset + line + 1,
        reason: reason.to_string(),
    };

    let counts = mol_data.get(3).ok_or_else(|| err(mol_data.len(), "missing counts line"))?;
    let (num_atoms, num_bonds) = parse_counts_line(counts).ok_or_else(|| err(3, "bad counts line"))?;

    let atom_start = 4;
    let bond_start = atom_start + num_atoms;
    let bond_end = bond_start + num_bonds;
    if mol_data.len() < bond_end {
        return Err(err(mol_data.len(), "record ends before its bond block"));
    }

    let mut mol_graph = MGraph::with_capacity(num_atoms, num_bonds);
    let mut atom_node_ids = Vec::with_capacity(num_atoms);
    for (i, atom_line) in mol_data[atom_start..bond_start].iter().enumerate() {
        let symbol = parse_atom_line(atom_line).ok_or_else(|| err(atom_start + i, "bad atom line"))?;
        atom_node_ids.push(mol_graph.add_node(Atom::new(symbol)));
    }

    for (i, bond_line) in mol_data[bond_start..bond_end].iter().enumerate() {
        let line = bond_start + i;
        let (atom_one, atom_two, bond_type) = parse_bond_line(bond_line).ok_or_else(|| err(line, "bad bond line"))?;
        let node = |atom: usize| -> Result<NodeIndex<u32>> {
            atom.checked_sub(1)
                .and_then(|ix| atom_node_ids.get(ix).copied())
                .ok_or_else(|| err(line, "bond to a missing atom"))
        };
        let bond = Bond::try_from(bond_type).map_err(|_| err(line, "unsupported bond type"))?;
        mol_graph.add_edge(node(atom_one)?, node(atom_two)?, bond);
    }
    Ok(mol_graph)
}

fn parse_counts_line(counts_line: &str) -> Option<(usize, usize)> {
    Some((
        counts_line.get(0..3)?.trim().parse().ok()?,
        counts_line.get(3..6)?.trim().parse().ok()?,
    ))
}

fn parse_atom_line(atom_line: &str) -> Option<&str> {
    atom_line.split_whitespace().nth(3)
}

fn parse_bond_line(bond_line: &str) -> Option<(usize, usize, usize)> {
    Some((
        bond_line.get(0..3)?.trim().parse().ok()?,
        bond_line.get(3..6)?.trim().parse().ok()?,
        bond_line.get(6..9)?.trim().parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYCLOPROPANOL: &str = "cyclopropanol
  hand-written

  4  4  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    0.5000    0.8660    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    0.5000    1.8660    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  2  3  1  0
  3  1  1  0
  3  4  1  0
M  END
";

    #[test]
    fn molfile() {
        let mol = parse_molfile_str(CYCLOPROPANOL).unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.bond_count(), 4);
        assert_eq!(mol.graph().node_weights().last().map(Atom::symbol), Some("O"));
    }

    #[test]
    fn sdfile_records() {
        let sd = format!("{CYCLOPROPANOL}> <NAME>\ncyclopropanol\n\n$$$$\n{CYCLOPROPANOL}$$$$\n");
        let molecules = parse_sdfile_str(&sd).unwrap();
        assert_eq!(molecules.len(), 2);
        assert!(molecules.iter().all(|m| m.bond_count() == 4));
    }

    #[test]
    fn truncated_record() {
        let cut: String = CYCLOPROPANOL.lines().take(7).map(|l| format!("{l}\n")).collect();
        assert!(matches!(parse_molfile_str(&cut), Err(Error::Parse { .. })));
    }

    #[test]
    fn bad_bond_type() {
        let bad = CYCLOPROPANOL.replace("  3  4  1  0", "  3  4  9  0");
        match parse_molfile_str(&bad) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 12),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }
}
