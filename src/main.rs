use std::{io, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use ring_perception::{
    all_cycles::AllCycles,
    cycles::{CycleFinder, Finder},
    loader,
    molecule::Molecule,
};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum FinderArg {
    All,
    Mcb,
    Relevant,
    Essential,
    TripletShort,
    EdgeShort,
    VertexShort,
    AllOrVertexShort,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Format {
    Text,
    Csv,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Molfile or SD file to read.
    path: PathBuf,

    #[arg(short, long, default_value = "mcb")]
    finder: FinderArg,

    /// Longest ring to report, in bonds. Defaults to the atom count.
    #[arg(short, long)]
    length: Option<usize>,

    /// Path graph degree at which exhaustive enumeration gives up.
    #[arg(long, default_value_t = AllCycles::DEFAULT_THRESHOLD)]
    threshold: usize,

    /// Also assign the double bonds of a Kekulé structure to aromatic atoms.
    #[arg(short, long)]
    kekule: bool,

    #[arg(long, default_value = "text")]
    format: Format,
}

impl Cli {
    fn finder(&self) -> Finder {
        let all = Finder::All {
            threshold: self.threshold,
        };
        match self.finder {
            FinderArg::All => all,
            FinderArg::Mcb => Finder::MinimumCycleBasis,
            FinderArg::Relevant => Finder::Relevant,
            FinderArg::Essential => Finder::Essential,
            FinderArg::TripletShort => Finder::TripletShort,
            FinderArg::EdgeShort => Finder::EdgeShort,
            FinderArg::VertexShort => Finder::VertexShort,
            FinderArg::AllOrVertexShort => all.or(Finder::VertexShort),
        }
    }
}

/// Everything printed for one record.
struct Report {
    rings: Vec<Vec<usize>>,
    completed: bool,
    kekule: Option<Option<Vec<(usize, usize)>>>,
}

fn analyze(molecule: &Molecule, finder: &Finder, length: Option<usize>, kekule: bool) -> Result<Report> {
    if molecule.is_malformed() {
        bail!("molecule has self-loops or doubled edges");
    }
    let adjacency = molecule.adjacency();
    let length = length.unwrap_or(adjacency.len()).min(adjacency.len());
    let cycles = finder.find(&adjacency, length)?;

    let kekule = if kekule {
        let bonds = molecule.kekule_bonds(&molecule.aromatic_atoms())?;
        Some(bonds.map(|bonds| {
            bonds
                .into_iter()
                .filter_map(|ix| molecule.graph().edge_endpoints(ix))
                .map(|(u, v)| (u.index(), v.index()))
                .collect()
        }))
    } else {
        None
    };

    Ok(Report {
        rings: cycles.paths(),
        completed: cycles.completed(),
        kekule,
    })
}

fn atoms(path: &[usize]) -> String {
    path.iter().map(usize::to_string).collect::<Vec<_>>().join(" ")
}

fn print_text(reports: &[Report]) {
    for (record, report) in reports.iter().enumerate() {
        let note = if report.completed { "" } else { " (incomplete)" };
        println!("record {}: {} rings{note}", record + 1, report.rings.len());
        for ring in &report.rings {
            println!("  {}: {}", ring.len().saturating_sub(1), atoms(ring));
        }
        match &report.kekule {
            Some(Some(bonds)) => {
                let pairs: Vec<_> = bonds.iter().map(|(u, v)| format!("{u}={v}")).collect();
                println!("  kekule: {}", pairs.join(" "));
            }
            Some(None) => println!("  kekule: none"),
            None => {}
        }
    }
}

fn print_csv(reports: &[Report]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["record", "ring", "size", "atoms", "completed"])?;
    for (record, report) in reports.iter().enumerate() {
        for (i, ring) in report.rings.iter().enumerate() {
            writer.write_record([
                (record + 1).to_string(),
                (i + 1).to_string(),
                ring.len().saturating_sub(1).to_string(),
                atoms(ring),
                report.completed.to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ring_perception=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let molecules = loader::parse(&cli.path).with_context(|| format!("failed to read {}", cli.path.display()))?;
    if molecules.is_empty() {
        bail!("no molecules in {}", cli.path.display());
    }

    let finder = cli.finder();
    let reports = molecules
        .par_iter()
        .enumerate()
        .map(|(i, molecule)| {
            analyze(molecule, &finder, cli.length, cli.kekule).with_context(|| format!("record {}", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    match cli.format {
        Format::Text => print_text(&reports),
        Format::Csv => print_csv(&reports)?,
    }
    Ok(())
}
