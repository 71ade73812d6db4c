//! One entry point for every cycle set, run one ring system at a time.
//!
//! [`RingSearch`] splits the graph into ring systems first. An isolated
//! ring is its own answer for every finder; a fused system is cut out as a
//! subgraph, handed to the selected algorithm and its cycles are mapped back
//! onto the caller's vertex indices.

use std::str::FromStr;

use tracing::debug;

use crate::{
    all_cycles::AllCycles,
    edge_short_cycles::{EdgeShortCycles, VertexShortCycles},
    error::{Error, Result},
    essential_cycles::EssentialCycles,
    graph::{cycle, lift, subgraph},
    initial_cycles::InitialCycles,
    minimum_cycle_basis::MinimumCycleBasis,
    relevant_cycles::RelevantCycles,
    ring_search::RingSearch,
    triplet_short_cycles::TripletShortCycles,
};

/// Something that finds a set of cycles of at most `length` edges.
pub trait CycleFinder {
    fn find(&self, graph: &[Vec<usize>], length: usize) -> Result<Cycles>;
}

/// The cycle sets this crate knows how to compute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finder {
    /// Every simple cycle; incomplete if a path graph vertex exceeds
    /// `threshold` path edges.
    All { threshold: usize },
    MinimumCycleBasis,
    Relevant,
    Essential,
    /// A minimum cycle basis of canonical representatives.
    TripletShort,
    EdgeShort,
    VertexShort,
    /// Use the first finder, falling back to the second for any ring system
    /// where the first did not complete.
    Or(Box<Finder>, Box<Finder>),
}

impl Finder {
    pub fn all() -> Self {
        Finder::All {
            threshold: AllCycles::DEFAULT_THRESHOLD,
        }
    }

    pub fn or(self, fallback: Finder) -> Self {
        Finder::Or(Box::new(self), Box::new(fallback))
    }

    /// All cycles where tractable, otherwise the vertex short cycles.
    pub fn all_or_vertex_short() -> Self {
        Finder::all().or(Finder::VertexShort)
    }

    /// Cycles of one biconnected ring system with more than one cycle.
    fn find_in_system(&self, system: &[Vec<usize>], length: usize) -> Result<(Vec<Vec<usize>>, bool)> {
        let found = match self {
            Finder::All { threshold } => {
                let all = AllCycles::new(system, length, *threshold)?;
                return Ok((all.paths(), all.completed()));
            }
            Finder::Or(primary, fallback) => {
                let (paths, completed) = primary.find_in_system(system, length)?;
                if completed {
                    return Ok((paths, completed));
                }
                return fallback.find_in_system(system, length);
            }
            _ => {
                let initial = InitialCycles::of_biconnected_component(system, length)?;
                match self {
                    Finder::MinimumCycleBasis => MinimumCycleBasis::from_initial(&initial).paths(),
                    Finder::Relevant => RelevantCycles::from_initial(&initial).paths(),
                    Finder::Essential => {
                        EssentialCycles::from_relevant(&RelevantCycles::from_initial(&initial), &initial).paths()
                    }
                    Finder::TripletShort => TripletShortCycles::from_initial(&initial, true).paths(),
                    Finder::EdgeShort => EdgeShortCycles::from_initial(&initial).paths(),
                    _ => VertexShortCycles::from_initial(&initial).paths(),
                }
            }
        };
        Ok((found, true))
    }
}

/// Thrown by [`Finder::from_str`] for an unknown finder name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseFinderError;

impl FromStr for Finder {
    type Err = ParseFinderError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(Finder::all()),
            "mcb" => Ok(Finder::MinimumCycleBasis),
            "relevant" => Ok(Finder::Relevant),
            "essential" => Ok(Finder::Essential),
            "triplet-short" => Ok(Finder::TripletShort),
            "edge-short" => Ok(Finder::EdgeShort),
            "vertex-short" => Ok(Finder::VertexShort),
            "all-or-vertex-short" => Ok(Finder::all_or_vertex_short()),
            _ => Err(ParseFinderError),
        }
    }
}

impl CycleFinder for Finder {
    fn find(&self, graph: &[Vec<usize>], length: usize) -> Result<Cycles> {
        if length > graph.len() {
            return Err(Error::InvalidLimit {
                limit: length,
                order: graph.len(),
            });
        }

        let search = RingSearch::new(graph);
        let mut systems: Vec<(Vec<usize>, bool)> = search
            .isolated()
            .into_iter()
            .map(|ring| (ring, true))
            .chain(search.fused().into_iter().map(|system| (system, false)))
            .collect();
        systems.sort_by_key(|(vertices, _)| vertices.first().copied());

        let mut cycles = Cycles {
            paths: Vec::new(),
            completed: true,
        };
        for (vertices, isolated) in systems {
            if isolated {
                if vertices.len() <= length {
                    cycles.paths.push(cycle(graph, &vertices));
                }
                continue;
            }
            let system = subgraph(graph, &vertices);
            let (paths, completed) = self.find_in_system(&system, length.min(vertices.len()))?;
            cycles.paths.extend(paths.iter().map(|path| lift(path, &vertices)));
            cycles.completed &= completed;
        }
        debug!(finder = ?self, cycles = cycles.paths.len(), completed = cycles.completed, "cycles found");
        Ok(cycles)
    }
}

/// The cycles found by a [`CycleFinder`], as closed vertex paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycles {
    paths: Vec<Vec<usize>>,
    completed: bool,
}

impl Cycles {
    /// A copy of every cycle path.
    pub fn paths(&self) -> Vec<Vec<usize>> {
        self.paths.clone()
    }

    pub fn number_of_cycles(&self) -> usize {
        self.paths.len()
    }

    /// False when some ring system could only be partially enumerated.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// The edges of cycle `i` as vertex pairs in path order.
    pub fn edges(&self, i: usize) -> Vec<(usize, usize)> {
        self.paths
            .get(i)
            .map(|path| path.windows(2).map(|w| (w[0], w[1])).collect())
            .unwrap_or_default()
    }
}
