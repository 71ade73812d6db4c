//! Error type shared by every ring perception and matching routine.
//!
//! Only invalid construction arguments and caller logic errors are reported
//! through [`Error`]. Disconnected targets, cycle limits and repeated path
//! graph removals are ordinary return values.

use thiserror::Error;

/// Errors raised by the constructors and queries of this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A vertex index does not exist in a graph with `order` vertices.
    #[error("vertex {vertex} is not in a graph with {order} vertices")]
    VertexOutOfRange { vertex: usize, order: usize },

    /// A cycle length limit was outside `[0, order]`.
    #[error("cycle length limit {limit} is outside [0, {order}]")]
    InvalidLimit { limit: usize, order: usize },

    /// A path graph degree threshold of zero would abort before any work.
    #[error("path graph threshold must be positive")]
    InvalidThreshold,

    /// [`Matching::other`](crate::matching::Matching::other) was asked for the
    /// partner of an unmatched vertex.
    #[error("vertex {0} is not matched")]
    Unmatched(usize),

    /// A matching and a graph were sized for different vertex counts.
    #[error("graph has {graph} vertices but the matching has capacity {matching}")]
    CapacityMismatch { graph: usize, matching: usize },

    /// A molfile record could not be read.
    #[error("molfile line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
