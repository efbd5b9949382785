// src/error.rs

//! Error type shared by geometry construction and the lattice queries.

use thiserror::Error;

/// Errors raised while building a [`Geometry`](crate::Geometry) or querying it.
///
/// None of these are transient: every variant is surfaced to the caller
/// immediately and no partial result accompanies it.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing lattice, basis, shift or region specification,
    /// or linearly dependent lattice vectors.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A coordinate system tag other than `lattice` or `cartesian`.
    #[error("invalid coordinate system type '{0}'")]
    CoordinateSystem(String),

    /// The lattice point enumeration would visit more candidates than allowed.
    #[error("lattice point enumeration too large: {candidates} candidates requested, max {limit} allowed")]
    Resource { candidates: u128, limit: u64 },

    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to read settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config(details.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
