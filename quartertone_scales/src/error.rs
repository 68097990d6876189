// Error types for catalog construction and queries.
//
// `CatalogError` can only come out of `ScaleCatalog::build()` and means the
// reference tables and the generator disagree; there is no partial catalog
// to fall back to. `ScaleError` covers everything a query can report.
// Malformed search tokens are not errors at all: they are dropped during
// parsing (see `query.rs`).

use crate::scale::IntervalVector;
use thiserror::Error;

/// Failure to construct the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("average of {first} and {second} is {steps}, which is not a generated scale")]
    UnmatchedAverage {
        first: &'static str,
        second: &'static str,
        steps: IntervalVector,
    },
}

/// Failure to answer a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("unknown scale name '{0}'")]
    NotFound(String),
    #[error("index {index} out of range (catalog has {len} scales)")]
    OutOfRange { index: String, len: usize },
    #[error("mode class {0} has no label")]
    UnrecognizedModeClass(u32),
    #[error("rotation {0} is missing from the catalog")]
    MissingRotation(IntervalVector),
}
