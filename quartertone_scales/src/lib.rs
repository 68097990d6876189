// Quarter-tone scale catalog.
//
// Models every seven-note scale reachable by taking four quarter tones out of
// seven whole steps (24 quarter tones per octave), names them against a table
// of known heptatonic modes, and answers analytical queries over the result.
//
// Architecture:
// - scale.rs: `IntervalVector` / `PitchPositions` value types, deviation and
//   brightness against the major reference
// - generate.rs: enumeration of interval vectors (fixes catalog indices)
// - reference.rs: reference modes, historical names, mode-class labels
// - catalog.rs: `ScaleCatalog` construction and the pairwise-average naming
// - square.rs: square detection between half/whole-step scales
// - classify.rs: rotation-invariant mode classes
// - query.rs: resolution, degree search, square membership, alterations
// - spelling.rs: note names of a scale played on C
// - error.rs: `CatalogError` and `ScaleError`
//
// The catalog is built once and never mutated; every query is a pure read.

pub mod catalog;
pub mod classify;
pub mod error;
pub mod generate;
pub mod query;
pub mod reference;
pub mod scale;
pub mod spelling;
pub mod square;

pub use catalog::{CatalogEntry, ScaleCatalog};
pub use classify::ModeClass;
pub use error::{CatalogError, ScaleError};
pub use query::{
    Alteration, AlterationKind, DegreeConstraint, ModeReport, RotationSummary, parse_search_tokens,
};
pub use scale::{DEGREES, IntervalVector, MAJOR_POSITIONS, OCTAVE, PitchPositions, SOLFEGE};
pub use square::Square;
