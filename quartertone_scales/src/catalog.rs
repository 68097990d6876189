// The scale catalog: every generated scale, its names, and the squares.
//
// Built once by `ScaleCatalog::build()` and immutable afterwards; all query
// methods (see `query.rs`) take `&self`, so a built catalog can be shared
// freely across threads.
//
// Naming. Every unordered pair of reference modes (a mode with itself
// included) is averaged step by step, rounding down, and the average is
// looked up in the catalog. Pairs are visited with the outer index running
// from the last reference mode down to the first and the inner index from
// the outer index down to the first. Each visit:
// - pushes "<inner>-<outer>" onto the front of the entry's pairing list,
// - overwrites the canonical name: the mode's own name for a self-pair,
//   otherwise "<inner>-<outer>".
// The last visit wins, so the traversal order decides canonical names and
// must be kept as is. Entries nobody visits stay "?".

use crate::error::{CatalogError, ScaleError};
use crate::generate::generate_interval_vectors;
use crate::reference::{self, REFERENCE_MODES};
use crate::scale::{DEGREES, IntervalVector, PitchPositions};
use crate::square::{Square, detect_squares};
use serde::Serialize;
use std::collections::BTreeMap;

/// Canonical name of an entry no reference pairing lands on.
pub const UNNAMED: &str = "?";

/// One scale of the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Position in generation order.
    pub index: usize,
    pub steps: IntervalVector,
    pub positions: PitchPositions,
    /// Canonical name, `UNNAMED` if no pairing matched.
    pub name: String,
    /// Hyphenated pairing names ("Average of"), most recently assigned first.
    pub pairings: Vec<String>,
    /// Historical or cross-cultural names from the fixed table.
    pub historical_names: &'static [&'static str],
}

impl CatalogEntry {
    pub fn deviations(&self) -> [i32; DEGREES] {
        self.positions.deviations()
    }

    pub fn brightness(&self) -> i32 {
        self.positions.brightness()
    }

    pub fn is_named(&self) -> bool {
        self.name != UNNAMED
    }

    /// File name stem used for rendered output: "<index> - <name>".
    pub fn file_stem(&self) -> String {
        format!("{} - {}", self.index, self.name)
    }

    /// True if `token` (already lowercased) names this entry.
    pub(crate) fn answers_to(&self, token: &str) -> bool {
        self.name.to_lowercase() == token
            || self.pairings.iter().any(|p| p.to_lowercase() == token)
            || self
                .historical_names
                .iter()
                .any(|h| h.to_lowercase() == token)
    }
}

/// The immutable catalog of generated scales and their squares.
#[derive(Clone, Debug)]
pub struct ScaleCatalog {
    entries: Vec<CatalogEntry>,
    squares: Vec<Square>,
    by_steps: BTreeMap<IntervalVector, usize>,
    by_positions: BTreeMap<PitchPositions, usize>,
}

impl ScaleCatalog {
    /// Generate, name, and square the whole catalog.
    pub fn build() -> Result<Self, CatalogError> {
        let vectors = generate_interval_vectors();

        let mut entries: Vec<CatalogEntry> = vectors
            .iter()
            .enumerate()
            .map(|(index, &steps)| CatalogEntry {
                index,
                steps,
                positions: steps.positions(),
                name: UNNAMED.to_string(),
                pairings: Vec::new(),
                historical_names: reference::historical_names(index),
            })
            .collect();

        let by_steps: BTreeMap<IntervalVector, usize> =
            entries.iter().map(|e| (e.steps, e.index)).collect();
        let by_positions: BTreeMap<PitchPositions, usize> =
            entries.iter().map(|e| (e.positions, e.index)).collect();

        assign_names(&mut entries, &by_steps)?;
        let squares = detect_squares(&vectors);

        tracing::debug!(
            scales = entries.len(),
            named = entries.iter().filter(|e| e.is_named()).count(),
            squares = squares.len(),
            "built scale catalog"
        );

        Ok(ScaleCatalog {
            entries,
            squares,
            by_steps,
            by_positions,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in index order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Like `entry`, but reports an out-of-range index as an error.
    pub fn get(&self, index: usize) -> Result<&CatalogEntry, ScaleError> {
        match self.entries.get(index) {
            Some(entry) => Ok(entry),
            None => Err(ScaleError::OutOfRange {
                index: index.to_string(),
                len: self.entries.len(),
            }),
        }
    }

    /// Every square in discovery order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn index_of_steps(&self, steps: &IntervalVector) -> Option<usize> {
        self.by_steps.get(steps).copied()
    }

    pub fn index_of_positions(&self, positions: &PitchPositions) -> Option<usize> {
        self.by_positions.get(positions).copied()
    }
}

fn assign_names(
    entries: &mut [CatalogEntry],
    by_steps: &BTreeMap<IntervalVector, usize>,
) -> Result<(), CatalogError> {
    for outer in (0..REFERENCE_MODES.len()).rev() {
        for inner in (0..=outer).rev() {
            let first = &REFERENCE_MODES[outer];
            let second = &REFERENCE_MODES[inner];
            let steps = first.steps.average(second.steps);
            let unmatched = CatalogError::UnmatchedAverage {
                first: first.name,
                second: second.name,
                steps,
            };
            let index = *by_steps.get(&steps).ok_or(unmatched)?;

            let pairing = format!("{}-{}", second.name, first.name);
            let entry = &mut entries[index];
            entry.name = if outer == inner {
                first.name.to_string()
            } else {
                pairing.clone()
            };
            entry.pairings.insert(0, pairing);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ScaleCatalog {
        ScaleCatalog::build().unwrap()
    }

    #[test]
    fn every_reference_mode_keeps_its_name() {
        let catalog = catalog();
        for mode in &REFERENCE_MODES {
            let index = catalog.index_of_steps(&mode.steps).unwrap();
            assert_eq!(catalog.entries()[index].name, mode.name);
        }
    }

    #[test]
    fn well_known_indices() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 161);
        assert_eq!(catalog.entries()[125].name, "Ionian");
        assert_eq!(catalog.entries()[123].name, "Mixolydian");
        assert_eq!(catalog.entries()[80].name, "Aeolian");
        assert_eq!(catalog.entries()[147].name, "Lydian");
        assert_eq!(catalog.entries()[125].historical_names, &["Major"]);
    }

    #[test]
    fn pairing_names_put_lower_table_index_first() {
        let catalog = catalog();
        let rast = &catalog.entries()[98];
        assert_eq!(rast.steps.steps(), [4, 3, 3, 4, 4, 3, 3]);
        assert_eq!(rast.name, "Ionian-Dorian");
        assert_eq!(
            rast.pairings,
            ["Ionian-Dorian", "Mixolydian-Bocrian", "Storian-Aeolynian"]
        );
        assert_eq!(catalog.entries()[5].name, "Pyptian-Thydian");
    }

    #[test]
    fn self_pairs_are_listed_as_pairings() {
        let catalog = catalog();
        assert_eq!(catalog.entries()[125].pairings, ["Ionian-Ionian"]);
        assert_eq!(catalog.entries()[6].name, "Ionadian");
    }

    #[test]
    fn every_entry_is_named() {
        assert!(catalog().entries().iter().all(CatalogEntry::is_named));
    }

    #[test]
    fn major_has_zero_brightness() {
        let catalog = catalog();
        let major = &catalog.entries()[125];
        assert_eq!(major.brightness(), 0);
        assert_eq!(major.file_stem(), "125 - Ionian");
    }

    #[test]
    fn entries_serialize_to_json() {
        let catalog = catalog();
        let json = serde_json::to_value(&catalog.entries()[125]).unwrap();
        assert_eq!(json["name"], "Ionian");
        assert_eq!(json["steps"], serde_json::json!([4, 4, 2, 4, 4, 4, 2]));
        assert_eq!(
            json["positions"],
            serde_json::json!([0, 4, 8, 10, 14, 18, 22])
        );
        assert_eq!(json["historical_names"], serde_json::json!(["Major"]));
    }

    #[test]
    fn get_reports_out_of_range() {
        let catalog = catalog();
        assert!(catalog.get(160).is_ok());
        assert_eq!(
            catalog.get(161),
            Err(ScaleError::OutOfRange {
                index: "161".to_string(),
                len: 161
            })
        );
    }
}
