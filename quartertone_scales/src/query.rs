// Queries over a built catalog.
//
// - `resolve`: a token is a catalog index or a name (canonical, pairing, or
//   historical; case-insensitive, first match in index order wins).
// - `classify_modes`: mode class plus the seven rotations as catalog entries.
// - `search_by_degrees`: entries whose deviations from major match every
//   given degree constraint. Constraints come from tokens such as `mi-1`,
//   `fa+2` or `so`; tokens that don't parse are dropped.
// - `squares_containing`: squares the scale lies on.
// - `alterations_of`: catalog scales one single-degree shift away.

use crate::catalog::{CatalogEntry, ScaleCatalog};
use crate::classify::{self, ModeClass};
use crate::error::ScaleError;
use crate::scale::{DEGREES, IntervalVector, PitchPositions, SOLFEGE};
use crate::square::Square;
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Degree constraints
// ---------------------------------------------------------------------------

/// A required deviation from major at one degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DegreeConstraint {
    pub degree: usize,
    pub deviation: i32,
}

impl DegreeConstraint {
    /// Parse a token like `mi-1`: a solfège syllable followed by an optional
    /// signed accidental in quarter tones (default 0).
    pub fn parse(token: &str) -> Option<Self> {
        let syllable = token.get(..2)?;
        let degree = SOLFEGE.iter().position(|&s| s == syllable)?;
        let accidental = &token[2..];
        let deviation = if accidental.is_empty() {
            0
        } else {
            accidental.parse().ok()?
        };
        Some(DegreeConstraint { degree, deviation })
    }

    pub fn matches(&self, deviations: &[i32; DEGREES]) -> bool {
        deviations[self.degree] == self.deviation
    }
}

impl fmt::Display for DegreeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}", SOLFEGE[self.degree], self.deviation)
    }
}

/// Parse search tokens, dropping any that are malformed.
pub fn parse_search_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Vec<DegreeConstraint> {
    tokens
        .into_iter()
        .filter_map(|token| {
            let parsed = DegreeConstraint::parse(token);
            if parsed.is_none() {
                tracing::debug!(token, "ignoring malformed search token");
            }
            parsed
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Alterations
// ---------------------------------------------------------------------------

/// A single-degree shift, named by direction and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AlterationKind {
    /// Down a half step (2 quarter tones).
    Lower,
    /// Down a quarter tone.
    HalfLower,
    /// Up a quarter tone.
    HalfRaise,
    /// Up a half step.
    Raise,
}

impl AlterationKind {
    /// Search order: largest downward shift first.
    pub const ALL: [AlterationKind; 4] = [
        AlterationKind::Lower,
        AlterationKind::HalfLower,
        AlterationKind::HalfRaise,
        AlterationKind::Raise,
    ];

    pub fn quarter_tones(self) -> i32 {
        match self {
            AlterationKind::Lower => -2,
            AlterationKind::HalfLower => -1,
            AlterationKind::HalfRaise => 1,
            AlterationKind::Raise => 2,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            AlterationKind::Lower => "Lower",
            AlterationKind::HalfLower => "Half-lower",
            AlterationKind::HalfRaise => "Half-raise",
            AlterationKind::Raise => "Raise",
        }
    }
}

/// A catalog scale reachable by shifting one degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Alteration {
    pub kind: AlterationKind,
    /// Zero-based degree that moved.
    pub degree: usize,
    /// Catalog index of the result.
    pub index: usize,
}

/// Shift one degree by `shift` quarter tones. Shifting the root moves every
/// other degree the opposite way and keeps the root at 0.
pub fn alter_positions(positions: &PitchPositions, degree: usize, shift: i32) -> PitchPositions {
    let mut altered = positions.0;
    altered[degree] += shift;
    if degree == 0 {
        let root = altered[0];
        for p in &mut altered[1..] {
            *p -= root;
        }
        altered[0] = 0;
    }
    PitchPositions(altered)
}

// ---------------------------------------------------------------------------
// Mode listing
// ---------------------------------------------------------------------------

/// One rotation of a scale, resolved against the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RotationSummary {
    /// 1-based mode number.
    pub mode: usize,
    pub steps: IntervalVector,
    pub index: usize,
    pub name: String,
    pub brightness: i32,
}

/// Mode class of a scale and its seven rotations, starting with the scale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModeReport {
    pub class: ModeClass,
    pub rotations: Vec<RotationSummary>,
}

// ---------------------------------------------------------------------------
// Catalog queries
// ---------------------------------------------------------------------------

impl ScaleCatalog {
    /// Resolve a scale token to a catalog index.
    pub fn resolve(&self, token: &str) -> Result<usize, ScaleError> {
        let token = token.trim().to_lowercase();
        let out_of_range = || ScaleError::OutOfRange {
            index: token.clone(),
            len: self.len(),
        };

        if looks_numeric(&token) {
            return match token.parse::<usize>() {
                Ok(index) if index < self.len() => Ok(index),
                _ => Err(out_of_range()),
            };
        }

        self.entries()
            .iter()
            .find(|e| e.answers_to(&token))
            .map(|e| e.index)
            .ok_or_else(|| ScaleError::NotFound(token.clone()))
    }

    /// Resolve a token straight to its entry.
    pub fn lookup(&self, token: &str) -> Result<&CatalogEntry, ScaleError> {
        let index = self.resolve(token)?;
        self.get(index)
    }

    /// Mode class and rotations of the scale at `index`.
    pub fn classify_modes(&self, index: usize) -> Result<ModeReport, ScaleError> {
        let entry = self.get(index)?;
        let class = classify::classify(entry.steps)?;

        let mut rotations = Vec::with_capacity(DEGREES);
        for (k, steps) in classify::rotations(entry.steps).into_iter().enumerate() {
            let index = self
                .index_of_steps(&steps)
                .ok_or(ScaleError::MissingRotation(steps))?;
            let rotated = self.get(index)?;
            rotations.push(RotationSummary {
                mode: k + 1,
                steps,
                index,
                name: rotated.name.clone(),
                brightness: rotated.brightness(),
            });
        }
        Ok(ModeReport { class, rotations })
    }

    /// Entries matching every constraint; no constraints matches everything.
    pub fn search_by_degrees(&self, constraints: &[DegreeConstraint]) -> Vec<&CatalogEntry> {
        self.entries()
            .iter()
            .filter(|e| {
                let deviations = e.deviations();
                constraints.iter().all(|c| c.matches(&deviations))
            })
            .collect()
    }

    /// Squares the scale at `index` lies on.
    pub fn squares_containing(&self, index: usize) -> Result<Vec<&Square>, ScaleError> {
        let deviations = self.get(index)?.deviations();
        Ok(self
            .squares()
            .iter()
            .filter(|s| s.is_satisfied_by(&deviations))
            .collect())
    }

    /// Catalog scales reachable from `index` by shifting a single degree.
    pub fn alterations_of(&self, index: usize) -> Result<Vec<Alteration>, ScaleError> {
        let positions = self.get(index)?.positions;
        let mut found = Vec::new();
        for kind in AlterationKind::ALL {
            for degree in 0..DEGREES {
                let altered = alter_positions(&positions, degree, kind.quarter_tones());
                if let Some(index) = self.index_of_positions(&altered) {
                    found.push(Alteration {
                        kind,
                        degree,
                        index,
                    });
                }
            }
        }
        Ok(found)
    }
}

/// An optionally signed run of ASCII digits.
fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ScaleCatalog {
        ScaleCatalog::build().unwrap()
    }

    #[test]
    fn resolve_by_index_and_name() {
        let catalog = catalog();
        assert_eq!(catalog.resolve("0"), Ok(0));
        assert_eq!(catalog.resolve("ionian"), Ok(125));
        assert_eq!(catalog.resolve("MAJOR"), Ok(125));
        assert_eq!(catalog.resolve("natural minor"), Ok(80));
        assert_eq!(catalog.resolve("Mixolydian-Bocrian"), Ok(98));
        assert_eq!(catalog.resolve("rast"), Ok(98));
    }

    #[test]
    fn resolve_failures_are_distinct() {
        let catalog = catalog();
        assert!(matches!(catalog.resolve("161"), Err(ScaleError::OutOfRange { .. })));
        assert!(matches!(catalog.resolve("-1"), Err(ScaleError::OutOfRange { .. })));
        assert!(matches!(
            catalog.resolve("99999999999999999999999"),
            Err(ScaleError::OutOfRange { .. })
        ));
        assert_eq!(
            catalog.resolve("Blues"),
            Err(ScaleError::NotFound("blues".to_string()))
        );
    }

    #[test]
    fn constraint_parsing() {
        assert_eq!(
            DegreeConstraint::parse("mi-1"),
            Some(DegreeConstraint {
                degree: 2,
                deviation: -1,
            })
        );
        assert_eq!(
            DegreeConstraint::parse("fa+2"),
            Some(DegreeConstraint {
                degree: 3,
                deviation: 2,
            })
        );
        assert_eq!(
            DegreeConstraint::parse("so"),
            Some(DegreeConstraint {
                degree: 4,
                deviation: 0,
            })
        );
        assert_eq!(DegreeConstraint::parse("xx1"), None);
        assert_eq!(DegreeConstraint::parse("mi-x"), None);
        assert_eq!(DegreeConstraint::parse("m"), None);
        assert_eq!(DegreeConstraint::parse("fa+2").unwrap().to_string(), "fa+2");
    }

    #[test]
    fn malformed_tokens_are_dropped() {
        let constraints = parse_search_tokens(["mi-1", "bogus", "la-2", "ti?"]);
        assert_eq!(constraints.len(), 2);
    }

    #[test]
    fn search_lowered_mi() {
        let catalog = catalog();
        let hits = catalog.search_by_degrees(&parse_search_tokens(["mi-1"]));
        assert_eq!(hits.len(), 60);
        assert!(hits.iter().all(|e| e.positions.0[2] == 7));
        assert!(hits.iter().any(|e| e.index == 98));
    }

    #[test]
    fn empty_search_matches_everything() {
        let catalog = catalog();
        assert_eq!(catalog.search_by_degrees(&[]).len(), catalog.len());
    }

    #[test]
    fn major_mode_listing() {
        let catalog = catalog();
        let report = catalog.classify_modes(125).unwrap();
        assert_eq!(report.class.label, "Quintal");
        let names: Vec<&str> = report.rotations.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["Ionian", "Dorian", "Phrygian", "Lydian", "Mixolydian", "Aeolian", "Locrian"]
        );
        assert_eq!(report.rotations[0].brightness, 0);
        assert_eq!(report.rotations[5].index, 80);
    }

    #[test]
    fn major_alterations() {
        let catalog = catalog();
        let found = catalog.alterations_of(125).unwrap();
        let lowered_ti = Alteration {
            kind: AlterationKind::Lower,
            degree: 6,
            index: 123,
        };
        assert!(found.contains(&lowered_ti));
        assert_eq!(catalog.entries()[123].name, "Mixolydian");
        assert_eq!(found.len(), 8);
        // Raising the root a half step re-anchors the scale: Ionadian.
        assert!(found.contains(&Alteration {
            kind: AlterationKind::Raise,
            degree: 0,
            index: 6,
        }));
    }

    #[test]
    fn alteration_round_trips() {
        let positions = crate::scale::MAJOR_POSITIONS;
        for degree in 0..DEGREES {
            let up = alter_positions(&positions, degree, 2);
            assert_eq!(alter_positions(&up, degree, -2), positions);
        }
    }

    #[test]
    fn squares_of_major() {
        let catalog = catalog();
        let rendered: Vec<String> = catalog
            .squares_containing(125)
            .unwrap()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(rendered, ["re0 fa0 so0 la0", "re0 mi0 so0 la0"]);
    }

    #[test]
    fn index_queries_report_out_of_range() {
        let catalog = catalog();
        let out_of_range = ScaleError::OutOfRange {
            index: "161".to_string(),
            len: 161,
        };
        assert_eq!(catalog.squares_containing(161), Err(out_of_range.clone()));
        assert_eq!(catalog.alterations_of(161), Err(out_of_range.clone()));
        assert_eq!(catalog.classify_modes(161), Err(out_of_range));
    }
}
