// Scale squares: structure shared by pairs of half/whole-step scales.
//
// Two scales built only from 2- and 4-quarter-tone steps form a square when
// their pitch positions agree at exactly five of the seven degrees (the root
// always agrees) and the two degrees where they differ are not neighbours.
// Degree 6 and degree 1 count as neighbours across the root. The square
// records, for each shared non-root degree, that degree's deviation from
// major; any scale matching all four entries belongs to the square.
//
// Squares are deduplicated by exact equality and kept in discovery order.

use crate::scale::{DEGREES, IntervalVector, PitchPositions, SOLFEGE};
use serde::Serialize;
use std::fmt;

/// Number of degrees (root included) two scales must share.
const SHARED_DEGREES: usize = 5;

/// One degree of a square and its deviation from major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SquareDegree {
    pub degree: usize,
    pub deviation: i32,
}

/// A set of fixed degree deviations shared by related scales.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Square {
    pub degrees: Vec<SquareDegree>,
}

impl Square {
    /// True if a scale with these per-degree deviations lies on this square.
    pub fn is_satisfied_by(&self, deviations: &[i32; DEGREES]) -> bool {
        self.degrees
            .iter()
            .all(|d| deviations[d.degree] == d.deviation)
    }
}

impl fmt::Display for Square {
    /// Solfège form, e.g. `re0 fa0 so0 la0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.degrees.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}{}", SOLFEGE[d.degree], d.deviation)?;
        }
        Ok(())
    }
}

/// The square shared by two scales, if they form one.
pub fn square_between(a: &PitchPositions, b: &PitchPositions) -> Option<Square> {
    let same: [bool; DEGREES] = std::array::from_fn(|k| a.0[k] == b.0[k]);
    if same.iter().filter(|&&s| s).count() != SHARED_DEGREES {
        return None;
    }

    let first_diff = same.iter().position(|&s| !s)?;
    let next_also_differs = same.get(first_diff + 1).is_some_and(|&s| !s);
    let wraps_around_root = !same[1] && !same[DEGREES - 1];
    if next_also_differs || wraps_around_root {
        return None;
    }

    let deviations = a.deviations();
    let degrees = (1..DEGREES)
        .filter(|&k| same[k])
        .map(|k| SquareDegree {
            degree: k,
            deviation: deviations[k],
        })
        .collect();
    Some(Square { degrees })
}

/// All distinct squares among the given scales, in discovery order.
///
/// Scales with a 3-quarter-tone step are skipped.
pub fn detect_squares(vectors: &[IntervalVector]) -> Vec<Square> {
    let candidates: Vec<PitchPositions> = vectors
        .iter()
        .filter(|v| !v.has_three_step())
        .map(IntervalVector::positions)
        .collect();

    let mut squares: Vec<Square> = Vec::new();
    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            if let Some(square) = square_between(a, b) {
                if !squares.contains(&square) {
                    squares.push(square);
                }
            }
        }
    }
    squares
}
