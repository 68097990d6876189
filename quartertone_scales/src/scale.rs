// Scale value types: interval vectors and pitch-position vectors.
//
// A scale is seven steps measured in quarter tones (24 per octave). The
// `IntervalVector` stores the step widths (root-to-2nd ... 7th-to-octave);
// the `PitchPositions` store the cumulative offset of each degree from the
// root. Everything downstream (naming, squares, classification, rendering)
// works from one of these two views.
//
// Deviation and brightness are measured against the reference major scale,
// `MAJOR_POSITIONS` = [0, 4, 8, 10, 14, 18, 22].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of degrees in every scale of the catalog.
pub const DEGREES: usize = 7;

/// Quarter tones per octave.
pub const OCTAVE: i32 = 24;

/// Pitch positions of the reference major scale (Ionian).
pub const MAJOR_POSITIONS: PitchPositions = PitchPositions([0, 4, 8, 10, 14, 18, 22]);

/// Movable-do syllables, indexed by degree.
pub const SOLFEGE: [&str; DEGREES] = ["do", "re", "mi", "fa", "so", "la", "ti"];

/// Step widths of a scale, in quarter tones. Each step is 2, 3 or 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IntervalVector(pub [u8; DEGREES]);

impl IntervalVector {
    pub const fn new(steps: [u8; DEGREES]) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> [u8; DEGREES] {
        self.0
    }

    /// Cumulative positions of degrees 0..=6. Degree 0 is always 0.
    pub fn positions(&self) -> PitchPositions {
        let mut positions = [0i32; DEGREES];
        let mut total = 0i32;
        for (degree, &step) in self.0.iter().enumerate().take(DEGREES - 1) {
            total += i32::from(step);
            positions[degree + 1] = total;
        }
        PitchPositions(positions)
    }

    /// The next mode: the first step moves to the end.
    pub fn rotated(self) -> Self {
        let mut steps = self.0;
        steps.rotate_left(1);
        Self(steps)
    }

    /// True if any step is a single-decremented (3 quarter tone) step.
    /// Such scales take part in naming and search but never form squares.
    pub fn has_three_step(&self) -> bool {
        self.0.contains(&3)
    }

    /// Elementwise floor average of two vectors.
    pub fn average(self, other: Self) -> Self {
        let mut steps = [0u8; DEGREES];
        for (k, step) in steps.iter_mut().enumerate() {
            *step = (self.0[k] + other.0[k]) / 2;
        }
        Self(steps)
    }

    /// Total width in quarter tones.
    pub fn width(&self) -> u32 {
        self.0.iter().map(|&s| u32::from(s)).sum()
    }
}

impl fmt::Display for IntervalVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (k, step) in self.0.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{step}")?;
        }
        write!(f, "]")
    }
}

/// Offset of each degree from the root, in quarter tones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PitchPositions(pub [i32; DEGREES]);

impl PitchPositions {
    pub fn positions(&self) -> [i32; DEGREES] {
        self.0
    }

    /// Per-degree deviation from the reference major scale.
    pub fn deviations(&self) -> [i32; DEGREES] {
        let mut deviations = [0i32; DEGREES];
        for (k, deviation) in deviations.iter_mut().enumerate() {
            *deviation = self.0[k] - MAJOR_POSITIONS.0[k];
        }
        deviations
    }

    /// Sum of all per-degree deviations from major. Major itself is 0;
    /// positive is brighter, negative darker.
    pub fn brightness(&self) -> i32 {
        self.deviations().iter().sum()
    }

    /// The seven positions followed by the octave (24).
    pub fn with_octave(&self) -> [i32; DEGREES + 1] {
        let mut out = [OCTAVE; DEGREES + 1];
        out[..DEGREES].copy_from_slice(&self.0);
        out
    }
}

impl fmt::Display for PitchPositions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
