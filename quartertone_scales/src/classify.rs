// Mode classification.
//
// A scale and its six other rotations share one mode class. The class key is
// the largest base-3 weight over the seven rotations, where the weight reads
// the first six steps as digits (step - 2), most significant first. The last
// step is left out of the weight: with the width fixed at 24 it is implied by
// the other six.
//
// Classification only looks at the interval vector. Turning rotations back
// into catalog entries is done by `ScaleCatalog::classify_modes` in
// `query.rs`.

use crate::error::ScaleError;
use crate::reference;
use crate::scale::{DEGREES, IntervalVector};
use serde::Serialize;

/// Place values for steps 0..=5.
const DIGIT_WEIGHTS: [u32; DEGREES - 1] = [243, 81, 27, 9, 3, 1];

/// A rotation-invariant mode class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ModeClass {
    pub key: u32,
    pub label: &'static str,
}

/// Base-3 weight of one rotation.
pub fn rotation_weight(steps: &IntervalVector) -> u32 {
    DIGIT_WEIGHTS
        .iter()
        .zip(steps.0.iter())
        .map(|(&w, &s)| w * u32::from(s.saturating_sub(2)))
        .sum()
}

/// The seven rotations, starting with `steps` itself.
pub fn rotations(steps: IntervalVector) -> [IntervalVector; DEGREES] {
    let mut out = [steps; DEGREES];
    for k in 1..DEGREES {
        out[k] = out[k - 1].rotated();
    }
    out
}

/// The maximum rotation weight.
pub fn mode_class_key(steps: IntervalVector) -> u32 {
    rotations(steps)
        .iter()
        .map(rotation_weight)
        .max()
        .unwrap_or(0)
}

/// Classify a scale. A key with no label means the tables and the
/// generator are out of sync, so it is reported rather than defaulted.
pub fn classify(steps: IntervalVector) -> Result<ModeClass, ScaleError> {
    let key = mode_class_key(steps);
    let label = reference::mode_class_label(key).ok_or(ScaleError::UnrecognizedModeClass(key))?;
    Ok(ModeClass { key, label })
}
