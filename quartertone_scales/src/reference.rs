// Fixed reference data: named modes, historical names, mode-class labels.
//
// The 21 reference modes come in three families of seven. The first family
// is the diatonic set (Lydian through Phrygian). The other two apply the same
// rotation pattern to different arrangements of two half steps (2 quarter
// tones) among whole steps. Catalog naming averages every pair of these
// (see `catalog.rs`), so table order matters: it drives the name tie-break.
//
// Historical names are keyed by catalog index and only make sense together
// with the generation order in `generate.rs`.

use crate::scale::IntervalVector;

/// A named heptatonic mode built from whole and half steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceMode {
    pub name: &'static str,
    pub steps: IntervalVector,
}

const fn mode(name: &'static str, steps: [u8; 7]) -> ReferenceMode {
    ReferenceMode {
        name,
        steps: IntervalVector::new(steps),
    }
}

/// The reference modes, in naming-traversal order.
pub static REFERENCE_MODES: [ReferenceMode; 21] = [
    mode("Lydian", [4, 4, 4, 2, 4, 4, 2]),
    mode("Mixolydian", [4, 4, 2, 4, 4, 2, 4]),
    mode("Aeolian", [4, 2, 4, 4, 2, 4, 4]),
    mode("Locrian", [2, 4, 4, 2, 4, 4, 4]),
    mode("Ionian", [4, 4, 2, 4, 4, 4, 2]),
    mode("Dorian", [4, 2, 4, 4, 4, 2, 4]),
    mode("Phrygian", [2, 4, 4, 4, 2, 4, 4]),
    mode("Ionadian", [2, 4, 2, 4, 4, 4, 4]),
    mode("Bocrian", [4, 2, 4, 4, 4, 4, 2]),
    mode("Mixolythian", [2, 4, 4, 4, 4, 2, 4]),
    mode("Larian", [4, 4, 4, 4, 2, 4, 2]),
    mode("Lythian", [4, 4, 4, 2, 4, 2, 4]),
    mode("Stydian", [4, 4, 2, 4, 2, 4, 4]),
    mode("Lorian", [4, 2, 4, 2, 4, 4, 4]),
    mode("Aeroptian", [4, 4, 4, 4, 2, 2, 4]),
    mode("Phryrian", [4, 4, 4, 2, 2, 4, 4]),
    mode("Gothian", [4, 4, 2, 2, 4, 4, 4]),
    mode("Storian", [4, 2, 2, 4, 4, 4, 4]),
    mode("Pyptian", [2, 2, 4, 4, 4, 4, 4]),
    mode("Thydian", [2, 4, 4, 4, 4, 4, 2]),
    mode("Aeolynian", [4, 4, 4, 4, 4, 2, 2]),
];

/// Historical and cross-cultural names, keyed by catalog index.
static HISTORICAL_NAMES: [(usize, &[&str]); 15] = [
    (6, &["Altered"]),
    (20, &["Neapolitan Major"]),
    (32, &["Husayni 'Ushyaran"]),
    (35, &["Bayati"]),
    (36, &["\"Rattlesnake\""]),
    (76, &["Half Diminished"]),
    (80, &["Minor", "Natural Minor"]),
    (85, &["Melodic Minor"]),
    (98, &["Rast"]),
    (116, &["Major Locrian"]),
    (120, &["Aeolian Dominant", "Melodic Major", "Hindu"]),
    (124, &["Jiharkah"]),
    (125, &["Major"]),
    (145, &["Acoustic", "Overtone", "Lydian Dominant"]),
    (157, &["Lydian Augmented"]),
];

/// Labels for mode-class keys (see `classify.rs`). "Q", "M" and "W" abbreviate
/// the Quintal, Melodic and Whole families.
static MODE_CLASS_LABELS: [(u32, &str); 23] = [
    (637, "Quintal 6th = Melodic 5th = M-W 1st"),
    (671, "Q-M 2nd"),
    (689, "Q-M 6th = Q-W 5th = M-W 3rd"),
    (691, "Quintal 2nd = Whole 5th = Q-M 1st"),
    (692, "Quintal 5th"),
    (695, "Melodic 6th"),
    (697, "Q-M 3rd = Q-W 4th = M-W 2nd"),
    (698, "Q-M 7th"),
    (699, "Q-W 6th"),
    (700, "Q-W 3rd"),
    (707, "Q-W 2nd"),
    (709, "Q-M 5th"),
    (710, "Quintal"),
    (713, "M-W 6th"),
    (715, "Melodic 2nd = Whole 6th = Q-W 1st"),
    (716, "Q-M 4th"),
    (717, "M-W 7th"),
    (718, "Q-W 7th"),
    (721, "M-W 5th"),
    (722, "Melodic"),
    (723, "Whole 2nd"),
    (724, "M-W 4th"),
    (726, "Whole"),
];

/// Historical names for a catalog index; empty when it has none.
pub fn historical_names(index: usize) -> &'static [&'static str] {
    HISTORICAL_NAMES
        .iter()
        .find(|(i, _)| *i == index)
        .map(|&(_, names)| names)
        .unwrap_or(&[])
}

/// Label for a mode-class key, or `None` for a key outside the table.
pub fn mode_class_label(key: u32) -> Option<&'static str> {
    MODE_CLASS_LABELS
        .binary_search_by_key(&key, |(k, _)| *k)
        .ok()
        .map(|i| MODE_CLASS_LABELS[i].1)
}

/// Every known mode-class key, ascending.
pub fn mode_class_keys() -> impl Iterator<Item = u32> {
    MODE_CLASS_LABELS.iter().map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_modes_span_an_octave() {
        for m in &REFERENCE_MODES {
            assert_eq!(m.steps.width(), 24, "{}", m.name);
            assert!(!m.steps.has_three_step(), "{}", m.name);
        }
    }

    #[test]
    fn families_are_rotation_closed() {
        // Each family of seven contains all rotations of its first member.
        for family in REFERENCE_MODES.chunks(7) {
            let mut steps = family[0].steps;
            for _ in 0..7 {
                assert!(family.iter().any(|m| m.steps == steps));
                steps = steps.rotated();
            }
        }
    }

    #[test]
    fn label_table_is_sorted_for_lookup() {
        let keys: Vec<u32> = mode_class_keys().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(keys, sorted);
        assert_eq!(mode_class_label(710), Some("Quintal"));
        assert_eq!(mode_class_label(0), None);
    }

    #[test]
    fn historical_name_lookup() {
        assert_eq!(historical_names(125), &["Major"]);
        assert_eq!(historical_names(80), &["Minor", "Natural Minor"]);
        assert!(historical_names(0).is_empty());
    }
}
