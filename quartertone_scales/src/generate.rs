// Enumeration of every interval vector in the catalog.
//
// Start from seven whole-tone steps (4 quarter tones each) and take away
// four quarter tones, one at a time, at positions p1 <= p2 <= p3 <= p4. A
// position may be chosen twice (that step becomes 2) but never three times,
// which is what the p1 != p3 and p2 != p4 rules exclude. Every accepted
// quadruple is a distinct multiset, so every vector appears exactly once.
//
// The lexicographic order of (p1, p2, p3, p4) fixes catalog indices. The
// historical-name table in `reference.rs` is keyed by those indices, so the
// order here must never change.

use crate::scale::{DEGREES, IntervalVector};

/// Width of an undecremented step.
const WHOLE_STEP: u8 = 4;

/// The four decrement positions that produce one interval vector.
pub type DecrementPositions = [usize; 4];

/// All accepted decrement quadruples, in catalog order.
pub fn decrement_quadruples() -> Vec<DecrementPositions> {
    let mut quads = Vec::new();
    for p1 in 0..DEGREES {
        for p2 in p1..DEGREES {
            for p3 in p2..DEGREES {
                for p4 in p3..DEGREES {
                    if p1 == p3 || p2 == p4 {
                        continue;
                    }
                    quads.push([p1, p2, p3, p4]);
                }
            }
        }
    }
    quads
}

/// Apply one decrement quadruple to the all-whole-step base vector.
pub fn apply_decrements(positions: DecrementPositions) -> IntervalVector {
    let mut steps = [WHOLE_STEP; DEGREES];
    for p in positions {
        steps[p] -= 1;
    }
    IntervalVector::new(steps)
}

/// Every interval vector of the catalog, in index order.
pub fn generate_interval_vectors() -> Vec<IntervalVector> {
    decrement_quadruples()
        .into_iter()
        .map(apply_decrements)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn catalog_has_161_vectors() {
        // C(10, 4) = 210 sorted quadruples, minus 28 with p1 == p3, minus 28
        // with p2 == p4, plus the 7 counted twice.
        assert_eq!(generate_interval_vectors().len(), 161);
    }

    #[test]
    fn first_and_last_vectors() {
        let vectors = generate_interval_vectors();
        assert_eq!(vectors[0].steps(), [2, 2, 4, 4, 4, 4, 4]);
        assert_eq!(vectors[1].steps(), [2, 3, 3, 4, 4, 4, 4]);
        assert_eq!(vectors[160].steps(), [4, 4, 4, 4, 4, 2, 2]);
    }

    #[test]
    fn vectors_are_distinct_and_span_an_octave() {
        let vectors = generate_interval_vectors();
        let unique: BTreeSet<_> = vectors.iter().collect();
        assert_eq!(unique.len(), vectors.len());
        for v in &vectors {
            assert_eq!(v.width(), 24);
            assert!(v.steps().iter().all(|s| (2..=4).contains(s)), "{v}");
        }
    }

    #[test]
    fn quadruples_are_sorted_and_never_triple() {
        for [p1, p2, p3, p4] in decrement_quadruples() {
            assert!(p1 <= p2 && p2 <= p3 && p3 <= p4);
            assert_ne!(p1, p3);
            assert_ne!(p2, p4);
        }
    }

    #[test]
    fn generation_is_stable() {
        assert_eq!(generate_interval_vectors(), generate_interval_vectors());
    }
}
