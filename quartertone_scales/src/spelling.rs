// Note spelling of a scale played on C.
//
// Degree k is written with the k-th letter of C D E F G A B and an accidental
// for its deviation from the C major scale, in quarter tones:
//
//   -4 bb   -3 db   -2 b   -1 d   0 (none)   +1 ⱡ   +2 #   +3 #ⱡ   +4 x
//
// `d` is the half-flat and `ⱡ` the half-sharp.

use crate::scale::{DEGREES, PitchPositions};

const LETTERS: [char; DEGREES] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// Accidentals indexed by deviation + 4.
const ACCIDENTALS: [&str; 9] = ["bb", "db", "b", "d", "", "ⱡ", "#", "#ⱡ", "x"];

/// Accidental for a deviation in quarter tones, if one exists.
pub fn accidental(deviation: i32) -> Option<&'static str> {
    let slot = usize::try_from(deviation + 4).ok()?;
    ACCIDENTALS.get(slot).copied()
}

/// Spell each degree on C. Deviations outside ±4 come out as `<letter>?`.
pub fn spell_on_c(positions: &PitchPositions) -> [String; DEGREES] {
    let deviations = positions.deviations();
    std::array::from_fn(|k| {
        let acc = accidental(deviations[k]).unwrap_or("?");
        format!("{}{}", LETTERS[k], acc)
    })
}
