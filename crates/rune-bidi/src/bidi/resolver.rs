//! Per-paragraph level resolution: explicit levels, isolating run
//! sequences, weak and neutral types, then implicit levels.

use log::trace;

use crate::bidi::explicit::resolve_explicit;
use crate::bidi::level::BidiLevel;
use crate::bidi::neutral::{resolve_brackets, resolve_neutrals};
use crate::bidi::paragraph::matching_pdis;
use crate::bidi::sequence::isolating_run_sequences;
use crate::bidi::weak::resolve_weak;
use crate::unicode::{BidiClass, BidiDataSource};

/// Resolve the levels of one paragraph, before rule L1.
///
/// `chars` and `classes` cover exactly the paragraph. The result has one
/// level per character; X9-removed characters take the level of the
/// character before them, or `base_level` at the paragraph start.
pub(crate) fn resolve_paragraph<D: BidiDataSource>(
    chars: &[char],
    classes: &[BidiClass],
    base_level: BidiLevel,
    data: &D,
) -> Vec<BidiLevel> {
    let pdis = matching_pdis(classes);
    let (mut levels, mut processed) = resolve_explicit(classes, &pdis, base_level);
    let sequences = isolating_run_sequences(classes, &levels, &pdis, base_level);
    trace!(
        "paragraph of {} chars at level {base_level}: {} isolating run sequences",
        chars.len(),
        sequences.len()
    );

    for seq in &sequences {
        resolve_weak(seq, &mut processed);
        resolve_brackets(seq, chars, classes, &mut processed, data);
        resolve_neutrals(seq, &mut processed);
    }

    // I1, I2
    for seq in &sequences {
        for &i in &seq.indices {
            let level = levels[i];
            let raise = match (level.is_rtl(), processed[i]) {
                (false, BidiClass::R) => 1,
                (false, BidiClass::AN | BidiClass::EN) => 2,
                (true, BidiClass::L | BidiClass::EN | BidiClass::AN) => 1,
                _ => 0,
            };
            levels[i] = level.raise(raise);
        }
    }

    let mut previous = base_level;
    for (i, &class) in classes.iter().enumerate() {
        if class.is_removed_by_x9() {
            levels[i] = previous;
        }
        previous = levels[i];
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidi::paragraph::detect_base_level;
    use crate::unicode::{UnicodeBidiData, classify};

    fn resolve(text: &str, base: Option<u8>) -> Vec<u8> {
        let chars: Vec<char> = text.chars().collect();
        let classes: Vec<BidiClass> = chars.iter().map(|&c| classify(c)).collect();
        let base = match base {
            Some(level) => BidiLevel::new(level).unwrap(),
            None => detect_base_level(&classes),
        };
        resolve_paragraph(&chars, &classes, base, &UnicodeBidiData)
            .into_iter()
            .map(BidiLevel::number)
            .collect()
    }

    #[test]
    fn ltr_text_stays_at_zero() {
        assert_eq!(resolve("car means CAR", None), vec![0; 13]);
    }

    #[test]
    fn rtl_text_in_ltr_paragraph() {
        assert_eq!(resolve("ab אב cd", None), vec![0, 0, 0, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn numbers_in_rtl_paragraph() {
        // Hebrew, space, digits: digits are raised to level 2.
        assert_eq!(resolve("אב 12", None), vec![1, 1, 1, 2, 2]);
        // Arabic letter turns following digits into AN.
        assert_eq!(resolve("\u{0627} 12", Some(0)), vec![1, 1, 2, 2]);
    }

    #[test]
    fn latin_in_rtl_paragraph() {
        assert_eq!(resolve("אב ab", None), vec![1, 1, 1, 2, 2]);
    }

    #[test]
    fn removed_characters_take_previous_level() {
        // a RLE b PDF c: b is embedded at level 1 and raised to 2 by I2;
        // the PDF copies that level, the RLE copies a's.
        assert_eq!(resolve("a\u{202B}b\u{202C}c", Some(0)), vec![0, 0, 2, 2, 0]);
        // A removed character at paragraph start takes the paragraph level.
        assert_eq!(resolve("\u{200B}a", Some(1)), vec![1, 2]);
    }

    #[test]
    fn brackets_follow_content() {
        // RTL paragraph "a(b)" followed by Hebrew: the pair holds only L,
        // and the context before it is L, so it resolves to L.
        assert_eq!(resolve("אa(b)", None), vec![1, 2, 2, 2, 2]);
    }

    #[test]
    fn isolate_content_does_not_leak() {
        // Hebrew inside an LTR isolate in an RTL paragraph.
        assert_eq!(
            resolve("א\u{2066}b\u{2069}ג", None),
            vec![1, 1, 2, 1, 1]
        );
    }
}
