//! Paired brackets (BidiBrackets.txt) and mirroring glyphs.
//!
//! Both come from Unicode 16 tables: the pairs from `unicode-bidi`, the same
//! crate that supplies Bidi_Class, and the glyphs from `unicode-bidi-mirroring`.

use unicode_bidi::{BidiDataSource as _, HardcodedBidiData};

/// Whether a paired bracket opens or closes its pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

/// Bidi_Paired_Bracket_Type of a character.
///
/// `opening` is the canonical opening bracket of the pair, so two brackets
/// match exactly when their `opening` fields are equal. Canonically
/// equivalent brackets (U+2329/U+232A and U+3008/U+3009) share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairedBracket {
    pub opening: char,
    pub kind: BracketKind,
}

/// Return the paired bracket type of `ch`, if any.
pub fn paired_bracket(ch: char) -> Option<PairedBracket> {
    HardcodedBidiData
        .bidi_matched_opening_bracket(ch)
        .map(|bracket| PairedBracket {
            opening: bracket.opening,
            kind: if bracket.is_open {
                BracketKind::Open
            } else {
                BracketKind::Close
            },
        })
}

/// Return the Bidi_Mirroring_Glyph counterpart of `ch` (rule L4).
///
/// If `ch` has no mirror, it is returned unchanged.
pub fn mirrored(ch: char) -> char {
    unicode_bidi_mirroring::get_mirrored(ch).unwrap_or(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_parentheses() {
        assert_eq!(mirrored('('), ')');
        assert_eq!(mirrored(')'), '(');
    }

    #[test]
    fn mirrors_brackets_and_braces() {
        assert_eq!(mirrored('['), ']');
        assert_eq!(mirrored(']'), '[');
        assert_eq!(mirrored('{'), '}');
        assert_eq!(mirrored('}'), '{');
        assert_eq!(mirrored('\u{00AB}'), '\u{00BB}');
        assert_eq!(mirrored('<'), '>');
    }

    #[test]
    fn mirrors_mathematical_operators() {
        assert_eq!(mirrored('\u{2A7D}'), '\u{2A7E}');
        assert_eq!(mirrored('\u{2A7E}'), '\u{2A7D}');
        assert_eq!(mirrored('\u{29F8}'), '\u{29F9}');
        assert_eq!(mirrored('\u{2264}'), '\u{2265}');
        assert_eq!(mirrored('\u{226E}'), '\u{226F}');
    }

    #[test]
    fn leaves_non_brackets_unchanged() {
        assert_eq!(mirrored('a'), 'a');
        assert_eq!(mirrored('+'), '+');
        let hebrew = "אב".chars().next().unwrap();
        assert_eq!(mirrored(hebrew), hebrew);
    }

    #[test]
    fn paired_bracket_types() {
        let open = paired_bracket('(').unwrap();
        assert_eq!(open.kind, BracketKind::Open);
        let close = paired_bracket(')').unwrap();
        assert_eq!(close.kind, BracketKind::Close);
        assert_eq!(open.opening, close.opening);
        assert!(paired_bracket('<').is_none());
        assert!(paired_bracket('a').is_none());
    }

    #[test]
    fn canonically_equivalent_brackets_match() {
        let open = paired_bracket('\u{2329}').unwrap();
        let close = paired_bracket('\u{3009}').unwrap();
        assert_eq!(open.kind, BracketKind::Open);
        assert_eq!(close.kind, BracketKind::Close);
        assert_eq!(open.opening, close.opening);
        assert_eq!(
            paired_bracket('\u{232A}').map(|b| b.opening),
            Some('\u{3008}')
        );
    }

    #[test]
    fn crossed_pairs() {
        // U+298D pairs with U+2990, U+298F with U+298E.
        assert_eq!(
            paired_bracket('\u{2990}').map(|b| b.opening),
            Some('\u{298D}')
        );
        assert_eq!(
            paired_bracket('\u{298E}').map(|b| b.opening),
            Some('\u{298F}')
        );
    }
}
