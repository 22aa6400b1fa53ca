//! Bidi_Class lookup.
//!
//! Character properties come from an injected [`BidiDataSource`]. The
//! default [`UnicodeBidiData`] uses the Unicode tables compiled into the
//! `unicode-bidi` crate for both classes and BidiBrackets.txt pairs.

use unicode_bidi::BidiClass as UcdClass;

use super::brackets::{self, PairedBracket};

/// Intrinsic bidirectional character type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BidiClass {
    // Strong
    L,
    R,
    AL,
    // Weak
    EN,
    ES,
    ET,
    AN,
    CS,
    NSM,
    BN,
    // Neutral
    B,
    S,
    WS,
    ON,
    // Explicit formatting
    LRE,
    LRO,
    RLE,
    RLO,
    PDF,
    LRI,
    RLI,
    FSI,
    PDI,
}

impl BidiClass {
    /// L, R or AL.
    pub fn is_strong(self) -> bool {
        matches!(self, BidiClass::L | BidiClass::R | BidiClass::AL)
    }

    /// LRI, RLI or FSI.
    pub fn is_isolate_initiator(self) -> bool {
        matches!(self, BidiClass::LRI | BidiClass::RLI | BidiClass::FSI)
    }

    /// Isolate initiators and PDI.
    pub fn is_isolate_control(self) -> bool {
        self.is_isolate_initiator() || self == BidiClass::PDI
    }

    /// Characters ignored by the implicit rules (X9).
    pub fn is_removed_by_x9(self) -> bool {
        matches!(
            self,
            BidiClass::LRE
                | BidiClass::RLE
                | BidiClass::LRO
                | BidiClass::RLO
                | BidiClass::PDF
                | BidiClass::BN
        )
    }

    /// Neutral or isolate formatting character (NI in N1/N2).
    pub fn is_neutral_or_isolate(self) -> bool {
        matches!(
            self,
            BidiClass::B | BidiClass::S | BidiClass::WS | BidiClass::ON
        ) || self.is_isolate_control()
    }

    /// Characters whose levels L1 resets when they trail a line or precede
    /// a separator.
    pub(crate) fn is_trailing_whitespace(self) -> bool {
        self == BidiClass::WS || self.is_isolate_control() || self.is_removed_by_x9()
    }
}

impl From<UcdClass> for BidiClass {
    fn from(class: UcdClass) -> Self {
        #[allow(unreachable_patterns)]
        match class {
            UcdClass::L => BidiClass::L,
            UcdClass::R => BidiClass::R,
            UcdClass::AL => BidiClass::AL,
            UcdClass::EN => BidiClass::EN,
            UcdClass::ES => BidiClass::ES,
            UcdClass::ET => BidiClass::ET,
            UcdClass::AN => BidiClass::AN,
            UcdClass::CS => BidiClass::CS,
            UcdClass::NSM => BidiClass::NSM,
            UcdClass::BN => BidiClass::BN,
            UcdClass::B => BidiClass::B,
            UcdClass::S => BidiClass::S,
            UcdClass::WS => BidiClass::WS,
            UcdClass::ON => BidiClass::ON,
            UcdClass::LRE => BidiClass::LRE,
            UcdClass::LRO => BidiClass::LRO,
            UcdClass::RLE => BidiClass::RLE,
            UcdClass::RLO => BidiClass::RLO,
            UcdClass::PDF => BidiClass::PDF,
            UcdClass::LRI => BidiClass::LRI,
            UcdClass::RLI => BidiClass::RLI,
            UcdClass::FSI => BidiClass::FSI,
            UcdClass::PDI => BidiClass::PDI,
            _ => BidiClass::ON,
        }
    }
}

/// Source of the per-code-point properties the algorithm consumes.
///
/// Implementations must be total: every `char` gets a class, unassigned
/// code points included.
pub trait BidiDataSource {
    /// Bidi_Class of `ch`.
    fn bidi_class(&self, ch: char) -> BidiClass;

    /// Bidi_Paired_Bracket_Type of `ch`, if it is a paired bracket.
    fn paired_bracket(&self, ch: char) -> Option<PairedBracket> {
        brackets::paired_bracket(ch)
    }
}

/// Default data source backed by the `unicode-bidi` tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeBidiData;

impl BidiDataSource for UnicodeBidiData {
    fn bidi_class(&self, ch: char) -> BidiClass {
        unicode_bidi::bidi_class(ch).into()
    }
}

impl<D: BidiDataSource + ?Sized> BidiDataSource for &D {
    fn bidi_class(&self, ch: char) -> BidiClass {
        (**self).bidi_class(ch)
    }

    fn paired_bracket(&self, ch: char) -> Option<PairedBracket> {
        (**self).paired_bracket(ch)
    }
}

/// Classify `ch` with the default Unicode data.
pub fn classify(ch: char) -> BidiClass {
    UnicodeBidiData.bidi_class(ch)
}
