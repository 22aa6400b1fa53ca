//! Unicode character data for the bidi algorithm.
//!
//! - Bidi_Class lookup through an injectable data source
//! - Bidi_Paired_Bracket_Type pairs for rule N0
//! - Bidi_Mirroring_Glyph for rule L4

pub mod brackets;
pub mod class;

pub use brackets::{BracketKind, PairedBracket, mirrored, paired_bracket};
pub use class::{BidiClass, BidiDataSource, UnicodeBidiData, classify};
