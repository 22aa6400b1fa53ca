//! rune-bidi: Unicode Bidirectional Algorithm (UAX #9) for the rune text stack.
//!
//! - `unicode`: bidi classes, paired brackets and mirroring data
//! - `text`: UTF-8 / UTF-16 / Latin-1 decoding with code-unit offsets
//! - `bidi`: level resolution, line reordering and the `Bidi` facade
//!
//! ```
//! use rune_bidi::{Bidi, ParagraphDirection};
//!
//! let info = Bidi::new().for_text("he said \"שלום\" to me", None);
//! let para = info.paragraph_at(0).unwrap();
//! assert_eq!(para.direction(), ParagraphDirection::Mixed);
//! ```

pub mod bidi;
pub mod error;
pub mod text;
pub mod unicode;

pub use bidi::{
    BaseDirection, Bidi, BidiInfo, BidiLevel, BidiParagraph, BidiRun, MAX_DEPTH,
    Paragraph, ParagraphDirection, ReorderedIndexMap,
};
pub use error::{BidiError, Result};
pub use text::Encoding;
pub use unicode::{BidiClass, BidiDataSource, UnicodeBidiData};
