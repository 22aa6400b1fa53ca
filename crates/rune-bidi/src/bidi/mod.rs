//! Bidirectional text resolution and reordering (UAX #9).
//!
//! - Paragraph splitting and base level detection (P1-P3)
//! - Explicit, weak, neutral and implicit level resolution (X1-I2)
//! - Line level reset and visual reordering (L1, L2) with mirroring (L4)

mod explicit;
pub mod info;
pub mod level;
mod neutral;
mod paragraph;
pub mod reorder;
mod resolver;
mod sequence;
mod weak;

use rune_config::BidiConfig;

use crate::text::DecodedText;
use crate::unicode::{BidiDataSource, UnicodeBidiData};

pub use info::{BidiInfo, BidiParagraph, Paragraph};
pub use level::{BaseDirection, BidiLevel, MAX_DEPTH, ParagraphDirection};
pub use neutral::MAX_BRACKET_PAIRS;
pub use reorder::{BidiRun, ReorderedIndexMap};

/// Entry point: resolves text into a [`BidiInfo`] and hosts the level
/// helpers.
///
/// Generic over the Unicode data source; [`Bidi::new`] uses the built-in
/// tables.
#[derive(Debug, Clone)]
pub struct Bidi<D: BidiDataSource = UnicodeBidiData> {
    data: D,
    default_direction: BaseDirection,
    mirror_brackets: bool,
}

impl Bidi {
    pub fn new() -> Self {
        Self::with_data_source(UnicodeBidiData)
    }

    /// Facade using the configured fallback direction and mirroring.
    pub fn from_config(config: &BidiConfig) -> Self {
        Self::new()
            .with_default_direction(config.default_direction.into())
            .with_mirroring(config.mirror_brackets)
    }

    /// Rule L2 over an arbitrary level array.
    pub fn reorder_visual(levels: &[BidiLevel]) -> ReorderedIndexMap {
        reorder::reorder_levels(levels)
    }

    pub fn level_is_rtl(level: u8) -> bool {
        level & 1 == 1
    }

    pub fn level_is_ltr(level: u8) -> bool {
        !Self::level_is_rtl(level)
    }

    /// Representative right-to-left level.
    pub fn level_rtl() -> u8 {
        BidiLevel::rtl().number()
    }

    /// Representative left-to-right level.
    pub fn level_ltr() -> u8 {
        BidiLevel::ltr().number()
    }
}

impl Default for Bidi {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: BidiDataSource> Bidi<D> {
    pub fn with_data_source(data: D) -> Self {
        Self {
            data,
            default_direction: BaseDirection::Auto,
            mirror_brackets: true,
        }
    }

    /// Base direction used when a call passes no level.
    pub fn with_default_direction(mut self, direction: BaseDirection) -> Self {
        self.default_direction = direction;
        self
    }

    /// Whether reordered text mirrors characters at odd levels (L4).
    pub fn with_mirroring(mut self, enabled: bool) -> Self {
        self.mirror_brackets = enabled;
        self
    }

    pub fn default_direction(&self) -> BaseDirection {
        self.default_direction
    }

    pub fn mirror_brackets(&self) -> bool {
        self.mirror_brackets
    }

    /// Resolve UTF-8 text. Positions are byte offsets.
    ///
    /// `default_level` overrides base level detection for every paragraph;
    /// `None` falls back to the configured direction, then to P2/P3.
    pub fn for_text(&self, text: &str, default_level: Option<BidiLevel>) -> BidiInfo {
        self.resolve(DecodedText::utf8(text), default_level)
    }

    pub fn for_text_utf8(&self, text: &str, default_level: Option<BidiLevel>) -> BidiInfo {
        self.for_text(text, default_level)
    }

    /// Resolve UTF-16 text. Positions are `u16` code units.
    pub fn for_text_utf16(&self, text: &[u16], default_level: Option<BidiLevel>) -> BidiInfo {
        self.resolve(DecodedText::utf16(text), default_level)
    }

    /// Resolve Latin-1 text. Positions are bytes.
    pub fn for_text_latin1(&self, text: &[u8], default_level: Option<BidiLevel>) -> BidiInfo {
        self.resolve(DecodedText::latin1(text), default_level)
    }

    fn resolve(&self, text: DecodedText, default_level: Option<BidiLevel>) -> BidiInfo {
        let level = default_level.or_else(|| self.default_direction.to_level());
        BidiInfo::resolve(text, level, &self.data, self.mirror_brackets)
    }
}
