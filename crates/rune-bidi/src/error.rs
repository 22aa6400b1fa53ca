//! Error types for bidi queries.

use thiserror::Error;

/// Result type for bidi operations.
pub type Result<T> = std::result::Result<T, BidiError>;

/// Caller errors reported by the bidi facades.
///
/// The resolution algorithm itself never fails; these only describe
/// queries whose arguments do not fit the resolved text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidiError {
    /// Embedding level above the UAX #9 maximum depth.
    #[error("embedding level {0} exceeds the maximum of 125")]
    InvalidLevel(u8),

    /// Line range whose start lies after its end.
    #[error("line range {start}..{end} is inverted")]
    InvertedRange { start: usize, end: usize },

    /// Line range that is not contained in the paragraph.
    #[error("line range {start}..{end} is outside paragraph {para_start}..{para_end}")]
    LineOutOfParagraph {
        start: usize,
        end: usize,
        para_start: usize,
        para_end: usize,
    },

    /// Offset that splits a multi-unit character.
    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    /// Paragraph index beyond the paragraph count.
    #[error("paragraph index {index} is out of range ({count} paragraphs)")]
    ParagraphOutOfRange { index: usize, count: usize },
}
