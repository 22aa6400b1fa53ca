use core::ops::Range;

use log::debug;

use crate::bidi::level::{BidiLevel, ParagraphDirection};
use crate::bidi::paragraph::split_paragraphs;
use crate::bidi::reorder::{self, BidiRun, ReorderedIndexMap, reorder_levels};
use crate::bidi::resolver::resolve_paragraph;
use crate::error::{BidiError, Result};
use crate::text::{DecodedText, Encoding};
use crate::unicode::{BidiClass, BidiDataSource, mirrored};

/// One resolved paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Code-unit range within the text, separator included.
    pub range: Range<usize>,
    /// Paragraph embedding level (P2/P3 or caller override).
    pub level: BidiLevel,
    /// Direction derived from the paragraph's levels.
    pub direction: ParagraphDirection,
    pub(crate) chars: Range<usize>,
}

/// Bidi resolution of a whole text buffer.
///
/// Built eagerly by [`Bidi::for_text`](crate::Bidi::for_text) and immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct BidiInfo {
    text: DecodedText,
    /// Original class of every char.
    classes: Vec<BidiClass>,
    /// Per-char levels before L1.
    resolved: Vec<BidiLevel>,
    /// Per-code-unit levels with L1 applied at each paragraph end.
    levels: Vec<BidiLevel>,
    paragraphs: Vec<Paragraph>,
    mirror_brackets: bool,
}

impl BidiInfo {
    pub(crate) fn resolve<D: BidiDataSource>(
        text: DecodedText,
        default_level: Option<BidiLevel>,
        data: &D,
        mirror_brackets: bool,
    ) -> Self {
        let classes: Vec<BidiClass> = text.chars.iter().map(|&ch| data.bidi_class(ch)).collect();
        let spans = split_paragraphs(&text.chars, &classes, default_level);

        let mut resolved = Vec::with_capacity(text.chars.len());
        let mut levels = Vec::with_capacity(text.len_units());
        let mut paragraphs = Vec::with_capacity(spans.len());
        for span in spans {
            let chars = span.chars;
            let para_levels = resolve_paragraph(
                &text.chars[chars.clone()],
                &classes[chars.clone()],
                span.base_level,
                data,
            );
            let final_levels = reorder::line_levels(
                &classes[chars.clone()],
                &para_levels,
                span.base_level,
            );
            for (c, level) in chars.clone().zip(&final_levels) {
                let units = text.offsets[c + 1] - text.offsets[c];
                levels.extend(std::iter::repeat_n(*level, units));
            }
            resolved.extend(para_levels);

            paragraphs.push(Paragraph {
                range: text.offsets[chars.start]..text.offsets[chars.end],
                level: span.base_level,
                direction: ParagraphDirection::from_levels(&final_levels),
                chars,
            });
        }

        debug!(
            "bidi: {} paragraph(s) over {} {:?} code units",
            paragraphs.len(),
            text.len_units(),
            text.encoding
        );

        Self {
            text,
            classes,
            resolved,
            levels,
            paragraphs,
            mirror_brackets,
        }
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Handle to the `index`-th paragraph, or `None` past the end.
    pub fn paragraph_at(&self, index: usize) -> Option<BidiParagraph<'_>> {
        (index < self.paragraphs.len()).then_some(BidiParagraph { info: self, index })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = BidiParagraph<'_>> + '_ {
        (0..self.paragraphs.len()).map(move |index| BidiParagraph { info: self, index })
    }

    /// Length of the text in code units.
    pub fn size(&self) -> usize {
        self.levels.len()
    }

    /// Level of the code unit at absolute position `pos`.
    pub fn level_at(&self, pos: usize) -> Option<BidiLevel> {
        self.levels.get(pos).copied()
    }

    /// Per-code-unit levels of the whole text.
    pub fn levels(&self) -> &[BidiLevel] {
        &self.levels
    }

    pub fn encoding(&self) -> Encoding {
        self.text.encoding
    }
}

/// A view of one paragraph of a [`BidiInfo`].
///
/// Cheap to copy; [`set_paragraph_in_text`](Self::set_paragraph_in_text)
/// moves the view to another paragraph of the same text.
#[derive(Debug, Clone, Copy)]
pub struct BidiParagraph<'a> {
    info: &'a BidiInfo,
    index: usize,
}

impl<'a> BidiParagraph<'a> {
    pub fn paragraph(&self) -> &'a Paragraph {
        &self.info.paragraphs[self.index]
    }

    /// Index of this paragraph within the text.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Point this view at paragraph `n` of the same text.
    ///
    /// On error the view keeps its current paragraph.
    pub fn set_paragraph_in_text(&mut self, n: usize) -> Result<()> {
        let count = self.info.paragraphs.len();
        if n >= count {
            return Err(BidiError::ParagraphOutOfRange { index: n, count });
        }
        self.index = n;
        Ok(())
    }

    pub fn direction(&self) -> ParagraphDirection {
        self.paragraph().direction
    }

    pub fn base_level(&self) -> BidiLevel {
        self.paragraph().level
    }

    /// Size in code units.
    pub fn size(&self) -> usize {
        self.paragraph().range.len()
    }

    pub fn range_start(&self) -> usize {
        self.paragraph().range.start
    }

    pub fn range_end(&self) -> usize {
        self.paragraph().range.end
    }

    /// Level at `pos`, counted in code units from the paragraph start.
    pub fn level_at(&self, pos: usize) -> Option<BidiLevel> {
        self.levels().get(pos).copied()
    }

    /// Per-code-unit levels of the paragraph.
    pub fn levels(&self) -> &'a [BidiLevel] {
        &self.info.levels[self.paragraph().range.clone()]
    }

    /// Char range of the line `start..end` (absolute code units).
    fn line_chars(&self, start: usize, end: usize) -> Result<Range<usize>> {
        if start > end {
            return Err(BidiError::InvertedRange { start, end });
        }
        let range = &self.paragraph().range;
        if start < range.start || end > range.end {
            return Err(BidiError::LineOutOfParagraph {
                start,
                end,
                para_start: range.start,
                para_end: range.end,
            });
        }
        let text = &self.info.text;
        let first = text
            .char_index(start)
            .ok_or(BidiError::NotCharBoundary(start))?;
        let last = text.char_index(end).ok_or(BidiError::NotCharBoundary(end))?;
        Ok(first..last)
    }

    /// Per-char levels of a line with L1 applied at the line end.
    fn char_levels(&self, chars: Range<usize>) -> Vec<BidiLevel> {
        reorder::line_levels(
            &self.info.classes[chars.clone()],
            &self.info.resolved[chars],
            self.base_level(),
        )
    }

    fn reorder_chars(&self, chars: Range<usize>) -> ReorderedIndexMap {
        let offsets = &self.info.text.offsets;
        let origin = offsets[chars.start];
        let order = reorder_levels(&self.char_levels(chars.clone()));
        let mut units = Vec::with_capacity(offsets[chars.end] - origin);
        for c in order {
            let c = chars.start + c;
            units.extend(offsets[c] - origin..offsets[c + 1] - origin);
        }
        ReorderedIndexMap::from_order(units)
    }

    /// Levels of the line `start..end` in code units, with trailing
    /// whitespace reset against the line end.
    pub fn line_levels(&self, start: usize, end: usize) -> Result<Vec<BidiLevel>> {
        let chars = self.line_chars(start, end)?;
        let offsets = &self.info.text.offsets;
        let mut levels = Vec::with_capacity(end - start);
        for (c, level) in chars.clone().zip(self.char_levels(chars)) {
            levels.extend(std::iter::repeat_n(level, offsets[c + 1] - offsets[c]));
        }
        Ok(levels)
    }

    /// Visual order of the line `start..end` (absolute code units).
    ///
    /// The map is relative to `start`. The code units of one character stay
    /// in storage order.
    pub fn reorder_line(&self, start: usize, end: usize) -> Result<ReorderedIndexMap> {
        let chars = self.line_chars(start, end)?;
        Ok(self.reorder_chars(chars))
    }

    /// Visual order of the whole paragraph treated as one line.
    pub fn reorder(&self) -> ReorderedIndexMap {
        self.reorder_chars(self.paragraph().chars.clone())
    }

    /// Level runs of the line `start..end` in visual order.
    pub fn visual_runs(&self, start: usize, end: usize) -> Result<Vec<BidiRun>> {
        let chars = self.line_chars(start, end)?;
        let offsets = &self.info.text.offsets;
        let units: Vec<Range<usize>> = chars.clone().map(|c| offsets[c]..offsets[c + 1]).collect();
        Ok(reorder::visual_runs(&self.char_levels(chars), &units))
    }

    /// Characters of the line `start..end` in visual order.
    ///
    /// Characters at odd levels are replaced by their mirrored glyph when
    /// bracket mirroring is enabled.
    pub fn reorder_line_text(&self, start: usize, end: usize) -> Result<String> {
        let chars = self.line_chars(start, end)?;
        let levels = self.char_levels(chars.clone());
        let text = &self.info.text.chars[chars];
        Ok(reorder_levels(&levels)
            .iter()
            .map(|c| {
                if self.info.mirror_brackets && levels[c].is_rtl() {
                    mirrored(text[c])
                } else {
                    text[c]
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::UnicodeBidiData;

    fn info(text: &str, level: Option<u8>) -> BidiInfo {
        let level = level.map(|n| BidiLevel::new(n).unwrap());
        BidiInfo::resolve(DecodedText::utf8(text), level, &UnicodeBidiData, true)
    }

    fn numbers(levels: &[BidiLevel]) -> Vec<u8> {
        levels.iter().map(|level| level.number()).collect()
    }

    #[test]
    fn paragraphs_partition_the_text() {
        let info = info("ab\u{2029}אב\ncd", None);
        assert_eq!(info.paragraph_count(), 3);
        let ranges: Vec<_> = info.paragraphs().map(|p| p.range_start()..p.range_end()).collect();
        assert_eq!(ranges, vec![0..5, 5..10, 10..12]);
        assert_eq!(info.size(), 12);
    }

    #[test]
    fn levels_are_per_code_unit() {
        let info = info("aא", None);
        assert_eq!(numbers(info.levels()), vec![0, 1, 1]);
        assert_eq!(info.level_at(2).map(BidiLevel::number), Some(1));
        assert_eq!(info.level_at(3), None);
    }

    #[test]
    fn paragraph_separator_takes_paragraph_level() {
        let info = info("אב\u{2029}", None);
        let para = info.paragraph_at(0).unwrap();
        assert_eq!(para.direction(), ParagraphDirection::Rtl);
        assert!(para.levels().iter().all(|level| level.number() == 1));
    }

    #[test]
    fn paragraph_level_at_is_relative() {
        let info = info("ab\nאב", None);
        let para = info.paragraph_at(1).unwrap();
        assert_eq!(para.range_start(), 3);
        assert_eq!(para.size(), 4);
        assert_eq!(para.level_at(0).map(BidiLevel::number), Some(1));
        assert_eq!(para.level_at(4), None);
    }

    #[test]
    fn set_paragraph_in_text_moves_the_view() {
        let info = info("ab\nאב", None);
        let mut para = info.paragraph_at(0).unwrap();
        assert_eq!(para.direction(), ParagraphDirection::Ltr);
        para.set_paragraph_in_text(1).unwrap();
        assert_eq!(para.direction(), ParagraphDirection::Rtl);
        assert_eq!(
            para.set_paragraph_in_text(2),
            Err(BidiError::ParagraphOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(para.index(), 1);
        assert!(info.paragraph_at(2).is_none());
    }

    #[test]
    fn reorder_line_validates_the_range() {
        let info = info("ab\nאב", None);
        let para = info.paragraph_at(1).unwrap();
        assert_eq!(
            para.reorder_line(5, 4),
            Err(BidiError::InvertedRange { start: 5, end: 4 })
        );
        assert_eq!(
            para.reorder_line(0, 4),
            Err(BidiError::LineOutOfParagraph {
                start: 0,
                end: 4,
                para_start: 3,
                para_end: 7
            })
        );
        assert_eq!(para.reorder_line(3, 4), Err(BidiError::NotCharBoundary(4)));
        assert!(para.reorder_line(5, 5).unwrap().is_empty());
    }

    #[test]
    fn reorder_line_keeps_char_units_together() {
        // a, alef (2 bytes), bet (2 bytes)
        let info = info("aאב", Some(0));
        let para = info.paragraph_at(0).unwrap();
        let map = para.reorder_line(0, 5).unwrap();
        assert_eq!(map.as_slice(), &[0, 3, 4, 1, 2]);
        assert_eq!(para.reorder().as_slice(), map.as_slice());
    }

    #[test]
    fn line_levels_reset_trailing_whitespace() {
        // RTL paragraph: "אב cd ef" wrapped after "cd ".
        let info = info("אב cd ef", None);
        let para = info.paragraph_at(0).unwrap();
        let levels = para.line_levels(0, 8).unwrap();
        // The space after "cd" sits between two L runs: level 2 in the
        // paragraph, reset to 1 at the line end.
        assert_eq!(numbers(info.levels())[7], 2);
        assert_eq!(numbers(&levels)[7], 1);
    }

    #[test]
    fn visual_runs_and_mirrored_text() {
        let info = info("a(ב)", Some(1));
        let para = info.paragraph_at(0).unwrap();
        let runs = para.visual_runs(0, para.range_end()).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].range, 1..5);
        assert!(runs[0].is_rtl());
        assert_eq!(runs[1].range, 0..1);
        assert_eq!(para.reorder_line_text(0, 5).unwrap(), "(ב)a");
    }

    #[test]
    fn mirroring_can_be_disabled() {
        let info = BidiInfo::resolve(
            DecodedText::utf8("a(ב)"),
            Some(BidiLevel::rtl()),
            &UnicodeBidiData,
            false,
        );
        let para = info.paragraph_at(0).unwrap();
        assert_eq!(para.reorder_line_text(0, 5).unwrap(), ")ב(a");
    }
}
