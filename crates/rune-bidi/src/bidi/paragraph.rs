//! Paragraph splitting (P1) and base level detection (P2/P3).

use core::ops::Range;

use crate::bidi::level::BidiLevel;
use crate::unicode::BidiClass;

/// A paragraph found by [`split_paragraphs`], before level resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParagraphSpan {
    /// Char index range, separator included.
    pub chars: Range<usize>,
    pub base_level: BidiLevel,
}

/// Split classified text into paragraphs.
///
/// A paragraph ends after each character of class B, except that a CR
/// directly followed by LF ends at the LF. `default_level` applies to every
/// paragraph; `None` detects each paragraph's level from its content.
pub(crate) fn split_paragraphs(
    chars: &[char],
    classes: &[BidiClass],
    default_level: Option<BidiLevel>,
) -> Vec<ParagraphSpan> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    for (i, &class) in classes.iter().enumerate() {
        if class != BidiClass::B {
            continue;
        }
        if chars[i] == '\r' && chars.get(i + 1) == Some(&'\n') {
            continue;
        }
        paragraphs.push(start..i + 1);
        start = i + 1;
    }
    if start < classes.len() {
        paragraphs.push(start..classes.len());
    }

    paragraphs
        .into_iter()
        .map(|chars| {
            let base_level = default_level
                .unwrap_or_else(|| detect_base_level(&classes[chars.clone()]));
            ParagraphSpan { chars, base_level }
        })
        .collect()
}

/// P2/P3: level 1 if the first strong character outside isolates is R or
/// AL, level 0 otherwise.
pub(crate) fn detect_base_level(classes: &[BidiClass]) -> BidiLevel {
    let pdis = matching_pdis(classes);
    match first_strong(classes, &pdis, 0, classes.len()) {
        Some(BidiClass::R | BidiClass::AL) => BidiLevel::rtl(),
        _ => BidiLevel::ltr(),
    }
}

/// BD9: for each isolate initiator, the index of its matching PDI.
///
/// Entries for other characters, and for initiators without a match, are
/// `None`.
pub(crate) fn matching_pdis(classes: &[BidiClass]) -> Vec<Option<usize>> {
    let mut matches = vec![None; classes.len()];
    let mut open: Vec<usize> = Vec::new();
    for (i, &class) in classes.iter().enumerate() {
        if class.is_isolate_initiator() {
            open.push(i);
        } else if class == BidiClass::PDI {
            if let Some(initiator) = open.pop() {
                matches[initiator] = Some(i);
            }
        }
    }
    matches
}

/// First L, R or AL in `start..end`, skipping every isolate initiator
/// together with the text up to its matching PDI (or `end` when unmatched).
pub(crate) fn first_strong(
    classes: &[BidiClass],
    pdis: &[Option<usize>],
    start: usize,
    end: usize,
) -> Option<BidiClass> {
    let mut i = start;
    while i < end {
        let class = classes[i];
        if class.is_strong() {
            return Some(class);
        }
        if class.is_isolate_initiator() {
            match pdis[i] {
                Some(pdi) if pdi < end => i = pdi,
                _ => return None,
            }
        }
        i += 1;
    }
    None
}
