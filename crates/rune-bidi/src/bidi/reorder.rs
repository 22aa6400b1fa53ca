use core::ops::{Index, Range};

use crate::bidi::level::BidiLevel;
use crate::unicode::BidiClass;

/// A run of text with a single embedding level, in visual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiRun {
    /// Code-unit range in the original text.
    pub range: Range<usize>,
    /// Embedding level for this run.
    pub level: BidiLevel,
}

impl BidiRun {
    pub fn is_rtl(&self) -> bool {
        self.level.is_rtl()
    }
}

/// A visual-to-logical index map.
///
/// Entry `i` is the logical index (relative to the start of whatever was
/// reordered) that is displayed at visual position `i`. Always a
/// permutation of `0..len()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ReorderedIndexMap(Vec<usize>);

impl ReorderedIndexMap {
    /// Wrap an order already known to be a permutation.
    pub(crate) fn from_order(order: Vec<usize>) -> Self {
        ReorderedIndexMap(order)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Logical index shown at visual position `visual`.
    pub fn get(&self, visual: usize) -> Option<usize> {
        self.0.get(visual).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, usize>> {
        self.0.iter().copied()
    }

    /// The logical-to-visual map: entry `j` is the visual position of
    /// logical index `j`.
    pub fn inverse(&self) -> ReorderedIndexMap {
        let mut inverse = vec![0; self.0.len()];
        for (visual, &logical) in self.0.iter().enumerate() {
            inverse[logical] = visual;
        }
        ReorderedIndexMap(inverse)
    }
}

impl Index<usize> for ReorderedIndexMap {
    type Output = usize;

    fn index(&self, visual: usize) -> &usize {
        &self.0[visual]
    }
}

impl IntoIterator for ReorderedIndexMap {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReorderedIndexMap {
    type Item = usize;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<ReorderedIndexMap> for Vec<usize> {
    fn from(map: ReorderedIndexMap) -> Self {
        map.0
    }
}

/// Rule L2: reverse, from the highest level down to the lowest odd level,
/// every maximal run of positions at that level or higher.
pub fn reorder_levels(levels: &[BidiLevel]) -> ReorderedIndexMap {
    let n = levels.len();
    let mut order: Vec<usize> = (0..n).collect();
    let max_level = levels.iter().map(|level| level.number()).max().unwrap_or(0);
    let min_odd = levels
        .iter()
        .map(|level| level.number())
        .filter(|level| level & 1 == 1)
        .min()
        .unwrap_or(max_level + 1);

    let mut level = max_level;
    while level >= min_odd {
        let mut i = 0;
        while i < n {
            if levels[order[i]].number() < level {
                i += 1;
                continue;
            }
            let start = i;
            while i < n && levels[order[i]].number() >= level {
                i += 1;
            }
            order[start..i].reverse();
        }
        level -= 1;
    }
    ReorderedIndexMap(order)
}

/// Rule L1 for one line.
///
/// `classes` are the original classes of the line's characters and
/// `levels` their resolved levels. Segment and paragraph separators, any
/// whitespace or isolate formatting run before them, and such a run at the
/// end of the line are reset to `base_level`. X9-removed characters inside
/// those runs are reset too.
pub fn line_levels(
    classes: &[BidiClass],
    levels: &[BidiLevel],
    base_level: BidiLevel,
) -> Vec<BidiLevel> {
    let mut result = levels.to_vec();
    // Whether the characters after the current one, up to the next
    // separator or the line end, are all trailing whitespace.
    let mut resetting = true;
    for i in (0..classes.len()).rev() {
        match classes[i] {
            BidiClass::B | BidiClass::S => {
                result[i] = base_level;
                resetting = true;
            }
            class if class.is_trailing_whitespace() => {
                if resetting {
                    result[i] = base_level;
                }
            }
            _ => resetting = false,
        }
    }
    result
}

/// Level runs of a line in visual order.
///
/// `units` gives the code-unit range of each character; runs are reported
/// in those units.
pub(crate) fn visual_runs(levels: &[BidiLevel], units: &[Range<usize>]) -> Vec<BidiRun> {
    let mut runs: Vec<BidiRun> = Vec::new();
    for (level, range) in levels.iter().zip(units) {
        match runs.last_mut() {
            Some(run) if run.level == *level => run.range.end = range.end,
            _ => runs.push(BidiRun {
                range: range.clone(),
                level: *level,
            }),
        }
    }
    let run_levels: Vec<BidiLevel> = runs.iter().map(|run| run.level).collect();
    reorder_levels(&run_levels)
        .iter()
        .map(|logical| runs[logical].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use BidiClass::*;

    fn levels(raw: &[u8]) -> Vec<BidiLevel> {
        raw.iter().map(|&n| BidiLevel::new(n).unwrap()).collect()
    }

    fn order(raw: &[u8]) -> Vec<usize> {
        reorder_levels(&levels(raw)).into_vec()
    }

    #[test]
    fn empty_levels_give_empty_map() {
        assert!(reorder_levels(&[]).is_empty());
    }

    #[test]
    fn even_levels_keep_logical_order() {
        assert_eq!(order(&[0, 0, 0]), vec![0, 1, 2]);
        assert_eq!(order(&[2, 2]), vec![0, 1]);
    }

    #[test]
    fn odd_levels_reverse() {
        assert_eq!(order(&[1, 1, 1]), vec![2, 1, 0]);
    }

    #[test]
    fn mixed_levels() {
        // abc ABC def with ABC at level 1
        assert_eq!(order(&[0, 0, 1, 1, 0]), vec![0, 1, 3, 2, 4]);
        // RTL paragraph with an embedded number: numbers keep their order.
        assert_eq!(order(&[1, 1, 2, 2, 1]), vec![4, 2, 3, 1, 0]);
        // Two nested levels.
        assert_eq!(order(&[0, 1, 2, 2, 1, 0]), vec![0, 4, 2, 3, 1, 5]);
    }

    #[test]
    fn no_odd_level_means_no_reversal() {
        assert_eq!(order(&[0, 2, 2, 0]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn inverse_map() {
        let map = reorder_levels(&levels(&[0, 1, 1, 0]));
        assert_eq!(map.as_slice(), &[0, 2, 1, 3]);
        assert_eq!(map.inverse().as_slice(), &[0, 2, 1, 3]);
        let map = reorder_levels(&levels(&[1, 1, 1, 0]));
        assert_eq!(map.as_slice(), &[2, 1, 0, 3]);
        let inverse = map.inverse();
        for visual in 0..map.len() {
            assert_eq!(inverse[map[visual]], visual);
        }
    }

    #[test]
    fn map_accessors() {
        let map = reorder_levels(&levels(&[1, 1]));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(0), Some(1));
        assert_eq!(map.get(2), None);
        assert_eq!((&map).into_iter().collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(Vec::from(map), vec![1, 0]);
    }

    #[test]
    fn l1_resets_trailing_whitespace_and_separators() {
        let classes = [R, WS, R, WS, S, R, WS, WS];
        let resolved = levels(&[1, 1, 1, 1, 1, 1, 1, 1]);
        let reset = line_levels(&classes, &resolved, BidiLevel::ltr());
        let reset: Vec<u8> = reset.into_iter().map(BidiLevel::number).collect();
        assert_eq!(reset, vec![1, 1, 1, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn l1_includes_isolates_and_removed_characters() {
        let classes = [L, RLE, WS, PDI, BN, B];
        let resolved = levels(&[2, 2, 2, 2, 2, 2]);
        let reset = line_levels(&classes, &resolved, BidiLevel::rtl());
        let reset: Vec<u8> = reset.into_iter().map(BidiLevel::number).collect();
        assert_eq!(reset, vec![2, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn visual_runs_in_display_order() {
        let units = [0..1, 1..2, 2..4, 4..6, 6..7];
        let runs = visual_runs(&levels(&[0, 0, 1, 1, 0]), &units);
        let ranges: Vec<_> = runs.iter().map(|run| run.range.clone()).collect();
        assert_eq!(ranges, vec![0..2, 2..6, 6..7]);
        assert!(runs[1].is_rtl());

        let runs = visual_runs(&levels(&[1, 1, 2, 1]), &units[..4]);
        let ranges: Vec<_> = runs.iter().map(|run| run.range.clone()).collect();
        assert_eq!(ranges, vec![4..6, 2..4, 0..2]);
    }
}
