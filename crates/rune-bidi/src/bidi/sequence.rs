//! Level runs and isolating run sequences (BD7, BD13, X9, X10).

use core::ops::Range;

use crate::bidi::level::BidiLevel;
use crate::unicode::BidiClass;

/// An isolating run sequence.
///
/// `indices` lists the paragraph positions in the sequence in logical
/// order, with X9-removed characters left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IsolatingRunSequence {
    pub indices: Vec<usize>,
    pub level: BidiLevel,
    /// Start-of-sequence type, L or R.
    pub sos: BidiClass,
    /// End-of-sequence type, L or R.
    pub eos: BidiClass,
}

impl IsolatingRunSequence {
    /// Embedding direction of the sequence, L or R.
    pub fn embedding_direction(&self) -> BidiClass {
        direction_of(self.level)
    }
}

fn direction_of(level: BidiLevel) -> BidiClass {
    if level.is_rtl() { BidiClass::R } else { BidiClass::L }
}

/// BD7 over the characters that survive X9: maximal runs of equal level,
/// as ranges into `kept`.
fn level_runs(kept: &[usize], levels: &[BidiLevel]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;
    for k in 1..=kept.len() {
        if k == kept.len() || levels[kept[k]] != levels[kept[start]] {
            runs.push(start..k);
            start = k;
        }
    }
    runs
}

/// X10: build the isolating run sequences of a paragraph.
///
/// `classes` are the original classes and `pdis` their BD9 matches.
pub(crate) fn isolating_run_sequences(
    classes: &[BidiClass],
    levels: &[BidiLevel],
    pdis: &[Option<usize>],
    base_level: BidiLevel,
) -> Vec<IsolatingRunSequence> {
    let kept: Vec<usize> = (0..classes.len())
        .filter(|&i| !classes[i].is_removed_by_x9())
        .collect();
    if kept.is_empty() {
        return Vec::new();
    }
    let runs = level_runs(&kept, levels);

    // Run containing each kept position, used to follow initiator -> PDI.
    let mut run_of = vec![usize::MAX; classes.len()];
    for (r, run) in runs.iter().enumerate() {
        for k in run.clone() {
            run_of[kept[k]] = r;
        }
    }

    let mut consumed = vec![false; runs.len()];
    let mut sequences = Vec::new();
    for r in 0..runs.len() {
        if consumed[r] {
            continue;
        }
        let mut members = vec![r];
        consumed[r] = true;
        loop {
            let last_run = &runs[members[members.len() - 1]];
            let last = kept[last_run.end - 1];
            let Some(pdi) = classes[last]
                .is_isolate_initiator()
                .then(|| pdis[last])
                .flatten()
            else {
                break;
            };
            let next = run_of[pdi];
            if next == usize::MAX || consumed[next] || kept[runs[next].start] != pdi {
                break;
            }
            consumed[next] = true;
            members.push(next);
        }

        let indices: Vec<usize> = members
            .iter()
            .flat_map(|&m| runs[m].clone().map(|k| kept[k]))
            .collect();
        let level = levels[indices[0]];

        let first_k = runs[members[0]].start;
        let before = if first_k == 0 {
            base_level
        } else {
            levels[kept[first_k - 1]]
        };

        let last_k = runs[members[members.len() - 1]].end - 1;
        let last = kept[last_k];
        let after = if classes[last].is_isolate_initiator() || last_k + 1 == kept.len() {
            base_level
        } else {
            levels[kept[last_k + 1]]
        };

        sequences.push(IsolatingRunSequence {
            indices,
            level,
            sos: direction_of(level.max(before)),
            eos: direction_of(level.max(after)),
        });
    }
    sequences
}
