//! Paired brackets and neutral resolution (rules N0-N2).

use log::trace;

use crate::bidi::sequence::IsolatingRunSequence;
use crate::unicode::{BidiClass, BidiDataSource, BracketKind};

/// Bracket pair stack depth (BD16).
pub const MAX_BRACKET_PAIRS: usize = 63;

/// Strong direction of a resolved class for N0/N1: EN and AN count as R.
fn strong_direction(class: BidiClass) -> Option<BidiClass> {
    match class {
        BidiClass::L => Some(BidiClass::L),
        BidiClass::R | BidiClass::EN | BidiClass::AN => Some(BidiClass::R),
        _ => None,
    }
}

/// BD16: positions (into `seq.indices`) of matched bracket pairs, sorted by
/// opening position.
fn bracket_pairs<D: BidiDataSource>(
    seq: &IsolatingRunSequence,
    chars: &[char],
    processed: &[BidiClass],
    data: &D,
) -> Vec<(usize, usize)> {
    let mut stack: Vec<(char, usize)> = Vec::with_capacity(MAX_BRACKET_PAIRS);
    let mut pairs = Vec::new();

    for (k, &i) in seq.indices.iter().enumerate() {
        if processed[i] != BidiClass::ON {
            continue;
        }
        let Some(bracket) = data.paired_bracket(chars[i]) else {
            continue;
        };
        match bracket.kind {
            BracketKind::Open => {
                if stack.len() == MAX_BRACKET_PAIRS {
                    trace!("bracket stack overflow at {i}");
                    break;
                }
                stack.push((bracket.opening, k));
            }
            BracketKind::Close => {
                if let Some(depth) = stack.iter().rposition(|&(open, _)| open == bracket.opening) {
                    pairs.push((stack[depth].1, k));
                    stack.truncate(depth);
                }
            }
        }
    }

    pairs.sort_unstable();
    pairs
}

/// N0: resolve paired brackets of one sequence.
pub(crate) fn resolve_brackets<D: BidiDataSource>(
    seq: &IsolatingRunSequence,
    chars: &[char],
    original: &[BidiClass],
    processed: &mut [BidiClass],
    data: &D,
) {
    let embedding = seq.embedding_direction();
    for (open, close) in bracket_pairs(seq, chars, processed, data) {
        let mut found_embedding = false;
        let mut found_opposite = false;
        for &i in &seq.indices[open + 1..close] {
            match strong_direction(processed[i]) {
                Some(dir) if dir == embedding => {
                    found_embedding = true;
                    break;
                }
                Some(_) => found_opposite = true,
                None => {}
            }
        }

        let resolved = if found_embedding {
            embedding
        } else if found_opposite {
            let context = seq.indices[..open]
                .iter()
                .rev()
                .find_map(|&i| strong_direction(processed[i]))
                .unwrap_or(seq.sos);
            if context != embedding {
                context
            } else {
                embedding
            }
        } else {
            continue;
        };

        for k in [open, close] {
            processed[seq.indices[k]] = resolved;
            // Marks that W1 turned into ON follow their bracket.
            for &i in &seq.indices[k + 1..] {
                if original[i] != BidiClass::NSM {
                    break;
                }
                processed[i] = resolved;
            }
        }
    }
}

/// N1/N2: resolve the remaining neutral and isolate formatting characters.
pub(crate) fn resolve_neutrals(seq: &IsolatingRunSequence, processed: &mut [BidiClass]) {
    let indices = &seq.indices;
    let embedding = seq.embedding_direction();
    let mut k = 0;
    while k < indices.len() {
        if !processed[indices[k]].is_neutral_or_isolate() {
            k += 1;
            continue;
        }
        let start = k;
        while k < indices.len() && processed[indices[k]].is_neutral_or_isolate() {
            k += 1;
        }
        let before = if start == 0 {
            seq.sos
        } else {
            strong_direction(processed[indices[start - 1]]).unwrap_or(embedding)
        };
        let after = if k == indices.len() {
            seq.eos
        } else {
            strong_direction(processed[indices[k]]).unwrap_or(embedding)
        };
        let resolved = if before == after { before } else { embedding };
        for &i in &indices[start..k] {
            processed[i] = resolved;
        }
    }
}
