//! Weak type resolution (rules W1-W7).

use crate::bidi::sequence::IsolatingRunSequence;
use crate::unicode::BidiClass;

/// Apply W1-W7 to one isolating run sequence, rewriting `processed` in
/// place.
pub(crate) fn resolve_weak(seq: &IsolatingRunSequence, processed: &mut [BidiClass]) {
    let indices = &seq.indices;

    // W1
    let mut prev = seq.sos;
    for &i in indices {
        if processed[i] == BidiClass::NSM {
            processed[i] = if prev.is_isolate_control() {
                BidiClass::ON
            } else {
                prev
            };
        }
        prev = processed[i];
    }

    // W2, W3
    let mut last_strong = seq.sos;
    for &i in indices {
        match processed[i] {
            BidiClass::L | BidiClass::R => last_strong = processed[i],
            BidiClass::AL => {
                last_strong = BidiClass::AL;
                processed[i] = BidiClass::R;
            }
            BidiClass::EN if last_strong == BidiClass::AL => processed[i] = BidiClass::AN,
            _ => {}
        }
    }

    // W4
    for k in 1..indices.len().saturating_sub(1) {
        let before = processed[indices[k - 1]];
        let after = processed[indices[k + 1]];
        let i = indices[k];
        processed[i] = match (processed[i], before, after) {
            (BidiClass::ES, BidiClass::EN, BidiClass::EN)
            | (BidiClass::CS, BidiClass::EN, BidiClass::EN) => BidiClass::EN,
            (BidiClass::CS, BidiClass::AN, BidiClass::AN) => BidiClass::AN,
            (class, _, _) => class,
        };
    }

    // W5
    let mut k = 0;
    while k < indices.len() {
        if processed[indices[k]] != BidiClass::ET {
            k += 1;
            continue;
        }
        let start = k;
        while k < indices.len() && processed[indices[k]] == BidiClass::ET {
            k += 1;
        }
        let touches_en = (start > 0 && processed[indices[start - 1]] == BidiClass::EN)
            || (k < indices.len() && processed[indices[k]] == BidiClass::EN);
        if touches_en {
            for &i in &indices[start..k] {
                processed[i] = BidiClass::EN;
            }
        }
    }

    // W6
    for &i in indices {
        if matches!(processed[i], BidiClass::ES | BidiClass::ET | BidiClass::CS) {
            processed[i] = BidiClass::ON;
        }
    }

    // W7
    let mut last_strong = seq.sos;
    for &i in indices {
        match processed[i] {
            BidiClass::L | BidiClass::R => last_strong = processed[i],
            BidiClass::EN if last_strong == BidiClass::L => processed[i] = BidiClass::L,
            _ => {}
        }
    }
}
