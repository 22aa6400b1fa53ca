//! Explicit levels and directions (rules X1-X8).

use log::trace;

use crate::bidi::level::{BidiLevel, MAX_DEPTH};
use crate::bidi::paragraph::first_strong;
use crate::unicode::BidiClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Override {
    Neutral,
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy)]
struct Status {
    level: BidiLevel,
    override_status: Override,
    isolate: bool,
}

/// Directional status stack with the overflow counters of X1.
struct StatusStack {
    entries: Vec<Status>,
    overflow_isolates: usize,
    overflow_embeddings: usize,
    valid_isolates: usize,
}

impl StatusStack {
    fn new(base_level: BidiLevel) -> Self {
        let mut entries = Vec::with_capacity(MAX_DEPTH as usize + 2);
        entries.push(Status {
            level: base_level,
            override_status: Override::Neutral,
            isolate: false,
        });
        Self {
            entries,
            overflow_isolates: 0,
            overflow_embeddings: 0,
            valid_isolates: 0,
        }
    }

    fn top(&self) -> Status {
        // The paragraph entry is never popped.
        self.entries[self.entries.len() - 1]
    }

    fn can_push(&self, level: Option<BidiLevel>) -> Option<BidiLevel> {
        level.filter(|_| self.overflow_isolates == 0 && self.overflow_embeddings == 0)
    }

    /// X2-X5: embeddings and overrides.
    fn push_embedding(&mut self, rtl: bool, override_status: Override, pos: usize) {
        let top = self.top().level;
        let next = if rtl { top.next_rtl() } else { top.next_ltr() };
        match self.can_push(next) {
            Some(level) => self.entries.push(Status {
                level,
                override_status,
                isolate: false,
            }),
            None => {
                if self.overflow_isolates == 0 {
                    self.overflow_embeddings += 1;
                }
                trace!("embedding overflow at {pos}");
            }
        }
    }

    /// X5a-X5c: isolate initiators.
    fn push_isolate(&mut self, rtl: bool, pos: usize) {
        let top = self.top().level;
        let next = if rtl { top.next_rtl() } else { top.next_ltr() };
        match self.can_push(next) {
            Some(level) => {
                self.valid_isolates += 1;
                self.entries.push(Status {
                    level,
                    override_status: Override::Neutral,
                    isolate: true,
                });
            }
            None => {
                self.overflow_isolates += 1;
                trace!("isolate overflow at {pos}");
            }
        }
    }

    /// X6a: PDI.
    fn pop_isolate(&mut self) {
        if self.overflow_isolates > 0 {
            self.overflow_isolates -= 1;
        } else if self.valid_isolates > 0 {
            self.overflow_embeddings = 0;
            while self.entries.len() > 1 && !self.top().isolate {
                self.entries.pop();
            }
            if self.entries.len() > 1 {
                self.entries.pop();
            }
            self.valid_isolates -= 1;
        }
    }

    /// X7: PDF.
    fn pop_embedding(&mut self) {
        if self.overflow_isolates > 0 {
            return;
        }
        if self.overflow_embeddings > 0 {
            self.overflow_embeddings -= 1;
        } else if !self.top().isolate && self.entries.len() >= 2 {
            self.entries.pop();
        }
    }
}

fn apply_override(class: BidiClass, status: Status) -> BidiClass {
    match status.override_status {
        Override::Neutral => class,
        Override::Ltr => BidiClass::L,
        Override::Rtl => BidiClass::R,
    }
}

/// Resolve explicit embedding levels for one paragraph.
///
/// `classes` are the original classes of the paragraph and `pdis` their
/// BD9 matches. Returns per-character levels and the classes after
/// directional overrides. Levels of X9-removed characters are provisional
/// and replaced once implicit resolution is done.
pub(crate) fn resolve_explicit(
    classes: &[BidiClass],
    pdis: &[Option<usize>],
    base_level: BidiLevel,
) -> (Vec<BidiLevel>, Vec<BidiClass>) {
    let mut levels = vec![base_level; classes.len()];
    let mut processed = classes.to_vec();
    let mut stack = StatusStack::new(base_level);

    for (i, &class) in classes.iter().enumerate() {
        let current = stack.top();
        match class {
            BidiClass::RLE | BidiClass::LRE | BidiClass::RLO | BidiClass::LRO => {
                levels[i] = current.level;
                let rtl = matches!(class, BidiClass::RLE | BidiClass::RLO);
                let override_status = match class {
                    BidiClass::RLO => Override::Rtl,
                    BidiClass::LRO => Override::Ltr,
                    _ => Override::Neutral,
                };
                stack.push_embedding(rtl, override_status, i);
            }
            BidiClass::RLI | BidiClass::LRI | BidiClass::FSI => {
                levels[i] = current.level;
                processed[i] = apply_override(class, current);
                let rtl = match class {
                    BidiClass::RLI => true,
                    BidiClass::LRI => false,
                    _ => {
                        let end = pdis[i].unwrap_or(classes.len());
                        matches!(
                            first_strong(classes, pdis, i + 1, end),
                            Some(BidiClass::R | BidiClass::AL)
                        )
                    }
                };
                stack.push_isolate(rtl, i);
            }
            BidiClass::PDI => {
                stack.pop_isolate();
                let current = stack.top();
                levels[i] = current.level;
                processed[i] = apply_override(class, current);
            }
            BidiClass::PDF => {
                stack.pop_embedding();
                levels[i] = stack.top().level;
            }
            // X8: explicit state ends with the paragraph.
            BidiClass::B => levels[i] = base_level,
            BidiClass::BN => levels[i] = current.level,
            _ => {
                levels[i] = current.level;
                processed[i] = apply_override(class, current);
            }
        }
    }

    (levels, processed)
}
