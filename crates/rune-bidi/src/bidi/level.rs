use core::fmt;

use rune_config::DefaultDirection;

use crate::error::{BidiError, Result};

/// Maximum explicit embedding depth (BD2).
pub const MAX_DEPTH: u8 = 125;

/// An embedding level.
///
/// Explicit levels lie in `0..=125` ([`MAX_DEPTH`]), and [`BidiLevel::new`]
/// only accepts those. Resolved levels reported by
/// [`BidiInfo::level_at`](crate::BidiInfo::level_at) and the paragraph
/// accessors lie in `0..=126`: rules I1/I2 may lift a level-125 character
/// one step further.
///
/// Even levels are left-to-right, odd levels right-to-left.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
#[repr(transparent)]
pub struct BidiLevel(u8);

impl BidiLevel {
    /// Validate and wrap a raw level.
    pub fn new(number: u8) -> Result<Self> {
        if number <= MAX_DEPTH {
            Ok(Self(number))
        } else {
            Err(BidiError::InvalidLevel(number))
        }
    }

    /// Level 0.
    pub const fn ltr() -> Self {
        Self(0)
    }

    /// Level 1.
    pub const fn rtl() -> Self {
        Self(1)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn is_ltr(self) -> bool {
        self.0 & 1 == 0
    }

    pub const fn is_rtl(self) -> bool {
        self.0 & 1 == 1
    }

    /// Least odd level greater than this one, if within the maximum depth.
    pub fn next_rtl(self) -> Option<Self> {
        let next = (self.0 + 1) | 1;
        (next <= MAX_DEPTH).then_some(Self(next))
    }

    /// Least even level greater than this one, if within the maximum depth.
    pub fn next_ltr(self) -> Option<Self> {
        let next = (self.0 + 2) & !1;
        (next <= MAX_DEPTH).then_some(Self(next))
    }

    /// Raise by `amount` for rules I1/I2. Resolved levels may reach
    /// `MAX_DEPTH + 1`; anything higher saturates there.
    pub(crate) fn raise(self, amount: u8) -> Self {
        Self(self.0.saturating_add(amount).min(MAX_DEPTH + 1))
    }
}

impl fmt::Display for BidiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for BidiLevel {
    type Error = BidiError;

    fn try_from(number: u8) -> Result<Self> {
        Self::new(number)
    }
}

impl From<BidiLevel> for u8 {
    fn from(level: BidiLevel) -> Self {
        level.0
    }
}

/// Base direction hint for paragraph analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseDirection {
    /// Detect paragraph base direction from text (first strong char).
    #[default]
    Auto,
    /// Force overall left-to-right base direction.
    Ltr,
    /// Force overall right-to-left base direction.
    Rtl,
}

impl BaseDirection {
    pub fn to_level(self) -> Option<BidiLevel> {
        match self {
            BaseDirection::Auto => None,
            BaseDirection::Ltr => Some(BidiLevel::ltr()),
            BaseDirection::Rtl => Some(BidiLevel::rtl()),
        }
    }
}

impl From<DefaultDirection> for BaseDirection {
    fn from(direction: DefaultDirection) -> Self {
        match direction {
            DefaultDirection::Auto => BaseDirection::Auto,
            DefaultDirection::Ltr => BaseDirection::Ltr,
            DefaultDirection::Rtl => BaseDirection::Rtl,
        }
    }
}

/// Paragraph direction classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphDirection {
    Ltr,
    Rtl,
    Mixed,
}

impl ParagraphDirection {
    /// Ltr if every level is even, Rtl if every level is odd, Mixed
    /// otherwise. An empty slice counts as Ltr.
    pub fn from_levels(levels: &[BidiLevel]) -> Self {
        let has_ltr = levels.iter().any(|level| level.is_ltr());
        let has_rtl = levels.iter().any(|level| level.is_rtl());
        match (has_ltr, has_rtl) {
            (_, false) => ParagraphDirection::Ltr,
            (false, true) => ParagraphDirection::Rtl,
            (true, true) => ParagraphDirection::Mixed,
        }
    }
}
