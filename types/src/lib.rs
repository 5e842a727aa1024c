//! Core domain types for the bingo caller.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

pub mod ui;

use std::fmt;

use thiserror::Error;

// ============================================================================
// Ball Numbers
// ============================================================================

/// A drawable number, always `>= 1`.
///
/// Displays zero-padded to two digits (`07`, `42`); three-digit numbers are
/// shown as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallNumber(u16);

impl BallNumber {
    /// Returns `None` for zero, which is never a valid ball.
    #[must_use]
    pub const fn new(value: u16) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Index into a `1..=size` mark table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BallNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

// ============================================================================
// Universe Size
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("universe size {value} is outside {min}..={max}", min = UniverseSize::MIN, max = UniverseSize::MAX)]
pub struct SizeOutOfRange {
    pub value: i64,
}

/// Count of numbers eligible for drawing, numbered `1..=size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniverseSize(u16);

impl UniverseSize {
    pub const MIN: u16 = 2;
    pub const MAX: u16 = 999;
    pub const DEFAULT: Self = Self(75);

    /// Strict constructor: rejects values outside `MIN..=MAX`.
    pub fn new(value: u16) -> Result<Self, SizeOutOfRange> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SizeOutOfRange {
                value: i64::from(value),
            })
        }
    }

    /// Saturating constructor: any integer is pulled into `MIN..=MAX`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(clamped as u16)
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Width in characters of the widest ball label for this size.
    #[must_use]
    pub fn label_width(self) -> usize {
        self.0.to_string().len().max(2)
    }
}

impl Default for UniverseSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for UniverseSize {
    type Error = SizeOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map_err(|_| SizeOutOfRange { value })
            .and_then(Self::new)
    }
}

impl fmt::Display for UniverseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Pending Size
// ============================================================================

/// A user-entered size staged for the next reset.
///
/// Holds the raw parsed integer; clamping happens only in [`PendingSize::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingSize(Option<i64>);

impl PendingSize {
    #[must_use]
    pub const fn new(value: Option<i64>) -> Self {
        Self(value)
    }

    /// Parses free-form text the way a browser numeric field hands it to
    /// `parseInt`: leading whitespace, an optional sign, then leading digits.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self(parse_leading_int(text))
    }

    #[must_use]
    pub const fn value(self) -> Option<i64> {
        self.0
    }

    /// Absent and zero both fall back to the default; everything else clamps.
    ///
    /// Negative input is kept as a real number and clamps to the minimum.
    #[must_use]
    pub fn resolve(self) -> UniverseSize {
        match self.0 {
            Some(value) if value != 0 => UniverseSize::clamped(value),
            _ => UniverseSize::DEFAULT,
        }
    }
}

impl From<i64> for PendingSize {
    fn from(value: i64) -> Self {
        Self(Some(value))
    }
}

/// Leading-integer parse. Returns `None` when no digit follows the optional sign.
/// Overlong digit runs saturate instead of failing.
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}
