//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Rounded share of `part` in `whole`; zero when `whole` is zero.
    pub fn of(part: u32, whole: u32) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let ratio = (f64::from(part) / f64::from(whole) * 100.0).round();
        Self::new(ratio.clamp(0.0, 100.0) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_100() {
        assert_eq!(Percentage::new(101).value(), 100);
    }

    #[test]
    fn of_rounds_share() {
        assert_eq!(Percentage::of(1, 9).value(), 11);
        assert_eq!(Percentage::of(9, 9).value(), 100);
        assert_eq!(Percentage::of(3, 0), Percentage::ZERO);
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(Percentage::new(44).to_string(), "44%");
    }
}
