// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in layout direction key.

use core::fmt;
use core::str::FromStr;

use crate::key::EnvironmentKey;

/// The reading direction of the content in scope.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Left-to-right scripts, such as Latin or Hangul.
    #[default]
    LeftToRight,
    /// Right-to-left scripts, such as Arabic or Hebrew.
    RightToLeft,
}

impl LayoutDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }

    /// Returns `true` for [`LayoutDirection::RightToLeft`].
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::RightToLeft)
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LeftToRight => "Left to Right",
            Self::RightToLeft => "Right to Left",
        })
    }
}

/// Error returned when parsing a [`LayoutDirection`] fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseLayoutDirectionError {
    _private: (),
}

impl fmt::Display for ParseLayoutDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of `ltr`, `rtl`, `left-to-right`, `right-to-left`")
    }
}

impl core::error::Error for ParseLayoutDirectionError {}

impl FromStr for LayoutDirection {
    type Err = ParseLayoutDirectionError;

    /// Parses `ltr`, `rtl`, `left-to-right` or `right-to-left`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("ltr") || s.eq_ignore_ascii_case("left-to-right") {
            Ok(Self::LeftToRight)
        } else if s.eq_ignore_ascii_case("rtl") || s.eq_ignore_ascii_case("right-to-left") {
            Ok(Self::RightToLeft)
        } else {
            Err(ParseLayoutDirectionError { _private: () })
        }
    }
}

/// The key for the [`LayoutDirection`] in scope.
///
/// Defaults to [`LayoutDirection::LeftToRight`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutDirectionKey;

impl EnvironmentKey for LayoutDirectionKey {
    type Value = LayoutDirection;

    fn default_value() -> LayoutDirection {
        LayoutDirection::LeftToRight
    }

    fn name() -> &'static str {
        "LayoutDirection"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn parse_accepts_short_and_long_forms() {
        assert_eq!("ltr".parse(), Ok(LayoutDirection::LeftToRight));
        assert_eq!("RTL".parse(), Ok(LayoutDirection::RightToLeft));
        assert_eq!(" Left-To-Right ".parse(), Ok(LayoutDirection::LeftToRight));
        assert_eq!("right-to-left".parse(), Ok(LayoutDirection::RightToLeft));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "sideways".parse::<LayoutDirection>().unwrap_err();
        assert!(err.to_string().contains("`rtl`"));
    }

    #[test]
    fn flipped_and_rtl() {
        assert_eq!(
            LayoutDirection::LeftToRight.flipped(),
            LayoutDirection::RightToLeft
        );
        assert!(LayoutDirection::RightToLeft.is_rtl());
        assert!(!LayoutDirection::default().is_rtl());
    }

    #[test]
    fn display_matches_readable_text() {
        assert_eq!(LayoutDirection::LeftToRight.to_string(), "Left to Right");
        assert_eq!(LayoutDirection::RightToLeft.to_string(), "Right to Left");
    }

    #[test]
    fn key_default_and_name() {
        assert_eq!(
            LayoutDirectionKey::default_value(),
            LayoutDirection::LeftToRight
        );
        assert_eq!(LayoutDirectionKey::name(), "LayoutDirection");
    }
}
