//! Rule-bearing objects owned by tables and characters.

use core::str::FromStr;

use super::{ObjectId, Position};
use crate::catalog::{CardKind, ObjectKind};

/// Rule-text version tag (`"3.3"`, `"4.0"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl core::fmt::Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid version tag '{0}'")]
pub struct VersionParseError(pub String);

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionParseError(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(err)?;
        Ok(Self {
            major: major.parse().map_err(|_| err())?,
            minor: minor.parse().map_err(|_| err())?,
        })
    }
}

/// Usage counter of an object. Kept within `0..=max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Usage {
    pub current: u32,
    pub max: u32,
}

impl Usage {
    pub const NONE: Self = Self { current: 0, max: 0 };

    pub const fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Adds `delta`, saturating at both ends of `0..=max`.
    pub fn apply_delta(&mut self, delta: i32) {
        let next = i64::from(self.current) + i64::from(delta);
        self.current = next.clamp(0, i64::from(self.max)) as u32;
    }

    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.max);
    }
}

/// Status, summon, support or equipment hosted by the match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Object {
    pub id: ObjectId,
    pub position: Position,
    pub kind: ObjectKind,
    pub version: Version,
    pub usage: Usage,
    /// Set for statuses whose effect depends on the talent of their creator.
    pub talent_activated: bool,
}

impl Object {
    pub fn name(&self) -> String {
        self.kind.name().to_string()
    }

    /// Depleted objects flagged by their kind leave the board.
    pub fn should_remove(&self) -> bool {
        self.usage.is_depleted() && self.kind.removes_when_depleted()
    }
}

/// Action card in a hand or deck.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: ObjectId,
    pub position: Position,
    pub kind: CardKind,
    pub version: Version,
}

impl Card {
    pub fn name(&self) -> String {
        self.kind.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_round_trips_through_text() {
        let version: Version = "4.0".parse().expect("valid tag");
        assert_eq!(version, Version::new(4, 0));
        assert_eq!(version.to_string(), "4.0");
        assert!(Version::new(3, 3) < Version::new(4, 0));
        assert!("four".parse::<Version>().is_err());
    }

    #[test]
    fn usage_saturates() {
        let mut usage = Usage::full(2);
        usage.apply_delta(-5);
        assert_eq!(usage.current, 0);
        usage.apply_delta(7);
        assert_eq!(usage.current, 2);
        usage.set(9);
        assert_eq!(usage.current, 2);
    }
}
