//! # Pack Versions
//!
//! Every pack carries `meta.version`, kept in lockstep across languages by the
//! version-stamping command. The format check here is the one fatal input
//! check in the toolchain: a malformed version aborts the whole run before
//! any pack file is touched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A strict `MAJOR.MINOR.PATCH` version. No prefixes, suffixes or build metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Which component a release bumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Major,
    Minor,
    Patch,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `MAJOR.MINOR.PATCH` where each component is one or more ASCII digits.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidVersion(s.to_string());
        let mut parts = s.split('.');
        let mut component = || -> Result<u64, CoreError> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };
        let version = Self::new(component()?, component()?, component()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }

    /// The version that follows this one for a change of the given kind.
    ///
    /// Fails when the bumped component is already `u64::MAX`.
    pub fn bump(&self, kind: ChangeKind) -> Result<Self, CoreError> {
        let next = |n: u64| {
            n.checked_add(1)
                .ok_or_else(|| CoreError::InvalidVersion(format!("{self} cannot be bumped")))
        };
        Ok(match kind {
            ChangeKind::Major => Self::new(next(self.major)?, 0, 0),
            ChangeKind::Minor => Self::new(self.major, next(self.minor)?, 0),
            ChangeKind::Patch => Self::new(self.major, self.minor, next(self.patch)?),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
