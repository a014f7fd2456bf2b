//! Runtime extension versions
//!
//! The platform reports its runtime version either as a pinned alias (`~3`)
//! or as a full build string (`3.0.15417`). Both map to the same major
//! version for compatibility checks; anything else is treated as unknown and
//! skipped at comparison sites.

use std::fmt;
use std::str::FromStr;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Major version of the function runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuntimeVersion {
    /// Legacy v1 runtime; worker runtime checks do not apply to it.
    #[serde(rename = "~1")]
    V1,
    #[serde(rename = "~2")]
    V2,
    #[serde(rename = "~3")]
    V3,
    #[serde(rename = "~4")]
    V4,
}

impl RuntimeVersion {
    /// Parse a reported version string (`~3`, `3`, or `3.0.15417`).
    ///
    /// Returns `None` for anything that does not carry a recognized major
    /// version, including preview aliases like `beta` or `latest`.
    pub fn parse(raw: &str) -> Option<Self> {
        let pattern = Regex::new(r"^~?([0-9]+)(\.[0-9A-Za-z.-]*)?$").ok()?;
        let captures = pattern.captures(raw.trim())?;
        match captures.get(1)?.as_str() {
            "1" => Some(RuntimeVersion::V1),
            "2" => Some(RuntimeVersion::V2),
            "3" => Some(RuntimeVersion::V3),
            "4" => Some(RuntimeVersion::V4),
            _ => None,
        }
    }

    /// Returns true for the legacy v1 runtime.
    pub fn is_legacy(self) -> bool {
        self == RuntimeVersion::V1
    }

    /// The pinned alias form (`~3`).
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeVersion::V1 => "~1",
            RuntimeVersion::V2 => "~2",
            RuntimeVersion::V3 => "~3",
            RuntimeVersion::V4 => "~4",
        }
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuntimeVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unrecognized runtime version \"{s}\""))
    }
}
