//! Platform names for third-party verifications.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A third-party platform an identity can be verified against.
///
/// Parsing is case-insensitive and never fails: unrecognized names map to
/// `Other`, preserving the original string for display and for the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    GitHub,
    Twitter,
    LinkedIn,
    Instagram,
    Facebook,
    Other(String),
}

impl Platform {
    /// The enumerated set of platforms with a dedicated verification script.
    pub const KNOWN: [Self; 5] = [
        Self::GitHub,
        Self::Twitter,
        Self::LinkedIn,
        Self::Instagram,
        Self::Facebook,
    ];

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "github" => Self::GitHub,
            "twitter" | "x" => Self::Twitter,
            "linkedin" => Self::LinkedIn,
            "instagram" => Self::Instagram,
            "facebook" => Self::Facebook,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::GitHub => "github",
            Self::Twitter => "twitter",
            Self::LinkedIn => "linkedin",
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Err(de::Error::custom("empty platform name"));
        }
        Ok(Self::parse(&s))
    }
}
