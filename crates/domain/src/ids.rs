//! Identifiers used by the upstream game-stats sources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Length of a player id with hyphens removed.
const COMPACT_LEN: usize = 32;

/// A player id held in both of its canonical textual forms.
///
/// Upstream endpoints disagree on which form they accept: the account and
/// member lookups use the compact form, the profile listing the hyphenated
/// one. Both forms are lower-cased, and equality is defined on the compact
/// form, so `ABCD...` and `abcd-...` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerUuid {
    compact: String,
    hyphenated: String,
}

impl PlayerUuid {
    /// Parse a player id in compact or hyphenated form (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentity` if the input, after removing
    /// hyphens, is not exactly 32 hexadecimal characters.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let stripped = strip_hyphens(input);
        if stripped.len() != COMPACT_LEN || !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::invalid_identity(input));
        }
        let uuid = Uuid::try_parse(&stripped).map_err(|_| DomainError::invalid_identity(input))?;
        Ok(Self::from_uuid(uuid))
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            compact: uuid.simple().to_string(),
            hyphenated: uuid.hyphenated().to_string(),
        }
    }

    /// The 32-character form without hyphens.
    pub fn compact(&self) -> &str {
        &self.compact
    }

    /// The 8-4-4-4-12 hyphenated form.
    pub fn hyphenated(&self) -> &str {
        &self.hyphenated
    }

    /// Compare against an arbitrarily formatted key (hyphens and case ignored).
    pub fn matches_key(&self, key: &str) -> bool {
        strip_hyphens(key) == self.compact
    }
}

fn strip_hyphens(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for PlayerUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compact)
    }
}

impl FromStr for PlayerUuid {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PlayerUuid {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PlayerUuid> for String {
    fn from(id: PlayerUuid) -> String {
        id.compact
    }
}

impl From<Uuid> for PlayerUuid {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

/// Opaque profile identifier issued by the primary source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(String);

impl ProfileId {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is empty after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Profile id cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProfileId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ProfileId> for String {
    fn from(id: ProfileId) -> String {
        id.0
    }
}
