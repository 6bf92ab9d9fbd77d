//! Gem record and identifier types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, InvalidInputError};

/// Name the backend (and older builds of this crate) use for a Gem whose
/// real name could not be read.
pub const PLACEHOLDER_NAME: &str = "Unknown Gem";

/// Opaque, backend-assigned Gem identifier.
///
/// The only invariant is that it is non-empty; the backend format is not
/// documented and has changed before.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GemId(String);

impl GemId {
    /// Create a new id, rejecting empty strings.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidInputError::RecordId {
                value: s,
                reason: "id must not be empty".to_string(),
            }
            .into());
        }
        Ok(Self(s))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the id in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the id has zero length.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for GemId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<GemId> for String {
    fn from(id: GemId) -> Self {
        id.0
    }
}

impl fmt::Display for GemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A user-saved assistant configuration ("Gem").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Backend identifier; the uniqueness key.
    pub id: GemId,

    /// Display name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    /// Free-form description. Never absent; missing values decode as `""`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Record {
    /// Create a record.
    pub fn new(id: GemId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Whether this record may be shown and cached.
    ///
    /// A record is valid when its name is non-blank and is not the
    /// placeholder sentinel.
    pub fn is_valid(&self) -> bool {
        let name = self.name.trim();
        !name.is_empty() && name != PLACEHOLDER_NAME
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
