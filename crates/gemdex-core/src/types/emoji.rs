//! User-assigned emoji glyphs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

use super::GemId;

/// Glyph shown for a Gem that has no user override.
pub const DEFAULT_GLYPH: &str = "💎";

/// Maximum number of composed characters in a glyph.
const MAX_COMPOSED: usize = 2;

/// A short, user-chosen glyph: one or two composed characters.
///
/// A composed character is a base scalar together with the joiners,
/// variation selectors, skin-tone modifiers and combining marks attached to
/// it, so `"👩‍💻"` and `"🇫🇮"` each count once.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmojiGlyph(String);

impl EmojiGlyph {
    /// Validate and wrap a glyph. Surrounding whitespace is trimmed.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let trimmed = s.as_ref().trim();
        let count = composed_len(trimmed);

        if count == 0 {
            return Err(InvalidInputError::Emoji {
                value: s.as_ref().to_string(),
                reason: "glyph must not be empty".to_string(),
            }
            .into());
        }
        if count > MAX_COMPOSED {
            return Err(InvalidInputError::Emoji {
                value: s.as_ref().to_string(),
                reason: format!("glyph has {count} characters, at most {MAX_COMPOSED} allowed"),
            }
            .into());
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmojiGlyph {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<EmojiGlyph> for String {
    fn from(glyph: EmojiGlyph) -> Self {
        glyph.0
    }
}

impl fmt::Display for EmojiGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map from Gem id to the user's glyph override.
///
/// Stored values are kept verbatim, even ones that would no longer pass
/// [`EmojiGlyph`] validation, so a round trip through the cache never loses
/// an assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiMap(BTreeMap<String, String>);

impl EmojiMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The override for `id`, if any.
    pub fn get(&self, id: &GemId) -> Option<&str> {
        self.0.get(id.as_str()).map(String::as_str)
    }

    /// Assign a glyph, returning the previous one.
    pub fn set(&mut self, id: &GemId, glyph: EmojiGlyph) -> Option<String> {
        self.0.insert(id.as_str().to_string(), glyph.into())
    }

    /// Remove an override, returning it.
    pub fn remove(&mut self, id: &GemId) -> Option<String> {
        self.0.remove(id.as_str())
    }

    /// The glyph to display: the override, or the default.
    pub fn glyph_for(&self, id: &GemId) -> &str {
        self.get(id).unwrap_or(DEFAULT_GLYPH)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Count composed characters in `s`.
fn composed_len(s: &str) -> usize {
    let mut count = 0;
    let mut after_joiner = false;
    let mut open_flag = false;

    for c in s.chars() {
        if is_joiner(c) {
            after_joiner = true;
            continue;
        }
        if after_joiner || is_extender(c) {
            after_joiner = false;
            continue;
        }
        if is_regional_indicator(c) {
            if open_flag {
                open_flag = false;
                continue;
            }
            open_flag = true;
        } else {
            open_flag = false;
        }
        count += 1;
    }

    count
}

fn is_joiner(c: char) -> bool {
    c == '\u{200D}'
}

fn is_extender(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE00}'..='\u{FE0F}'
        | '\u{1F3FB}'..='\u{1F3FF}'
        | '\u{E0020}'..='\u{E007F}'
    )
}

fn is_regional_indicator(c: char) -> bool {
    matches!(c, '\u{1F1E6}'..='\u{1F1FF}')
}
