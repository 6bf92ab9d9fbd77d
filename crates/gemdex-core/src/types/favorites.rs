//! Favorite Gem ids.

use serde::{Deserialize, Serialize};

use super::GemId;

/// Ids the user starred, in the order they were added.
///
/// Independent of the record list: ids survive list replacement and are
/// simply not shown while the backend does not report them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(Vec<String>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &GemId) -> bool {
        self.0.iter().any(|fav| fav == id.as_str())
    }

    /// Add or remove `id`. Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, id: &GemId) -> bool {
        if let Some(pos) = self.0.iter().position(|fav| fav == id.as_str()) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id.as_str().to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<GemId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = GemId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            if !set.contains(&id) {
                set.0.push(id.into());
            }
        }
        set
    }
}
