//! User preferences stored next to the record list.

use tracing::debug;

use gemdex_core::{EmojiGlyph, EmojiMap, FavoriteSet, GemId, KeyValueStore, Options, Result, keys};

use crate::codec::{read_key, write_key};

/// Favorites, per-Gem emoji and display options.
///
/// Unlike [`RecordCache`](crate::RecordCache), every operation here reports
/// storage failures to the caller: these are explicit user actions.
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn favorites(&self) -> Result<FavoriteSet> {
        Ok(read_key(&self.store, keys::FAVORITES)
            .await?
            .unwrap_or_default())
    }

    /// Star or unstar `id`. Returns whether it is a favorite afterwards.
    pub async fn toggle_favorite(&self, id: &GemId) -> Result<bool> {
        let mut favorites = self.favorites().await?;
        let starred = favorites.toggle(id);
        write_key(&self.store, keys::FAVORITES, &favorites).await?;
        debug!(%id, starred, "Toggled favorite");
        Ok(starred)
    }

    pub async fn emoji_map(&self) -> Result<EmojiMap> {
        Ok(read_key(&self.store, keys::EMOJI_MAP)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_emoji(&self, id: &GemId, glyph: EmojiGlyph) -> Result<()> {
        let mut map = self.emoji_map().await?;
        map.set(id, glyph);
        write_key(&self.store, keys::EMOJI_MAP, &map).await
    }

    /// Drop the override for `id`. Returns whether one existed.
    pub async fn clear_emoji(&self, id: &GemId) -> Result<bool> {
        let mut map = self.emoji_map().await?;
        if map.remove(id).is_none() {
            return Ok(false);
        }
        write_key(&self.store, keys::EMOJI_MAP, &map).await?;
        Ok(true)
    }

    pub async fn options(&self) -> Result<Options> {
        Ok(read_key(&self.store, keys::OPTIONS)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_options(&self, options: Options) -> Result<()> {
        write_key(&self.store, keys::OPTIONS, &options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde_json::json;

    fn id(s: &str) -> GemId {
        GemId::new(s).unwrap()
    }

    #[tokio::test]
    async fn favorites_toggle_and_persist() {
        let prefs = Preferences::new(MemoryStore::new());

        assert!(prefs.toggle_favorite(&id("a")).await.unwrap());
        assert!(prefs.toggle_favorite(&id("b")).await.unwrap());
        assert!(!prefs.toggle_favorite(&id("a")).await.unwrap());

        let stored = prefs.store().get(keys::FAVORITES).await.unwrap();
        assert_eq!(stored, Some(json!(["b"])));
    }

    #[tokio::test]
    async fn emoji_set_and_clear() {
        let prefs = Preferences::new(MemoryStore::new());
        let glyph = EmojiGlyph::new("🚀").unwrap();

        prefs.set_emoji(&id("a"), glyph).await.unwrap();
        assert_eq!(prefs.emoji_map().await.unwrap().glyph_for(&id("a")), "🚀");

        assert!(prefs.clear_emoji(&id("a")).await.unwrap());
        assert!(!prefs.clear_emoji(&id("a")).await.unwrap());
        assert_eq!(
            prefs.emoji_map().await.unwrap().glyph_for(&id("a")),
            gemdex_core::DEFAULT_GLYPH
        );
    }

    #[tokio::test]
    async fn options_default_then_update() {
        let prefs = Preferences::new(MemoryStore::new());
        assert_eq!(prefs.options().await.unwrap(), Options::default());

        let pinned = Options {
            pinned: true,
            ..Options::default()
        };
        prefs.set_options(pinned).await.unwrap();

        assert_eq!(
            prefs.store().get(keys::OPTIONS).await.unwrap(),
            Some(json!({"pinned": true, "showInEmptyState": true, "showInChat": true}))
        );
    }

    #[tokio::test]
    async fn undecodable_preferences_are_errors() {
        let store = MemoryStore::new();
        store.set(keys::FAVORITES, json!({"a": 1})).await.unwrap();
        let prefs = Preferences::new(store);

        assert!(prefs.toggle_favorite(&id("a")).await.is_err());
    }
}
