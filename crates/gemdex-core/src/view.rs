//! Overlay view model: search, favorites-first ordering and glyph overrides.
//!
//! Pure functions over a [`CacheSnapshot`](crate::CacheSnapshot)'s parts; the
//! rendering layer only has to draw the returned entries.

use std::cmp::Ordering;

use serde::Serialize;
use url::Url;

use crate::error::{Error, InvalidInputError};
use crate::types::{EmojiMap, FavoriteSet, GemId, Record};

/// Base URL a Gem is opened under.
pub const GEM_APP_URL: &str = "https://gemini.google.com/app";

/// A record decorated for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GemEntry {
    #[serde(flatten)]
    pub record: Record,
    pub emoji: String,
    pub is_favorite: bool,
}

/// Build the display list.
///
/// A non-empty `query` keeps records whose name or description contains it,
/// ignoring case. Favorites sort first, then by name, then by id.
pub fn entries(
    records: &[Record],
    favorites: &FavoriteSet,
    emoji_map: &EmojiMap,
    query: Option<&str>,
) -> Vec<GemEntry> {
    let needle = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut list: Vec<GemEntry> = records
        .iter()
        .filter(|record| match &needle {
            Some(needle) => {
                record.name.to_lowercase().contains(needle)
                    || record.description.to_lowercase().contains(needle)
            }
            None => true,
        })
        .map(|record| GemEntry {
            emoji: emoji_map.glyph_for(&record.id).to_string(),
            is_favorite: favorites.contains(&record.id),
            record: record.clone(),
        })
        .collect();

    list.sort_by(compare_entries);
    list
}

fn compare_entries(a: &GemEntry, b: &GemEntry) -> Ordering {
    b.is_favorite
        .cmp(&a.is_favorite)
        .then_with(|| {
            a.record
                .name
                .to_lowercase()
                .cmp(&b.record.name.to_lowercase())
        })
        .then_with(|| a.record.id.cmp(&b.record.id))
}

/// URL that opens the Gem in the host application.
pub fn gem_url(id: &GemId) -> Result<Url, Error> {
    let mut url = Url::parse(GEM_APP_URL).map_err(|e| InvalidInputError::Url {
        value: GEM_APP_URL.to_string(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("gem_id", id.as_str());
    Ok(url)
}
