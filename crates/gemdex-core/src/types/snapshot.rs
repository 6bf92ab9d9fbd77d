//! Full cache snapshot.

use serde::{Deserialize, Serialize};

use super::{EmojiMap, FavoriteSet, Options, Record};

/// Storage keys shared by every store implementation.
pub mod keys {
    pub const RECORDS: &str = "records";
    pub const FAVORITES: &str = "favorites";
    pub const EMOJI_MAP: &str = "emojiMap";
    pub const OPTIONS: &str = "options";
}

/// Everything the overlay needs, as last persisted.
///
/// The four parts are written independently; there is no guarantee that a
/// snapshot reflects a single point in time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSnapshot {
    pub records: Vec<Record>,
    pub favorites: FavoriteSet,
    pub emoji_map: EmojiMap,
    pub options: Options,
}
