//! Core gemdex types.
//!
//! Identifier and glyph types validate at construction time; the record
//! type itself does not, because cached data from older builds must still be
//! loadable so that it can be filtered.

mod emoji;
mod favorites;
mod options;
mod record;
mod snapshot;

pub use emoji::{DEFAULT_GLYPH, EmojiGlyph, EmojiMap};
pub use favorites::FavoriteSet;
pub use options::Options;
pub use record::{GemId, PLACEHOLDER_NAME, Record};
pub use snapshot::{CacheSnapshot, keys};
