//! gemdex-core - Core types and traits for the gemdex Gem interceptor.

pub mod error;
pub mod traits;
pub mod types;
pub mod view;

pub use error::Error;
pub use traits::{KeyValueStore, RecordPublisher};
pub use types::{
    CacheSnapshot, DEFAULT_GLYPH, EmojiGlyph, EmojiMap, FavoriteSet, GemId, Options,
    PLACEHOLDER_NAME, Record, keys,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
