//! gemdex-store - Local Gem cache and storage reconciliation.

mod cache;
mod codec;
mod file;
mod memory;
mod preferences;

pub use cache::{RecordCache, ReplaceOutcome};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use preferences::Preferences;
