//! Core traits for storage and relay behavior.

mod publisher;
mod store;

pub use publisher::RecordPublisher;
pub use store::KeyValueStore;
