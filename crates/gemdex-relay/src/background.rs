//! Background process: owns the record cache.

use futures_util::{Stream, StreamExt};
use tracing::{debug, info, instrument};

use gemdex_core::KeyValueStore;
use gemdex_store::{RecordCache, ReplaceOutcome};

use crate::messages::RuntimeMessage;

/// Applies runtime messages to the record cache.
pub struct Background<S> {
    cache: RecordCache<S>,
}

impl<S: KeyValueStore> Background<S> {
    pub fn new(cache: RecordCache<S>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &RecordCache<S> {
        &self.cache
    }

    /// Apply one message. Storage failures are logged by the cache.
    #[instrument(skip_all)]
    pub async fn handle(&self, message: RuntimeMessage) -> Option<ReplaceOutcome> {
        match message {
            RuntimeMessage::RecordsUpdated { data } => {
                Some(self.cache.replace_records(data).await)
            }
            RuntimeMessage::OpenUrl { url, active } => {
                info!(%url, active, "Open URL requested");
                None
            }
        }
    }

    /// Handle messages until the inbox closes.
    pub async fn run<I>(&self, mut inbox: I)
    where
        I: Stream<Item = RuntimeMessage> + Unpin,
    {
        while let Some(message) = inbox.next().await {
            self.handle(message).await;
        }
        debug!("Runtime inbox closed; background stopping");
    }
}
