//! Isolated-context bridge from the page window to the runtime.

use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::messages::{RuntimeMessage, WindowMessage};
use crate::runtime::RuntimeMessenger;
use crate::window::{Window, WindowEvent, WindowEvents, WindowId};

/// Forwards record messages posted by the page to the background.
///
/// Only events posted by the bridge's own window are considered; frames
/// sharing the bus and payloads that are not a known tagged message are
/// ignored.
pub struct IsolatedBridge<M> {
    window: WindowId,
    messenger: M,
}

impl<M: RuntimeMessenger> IsolatedBridge<M> {
    pub fn new(window: &Window, messenger: M) -> Self {
        Self {
            window: window.id(),
            messenger,
        }
    }

    /// Handle one window event. Returns whether it was forwarded.
    pub async fn handle(&self, event: WindowEvent) -> bool {
        if event.source != self.window {
            trace!(source = ?event.source, "Ignoring message from another window");
            return false;
        }

        let records = match serde_json::from_value::<WindowMessage>(event.data) {
            Ok(WindowMessage::RecordsIntercepted { records }) => records,
            Err(e) => {
                trace!(error = %e, "Ignoring unrecognized window message");
                return false;
            }
        };

        let count = records.len();
        let message = RuntimeMessage::RecordsUpdated { data: records };
        match self.messenger.send_message(message).await {
            Ok(()) => {
                debug!(count, "Forwarded records to background");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to send records to background");
                false
            }
        }
    }

    /// Handle events until the stream ends.
    pub async fn run(&self, mut events: WindowEvents) {
        while let Some(event) = events.next().await {
            self.handle(event).await;
        }
        debug!("Window closed; bridge stopping");
    }
}

impl<M: RuntimeMessenger + 'static> IsolatedBridge<M> {
    /// Start listening on `window` immediately and forward in the
    /// background. Messages posted after this returns are not missed.
    pub fn spawn(self, window: &Window) -> JoinHandle<()> {
        let events = window.events();
        tokio::spawn(async move { self.run(events).await })
    }
}
