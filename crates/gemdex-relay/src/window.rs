//! Same-document message bus.
//!
//! Models `window.postMessage` between scripts sharing one document: every
//! listener sees every event, and each event records which window posted
//! it so listeners can reject frames and other foreign senders.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures_util::Stream;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{trace, warn};

const BUS_CAPACITY: usize = 64;

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a window (a document or a frame).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

impl WindowId {
    fn next() -> Self {
        Self(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A posted message.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowEvent {
    pub source: WindowId,
    pub data: Value,
}

/// Handle to a window's message bus. Clones share the bus and the id.
#[derive(Clone, Debug)]
pub struct Window {
    id: WindowId,
    sender: broadcast::Sender<WindowEvent>,
}

impl Window {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self {
            id: WindowId::next(),
            sender,
        }
    }

    /// A different window (such as an embedded frame) posting onto this
    /// window's bus.
    pub fn foreign(&self) -> Self {
        Self {
            id: WindowId::next(),
            sender: self.sender.clone(),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Post `data` to every current listener.
    ///
    /// Like its browser counterpart this never fails; with no listeners the
    /// message is simply dropped.
    pub fn post_message(&self, data: Value) {
        let event = WindowEvent {
            source: self.id,
            data,
        };
        if self.sender.send(event).is_err() {
            trace!(window = ?self.id, "No listeners for posted message");
        }
    }

    /// Listen for events posted from now on.
    ///
    /// The stream ends once every [`Window`] handle on this bus is dropped.
    pub fn events(&self) -> WindowEvents {
        let mut receiver = self.sender.subscribe();
        let stream = async_stream::stream! {
            loop {
                match receiver.recv().await {
                    Ok(event) => yield event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Window listener fell behind; messages dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        };

        WindowEvents {
            inner: Box::pin(stream),
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream of events posted on a window.
pub struct WindowEvents {
    inner: Pin<Box<dyn Stream<Item = WindowEvent> + Send>>,
}

impl Stream for WindowEvents {
    type Item = WindowEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use serde_json::json;

    #[tokio::test]
    async fn listeners_see_source_and_payload() {
        let window = Window::new();
        let frame = window.foreign();
        let mut events = window.events();

        window.post_message(json!({"n": 1}));
        frame.post_message(json!({"n": 2}));

        let first = events.next().await.unwrap();
        assert_eq!(first.source, window.id());
        assert_eq!(first.data, json!({"n": 1}));

        let second = events.next().await.unwrap();
        assert_eq!(second.source, frame.id());
        assert_ne!(second.source, window.id());
    }

    #[tokio::test]
    async fn posting_without_listeners_is_fine() {
        let window = Window::new();
        window.post_message(json!(null));
    }

    #[tokio::test]
    async fn stream_ends_when_bus_is_dropped() {
        let window = Window::new();
        let mut events = window.events();
        drop(window);
        assert!(events.next().await.is_none());
    }
}
