//! Extension runtime messaging between the isolated context and the
//! background process.

use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures_util::Stream;
use tokio::sync::mpsc;

use gemdex_core::Result;
use gemdex_core::error::RelayError;

use crate::messages::RuntimeMessage;

const RUNTIME_CHANNEL: &str = "runtime";

/// Delivers messages to the background process.
#[async_trait]
pub trait RuntimeMessenger: Send + Sync {
    async fn send_message(&self, message: RuntimeMessage) -> Result<()>;
}

/// In-process runtime backed by a bounded channel.
#[derive(Clone, Debug)]
pub struct ChannelRuntime {
    sender: mpsc::Sender<RuntimeMessage>,
}

#[async_trait]
impl RuntimeMessenger for ChannelRuntime {
    async fn send_message(&self, message: RuntimeMessage) -> Result<()> {
        self.sender.send(message).await.map_err(|_| {
            RelayError::NotListening {
                channel: RUNTIME_CHANNEL.to_string(),
            }
            .into()
        })
    }
}

/// Receiving end of a [`ChannelRuntime`], consumed by the background.
pub struct RuntimeInbox {
    inner: Pin<Box<dyn Stream<Item = RuntimeMessage> + Send>>,
}

impl Stream for RuntimeInbox {
    type Item = RuntimeMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Create a runtime channel holding at most `capacity` undelivered messages.
pub fn channel(capacity: usize) -> (ChannelRuntime, RuntimeInbox) {
    let (sender, mut receiver) = mpsc::channel(capacity);

    let stream = async_stream::stream! {
        while let Some(message) = receiver.recv().await {
            yield message;
        }
    };

    (
        ChannelRuntime { sender },
        RuntimeInbox {
            inner: Box::pin(stream),
        },
    )
}
