//! Page-side publisher.

use serde_json::Value;
use tracing::debug;

use gemdex_core::error::RelayError;
use gemdex_core::{Record, RecordPublisher, Result};

use crate::messages::WindowMessage;
use crate::window::Window;

/// Posts every intercepted record list on the page window.
#[derive(Clone, Debug)]
pub struct PagePublisher {
    window: Window,
}

impl PagePublisher {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl RecordPublisher for PagePublisher {
    fn publish(&self, records: &[Record]) -> Result<()> {
        let message = WindowMessage::RecordsIntercepted {
            records: records.to_vec(),
        };
        let data: Value = serde_json::to_value(&message).map_err(|e| RelayError::Encode {
            message: e.to_string(),
        })?;

        self.window.post_message(data);
        debug!(count = records.len(), "Posted intercepted records");
        Ok(())
    }
}
