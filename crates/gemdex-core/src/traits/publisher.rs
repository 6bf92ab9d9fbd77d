//! Page-side record publishing.

use crate::Result;
use crate::types::Record;

/// Publishes intercepted records out of the page context.
///
/// Publishing is fire-and-forget, like posting a window message: success
/// only means the message was handed to the transport.
pub trait RecordPublisher: Send + Sync {
    fn publish(&self, records: &[Record]) -> Result<()>;
}
