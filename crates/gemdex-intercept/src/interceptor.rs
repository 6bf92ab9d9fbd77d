//! Sink connecting the network hooks to the parser and the page relay.

use std::sync::Arc;

use tracing::{debug, warn};

use gemdex_core::RecordPublisher;

use crate::hooks::InterceptSink;
use crate::parser::ResponseParser;

/// Parses intercepted bodies and publishes every record list found.
pub struct Interceptor {
    parser: ResponseParser,
    publisher: Arc<dyn RecordPublisher>,
}

impl Interceptor {
    pub fn new(parser: ResponseParser, publisher: Arc<dyn RecordPublisher>) -> Self {
        Self { parser, publisher }
    }
}

impl InterceptSink for Interceptor {
    fn on_match(&self, url: &str, body: &str) {
        let lists = self.parser.record_lists(body);
        debug!(url, bytes = body.len(), lists = lists.len(), "Parsed intercepted response");

        for records in lists {
            if let Err(e) = self.publisher.publish(&records) {
                warn!(url, error = %e, "Failed to publish intercepted records");
            }
        }
    }
}
