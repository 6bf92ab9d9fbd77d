//! Full response parsing: envelope, RPC frame, record list.

use tracing::{debug, trace};

use gemdex_core::Record;

use crate::envelope::unwrap_envelope;
use crate::extractor::Extractor;
use crate::matcher::{RpcFilter, match_section};

/// Turns a raw batch response body into record lists.
///
/// An empty record list clears the cache downstream, so one is only
/// reported for frames of the list RPC. With an [`RpcFilter::Only`] filter
/// that is the filtered id; broad parsers name it with
/// [`with_list_rpc_id`](Self::with_list_rpc_id) or never report empty lists.
#[derive(Clone, Debug)]
pub struct ResponseParser {
    filter: RpcFilter,
    extractor: Extractor,
    list_rpc_id: Option<String>,
}

impl ResponseParser {
    pub fn new(filter: RpcFilter, extractor: Extractor) -> Self {
        let list_rpc_id = match &filter {
            RpcFilter::Only(id) => Some(id.clone()),
            RpcFilter::Any => None,
        };
        Self {
            filter,
            extractor,
            list_rpc_id,
        }
    }

    /// Set the RPC whose empty lists are reported.
    pub fn with_list_rpc_id(mut self, rpc_id: impl Into<String>) -> Self {
        self.list_rpc_id = Some(rpc_id.into());
        self
    }

    pub fn filter(&self) -> &RpcFilter {
        &self.filter
    }

    fn is_list_rpc(&self, rpc_id: &str) -> bool {
        self.list_rpc_id.as_deref() == Some(rpc_id)
    }

    /// Every record list found in `body`, one per matching segment.
    ///
    /// Segments are evaluated independently: a segment that fails to parse
    /// never prevents a later one from producing records.
    pub fn record_lists(&self, body: &str) -> Vec<Vec<Record>> {
        let mut lists = Vec::new();

        for (index, segment) in unwrap_envelope(body).into_iter().enumerate() {
            let Some(section) = match_section(segment, &self.filter) else {
                continue;
            };

            match self.extractor.extract(&section.payload) {
                Ok(Some(records)) if records.is_empty() && !self.is_list_rpc(&section.rpc_id) => {
                    trace!(index, rpc_id = %section.rpc_id, "Ignoring empty list from another RPC")
                }
                Ok(Some(records)) => lists.push(records),
                Ok(None) => trace!(index, "RPC frame carries no record list"),
                Err(e) => debug!(index, error = %e, "Skipping undecodable RPC payload"),
            }
        }

        lists
    }

    /// The first record list in `body`, if any.
    pub fn parse(&self, body: &str) -> Option<Vec<Record>> {
        self.record_lists(body).into_iter().next()
    }
}
