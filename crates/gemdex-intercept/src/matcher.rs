//! RPC section matching.
//!
//! A relevant segment is a JSON array whose first element is an RPC frame:
//! `["wrb.fr", "<rpc-id>", "<json-encoded payload>", ...]`. Anything else in
//! the segment, and anything after the third field of the frame, is ignored.

use serde_json::Value;
use tracing::trace;

/// Discriminator marking an RPC result frame.
pub const WRAPPER_TAG: &str = "wrb.fr";

/// Which RPC ids the matcher accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RpcFilter {
    /// Any RPC frame.
    Any,
    /// Only frames for this RPC id.
    Only(String),
}

impl RpcFilter {
    pub fn accepts(&self, rpc_id: &str) -> bool {
        match self {
            RpcFilter::Any => true,
            RpcFilter::Only(expected) => expected == rpc_id,
        }
    }
}

/// A matched RPC frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcSection {
    pub rpc_id: String,
    /// JSON-encoded payload, still undecoded.
    pub payload: String,
}

/// Return the frame's RPC id and payload if `segment` is a matching RPC frame.
///
/// Every failure (not JSON, wrong shape, wrong types, filtered-out id) is
/// "no match", never an error.
pub fn match_section(segment: &str, filter: &RpcFilter) -> Option<RpcSection> {
    let segment = segment.trim();
    if !segment.starts_with('[') {
        return None;
    }

    let data: Value = match serde_json::from_str(segment) {
        Ok(data) => data,
        Err(e) => {
            trace!(error = %e, "Skipping segment that is not JSON");
            return None;
        }
    };

    let frame = data.as_array()?.first()?.as_array()?;
    if frame.first()?.as_str()? != WRAPPER_TAG {
        return None;
    }

    let rpc_id = frame.get(1).and_then(Value::as_str).unwrap_or_default();
    if !filter.accepts(rpc_id) {
        trace!(rpc_id, "Skipping frame for another RPC");
        return None;
    }

    match frame.get(2)? {
        Value::String(payload) => Some(RpcSection {
            rpc_id: rpc_id.to_string(),
            payload: payload.clone(),
        }),
        _ => None,
    }
}
