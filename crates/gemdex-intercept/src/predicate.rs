//! Request URL matching for the network hooks.

use tracing::trace;
use url::Url;

/// Decides which intercepted requests are worth parsing.
///
/// A URL matches when its path contains the transport marker and, in narrow
/// mode, its `rpcids` query parameter lists the target RPC id. Relative
/// URLs (as the page usually issues them) are resolved against `base`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlPredicate {
    base: Url,
    transport_marker: String,
    rpc_id: Option<String>,
}

impl UrlPredicate {
    /// Match only batch requests carrying `rpc_id`.
    pub fn narrow(base: Url, transport_marker: impl Into<String>, rpc_id: impl Into<String>) -> Self {
        Self {
            base,
            transport_marker: transport_marker.into(),
            rpc_id: Some(rpc_id.into()),
        }
    }

    /// Match every request to the batch transport endpoint.
    pub fn broad(base: Url, transport_marker: impl Into<String>) -> Self {
        Self {
            base,
            transport_marker: transport_marker.into(),
            rpc_id: None,
        }
    }

    pub fn is_broad(&self) -> bool {
        self.rpc_id.is_none()
    }

    pub fn matches(&self, url: &str) -> bool {
        let Ok(parsed) = self.base.join(url) else {
            trace!(url, "Unparseable request URL");
            return false;
        };

        if !parsed.path().contains(&self.transport_marker) {
            return false;
        }

        let Some(rpc_id) = &self.rpc_id else {
            return true;
        };

        parsed
            .query_pairs()
            .filter(|(key, _)| key == "rpcids")
            .any(|(_, ids)| ids.split(',').any(|id| id.trim() == rpc_id))
    }
}
