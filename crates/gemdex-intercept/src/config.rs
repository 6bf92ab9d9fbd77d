//! Interception configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::extractor::{Extractor, IdGate};
use crate::matcher::RpcFilter;
use crate::parser::ResponseParser;
use crate::predicate::UrlPredicate;

/// RPC id of the "list Gems" call.
pub const DEFAULT_RPC_ID: &str = "CNgdBe";

/// Path fragment identifying the batch transport endpoint.
pub const DEFAULT_TRANSPORT_MARKER: &str = "/batchexecute";

/// Origin relative request URLs are resolved against.
pub const DEFAULT_PAGE_ORIGIN: &str = "https://gemini.google.com";

/// How strictly requests and RPC frames are matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Only requests and frames for the configured RPC id.
    #[default]
    Narrow,
    /// Every batch request and every RPC frame.
    Broad,
}

/// Settings for the hooks and the response parser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptConfig {
    pub rpc_id: String,
    pub match_mode: MatchMode,
    pub transport_marker: String,
    pub page_origin: Url,
    /// Minimum first-id length a located list must exceed; `None` disables
    /// the check.
    pub min_id_len: Option<usize>,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            rpc_id: DEFAULT_RPC_ID.to_string(),
            match_mode: MatchMode::Narrow,
            transport_marker: DEFAULT_TRANSPORT_MARKER.to_string(),
            page_origin: Url::parse(DEFAULT_PAGE_ORIGIN).expect("default origin is a valid URL"),
            min_id_len: None,
        }
    }
}

impl InterceptConfig {
    pub fn predicate(&self) -> UrlPredicate {
        match self.match_mode {
            MatchMode::Narrow => UrlPredicate::narrow(
                self.page_origin.clone(),
                &self.transport_marker,
                &self.rpc_id,
            ),
            MatchMode::Broad => {
                UrlPredicate::broad(self.page_origin.clone(), &self.transport_marker)
            }
        }
    }

    pub fn filter(&self) -> RpcFilter {
        match self.match_mode {
            MatchMode::Narrow => RpcFilter::Only(self.rpc_id.clone()),
            MatchMode::Broad => RpcFilter::Any,
        }
    }

    pub fn gate(&self) -> IdGate {
        IdGate {
            min_id_len: self.min_id_len,
        }
    }

    pub fn parser(&self) -> ResponseParser {
        ResponseParser::new(self.filter(), Extractor::default().with_gate(self.gate()))
            .with_list_rpc_id(&self.rpc_id)
    }
}
