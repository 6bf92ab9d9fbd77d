//! Tagged messages exchanged between contexts.

use serde::{Deserialize, Serialize};

use gemdex_core::Record;

/// Posted on the page window by the page-context script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WindowMessage {
    #[serde(rename = "records-intercepted", alias = "GEMS_INTERCEPTED")]
    RecordsIntercepted {
        #[serde(alias = "gems")]
        records: Vec<Record>,
    },
}

/// Sent from the isolated context to the background process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuntimeMessage {
    #[serde(rename = "records-updated", alias = "GEMS_UPDATED")]
    RecordsUpdated { data: Vec<Record> },

    #[serde(rename = "OPEN_URL")]
    OpenUrl {
        url: String,
        #[serde(default = "default_active")]
        active: bool,
    },
}

fn default_active() -> bool {
    true
}
