//! Gem record extraction from a decoded RPC payload.
//!
//! The payload is an undocumented positional structure. Where the record
//! list lives depends on the backend version, so locating it is delegated to
//! an ordered list of [`Strategy`] values; the first one that finds an array
//! (and passes the optional [`IdGate`]) wins.

use serde_json::Value;
use tracing::{debug, trace};

use gemdex_core::error::ParseError;
use gemdex_core::{GemId, Record, Result};

/// A named rule for locating the record list inside a payload.
#[derive(Clone, Copy, Debug)]
pub struct Strategy {
    pub name: &'static str,
    pub locate: fn(&Value) -> Option<&[Value]>,
}

/// Record list at index 2 of the top-level array.
pub const TOP_LEVEL: Strategy = Strategy {
    name: "top-level[2]",
    locate: top_level_index_2,
};

/// Record list at index 15 of the array at index 1 (older backend shape).
pub const NESTED: Strategy = Strategy {
    name: "nested[1][15]",
    locate: nested_index_1_15,
};

/// Strategies tried by [`Extractor::default`], in order.
pub const DEFAULT_STRATEGIES: &[Strategy] = &[TOP_LEVEL, NESTED];

fn top_level_index_2(payload: &Value) -> Option<&[Value]> {
    payload.as_array()?.get(2)?.as_array().map(Vec::as_slice)
}

fn nested_index_1_15(payload: &Value) -> Option<&[Value]> {
    payload
        .as_array()?
        .get(1)?
        .as_array()?
        .get(15)?
        .as_array()
        .map(Vec::as_slice)
}

/// Heuristic check that a located array really is the record list.
///
/// With a minimum length set, the first element's id must be a string
/// strictly longer than it. Empty lists cannot be confirmed and are
/// rejected. Disabled by default because real ids vary in length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdGate {
    pub min_id_len: Option<usize>,
}

impl IdGate {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn min_len(len: usize) -> Self {
        Self {
            min_id_len: Some(len),
        }
    }

    pub fn accepts(&self, list: &[Value]) -> bool {
        let Some(min) = self.min_id_len else {
            return true;
        };

        list.first()
            .and_then(Value::as_array)
            .and_then(|first| first.first())
            .and_then(Value::as_str)
            .is_some_and(|id| id.len() > min)
    }
}

/// Maps a decoded payload to Gem records.
#[derive(Clone, Debug)]
pub struct Extractor {
    strategies: Vec<Strategy>,
    gate: IdGate,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_STRATEGIES.to_vec(), IdGate::disabled())
    }
}

impl Extractor {
    pub fn new(strategies: Vec<Strategy>, gate: IdGate) -> Self {
        Self { strategies, gate }
    }

    /// Replace the id gate.
    pub fn with_gate(mut self, gate: IdGate) -> Self {
        self.gate = gate;
        self
    }

    /// Append a strategy, tried after the existing ones.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Extract records from a JSON-encoded payload.
    ///
    /// Returns `Ok(None)` when no strategy locates a record list; most
    /// batch responses carry no Gem data at all, so this is the common case.
    /// Errors only when the payload itself is not JSON.
    pub fn extract(&self, payload: &str) -> Result<Option<Vec<Record>>> {
        let data: Value = serde_json::from_str(payload).map_err(|e| ParseError::Payload {
            message: e.to_string(),
        })?;

        Ok(self.extract_value(&data))
    }

    /// Like [`extract`](Self::extract), collapsing every non-success to an
    /// empty list.
    pub fn records(&self, payload: &str) -> Vec<Record> {
        self.extract(payload).ok().flatten().unwrap_or_default()
    }

    /// Extract records from an already decoded payload.
    ///
    /// A located list that is non-empty but yields no valid record is not
    /// the record list; the next strategy is tried. An empty located list is
    /// returned as `Some(vec![])`.
    pub fn extract_value(&self, data: &Value) -> Option<Vec<Record>> {
        self.strategies.iter().find_map(|strategy| {
            let list = (strategy.locate)(data)?;
            if !self.gate.accepts(list) {
                debug!(strategy = strategy.name, "Located list rejected by id gate");
                return None;
            }

            let records: Vec<Record> = list.iter().filter_map(map_element).collect();
            if records.is_empty() && !list.is_empty() {
                trace!(
                    strategy = strategy.name,
                    found = list.len(),
                    "Located array holds no Gem records"
                );
                return None;
            }

            debug!(
                strategy = strategy.name,
                found = list.len(),
                kept = records.len(),
                "Extracted Gem records"
            );
            Some(records)
        })
    }
}

/// Map one raw tuple `[id, [name, ...], description, ...]` to a record.
fn map_element(element: &Value) -> Option<Record> {
    let tuple = element.as_array()?;

    let id = match tuple.first()? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let id = GemId::new(id).ok()?;

    let name = truthy_text(tuple.get(1)?.as_array()?.first()?)?;

    let description = tuple
        .get(2)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let record = Record::new(id, name, description);
    record.is_valid().then_some(record)
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
