//! gemdex-intercept - Batch-RPC response interception and Gem extraction.
//!
//! The pipeline runs leaf to root:
//!
//! 1. [`envelope`] strips the anti-hijacking prefix and splits the body into
//!    length-framed segments.
//! 2. [`matcher`] recognises RPC result frames and pulls out their payload.
//! 3. [`extractor`] locates and maps the Gem record list.
//! 4. [`hooks`] wrap the page's fetch and XHR primitives and feed matching
//!    response bodies into an [`InterceptSink`](hooks::InterceptSink), such
//!    as the [`Interceptor`].

pub mod config;
pub mod envelope;
pub mod extractor;
pub mod hooks;
mod interceptor;
pub mod matcher;
mod parser;
mod predicate;

pub use config::{InterceptConfig, MatchMode};
pub use extractor::{Extractor, IdGate, Strategy};
pub use hooks::{InterceptSink, PageScope};
pub use interceptor::Interceptor;
pub use matcher::RpcFilter;
pub use parser::ResponseParser;
pub use predicate::UrlPredicate;
