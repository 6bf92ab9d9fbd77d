//! Network hooks.
//!
//! The page's two network primitives are modelled as traits so the hooks can
//! wrap real browser bindings and test fakes alike. [`PageScope`] plays the
//! role of the page's global object: it owns the current primitives and
//! swaps in the intercepting versions exactly once.

mod fetch;
mod scope;
mod xhr;

use std::sync::Arc;

pub use fetch::{FetchPrimitive, FetchRequest, FetchResponse, InterceptingFetch};
pub use scope::PageScope;
pub use xhr::{InterceptingXhr, InterceptingXhrFactory, LoadListener, XhrFactory, XhrPrimitive};

use crate::predicate::UrlPredicate;

/// Receives the body of every response whose request matched the predicate.
///
/// Called from inside the page's request flow, so implementations must not
/// panic; failures are logged and dropped.
pub trait InterceptSink: Send + Sync {
    fn on_match(&self, url: &str, body: &str);
}

impl<F> InterceptSink for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn on_match(&self, url: &str, body: &str) {
        self(url, body)
    }
}

/// Predicate and sink shared by every wrapped primitive of one page.
#[derive(Clone)]
pub(crate) struct HookTarget {
    pub(crate) predicate: UrlPredicate,
    pub(crate) sink: Arc<dyn InterceptSink>,
}
