//! The page's global network primitives.

use std::sync::Arc;

use tracing::info;

use gemdex_core::Result;
use gemdex_core::error::HookError;

use super::{
    FetchPrimitive, HookTarget, InterceptSink, InterceptingFetch, InterceptingXhrFactory,
    XhrFactory, XhrPrimitive,
};
use crate::predicate::UrlPredicate;

/// Owns the page's fetch and XHR primitives.
///
/// Page code looks the primitives up through the scope on every call, so
/// hooks installed before the first request see every request.
pub struct PageScope {
    fetch: Arc<dyn FetchPrimitive>,
    xhr: Arc<dyn XhrFactory>,
    hooked: bool,
}

impl PageScope {
    pub fn new(fetch: Arc<dyn FetchPrimitive>, xhr: Arc<dyn XhrFactory>) -> Self {
        Self {
            fetch,
            xhr,
            hooked: false,
        }
    }

    /// The current fetch primitive.
    pub fn fetch(&self) -> Arc<dyn FetchPrimitive> {
        Arc::clone(&self.fetch)
    }

    /// A new XHR object from the current factory.
    pub fn xhr(&self) -> Box<dyn XhrPrimitive> {
        self.xhr.create()
    }

    pub fn hooks_installed(&self) -> bool {
        self.hooked
    }

    /// Wrap both primitives so matching response bodies reach `on_match`.
    ///
    /// Installs at most once per scope; a second call fails with
    /// [`HookError::AlreadyInstalled`] and leaves the primitives as they are.
    pub fn install_hooks(
        &mut self,
        predicate: UrlPredicate,
        on_match: Arc<dyn InterceptSink>,
    ) -> Result<()> {
        if self.hooked {
            return Err(HookError::AlreadyInstalled.into());
        }

        let broad = predicate.is_broad();
        let target = HookTarget {
            predicate,
            sink: on_match,
        };

        self.fetch = Arc::new(InterceptingFetch::new(
            Arc::clone(&self.fetch),
            target.clone(),
        ));
        self.xhr = Arc::new(InterceptingXhrFactory::new(Arc::clone(&self.xhr), target));
        self.hooked = true;

        info!(broad, "Network hooks installed");
        Ok(())
    }
}
