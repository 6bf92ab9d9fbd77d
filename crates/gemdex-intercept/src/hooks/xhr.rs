//! Event-style XHR primitive and its intercepting wrapper.

use std::sync::Arc;

use tracing::trace;

use super::HookTarget;

/// Callback run with the response text once a request completes.
pub type LoadListener = Box<dyn FnOnce(&str) + Send>;

/// One XHR object, as the page drives it.
pub trait XhrPrimitive: Send {
    fn open(&mut self, method: &str, url: &str);
    fn send(&mut self, body: Option<&str>);
    fn add_load_listener(&mut self, listener: LoadListener);
}

/// Constructor for XHR objects (the page's `new XMLHttpRequest()`).
pub trait XhrFactory: Send + Sync {
    fn create(&self) -> Box<dyn XhrPrimitive>;
}

/// State carried from `open` to `send` for one request.
#[derive(Debug, Default)]
struct RequestContext {
    url: Option<String>,
}

/// XHR wrapper that attaches a completion listener to matching requests.
///
/// `open` and `send` are always delegated, in the order the page called
/// them; the only addition is one load listener registered just before
/// `send`, after any the page registered itself.
pub struct InterceptingXhr {
    inner: Box<dyn XhrPrimitive>,
    context: RequestContext,
    target: HookTarget,
}

impl InterceptingXhr {
    pub(crate) fn new(inner: Box<dyn XhrPrimitive>, target: HookTarget) -> Self {
        Self {
            inner,
            context: RequestContext::default(),
            target,
        }
    }
}

impl XhrPrimitive for InterceptingXhr {
    fn open(&mut self, method: &str, url: &str) {
        self.context.url = Some(url.to_string());
        self.inner.open(method, url);
    }

    fn send(&mut self, body: Option<&str>) {
        match self.context.url.as_deref() {
            Some(url) if self.target.predicate.matches(url) => {
                let url = url.to_string();
                let sink = Arc::clone(&self.target.sink);
                self.inner.add_load_listener(Box::new(move |text: &str| {
                    if !text.is_empty() {
                        sink.on_match(&url, text);
                    }
                }));
            }
            url => trace!(?url, "XHR not intercepted"),
        }

        self.inner.send(body);
    }

    fn add_load_listener(&mut self, listener: LoadListener) {
        self.inner.add_load_listener(listener);
    }
}

/// Factory producing [`InterceptingXhr`] objects around the page's own.
pub struct InterceptingXhrFactory {
    inner: Arc<dyn XhrFactory>,
    target: HookTarget,
}

impl InterceptingXhrFactory {
    pub(crate) fn new(inner: Arc<dyn XhrFactory>, target: HookTarget) -> Self {
        Self { inner, target }
    }
}

impl XhrFactory for InterceptingXhrFactory {
    fn create(&self) -> Box<dyn XhrPrimitive> {
        Box::new(InterceptingXhr::new(self.inner.create(), self.target.clone()))
    }
}
