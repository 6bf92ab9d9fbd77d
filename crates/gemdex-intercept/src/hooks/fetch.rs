//! Promise-style fetch primitive and its intercepting wrapper.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, trace};

use gemdex_core::Result;
use gemdex_core::error::HookError;

use super::HookTarget;

/// An outbound fetch request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            body: Some(body.into()),
        }
    }
}

/// A fetch response whose body can be read once.
///
/// [`try_clone`](Self::try_clone) tees the body, so reading a clone never
/// affects what the original holder reads.
#[derive(Debug, PartialEq, Eq)]
pub struct FetchResponse {
    url: String,
    status: u16,
    headers: Vec<(String, String)>,
    body: Option<Arc<str>>,
}

impl FetchResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            headers: Vec::new(),
            body: Some(Arc::from(body.into())),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body_used(&self) -> bool {
        self.body.is_none()
    }

    /// Read the body. A second read fails.
    pub fn text(&mut self) -> Result<String> {
        let body = self.body.take().ok_or(HookError::BodyConsumed)?;
        Ok(body.to_string())
    }

    /// Clone the response, body included. Fails once the body was read.
    pub fn try_clone(&self) -> Result<Self> {
        let body = self.body.clone().ok_or(HookError::BodyConsumed)?;
        Ok(Self {
            url: self.url.clone(),
            status: self.status,
            headers: self.headers.clone(),
            body: Some(body),
        })
    }
}

/// The page's fetch function.
#[async_trait]
pub trait FetchPrimitive: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse>;
}

/// Fetch wrapper that hands matching response bodies to the sink.
///
/// The caller gets the inner primitive's result untouched. Body reading and
/// parsing happen on a spawned task reading a clone, so delivery of the
/// response is never delayed.
pub struct InterceptingFetch {
    inner: Arc<dyn FetchPrimitive>,
    target: HookTarget,
}

impl InterceptingFetch {
    pub(crate) fn new(inner: Arc<dyn FetchPrimitive>, target: HookTarget) -> Self {
        Self { inner, target }
    }
}

#[async_trait]
impl FetchPrimitive for InterceptingFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        let request_url = request.url.clone();
        let response = self.inner.fetch(request).await?;

        // Redirects are reported under the final URL.
        let url = if response.url().is_empty() {
            request_url
        } else {
            response.url().to_string()
        };

        if !self.target.predicate.matches(&url) {
            trace!(%url, "Fetch not intercepted");
            return Ok(response);
        }

        match response.try_clone() {
            Ok(mut clone) => {
                let sink = Arc::clone(&self.target.sink);
                tokio::spawn(async move {
                    match clone.text() {
                        Ok(body) => sink.on_match(&url, &body),
                        Err(e) => debug!(%url, error = %e, "Failed to read intercepted body"),
                    }
                });
            }
            Err(e) => debug!(%url, error = %e, "Failed to clone intercepted response"),
        }

        Ok(response)
    }
}
