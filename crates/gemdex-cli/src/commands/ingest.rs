//! Ingest command implementation.
//!
//! Replays a captured response through a page scope with the hooks
//! installed, the window and runtime relays, and the background cache, the
//! same path a live response takes.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use clap::Args;
use futures_util::StreamExt;
use tracing::{debug, warn};

use gemdex_core::{KeyValueStore, Result as CoreResult};
use gemdex_intercept::hooks::{
    FetchPrimitive, FetchRequest, FetchResponse, LoadListener, XhrFactory, XhrPrimitive,
};
use gemdex_intercept::{Interceptor, PageScope};
use gemdex_relay::{Background, IsolatedBridge, PagePublisher, Window, channel};
use gemdex_store::{RecordCache, ReplaceOutcome};

use super::{InterceptArgs, read_input};
use crate::output;

const RUNTIME_CAPACITY: usize = 16;

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Captured response body (use - for stdin)
    pub file: String,

    /// URL the response was served for
    #[arg(long)]
    pub url: String,

    /// Replay through XMLHttpRequest instead of fetch
    #[arg(long)]
    pub xhr: bool,

    #[command(flatten)]
    pub intercept: InterceptArgs,
}

pub async fn run<S>(args: IngestArgs, store: S) -> Result<()>
where
    S: KeyValueStore + 'static,
{
    let body: Arc<str> = read_input(&args.file)?.into();
    let config = args.intercept.config();

    if !config.predicate().matches(&args.url) {
        warn!(url = %args.url, "URL does not match the interception predicate");
    }

    let window = Window::new();
    let (runtime, mut inbox) = channel(RUNTIME_CAPACITY);
    let bridge = IsolatedBridge::new(&window, runtime).spawn(&window);

    {
        let replay = Arc::new(Replay {
            body: Arc::clone(&body),
        });
        let mut scope = PageScope::new(replay.clone(), replay);
        let interceptor = Interceptor::new(
            config.parser(),
            Arc::new(PagePublisher::new(window.clone())),
        );
        scope
            .install_hooks(config.predicate(), Arc::new(interceptor))
            .context("Failed to install hooks")?;

        if args.xhr {
            let mut xhr = scope.xhr();
            xhr.open("POST", &args.url);
            xhr.send(None);
        } else {
            let mut response = scope
                .fetch()
                .fetch(FetchRequest::post(&args.url, ""))
                .await
                .context("Replayed fetch failed")?;
            let text = response.text().context("Failed to read replayed body")?;
            debug!(bytes = text.len(), "Page consumed response");
        }
    }
    // Every hop drains once the last window handle is gone.
    drop(window);

    let background = Background::new(RecordCache::new(store));
    let consume = async {
        let mut outcomes = Vec::new();
        while let Some(message) = inbox.next().await {
            outcomes.extend(background.handle(message).await);
        }
        outcomes
    };
    let (bridged, outcomes) = tokio::join!(bridge, consume);
    bridged.context("Bridge task failed")?;

    if outcomes.is_empty() {
        output::note("No Gem list found in the response.");
        return Ok(());
    }

    for outcome in outcomes {
        match outcome {
            ReplaceOutcome::Replaced { count } => {
                output::success(&format!("Stored {} Gems", count))
            }
            ReplaceOutcome::Unchanged => output::success("Gem list unchanged"),
            ReplaceOutcome::WriteFailed => bail!("Failed to write the Gem cache"),
        }
    }

    Ok(())
}

/// Serves the captured body for every request, over either primitive.
struct Replay {
    body: Arc<str>,
}

#[async_trait]
impl FetchPrimitive for Replay {
    async fn fetch(&self, request: FetchRequest) -> CoreResult<FetchResponse> {
        Ok(FetchResponse::new(request.url, 200, &*self.body))
    }
}

impl XhrFactory for Replay {
    fn create(&self) -> Box<dyn XhrPrimitive> {
        Box::new(ReplayXhr {
            body: Arc::clone(&self.body),
            listeners: Vec::new(),
        })
    }
}

/// Completes synchronously inside `send`.
struct ReplayXhr {
    body: Arc<str>,
    listeners: Vec<LoadListener>,
}

impl XhrPrimitive for ReplayXhr {
    fn open(&mut self, _method: &str, _url: &str) {}

    fn send(&mut self, _body: Option<&str>) {
        for listener in std::mem::take(&mut self.listeners) {
            listener(&*self.body);
        }
    }

    fn add_load_listener(&mut self, listener: LoadListener) {
        self.listeners.push(listener);
    }
}
