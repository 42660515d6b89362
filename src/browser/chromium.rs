use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::browser::{BrowserLauncher, BrowserSession};
use crate::error::{Result, StatsError};

/// Launches headless Chromium through the DevTools protocol.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    executable: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific Chrome/Chromium binary instead of auto-detection.
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: Some(executable.into()),
        }
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    #[instrument(skip(self))]
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let mut builder = BrowserConfig::builder();
        if let Some(executable) = &self.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(StatsError::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The CDP connection only makes progress while its handler is polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!("launched chromium");
        Ok(Box::new(ChromiumSession { browser, handler }))
    }
}

struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn evaluate(&mut self, url: &str, script: &str) -> Result<Value> {
        let page = self.browser.new_page(url).await?;
        let outcome = async {
            page.wait_for_navigation().await?;
            page.evaluate(script).await
        }
        .await;

        if let Err(err) = page.close().await {
            debug!(url, error = %err, "failed to close page");
        }

        outcome?
            .into_value::<Value>()
            .map_err(|e| StatsError::Browser(format!("script returned no value: {e}")))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let ChromiumSession {
            mut browser,
            handler,
        } = *self;

        let closed = browser.close().await;
        if let Err(err) = browser.wait().await {
            warn!(error = %err, "failed to reap chromium process");
        }
        handler.abort();

        closed.map(|_| ()).map_err(StatsError::from)
    }
}
