//! Headless browser sessions used to read pages that only exist after
//! client-side rendering.
//!
//! A [`BrowserLauncher`] starts a [`BrowserSession`]; sessions are handed out
//! through a [`BrowserPool`] which guarantees every launched session is closed
//! exactly once, whichever way the caller exits.

mod chromium;
mod pool;

use async_trait::async_trait;
use serde_json::Value;

pub use chromium::ChromiumLauncher;
pub use pool::{BrowserPool, PooledSession};

use crate::error::Result;

/// Starts new browser sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// A running browser instance.
#[async_trait]
pub trait BrowserSession: Send {
    /// Open `url`, wait for navigation to finish and evaluate `script` in the
    /// page, returning the script's JSON result.
    async fn evaluate(&mut self, url: &str, script: &str) -> Result<Value>;

    /// Shut the browser down and release its process.
    async fn close(self: Box<Self>) -> Result<()>;
}
