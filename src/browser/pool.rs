use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::browser::{BrowserLauncher, BrowserSession};
use crate::error::{Result, StatsError};

type Idle = Arc<Mutex<Vec<Box<dyn BrowserSession>>>>;

/// Hands out browser sessions with a checkout/return discipline.
///
/// With `size == 0` every checkout launches a fresh browser which is closed
/// when the checkout ends. With `size > 0` at most `size` sessions exist at
/// once and healthy sessions are kept for the next checkout.
pub struct BrowserPool {
    launcher: Arc<dyn BrowserLauncher>,
    idle: Idle,
    permits: Option<Arc<Semaphore>>,
    size: usize,
}

impl BrowserPool {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, size: usize) -> Self {
        Self {
            launcher,
            idle: Arc::new(Mutex::new(Vec::new())),
            permits: (size > 0).then(|| Arc::new(Semaphore::new(size))),
            size,
        }
    }

    /// Number of sessions currently parked in the pool.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    /// Check out a session, reusing an idle one when available.
    pub async fn checkout(&self) -> Result<PooledSession> {
        let permit = match &self.permits {
            Some(permits) => Some(
                permits
                    .clone()
                    .acquire_owned()
                    .await
                    .map_err(|_| StatsError::Browser("browser pool is shut down".to_string()))?,
            ),
            None => None,
        };

        let reused = self.idle.lock().pop();
        let session = match reused {
            Some(session) => {
                debug!("reusing pooled browser session");
                session
            }
            None => self.launcher.launch().await?,
        };

        Ok(PooledSession {
            session: Some(session),
            idle: self.idle.clone(),
            max_idle: self.size,
            permits: self.permits.clone(),
            _permit: permit,
        })
    }

    /// Close every idle session. A bounded pool also refuses further checkouts,
    /// and sessions still checked out are closed when they come back.
    pub async fn shutdown(&self) {
        if let Some(permits) = &self.permits {
            permits.close();
        }
        let sessions: Vec<_> = self.idle.lock().drain(..).collect();
        for session in sessions {
            close_session(session).await;
        }
    }
}

/// A session checked out of a [`BrowserPool`].
///
/// Call [`release`](Self::release) after a successful use or
/// [`discard`](Self::discard) after a failure. A checkout dropped without
/// either (cancelled future, panic) closes its session in the background.
pub struct PooledSession {
    session: Option<Box<dyn BrowserSession>>,
    idle: Idle,
    max_idle: usize,
    permits: Option<Arc<Semaphore>>,
    _permit: Option<OwnedSemaphorePermit>,
}

impl PooledSession {
    pub async fn evaluate(&mut self, url: &str, script: &str) -> Result<Value> {
        match self.session.as_mut() {
            Some(session) => session.evaluate(url, script).await,
            None => Err(StatsError::Browser("session already released".to_string())),
        }
    }

    /// Return the session to the pool, or close it if the pool is full or
    /// already shut down.
    pub async fn release(mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        // `shutdown` closes the semaphore before draining, so a session parked
        // under this lock is always drained.
        let overflow = {
            let mut idle = self.idle.lock();
            let shut_down = self.permits.as_ref().is_some_and(|p| p.is_closed());
            if !shut_down && idle.len() < self.max_idle {
                idle.push(session);
                None
            } else {
                Some(session)
            }
        };

        if let Some(session) = overflow {
            close_session(session).await;
        }
    }

    /// Close the session instead of returning it.
    pub async fn discard(mut self) {
        if let Some(session) = self.session.take() {
            close_session(session).await;
        }
    }
}

impl Drop for PooledSession {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("closing abandoned browser session");
                handle.spawn(close_session(session));
            }
            Err(_) => warn!("browser session dropped outside a runtime; it could not be closed"),
        }
    }
}

async fn close_session(session: Box<dyn BrowserSession>) {
    if let Err(err) = session.close().await {
        warn!(error = %err, "failed to close browser session");
    }
}
