//! Session state shared by every request.
//!
//! Readers take the lock just long enough to clone the handle and scope into a
//! `SessionSnapshot`; queries then run against the snapshot without holding
//! any lock. Connect and disconnect are serialised by an async gate so a
//! reconnect never interleaves with another reconnect.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::common::types::DEFAULT_QUERY_TIMEOUT;
use crate::common::{Scope, SchemaName, ScribeError, ScribeResult};
use crate::engine::source::{CatalogSource, Connector, Credentials};

struct SessionState {
    source: Option<Arc<dyn CatalogSource>>,
    scope: Scope,
    /// Bumped on every handle change, so stale snapshots can be recognised
    generation: u64,
}

/// Holds the active database handle and the resolved scope
pub struct Session {
    state: RwLock<SessionState>,
    gate: Mutex<()>,
    query_timeout: Duration,
}

/// Point-in-time view of the session used for the duration of one operation
#[derive(Clone)]
pub struct SessionSnapshot {
    source: Arc<dyn CatalogSource>,
    scope: Scope,
    generation: u64,
    query_timeout: Duration,
}

impl SessionSnapshot {
    pub fn source(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Run one query under the per-query timeout
    pub async fn bounded<T, F>(&self, query: F) -> ScribeResult<T>
    where
        F: Future<Output = ScribeResult<T>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result,
            Err(_) => Err(ScribeError::Timeout(self.query_timeout)),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TIMEOUT)
    }
}

impl Session {
    /// Create a disconnected session
    pub fn new(query_timeout: Duration) -> Self {
        Session {
            state: RwLock::new(SessionState {
                source: None,
                scope: Scope::default(),
                generation: 0,
            }),
            gate: Mutex::new(()),
            query_timeout,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state.read().source.is_some()
    }

    /// Current scope
    pub fn scope(&self) -> Scope {
        self.state.read().scope.clone()
    }

    /// Snapshot the handle and scope, or fail with `NotConnected`
    pub fn snapshot(&self) -> ScribeResult<SessionSnapshot> {
        let state = self.state.read();
        let source = state.source.clone().ok_or(ScribeError::NotConnected)?;
        Ok(SessionSnapshot {
            source,
            scope: state.scope.clone(),
            generation: state.generation,
            query_timeout: self.query_timeout,
        })
    }

    /// Replace the current handle with a new one.
    ///
    /// The old handle is closed first. If opening or probing the new handle
    /// fails the session stays disconnected.
    pub async fn connect(&self, connector: &dyn Connector, credentials: &Credentials) -> ScribeResult<()> {
        let _gate = self.gate.lock().await;

        if let Some(previous) = self.take_source() {
            debug!("Closing previous connection before reconnecting");
            previous.close().await;
        }

        let source = match tokio::time::timeout(self.query_timeout, connector.connect(credentials)).await {
            Ok(Ok(source)) => source,
            Ok(Err(err)) => {
                warn!("Connection to {} failed: {}", credentials.describe(), err);
                return Err(err);
            }
            Err(_) => {
                warn!("Connection to {} timed out", credentials.describe());
                return Err(ScribeError::Connection(format!(
                    "timed out after {:?} connecting to {}",
                    self.query_timeout,
                    credentials.describe()
                )));
            }
        };

        {
            let mut state = self.state.write();
            state.source = Some(source);
            state.scope = Scope::default();
            state.generation += 1;
        }
        info!("Connected to {}", credentials.describe());
        Ok(())
    }

    /// Close and clear the handle; a no-op when not connected
    pub async fn disconnect(&self) {
        let _gate = self.gate.lock().await;
        if let Some(previous) = self.take_source() {
            previous.close().await;
            info!("Disconnected");
        }
    }

    /// Store a freshly resolved scope if the snapshot still describes the live handle.
    /// Returns the scope the caller should report.
    pub fn update_scope(&self, snapshot: &SessionSnapshot, schemas: Vec<SchemaName>) -> Scope {
        let scope = Scope::new(schemas);
        let mut state = self.state.write();
        if state.generation == snapshot.generation {
            state.scope = scope.clone();
        } else {
            debug!("Discarding scope resolved against a replaced connection");
        }
        scope
    }

    fn take_source(&self) -> Option<Arc<dyn CatalogSource>> {
        let mut state = self.state.write();
        state.generation += 1;
        state.scope = Scope::default();
        state.source.take()
    }
}
