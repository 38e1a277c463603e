//! Test utilities for common test setup.
//!
//! This module provides an in-memory search endpoint shared by the session,
//! presenter and view tests.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Semaphore;

use crate::error::{Result, SearchError};
use crate::sources::SearchEndpoint;
use crate::state::{QueryField, ResultRecord};

/// Canned answer of a [`FakeEndpoint`].
#[derive(Clone, Debug)]
pub enum Reply {
    /// Succeed with these records.
    Records(Vec<ResultRecord>),
    /// Fail with this error.
    Error(SearchError),
}

/// What: Endpoint double that counts calls and can hold replies back.
///
/// Details:
/// - `gated()` makes every search wait for `release()`, so tests can observe
///   the `Loading` state deterministically.
#[derive(Debug)]
pub struct FakeEndpoint {
    reply: Reply,
    calls: AtomicUsize,
    last: Mutex<Option<(QueryField, String)>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeEndpoint {
    /// Endpoint answering immediately with `reply`.
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
            gate: None,
        }
    }

    /// Hold every reply until [`FakeEndpoint::release`] is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let pending and future searches complete.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1024);
        }
    }

    /// Number of searches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Field and query of the most recent search.
    pub fn last_query(&self) -> Option<(QueryField, String)> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SearchEndpoint for FakeEndpoint {
    fn search(
        &self,
        field: QueryField,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ResultRecord>>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((field, query.to_string()));
        let reply = self.reply.clone();
        let gate = self.gate.clone();
        async move {
            if let Some(gate) = gate {
                let _permit = gate.acquire().await;
            }
            match reply {
                Reply::Records(records) => Ok(records),
                Reply::Error(err) => Err(err),
            }
        }
    }
}
