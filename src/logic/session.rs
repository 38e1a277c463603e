//! Search session: one query, one fetch, one terminal outcome.
//!
//! A [`SearchSession`] is owned by the host's result-screen scope (usually in
//! an `Arc`) and outlives any view attached to it. Views observe it through a
//! `tokio::sync::watch` channel: a new subscriber sees the latest status at
//! once, later transitions wake every live subscriber, and intermediate values
//! a slow subscriber missed are not replayed.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{Result, SearchError};
use crate::sources::SearchEndpoint;
use crate::state::{QueryField, ResultRecord, SortKey};

/// Message shown for any failure that did not come with endpoint text.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Why a session failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureMessage {
    /// Transport-level failure; the host shows a generic message.
    Transport,
    /// Error text reported by the endpoint, shown verbatim.
    Endpoint(String),
}

impl FailureMessage {
    /// Text suitable for a toast or inline message.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Transport => GENERIC_FAILURE_MESSAGE,
            Self::Endpoint(msg) => msg,
        }
    }
}

/// Lifecycle of a session: `Idle → Loading → {Loaded | Failed}`.
#[derive(Clone, Debug)]
pub enum SessionStatus {
    /// Constructed, nothing sent yet.
    Idle,
    /// Request in flight.
    Loading,
    /// Request finished; the list may be empty.
    Loaded(Arc<[ResultRecord]>),
    /// Request failed; terminal.
    Failed(FailureMessage),
}

impl SessionStatus {
    /// `true` once the session reached `Loaded` or `Failed`.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed(_))
    }

    /// Held results when `Loaded`.
    #[must_use]
    pub const fn results(&self) -> Option<&Arc<[ResultRecord]>> {
        match self {
            Self::Loaded(records) => Some(records),
            _ => None,
        }
    }
}

/// Parameters of one logical search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Field the query is matched against.
    pub field: QueryField,
    /// Trimmed, non-empty query text.
    pub query: String,
    /// Sort key a freshly attached view starts with.
    pub initial_sort: SortKey,
}

impl SearchParams {
    /// What: Validate and normalize search parameters.
    ///
    /// Inputs:
    /// - `field`: Field to search by
    /// - `query`: Raw query text
    /// - `initial_sort`: Default sort for views of this search
    ///
    /// Output:
    /// - Parameters with the query trimmed
    ///
    /// # Errors
    /// - `InvalidQuery` when `query` is empty or whitespace only
    pub fn new(field: QueryField, query: &str, initial_sort: SortKey) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }
        Ok(Self {
            field,
            query: query.to_string(),
            initial_sort,
        })
    }
}

/// One query's lifecycle, independent of any view.
///
/// A session can only be obtained already started, so a second fetch on the
/// same instance cannot be issued. Retrying means starting a new session.
#[derive(Debug)]
pub struct SearchSession {
    params: SearchParams,
    status: watch::Sender<SessionStatus>,
}

impl SearchSession {
    /// What: Validate the query and dispatch the fetch in the background.
    ///
    /// Inputs:
    /// - `field`: Field to search by
    /// - `query`: Raw query text
    /// - `initial_sort`: Default sort for views of this search
    /// - `endpoint`: Remote search endpoint
    ///
    /// Output:
    /// - A session already in `Loading`; returns without waiting for the fetch
    ///
    /// # Errors
    /// - `InvalidQuery` for blank queries; the endpoint is never called
    ///
    /// # Panics
    /// - When called outside a Tokio runtime
    ///
    /// Details:
    /// - The fetch runs to completion even if the session is dropped; its
    ///   outcome is then stored into a channel nobody reads.
    pub fn start<E: SearchEndpoint>(
        field: QueryField,
        query: &str,
        initial_sort: SortKey,
        endpoint: Arc<E>,
    ) -> Result<Self> {
        let params = SearchParams::new(field, query, initial_sort).inspect_err(|_| {
            tracing::debug!(query = %query, "[Session] Rejected blank query");
        })?;
        Ok(Self::start_with(params, endpoint))
    }

    /// Start a session from parameters that were already validated.
    ///
    /// # Panics
    /// - When called outside a Tokio runtime
    pub fn start_with<E: SearchEndpoint>(params: SearchParams, endpoint: Arc<E>) -> Self {
        let (status, _) = watch::channel(SessionStatus::Idle);
        status.send_replace(SessionStatus::Loading);
        tracing::debug!(
            field = params.field.as_rpc_param(),
            query = %params.query,
            "[Session] Loading"
        );

        let publisher = status.clone();
        let field = params.field;
        let query = params.query.clone();
        tokio::spawn(async move {
            let outcome = endpoint.search(field, &query).await;
            let next = settle(&query, outcome);
            publisher.send_replace(next);
        });

        Self { params, status }
    }

    /// Parameters this session was started with.
    #[must_use]
    pub const fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Snapshot of the current status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    /// Attach an observer. It sees the current status immediately; dropping it detaches.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Number of currently attached observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.status.receiver_count()
    }

    /// What: Wait until the session reaches `Loaded` or `Failed`.
    ///
    /// Output:
    /// - The terminal status
    pub async fn settled(&self) -> SessionStatus {
        let mut rx = self.subscribe();
        match rx.wait_for(SessionStatus::is_settled).await {
            Ok(status) => status.clone(),
            // The sender lives in `self`, so the channel cannot close while we wait.
            Err(_) => self.status(),
        }
    }
}

/// What: Map a fetch outcome onto the terminal status.
///
/// Inputs:
/// - `query`: Query text (for logging)
/// - `outcome`: Endpoint result
///
/// Output:
/// - `Loaded` or `Failed`
///
/// Details:
/// - Only non-blank endpoint text is surfaced; anything else becomes the
///   generic transport failure.
fn settle(query: &str, outcome: Result<Vec<ResultRecord>>) -> SessionStatus {
    match outcome {
        Ok(records) => {
            tracing::debug!(query = %query, count = records.len(), "[Session] Loaded");
            SessionStatus::Loaded(records.into())
        }
        Err(SearchError::Endpoint(msg)) if !msg.trim().is_empty() => {
            tracing::warn!(query = %query, error = %msg, "[Session] Endpoint reported an error");
            SessionStatus::Failed(FailureMessage::Endpoint(msg))
        }
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "[Session] Transport failure");
            SessionStatus::Failed(FailureMessage::Transport)
        }
    }
}
