//! Error types shared by the search session, the comparator table and the RPC client.

use thiserror::Error;

/// Failure raised anywhere between query validation and result ordering.
///
/// Sessions never retry: every variant except `InvalidQuery` ends the session
/// it was raised in, and `InvalidQuery` prevents one from starting at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Query text was empty or whitespace only.
    #[error("search query must not be blank")]
    InvalidQuery,

    /// The request never produced a usable payload (network, timeout, HTTP status, decoding).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The endpoint answered but reported an application-level error.
    #[error("{0}")]
    Endpoint(String),

    /// A numeric field of a record could not be parsed while ordering.
    #[error("record `{name}` has unparseable {field}: {value:?}")]
    UnparseableNumericField {
        /// Name of the offending record.
        name: String,
        /// Wire name of the field.
        field: &'static str,
        /// Raw text as received.
        value: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Http(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SearchError>;
