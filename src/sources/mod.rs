//! Remote search endpoints.

use std::future::Future;

use crate::error::Result;
use crate::state::{QueryField, ResultRecord};

mod search;

pub use search::{AUR_BASE_URL, AurRpc, parse_search_response};

/// Remote metadata service a [`crate::logic::SearchSession`] fetches from.
///
/// Implementations return records in the order the service produced them.
/// Failures must be either [`crate::error::SearchError::Transport`] (the call
/// did not complete or could not be decoded) or
/// [`crate::error::SearchError::Endpoint`] (the service answered with an
/// error string).
pub trait SearchEndpoint: Send + Sync + 'static {
    /// What: Run one search.
    ///
    /// Inputs:
    /// - `field`: Field to match against
    /// - `query`: Trimmed, non-empty query text
    ///
    /// Output:
    /// - Records in endpoint order, possibly empty
    fn search(
        &self,
        field: QueryField,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ResultRecord>>> + Send;
}
