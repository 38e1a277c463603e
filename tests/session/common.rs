//! Shared endpoint double for the session tests.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use aurquery::error::{Result, SearchError};
use aurquery::sources::SearchEndpoint;
use aurquery::state::{QueryField, ResultRecord};

/// Endpoint answering every search with a fixed outcome and counting calls.
pub struct CannedEndpoint {
    outcome: std::result::Result<Vec<ResultRecord>, SearchError>,
    calls: AtomicUsize,
}

impl CannedEndpoint {
    pub fn ok(records: Vec<ResultRecord>) -> Self {
        Self {
            outcome: Ok(records),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: SearchError) -> Self {
        Self {
            outcome: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SearchEndpoint for CannedEndpoint {
    fn search(
        &self,
        _field: QueryField,
        _query: &str,
    ) -> impl Future<Output = Result<Vec<ResultRecord>>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone();
        async move { outcome }
    }
}

/// Three AUR helpers with distinct votes, popularity and dates.
pub fn helpers() -> Vec<ResultRecord> {
    vec![
        ResultRecord::new("yay", "2400", "40.1", "1700000300", "1475000000")
            .with_maintainer("jguer"),
        ResultRecord::new("Paru", "1000", "22.5", "1700000400", "1590000000")
            .with_maintainer("Morganamilo"),
        ResultRecord::new("aurman", "500", "0.01", "1500000000", "1460000000"),
    ]
}
