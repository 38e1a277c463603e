//! Failure paths: blank queries, transport errors and endpoint messages.

use std::sync::Arc;

use aurquery::error::SearchError;
use aurquery::logic::{
    FailureMessage, GENERIC_FAILURE_MESSAGE, ResultView, SearchSession, SessionStatus, ViewUpdate,
};
use aurquery::state::{QueryField, ResultRecord, SortKey};

use crate::common::{CannedEndpoint, helpers};

#[tokio::test]
/// What: Blank queries never reach the endpoint
///
/// - Input: `""` and `"   "`
/// - Output: `InvalidQuery`; zero endpoint calls
async fn blank_query_rejected_without_fetch() {
    let endpoint = Arc::new(CannedEndpoint::ok(helpers()));
    for query in ["", "   "] {
        let err = SearchSession::start(
            QueryField::NameDesc,
            query,
            SortKey::ByName,
            Arc::clone(&endpoint),
        )
        .expect_err("blank query");
        assert_eq!(err, SearchError::InvalidQuery);
    }
    assert_eq!(endpoint.calls(), 0);
}

#[tokio::test]
/// What: Transport failures surface as the generic message
///
/// - Input: Endpoint failing with a timeout
/// - Output: `Failed(Transport)`; view shows the generic text
async fn transport_failure_shows_generic_message() {
    let endpoint = Arc::new(CannedEndpoint::failing(SearchError::Transport(
        "operation timed out".into(),
    )));
    let session = Arc::new(
        SearchSession::start(QueryField::NameDesc, "yay", SortKey::ByName, endpoint)
            .expect("valid query"),
    );
    assert!(matches!(
        session.settled().await,
        SessionStatus::Failed(FailureMessage::Transport)
    ));
    let mut view = ResultView::attach(session, None);
    match view.current().expect("projected") {
        ViewUpdate::Message(msg) => assert_eq!(msg, GENERIC_FAILURE_MESSAGE),
        other => panic!("expected message, got {other:?}"),
    }
    assert!(!view.menu_state().visible);
}

#[tokio::test]
/// What: Endpoint error text is shown verbatim
///
/// - Input: `Endpoint("Too many package results.")`
/// - Output: View message equals the endpoint text
async fn endpoint_error_shown_verbatim() {
    let endpoint = Arc::new(CannedEndpoint::failing(SearchError::Endpoint(
        "Too many package results.".into(),
    )));
    let session = Arc::new(
        SearchSession::start(QueryField::Maintainer, "a", SortKey::ByName, endpoint)
            .expect("valid query"),
    );
    let mut view = ResultView::attach(session, None);
    match view.settled().await.expect("projected") {
        ViewUpdate::Message(msg) => assert_eq!(msg, "Too many package results."),
        other => panic!("expected message, got {other:?}"),
    }
}

#[tokio::test]
/// What: An unparseable numeric field fails the ordering loudly
///
/// - Input: A record whose votes are `"many"`, viewed by votes, then by name
/// - Output: `UnparseableNumericField` for votes; name order still works
async fn unparseable_field_fails_ordering() {
    let mut records = helpers();
    records.push(ResultRecord::new("broken", "many", "1.0", "0", "0"));
    let endpoint = Arc::new(CannedEndpoint::ok(records));
    let session = Arc::new(
        SearchSession::start(QueryField::NameDesc, "aur", SortKey::ByVotes, endpoint)
            .expect("valid query"),
    );
    let mut view = ResultView::attach(session, None);
    match view.settled().await {
        Err(SearchError::UnparseableNumericField { name, field, value }) => {
            assert_eq!(name, "broken");
            assert_eq!(field, "NumVotes");
            assert_eq!(value, "many");
        }
        other => panic!("expected unparseable field, got {other:?}"),
    }
    assert!(matches!(
        view.set_sort(SortKey::ByName),
        Ok(ViewUpdate::Results(_))
    ));
}
