//! View teardown and re-attachment over a retained session.

use std::sync::Arc;

use aurquery::logic::{NO_SAVED_SORT, ResultView, SearchSession, ViewUpdate};
use aurquery::state::{QueryField, SortKey};

use crate::common::{CannedEndpoint, helpers};

fn names(update: ViewUpdate) -> Vec<String> {
    match update {
        ViewUpdate::Results(list) => list.names().into_iter().map(str::to_string).collect(),
        other => panic!("expected results, got {other:?}"),
    }
}

#[tokio::test]
/// What: A rebuilt view restores the saved sort without fetching again
///
/// - Input: Session by name; user switches to votes; view dropped and re-attached with the saved code
/// - Output: Same votes order after the rebuild; exactly one endpoint call
async fn rebuild_restores_sort_without_refetch() {
    let endpoint = Arc::new(CannedEndpoint::ok(helpers()));
    let session = Arc::new(
        SearchSession::start(
            QueryField::NameDesc,
            "aur helper",
            SortKey::ByName,
            Arc::clone(&endpoint),
        )
        .expect("valid query"),
    );

    let mut view = ResultView::attach(Arc::clone(&session), None);
    assert_eq!(
        names(view.settled().await.expect("ordered")),
        vec!["aurman", "Paru", "yay"]
    );
    let before = names(view.set_sort(SortKey::ByVotes).expect("ordered"));
    assert_eq!(before, vec!["yay", "Paru", "aurman"]);

    let saved = view.save_state();
    assert_eq!(saved, SortKey::ByVotes.code());
    drop(view);
    assert_eq!(session.observer_count(), 0);

    let mut rebuilt = ResultView::attach(Arc::clone(&session), Some(saved));
    assert_eq!(rebuilt.presenter().active_sort(), SortKey::ByVotes);
    assert_eq!(names(rebuilt.current().expect("ordered")), before);
    assert_eq!(endpoint.calls(), 1);
}

#[tokio::test]
/// What: Without a saved code a rebuilt view falls back to the session's initial sort
///
/// - Input: Session started by popularity; re-attached with `None` and with the unsaved sentinel
/// - Output: Popularity order both times
async fn rebuild_without_saved_state_uses_initial_sort() {
    let endpoint = Arc::new(CannedEndpoint::ok(helpers()));
    let session = Arc::new(
        SearchSession::start(QueryField::NameDesc, "aur", SortKey::ByPopularity, endpoint)
            .expect("valid query"),
    );
    let _ = session.settled().await;
    for saved in [None, Some(NO_SAVED_SORT)] {
        let mut view = ResultView::attach(Arc::clone(&session), saved);
        assert_eq!(
            names(view.current().expect("ordered")),
            vec!["yay", "Paru", "aurman"]
        );
    }
}

#[tokio::test]
/// What: A corrupt saved code decodes to name order
///
/// - Input: Saved code 42
/// - Output: Case-insensitive name order
async fn corrupt_saved_code_falls_back_to_name() {
    let endpoint = Arc::new(CannedEndpoint::ok(helpers()));
    let session = Arc::new(
        SearchSession::start(QueryField::NameDesc, "aur", SortKey::ByVotes, endpoint)
            .expect("valid query"),
    );
    let _ = session.settled().await;
    let mut view = ResultView::attach(session, Some(42));
    assert_eq!(
        names(view.current().expect("ordered")),
        vec!["aurman", "Paru", "yay"]
    );
}

#[tokio::test]
/// What: Views attached to one session share its results
///
/// - Input: Two simultaneous views with different sorts
/// - Output: Each keeps its own order; the fetch ran once
async fn concurrent_views_share_one_fetch() {
    let endpoint = Arc::new(CannedEndpoint::ok(helpers()));
    let session = Arc::new(
        SearchSession::start(
            QueryField::NameDesc,
            "aur",
            SortKey::ByName,
            Arc::clone(&endpoint),
        )
        .expect("valid query"),
    );
    let mut by_name = ResultView::attach(Arc::clone(&session), None);
    let mut by_submitted =
        ResultView::attach(Arc::clone(&session), Some(SortKey::ByFirstSubmitted.code()));
    assert_eq!(session.observer_count(), 2);
    assert_eq!(
        names(by_name.settled().await.expect("ordered")),
        vec!["aurman", "Paru", "yay"]
    );
    assert_eq!(
        names(by_submitted.settled().await.expect("ordered")),
        vec!["aurman", "yay", "Paru"]
    );
    assert_eq!(endpoint.calls(), 1);
}

#[tokio::test]
/// What: Re-attaching with the previous rendering does not sort again
///
/// - Input: View by votes renders; saved code and last rendering handed to the replacement
/// - Output: Replacement yields the very same rendering; one endpoint call
async fn rebuild_reuses_previous_rendering() {
    let endpoint = Arc::new(CannedEndpoint::ok(helpers()));
    let session = Arc::new(
        SearchSession::start(
            QueryField::NameDesc,
            "aur",
            SortKey::ByVotes,
            Arc::clone(&endpoint),
        )
        .expect("valid query"),
    );
    let mut view = ResultView::attach(Arc::clone(&session), None);
    let ViewUpdate::Results(before) = view.settled().await.expect("ordered") else {
        panic!("expected results");
    };
    let saved = view.save_state();
    let previous = view.last_rendered();
    drop(view);

    let mut rebuilt = ResultView::reattach(Arc::clone(&session), Some(saved), previous);
    assert!(rebuilt.last_rendered().is_some());
    let ViewUpdate::Results(after) = rebuilt.current().expect("ordered") else {
        panic!("expected results");
    };
    assert!(before.is_same_rendering(&after));
    assert_eq!(endpoint.calls(), 1);
}

#[tokio::test]
/// What: A previous rendering under another key is not reused
///
/// - Input: Rendering by votes handed over with a saved name code
/// - Output: Fresh name-ordered rendering
async fn rebuild_ignores_rendering_for_other_key() {
    let endpoint = Arc::new(CannedEndpoint::ok(helpers()));
    let session = Arc::new(
        SearchSession::start(QueryField::NameDesc, "aur", SortKey::ByVotes, endpoint)
            .expect("valid query"),
    );
    let mut view = ResultView::attach(Arc::clone(&session), None);
    let _ = view.settled().await.expect("ordered");
    let previous = view.last_rendered();
    drop(view);

    let mut rebuilt =
        ResultView::reattach(session, Some(SortKey::ByName.code()), previous);
    assert!(rebuilt.last_rendered().is_none());
    assert_eq!(
        names(rebuilt.current().expect("ordered")),
        vec!["aurman", "Paru", "yay"]
    );
}
