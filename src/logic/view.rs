//! Transient result view attached to a retained [`SearchSession`].
//!
//! A view owns a presenter and a status subscription. It can be dropped and
//! re-attached at any time (the console host does this on `redraw`); the
//! session and its fetched results are untouched by that.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::Result;
use crate::logic::navigation::NavigationBridge;
use crate::logic::presenter::{MenuState, RenderedList, ResultPresenter};
use crate::logic::session::{SearchSession, SessionStatus};
use crate::state::SortKey;

/// What the host should display.
#[derive(Clone, Debug)]
pub enum ViewUpdate {
    /// Fetch still running.
    Loading,
    /// Results in display order.
    Results(RenderedList),
    /// Search finished with zero results.
    NoResults,
    /// Search failed; text is ready for display.
    Message(String),
}

/// Outcome of a user selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The bridge was notified.
    Delivered,
    /// No rendered entry at that position (or it has no name).
    NoSuchEntry,
    /// The entry has no maintainer to follow.
    MissingMaintainer,
}

/// One attachment of a presentation to a session.
#[derive(Debug)]
pub struct ResultView {
    session: Arc<SearchSession>,
    presenter: ResultPresenter,
    updates: watch::Receiver<SessionStatus>,
}

impl ResultView {
    /// What: Attach a fresh view to `session`.
    ///
    /// Inputs:
    /// - `session`: Retained session
    /// - `saved_sort`: Sort code saved by a previous view, if any
    ///
    /// Output:
    /// - View whose active key is the saved one or the session's initial key
    #[must_use]
    pub fn attach(session: Arc<SearchSession>, saved_sort: Option<i32>) -> Self {
        let presenter = ResultPresenter::restore(session.params().initial_sort, saved_sort);
        let updates = session.subscribe();
        tracing::debug!(
            query = %session.params().query,
            sort = presenter.active_sort().as_config_key(),
            "[View] Attached"
        );
        Self {
            session,
            presenter,
            updates,
        }
    }

    /// What: Attach a view that replaces a torn-down one.
    ///
    /// Inputs:
    /// - `session`: Retained session
    /// - `saved_sort`: Sort code saved by the previous view
    /// - `previous`: Last rendering of the previous view
    ///
    /// Output:
    /// - View that reuses `previous` when it matches the restored key and the
    ///   session's current results, so the list is not sorted again
    #[must_use]
    pub fn reattach(
        session: Arc<SearchSession>,
        saved_sort: Option<i32>,
        previous: Option<RenderedList>,
    ) -> Self {
        let view = Self::attach(session, saved_sort);
        let status = view.session.status();
        if let (Some(previous), Some(records)) = (previous, status.results())
            && !view.presenter.adopt(previous, records)
        {
            tracing::debug!("[View] Previous rendering is stale; will re-sort");
        }
        view
    }

    /// Last rendering produced by this view, to hand to [`ResultView::reattach`].
    #[must_use]
    pub fn last_rendered(&self) -> Option<RenderedList> {
        self.presenter.last_rendered()
    }

    /// Session this view observes.
    #[must_use]
    pub const fn session(&self) -> &Arc<SearchSession> {
        &self.session
    }

    /// Presenter of this view.
    #[must_use]
    pub const fn presenter(&self) -> &ResultPresenter {
        &self.presenter
    }

    /// What: Project the latest session status and mark it seen.
    ///
    /// Output:
    /// - Display update for the current status
    ///
    /// # Errors
    /// - `UnparseableNumericField` from ordering loaded results
    pub fn current(&mut self) -> Result<ViewUpdate> {
        let status = self.updates.borrow_and_update().clone();
        self.project(&status)
    }

    /// What: Wait for the next status change, then project it.
    ///
    /// Output:
    /// - Display update; the current one again if the session went away
    ///
    /// # Errors
    /// - Same as [`ResultView::current`]
    pub async fn next_update(&mut self) -> Result<ViewUpdate> {
        if self.updates.changed().await.is_err() {
            tracing::trace!("[View] Session closed");
        }
        self.current()
    }

    /// What: Wait until the session settles, then project it.
    ///
    /// # Errors
    /// - Same as [`ResultView::current`]
    pub async fn settled(&mut self) -> Result<ViewUpdate> {
        let _ = self.updates.wait_for(SessionStatus::is_settled).await;
        self.current()
    }

    /// What: Switch the sort key and re-project without fetching.
    ///
    /// # Errors
    /// - Same as [`ResultView::current`]
    pub fn set_sort(&self, key: SortKey) -> Result<ViewUpdate> {
        self.presenter.set_sort_key(key);
        self.project(&self.session.status())
    }

    /// Apply a menu action token; `None` when the token is unknown.
    pub fn apply_action(&self, token: &str) -> Option<Result<ViewUpdate>> {
        self.presenter.apply_action(token)?;
        Some(self.project(&self.session.status()))
    }

    /// Sort menu for the current state.
    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        let has_results = self
            .session
            .status()
            .results()
            .is_some_and(|r| !r.is_empty());
        self.presenter.menu_state(has_results)
    }

    /// Sort code to hand to the next [`ResultView::attach`].
    #[must_use]
    pub fn save_state(&self) -> i32 {
        self.presenter.save_state()
    }

    /// What: Report a click on the result at display position `pos`.
    ///
    /// Inputs:
    /// - `pos`: Zero-based position in the last rendered list
    /// - `bridge`: Host navigation
    ///
    /// Output:
    /// - `Delivered` when the bridge was called
    pub fn select_result(&self, pos: usize, bridge: &mut dyn NavigationBridge) -> Selection {
        let Some(list) = self.presenter.last_rendered() else {
            return Selection::NoSuchEntry;
        };
        match list.get(pos).map(|r| r.name.trim()) {
            Some(name) if !name.is_empty() => {
                bridge.on_result_selected(name);
                Selection::Delivered
            }
            _ => Selection::NoSuchEntry,
        }
    }

    /// What: Report a click on the maintainer of the result at `pos`.
    ///
    /// Inputs:
    /// - `pos`: Zero-based position in the last rendered list
    /// - `bridge`: Host navigation
    ///
    /// Output:
    /// - `Delivered`, `NoSuchEntry`, or `MissingMaintainer` for orphaned packages
    pub fn select_maintainer(&self, pos: usize, bridge: &mut dyn NavigationBridge) -> Selection {
        let Some(list) = self.presenter.last_rendered() else {
            return Selection::NoSuchEntry;
        };
        let Some(record) = list.get(pos).filter(|r| !r.name.trim().is_empty()) else {
            return Selection::NoSuchEntry;
        };
        match record.maintainer_name() {
            Some(maintainer) => {
                bridge.on_maintainer_selected(maintainer);
                Selection::Delivered
            }
            None => Selection::MissingMaintainer,
        }
    }

    fn project(&self, status: &SessionStatus) -> Result<ViewUpdate> {
        Ok(match status {
            SessionStatus::Idle | SessionStatus::Loading => ViewUpdate::Loading,
            SessionStatus::Loaded(records) if records.is_empty() => ViewUpdate::NoResults,
            SessionStatus::Loaded(records) => {
                ViewUpdate::Results(self.presenter.render(Some(records))?)
            }
            SessionStatus::Failed(msg) => ViewUpdate::Message(msg.display_text().to_string()),
        })
    }
}
