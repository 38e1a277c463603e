//! Result presenter: applies the active sort key to a session's results.
//!
//! The presenter never copies or mutates records. A [`RenderedList`] shares
//! the session's `Arc<[ResultRecord]>` and holds an index permutation into it.
//! The active key and the last rendering live behind one mutex, so a reader
//! never sees a key paired with a list ordered by another key.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::logic::sort::sorted_indices;
use crate::state::{ResultRecord, SortKey};

/// Saved-state value meaning "no sort was saved".
pub const NO_SAVED_SORT: i32 = -1;

/// Menu action identifiers and the key each one selects.
const SORT_ACTIONS: [(&str, SortKey); 5] = [
    ("sort_by_package_name", SortKey::ByName),
    ("sort_by_votes", SortKey::ByVotes),
    ("sort_by_popularity", SortKey::ByPopularity),
    ("sort_by_last_updated", SortKey::ByLastUpdated),
    ("sort_by_first_submitted", SortKey::ByFirstSubmitted),
];

/// What: Resolve a menu action token to a sort key.
///
/// Inputs:
/// - `token`: Menu action id (e.g. `sort_by_votes`) or a settings key/alias (e.g. `votes`)
///
/// Output:
/// - `Some(SortKey)` when the token is known
#[must_use]
pub fn sort_key_for_action(token: &str) -> Option<SortKey> {
    let token = token.trim();
    SORT_ACTIONS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(token))
        .map(|(_, key)| *key)
        .or_else(|| SortKey::from_config_key(token))
}

/// Menu action id for `key`.
#[must_use]
pub fn action_for_sort_key(key: SortKey) -> &'static str {
    SORT_ACTIONS
        .iter()
        .find(|(_, k)| *k == key)
        .map_or("sort_by_package_name", |(id, _)| *id)
}

/// What: Order `records` under `key` without touching presenter state.
///
/// Inputs:
/// - `records`: Results in endpoint order
/// - `key`: Sort key
///
/// Output:
/// - Borrowed records in display order
///
/// # Errors
/// - `UnparseableNumericField` when a field needed by `key` is malformed
pub fn render<'a>(records: &'a [ResultRecord], key: SortKey) -> Result<Vec<&'a ResultRecord>> {
    crate::logic::sort::sorted(records, key)
}

/// A result list in display order.
#[derive(Clone, Debug)]
pub struct RenderedList {
    sort: SortKey,
    records: Arc<[ResultRecord]>,
    order: Arc<[usize]>,
}

impl RenderedList {
    fn empty(sort: SortKey) -> Self {
        Self {
            sort,
            records: Arc::from(Vec::new()),
            order: Arc::from(Vec::new()),
        }
    }

    /// Key this list is ordered by.
    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` when there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entry at display position `pos`.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&ResultRecord> {
        self.order.get(pos).map(|&i| &self.records[i])
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.order.iter().map(|&i| &self.records[i])
    }

    /// Package names in display order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|r| r.name.as_str()).collect()
    }

    /// `true` when `other` is the very same rendering, not a recomputed copy.
    #[must_use]
    pub fn is_same_rendering(&self, other: &Self) -> bool {
        self.sort == other.sort && Arc::ptr_eq(&self.order, &other.order)
    }

    fn renders(&self, sort: SortKey, records: &Arc<[ResultRecord]>) -> bool {
        self.sort == sort && Arc::ptr_eq(&self.records, records)
    }
}

/// One menu line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    /// Action id sent back when the entry is chosen.
    pub action: &'static str,
    /// Sort key the entry selects.
    pub key: SortKey,
    /// Display label.
    pub label: &'static str,
    /// Whether the entry is the active one.
    pub checked: bool,
}

/// Sort menu as the host should draw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuState {
    /// Sort entries are only offered when there is something to sort.
    pub visible: bool,
    /// One entry per key, exactly one checked.
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug)]
struct PresenterState {
    active_sort: SortKey,
    rendered: Option<RenderedList>,
}

/// Ordering engine plus the currently active [`SortKey`].
#[derive(Debug)]
pub struct ResultPresenter {
    state: Mutex<PresenterState>,
}

impl ResultPresenter {
    /// Presenter starting at `initial_sort`.
    #[must_use]
    pub const fn new(initial_sort: SortKey) -> Self {
        Self {
            state: Mutex::new(PresenterState {
                active_sort: initial_sort,
                rendered: None,
            }),
        }
    }

    /// What: Rebuild a presenter for a view recreated after transient teardown.
    ///
    /// Inputs:
    /// - `initial_sort`: The session's initial key
    /// - `saved`: Code from [`ResultPresenter::save_state`], if any
    ///
    /// Output:
    /// - Presenter whose active key is the saved one, or `initial_sort` when
    ///   nothing was saved (`None` or [`NO_SAVED_SORT`])
    ///
    /// Details:
    /// - Unknown codes decode to `ByName`, matching [`SortKey::from_code`].
    #[must_use]
    pub fn restore(initial_sort: SortKey, saved: Option<i32>) -> Self {
        let active = match saved {
            Some(code) if code != NO_SAVED_SORT => SortKey::from_code(code),
            _ => initial_sort,
        };
        tracing::trace!(
            initial = initial_sort.as_config_key(),
            active = active.as_config_key(),
            "[Presenter] Restored"
        );
        Self::new(active)
    }

    /// What: Take over a rendering produced by a previous presenter.
    ///
    /// Inputs:
    /// - `previous`: Last rendering of the torn-down presenter
    /// - `records`: The session's current results
    ///
    /// Output:
    /// - `true` when `previous` was adopted; it must be ordered by the active
    ///   key and built from the very same `records` allocation
    pub fn adopt(&self, previous: RenderedList, records: &Arc<[ResultRecord]>) -> bool {
        let mut state = self.lock();
        if !previous.renders(state.active_sort, records) {
            return false;
        }
        tracing::trace!(
            sort = state.active_sort.as_config_key(),
            "[Presenter] Adopted rendering"
        );
        state.rendered = Some(previous);
        true
    }

    fn lock(&self) -> MutexGuard<'_, PresenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Currently active key.
    #[must_use]
    pub fn active_sort(&self) -> SortKey {
        self.lock().active_sort
    }

    /// Value to persist across view rebuilds.
    #[must_use]
    pub fn save_state(&self) -> i32 {
        self.active_sort().code()
    }

    /// What: Change the active key.
    ///
    /// Inputs:
    /// - `key`: New key
    ///
    /// Output:
    /// - `true` when the key changed; the cached rendering is dropped in that case
    pub fn set_sort_key(&self, key: SortKey) -> bool {
        let mut state = self.lock();
        if state.active_sort == key {
            return false;
        }
        tracing::debug!(
            from = state.active_sort.as_config_key(),
            to = key.as_config_key(),
            "[Presenter] Sort key changed"
        );
        state.active_sort = key;
        state.rendered = None;
        true
    }

    /// What: Apply a menu action.
    ///
    /// Inputs:
    /// - `token`: Action id or sort alias
    ///
    /// Output:
    /// - The selected key, or `None` when the token is unknown (state untouched)
    pub fn apply_action(&self, token: &str) -> Option<SortKey> {
        let key = sort_key_for_action(token)?;
        self.set_sort_key(key);
        Some(key)
    }

    /// What: Order `records` under the active key, reusing the last rendering when possible.
    ///
    /// Inputs:
    /// - `records`: The session's results, or `None` while nothing is loaded
    ///
    /// Output:
    /// - Display-ordered list; empty for `None` or an empty slice
    ///
    /// # Errors
    /// - `UnparseableNumericField` when a field needed by the active key is
    ///   malformed. The previous rendering is discarded so no stale list stays
    ///   paired with the key.
    ///
    /// Details:
    /// - Recomputes only when the key changed or `records` is a different
    ///   allocation than last time.
    pub fn render(&self, records: Option<&Arc<[ResultRecord]>>) -> Result<RenderedList> {
        let mut state = self.lock();
        let sort = state.active_sort;
        let Some(records) = records.filter(|r| !r.is_empty()) else {
            state.rendered = None;
            return Ok(RenderedList::empty(sort));
        };
        if let Some(cached) = state.rendered.as_ref().filter(|c| c.renders(sort, records)) {
            tracing::trace!(sort = sort.as_config_key(), "[Presenter] Reusing rendering");
            return Ok(cached.clone());
        }
        state.rendered = None;
        let order = sorted_indices(records, sort).inspect_err(|e| {
            tracing::error!(error = %e, sort = sort.as_config_key(), "[Presenter] Sort failed");
        })?;
        let list = RenderedList {
            sort,
            records: Arc::clone(records),
            order: order.into(),
        };
        tracing::debug!(
            sort = sort.as_config_key(),
            count = list.len(),
            "[Presenter] Rendered"
        );
        state.rendered = Some(list.clone());
        Ok(list)
    }

    /// Most recent rendering under the current key, if still valid.
    #[must_use]
    pub fn last_rendered(&self) -> Option<RenderedList> {
        self.lock().rendered.clone()
    }

    /// What: Describe the sort menu.
    ///
    /// Inputs:
    /// - `has_results`: Whether the held list is non-empty
    ///
    /// Output:
    /// - One entry per key with the active key checked
    #[must_use]
    pub fn menu_state(&self, has_results: bool) -> MenuState {
        let active = self.active_sort();
        MenuState {
            visible: has_results,
            entries: SORT_ACTIONS
                .iter()
                .map(|&(action, key)| MenuEntry {
                    action,
                    key,
                    label: key.label(),
                    checked: key == active,
                })
                .collect(),
        }
    }
}
