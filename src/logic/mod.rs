//! Core non-UI logic: the search session state machine, ordering and views.

pub mod navigation;
pub mod presenter;
pub mod session;
pub mod sort;
pub mod view;

pub use navigation::NavigationBridge;
pub use presenter::{
    MenuEntry, MenuState, NO_SAVED_SORT, RenderedList, ResultPresenter, render,
    sort_key_for_action,
};
pub use session::{
    FailureMessage, GENERIC_FAILURE_MESSAGE, SearchParams, SearchSession, SessionStatus,
};
pub use view::{ResultView, Selection, ViewUpdate};
