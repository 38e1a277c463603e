//! Outbound contract for user selections.

/// Implemented by the host; the core calls it only for genuine user
/// selections of a record with a non-empty name and never navigates itself.
pub trait NavigationBridge {
    /// The user picked a result; `name` is the package name.
    fn on_result_selected(&mut self, name: &str);

    /// The user picked a result's maintainer; `maintainer` is trimmed and non-empty.
    fn on_maintainer_selected(&mut self, maintainer: &str);
}
