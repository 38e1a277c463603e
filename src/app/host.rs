//! Console presentation of view updates and the navigation bridge.

use std::io::Write;

use tracing::warn;

use crate::logic::{MenuState, NavigationBridge, RenderedList, ViewUpdate};
use crate::state::{QueryField, ResultRecord, SortKey};
use crate::util::ts_to_day;

/// Package page for `name` on the AUR web interface.
#[must_use]
pub fn package_url(base_url: &str, name: &str) -> String {
    format!(
        "{}/packages/{}",
        base_url.trim_end_matches('/'),
        crate::util::percent_encode(name)
    )
}

/// A search queued by a maintainer selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowUp {
    /// Field to search by.
    pub field: QueryField,
    /// Query text.
    pub query: String,
    /// Initial sort key.
    pub sort: SortKey,
}

/// Writes updates to `out` and turns selections into URLs or follow-up searches.
pub struct ConsoleHost<W: Write> {
    out: W,
    base_url: String,
    follow_up_sort: SortKey,
    pending: Option<FollowUp>,
}

impl<W: Write> ConsoleHost<W> {
    /// What: Create a host.
    ///
    /// Inputs:
    /// - `out`: Destination for listings and messages
    /// - `base_url`: AUR web root for package links
    /// - `follow_up_sort`: Initial sort of maintainer searches
    pub fn new(out: W, base_url: impl Into<String>, follow_up_sort: SortKey) -> Self {
        Self {
            out,
            base_url: base_url.into(),
            follow_up_sort,
            pending: None,
        }
    }

    /// Take the search queued by the last maintainer selection.
    pub const fn take_follow_up(&mut self) -> Option<FollowUp> {
        self.pending.take()
    }

    /// Underlying writer.
    pub const fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// What: Print one line, logging instead of failing when stdout is gone.
    pub fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "[Console] Write failed");
        }
    }

    /// What: Print a view update.
    ///
    /// Inputs:
    /// - `update`: Projection of the session status
    pub fn show(&mut self, update: &ViewUpdate) {
        match update {
            ViewUpdate::Loading => self.line("Searching..."),
            ViewUpdate::NoResults => self.line("No packages found."),
            ViewUpdate::Message(msg) => self.line(msg),
            ViewUpdate::Results(list) => {
                let text = format_list(list);
                self.line(&text);
            }
        }
    }

    /// Print the sort menu, or a note when there is nothing to sort.
    pub fn show_menu(&mut self, menu: &MenuState) {
        if !menu.visible {
            self.line("Nothing to sort.");
            return;
        }
        for entry in &menu.entries {
            let mark = if entry.checked { "[x]" } else { "[ ]" };
            let text = format!("{mark} {:<18} {}", entry.key.as_config_key(), entry.label);
            self.line(&text);
        }
    }
}

impl<W: Write> NavigationBridge for ConsoleHost<W> {
    fn on_result_selected(&mut self, name: &str) {
        let url = package_url(&self.base_url, name);
        self.line(&url);
    }

    fn on_maintainer_selected(&mut self, maintainer: &str) {
        tracing::info!(maintainer, "[Console] Following maintainer");
        self.pending = Some(FollowUp {
            field: QueryField::Maintainer,
            query: maintainer.to_string(),
            sort: self.follow_up_sort,
        });
    }
}

/// What: Render a result list as numbered lines.
///
/// Inputs:
/// - `list`: Ordered results
///
/// Output:
/// - Header naming the active sort, then one line per record
#[must_use]
pub fn format_list(list: &RenderedList) -> String {
    let mut out = format!(
        "{} result(s), sorted by {}",
        list.len(),
        list.sort_key().label().to_lowercase()
    );
    for (i, record) in list.iter().enumerate() {
        out.push('\n');
        out.push_str(&format_record(i + 1, record));
    }
    out
}

/// One numbered listing line; numeric fields are shown as received.
fn format_record(n: usize, r: &ResultRecord) -> String {
    let day = |parsed: crate::error::Result<i64>, raw: &str| {
        parsed.map_or_else(|_| raw.to_string(), ts_to_day)
    };
    let maintainer = r.maintainer_name().unwrap_or("orphan");
    let mut line = format!(
        "{n:>3}. {} {}  votes {}  pop {}  updated {}  submitted {}  ({maintainer})",
        r.name,
        r.version,
        r.num_votes,
        r.popularity,
        day(r.last_modified_at(), &r.last_modified),
        day(r.first_submitted_at(), &r.first_submitted),
    );
    if let Some(desc) = r.description.as_deref().filter(|d| !d.trim().is_empty()) {
        line.push_str("\n     ");
        line.push_str(desc.trim());
    }
    line
}
