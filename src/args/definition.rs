//! Command-line argument definition and processing.

use clap::Parser;

use crate::config::Settings;
use crate::state::{QueryField, SortKey};

/// aurquery - search the AUR by name, description or maintainer
#[derive(Parser, Debug)]
#[command(name = "aurquery")]
#[command(version)]
#[command(about = "Search the AUR and browse results under a sticky sort order", long_about = None)]
pub struct Args {
    /// Search text (joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Search by maintainer instead of name and description
    #[arg(short, long)]
    pub maintainer: bool,

    /// Initial sort: name, votes, popularity, last_updated, first_submitted
    #[arg(short, long, value_parser = parse_sort_key)]
    pub sort: Option<SortKey>,

    /// Print the results once and exit instead of reading commands
    #[arg(long)]
    pub once: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What: Clap value parser for sort keys.
///
/// Inputs:
/// - `s`: Raw argument
///
/// Output:
/// - Parsed key, or an error listing accepted values
fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::from_config_key(s).ok_or_else(|| {
        let accepted: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_config_key()).collect();
        format!("unknown sort '{s}' (expected one of: {})", accepted.join(", "))
    })
}

impl Args {
    /// Query text as typed, words joined by single spaces.
    #[must_use]
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    /// Field to search by; `--maintainer` wins over the configured default.
    #[must_use]
    pub const fn field(&self, settings: &Settings) -> QueryField {
        if self.maintainer {
            QueryField::Maintainer
        } else {
            settings.default_search_by
        }
    }

    /// Initial sort; `--sort` wins over the configured default.
    #[must_use]
    pub fn initial_sort(&self, settings: &Settings) -> SortKey {
        self.sort.unwrap_or(settings.default_sort)
    }

    /// Effective log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        if self.verbose { "debug" } else { &self.log_level }
    }

    /// Whether to read commands after the first listing.
    #[must_use]
    pub const fn interactive(&self, settings: &Settings) -> bool {
        !self.once && settings.interactive
    }
}
