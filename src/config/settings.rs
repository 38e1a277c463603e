use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use super::parsing::{parse_bool, skip_comment_or_empty, strip_inline_comment};
use super::paths::resolve_settings_config_path;
use crate::sources::AUR_BASE_URL;
use crate::state::{QueryField, SortKey};

/// User-configurable defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Sort key new searches start with.
    pub default_sort: SortKey,
    /// Field searched when the command line does not say.
    pub default_search_by: QueryField,
    /// AUR web root.
    pub rpc_base_url: String,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Read follow-up commands from stdin after the first listing.
    pub interactive: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_sort: SortKey::ByName,
            default_search_by: QueryField::NameDesc,
            rpc_base_url: AUR_BASE_URL.to_string(),
            request_timeout_secs: 10,
            interactive: true,
        }
    }
}

impl Settings {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// What: Parse `settings.conf` content into `settings`.
///
/// Inputs:
/// - `content`: File content
/// - `settings`: Settings to update in place
///
/// Output:
/// - None (unknown keys and invalid values are logged and ignored)
///
/// Details:
/// - Keys are case-insensitive; `.`, `-` and spaces in keys are treated as `_`.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((raw_key, raw_val)) = line.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(raw_val);
        let applied = match key.as_str() {
            "default_sort" | "sort" | "sort_by" => SortKey::from_config_key(val)
                .map(|k| settings.default_sort = k)
                .is_some(),
            "default_search_by" | "search_by" => QueryField::from_config_key(val)
                .map(|f| settings.default_search_by = f)
                .is_some(),
            "rpc_base_url" | "aur_url" => {
                let ok = val.starts_with("http://") || val.starts_with("https://");
                if ok {
                    settings.rpc_base_url = val.trim_end_matches('/').to_string();
                }
                ok
            }
            "request_timeout_secs" | "timeout" => val
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .map(|s| settings.request_timeout_secs = s)
                .is_some(),
            "interactive" => parse_bool(val)
                .map(|b| settings.interactive = b)
                .is_some(),
            _ => {
                debug!(key = %key, "[Config] Ignoring unknown setting");
                true
            }
        };
        if !applied {
            warn!(key = %key, value = %val, "[Config] Invalid value; keeping default");
        }
    }
}

/// What: Load settings from a specific file.
///
/// Inputs:
/// - `path`: Settings file
///
/// Output:
/// - Parsed settings; defaults when the file cannot be read
pub fn load_settings_from(path: &Path) -> Settings {
    let mut out = Settings::default();
    match fs::read_to_string(path) {
        Ok(content) => {
            parse_settings(&content, &mut out);
            debug!(path = %path.display(), "[Config] Settings loaded");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "[Config] Failed to read settings");
        }
    }
    out
}

/// What: Load user settings from `settings.conf` under XDG/HOME.
///
/// Inputs:
/// - None
///
/// Output:
/// - Settings; `Settings::default()` when no file exists
#[must_use]
pub fn settings() -> Settings {
    resolve_settings_config_path().map_or_else(
        || {
            debug!("[Config] No settings.conf found; using defaults");
            Settings::default()
        },
        |path| load_settings_from(&path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    /// What: Known keys are applied, aliases accepted, comments ignored
    ///
    /// - Input: Settings text with every key, an alias and inline comments
    /// - Output: All fields updated
    fn parse_all_keys() {
        let content = "\
# aurquery settings
default_sort = votes   # most voted first
Search-By = maintainer
rpc_base_url = https://aur.example.org/
timeout = 3 // seconds
interactive = no
";
        let mut s = Settings::default();
        parse_settings(content, &mut s);
        assert_eq!(s.default_sort, SortKey::ByVotes);
        assert_eq!(s.default_search_by, QueryField::Maintainer);
        assert_eq!(s.rpc_base_url, "https://aur.example.org");
        assert_eq!(s.request_timeout_secs, 3);
        assert!(!s.interactive);
    }

    #[test]
    /// What: Invalid values keep defaults
    ///
    /// - Input: Unknown sort, zero timeout, non-URL base, line without `=`
    /// - Output: Defaults unchanged
    fn invalid_values_keep_defaults() {
        let content = "default_sort = size\ntimeout = 0\nrpc_base_url = ftp://x\njunk line\n";
        let mut s = Settings::default();
        parse_settings(content, &mut s);
        assert_eq!(s, Settings::default());
    }

    #[test]
    /// What: Settings load from a file on disk; a missing file yields defaults
    ///
    /// - Input: Temp file with `sort = first_submitted`; a nonexistent path
    /// - Output: ByFirstSubmitted; defaults
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        let mut f = std::fs::File::create(&path).expect("create");
        writeln!(f, "sort = first_submitted").expect("write");
        drop(f);
        assert_eq!(load_settings_from(&path).default_sort, SortKey::ByFirstSubmitted);
        assert_eq!(
            load_settings_from(&dir.path().join("missing.conf")),
            Settings::default()
        );
    }
}
