//! Core value types: result records, sort keys and query fields.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Result, SearchError};

/// One AUR package as returned by a search.
///
/// Numeric fields are carried as the text the endpoint sent and are only
/// parsed when an ordering needs them, so a malformed payload surfaces as
/// [`SearchError::UnparseableNumericField`] at sort time instead of being
/// silently coerced.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultRecord {
    /// Package name; unique within one result set.
    pub name: String,
    /// Version string as reported by the AUR.
    #[serde(default)]
    pub version: String,
    /// One-line description (orphaned uploads may have none).
    #[serde(default)]
    pub description: Option<String>,
    /// Current maintainer; `None` for orphaned packages.
    #[serde(default)]
    pub maintainer: Option<String>,
    /// Vote count, text form.
    #[serde(deserialize_with = "text_or_number")]
    pub num_votes: String,
    /// Popularity score, text form.
    #[serde(deserialize_with = "text_or_number")]
    pub popularity: String,
    /// Last modification, epoch seconds in text form.
    #[serde(deserialize_with = "text_or_number")]
    pub last_modified: String,
    /// First submission, epoch seconds in text form.
    #[serde(deserialize_with = "text_or_number")]
    pub first_submitted: String,
}

/// What: Accept either a JSON string or a JSON number and keep its text form.
///
/// Inputs:
/// - `d`: Serde deserializer positioned at the field value
///
/// Output:
/// - The string verbatim, or the number rendered by `serde_json`
///
/// Details:
/// - The AUR RPC sends numbers, older mirrors and fixtures send strings; both
///   are normalized to text so parsing happens in one place.
fn text_or_number<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

impl ResultRecord {
    /// What: Build a record from its identity and raw numeric fields.
    ///
    /// Inputs:
    /// - `name`: Package name
    /// - `num_votes`, `popularity`, `last_modified`, `first_submitted`: Text as sent by the endpoint
    ///
    /// Output:
    /// - Record with empty version and no description or maintainer
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        num_votes: impl Into<String>,
        popularity: impl Into<String>,
        last_modified: impl Into<String>,
        first_submitted: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            description: None,
            maintainer: None,
            num_votes: num_votes.into(),
            popularity: popularity.into(),
            last_modified: last_modified.into(),
            first_submitted: first_submitted.into(),
        }
    }

    /// Attach a maintainer name.
    #[must_use]
    pub fn with_maintainer(mut self, maintainer: impl Into<String>) -> Self {
        self.maintainer = Some(maintainer.into());
        self
    }

    /// Parsed vote count.
    ///
    /// # Errors
    /// - `UnparseableNumericField` when the text is not a non-negative integer
    pub fn votes(&self) -> Result<u64> {
        self.parse_field("NumVotes", &self.num_votes)
    }

    /// Parsed popularity score.
    ///
    /// # Errors
    /// - `UnparseableNumericField` when the text is not a finite, non-negative real
    pub fn popularity_score(&self) -> Result<f64> {
        let v: f64 = self.parse_field("Popularity", &self.popularity)?;
        if v.is_finite() && v >= 0.0 {
            Ok(v)
        } else {
            Err(self.unparseable("Popularity", &self.popularity))
        }
    }

    /// Parsed last-modified timestamp.
    ///
    /// # Errors
    /// - `UnparseableNumericField` when the text is not an integer
    pub fn last_modified_at(&self) -> Result<i64> {
        self.parse_field("LastModified", &self.last_modified)
    }

    /// Parsed first-submitted timestamp.
    ///
    /// # Errors
    /// - `UnparseableNumericField` when the text is not an integer
    pub fn first_submitted_at(&self) -> Result<i64> {
        self.parse_field("FirstSubmitted", &self.first_submitted)
    }

    /// Maintainer name trimmed, or `None` when absent or blank.
    #[must_use]
    pub fn maintainer_name(&self) -> Option<&str> {
        self.maintainer
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    fn parse_field<T: std::str::FromStr>(&self, field: &'static str, raw: &str) -> Result<T> {
        raw.trim()
            .parse::<T>()
            .map_err(|_| self.unparseable(field, raw))
    }

    fn unparseable(&self, field: &'static str, raw: &str) -> SearchError {
        SearchError::UnparseableNumericField {
            name: self.name.clone(),
            field,
            value: raw.to_string(),
        }
    }
}

/// Ordering applied to a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Case-insensitive name, ascending.
    #[default]
    ByName,
    /// Most votes first.
    ByVotes,
    /// Most popular first.
    ByPopularity,
    /// Most recently modified first.
    ByLastUpdated,
    /// Oldest submission first.
    ByFirstSubmitted,
}

impl SortKey {
    /// Every key in menu order.
    pub const ALL: [Self; 5] = [
        Self::ByName,
        Self::ByVotes,
        Self::ByPopularity,
        Self::ByLastUpdated,
        Self::ByFirstSubmitted,
    ];

    /// Integer code written to saved view state.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ByName => 0,
            Self::ByVotes => 1,
            Self::ByPopularity => 2,
            Self::ByLastUpdated => 3,
            Self::ByFirstSubmitted => 4,
        }
    }

    /// What: Decode a saved sort code.
    ///
    /// Inputs:
    /// - `code`: Integer previously produced by [`SortKey::code`]
    ///
    /// Output:
    /// - Matching key; `ByName` for any unknown or corrupt value
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::ByVotes,
            2 => Self::ByPopularity,
            3 => Self::ByLastUpdated,
            4 => Self::ByFirstSubmitted,
            _ => Self::ByName,
        }
    }

    /// Return the string key used in settings files and on the command line.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::ByName => "name",
            Self::ByVotes => "votes",
            Self::ByPopularity => "popularity",
            Self::ByLastUpdated => "last_updated",
            Self::ByFirstSubmitted => "first_submitted",
        }
    }

    /// What: Parse a sort key from its settings key or an alias.
    ///
    /// Inputs:
    /// - `s`: Config or CLI token (case-insensitive, `-` and `_` interchangeable)
    ///
    /// Output:
    /// - `Some(SortKey)` on a recognized value; `None` otherwise
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" | "package_name" | "alphabetical" => Some(Self::ByName),
            "votes" | "num_votes" => Some(Self::ByVotes),
            "popularity" | "popular" => Some(Self::ByPopularity),
            "last_updated" | "updated" | "last_modified" => Some(Self::ByLastUpdated),
            "first_submitted" | "submitted" | "oldest" => Some(Self::ByFirstSubmitted),
            _ => None,
        }
    }

    /// Human-readable label for menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ByName => "Package name",
            Self::ByVotes => "Votes",
            Self::ByPopularity => "Popularity",
            Self::ByLastUpdated => "Last updated",
            Self::ByFirstSubmitted => "First submitted",
        }
    }
}

/// Which AUR field a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryField {
    /// Package name or description.
    #[default]
    NameDesc,
    /// Maintainer username.
    Maintainer,
}

impl QueryField {
    /// Value for the RPC `by=` parameter.
    #[must_use]
    pub const fn as_rpc_param(self) -> &'static str {
        match self {
            Self::NameDesc => "name-desc",
            Self::Maintainer => "maintainer",
        }
    }

    /// Parse a field from a settings value.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name_desc" | "name" | "description" => Some(Self::NameDesc),
            "maintainer" => Some(Self::Maintainer),
            _ => None,
        }
    }
}
