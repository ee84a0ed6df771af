//! Cold-case record model and display helpers.
//!
//! Records arrive from several producers (the live API, a static export,
//! the synthetic generator), so every optional field tolerates being
//! absent, `null` or of the wrong type. Display helpers substitute
//! placeholder text instead of failing.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Classification constants
// ---------------------------------------------------------------------------

pub const CASE_TYPE_HOMICIDE: &str = "homicide";
pub const CASE_TYPE_MISSING_PERSON: &str = "missing_person";
pub const CASE_TYPE_UNIDENTIFIED: &str = "unidentified";

/// Known case types, in the order they are offered as filter options.
pub const CASE_TYPES: &[&str] = &[
    CASE_TYPE_HOMICIDE,
    CASE_TYPE_MISSING_PERSON,
    CASE_TYPE_UNIDENTIFIED,
];

/// The status the default "unsolved only" filter keys on.
pub const STATUS_UNSOLVED: &str = "unsolved";
pub const STATUS_SOLVED: &str = "solved";
pub const STATUS_COLD: &str = "cold";

pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const UNKNOWN_DATE: &str = "Date Unknown";

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A piece of evidence attached to a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Evidence {
    #[serde(rename = "type", alias = "evidence_type", deserialize_with = "nullable")]
    pub evidence_type: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    pub source: Option<String>,
}

/// A photo, document or clip linked to a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    pub thumbnail: Option<String>,
    pub caption: Option<String>,
    #[serde(rename = "type", alias = "media_type")]
    pub media_type: Option<String>,
}

/// One dated entry in a case chronology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEntry {
    pub date: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub event: String,
}

/// One cold-case entry as served by the catalog endpoints.
///
/// Field names follow the backend's snake_case columns; camelCase aliases
/// accept the shape produced by the browser export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseRecord {
    #[serde(deserialize_with = "text_or_default")]
    pub id: String,
    #[serde(deserialize_with = "text_or_default")]
    pub title: String,
    #[serde(alias = "caseType", deserialize_with = "text_or_default")]
    pub case_type: String,
    #[serde(deserialize_with = "text_or_default")]
    pub status: String,
    #[serde(alias = "dateOccurred", deserialize_with = "lenient_text")]
    pub date_occurred: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub county: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_or_default")]
    pub evidence: Vec<Evidence>,
    /// Sparse victim description: field name to value.
    #[serde(deserialize_with = "lenient")]
    pub victim: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(deserialize_with = "lenient_or_default")]
    pub media: Vec<MediaItem>,
    #[serde(deserialize_with = "lenient_or_default")]
    pub timeline: Vec<TimelineEntry>,
    #[serde(alias = "thorneAnalysis", deserialize_with = "lenient_text")]
    pub thorne_analysis: Option<String>,
    #[serde(alias = "mayaAnalysis", deserialize_with = "lenient_text")]
    pub maya_analysis: Option<String>,
    #[serde(alias = "sourceDataset", deserialize_with = "lenient_text")]
    pub source_dataset: Option<String>,
    #[serde(alias = "sourceUrl", deserialize_with = "lenient_text")]
    pub source_url: Option<String>,
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decode `T`, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

/// A string, or a number rendered as text. Anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn text_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

impl CaseRecord {
    pub fn is_unsolved(&self) -> bool {
        self.status == STATUS_UNSOLVED
    }

    pub fn city(&self) -> Option<&str> {
        non_blank(&self.city)
    }

    pub fn state(&self) -> Option<&str> {
        non_blank(&self.state)
    }

    pub fn summary(&self) -> Option<&str> {
        non_blank(&self.summary)
    }

    /// The occurrence date, when it parses as a calendar date.
    pub fn date(&self) -> Option<NaiveDate> {
        non_blank(&self.date_occurred).and_then(parse_date)
    }

    /// The occurrence year. Accepts full dates, RFC 3339 timestamps and
    /// bare four-digit years; anything else yields `None`.
    pub fn year(&self) -> Option<i32> {
        let raw = non_blank(&self.date_occurred)?;
        if let Some(date) = parse_date(raw) {
            return Some(date.year());
        }
        let head = raw.get(..4)?;
        let followed_by_digit = raw[4..].chars().next().is_some_and(|c| c.is_ascii_digit());
        if head.chars().all(|c| c.is_ascii_digit()) && !followed_by_digit {
            head.parse().ok()
        } else {
            None
        }
    }

    /// Number of victim fields carrying a non-empty value.
    pub fn populated_victim_fields(&self) -> usize {
        self.victim
            .as_ref()
            .map(|fields| fields.values().filter(|v| is_populated(v)).count())
            .unwrap_or(0)
    }

    pub fn has_ai_analysis(&self) -> bool {
        non_blank(&self.thorne_analysis).is_some() || non_blank(&self.maya_analysis).is_some()
    }

    /// Lowercased, diacritic-folded text the search box matches against.
    pub fn search_haystack(&self) -> String {
        let parts = [
            self.title.as_str(),
            self.city.as_deref().unwrap_or(""),
            self.state.as_deref().unwrap_or(""),
            self.summary.as_deref().unwrap_or(""),
        ];
        crate::filter::fold_text(&parts.join(" "))
    }

    // -- display -------------------------------------------------------------

    /// `"City, ST"`, whichever half is known, or the placeholder.
    pub fn location_label(&self) -> String {
        match (self.city(), self.state()) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            (Some(city), None) => city.to_string(),
            (None, Some(state)) => state.to_string(),
            (None, None) => UNKNOWN_LOCATION.to_string(),
        }
    }

    /// Long-form date, the raw value if it does not parse, or the placeholder.
    pub fn date_label(&self) -> String {
        match (self.date(), non_blank(&self.date_occurred)) {
            (Some(date), _) => date.format("%B %-d, %Y").to_string(),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => UNKNOWN_DATE.to_string(),
        }
    }

    pub fn case_type_label(&self) -> String {
        case_type_label(&self.case_type)
    }

    pub fn status_label(&self) -> String {
        if self.status.trim().is_empty() {
            return "Unknown".to_string();
        }
        title_case(&self.status)
    }
}

/// Human-readable label for a case type value.
pub fn case_type_label(case_type: &str) -> String {
    match case_type {
        CASE_TYPE_HOMICIDE => "Homicide".to_string(),
        CASE_TYPE_MISSING_PERSON => "Missing Person".to_string(),
        CASE_TYPE_UNIDENTIFIED => "Unidentified".to_string(),
        "" => "Unknown".to_string(),
        other => other.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

fn is_populated(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::String(s) => !s.trim().is_empty(),
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

fn title_case(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
