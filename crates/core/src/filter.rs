//! Filter state and the predicate pipeline.
//!
//! [`apply_filters`] is the only place records are excluded. It reads
//! nothing besides the record slice and the [`FilterState`] it is handed,
//! so calling it twice with the same inputs yields the same list in the
//! same order.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::case::CaseRecord;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Year / decade filter values
// ---------------------------------------------------------------------------

/// A year selector value: an exact year or a ten-year bucket.
///
/// The textual form of a decade is `"<start>s"`, e.g. `"1980s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum YearFilter {
    Year(i32),
    Decade(i32),
}

impl YearFilter {
    /// Bucket a year into its decade (`1985` -> `Decade(1980)`).
    pub fn decade_of(year: i32) -> Self {
        YearFilter::Decade(year.div_euclid(10) * 10)
    }

    pub fn matches(&self, year: i32) -> bool {
        match *self {
            YearFilter::Year(y) => year == y,
            YearFilter::Decade(start) => start <= year && year < start + 10,
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::Year(y) => write!(f, "{y}"),
            YearFilter::Decade(start) => write!(f, "{start}s"),
        }
    }
}

impl Serialize for YearFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for YearFilter {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        let invalid = || CoreError::Validation(format!("Invalid year filter: '{value}'"));

        match value.strip_suffix('s') {
            Some(start) => start.parse().map(YearFilter::Decade).map_err(|_| invalid()),
            None => value.parse().map(YearFilter::Year).map_err(|_| invalid()),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// The single authoritative filter/pagination state of a browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Raw search box contents; trimmed and folded at match time.
    pub search_text: String,
    pub state: Option<String>,
    pub case_type: Option<String>,
    pub year: Option<YearFilter>,
    pub unsolved_only: bool,
    /// 1-indexed page number.
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            state: None,
            case_type: None,
            year: None,
            unsolved_only: true,
            page: 1,
        }
    }
}

impl FilterState {
    /// Search text after trimming and case/diacritic folding.
    pub fn search_needle(&self) -> String {
        fold_text(self.search_text.trim())
    }

    /// Whether `record` passes every active predicate.
    ///
    /// Callers filtering many records should use [`apply_filters`], which
    /// folds the search needle once.
    pub fn matches(&self, record: &CaseRecord) -> bool {
        self.matches_with_needle(record, &self.search_needle())
    }

    fn matches_with_needle(&self, record: &CaseRecord, needle: &str) -> bool {
        if self.unsolved_only && !record.is_unsolved() {
            return false;
        }
        if !needle.is_empty() && !record.search_haystack().contains(needle) {
            return false;
        }
        if let Some(state) = &self.state {
            if record.state() != Some(state.trim()) {
                return false;
            }
        }
        if let Some(case_type) = &self.case_type {
            if record.case_type != *case_type {
                return false;
            }
        }
        if let Some(year_filter) = self.year {
            match record.year() {
                Some(year) if year_filter.matches(year) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Keep the records passing every active predicate, preserving input order.
pub fn apply_filters<'a>(records: &'a [CaseRecord], filter: &FilterState) -> Vec<&'a CaseRecord> {
    filter_indices(records, filter)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Positions of the records passing every active predicate, ascending.
pub fn filter_indices(records: &[CaseRecord], filter: &FilterState) -> Vec<usize> {
    let needle = filter.search_needle();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches_with_needle(record, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Lowercase and strip combining marks so `"Montréal"` matches `"montreal"`.
pub fn fold_text(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn case(id: &str, status: &str, date: Option<&str>) -> CaseRecord {
        CaseRecord {
            id: id.into(),
            title: format!("Case {id}"),
            case_type: "homicide".into(),
            status: status.into(),
            date_occurred: date.map(str::to_string),
            ..Default::default()
        }
    }

    fn ids(records: &[&CaseRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    // -- YearFilter ----------------------------------------------------------

    #[test]
    fn parses_year_and_decade() {
        assert_eq!("1985".parse::<YearFilter>().ok(), Some(YearFilter::Year(1985)));
        assert_eq!("1980s".parse::<YearFilter>().ok(), Some(YearFilter::Decade(1980)));
        assert_eq!(YearFilter::Decade(1980).to_string(), "1980s");
    }

    #[test]
    fn rejects_garbage_year_filter() {
        assert_matches!("eighties".parse::<YearFilter>(), Err(CoreError::Validation(_)));
        assert_matches!("s".parse::<YearFilter>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn decade_bucket_bounds() {
        let eighties: YearFilter = "1980s".parse().expect("valid decade");
        assert!(eighties.matches(1985));
        assert!(eighties.matches(1980));
        assert!(eighties.matches(1989));
        assert!(!eighties.matches(1990));
        assert!(!eighties.matches(1979));
    }

    #[test]
    fn decade_of_year() {
        assert_eq!(YearFilter::decade_of(1985), YearFilter::Decade(1980));
        assert_eq!(YearFilter::decade_of(2000), YearFilter::Decade(2000));
    }

    // -- apply_filters -------------------------------------------------------

    #[test]
    fn default_state_keeps_only_unsolved() {
        let records = vec![
            case("a", "unsolved", None),
            case("b", "solved", None),
            case("c", "cold", None),
        ];
        let out = apply_filters(&records, &FilterState::default());
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn unsolved_toggle_off_keeps_everything() {
        let records = vec![case("a", "unsolved", None), case("b", "solved", None)];
        let filter = FilterState { unsolved_only: false, ..Default::default() };
        assert_eq!(apply_filters(&records, &filter).len(), 2);
    }

    #[test]
    fn search_matches_city_case_insensitively() {
        let mut hit = case("hit", "unsolved", None);
        hit.city = Some("Minneapolis".into());
        let mut miss = case("miss", "unsolved", None);
        miss.city = Some("Duluth".into());
        let records = vec![hit, miss];

        let filter = FilterState { search_text: "  minneapolis ".into(), ..Default::default() };
        assert_eq!(ids(&apply_filters(&records, &filter)), vec!["hit"]);
    }

    #[test]
    fn search_ignores_diacritics() {
        let mut record = case("a", "unsolved", None);
        record.city = Some("Montréal".into());
        let records = vec![record];

        let plain = FilterState { search_text: "montreal".into(), ..Default::default() };
        assert_eq!(apply_filters(&records, &plain).len(), 1);
        let accented = FilterState { search_text: "MONTRÉAL".into(), ..Default::default() };
        assert_eq!(apply_filters(&records, &accented).len(), 1);
    }

    #[test]
    fn search_spans_summary() {
        let mut record = case("a", "unsolved", None);
        record.summary = Some("Found near the river bend".into());
        let records = vec![record];
        let filter = FilterState { search_text: "river".into(), ..Default::default() };
        assert_eq!(apply_filters(&records, &filter).len(), 1);
    }

    #[test]
    fn state_and_type_are_exact_matches() {
        let mut a = case("a", "unsolved", None);
        a.state = Some("MN".into());
        let mut b = case("b", "unsolved", None);
        b.state = Some("MNX".into());
        b.case_type = "missing_person".into();
        let records = vec![a, b];

        let by_state = FilterState { state: Some("MN".into()), ..Default::default() };
        assert_eq!(ids(&apply_filters(&records, &by_state)), vec!["a"]);

        let by_type = FilterState { case_type: Some("missing_person".into()), ..Default::default() };
        assert_eq!(ids(&apply_filters(&records, &by_type)), vec!["b"]);
    }

    #[test]
    fn state_match_ignores_padding() {
        let mut padded = case("padded", "unsolved", None);
        padded.state = Some("MN ".into());
        let records = vec![padded];

        let by_state = FilterState { state: Some("MN".into()), ..Default::default() };
        assert_eq!(ids(&apply_filters(&records, &by_state)), vec!["padded"]);
    }

    #[test]
    fn undated_record_excluded_only_when_year_filter_active() {
        let records = vec![case("dated", "unsolved", Some("1985-03-01")), case("undated", "unsolved", None)];

        let no_year = FilterState::default();
        assert_eq!(apply_filters(&records, &no_year).len(), 2);

        let decade = FilterState { year: Some(YearFilter::Decade(1980)), ..Default::default() };
        assert_eq!(ids(&apply_filters(&records, &decade)), vec!["dated"]);
    }

    #[test]
    fn exact_year_filter() {
        let records = vec![case("a", "unsolved", Some("1985-03-01")), case("b", "unsolved", Some("1986-01-01"))];
        let filter = FilterState { year: Some(YearFilter::Year(1986)), ..Default::default() };
        assert_eq!(ids(&apply_filters(&records, &filter)), vec!["b"]);
    }

    #[test]
    fn apply_filters_is_idempotent() {
        let records: Vec<CaseRecord> = (0..30)
            .map(|i| case(&i.to_string(), if i % 3 == 0 { "solved" } else { "unsolved" }, None))
            .collect();
        let filter = FilterState { search_text: "1".into(), ..Default::default() };

        let first = ids(&apply_filters(&records, &filter));
        let second = ids(&apply_filters(&records, &filter));
        assert_eq!(first, second);
    }

    // -- fold_text -----------------------------------------------------------

    #[test]
    fn fold_text_lowercases_and_strips_marks() {
        assert_eq!(fold_text("Café Ñandú"), "cafe nandu");
    }
}
