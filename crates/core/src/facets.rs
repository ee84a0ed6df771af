//! Filter option sets derived from the loaded records.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::case::CaseRecord;
use crate::filter::YearFilter;

/// Above this many distinct years the year selector switches to decades.
pub const MAX_INDIVIDUAL_YEARS: usize = 20;

/// Option lists for the state and year selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Distinct states, ascending.
    pub states: Vec<String>,
    /// Distinct years (or decades), descending.
    pub years: Vec<YearFilter>,
}

impl FilterOptions {
    pub fn uses_decades(&self) -> bool {
        self.years.iter().any(|y| matches!(y, YearFilter::Decade(_)))
    }
}

/// Scan every record once and collect the selector options.
///
/// Records without a state or a parseable date simply contribute nothing.
pub fn derive_filter_options(records: &[CaseRecord]) -> FilterOptions {
    let mut states = BTreeSet::new();
    let mut years = BTreeSet::new();

    for record in records {
        if let Some(state) = record.state() {
            states.insert(state.to_string());
        }
        if let Some(year) = record.year() {
            years.insert(year);
        }
    }

    let mut year_options: Vec<YearFilter> = if years.len() > MAX_INDIVIDUAL_YEARS {
        years
            .iter()
            .map(|&y| YearFilter::decade_of(y))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        years.into_iter().map(YearFilter::Year).collect()
    };
    year_options.sort_by_key(|&y| Reverse(y));

    FilterOptions {
        states: states.into_iter().collect(),
        years: year_options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: Option<&str>, date: Option<&str>) -> CaseRecord {
        CaseRecord {
            state: state.map(str::to_string),
            date_occurred: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn states_sorted_ascending_and_distinct() {
        let records = vec![record(Some("TX"), None), record(Some("AL"), None), record(Some("TX"), None), record(None, None)];
        let options = derive_filter_options(&records);
        assert_eq!(options.states, vec!["AL", "TX"]);
    }

    #[test]
    fn few_years_listed_individually_descending() {
        let records = vec![
            record(None, Some("1985-01-01")),
            record(None, Some("2001-05-05")),
            record(None, Some("1985-07-07")),
            record(None, Some("not a date")),
            record(None, None),
        ];
        let options = derive_filter_options(&records);
        assert_eq!(options.years, vec![YearFilter::Year(2001), YearFilter::Year(1985)]);
        assert!(!options.uses_decades());
    }

    #[test]
    fn many_years_collapse_into_decades() {
        let records: Vec<CaseRecord> = (1970..=1995).map(|y| record(None, Some(&format!("{y}-01-01")))).collect();
        let options = derive_filter_options(&records);
        assert_eq!(
            options.years,
            vec![
                YearFilter::Decade(1990),
                YearFilter::Decade(1980),
                YearFilter::Decade(1970)
            ]
        );
        assert_eq!(options.years[0].to_string(), "1990s");
    }

    #[test]
    fn exactly_twenty_years_stay_individual() {
        let records: Vec<CaseRecord> = (1980..2000).map(|y| record(None, Some(&format!("{y}-01-01")))).collect();
        let options = derive_filter_options(&records);
        assert_eq!(options.years.len(), 20);
        assert_eq!(options.years[0], YearFilter::Year(1999));
    }
}
