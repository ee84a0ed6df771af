//! The browsing session over one loaded case list.
//!
//! [`Catalog`] owns the records, the single [`FilterState`], and the
//! derived view (filtered then ranked positions). Every filter mutation
//! reruns the pipeline and resets the page to 1; page navigation only moves
//! the window.

use std::time::Instant;

use crate::card::{CaseCard, CaseDetail};
use crate::case::CaseRecord;
use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::error::CoreError;
use crate::facets::{derive_filter_options, FilterOptions};
use crate::filter::{filter_indices, FilterState, YearFilter};
use crate::pagination::{clamp_page, PageWindow};
use crate::quality::rank_indices_by_quality;
use crate::stats::CaseStats;

/// One rendered page of the catalog.
#[derive(Debug, Clone)]
pub struct CatalogPage<'a> {
    pub window: PageWindow,
    pub cases: Vec<&'a CaseRecord>,
}

impl CatalogPage<'_> {
    pub fn cards(&self) -> Vec<CaseCard> {
        self.cases.iter().map(|record| CaseCard::from_record(record)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<CaseRecord>,
    options: FilterOptions,
    filter: FilterState,
    /// Positions into `records`, filtered and ranked.
    visible: Vec<usize>,
    search: Debouncer<String>,
}

impl Catalog {
    pub fn new(records: Vec<CaseRecord>) -> Self {
        Self::with_filter(records, FilterState::default())
    }

    /// Start with a caller-supplied filter. The page is clamped, not reset.
    pub fn with_filter(records: Vec<CaseRecord>, filter: FilterState) -> Self {
        let options = derive_filter_options(&records);
        let mut catalog = Self {
            records,
            options,
            filter,
            visible: Vec::new(),
            search: Debouncer::new(SEARCH_DEBOUNCE),
        };
        catalog.recompute();
        catalog.filter.page = clamp_page(catalog.filter.page, catalog.visible.len());
        catalog
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Length of the filtered list, before pagination.
    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &CaseRecord> + '_ {
        self.visible.iter().map(|&i| &self.records[i])
    }

    // -- filter mutations ----------------------------------------------------

    /// Apply search text immediately, dropping any pending keystroke.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = Debouncer::new(SEARCH_DEBOUNCE);
        self.filter.search_text = text.into();
        self.refilter();
    }

    /// Record a keystroke. Nothing changes until [`Catalog::flush_search`]
    /// is called after the quiet window.
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search.push(text.into(), now);
    }

    /// When the pending keystroke becomes due.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Apply the pending search text if its window has elapsed. Returns
    /// whether the pipeline ran.
    pub fn flush_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(text) => {
                self.filter.search_text = text;
                self.refilter();
                true
            }
            None => false,
        }
    }

    pub fn set_state(&mut self, state: Option<String>) {
        self.filter.state = state.filter(|s| !s.is_empty());
        self.refilter();
    }

    pub fn set_case_type(&mut self, case_type: Option<String>) {
        self.filter.case_type = case_type.filter(|s| !s.is_empty());
        self.refilter();
    }

    /// Set the year selector from its textual form (`"1985"`, `"1980s"`).
    /// An empty value clears it. On a parse error the current filter stays.
    pub fn set_year(&mut self, raw: &str) -> Result<(), CoreError> {
        let year = match raw.trim() {
            "" => None,
            value => Some(value.parse::<YearFilter>()?),
        };
        self.filter.year = year;
        self.refilter();
        Ok(())
    }

    pub fn set_unsolved_only(&mut self, unsolved_only: bool) {
        self.filter.unsolved_only = unsolved_only;
        self.refilter();
    }

    /// Reset every predicate to its default.
    pub fn clear_filters(&mut self) {
        self.search = Debouncer::new(SEARCH_DEBOUNCE);
        self.filter = FilterState::default();
        self.refilter();
    }

    // -- pagination ----------------------------------------------------------

    /// Advance one page. No-op on the last page.
    pub fn next_page(&mut self) -> bool {
        let window = self.window();
        if !window.has_next() {
            return false;
        }
        self.filter.page = window.page + 1;
        true
    }

    /// Go back one page. No-op on the first page.
    pub fn prev_page(&mut self) -> bool {
        let window = self.window();
        if !window.has_prev() {
            return false;
        }
        self.filter.page = window.page - 1;
        true
    }

    /// Jump to `page`, clamped into range.
    pub fn go_to_page(&mut self, page: usize) {
        self.filter.page = clamp_page(page, self.visible.len());
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.filter.page, self.visible.len())
    }

    pub fn current_page(&self) -> CatalogPage<'_> {
        let window = self.window();
        let cases = window
            .slice(&self.visible)
            .iter()
            .map(|&i| &self.records[i])
            .collect();
        CatalogPage { window, cases }
    }

    // -- projections ---------------------------------------------------------

    /// Stats recomputed from every loaded record, ignoring the filter.
    pub fn stats(&self) -> CaseStats {
        CaseStats::from_records(&self.records)
    }

    pub fn find(&self, id: &str) -> Option<&CaseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn detail(&self, id: &str) -> Option<CaseDetail> {
        self.find(id).map(CaseDetail::from_record)
    }

    fn refilter(&mut self) {
        self.recompute();
        self.filter.page = 1;
    }

    fn recompute(&mut self) {
        let mut visible = filter_indices(&self.records, &self.filter);
        rank_indices_by_quality(&self.records, &mut visible);
        self.visible = visible;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
