//! Whole-pipeline properties of the catalog over generated data.

use coldcase_core::case::{CaseRecord, MediaItem};
use coldcase_core::catalog::Catalog;
use coldcase_core::facets::derive_filter_options;
use coldcase_core::filter::{apply_filters, FilterState, YearFilter};
use coldcase_core::pagination::PAGE_SIZE;
use coldcase_core::quality::{quality_score, rank_by_quality};
use coldcase_core::stats::CaseStats;
use coldcase_core::synthetic::{CaseGenerator, SyntheticCases};

fn records(count: usize) -> Vec<CaseRecord> {
    SyntheticCases::new(2024).generate(count)
}

/// Every filter combination renders exactly the filtered records, page by
/// page, with full pages except possibly the last.
#[test]
fn rendered_count_equals_filtered_length() {
    let all = records(240);
    let options = derive_filter_options(&all);
    let states: Vec<Option<String>> = std::iter::once(None)
        .chain(options.states.iter().take(3).cloned().map(Some))
        .collect();
    let years: Vec<&str> = vec!["", "1980s", "1990s", "2001"];

    for state in &states {
        for year in &years {
            let mut catalog = Catalog::new(all.clone());
            catalog.set_state(state.clone());
            catalog.set_year(year).expect("valid year value");

            let mut rendered = 0;
            loop {
                let page = catalog.current_page();
                let remaining = catalog.filtered_count() - page.window.range.start;
                assert_eq!(page.cases.len(), remaining.min(PAGE_SIZE));
                rendered += page.cases.len();
                if !catalog.next_page() {
                    break;
                }
            }
            assert_eq!(rendered, catalog.filtered_count(), "state={state:?} year={year}");
        }
    }
}

#[test]
fn many_distinct_years_collapse_into_decades() {
    let options = derive_filter_options(&records(300));
    assert!(options.years.len() <= 4);
    assert!(options.uses_decades());
    assert!(options.years.windows(2).all(|w| w[0] > w[1]));
    assert!(options.states.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn adding_media_never_moves_a_record_down() {
    let all = records(50);
    let target_id = all[30].id.clone();
    let rank_of = |records: &[CaseRecord]| {
        let mut refs: Vec<&CaseRecord> = records.iter().collect();
        rank_by_quality(&mut refs);
        refs.iter().position(|r| r.id == target_id).expect("present")
    };

    let before = rank_of(&all);
    let mut enriched = all.clone();
    let before_score = quality_score(&enriched[30]);
    enriched[30].media.push(MediaItem {
        url: "https://example.org/photo.jpg".into(),
        ..Default::default()
    });
    assert_eq!(quality_score(&enriched[30]), before_score + 30);
    assert!(rank_of(&enriched) <= before);
}

#[test]
fn local_stats_match_loaded_records() {
    let all = records(120);
    let catalog = Catalog::new(all.clone());
    let stats = catalog.stats();
    assert_eq!(stats, CaseStats::from_records(&all));
    assert_eq!(stats.total_cases, 120);
    assert_eq!(
        stats.missing_persons as usize,
        all.iter().filter(|r| r.case_type == "missing_person").count()
    );
}

#[test]
fn decade_filter_through_pure_pipeline() {
    let all = records(100);
    let filter = FilterState {
        year: Some(YearFilter::Decade(1980)),
        ..Default::default()
    };
    for record in apply_filters(&all, &filter) {
        let year = record.year().expect("dated");
        assert!((1980..1990).contains(&year));
    }
}
