//! Documentation-quality score used for the default sort order.
//!
//! The score is additive; each component is capped independently. Weights
//! and label thresholds are fixed values, not tunables.

use std::cmp::Reverse;
use std::fmt;

use serde::Serialize;

use crate::case::CaseRecord;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Flat bonus for having at least one media item.
pub const MEDIA_POINTS: u32 = 30;
/// Points per evidence item.
pub const EVIDENCE_POINTS_EACH: u32 = 5;
/// Cap on the evidence component (reached at five items).
pub const EVIDENCE_POINTS_CAP: u32 = 25;
/// Bonus when more than [`VICTIM_MIN_FIELDS`] victim fields are populated.
pub const VICTIM_POINTS: u32 = 15;
pub const VICTIM_MIN_FIELDS: usize = 2;
/// Bonus for a summary longer than [`SUMMARY_MIN_CHARS`] characters.
pub const SUMMARY_POINTS: u32 = 10;
pub const SUMMARY_MIN_CHARS: usize = 200;
/// Bonus for a known occurrence date.
pub const DATE_POINTS: u32 = 5;
/// Bonus for either AI analysis field.
pub const AI_ANALYSIS_POINTS: u32 = 15;

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

pub const DETAILED_THRESHOLD: u32 = 60;
pub const STANDARD_THRESHOLD: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityLabel {
    Detailed,
    Standard,
    Basic,
}

impl QualityLabel {
    pub fn from_score(score: u32) -> Self {
        if score >= DETAILED_THRESHOLD {
            QualityLabel::Detailed
        } else if score >= STANDARD_THRESHOLD {
            QualityLabel::Standard
        } else {
            QualityLabel::Basic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::Detailed => "DETAILED",
            QualityLabel::Standard => "STANDARD",
            QualityLabel::Basic => "BASIC",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Compute the quality score of a record. Never stored; always recomputed.
pub fn quality_score(record: &CaseRecord) -> u32 {
    let mut score = 0;

    if !record.media.is_empty() {
        score += MEDIA_POINTS;
    }

    let evidence = u32::try_from(record.evidence.len()).unwrap_or(u32::MAX);
    score += evidence.saturating_mul(EVIDENCE_POINTS_EACH).min(EVIDENCE_POINTS_CAP);

    if record.populated_victim_fields() > VICTIM_MIN_FIELDS {
        score += VICTIM_POINTS;
    }

    if record.summary.as_deref().is_some_and(|s| s.chars().count() > SUMMARY_MIN_CHARS) {
        score += SUMMARY_POINTS;
    }

    if record.date_occurred.as_deref().is_some_and(|d| !d.trim().is_empty()) {
        score += DATE_POINTS;
    }

    if record.has_ai_analysis() {
        score += AI_ANALYSIS_POINTS;
    }

    score
}

pub fn quality_label(record: &CaseRecord) -> QualityLabel {
    QualityLabel::from_score(quality_score(record))
}

/// Sort by score, best first. The sort is stable: equal scores keep their
/// incoming relative order.
pub fn rank_by_quality(records: &mut [&CaseRecord]) {
    records.sort_by_cached_key(|record| Reverse(quality_score(record)));
}

/// [`rank_by_quality`] over positions into `records`.
pub fn rank_indices_by_quality(records: &[CaseRecord], indices: &mut [usize]) {
    indices.sort_by_cached_key(|&i| Reverse(quality_score(&records[i])));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{Evidence, MediaItem};

    fn evidence(n: usize) -> Vec<Evidence> {
        (0..n)
            .map(|i| Evidence {
                evidence_type: "physical".into(),
                description: format!("item {i}"),
                source: None,
            })
            .collect()
    }

    fn media() -> Vec<MediaItem> {
        vec![MediaItem {
            url: "https://example.org/photo.jpg".into(),
            ..Default::default()
        }]
    }

    // -- quality_score -------------------------------------------------------

    #[test]
    fn empty_record_scores_zero() {
        assert_eq!(quality_score(&CaseRecord::default()), 0);
    }

    #[test]
    fn media_is_flat_thirty() {
        let one = CaseRecord { media: media(), ..Default::default() };
        let mut many = one.clone();
        many.media.extend(media());
        many.media.extend(media());
        assert_eq!(quality_score(&one), 30);
        assert_eq!(quality_score(&many), 30);
    }

    #[test]
    fn evidence_caps_at_twenty_five() {
        let score = |n| quality_score(&CaseRecord { evidence: evidence(n), ..Default::default() });
        assert_eq!(score(1), 5);
        assert_eq!(score(4), 20);
        assert_eq!(score(5), 25);
        assert_eq!(score(12), 25);
    }

    #[test]
    fn victim_needs_more_than_two_fields() {
        let two = serde_json::json!({"name": "A", "age": 30});
        let three = serde_json::json!({"name": "A", "age": 30, "gender": "F"});
        let with = |v: serde_json::Value| CaseRecord { victim: serde_json::from_value(v).ok(), ..Default::default() };
        assert_eq!(quality_score(&with(two)), 0);
        assert_eq!(quality_score(&with(three)), 15);
    }

    #[test]
    fn summary_must_exceed_two_hundred_chars() {
        let at = CaseRecord { summary: Some("x".repeat(200)), ..Default::default() };
        let over = CaseRecord { summary: Some("x".repeat(201)), ..Default::default() };
        assert_eq!(quality_score(&at), 0);
        assert_eq!(quality_score(&over), 10);
    }

    #[test]
    fn date_and_ai_analysis_points() {
        let record = CaseRecord {
            date_occurred: Some("1990-01-01".into()),
            thorne_analysis: Some("Forensic notes".into()),
            ..Default::default()
        };
        assert_eq!(quality_score(&record), 5 + 15);
    }

    #[test]
    fn fully_documented_record_hits_maximum() {
        let record = CaseRecord {
            media: media(),
            evidence: evidence(6),
            victim: serde_json::from_value(serde_json::json!({"a": 1, "b": 2, "c": 3})).ok(),
            summary: Some("y".repeat(250)),
            date_occurred: Some("1990-01-01".into()),
            maya_analysis: Some("Profile".into()),
            ..Default::default()
        };
        assert_eq!(quality_score(&record), 30 + 25 + 15 + 10 + 5 + 15);
    }

    #[test]
    fn adding_media_adds_exactly_thirty() {
        let base = CaseRecord { evidence: evidence(2), ..Default::default() };
        let mut with_media = base.clone();
        with_media.media = media();
        assert_eq!(quality_score(&with_media), quality_score(&base) + 30);
    }

    // -- QualityLabel --------------------------------------------------------

    #[test]
    fn label_thresholds() {
        assert_eq!(QualityLabel::from_score(60).as_str(), "DETAILED");
        assert_eq!(QualityLabel::from_score(59).as_str(), "STANDARD");
        assert_eq!(QualityLabel::from_score(30).as_str(), "STANDARD");
        assert_eq!(QualityLabel::from_score(29).as_str(), "BASIC");
        assert_eq!(QualityLabel::from_score(0).as_str(), "BASIC");
    }

    // -- rank_by_quality -----------------------------------------------------

    #[test]
    fn ranking_is_descending_and_stable() {
        let low_a = CaseRecord { id: "low-a".into(), ..Default::default() };
        let high = CaseRecord { id: "high".into(), media: media(), ..Default::default() };
        let low_b = CaseRecord { id: "low-b".into(), ..Default::default() };
        let mid = CaseRecord { id: "mid".into(), evidence: evidence(2), ..Default::default() };

        let mut ranked = vec![&low_a, &high, &low_b, &mid];
        rank_by_quality(&mut ranked);
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low-a", "low-b"]);
    }
}
