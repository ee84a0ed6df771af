//! Presentation projections: the browse card and the expanded detail view.
//!
//! Both are plain data. Optional detail sections are `None` when their
//! backing data is empty, so a renderer hides them instead of drawing an
//! empty block.

use serde::Serialize;

use crate::case::{CaseRecord, Evidence, MediaItem, TimelineEntry};
use crate::quality::{quality_score, QualityLabel};

/// Maximum characters of summary shown on a browse card.
pub const CARD_EXCERPT_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseCard {
    pub id: String,
    pub title: String,
    pub location: String,
    pub date: String,
    pub case_type: String,
    pub status: String,
    pub quality: QualityLabel,
    pub evidence_count: usize,
    pub media_count: usize,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
}

impl CaseCard {
    pub fn from_record(record: &CaseRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: if record.title.trim().is_empty() {
                "Untitled Case".to_string()
            } else {
                record.title.clone()
            },
            location: record.location_label(),
            date: record.date_label(),
            case_type: record.case_type_label(),
            status: record.status_label(),
            quality: QualityLabel::from_score(quality_score(record)),
            evidence_count: record.evidence.len(),
            media_count: record.media.len(),
            excerpt: record.summary().map(|s| excerpt(s, CARD_EXCERPT_CHARS)),
            thumbnail: record
                .media
                .first()
                .map(|m| m.thumbnail.clone().unwrap_or_else(|| m.url.clone())),
        }
    }
}

/// Expanded view of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseDetail {
    pub card: CaseCard,
    pub quality_score: u32,
    pub summary: Option<String>,
    /// Populated victim fields as `(label, value)` pairs.
    pub victim: Option<Vec<(String, String)>>,
    pub evidence: Option<Vec<Evidence>>,
    pub timeline: Option<Vec<TimelineEntry>>,
    pub media: Option<Vec<MediaItem>>,
    pub analysis: Option<Vec<(String, String)>>,
    pub source_dataset: Option<String>,
    pub source_url: Option<String>,
}

impl CaseDetail {
    pub fn from_record(record: &CaseRecord) -> Self {
        Self {
            card: CaseCard::from_record(record),
            quality_score: quality_score(record),
            summary: record.summary().map(str::to_string),
            victim: victim_rows(record),
            evidence: non_empty(&record.evidence),
            timeline: non_empty(&record.timeline),
            media: non_empty(&record.media),
            analysis: analysis_rows(record),
            source_dataset: record.source_dataset.clone(),
            source_url: record.source_url.clone(),
        }
    }
}

fn non_empty<T: Clone>(items: &[T]) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items.to_vec())
    }
}

fn victim_rows(record: &CaseRecord) -> Option<Vec<(String, String)>> {
    let rows: Vec<(String, String)> = record
        .victim
        .as_ref()?
        .iter()
        .filter_map(|(field, value)| {
            let text = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            };
            (!text.is_empty()).then(|| (field_label(field), text))
        })
        .collect();
    (!rows.is_empty()).then_some(rows)
}

fn analysis_rows(record: &CaseRecord) -> Option<Vec<(String, String)>> {
    let rows: Vec<(String, String)> = [
        ("Forensic Assessment", &record.thorne_analysis),
        ("Psychological Profile", &record.maya_analysis),
    ]
    .into_iter()
    .filter_map(|(label, text)| {
        let text = text.as_deref()?.trim();
        (!text.is_empty()).then(|| (label.to_string(), text.to_string()))
    })
    .collect();
    (!rows.is_empty()).then_some(rows)
}

/// `hair_color` -> `Hair Color`.
fn field_label(field: &str) -> String {
    field
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First `max_chars` characters with a trailing ellipsis when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
