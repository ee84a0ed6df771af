//! Episode payload and the defaults applied when fields are missing.
//!
//! [`EpisodePayload`] mirrors the wire shape with everything optional.
//! [`Episode`] is the normalized form the player runs on: it always has an
//! audio path and a non-empty cue list sorted by time.

use serde::{Deserialize, Serialize};

use crate::case::{nullable, Evidence};
use crate::cue::{demo_cues, sort_cues, Speaker, VisualCue};
use crate::error::CoreError;
use crate::scene::CaseImage;

/// Audio path used when the payload names none.
pub const DEFAULT_AUDIO_PATH: &str = "cold_case_episode.mp3";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeCase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub location: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub evidence: Vec<Evidence>,
    #[serde(deserialize_with = "nullable")]
    pub images: Vec<CaseImage>,
    #[serde(deserialize_with = "nullable")]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioInfo {
    pub filename: Option<String>,
    /// Total length in seconds, as measured when the episode was produced.
    pub duration: Option<f64>,
    pub generated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptLine {
    pub speaker: Speaker,
    #[serde(deserialize_with = "nullable")]
    pub text: String,
    pub emotion: Option<String>,
}

/// Episode document exactly as served; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EpisodePayload {
    pub audio_url: Option<String>,
    pub case: Option<EpisodeCase>,
    pub visual_cues: Option<Vec<VisualCue>>,
    pub audio: Option<AudioInfo>,
    #[serde(deserialize_with = "nullable")]
    pub transcript: Vec<TranscriptLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub audio_url: String,
    pub case: EpisodeCase,
    pub visual_cues: Vec<VisualCue>,
    pub audio: Option<AudioInfo>,
    pub transcript: Vec<TranscriptLine>,
    /// Set when the payload had no cues and the demo list was substituted.
    pub demo_cues: bool,
}

impl Episode {
    pub fn from_payload(payload: EpisodePayload) -> Self {
        let audio_url = non_blank(payload.audio_url)
            .or_else(|| payload.audio.as_ref().and_then(|a| non_blank(a.filename.clone())))
            .unwrap_or_else(|| DEFAULT_AUDIO_PATH.to_string());

        let (mut visual_cues, demo) = match payload.visual_cues {
            Some(cues) if !cues.is_empty() => (cues, false),
            _ => (demo_cues(), true),
        };
        sort_cues(&mut visual_cues);

        Self {
            audio_url,
            case: payload.case.unwrap_or_default(),
            visual_cues,
            audio: payload.audio,
            transcript: payload.transcript,
            demo_cues: demo,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let payload: EpisodePayload = serde_json::from_str(raw)?;
        Ok(Self::from_payload(payload))
    }

    /// Built-in episode shown when no source could be read.
    pub fn demo() -> Self {
        let case = EpisodeCase {
            id: Some("demo-riverside-1987".to_string()),
            title: "The Riverside Turnout".to_string(),
            location: Some("Riverside County, CA".to_string()),
            date: Some("1987-03-14".to_string()),
            summary: Some(
                "A young woman left a highway diner shortly before midnight and was never seen \
                 alive again. Tire impressions at a nearby river turnout were cast but never matched."
                    .to_string(),
            ),
            evidence: vec![
                Evidence {
                    evidence_type: "physical".to_string(),
                    description: "Tire impressions cast at the turnout".to_string(),
                    source: None,
                },
                Evidence {
                    evidence_type: "documentary".to_string(),
                    description: "Diner receipt timestamped 11:42 PM".to_string(),
                    source: None,
                },
            ],
            images: Vec::new(),
            sources: Vec::new(),
        };

        Self::from_payload(EpisodePayload {
            case: Some(case),
            ..Default::default()
        })
    }

    /// Best known length in seconds: the recorded audio duration, else the
    /// end of the last cue.
    pub fn duration_hint(&self) -> Option<f64> {
        self.audio
            .as_ref()
            .and_then(|a| a.duration)
            .or_else(|| {
                self.visual_cues
                    .last()
                    .map(|cue| cue.time + cue.duration.unwrap_or(0.0))
            })
            .filter(|d| d.is_finite() && *d > 0.0)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn full_payload_is_kept() {
        let episode = Episode::from_json(
            r#"{
                "audioUrl": "media/ep1.mp3",
                "case": {"id": "c1", "title": "Case One", "location": "Duluth, MN", "date": null,
                         "summary": "s", "evidence": [{"id": "e1", "type": "physical", "description": "Glove"}],
                         "images": [{"path": "a.jpg", "type": "victim", "attribution": "Courtesy PD"}],
                         "sources": ["https://example.org"]},
                "audio": {"filename": "other.mp3", "duration": 61.5},
                "visualCues": [{"time": 0, "speaker": "maya", "text": "hi"},
                               {"time": 4.2, "speaker": "thorne", "text": "hello"}],
                "transcript": [{"speaker": "thorne", "text": "hello", "emotion": "calm"}]
            }"#,
        )
        .expect("valid payload");

        assert_eq!(episode.audio_url, "media/ep1.mp3");
        assert_eq!(episode.case.title, "Case One");
        assert_eq!(episode.case.evidence[0].evidence_type, "physical");
        assert_eq!(episode.case.images[0].attribution(), Some("Courtesy PD"));
        assert_eq!(episode.visual_cues.len(), 2);
        assert!(!episode.demo_cues);
        assert_eq!(episode.transcript[0].speaker, Speaker::Thorne);
        assert_eq!(episode.duration_hint(), Some(61.5));
    }

    #[test]
    fn missing_audio_url_uses_audio_filename_then_default() {
        let with_file = Episode::from_json(r#"{"audio": {"filename": "ep.mp3"}}"#).expect("valid");
        assert_eq!(with_file.audio_url, "ep.mp3");

        let bare = Episode::from_json("{}").expect("valid");
        assert_eq!(bare.audio_url, DEFAULT_AUDIO_PATH);
    }

    #[test]
    fn empty_cues_fall_back_to_demo_list() {
        let episode = Episode::from_json(r#"{"visualCues": []}"#).expect("valid");
        assert!(episode.demo_cues);
        let times: Vec<f64> = episode.visual_cues.iter().map(|c| c.time).collect();
        assert_eq!(times, vec![0.0, 5.0, 12.0, 18.0, 25.0, 32.0, 40.0, 48.0]);

        let null_cues = Episode::from_json(r#"{"visualCues": null}"#).expect("valid");
        assert!(null_cues.demo_cues);
    }

    #[test]
    fn unsorted_cues_are_sorted_at_load() {
        let episode = Episode::from_json(
            r#"{"visualCues": [{"time": 9, "text": "b"}, {"time": 1, "text": "a"}]}"#,
        )
        .expect("valid");
        let texts: Vec<&str> = episode.visual_cues.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert_matches!(Episode::from_json("{not json"), Err(CoreError::Json(_)));
    }

    #[test]
    fn demo_episode_is_complete() {
        let demo = Episode::demo();
        assert_eq!(demo.audio_url, DEFAULT_AUDIO_PATH);
        assert_eq!(demo.visual_cues.len(), 8);
        assert!(!demo.case.title.is_empty());
        assert_eq!(demo.duration_hint(), Some(48.0));
    }
}
