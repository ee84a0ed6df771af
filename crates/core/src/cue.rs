//! Timed visual cues and active-cue resolution.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Display copy longer than this many characters is cut with `"..."`.
pub const DIALOGUE_DISPLAY_LIMIT: usize = 150;

/// The two hosts whose cards toggle as the active speaker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    #[default]
    Maya,
    Thorne,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Maya => "maya",
            Speaker::Thorne => "thorne",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Speaker::Maya => "Maya Vance",
            Speaker::Thorne => "Dr. Thorne",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Speaker::Maya => Speaker::Thorne,
            Speaker::Thorne => Speaker::Maya,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timestamped instruction. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualCue {
    /// Seconds from the start of the audio.
    pub time: f64,
    pub speaker: Speaker,
    pub text: String,
    pub show_location: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub show_evidence: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

impl VisualCue {
    /// Evidence text to pop up, when this cue asks for one.
    pub fn evidence_popup(&self) -> Option<&str> {
        if !self.show_evidence {
            return None;
        }
        self.evidence_text.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn display_text(&self) -> Cow<'_, str> {
        truncate_dialogue(&self.text)
    }
}

/// Index of the last cue with `time <= t`, or `0` when `t` precedes every
/// cue or the list is empty. Expects `cues` sorted by time.
pub fn find_active_cue(cues: &[VisualCue], t: f64) -> usize {
    cues.partition_point(|cue| cue.time <= t).saturating_sub(1)
}

/// Stable sort by time; cues sharing a timestamp keep their order.
pub fn sort_cues(cues: &mut [VisualCue]) {
    cues.sort_by(|a, b| a.time.total_cmp(&b.time));
}

pub fn truncate_dialogue(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(DIALOGUE_DISPLAY_LIMIT) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Built-in cue list used when an episode carries none.
pub fn demo_cues() -> Vec<VisualCue> {
    let line = |time: f64, speaker: Speaker, text: &str| VisualCue {
        time,
        speaker,
        text: text.to_string(),
        ..Default::default()
    };

    vec![
        VisualCue {
            show_location: true,
            location: Some("Riverside County, CA".to_string()),
            date: Some("March 14, 1987".to_string()),
            ..line(0.0, Speaker::Maya, "Tonight we go back to a quiet stretch of river road where a case went cold almost forty years ago.")
        },
        line(5.0, Speaker::Thorne, "The first responders described the scene as undisturbed. That detail matters more than it sounds."),
        VisualCue {
            show_evidence: true,
            evidence_text: Some("Tire impressions cast at the turnout, never matched".to_string()),
            ..line(12.0, Speaker::Maya, "Investigators found tire impressions at the turnout, but the evidence was never matched to a vehicle.")
        },
        line(18.0, Speaker::Thorne, "Forensic work in 1987 had real limits. A partial profile then could be a full profile today."),
        line(25.0, Speaker::Maya, "The victim was last seen leaving a diner on the highway. Nobody remembers who she left with."),
        VisualCue {
            show_evidence: true,
            evidence_text: Some("Diner receipt timestamped 11:42 PM".to_string()),
            ..line(32.0, Speaker::Thorne, "A receipt found in her coat places her at the counter at eleven forty-two.")
        },
        line(40.0, Speaker::Maya, "The area has changed since then, but people who lived there still talk about that night."),
        line(48.0, Speaker::Thorne, "If you recognize anything from this case, the tip line is still open."),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
