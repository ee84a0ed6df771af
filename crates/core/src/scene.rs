//! Scene image selection and mood treatment.
//!
//! Selection order for each newly active cue:
//!
//! 1. the cue's explicit `imageIndex`, when it points inside the list;
//! 2. a keyword class found in the cue text, which picks the first image of
//!    the matching type or a fixed fallback position;
//! 3. round-robin over the list.
//!
//! Only step 3 has state: the rotation counter lives in [`ImageSelector`]
//! and persists across cues.

use serde::{Deserialize, Serialize};

use crate::cue::VisualCue;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub path: String,
    /// `victim`, `evidence`, `location`, or anything else.
    #[serde(rename = "type")]
    pub image_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl CaseImage {
    /// Attribution with surrounding whitespace removed, if any is left.
    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }

    /// Text for the credit overlay: the attribution, preceded by the
    /// caption when there is one. `None` when the image has no attribution.
    pub fn credit_line(&self) -> Option<String> {
        let attribution = self.attribution()?;
        match self.caption.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(caption) => Some(format!("{caption} ({attribution})")),
            None => Some(attribution.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Keyword classes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    Victim,
    Evidence,
    Location,
}

impl KeywordClass {
    const ORDERED: [KeywordClass; 3] = [KeywordClass::Victim, KeywordClass::Evidence, KeywordClass::Location];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            KeywordClass::Victim => &["body", "victim", "missing"],
            KeywordClass::Evidence => &["evidence", "forensic", "found"],
            KeywordClass::Location => &["location", "scene", "area"],
        }
    }

    /// Image type this class looks for.
    pub fn image_type(&self) -> &'static str {
        match self {
            KeywordClass::Victim => "victim",
            KeywordClass::Evidence => "evidence",
            KeywordClass::Location => "location",
        }
    }

    /// Position used when no image of the class's type exists.
    pub fn fallback_index(&self) -> usize {
        match self {
            KeywordClass::Victim => 0,
            KeywordClass::Evidence => 1,
            KeywordClass::Location => 2,
        }
    }

    /// First class whose keywords occur in `text`, checked in the order
    /// victim, evidence, location.
    pub fn classify(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        Self::ORDERED
            .into_iter()
            .find(|class| class.keywords().iter().any(|kw| lowered.contains(kw)))
    }
}

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Visual treatment applied to the scene, independent of image changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Neutral,
    Somber,
    Clinical,
    Atmospheric,
}

impl Mood {
    pub fn for_text(text: &str) -> Self {
        match KeywordClass::classify(text) {
            Some(KeywordClass::Victim) => Mood::Somber,
            Some(KeywordClass::Evidence) => Mood::Clinical,
            Some(KeywordClass::Location) => Mood::Atmospheric,
            None => Mood::Neutral,
        }
    }

    /// CSS filter string for the scene layer.
    pub fn filter(&self) -> &'static str {
        match self {
            Mood::Neutral => "brightness(0.9)",
            Mood::Somber => "grayscale(0.6) brightness(0.7)",
            Mood::Clinical => "saturate(0.4) contrast(1.2)",
            Mood::Atmospheric => "sepia(0.3) brightness(0.8)",
        }
    }
}

// ---------------------------------------------------------------------------
// ImageSelector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSelector {
    rotation: usize,
}

impl ImageSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Pick the image for `cue`. `None` means leave the current image.
    pub fn select(&mut self, cue: &VisualCue, images: &[CaseImage]) -> Option<usize> {
        if images.is_empty() {
            return None;
        }

        if let Some(index) = cue.image_index.filter(|&i| i < images.len()) {
            return Some(index);
        }

        if let Some(class) = KeywordClass::classify(&cue.text) {
            let by_type = images
                .iter()
                .position(|image| image.image_type.eq_ignore_ascii_case(class.image_type()));
            return by_type.or_else(|| Some(class.fallback_index()).filter(|&i| i < images.len()));
        }

        let index = self.rotation % images.len();
        self.rotation = self.rotation.wrapping_add(1);
        Some(index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
