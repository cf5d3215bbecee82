// content-pipeline-rs/src/model.rs
// Request and artifact types for the refinement pipeline.

use serde::{Deserialize, Serialize};

/// Kind of content artifact the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Email,
    LinkedInPost,
    Article,
    InstagramPost,
}

impl ContentKind {
    /// Label used inside critic/reviser prompts.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Email => "email",
            ContentKind::LinkedInPost => "LinkedIn post",
            ContentKind::Article => "article",
            ContentKind::InstagramPost => "Instagram post",
        }
    }
}

/// Target length for the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthHint {
    Short,
    Medium,
    Long,
}

impl LengthHint {
    /// Word-count range communicated to the writer.
    pub fn word_range(&self) -> &'static str {
        match self {
            LengthHint::Short => "100-150",
            LengthHint::Medium => "200-300",
            LengthHint::Long => "400-500",
        }
    }
}

/// One content request fed to the pipeline.
///
/// Templating context (company name, offer) only applies to outreach
/// emails; the other kinds use topic/tone/audience.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    pub kind: ContentKind,
    pub topic: String,
    pub tone: String,
    pub audience: String,
    pub length: LengthHint,
    /// Company targeted by an outreach email, if any.
    pub company: Option<String>,
    /// Offer described in an outreach email, if any.
    pub offer: Option<String>,
}

impl ContentRequest {
    pub fn new(kind: ContentKind, topic: impl Into<String>) -> Self {
        Self {
            kind,
            topic: topic.into(),
            tone: "professional".to_string(),
            audience: "decision makers".to_string(),
            length: LengthHint::Medium,
            company: None,
            offer: None,
        }
    }
}

/// The three immutable artifacts of one pipeline run.
///
/// All three are returned together so callers keep the full audit trail,
/// never just the final version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinedContent {
    pub draft: String,
    pub critique: String,
    pub final_text: String,
    /// Overall 0-10 quality score extracted from the critique, when one
    /// could be parsed. Absence is a soft condition, not an error.
    pub critique_score: Option<f32>,
}
