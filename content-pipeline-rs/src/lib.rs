// content-pipeline-rs/src/lib.rs
// Library interface for the content refinement pipeline.
//
// The pipeline is a fixed, non-branching chain of three text-generation
// calls (Writer -> Critic -> Reviser). Each run produces three immutable
// artifacts that are always returned together; a stage failure aborts
// the run and surfaces which stage failed plus whatever partial
// artifacts existed at that point.
//
// The pipeline has no shared mutable state and is safe to run fully in
// parallel across independent content requests.

use std::fmt;

use llm_client::GenerationError;

pub mod critique;
pub mod model;
pub mod prompts;

mod pipeline;

#[cfg(test)]
mod tests;

pub use crate::critique::parse_critique_score;
pub use crate::model::{ContentKind, ContentRequest, LengthHint, RefinedContent};
pub use crate::pipeline::ContentPipeline;

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The three stages of one refinement run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Writer,
    Critic,
    Reviser,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Writer => write!(f, "writer"),
            PipelineStage::Critic => write!(f, "critic"),
            PipelineStage::Reviser => write!(f, "reviser"),
        }
    }
}

/// Top-level error type for this crate.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A generation call failed mid-pipeline. The run is aborted; the
    /// artifacts already produced are carried here for operator
    /// inspection but are not persisted anywhere.
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: PipelineStage,
        /// Draft produced before the failure, if the writer had finished.
        draft: Option<String>,
        /// Critique produced before the failure, if the critic had finished.
        critique: Option<String>,
        #[source]
        source: GenerationError,
    },

    /// A stage returned empty text, which no later stage can work with.
    #[error("{stage} stage returned empty output")]
    EmptyStageOutput { stage: PipelineStage },
}

impl PipelineError {
    /// The stage at which the run aborted.
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::Stage { stage, .. } => *stage,
            PipelineError::EmptyStageOutput { stage } => *stage,
        }
    }
}
