// content-pipeline-rs/src/pipeline.rs
// The fixed Draft -> Critique -> Revise chain.

use std::sync::Arc;

use llm_client::{GenerationError, TextGenerator};

use crate::critique::parse_critique_score;
use crate::model::{ContentRequest, RefinedContent};
use crate::prompts;
use crate::{PipelineError, PipelineStage};

/// Sequential three-stage content refinement pipeline.
///
/// Each stage issues exactly one call to the text-generation capability;
/// there are no retries at this layer and no branching. A failing stage
/// aborts the run, and artifacts produced so far are carried in the
/// error for operator inspection but are never persisted.
pub struct ContentPipeline {
    generator: Arc<dyn TextGenerator + Send + Sync>,
}

impl ContentPipeline {
    pub fn new(generator: Arc<dyn TextGenerator + Send + Sync>) -> Self {
        Self { generator }
    }

    /// Run the full Write -> Critique -> Revise chain for one request.
    ///
    /// Returns all three artifacts together; callers that only want the
    /// final version still receive the audit trail.
    pub async fn refine(&self, request: &ContentRequest) -> Result<RefinedContent, PipelineError> {
        tracing::info!(
            kind = request.kind.label(),
            topic = %request.topic,
            "starting content refinement run"
        );

        // Stage 1: writer. The request is built from the content request only.
        let writer_request = prompts::writer_prompt(request);
        let draft = self
            .invoke_stage(
                PipelineStage::Writer,
                &writer_request,
                prompts::WRITER_SYSTEM_PROMPT,
                None,
                None,
            )
            .await?;

        // Stage 2: critic. Embeds the draft verbatim.
        let critic_request = prompts::critic_prompt(&draft, request.kind);
        let critique = self
            .invoke_stage(
                PipelineStage::Critic,
                &critic_request,
                prompts::CRITIC_SYSTEM_PROMPT,
                Some(&draft),
                None,
            )
            .await?;

        // Score extraction is best-effort; a missing score never blocks
        // the reviser stage.
        let critique_score = parse_critique_score(&critique);
        if critique_score.is_none() {
            tracing::debug!("no parseable quality score in critique");
        }

        // Stage 3: reviser. Embeds draft and critique verbatim.
        let reviser_request = prompts::reviser_prompt(&draft, &critique, request.kind);
        let final_text = self
            .invoke_stage(
                PipelineStage::Reviser,
                &reviser_request,
                prompts::REVISER_SYSTEM_PROMPT,
                Some(&draft),
                Some(&critique),
            )
            .await?;

        tracing::info!(
            kind = request.kind.label(),
            score = ?critique_score,
            "content refinement run complete"
        );

        Ok(RefinedContent {
            draft,
            critique,
            final_text,
            critique_score,
        })
    }

    async fn invoke_stage(
        &self,
        stage: PipelineStage,
        prompt: &str,
        system_prompt: &str,
        draft: Option<&str>,
        critique: Option<&str>,
    ) -> Result<String, PipelineError> {
        tracing::debug!(stage = %stage, "invoking pipeline stage");

        let text = self
            .generator
            .generate(prompt, Some(system_prompt))
            .await
            .map_err(|source| stage_error(stage, draft, critique, source))?;

        if text.trim().is_empty() {
            return Err(PipelineError::EmptyStageOutput { stage });
        }

        Ok(text)
    }
}

fn stage_error(
    stage: PipelineStage,
    draft: Option<&str>,
    critique: Option<&str>,
    source: GenerationError,
) -> PipelineError {
    tracing::error!(stage = %stage, error = %source, "pipeline stage failed, aborting run");

    PipelineError::Stage {
        stage,
        draft: draft.map(str::to_string),
        critique: critique.map(str::to_string),
        source,
    }
}
