// content-pipeline-rs/src/tests.rs
// Wiring tests with a deterministic stub generator. These verify the
// call sequence and failure propagation, not generation quality.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use llm_client::{GenerationError, TextGenerator};

use crate::critique::parse_critique_score;
use crate::model::{ContentKind, ContentRequest, LengthHint};
use crate::prompts;
use crate::{ContentPipeline, PipelineError, PipelineStage};

/// Stub generator that replays scripted responses and records every
/// prompt it receives.
struct StubGenerator {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl StubGenerator {
    fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), system_prompt.map(str::to_string)));

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::UnknownError("script exhausted".to_string())))
    }
}

fn make_request() -> ContentRequest {
    ContentRequest {
        kind: ContentKind::LinkedInPost,
        topic: "adaptive audio for museums".to_string(),
        tone: "professional".to_string(),
        audience: "curators".to_string(),
        length: LengthHint::Medium,
        company: None,
        offer: None,
    }
}

fn happy_path_script() -> Vec<Result<String, GenerationError>> {
    vec![
        Ok("the draft".to_string()),
        Ok("the critique\nQuality: 7/10".to_string()),
        Ok("the final".to_string()),
    ]
}

#[tokio::test]
async fn refine_returns_all_three_artifacts() {
    let stub = Arc::new(StubGenerator::new(happy_path_script()));
    let pipeline = ContentPipeline::new(stub.clone());

    let result = pipeline
        .refine(&make_request())
        .await
        .expect("refine should succeed");

    assert_eq!(result.draft, "the draft");
    assert_eq!(result.critique, "the critique\nQuality: 7/10");
    assert_eq!(result.final_text, "the final");
    assert_eq!(result.critique_score, Some(7.0));
}

#[tokio::test]
async fn refine_wires_stage_outputs_into_later_prompts() {
    let request = make_request();
    let stub = Arc::new(StubGenerator::new(happy_path_script()));
    let pipeline = ContentPipeline::new(stub.clone());

    pipeline.refine(&request).await.expect("refine should succeed");

    let calls = stub.calls();
    assert_eq!(calls.len(), 3, "exactly one call per stage");

    // Writer request is built from the content request alone.
    assert_eq!(calls[0].0, prompts::writer_prompt(&request));
    assert_eq!(calls[0].1.as_deref(), Some(prompts::WRITER_SYSTEM_PROMPT));

    // Critic request embeds the exact draft text.
    assert_eq!(calls[1].0, prompts::critic_prompt("the draft", request.kind));
    assert!(calls[1].0.contains("the draft"));

    // Reviser request embeds the exact draft and critique text.
    let expected_reviser =
        prompts::reviser_prompt("the draft", "the critique\nQuality: 7/10", request.kind);
    assert_eq!(calls[2].0, expected_reviser);
}

#[tokio::test]
async fn refine_is_deterministic_across_runs() {
    let request = make_request();

    let first = Arc::new(StubGenerator::new(happy_path_script()));
    ContentPipeline::new(first.clone())
        .refine(&request)
        .await
        .expect("first run");

    let second = Arc::new(StubGenerator::new(happy_path_script()));
    ContentPipeline::new(second.clone())
        .refine(&request)
        .await
        .expect("second run");

    assert_eq!(
        first.calls(),
        second.calls(),
        "identical input must produce the identical call sequence"
    );
}

#[tokio::test]
async fn critic_failure_aborts_with_draft_observable() {
    let stub = Arc::new(StubGenerator::new(vec![
        Ok("the draft".to_string()),
        Err(GenerationError::ServerError("503".to_string())),
    ]));
    let pipeline = ContentPipeline::new(stub.clone());

    let err = pipeline
        .refine(&make_request())
        .await
        .expect_err("critic failure must abort the run");

    match err {
        PipelineError::Stage {
            stage,
            draft,
            critique,
            ..
        } => {
            assert_eq!(stage, PipelineStage::Critic);
            assert_eq!(draft.as_deref(), Some("the draft"));
            assert!(critique.is_none());
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    // No reviser call was made after the failure.
    assert_eq!(stub.calls().len(), 2);
}

#[tokio::test]
async fn writer_failure_carries_no_artifacts() {
    let stub = Arc::new(StubGenerator::new(vec![Err(
        GenerationError::NetworkError("connection refused".to_string()),
    )]));
    let pipeline = ContentPipeline::new(stub.clone());

    let err = pipeline
        .refine(&make_request())
        .await
        .expect_err("writer failure must abort the run");

    assert_eq!(err.stage(), PipelineStage::Writer);
    if let PipelineError::Stage { draft, critique, .. } = err {
        assert!(draft.is_none());
        assert!(critique.is_none());
    }
    assert_eq!(stub.calls().len(), 1);
}

#[tokio::test]
async fn empty_stage_output_is_an_error() {
    let stub = Arc::new(StubGenerator::new(vec![
        Ok("the draft".to_string()),
        Ok("   \n".to_string()),
    ]));
    let pipeline = ContentPipeline::new(stub);

    let err = pipeline
        .refine(&make_request())
        .await
        .expect_err("blank critique must abort the run");

    assert!(matches!(
        err,
        PipelineError::EmptyStageOutput {
            stage: PipelineStage::Critic
        }
    ));
}

#[tokio::test]
async fn missing_score_does_not_block_final_stage() {
    let stub = Arc::new(StubGenerator::new(vec![
        Ok("the draft".to_string()),
        Ok("critique with no score line".to_string()),
        Ok("the final".to_string()),
    ]));
    let pipeline = ContentPipeline::new(stub.clone());

    let result = pipeline
        .refine(&make_request())
        .await
        .expect("missing score is a soft condition");

    assert_eq!(result.critique_score, None);
    assert_eq!(result.final_text, "the final");
    assert_eq!(stub.calls().len(), 3);
}

#[test]
fn score_parsing_variants() {
    assert_eq!(parse_critique_score("Quality: 7/10"), Some(7.0));
    assert_eq!(parse_critique_score("Quality: 7.5 / 10"), Some(7.5));
    assert_eq!(parse_critique_score("score\n8/10\nrationale"), Some(8.0));
    assert_eq!(parse_critique_score("Quality: X/10"), None);
    assert_eq!(parse_critique_score("no score at all"), None);
    // Sentence punctuation right after the denominator is fine.
    assert_eq!(parse_critique_score("I rate this 7/10."), Some(7.0));
    // Denominators other than 10 are not scores.
    assert_eq!(parse_critique_score("improved 40/100 metrics"), None);
    assert_eq!(parse_critique_score("on a 3/10.5 scale"), None);
    // Out-of-range values clamp into [0, 10].
    assert_eq!(parse_critique_score("Quality: 11/10"), Some(10.0));
}

#[test]
fn writer_prompt_covers_every_content_kind() {
    for kind in [
        ContentKind::Email,
        ContentKind::LinkedInPost,
        ContentKind::Article,
        ContentKind::InstagramPost,
    ] {
        let mut request = make_request();
        request.kind = kind;
        let prompt = prompts::writer_prompt(&request);
        assert!(!prompt.is_empty());
    }

    // Email prompts use company/offer context when present.
    let mut email = make_request();
    email.kind = ContentKind::Email;
    email.company = Some("Museo Egizio".to_string());
    email.offer = Some("adaptive soundscapes".to_string());
    let prompt = prompts::writer_prompt(&email);
    assert!(prompt.contains("Museo Egizio"));
    assert!(prompt.contains("adaptive soundscapes"));
}
