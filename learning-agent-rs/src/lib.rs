// learning-agent-rs/src/lib.rs
// Library interface for the autonomy confidence engine.
//
// The engine accumulates human approve/reject decisions per action
// category, keeps an append-only log as the source of truth, and
// promotes a category to unattended execution once both a minimum
// sample count and a confidence threshold are met.
//
// Design notes:
// - Per-category statistics are a derived projection over the log,
//   rebuilt on load and updated only after a durable append.
// - Confidence is the plain all-time approval ratio. There is no
//   smoothing, no time decay, and no demotion mechanism: a category
//   only loses autonomy when enough later rejections drag the ratio
//   back under the threshold.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::instrument;

pub mod model;
pub mod repository;

mod report;
mod stats;


pub use crate::model::{AutonomyDecision, CategoryStats, Decision, FeedbackRecord};
pub use crate::repository::{FeedbackRepository, FileBackedRepository, RepositoryError};

use crate::stats::StatsProjection;

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, LearningError>;

/// Top-level error type for this crate.
#[derive(Debug, thiserror::Error)]
pub enum LearningError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Thresholds controlling when a category becomes autonomous.
///
/// Both knobs are explicit configuration rather than constants: the
/// minimum sample count guards against a single early approval
/// producing 100% confidence and instant autonomy, and deployments have
/// used confidence thresholds anywhere from 0.85 to 0.92.
#[derive(Debug, Clone)]
pub struct LearningConfig {
    /// Minimum approvals+rejections before a category can go autonomous.
    /// Default: 3.
    pub min_samples: u64,
    /// Minimum confidence ratio required for autonomy. Default: 0.85.
    pub autonomy_threshold: f64,
    /// Location of the NDJSON feedback log used by the default
    /// file-backed repository.
    pub store_path: PathBuf,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            min_samples: 3,
            autonomy_threshold: 0.85,
            store_path: PathBuf::from("data/learning/feedback_log.ndjson"),
        }
    }
}

impl LearningConfig {
    /// Construct configuration from environment variables. Unset or
    /// unparseable values fall back to the defaults; never panics.
    ///
    /// - LEARNING_MIN_SAMPLES (default 3)
    /// - LEARNING_AUTONOMY_THRESHOLD (default 0.85)
    /// - LEARNING_STORE_PATH (default data/learning/feedback_log.ndjson)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            min_samples: get_env_var("LEARNING_MIN_SAMPLES", defaults.min_samples),
            autonomy_threshold: get_env_var(
                "LEARNING_AUTONOMY_THRESHOLD",
                defaults.autonomy_threshold,
            ),
            store_path: env::var("LEARNING_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
        }
    }
}

fn get_env_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Feedback-driven autonomy engine.
///
/// Typical usage (inside an async context):
///
/// ```ignore
/// let engine = LearningEngine::new_default(LearningConfig::from_env()).await?;
///
/// let confidence = engine
///     .record_feedback("pr-42", "update_dependency", Decision::Approved, None)
///     .await?;
///
/// let decision = engine.should_execute_autonomously("update_dependency").await;
/// ```
pub struct LearningEngine {
    config: LearningConfig,
    repo: Arc<dyn FeedbackRepository + Send + Sync>,
    // Guards append-then-recompute so two concurrent record_feedback
    // calls for the same category cannot race on the counts.
    projection: Mutex<StatsProjection>,
}

impl LearningEngine {
    /// Construct an engine over an existing repository, rebuilding the
    /// statistics projection from the full log.
    pub async fn load(
        repo: Arc<dyn FeedbackRepository + Send + Sync>,
        config: LearningConfig,
    ) -> Result<Self> {
        let records = repo.load_all().await?;
        let projection = StatsProjection::rebuild(&records);

        tracing::info!(
            records = records.len(),
            categories = projection.all().len(),
            "learning engine loaded from feedback log"
        );

        Ok(Self {
            config,
            repo,
            projection: Mutex::new(projection),
        })
    }

    /// Construct an engine with a file-backed repository at the
    /// configured store path.
    pub async fn new_default(config: LearningConfig) -> Result<Self> {
        let repo: Arc<dyn FeedbackRepository + Send + Sync> =
            Arc::new(FileBackedRepository::new(config.store_path.clone())?);
        Self::load(repo, config).await
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Record one human decision about a proposed action.
    ///
    /// Appends to the durable log first; the in-memory projection is
    /// only updated once the append succeeded, so a persistence failure
    /// never leaves a confidence value that is not backed by history.
    /// Returns the updated confidence for the category.
    #[instrument(skip(self, note), fields(category = %category.as_ref()))]
    pub async fn record_feedback(
        &self,
        action_id: impl AsRef<str> + std::fmt::Debug,
        category: impl AsRef<str> + std::fmt::Debug,
        decision: Decision,
        note: Option<String>,
    ) -> Result<f64> {
        let category = category.as_ref();
        let mut projection = self.projection.lock().await;

        let confidence_before = projection.confidence(category);
        let record = FeedbackRecord::new(
            action_id.as_ref(),
            category,
            decision,
            note,
            confidence_before,
        );

        self.repo.append(&record).await?;
        projection.apply(&record);

        let confidence_after = projection.confidence(category);
        tracing::info!(
            decision = ?decision,
            confidence_before,
            confidence_after,
            "feedback recorded"
        );

        Ok(confidence_after)
    }

    /// Record that an action of this category was executed without
    /// approval. Bumps the autonomous-execution count; the confidence
    /// ratio only counts human approvals and rejections, so it is
    /// unaffected.
    pub async fn record_autonomous_execution(
        &self,
        action_id: impl AsRef<str> + std::fmt::Debug,
        category: impl AsRef<str> + std::fmt::Debug,
    ) -> Result<()> {
        self.record_feedback(action_id, category, Decision::ExecutedAutonomously, None)
            .await?;
        Ok(())
    }

    /// Decide whether a new action of this category may run unattended.
    ///
    /// Pure query, no side effects. True only when the category has at
    /// least `min_samples` human decisions AND its confidence meets the
    /// autonomy threshold; below the sample floor the answer is false
    /// regardless of confidence.
    pub async fn should_execute_autonomously(&self, category: &str) -> AutonomyDecision {
        let projection = self.projection.lock().await;

        let confidence = projection.confidence(category);
        let sample_count = projection.total_feedback(category);

        let autonomous =
            sample_count >= self.config.min_samples && confidence >= self.config.autonomy_threshold;

        tracing::debug!(
            category,
            confidence,
            sample_count,
            autonomous,
            "autonomy query"
        );

        AutonomyDecision {
            autonomous,
            confidence,
            sample_count,
        }
    }

    /// Current confidence for a category (0.0 with no feedback).
    pub async fn confidence(&self, category: &str) -> f64 {
        self.projection.lock().await.confidence(category)
    }

    /// Statistics for one category, if any feedback exists.
    pub async fn category_stats(&self, category: &str) -> Option<CategoryStats> {
        self.projection.lock().await.get(category).cloned()
    }

    /// Statistics for every known category, sorted by name.
    pub async fn all_stats(&self) -> Vec<CategoryStats> {
        self.projection.lock().await.all()
    }

    /// Markdown summary of per-category learning progress.
    pub async fn learning_report(&self) -> String {
        let stats = self.all_stats().await;
        report::render(&stats, &self.config)
    }
}
