// learning-agent-rs/src/model.rs
// Persisted feedback records and derived per-category statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome recorded for one proposed action.
///
/// `Approved` and `Rejected` are human decisions and are the only
/// variants that feed the confidence ratio. `ExecutedAutonomously` marks
/// that an action ran without approval, so the autonomous-execution
/// count can be rebuilt from the log alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
    ExecutedAutonomously,
}

/// One appended entry of the feedback log. Created on each decision,
/// never mutated or deleted; insertion order is chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: String,
    /// Opaque identifier of the concrete action instance.
    pub action_id: String,
    /// Coarse tag grouping similar actions (e.g. "update_dependency",
    /// "send_email") for shared confidence tracking.
    pub category: String,
    pub decision: Decision,
    pub note: Option<String>,
    /// Category confidence at the moment this record was created.
    pub confidence_at_time: f64,
    pub recorded_at: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn new(
        action_id: impl Into<String>,
        category: impl Into<String>,
        decision: Decision,
        note: Option<String>,
        confidence_at_time: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action_id: action_id.into(),
            category: category.into(),
            decision,
            note,
            confidence_at_time,
            recorded_at: Utc::now(),
        }
    }
}

/// Derived, recomputable aggregate for one action category.
///
/// This is a projection over the feedback log, never independently
/// authoritative state: `confidence` is always exactly
/// `approved / (approved + rejected)` and 0.0 with no feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub approved_count: u64,
    pub rejected_count: u64,
    pub autonomous_count: u64,
    pub last_updated: DateTime<Utc>,
}

impl CategoryStats {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            approved_count: 0,
            rejected_count: 0,
            autonomous_count: 0,
            last_updated: Utc::now(),
        }
    }

    /// Human decisions received so far (approvals plus rejections).
    pub fn total_feedback(&self) -> u64 {
        self.approved_count + self.rejected_count
    }

    /// Plain all-time Bernoulli success ratio, no smoothing and no
    /// decay. Zero feedback degrades to 0.0 rather than dividing by
    /// zero.
    pub fn confidence(&self) -> f64 {
        let total = self.total_feedback();
        if total == 0 {
            return 0.0;
        }
        self.approved_count as f64 / total as f64
    }
}

/// Answer to an autonomy query, with the evidence behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutonomyDecision {
    pub autonomous: bool,
    pub confidence: f64,
    pub sample_count: u64,
}
