// learning-agent-rs/src/stats.rs
// In-memory projection of per-category statistics over the feedback log.
//
// The log is the source of truth; this projection is rebuilt from it on
// load and updated incrementally on each durable append. Confidence
// depends only on counts, so the projection is independent of record
// arrival order.

use std::collections::HashMap;

use chrono::Utc;

use crate::model::{CategoryStats, Decision, FeedbackRecord};

#[derive(Debug, Default)]
pub struct StatsProjection {
    by_category: HashMap<String, CategoryStats>,
}

impl StatsProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the projection from the full log.
    pub fn rebuild(records: &[FeedbackRecord]) -> Self {
        let mut projection = Self::new();
        for record in records {
            projection.apply(record);
        }
        projection
    }

    /// Fold one record into the projection.
    pub fn apply(&mut self, record: &FeedbackRecord) {
        let stats = self
            .by_category
            .entry(record.category.clone())
            .or_insert_with(|| CategoryStats::new(record.category.clone()));

        match record.decision {
            Decision::Approved => stats.approved_count += 1,
            Decision::Rejected => stats.rejected_count += 1,
            Decision::ExecutedAutonomously => stats.autonomous_count += 1,
        }
        stats.last_updated = Utc::now();
    }

    pub fn get(&self, category: &str) -> Option<&CategoryStats> {
        self.by_category.get(category)
    }

    /// Confidence for a category; 0.0 for categories with no feedback.
    pub fn confidence(&self, category: &str) -> f64 {
        self.by_category
            .get(category)
            .map(CategoryStats::confidence)
            .unwrap_or(0.0)
    }

    /// Human-decision count for a category (approvals + rejections).
    pub fn total_feedback(&self, category: &str) -> u64 {
        self.by_category
            .get(category)
            .map(CategoryStats::total_feedback)
            .unwrap_or(0)
    }

    /// All category statistics, sorted by category name for stable output.
    pub fn all(&self) -> Vec<CategoryStats> {
        let mut stats: Vec<CategoryStats> = self.by_category.values().cloned().collect();
        stats.sort_by(|a, b| a.category.cmp(&b.category));
        stats
    }
}
