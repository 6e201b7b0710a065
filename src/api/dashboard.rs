//! Dashboard endpoints
//!
//! The cross-account overview: aggregate summary, portfolio value
//! history, asset allocation, and the recent activity feed. All reads
//! cache at the default TTL.

use crate::api::models::{ActivityItem, AllocationSlice, DashboardSummary, ValuePoint};
use crate::error::FindashResult;
use crate::pipeline::{RequestOptions, RequestPipeline};
use std::sync::Arc;

/// Default window for portfolio value history
pub const DEFAULT_HISTORY_DAYS: u32 = 30;
/// Default length of the activity feed
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 5;

pub struct DashboardService {
    pipeline: Arc<RequestPipeline>,
}

impl DashboardService {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn summary(&self) -> FindashResult<DashboardSummary> {
        self.pipeline
            .get("/dashboard/summary", RequestOptions::cached())
            .await
    }

    pub async fn value_history(&self, days: u32) -> FindashResult<Vec<ValuePoint>> {
        let endpoint = format!("/dashboard/portfolio/history?days={}", days);
        self.pipeline.get(&endpoint, RequestOptions::cached()).await
    }

    pub async fn allocation(&self) -> FindashResult<Vec<AllocationSlice>> {
        self.pipeline
            .get("/dashboard/portfolio/allocation", RequestOptions::cached())
            .await
    }

    pub async fn recent_activity(&self, limit: u32) -> FindashResult<Vec<ActivityItem>> {
        let endpoint = format!("/dashboard/activity?limit={}", limit);
        self.pipeline.get(&endpoint, RequestOptions::cached()).await
    }
}
