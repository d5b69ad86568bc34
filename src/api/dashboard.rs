//! Dashboard aggregate endpoints

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{ActivityItem, DashboardMetrics};

impl ApiClient {
    pub async fn dashboard_metrics(&self) -> ApiResult<DashboardMetrics> {
        self.get("/dashboard/metrics").await
    }

    pub async fn recent_activity(&self) -> ApiResult<Vec<ActivityItem>> {
        self.get("/dashboard/recent-activity").await
    }
}
