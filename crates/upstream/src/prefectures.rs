//! Prefecture statistics endpoint.

use reqwest::Method;

use goshuin_core::prefectures::PrefectureStatsResponse;

use crate::client::BackendClient;
use crate::error::BackendError;

impl BackendClient {
    /// Per-prefecture spot and goshuin counts for the authenticated user.
    pub async fn prefecture_stats(
        &self,
        token: &str,
    ) -> Result<PrefectureStatsResponse, BackendError> {
        let request = self.authed(Method::GET, "/api/prefectures/stats", token);
        self.send_json(request).await
    }
}
