//! Health check operations.

use hotelsync_core::status::HealthReport;

use super::HotelsyncClient;
use crate::error::Result;

impl HotelsyncClient {
    /// Liveness probe. Succeeds when the server accepts connections.
    pub async fn livez(&self) -> Result<()> {
        let response = self.client.get(self.url("/livez")).send().await?;
        self.handle_empty_response(response, "livez").await
    }

    /// Role and backlog report.
    pub async fn healthz(&self) -> Result<HealthReport> {
        let response = self.client.get(self.url("/healthz")).send().await?;
        self.handle_response(response, "healthz").await
    }
}
