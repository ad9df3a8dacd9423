use crate::{ApiClient, ApiResult, RequestDescriptor};
use api_types::{Complaint, ComplaintResolve, ComplaintStatus};

/// Customer-care endpoints.
pub struct SupportApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl SupportApi<'_> {
    /// All complaints, or only those in `status`.
    pub async fn complaints(&self, status: Option<ComplaintStatus>) -> ApiResult<Vec<Complaint>> {
        let descriptor = RequestDescriptor::get(self.client.api_url("support/complaints")?)
            .query_opt("status_filter", status.map(|s| s.as_str()));
        self.client.send_json(descriptor).await
    }

    pub async fn resolve_complaint(&self, complaint_id: i64, notes: &str) -> ApiResult<Complaint> {
        let url = self
            .client
            .api_url(&format!("support/complaints/{complaint_id}/resolve"))?;
        let descriptor = RequestDescriptor::put(url).json(&ComplaintResolve {
            resolution_notes: notes.to_string(),
        })?;
        self.client.send_json(descriptor).await
    }
}
