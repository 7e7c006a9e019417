use super::{
    client::{ApiClient, ApiRequest},
    types::{ActionResult, ApiError},
};
use crate::utils::download::XLSM_MIME;

impl ApiClient {
    pub async fn download_activity_report(
        &self,
        employee_id: i64,
        period_id: i64,
    ) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(ApiRequest::get("/Report/DownloadActivityReport").query(vec![
            ("employeeId", employee_id.to_string()),
            ("periodId", period_id.to_string()),
        ]))
        .await
    }

    pub async fn download_model(&self) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(ApiRequest::get("/Report/DownloadModel"))
            .await
    }

    pub async fn upload_activities(&self, content: Vec<u8>) -> Result<ActionResult, ApiError> {
        self.post_bytes("/Report/UploadActivities", content, XLSM_MIME)
            .await
    }
}
