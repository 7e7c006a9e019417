use crate::api::{ActionResult, ApiClient, ApiError, CatalogItem, Employee, PageQuery};

pub async fn fetch_employees(api: &ApiClient) -> Result<Vec<Employee>, ApiError> {
    Ok(api.get_employees(&PageQuery::reference()).await?.items)
}

pub async fn fetch_periods(api: &ApiClient) -> Result<Vec<CatalogItem>, ApiError> {
    api.get_periods().await
}

pub async fn download_report(api: &ApiClient, employee_id: i64, period_id: i64) -> Result<Vec<u8>, ApiError> {
    api.download_activity_report(employee_id, period_id).await
}

pub async fn download_model(api: &ApiClient) -> Result<Vec<u8>, ApiError> {
    api.download_model().await
}

pub async fn upload(api: &ApiClient, content: Vec<u8>) -> Result<ActionResult, ApiError> {
    if content.is_empty() {
        return Err(ApiError::validation("El archivo seleccionado está vacío."));
    }
    api.upload_activities(content).await
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn report_is_requested_for_employee_and_period() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/Report/DownloadActivityReport")
                    .query_param("employeeId", "7")
                    .query_param("periodId", "3");
                then.status(200).body(vec![0x50, 0x4b, 0x03, 0x04]);
            })
            .await;
        let api = ApiClient::new_with_base_url(server.base_url());
        let bytes = download_report(&api, 7, 3).await.unwrap();
        mock.assert_async().await;
        assert_eq!(bytes, vec![0x50, 0x4b, 0x03, 0x04]);
    }

    #[tokio::test]
    async fn empty_upload_is_rejected_locally() {
        let api = ApiClient::new_with_base_url("http://127.0.0.1:9");
        let err = upload(&api, Vec::new()).await.unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn upload_reports_backend_message() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/Report/UploadActivities");
            then.status(200)
                .json_body(json!({ "code": 200, "message": "12 actividades cargadas" }));
        });
        let api = ApiClient::new_with_base_url(server.base_url());
        let result = upload(&api, vec![1, 2, 3]).await.unwrap();
        assert_eq!(result.message.as_deref(), Some("12 actividades cargadas"));
    }
}
