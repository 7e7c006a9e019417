use crate::api::{
    ActionResult, ApiClient, ApiError, Client, Leader, PageQuery, PagedResponse, Project,
    ProjectRequest,
};

pub const ENTITY: &str = "Project";

pub async fn fetch_page(api: &ApiClient, query: &PageQuery) -> Result<PagedResponse<Project>, ApiError> {
    api.get_projects(query).await
}

pub async fn fetch_clients(api: &ApiClient) -> Result<Vec<Client>, ApiError> {
    Ok(api.get_clients(&PageQuery::reference()).await?.items)
}

pub async fn fetch_leaders(api: &ApiClient) -> Result<Vec<Leader>, ApiError> {
    Ok(api.get_leaders(&PageQuery::reference()).await?.items)
}

pub async fn save(
    api: &ApiClient,
    id: Option<i64>,
    request: &ProjectRequest,
) -> Result<ActionResult, ApiError> {
    match id {
        Some(id) => api.update_project(id, request).await,
        None => api.create_project(request).await,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn reference_clients_use_one_large_page() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/Client/GetAllClients")
                    .query_param("pageSize", "500");
                then.status(200).json_body(json!({
                    "items": [{
                        "id": 1,
                        "tradeName": "Comercial Andina",
                        "person": {
                            "firstName": "Rosa",
                            "lastName": "Vera",
                            "identification": "1790012345001",
                            "email": "rosa@andina.ec"
                        },
                        "status": true
                    }],
                    "totalItems": 1
                }));
            })
            .await;
        let api = ApiClient::new_with_base_url(server.base_url());
        let clients = fetch_clients(&api).await.unwrap();
        mock.assert_async().await;
        assert_eq!(clients[0].trade_name, "Comercial Andina");
    }
}
