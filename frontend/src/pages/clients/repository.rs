use crate::api::{ActionResult, ApiClient, ApiError, Client, ClientRequest, PageQuery, PagedResponse};

pub const ENTITY: &str = "Client";

pub async fn fetch_page(api: &ApiClient, query: &PageQuery) -> Result<PagedResponse<Client>, ApiError> {
    api.get_clients(query).await
}

pub async fn save(
    api: &ApiClient,
    id: Option<i64>,
    request: &ClientRequest,
) -> Result<ActionResult, ApiError> {
    match id {
        Some(id) => api.update_client(id, request).await,
        None => api.create_client(request).await,
    }
}
