use crate::api::{ActionResult, ApiClient, ApiError, Leader, LeaderRequest, PageQuery, PagedResponse};

pub const ENTITY: &str = "Leader";

pub async fn fetch_page(api: &ApiClient, query: &PageQuery) -> Result<PagedResponse<Leader>, ApiError> {
    api.get_leaders(query).await
}

pub async fn save(
    api: &ApiClient,
    id: Option<i64>,
    request: &LeaderRequest,
) -> Result<ActionResult, ApiError> {
    match id {
        Some(id) => api.update_leader(id, request).await,
        None => api.create_leader(request).await,
    }
}
