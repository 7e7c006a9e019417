use crate::api::{ActionResult, ApiClient, ApiError, Holiday, PageQuery, PagedResponse};

pub const ENTITY: &str = "Holiday";

pub async fn fetch_page(api: &ApiClient, query: &PageQuery) -> Result<PagedResponse<Holiday>, ApiError> {
    api.get_holidays(query).await
}

/// Holidays travel as whole records; updates carry the id in the body.
pub async fn save(api: &ApiClient, id: Option<i64>, mut holiday: Holiday) -> Result<ActionResult, ApiError> {
    match id {
        Some(id) => {
            holiday.id = id;
            api.update_holiday(&holiday).await
        }
        None => api.create_holiday(&holiday).await,
    }
}
