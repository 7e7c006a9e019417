use crate::api::{
    ActionResult, ApiClient, ApiError, Employee, EmployeeRequest, PageQuery, PagedResponse,
};

pub const ENTITY: &str = "Employee";

pub async fn fetch_page(
    api: &ApiClient,
    query: &PageQuery,
) -> Result<PagedResponse<Employee>, ApiError> {
    api.get_employees(query).await
}

pub async fn save(
    api: &ApiClient,
    id: Option<i64>,
    request: &EmployeeRequest,
) -> Result<ActionResult, ApiError> {
    match id {
        Some(id) => api.update_employee(id, request).await,
        None => api.create_employee(request).await,
    }
}
