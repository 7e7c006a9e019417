use crate::{
    api::{ActionResult, ApiClient, ApiError, Module, PageQuery, PagedResponse, Role, RoleRequest},
    components::table::page_locally,
    utils::search,
};

/// Roles come back as one list; search and paging happen here.
pub async fn fetch_page(api: &ApiClient, query: &PageQuery) -> Result<PagedResponse<Role>, ApiError> {
    let roles = api.get_roles().await?;
    let roles = search::fuzzy_filter(&roles, query.search.as_deref().unwrap_or(""), |role| {
        vec![
            role.role_name.clone(),
            role.description.clone().unwrap_or_default(),
        ]
    });
    Ok(page_locally(roles, query))
}

pub async fn fetch_modules(api: &ApiClient) -> Result<Vec<Module>, ApiError> {
    Ok(api
        .get_modules()
        .await?
        .into_iter()
        .filter(|module| !module.submodule)
        .collect())
}

pub async fn save(
    api: &ApiClient,
    id: Option<i64>,
    request: &RoleRequest,
) -> Result<ActionResult, ApiError> {
    match id {
        Some(id) => api.update_role(id, request).await,
        None => api.create_role(request).await,
    }
}
