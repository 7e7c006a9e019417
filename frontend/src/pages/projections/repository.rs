use crate::api::{ActionResult, ApiClient, ApiError, CatalogItem, PageQuery, Project, Projection};

pub async fn fetch_projects(api: &ApiClient) -> Result<Vec<Project>, ApiError> {
    Ok(api
        .get_projects(&PageQuery::reference())
        .await?
        .items
        .into_iter()
        .filter(|project| project.status)
        .collect())
}

pub async fn fetch_resource_types(api: &ApiClient) -> Result<Vec<CatalogItem>, ApiError> {
    api.get_resource_types().await
}

pub async fn fetch_projection(api: &ApiClient, project_id: i64) -> Result<Option<Projection>, ApiError> {
    api.get_projection(project_id).await
}

pub async fn save(api: &ApiClient, projection: &Projection) -> Result<ActionResult, ApiError> {
    api.save_projection(projection).await
}
