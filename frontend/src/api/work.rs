use super::{
    client::{ApiClient, ApiRequest},
    types::*,
};

impl ApiClient {
    pub async fn get_projects(&self, query: &PageQuery) -> Result<PagedResponse<Project>, ApiError> {
        self.get_paged("/Project/GetAllProjects", query).await
    }

    pub async fn get_project(&self, id: i64) -> Result<Project, ApiError> {
        self.get_enveloped(ApiRequest::get(format!("/Project/GetProjectById/{}", id)))
            .await
    }

    pub async fn create_project(&self, request: &ProjectRequest) -> Result<ActionResult, ApiError> {
        self.post_json("/Project/CreateProject", request).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        request: &ProjectRequest,
    ) -> Result<ActionResult, ApiError> {
        self.put_json(&format!("/Project/UpdateProject/{}", id), request)
            .await
    }

    pub async fn get_holidays(&self, query: &PageQuery) -> Result<PagedResponse<Holiday>, ApiError> {
        self.get_paged("/Holiday/GetAllHolidays", query).await
    }

    /// The pipeline drops `id` from this body before it is sent.
    pub async fn create_holiday(&self, holiday: &Holiday) -> Result<ActionResult, ApiError> {
        self.post_json("/Holiday/CreateHoliday", holiday).await
    }

    pub async fn update_holiday(&self, holiday: &Holiday) -> Result<ActionResult, ApiError> {
        self.put_json(&format!("/Holiday/UpdateHoliday/{}", holiday.id), holiday)
            .await
    }

    pub async fn get_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.get_list(ApiRequest::get("/Role/GetAllRoles")).await
    }

    pub async fn get_modules(&self) -> Result<Vec<Module>, ApiError> {
        self.get_list(ApiRequest::get("/Role/GetAllModules")).await
    }

    pub async fn create_role(&self, request: &RoleRequest) -> Result<ActionResult, ApiError> {
        self.post_json("/Role/CreateRole", request).await
    }

    pub async fn update_role(
        &self,
        id: i64,
        request: &RoleRequest,
    ) -> Result<ActionResult, ApiError> {
        self.put_json(&format!("/Role/UpdateRole/{}", id), request)
            .await
    }

    pub async fn get_activities_by_employee(
        &self,
        employee_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<Activity>, ApiError> {
        self.get_list(
            ApiRequest::get(format!(
                "/DailyActivity/GetActivitiesByEmployee/{}",
                employee_id
            ))
            .query(vec![("year", year.to_string()), ("month", month.to_string())]),
        )
        .await
    }

    pub async fn create_activity(&self, request: &ActivityRequest) -> Result<ActionResult, ApiError> {
        self.post_json("/DailyActivity/CreateActivity", request)
            .await
    }

    /// The backend route is spelled `UpadteActivity`.
    pub async fn update_activity(
        &self,
        id: i64,
        request: &ActivityRequest,
    ) -> Result<ActionResult, ApiError> {
        self.put_json(&format!("/DailyActivity/UpadteActivity/{}", id), request)
            .await
    }

    /// `None` when the project has no saved projection yet.
    pub async fn get_projection(&self, project_id: i64) -> Result<Option<Projection>, ApiError> {
        let value: serde_json::Value = self
            .get_json(ApiRequest::get(format!(
                "/Projection/GetProjectionByProject/{}",
                project_id
            )))
            .await?;
        let value = match value {
            serde_json::Value::Object(map) if map.contains_key("code") => {
                let envelope: Envelope<serde_json::Value> =
                    serde_json::from_value(serde_json::Value::Object(map))
                        .map_err(|e| ApiError::parse(format!("Failed to parse response: {}", e)))?;
                envelope.into_result()?.unwrap_or(serde_json::Value::Null)
            }
            other => other,
        };
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ApiError::parse(format!("Failed to parse projection: {}", e)))
    }

    pub async fn save_projection(&self, projection: &Projection) -> Result<ActionResult, ApiError> {
        self.post_json("/Projection/SaveProjection", projection)
            .await
    }

    pub async fn get_activity_types(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.get_list(ApiRequest::get("/Catalog/GetActivityTypes"))
            .await
    }

    pub async fn get_resource_types(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.get_list(ApiRequest::get("/Catalog/GetResourceTypes"))
            .await
    }

    pub async fn get_periods(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.get_list(ApiRequest::get("/Catalog/GetPeriods")).await
    }
}
