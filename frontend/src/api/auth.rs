use super::{
    client::{ApiClient, ApiRequest, SERVICE_HEADER},
    types::{ApiError, Employee, Envelope, LoginData, LoginRequest},
};

impl ApiClient {
    /// Signs in, persists the session and resolves the display name.
    ///
    /// Any failure along the way leaves storage without session keys.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginData, ApiError> {
        let result = self.login_and_persist(request).await;
        if let Err(err) = &result {
            log::warn!("login failed: {} ({})", err.error, err.code);
            self.session().clear();
        }
        result
    }

    async fn login_and_persist(&self, request: &LoginRequest) -> Result<LoginData, ApiError> {
        let envelope: Envelope<LoginData> = self
            .get_json(
                ApiRequest::post("/User/Login")
                    .header(SERVICE_HEADER, "login")
                    .json(request)?,
            )
            .await?;
        let data = envelope
            .into_result()?
            .ok_or_else(|| ApiError::parse("Login response did not include data"))?;

        self.session().persist_login(&data, &request.email)?;
        let employee = self.get_employee(data.employee_id).await?;
        let full_name = self.session().persist_profile(&employee)?;
        log::info!("signed in as {}", full_name);
        Ok(data)
    }

    pub async fn get_employee(&self, id: i64) -> Result<Employee, ApiError> {
        self.get_enveloped(ApiRequest::get(format!("/Employee/GetEmployeeById/{}", id)))
            .await
    }
}
