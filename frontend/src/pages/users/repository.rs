use crate::api::{
    ActionResult, ApiClient, ApiError, Employee, PageQuery, PagedResponse, Role, User, UserRequest,
};

pub const ENTITY: &str = "User";

pub async fn fetch_page(api: &ApiClient, query: &PageQuery) -> Result<PagedResponse<User>, ApiError> {
    api.get_users(query).await
}

pub async fn fetch_employees(api: &ApiClient) -> Result<Vec<Employee>, ApiError> {
    Ok(api.get_employees(&PageQuery::reference()).await?.items)
}

pub async fn fetch_roles(api: &ApiClient) -> Result<Vec<Role>, ApiError> {
    api.get_roles().await
}

pub async fn save(
    api: &ApiClient,
    id: Option<i64>,
    request: &UserRequest,
) -> Result<ActionResult, ApiError> {
    match id {
        Some(id) => api.update_user(id, request).await,
        None => api.create_user(request).await,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn edit_without_password_omits_the_field() {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/User/UpdateUser/4")
                    .json_body(json!({
                        "email": "luis@empresa.com",
                        "employeeID": null,
                        "roleIDs": [1]
                    }));
                then.status(200).json_body(json!({ "code": 200, "message": "Usuario actualizado" }));
            })
            .await;
        let api = ApiClient::new_with_base_url(server.base_url());
        let request = UserRequest {
            email: "luis@empresa.com".into(),
            password: None,
            employee_id: None,
            role_ids: vec![1],
        };
        let result = save(&api, Some(4), &request).await.unwrap();
        update.assert_async().await;
        assert_eq!(result.message.as_deref(), Some("Usuario actualizado"));
    }
}
