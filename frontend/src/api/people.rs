use serde_json::json;

use super::{
    client::{ApiClient, ApiRequest},
    types::*,
};

/// `PUT /{entity}/ChangeStatus/{id}`; records are soft-deleted by flipping `status`.
fn change_status_request(entity: &str, id: i64, status: bool) -> Result<ApiRequest, ApiError> {
    ApiRequest::put(format!("/{}/ChangeStatus/{}", entity, id)).json(&json!({ "status": status }))
}

impl ApiClient {
    pub async fn change_status(
        &self,
        entity: &str,
        id: i64,
        status: bool,
    ) -> Result<ActionResult, ApiError> {
        self.send_action(change_status_request(entity, id, status)?)
            .await
    }

    pub async fn get_employees(
        &self,
        query: &PageQuery,
    ) -> Result<PagedResponse<Employee>, ApiError> {
        self.get_paged("/Employee/GetAllEmployees", query).await
    }

    pub async fn create_employee(
        &self,
        request: &EmployeeRequest,
    ) -> Result<ActionResult, ApiError> {
        self.post_json("/Employee/CreateEmployee", request).await
    }

    pub async fn update_employee(
        &self,
        id: i64,
        request: &EmployeeRequest,
    ) -> Result<ActionResult, ApiError> {
        self.put_json(&format!("/Employee/UpdateEmployee/{}", id), request)
            .await
    }

    pub async fn get_clients(&self, query: &PageQuery) -> Result<PagedResponse<Client>, ApiError> {
        self.get_paged("/Client/GetAllClients", query).await
    }

    pub async fn create_client(&self, request: &ClientRequest) -> Result<ActionResult, ApiError> {
        self.post_json("/Client/CreateClient", request).await
    }

    pub async fn update_client(
        &self,
        id: i64,
        request: &ClientRequest,
    ) -> Result<ActionResult, ApiError> {
        self.put_json(&format!("/Client/UpdateClient/{}", id), request)
            .await
    }

    pub async fn get_leaders(&self, query: &PageQuery) -> Result<PagedResponse<Leader>, ApiError> {
        self.get_paged("/Leader/GetAllLeaders", query).await
    }

    pub async fn create_leader(&self, request: &LeaderRequest) -> Result<ActionResult, ApiError> {
        self.post_json("/Leader/CreateLeader", request).await
    }

    pub async fn update_leader(
        &self,
        id: i64,
        request: &LeaderRequest,
    ) -> Result<ActionResult, ApiError> {
        self.put_json(&format!("/Leader/UpdateLeader/{}", id), request)
            .await
    }

    pub async fn get_users(&self, query: &PageQuery) -> Result<PagedResponse<User>, ApiError> {
        self.get_paged("/User/GetAllUsers", query).await
    }

    pub async fn create_user(&self, request: &UserRequest) -> Result<ActionResult, ApiError> {
        self.post_json("/User/CreateUser", request).await
    }

    pub async fn update_user(
        &self,
        id: i64,
        request: &UserRequest,
    ) -> Result<ActionResult, ApiError> {
        self.put_json(&format!("/User/UpdateUser/{}", id), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::RequestBody;

    #[test]
    fn change_status_targets_entity_route() {
        let request = change_status_request("Leader", 12, false).unwrap();
        assert_eq!(request.path, "/Leader/ChangeStatus/12");
        assert_eq!(request.method, reqwest::Method::PUT);
        assert_eq!(request.body, RequestBody::Json(json!({ "status": false })));
    }
}
