use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ code, message, data }` wrapper returned by the action endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }

    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_ok() {
            Ok(self.data)
        } else {
            Err(ApiError::backend(self.code, self.message))
        }
    }
}

/// Some list endpoints wrap the array in an envelope, others return it bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped(Envelope<Vec<T>>),
}

impl<T> ListPayload<T> {
    pub fn into_result(self) -> Result<Vec<T>, ApiError> {
        match self {
            ListPayload::Bare(items) => Ok(items),
            ListPayload::Wrapped(envelope) => Ok(envelope.into_result()?.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub page_number: i64,
    #[serde(default)]
    pub page_size: i64,
    #[serde(default)]
    pub total_pages: i64,
}

impl<T> Default for PagedResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            page_number: 1,
            page_size: 0,
            total_pages: 0,
        }
    }
}

/// Query parameters accepted by every paged-list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub search: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: 10,
            search: None,
        }
    }
}

/// Reference lists are small; one large page is enough to fill a selector.
pub const REFERENCE_PAGE_SIZE: u32 = 500;

impl PageQuery {
    /// Single large page used to load selector options.
    pub fn reference() -> Self {
        Self {
            page_size: REFERENCE_PAGE_SIZE,
            ..Self::default()
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pageNumber", self.page_number.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(search) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            params.push(("search", search.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginData {
    pub token: String,
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub role_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<Module>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: i64,
    pub module_name: String,
    pub module_path: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub submodule: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub role_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "moduleIDs")]
    pub module_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub identification: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub person: Person,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub person: Person,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub trade_name: String,
    pub person: Person,
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    pub trade_name: String,
    pub person: Person,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    pub id: i64,
    pub person: Person,
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderRequest {
    pub person: Person,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(rename = "employeeID", default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "employeeID")]
    pub employee_id: Option<i64>,
    #[serde(rename = "roleIDs")]
    pub role_ids: Vec<i64>,
}

/// Sent as-is on create; the request pipeline drops `id` for this family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    #[serde(default)]
    pub id: i64,
    pub holiday_name: String,
    pub holiday_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub status: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "clientID")]
    pub client_id: i64,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(rename = "leaderID", default)]
    pub leader_id: Option<i64>,
    #[serde(default)]
    pub leader_name: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub name: String,
    pub code: String,
    #[serde(rename = "clientID")]
    pub client_id: i64,
    #[serde(rename = "leaderID")]
    pub leader_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    #[serde(rename = "projectID")]
    pub project_id: i64,
    #[serde(rename = "activityTypeID")]
    pub activity_type_id: i64,
    pub hours_quantity: f64,
    pub activity_date: NaiveDate,
    #[serde(default)]
    pub activity_description: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_billable: bool,
    #[serde(rename = "approvedByID", default)]
    pub approved_by_id: Option<i64>,
    #[serde(default)]
    pub approval_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    #[serde(rename = "projectID")]
    pub project_id: i64,
    #[serde(rename = "activityTypeID")]
    pub activity_type_id: i64,
    pub hours_quantity: f64,
    pub activity_date: NaiveDate,
    pub activity_description: String,
    pub notes: Option<String>,
    pub is_billable: bool,
}

/// Reference-data row. The catalog endpoints disagree on what the label field
/// is called, so every spelling is accepted here and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawCatalogItem")]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub value: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogItem {
    id: i64,
    name: Option<String>,
    description: Option<String>,
    catalog_name: Option<String>,
    type_name: Option<String>,
    value: Option<f64>,
    hourly_cost: Option<f64>,
}

impl From<RawCatalogItem> for CatalogItem {
    fn from(raw: RawCatalogItem) -> Self {
        let name = [raw.name, raw.catalog_name, raw.type_name, raw.description]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or_default();
        Self {
            id: raw.id,
            name,
            value: raw.value.or(raw.hourly_cost),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Weekly,
    #[default]
    Monthly,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRow {
    pub resource_type_id: i64,
    pub resource_name: String,
    pub hourly_cost: f64,
    pub resource_quantity: f64,
    pub time_distribution: Vec<f64>,
    #[serde(default)]
    pub total_time: f64,
    #[serde(default)]
    pub resource_cost: f64,
    #[serde(default)]
    pub participation_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    #[serde(rename = "projectID")]
    pub project_id: i64,
    pub period_kind: PeriodKind,
    pub period_count: u32,
    #[serde(default)]
    pub resources: Vec<ProjectionRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionResult {
    pub message: Option<String>,
    pub data: Option<Value>,
}

use leptos::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            status: None,
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            ..Self::with_code(msg, "REQUEST_FAILED")
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: Some(401),
            ..Self::with_code(
                "Su sesión ha expirado. Inicie sesión nuevamente.",
                "UNAUTHORIZED",
            )
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "STORAGE_ERROR")
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "PARSE_ERROR")
    }

    /// Envelope whose `code` is not 200.
    pub fn backend(code: i32, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("La operación no se pudo completar (código {}).", code));
        Self {
            details: Some(serde_json::json!({ "code": code })),
            ..Self::with_code(message, "BACKEND_ERROR")
        }
    }

    /// Canned user-facing message for an HTTP status.
    pub fn from_status(status: u16) -> Self {
        let (message, code) = match status {
            0 => ("No se pudo conectar con el servidor.".to_string(), "REQUEST_FAILED"),
            400 => ("La solicitud contiene datos inválidos.".to_string(), "BAD_REQUEST"),
            401 => return Self::unauthorized(),
            413 => ("El archivo supera el tamaño permitido.".to_string(), "PAYLOAD_TOO_LARGE"),
            415 => (
                "El formato del archivo no es compatible.".to_string(),
                "UNSUPPORTED_MEDIA_TYPE",
            ),
            500 => (
                "Ocurrió un error en el servidor. Intente nuevamente.".to_string(),
                "SERVER_ERROR",
            ),
            other => (format!("Error inesperado (HTTP {}).", other), "HTTP_ERROR"),
        };
        Self {
            status: Some(status),
            ..Self::with_code(message, code)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_login_envelope() {
        let raw = json!({
            "code": 200,
            "message": "OK",
            "data": {
                "token": "a.b.c",
                "employeeID": 7,
                "userID": 3,
                "roles": [{ "id": 1, "roleName": "Colaborador" }],
                "modules": [{
                    "id": 4,
                    "moduleName": "Actividades",
                    "modulePath": "/menu/activities",
                    "icon": "event",
                    "displayOrder": 1,
                    "submodule": false
                }]
            }
        });
        let envelope: Envelope<LoginData> = serde_json::from_value(raw).unwrap();
        let data = envelope.into_result().unwrap().unwrap();
        assert_eq!(data.employee_id, 7);
        assert_eq!(data.user_id, 3);
        assert_eq!(data.roles[0].role_name, "Colaborador");
        assert_eq!(data.modules[0].module_path, "/menu/activities");
    }

    #[test]
    fn envelope_with_error_code_becomes_backend_error() {
        let envelope: Envelope<LoginData> =
            serde_json::from_value(json!({ "code": 401, "message": "Credenciales inválidas" }))
                .unwrap();
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.code, "BACKEND_ERROR");
        assert_eq!(err.error, "Credenciales inválidas");
    }

    #[test]
    fn list_payload_accepts_bare_and_wrapped_arrays() {
        let bare: ListPayload<Role> =
            serde_json::from_value(json!([{ "id": 1, "roleName": "Lider" }])).unwrap();
        assert_eq!(bare.into_result().unwrap().len(), 1);

        let wrapped: ListPayload<Role> = serde_json::from_value(json!({
            "code": 200,
            "message": null,
            "data": [{ "id": 1, "roleName": "Lider" }, { "id": 2, "roleName": "Colaborador" }]
        }))
        .unwrap();
        assert_eq!(wrapped.into_result().unwrap().len(), 2);
    }

    #[test]
    fn paged_response_uses_camel_case_fields() {
        let page: PagedResponse<Holiday> = serde_json::from_value(json!({
            "items": [{
                "id": 5,
                "holidayName": "Año Nuevo",
                "holidayDate": "2025-01-01",
                "description": null,
                "status": true
            }],
            "totalItems": 21,
            "pageNumber": 2,
            "pageSize": 10,
            "totalPages": 3
        }))
        .unwrap();
        assert_eq!(page.total_items, 21);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].holiday_name, "Año Nuevo");
    }

    #[test]
    fn catalog_item_resolves_every_label_spelling() {
        let items: Vec<CatalogItem> = serde_json::from_value(json!([
            { "id": 1, "name": "Desarrollo" },
            { "id": 2, "description": "Reunión" },
            { "id": 3, "catalogName": "Soporte" },
            { "id": 4, "typeName": "Arquitecto", "hourlyCost": 35.5 },
            { "id": 5, "name": "Analista", "description": "Analista funcional" }
        ]))
        .unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Desarrollo", "Reunión", "Soporte", "Arquitecto", "Analista"]
        );
        assert_eq!(items[3].value, Some(35.5));
    }

    #[test]
    fn page_query_skips_blank_search() {
        let query = PageQuery {
            page_number: 2,
            page_size: 25,
            search: Some("  ".into()),
        };
        assert_eq!(
            query.to_params(),
            vec![("pageNumber", "2".to_string()), ("pageSize", "25".to_string())]
        );
    }

    #[test]
    fn activity_request_serializes_backend_field_names() {
        let request = ActivityRequest {
            employee_id: 7,
            project_id: 2,
            activity_type_id: 1,
            hours_quantity: 4.5,
            activity_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            activity_description: "Revisión".into(),
            notes: None,
            is_billable: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["employeeID"], json!(7));
        assert_eq!(value["projectID"], json!(2));
        assert_eq!(value["activityTypeID"], json!(1));
        assert_eq!(value["hoursQuantity"], json!(4.5));
        assert_eq!(value["activityDate"], json!("2025-03-10"));
        assert_eq!(value["isBillable"], json!(true));
    }

    #[test]
    fn status_errors_map_to_canned_messages() {
        assert_eq!(ApiError::from_status(400).code, "BAD_REQUEST");
        assert_eq!(ApiError::from_status(413).error, "El archivo supera el tamaño permitido.");
        assert_eq!(ApiError::from_status(415).code, "UNSUPPORTED_MEDIA_TYPE");
        assert_eq!(ApiError::from_status(500).code, "SERVER_ERROR");
        assert_eq!(ApiError::from_status(0).code, "REQUEST_FAILED");
        assert!(ApiError::from_status(401).is_unauthorized());
        assert_eq!(ApiError::from_status(418).error, "Error inesperado (HTTP 418).");
        assert_eq!(ApiError::from_status(404).status, Some(404));
    }

    #[test]
    fn person_full_name_trims_parts() {
        let person = Person {
            first_name: " Ana ".into(),
            last_name: "Torres".into(),
            ..Person::default()
        };
        assert_eq!(person.full_name(), "Ana Torres");
    }
}
