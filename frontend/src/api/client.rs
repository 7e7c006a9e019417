use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::rc::Rc;

use crate::{
    api::types::*,
    config,
    state::session::SessionStore,
    utils::navigation,
};

/// Requests carrying this header are sent without the bearer token.
pub const SERVICE_HEADER: &str = "service";

/// POST endpoints that reject bodies containing an `id` field.
pub const STRIP_ID_PATHS: &[&str] = &["/Holiday/Create"];

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Bytes {
        content: Vec<u8>,
        content_type: String,
    },
}

/// A request as it flows through the pipeline, before it becomes a
/// `reqwest::RequestBuilder`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn query(mut self, params: Vec<(&'static str, String)>) -> Self {
        self.query.extend(params);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::parse(format!("Failed to serialize request: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn bytes(mut self, content: Vec<u8>, content_type: impl Into<String>) -> Self {
        self.body = RequestBody::Bytes {
            content,
            content_type: content_type.into(),
        };
        self
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            let encoded: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, NON_ALPHANUMERIC)))
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }
        url
    }
}

/// Drops a top-level `id` from POST bodies sent to [`STRIP_ID_PATHS`].
pub fn strip_id_field(request: &mut ApiRequest) {
    if request.method != Method::POST
        || !STRIP_ID_PATHS.iter().any(|p| request.path.starts_with(p))
    {
        return;
    }
    if let RequestBody::Json(Value::Object(map)) = &mut request.body {
        map.remove("id");
    }
}

/// Adds `Authorization: Bearer <token>` unless the request opted out through
/// the [`SERVICE_HEADER`] or no token is stored.
pub fn attach_bearer(request: &mut ApiRequest, token: Option<&str>) {
    if request.has_header(SERVICE_HEADER) || request.has_header("authorization") {
        return;
    }
    if let Some(token) = token {
        request
            .headers
            .push(("Authorization".to_string(), format!("Bearer {}", token)));
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionStore,
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session: SessionStore::browser(),
            on_unauthorized: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    /// Replaces the default 401 reaction (redirect to the login page).
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }
        log::warn!("backend answered 401, closing the session");
        self.session.clear();
        match &self.on_unauthorized {
            Some(hook) => hook(),
            None => navigation::redirect_to_login_if_needed(),
        }
    }

    /// Runs the request pipeline and returns the successful response.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<Response, ApiError> {
        strip_id_field(&mut request);
        attach_bearer(&mut request, self.session.token().as_deref());

        let base_url = self.resolved_base_url().await;
        let url = request.url(&base_url);
        let mut builder = self.client.request(request.method.clone(), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Bytes {
                content,
                content_type,
            } => builder.header("Content-Type", content_type).body(content),
        };

        let response = builder.send().await.map_err(|e| {
            log::error!("{} {} failed: {}", request.method, request.path, e);
            ApiError::from_status(0)
        })?;

        let status = response.status();
        self.handle_unauthorized_status(status);
        if status.is_success() {
            return Ok(response);
        }

        let mut error = ApiError::from_status(status.as_u16());
        if let Ok(Value::Object(body)) = response.json::<Value>().await {
            if let Some(message) = body.get("message").and_then(Value::as_str) {
                error.details = Some(serde_json::json!({ "message": message }));
            }
        }
        log::warn!(
            "{} {} answered {}",
            request.method,
            request.path,
            status.as_u16()
        );
        Err(error)
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::parse(format!("Failed to parse response: {}", e)))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        Self::parse_json(response).await
    }

    /// Envelope or bare object; either way the `data` payload is returned.
    pub async fn get_enveloped<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let value: Value = self.get_json(request).await?;
        let is_envelope = value
            .as_object()
            .map(|map| map.contains_key("code") && map.contains_key("data"))
            .unwrap_or(false);
        if is_envelope {
            let envelope: Envelope<T> = serde_json::from_value(value)
                .map_err(|e| ApiError::parse(format!("Failed to parse response: {}", e)))?;
            envelope
                .into_result()?
                .ok_or_else(|| ApiError::parse("Response did not include data"))
        } else {
            serde_json::from_value(value)
                .map_err(|e| ApiError::parse(format!("Failed to parse response: {}", e)))
        }
    }

    pub async fn get_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<T>, ApiError> {
        let payload: ListPayload<T> = self.get_json(request).await?;
        payload.into_result()
    }

    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &PageQuery,
    ) -> Result<PagedResponse<T>, ApiError> {
        self.get_json(ApiRequest::get(path).query(query.to_params()))
            .await
    }

    /// Action endpoints answer `{ code, message, data }`, an arbitrary body or
    /// nothing at all.
    pub async fn send_action(&self, request: ApiRequest) -> Result<ActionResult, ApiError> {
        let response = self.execute(request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::parse(format!("Failed to read response: {}", e)))?;
        if text.trim().is_empty() {
            return Ok(ActionResult::default());
        }
        match serde_json::from_str::<Envelope<Value>>(&text) {
            Ok(envelope) => {
                let message = envelope.message.clone();
                let data = envelope.into_result()?;
                Ok(ActionResult { message, data })
            }
            Err(_) => Ok(ActionResult {
                message: None,
                data: serde_json::from_str(&text).ok(),
            }),
        }
    }

    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ActionResult, ApiError> {
        self.send_action(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ActionResult, ApiError> {
        self.send_action(ApiRequest::put(path).json(body)?).await
    }

    pub async fn post_bytes(
        &self,
        path: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<ActionResult, ApiError> {
        self.send_action(ApiRequest::post(path).bytes(content, content_type))
            .await
    }

    pub async fn get_bytes(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        let response = self.execute(request).await?;
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ApiError::parse(format!("Failed to read file: {}", e)))
    }
}
