use crate::{
    api::{ApiClient, ApiError, LoginRequest, Role},
    state::{menu::MenuEntry, session::SessionStore},
};
use leptos::*;

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub loading: bool,
    pub full_name: Option<String>,
    pub employee_id: Option<i64>,
    pub roles: Vec<Role>,
    pub menu: Vec<MenuEntry>,
    pub is_admin: bool,
}

impl AuthState {
    /// Restores the in-memory flags from storage. A missing or expired token
    /// yields a logged-out state.
    pub fn from_session(session: &SessionStore, now_secs: i64) -> Self {
        if !session.has_token() || session.is_token_expired_at(now_secs) {
            return Self::default();
        }
        let snapshot = session.snapshot();
        Self {
            is_authenticated: true,
            loading: false,
            full_name: snapshot.full_name,
            employee_id: snapshot.employee_id,
            menu: session.menu(),
            is_admin: session.is_admin(),
            roles: snapshot.roles,
        }
    }

    pub fn display_name(&self) -> String {
        self.full_name.clone().unwrap_or_else(|| "Usuario".to_string())
    }
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(ApiClient::new)
}

pub fn use_session() -> SessionStore {
    use_context::<SessionStore>()
        .or_else(|| use_context::<ApiClient>().map(|api| api.session().clone()))
        .unwrap_or_else(SessionStore::browser)
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

fn create_auth_context(session: &SessionStore) -> AuthContext {
    if session.has_token() && session.is_token_expired_at(now_secs()) {
        log::info!("stored session expired, clearing it");
        session.clear();
    }
    create_signal(AuthState::from_session(session, now_secs()))
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = use_session();
    let ctx = create_auth_context(&session);
    provide_context::<AuthContext>(ctx);
    view! {
        <SessionWatcher />
        {children()}
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match api.login(&request).await {
        Ok(_) => {
            set_auth_state.set(AuthState::from_session(api.session(), now_secs()));
            Ok(())
        }
        Err(error) => {
            set_auth_state.set(AuthState::default());
            Err(error)
        }
    }
}

/// Drops every session key and resets the in-memory flags. Nothing is sent to
/// the backend.
pub fn logout(session: &SessionStore, set_auth_state: WriteSignal<AuthState>) {
    session.clear();
    set_auth_state.set(AuthState::default());
    log::info!("signed out");
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_api_client();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), ()> {
    let (_auth, set_auth) = use_auth();
    let session = use_session();

    create_action(move |_: &()| {
        logout(&session, set_auth);
        async {}
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    /// Nothing to do.
    Valid,
    /// The token outlived its `exp` claim.
    Expired,
    /// Another tab removed the token.
    ClearedElsewhere,
}

pub fn check_session(session: &SessionStore, is_authenticated: bool, now_secs: i64) -> SessionCheck {
    if !is_authenticated {
        return SessionCheck::Valid;
    }
    if !session.has_token() {
        return SessionCheck::ClearedElsewhere;
    }
    if session.is_token_expired_at(now_secs) {
        return SessionCheck::Expired;
    }
    SessionCheck::Valid
}

/// Applies a watcher tick. Returns true when the tab was logged out.
pub fn apply_session_check(
    check: SessionCheck,
    session: &SessionStore,
    set_auth_state: WriteSignal<AuthState>,
) -> bool {
    match check {
        SessionCheck::Valid => false,
        SessionCheck::Expired => {
            log::warn!("session token expired, forcing logout");
            logout(session, set_auth_state);
            true
        }
        SessionCheck::ClearedElsewhere => {
            log::info!("session closed in another tab");
            set_auth_state.set(AuthState::default());
            true
        }
    }
}

/// Polls the stored token on the configured interval and logs the tab out
/// when it expires or disappears.
#[component]
pub fn SessionWatcher() -> impl IntoView {
    let (auth, set_auth) = use_auth();
    let session = use_session();
    start_watcher(auth, set_auth, session);
}

#[cfg(target_arch = "wasm32")]
fn start_watcher(auth: ReadSignal<AuthState>, set_auth: WriteSignal<AuthState>, session: SessionStore) {
    use gloo_timers::callback::Interval;

    let interval_ms = crate::config::current().session_check_interval_ms();
    let interval = Interval::new(interval_ms, move || {
        let is_authenticated = auth.get_untracked().is_authenticated;
        let check = check_session(&session, is_authenticated, now_secs());
        if apply_session_check(check, &session, set_auth) {
            crate::utils::navigation::redirect_to_login_if_needed();
        }
    });
    let handle = store_value(Some(interval));
    on_cleanup(move || {
        handle.update_value(|slot| *slot = None);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn start_watcher(_auth: ReadSignal<AuthState>, _set_auth: WriteSignal<AuthState>, _session: SessionStore) {}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{employee_json, login_envelope_json};
    use httpmock::prelude::*;
    use serde_json::json;

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "ana@empresa.com".into(),
            password: "secreto".into(),
        }
    }

    #[tokio::test]
    async fn login_and_logout_update_auth_state() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/User/Login");
            then.status(200).json_body(login_envelope_json(200));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/Employee/GetEmployeeById/7");
            then.status(200).json_body(employee_json(7));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"))
            .with_session(SessionStore::in_memory());

        login_request(credentials(), &api, set_state).await.unwrap();

        let snapshot = state.get();
        assert!(snapshot.is_authenticated);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.full_name.as_deref(), Some("Ana Torres"));
        assert_eq!(snapshot.menu.len(), 1);
        assert_eq!(snapshot.menu[0].path, "/menu/activities");

        logout(api.session(), set_state);
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(api.session().token().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_login_leaves_state_logged_out() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/User/Login");
            then.status(400).json_body(json!({ "message": "Bad" }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"))
            .with_session(SessionStore::in_memory());

        let err = login_request(credentials(), &api, set_state)
            .await
            .unwrap_err();
        assert_eq!(err.error, "La solicitud contiene datos inválidos.");
        assert_eq!(state.get(), AuthState::default());
        runtime.dispose();
    }
}
