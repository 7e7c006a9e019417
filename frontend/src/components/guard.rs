use crate::{
    components::layout::LoadingSpinner,
    state::{
        auth::{use_auth, use_session, AuthState},
        session::SessionStore,
    },
    utils::navigation::{self, LOGIN_PATH},
};
use leptos::*;

/// Reachable by every signed-in user regardless of module assignments.
pub const ALWAYS_ALLOWED_PATHS: &[&str] = &["/menu/activities", "/menu/dashboard"];

pub const FALLBACK_PATH: &str = "/menu/activities";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Go to the login page; `clear_session` is set when the token expired.
    Login { clear_session: bool },
    Redirect(&'static str),
}

pub fn route_decision(
    path: &str,
    session: &SessionStore,
    is_authenticated: bool,
    now_secs: i64,
) -> GuardDecision {
    if !is_authenticated {
        return GuardDecision::Login {
            clear_session: false,
        };
    }
    if session.is_token_expired_at(now_secs) {
        return GuardDecision::Login {
            clear_session: true,
        };
    }
    if session.is_admin() {
        return GuardDecision::Allow;
    }
    let always_allowed = ALWAYS_ALLOWED_PATHS
        .iter()
        .any(|allowed| crate::state::session::path_has_prefix(path, allowed));
    if always_allowed || session.check_route_permission(path) {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(FALLBACK_PATH)
    }
}

/// Evaluates the guard and performs its side effects. Returns whether the
/// route may be shown.
pub fn can_activate(
    path: &str,
    session: &SessionStore,
    is_authenticated: bool,
    now_secs: i64,
    navigate: impl Fn(&str),
) -> bool {
    match route_decision(path, session, is_authenticated, now_secs) {
        GuardDecision::Allow => true,
        GuardDecision::Login { clear_session } => {
            if clear_session {
                log::warn!("token expired while opening {}", path);
                session.clear();
            }
            navigate(LOGIN_PATH);
            false
        }
        GuardDecision::Redirect(target) => {
            log::info!("{} is not assigned to this user, redirecting", path);
            navigate(target);
            false
        }
    }
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    create_effect(move |_| {
        let state = auth.get();
        if state.loading || state.is_authenticated {
            return;
        }
        navigation::redirect_to_login_if_needed();
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// Shows `children` only when the signed-in user may open `path`.
#[component]
pub fn RequireRoute(#[prop(into)] path: String, children: ChildrenFn) -> impl IntoView {
    let (auth, set_auth) = use_auth();
    let session = use_session();
    let path = store_value(path);

    let allowed = {
        let session = session.clone();
        create_memo(move |_| {
            let state = auth.get();
            !state.loading
                && route_decision(
                    &path.get_value(),
                    &session,
                    state.is_authenticated,
                    now_secs(),
                ) == GuardDecision::Allow
        })
    };

    create_effect(move |_| {
        let state = auth.get();
        if state.loading {
            return;
        }
        let is_allowed = can_activate(
            &path.get_value(),
            &session,
            state.is_authenticated,
            now_secs(),
            navigation::redirect_to,
        );
        if !is_allowed && state.is_authenticated && !session.has_token() {
            set_auth.set(AuthState::default());
        }
    });

    view! {
        <Show when=move || allowed.get() fallback=|| ()>
            {children()}
        </Show>
    }
}
