pub const LOGIN_PATH: &str = "/login";

#[cfg(target_arch = "wasm32")]
pub fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> Option<String> {
    None
}

/// Full page navigation; the router state is rebuilt from storage on load.
#[cfg(target_arch = "wasm32")]
pub fn redirect_to(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect_to(path: &str) {
    log::debug!("redirect to {} skipped outside the browser", path);
}

pub fn redirect_to_login_if_needed() {
    if current_path().as_deref() == Some(LOGIN_PATH) {
        return;
    }
    redirect_to(LOGIN_PATH);
}
