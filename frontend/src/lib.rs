use leptos::*;

mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Installs the panic hook and console logger, resolves the runtime config and
/// mounts the application once the API base URL is known.
pub fn boot() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"console logger already initialised".into());
    }
    log::info!("Starting Time Report frontend (wasm)");

    spawn_local(async move {
        let cfg = config::init().await;
        log::info!(
            "Runtime config initialized (api: {}, session check every {}s)",
            cfg.api_base_url,
            cfg.session_check_interval_secs
        );
        router::mount_app();
    });
}
