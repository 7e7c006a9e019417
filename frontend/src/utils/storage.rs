#[cfg(target_arch = "wasm32")]
use web_sys::Window;
use web_sys::Storage;

#[cfg(target_arch = "wasm32")]
pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn local_storage() -> Result<Storage, String> {
    Err("No localStorage".to_string())
}
