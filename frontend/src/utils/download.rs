pub const CSV_MIME: &str = "text/csv;charset=utf-8";
pub const XLSM_MIME: &str = "application/vnd.ms-excel.sheet.macroEnabled.12";

pub fn trigger_csv_download(filename: &str, csv_data: &str) -> Result<(), String> {
    trigger_bytes_download(filename, csv_data.as_bytes(), CSV_MIME)
}

/// Saves `bytes` through a temporary object URL and a synthetic anchor click.
#[cfg(target_arch = "wasm32")]
pub fn trigger_bytes_download(filename: &str, bytes: &[u8], mime: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&array, &options)
        .map_err(|_| "Failed to create blob".to_string())?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let element = document
        .create_element("a")
        .map_err(|_| "Failed to create link".to_string())?;
    let a = element
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Failed to cast anchor".to_string())?;
    a.set_href(&url);
    a.set_download(filename);
    a.style().set_property("display", "none").ok();
    document
        .body()
        .ok_or("No body")?
        .append_child(&a)
        .map_err(|_| "Append failed".to_string())?;
    a.click();
    a.remove();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn trigger_bytes_download(filename: &str, _bytes: &[u8], _mime: &str) -> Result<(), String> {
    Err(format!("Cannot download {} outside the browser", filename))
}
