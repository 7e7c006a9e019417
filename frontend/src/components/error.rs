use crate::api::ApiError;
use leptos::*;

/// Backend-provided explanation attached to a canned status message, if any.
fn backend_detail(error: &ApiError) -> Option<String> {
    error
        .details
        .as_ref()
        .and_then(|d| d.get("message"))
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty() && *m != error.error)
        .map(str::to_string)
}

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().and_then(|e| backend_detail(&e)).map(|detail| {
                    view! { <div class="text-sm">{detail}</div> }
                })}
            </div>
        </Show>
    }
}
