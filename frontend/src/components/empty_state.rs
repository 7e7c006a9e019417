use leptos::*;

pub const NO_RECORDS: &str = "No se encontraron registros";

#[component]
pub fn EmptyState(
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] description: Option<String>,
    #[prop(optional, into)] icon: Option<String>,
) -> impl IntoView {
    let title = title.unwrap_or_else(|| NO_RECORDS.to_string());
    let icon = icon.unwrap_or_else(|| "inbox".to_string());
    view! {
        <div class="text-center py-12 px-4 rounded-lg border-2 border-dashed border-border-strong bg-surface-muted">
            <span class="material-icons text-4xl text-fg-muted" aria-hidden="true">{icon}</span>
            <h3 class="mt-2 text-sm font-semibold text-fg">{title}</h3>
            {description.map(|desc| view! {
                <p class="mt-1 text-sm text-fg-muted">{desc}</p>
            })}
        </div>
    }
}
