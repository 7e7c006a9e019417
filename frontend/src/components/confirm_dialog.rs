use leptos::ev::KeyboardEvent;
use leptos::*;

/// What the dialog asks. The dialog is open while a request is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub destructive: bool,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Sí".to_string(),
            destructive: false,
        }
    }

    pub fn destructive(mut self, confirm_label: impl Into<String>) -> Self {
        self.confirm_label = confirm_label.into();
        self.destructive = true;
        self
    }

    /// Status toggles ask before deactivating, never before activating.
    pub fn for_status_change(entity: &str, name: &str, activate: bool) -> Option<Self> {
        if activate {
            return None;
        }
        Some(
            Self::new(
                format!("Desactivar {}", entity),
                format!("¿Está seguro de desactivar \"{}\"?", name),
            )
            .destructive("Desactivar"),
        )
    }
}

#[component]
pub fn ConfirmDialog(
    request: RwSignal<Option<ConfirmRequest>>,
    on_confirm: Callback<()>,
    #[prop(optional, into)] confirm_disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let close = move || request.set(None);
    let confirm = move || {
        request.set(None);
        on_confirm.call(());
    };
    let field = move |pick: fn(&ConfirmRequest) -> String| {
        move || request.with(|r| r.as_ref().map(pick).unwrap_or_default())
    };
    let confirm_class = move || {
        if request.with(|r| r.as_ref().map(|r| r.destructive).unwrap_or(false)) {
            "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
        } else {
            "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
        }
    };

    view! {
        <Show when=move || request.with(Option::is_some)>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Cerrar"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| close()
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="alertdialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            close();
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-fg">{field(|r| r.title.clone())}</h2>
                    <p class="text-sm text-fg-muted">{field(|r| r.message.clone())}</p>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| close()
                        >
                            "No"
                        </button>
                        <button
                            type="button"
                            class=confirm_class
                            disabled=move || confirm_disabled.get()
                            on:click=move |_| confirm()
                        >
                            {field(|r| r.confirm_label.clone())}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_change_only_confirms_deactivation() {
        assert!(ConfirmRequest::for_status_change("cliente", "Andes SA", true).is_none());
        let request = ConfirmRequest::for_status_change("cliente", "Andes SA", false).unwrap();
        assert!(request.destructive);
        assert_eq!(request.confirm_label, "Desactivar");
        assert!(request.message.contains("Andes SA"));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn dialog_renders_stored_request() {
        let html = render_to_string(move || {
            let request = create_rw_signal(Some(ConfirmRequest::new(
                "Confirmación",
                "¿Desea registrar la actividad en un día feriado?",
            )));
            view! { <ConfirmDialog request=request on_confirm=Callback::new(|_| {}) /> }
        });
        assert!(html.contains("role=\"alertdialog\""));
        assert!(html.contains("¿Desea registrar la actividad en un día feriado?"));
        assert!(html.contains("Sí"));
    }

    #[test]
    fn dialog_is_hidden_without_request() {
        let html = render_to_string(move || {
            let request = create_rw_signal(None::<ConfirmRequest>);
            view! { <ConfirmDialog request=request on_confirm=Callback::new(|_| {}) /> }
        });
        assert!(!html.contains("alertdialog"));
    }
}
