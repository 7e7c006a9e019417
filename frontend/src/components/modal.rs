use leptos::ev::KeyboardEvent;
use leptos::*;

/// Form dialog shared by the CRUD pages. Escape and the backdrop both close it.
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let children = store_value(children);
    let title = store_value(title);
    view! {
        <Show when=move || open.get()>
            <div class="fixed inset-0 z-50 flex items-end sm:items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Cerrar"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_close.call(())
                ></button>
                <div
                    class="relative z-[51] w-full max-w-2xl max-h-[90vh] overflow-y-auto rounded-lg bg-surface-elevated shadow-xl border border-border"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_close.call(());
                        }
                    }
                >
                    <div class="flex items-center justify-between px-6 py-4 border-b border-border">
                        <h2 class="text-lg font-semibold text-fg">{move || title.with_value(|title| title.get())}</h2>
                        <button
                            type="button"
                            class="text-fg-muted hover:text-fg"
                            aria-label="Cerrar"
                            on:click=move |_| on_close.call(())
                        >
                            <span class="material-icons" aria-hidden="true">"close"</span>
                        </button>
                    </div>
                    <div class="px-6 py-4">{move || children.with_value(|children| children())}</div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn modal_renders_title_and_body_when_open() {
        let html = render_to_string(|| {
            view! {
                <Modal open=Signal::derive(|| true) title="Nuevo cliente" on_close=Callback::new(|_| {})>
                    <p>"Cuerpo"</p>
                </Modal>
            }
        });
        assert!(html.contains("Nuevo cliente"));
        assert!(html.contains("Cuerpo"));
        assert!(html.contains("role=\"dialog\""));
    }

    #[test]
    fn modal_hidden_when_closed() {
        let html = render_to_string(|| {
            view! {
                <Modal open=Signal::derive(|| false) title="Oculto" on_close=Callback::new(|_| {})>
                    <p>"Cuerpo"</p>
                </Modal>
            }
        });
        assert!(!html.contains("Oculto"));
    }
}
