use super::view_model::use_login_view_model;
use crate::components::{
    error::InlineErrorMessage,
    forms::{CheckboxField, TextField},
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let pending = vm.login_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">"Time Report"</h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">
                        "Ingrese sus credenciales para continuar"
                    </p>
                </div>
                <form class="mt-8 space-y-4" on:submit=on_submit>
                    <TextField
                        label="Correo"
                        value=vm.form.email
                        input_type="email"
                        placeholder="usuario@empresa.com"
                        required=true
                    />
                    <TextField
                        label="Contraseña"
                        value=vm.form.password
                        input_type="password"
                        required=true
                    />
                    <CheckboxField label="Recordar correo" checked=vm.form.remember />
                    <InlineErrorMessage error=vm.error />
                    <button
                        type="submit"
                        class="w-full flex justify-center py-2 px-4 rounded-md text-sm font-medium text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::session::SessionStore;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_panel_renders_fields() {
        let html = render_to_string(|| {
            provide_context(SessionStore::in_memory());
            view! { <LoginPanel /> }
        });
        assert!(html.contains("Correo"));
        assert!(html.contains("Contraseña"));
        assert!(html.contains("Recordar correo"));
        assert!(html.contains("Ingresar"));
    }
}
