use crate::{
    state::{
        auth::{self, use_auth},
        menu::MenuEntry,
    },
    utils::navigation,
};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);
    let display_name = move || auth.get().display_name();
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    {
        create_effect(move |_| {
            if logout_action.value().get().is_some() {
                navigation::redirect_to(navigation::LOGIN_PATH);
            }
        });
    }
    let on_logout = {
        move |_| {
            if logout_pending.get_untracked() {
                return;
            }
            set_menu_open.set(false);
            logout_action.dispatch(());
        }
    };
    let toggle_menu = { move |_| set_menu_open.update(|open| *open = !*open) };
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-3">
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get()
                            aria-controls="side-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "Cerrar menú" } else { "Abrir menú" }}
                            </span>
                            <i class="fas fa-bars"></i>
                        </button>
                        <h1 class="text-xl font-semibold text-fg">"Time Report"</h1>
                    </div>
                    <div class="flex items-center gap-4">
                        <span class="text-sm text-fg-muted">{display_name}</span>
                        <button
                            on:click=on_logout
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                            disabled={move || logout_pending.get()}
                        >
                            "Cerrar sesión"
                        </button>
                    </div>
                </div>
            </div>
            <Show when=move || menu_open.get()>
                <div id="side-nav" class="lg:hidden border-t border-border">
                    <SideMenu on_navigate=Callback::new(move |_| set_menu_open.set(false)) />
                </div>
            </Show>
        </header>
    }
}

#[component]
pub fn SideMenu(#[prop(optional)] on_navigate: Option<Callback<()>>) -> impl IntoView {
    let (auth, _) = use_auth();
    let entries = create_memo(move |_| auth.get().menu);
    view! {
        <nav class="px-4 py-3 space-y-1">
            <For
                each=move || entries.get()
                key=|entry: &MenuEntry| entry.id
                children=move |entry: MenuEntry| {
                    view! {
                        <a
                            href=entry.path.clone()
                            class="flex items-center gap-2 text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                            on:click=move |_| {
                                if let Some(cb) = on_navigate {
                                    cb.call(());
                                }
                            }
                        >
                            <span class="material-icons text-base">{entry.icon.clone()}</span>
                            {entry.label.clone()}
                        </a>
                    }
                }
            />
        </nav>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <div class="max-w-7xl mx-auto flex">
                <aside class="hidden lg:block w-56 shrink-0 border-r border-border min-h-[calc(100vh-4rem)]">
                    <SideMenu />
                </aside>
                <main class="flex-1 py-6 px-4 sm:px-6 lg:px-8">
                    {children()}
                </main>
            </div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{module, provide_auth, signed_in_state};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_shows_full_name_and_logout() {
        let html = render_to_string(move || {
            provide_auth(signed_in_state(&["Colaborador"], vec![]));
            view! { <Header /> }
        });
        assert!(html.contains("Ana Torres"));
        assert!(html.contains("Cerrar sesión"));
    }

    #[test]
    fn side_menu_lists_role_entries() {
        let html = render_to_string(move || {
            provide_auth(signed_in_state(
                &["Administrador"],
                vec![module(1, "/menu/clients", 5), module(2, "/menu/roles", 9)],
            ));
            view! { <SideMenu /> }
        });
        assert!(html.contains("/menu/clients"));
        assert!(html.contains("/menu/roles"));
        assert!(!html.contains("/menu/activities"));
    }

    #[test]
    fn collaborator_menu_has_only_activities() {
        let html = render_to_string(move || {
            provide_auth(signed_in_state(&["Colaborador"], vec![]));
            view! { <SideMenu /> }
        });
        assert!(html.contains("/menu/activities"));
        assert!(!html.contains("/menu/projects"));
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || {
            provide_auth(signed_in_state(&["Colaborador"], vec![]));
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="error" />
                    <SuccessMessage message="ok" />
                </div>
            }
        });
        assert!(html.contains("error"));
        assert!(html.contains("ok"));
    }
}
