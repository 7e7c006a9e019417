//! Wiring shared by the list/form pages: the editor modal state, the save
//! action, the status toggle and CSV export of the visible rows.

use crate::{
    api::{ActionResult, ApiClient, ApiError},
    components::{
        confirm_dialog::ConfirmRequest,
        error::InlineErrorMessage,
        feedback::MessageState,
        modal::Modal,
        table::{apply_columns, column_rows, Column, PagedList},
    },
    state::auth::use_api_client,
    utils::{self, export},
};
use leptos::{ev::SubmitEvent, *};
use std::future::Future;

/// Modal form state. `editing_id` is `None` while creating.
#[derive(Clone, Copy)]
pub struct EditorState {
    pub open: RwSignal<bool>,
    pub editing_id: RwSignal<Option<i64>>,
    pub error: RwSignal<Option<ApiError>>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            open: create_rw_signal(false),
            editing_id: create_rw_signal(None),
            error: create_rw_signal(None),
        }
    }
}

impl EditorState {
    pub fn open_create(&self) {
        self.error.set(None);
        self.editing_id.set(None);
        self.open.set(true);
    }

    pub fn open_edit(&self, id: i64) {
        self.error.set(None);
        self.editing_id.set(Some(id));
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
        self.editing_id.set(None);
        self.error.set(None);
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.get().is_some()
    }

    pub fn title(&self, entity: &str) -> String {
        if self.is_editing() {
            format!("Editar {}", entity)
        } else {
            format!("Nuevo {}", entity)
        }
    }
}

/// Dispatches a validated form or keeps the editor open with the error.
pub fn submit<R: Clone + 'static>(
    editor: EditorState,
    action: SaveAction<R>,
    validated: Result<R, ApiError>,
) {
    if action.pending().get_untracked() {
        return;
    }
    match validated {
        Ok(request) => {
            editor.error.set(None);
            action.dispatch((editor.editing_id.get_untracked(), request));
        }
        Err(err) => editor.error.set(Some(err)),
    }
}

pub type SaveAction<R> = Action<(Option<i64>, R), Result<ActionResult, ApiError>>;

/// Create-or-update action. Success closes the editor and reloads the list,
/// failures stay inside the modal.
pub fn use_save_action<T, R, F, Fut>(
    list: PagedList<T>,
    editor: EditorState,
    messages: MessageState,
    save: F,
) -> SaveAction<R>
where
    T: Clone + 'static,
    R: Clone + 'static,
    F: Fn(ApiClient, Option<i64>, R) -> Fut + 'static,
    Fut: Future<Output = Result<ActionResult, ApiError>> + 'static,
{
    let api = use_api_client();
    let action = create_action(move |(id, request): &(Option<i64>, R)| {
        save(api.clone(), *id, request.clone())
    });
    create_effect(move |_| match action.value().get() {
        Some(Ok(result)) => {
            messages.set_success(
                result
                    .message
                    .unwrap_or_else(|| "Registro guardado correctamente".to_string()),
            );
            editor.close();
            list.refresh();
        }
        Some(Err(err)) => editor.error.set(Some(err)),
        None => {}
    });
    action
}

/// Soft delete. Deactivation waits for confirmation, activation does not.
#[derive(Clone, Copy)]
pub struct StatusToggle {
    pub confirm: RwSignal<Option<ConfirmRequest>>,
    label: &'static str,
    pending: StoredValue<Option<(i64, bool)>>,
    action: Action<(i64, bool), Result<ActionResult, ApiError>>,
}

impl StatusToggle {
    pub fn request(&self, id: i64, name: &str, active_now: bool) {
        let activate = !active_now;
        match ConfirmRequest::for_status_change(self.label, name, activate) {
            Some(confirm) => {
                self.pending.set_value(Some((id, activate)));
                self.confirm.set(Some(confirm));
            }
            None => self.action.dispatch((id, activate)),
        }
    }

    pub fn confirmed(&self) {
        if let Some(input) = self.pending.get_value() {
            self.pending.set_value(None);
            self.action.dispatch(input);
        }
    }

    pub fn busy(&self) -> Signal<bool> {
        self.action.pending().into()
    }
}

/// `entity` is the REST resource name, `label` how the dialog names it.
pub fn use_status_toggle<T: Clone + 'static>(
    entity: &'static str,
    label: &'static str,
    list: PagedList<T>,
    messages: MessageState,
) -> StatusToggle {
    let api = use_api_client();
    let action = create_action(move |(id, status): &(i64, bool)| {
        let api = api.clone();
        let (id, status) = (*id, *status);
        async move { api.change_status(entity, id, status).await }
    });
    create_effect(move |_| {
        if let Some(result) = action.value().get() {
            messages.report(&result, "Estado actualizado correctamente");
            if result.is_ok() {
                list.refresh();
            }
        }
    });
    StatusToggle {
        confirm: create_rw_signal(None),
        label,
        pending: store_value(None),
        action,
    }
}

/// Downloads `rows` as `<base>.csv`.
pub fn export_rows(
    messages: MessageState,
    base_name: &str,
    headers: &[&str],
    rows: Vec<Vec<String>>,
) {
    let outcome = export::rows_to_csv(headers, &rows)
        .map_err(|err| err.to_string())
        .and_then(|csv| {
            utils::trigger_csv_download(&export::export_file_name(base_name, "csv"), &csv)
        });
    if let Err(err) = outcome {
        log::error!("export failed: {}", err);
        messages.set_error(ApiError::unknown("No se pudo exportar la información."));
    }
}

/// Exports the rows currently visible in a list table.
pub fn export_table<T: Clone + 'static>(
    messages: MessageState,
    base_name: &str,
    list: PagedList<T>,
    columns: &[Column<T>],
) {
    let rows = apply_columns(&list.items(), &list.query.get_untracked(), columns);
    if rows.is_empty() {
        messages.set_error(ApiError::validation("No hay registros para exportar."));
        return;
    }
    let headers: Vec<&str> = columns.iter().map(|column| column.header).collect();
    export_rows(messages, base_name, &headers, column_rows(columns, &rows));
}

/// The create/edit modal with its error slot and form buttons.
#[component]
pub fn EditorModal(
    editor: EditorState,
    entity: &'static str,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let children = store_value(children);
    let title = Signal::derive(move || editor.title(entity));
    view! {
        <Modal open=editor.open title=title on_close=Callback::new(move |_| editor.close())>
            <form
                class="space-y-4"
                on:submit=move |ev: SubmitEvent| {
                    ev.prevent_default();
                    on_submit.call(());
                }
            >
                {move || children.with_value(|children| children())}
                <InlineErrorMessage error=editor.error />
                <div class="flex justify-end gap-2">
                    <button
                        type="button"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-surface-muted text-fg"
                        on:click=move |_| editor.close()
                    >
                        "Cancelar"
                    </button>
                    <button
                        type="submit"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        "Guardar"
                    </button>
                </div>
            </form>
        </Modal>
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Sí"
    } else {
        "No"
    }
}

pub fn or_dash(value: Option<impl ToString>) -> String {
    value
        .map(|v| v.to_string())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_dash_fills_blanks() {
        assert_eq!(or_dash(Some("Alfa")), "Alfa");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(None::<String>), "-");
        assert_eq!(or_dash(Some(12.5)), "12.5");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn editor_title_follows_mode() {
        with_runtime(|| {
            let editor = EditorState::default();
            editor.open_create();
            assert!(editor.open.get());
            assert_eq!(editor.title("cliente"), "Nuevo cliente");
            editor.open_edit(4);
            assert_eq!(editor.title("cliente"), "Editar cliente");
            editor.close();
            assert!(!editor.open.get());
            assert!(editor.editing_id.get().is_none());
        });
    }
}
