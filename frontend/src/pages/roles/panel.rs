use super::{repository, utils};
use crate::{
    api::{Role, RoleRequest},
    components::{
        feedback::{FeedbackMessages, MessageState},
        forms::{CheckboxGroup, TextAreaField, TextField},
        table::{use_paged_list, DataTable, TableToolbar},
    },
    pages::crud::{self, EditorModal, EditorState},
    state::auth::use_api_client,
};
use leptos::*;

/// Roles have no status endpoint, so rows only offer editing.
#[component]
pub fn RolesPage() -> impl IntoView {
    let api = use_api_client();
    let list = {
        let api = api.clone();
        use_paged_list(move |query| {
            let api = api.clone();
            async move { repository::fetch_page(&api, &query).await }
        })
    };
    let modules = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move {
                repository::fetch_modules(&api).await.unwrap_or_else(|err| {
                    log::warn!("could not load modules: {}", err);
                    Vec::new()
                })
            }
        },
    );
    let module_options = Signal::derive(move || {
        modules.with(|m| m.as_deref().map(utils::module_options).unwrap_or_default())
    });

    let messages = MessageState::default();
    let editor = EditorState::default();
    let form = utils::RoleFormState::default();
    let save = crud::use_save_action(list, editor, messages, |api, id, request: RoleRequest| async move {
        repository::save(&api, id, &request).await
    });

    let on_new = Callback::new(move |_| {
        form.reset();
        editor.open_create();
    });
    let on_edit = Callback::new(move |role: Role| {
        form.load(&role);
        editor.open_edit(role.id);
    });
    let on_export = Callback::new(move |_| {
        crud::export_table(messages, "Roles", list, &utils::columns())
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold text-fg">"Roles"</h1>
            <FeedbackMessages state=messages />
            <TableToolbar query=list.query on_new=on_new on_export=on_export new_label="Nuevo rol" />
            <DataTable list=list columns=utils::columns() row_key=|r: &Role| r.id on_edit=on_edit />
            <EditorModal
                editor=editor
                entity="rol"
                pending=save.pending()
                on_submit=Callback::new(move |_| crud::submit(editor, save, form.validate()))
            >
                <TextField label="Nombre" value=form.role_name required=true />
                <TextAreaField label="Descripción" value=form.description />
                <CheckboxGroup label="Módulos" options=module_options selected=form.module_ids required=true />
            </EditorModal>
        </div>
    }
}
