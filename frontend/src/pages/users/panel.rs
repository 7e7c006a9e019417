use super::{repository, utils};
use crate::{
    api::{User, UserRequest},
    components::{
        confirm_dialog::ConfirmDialog,
        feedback::{FeedbackMessages, MessageState},
        forms::{CheckboxGroup, SelectField, TextField},
        table::{use_paged_list, DataTable, TableToolbar},
    },
    pages::crud::{self, EditorModal, EditorState},
    state::auth::use_api_client,
};
use leptos::*;

#[component]
pub fn UsersPage() -> impl IntoView {
    let api = use_api_client();
    let list = {
        let api = api.clone();
        use_paged_list(move |query| {
            let api = api.clone();
            async move { repository::fetch_page(&api, &query).await }
        })
    };
    let employees = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move { repository::fetch_employees(&api).await.unwrap_or_default() }
            },
        )
    };
    let roles = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { repository::fetch_roles(&api).await.unwrap_or_default() }
        },
    );
    let employee_options = Signal::derive(move || {
        employees.with(|e| e.as_deref().map(utils::employee_options).unwrap_or_default())
    });
    let role_options = Signal::derive(move || {
        roles.with(|r| r.as_deref().map(utils::role_options).unwrap_or_default())
    });

    let messages = MessageState::default();
    let editor = EditorState::default();
    let form = utils::UserFormState::default();
    let save = crud::use_save_action(list, editor, messages, |api, id, request: UserRequest| async move {
        repository::save(&api, id, &request).await
    });
    let toggle = crud::use_status_toggle(repository::ENTITY, "usuario", list, messages);

    let on_new = Callback::new(move |_| {
        form.reset();
        editor.open_create();
    });
    let on_edit = Callback::new(move |user: User| {
        form.load(&user);
        editor.open_edit(user.id);
    });
    let on_toggle = Callback::new(move |user: User| toggle.request(user.id, &user.email, user.status));
    let on_export = Callback::new(move |_| {
        crud::export_table(messages, "Usuarios", list, &utils::columns())
    });
    let on_submit = Callback::new(move |_| {
        let creating = editor.editing_id.get_untracked().is_none();
        crud::submit(editor, save, form.validate(creating))
    });
    let password_label = Signal::derive(move || {
        if editor.is_editing() {
            "Contraseña (dejar vacío para conservarla)"
        } else {
            "Contraseña"
        }
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold text-fg">"Usuarios"</h1>
            <FeedbackMessages state=messages />
            <TableToolbar query=list.query on_new=on_new on_export=on_export new_label="Nuevo usuario" />
            <DataTable
                list=list
                columns=utils::columns()
                row_key=|u: &User| u.id
                status=|u: &User| u.status
                on_edit=on_edit
                on_toggle=on_toggle
            />
            <EditorModal editor=editor entity="usuario" pending=save.pending() on_submit=on_submit>
                <TextField label="Correo" value=form.email input_type="email" required=true />
                {move || {
                    view! {
                        <TextField
                            label=password_label.get()
                            value=form.password
                            input_type="password"
                            required=!editor.is_editing()
                        />
                    }
                }}
                <SelectField
                    label="Colaborador"
                    value=form.employee_id
                    options=employee_options
                    placeholder="Sin colaborador"
                />
                <CheckboxGroup label="Roles" options=role_options selected=form.role_ids required=true />
            </EditorModal>
            <ConfirmDialog request=toggle.confirm on_confirm=Callback::new(move |_| toggle.confirmed()) />
        </div>
    }
}
