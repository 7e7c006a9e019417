use super::{repository, utils};
use crate::{
    api::{Client, ClientRequest},
    components::{
        confirm_dialog::ConfirmDialog,
        feedback::{FeedbackMessages, MessageState},
        forms::TextField,
        table::{use_paged_list, DataTable, TableToolbar},
    },
    pages::{
        crud::{self, EditorModal, EditorState},
        person_form::PersonFields,
    },
    state::auth::use_api_client,
};
use leptos::*;

#[component]
pub fn ClientsPage() -> impl IntoView {
    let api = use_api_client();
    let list = use_paged_list(move |query| {
        let api = api.clone();
        async move { repository::fetch_page(&api, &query).await }
    });
    let messages = MessageState::default();
    let editor = EditorState::default();
    let form = utils::ClientFormState::default();
    let save = crud::use_save_action(list, editor, messages, |api, id, request: ClientRequest| async move {
        repository::save(&api, id, &request).await
    });
    let toggle = crud::use_status_toggle(repository::ENTITY, "cliente", list, messages);

    let on_new = Callback::new(move |_| {
        form.reset();
        editor.open_create();
    });
    let on_edit = Callback::new(move |client: Client| {
        form.load(&client);
        editor.open_edit(client.id);
    });
    let on_toggle = Callback::new(move |client: Client| {
        toggle.request(client.id, &client.trade_name, client.status)
    });
    let on_export = Callback::new(move |_| {
        crud::export_table(messages, "Clientes", list, &utils::columns())
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold text-fg">"Clientes"</h1>
            <FeedbackMessages state=messages />
            <TableToolbar query=list.query on_new=on_new on_export=on_export new_label="Nuevo cliente" />
            <DataTable
                list=list
                columns=utils::columns()
                row_key=|c: &Client| c.id
                status=|c: &Client| c.status
                on_edit=on_edit
                on_toggle=on_toggle
            />
            <EditorModal
                editor=editor
                entity="cliente"
                pending=save.pending()
                on_submit=Callback::new(move |_| crud::submit(editor, save, form.validate()))
            >
                <TextField label="Nombre comercial" value=form.trade_name required=true />
                <PersonFields form=form.person />
            </EditorModal>
            <ConfirmDialog request=toggle.confirm on_confirm=Callback::new(move |_| toggle.confirmed()) />
        </div>
    }
}
