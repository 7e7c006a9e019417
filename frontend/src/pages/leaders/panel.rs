use super::{repository, utils};
use crate::{
    api::{Leader, LeaderRequest},
    components::{
        confirm_dialog::ConfirmDialog,
        feedback::{FeedbackMessages, MessageState},
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
pub fn LeadersPage() -> impl IntoView {
    let api = use_api_client();
    let list = use_paged_list(move |query| {
        let api = api.clone();
        async move { repository::fetch_page(&api, &query).await }
    });
    let messages = MessageState::default();
    let editor = EditorState::default();
    let form = utils::LeaderFormState::default();
    let save = crud::use_save_action(
        list,
        editor,
        messages,
        |api, id, request: LeaderRequest| async move { repository::save(&api, id, &request).await },
    );
    let toggle = crud::use_status_toggle(repository::ENTITY, "líder", list, messages);

    let on_new = Callback::new(move |_| {
        form.reset();
        editor.open_create();
    });
    let on_edit = Callback::new(move |leader: Leader| {
        form.load(&leader);
        editor.open_edit(leader.id);
    });
    let on_toggle = Callback::new(move |leader: Leader| {
        toggle.request(leader.id, &leader.person.full_name(), leader.status)
    });
    let on_export = Callback::new(move |_| {
        crud::export_table(messages, "Líderes", list, &utils::columns())
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold text-fg">"Líderes"</h1>
            <FeedbackMessages state=messages />
            <TableToolbar query=list.query on_new=on_new on_export=on_export new_label="Nuevo líder" />
            <DataTable
                list=list
                columns=utils::columns()
                row_key=|l: &Leader| l.id
                status=|l: &Leader| l.status
                on_edit=on_edit
                on_toggle=on_toggle
            />
            <EditorModal
                editor=editor
                entity="líder"
                pending=save.pending()
                on_submit=Callback::new(move |_| crud::submit(editor, save, form.validate()))
            >
                <PersonFields form=form.person />
            </EditorModal>
            <ConfirmDialog request=toggle.confirm on_confirm=Callback::new(move |_| toggle.confirmed()) />
        </div>
    }
}
