use super::{repository, utils};
use crate::{
    api::Holiday,
    components::{
        confirm_dialog::ConfirmDialog,
        feedback::{FeedbackMessages, MessageState},
        forms::{TextAreaField, TextField},
        table::{use_paged_list, DataTable, TableToolbar},
    },
    pages::crud::{self, EditorModal, EditorState},
    state::auth::use_api_client,
};
use leptos::*;

#[component]
pub fn HolidaysPage() -> impl IntoView {
    let api = use_api_client();
    let list = use_paged_list(move |query| {
        let api = api.clone();
        async move { repository::fetch_page(&api, &query).await }
    });
    let messages = MessageState::default();
    let editor = EditorState::default();
    let form = utils::HolidayFormState::default();
    let save = crud::use_save_action(list, editor, messages, |api, id, holiday: Holiday| async move {
        repository::save(&api, id, holiday).await
    });
    let toggle = crud::use_status_toggle(repository::ENTITY, "feriado", list, messages);

    let on_new = Callback::new(move |_| {
        form.reset();
        editor.open_create();
    });
    let on_edit = Callback::new(move |holiday: Holiday| {
        form.load(&holiday);
        editor.open_edit(holiday.id);
    });
    let on_toggle = Callback::new(move |holiday: Holiday| {
        toggle.request(holiday.id, &holiday.holiday_name, holiday.status)
    });
    let on_export = Callback::new(move |_| {
        crud::export_table(messages, "Feriados", list, &utils::columns())
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold text-fg">"Feriados"</h1>
            <FeedbackMessages state=messages />
            <TableToolbar query=list.query on_new=on_new on_export=on_export new_label="Nuevo feriado" />
            <DataTable
                list=list
                columns=utils::columns()
                row_key=|h: &Holiday| h.id
                status=|h: &Holiday| h.status
                on_edit=on_edit
                on_toggle=on_toggle
            />
            <EditorModal
                editor=editor
                entity="feriado"
                pending=save.pending()
                on_submit=Callback::new(move |_| crud::submit(editor, save, form.validate()))
            >
                <TextField label="Nombre" value=form.holiday_name required=true />
                <TextField label="Fecha" value=form.holiday_date input_type="date" required=true />
                <TextAreaField label="Descripción" value=form.description />
            </EditorModal>
            <ConfirmDialog request=toggle.confirm on_confirm=Callback::new(move |_| toggle.confirmed()) />
        </div>
    }
}
