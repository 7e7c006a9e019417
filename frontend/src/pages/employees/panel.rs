use super::{repository, utils};
use crate::{
    api::{Employee, EmployeeRequest},
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
pub fn EmployeesPage() -> impl IntoView {
    let api = use_api_client();
    let list = use_paged_list(move |query| {
        let api = api.clone();
        async move { repository::fetch_page(&api, &query).await }
    });
    let messages = MessageState::default();
    let editor = EditorState::default();
    let form = utils::EmployeeFormState::default();
    let save = crud::use_save_action(
        list,
        editor,
        messages,
        |api, id, request: EmployeeRequest| async move { repository::save(&api, id, &request).await },
    );
    let toggle = crud::use_status_toggle(repository::ENTITY, "colaborador", list, messages);

    let on_new = Callback::new(move |_| {
        form.reset();
        editor.open_create();
    });
    let on_edit = Callback::new(move |employee: Employee| {
        form.load(&employee);
        editor.open_edit(employee.id);
    });
    let on_toggle = Callback::new(move |employee: Employee| {
        toggle.request(employee.id, &employee.person.full_name(), employee.status)
    });
    let on_export = Callback::new(move |_| {
        crud::export_table(messages, "Colaboradores", list, &utils::columns())
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold text-fg">"Colaboradores"</h1>
            <FeedbackMessages state=messages />
            <TableToolbar query=list.query on_new=on_new on_export=on_export new_label="Nuevo colaborador" />
            <DataTable
                list=list
                columns=utils::columns()
                row_key=|e: &Employee| e.id
                status=|e: &Employee| e.status
                on_edit=on_edit
                on_toggle=on_toggle
            />
            <EditorModal
                editor=editor
                entity="colaborador"
                pending=save.pending()
                on_submit=Callback::new(move |_| crud::submit(editor, save, form.validate()))
            >
                <PersonFields form=form.person />
                <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                    <TextField label="Cargo" value=form.position />
                    <TextField label="Fecha de ingreso" value=form.hire_date input_type="date" />
                </div>
            </EditorModal>
            <ConfirmDialog request=toggle.confirm on_confirm=Callback::new(move |_| toggle.confirmed()) />
        </div>
    }
}
