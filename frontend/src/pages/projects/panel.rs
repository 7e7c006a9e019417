use super::{repository, utils};
use crate::{
    api::{Project, ProjectRequest},
    components::{
        confirm_dialog::ConfirmDialog,
        feedback::{FeedbackMessages, MessageState},
        forms::{NumberField, SelectField, TextField},
        table::{use_paged_list, DataTable, TableToolbar},
    },
    pages::crud::{self, EditorModal, EditorState},
    state::auth::use_api_client,
};
use leptos::*;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let api = use_api_client();
    let list = {
        let api = api.clone();
        use_paged_list(move |query| {
            let api = api.clone();
            async move { repository::fetch_page(&api, &query).await }
        })
    };
    let clients = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move { repository::fetch_clients(&api).await.unwrap_or_default() }
            },
        )
    };
    let leaders = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { repository::fetch_leaders(&api).await.unwrap_or_default() }
        },
    );
    let client_options = Signal::derive(move || {
        clients.with(|c| c.as_deref().map(utils::client_options).unwrap_or_default())
    });
    let leader_options = Signal::derive(move || {
        leaders.with(|l| l.as_deref().map(utils::leader_options).unwrap_or_default())
    });

    let messages = MessageState::default();
    let editor = EditorState::default();
    let form = utils::ProjectFormState::default();
    let save = crud::use_save_action(list, editor, messages, |api, id, request: ProjectRequest| async move {
        repository::save(&api, id, &request).await
    });
    let toggle = crud::use_status_toggle(repository::ENTITY, "proyecto", list, messages);

    let on_new = Callback::new(move |_| {
        form.reset();
        editor.open_create();
    });
    let on_edit = Callback::new(move |project: Project| {
        form.load(&project);
        editor.open_edit(project.id);
    });
    let on_toggle = Callback::new(move |project: Project| {
        toggle.request(project.id, &project.name, project.status)
    });
    let on_export = Callback::new(move |_| {
        crud::export_table(messages, "Proyectos", list, &utils::columns())
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold text-fg">"Proyectos"</h1>
            <FeedbackMessages state=messages />
            <TableToolbar query=list.query on_new=on_new on_export=on_export new_label="Nuevo proyecto" />
            <DataTable
                list=list
                columns=utils::columns()
                row_key=|p: &Project| p.id
                status=|p: &Project| p.status
                on_edit=on_edit
                on_toggle=on_toggle
            />
            <EditorModal
                editor=editor
                entity="proyecto"
                pending=save.pending()
                on_submit=Callback::new(move |_| crud::submit(editor, save, form.validate()))
            >
                <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                    <TextField label="Código" value=form.code required=true />
                    <TextField label="Nombre" value=form.name required=true />
                    <SelectField label="Cliente" value=form.client_id options=client_options required=true />
                    <SelectField
                        label="Líder"
                        value=form.leader_id
                        options=leader_options
                        placeholder="Sin líder"
                    />
                    <TextField label="Fecha de inicio" value=form.start_date input_type="date" required=true />
                    <TextField label="Fecha de fin" value=form.end_date input_type="date" />
                    <NumberField label="Presupuesto" value=form.budget step="0.01" min=0.0 />
                </div>
            </EditorModal>
            <ConfirmDialog request=toggle.confirm on_confirm=Callback::new(move |_| toggle.confirmed()) />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn projects_page_renders_toolbar() {
        let html = render_to_string(|| view! { <ProjectsPage /> });
        assert!(html.contains("Proyectos"));
        assert!(html.contains("Nuevo proyecto"));
    }
}
