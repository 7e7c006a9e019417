use super::{
    utils::{self, CalendarDay, DayStatus},
    view_model::{default_date, use_activities_view_model, ActivitiesViewModel},
};
use crate::{
    api::Activity,
    components::{
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        feedback::FeedbackMessages,
        forms::{options_from, CheckboxField, NumberField, SelectField, TextAreaField, TextField},
        layout::LoadingSpinner,
    },
    pages::crud::EditorModal,
    utils::dates::{self, WEEKDAY_LABELS},
};
use chrono::Datelike;
use leptos::*;

const LEGEND: [DayStatus; 6] = [
    DayStatus::Complete,
    DayStatus::Partial,
    DayStatus::Empty,
    DayStatus::Holiday,
    DayStatus::Weekend,
    DayStatus::Future,
];

#[component]
pub fn ActivitiesPage() -> impl IntoView {
    let vm = use_activities_view_model();
    let on_confirm = Callback::new(move |_| vm.confirmed());

    view! {
        <div class="space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-3">
                <h1 class="text-2xl font-bold text-fg">"Actividades"</h1>
                <div class="flex items-center gap-2">
                    <button
                        type="button"
                        class="px-3 py-2 rounded-md border border-border"
                        aria-label="Mes anterior"
                        on:click=move |_| vm.month.update(|m| *m = m.previous())
                    >
                        "‹"
                    </button>
                    <span class="min-w-[10rem] text-center font-semibold text-fg">
                        {move || vm.month.get().label()}
                    </span>
                    <button
                        type="button"
                        class="px-3 py-2 rounded-md border border-border"
                        aria-label="Mes siguiente"
                        on:click=move |_| vm.month.update(|m| *m = m.next())
                    >
                        "›"
                    </button>
                    <button
                        type="button"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-surface-muted text-fg border border-border"
                        on:click=move |_| vm.export()
                    >
                        "Exportar"
                    </button>
                    <button
                        type="button"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text"
                        on:click=move |_| vm.open_day(default_date(vm.month.get_untracked(), dates::today()))
                    >
                        "Nueva actividad"
                    </button>
                </div>
            </div>
            <FeedbackMessages state=vm.messages />
            <Legend />
            <Suspense fallback=|| view! { <LoadingSpinner /> }>
                {move || match vm.data.get() {
                    Some(Err(err)) => view! { <InlineErrorMessage error=Signal::derive(move || Some(err.clone())) /> }.into_view(),
                    _ => view! { <MonthCalendar vm=vm /> <ActivityList vm=vm /> }.into_view(),
                }}
            </Suspense>
            <ActivityEditor vm=vm />
            <ConfirmDialog request=vm.confirm on_confirm=on_confirm />
        </div>
    }
}

#[component]
fn Legend() -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-2 text-xs">
            {LEGEND
                .iter()
                .map(|status| view! {
                    <span class=format!("px-2 py-1 rounded {}", status.css_class())>{status.label()}</span>
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn MonthCalendar(vm: ActivitiesViewModel) -> impl IntoView {
    let weeks = move || {
        let data = vm.month_data();
        utils::month_grid(vm.month.get(), &data.activities, &data.holidays, dates::today())
    };
    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full table-fixed border-separate border-spacing-1">
                <thead>
                    <tr>
                        {WEEKDAY_LABELS
                            .iter()
                            .map(|label| view! { <th class="text-xs font-medium text-fg-muted">{*label}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        weeks()
                            .into_iter()
                            .map(|week| {
                                view! {
                                    <tr>
                                        {week
                                            .into_iter()
                                            .map(|cell| match cell {
                                                Some(day) => view! { <DayCell vm=vm day=day /> }.into_view(),
                                                None => view! { <td></td> }.into_view(),
                                            })
                                            .collect_view()}
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn DayCell(vm: ActivitiesViewModel, day: CalendarDay) -> impl IntoView {
    let date = day.date;
    let hours = (day.hours > 0.0).then(|| format!("{} h", day.hours));
    view! {
        <td>
            <button
                type="button"
                class=format!("w-full h-16 rounded-md p-1 text-left {}", day.status.css_class())
                title=day.status.label()
                on:click=move |_| vm.open_day(date)
            >
                <div class="text-sm font-semibold">{date.day()}</div>
                <div class="text-xs">{hours}</div>
            </button>
        </td>
    }
}

#[component]
fn ActivityList(vm: ActivitiesViewModel) -> impl IntoView {
    let rows = move || {
        let mut activities: Vec<Activity> = vm
            .month_data()
            .activities
            .into_iter()
            .filter(|a| a.status)
            .collect();
        activities.sort_by_key(|a| a.activity_date);
        activities
    };
    let project = move |id: i64| {
        let names = vm.project_names.get().unwrap_or_default();
        utils::project_name(&names, id)
    };
    view! {
        <Show
            when=move || !rows().is_empty()
            fallback=|| view! { <EmptyState title="Sin actividades en este mes" icon="event_busy" /> }
        >
            <table class="min-w-full divide-y divide-border">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class="px-4 py-2 text-left text-xs font-medium text-fg-muted uppercase">"Fecha"</th>
                        <th class="px-4 py-2 text-left text-xs font-medium text-fg-muted uppercase">"Proyecto"</th>
                        <th class="px-4 py-2 text-left text-xs font-medium text-fg-muted uppercase">"Horas"</th>
                        <th class="px-4 py-2 text-left text-xs font-medium text-fg-muted uppercase">"Descripción"</th>
                        <th class="px-4 py-2"></th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    <For
                        each=rows
                        key=|a: &Activity| (a.id, a.activity_date, a.hours_quantity.to_bits())
                        children=move |activity: Activity| {
                            let edit = activity.clone();
                            view! {
                                <tr>
                                    <td class="px-4 py-2 text-sm">{dates::display_date(activity.activity_date)}</td>
                                    <td class="px-4 py-2 text-sm">{project(activity.project_id)}</td>
                                    <td class="px-4 py-2 text-sm">{activity.hours_quantity}</td>
                                    <td class="px-4 py-2 text-sm">{activity.activity_description.clone()}</td>
                                    <td class="px-4 py-2 text-right">
                                        <button
                                            type="button"
                                            class="text-sm text-action-primary-bg hover:underline"
                                            on:click=move |_| vm.open_edit(&edit)
                                        >
                                            "Editar"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </Show>
    }
}

#[component]
fn ActivityEditor(vm: ActivitiesViewModel) -> impl IntoView {
    let pending = vm.save_action.pending();
    let project_options = Signal::derive(move || {
        let mut names: Vec<(i64, String)> = vm
            .project_names
            .get()
            .unwrap_or_default()
            .into_iter()
            .collect();
        names.sort_by(|a, b| a.1.cmp(&b.1));
        options_from(&names, |p| p.0.to_string(), |p| p.1.clone())
    });
    let type_options = Signal::derive(move || {
        options_from(
            &vm.activity_types.get().unwrap_or_default(),
            |t| t.id.to_string(),
            |t| t.name.clone(),
        )
    });
    view! {
        <EditorModal
            editor=vm.editor
            entity="registro de actividad"
            pending=pending
            on_submit=Callback::new(move |_| vm.submit())
        >
            <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                <TextField label="Fecha" value=vm.form.date input_type="date" required=true />
                <NumberField label="Horas" value=vm.form.hours required=true step="0.5" min=0.5 max=8.0 />
                <SelectField label="Proyecto" value=vm.form.project_id options=project_options required=true />
                <SelectField label="Tipo de actividad" value=vm.form.activity_type_id options=type_options required=true />
            </div>
            <TextAreaField label="Descripción" value=vm.form.description required=true />
            <TextAreaField label="Notas" value=vm.form.notes rows=2 />
            <CheckboxField label="Facturable" checked=vm.form.billable />
        </EditorModal>
    }
}
