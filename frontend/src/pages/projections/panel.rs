use super::{
    utils,
    view_model::{use_projections_view_model, ProjectionsViewModel},
};
use crate::{
    api::PeriodKind,
    components::{
        common::{Button, ButtonVariant},
        empty_state::EmptyState,
        feedback::FeedbackMessages,
        forms::{SelectField, SelectOptions},
    },
};
use leptos::*;

const CELL_INPUT: &str = "w-20 rounded-md border border-form-control-border bg-form-control-bg px-2 py-1 text-sm text-right";

#[component]
pub fn ProjectionsPage() -> impl IntoView {
    let vm = use_projections_view_model();
    let project_value = create_rw_signal(String::new());
    let resource_value = create_rw_signal(String::new());

    let project_options = Signal::derive(move || {
        vm.projects.with(|projects| {
            projects
                .iter()
                .flatten()
                .map(|p| (p.id.to_string(), format!("{} - {}", p.code, p.name)))
                .collect::<SelectOptions>()
        })
    });
    let resource_options = Signal::derive(move || {
        vm.resource_types.with(|types| {
            types
                .iter()
                .flatten()
                .map(|t| (t.id.to_string(), t.name.clone()))
                .collect::<SelectOptions>()
        })
    });
    create_effect(move |previous: Option<String>| {
        let value = project_value.get();
        if previous.as_ref() != Some(&value) {
            vm.select_project(&value);
        }
        value
    });

    let add_resource = move |_| {
        if let Ok(id) = resource_value.get_untracked().parse::<i64>() {
            vm.add_resource(id);
            resource_value.set(String::new());
        }
    };

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold text-fg">"Proyecciones"</h1>
            <FeedbackMessages state=vm.messages />
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <SelectField label="Proyecto" value=project_value options=project_options required=true />
                <div>
                    <label class="block text-sm font-medium text-fg-muted">"Tipo de periodo"</label>
                    <select
                        class="mt-1 block w-full rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
                        on:change=move |ev| vm.set_period_kind(utils::parse_period_kind(&event_target_value(&ev)))
                    >
                        {[PeriodKind::Monthly, PeriodKind::Weekly]
                            .into_iter()
                            .map(|kind| view! {
                                <option
                                    value=utils::period_kind_value(kind)
                                    selected=move || vm.period_kind.get() == kind
                                >
                                    {utils::period_kind_label(kind)}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>
                <div>
                    <label class="block text-sm font-medium text-fg-muted">"Número de periodos"</label>
                    <input
                        type="number"
                        min="1"
                        max=utils::MAX_PERIOD_COUNT.to_string()
                        class="mt-1 block w-full rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
                        prop:value=move || vm.period_count.get().to_string()
                        on:change=move |ev| {
                            let count = event_target_value(&ev).trim().parse().unwrap_or(1);
                            vm.set_period_count(count);
                        }
                    />
                </div>
            </div>
            <Show
                when=move || vm.project_id.get().is_some()
                fallback=|| view! { <EmptyState title="Seleccione un proyecto para ver su proyección." /> }
            >
                <div class="flex flex-col sm:flex-row sm:items-end gap-3">
                    <div class="sm:w-72">
                        <SelectField label="Recurso" value=resource_value options=resource_options />
                    </div>
                    <Button variant=ButtonVariant::Secondary on:click=add_resource>
                        "Agregar recurso"
                    </Button>
                </div>
                <ProjectionTable vm=vm />
                <div class="flex justify-end">
                    <Button
                        variant=ButtonVariant::Primary
                        on:click=move |_| vm.save()
                        loading=Signal::derive(move || vm.save_action.pending().get())
                    >
                        "Guardar proyección"
                    </Button>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ProjectionTable(vm: ProjectionsViewModel) -> impl IntoView {
    let labels = Signal::derive(move || vm.labels());
    let head_cell = "px-3 py-2 text-left text-xs font-medium text-fg-muted uppercase whitespace-nowrap";

    view! {
        <div class="overflow-x-auto rounded-lg border border-border">
            <table class="min-w-full divide-y divide-border text-sm">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class=head_cell>"Recurso"</th>
                        <th class=head_cell>"Costo/hora"</th>
                        <th class=head_cell>"Cantidad"</th>
                        {move || labels.get().into_iter().map(|label| view! { <th class=head_cell>{label}</th> }).collect_view()}
                        <th class=head_cell>"Total horas"</th>
                        <th class=head_cell>"Costo"</th>
                        <th class=head_cell>"% Participación"</th>
                        <th class=head_cell></th>
                    </tr>
                </thead>
                <tbody class="bg-surface-elevated divide-y divide-border">
                    {move || {
                        vm.rows
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, row)| {
                                view! {
                                    <tr>
                                        <td class="px-3 py-2 text-fg whitespace-nowrap">{row.resource_name.clone()}</td>
                                        <td class="px-3 py-2">
                                            <input
                                                type="number"
                                                min="0"
                                                step="0.01"
                                                class=CELL_INPUT
                                                value=row.hourly_cost.to_string()
                                                on:change=move |ev| vm.set_hourly_cost(index, &event_target_value(&ev))
                                            />
                                        </td>
                                        <td class="px-3 py-2">
                                            <input
                                                type="number"
                                                min="0"
                                                step="1"
                                                class=CELL_INPUT
                                                value=row.resource_quantity.to_string()
                                                on:change=move |ev| vm.set_quantity(index, &event_target_value(&ev))
                                            />
                                        </td>
                                        {row
                                            .time_distribution
                                            .iter()
                                            .enumerate()
                                            .map(|(period, hours)| view! {
                                                <td class="px-3 py-2">
                                                    <input
                                                        type="number"
                                                        min="0"
                                                        step="0.5"
                                                        class=CELL_INPUT
                                                        value=hours.to_string()
                                                        on:change=move |ev| vm.set_hours(index, period, &event_target_value(&ev))
                                                    />
                                                </td>
                                            })
                                            .collect_view()}
                                        <td class="px-3 py-2 text-right">{utils::format_amount(row.total_time)}</td>
                                        <td class="px-3 py-2 text-right">{utils::format_amount(row.resource_cost)}</td>
                                        <td class="px-3 py-2 text-right">{format!("{}%", utils::format_amount(row.participation_percentage))}</td>
                                        <td class="px-3 py-2 text-right">
                                            <button
                                                type="button"
                                                class="text-sm text-status-error-text hover:underline"
                                                on:click=move |_| vm.remove_row(index)
                                            >
                                                "Quitar"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
                <tfoot class="bg-surface-muted font-semibold">
                    {move || {
                        let rows = vm.rows.get();
                        let totals = utils::totals(&rows);
                        let per_period = utils::period_totals(&rows, vm.period_count.get());
                        view! {
                            <tr>
                                <td class="px-3 py-2" colspan="3">"Totales"</td>
                                {per_period
                                    .into_iter()
                                    .map(|hours| view! { <td class="px-3 py-2 text-right">{utils::format_amount(hours)}</td> })
                                    .collect_view()}
                                <td class="px-3 py-2 text-right">{utils::format_amount(totals.total_time)}</td>
                                <td class="px-3 py-2 text-right">{utils::format_amount(totals.total_cost)}</td>
                                <td class="px-3 py-2 text-right">
                                    {if rows.is_empty() { "0.00%" } else { "100.00%" }}
                                </td>
                                <td></td>
                            </tr>
                        }
                    }}
                </tfoot>
            </table>
        </div>
    }
}
