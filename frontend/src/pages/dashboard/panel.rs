use super::{
    utils::{format_hours, MonthSummary},
    view_model::use_dashboard_view_model,
};
use crate::components::{
    empty_state::EmptyState, error::InlineErrorMessage, layout::LoadingSpinner,
};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();
    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-fg">"Dashboard"</h1>
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
                </div>
            </div>
            <Suspense fallback=|| view! { <LoadingSpinner /> }>
                {move || vm.summary.get().map(|result| match result {
                    Ok(summary) => view! { <SummaryView summary=summary /> }.into_view(),
                    Err(err) => {
                        view! { <InlineErrorMessage error=Signal::derive(move || Some(err.clone())) /> }
                            .into_view()
                    }
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn SummaryCard(#[prop(into)] label: String, value: String) -> impl IntoView {
    view! {
        <div class="rounded-lg bg-surface-elevated border border-border p-4 shadow-sm">
            <div class="text-sm text-fg-muted">{label}</div>
            <div class="mt-1 text-2xl font-semibold text-fg">{value}</div>
        </div>
    }
}

#[component]
pub fn SummaryView(summary: MonthSummary) -> impl IntoView {
    let bars = summary
        .per_project
        .iter()
        .map(|project| {
            let width = format!("width: {:.0}%", summary.bar_width(project.hours));
            view! {
                <li class="space-y-1">
                    <div class="flex justify-between text-sm">
                        <span class="text-fg">{project.name.clone()}</span>
                        <span class="text-fg-muted">{format_hours(project.hours)}</span>
                    </div>
                    <div class="h-2 rounded bg-surface-muted">
                        <div class="h-2 rounded bg-action-primary-bg" style=width></div>
                    </div>
                </li>
            }
        })
        .collect_view();
    let has_projects = !summary.per_project.is_empty();

    view! {
        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
            <SummaryCard label="Horas registradas" value=format_hours(summary.total_hours) />
            <SummaryCard label="Horas facturables" value=format_hours(summary.billable_hours) />
            <SummaryCard
                label="% facturable"
                value=format!("{:.0}%", summary.billable_percentage())
            />
            <SummaryCard label="Días con actividad" value=summary.days_with_activity.to_string() />
        </div>
        <section class="rounded-lg bg-surface-elevated border border-border p-4">
            <h2 class="text-lg font-semibold text-fg mb-3">"Horas por proyecto"</h2>
            {if has_projects {
                view! { <ul class="space-y-3">{bars}</ul> }.into_view()
            } else {
                view! { <EmptyState title="Sin actividades en este mes" icon="insights" /> }.into_view()
            }}
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::pages::dashboard::utils::ProjectHours;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn summary_view_lists_projects() {
        let html = render_to_string(|| {
            let summary = MonthSummary {
                total_hours: 12.0,
                billable_hours: 9.0,
                days_with_activity: 2,
                per_project: vec![
                    ProjectHours {
                        project_id: 1,
                        name: "Alfa".into(),
                        hours: 9.0,
                    },
                    ProjectHours {
                        project_id: 2,
                        name: "Soporte".into(),
                        hours: 3.0,
                    },
                ],
            };
            view! { <SummaryView summary=summary /> }
        });
        assert!(html.contains("12 h"));
        assert!(html.contains("75%"));
        assert!(html.contains("Alfa"));
        assert!(html.contains("width: 33%"));
    }

    #[test]
    fn summary_view_without_projects_shows_empty_state() {
        let html = render_to_string(|| view! { <SummaryView summary=MonthSummary::default() /> });
        assert!(html.contains("Sin actividades en este mes"));
    }
}
