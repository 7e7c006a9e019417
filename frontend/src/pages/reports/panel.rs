use super::view_model::{read_file_input, use_reports_view_model};
use crate::components::{
    common::{Button, ButtonVariant},
    feedback::FeedbackMessages,
    forms::SelectField,
};
use leptos::*;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let vm = use_reports_view_model();
    let employee_options = Signal::derive(move || vm.employee_options());
    let period_options = Signal::derive(move || vm.period_options());
    let report_pending = vm.report_action.pending();

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-fg">"Reportes"</h1>
            <FeedbackMessages state=vm.messages />
            <section class="rounded-lg border border-border bg-surface-elevated p-4 space-y-4">
                <h2 class="text-lg font-semibold text-fg">"Reporte de actividades"</h2>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <SelectField label="Colaborador" value=vm.form.employee_id options=employee_options required=true />
                    <SelectField label="Periodo" value=vm.form.period_id options=period_options required=true />
                </div>
                <div class="flex justify-end">
                    <Button
                        variant=ButtonVariant::Primary
                        on:click=move |_| vm.download_report()
                        loading=Signal::derive(move || report_pending.get())
                    >
                        {move || if report_pending.get() { "Descargando..." } else { "Descargar reporte" }}
                    </Button>
                </div>
            </section>
            <section class="rounded-lg border border-border bg-surface-elevated p-4 space-y-4">
                <h2 class="text-lg font-semibold text-fg">"Carga masiva de actividades"</h2>
                <p class="text-sm text-fg-muted">
                    "Descargue el modelo, complete las actividades y cárguelo nuevamente."
                </p>
                <div class="flex flex-col md:flex-row md:items-center gap-3">
                    <Button
                        variant=ButtonVariant::Secondary
                        on:click=move |_| vm.download_model()
                        loading=Signal::derive(move || vm.model_loading.active.get())
                    >
                        {move || if vm.model_loading.active.get() { "Descargando..." } else { "Descargar modelo" }}
                    </Button>
                    <input
                        type="file"
                        accept=".xlsm,.xlsx"
                        class="text-sm text-fg"
                        on:change=move |ev| read_file_input(&ev, vm.selected_file, vm.messages)
                    />
                    <Button
                        variant=ButtonVariant::Primary
                        on:click=move |_| vm.upload()
                        disabled=Signal::derive(move || vm.selected_file.with(Option::is_none))
                        loading=Signal::derive(move || vm.upload_loading.active.get())
                    >
                        {move || if vm.upload_loading.active.get() { "Cargando..." } else { "Cargar actividades" }}
                    </Button>
                </div>
                {move || vm.selected_file.with(|file| file.as_ref().map(|file| view! {
                    <p class="text-xs text-fg-muted">{format!("Archivo: {}", file.name)}</p>
                }))}
            </section>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn reports_page_offers_downloads_and_upload() {
        let html = render_to_string(|| view! { <ReportsPage /> });
        assert!(html.contains("Descargar reporte"));
        assert!(html.contains("Descargar modelo"));
        assert!(html.contains("Cargar actividades"));
        assert!(html.contains("type=\"file\""));
    }
}
