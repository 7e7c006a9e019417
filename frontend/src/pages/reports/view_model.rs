use super::{repository, utils};
use crate::{
    api::{ActionResult, ApiError, CatalogItem, Employee},
    components::{feedback::MessageState, forms::SelectOptions},
    state::auth::use_api_client,
    utils::download::{trigger_bytes_download, XLSM_MIME},
};
use leptos::*;

#[cfg(target_arch = "wasm32")]
type DeadlineTimer = gloo_timers::callback::Timeout;
#[cfg(not(target_arch = "wasm32"))]
type DeadlineTimer = ();

/// A file picked for upload, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content: Vec<u8>,
}

/// Loading flag that also clears itself after the configured deadline.
/// The request keeps running; only the indicator is released.
#[derive(Clone, Copy)]
pub struct DeadlineFlag {
    pub active: RwSignal<bool>,
    timer: StoredValue<Option<DeadlineTimer>>,
}

impl DeadlineFlag {
    fn new() -> Self {
        Self {
            active: create_rw_signal(false),
            timer: store_value(None),
        }
    }

    pub fn start(&self, label: &'static str) {
        self.active.set(true);
        self.timer.set_value(arm_deadline(self.active, label));
    }

    pub fn finish(&self) {
        self.timer.set_value(None);
        self.active.set(false);
    }
}

#[cfg(target_arch = "wasm32")]
fn arm_deadline(active: RwSignal<bool>, label: &'static str) -> Option<DeadlineTimer> {
    let ms = crate::config::current().download_timeout_ms();
    Some(gloo_timers::callback::Timeout::new(ms, move || {
        if active.get_untracked() {
            log::warn!("{} still running after {} ms, releasing the indicator", label, ms);
            active.set(false);
        }
    }))
}

#[cfg(not(target_arch = "wasm32"))]
fn arm_deadline(_active: RwSignal<bool>, _label: &'static str) -> Option<DeadlineTimer> {
    None
}

#[derive(Clone, Copy)]
pub struct ReportsViewModel {
    pub employees: Resource<(), Vec<Employee>>,
    pub periods: Resource<(), Vec<CatalogItem>>,
    pub form: utils::ReportFormState,
    pub messages: MessageState,
    pub selected_file: RwSignal<Option<SelectedFile>>,
    pub model_loading: DeadlineFlag,
    pub upload_loading: DeadlineFlag,
    pub report_action: Action<(i64, i64, String), Result<(), ApiError>>,
    pub model_action: Action<(), Result<(), ApiError>>,
    pub upload_action: Action<Vec<u8>, Result<ActionResult, ApiError>>,
}

fn save_download(file_name: &str, bytes: &[u8]) -> Result<(), ApiError> {
    trigger_bytes_download(file_name, bytes, XLSM_MIME).map_err(|err| {
        log::error!("download failed: {}", err);
        ApiError::unknown("No se pudo descargar el archivo.")
    })
}

impl ReportsViewModel {
    pub fn employee_options(&self) -> SelectOptions {
        self.employees
            .with(|e| e.as_deref().map(utils::employee_options).unwrap_or_default())
    }

    pub fn period_options(&self) -> SelectOptions {
        self.periods
            .with(|p| p.as_deref().map(utils::period_options).unwrap_or_default())
    }

    /// Validated selection plus the file name the report is saved under.
    pub fn report_request(&self) -> Result<(i64, i64, String), ApiError> {
        let selection = self.form.validate()?;
        let employee = utils::option_label(
            &untrack(|| self.employee_options()),
            &selection.employee_id.to_string(),
        )
        .unwrap_or_else(|| format!("Colaborador {}", selection.employee_id));
        let period = utils::option_label(
            &untrack(|| self.period_options()),
            &selection.period_id.to_string(),
        )
        .unwrap_or_else(|| format!("Periodo {}", selection.period_id));
        Ok((
            selection.employee_id,
            selection.period_id,
            utils::report_file_name(&employee, &period),
        ))
    }

    pub fn download_report(&self) {
        if self.report_action.pending().get_untracked() {
            return;
        }
        self.messages.clear();
        match self.report_request() {
            Ok(request) => self.report_action.dispatch(request),
            Err(err) => self.messages.set_error(err),
        }
    }

    pub fn download_model(&self) {
        if self.model_loading.active.get_untracked() {
            return;
        }
        self.messages.clear();
        self.model_loading.start("model download");
        self.model_action.dispatch(());
    }

    pub fn upload(&self) {
        if self.upload_loading.active.get_untracked() {
            return;
        }
        self.messages.clear();
        let Some(file) = self.selected_file.get_untracked() else {
            self.messages
                .set_error(ApiError::validation("Seleccione el archivo a cargar."));
            return;
        };
        if !utils::is_spreadsheet(&file.name) {
            self.messages.set_error(ApiError::validation(
                "El archivo debe ser un libro de Excel (.xlsm o .xlsx).",
            ));
            return;
        }
        self.upload_loading.start("activity upload");
        self.upload_action.dispatch(file.content);
    }
}

pub fn use_reports_view_model() -> ReportsViewModel {
    let api = use_api_client();
    let employees = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move {
                    repository::fetch_employees(&api).await.unwrap_or_else(|err| {
                        log::warn!("employees unavailable: {}", err);
                        Vec::new()
                    })
                }
            },
        )
    };
    let periods = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move {
                    repository::fetch_periods(&api).await.unwrap_or_else(|err| {
                        log::warn!("periods unavailable: {}", err);
                        Vec::new()
                    })
                }
            },
        )
    };
    let report_action = {
        let api = api.clone();
        create_action(move |(employee_id, period_id, file_name): &(i64, i64, String)| {
            let api = api.clone();
            let (employee_id, period_id, file_name) = (*employee_id, *period_id, file_name.clone());
            async move {
                let bytes = repository::download_report(&api, employee_id, period_id).await?;
                save_download(&file_name, &bytes)
            }
        })
    };
    let model_action = {
        let api = api.clone();
        create_action(move |_: &()| {
            let api = api.clone();
            async move {
                let bytes = repository::download_model(&api).await?;
                save_download(utils::MODEL_FILE_NAME, &bytes)
            }
        })
    };
    let upload_action = create_action(move |content: &Vec<u8>| {
        let api = api.clone();
        let content = content.clone();
        async move { repository::upload(&api, content).await }
    });

    let vm = ReportsViewModel {
        employees,
        periods,
        form: utils::ReportFormState::default(),
        messages: MessageState::default(),
        selected_file: create_rw_signal(None),
        model_loading: DeadlineFlag::new(),
        upload_loading: DeadlineFlag::new(),
        report_action,
        model_action,
        upload_action,
    };

    create_effect(move |_| {
        if let Some(result) = report_action.value().get() {
            vm.messages.report(&result, "Reporte descargado correctamente");
        }
    });
    create_effect(move |_| {
        if let Some(result) = model_action.value().get() {
            vm.model_loading.finish();
            vm.messages.report(&result, "Modelo descargado correctamente");
        }
    });
    create_effect(move |_| {
        if let Some(result) = upload_action.value().get() {
            vm.upload_loading.finish();
            if result.is_ok() {
                vm.selected_file.set(None);
            }
            let success = result
                .as_ref()
                .ok()
                .and_then(|r| r.message.clone())
                .unwrap_or_else(|| "Actividades cargadas correctamente".to_string());
            vm.messages.report(&result, success);
        }
    });
    vm
}

/// Reads the first file of a file input into `selected`.
#[cfg(target_arch = "wasm32")]
pub fn read_file_input(ev: &web_sys::Event, selected: RwSignal<Option<SelectedFile>>, messages: MessageState) {
    use wasm_bindgen::JsCast;

    let file = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0));
    let Some(file) = file else {
        selected.set(None);
        return;
    };
    let name = file.name();
    spawn_local(async move {
        match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => selected.set(Some(SelectedFile {
                name,
                content: js_sys::Uint8Array::new(&buffer).to_vec(),
            })),
            Err(_) => {
                log::warn!("could not read {}", name);
                selected.set(None);
                messages.set_error(ApiError::unknown("No se pudo leer el archivo."));
            }
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_file_input(_ev: &web_sys::Event, selected: RwSignal<Option<SelectedFile>>, _messages: MessageState) {
    selected.set(None);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_idle_resources;

    #[test]
    fn report_needs_a_selection() {
        with_idle_resources(|| {
            let vm = use_reports_view_model();
            assert_eq!(
                vm.report_request().unwrap_err().error,
                "Colaborador es obligatorio."
            );
        });
    }

    #[test]
    fn file_name_falls_back_to_ids_before_lists_load() {
        with_idle_resources(|| {
            let vm = use_reports_view_model();
            vm.form.employee_id.set("7".into());
            vm.form.period_id.set("3".into());
            let (_, _, name) = vm.report_request().unwrap();
            assert_eq!(name, "Colaborador_7_Periodo_3.xlsm");
        });
    }

    #[test]
    fn upload_without_file_is_reported() {
        with_idle_resources(|| {
            let vm = use_reports_view_model();
            vm.upload();
            let error = vm.messages.error.get_untracked().unwrap();
            assert_eq!(error.error, "Seleccione el archivo a cargar.");
            assert!(!vm.upload_loading.active.get_untracked());
        });
    }

    #[test]
    fn upload_rejects_other_formats() {
        with_idle_resources(|| {
            let vm = use_reports_view_model();
            vm.selected_file.set(Some(SelectedFile {
                name: "horas.csv".into(),
                content: vec![1],
            }));
            vm.upload();
            assert!(vm.messages.error.get_untracked().is_some());
        });
    }

    #[test]
    fn deadline_flag_clears_on_finish() {
        with_idle_resources(|| {
            let flag = DeadlineFlag::new();
            flag.start("test");
            assert!(flag.active.get_untracked());
            flag.finish();
            assert!(!flag.active.get_untracked());
        });
    }
}
