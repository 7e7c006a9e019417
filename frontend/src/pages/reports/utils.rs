use crate::{
    api::{ApiError, CatalogItem, Employee},
    components::forms::SelectOptions,
    utils::validation::{check, first_error, Rule},
};
use leptos::*;

pub const MODEL_FILE_NAME: &str = "Modelo_Carga_Actividades.xlsm";
const UPLOAD_EXTENSIONS: [&str; 2] = [".xlsm", ".xlsx"];

/// `<collaborator>_<period>.xlsm` with every space turned into an underscore.
pub fn report_file_name(collaborator: &str, period: &str) -> String {
    format!("{}_{}.xlsm", collaborator.trim(), period.trim()).replace(' ', "_")
}

pub fn is_spreadsheet(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    UPLOAD_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn employee_options(employees: &[Employee]) -> SelectOptions {
    let mut options: SelectOptions = employees
        .iter()
        .filter(|employee| employee.status)
        .map(|employee| (employee.id.to_string(), employee.person.full_name()))
        .collect();
    options.sort_by(|a, b| a.1.cmp(&b.1));
    options
}

pub fn period_options(periods: &[CatalogItem]) -> SelectOptions {
    periods
        .iter()
        .map(|period| (period.id.to_string(), period.name.clone()))
        .collect()
}

/// Label of the option whose value is `value`.
pub fn option_label(options: &SelectOptions, value: &str) -> Option<String> {
    options
        .iter()
        .find(|(key, _)| key == value)
        .map(|(_, label)| label.clone())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSelection {
    pub employee_id: i64,
    pub period_id: i64,
}

#[derive(Clone, Copy)]
pub struct ReportFormState {
    pub employee_id: RwSignal<String>,
    pub period_id: RwSignal<String>,
}

impl Default for ReportFormState {
    fn default() -> Self {
        Self {
            employee_id: create_rw_signal(String::new()),
            period_id: create_rw_signal(String::new()),
        }
    }
}

impl ReportFormState {
    pub fn validate(&self) -> Result<ReportSelection, ApiError> {
        let employee_id = self.employee_id.get_untracked();
        let period_id = self.period_id.get_untracked();
        first_error([
            check("Colaborador", &employee_id, &[Rule::Required]),
            check("Periodo", &period_id, &[Rule::Required]),
        ])?;
        match (employee_id.trim().parse(), period_id.trim().parse()) {
            (Ok(employee_id), Ok(period_id)) => Ok(ReportSelection {
                employee_id,
                period_id,
            }),
            _ => Err(ApiError::validation("Seleccione un colaborador y un periodo.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_replaces_spaces() {
        assert_eq!(
            report_file_name("Ana Torres", "Marzo 2025"),
            "Ana_Torres_Marzo_2025.xlsm"
        );
    }

    #[test]
    fn file_name_keeps_one_underscore_per_space() {
        assert_eq!(
            report_file_name("Ana  Torres", " Marzo 2025 "),
            "Ana__Torres_Marzo_2025.xlsm"
        );
    }

    #[test]
    fn only_spreadsheets_upload() {
        assert!(is_spreadsheet("carga.XLSM"));
        assert!(is_spreadsheet("carga.xlsx"));
        assert!(!is_spreadsheet("carga.csv"));
    }

    #[test]
    fn option_label_finds_selected_text() {
        let options = vec![("1".to_string(), "Marzo 2025".to_string())];
        assert_eq!(option_label(&options, "1").as_deref(), Some("Marzo 2025"));
        assert_eq!(option_label(&options, "2"), None);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn both_selections_are_required() {
        with_runtime(|| {
            let form = ReportFormState::default();
            form.employee_id.set("7".into());
            assert_eq!(form.validate().unwrap_err().error, "Periodo es obligatorio.");
            form.period_id.set("3".into());
            assert_eq!(
                form.validate().unwrap(),
                ReportSelection {
                    employee_id: 7,
                    period_id: 3
                }
            );
        });
    }
}
