use crate::{
    api::{ApiError, Employee, EmployeeRequest},
    components::table::Column,
    pages::{crud::or_dash, person_form::PersonFormState},
    utils::{
        dates,
        validation::{check, first_error, Rule},
    },
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct EmployeeFormState {
    pub position: RwSignal<String>,
    pub hire_date: RwSignal<String>,
    pub person: PersonFormState,
}

impl Default for EmployeeFormState {
    fn default() -> Self {
        Self {
            position: create_rw_signal(String::new()),
            hire_date: create_rw_signal(String::new()),
            person: PersonFormState::default(),
        }
    }
}

impl EmployeeFormState {
    pub fn reset(&self) {
        self.position.set(String::new());
        self.hire_date.set(String::new());
        self.person.reset();
    }

    pub fn load(&self, employee: &Employee) {
        self.position.set(employee.position.clone().unwrap_or_default());
        self.hire_date
            .set(employee.hire_date.map(dates::input_date).unwrap_or_default());
        self.person.load(&employee.person);
    }

    pub fn validate(&self) -> Result<EmployeeRequest, ApiError> {
        let position = self.position.get_untracked();
        let hire_date = self.hire_date.get_untracked();
        let mut checks = self.person.checks();
        checks.push(check("Cargo", &position, &[Rule::MaxLength(100)]));
        first_error(checks)?;
        let hire_date = match hire_date.trim() {
            "" => None,
            value => Some(dates::parse_input_date(value).ok_or_else(|| {
                ApiError::validation("Fecha de ingreso no es válido.")
            })?),
        };
        Ok(EmployeeRequest {
            person: self.person.to_person(),
            position: Some(position.trim().to_string()).filter(|p| !p.is_empty()),
            hire_date,
        })
    }
}

pub fn columns() -> Vec<Column<Employee>> {
    vec![
        Column::new("Nombre", "name", |e: &Employee| e.person.full_name()),
        Column::new("Identificación", "identification", |e: &Employee| {
            e.person.identification.clone()
        }),
        Column::new("Correo", "email", |e: &Employee| e.person.email.clone()),
        Column::new("Cargo", "position", |e: &Employee| or_dash(e.position.as_ref())),
        Column::new("Fecha de ingreso", "hireDate", |e: &Employee| {
            or_dash(e.hire_date.map(dates::display_date))
        }),
    ]
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;
    use chrono::NaiveDate;

    fn filled() -> EmployeeFormState {
        let form = EmployeeFormState::default();
        form.person.first_name.set("Ana".into());
        form.person.last_name.set("Torres".into());
        form.person.identification.set("0912345678".into());
        form.person.email.set("ana@empresa.com".into());
        form
    }

    #[test]
    fn optional_fields_become_none() {
        with_runtime(|| {
            let request = filled().validate().unwrap();
            assert!(request.position.is_none());
            assert!(request.hire_date.is_none());
        });
    }

    #[test]
    fn hire_date_is_parsed() {
        with_runtime(|| {
            let form = filled();
            form.hire_date.set("2023-02-01".into());
            form.position.set("Analista".into());
            let request = form.validate().unwrap();
            assert_eq!(request.hire_date, NaiveDate::from_ymd_opt(2023, 2, 1));
            assert_eq!(request.position.as_deref(), Some("Analista"));
        });
    }

    #[test]
    fn columns_render_missing_values_as_dash() {
        let employee: Employee =
            serde_json::from_value(crate::test_support::helpers::employee_json(7)).unwrap();
        let mut bare = employee.clone();
        bare.position = None;
        bare.hire_date = None;
        let cells = crate::components::table::column_cells(&columns(), &bare);
        assert_eq!(cells[0], "Ana Torres");
        assert_eq!(cells[3], "-");
        assert_eq!(cells[4], "-");
        let cells = crate::components::table::column_cells(&columns(), &employee);
        assert_eq!(cells[4], "01/02/2023");
    }
}
