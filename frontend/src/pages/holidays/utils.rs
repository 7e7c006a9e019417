use crate::{
    api::{ApiError, Holiday},
    components::table::Column,
    pages::crud::or_dash,
    utils::{
        dates,
        validation::{check, first_error, Rule},
    },
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct HolidayFormState {
    pub holiday_name: RwSignal<String>,
    pub holiday_date: RwSignal<String>,
    pub description: RwSignal<String>,
    status: RwSignal<bool>,
}

impl Default for HolidayFormState {
    fn default() -> Self {
        Self {
            holiday_name: create_rw_signal(String::new()),
            holiday_date: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            status: create_rw_signal(true),
        }
    }
}

impl HolidayFormState {
    pub fn reset(&self) {
        self.holiday_name.set(String::new());
        self.holiday_date.set(String::new());
        self.description.set(String::new());
        self.status.set(true);
    }

    pub fn load(&self, holiday: &Holiday) {
        self.holiday_name.set(holiday.holiday_name.clone());
        self.holiday_date.set(dates::input_date(holiday.holiday_date));
        self.description
            .set(holiday.description.clone().unwrap_or_default());
        self.status.set(holiday.status);
    }

    /// Builds the full record; the id is filled in by the save call.
    pub fn validate(&self) -> Result<Holiday, ApiError> {
        let name = self.holiday_name.get_untracked();
        let date = self.holiday_date.get_untracked();
        let description = self.description.get_untracked();
        first_error([
            check("Nombre", &name, &[Rule::Required, Rule::MaxLength(100)]),
            check("Fecha", &date, &[Rule::Required]),
            check("Descripción", &description, &[Rule::MaxLength(250)]),
        ])?;
        let holiday_date = dates::parse_input_date(&date)
            .ok_or_else(|| ApiError::validation("Fecha no es válido."))?;
        Ok(Holiday {
            id: 0,
            holiday_name: name.trim().to_string(),
            holiday_date,
            description: Some(description.trim().to_string()).filter(|d| !d.is_empty()),
            status: self.status.get_untracked(),
        })
    }
}

pub fn columns() -> Vec<Column<Holiday>> {
    vec![
        Column::new("Nombre", "holidayName", |h: &Holiday| h.holiday_name.clone()),
        Column::new("Fecha", "holidayDate", |h: &Holiday| {
            dates::display_date(h.holiday_date)
        }),
        Column::new("Descripción", "description", |h: &Holiday| {
            or_dash(h.description.as_ref())
        }),
    ]
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;
    use chrono::NaiveDate;

    #[test]
    fn date_is_required() {
        with_runtime(|| {
            let form = HolidayFormState::default();
            form.holiday_name.set("Carnaval".into());
            let err = form.validate().unwrap_err();
            assert_eq!(err.error, "Fecha es obligatorio.");
        });
    }

    #[test]
    fn edited_holiday_keeps_its_status() {
        with_runtime(|| {
            let holiday = Holiday {
                id: 4,
                holiday_name: "Navidad".into(),
                holiday_date: NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
                description: None,
                status: false,
            };
            let form = HolidayFormState::default();
            form.load(&holiday);
            let saved = form.validate().unwrap();
            assert_eq!(saved.holiday_date, holiday.holiday_date);
            assert!(!saved.status);
            assert_eq!(saved.description, None);
        });
    }
}
