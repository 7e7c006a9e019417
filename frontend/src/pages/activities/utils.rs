use crate::{
    api::{Activity, ActivityRequest, ApiError},
    components::confirm_dialog::ConfirmRequest,
    utils::{
        dates::{self, MonthCursor},
        validation::{check, first_error, Rule},
    },
};
use chrono::{Datelike, NaiveDate};
use leptos::*;
use std::collections::{HashMap, HashSet};

/// Hours that make a complete working day.
pub const FULL_DAY_HOURS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Complete,
    Partial,
    Empty,
    Holiday,
    Weekend,
    Future,
}

impl DayStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            DayStatus::Complete => "bg-status-success-bg text-status-success-text",
            DayStatus::Partial => "bg-status-warning-bg text-status-warning-text",
            DayStatus::Empty => "bg-status-error-bg text-status-error-text",
            DayStatus::Holiday => "bg-status-info-bg text-status-info-text",
            DayStatus::Weekend => "bg-surface-muted text-fg-muted",
            DayStatus::Future => "bg-surface-elevated text-fg-muted",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayStatus::Complete => "Completo",
            DayStatus::Partial => "Parcial",
            DayStatus::Empty => "Sin registro",
            DayStatus::Holiday => "Feriado",
            DayStatus::Weekend => "Fin de semana",
            DayStatus::Future => "Próximo",
        }
    }
}

/// A full day wins over everything else; otherwise holidays, weekends and
/// future days are shown as such before looking at partial hours.
pub fn day_status(date: NaiveDate, hours: f64, is_holiday: bool, today: NaiveDate) -> DayStatus {
    if hours >= FULL_DAY_HOURS {
        DayStatus::Complete
    } else if is_holiday {
        DayStatus::Holiday
    } else if dates::is_weekend(date) {
        DayStatus::Weekend
    } else if date > today {
        DayStatus::Future
    } else if hours > 0.0 {
        DayStatus::Partial
    } else {
        DayStatus::Empty
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub hours: f64,
    pub status: DayStatus,
}

/// Active activities only; deactivated ones no longer count.
pub fn hours_by_day(activities: &[Activity]) -> HashMap<NaiveDate, f64> {
    activities
        .iter()
        .filter(|a| a.status)
        .fold(HashMap::new(), |mut acc, a| {
            *acc.entry(a.activity_date).or_insert(0.0) += a.hours_quantity;
            acc
        })
}

/// Monday-first weeks; `None` pads the days outside the month.
pub fn month_grid(
    month: MonthCursor,
    activities: &[Activity],
    holidays: &HashSet<NaiveDate>,
    today: NaiveDate,
) -> Vec<Vec<Option<CalendarDay>>> {
    let hours = hours_by_day(activities);
    let lead = month.first_day().weekday().num_days_from_monday() as usize;
    let mut cells: Vec<Option<CalendarDay>> = vec![None; lead];
    cells.extend(month.days().map(|date| {
        let day_hours = hours.get(&date).copied().unwrap_or(0.0);
        Some(CalendarDay {
            date,
            hours: day_hours,
            status: day_status(date, day_hours, holidays.contains(&date), today),
        })
    }));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells.chunks(7).map(<[_]>::to_vec).collect()
}

/// Hours already registered on `date`, leaving out the activity being edited.
pub fn hours_on(activities: &[Activity], date: NaiveDate, excluding: Option<i64>) -> f64 {
    activities
        .iter()
        .filter(|a| a.status && a.activity_date == date && Some(a.id) != excluding)
        .map(|a| a.hours_quantity)
        .sum()
}

/// Registering on a holiday or past a full day is allowed after the user
/// confirms it.
pub fn soft_block(
    date: NaiveDate,
    hours: f64,
    already_registered: f64,
    is_holiday: bool,
) -> Option<ConfirmRequest> {
    let total = already_registered + hours;
    if is_holiday {
        return Some(ConfirmRequest::new(
            "Día feriado",
            format!(
                "El {} es feriado. ¿Desea registrar la actividad de todas formas?",
                dates::display_date(date)
            ),
        ));
    }
    if total > FULL_DAY_HOURS {
        return Some(ConfirmRequest::new(
            "Horas excedidas",
            format!(
                "Con esta actividad el {} suma {} horas, más de las {} de una jornada. ¿Desea continuar?",
                dates::display_date(date),
                total,
                FULL_DAY_HOURS
            ),
        ));
    }
    None
}

#[derive(Clone, Copy)]
pub struct ActivityFormState {
    pub project_id: RwSignal<String>,
    pub activity_type_id: RwSignal<String>,
    pub hours: RwSignal<String>,
    pub date: RwSignal<String>,
    pub description: RwSignal<String>,
    pub notes: RwSignal<String>,
    pub billable: RwSignal<bool>,
}

impl Default for ActivityFormState {
    fn default() -> Self {
        Self {
            project_id: create_rw_signal(String::new()),
            activity_type_id: create_rw_signal(String::new()),
            hours: create_rw_signal(String::new()),
            date: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            notes: create_rw_signal(String::new()),
            billable: create_rw_signal(true),
        }
    }
}

impl ActivityFormState {
    pub fn reset_for(&self, date: NaiveDate) {
        self.project_id.set(String::new());
        self.activity_type_id.set(String::new());
        self.hours.set(String::new());
        self.date.set(dates::input_date(date));
        self.description.set(String::new());
        self.notes.set(String::new());
        self.billable.set(true);
    }

    pub fn load(&self, activity: &Activity) {
        self.project_id.set(activity.project_id.to_string());
        self.activity_type_id.set(activity.activity_type_id.to_string());
        self.hours.set(activity.hours_quantity.to_string());
        self.date.set(dates::input_date(activity.activity_date));
        self.description.set(activity.activity_description.clone());
        self.notes.set(activity.notes.clone().unwrap_or_default());
        self.billable.set(activity.is_billable);
    }

    pub fn validate(&self, employee_id: i64) -> Result<ActivityRequest, ApiError> {
        let project = self.project_id.get_untracked();
        let activity_type = self.activity_type_id.get_untracked();
        let hours = self.hours.get_untracked();
        let date = self.date.get_untracked();
        let description = self.description.get_untracked();
        first_error([
            check("Proyecto", &project, &[Rule::Required]),
            check("Tipo de actividad", &activity_type, &[Rule::Required]),
            check(
                "Horas",
                &hours,
                &[Rule::Required, Rule::GreaterThan(0.0), Rule::Max(FULL_DAY_HOURS)],
            ),
            check("Fecha", &date, &[Rule::Required]),
            check(
                "Descripción",
                &description,
                &[Rule::Required, Rule::MaxLength(500)],
            ),
        ])?;
        let invalid = |label: &str| ApiError::validation(format!("{} no es válido.", label));
        let notes = self.notes.get_untracked();
        Ok(ActivityRequest {
            employee_id,
            project_id: project.parse().map_err(|_| invalid("Proyecto"))?,
            activity_type_id: activity_type
                .parse()
                .map_err(|_| invalid("Tipo de actividad"))?,
            hours_quantity: hours.trim().parse().map_err(|_| invalid("Horas"))?,
            activity_date: dates::parse_input_date(&date).ok_or_else(|| invalid("Fecha"))?,
            activity_description: description.trim().to_string(),
            notes: Some(notes.trim().to_string()).filter(|n| !n.is_empty()),
            is_billable: self.billable.get_untracked(),
        })
    }
}

pub const EXPORT_HEADERS: [&str; 6] = [
    "Fecha",
    "Proyecto",
    "Horas",
    "Descripción",
    "Facturable",
    "Notas",
];

pub fn export_rows(activities: &[Activity], project_names: &HashMap<i64, String>) -> Vec<Vec<String>> {
    let mut active: Vec<&Activity> = activities.iter().filter(|a| a.status).collect();
    active.sort_by_key(|a| a.activity_date);
    active
        .into_iter()
        .map(|a| {
            vec![
                dates::display_date(a.activity_date),
                project_name(project_names, a.project_id),
                a.hours_quantity.to_string(),
                a.activity_description.clone(),
                if a.is_billable { "Sí" } else { "No" }.to_string(),
                a.notes.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

pub fn project_name(names: &HashMap<i64, String>, project_id: i64) -> String {
    names
        .get(&project_id)
        .cloned()
        .unwrap_or_else(|| format!("Proyecto {}", project_id))
}

#[cfg(test)]
pub(crate) fn activity(id: i64, date: NaiveDate, hours: f64) -> Activity {
    Activity {
        id,
        employee_id: 7,
        project_id: 1,
        activity_type_id: 2,
        hours_quantity: hours,
        activity_date: date,
        activity_description: format!("Actividad {}", id),
        notes: None,
        is_billable: true,
        approved_by_id: None,
        approval_date: None,
        status: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn day_status_priorities() {
        let today = date(20);
        assert_eq!(day_status(date(10), 8.0, false, today), DayStatus::Complete);
        assert_eq!(day_status(date(3), 8.5, true, today), DayStatus::Complete);
        assert_eq!(day_status(date(3), 2.0, true, today), DayStatus::Holiday);
        assert_eq!(day_status(date(8), 0.0, false, today), DayStatus::Weekend);
        assert_eq!(day_status(date(24), 0.0, false, today), DayStatus::Future);
        assert_eq!(day_status(date(10), 4.0, false, today), DayStatus::Partial);
        assert_eq!(day_status(date(10), 0.0, false, today), DayStatus::Empty);
    }

    #[test]
    fn month_grid_starts_on_monday() {
        let march = MonthCursor {
            year: 2025,
            month: 3,
        };
        let activities = vec![activity(1, date(3), 5.0), activity(2, date(3), 3.0)];
        let holidays = HashSet::from([date(4)]);
        let grid = month_grid(march, &activities, &holidays, date(31));

        // 1 March 2025 is a Saturday.
        assert!(grid[0][..5].iter().all(Option::is_none));
        assert_eq!(grid[0][5].as_ref().unwrap().date, date(1));
        assert!(grid.iter().all(|week| week.len() == 7));

        let find = |d: u32| {
            grid.iter()
                .flatten()
                .flatten()
                .find(|day| day.date == date(d))
                .cloned()
                .unwrap()
        };
        assert_eq!(find(3).status, DayStatus::Complete);
        assert_eq!(find(3).hours, 8.0);
        assert_eq!(find(4).status, DayStatus::Holiday);
        assert_eq!(find(5).status, DayStatus::Empty);
    }

    #[test]
    fn inactive_activities_do_not_count() {
        let mut removed = activity(3, date(5), 6.0);
        removed.status = false;
        let activities = vec![removed, activity(4, date(5), 1.5)];
        assert_eq!(hours_on(&activities, date(5), None), 1.5);
        assert_eq!(hours_on(&activities, date(5), Some(4)), 0.0);
    }

    #[test]
    fn soft_block_on_holiday_or_overflow() {
        assert!(soft_block(date(10), 4.0, 4.0, false).is_none());
        let overflow = soft_block(date(10), 2.0, 7.0, false).unwrap();
        assert_eq!(overflow.title, "Horas excedidas");
        assert!(overflow.message.contains("9 horas"));
        let holiday = soft_block(date(4), 1.0, 0.0, true).unwrap();
        assert_eq!(holiday.title, "Día feriado");
        assert!(holiday.message.contains("04/03/2025"));
    }

    #[test]
    fn export_rows_sorted_by_date() {
        let names = HashMap::from([(1, "Alfa".to_string())]);
        let rows = export_rows(
            &[activity(1, date(12), 2.0), activity(2, date(3), 8.0)],
            &names,
        );
        assert_eq!(rows[0][0], "03/03/2025");
        assert_eq!(rows[0][1], "Alfa");
        assert_eq!(rows[1][2], "2");
    }

    #[test]
    fn unknown_project_falls_back_to_id() {
        assert_eq!(project_name(&HashMap::new(), 9), "Proyecto 9");
    }
}
