use crate::{api::Activity, pages::activities::utils::project_name};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectHours {
    pub project_id: i64,
    pub name: String,
    pub hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthSummary {
    pub total_hours: f64,
    pub billable_hours: f64,
    pub days_with_activity: usize,
    /// Largest first; ties sorted by name.
    pub per_project: Vec<ProjectHours>,
}

impl MonthSummary {
    pub fn billable_percentage(&self) -> f64 {
        if self.total_hours <= 0.0 {
            0.0
        } else {
            self.billable_hours / self.total_hours * 100.0
        }
    }

    /// Width of a project's bar relative to the busiest project.
    pub fn bar_width(&self, hours: f64) -> f64 {
        let max = self
            .per_project
            .first()
            .map(|p| p.hours)
            .unwrap_or(0.0);
        if max <= 0.0 {
            0.0
        } else {
            (hours / max * 100.0).clamp(0.0, 100.0)
        }
    }
}

pub fn summarize(activities: &[Activity], project_names: &HashMap<i64, String>) -> MonthSummary {
    let active: Vec<&Activity> = activities.iter().filter(|a| a.status).collect();
    let mut by_project: HashMap<i64, f64> = HashMap::new();
    for activity in &active {
        *by_project.entry(activity.project_id).or_insert(0.0) += activity.hours_quantity;
    }
    let mut per_project: Vec<ProjectHours> = by_project
        .into_iter()
        .map(|(project_id, hours)| ProjectHours {
            project_id,
            name: project_name(project_names, project_id),
            hours,
        })
        .collect();
    per_project.sort_by(|a, b| {
        b.hours
            .partial_cmp(&a.hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    MonthSummary {
        total_hours: active.iter().map(|a| a.hours_quantity).sum(),
        billable_hours: active
            .iter()
            .filter(|a| a.is_billable)
            .map(|a| a.hours_quantity)
            .sum(),
        days_with_activity: active
            .iter()
            .map(|a| a.activity_date)
            .collect::<BTreeSet<_>>()
            .len(),
        per_project,
    }
}

pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0} h", hours)
    } else {
        format!("{:.1} h", hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::activities::utils::activity;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn summarize_totals_and_orders_projects() {
        let mut support = activity(2, date(3), 2.0);
        support.project_id = 2;
        support.is_billable = false;
        let mut removed = activity(3, date(4), 8.0);
        removed.status = false;
        let activities = vec![
            activity(1, date(3), 3.0),
            support,
            activity(4, date(5), 4.0),
            removed,
        ];
        let names = HashMap::from([(1, "Alfa".to_string()), (2, "Soporte".to_string())]);

        let summary = summarize(&activities, &names);
        assert_eq!(summary.total_hours, 9.0);
        assert_eq!(summary.billable_hours, 7.0);
        assert_eq!(summary.days_with_activity, 2);
        assert_eq!(summary.per_project[0].name, "Alfa");
        assert_eq!(summary.per_project[0].hours, 7.0);
        assert_eq!(summary.per_project[1].name, "Soporte");
        assert_eq!(summary.bar_width(2.0).round(), 29.0);
    }

    #[test]
    fn empty_month_has_zero_percentages() {
        let summary = summarize(&[], &HashMap::new());
        assert_eq!(summary.billable_percentage(), 0.0);
        assert_eq!(summary.bar_width(3.0), 0.0);
        assert!(summary.per_project.is_empty());
    }

    #[test]
    fn hours_format() {
        assert_eq!(format_hours(8.0), "8 h");
        assert_eq!(format_hours(7.3), "7.3 h");
    }
}
