use crate::{
    api::{CatalogItem, PeriodKind, ProjectionRow},
    utils::dates::{self, MonthCursor},
};
use chrono::{Days, NaiveDate};

pub const DEFAULT_PERIOD_COUNT: u32 = 6;
pub const MAX_PERIOD_COUNT: u32 = 52;

pub fn clamp_period_count(count: u32) -> u32 {
    count.clamp(1, MAX_PERIOD_COUNT)
}

pub fn period_kind_label(kind: PeriodKind) -> &'static str {
    match kind {
        PeriodKind::Weekly => "Semanal",
        PeriodKind::Monthly => "Mensual",
    }
}

pub fn parse_period_kind(value: &str) -> PeriodKind {
    match value {
        "weekly" => PeriodKind::Weekly,
        _ => PeriodKind::Monthly,
    }
}

pub fn period_kind_value(kind: PeriodKind) -> &'static str {
    match kind {
        PeriodKind::Weekly => "weekly",
        PeriodKind::Monthly => "monthly",
    }
}

/// Column headers counted from the project start: `Semana n (dd/mm/yyyy)`
/// for weekly projections, month names for monthly ones.
pub fn period_labels(kind: PeriodKind, start: NaiveDate, count: u32) -> Vec<String> {
    match kind {
        PeriodKind::Weekly => (0..count)
            .map(|week| {
                let first = start
                    .checked_add_days(Days::new(u64::from(week) * 7))
                    .unwrap_or(start);
                format!("Semana {} ({})", week + 1, dates::display_date(first))
            })
            .collect(),
        PeriodKind::Monthly => {
            let mut month = MonthCursor::containing(start);
            (0..count)
                .map(|_| {
                    let label = month.label();
                    month = month.next();
                    label
                })
                .collect()
        }
    }
}

/// Non-numeric and negative input count as zero.
pub fn parse_amount(value: &str) -> f64 {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

pub fn new_row(resource: &CatalogItem, periods: u32) -> ProjectionRow {
    ProjectionRow {
        resource_type_id: resource.id,
        resource_name: resource.name.clone(),
        hourly_cost: resource.value.unwrap_or(0.0),
        resource_quantity: 1.0,
        time_distribution: vec![0.0; periods as usize],
        total_time: 0.0,
        resource_cost: 0.0,
        participation_percentage: 0.0,
    }
}

pub fn resize_distribution(rows: &mut [ProjectionRow], periods: u32) {
    for row in rows.iter_mut() {
        row.time_distribution.resize(periods as usize, 0.0);
    }
}

fn recompute_row(row: &mut ProjectionRow) {
    row.total_time = row.time_distribution.iter().sum();
    row.resource_cost = row.total_time * row.hourly_cost * row.resource_quantity;
}

/// Refreshes every derived figure, row totals first and then each row's share
/// of the overall cost.
pub fn recompute(rows: &mut [ProjectionRow]) {
    rows.iter_mut().for_each(recompute_row);
    let total_cost: f64 = rows.iter().map(|row| row.resource_cost).sum();
    for row in rows.iter_mut() {
        row.participation_percentage = if total_cost > 0.0 {
            row.resource_cost / total_cost * 100.0
        } else {
            0.0
        };
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectionTotals {
    pub total_time: f64,
    pub total_cost: f64,
}

pub fn totals(rows: &[ProjectionRow]) -> ProjectionTotals {
    rows.iter().fold(ProjectionTotals::default(), |acc, row| ProjectionTotals {
        total_time: acc.total_time + row.total_time,
        total_cost: acc.total_cost + row.resource_cost,
    })
}

/// Hours per period summed over rows, for the footer.
pub fn period_totals(rows: &[ProjectionRow], periods: u32) -> Vec<f64> {
    (0..periods as usize)
        .map(|idx| {
            rows.iter()
                .filter_map(|row| row.time_distribution.get(idx))
                .sum()
        })
        .collect()
}

pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: i64, name: &str, cost: f64) -> CatalogItem {
        CatalogItem {
            id,
            name: name.into(),
            value: Some(cost),
        }
    }

    #[test]
    fn weekly_labels_step_seven_days() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let labels = period_labels(PeriodKind::Weekly, start, 3);
        assert_eq!(
            labels,
            vec![
                "Semana 1 (06/01/2025)",
                "Semana 2 (13/01/2025)",
                "Semana 3 (20/01/2025)"
            ]
        );
    }

    #[test]
    fn monthly_labels_cross_year_end() {
        let start = NaiveDate::from_ymd_opt(2024, 11, 20).unwrap();
        let labels = period_labels(PeriodKind::Monthly, start, 3);
        assert_eq!(labels, vec!["Noviembre 2024", "Diciembre 2024", "Enero 2025"]);
    }

    #[test]
    fn costs_and_participation_follow_hours() {
        let mut rows = vec![
            new_row(&resource(1, "Desarrollador", 20.0), 2),
            new_row(&resource(2, "Analista", 10.0), 2),
        ];
        rows[0].time_distribution = vec![10.0, 5.0];
        rows[0].resource_quantity = 2.0;
        rows[1].time_distribution = vec![0.0, 30.0];
        recompute(&mut rows);
        assert_eq!(rows[0].total_time, 15.0);
        assert_eq!(rows[0].resource_cost, 600.0);
        assert_eq!(rows[1].resource_cost, 300.0);
        assert!((rows[0].participation_percentage - 66.666).abs() < 0.01);
        assert!((rows[1].participation_percentage - 33.333).abs() < 0.01);
        assert_eq!(
            totals(&rows),
            ProjectionTotals {
                total_time: 45.0,
                total_cost: 900.0
            }
        );
        assert_eq!(period_totals(&rows, 2), vec![10.0, 35.0]);
    }

    #[test]
    fn zero_total_cost_gives_zero_participation() {
        let mut rows = vec![new_row(&resource(1, "QA", 0.0), 1)];
        rows[0].time_distribution = vec![8.0];
        recompute(&mut rows);
        assert_eq!(rows[0].participation_percentage, 0.0);
    }

    #[test]
    fn resize_pads_and_truncates() {
        let mut rows = vec![new_row(&resource(1, "QA", 5.0), 2)];
        rows[0].time_distribution = vec![3.0, 4.0];
        resize_distribution(&mut rows, 4);
        assert_eq!(rows[0].time_distribution, vec![3.0, 4.0, 0.0, 0.0]);
        resize_distribution(&mut rows, 1);
        assert_eq!(rows[0].time_distribution, vec![3.0]);
    }

    #[test]
    fn amounts_accept_commas_and_reject_negatives() {
        assert_eq!(parse_amount("7,5"), 7.5);
        assert_eq!(parse_amount("-2"), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(clamp_period_count(0), 1);
        assert_eq!(clamp_period_count(80), MAX_PERIOD_COUNT);
    }
}
