use chrono::{Datelike, Months, NaiveDate, Weekday};

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A calendar month. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::containing(today())
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn next(&self) -> Self {
        self.first_day()
            .checked_add_months(Months::new(1))
            .map(Self::containing)
            .unwrap_or(*self)
    }

    pub fn previous(&self) -> Self {
        self.first_day()
            .checked_sub_months(Months::new(1))
            .map(Self::containing)
            .unwrap_or(*self)
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        self.next().first_day().signed_duration_since(first).num_days() as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.days_in_month()).filter_map(move |offset| {
            first.checked_add_days(chrono::Days::new(u64::from(offset)))
        })
    }

    pub fn label(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or_default();
        format!("{} {}", name, self.year)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `dd/mm/yyyy`, the format the UI shows dates in.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parses the `yyyy-mm-dd` value of a date input.
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
