//! Calendar widget state: a selected date and the month on display

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One week row, Sunday first; `None` pads days outside the month
pub type Week = [Option<u32>; 7];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub today: NaiveDate,
    pub selected: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    selected: NaiveDate,
    year: i32,
    month: u32,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected: today,
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Select `date` and bring its month into view
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.year = date.year();
        self.month = date.month();
    }

    pub fn next_month(&mut self) {
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    pub fn prev_month(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn view(&self, today: NaiveDate) -> CalendarView {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(today);
        CalendarView {
            today,
            selected: self.selected,
            year: self.year,
            month: self.month,
            month_name: first.format("%B").to_string(),
            weeks: month_grid(self.year, self.month),
        }
    }
}

impl Default for CalendarState {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

/// Number of days in `month` of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Weeks of the month laid out Sunday to Saturday
pub fn month_grid(year: i32, month: u32) -> Vec<Week> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let offset = first.weekday().num_days_from_sunday() as usize;
    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    let mut column = offset;

    for day in 1..=days_in_month(year, month) {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn counts_days_including_leap_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn grid_starts_on_sunday() {
        // 1 September 2024 was a Sunday, 1 May 2024 a Wednesday.
        let september = month_grid(2024, 9);
        assert_eq!(september[0][0], Some(1));
        assert_eq!(september.len(), 5);

        let may = month_grid(2024, 5);
        assert_eq!(may[0], [None, None, None, Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(may.last().unwrap()[5], Some(31));
    }

    #[test]
    fn navigation_wraps_years() {
        let mut calendar = CalendarState::new(date(2024, 12, 15));
        calendar.next_month();
        let view = calendar.view(date(2024, 12, 15));
        assert_eq!((view.year, view.month), (2025, 1));
        assert_eq!(view.month_name, "January");
        assert_eq!(view.selected, date(2024, 12, 15));

        calendar.prev_month();
        calendar.prev_month();
        let view = calendar.view(date(2024, 12, 15));
        assert_eq!((view.year, view.month), (2024, 11));
    }

    #[test]
    fn select_moves_visible_month() {
        let mut calendar = CalendarState::new(date(2024, 1, 10));
        calendar.select(date(2025, 7, 4));
        let view = calendar.view(date(2024, 1, 10));
        assert_eq!(view.selected, date(2025, 7, 4));
        assert_eq!((view.year, view.month), (2025, 7));
    }
}
