//! ISO-8601 week arithmetic and the derived month grid.
//!
//! The grid invariant: the first cell is the Monday on or before the 1st of
//! the displayed month, every row spans exactly 7 consecutive days, and there
//! are always [`GRID_ROWS`] rows no matter how long the month is.

use chrono::{Datelike as _, Duration, NaiveDate};

/// Rows in the month grid. Fixed so short months keep the popup layout stable.
pub const GRID_ROWS: usize = 6;

/// Columns in the month grid (Monday..Sunday).
pub const GRID_COLS: usize = 7;

/// Three-letter column headers, Monday first.
pub const DAY_NAMES: [&str; GRID_COLS] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// The ISO-8601 week number (1–53) of `date`.
///
/// Week 1 is the week containing the year's first Thursday; weeks start on
/// Monday, so early January can belong to the previous year's last week.
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// The Monday of the week containing `date`.
pub fn start_of_iso_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The first grid cell for a displayed month: the Monday on or before the 1st.
pub fn month_grid_start(year: i32, month: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("invalid year/month");
    start_of_iso_week(first)
}

/// `(year, month)` immediately before the given month, wrapping across years.
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// `(year, month)` immediately after the given month, wrapping across years.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// English month name, `month` in 1..=12.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => panic!("Unknown month: {month}"),
    }
}

// ----------------------------------------------------------------------------

/// How a single day cell should be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Normal,
    /// Belongs to an adjacent month.
    Dim,
    /// The current real-world day. Wins over [`CellState::Dim`].
    Today,
}

/// One day in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub state: CellState,
}

/// One week row: the ISO week number plus seven consecutive days.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekRow {
    pub number: u32,
    /// This row is the current real-world week.
    pub current: bool,
    pub days: [DayCell; GRID_COLS],
}

/// The derived 6×7 grid for a displayed month. Computed on demand, never
/// stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub rows: Vec<WeekRow>,
}

/// Builds the grid for `(year, month)`. `today` drives the today/current-week
/// emphasis and is passed in so callers control the clock.
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> MonthGrid {
    let start = month_grid_start(year, month);
    let current_week_start = start_of_iso_week(today);

    let rows = (0..GRID_ROWS as i64)
        .map(|r| {
            let week_start = start + Duration::days(7 * r);
            let days = std::array::from_fn(|c| {
                let date = week_start + Duration::days(c as i64);
                let state = if date == today {
                    CellState::Today
                } else if date.month() != month {
                    CellState::Dim
                } else {
                    CellState::Normal
                };
                DayCell { date, state }
            });
            WeekRow {
                number: iso_week(week_start),
                current: week_start == current_week_start,
                days,
            }
        })
        .collect();

    MonthGrid { year, month, rows }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_is_monday_and_contains_date() {
        let mut d = date(2020, 12, 1);
        let end = date(2022, 2, 1);
        while d < end {
            let start = start_of_iso_week(d);
            assert_eq!(start.weekday(), Weekday::Mon, "{d}");
            assert!(start <= d, "{d}");
            assert!(d < start + Duration::days(7), "{d}");
            d += Duration::days(1);
        }
    }

    #[test]
    fn grid_start_is_monday_on_or_before_first() {
        for year in [1999, 2021, 2024, 2025] {
            for month in 1..=12 {
                let start = month_grid_start(year, month);
                let first = date(year, month, 1);
                assert_eq!(start.weekday(), Weekday::Mon);
                assert!(start <= first);
                assert!(first - start < Duration::days(7));
            }
        }
    }

    #[test]
    fn iso_week_year_boundary() {
        // 2021-01-01 is a Friday and still belongs to 2020's last week.
        assert_eq!(iso_week(date(2021, 1, 1)), 53);
        // The first Monday of 2021 starts week 1.
        assert_eq!(iso_week(date(2021, 1, 4)), 1);
    }

    #[test]
    fn march_2024_grid_layout() {
        // March 2024 starts on a Friday.
        assert_eq!(month_grid_start(2024, 3), date(2024, 2, 26));

        let grid = month_grid(2024, 3, date(2024, 3, 15));
        assert_eq!(grid.rows.len(), GRID_ROWS);
        assert_eq!(grid.rows[0].days[6].date, date(2024, 3, 3));
        assert_eq!(grid.rows[0].days[0].date, date(2024, 2, 26));
        assert_eq!(grid.rows[0].days[0].state, CellState::Dim);
    }

    #[test]
    fn grid_contains_every_day_of_month() {
        for (year, month) in [(2024, 2), (2024, 3), (2025, 12), (2021, 1), (2023, 6)] {
            let grid = month_grid(year, month, date(2024, 1, 1));
            let mut day = date(year, month, 1);
            while day.month() == month {
                assert!(
                    grid.rows
                        .iter()
                        .flat_map(|row| row.days.iter())
                        .any(|cell| cell.date == day),
                    "{day} missing from grid"
                );
                day += Duration::days(1);
            }
        }
    }

    #[test]
    fn grid_rows_are_consecutive_weeks() {
        let grid = month_grid(2025, 8, date(2025, 8, 25));
        for (r, row) in grid.rows.iter().enumerate() {
            assert_eq!(row.days[0].date.weekday(), Weekday::Mon);
            for c in 1..GRID_COLS {
                assert_eq!(
                    row.days[c].date,
                    row.days[c - 1].date + Duration::days(1),
                    "row {r} not consecutive"
                );
            }
            assert_eq!(row.number, iso_week(row.days[0].date));
        }
    }

    #[test]
    fn today_and_current_week_emphasis() {
        let today = date(2025, 8, 25); // a Monday
        let grid = month_grid(2025, 8, today);

        let current_rows: Vec<_> = grid.rows.iter().filter(|row| row.current).collect();
        assert_eq!(current_rows.len(), 1);
        assert_eq!(current_rows[0].days[0].date, today);
        assert_eq!(current_rows[0].days[0].state, CellState::Today);

        // Exactly one cell is marked today.
        let today_cells = grid
            .rows
            .iter()
            .flat_map(|row| row.days.iter())
            .filter(|cell| cell.state == CellState::Today)
            .count();
        assert_eq!(today_cells, 1);
    }

    #[test]
    fn today_outside_displayed_month_still_emphasized() {
        // 2024-03-01 is visible in February's grid as a trailing day.
        let grid = month_grid(2024, 2, date(2024, 3, 1));
        let cell = grid
            .rows
            .iter()
            .flat_map(|row| row.days.iter())
            .find(|cell| cell.date == date(2024, 3, 1))
            .unwrap();
        assert_eq!(cell.state, CellState::Today);
    }

    #[test]
    fn month_wrapping() {
        assert_eq!(prev_month(2024, 1), (2023, 12));
        assert_eq!(prev_month(2024, 6), (2024, 5));
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(next_month(2024, 6), (2024, 7));
    }
}
