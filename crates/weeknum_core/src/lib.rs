//! Calendar math and UI state for [WeekNum](https://github.com/pbuzdygan/weeknum),
//! a Windows tray utility showing the current ISO week number.
//!
//! This crate is deliberately free of windowing and OS concerns: everything in
//! here is plain data and pure transitions, driven by the `weeknum` app crate.
//! The split keeps the parts with actual invariants (ISO week arithmetic, the
//! 6×7 month grid, the popup state machine, click-vs-drag disambiguation)
//! testable without a display server.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

#![forbid(unsafe_code)]

mod badge;
mod calendar;
mod schedule;
pub mod settings;
mod state;
mod theme;

pub use crate::badge::{BadgeGesture, DragTracker, clamp_to_screen, default_badge_origin};
pub use crate::calendar::{
    CellState, DAY_NAMES, DayCell, GRID_COLS, GRID_ROWS, MonthGrid, WeekRow, iso_week, month_grid,
    month_grid_start, month_name, next_month, prev_month, start_of_iso_week,
};
pub use crate::schedule::{
    Clock, Notice, NoticeKind, Scheduler, SystemClock, THEME_POLL_INTERVAL, ThemeWatch, Tick,
    WEEK_REFRESH_INTERVAL,
};
pub use crate::state::{DisplayState, PickerState, PopupState, PopupView, YEAR_PAGE_LEN};
pub use crate::theme::{
    DEFAULT_ACCENT, Mode, Rgb, Theme, contrast_text, decode_colorization, luminance,
};
