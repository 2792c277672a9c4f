//! Popup state machine: displayed month, picker sub-views, pin and
//! visibility transitions.
//!
//! All transitions live here so the UI layer stays a thin render of this
//! state. `today` is always passed in by the caller.

use chrono::{Datelike as _, NaiveDate};

use crate::calendar;

/// Years shown per picker page (3×3).
pub const YEAR_PAGE_LEN: usize = 9;

/// How far the first year page reaches back from the current year.
const YEAR_PAGE_BACK: i32 = 4;

/// The month the calendar currently displays. Independent of today's date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DisplayState {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl DisplayState {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn prev_month(&mut self) {
        (self.year, self.month) = calendar::prev_month(self.year, self.month);
    }

    pub fn next_month(&mut self) {
        (self.year, self.month) = calendar::next_month(self.year, self.month);
    }
}

/// Which of the three popup views is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PopupView {
    #[default]
    Calendar,
    /// Month picker (3×4 grid).
    Months,
    /// Year picker (3×3 page).
    Years,
}

/// Transient picker selections. Only committed to [`DisplayState`] when a
/// month is picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PickerState {
    /// Year the month grid will commit to.
    pub picker_year: i32,
    /// First year of the visible year page.
    pub year_page_start: i32,
}

impl PickerState {
    fn new(display_year: i32, current_year: i32) -> Self {
        Self {
            picker_year: display_year,
            year_page_start: current_year - YEAR_PAGE_BACK,
        }
    }
}

// ----------------------------------------------------------------------------

/// The whole popup: displayed month, active view, picker scratch state,
/// pin flag and visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopupState {
    pub display: DisplayState,
    pub view: PopupView,
    pub picker: PickerState,
    /// Pinned popups ignore focus loss.
    pub pinned: bool,
    pub open: bool,
    /// Set while a pin toggle re-shows the window; eats the focus-loss event
    /// that re-showing produces. Cleared by the caller one tick later.
    pub suppress_hide: bool,
}

impl PopupState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            display: DisplayState::from_date(today),
            view: PopupView::Calendar,
            picker: PickerState::new(today.year(), today.year()),
            pinned: false,
            open: false,
            suppress_hide: false,
        }
    }

    /// Everything back to defaults: today's month, calendar view, picker
    /// scratch re-seeded. Visibility and pin are left alone.
    pub fn reset_to_default(&mut self, today: NaiveDate) {
        self.display = DisplayState::from_date(today);
        self.view = PopupView::Calendar;
        self.picker = PickerState::new(self.display.year, today.year());
    }

    /// Show/hide from the tray or the badge. Opening resets to defaults;
    /// closing keeps state, so pinning right afterwards brings back the same
    /// month.
    ///
    /// Returns whether the popup is open afterwards.
    pub fn toggle(&mut self, today: NaiveDate) -> bool {
        if self.open {
            self.open = false;
        } else {
            self.reset_to_default(today);
            self.open = true;
        }
        self.open
    }

    /// Escape: hide without resetting, so reopening via pin or toggle shows
    /// the same month again.
    pub fn dismiss_escape(&mut self) {
        self.open = false;
    }

    /// The popup lost focus. Unpinned and unsuppressed popups reset to
    /// defaults *and* hide; pinned or suppressed ones ignore it.
    ///
    /// Returns whether the popup hid.
    pub fn focus_lost(&mut self, today: NaiveDate) -> bool {
        if self.open && !self.pinned && !self.suppress_hide {
            self.reset_to_default(today);
            self.open = false;
            true
        } else {
            false
        }
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
        // Re-showing or raising the window steals focus for a moment.
        self.suppress_hide = true;
    }

    /// Pin from the tray: pinning also shows the popup, unpinning hides it
    /// without resetting.
    pub fn toggle_pin(&mut self) {
        self.set_pinned(!self.pinned);
        self.open = self.pinned;
    }

    pub fn clear_suppress_hide(&mut self) {
        self.suppress_hide = false;
    }

    // -- header and picker transitions ---------------------------------------

    /// The header month/year button: opens the month picker from the
    /// calendar, returns to the calendar from either picker view.
    pub fn toggle_picker(&mut self, today: NaiveDate) {
        if self.view == PopupView::Calendar {
            self.picker = PickerState::new(self.display.year, today.year());
            self.view = PopupView::Months;
        } else {
            self.view = PopupView::Calendar;
        }
    }

    /// A month cell in the picker commits `picker_year` + `month` and returns
    /// to the calendar.
    pub fn pick_month(&mut self, month: u32) {
        debug_assert!((1..=12).contains(&month));
        self.display = DisplayState {
            year: self.picker.picker_year,
            month,
        };
        self.view = PopupView::Calendar;
    }

    /// The year button in the month picker switches to the year page.
    pub fn open_years(&mut self) {
        self.view = PopupView::Years;
    }

    /// A year cell selects the year and drops back to the month picker.
    pub fn pick_year(&mut self, year: i32) {
        self.picker.picker_year = year;
        self.view = PopupView::Months;
    }

    pub fn prev_years_page(&mut self) {
        self.picker.year_page_start -= YEAR_PAGE_LEN as i32;
    }

    pub fn next_years_page(&mut self) {
        self.picker.year_page_start += YEAR_PAGE_LEN as i32;
    }

    /// The years on the visible picker page, in order.
    pub fn year_page(&self) -> [i32; YEAR_PAGE_LEN] {
        std::array::from_fn(|i| self.picker.year_page_start + i as i32)
    }

    // -- calendar-view operations --------------------------------------------

    /// The "Today" button: jump the displayed month back to today without
    /// changing the view.
    pub fn go_today(&mut self, today: NaiveDate) {
        self.display = DisplayState::from_date(today);
    }

    pub fn prev_month(&mut self) {
        self.display.prev_month();
    }

    pub fn next_month(&mut self) {
        self.display.next_month();
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 25).unwrap()
    }

    #[test]
    fn new_defaults() {
        let state = PopupState::new(today());
        assert_eq!(state.display, DisplayState { year: 2025, month: 8 });
        assert_eq!(state.view, PopupView::Calendar);
        assert_eq!(state.picker.picker_year, 2025);
        assert_eq!(state.picker.year_page_start, 2021);
        assert!(!state.pinned);
        assert!(!state.open);
        assert!(!state.suppress_hide);
    }

    #[test]
    fn toggle_opens_reset_and_closes_preserving() {
        let mut state = PopupState::new(today());
        assert!(state.toggle(today()));
        state.next_month();
        state.next_month();
        assert_eq!(state.display.month, 10);

        // Closing keeps the navigated month.
        assert!(!state.toggle(today()));
        assert_eq!(state.display.month, 10);

        // Reopening resets it.
        assert!(state.toggle(today()));
        assert_eq!(state.display.month, 8);
    }

    #[test]
    fn escape_hides_without_reset() {
        let mut state = PopupState::new(today());
        state.toggle(today());
        state.prev_month();
        state.dismiss_escape();
        assert!(!state.open);
        assert_eq!(state.display, DisplayState { year: 2025, month: 7 });
        assert_eq!(state.view, PopupView::Calendar);
    }

    #[test]
    fn focus_loss_resets_and_hides_when_unpinned() {
        let mut state = PopupState::new(today());
        state.toggle(today());
        state.next_month();
        state.toggle_picker(today());
        assert_eq!(state.view, PopupView::Months);

        assert!(state.focus_lost(today()));
        assert!(!state.open);
        assert_eq!(state.display, DisplayState { year: 2025, month: 8 });
        assert_eq!(state.view, PopupView::Calendar);
    }

    #[test]
    fn focus_loss_ignored_when_pinned() {
        let mut state = PopupState::new(today());
        state.toggle(today());
        state.set_pinned(true);
        state.clear_suppress_hide();
        state.next_month();

        assert!(!state.focus_lost(today()));
        assert!(state.open);
        assert_eq!(state.display.month, 9);
    }

    #[test]
    fn focus_loss_ignored_while_suppressed_then_honored() {
        let mut state = PopupState::new(today());
        state.toggle(today());
        state.set_pinned(true);
        state.set_pinned(false);
        assert!(state.suppress_hide);

        // The focus blip from re-showing the window is swallowed.
        assert!(!state.focus_lost(today()));
        assert!(state.open);

        state.clear_suppress_hide();
        assert!(state.focus_lost(today()));
        assert!(!state.open);
    }

    #[test]
    fn focus_loss_while_closed_is_noop() {
        let mut state = PopupState::new(today());
        assert!(!state.focus_lost(today()));
    }

    #[test]
    fn pin_toggle_shows_and_unpin_hides_without_reset() {
        let mut state = PopupState::new(today());
        state.toggle_pin();
        assert!(state.pinned);
        assert!(state.open);
        assert!(state.suppress_hide);

        state.clear_suppress_hide();
        state.next_month();
        state.toggle_pin();
        assert!(!state.pinned);
        assert!(!state.open);
        // Hidden by the unpin, not reset.
        assert_eq!(state.display.month, 9);
    }

    #[test]
    fn picker_snapshot_on_open() {
        let mut state = PopupState::new(today());
        state.toggle(today());
        state.next_month(); // September
        state.next_month(); // October
        state.toggle_picker(today());

        assert_eq!(state.view, PopupView::Months);
        assert_eq!(state.picker.picker_year, 2025);
        assert_eq!(state.picker.year_page_start, 2021);
    }

    #[test]
    fn header_button_toggles_back_from_either_picker_view() {
        let mut state = PopupState::new(today());
        state.toggle(today());

        state.toggle_picker(today());
        assert_eq!(state.view, PopupView::Months);
        state.toggle_picker(today());
        assert_eq!(state.view, PopupView::Calendar);

        state.toggle_picker(today());
        state.open_years();
        assert_eq!(state.view, PopupView::Years);
        state.toggle_picker(today());
        assert_eq!(state.view, PopupView::Calendar);
    }

    #[test]
    fn pick_month_commits_picker_year() {
        let mut state = PopupState::new(today());
        state.toggle(today());
        state.toggle_picker(today());
        state.open_years();
        state.pick_year(1999);
        assert_eq!(state.view, PopupView::Months);
        assert_eq!(state.picker.picker_year, 1999);
        // Display untouched until a month is picked.
        assert_eq!(state.display.year, 2025);

        state.pick_month(3);
        assert_eq!(state.view, PopupView::Calendar);
        assert_eq!(state.display, DisplayState { year: 1999, month: 3 });
    }

    #[test]
    fn year_paging_by_page_length() {
        let mut state = PopupState::new(today());
        assert_eq!(state.year_page(), [2021, 2022, 2023, 2024, 2025, 2026, 2027, 2028, 2029]);

        state.next_years_page();
        assert_eq!(state.picker.year_page_start, 2030);
        state.prev_years_page();
        state.prev_years_page();
        assert_eq!(state.picker.year_page_start, 2012);
        assert_eq!(state.year_page()[8], 2020);
    }

    #[test]
    fn year_page_persists_until_reset() {
        let mut state = PopupState::new(today());
        state.toggle(today());
        state.toggle_picker(today());
        state.open_years();
        state.next_years_page();
        state.pick_year(2031);
        state.toggle_picker(today()); // back to calendar, not a reset

        // Reopening the picker re-seeds the page around the current year.
        state.toggle_picker(today());
        assert_eq!(state.picker.year_page_start, 2021);
    }

    #[test]
    fn today_button_keeps_view() {
        let mut state = PopupState::new(today());
        state.toggle(today());
        state.next_month();
        state.go_today(today());
        assert_eq!(state.display, DisplayState { year: 2025, month: 8 });
        assert_eq!(state.view, PopupView::Calendar);
    }

    #[test]
    fn month_navigation_wraps_year() {
        let mut state = PopupState::new(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        state.prev_month();
        assert_eq!(state.display, DisplayState { year: 2024, month: 12 });
        state.next_month();
        assert_eq!(state.display, DisplayState { year: 2025, month: 1 });
    }
}
