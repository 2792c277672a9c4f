//! The popup calendar: a fixed-size frameless viewport with the week grid
//! and the month/year picker views.

use chrono::{Datelike as _, NaiveDate};
use egui::{
    Align2, Button, Color32, CornerRadius, FontId, Frame, Margin, Pos2, RichText, Stroke, Vec2,
};
use egui_extras::{Column, TableBuilder};
use weeknum_core::{
    CellState, DAY_NAMES, DayCell, PopupState, PopupView, WeekRow, month_grid, month_name,
};

use crate::style::{self, Palette};

/// Fixed popup size; the grid is sized for it, so it is not resizable.
pub const POPUP_SIZE: Vec2 = Vec2::new(420.0, 340.0);

const MONTH_ROWS: usize = 4;
const YEAR_ROWS: usize = 3;
const PICKER_COLS: usize = 3;

/// What the popup did this frame. The app uses the focus flag to keep the
/// click that stole focus from immediately reopening the popup.
#[derive(Clone, Copy, Debug, Default)]
pub struct PopupOutput {
    pub dismissed_by_focus: bool,
}

/// Window-side bookkeeping for the popup; the navigation state itself lives
/// in [`PopupState`].
#[derive(Default)]
pub struct CalendarPopup {
    was_focused: bool,
}

impl CalendarPopup {
    /// Forgets stale focus tracking from the previous time the popup was on
    /// screen. Call when the popup transitions to open.
    pub fn prepare_open(&mut self) {
        self.was_focused = false;
    }

    /// Shows the popup viewport and routes its input into `state`. Only call
    /// while the popup is open.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        state: &mut PopupState,
        palette: &Palette,
        today: NaiveDate,
        pos: Pos2,
    ) -> PopupOutput {
        profiling::function_scope!();
        let id = egui::Id::new("calendar_popup");
        let builder = egui::ViewportBuilder::default()
            .with_title("Calendar - week numbers")
            .with_decorations(false)
            .with_transparent(true)
            .with_taskbar(false)
            .with_resizable(false)
            .with_always_on_top()
            .with_inner_size(POPUP_SIZE)
            .with_position(pos)
            .with_active(true);

        ctx.show_viewport_immediate(egui::ViewportId(id), builder, |ctx, class| {
            let mut output = PopupOutput::default();
            if class == egui::ViewportClass::Embedded {
                // No native viewports here (tests); show a plain window.
                egui::Window::new("Calendar - week numbers")
                    .id(id)
                    .title_bar(false)
                    .resizable(false)
                    .fixed_size(POPUP_SIZE)
                    .frame(Frame::NONE)
                    .show(ctx, |ui| {
                        contents(ui, state, palette, today);
                    });
                return output;
            }

            self.handle_input(ctx, state, today, &mut output);
            egui::CentralPanel::default()
                .frame(Frame::NONE)
                .show(ctx, |ui| {
                    contents(ui, state, palette, today);
                });
            output
        })
    }

    /// Focus loss and keyboard handling, in the popup viewport's input.
    fn handle_input(
        &mut self,
        ctx: &egui::Context,
        state: &mut PopupState,
        today: NaiveDate,
        output: &mut PopupOutput,
    ) {
        let (focused, close_requested, escape, left, right) = ctx.input(|i| {
            (
                i.viewport().focused.unwrap_or(false),
                i.viewport().close_requested(),
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
            )
        });

        if focused {
            self.was_focused = true;
        } else if self.was_focused {
            // Deactivated. Unless pinned (or mid pin toggle) this dismisses.
            self.was_focused = false;
            if state.focus_lost(today) {
                output.dismissed_by_focus = true;
                return;
            }
        }

        if escape || close_requested {
            state.dismiss_escape();
            self.was_focused = false;
            return;
        }
        if left {
            state.prev_month();
        }
        if right {
            state.next_month();
        }
    }
}

/// The rounded shell and whichever view is active.
fn contents(ui: &mut egui::Ui, state: &mut PopupState, palette: &Palette, today: NaiveDate) {
    Frame::new()
        .fill(palette.shell_bg)
        .stroke(Stroke::new(1.0, palette.border))
        .corner_radius(CornerRadius::same(14))
        .inner_margin(Margin::same(12))
        .outer_margin(Margin::same(8))
        .show(ui, |ui| {
            ui.set_min_size(ui.available_size());
            ui.spacing_mut().item_spacing = egui::vec2(6.0, 8.0);

            header_row(ui, state, today);
            match state.view {
                PopupView::Calendar => calendar_grid(ui, state, palette, today),
                PopupView::Months | PopupView::Years => picker(ui, state, palette, today),
            }
        });
}

/// Month/year label on the left, month navigation and Today on the right.
/// Shown in every view; the arrows page months even while a picker is open.
fn header_row(ui: &mut egui::Ui, state: &mut PopupState, today: NaiveDate) {
    ui.horizontal(|ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let today_btn = Button::new(RichText::new("Today").size(style::FONT_BODY));
            if ui.add_sized([56.0, 28.0], today_btn).clicked() {
                state.go_today(today);
            }
            if nav_button(ui, "▶").clicked() {
                state.next_month();
            }
            if nav_button(ui, "◀").clicked() {
                state.prev_month();
            }

            ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                let label = format!("{} {}", month_name(state.display.month), state.display.year);
                let month_btn = Button::new(RichText::new(label).size(style::FONT_HEADER).strong());
                if ui.add(month_btn).clicked() {
                    state.toggle_picker(today);
                }
            });
        });
    });
}

fn nav_button(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add_sized(
        [32.0, 28.0],
        Button::new(RichText::new(label).size(style::FONT_NAV)),
    )
}

/// Eight columns: the ISO week number, then Monday through Sunday.
fn calendar_grid(ui: &mut egui::Ui, state: &PopupState, palette: &Palette, today: NaiveDate) {
    let grid = month_grid(state.display.year, state.display.month, today);

    ui.spacing_mut().item_spacing = egui::vec2(2.0, 2.0);
    let header_height = 22.0;
    let rows = grid.rows.len() as f32;
    let row_height = (ui.available_height() - header_height - 2.0 * rows) / rows;

    TableBuilder::new(ui)
        .vscroll(false)
        .columns(Column::remainder().clip(true), 8)
        .header(header_height, |mut header| {
            header.col(|_| {});
            for name in DAY_NAMES {
                header.col(|ui| {
                    centered_text(ui, name, style::FONT_LABEL, palette.text_secondary);
                });
            }
        })
        .body(|mut body| {
            for week in &grid.rows {
                body.row(row_height, |mut row| {
                    row.col(|ui| week_cell(ui, week, palette));
                    for day in &week.days {
                        row.col(|ui| day_cell(ui, day, week.current, palette));
                    }
                });
            }
        });
}

fn week_cell(ui: &egui::Ui, week: &WeekRow, palette: &Palette) {
    let rect = ui.max_rect();
    if week.current {
        ui.painter()
            .rect_filled(rect, CornerRadius::same(6), palette.week_bg);
    }
    centered_text(
        ui,
        &format!("W{:02}", week.number),
        style::FONT_LABEL,
        palette.text_secondary,
    );
}

/// Day cells only display; the current week band sits under normal cells,
/// today gets the accent fill, out-of-month days are dimmed.
fn day_cell(ui: &egui::Ui, day: &DayCell, week_current: bool, palette: &Palette) {
    let rect = ui.max_rect();
    let hovered = ui.rect_contains_pointer(rect);
    let (fill, text_color) = match day.state {
        CellState::Today => (Some(palette.today_bg), palette.today_text),
        CellState::Dim => (hovered.then_some(palette.hover_bg), palette.text_dim),
        CellState::Normal => {
            let base = week_current.then_some(palette.week_bg);
            let fill = if hovered { Some(palette.hover_bg) } else { base };
            (fill, palette.text)
        }
    };
    if let Some(fill) = fill {
        ui.painter().rect_filled(rect, CornerRadius::same(8), fill);
    }
    centered_text(ui, &day.date.day().to_string(), style::FONT_DAY, text_color);
}

fn centered_text(ui: &egui::Ui, text: &str, size: f32, color: Color32) {
    ui.painter().text(
        ui.max_rect().center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(size),
        color,
    );
}

/// The picker views share a top row: the year label, flanked by paging
/// arrows once the year grid is open.
fn picker(ui: &mut egui::Ui, state: &mut PopupState, palette: &Palette, today: NaiveDate) {
    let year_paging = state.view == PopupView::Years;
    ui.horizontal(|ui| {
        if year_paging && nav_button(ui, "◀").clicked() {
            state.prev_years_page();
        }
        let year_btn = Button::new(
            RichText::new(state.picker.picker_year.to_string())
                .size(style::FONT_HEADER)
                .strong(),
        );
        if ui.add_sized([64.0, 28.0], year_btn).clicked() {
            state.open_years();
        }
        if year_paging && nav_button(ui, "▶").clicked() {
            state.next_years_page();
        }
    });

    match state.view {
        PopupView::Years => years_grid(ui, state, palette, today),
        _ => months_grid(ui, state, palette, today),
    }
}

fn months_grid(ui: &mut egui::Ui, state: &mut PopupState, palette: &Palette, today: NaiveDate) {
    let current_year = state.picker.picker_year == today.year();
    let mut picked = None;
    picker_grid(ui, MONTH_ROWS, |ui, index, size| {
        let month = index as u32 + 1;
        let mut button = Button::new(RichText::new(month_name(month)).size(style::FONT_BODY));
        if current_year && month == today.month() {
            button = button.fill(palette.press_bg);
        }
        if ui.add_sized(size, button).clicked() {
            picked = Some(month);
        }
    });
    if let Some(month) = picked {
        state.pick_month(month);
    }
}

fn years_grid(ui: &mut egui::Ui, state: &mut PopupState, palette: &Palette, today: NaiveDate) {
    let page = state.year_page();
    let mut picked = None;
    picker_grid(ui, YEAR_ROWS, |ui, index, size| {
        let year = page[index];
        let mut button = Button::new(RichText::new(year.to_string()).size(style::FONT_BODY));
        if year == today.year() {
            button = button.fill(palette.press_bg);
        }
        if ui.add_sized(size, button).clicked() {
            picked = Some(year);
        }
    });
    if let Some(year) = picked {
        state.pick_year(year);
    }
}

/// Lays out `rows` x 3 equally sized cells filling the remaining space.
fn picker_grid(
    ui: &mut egui::Ui,
    rows: usize,
    mut cell: impl FnMut(&mut egui::Ui, usize, Vec2),
) {
    ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);
    let spacing = ui.spacing().item_spacing;
    let width =
        (ui.available_width() - (PICKER_COLS as f32 - 1.0) * spacing.x) / PICKER_COLS as f32;
    let height = (ui.available_height() - (rows as f32 - 1.0) * spacing.y) / rows as f32;
    let size = Vec2::new(width, height);
    for row in 0..rows {
        ui.horizontal(|ui| {
            for col in 0..PICKER_COLS {
                cell(ui, row * PICKER_COLS + col, size);
            }
        });
    }
}
