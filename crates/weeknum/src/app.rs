//! Ties the pieces together: one root viewport (the badge), the tray, and
//! the popup/info/toast child viewports, driven by the scheduler.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use egui::{CornerRadius, Frame, Margin, Pos2, RichText, Stroke, Vec2, pos2};
use weeknum_core::{
    BadgeGesture, Clock, Mode, Notice, PopupState, Scheduler, SystemClock, ThemeWatch, Tick,
    iso_week,
};

use crate::badge::Badge;
use crate::icon;
use crate::info::InfoDialog;
use crate::platform::{self, Autostart, PlatformError};
use crate::popup::{self, CalendarPopup};
use crate::settings;
use crate::style::{self, Palette};
use crate::tray::{Tray, TrayCommand};

/// Frames to wait before honoring focus events again after a dismissal or a
/// pin toggle; the window system delivers them one frame late.
const FOCUS_GRACE_FRAMES: u8 = 2;

pub struct WeekNumApp {
    clock: Box<dyn Clock>,
    scheduler: Scheduler,
    theme: ThemeWatch,
    palette: Palette,
    week: u32,

    badge: Badge,
    popup: PopupState,
    popup_ui: CalendarPopup,
    popup_pos: Option<Pos2>,
    info: Option<InfoDialog>,
    notice: Option<Notice>,

    tray: Tray,
    autostart: Option<Autostart>,
    autostart_on: bool,

    icon_key: Option<(u32, Mode)>,
    suppress_ttl: u8,
    recently_dismissed: u8,
}

impl WeekNumApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, PlatformError> {
        Self::with_clock(cc, Box::new(SystemClock))
    }

    /// Like [`Self::new`] but with an injectable clock, for tests.
    pub fn with_clock(
        cc: &eframe::CreationContext<'_>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, PlatformError> {
        let today = clock.today();
        let now = clock.now();

        let theme = ThemeWatch::new(platform::probe_theme());
        let palette = Palette::from_theme(&theme.current());
        style::apply(&cc.egui_ctx, &palette);

        let badge = Badge::new(settings::load_badge(cc.storage));
        let week = iso_week(today);
        let popup = PopupState::new(today);

        let autostart = match Autostart::new() {
            Ok(autostart) => Some(autostart),
            Err(err) => {
                log::warn!("autostart unavailable: {err}");
                None
            }
        };
        let autostart_on = autostart.as_ref().is_some_and(Autostart::is_enabled);

        let tray = Tray::new(
            &cc.egui_ctx,
            week,
            theme.current().mode,
            badge.visible(),
            autostart.as_ref().map(|_| autostart_on),
            popup.pinned,
        )?;

        Ok(Self {
            clock,
            scheduler: Scheduler::new(now),
            theme,
            palette,
            week,
            badge,
            popup,
            popup_ui: CalendarPopup::default(),
            popup_pos: None,
            info: None,
            notice: None,
            tray,
            autostart,
            autostart_on,
            icon_key: None,
            suppress_ttl: 0,
            recently_dismissed: 0,
        })
    }

    /// The popup's navigation state, for driving it from tests.
    pub fn popup_state(&self) -> &PopupState {
        &self.popup
    }

    pub fn popup_state_mut(&mut self) -> &mut PopupState {
        &mut self.popup
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    fn refresh_week(&mut self, ctx: &egui::Context, today: NaiveDate) {
        let week = iso_week(today);
        if week != self.week {
            self.week = week;
            self.tray.update_week(week, self.theme.current().mode);
            self.push_window_icon(ctx);
        }
    }

    fn poll_theme(&mut self, ctx: &egui::Context) {
        if let Some(theme) = self.theme.observe(platform::probe_theme()) {
            self.palette = Palette::from_theme(&theme);
            style::apply(ctx, &self.palette);
            self.tray.update_week(self.week, theme.mode);
            self.push_window_icon(ctx);
        }
    }

    /// Keeps the window icon in sync with the week digits and theme.
    fn push_window_icon(&mut self, ctx: &egui::Context) {
        let key = (self.week, self.theme.current().mode);
        if self.icon_key != Some(key) {
            self.icon_key = Some(key);
            let icon = icon::viewport_icon(key.0, key.1);
            ctx.send_viewport_cmd(egui::ViewportCommand::Icon(Some(Arc::new(icon))));
        }
    }

    fn toggle_popup(&mut self, ctx: &egui::Context, today: NaiveDate) {
        if self.recently_dismissed > 0 {
            // The same click already dismissed the popup via focus loss.
            return;
        }
        if self.popup.toggle(today) {
            self.popup_ui.prepare_open();
            self.popup_pos = Some(popup_position(ctx));
        }
    }

    fn apply_tray_commands(
        &mut self,
        ctx: &egui::Context,
        frame: &mut eframe::Frame,
        today: NaiveDate,
    ) {
        for command in self.tray.drain() {
            match command {
                TrayCommand::ToggleWindow => self.toggle_popup(ctx, today),
                TrayCommand::ToggleBadge => {
                    let visible = !self.badge.visible();
                    self.badge.set_visible(visible);
                    self.tray.set_badge_visible(visible);
                    self.persist_badge(frame);
                }
                TrayCommand::ToggleAutostart => self.toggle_autostart(),
                TrayCommand::ShowInfo => {
                    self.info = Some(InfoDialog::default());
                }
                TrayCommand::TogglePin => {
                    let was_open = self.popup.open;
                    self.popup.toggle_pin();
                    self.tray.set_pinned(self.popup.pinned);
                    self.suppress_ttl = FOCUS_GRACE_FRAMES;
                    if self.popup.open && !was_open {
                        self.popup_ui.prepare_open();
                        self.popup_pos = Some(popup_position(ctx));
                    }
                }
                TrayCommand::Quit => {
                    self.persist_badge(frame);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn toggle_autostart(&mut self) {
        let Some(autostart) = &self.autostart else {
            return;
        };
        let target = !self.autostart_on;
        match autostart.set_enabled(target) {
            Ok(()) => {
                self.autostart_on = target;
                self.tray.set_autostart_checked(target);
                let text = if target {
                    "Autostart enabled."
                } else {
                    "Autostart disabled."
                };
                self.notice = Some(Notice::info(text, self.clock.now()));
            }
            Err(err) => {
                log::warn!("failed to update autostart: {err}");
                self.tray.set_autostart_checked(self.autostart_on);
                self.notice = Some(Notice::warning(
                    "Failed to update autostart setting.",
                    self.clock.now(),
                ));
            }
        }
    }

    fn persist_badge(&mut self, frame: &mut eframe::Frame) {
        if let Some(storage) = frame.storage_mut() {
            settings::save_badge(storage, self.badge.origin(), self.badge.visible());
            storage.flush();
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(notice) = &self.notice else {
            return;
        };
        if notice.expired(now) {
            self.notice = None;
            return;
        }

        let text = notice.text.clone();
        let palette = &self.palette;
        let size = Vec2::new(320.0, 72.0);
        let monitor = ctx.input(|i| i.viewport().monitor_size);
        let pos = monitor.map_or(pos2(80.0, 80.0), |m| {
            pos2(m.x - size.x - 8.0, m.y - size.y - 8.0 - 24.0)
        });

        let id = egui::Id::new("notice_toast");
        let builder = egui::ViewportBuilder::default()
            .with_title("WeekNum")
            .with_decorations(false)
            .with_transparent(true)
            .with_taskbar(false)
            .with_resizable(false)
            .with_always_on_top()
            .with_inner_size(size)
            .with_position(pos)
            // Toasts must not steal focus from the popup.
            .with_active(false);

        ctx.show_viewport_immediate(egui::ViewportId(id), builder, |ctx, class| {
            if class == egui::ViewportClass::Embedded {
                egui::Window::new("WeekNum")
                    .id(id)
                    .title_bar(false)
                    .resizable(false)
                    .fixed_size(size)
                    .frame(Frame::NONE)
                    .show(ctx, |ui| toast_contents(ui, palette, &text));
                return;
            }
            egui::CentralPanel::default()
                .frame(Frame::NONE)
                .show(ctx, |ui| toast_contents(ui, palette, &text));
        });
    }
}

impl eframe::App for WeekNumApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        profiling::function_scope!();
        let now = self.clock.now();
        let today = self.clock.today();

        self.push_window_icon(ctx);
        for tick in self.scheduler.poll(now) {
            match tick {
                Tick::WeekRefresh => self.refresh_week(ctx, today),
                Tick::ThemePoll => self.poll_theme(ctx),
            }
        }

        self.apply_tray_commands(ctx, frame, today);

        match self.badge.show(ctx, &self.palette, self.week) {
            Some(BadgeGesture::Click) => self.toggle_popup(ctx, today),
            Some(BadgeGesture::Drag) => self.persist_badge(frame),
            None => {}
        }

        if self.popup.open {
            let pos = *self.popup_pos.get_or_insert_with(|| popup_position(ctx));
            let output = self
                .popup_ui
                .show(ctx, &mut self.popup, &self.palette, today, pos);
            if output.dismissed_by_focus {
                self.recently_dismissed = FOCUS_GRACE_FRAMES;
            }
        }

        if let Some(mut info) = self.info.take()
            && info.show(ctx, &self.palette)
        {
            self.info = Some(info);
        }

        self.show_notice(ctx, now);

        self.recently_dismissed = self.recently_dismissed.saturating_sub(1);
        if self.suppress_ttl > 0 {
            self.suppress_ttl -= 1;
            if self.suppress_ttl == 0 {
                self.popup.clear_suppress_hide();
            }
        }

        let mut deadline = self.scheduler.next_deadline();
        if let Some(notice) = &self.notice {
            deadline = deadline.min(notice.deadline());
        }
        ctx.request_repaint_after(deadline.saturating_duration_since(now));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        settings::save_badge(storage, self.badge.origin(), self.badge.visible());
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Every viewport here is a shaped window on a transparent backdrop.
        egui::Color32::TRANSPARENT.to_normalized_gamma_f32()
    }
}

/// Bottom-right, just above where a taskbar usually sits.
fn popup_position(ctx: &egui::Context) -> Pos2 {
    let monitor = ctx.input(|i| i.viewport().monitor_size);
    match monitor {
        Some(size) => pos2(
            size.x - popup::POPUP_SIZE.x - 8.0,
            size.y - popup::POPUP_SIZE.y - 8.0 - 24.0,
        ),
        None => pos2(80.0, 60.0),
    }
}

fn toast_contents(ui: &mut egui::Ui, palette: &Palette, text: &str) {
    Frame::new()
        .fill(palette.shell_bg)
        .stroke(Stroke::new(1.0, palette.border))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::same(12))
        .outer_margin(Margin::same(8))
        .show(ui, |ui| {
            ui.set_min_size(ui.available_size());
            ui.spacing_mut().item_spacing.y = 4.0;
            ui.label(RichText::new("WeekNum").size(style::FONT_BODY).strong());
            ui.label(
                RichText::new(text)
                    .size(style::FONT_BODY)
                    .color(palette.text_secondary),
            );
        });
}
