//! The floating week badge. The root viewport is the badge itself: a small
//! frameless always-on-top window that the user can drag anywhere.

use egui::{CornerRadius, FontId, Frame, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};
use weeknum_core::{BadgeGesture, DragTracker, clamp_to_screen, default_badge_origin};

use crate::settings::SavedBadge;
use crate::style::{self, Palette};

/// Pill padding around the label, per side: 8 horizontal, 4 vertical.
const PADDING: Vec2 = Vec2::new(16.0, 8.0);

pub struct Badge {
    origin: Option<Pos2>,
    visible: bool,
    size: Vec2,
    drag: Option<DragTracker>,
    sent_origin: Option<Pos2>,
    sent_passthrough: Option<bool>,
}

impl Badge {
    pub fn new(saved: SavedBadge) -> Self {
        Self {
            origin: saved.origin,
            visible: saved.visible,
            size: Vec2::new(72.0, 34.0),
            drag: None,
            sent_origin: None,
            sent_passthrough: None,
        }
    }

    /// Screen position persisted across runs, once known.
    pub fn origin(&self) -> Option<Pos2> {
        self.origin
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Hiding keeps the window alive but transparent and click-through, so
    /// the frame loop keeps running for the tray.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.drag = None;
        }
    }

    /// Paints the badge and drives the drag. Returns a finished gesture:
    /// `Click` toggles the popup, `Drag` means the position should be saved.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        palette: &Palette,
        week: u32,
    ) -> Option<BadgeGesture> {
        profiling::function_scope!();
        let (outer_rect, monitor_size) = ctx.input(|i| {
            let viewport = i.viewport();
            (viewport.outer_rect, viewport.monitor_size)
        });
        let screen = monitor_size
            .map(|size| Rect::from_min_size(Pos2::ZERO, size))
            .unwrap_or_else(|| ctx.screen_rect());
        // Headless runs have no window; local and global coordinates match.
        let window_origin = outer_rect.map_or(Pos2::ZERO, |rect| rect.min);

        let wanted_passthrough = !self.visible;
        if self.sent_passthrough != Some(wanted_passthrough) {
            ctx.send_viewport_cmd(egui::ViewportCommand::MousePassthrough(wanted_passthrough));
            self.sent_passthrough = Some(wanted_passthrough);
        }

        let mut gesture = None;
        egui::CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| {
                if !self.visible {
                    return;
                }

                let text = format!("W{week:02}");
                let galley = ui.fonts(|fonts| {
                    fonts.layout_no_wrap(
                        text,
                        FontId::proportional(style::FONT_BADGE),
                        palette.badge_text,
                    )
                });
                let desired = (galley.size() + PADDING).round();
                if desired != self.size {
                    self.size = desired;
                    ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(desired));
                }
                if self.origin.is_none() {
                    self.origin = Some(default_badge_origin(self.size, screen));
                }

                let pill = Rect::from_min_size(Pos2::ZERO, self.size);
                let painter = ui.painter();
                painter.rect_filled(pill, CornerRadius::same(12), palette.badge_bg);
                painter.rect_stroke(
                    pill,
                    CornerRadius::same(12),
                    Stroke::new(1.0, palette.badge_border),
                    StrokeKind::Inside,
                );
                painter.galley(
                    pill.center() - galley.size() / 2.0,
                    galley,
                    palette.badge_text,
                );

                let response = ui.interact(pill, ui.id().with("pill"), Sense::click_and_drag());
                let (pressed, released, pointer) = ctx.input(|i| {
                    (
                        i.pointer.primary_pressed(),
                        i.pointer.primary_released(),
                        i.pointer.latest_pos(),
                    )
                });

                if pressed
                    && response.is_pointer_button_down_on()
                    && let Some(pos) = pointer
                {
                    self.drag = Some(DragTracker::press(
                        window_origin + pos.to_vec2(),
                        window_origin,
                    ));
                }
                if let Some(drag) = self.drag.as_mut()
                    && let Some(pos) = pointer
                    && let Some(new_origin) = drag.pointer_moved(window_origin + pos.to_vec2())
                {
                    self.origin = Some(clamp_to_screen(new_origin, self.size, screen));
                }
                if released && let Some(drag) = self.drag.take() {
                    gesture = Some(drag.release());
                }
            });

        // Window moves are driven from here so clamping happens in one spot.
        if let Some(origin) = self.origin {
            let clamped = clamp_to_screen(origin, self.size, screen);
            self.origin = Some(clamped);
            if self.sent_origin != Some(clamped) {
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(clamped));
                self.sent_origin = Some(clamped);
            }
        }

        gesture
    }
}
