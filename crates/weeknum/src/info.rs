//! The about dialog, opened from the tray menu.

use egui::{Button, CornerRadius, Frame, Margin, RichText, Stroke, Vec2};

use crate::style::{self, Palette};

const INFO_SIZE: Vec2 = Vec2::new(400.0, 220.0);

/// Focus bookkeeping for the dialog viewport; dropped when it closes.
#[derive(Default)]
pub struct InfoDialog {
    was_focused: bool,
}

impl InfoDialog {
    /// Shows the dialog. Returns false once it should close: Close button,
    /// Escape, or losing focus.
    pub fn show(&mut self, ctx: &egui::Context, palette: &Palette) -> bool {
        let id = egui::Id::new("info_dialog");
        let builder = egui::ViewportBuilder::default()
            .with_title("Info")
            .with_decorations(false)
            .with_transparent(true)
            .with_taskbar(false)
            .with_resizable(false)
            .with_inner_size(INFO_SIZE)
            .with_active(true);

        ctx.show_viewport_immediate(egui::ViewportId(id), builder, |ctx, class| {
            let mut keep_open = true;

            if class == egui::ViewportClass::Embedded {
                egui::Window::new("Info")
                    .id(id)
                    .title_bar(false)
                    .resizable(false)
                    .fixed_size(INFO_SIZE)
                    .frame(Frame::NONE)
                    .show(ctx, |ui| {
                        if contents(ui, palette) {
                            keep_open = false;
                        }
                    });
                return keep_open;
            }

            let (focused, close_requested, escape) = ctx.input(|i| {
                (
                    i.viewport().focused.unwrap_or(false),
                    i.viewport().close_requested(),
                    i.key_pressed(egui::Key::Escape),
                )
            });
            if focused {
                self.was_focused = true;
            } else if self.was_focused {
                // Unlike the popup there is no pinning; deactivation closes.
                keep_open = false;
            }
            if escape || close_requested {
                keep_open = false;
            }

            egui::CentralPanel::default()
                .frame(Frame::NONE)
                .show(ctx, |ui| {
                    if contents(ui, palette) {
                        keep_open = false;
                    }
                });
            keep_open
        })
    }
}

/// Returns true when the Close button was clicked.
fn contents(ui: &mut egui::Ui, palette: &Palette) -> bool {
    let mut close = false;
    Frame::new()
        .fill(palette.shell_bg)
        .stroke(Stroke::new(1.0, palette.border))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::same(12))
        .outer_margin(Margin::same(8))
        .show(ui, |ui| {
            ui.set_min_size(ui.available_size());

            ui.vertical_centered(|ui| {
                ui.add_space(6.0);
                ui.label(
                    RichText::new("WeekNum App")
                        .size(style::FONT_HEADLINE)
                        .strong(),
                );
            });
            ui.add_space(10.0);

            ui.spacing_mut().item_spacing.y = 6.0;
            ui.horizontal(|ui| {
                ui.label(secondary("Project:", palette));
                ui.hyperlink_to(
                    RichText::new("https://github.com/pbuzdygan/weeknum").size(style::FONT_BODY),
                    "https://github.com/pbuzdygan/weeknum",
                );
            });
            ui.label(secondary("Author: Przemyslaw Buzdygan", palette));
            ui.horizontal(|ui| {
                ui.label(secondary("GitHub:", palette));
                ui.hyperlink_to(
                    RichText::new("https://www.github.com/pbuzdygan").size(style::FONT_BODY),
                    "https://www.github.com/pbuzdygan",
                );
            });
            ui.label(secondary(
                &format!("Version: {}", env!("CARGO_PKG_VERSION")),
                palette,
            ));

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Max), |ui| {
                let button = Button::new(RichText::new("Close").size(style::FONT_BODY));
                if ui.add_sized([64.0, 26.0], button).clicked() {
                    close = true;
                }
            });
        });
    close
}

fn secondary(text: &str, palette: &Palette) -> RichText {
    RichText::new(text)
        .size(style::FONT_BODY)
        .color(palette.text_secondary)
}
