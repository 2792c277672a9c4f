//! Palette derivation: one OS theme in, every color the widgets paint out.

use egui::Color32;

use weeknum_core::{Mode, Rgb, Theme, contrast_text};

/// Font sizes, shared across popup, badge and info dialog.
pub const FONT_HEADLINE: f32 = 24.0;
pub const FONT_HEADER: f32 = 16.0;
pub const FONT_NAV: f32 = 16.0;
pub const FONT_DAY: f32 = 13.0;
pub const FONT_BODY: f32 = 12.0;
pub const FONT_LABEL: f32 = 11.0;
pub const FONT_BADGE: f32 = 16.0;

/// Every color the UI paints, derived from [`Theme`] once per theme change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub mode: Mode,
    pub accent: Color32,

    /// Popup and info dialog background.
    pub shell_bg: Color32,
    /// 1px outline around shells.
    pub border: Color32,
    pub text: Color32,
    /// Day-of-week header and week-number column.
    pub text_secondary: Color32,
    /// Days belonging to adjacent months.
    pub text_dim: Color32,

    /// Flat button hover.
    pub hover_bg: Color32,
    /// Flat button press, also the picker's current month/year highlight.
    pub press_bg: Color32,
    /// Current-week row tint.
    pub week_bg: Color32,
    pub today_bg: Color32,
    pub today_text: Color32,

    pub badge_bg: Color32,
    pub badge_border: Color32,
    pub badge_text: Color32,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        let accent = theme.accent;
        let badge_text = contrast_text(accent);

        match theme.mode {
            Mode::Dark => Self {
                mode: Mode::Dark,
                accent: opaque(accent),
                shell_bg: Color32::from_rgb(32, 32, 32),
                border: Color32::from_white_alpha(26),
                text: Color32::WHITE,
                text_secondary: Color32::WHITE,
                text_dim: tint(Rgb::WHITE, 0.72),
                hover_bg: tint(accent, 0.18),
                press_bg: tint(accent, 0.26),
                week_bg: tint(accent, 0.14),
                today_bg: tint(accent, 0.28),
                today_text: Color32::WHITE,
                badge_bg: tint(accent, 235.0 / 255.0),
                badge_border: Color32::from_black_alpha(70),
                badge_text: opaque(badge_text),
            },
            Mode::Light => Self {
                mode: Mode::Light,
                accent: opaque(accent),
                shell_bg: Color32::WHITE,
                border: Color32::from_black_alpha(20),
                text: Color32::from_rgb(0x1f, 0x1f, 0x1f),
                text_secondary: Color32::from_rgb(0x66, 0x66, 0x66),
                text_dim: tint(Rgb::BLACK, 0.40),
                hover_bg: tint(accent, 0.08),
                press_bg: tint(accent, 0.14),
                week_bg: tint(accent, 0.07),
                today_bg: tint(accent, 0.15),
                today_text: opaque(accent),
                badge_bg: tint(accent, 235.0 / 255.0),
                badge_border: Color32::from_black_alpha(70),
                badge_text: opaque(badge_text),
            },
        }
    }
}

/// Pushes the palette into egui's own widgets (buttons, hyperlinks,
/// selection, text) so the stock widgets match the themed ones. Buttons are
/// flat: invisible at rest, tinted on hover and press.
pub fn apply(ctx: &egui::Context, palette: &Palette) {
    let mut visuals = match palette.mode {
        Mode::Dark => egui::Visuals::dark(),
        Mode::Light => egui::Visuals::light(),
    };
    visuals.selection.bg_fill = palette.press_bg;
    visuals.selection.stroke.color = palette.text;
    visuals.hyperlink_color = palette.accent;
    visuals.override_text_color = Some(palette.text);
    visuals.window_fill = palette.shell_bg;
    visuals.window_stroke = egui::Stroke::new(1.0, palette.border);

    let widgets = &mut visuals.widgets;
    widgets.inactive.weak_bg_fill = Color32::TRANSPARENT;
    widgets.hovered.weak_bg_fill = palette.hover_bg;
    widgets.active.weak_bg_fill = palette.press_bg;
    widgets.open.weak_bg_fill = palette.press_bg;
    for state in [
        &mut widgets.noninteractive,
        &mut widgets.inactive,
        &mut widgets.hovered,
        &mut widgets.active,
        &mut widgets.open,
    ] {
        state.corner_radius = egui::CornerRadius::same(8);
        state.bg_stroke = egui::Stroke::NONE;
        state.fg_stroke.color = palette.text;
    }
    visuals.widgets.noninteractive.fg_stroke.color = palette.text_secondary;

    // Both theme slots, so egui's own system-theme follow can never swap the
    // palette out from under us between polls.
    ctx.set_visuals_of(egui::Theme::Dark, visuals.clone());
    ctx.set_visuals_of(egui::Theme::Light, visuals);
}

fn opaque(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

fn tint(color: Rgb, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, (alpha * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_today_text_is_the_accent_itself() {
        let palette = Palette::from_theme(&Theme::default());
        assert_eq!(palette.mode, Mode::Light);
        assert_eq!(palette.today_text, Color32::from_rgb(0, 120, 212));
        assert_eq!(palette.shell_bg, Color32::WHITE);
    }

    #[test]
    fn dark_today_text_is_white() {
        let theme = Theme {
            mode: Mode::Dark,
            ..Theme::default()
        };
        let palette = Palette::from_theme(&theme);
        assert_eq!(palette.today_text, Color32::WHITE);
        assert_eq!(palette.shell_bg, Color32::from_rgb(32, 32, 32));
    }

    #[test]
    fn badge_text_contrasts_with_accent() {
        // The stock blue is dark enough to want white text.
        let palette = Palette::from_theme(&Theme::default());
        assert_eq!(palette.badge_text, Color32::WHITE);

        let pale = Theme {
            accent: Rgb::new(240, 240, 180),
            ..Theme::default()
        };
        assert_eq!(Palette::from_theme(&pale).badge_text, Color32::BLACK);
    }

    #[test]
    fn tints_use_fractional_alpha() {
        let palette = Palette::from_theme(&Theme::default());
        assert_eq!(palette.week_bg.a(), 18); // 7% of 255
        assert_eq!(palette.hover_bg.a(), 20); // 8%
        assert_eq!(palette.today_bg.a(), 38); // 15%
        assert_eq!(palette.badge_bg.a(), 235);
    }
}
