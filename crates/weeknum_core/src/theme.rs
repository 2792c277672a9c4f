//! Light/dark mode and accent color, decoded from what the OS reports.

/// Light or dark app mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Mode {
    /// The fallback when the OS preference cannot be read.
    #[default]
    Light,
    Dark,
}

impl Mode {
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// An opaque color. Accent comparisons deliberately carry no alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The stock Windows blue, used when no accent can be read.
pub const DEFAULT_ACCENT: Rgb = Rgb::new(0, 120, 212);

/// The pair the poller watches. Two themes are "the same" exactly when mode
/// and accent RGB match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Theme {
    pub mode: Mode,
    pub accent: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: Mode::Light,
            accent: DEFAULT_ACCENT,
        }
    }
}

// ----------------------------------------------------------------------------

/// Splits the DWM `ColorizationColor` dword (ARGB) into color and alpha.
///
/// The OS sometimes reports a nearly transparent alpha; it is raised to at
/// least `0xC0` so anything painted with it stays readable.
pub fn decode_colorization(dword: u32) -> (Rgb, u8) {
    let a = ((dword >> 24) & 0xFF) as u8;
    let rgb = Rgb::new(
        ((dword >> 16) & 0xFF) as u8,
        ((dword >> 8) & 0xFF) as u8,
        (dword & 0xFF) as u8,
    );
    (rgb, a.max(0xC0))
}

/// Relative luminance in 0..=1 (ITU-R BT.709 weights).
pub fn luminance(color: Rgb) -> f32 {
    (0.2126 * f32::from(color.r) + 0.7152 * f32::from(color.g) + 0.0722 * f32::from(color.b))
        / 255.0
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: Rgb) -> Rgb {
    if luminance(background) > 0.6 {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_light_with_stock_accent() {
        let theme = Theme::default();
        assert_eq!(theme.mode, Mode::Light);
        assert_eq!(theme.accent, Rgb::new(0, 120, 212));
    }

    #[test]
    fn colorization_decode_splits_argb() {
        let (rgb, alpha) = decode_colorization(0xFF00_78D4);
        assert_eq!(rgb, Rgb::new(0, 120, 212));
        assert_eq!(alpha, 0xFF);
    }

    #[test]
    fn colorization_alpha_is_raised_to_floor() {
        let (rgb, alpha) = decode_colorization(0x1000_78D4);
        assert_eq!(rgb, Rgb::new(0, 120, 212));
        assert_eq!(alpha, 0xC0);
    }

    #[test]
    fn luminance_endpoints() {
        assert_eq!(luminance(Rgb::BLACK), 0.0);
        assert!((luminance(Rgb::WHITE) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn contrast_text_flips_on_brightness() {
        assert_eq!(contrast_text(Rgb::WHITE), Rgb::BLACK);
        assert_eq!(contrast_text(Rgb::BLACK), Rgb::WHITE);
        assert_eq!(contrast_text(DEFAULT_ACCENT), Rgb::WHITE);
        assert_eq!(contrast_text(Rgb::new(200, 200, 200)), Rgb::BLACK);
    }

    #[test]
    fn theme_comparison_ignores_nothing_but_alpha() {
        // Alpha never reaches Theme, so equal mode+RGB is equal.
        let (accent_a, _) = decode_colorization(0x0A00_78D4);
        let (accent_b, _) = decode_colorization(0xFF00_78D4);
        let a = Theme { mode: Mode::Dark, accent: accent_a };
        let b = Theme { mode: Mode::Dark, accent: accent_b };
        assert_eq!(a, b);

        let c = Theme { mode: Mode::Light, accent: accent_a };
        assert_ne!(a, c);
    }
}
