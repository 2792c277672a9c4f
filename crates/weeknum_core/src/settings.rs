//! Settings keys and the forgiving value parsing used when loading them.
//!
//! Values are stored as strings. Anything missing or malformed falls back to
//! its default; the app never refuses to start over bad settings.

/// Saved badge x coordinate (screen space, integer).
pub const BADGE_X: &str = "badge/x";

/// Saved badge y coordinate.
pub const BADGE_Y: &str = "badge/y";

/// Whether the badge is shown. Missing means shown.
pub const BADGE_VISIBLE: &str = "badge/visible";

/// Parses a stored flag. Only `"0"`, `"false"` and `"no"` (any case,
/// surrounding whitespace ignored) are false, everything else is true.
pub fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no")
}

/// Parses a stored coordinate. `None` on anything that is not an integer.
pub fn parse_coord(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_flag_spellings() {
        for value in ["0", "false", "FALSE", "False", "no", " No ", "\tfalse\n"] {
            assert!(!parse_flag(value), "{value:?} should be false");
        }
    }

    #[test]
    fn everything_else_is_truthy() {
        for value in ["1", "true", "yes", "on", "visible", "2", ""] {
            assert!(parse_flag(value), "{value:?} should be true");
        }
    }

    #[test]
    fn coordinates_parse_strictly() {
        assert_eq!(parse_coord("120"), Some(120));
        assert_eq!(parse_coord(" -5 "), Some(-5));
        assert_eq!(parse_coord("+40"), Some(40));
        assert_eq!(parse_coord("12.5"), None);
        assert_eq!(parse_coord("abc"), None);
        assert_eq!(parse_coord(""), None);
    }
}
