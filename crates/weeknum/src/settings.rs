//! Loads and saves the badge position and visibility.
//!
//! Values are plain strings in [`eframe::Storage`]; anything missing or
//! malformed falls back to defaults (visible, default corner position).

use egui::{Pos2, pos2};

use weeknum_core::settings::{self as keys, parse_coord, parse_flag};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SavedBadge {
    /// `None` means never saved (or unparsable): place at the default corner.
    pub origin: Option<Pos2>,
    pub visible: bool,
}

impl Default for SavedBadge {
    fn default() -> Self {
        Self {
            origin: None,
            visible: true,
        }
    }
}

pub fn load_badge(storage: Option<&dyn eframe::Storage>) -> SavedBadge {
    let Some(storage) = storage else {
        return SavedBadge::default();
    };

    let x = storage.get_string(keys::BADGE_X);
    let y = storage.get_string(keys::BADGE_Y);
    let origin = match (
        x.as_deref().and_then(parse_coord),
        y.as_deref().and_then(parse_coord),
    ) {
        (Some(x), Some(y)) => Some(pos2(x as f32, y as f32)),
        _ => None,
    };

    let visible = storage
        .get_string(keys::BADGE_VISIBLE)
        .is_none_or(|value| parse_flag(&value));

    SavedBadge { origin, visible }
}

pub fn save_badge(storage: &mut dyn eframe::Storage, origin: Option<Pos2>, visible: bool) {
    if let Some(origin) = origin {
        storage.set_string(keys::BADGE_X, (origin.x.round() as i32).to_string());
        storage.set_string(keys::BADGE_Y, (origin.y.round() as i32).to_string());
    }
    let flag = if visible { "1" } else { "0" };
    storage.set_string(keys::BADGE_VISIBLE, flag.to_owned());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapStorage(HashMap<String, String>);

    impl eframe::Storage for MapStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.0.insert(key.to_owned(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn missing_storage_means_defaults() {
        let saved = load_badge(None);
        assert_eq!(saved, SavedBadge::default());
        assert!(saved.visible);
        assert!(saved.origin.is_none());
    }

    #[test]
    fn round_trip() {
        let mut storage = MapStorage::default();
        save_badge(&mut storage, Some(pos2(140.0, 980.0)), false);

        let saved = load_badge(Some(&storage));
        assert_eq!(saved.origin, Some(pos2(140.0, 980.0)));
        assert!(!saved.visible);
    }

    #[test]
    fn partial_or_garbled_position_is_ignored() {
        let mut storage = MapStorage::default();
        storage.set_string(keys::BADGE_X, "120".to_owned());
        assert_eq!(load_badge(Some(&storage)).origin, None);

        storage.set_string(keys::BADGE_Y, "bogus".to_owned());
        assert_eq!(load_badge(Some(&storage)).origin, None);

        storage.set_string(keys::BADGE_Y, "44".to_owned());
        assert_eq!(load_badge(Some(&storage)).origin, Some(pos2(120.0, 44.0)));
    }

    #[test]
    fn visibility_parses_forgivingly() {
        let mut storage = MapStorage::default();
        for falsy in ["0", "false", "No"] {
            storage.set_string(keys::BADGE_VISIBLE, falsy.to_owned());
            assert!(!load_badge(Some(&storage)).visible, "{falsy}");
        }
        storage.set_string(keys::BADGE_VISIBLE, "yes".to_owned());
        assert!(load_badge(Some(&storage)).visible);
    }

    #[test]
    fn fractional_positions_round_to_whole_pixels() {
        let mut storage = MapStorage::default();
        save_badge(&mut storage, Some(pos2(10.6, 19.4)), true);
        assert_eq!(load_badge(Some(&storage)).origin, Some(pos2(11.0, 19.0)));
    }
}
