//! WeekNum keeps the current ISO week number one glance away: a tray icon
//! and a small draggable badge show it, and clicking either opens a popup
//! calendar with week numbers and a month/year picker.
//!
//! The UI follows the OS light/dark mode and accent color, polling for
//! changes every couple of seconds.

mod app;
mod badge;
mod icon;
mod info;
mod platform;
mod popup;
mod settings;
mod style;
mod tray;

pub use app::WeekNumApp;

/// Used for the tray tooltip, window titles and autostart registration.
pub const APP_NAME: &str = "WeekNum";
