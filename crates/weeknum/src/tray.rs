//! The system tray icon and its context menu.
//!
//! The tray runs on OS callbacks, not on the egui frame loop, so the
//! handlers only queue [`TrayCommand`]s and wake the event loop. The app
//! drains the queue once per frame.

pub use imp::Tray;

/// An action requested from the tray, applied by the app on the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayCommand {
    /// Left click on the icon, or the "Open calendar" item.
    ToggleWindow,
    ToggleBadge,
    ToggleAutostart,
    ShowInfo,
    TogglePin,
    Quit,
}

#[cfg(windows)]
mod imp {
    use std::sync::{Arc, Mutex};

    use tray_icon::menu::{CheckMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem};
    use tray_icon::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
    use weeknum_core::Mode;

    use super::TrayCommand;
    use crate::icon;
    use crate::platform::PlatformError;

    const ID_TOGGLE_BADGE: &str = "toggle-badge";
    const ID_AUTOSTART: &str = "autostart";
    const ID_OPEN: &str = "open";
    const ID_INFO: &str = "info";
    const ID_PIN: &str = "pin";
    const ID_QUIT: &str = "quit";

    type CommandQueue = Arc<Mutex<Vec<TrayCommand>>>;

    pub struct Tray {
        icon: TrayIcon,
        badge_item: CheckMenuItem,
        autostart_item: CheckMenuItem,
        pin_item: CheckMenuItem,
        queue: CommandQueue,
    }

    impl Tray {
        /// Builds the icon and menu and installs the global event handlers.
        /// `autostart` is `None` when registration is unavailable, which
        /// leaves the menu item disabled.
        pub fn new(
            ctx: &egui::Context,
            week: u32,
            mode: Mode,
            badge_visible: bool,
            autostart: Option<bool>,
            pinned: bool,
        ) -> Result<Self, PlatformError> {
            let badge_item = CheckMenuItem::with_id(
                ID_TOGGLE_BADGE,
                badge_label(badge_visible),
                true,
                badge_visible,
                None,
            );
            let autostart_item = CheckMenuItem::with_id(
                ID_AUTOSTART,
                "Autostart",
                autostart.is_some(),
                autostart.unwrap_or(false),
                None,
            );
            let pin_item = CheckMenuItem::with_id(ID_PIN, pin_label(pinned), true, pinned, None);

            let menu = Menu::new();
            menu.append(&badge_item)?;
            menu.append(&autostart_item)?;
            menu.append(&PredefinedMenuItem::separator())?;
            menu.append(&MenuItem::with_id(ID_OPEN, "Open calendar", true, None))?;
            menu.append(&MenuItem::with_id(ID_INFO, "Info", true, None))?;
            menu.append(&pin_item)?;
            menu.append(&PredefinedMenuItem::separator())?;
            menu.append(&MenuItem::with_id(ID_QUIT, "Quit", true, None))?;

            let queue = CommandQueue::default();

            let menu_queue = Arc::clone(&queue);
            let menu_ctx = ctx.clone();
            MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
                let command = match event.id().0.as_str() {
                    ID_TOGGLE_BADGE => TrayCommand::ToggleBadge,
                    ID_AUTOSTART => TrayCommand::ToggleAutostart,
                    ID_OPEN => TrayCommand::ToggleWindow,
                    ID_INFO => TrayCommand::ShowInfo,
                    ID_PIN => TrayCommand::TogglePin,
                    ID_QUIT => TrayCommand::Quit,
                    _ => return,
                };
                if let Ok(mut queue) = menu_queue.lock() {
                    queue.push(command);
                }
                menu_ctx.request_repaint();
            }));

            let click_queue = Arc::clone(&queue);
            let click_ctx = ctx.clone();
            TrayIconEvent::set_event_handler(Some(move |event: TrayIconEvent| {
                if let TrayIconEvent::Click {
                    button: MouseButton::Left,
                    button_state: MouseButtonState::Up,
                    ..
                } = event
                {
                    if let Ok(mut queue) = click_queue.lock() {
                        queue.push(TrayCommand::ToggleWindow);
                    }
                    click_ctx.request_repaint();
                }
            }));

            let icon = TrayIconBuilder::new()
                .with_menu(Box::new(menu))
                .with_tooltip(tooltip(week))
                .with_icon(week_icon(week, mode)?)
                .build()?;

            Ok(Self {
                icon,
                badge_item,
                autostart_item,
                pin_item,
                queue,
            })
        }

        /// Commands queued since the previous drain, oldest first.
        pub fn drain(&self) -> Vec<TrayCommand> {
            self.queue
                .lock()
                .map(|mut queue| std::mem::take(&mut *queue))
                .unwrap_or_default()
        }

        /// Redraws the icon digits and tooltip after a week or theme change.
        pub fn update_week(&self, week: u32, mode: Mode) {
            if let Ok(icon) = week_icon(week, mode) {
                let _ = self.icon.set_icon(Some(icon));
            }
            let _ = self.icon.set_tooltip(Some(tooltip(week)));
        }

        pub fn set_badge_visible(&self, visible: bool) {
            self.badge_item.set_checked(visible);
            self.badge_item.set_text(badge_label(visible));
        }

        pub fn set_autostart_checked(&self, enabled: bool) {
            self.autostart_item.set_checked(enabled);
        }

        pub fn set_pinned(&self, pinned: bool) {
            self.pin_item.set_checked(pinned);
            self.pin_item.set_text(pin_label(pinned));
        }
    }

    fn week_icon(week: u32, mode: Mode) -> Result<tray_icon::Icon, PlatformError> {
        let rgba = icon::week_icon_rgba(week, mode);
        Ok(tray_icon::Icon::from_rgba(
            rgba,
            icon::ICON_SIZE,
            icon::ICON_SIZE,
        )?)
    }

    fn tooltip(week: u32) -> String {
        format!("Week {week:02}")
    }

    fn badge_label(visible: bool) -> &'static str {
        if visible { "Hide widget" } else { "Show widget" }
    }

    fn pin_label(pinned: bool) -> &'static str {
        if pinned { "Unpin window" } else { "Pin window" }
    }
}

#[cfg(not(windows))]
mod imp {
    use weeknum_core::Mode;

    use super::TrayCommand;
    use crate::platform::PlatformError;

    /// Inert stand-in that keeps the app logic identical off Windows.
    pub struct Tray;

    impl Tray {
        #[expect(clippy::unnecessary_wraps)]
        pub fn new(
            _ctx: &egui::Context,
            _week: u32,
            _mode: Mode,
            _badge_visible: bool,
            _autostart: Option<bool>,
            _pinned: bool,
        ) -> Result<Self, PlatformError> {
            Ok(Self)
        }

        pub fn drain(&self) -> Vec<TrayCommand> {
            Vec::new()
        }

        pub fn update_week(&self, _week: u32, _mode: Mode) {}

        pub fn set_badge_visible(&self, _visible: bool) {}

        pub fn set_autostart_checked(&self, _enabled: bool) {}

        pub fn set_pinned(&self, _pinned: bool) {}
    }
}
