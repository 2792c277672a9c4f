//! OS integration: the theme probe and login autostart.

use weeknum_core::Theme;

/// Anything the OS layer can fail at. The app surfaces these as a toast or a
/// log line instead of exiting.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("could not resolve the executable path: {0}")]
    ExePath(#[from] std::io::Error),

    #[error("could not update the autostart registration: {0}")]
    Autostart(#[from] auto_launch::Error),

    #[cfg(windows)]
    #[error("could not create the tray icon: {0}")]
    Tray(#[from] tray_icon::Error),

    #[cfg(windows)]
    #[error("could not build the tray menu: {0}")]
    Menu(#[from] tray_icon::menu::Error),

    #[cfg(windows)]
    #[error("could not rasterize the tray icon: {0}")]
    Icon(#[from] tray_icon::BadIcon),
}

/// Reads the light/dark preference and accent color from the OS. Everything
/// unreadable falls back to light mode and the stock blue, so this never
/// fails.
pub fn probe_theme() -> Theme {
    imp::probe_theme()
}

#[cfg(windows)]
mod imp {
    use weeknum_core::{DEFAULT_ACCENT, Mode, Theme, decode_colorization};

    const PERSONALIZE_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize";
    const DWM_KEY: &str = r"Software\Microsoft\Windows\DWM";

    pub fn probe_theme() -> Theme {
        // Missing value means the OS predates the setting; that default is light.
        let mode = match registry::read_hkcu_dword(PERSONALIZE_KEY, "AppsUseLightTheme") {
            Some(0) => Mode::Dark,
            _ => Mode::Light,
        };
        let accent = registry::read_hkcu_dword(DWM_KEY, "ColorizationColor")
            .map(|dword| decode_colorization(dword).0)
            .unwrap_or(DEFAULT_ACCENT);
        Theme { mode, accent }
    }

    #[expect(unsafe_code)]
    mod registry {
        use windows_sys::Win32::Foundation::ERROR_SUCCESS;
        use windows_sys::Win32::System::Registry::{
            HKEY, HKEY_CURRENT_USER, KEY_READ, REG_DWORD, RegCloseKey, RegOpenKeyExW,
            RegQueryValueExW,
        };

        /// Reads a DWORD value under HKEY_CURRENT_USER, `None` on any failure
        /// (missing key, missing value, wrong type).
        pub(super) fn read_hkcu_dword(subkey: &str, value: &str) -> Option<u32> {
            let subkey = wide(subkey);
            let value = wide(value);

            let mut key: HKEY = std::ptr::null_mut();
            // SAFETY: the wide strings are NUL-terminated and outlive the
            // calls; `key`, `kind`, `data` and `size` are valid out-params.
            unsafe {
                if RegOpenKeyExW(HKEY_CURRENT_USER, subkey.as_ptr(), 0, KEY_READ, &mut key)
                    != ERROR_SUCCESS
                {
                    return None;
                }
                let mut kind = 0u32;
                let mut data = 0u32;
                let mut size = size_of::<u32>() as u32;
                let status = RegQueryValueExW(
                    key,
                    value.as_ptr(),
                    std::ptr::null(),
                    &mut kind,
                    (&raw mut data).cast(),
                    &mut size,
                );
                RegCloseKey(key);
                (status == ERROR_SUCCESS && kind == REG_DWORD).then_some(data)
            }
        }

        fn wide(s: &str) -> Vec<u16> {
            s.encode_utf16().chain(std::iter::once(0)).collect()
        }
    }
}

#[cfg(not(windows))]
mod imp {
    use weeknum_core::Theme;

    pub fn probe_theme() -> Theme {
        Theme::default()
    }
}

// ----------------------------------------------------------------------------

/// Registers or unregisters the app to start at login, keyed by the app name
/// and the current executable path.
pub struct Autostart {
    launcher: auto_launch::AutoLaunch,
}

impl Autostart {
    pub fn new() -> Result<Self, PlatformError> {
        let exe = std::env::current_exe()?;
        let launcher = auto_launch::AutoLaunchBuilder::new()
            .set_app_name(crate::APP_NAME)
            .set_app_path(&exe.to_string_lossy())
            .build()?;
        Ok(Self { launcher })
    }

    /// Whether the registration currently exists. Read errors count as "not
    /// registered".
    pub fn is_enabled(&self) -> bool {
        self.launcher.is_enabled().unwrap_or(false)
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<(), PlatformError> {
        if enabled {
            self.launcher.enable()?;
        } else {
            self.launcher.disable()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn probe_falls_back_to_default_theme() {
        assert_eq!(probe_theme(), Theme::default());
    }

    #[test]
    fn autostart_builds_from_current_exe() {
        // Construction must work everywhere; enabling is only done by the
        // user toggling the tray item.
        let autostart = Autostart::new().unwrap();
        let _ = autostart.is_enabled();
    }
}
