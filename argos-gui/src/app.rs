//! Application shell.
//!
//! Holds the main windows and the persistent view settings. There is one
//! application per process; it is created in `main` and handed to eframe.

use std::path::PathBuf;

use eframe::egui;

use crate::context::AppContext;
use crate::inspector::InspectorError;
use crate::settings::{window_group_name, SettingsError, SettingsStore};
use crate::window::MainWindow;

/// Main application state.
pub struct ArgosApplication {
    pub(crate) context: AppContext,
    pub(crate) main_windows: Vec<MainWindow>,
    /// Set once the settings have been written, so they are written once.
    pub(crate) settings_saved: bool,
    /// Settings file. Reading and writing settings is skipped when `None`.
    pub(crate) settings_path: Option<PathBuf>,
    next_window_number: usize,
}

impl ArgosApplication {
    pub fn new(context: AppContext, settings_path: Option<PathBuf>) -> Self {
        Self {
            context,
            main_windows: Vec::new(),
            settings_saved: false,
            settings_path,
            next_window_number: 0,
        }
    }

    /// Persistent settings are stored per profile. Profiles are case
    /// insensitive.
    pub fn profile(&self) -> &str {
        &self.context.profile
    }

    pub fn main_windows(&self) -> &[MainWindow] {
        &self.main_windows
    }

    /// Creates a main window and opens the given files in it.
    ///
    /// # Errors
    /// Fails if the window's inspector cannot be created.
    pub fn create_main_window(
        &mut self,
        files: &[PathBuf],
    ) -> Result<&mut MainWindow, InspectorError> {
        let mut window = MainWindow::new(self.next_window_number, self.context.clone())?;
        self.next_window_number += 1;
        window.open_files(files);
        log::debug!("Created main window #{}", window.window_number());
        self.main_windows.push(window);
        let last = self.main_windows.len() - 1;
        Ok(&mut self.main_windows[last])
    }

    /// Removes a window from the application and finalizes it.
    pub fn remove_main_window(&mut self, window_number: usize) -> Option<MainWindow> {
        log::debug!("Removing main window #{window_number}");
        let index = self
            .main_windows
            .iter()
            .position(|w| w.window_number() == window_number)?;
        let mut window = self.main_windows.remove(index);
        window.finalize();
        Some(window)
    }

    /// Saves the settings, then closes every window.
    ///
    /// # Errors
    /// Fails if the settings cannot be written; the windows are closed
    /// anyway.
    pub fn close_all_windows(&mut self) -> Result<(), SettingsError> {
        let result = self.write_view_settings().map(|_| ());
        log::debug!("Closing all windows");
        for mut window in self.main_windows.drain(..) {
            window.finalize();
        }
        result
    }

    /// Reads the windows of this profile from the settings file.
    ///
    /// Returns `Ok(false)` when settings persistence is disabled. With
    /// `reset` the profile's settings are removed instead of read.
    ///
    /// # Errors
    /// Fails if the settings file cannot be read or rewritten.
    pub fn read_view_settings(&mut self, reset: bool) -> Result<bool, SettingsError> {
        let Some(path) = self.settings_path.clone() else {
            log::debug!("Settings persistence disabled, not reading view settings");
            return Ok(false);
        };
        let mut store = SettingsStore::load(&path)?;

        if reset {
            log::debug!("Resetting profile settings: {}", self.profile());
            store.remove_profile(&self.context.profile);
            store.save(&path)?;
            return Ok(true);
        }

        let saved: Vec<_> = store
            .windows(&self.context.profile)
            .into_iter()
            .map(|(_, settings)| settings.clone())
            .collect();
        for settings in &saved {
            match self.create_main_window(&[]) {
                Ok(window) => window.apply_view_settings(settings),
                Err(e) => log::error!("Unable to restore window: {e}"),
            }
        }
        Ok(true)
    }

    /// Writes the windows of this profile to the settings file, replacing
    /// what was stored for the profile before.
    ///
    /// Returns `Ok(false)` when settings persistence is disabled.
    ///
    /// # Errors
    /// Returns [`SettingsError::AlreadySaved`] on a second call and
    /// [`SettingsError::NoWindows`] when there is no window to save.
    pub fn write_view_settings(&mut self) -> Result<bool, SettingsError> {
        let Some(path) = self.settings_path.clone() else {
            log::debug!("Settings persistence disabled, not writing view settings");
            return Ok(false);
        };
        if self.settings_saved {
            return Err(SettingsError::AlreadySaved);
        }
        self.settings_saved = true;

        if self.main_windows.is_empty() {
            return Err(SettingsError::NoWindows);
        }
        let mut store = SettingsStore::load(&path)?;
        store.remove_profile(&self.context.profile);
        for (window_nr, window) in self.main_windows.iter().enumerate() {
            store.set_window(
                &self.context.profile,
                window_group_name(window_nr),
                window.view_settings(),
            );
        }
        store.save(&path)?;
        Ok(true)
    }

    /// Writes the settings when the last window is about to close and they
    /// have not been written yet.
    ///
    /// # Errors
    /// Fails like [`ArgosApplication::write_view_settings`].
    pub fn write_view_settings_if_needed(&mut self) -> Result<bool, SettingsError> {
        if !self.settings_saved && self.main_windows.len() <= 1 {
            self.write_view_settings()
        } else {
            Ok(false)
        }
    }

    fn handle_closed_windows(&mut self) {
        let closed: Vec<usize> = self
            .main_windows
            .iter()
            .filter(|w| !w.is_open())
            .map(MainWindow::window_number)
            .collect();
        for window_number in closed {
            if let Err(e) = self.write_view_settings_if_needed() {
                log::error!("Unable to save settings: {e}");
            }
            self.remove_main_window(window_number);
        }
    }
}

impl eframe::App for ArgosApplication {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            if self.main_windows.is_empty() {
                return;
            }
            if let Err(e) = self.close_all_windows() {
                log::error!("Unable to save settings: {e}");
            }
            return;
        }

        for window in &mut self.main_windows {
            window.show(ctx);
        }
        self.handle_closed_windows();

        if self.main_windows.is_empty() {
            log::info!("Last window closed");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::Inspector;
    use argos_core::CtiValue;
    use tempfile::TempDir;

    fn persistent_app(dir: &TempDir) -> ArgosApplication {
        ArgosApplication::new(
            AppContext::new("Test Profile", false),
            Some(dir.path().join("settings.json")),
        )
    }

    #[test]
    fn test_settings_are_stubbed_without_persistence() {
        let mut app = ArgosApplication::new(AppContext::default(), None);
        app.create_main_window(&[]).unwrap();
        assert!(!app.read_view_settings(false).unwrap());
        assert!(!app.write_view_settings().unwrap());
        // The stub never marks the settings as saved.
        assert!(!app.write_view_settings().unwrap());
        assert!(!app.settings_saved);
    }

    #[test]
    fn test_write_twice_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut app = persistent_app(&dir);
        app.create_main_window(&[]).unwrap();
        assert!(app.write_view_settings().unwrap());
        assert!(matches!(
            app.write_view_settings(),
            Err(SettingsError::AlreadySaved)
        ));
        assert!(!app.write_view_settings_if_needed().unwrap());
    }

    #[test]
    fn test_write_without_windows_fails() {
        let dir = TempDir::new().unwrap();
        let mut app = persistent_app(&dir);
        assert!(matches!(
            app.write_view_settings(),
            Err(SettingsError::NoWindows)
        ));
    }

    #[test]
    fn test_windows_are_restored_per_profile() {
        let dir = TempDir::new().unwrap();
        let mut app = persistent_app(&dir);
        for _ in 0..2 {
            app.create_main_window(&[]).unwrap();
        }
        app.main_windows[1]
            .inspector
            .config_mut()
            .find_mut("grid/alpha")
            .unwrap()
            .set_data(0.5)
            .unwrap();
        app.close_all_windows().unwrap();
        assert!(app.main_windows().is_empty());

        let mut restored = persistent_app(&dir);
        assert!(restored.read_view_settings(false).unwrap());
        assert_eq!(restored.main_windows().len(), 2);
        let alpha = restored.main_windows()[1]
            .inspector()
            .config()
            .config_value("grid/alpha")
            .unwrap();
        assert_eq!(alpha, CtiValue::Float(0.5));

        let mut reset = persistent_app(&dir);
        assert!(reset.read_view_settings(true).unwrap());
        assert!(reset.main_windows().is_empty());
        let mut after_reset = persistent_app(&dir);
        after_reset.read_view_settings(false).unwrap();
        assert!(after_reset.main_windows().is_empty());
    }

    #[test]
    fn test_remove_main_window() {
        let mut app = ArgosApplication::new(AppContext::default(), None);
        let first = app.create_main_window(&[]).unwrap().window_number();
        let second = app.create_main_window(&[]).unwrap().window_number();
        assert_ne!(first, second);

        let removed = app.remove_main_window(first).unwrap();
        assert!(removed.inspector().plot().is_none());
        assert_eq!(app.main_windows().len(), 1);
        assert!(app.remove_main_window(first).is_none());
    }

    #[test]
    fn test_write_if_needed_waits_for_last_window() {
        let dir = TempDir::new().unwrap();
        let mut app = persistent_app(&dir);
        app.create_main_window(&[]).unwrap();
        app.create_main_window(&[]).unwrap();
        assert!(!app.write_view_settings_if_needed().unwrap());
        app.remove_main_window(0);
        assert!(app.write_view_settings_if_needed().unwrap());
    }
}
