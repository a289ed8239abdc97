//! Persisted theme preference

use anyhow::Result;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::bridge::{notify_embedded_widget, ThemePreference, WidgetFrame, WidgetThemes};

/// Preference file name inside the state directory
const THEME_FILE: &str = "theme.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTheme {
    theme: ThemePreference,
}

/// File-backed preference storage
#[derive(Debug, Clone)]
pub struct ThemeStore {
    dir: PathBuf,
}

impl ThemeStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(THEME_FILE)
    }

    /// Whether the state directory exists or could be created
    ///
    /// Nothing is created here: the nearest existing ancestor only has to be
    /// a directory. `save` creates the directory.
    pub fn is_available(&self) -> bool {
        let mut dir = self.dir.as_path();
        loop {
            match fs::metadata(dir) {
                Ok(meta) if meta.is_dir() => return true,
                Ok(_) => {
                    tracing::debug!("Theme storage unavailable, {:?} is not a dir", dir);
                    return false;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => match dir.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => dir = parent,
                    _ => return true,
                },
                Err(e) => {
                    tracing::debug!("Theme storage unavailable at {:?}: {}", self.dir, e);
                    return false;
                }
            }
        }
    }

    /// The stored preference, `None` if nothing was saved yet
    pub fn load(&self) -> Result<Option<ThemePreference>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let stored: StoredTheme = serde_json::from_str(&content)?;
        Ok(Some(stored.theme))
    }

    pub fn save(&self, theme: ThemePreference) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(&StoredTheme { theme })?;
        fs::write(self.path(), content)?;
        tracing::debug!("Saved theme preference {} to {:?}", theme, self.path());
        Ok(())
    }
}

/// Reads and toggles the persisted preference
///
/// Storage is only touched once the controller has "mounted", i.e. once it
/// has checked, lazily and a single time, that the storage is usable. Before
/// that the configured default is reported and toggling does nothing.
pub struct ThemeController {
    store: ThemeStore,
    default: ThemePreference,
    themes: WidgetThemes,
    mounted: OnceCell<bool>,
}

impl ThemeController {
    pub fn new(store: ThemeStore, default: ThemePreference, themes: WidgetThemes) -> Self {
        Self {
            store,
            default,
            themes,
            mounted: OnceCell::new(),
        }
    }

    pub fn has_mounted(&self) -> bool {
        *self.mounted.get_or_init(|| self.store.is_available())
    }

    /// Effective preference
    pub fn current(&self) -> ThemePreference {
        if !self.has_mounted() {
            return self.default;
        }
        match self.store.load() {
            Ok(stored) => stored.unwrap_or(self.default),
            Err(e) => {
                tracing::warn!("Ignoring unreadable theme preference: {}", e);
                self.default
            }
        }
    }

    /// Switch to the other preference, persist it and tell the widget
    ///
    /// Returns `None` when storage is unavailable.
    pub fn toggle(&self, frame: Option<&dyn WidgetFrame>) -> Result<Option<ThemePreference>> {
        if !self.has_mounted() {
            return Ok(None);
        }
        let next = self.current().toggle();
        self.store.save(next)?;
        notify_embedded_widget(next, frame, &self.themes);
        Ok(Some(next))
    }

    /// Accessible label for the toggle control
    pub fn label(&self) -> &'static str {
        match self.current() {
            ThemePreference::Dark => "Activate light mode",
            ThemePreference::Light => "Activate dark mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommentsConfig;
    use crate::theme::ThemeMessage;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn controller(dir: &Path, default: ThemePreference) -> ThemeController {
        ThemeController::new(
            ThemeStore::new(dir),
            default,
            WidgetThemes::from(&CommentsConfig::default()),
        )
    }

    struct CountingFrame(Cell<usize>);

    impl WidgetFrame for CountingFrame {
        fn is_ready(&self) -> bool {
            true
        }

        fn post_message(&self, _message: &ThemeMessage, _target_origin: &str) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_store_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = ThemeStore::new(tmp.path().join("state"));
        assert_eq!(store.load().unwrap(), None);

        store.save(ThemePreference::Dark).unwrap();
        assert_eq!(store.load().unwrap(), Some(ThemePreference::Dark));
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"dark\""));
    }

    #[test]
    fn test_toggle_persists_and_notifies() {
        let tmp = TempDir::new().unwrap();
        let controller = controller(tmp.path(), ThemePreference::Light);
        assert_eq!(controller.current(), ThemePreference::Light);
        assert_eq!(controller.label(), "Activate dark mode");

        let frame = CountingFrame(Cell::new(0));
        let next = controller.toggle(Some(&frame)).unwrap();
        assert_eq!(next, Some(ThemePreference::Dark));
        assert_eq!(controller.current(), ThemePreference::Dark);
        assert_eq!(controller.label(), "Activate light mode");
        assert_eq!(frame.0.get(), 1);

        let next = controller.toggle(None).unwrap();
        assert_eq!(next, Some(ThemePreference::Light));
        assert_eq!(frame.0.get(), 1);
    }

    #[test]
    fn test_unmounted_controller_uses_default() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "file in the way").unwrap();

        let controller = controller(&blocker, ThemePreference::Dark);
        assert!(!controller.has_mounted());
        assert_eq!(controller.current(), ThemePreference::Dark);
        assert_eq!(controller.toggle(None).unwrap(), None);
    }

    #[test]
    fn test_reading_does_not_create_state_dir() {
        let tmp = TempDir::new().unwrap();
        let state = tmp.path().join("nested").join("state");
        let controller = controller(&state, ThemePreference::Light);

        assert!(controller.has_mounted());
        assert_eq!(controller.current(), ThemePreference::Light);
        assert_eq!(controller.label(), "Activate dark mode");
        assert!(!tmp.path().join("nested").exists());

        controller.toggle(None).unwrap();
        assert!(state.join(THEME_FILE).exists());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(THEME_FILE), "{not json").unwrap();
        let controller = controller(tmp.path(), ThemePreference::Light);
        assert_eq!(controller.current(), ThemePreference::Light);
    }
}
