// Theme preference persistence
//
// `ThemeState` owns the current mode for the whole process. It starts from a
// stored preference, falls back to what the terminal reports about its own
// background, and writes the mode back every time it changes.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ThemeMode;

/// File name of the stored preference inside the config directory
const PREFERENCE_FILE: &str = "theme";

/// Directory name under the user config directory
const APP_DIR: &str = "pointfield";

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("cannot access theme preference at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unrecognized theme preference {0:?}")]
    Invalid(String),

    #[error("no user config directory found")]
    NoConfigDir,
}

/// Where the theme preference is kept
pub trait ThemeStore {
    /// Stored mode, `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<ThemeMode>, ThemeError>;

    fn save(&mut self, mode: ThemeMode) -> Result<(), ThemeError>;
}

/// Preference stored as a single word in the user config directory
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `pointfield/theme` under the user config directory
    ///
    /// `$XDG_CONFIG_HOME` (or `~/.config`) on Linux, `Application Support`
    /// on macOS and `%APPDATA%` on Windows.
    pub fn from_env() -> Result<Self, ThemeError> {
        let base = dirs::config_dir().ok_or(ThemeError::NoConfigDir)?;
        Ok(Self::new(base.join(APP_DIR).join(PREFERENCE_FILE)))
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ThemeError {
        ThemeError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<ThemeMode>, ThemeError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }
        ThemeMode::parse(&content)
            .map(Some)
            .ok_or_else(|| ThemeError::Invalid(content.trim().to_string()))
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), ThemeError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, mode.as_str()).map_err(|e| self.io_error(e))
    }
}

/// In-memory store, used when no config directory is available
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    pub saved: Option<ThemeMode>,
    pub writes: usize,
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<ThemeMode>, ThemeError> {
        Ok(self.saved)
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), ThemeError> {
        self.saved = Some(mode);
        self.writes += 1;
        Ok(())
    }
}

/// Terminal background hint from `COLORFGBG` ("fg;bg" or "fg;default;bg")
///
/// Background indices 0-6 and 8 are dark colors of the 16-color palette;
/// 7 and 9-15 are light.
pub fn preference_from_colorfgbg(value: &str) -> Option<ThemeMode> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(ThemeMode::Dark),
        7 | 9..=15 => Some(ThemeMode::Light),
        _ => None,
    }
}

/// What the environment says about the preferred scheme, if anything
pub fn os_preference() -> Option<ThemeMode> {
    env::var("COLORFGBG")
        .ok()
        .and_then(|value| preference_from_colorfgbg(&value))
}

/// Process-wide theme mode with persist-on-change
pub struct ThemeState {
    mode: ThemeMode,
    store: Box<dyn ThemeStore>,
}

impl ThemeState {
    /// Resolve the initial mode and persist it
    ///
    /// Order: stored preference, then the OS hint, then light.
    pub fn init(store: Box<dyn ThemeStore>, os_hint: Option<ThemeMode>) -> Self {
        let stored = match store.load() {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable theme preference");
                None
            }
        };
        let mode = stored.or(os_hint).unwrap_or_default();

        let mut state = Self { mode, store };
        state.persist();
        state
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    /// Flip dark/light and write the new mode back
    pub fn toggle(&mut self) -> ThemeMode {
        self.set(self.mode.toggled());
        self.mode
    }

    pub fn set(&mut self, mode: ThemeMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(self.mode) {
            tracing::warn!(error = %e, mode = self.mode.as_str(), "Failed to persist theme preference");
        }
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState").field("mode", &self.mode).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store that shares its contents with the test
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryThemeStore>>);

    impl ThemeStore for SharedStore {
        fn load(&self) -> Result<Option<ThemeMode>, ThemeError> {
            self.0.borrow().load()
        }

        fn save(&mut self, mode: ThemeMode) -> Result<(), ThemeError> {
            self.0.borrow_mut().save(mode)
        }
    }

    struct BrokenStore;

    impl ThemeStore for BrokenStore {
        fn load(&self) -> Result<Option<ThemeMode>, ThemeError> {
            Err(ThemeError::Invalid("purple".to_string()))
        }

        fn save(&mut self, _mode: ThemeMode) -> Result<(), ThemeError> {
            Err(ThemeError::NoConfigDir)
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("pointfield-test-{}-{}", std::process::id(), name))
            .join(PREFERENCE_FILE)
    }

    #[test]
    fn test_stored_preference_wins_over_os() {
        let shared = SharedStore::default();
        shared.0.borrow_mut().saved = Some(ThemeMode::Light);

        let state = ThemeState::init(Box::new(shared.clone()), Some(ThemeMode::Dark));
        assert_eq!(state.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_os_preference_used_without_stored_value() {
        let shared = SharedStore::default();
        let state = ThemeState::init(Box::new(shared.clone()), Some(ThemeMode::Dark));
        assert!(state.is_dark());
        // Initial mode is written back immediately
        assert_eq!(shared.0.borrow().saved, Some(ThemeMode::Dark));
    }

    #[test]
    fn test_defaults_to_light() {
        let state = ThemeState::init(Box::new(MemoryThemeStore::default()), None);
        assert_eq!(state.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_persists_every_change() {
        let shared = SharedStore::default();
        let mut state = ThemeState::init(Box::new(shared.clone()), None);
        let writes = shared.0.borrow().writes;

        assert_eq!(state.toggle(), ThemeMode::Dark);
        assert_eq!(shared.0.borrow().saved, Some(ThemeMode::Dark));
        assert_eq!(state.toggle(), ThemeMode::Light);
        assert_eq!(shared.0.borrow().saved, Some(ThemeMode::Light));
        assert_eq!(shared.0.borrow().writes, writes + 2);

        // Setting the current mode again is not a change
        state.set(ThemeMode::Light);
        assert_eq!(shared.0.borrow().writes, writes + 2);
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let mut state = ThemeState::init(Box::new(BrokenStore), Some(ThemeMode::Dark));
        assert!(state.is_dark());
        assert_eq!(state.toggle(), ThemeMode::Light);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_dir_all(path.parent().expect("parent"));

        let mut store = FileThemeStore::new(&path);
        assert_eq!(store.load().expect("load"), None);

        store.save(ThemeMode::Dark).expect("save");
        assert_eq!(fs::read_to_string(&path).expect("read"), "dark");
        assert_eq!(store.load().expect("load"), Some(ThemeMode::Dark));

        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let path = temp_path("garbage");
        let dir = path.parent().expect("parent").to_path_buf();
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(&path, "sepia").expect("write");

        let store = FileThemeStore::new(&path);
        assert!(matches!(store.load(), Err(ThemeError::Invalid(v)) if v == "sepia"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_config_dir_found_without_home_variables() {
        let saved: Vec<_> = ["XDG_CONFIG_HOME", "HOME"]
            .iter()
            .map(|key| (*key, env::var_os(key)))
            .collect();

        env::set_var("XDG_CONFIG_HOME", "/tmp/pointfield-xdg");
        let store = FileThemeStore::from_env().expect("xdg config dir");
        assert_eq!(store.path(), Path::new("/tmp/pointfield-xdg/pointfield/theme"));

        // The account's home directory is still known without HOME
        env::remove_var("XDG_CONFIG_HOME");
        env::remove_var("HOME");
        let store = FileThemeStore::from_env();

        for (key, value) in saved {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }

        let store = store.expect("config dir from the user database");
        assert!(store.path().ends_with("pointfield/theme"));
    }

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(preference_from_colorfgbg("15;0"), Some(ThemeMode::Dark));
        assert_eq!(preference_from_colorfgbg("0;15"), Some(ThemeMode::Light));
        assert_eq!(preference_from_colorfgbg("12;default;8"), Some(ThemeMode::Dark));
        assert_eq!(preference_from_colorfgbg("0;7"), Some(ThemeMode::Light));
        assert_eq!(preference_from_colorfgbg("default"), None);
        assert_eq!(preference_from_colorfgbg("0;200"), None);
    }
}
