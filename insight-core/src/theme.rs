//! Dark/light preference with pluggable persistence.
//!
//! Both collaborators are injected (a key-value store and a system
//! color-scheme change callback) so the logic runs headless and tests
//! need no real environment.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;

/// Storage slot holding the persisted choice, `"true"` or `"false"`.
pub const DARK_MODE_KEY: &str = "wi:dark";

/// Minimal key-value persistence capability.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Preference store backed by a TOML string map in the platform config
/// directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default platform location.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "weather-insight", "insight")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(Self::new(dirs.config_dir().join("prefs.toml")))
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preference file: {}", self.path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse preference file: {}", self.path.display()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preference directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(&entries).context("Failed to serialize preferences to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write preference file: {}", self.path.display()))?;

        Ok(())
    }
}

/// Shared in-memory store; clones observe the same map. Used by tests and
/// as the degrade target when no config directory exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("preference map poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("preference map poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Dark/light preference state.
///
/// An explicit user choice is exactly a value persisted under
/// [`DARK_MODE_KEY`]; it is re-read from the store when a system event
/// arrives, never tracked as a separate field.
pub struct ThemePreference {
    is_dark: bool,
    store: Box<dyn PreferenceStore>,
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("is_dark", &self.is_dark)
            .finish_non_exhaustive()
    }
}

impl ThemePreference {
    /// Read the initial state. A persisted `"true"`/`"false"` wins; any
    /// other stored value and absence both fall back to the system
    /// preference; an unreadable store defaults to light. Never writes.
    pub fn load(store: impl PreferenceStore + 'static, system_dark: bool) -> Self {
        let is_dark = match store.get(DARK_MODE_KEY) {
            Ok(Some(value)) if value == "true" => true,
            Ok(Some(value)) if value == "false" => false,
            Ok(_) => system_dark,
            Err(_) => false,
        };

        Self {
            is_dark,
            store: Box::new(store),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Flip the preference and persist the new boolean as a literal
    /// `"true"`/`"false"` string. The persisted value is what makes the
    /// choice explicit; storage failures are swallowed.
    pub fn toggle(&mut self) -> bool {
        self.is_dark = !self.is_dark;
        let _ = self
            .store
            .set(DARK_MODE_KEY, if self.is_dark { "true" } else { "false" });
        self.is_dark
    }

    /// System color-scheme change. Adopted only while nothing is
    /// persisted; once the user has toggled, events are ignored for good
    /// (until storage is cleared externally). Adoption itself does not
    /// persist. Store failures swallow the event.
    pub fn on_system_change(&mut self, system_dark: bool) {
        if let Ok(None) = self.store.get(DARK_MODE_KEY) {
            self.is_dark = system_dark;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("storage unavailable"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("storage unavailable"))
        }
    }

    #[test]
    fn stored_value_wins_over_system_preference() {
        let store = MemoryStore::new();
        store.set(DARK_MODE_KEY, "false").expect("set");

        let theme = ThemePreference::load(store, true);
        assert!(!theme.is_dark());
    }

    #[test]
    fn absent_value_falls_back_to_system_preference() {
        let theme = ThemePreference::load(MemoryStore::new(), true);
        assert!(theme.is_dark());

        let theme = ThemePreference::load(MemoryStore::new(), false);
        assert!(!theme.is_dark());
    }

    #[test]
    fn garbage_value_falls_back_to_system_preference() {
        let store = MemoryStore::new();
        store.set(DARK_MODE_KEY, "maybe").expect("set");

        let theme = ThemePreference::load(store, true);
        assert!(theme.is_dark());
    }

    #[test]
    fn unreadable_store_defaults_to_light() {
        let theme = ThemePreference::load(FailingStore, true);
        assert!(!theme.is_dark());
    }

    #[test]
    fn load_never_writes() {
        let store = MemoryStore::new();
        let handle = store.clone();

        let _theme = ThemePreference::load(store, true);
        assert_eq!(handle.get(DARK_MODE_KEY).expect("get"), None);
    }

    #[test]
    fn toggle_persists_the_literal_boolean_string() {
        let store = MemoryStore::new();
        let handle = store.clone();

        let mut theme = ThemePreference::load(store, true);
        assert!(theme.is_dark());

        assert!(!theme.toggle());
        assert_eq!(
            handle.get(DARK_MODE_KEY).expect("get").as_deref(),
            Some("false")
        );

        assert!(theme.toggle());
        assert_eq!(
            handle.get(DARK_MODE_KEY).expect("get").as_deref(),
            Some("true")
        );
    }

    #[test]
    fn toggle_survives_a_failing_store() {
        let mut theme = ThemePreference::load(FailingStore, false);
        assert!(theme.toggle());
        assert!(theme.is_dark());
    }

    #[test]
    fn system_change_adopts_while_nothing_is_persisted() {
        let store = MemoryStore::new();
        let handle = store.clone();

        let mut theme = ThemePreference::load(store, false);
        theme.on_system_change(true);
        assert!(theme.is_dark());

        // Adoption is not an explicit choice, so nothing was written and
        // the next event still applies.
        assert_eq!(handle.get(DARK_MODE_KEY).expect("get"), None);
        theme.on_system_change(false);
        assert!(!theme.is_dark());
    }

    #[test]
    fn system_change_is_ignored_after_an_explicit_toggle() {
        let store = MemoryStore::new();

        let mut theme = ThemePreference::load(store, false);
        theme.toggle();
        assert!(theme.is_dark());

        theme.on_system_change(false);
        assert!(theme.is_dark());
    }

    #[test]
    fn file_store_roundtrips_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("prefs.toml"));

        assert_eq!(store.get(DARK_MODE_KEY).expect("get"), None);

        store.set(DARK_MODE_KEY, "true").expect("set");
        assert_eq!(
            store.get(DARK_MODE_KEY).expect("get").as_deref(),
            Some("true")
        );

        // A second key does not clobber the first.
        store.set("wi:other", "x").expect("set");
        assert_eq!(
            store.get(DARK_MODE_KEY).expect("get").as_deref(),
            Some("true")
        );
    }

    #[test]
    fn file_store_reports_unreadable_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "not = [valid").expect("write");

        let store = FileStore::new(path);
        assert!(store.get(DARK_MODE_KEY).is_err());
    }
}
