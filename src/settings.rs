//! Persisted parameter state
//!
//! Every generator reads its initial configuration from, and writes each
//! change back to, a namespace of one shared JSON document. The document is
//! stored at `~/.config/shape-grid/settings.json`.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SettingsError;
use crate::shapes::RingMode;

/// Returns the path to the settings file: `~/.config/shape-grid/settings.json`
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("shape-grid");
    path.push("settings.json");
    path
}

/// Ring generator parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleState {
    pub size: f64,
    pub thickness: f64,
    pub mode: RingMode,
}

impl Default for CircleState {
    fn default() -> Self {
        Self {
            size: 32.0,
            thickness: 1.0,
            mode: RingMode::Thickness,
        }
    }
}

/// Star generator parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarState {
    pub size: f64,
    pub thickness: f64,
    pub points: u32,
}

impl Default for StarState {
    fn default() -> Self {
        Self {
            size: 32.0,
            thickness: 1.0,
            points: 5,
        }
    }
}

/// SVG renderer parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgState {
    pub scale: f64,
}

impl Default for SvgState {
    fn default() -> Self {
        Self { scale: 544.0 }
    }
}

/// Default on-disk layout, used as the base that stored keys are merged over
#[derive(Clone, Debug, Default, Serialize)]
struct StoredSettings {
    circle: CircleState,
    star: StarState,
    svg: SvgState,
}

impl StoredSettings {
    fn into_document(self) -> Result<Map<String, Value>, SettingsError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

/// The shared state document
///
/// Cloning is cheap; clones share the same document.
#[derive(Clone, Debug)]
pub struct Settings {
    doc: Rc<RefCell<Map<String, Value>>>,
}

impl Default for Settings {
    fn default() -> Self {
        let doc = StoredSettings::default().into_document().unwrap_or_default();
        Self::from_document(doc)
    }
}

impl Settings {
    fn from_document(doc: Map<String, Value>) -> Self {
        Self {
            doc: Rc::new(RefCell::new(doc)),
        }
    }

    /// Parse a settings document, filling anything missing with defaults
    ///
    /// Stored keys are merged one by one over the defaults without being
    /// type-checked, so a single bad value never discards its neighbours.
    /// Each reader validates its own keys through [`StateItem::get`].
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let stored: Map<String, Value> = serde_json::from_str(text)?;
        let mut doc = StoredSettings::default().into_document()?;

        for (namespace, value) in stored {
            let Value::Object(keys) = value else {
                log::warn!("Ignoring malformed settings namespace '{}'", namespace);
                continue;
            };
            match doc.get_mut(&namespace) {
                Some(Value::Object(defaults)) => defaults.extend(keys),
                _ => {
                    doc.insert(namespace, Value::Object(keys));
                }
            }
        }

        Ok(Self::from_document(doc))
    }

    /// Load from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to parse settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// The whole document as pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(&*self.doc.borrow())?)
    }

    /// Write to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        let path = settings_path();
        match self.save_to(&path) {
            Ok(()) => log::info!("Saved settings to {}", path.display()),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }

    /// A handle onto one namespace (`circle`, `star`, `svg`, ...)
    pub fn item(&self, namespace: &str) -> StateItem {
        StateItem {
            namespace: namespace.to_string(),
            doc: Rc::clone(&self.doc),
        }
    }
}

/// Key/value access to one namespace of a [`Settings`] document
#[derive(Clone, Debug)]
pub struct StateItem {
    namespace: String,
    doc: Rc<RefCell<Map<String, Value>>>,
}

impl StateItem {
    /// A namespace backed by its own private, empty document
    pub fn detached(namespace: &str) -> Self {
        Settings::from_document(Map::new()).item(namespace)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Read `key`, or `None` if it is missing or has the wrong type
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let doc = self.doc.borrow();
        let value = doc.get(&self.namespace)?.get(key)?;
        match T::deserialize(value) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Ignoring malformed {}.{} ({})", self.namespace, key, e);
                None
            }
        }
    }

    /// Read `key`, falling back to `default`
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Store `value` under `key`
    pub fn set<T: Serialize>(&self, key: &str, value: T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Failed to store {}.{}: {}", self.namespace, key, e);
                return;
            }
        };

        let mut doc = self.doc.borrow_mut();
        let entry = doc
            .entry(self.namespace.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.insert(key.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        let circle = settings.item("circle");
        assert_eq!(circle.get::<f64>("size"), Some(32.0));
        assert_eq!(circle.get::<RingMode>("mode"), Some(RingMode::Thickness));
        assert_eq!(settings.item("star").get::<u32>("points"), Some(5));
        assert_eq!(settings.item("svg").get::<f64>("scale"), Some(544.0));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "star": { "points": 8 } }"#).unwrap();
        let star = settings.item("star");
        assert_eq!(star.get::<u32>("points"), Some(8));
        assert_eq!(star.get::<f64>("size"), Some(32.0));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_bad_key_keeps_other_values() {
        let settings = Settings::from_json(
            r#"{
                "circle": { "size": 64, "mode": "wavy" },
                "star": { "points": 8 },
                "svg": { "scale": 900 }
            }"#,
        )
        .unwrap();

        let circle = settings.item("circle");
        assert_eq!(circle.get::<f64>("size"), Some(64.0));
        assert_eq!(circle.get::<RingMode>("mode"), None);
        assert_eq!(circle.get::<f64>("thickness"), Some(1.0));
        assert_eq!(settings.item("star").get::<u32>("points"), Some(8));
        assert_eq!(settings.item("svg").get::<f64>("scale"), Some(900.0));
    }

    #[test]
    fn test_bad_namespace_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "star": 3, "svg": { "scale": 700 } }"#).unwrap();
        assert_eq!(settings.item("star").get::<u32>("points"), Some(5));
        assert_eq!(settings.item("svg").get::<f64>("scale"), Some(700.0));
    }

    #[test]
    fn test_set_is_shared_between_handles() {
        let settings = Settings::default();
        let a = settings.item("circle");
        let b = settings.clone().item("circle");

        a.set("size", 64.0);
        assert_eq!(b.get::<f64>("size"), Some(64.0));
    }

    #[test]
    fn test_malformed_value_falls_back() {
        let item = StateItem::detached("star");
        item.set("points", "many");
        assert_eq!(item.get::<u32>("points"), None);
        assert_eq!(item.get_or("points", 5u32), 5);
    }

    #[test]
    fn test_round_trip_through_json() {
        let settings = Settings::default();
        settings.item("svg").set("scale", 1000.0);

        let reloaded = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.item("svg").get::<f64>("scale"), Some(1000.0));
    }
}
