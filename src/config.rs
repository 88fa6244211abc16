use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::game::GameSettings;

/// Game settings persisted as a YAML file, with an in-memory cache. A
/// missing file is not an error: defaults are returned and nothing is
/// written until `store`. Settings are validated on every load and store.
#[derive(Clone)]
pub struct SettingsFile {
    path: PathBuf,
    cached: Arc<Mutex<Option<GameSettings>>>,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Arc::new(Mutex::new(None)),
        }
    }

    pub fn load(&self) -> Result<GameSettings, String> {
        let mut cached = self.cached.lock().unwrap();
        if let Some(settings) = cached.as_ref() {
            return Ok(settings.clone());
        }

        if !self.path.exists() {
            return Ok(GameSettings::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read settings file: {e}"))?;
        let settings: GameSettings = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to parse settings file: {e}"))?;
        settings.validate()?;

        *cached = Some(settings.clone());
        Ok(settings)
    }

    pub fn store(&self, settings: &GameSettings) -> Result<(), String> {
        settings.validate()?;

        let content = serde_yaml_ng::to_string(settings)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;
        std::fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write settings file: {e}"))?;

        *self.cached.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}
