use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::models::settings::ViewSettings;
use crate::domain::ports::SettingsStore;
use crate::error::AppError;

/// File-backed settings service. The persisted blob lives under one
/// fixed path and is schema-validated on load; anything that fails to
/// parse or validate is discarded in favor of defaults rather than
/// surfacing a broken view.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> Result<ViewSettings, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No settings file at {:?}, using defaults", self.path);
                return Ok(ViewSettings::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<ViewSettings>(&bytes) {
            Ok(settings) => match settings.validate() {
                Ok(()) => Ok(settings),
                Err(e) => {
                    warn!("Discarding invalid settings blob: {}", e);
                    Ok(ViewSettings::default())
                }
            },
            Err(e) => {
                warn!("Discarding malformed settings blob: {}", e);
                Ok(ViewSettings::default())
            }
        }
    }

    async fn save(&self, settings: &ViewSettings) -> Result<(), AppError> {
        settings.validate()?;
        let json = serde_json::to_vec_pretty(settings)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
