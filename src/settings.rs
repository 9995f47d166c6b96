use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// Telemetry delivery settings consumed verbatim by the sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySettings {
    /// Collection endpoint URL. An empty value makes every send fail and get
    /// logged, it is not validated up front.
    pub url: String,
    /// Identifier stamped on each record at send time.
    pub email: String,
    /// Optional HTTP proxy URL.
    pub http_proxy: Option<String>,
    /// Enforce certificate verification on proxied connections.
    pub proxy_strict_ssl: bool,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            email: String::new(),
            http_proxy: None,
            proxy_strict_ssl: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserSettings {
    telemetry: TelemetrySettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            telemetry: TelemetrySettings::default(),
        }
    }
}

/// File-backed settings store shared between the host thread and the
/// telemetry worker.
pub struct SettingsStore {
    path: Option<PathBuf>,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    /// Store for hosts that supply configuration directly instead of
    /// through a settings file. Updates are kept in memory only.
    pub fn in_memory(telemetry: TelemetrySettings) -> Self {
        Self {
            path: None,
            data: RwLock::new(UserSettings { telemetry }),
        }
    }

    pub fn telemetry(&self) -> TelemetrySettings {
        self.data.read().unwrap().telemetry.clone()
    }

    pub fn update_telemetry(&self, settings: TelemetrySettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.telemetry = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    pub fn reload(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let contents = fs::read_to_string(path)?;
        let data: UserSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }
}
