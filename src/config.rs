use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const SYSTEM_CONFIG_PATH: &str = "/etc/meshrider/console.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub general: GeneralConfig,
    pub timing: TimingConfig,
    pub flow: FlowConfig,
    pub telemetry: TelemetryConfig,
}

impl ConsoleConfig {
    /// Load from the user config dir, then the system path, else defaults
    pub fn load() -> Result<Self> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load_from(path);
            }
        }
        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ConsoleConfig = toml::from_str(&content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("meshrider").join("console.toml"));
        }
        paths.push(PathBuf::from(SYSTEM_CONFIG_PATH));
        paths
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Product name shown in the header
    pub title: String,
    /// Address shown in the online indicator
    pub device_address: String,
    pub tick_rate_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "MeshRider".to_string(),
            device_address: "192.168.1.1".to_string(),
            tick_rate_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub step_dwell_ms: u64,
    pub analysis_ms: u64,
    pub fix_step_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_dwell_ms: 1500,
            analysis_ms: 2000,
            fix_step_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Allow applying the fix again from a results screen reached by a fix
    pub repeat_fix: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Fixed seed for the live metric jitter
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use std::io::Write;

    #[test]
    fn defaults_match_stock_console() {
        let config = ConsoleConfig::default();
        assert_eq!(config.general.title, "MeshRider");
        assert_eq!(config.general.device_address, "192.168.1.1");
        assert_eq!(config.timing.step_dwell_ms, 1500);
        assert_eq!(config.timing.analysis_ms, 2000);
        assert_eq!(config.timing.fix_step_ms, 1000);
        assert!(!config.flow.repeat_fix);
        assert_eq!(config.telemetry.seed, None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConsoleConfig::load_from(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.general.tick_rate_ms, 250);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[general]
device_address = "10.0.0.7"

[timing]
step_dwell_ms = 200

[flow]
repeat_fix = true

[telemetry]
seed = 1234
"#
        )
        .unwrap();

        let config = ConsoleConfig::load_from(file.path()).unwrap();
        assert_eq!(config.general.device_address, "10.0.0.7");
        assert_eq!(config.general.title, "MeshRider");
        assert_eq!(config.timing.step_dwell_ms, 200);
        assert_eq!(config.timing.analysis_ms, 2000);
        assert!(config.flow.repeat_fix);
        assert_eq!(config.telemetry.seed, Some(1234));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nstep_dwell_ms = \"slow\"").unwrap();

        let err = ConsoleConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigParse(_)));
    }
}
