use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::inject::WaitPolicy;
use crate::swiper::SwipeOptions;
use crate::trajectory::{DistanceMetric, Interpolation};

const MAX_SAMPLE_INTERVAL_MS: u64 = 60_000;

/// Settings that shape how a gesture is generated and delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub interpolation: Interpolation,
    pub metric: DistanceMetric,
    pub wait: WaitPolicy,
    #[serde(alias = "sampleIntervalMs")]
    pub sample_interval_ms: u64,
    /// Event node to write to, bypassing device resolution.
    pub device: Option<PathBuf>,
    /// Directory scanned for `eventN` nodes.
    #[serde(alias = "devInputDir")]
    pub dev_input_dir: PathBuf,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Linear,
            metric: DistanceMetric::Observed,
            wait: WaitPolicy::WaitForFinish,
            sample_interval_ms: 0,
            device: None,
            dev_input_dir: PathBuf::from("/dev/input"),
        }
    }
}

impl SwipeConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SwipeConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_ms > MAX_SAMPLE_INTERVAL_MS {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "sample_interval_ms must be at most {MAX_SAMPLE_INTERVAL_MS}, got {}",
                    self.sample_interval_ms
                ),
            });
        }
        if self.device.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid {
                reason: "device path is empty".to_string(),
            });
        }
        if self.dev_input_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "input directory must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn options(&self) -> SwipeOptions {
        SwipeOptions {
            interpolation: self.interpolation,
            metric: self.metric,
            wait: self.wait,
            sample_interval: self.sample_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg: SwipeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SwipeConfig::default());
        assert_eq!(cfg.options(), SwipeOptions::default());
    }

    #[test]
    fn deserializes_snake_and_camel_case() {
        let cfg: SwipeConfig = serde_json::from_str(
            r#"{
                "interpolation": "sine",
                "metric": "euclidean",
                "wait": "async",
                "sample_interval_ms": 8
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.interpolation, Interpolation::Sine);
        assert_eq!(cfg.metric, DistanceMetric::Euclidean);
        assert_eq!(cfg.wait, WaitPolicy::Async);
        assert_eq!(cfg.sample_interval(), Duration::from_millis(8));

        let json = r#"{"sampleIntervalMs": 16, "devInputDir": "/tmp/input"}"#;
        let cfg: SwipeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.sample_interval_ms, 16);
        assert_eq!(cfg.dev_input_dir, PathBuf::from("/tmp/input"));
    }

    #[test]
    fn rejects_absurd_interval() {
        let cfg = SwipeConfig {
            sample_interval_ms: MAX_SAMPLE_INTERVAL_MS + 1,
            ..SwipeConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"device": "/dev/input/event5", "wait": "wait_for_result"}}"#).unwrap();
        let cfg = SwipeConfig::load(file.path()).unwrap();
        assert_eq!(cfg.device, Some(PathBuf::from("/dev/input/event5")));
        assert_eq!(cfg.wait, WaitPolicy::WaitForResult);
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = SwipeConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SwipeConfig::load(Path::new("/nonexistent/swipee.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
