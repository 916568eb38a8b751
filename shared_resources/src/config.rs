use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const FILE_PATH: &str = "config.json";
const FALLBACK_FILE_PATH: &str = "_config.json";

/// Which waiting passengers board when a car stops at a floor.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ClearRequestVariant {
    /// Everyone boards, even those travelling the "wrong" way for a while.
    All,
    /// Only those going the car's way board; the others keep waiting.
    #[default]
    InDirn,
}

impl fmt::Display for ClearRequestVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClearRequestVariant::All => f.write_str("all"),
            ClearRequestVariant::InDirn => f.write_str("inDirn"),
        }
    }
}

impl FromStr for ClearRequestVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ClearRequestVariant::All),
            "inDirn" => Ok(ClearRequestVariant::InDirn),
            other => Err(format!("unknown clear request type \"{}\", expected all or inDirn", other)),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ConfigFile {
    pub travel_duration_ms: u64,
    pub door_open_duration_ms: u64,
    pub clear_request_type: ClearRequestVariant,
    pub include_cab: bool,
    pub exhaustive_threshold: u64,
    pub search_budget_ms: u64,
    pub workers: usize,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            travel_duration_ms: 2500,
            door_open_duration_ms: 3000,
            clear_request_type: ClearRequestVariant::InDirn,
            include_cab: false,
            exhaustive_threshold: 1 << 16,
            search_budget_ms: 1000,
            workers: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub travel_duration: Duration,
    pub door_open_duration: Duration,
    pub clear_request_variant: ClearRequestVariant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub exhaustive_threshold: u64,
    pub budget: Duration,
    /// Worker threads for the exhaustive search; 0 means one per core.
    pub workers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub include_cab: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignerConfig {
    pub simulation: SimulationConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

impl Default for AssignerConfig {
    fn default() -> Self {
        AssignerConfig::build(ConfigFile::default())
    }
}

impl AssignerConfig {
    pub fn from_file(config_file: ConfigFile) -> Result<Self, ConfigError> {
        if config_file.travel_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "travelDurationMs",
                reason: String::from("must be positive"),
            });
        }
        if config_file.exhaustive_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                key: "exhaustiveThreshold",
                reason: String::from("must be positive"),
            });
        }
        Ok(AssignerConfig::build(config_file))
    }

    fn build(config_file: ConfigFile) -> Self {
        AssignerConfig {
            simulation: SimulationConfig {
                travel_duration: Duration::from_millis(config_file.travel_duration_ms),
                door_open_duration: Duration::from_millis(config_file.door_open_duration_ms),
                clear_request_variant: config_file.clear_request_type,
            },
            search: SearchConfig {
                exhaustive_threshold: config_file.exhaustive_threshold,
                budget: Duration::from_millis(config_file.search_budget_ms),
                workers: config_file.workers,
            },
            output: OutputConfig {
                include_cab: config_file.include_cab,
            },
        }
    }

    /// Reads the given file, or looks for `config.json` and `_config.json`
    /// in the working directory, falling back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = match path {
            Some(path) => read_config_file(path)?,
            None => {
                let candidates = [PathBuf::from(FILE_PATH), PathBuf::from(FALLBACK_FILE_PATH)];
                match candidates.iter().find(|candidate| candidate.is_file()) {
                    Some(found) => read_config_file(found)?,
                    None => {
                        tracing::info!("No configuration file provided, using default settings...");
                        ConfigFile::default()
                    }
                }
            }
        };
        AssignerConfig::from_file(config_file)
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let config_contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config_file = serde_json::from_str(&config_contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config_file)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_reference_assigner() {
        let config = AssignerConfig::default();
        assert_eq!(config.simulation.travel_duration, Duration::from_millis(2500));
        assert_eq!(config.simulation.door_open_duration, Duration::from_millis(3000));
        assert_eq!(config.simulation.clear_request_variant, ClearRequestVariant::InDirn);
        assert!(!config.output.include_cab);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"travelDurationMs": 1000, "clearRequestType": "all"}}"#).unwrap();

        let config = AssignerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.simulation.travel_duration, Duration::from_millis(1000));
        assert_eq!(config.simulation.clear_request_variant, ClearRequestVariant::All);
        assert_eq!(config.search.budget, Duration::from_millis(1000));
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"numFloors": 4}}"#).unwrap();
        assert!(matches!(
            AssignerConfig::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(AssignerConfig::load(Some(&path)), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn zero_travel_duration_is_rejected() {
        let config_file = ConfigFile {
            travel_duration_ms: 0,
            ..ConfigFile::default()
        };
        assert!(matches!(
            AssignerConfig::from_file(config_file),
            Err(ConfigError::InvalidValue { key: "travelDurationMs", .. })
        ));
    }

    #[test]
    fn clear_request_type_parses_cli_spelling() {
        assert_eq!("inDirn".parse::<ClearRequestVariant>(), Ok(ClearRequestVariant::InDirn));
        assert!("indirn".parse::<ClearRequestVariant>().is_err());
    }
}
