//! Format detection, file discovery and loading of irrigation tunables.

use std::path::{Path, PathBuf};

use irrigation_system::{ConfigError, IrrigationConfig};
use serde::de::DeserializeOwned;

use crate::schema::IrrigationData;

/// Base name of the irrigation data file inside a data directory.
pub const CONFIG_BASE_NAME: &str = "irrigation";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading irrigation data.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A numeric value in the file (NaN, infinite, or too large) has no
    /// fixed-point representation.
    #[error("value out of range in {file}: {field} = {value}")]
    OutOfRange {
        file: PathBuf,
        field: &'static str,
        value: f64,
    },

    /// The file parsed but describes an unusable configuration.
    #[error("invalid configuration in {file}: {source}")]
    Invalid {
        file: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    const ALL: [(Format, &'static str); 3] = [
        (Format::Ron, "ron"),
        (Format::Toml, "toml"),
        (Format::Json, "json"),
    ];
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .iter()
        .find(|(_, e)| Some(*e) == ext)
        .map(|(f, _)| *f)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Look for `{base_name}.ron|toml|json` in `dir`.
///
/// `Ok(None)` if none exists; `ConflictingFormats` if more than one does.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;
    for (_, ext) in Format::ALL {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }
    Ok(found)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Parse `content` as `format`. `file` is only used for error reporting.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<T, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and deserialize it according to its extension.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load, resolve and validate one irrigation data file.
pub fn load_config_file(path: &Path) -> Result<IrrigationConfig, DataLoadError> {
    let data: IrrigationData = deserialize_file(path)?;
    let config = data.resolve().map_err(|e| DataLoadError::OutOfRange {
        file: path.to_path_buf(),
        field: e.field,
        value: e.value,
    })?;
    config.validate().map_err(|source| DataLoadError::Invalid {
        file: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(file = %path.display(), "irrigation config loaded");
    Ok(config)
}

/// Load the irrigation config from `dir`, falling back to the defaults when
/// the directory has no irrigation data file.
pub fn load_irrigation_config(dir: &Path) -> Result<IrrigationConfig, DataLoadError> {
    match find_data_file(dir, CONFIG_BASE_NAME)? {
        Some(path) => load_config_file(&path),
        None => {
            tracing::debug!(dir = %dir.display(), "no irrigation data file, using defaults");
            Ok(IrrigationConfig::default())
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use irrigation_core::fixed::{Fixed64, MINUTES_PER_DAY};
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "irrigation_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn detect_formats() {
        assert_eq!(detect_format(Path::new("a.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("a.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("a.json")).unwrap(), Format::Json);
        assert!(matches!(
            detect_format(Path::new("a.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("a")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = make_test_dir("missing");
        let config = load_irrigation_config(&dir).unwrap();
        assert_eq!(config, IrrigationConfig::default());
        cleanup(&dir);
    }

    #[test]
    fn toml_overrides_some_fields() {
        let dir = make_test_dir("toml");
        fs::write(
            dir.join("irrigation.toml"),
            r#"
[pressure]
decay_per_hop = 5.0

[leak]
age_threshold_days = 60

[usage.cost_per_thousand]
municipal = 0.25
"#,
        )
        .unwrap();

        let config = load_irrigation_config(&dir).unwrap();
        assert_eq!(config.pressure.decay_per_hop, Fixed64::from_num(5));
        assert_eq!(config.pressure.source_pressure, Fixed64::from_num(100));
        assert_eq!(config.leak.age_threshold, 60 * MINUTES_PER_DAY);
        assert_eq!(config.usage.cost.municipal, Fixed64::from_num(0.25));
        assert_eq!(config.usage.cost.well, Fixed64::from_num(0.04));
        cleanup(&dir);
    }

    #[test]
    fn ron_file_loads() {
        let dir = make_test_dir("ron");
        fs::write(
            dir.join("irrigation.ron"),
            "(usage: (consumption: (impact: 30.0)))",
        )
        .unwrap();
        let config = load_irrigation_config(&dir).unwrap();
        assert_eq!(config.usage.consumption.impact, Fixed64::from_num(30));
        cleanup(&dir);
    }

    #[test]
    fn json_file_loads() {
        let dir = make_test_dir("json");
        fs::write(
            dir.join("irrigation.json"),
            r#"{ "leak": { "max_probability": 0.5 } }"#,
        )
        .unwrap();
        let config = load_irrigation_config(&dir).unwrap();
        assert_eq!(config.leak.max_probability, Fixed64::from_num(0.5));
        cleanup(&dir);
    }

    #[test]
    fn conflicting_formats_are_an_error() {
        let dir = make_test_dir("conflict");
        fs::write(dir.join("irrigation.ron"), "()").unwrap();
        fs::write(dir.join("irrigation.json"), "{}").unwrap();
        assert!(matches!(
            load_irrigation_config(&dir),
            Err(DataLoadError::ConflictingFormats { .. })
        ));
        cleanup(&dir);
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let dir = make_test_dir("unknown");
        fs::write(dir.join("irrigation.json"), r#"{ "presure": {} }"#).unwrap();
        assert!(matches!(
            load_irrigation_config(&dir),
            Err(DataLoadError::Parse { .. })
        ));
        cleanup(&dir);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = make_test_dir("invalid");
        fs::write(
            dir.join("irrigation.json"),
            r#"{ "pressure": { "min_connected_pressure": 0.0 } }"#,
        )
        .unwrap();
        let err = load_irrigation_config(&dir).unwrap_err();
        assert!(matches!(err, DataLoadError::Invalid { .. }));
        assert!(err.to_string().contains("min_connected_pressure"));
        cleanup(&dir);
    }

    #[test]
    fn huge_json_value_is_out_of_range() {
        let dir = make_test_dir("huge");
        fs::write(
            dir.join("irrigation.json"),
            r#"{ "pressure": { "decay_per_hop": 1e12 } }"#,
        )
        .unwrap();
        match load_irrigation_config(&dir) {
            Err(DataLoadError::OutOfRange { field, .. }) => {
                assert_eq!(field, "pressure.decay_per_hop");
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
        cleanup(&dir);
    }

    #[test]
    fn nan_toml_value_is_out_of_range() {
        let dir = make_test_dir("nan");
        fs::write(
            dir.join("irrigation.toml"),
            "[usage.consumption]\nrotary = nan\n",
        )
        .unwrap();
        match load_irrigation_config(&dir) {
            Err(DataLoadError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "usage.consumption.rotary");
                assert!(value.is_nan());
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
        cleanup(&dir);
    }
}
