//! Settings file source and its `[values]` table.

use crate::error::BusError;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Add a TOML settings file to builder. The file must exist.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    Ok(builder)
}

#[derive(Debug, Default, Deserialize)]
struct ValuesDocument {
    #[serde(default)]
    values: HashMap<String, String>,
}

/// Read the `[values]` table verbatim.
///
/// Parsed with `toml` directly rather than through the merged settings so value
/// names keep their case (`AppName`, `PubTopics`).
pub fn read_values(path: &Path) -> Result<HashMap<String, String>, BusError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BusError::ConfigError(format!(
            "Failed to read settings file {}: {}",
            path.display(),
            e
        ))
    })?;
    let document: ValuesDocument = toml::from_str(&content).map_err(|e| {
        BusError::ConfigError(format!(
            "Failed to parse settings file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(document.values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_table_keeps_key_case() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("busconf.toml");
        std::fs::write(
            &path,
            "[probe]\nmax_attempts = 3\n\n[values]\nAppName = \"Analytics\"\nPubTopics = \"a,b\"\n",
        )
        .unwrap();

        let values = read_values(&path).unwrap();
        assert_eq!(values.get("AppName").map(String::as_str), Some("Analytics"));
        assert_eq!(values.get("PubTopics").map(String::as_str), Some("a,b"));
    }

    #[test]
    fn missing_values_table_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("busconf.toml");
        std::fs::write(&path, "[probe]\nmax_attempts = 3\n").unwrap();
        assert!(read_values(&path).unwrap().is_empty());
    }

    #[test]
    fn unreadable_file_is_config_error() {
        let err = read_values(Path::new("/nonexistent/busconf.toml")).unwrap_err();
        assert!(matches!(err, BusError::ConfigError(_)));
    }
}
