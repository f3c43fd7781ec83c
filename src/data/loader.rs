//! Dashboard Data Loader Module
//! Reads the two pre-computed count mappings the charts are drawn from.

use crate::data::CategoryCounts;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid dashboard data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Counts supplied by the backend: vulnerabilities by type and by risk level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(rename = "vulnerabilidades", default)]
    pub vulnerabilities: CategoryCounts,
    #[serde(rename = "riesgos", default)]
    pub risks: CategoryCounts,
}

/// Loads dashboard data files and remembers the last one loaded.
pub struct DataLoader {
    data: Option<DashboardData>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            data: None,
            file_path: None,
        }
    }

    /// Load a JSON data file.
    pub fn load_json(&mut self, file_path: &Path) -> Result<&DashboardData, LoaderError> {
        let text = fs::read_to_string(file_path).map_err(|source| LoaderError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        let data = Self::parse(&text)?;
        log::info!(
            "Loaded {} vulnerability types and {} risk levels from {}",
            data.vulnerabilities.len(),
            data.risks.len(),
            file_path.display()
        );

        self.file_path = Some(file_path.to_path_buf());
        Ok(&*self.data.insert(data))
    }

    pub fn parse(text: &str) -> Result<DashboardData, LoaderError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn get_data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_both_mappings() {
        let data = DataLoader::parse(
            r#"{"vulnerabilidades": {"SQLi": 3, "XSS": 5},
                "riesgos": {"Alto": 2, "Medio": 4, "Bajo": 1}}"#,
        )
        .unwrap();
        assert_eq!(data.vulnerabilities.labels(), vec!["SQLi", "XSS"]);
        assert_eq!(data.risks.labels(), vec!["Alto", "Medio", "Bajo"]);
    }

    #[test]
    fn missing_mapping_defaults_to_empty() {
        let data = DataLoader::parse(r#"{"riesgos": {"Alto": 1}}"#).unwrap();
        assert!(data.vulnerabilities.is_empty());
        assert_eq!(data.risks.len(), 1);
    }

    #[test]
    fn rejects_negative_counts() {
        let err = DataLoader::parse(r#"{"vulnerabilidades": {"SQLi": -3}}"#).unwrap_err();
        assert!(matches!(err, LoaderError::Json(_)));
    }

    #[test]
    fn load_json_remembers_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"vulnerabilidades": {{"XSS": 2}}, "riesgos": {{}}}}"#).unwrap();

        let mut loader = DataLoader::new();
        let data = loader.load_json(file.path()).unwrap();
        assert_eq!(data.vulnerabilities.get("XSS"), Some(2));
        assert_eq!(loader.get_file_path().map(|p| p.as_path()), Some(file.path()));
        assert!(loader.get_data().is_some());
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut loader = DataLoader::new();
        let err = loader
            .load_json(Path::new("/nonexistent/dashboard.json"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
        assert!(loader.get_data().is_none());
    }
}
