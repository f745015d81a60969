use crate::error::GradeError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Directory every relative data path is resolved against.
    pub data_dir: PathBuf,
    pub roster: RosterConfig,
    pub catalog: CatalogConfig,
    pub submissions: SubmissionsConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RosterConfig {
    pub file: PathBuf,
    /// Number of trailing characters of a roster line holding the student id.
    pub id_width: usize,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CatalogConfig {
    pub file: PathBuf,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Per-pair directory if present, grouped files otherwise.
    #[default]
    Detect,
    /// One `<student>_<assignment>.txt` file per submission.
    PerPair,
    /// Files holding one `student, assignment, percentage` record per line.
    Grouped,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SubmissionsConfig {
    pub layout: Layout,
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
    /// Field separator of grouped files, whitespace when absent.
    pub delimiter: Option<String>,
    pub reject_unknown_assignments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            roster: RosterConfig::default(),
            catalog: CatalogConfig::default(),
            submissions: SubmissionsConfig::default(),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            file: PathBuf::from("students.txt"),
            id_width: 3,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            file: PathBuf::from("assignments.txt"),
        }
    }
}

impl Default for SubmissionsConfig {
    fn default() -> Self {
        SubmissionsConfig {
            layout: Layout::Detect,
            directory: PathBuf::from("submissions"),
            files: vec![PathBuf::from("submissions.txt")],
            delimiter: None,
            reject_unknown_assignments: true,
        }
    }
}

impl Config {
    pub fn load(file_name: &Path) -> Result<Config, GradeError> {
        let content = fs::read_to_string(file_name).map_err(|e| GradeError::io(file_name, e))?;
        Self::parse(&content).map_err(|e| match e {
            GradeError::Configuration(msg) => GradeError::Configuration(format!(
                "cannot load configuration file {}: {msg}",
                file_name.display()
            )),
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Config, GradeError> {
        let config: Config =
            toml::from_str(content).map_err(|e| GradeError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), GradeError> {
        if self.roster.id_width == 0 {
            return Err(GradeError::Configuration(
                "roster.id-width must be at least 1".to_owned(),
            ));
        }
        self.submissions.delimiter_byte()?;
        Ok(())
    }

    /// Resolve a configured path against the data directory.
    pub fn data_path(&self, path: &Path) -> PathBuf {
        self.data_dir.join(path)
    }
}

impl SubmissionsConfig {
    pub fn delimiter_byte(&self) -> Result<Option<u8>, GradeError> {
        match self.delimiter.as_deref() {
            None => Ok(None),
            Some(d) if d.len() == 1 && d.is_ascii() => Ok(Some(d.as_bytes()[0])),
            Some(d) => Err(GradeError::Configuration(format!(
                "submissions.delimiter must be a single ASCII character, got {d:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.roster.id_width, 3);
        assert_eq!(config.submissions.layout, Layout::Detect);
        assert!(config.submissions.reject_unknown_assignments);
        assert_eq!(config.submissions.delimiter_byte().unwrap(), None);
    }

    #[test]
    fn test_full_file() {
        let config = Config::parse(
            r#"
            data-dir = "course"

            [roster]
            file = "roster.txt"
            id-width = 4

            [submissions]
            layout = "grouped"
            files = ["week1.txt", "week2.txt"]
            delimiter = "|"
            reject-unknown-assignments = false
            "#,
        )
        .unwrap();
        assert_eq!(
            config.data_path(&config.roster.file),
            Path::new("course").join("roster.txt")
        );
        assert_eq!(config.roster.id_width, 4);
        assert_eq!(config.catalog.file, PathBuf::from("assignments.txt"));
        assert_eq!(config.submissions.layout, Layout::Grouped);
        assert_eq!(config.submissions.files.len(), 2);
        assert_eq!(config.submissions.delimiter_byte().unwrap(), Some(b'|'));
        assert!(!config.submissions.reject_unknown_assignments);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::parse("[roster]\nid-width = 0").is_err());
        assert!(Config::parse("[submissions]\ndelimiter = \"||\"").is_err());
        assert!(Config::parse("[submissions]\nlayout = \"zip\"").is_err());
        assert!(Config::parse("unknown-key = 1").is_err());
    }
}
