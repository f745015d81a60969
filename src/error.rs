use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Kind of key a query could not resolve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Missing {
    Student,
    Assignment,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Student => write!(f, "Student"),
            Missing::Assignment => write!(f, "Assignment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum GradeError {
    /// A required input source is absent or the configuration is unusable.
    #[error("{0}")]
    Configuration(String),

    /// A record could not be parsed and the loader does not tolerate it.
    #[error("{}line {line}: {reason}", file_prefix(.file))]
    Parse {
        file: Option<PathBuf>,
        line: usize,
        reason: String,
    },

    /// A query key does not resolve.
    #[error("{kind} not found")]
    NotFound { kind: Missing, key: String },

    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn file_prefix(file: &Option<PathBuf>) -> String {
    file.as_ref()
        .map(|f| format!("{}: ", f.display()))
        .unwrap_or_default()
}

impl GradeError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        GradeError::Parse {
            file: None,
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: Missing, key: impl Into<String>) -> Self {
        GradeError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        GradeError::Io {
            path: path.to_owned(),
            source,
        }
    }

    /// Attach the file a parse error comes from.
    pub(crate) fn in_file(self, path: &Path) -> Self {
        match self {
            GradeError::Parse { line, reason, .. } => GradeError::Parse {
                file: Some(path.to_owned()),
                line,
                reason,
            },
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GradeError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let e = GradeError::not_found(Missing::Student, "Bob");
        assert_eq!(e.to_string(), "Student not found");
        assert!(e.is_not_found());
    }

    #[test]
    fn parse_message_with_file() {
        let e = GradeError::parse(4, "line too short").in_file(Path::new("students.txt"));
        assert_eq!(e.to_string(), "students.txt: line 4: line too short");
        assert_eq!(GradeError::parse(2, "bad").to_string(), "line 2: bad");
    }
}
