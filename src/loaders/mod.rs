use crate::config::{Config, Layout};
use crate::error::GradeError;
use crate::grades::Gradebook;
use crate::model::{Catalog, Roster, Submission, Submissions};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

pub use self::catalog::parse_catalog;
pub use self::roster::parse_roster;
pub use self::submissions::{parse_file_name, parse_grouped, parse_per_pair, parse_percentage};

mod catalog;
mod roster;
mod submissions;

/// Submission layout once detection has been resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionLayout {
    PerPair,
    Grouped,
}

/// Reads the roster, the catalog and the submissions found under the
/// configured data directory.
pub struct Loader<'a> {
    config: &'a Config,
}

impl<'a> Loader<'a> {
    pub fn new(config: &'a Config) -> Self {
        Loader { config }
    }

    pub fn load(&self) -> Result<Gradebook, GradeError> {
        let roster = self.load_roster()?;
        let catalog = self.load_catalog()?;
        let submissions = self.load_submissions(&catalog)?;
        info!(
            students = roster.len(),
            assignments = catalog.len(),
            total_points = catalog.total_points(),
            submissions = submissions.len(),
            "gradebook loaded"
        );
        Ok(Gradebook::new(roster, catalog, submissions))
    }

    pub fn load_roster(&self) -> Result<Roster, GradeError> {
        let path = self.config.data_path(&self.config.roster.file);
        let content = read_source(&path, "roster file")?;
        parse_roster(content.lines(), self.config.roster.id_width).map_err(|e| e.in_file(&path))
    }

    pub fn load_catalog(&self) -> Result<Catalog, GradeError> {
        let path = self.config.data_path(&self.config.catalog.file);
        let catalog = parse_catalog(read_source_lossy(&path, "assignment catalog")?.lines());
        if catalog.is_empty() {
            return Err(GradeError::Configuration(format!(
                "assignment catalog {} defines no assignment",
                path.display()
            )));
        }
        Ok(catalog)
    }

    /// Load submissions, dropping those for assignments absent from `catalog`
    /// unless the configuration accepts them.
    pub fn load_submissions(&self, catalog: &Catalog) -> Result<Submissions, GradeError> {
        let records = match self.layout()? {
            SubmissionLayout::PerPair => {
                self.read_per_pair(&self.config.data_path(&self.config.submissions.directory))?
            }
            SubmissionLayout::Grouped => self.read_grouped()?,
        };
        let reject = self.config.submissions.reject_unknown_assignments;
        Ok(records
            .into_iter()
            .filter(|s| {
                let keep = !reject || catalog.contains(&s.assignment);
                if !keep {
                    debug!(
                        student = %s.student,
                        assignment = %s.assignment,
                        "unknown assignment, submission rejected"
                    );
                }
                keep
            })
            .collect())
    }

    /// The submission layout to use. Detection only checks which of the
    /// configured locations exist.
    pub fn layout(&self) -> Result<SubmissionLayout, GradeError> {
        let submissions = &self.config.submissions;
        match submissions.layout {
            Layout::Detect => {
                let directory = self.config.data_path(&submissions.directory);
                let grouped = submissions.files.first().map(|f| self.config.data_path(f));
                if directory.is_dir() {
                    Ok(SubmissionLayout::PerPair)
                } else if grouped.is_some_and(|f| f.is_file()) {
                    Ok(SubmissionLayout::Grouped)
                } else {
                    Err(GradeError::Configuration(format!(
                        "no submissions found: {} is not a directory and no grouped submission file exists",
                        directory.display()
                    )))
                }
            }
            Layout::PerPair => Ok(SubmissionLayout::PerPair),
            Layout::Grouped => Ok(SubmissionLayout::Grouped),
        }
    }

    #[instrument(skip(self))]
    fn read_per_pair(&self, directory: &Path) -> Result<Vec<Submission>, GradeError> {
        if !directory.is_dir() {
            return Err(GradeError::Configuration(format!(
                "submissions directory {} not found",
                directory.display()
            )));
        }
        let mut files = fs::read_dir(directory)
            .map_err(|e| GradeError::io(directory, e))?
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect::<Vec<_>>();
        files.sort();
        let mut records = Vec::new();
        for file_name in files {
            if parse_file_name(&file_name).is_none() {
                debug!(%file_name, "not a submission file");
                continue;
            }
            let body = match fs::read_to_string(directory.join(&file_name)) {
                Ok(body) => body,
                Err(e) => {
                    debug!(%file_name, error = %e, "cannot read submission file");
                    continue;
                }
            };
            match parse_per_pair(&file_name, &body) {
                Some(submission) => records.push(submission),
                None => debug!(%file_name, "skipping submission file without a percentage"),
            }
        }
        Ok(records)
    }

    fn read_grouped(&self) -> Result<Vec<Submission>, GradeError> {
        let delimiter = self.config.submissions.delimiter_byte()?;
        let mut records = Vec::new();
        for file in &self.config.submissions.files {
            let path = self.config.data_path(file);
            let content = read_source_lossy(&path, "submission file")?;
            let parsed = parse_grouped(&content, delimiter);
            debug!(path = %path.display(), records = parsed.len(), "submission file read");
            records.extend(parsed);
        }
        Ok(records)
    }
}

fn ensure_exists(path: &Path, what: &str) -> Result<(), GradeError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(GradeError::Configuration(format!(
            "{what} not found at {}",
            path.display()
        )))
    }
}

fn read_source(path: &Path, what: &str) -> Result<String, GradeError> {
    ensure_exists(path, what)?;
    fs::read_to_string(path).map_err(|e| GradeError::io(path, e))
}

/// Read a source whose records are skipped individually when bad. Invalid
/// UTF-8 is replaced so that it only spoils the records it appears in.
fn read_source_lossy(path: &Path, what: &str) -> Result<String, GradeError> {
    ensure_exists(path, what)?;
    let bytes = fs::read(path).map_err(|e| GradeError::io(path, e))?;
    Ok(match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), "invalid UTF-8 replaced");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}
