use crate::model::{AssignmentId, StudentId, Submission};
use csv::{ReaderBuilder, Trim};
use tracing::debug;

/// Extension of per-pair submission files.
pub const PER_PAIR_EXTENSION: &str = ".txt";

/// Parse a percentage, accepting only finite numbers.
pub fn parse_percentage(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Split a per-pair file name `<student>_<assignment>.txt` into its ids.
pub fn parse_file_name(file_name: &str) -> Option<(StudentId, AssignmentId)> {
    let stem = file_name.strip_suffix(PER_PAIR_EXTENSION)?;
    let mut parts = stem.split('_');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(student), Some(assignment), None) if !student.is_empty() && !assignment.is_empty() => {
            Some((StudentId::from(student), AssignmentId::from(assignment)))
        }
        _ => None,
    }
}

/// Build the submission held by a per-pair file from its name and body.
pub fn parse_per_pair(file_name: &str, body: &str) -> Option<Submission> {
    let (student, assignment) = parse_file_name(file_name)?;
    let percentage = parse_percentage(body)?;
    Some(Submission {
        student,
        assignment,
        percentage,
    })
}

/// Parse a grouped submission source, one `student assignment percentage`
/// record per line. Fields are split on `delimiter` when given, on
/// whitespace otherwise. Quotes have no special meaning. Short or
/// unparsable records are skipped.
pub fn parse_grouped(content: &str, delimiter: Option<u8>) -> Vec<Submission> {
    match delimiter {
        Some(delimiter) => parse_delimited(content, delimiter),
        None => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(idx, line)| {
                let submission = record(line.split_whitespace());
                if submission.is_none() {
                    debug!(line = idx + 1, "skipping submission record");
                }
                submission
            })
            .collect(),
    }
}

fn parse_delimited(content: &str, delimiter: u8) -> Vec<Submission> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());
    let mut submissions = Vec::new();
    for result in reader.records() {
        match result {
            Ok(fields) => match record(fields.iter()) {
                Some(submission) => submissions.push(submission),
                None => debug!(
                    line = fields.position().map(csv::Position::line),
                    "skipping submission record"
                ),
            },
            Err(e) => debug!(error = %e, "skipping unreadable submission record"),
        }
    }
    submissions
}

fn record<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<Submission> {
    let student = fields.next().filter(|s| !s.is_empty())?;
    let assignment = fields.next().filter(|a| !a.is_empty())?;
    let percentage = parse_percentage(fields.next()?)?;
    Some(Submission {
        student: StudentId::from(student),
        assignment: AssignmentId::from(assignment),
        percentage,
    })
}
