use crate::error::GradeError;
use crate::model::{Roster, Student, StudentId};
use tracing::trace;

/// Build the roster from raw lines.
///
/// Every non-blank line is `<name><id>` where the id is exactly the last
/// `id_width` characters of the trimmed line and the name is what precedes
/// it, trimmed. Lines too short to hold a name and an id, ids containing
/// whitespace, and ids or names seen on an earlier line are parse errors.
pub fn parse_roster<I, S>(lines: I, id_width: usize) -> Result<Roster, GradeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut roster = Roster::default();
    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let student = split_line(line, id_width).ok_or_else(|| {
            GradeError::parse(
                idx + 1,
                format!("cannot split {line:?} into a name and a {id_width} character id"),
            )
        })?;
        trace!(student = %student, "student read");
        roster.insert(student).map_err(|s| {
            GradeError::parse(idx + 1, format!("student {s} clashes with an earlier entry"))
        })?;
    }
    Ok(roster)
}

fn split_line(line: &str, id_width: usize) -> Option<Student> {
    let (start, _) = line.char_indices().rev().nth(id_width.checked_sub(1)?)?;
    let (name, id) = line.split_at(start);
    let name = name.trim();
    if name.is_empty() || id.chars().any(char::is_whitespace) {
        return None;
    }
    Some(Student {
        id: StudentId(id.to_owned()),
        name: name.to_owned(),
    })
}
