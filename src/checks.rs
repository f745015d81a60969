use crate::grades::Gradebook;
use tracing::{info, warn};

/// Report students and submissions that do not match up. Nothing here is
/// fatal: the gradebook stays usable whatever is found.
pub fn check_consistency(g: &Gradebook) -> usize {
    let mut issues = 0;
    for student in g.submissions.students() {
        if !g.roster.contains(student) {
            warn!(student = %student, "submissions recorded for a student absent from the roster");
            issues += 1;
        }
    }
    for student in g.roster.students() {
        if g.submissions.for_student(&student.id).is_none() {
            warn!(student = %student, "student has no submission");
            issues += 1;
        }
    }
    info!(
        students = g.roster.len(),
        assignments = g.catalog.len(),
        total_points = g.catalog.total_points(),
        issues,
        "consistency checked"
    );
    issues
}
