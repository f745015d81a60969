use super::{AssignmentId, StudentId};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub student: StudentId,
    pub assignment: AssignmentId,
    pub percentage: f64,
}

/// Scored submissions, at most one per (student, assignment) pair.
///
/// Both indexes are ordered: per student by assignment id, and per
/// assignment by student id, so that any sum over them is accumulated in
/// a fixed order.
#[derive(Clone, Debug, Default)]
pub struct Submissions {
    by_student: BTreeMap<StudentId, BTreeMap<AssignmentId, f64>>,
    by_assignment: BTreeMap<AssignmentId, Vec<f64>>,
}

impl Submissions {
    pub fn percentage(&self, student: &StudentId, assignment: &AssignmentId) -> Option<f64> {
        self.by_student
            .get(student)
            .and_then(|scores| scores.get(assignment))
            .copied()
    }

    pub fn for_student(&self, student: &StudentId) -> Option<&BTreeMap<AssignmentId, f64>> {
        self.by_student.get(student)
    }

    /// Percentages recorded for an assignment, empty if there are none.
    pub fn for_assignment(&self, assignment: &AssignmentId) -> &[f64] {
        self.by_assignment
            .get(assignment)
            .map_or(&[][..], Vec::as_slice)
    }

    pub fn students(&self) -> impl Iterator<Item = &StudentId> {
        self.by_student.keys()
    }

    pub fn len(&self) -> usize {
        self.by_student.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_student.is_empty()
    }
}

impl FromIterator<Submission> for Submissions {
    /// Later submissions for a pair replace earlier ones.
    fn from_iter<T: IntoIterator<Item = Submission>>(iter: T) -> Self {
        let mut by_student: BTreeMap<StudentId, BTreeMap<AssignmentId, f64>> = BTreeMap::new();
        for s in iter {
            by_student
                .entry(s.student)
                .or_default()
                .insert(s.assignment, s.percentage);
        }
        let mut by_assignment: BTreeMap<AssignmentId, Vec<f64>> = BTreeMap::new();
        for scores in by_student.values() {
            for (assignment, &percentage) in scores {
                by_assignment
                    .entry(assignment.clone())
                    .or_default()
                    .push(percentage);
            }
        }
        Submissions {
            by_student,
            by_assignment,
        }
    }
}
