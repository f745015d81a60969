use crate::error::{GradeError, Missing};
use crate::model::{AssignmentId, Catalog, Roster, StudentId, Submissions};
use crate::stats::{Statistics, round_percent};
use tracing::{instrument, trace};

/// The three loaded collections, queried read-only.
#[derive(Clone, Debug)]
pub struct Gradebook {
    pub roster: Roster,
    pub catalog: Catalog,
    pub submissions: Submissions,
}

impl Gradebook {
    pub fn new(roster: Roster, catalog: Catalog, submissions: Submissions) -> Self {
        Gradebook {
            roster,
            catalog,
            submissions,
        }
    }

    pub fn student_id(&self, name: &str) -> Result<&StudentId, GradeError> {
        self.roster
            .id_of(name)
            .ok_or_else(|| GradeError::not_found(Missing::Student, name))
    }

    pub fn assignment_id(&self, name: &str) -> Result<&AssignmentId, GradeError> {
        self.catalog
            .id_of(name)
            .ok_or_else(|| GradeError::not_found(Missing::Assignment, name))
    }

    /// Overall percentage of the named student.
    pub fn student_grade(&self, name: &str) -> Result<i64, GradeError> {
        self.student_grade_by_id(self.student_id(name)?)
    }

    /// Overall percentage of a student: points earned over every catalog
    /// assignment divided by the total points of the catalog. A missing
    /// submission earns nothing but still counts in the total.
    #[instrument(skip_all, fields(student = %student))]
    #[allow(clippy::cast_precision_loss)]
    pub fn student_grade_by_id(&self, student: &StudentId) -> Result<i64, GradeError> {
        if !self.roster.contains(student) {
            return Err(GradeError::not_found(Missing::Student, &student.0));
        }
        let total_points = self.catalog.total_points();
        if total_points == 0 {
            return Err(GradeError::Configuration(
                "assignment catalog defines no assignment".to_owned(),
            ));
        }
        let earned = self
            .catalog
            .assignments()
            .filter_map(|a| {
                let percentage = self.submissions.percentage(student, &a.id)?;
                let earned = percentage * f64::from(a.max_points) / 100.0;
                trace!(assignment = %a.id, percentage, earned, "points earned");
                Some(earned)
            })
            .sum::<f64>();
        Ok(round_percent(earned * 100.0 / total_points as f64))
    }

    /// Min, average and max of the named assignment.
    pub fn assignment_statistics(&self, name: &str) -> Result<Statistics, GradeError> {
        self.assignment_statistics_by_id(self.assignment_id(name)?)
    }

    pub fn assignment_statistics_by_id(
        &self,
        assignment: &AssignmentId,
    ) -> Result<Statistics, GradeError> {
        Statistics::from_scores(self.assignment_scores_by_id(assignment)?)
            .ok_or_else(|| GradeError::not_found(Missing::Assignment, &assignment.0))
    }

    /// Raw percentages of the named assignment, in student id order.
    pub fn assignment_scores(&self, name: &str) -> Result<&[f64], GradeError> {
        self.assignment_scores_by_id(self.assignment_id(name)?)
    }

    /// Raw percentages recorded for an assignment id. An assignment without
    /// any submission is reported as not found, like an unknown one.
    pub fn assignment_scores_by_id(&self, assignment: &AssignmentId) -> Result<&[f64], GradeError> {
        let scores = self.submissions.for_assignment(assignment);
        if scores.is_empty() {
            return Err(GradeError::not_found(Missing::Assignment, &assignment.0));
        }
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assignment, Student, Submission};

    fn gradebook(assignments: &[(&str, &str, u32)], submissions: &[(&str, &str, f64)]) -> Gradebook {
        let mut roster = Roster::default();
        for (id, name) in [("001", "Alice Smith"), ("002", "Bob Jones"), ("003", "Carol White")] {
            roster
                .insert(Student {
                    id: StudentId::from(id),
                    name: name.to_owned(),
                })
                .unwrap();
        }
        let mut catalog = Catalog::default();
        for &(id, name, max_points) in assignments {
            catalog
                .insert(Assignment {
                    id: AssignmentId::from(id),
                    name: name.to_owned(),
                    max_points,
                })
                .unwrap();
        }
        let submissions = submissions
            .iter()
            .map(|&(student, assignment, percentage)| Submission {
                student: StudentId::from(student),
                assignment: AssignmentId::from(assignment),
                percentage,
            })
            .collect();
        Gradebook::new(roster, catalog, submissions)
    }

    #[test]
    fn test_single_assignment() {
        let g = gradebook(&[("A1", "HW1", 100)], &[("001", "A1", 80.0)]);
        assert_eq!(g.student_grade("Alice Smith").unwrap(), 80);
        assert_eq!(
            g.assignment_statistics("HW1").unwrap(),
            Statistics {
                min: 80,
                avg: 80,
                max: 80
            }
        );
        assert_eq!(g.assignment_scores("HW1").unwrap(), &[80.0]);
    }

    #[test]
    fn test_half_rounds_up() {
        let g = gradebook(&[("A1", "HW1", 100)], &[("001", "A1", 87.5)]);
        assert_eq!(g.student_grade("Alice Smith").unwrap(), 88);
        let g = gradebook(&[("A1", "HW1", 100)], &[("001", "A1", 80.5)]);
        assert_eq!(g.student_grade("Alice Smith").unwrap(), 81);
        let g = gradebook(&[("A1", "HW1", 100)], &[("001", "A1", 87.3)]);
        assert_eq!(g.student_grade("Alice Smith").unwrap(), 87);
    }

    #[test]
    fn test_weighted_by_points() {
        let g = gradebook(
            &[("A1", "HW1", 100), ("A2", "HW2", 50), ("M1", "Midterm", 250)],
            &[
                ("001", "A1", 100.0),
                ("001", "A2", 50.0),
                ("001", "M1", 80.0),
                ("002", "A1", 90.0),
            ],
        );
        // (100 + 25 + 200) / 400
        assert_eq!(g.student_grade("Alice Smith").unwrap(), 81);
        // Missing submissions count as zero: 90 / 400
        assert_eq!(g.student_grade("Bob Jones").unwrap(), 23);
        assert_eq!(g.student_grade("Carol White").unwrap(), 0);
    }

    #[test]
    fn test_unknown_assignment_submissions_are_not_graded() {
        let g = gradebook(&[("A1", "HW1", 100)], &[("001", "A1", 50.0), ("001", "Z9", 100.0)]);
        assert_eq!(g.student_grade("Alice Smith").unwrap(), 50);
        assert_eq!(g.assignment_scores_by_id(&AssignmentId::from("Z9")).unwrap(), &[100.0]);
    }

    #[test]
    fn test_grade_is_monotonic() {
        let others = [("001", "A1", 72.0), ("001", "M1", 64.5)];
        let mut last = i64::MIN;
        for step in 0..=200 {
            let percentage = f64::from(step) / 2.0;
            let mut submissions = others.to_vec();
            submissions.push(("001", "A2", percentage));
            let g = gradebook(
                &[("A1", "HW1", 100), ("A2", "HW2", 30), ("M1", "Midterm", 70)],
                &submissions,
            );
            let grade = g.student_grade("Alice Smith").unwrap();
            assert!(grade >= last, "{grade} < {last} at {percentage}");
            last = grade;
        }
    }

    #[test]
    fn test_not_found() {
        let g = gradebook(
            &[("A1", "HW1", 100), ("A2", "HW2", 100)],
            &[("001", "A1", 80.0), ("002", "A1", 60.0)],
        );
        assert!(g.student_grade("Dave Brown").unwrap_err().is_not_found());
        assert!(g.student_grade_by_id(&StudentId::from("999")).unwrap_err().is_not_found());
        assert!(g.assignment_statistics("Final").unwrap_err().is_not_found());
        // Known assignment without submissions.
        assert!(g.assignment_statistics("HW2").unwrap_err().is_not_found());
        assert!(g.assignment_scores("HW2").unwrap_err().is_not_found());
    }

    #[test]
    fn test_statistics() {
        let g = gradebook(
            &[("A1", "HW1", 100)],
            &[("001", "A1", 80.0), ("002", "A1", 60.5), ("003", "A1", 99.6)],
        );
        let s = g.assignment_statistics("HW1").unwrap();
        assert_eq!((s.min, s.avg, s.max), (61, 80, 100));
    }

    #[test]
    fn test_empty_catalog_is_not_a_missing_assignment() {
        let g = gradebook(&[], &[("001", "A1", 80.0)]);
        assert!(matches!(
            g.student_grade("Alice Smith"),
            Err(GradeError::Configuration(_))
        ));
    }
}
