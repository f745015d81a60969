pub use self::assignment::{Assignment, AssignmentId, Catalog};
pub use self::student::{Roster, Student, StudentId};
pub use self::submission::{Submission, Submissions};

mod assignment;
mod student;
mod submission;
