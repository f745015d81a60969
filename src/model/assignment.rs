use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AssignmentId(pub String);

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssignmentId {
    fn from(id: &str) -> Self {
        AssignmentId(id.to_owned())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assignment {
    pub id: AssignmentId,
    pub name: String,
    pub max_points: u32,
}

/// The assignment catalog. Iteration is in ascending id order, which fixes
/// the order grade sums are accumulated in.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    by_id: BTreeMap<AssignmentId, Assignment>,
    by_name: HashMap<String, AssignmentId>,
    total_points: u64,
}

impl Catalog {
    /// Add an assignment, refusing it (and handing it back) if its id or its
    /// name is already taken or if it is worth no points.
    pub fn insert(&mut self, assignment: Assignment) -> Result<(), Assignment> {
        if assignment.max_points == 0
            || self.by_id.contains_key(&assignment.id)
            || self.by_name.contains_key(&assignment.name)
        {
            return Err(assignment);
        }
        self.total_points += u64::from(assignment.max_points);
        self.by_name.insert(assignment.name.clone(), assignment.id.clone());
        self.by_id.insert(assignment.id.clone(), assignment);
        Ok(())
    }

    pub fn assignment(&self, id: &AssignmentId) -> Option<&Assignment> {
        self.by_id.get(id)
    }

    pub fn id_of(&self, name: &str) -> Option<&AssignmentId> {
        self.by_name.get(name)
    }

    pub fn contains(&self, id: &AssignmentId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.by_id.values()
    }

    /// Sum of the points of every assignment, the grading denominator.
    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(id: &str, name: &str, max_points: u32) -> Assignment {
        Assignment {
            id: AssignmentId::from(id),
            name: name.to_owned(),
            max_points,
        }
    }

    #[test]
    fn test_total_points() {
        let mut catalog = Catalog::default();
        catalog.insert(assignment("A2", "HW2", 50)).unwrap();
        catalog.insert(assignment("A1", "HW1", 100)).unwrap();
        assert_eq!(catalog.total_points(), 150);
        assert!(catalog.insert(assignment("A3", "Quiz", 0)).is_err());
        assert!(catalog.insert(assignment("A1", "Other", 10)).is_err());
        assert!(catalog.insert(assignment("A4", "HW1", 10)).is_err());
        assert_eq!(catalog.total_points(), 150);
        assert_eq!(
            catalog.assignments().map(|a| &a.id.0[..]).collect::<Vec<_>>(),
            vec!["A1", "A2"]
        );
        assert_eq!(catalog.id_of("HW2"), Some(&AssignmentId::from("A2")));
    }
}
