use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        StudentId(id.to_owned())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Students indexed both ways. Ids and names are each unique, so
/// [`Roster::name_of`] and [`Roster::id_of`] are inverses of each other.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    by_id: BTreeMap<StudentId, Student>,
    by_name: HashMap<String, StudentId>,
}

impl Roster {
    /// Add a student, refusing it if its id or its name is already taken.
    /// The refused student is handed back.
    pub fn insert(&mut self, student: Student) -> Result<(), Student> {
        if self.by_id.contains_key(&student.id) || self.by_name.contains_key(&student.name) {
            return Err(student);
        }
        self.by_name.insert(student.name.clone(), student.id.clone());
        self.by_id.insert(student.id.clone(), student);
        Ok(())
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.by_id.get(id)
    }

    pub fn name_of(&self, id: &StudentId) -> Option<&str> {
        self.by_id.get(id).map(|s| s.name.as_str())
    }

    pub fn id_of(&self, name: &str) -> Option<&StudentId> {
        self.by_name.get(name)
    }

    pub fn contains(&self, id: &StudentId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Students in ascending id order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
