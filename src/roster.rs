use crate::model::{format_id, Student};
use crate::store::{self, Snapshot};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_CLASSES: [&str; 4] = ["First Year", "Second Year", "Third Year", "Fourth Year"];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Class name cannot be empty.")]
    BlankClassName,
    #[error("Student name cannot be empty.")]
    BlankStudentName,
    #[error("No student IDs left to allocate.")]
    IdSpaceExhausted,
    #[error("Student ID {0} is already taken.")]
    IdTaken(String),
}

/// In-memory state of the tracker: students by id, class names in insertion
/// order, and the next numeric id to hand out (`None` once every id up to
/// `S18446744073709551615` is in use).
#[derive(Debug, Clone)]
pub struct Roster {
    students: BTreeMap<String, Student>,
    class_names: Vec<String>,
    next_id: Option<u64>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::from_snapshot(Snapshot::default())
    }
}

impl Roster {
    /// Builds a roster from persisted data, seeding the default classes when
    /// none were stored.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut students: BTreeMap<String, Student> = BTreeMap::new();
        for (key, student) in snapshot.students {
            if key != student.id() {
                tracing::warn!(key = %key, id = %student.id(), "student stored under a mismatched key; using its id");
            }
            match students.entry(student.id().to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(student);
                }
                Entry::Occupied(kept) => {
                    tracing::warn!(
                        key = %key,
                        id = %kept.key(),
                        kept = %kept.get().name(),
                        dropped = %student.name(),
                        "duplicate student id; keeping the first entry"
                    );
                }
            }
        }

        let mut roster = Self {
            students,
            class_names: Vec::new(),
            next_id: Some(1),
        };
        for name in snapshot.class_names {
            if let Err(e) = roster.add_class(&name) {
                tracing::warn!(error = %e, "skipping stored class name");
            }
        }
        if roster.class_names.is_empty() {
            roster.class_names = DEFAULT_CLASSES.iter().map(|c| c.to_string()).collect();
        }
        roster.next_id = roster.compute_next_id();
        roster
    }

    /// Loads the roster stored at `path`. A missing file is a first run. A
    /// file that cannot be read or parsed yields an empty roster and the
    /// error, so the caller can warn and carry on.
    pub fn load(path: &Path) -> (Self, Option<anyhow::Error>) {
        match store::read_snapshot(path) {
            Ok(Some(snapshot)) => {
                let roster = Self::from_snapshot(snapshot);
                tracing::info!(
                    path = %path.display(),
                    students = roster.students.len(),
                    classes = roster.class_names.len(),
                    "loaded roster"
                );
                (roster, None)
            }
            Ok(None) => {
                tracing::info!(path = %path.display(), "no data file yet; starting fresh");
                (Self::default(), None)
            }
            Err(e) => {
                let detail = format!("{:#}", e);
                tracing::warn!(path = %path.display(), error = %detail, "load failed; starting fresh");
                (Self::default(), Some(e))
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        store::write_snapshot(path, &self.snapshot())?;
        tracing::info!(path = %path.display(), students = self.students.len(), "saved roster");
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            students: self.students.clone(),
            class_names: self.class_names.clone(),
        }
    }

    // Ids that are not `S<digits>` cannot collide with generated ones, so
    // they are skipped rather than failing the load.
    fn compute_next_id(&self) -> Option<u64> {
        let mut max: u64 = 0;
        for student in self.students.values() {
            match student.id_number() {
                Some(n) => max = max.max(n),
                None => {
                    tracing::warn!(id = %student.id(), "ignoring malformed student id for id allocation");
                }
            }
        }
        max.checked_add(1)
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn has_class(&self, name: &str) -> bool {
        let name = name.trim();
        self.class_names.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Returns `Ok(false)` when the class already exists.
    pub fn add_class(&mut self, name: &str) -> Result<bool, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::BlankClassName);
        }
        if self.has_class(name) {
            return Ok(false);
        }
        self.class_names.push(name.to_string());
        Ok(true)
    }

    /// Class membership is not checked against the known class names.
    pub fn add_student(&mut self, name: &str, class_name: &str) -> Result<&Student, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::BlankStudentName);
        }
        if !self.has_class(class_name) {
            tracing::warn!(class = %class_name, "adding student to a class that is not in the class list");
        }

        let n = self.next_id.ok_or(RosterError::IdSpaceExhausted)?;
        let id = format_id(n);
        let slot = match self.students.entry(id.clone()) {
            Entry::Vacant(slot) => slot,
            Entry::Occupied(_) => return Err(RosterError::IdTaken(id)),
        };
        self.next_id = n.checked_add(1);
        tracing::debug!(id = %id, class = %class_name, "adding student");
        Ok(slot.insert(Student::new(id, name, class_name)))
    }

    pub fn find_student_by_id(&self, id: &str) -> Option<&Student> {
        let id = id.trim();
        self.students
            .get(&id.to_ascii_uppercase())
            .or_else(|| self.students.values().find(|s| s.id().eq_ignore_ascii_case(id)))
    }

    pub fn find_student_by_id_mut(&mut self, id: &str) -> Option<&mut Student> {
        let id = id.trim();
        let key = self
            .students
            .keys()
            .find(|k| k.eq_ignore_ascii_case(id))
            .cloned()?;
        self.students.get_mut(&key)
    }

    pub fn students_by_class(&self, class_name: &str) -> Vec<&Student> {
        let class_name = class_name.trim();
        self.students
            .values()
            .filter(|s| s.class_name().trim().eq_ignore_ascii_case(class_name))
            .collect()
    }

    #[cfg(test)]
    pub fn next_id(&self) -> Option<u64> {
        self.next_id
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
