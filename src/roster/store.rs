use thiserror::Error;

use crate::models::StudentRecord;

use super::validation::{validate, ValidationError};

/// Failures raised by roster mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Index taken from a stale view of the roster.
    #[error("No student at position {0}")]
    NoSuchRecord(usize),
}

/// Ordered list of students held for the current session.
///
/// Records are addressed by position, so an index is only meaningful against
/// the `list()` snapshot it was read from. The UI is single-threaded and
/// re-renders after every mutation, which keeps those indices current.
#[derive(Debug, Default, Clone)]
pub struct RosterStore {
    records: Vec<StudentRecord>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    /// Trim and validate `record`, then append it.
    pub fn add(&mut self, record: StudentRecord) -> Result<(), RosterError> {
        let record = record.trimmed();
        validate(&record)?;
        self.records.push(record);
        Ok(())
    }

    /// Trim and validate `record`, then replace the entry at `index`.
    pub fn update(&mut self, index: usize, record: StudentRecord) -> Result<(), RosterError> {
        if index >= self.records.len() {
            return Err(RosterError::NoSuchRecord(index));
        }
        let record = record.trimmed();
        validate(&record)?;
        self.records[index] = record;
        Ok(())
    }

    /// Remove and return the entry at `index`. Confirmation is the caller's job.
    pub fn delete(&mut self, index: usize) -> Result<StudentRecord, RosterError> {
        if index >= self.records.len() {
            return Err(RosterError::NoSuchRecord(index));
        }
        Ok(self.records.remove(index))
    }

    pub fn list(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&StudentRecord> {
        self.records.get(index)
    }

    /// Swap in a freshly loaded roster. Loaded rows are taken as-is.
    pub fn replace_all(&mut self, records: Vec<StudentRecord>) {
        self.records = records;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
