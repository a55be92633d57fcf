use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::models::{Record, RecordId};

use super::file::{read_records, write_records};

/// Ordered, file-backed collection of records.
///
/// Mutations only touch memory; callers persist with [`RecordStore::save`]
/// once a change is complete. Insertion order is preserved and is the order
/// the file is written in.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
    next_id: u64,
}

impl RecordStore {
    /// Create an empty store bound to `path`. Nothing is read until
    /// [`RecordStore::load`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
            next_id: 0,
        }
    }

    /// Replace the in-memory records with the contents of the backing file.
    /// On failure the current records are left untouched.
    pub fn load(&mut self) -> Result<&[Record]> {
        let entries = read_records(&self.path)?;
        self.records.clear();
        for (name, phone_number) in entries {
            self.push(name, phone_number);
        }
        info!(count = self.records.len(), path = %self.path.display(), "loaded directory");
        Ok(self.records.as_slice())
    }

    /// Overwrite the backing file with the current records.
    pub fn save(&self) -> Result<()> {
        write_records(&self.path, &self.records)?;
        info!(count = self.records.len(), path = %self.path.display(), "saved directory");
        Ok(())
    }

    /// Append a record and return it. Duplicate names are allowed.
    pub fn add(&mut self, name: impl Into<String>, phone_number: impl Into<String>) -> &Record {
        let id = self.push(name.into(), phone_number.into());
        debug!(%id, "added record");
        &self.records[self.records.len() - 1]
    }

    /// Every record whose name equals `query`, ignoring case, in order.
    pub fn find_by_name(&self, query: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.name_matches(query))
            .collect()
    }

    /// Change both fields of the record identified by `id` in place.
    pub fn update(
        &mut self,
        id: RecordId,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.name = name.into();
        record.phone_number = phone_number.into();
        debug!(%id, "updated record");
        Ok(())
    }

    /// Remove the record identified by `id`, returning it. A missing record
    /// leaves the sequence untouched.
    pub fn delete(&mut self, id: RecordId) -> Result<Record> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.records.remove(index);
        debug!(%id, "deleted record");
        Ok(removed)
    }

    /// Current records in insertion order.
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Number of records held in memory.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn push(&mut self, name: String, phone_number: String) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(Record {
            id,
            name,
            phone_number,
        });
        id
    }
}
