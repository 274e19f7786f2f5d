//! JSON array files - full-replace store
//!
//! Mỗi collection là một file JSON array (`data/users.json`, `data/logs.json`).
//! Save ghi ra temp file cùng thư mục, fsync, rồi rename đè lên file cũ: file
//! trên đĩa luôn là bản cũ hoặc bản mới hoàn chỉnh, không bao giờ nửa vời.

use crate::error::{PersistenceError, PersistenceResult};
use crate::store::AccessStore;
use gatelog_core::{DecisionEvent, Identity};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const IDENTITIES_FILE: &str = "users.json";
pub const EVENTS_FILE: &str = "logs.json";

const EMPTY_ARRAY: &str = "[]";

/// A single JSON array file holding records of type `T`.
#[derive(Debug, Clone)]
pub struct JsonArrayFile<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonArrayFile<T> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Tạo thư mục và file `[]` nếu chưa có
    pub fn ensure(&self) -> PersistenceResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;

        if !self.path.exists() {
            fs::write(&self.path, EMPTY_ARRAY).map_err(|e| PersistenceError::io(&self.path, e))?;
            tracing::debug!(path = %self.path.display(), "Created empty collection file");
        }
        Ok(())
    }

    /// Đọc toàn bộ collection; file rỗng được coi như `[]`
    pub fn load(&self) -> PersistenceResult<Vec<T>> {
        self.ensure()?;

        let raw = fs::read_to_string(&self.path).map_err(|e| PersistenceError::io(&self.path, e))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<T> =
            serde_json::from_str(&raw).map_err(|e| PersistenceError::malformed(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "Loaded collection");
        Ok(records)
    }

    /// Thay thế toàn bộ collection (atomic rename)
    pub fn save(&self, records: &[T]) -> PersistenceResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;

        let json = serde_json::to_string_pretty(records)?;

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| PersistenceError::io(dir, e))?;
        temp.write_all(json.as_bytes())
            .map_err(|e| PersistenceError::io(temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| PersistenceError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| PersistenceError::io(&self.path, e.error))?;
        sync_dir(dir)?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Saved collection");
        Ok(())
    }
}

/// fsync thư mục để entry mới sau rename cũng bền
#[cfg(unix)]
fn sync_dir(dir: &Path) -> PersistenceResult<()> {
    fs::OpenOptions::new()
        .read(true)
        .open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| PersistenceError::io(dir, e))
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> PersistenceResult<()> {
    Ok(())
}

/// File-backed [`AccessStore`]: `users.json` + `logs.json` in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    identities: JsonArrayFile<Identity>,
    events: JsonArrayFile<DecisionEvent>,
}

impl JsonFileStore {
    /// Mở store, tạo thư mục và các file rỗng nếu cần
    pub fn open<P: AsRef<Path>>(data_dir: P) -> PersistenceResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let store = Self {
            identities: JsonArrayFile::new(data_dir.join(IDENTITIES_FILE)),
            events: JsonArrayFile::new(data_dir.join(EVENTS_FILE)),
            data_dir,
        };
        store.identities.ensure()?;
        store.events.ensure()?;
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn identities_path(&self) -> &Path {
        self.identities.path()
    }

    pub fn events_path(&self) -> &Path {
        self.events.path()
    }
}

impl AccessStore for JsonFileStore {
    fn load_identities(&mut self) -> PersistenceResult<Vec<Identity>> {
        self.identities.load()
    }

    fn save_identities(&mut self, identities: &[Identity]) -> PersistenceResult<()> {
        self.identities.save(identities)
    }

    fn load_events(&mut self) -> PersistenceResult<Vec<DecisionEvent>> {
        self.events.load()
    }

    fn save_events(&mut self, events: &[DecisionEvent]) -> PersistenceResult<()> {
        self.events.save(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gatelog_core::{Decision, IdentityCategory};
    use tempfile::tempdir;

    fn alice() -> Identity {
        let created = Utc.with_ymd_and_hms(2026, 1, 25, 9, 0, 0).unwrap();
        Identity::new("A123", "Alice", IdentityCategory::Contractor, created)
    }

    #[test]
    fn test_open_creates_empty_files() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        let store = JsonFileStore::open(&data).unwrap();

        assert_eq!(fs::read_to_string(store.identities_path()).unwrap(), "[]");
        assert_eq!(fs::read_to_string(store.events_path()).unwrap(), "[]");
    }

    #[test]
    fn test_blank_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(EVENTS_FILE);
        fs::write(&path, "  \n").unwrap();

        let file: JsonArrayFile<DecisionEvent> = JsonArrayFile::new(&path);
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(IDENTITIES_FILE);
        fs::write(&path, "{ not json").unwrap();

        let file: JsonArrayFile<Identity> = JsonArrayFile::new(&path);
        let err = file.load().unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed { .. }));
    }

    #[test]
    fn test_save_is_pretty_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.save_identities(&[alice()]).unwrap();

        let content = fs::read_to_string(store.identities_path()).unwrap();
        assert!(content.starts_with("[\n  {"));
        assert!(content.contains("\"id\": \"A123\""));

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names.len(), 2, "unexpected files: {:?}", names);
    }

    #[test]
    fn test_save_into_new_nested_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join(IDENTITIES_FILE);
        let file: JsonArrayFile<Identity> = JsonArrayFile::new(&path);

        file.save(&[alice()]).unwrap();
        file.save(&[alice(), alice()]).unwrap();

        assert_eq!(file.load().unwrap().len(), 2);
        assert!(sync_dir(path.parent().unwrap()).is_ok());
    }

    #[test]
    fn test_events_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let ts = Utc.with_ymd_and_hms(2026, 1, 25, 22, 0, 0).unwrap();
        let events = vec![
            DecisionEvent::new(ts, "A123", Some(&alice()), Decision::Deny, "late"),
            DecisionEvent::new(ts, "ZZZ", None, Decision::Deny, "Unknown ID")
                .with_flag("Repeated denies (3+ of last 5)"),
        ];

        store.save_events(&events).unwrap();
        assert_eq!(store.load_events().unwrap(), events);
    }
}
