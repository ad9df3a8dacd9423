//! JSON file storage with owner-only permissions.

use crate::{KeyValueStorage, StorageError, StorageResult};
use fs4::fs_std::FileExt;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

/// Key-value storage persisted as a single JSON object.
///
/// Nothing is cached: every read goes to disk, and every mutation is a
/// read-modify-write of the whole map under an exclusive lock on a sibling
/// `.lock` file. Several processes can share one session file without undoing
/// each other's token renewals. The data file is replaced by rename, so
/// readers never see a partial write and need no lock.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock_path: PathBuf,
    /// Serializes writers within this process.
    writer: Mutex<()>,
}

impl FileStorage {
    /// Open the storage file at `path`. The file itself is created on the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let lock_path = sibling(&path, ".lock");
        let storage = Self {
            path,
            lock_path,
            writer: Mutex::new(()),
        };
        storage.load()?;
        Ok(storage)
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents. A malformed file reads as empty so a damaged session
    /// never blocks logging in again.
    fn load(&self) -> StorageResult<Entries> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding malformed session file");
                Ok(Entries::new())
            }
        }
    }

    /// Apply `change` to the on-disk map. The file is only replaced when
    /// `change` reports a modification, and a failed write leaves the
    /// previous contents in place.
    fn update<T>(&self, change: impl FnOnce(&mut Entries) -> (T, bool)) -> StorageResult<T> {
        let _in_process = self.writer.lock();
        let lock = self.lock_file()?;
        FileExt::lock_exclusive(&lock)?;

        let mut entries = self.load()?;
        let (result, modified) = change(&mut entries);
        if modified {
            self.persist(&entries)?;
        }
        // Dropping `lock` closes the descriptor and releases the lock.
        Ok(result)
    }

    fn lock_file(&self) -> StorageResult<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(open_private(&self.lock_path, false)?)
    }

    fn persist(&self, entries: &Entries) -> StorageResult<()> {
        let contents = serde_json::to_string_pretty(entries)?;
        let tmp_path = sibling(&self.path, ".tmp");
        let mut tmp = open_private(&tmp_path, true)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.sync_all()?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            StorageError::Backend(format!("failed to replace {}: {}", self.path.display(), e))
        })?;

        tracing::trace!(path = %self.path.display(), keys = entries.len(), "session file written");
        Ok(())
    }
}

/// `session.json` + `.lock` -> `session.json.lock`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(unix)]
fn open_private(path: &Path, truncate: bool) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(truncate)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path, truncate: bool) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(truncate)
        .open(path)
}

impl KeyValueStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|entries| {
            let previous = entries.insert(key.to_string(), value.to_string());
            ((), previous.as_deref() != Some(value))
        })
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        self.update(|entries| {
            let existed = entries.remove(key).is_some();
            (existed, existed)
        })
    }

    fn write_batch(&self, set: &[(&str, &str)], remove: &[&str]) -> StorageResult<()> {
        self.update(|entries| {
            let before = entries.clone();
            for key in remove {
                entries.remove(*key);
            }
            for (key, value) in set {
                entries.insert(key.to_string(), value.to_string());
            }
            let modified = *entries != before;
            ((), modified)
        })
    }
}
