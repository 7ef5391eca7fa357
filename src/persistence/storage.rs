//! Storage backends for program images
//!
//! The session only ever talks to the [`Storage`] trait. Implementations:
//! - [`FileStorage`]: the local filesystem, with write-then-rename saves
//! - [`MemoryStorage`]: an in-process map, used by tests and embedders
//! - [`TimedStorage`]: wraps another backend and bounds every call by a timeout
//!
//! Failures are plain [`io::Error`]s. A failed call never changes anything
//! in memory; the session decides what to report.

use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A place program images can be written to and read from
pub trait Storage: Send + Sync {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        (**self).write(path, bytes)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

/// Filesystem storage
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStorage;

impl FileStorage {
    fn staging_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }
}

impl Storage for FileStorage {
    /// Write to a sibling file first and rename it over `path`, so an
    /// interrupted save leaves the previous image intact
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let staging = Self::staging_path(path);
        fs::write(&staging, bytes)?;
        if let Err(e) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// In-memory storage keyed by path
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<FxHashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> io::Result<std::sync::MutexGuard<'_, FxHashMap<PathBuf, Vec<u8>>>> {
        self.files
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory storage lock poisoned"))
    }

    /// Store `bytes` at `path` directly (test setup)
    pub fn insert(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) -> io::Result<()> {
        self.files()?.insert(path.into(), bytes);
        Ok(())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files().map(|f| f.contains_key(path)).unwrap_or(false)
    }
}

impl Storage for MemoryStorage {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.files()?.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files()?.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

/// Runs each call of an inner backend on a worker thread and gives up after `timeout`
///
/// A call that times out is abandoned, not cancelled: the worker may still
/// finish in the background. [`FileStorage`] saves are atomic, so a late
/// completion replaces the image whole or not at all.
pub struct TimedStorage<S> {
    inner: Arc<S>,
    timeout: Duration,
}

impl<S: Storage + 'static> TimedStorage<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        TimedStorage {
            inner: Arc::new(inner),
            timeout,
        }
    }

    fn run<T, F>(&self, what: &str, job: F) -> io::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> io::Result<T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        thread::Builder::new()
            .name(format!("storage-{}", what))
            .spawn(move || {
                // receiver may be gone after a timeout
                let _ = tx.send(job(&*inner));
            })?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "storage {} timed out", what);
                Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("{} timed out after {} ms", what, self.timeout.as_millis()),
                ))
            }
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("storage worker for {} exited without a result", what),
            )),
        }
    }
}

impl<S: Storage + 'static> Storage for TimedStorage<S> {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let path = path.to_path_buf();
        let bytes = bytes.to_vec();
        self.run("write", move |s| s.write(&path, &bytes))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let path = path.to_path_buf();
        self.run("read", move |s| s.read(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowStorage(Duration);

    impl Storage for SlowStorage {
        fn write(&self, _path: &Path, _bytes: &[u8]) -> io::Result<()> {
            thread::sleep(self.0);
            Ok(())
        }

        fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
            thread::sleep(self.0);
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        storage.write(Path::new("prog"), &[1, 2, 3]).unwrap();
        assert_eq!(storage.read(Path::new("prog")).unwrap(), vec![1, 2, 3]);
        assert!(storage.contains(Path::new("prog")));
    }

    #[test]
    fn test_memory_storage_missing() {
        let storage = MemoryStorage::new();
        let err = storage.read(Path::new("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_timed_storage_passes_through() {
        let storage = TimedStorage::new(MemoryStorage::new(), Duration::from_secs(5));
        storage.write(Path::new("a"), &[9]).unwrap();
        assert_eq!(storage.read(Path::new("a")).unwrap(), vec![9]);
    }

    #[test]
    fn test_timed_storage_times_out() {
        let storage = TimedStorage::new(
            SlowStorage(Duration::from_millis(500)),
            Duration::from_millis(20),
        );
        let err = storage.read(Path::new("a")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_file_storage_staging_name() {
        let staging = FileStorage::staging_path(Path::new("dir/prog"));
        assert_eq!(staging, Path::new("dir/prog.tmp"));
    }
}
