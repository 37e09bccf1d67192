//! Advisory locking around the console snapshot.
//!
//! Readers take a shared lock on `.roster/lock`, writers an exclusive one.
//! Acquisition polls until the configured timeout; a guard releases its lock
//! when dropped.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;
use thiserror::Error;
use tracing::debug;

use crate::error::ErrorCode;

/// Delay between attempts while another process holds the lock.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Error)]
pub enum LockError {
    #[error("{}: lock on {} still held after {waited:?}", ErrorCode::LockContention.code(), .path.display())]
    Timeout { path: PathBuf, waited: Duration },

    #[error("{}: cannot open lock file: {0}", ErrorCode::SnapshotWriteFailed.code())]
    Io(#[from] io::Error),
}

impl LockError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Timeout { .. } => ErrorCode::LockContention,
            Self::Io(_) => ErrorCode::SnapshotWriteFailed,
        }
    }

    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

/// How a guard shares the snapshot with other processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Any number of readers at once.
    Shared,
    /// One writer, no readers.
    Exclusive,
}

impl LockMode {
    fn try_lock(self, file: &File) -> io::Result<()> {
        match self {
            Self::Shared => FileExt::try_lock_shared(file),
            Self::Exclusive => FileExt::try_lock_exclusive(file),
        }
    }
}

/// A held lock on the snapshot. Unlocks on drop.
#[derive(Debug)]
pub struct SnapshotLock {
    file: File,
    path: PathBuf,
    mode: LockMode,
}

impl SnapshotLock {
    /// Shared lock for commands that only read the console.
    ///
    /// # Errors
    ///
    /// [`LockError::Timeout`] when a writer holds the lock past `timeout`.
    pub fn shared(path: &Path, timeout: Duration) -> Result<Self, LockError> {
        Self::acquire(path, LockMode::Shared, timeout)
    }

    /// Exclusive lock for commands that rewrite the snapshot.
    ///
    /// # Errors
    ///
    /// [`LockError::Timeout`] when anyone else holds the lock past `timeout`.
    pub fn exclusive(path: &Path, timeout: Duration) -> Result<Self, LockError> {
        Self::acquire(path, LockMode::Exclusive, timeout)
    }

    /// Open (creating parents if needed) and lock `path`, retrying until
    /// `timeout` has elapsed.
    ///
    /// # Errors
    ///
    /// Timeout, or failure to create or open the lock file.
    pub fn acquire(path: &Path, mode: LockMode, timeout: Duration) -> Result<Self, LockError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        let started = Instant::now();
        while mode.try_lock(&file).is_err() {
            let waited = started.elapsed();
            if waited >= timeout {
                return Err(LockError::Timeout {
                    path: path.to_path_buf(),
                    waited,
                });
            }
            thread::sleep(POLL_INTERVAL.min(timeout.saturating_sub(waited)));
        }

        debug!(path = %path.display(), ?mode, "lock acquired");
        Ok(Self {
            file,
            path: path.to_path_buf(),
            mode,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
