//! The console: one owner for every entity store, plus snapshot persistence.
//!
//! On disk the console is a single JSON document at `.roster/console.json`.
//! Writers hold an exclusive advisory lock on `.roster/lock` for the whole
//! load-mutate-save cycle; readers take a shared lock. Saves write a sibling
//! temp file and rename it over the snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, RosterError};
use crate::lock::SnapshotLock;
use crate::model::{
    Asset, AssetAllocation, AssetClearance, AssetRequest, AuditLog, Candidate, ClearanceRecord,
    CustomReport, Entity, Job, JobRequest, OffboardingTask, ProvisioningTicket,
};
use crate::store::{Record, Store};

/// Every entity collection in one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Console {
    pub jobs: Store<Job>,
    pub candidates: Store<Candidate>,
    pub assets: Store<Asset>,
    pub allocations: Store<AssetAllocation>,
    pub asset_requests: Store<AssetRequest>,
    pub clearances: Store<ClearanceRecord>,
    pub asset_clearances: Store<AssetClearance>,
    pub tasks: Store<OffboardingTask>,
    pub audit_logs: Store<AuditLog>,
    pub reports: Store<CustomReport>,
    pub job_requests: Store<JobRequest>,
    pub tickets: Store<ProvisioningTicket>,
}

fn check_unique<T: Record>(store: &Store<T>) -> Result<()> {
    match store.duplicate_id() {
        Some(id) => Err(RosterError::Conflict {
            entity: T::ENTITY,
            id: id.to_string(),
        }),
        None => Ok(()),
    }
}

impl Console {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in one collection.
    #[must_use]
    pub fn count(&self, entity: Entity) -> usize {
        match entity {
            Entity::Job => self.jobs.len(),
            Entity::Candidate => self.candidates.len(),
            Entity::Asset => self.assets.len(),
            Entity::Allocation => self.allocations.len(),
            Entity::AssetRequest => self.asset_requests.len(),
            Entity::Clearance => self.clearances.len(),
            Entity::AssetClearance => self.asset_clearances.len(),
            Entity::OffboardingTask => self.tasks.len(),
            Entity::AuditLog => self.audit_logs.len(),
            Entity::CustomReport => self.reports.len(),
            Entity::JobRequest => self.job_requests.len(),
            Entity::ProvisioningTicket => self.tickets.len(),
        }
    }

    /// Reject a console where any collection repeats an ID.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Conflict`] for the first repeat found.
    pub fn check_unique_ids(&self) -> Result<()> {
        check_unique(&self.jobs)?;
        check_unique(&self.candidates)?;
        check_unique(&self.assets)?;
        check_unique(&self.allocations)?;
        check_unique(&self.asset_requests)?;
        check_unique(&self.clearances)?;
        check_unique(&self.asset_clearances)?;
        check_unique(&self.tasks)?;
        check_unique(&self.audit_logs)?;
        check_unique(&self.reports)?;
        check_unique(&self.job_requests)?;
        check_unique(&self.tickets)
    }

    /// Read a snapshot from `path`.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotInitialized`] if the file is missing,
    /// [`RosterError::SnapshotIo`] / [`RosterError::SnapshotParse`] on read or
    /// decode failure, [`RosterError::Conflict`] on repeated IDs.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RosterError::NotInitialized {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|source| RosterError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        })?;
        let console: Self =
            serde_json::from_str(&raw).map_err(|source| RosterError::SnapshotParse {
                path: path.to_path_buf(),
                source,
            })?;
        console.check_unique_ids()?;
        debug!(path = %path.display(), "snapshot loaded");
        Ok(console)
    }

    /// Write the snapshot to `path` through a temp file and rename.
    ///
    /// # Errors
    ///
    /// [`RosterError::SnapshotIo`] on any filesystem failure.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| RosterError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let encoded =
            serde_json::to_string_pretty(self).map_err(|source| RosterError::SnapshotParse {
                path: path.to_path_buf(),
                source,
            })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encoded.as_bytes()).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        debug!(path = %path.display(), bytes = encoded.len(), "snapshot saved");
        Ok(())
    }
}

/// Where a project's console files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolePaths {
    root: PathBuf,
}

impl ConsolePaths {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            root: project_root.join(".roster"),
        }
    }

    /// The `.roster` directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn snapshot(&self) -> PathBuf {
        self.root.join("console.json")
    }

    #[must_use]
    pub fn lock(&self) -> PathBuf {
        self.root.join("lock")
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.snapshot().exists()
    }

    /// Create `.roster/` with an empty snapshot.
    ///
    /// Returns `false` without touching anything when a snapshot already
    /// exists and `force` is not set.
    ///
    /// # Errors
    ///
    /// Lock or filesystem failures.
    pub fn init(&self, force: bool, timeout: Duration) -> Result<bool> {
        let _lock = SnapshotLock::exclusive(&self.lock(), timeout)?;
        if self.is_initialized() && !force {
            return Ok(false);
        }
        Console::new().save(&self.snapshot())?;
        info!(path = %self.snapshot().display(), "console initialized");
        Ok(true)
    }

    /// Load the console under a shared lock.
    ///
    /// # Errors
    ///
    /// Lock, missing snapshot, or decode failures.
    pub fn read(&self, timeout: Duration) -> Result<Console> {
        let _lock = SnapshotLock::shared(&self.lock(), timeout)?;
        Console::load(&self.snapshot())
    }

    /// Load, mutate and save under one exclusive lock.
    ///
    /// Nothing is written when `apply` fails.
    ///
    /// # Errors
    ///
    /// Lock, snapshot, or `apply` failures.
    pub fn update<T, F>(&self, timeout: Duration, apply: F) -> Result<T>
    where
        F: FnOnce(&mut Console) -> Result<T>,
    {
        let _lock = SnapshotLock::exclusive(&self.lock(), timeout)?;
        let path = self.snapshot();
        let mut console = Console::load(&path)?;
        let out = apply(&mut console)?;
        console.save(&path)?;
        Ok(out)
    }
}
