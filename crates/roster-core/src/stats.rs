//! Dashboard aggregates.
//!
//! Everything here is a pure function of the current stores and is
//! recomputed on every read.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::console::Console;
use crate::model::{
    AllocationStatus, Asset, AssetAllocation, AssetClearance, AssetStatus, ClearanceRecord,
    ClearanceStatus, Job, JobRequest, JobRequestStatus, JobStatus,
};
use crate::store::{Record, Store};

/// Fixed dashboard figures. These are display constants, not derived from
/// any store.
pub mod placeholder {
    pub const ASSET_UTILIZATION_PCT: u8 = 87;
    pub const CLEARANCE_RATE_PCT: u8 = 94;
    pub const JOB_FILL_RATE_PCT: u8 = 76;
    pub const DAYS_OVERDUE: u32 = 5;
}

fn as_f64(n: usize) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}

/// `part / whole` as a percentage rounded to one decimal; 0 when `whole` is 0.
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (as_f64(part) * 1000.0 / as_f64(whole)).round() / 10.0
}

/// Record count per status, for every status that occurs.
pub fn count_by_status<'a, T, I>(records: I) -> BTreeMap<T::Status, usize>
where
    T: Record + 'a,
    T::Status: Ord,
    I: IntoIterator<Item = &'a T>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.status()).or_insert(0) += 1;
    }
    counts
}

fn count_where<'a, T: 'a>(
    records: impl IntoIterator<Item = &'a T>,
    pred: impl Fn(&T) -> bool,
) -> usize {
    records.into_iter().filter(|r| pred(r)).count()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssetStats {
    pub total: usize,
    pub available: usize,
    pub allocated: usize,
    pub maintenance: usize,
    /// Allocations whose status is `Overdue`.
    pub overdue_returns: usize,
}

impl AssetStats {
    #[must_use]
    pub fn compute(assets: &Store<Asset>, allocations: &Store<AssetAllocation>) -> Self {
        Self {
            total: assets.len(),
            available: count_where(assets, |a| a.status == AssetStatus::Available),
            allocated: count_where(assets, |a| a.status == AssetStatus::Allocated),
            maintenance: count_where(assets, |a| a.status == AssetStatus::Maintenance),
            overdue_returns: count_where(allocations, |a| a.status == AllocationStatus::Overdue),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub total: usize,
    /// `Approved` or `In Progress`.
    pub active: usize,
    pub pending_approval: usize,
    pub candidates: usize,
}

impl JobStats {
    #[must_use]
    pub fn compute(jobs: &Store<Job>, candidates: usize) -> Self {
        Self {
            total: jobs.len(),
            active: count_where(jobs, |j| {
                matches!(j.status, JobStatus::Approved | JobStatus::InProgress)
            }),
            pending_approval: count_where(jobs, |j| j.status == JobStatus::PendingApproval),
            candidates,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClearanceStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl ClearanceStats {
    #[must_use]
    pub fn compute(clearances: &Store<ClearanceRecord>) -> Self {
        let by = |status| count_where(clearances, |c| c.clearance_status == status);
        Self {
            total: clearances.len(),
            pending: by(ClearanceStatus::Pending),
            in_progress: by(ClearanceStatus::InProgress),
            completed: by(ClearanceStatus::Completed),
            overdue: by(ClearanceStatus::Overdue),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcurementStats {
    pub new: usize,
    pub in_review: usize,
    pub candidate_selected: usize,
    pub processed: usize,
}

impl ProcurementStats {
    #[must_use]
    pub fn compute(requests: &Store<JobRequest>) -> Self {
        let by = |status| count_where(requests, |r| r.status == status);
        Self {
            new: by(JobRequestStatus::New),
            in_review: by(JobRequestStatus::InReview),
            candidate_selected: by(JobRequestStatus::CandidateSelected),
            processed: by(JobRequestStatus::Processed),
        }
    }
}

/// Asset recovery counts for one departing employee.
///
/// `returned + pending == allocated` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssetCounts {
    pub allocated: usize,
    /// Settled rows: anything but `Pending Return`.
    pub returned: usize,
    pub pending: usize,
}

impl AssetCounts {
    pub fn derive<'a, I>(employee_id: &str, asset_clearances: I) -> Self
    where
        I: IntoIterator<Item = &'a AssetClearance>,
    {
        let mut counts = Self::default();
        for row in asset_clearances
            .into_iter()
            .filter(|row| row.employee_id == employee_id)
        {
            counts.allocated += 1;
            if row.status.is_settled() {
                counts.returned += 1;
            } else {
                counts.pending += 1;
            }
        }
        counts
    }
}

/// Allocation rate for one asset category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUtilization {
    pub category: String,
    pub total: usize,
    /// `Allocated` or `In Use`.
    pub allocated: usize,
    pub rate: f64,
}

/// Per-category utilization, sorted by category name.
pub fn utilization_by_category<'a, I>(assets: I) -> Vec<CategoryUtilization>
where
    I: IntoIterator<Item = &'a Asset>,
{
    let mut buckets: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for asset in assets {
        let entry = buckets.entry(asset.category.as_str()).or_default();
        entry.0 += 1;
        if matches!(asset.status, AssetStatus::Allocated | AssetStatus::InUse) {
            entry.1 += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(category, (total, allocated))| CategoryUtilization {
            category: category.to_string(),
            total,
            allocated,
            rate: percentage(allocated, total),
        })
        .collect()
}

/// Everything the overview page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub assets: AssetStats,
    pub jobs: JobStats,
    pub clearances: ClearanceStats,
    pub procurement: ProcurementStats,
    pub utilization: Vec<CategoryUtilization>,
    pub asset_utilization_pct: u8,
    pub clearance_rate_pct: u8,
    pub job_fill_rate_pct: u8,
    pub days_overdue: u32,
}

impl Dashboard {
    #[must_use]
    pub fn compute(console: &Console) -> Self {
        Self {
            assets: AssetStats::compute(&console.assets, &console.allocations),
            jobs: JobStats::compute(&console.jobs, console.candidates.len()),
            clearances: ClearanceStats::compute(&console.clearances),
            procurement: ProcurementStats::compute(&console.job_requests),
            utilization: utilization_by_category(&console.assets),
            asset_utilization_pct: placeholder::ASSET_UTILIZATION_PCT,
            clearance_rate_pct: placeholder::CLEARANCE_RATE_PCT,
            job_fill_rate_pct: placeholder::JOB_FILL_RATE_PCT,
            days_overdue: placeholder::DAYS_OVERDUE,
        }
    }
}
