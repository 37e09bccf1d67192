//! Mutation handlers.
//!
//! Every handler checks the whole batch against the current console before
//! writing anything, so a batch either applies completely or leaves the
//! console untouched.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::config::ProjectConfig;
use crate::console::Console;
use crate::draft::{
    AllocationDraft, CandidateDraft, CustomReportDraft, JobDraft, ReturnDraft, ValidationErrors,
    dedup_items,
};
use crate::error::{Result, RosterError};
use crate::ids;
use crate::model::{
    AllocationStatus, Asset, AssetAllocation, AssetStatus, AuditLog, CandidateInfo,
    ClearanceAction, ClearanceRecord, ClearanceStatus, CustomReport, Entity, Job, JobRequest,
    JobRequestStatus, JobStatus, Priority, ProvisioningTicket, ReportStatus, ReturnCondition,
    TicketStatus, TicketType,
};
use crate::store::{Record, Store};

/// Attempts at drawing an unused random job ID before giving up.
const JOB_ID_ATTEMPTS: usize = 32;

/// Who is acting and when.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    pub config: &'a ProjectConfig,
    pub now: DateTime<Utc>,
}

impl<'a> Session<'a> {
    #[must_use]
    pub const fn new(config: &'a ProjectConfig, now: DateTime<Utc>) -> Self {
        Self { config, now }
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// Result of a bulk clearance action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub action: ClearanceAction,
    pub count: usize,
}

/// What a candidate submission created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub candidate_id: String,
    pub ticket_ids: Vec<String>,
}

/// Repeated IDs in a selection collapse to the first occurrence.
fn unique_ids(ids: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id.as_str()) {
            out.push(id);
        }
    }
    out
}

fn non_empty<'a>(
    ids: &'a [String],
    entity: Entity,
    action: &'static str,
) -> Result<Vec<&'a str>> {
    if ids.is_empty() {
        return Err(RosterError::EmptySelection { entity, action });
    }
    Ok(unique_ids(ids))
}

/// Trimmed free text; blank counts as absent.
fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn ensure_free<T: Record>(store: &Store<T>, id: &str) -> Result<()> {
    if store.contains(id) {
        return Err(RosterError::Conflict {
            entity: T::ENTITY,
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Validated status write on any store. Returns the previous status.
///
/// # Errors
///
/// [`RosterError::NotFound`] or [`RosterError::InvalidTransition`].
pub fn set_status<T: Record>(
    store: &mut Store<T>,
    id: &str,
    status: T::Status,
) -> Result<T::Status> {
    store.transition(id, status)
}

/// Allocate the selected assets to one employee.
///
/// Each asset becomes `Allocated` and gets exactly one new allocation record.
/// Returns the new allocation IDs in selection order.
///
/// # Errors
///
/// Empty selection, invalid draft, unknown asset, or an asset that is not
/// `Available`/`Returned`.
pub fn allocate_assets(
    console: &mut Console,
    session: &Session<'_>,
    asset_ids: &[String],
    draft: &AllocationDraft,
) -> Result<Vec<String>> {
    let selected = non_empty(asset_ids, Entity::Asset, "allocation")?;
    let today = session.today();
    draft.validate(today)?;

    let mut planned = Vec::with_capacity(selected.len());
    for id in &selected {
        let asset = console.assets.require(id)?;
        console.assets.check_transition(id, AssetStatus::Allocated)?;
        let allocation_id = ids::allocation_id(session.now, id);
        ensure_free(&console.allocations, &allocation_id)?;
        planned.push(AssetAllocation {
            id: allocation_id,
            asset_id: asset.id.clone(),
            asset_name: asset.name.clone(),
            serial_number: asset.serial_number.clone(),
            employee_name: draft.employee_name.trim().to_string(),
            employee_id: draft.employee_id.trim().to_string(),
            job_id: non_blank(draft.job_id.as_deref()),
            allocation_date: today,
            expected_return_date: draft.expected_return_date,
            actual_return_date: None,
            status: AllocationStatus::Allocated,
            notes: non_blank(draft.notes.as_deref()),
            return_condition: None,
            return_notes: None,
            allocated_by: session.config.allocation.allocated_by.clone(),
        });
    }

    let mut created = Vec::with_capacity(planned.len());
    for allocation in planned {
        console.assets.update(&allocation.asset_id, |asset| {
            asset.status = AssetStatus::Allocated;
            asset.assigned_to = Some(allocation.employee_name.clone());
            asset.assigned_date = Some(today);
            asset.job_id.clone_from(&allocation.job_id);
            asset.last_updated = today;
        })?;
        created.push(allocation.id.clone());
        console.allocations.insert(allocation)?;
    }

    info!(
        count = created.len(),
        employee_id = %draft.employee_id,
        "assets allocated"
    );
    Ok(created)
}

/// Close out the selected allocations.
///
/// The allocation becomes `Returned`; its asset becomes `Returned`, or
/// `Damaged` when the return condition says so, and is unassigned.
///
/// # Errors
///
/// Empty selection, invalid draft, unknown allocation or asset, or a status
/// the lifecycle tables do not allow.
pub fn return_assets(
    console: &mut Console,
    session: &Session<'_>,
    allocation_ids: &[String],
    draft: &ReturnDraft,
) -> Result<usize> {
    let selected = non_empty(allocation_ids, Entity::Allocation, "return")?;
    draft.validate()?;
    let today = session.today();
    let asset_target = if draft.condition == ReturnCondition::Damaged {
        AssetStatus::Damaged
    } else {
        AssetStatus::Returned
    };

    let mut asset_ids = Vec::with_capacity(selected.len());
    for id in &selected {
        console
            .allocations
            .check_transition(id, AllocationStatus::Returned)?;
        let asset_id = console.allocations.require(id)?.asset_id.clone();
        if !asset_ids.contains(&asset_id) {
            console.assets.check_transition(&asset_id, asset_target)?;
            asset_ids.push(asset_id);
        }
    }

    let notes = non_blank(draft.notes.as_deref());
    for id in &selected {
        console.allocations.update(id, |allocation| {
            allocation.status = AllocationStatus::Returned;
            allocation.actual_return_date = Some(today);
            allocation.return_condition = Some(draft.condition);
            allocation.return_notes.clone_from(&notes);
        })?;
    }
    for asset_id in &asset_ids {
        console.assets.update(asset_id, |asset| {
            asset.status = asset_target;
            asset.assigned_to = None;
            asset.assigned_date = None;
            asset.job_id = None;
            asset.last_updated = today;
        })?;
    }

    info!(count = selected.len(), condition = %draft.condition, "assets returned");
    Ok(selected.len())
}

/// Apply a bulk approve / reminder / escalate to the selected clearances.
///
/// # Errors
///
/// Empty selection, unknown ID, or (for approve) a record the lifecycle
/// table does not allow to complete.
pub fn apply_clearance_action(
    console: &mut Console,
    session: &Session<'_>,
    clearance_ids: &[String],
    action: ClearanceAction,
) -> Result<BulkOutcome> {
    let selected = non_empty(clearance_ids, Entity::Clearance, action.as_str())?;
    let today = session.today();

    for id in &selected {
        match action {
            ClearanceAction::Approve => console
                .clearances
                .check_transition(id, ClearanceStatus::Completed)?,
            ClearanceAction::Reminder | ClearanceAction::Escalate => {
                console.clearances.require(id).map(|_| ())?;
            }
        }
    }

    let actor = &session.config.clearance.bulk_actor;
    for id in &selected {
        console.clearances.update(id, |record| {
            match action {
                ClearanceAction::Approve => {
                    record.clearance_status = ClearanceStatus::Completed;
                    record.clearance_progress = 100;
                    record.cleared_by = Some(actor.clone());
                    record.clearance_date = Some(today);
                }
                ClearanceAction::Reminder => {}
                ClearanceAction::Escalate => record.priority = Priority::High,
            }
            record.last_updated = today;
        })?;
    }

    info!(action = %action, count = selected.len(), "bulk clearance action");
    Ok(BulkOutcome {
        action,
        count: selected.len(),
    })
}

/// Move a job to `status`, touching `updated_at`. Returns the previous status.
///
/// # Errors
///
/// [`RosterError::NotFound`] or [`RosterError::InvalidTransition`].
pub fn set_job_status(
    console: &mut Console,
    session: &Session<'_>,
    job_id: &str,
    status: JobStatus,
) -> Result<JobStatus> {
    let previous = console.jobs.transition(job_id, status)?;
    let today = session.today();
    console.jobs.update(job_id, |job| job.updated_at = today)?;
    info!(job_id, from = %previous, to = %status, "job status changed");
    Ok(previous)
}

/// `Pending Approval -> Approved`.
///
/// # Errors
///
/// See [`set_job_status`].
pub fn approve_job(
    console: &mut Console,
    session: &Session<'_>,
    job_id: &str,
) -> Result<JobStatus> {
    set_job_status(console, session, job_id, JobStatus::Approved)
}

/// Create a job from a validated draft and route it to the procurement inbox.
///
/// Returns the new job ID.
///
/// # Errors
///
/// Invalid draft, or no free job ID after repeated draws.
pub fn create_job<R: Rng>(
    console: &mut Console,
    session: &Session<'_>,
    draft: &JobDraft,
    rng: &mut R,
) -> Result<String> {
    draft.validate()?;
    let Some(doj) = draft.doj else {
        let mut errors = ValidationErrors::new();
        errors.push("doj", "is required");
        return Err(errors.into());
    };
    let today = session.today();

    let mut id = ids::job_id(session.now, rng);
    let mut attempts = 1;
    while console.jobs.contains(&id) || console.job_requests.contains(&id) {
        if attempts >= JOB_ID_ATTEMPTS {
            return Err(RosterError::Conflict {
                entity: Entity::Job,
                id,
            });
        }
        id = ids::job_id(session.now, rng);
        attempts += 1;
    }

    let job = Job {
        id: id.clone(),
        title: draft.title.trim().to_string(),
        department: draft.department.trim().to_string(),
        hod: draft.hod.trim().to_string(),
        experience: draft.experience.trim().to_string(),
        doj,
        status: JobStatus::PendingApproval,
        priority: draft.priority,
        candidates: 0,
        created_at: today,
        updated_at: today,
        jira_ticket: None,
    };
    let request = JobRequest {
        id: id.clone(),
        title: job.title.clone(),
        department: job.department.clone(),
        hod: job.hod.clone(),
        experience: job.experience.clone(),
        expected_doj: doj,
        status: JobRequestStatus::New,
        priority: draft.priority,
        submitted_at: today,
        description: draft.description.trim().to_string(),
        skills_required: draft.skills_required.trim().to_string(),
        hardware_requirements: dedup_items(&draft.hardware_requirements),
        software_requirements: dedup_items(&draft.software_requirements),
        selected_candidate: None,
    };

    console.jobs.insert(job)?;
    console.job_requests.insert(request)?;
    info!(job_id = %id, "job created and routed to procurement");
    Ok(id)
}

/// Attach a candidate to a job request and generate provisioning tickets.
///
/// # Errors
///
/// Invalid draft, unknown request, a request that cannot move to
/// `Processed`, or a ticket ID collision.
pub fn submit_candidate<R: Rng>(
    console: &mut Console,
    session: &Session<'_>,
    job_request_id: &str,
    draft: &CandidateDraft,
    rng: &mut R,
) -> Result<Submission> {
    draft.validate()?;
    console
        .job_requests
        .check_transition(job_request_id, JobRequestStatus::Processed)?;

    let today = session.today();
    let procurement = &session.config.procurement;
    let due_date = today
        .checked_add_days(Days::new(u64::from(procurement.ticket_due_days)))
        .unwrap_or(NaiveDate::MAX);

    let candidate = CandidateInfo {
        id: ids::candidate_id(session.now),
        job_id: job_request_id.to_string(),
        profile: draft.clone(),
    };

    let kinds = [
        TicketType::AssetAllocation,
        TicketType::DomainId,
        TicketType::EmailCreation,
    ];
    let mut tickets = Vec::with_capacity(kinds.len());
    for (offset, kind) in kinds.into_iter().enumerate() {
        let id = ids::ticket_id(session.now, offset);
        ensure_free(&console.tickets, &id)?;
        let assigned_to = match kind {
            TicketType::AssetAllocation => procurement.asset_team.clone(),
            TicketType::DomainId | TicketType::EmailCreation => procurement.it_team.clone(),
        };
        tickets.push(ProvisioningTicket {
            id,
            kind,
            job_id: job_request_id.to_string(),
            candidate_name: draft.name.trim().to_string(),
            status: TicketStatus::Pending,
            assigned_to,
            created_at: today,
            due_date,
            jira_ticket_id: Some(ids::jira_ticket_id(kind, rng)),
        });
    }

    let submission = Submission {
        candidate_id: candidate.id.clone(),
        ticket_ids: tickets.iter().map(|t| t.id.clone()).collect(),
    };

    console.job_requests.update(job_request_id, |request| {
        request.status = JobRequestStatus::Processed;
        request.selected_candidate = Some(candidate);
    })?;
    for ticket in tickets {
        console.tickets.insert(ticket)?;
    }

    info!(
        job_request_id,
        candidate_id = %submission.candidate_id,
        tickets = submission.ticket_ids.len(),
        "candidate submitted"
    );
    Ok(submission)
}

/// Save a report definition as a draft. Returns the report ID.
///
/// # Errors
///
/// Invalid draft or an ID collision.
pub fn create_custom_report(
    console: &mut Console,
    session: &Session<'_>,
    draft: &CustomReportDraft,
) -> Result<String> {
    draft.validate()?;
    let Some(kind) = draft.kind else {
        let mut errors = ValidationErrors::new();
        errors.push("type", "is required");
        return Err(errors.into());
    };

    let report = CustomReport {
        id: ids::report_id(session.now),
        name: draft.name.trim().to_string(),
        description: draft.description.trim().to_string(),
        kind,
        filters: draft.filters.clone(),
        schedule: draft
            .schedule
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        format: draft.format,
        recipients: draft.recipient_list(),
        created_by: session.config.report.created_by.clone(),
        created_date: session.today(),
        last_run: None,
        status: ReportStatus::Draft,
    };
    let id = report.id.clone();
    console.reports.insert(report)?;
    info!(report_id = %id, "custom report created");
    Ok(id)
}

/// Register a new clearance record.
///
/// # Errors
///
/// Duplicate ID, or a progress value above 100.
pub fn open_clearance(console: &mut Console, record: ClearanceRecord) -> Result<()> {
    if record.clearance_progress > 100 {
        let mut errors = ValidationErrors::new();
        errors.push("clearance_progress", "must be between 0 and 100");
        return Err(errors.into());
    }
    let id = record.id.clone();
    console.clearances.insert(record)?;
    info!(clearance_id = %id, "clearance opened");
    Ok(())
}

/// Register a new asset.
///
/// # Errors
///
/// Duplicate ID.
pub fn add_asset(console: &mut Console, asset: Asset) -> Result<()> {
    let id = asset.id.clone();
    console.assets.insert(asset)?;
    info!(asset_id = %id, "asset added");
    Ok(())
}

/// Append an audit entry.
///
/// # Errors
///
/// Duplicate ID.
pub fn record_audit(console: &mut Console, entry: AuditLog) -> Result<()> {
    console.audit_logs.insert(entry)
}
