//! Listing columns for every entity.

use roster_core::model::{
    Asset, AssetAllocation, AssetClearance, AssetRequest, AuditLog, Candidate, ClearanceRecord,
    CustomReport, Job, JobRequest, OffboardingTask, ProvisioningTicket,
};

use crate::output::{Renderable, TableRow};

fn opt<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}

macro_rules! table_row {
    ($ty:ty, [$($header:literal),+ $(,)?], |$r:ident| [$($cell:expr),+ $(,)?]) => {
        impl Renderable for $ty {}

        impl TableRow for $ty {
            fn headers() -> &'static [&'static str] {
                &[$($header),+]
            }

            fn cells(&self) -> Vec<String> {
                let $r = self;
                vec![$($cell.to_string()),+]
            }
        }
    };
}

table_row!(
    Job,
    ["ID", "TITLE", "DEPARTMENT", "HOD", "DOJ", "STATUS", "PRIORITY", "CANDIDATES"],
    |r| [r.id, r.title, r.department, r.hod, r.doj, r.status, r.priority, r.candidates]
);

table_row!(
    Candidate,
    ["ID", "NAME", "EMAIL", "JOB", "STATUS", "APPLIED"],
    |r| [r.id, r.name, r.email, r.job_id, r.status, r.applied_date]
);

table_row!(
    Asset,
    ["ID", "NAME", "TYPE", "CATEGORY", "STATUS", "ASSIGNED TO", "LOCATION"],
    |r| [
        r.id,
        r.name,
        r.kind,
        r.category,
        r.status,
        opt(r.assigned_to.as_ref()),
        r.location,
    ]
);

table_row!(
    AssetAllocation,
    ["ID", "ASSET", "EMPLOYEE", "EMPLOYEE ID", "JOB", "ALLOCATED", "STATUS"],
    |r| [
        r.id,
        r.asset_id,
        r.employee_name,
        r.employee_id,
        opt(r.job_id.as_ref()),
        r.allocation_date,
        r.status,
    ]
);

table_row!(
    AssetRequest,
    ["ID", "TYPE", "ASSET", "EMPLOYEE", "STATUS", "PRIORITY", "REQUESTED"],
    |r| [
        r.id,
        r.kind,
        r.asset_id,
        r.employee_name,
        r.status,
        r.priority,
        r.request_date,
    ]
);

table_row!(
    ClearanceRecord,
    ["ID", "EMPLOYEE", "EMPLOYEE ID", "DEPARTMENT", "LWD", "STATUS", "PRIORITY", "PROGRESS"],
    |r| [
        r.id,
        r.employee_name,
        r.employee_id,
        r.department,
        r.lwd,
        r.clearance_status,
        r.priority,
        format!("{}%", r.clearance_progress),
    ]
);

table_row!(
    AssetClearance,
    ["ID", "EMPLOYEE ID", "ASSET", "SERIAL", "STATUS", "EXPECTED"],
    |r| [
        r.id,
        r.employee_id,
        r.asset_name,
        r.serial_number,
        r.status,
        r.expected_return_date,
    ]
);

table_row!(
    OffboardingTask,
    ["ID", "EMPLOYEE ID", "TYPE", "ASSIGNED TO", "STATUS", "DUE"],
    |r| [r.id, r.employee_id, r.task_type, r.assigned_to, r.status, r.due_date]
);

table_row!(
    AuditLog,
    ["ID", "TIMESTAMP", "USER", "ACTION", "RESOURCE", "STATUS", "RISK"],
    |r| [
        r.id,
        r.timestamp.format("%Y-%m-%d %H:%M:%S"),
        r.user_name,
        r.action,
        r.resource,
        r.status,
        r.risk_level,
    ]
);

table_row!(
    CustomReport,
    ["ID", "NAME", "TYPE", "FORMAT", "STATUS", "CREATED"],
    |r| [r.id, r.name, r.kind, r.format, r.status, r.created_date]
);

table_row!(
    JobRequest,
    ["ID", "TITLE", "DEPARTMENT", "HOD", "EXPECTED DOJ", "STATUS", "PRIORITY"],
    |r| [
        r.id,
        r.title,
        r.department,
        r.hod,
        r.expected_doj,
        r.status,
        r.priority,
    ]
);

table_row!(
    ProvisioningTicket,
    ["ID", "TYPE", "JOB", "CANDIDATE", "ASSIGNED TO", "STATUS", "DUE", "JIRA"],
    |r| [
        r.id,
        r.kind,
        r.job_id,
        r.candidate_name,
        r.assigned_to,
        r.status,
        r.due_date,
        opt(r.jira_ticket_id.as_ref()),
    ]
);
