use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, Priority};
use crate::query::Queryable;
use crate::store::Record;
use crate::transition::Lifecycle;

literal_enum! {
    /// Requisition lifecycle.
    pub enum JobStatus ("job status") {
        Draft => "Draft",
        PendingApproval => "Pending Approval",
        Approved => "Approved",
        InProgress => "In Progress",
        Filled => "Filled",
        Cancelled => "Cancelled",
    }
}

impl Lifecycle for JobStatus {
    /// Valid transitions:
    /// - `Draft -> Pending Approval | Cancelled`
    /// - `Pending Approval -> Approved | Draft | Cancelled` (send back)
    /// - `Approved -> In Progress | Filled | Cancelled`
    /// - `In Progress -> Filled | Cancelled`
    /// - `Cancelled -> Draft` (reopen)
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::PendingApproval, Self::Cancelled],
            Self::PendingApproval => &[Self::Approved, Self::Draft, Self::Cancelled],
            Self::Approved => &[Self::InProgress, Self::Filled, Self::Cancelled],
            Self::InProgress => &[Self::Filled, Self::Cancelled],
            Self::Filled => &[],
            Self::Cancelled => &[Self::Draft],
        }
    }
}

literal_enum! {
    /// Hiring pipeline stage of a candidate.
    pub enum CandidateStatus ("candidate status") {
        Applied => "Applied",
        Screening => "Screening",
        Interview => "Interview",
        Selected => "Selected",
        Rejected => "Rejected",
        Offered => "Offered",
        Joined => "Joined",
    }
}

impl Lifecycle for CandidateStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Applied => &[Self::Screening, Self::Rejected],
            Self::Screening => &[Self::Interview, Self::Rejected],
            Self::Interview => &[Self::Selected, Self::Rejected],
            Self::Selected => &[Self::Offered, Self::Rejected],
            Self::Offered => &[Self::Joined, Self::Rejected],
            Self::Rejected | Self::Joined => &[],
        }
    }
}

/// A job requisition raised by a head of department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub department: String,
    /// Head of department who raised the requisition.
    pub hod: String,
    pub experience: String,
    /// Expected date of joining.
    pub doj: NaiveDate,
    pub status: JobStatus,
    pub priority: Priority,
    /// Number of candidates in the pipeline.
    pub candidates: u32,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_ticket: Option<String>,
}

impl Record for Job {
    type Status = JobStatus;
    const ENTITY: Entity = Entity::Job;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> JobStatus {
        self.status
    }

    fn set_status(&mut self, status: JobStatus) {
        self.status = status;
    }
}

impl Queryable for Job {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.title.as_str()), Some(self.id.as_str()), Some(self.hod.as_str())]
    }

    fn category(&self) -> Option<&str> {
        Some(self.department.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.doj)
    }
}

/// An applicant attached to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub status: CandidateStatus,
    pub applied_date: NaiveDate,
    pub job_id: String,
}

impl Record for Candidate {
    type Status = CandidateStatus;
    const ENTITY: Entity = Entity::Candidate;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> CandidateStatus {
        self.status
    }

    fn set_status(&mut self, status: CandidateStatus) {
        self.status = status;
    }
}

impl Queryable for Candidate {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), Some(self.id.as_str()), Some(self.email.as_str())]
    }

    fn category(&self) -> Option<&str> {
        Some(self.job_id.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.applied_date)
    }
}
