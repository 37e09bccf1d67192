use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, Priority};
use crate::query::Queryable;
use crate::store::Record;
use crate::transition::Lifecycle;

literal_enum! {
    /// Procurement inbox state of a job request.
    pub enum JobRequestStatus ("job request status") {
        New => "New",
        InReview => "In Review",
        CandidateSelected => "Candidate Selected",
        Processed => "Processed",
        Completed => "Completed",
    }
}

impl Lifecycle for JobRequestStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::New => &[Self::InReview, Self::Processed],
            Self::InReview => &[Self::CandidateSelected, Self::Processed],
            Self::CandidateSelected => &[Self::Processed],
            Self::Processed => &[Self::Completed],
            Self::Completed => &[],
        }
    }
}

/// Personal and onboarding details captured by the candidate intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub experience: String,
    pub skills: String,
    pub previous_company: String,
    pub expected_salary: String,
    /// Actual date of joining.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_doj: Option<NaiveDate>,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub pan_number: String,
    pub aadhar_number: String,
    pub bank_account: String,
    pub ifsc_code: String,
}

/// A submitted candidate attached to a job request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub id: String,
    pub job_id: String,
    #[serde(flatten)]
    pub profile: CandidateProfile,
}

/// A job as it arrives in the procurement inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub id: String,
    pub title: String,
    pub department: String,
    pub hod: String,
    pub experience: String,
    pub expected_doj: NaiveDate,
    pub status: JobRequestStatus,
    pub priority: Priority,
    pub submitted_at: NaiveDate,
    pub description: String,
    pub skills_required: String,
    #[serde(default)]
    pub hardware_requirements: Vec<String>,
    #[serde(default)]
    pub software_requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_candidate: Option<CandidateInfo>,
}

impl Record for JobRequest {
    type Status = JobRequestStatus;
    const ENTITY: Entity = Entity::JobRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> JobRequestStatus {
        self.status
    }

    fn set_status(&mut self, status: JobRequestStatus) {
        self.status = status;
    }
}

impl Queryable for JobRequest {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.title.as_str()),
            Some(self.id.as_str()),
            Some(self.hod.as_str()),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.department.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.expected_doj)
    }
}

literal_enum! {
    /// Provisioning work generated for a new joiner.
    pub enum TicketType ("ticket type") {
        AssetAllocation => "Asset Allocation",
        DomainId => "Domain ID",
        EmailCreation => "Email Creation",
    }
}

impl TicketType {
    /// Jira project key: the literal upper-cased with whitespace removed.
    #[must_use]
    pub fn jira_prefix(self) -> String {
        self.as_str()
            .split_whitespace()
            .collect::<String>()
            .to_uppercase()
    }
}

literal_enum! {
    /// State of a provisioning ticket.
    pub enum TicketStatus ("ticket status") {
        Pending => "Pending",
        InProgress => "In Progress",
        Completed => "Completed",
        Failed => "Failed",
    }
}

impl Lifecycle for TicketStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::InProgress, Self::Completed, Self::Failed],
            Self::InProgress => &[Self::Completed, Self::Failed],
            Self::Failed => &[Self::Pending],
            Self::Completed => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningTicket {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TicketType,
    pub job_id: String,
    pub candidate_name: String,
    pub status: TicketStatus,
    pub assigned_to: String,
    pub created_at: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_ticket_id: Option<String>,
}

impl Record for ProvisioningTicket {
    type Status = TicketStatus;
    const ENTITY: Entity = Entity::ProvisioningTicket;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> TicketStatus {
        self.status
    }

    fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
    }
}

impl Queryable for ProvisioningTicket {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.candidate_name.as_str()),
            Some(self.job_id.as_str()),
            Some(self.id.as_str()),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.due_date)
    }
}
