use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, Priority, ReturnCondition};
use crate::query::Queryable;
use crate::store::Record;
use crate::transition::Lifecycle;

literal_enum! {
    /// Overall exit-clearance state of a departing employee.
    pub enum ClearanceStatus ("clearance status") {
        Pending => "Pending",
        InProgress => "In Progress",
        Completed => "Completed",
        Blocked => "Blocked",
        Overdue => "Overdue",
    }
}

impl Lifecycle for ClearanceStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[
                Self::InProgress,
                Self::Completed,
                Self::Blocked,
                Self::Overdue,
            ],
            Self::InProgress => &[Self::Completed, Self::Blocked, Self::Overdue],
            Self::Blocked => &[Self::InProgress, Self::Completed],
            Self::Overdue => &[Self::InProgress, Self::Completed],
            Self::Completed => &[],
        }
    }
}

/// Exit clearance for one employee.
///
/// Asset counts are not stored here; see
/// [`AssetCounts::derive`](crate::stats::AssetCounts::derive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearanceRecord {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    pub position: String,
    pub manager: String,
    /// Last working day.
    pub lwd: NaiveDate,
    pub resignation_date: NaiveDate,
    pub clearance_status: ClearanceStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_date: NaiveDate,
    pub last_updated: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance_date: Option<NaiveDate>,
    /// Percent complete, 0..=100.
    pub clearance_progress: u8,
}

impl Record for ClearanceRecord {
    type Status = ClearanceStatus;
    const ENTITY: Entity = Entity::Clearance;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ClearanceStatus {
        self.clearance_status
    }

    fn set_status(&mut self, status: ClearanceStatus) {
        self.clearance_status = status;
    }
}

impl Queryable for ClearanceRecord {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.employee_name.as_str()),
            Some(self.employee_id.as_str()),
            Some(self.department.as_str()),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.department.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.lwd)
    }
}

literal_enum! {
    /// Bulk action over selected clearance records.
    pub enum ClearanceAction ("clearance action") {
        Approve => "approve",
        Reminder => "reminder",
        Escalate => "escalate",
    }
}

literal_enum! {
    /// Recovery state of one asset held by a departing employee.
    pub enum AssetClearanceStatus ("asset clearance status") {
        PendingReturn => "Pending Return",
        Returned => "Returned",
        Damaged => "Damaged",
        Lost => "Lost",
        Waived => "Waived",
    }
}

impl AssetClearanceStatus {
    /// Anything but `Pending Return` counts as settled.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::PendingReturn)
    }
}

impl Lifecycle for AssetClearanceStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::PendingReturn => &[Self::Returned, Self::Damaged, Self::Lost, Self::Waived],
            Self::Returned | Self::Damaged | Self::Lost | Self::Waived => &[],
        }
    }
}

/// One asset to recover from a departing employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetClearance {
    pub id: String,
    pub employee_id: String,
    pub asset_id: String,
    pub asset_name: String,
    pub serial_number: String,
    pub category: String,
    pub status: AssetClearanceStatus,
    pub expected_return_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_return_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_condition: Option<ReturnCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handed_over_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
}

impl Record for AssetClearance {
    type Status = AssetClearanceStatus;
    const ENTITY: Entity = Entity::AssetClearance;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> AssetClearanceStatus {
        self.status
    }

    fn set_status(&mut self, status: AssetClearanceStatus) {
        self.status = status;
    }
}

impl Queryable for AssetClearance {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.asset_name.as_str()),
            Some(self.serial_number.as_str()),
            Some(self.employee_id.as_str()),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.expected_return_date)
    }
}

literal_enum! {
    /// Kind of offboarding work.
    pub enum TaskType ("task type") {
        AssetReturn => "Asset Return",
        AccessRevocation => "Access Revocation",
        Documentation => "Documentation",
        ExitInterview => "Exit Interview",
        KnowledgeTransfer => "Knowledge Transfer",
    }
}

literal_enum! {
    /// Progress of one offboarding task.
    pub enum TaskStatus ("task status") {
        Pending => "Pending",
        InProgress => "In Progress",
        Completed => "Completed",
        Blocked => "Blocked",
    }
}

impl Lifecycle for TaskStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::InProgress, Self::Blocked, Self::Completed],
            Self::InProgress => &[Self::Completed, Self::Blocked],
            Self::Blocked => &[Self::Pending, Self::InProgress],
            Self::Completed => &[],
        }
    }
}

/// A unit of offboarding work, optionally waiting on other tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffboardingTask {
    pub id: String,
    pub employee_id: String,
    pub task_type: TaskType,
    pub description: String,
    pub assigned_to: String,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    pub priority: Priority,
    /// IDs of tasks that must finish first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl Record for OffboardingTask {
    type Status = TaskStatus;
    const ENTITY: Entity = Entity::OffboardingTask;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> TaskStatus {
        self.status
    }

    fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}

impl Queryable for OffboardingTask {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.description.as_str()),
            Some(self.assigned_to.as_str()),
            Some(self.employee_id.as_str()),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.task_type.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.due_date)
    }
}
