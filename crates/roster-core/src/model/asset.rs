use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, Priority};
use crate::query::Queryable;
use crate::store::Record;
use crate::transition::Lifecycle;

literal_enum! {
    /// Broad asset class.
    pub enum AssetType ("asset type") {
        Hardware => "Hardware",
        Software => "Software",
    }
}

literal_enum! {
    /// Physical condition recorded at purchase or inspection.
    pub enum Condition ("condition") {
        New => "New",
        Good => "Good",
        Fair => "Fair",
        Poor => "Poor",
    }
}

literal_enum! {
    /// Inventory lifecycle of an asset.
    pub enum AssetStatus ("asset status") {
        Available => "Available",
        Allocated => "Allocated",
        InUse => "In Use",
        Maintenance => "Maintenance",
        Returned => "Returned",
        Damaged => "Damaged",
        Disposed => "Disposed",
    }
}

impl AssetStatus {
    /// Whether a new allocation may start from this status.
    #[must_use]
    pub const fn is_allocatable(self) -> bool {
        matches!(self, Self::Available | Self::Returned)
    }
}

impl Lifecycle for AssetStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Available => &[Self::Allocated, Self::Maintenance, Self::Disposed],
            Self::Allocated => &[Self::InUse, Self::Returned, Self::Damaged],
            Self::InUse => &[Self::Returned, Self::Damaged, Self::Maintenance],
            Self::Maintenance => &[Self::Available, Self::Disposed],
            Self::Returned => &[
                Self::Available,
                Self::Allocated,
                Self::Maintenance,
                Self::Disposed,
            ],
            Self::Damaged => &[Self::Maintenance, Self::Disposed],
            Self::Disposed => &[],
        }
    }
}

/// A tracked hardware or software asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AssetType,
    pub category: String,
    pub serial_number: String,
    pub model: String,
    pub brand: String,
    pub status: AssetStatus,
    pub condition: Condition,
    pub purchase_date: NaiveDate,
    /// Whole currency units.
    pub purchase_price: u32,
    /// Warranty expiry date.
    pub warranty: NaiveDate,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub last_updated: NaiveDate,
}

impl Record for Asset {
    type Status = AssetStatus;
    const ENTITY: Entity = Entity::Asset;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> AssetStatus {
        self.status
    }

    fn set_status(&mut self, status: AssetStatus) {
        self.status = status;
    }
}

impl Queryable for Asset {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            Some(self.serial_number.as_str()),
            self.assigned_to.as_deref(),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.purchase_date)
    }
}

literal_enum! {
    /// State of one asset handed to one employee.
    pub enum AllocationStatus ("allocation status") {
        Pending => "Pending",
        Allocated => "Allocated",
        InUse => "In Use",
        Returned => "Returned",
        Overdue => "Overdue",
    }
}

impl AllocationStatus {
    /// Whether the asset is still out with the employee.
    #[must_use]
    pub const fn is_outstanding(self) -> bool {
        matches!(self, Self::Allocated | Self::InUse | Self::Overdue)
    }
}

impl Lifecycle for AllocationStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Allocated],
            Self::Allocated => &[Self::InUse, Self::Returned, Self::Overdue],
            Self::InUse => &[Self::Returned, Self::Overdue],
            Self::Overdue => &[Self::Returned],
            Self::Returned => &[],
        }
    }
}

literal_enum! {
    /// Condition of an asset when it comes back.
    pub enum ReturnCondition ("return condition") {
        Good => "Good",
        Fair => "Fair",
        Damaged => "Damaged",
    }
}

/// One asset handed to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub id: String,
    pub asset_id: String,
    pub asset_name: String,
    pub serial_number: String,
    pub employee_name: String,
    pub employee_id: String,
    /// Requisition the asset was issued against, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub allocation_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_return_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_return_date: Option<NaiveDate>,
    pub status: AllocationStatus,
    /// Free text recorded at hand-over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_condition: Option<ReturnCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_notes: Option<String>,
    pub allocated_by: String,
}

impl Record for AssetAllocation {
    type Status = AllocationStatus;
    const ENTITY: Entity = Entity::Allocation;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> AllocationStatus {
        self.status
    }

    fn set_status(&mut self, status: AllocationStatus) {
        self.status = status;
    }
}

impl Queryable for AssetAllocation {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.asset_name.as_str()),
            Some(self.employee_name.as_str()),
            Some(self.employee_id.as_str()),
            Some(self.asset_id.as_str()),
        ]
    }

    fn category(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.allocation_date)
    }
}

literal_enum! {
    /// What an asset request asks for.
    pub enum RequestType ("request type") {
        Allocation => "Allocation",
        Return => "Return",
        Replacement => "Replacement",
        Maintenance => "Maintenance",
    }
}

literal_enum! {
    /// Approval state of an asset request.
    pub enum RequestStatus ("request status") {
        Pending => "Pending",
        Approved => "Approved",
        InProgress => "In Progress",
        Completed => "Completed",
        Rejected => "Rejected",
    }
}

impl Lifecycle for RequestStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::InProgress, Self::Completed],
            Self::InProgress => &[Self::Completed],
            Self::Completed | Self::Rejected => &[],
        }
    }
}

/// A request to allocate, return, replace or service an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RequestType,
    pub asset_id: String,
    pub asset_name: String,
    pub employee_name: String,
    pub requested_by: String,
    pub request_date: NaiveDate,
    pub status: RequestStatus,
    pub priority: Priority,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
}

impl Record for AssetRequest {
    type Status = RequestStatus;
    const ENTITY: Entity = Entity::AssetRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }
}

impl Queryable for AssetRequest {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.asset_name.as_str()),
            Some(self.employee_name.as_str()),
            Some(self.id.as_str()),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.request_date)
    }
}
