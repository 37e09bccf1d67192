use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::query::Queryable;
use crate::store::Record;
use crate::transition::Lifecycle;

literal_enum! {
    /// Outcome of an audited action.
    pub enum AuditStatus ("audit status") {
        Success => "Success",
        Failed => "Failed",
        Warning => "Warning",
    }
}

/// Audit entries are append-only.
impl Lifecycle for AuditStatus {
    fn allowed_targets(self) -> &'static [Self] {
        &[]
    }
}

literal_enum! {
    pub enum RiskLevel ("risk level") {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

/// One entry in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
    pub action: String,
    pub resource: String,
    pub resource_id: String,
    /// Free-form before/after payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<serde_json::Value>,
    pub ip_address: String,
    pub user_agent: String,
    pub status: AuditStatus,
    pub risk_level: RiskLevel,
}

impl Record for AuditLog {
    type Status = AuditStatus;
    const ENTITY: Entity = Entity::AuditLog;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> AuditStatus {
        self.status
    }

    fn set_status(&mut self, status: AuditStatus) {
        self.status = status;
    }
}

impl Queryable for AuditLog {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.user_name.as_str()),
            Some(self.action.as_str()),
            Some(self.resource.as_str()),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.risk_level.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.timestamp.date_naive())
    }
}

literal_enum! {
    pub enum ReportType ("report type") {
        AssetHistory => "Asset History",
        Utilization => "Utilization",
        CostAnalysis => "Cost Analysis",
        Compliance => "Compliance",
        CustomQuery => "Custom Query",
    }
}

literal_enum! {
    /// Export format of a saved report.
    #[derive(Default)]
    pub enum ReportFormat ("report format") {
        #[default]
        Pdf => "PDF",
        Excel => "Excel",
        Csv => "CSV",
    }
}

literal_enum! {
    pub enum ReportStatus ("report status") {
        Active => "Active",
        Draft => "Draft",
        Archived => "Archived",
    }
}

impl Lifecycle for ReportStatus {
    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Active, Self::Archived],
            Self::Active => &[Self::Archived],
            Self::Archived => &[Self::Active],
        }
    }
}

/// A saved report definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomReport {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ReportType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    pub format: ReportFormat,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub created_by: String,
    pub created_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<NaiveDate>,
    pub status: ReportStatus,
}

impl Record for CustomReport {
    type Status = ReportStatus;
    const ENTITY: Entity = Entity::CustomReport;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ReportStatus {
        self.status
    }

    fn set_status(&mut self, status: ReportStatus) {
        self.status = status;
    }
}

impl Queryable for CustomReport {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), Some(self.description.as_str())]
    }

    fn category(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.created_date)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AuditLog, AuditStatus, CustomReport, ReportFormat, ReportStatus, ReportType, RiskLevel,
    };
    use crate::query::{Filter, Queryable, check};
    use crate::transition::Lifecycle;
    use chrono::NaiveDate;

    fn log() -> AuditLog {
        serde_json::from_value(serde_json::json!({
            "id": "AUD-001",
            "timestamp": "2024-01-20T14:30:00Z",
            "user_id": "USR-001",
            "user_name": "Admin User",
            "action": "Asset Allocated",
            "resource": "Asset",
            "resource_id": "AST-LP-001",
            "ip_address": "192.168.1.100",
            "user_agent": "Mozilla/5.0",
            "status": "Success",
            "risk_level": "Low"
        }))
        .expect("deserialize")
    }

    #[test]
    fn audit_entries_are_immutable() {
        for from in AuditStatus::ALL {
            assert!(from.is_terminal());
        }
    }

    #[test]
    fn audit_date_filter_uses_calendar_day() {
        let entry = log();
        assert_eq!(
            entry.filter_date(),
            NaiveDate::from_ymd_opt(2024, 1, 20)
        );
        let day = NaiveDate::from_ymd_opt(2024, 1, 20).expect("valid date");
        let logs = [entry];
        let hits = Filter::<AuditStatus>::new()
            .with_date_range(day, day)
            .with_category(RiskLevel::Low.as_str())
            .apply(logs.iter());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn audit_log_search_fields() {
        check::searchable(
            &log(),
            &["admin user", "allocated", "asset"],
            &["USR-001", "192.168", "Mozilla"],
        );
        check::category(&log(), "Low");
    }

    #[test]
    fn custom_report_filter_fields() {
        let day = NaiveDate::from_ymd_opt(2024, 4, 2).expect("valid date");
        let report = CustomReport {
            id: "RPT-1712016000000".to_string(),
            name: "Quarterly spend".to_string(),
            description: "Hardware cost per department".to_string(),
            kind: ReportType::CostAnalysis,
            filters: std::collections::BTreeMap::new(),
            schedule: Some("monthly".to_string()),
            format: ReportFormat::Excel,
            recipients: vec!["cfo@example.com".to_string()],
            created_by: "Finance Ops".to_string(),
            created_date: day,
            last_run: None,
            status: ReportStatus::Active,
        };
        check::searchable(
            &report,
            &["quarterly", "per department"],
            &["RPT-1712016000000", "monthly", "cfo@", "Finance Ops"],
        );
        check::category(&report, "Cost Analysis");
        check::dated(&report, day);
    }
}
