//! Form drafts.
//!
//! Each multi-step form builds a draft value, validates it, and hands it to a
//! mutation handler in one step. Dropping the draft cancels the form.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{CandidateProfile, Priority, ReportFormat, ReportType, ReturnCondition};

/// One field-level problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found while validating a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Whether any problem was reported for `field`.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }

    fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.errors.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !domain.contains('@')
}

/// Trim, drop blanks and drop repeats, keeping first-seen order.
#[must_use]
pub fn dedup_items(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !out.iter().any(|seen| seen == item) {
            out.push(item.to_string());
        }
    }
    out
}

/// Allocation form: who receives the selected assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationDraft {
    pub employee_name: String,
    pub employee_id: String,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub expected_return_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AllocationDraft {
    /// # Errors
    ///
    /// Lists blank required fields and a return date earlier than `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("employee_name", &self.employee_name);
        errors.require("employee_id", &self.employee_id);
        if self.expected_return_date.is_some_and(|date| date < today) {
            errors.push("expected_return_date", "must not be before today");
        }
        errors.into_result()
    }
}

/// Return form for outstanding allocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnDraft {
    pub condition: ReturnCondition,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReturnDraft {
    /// # Errors
    ///
    /// A damaged return must say what happened.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.condition == ReturnCondition::Damaged {
            errors.require("notes", self.notes.as_deref().unwrap_or_default());
        }
        errors.into_result()
    }
}

/// Job requisition form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDraft {
    pub hod: String,
    pub department: String,
    pub title: String,
    pub experience: String,
    pub doj: Option<NaiveDate>,
    pub description: String,
    pub skills_required: String,
    pub priority: Priority,
    pub hardware_requirements: Vec<String>,
    pub software_requirements: Vec<String>,
}

impl JobDraft {
    /// Add a hardware item unless it is blank or already listed.
    pub fn add_hardware(&mut self, item: &str) {
        push_unique(&mut self.hardware_requirements, item);
    }

    pub fn remove_hardware(&mut self, item: &str) {
        self.hardware_requirements.retain(|h| h != item);
    }

    /// Add a software item unless it is blank or already listed.
    pub fn add_software(&mut self, item: &str) {
        push_unique(&mut self.software_requirements, item);
    }

    pub fn remove_software(&mut self, item: &str) {
        self.software_requirements.retain(|s| s != item);
    }

    /// # Errors
    ///
    /// Lists every blank required field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("hod", &self.hod);
        errors.require("title", &self.title);
        if self.doj.is_none() {
            errors.push("doj", "is required");
        }
        errors.require("description", &self.description);
        errors.into_result()
    }
}

fn push_unique(items: &mut Vec<String>, item: &str) {
    let item = item.trim();
    if !item.is_empty() && !items.iter().any(|existing| existing == item) {
        items.push(item.to_string());
    }
}

/// Candidate intake form; the same shape that ends up on the job request.
pub type CandidateDraft = CandidateProfile;

impl CandidateProfile {
    /// # Errors
    ///
    /// Lists blank required fields and a malformed email.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("email", &self.email);
        if !self.email.trim().is_empty() && !looks_like_email(&self.email) {
            errors.push("email", "is not a valid email address");
        }
        errors.require("phone", &self.phone);
        errors.require("address", &self.address);
        if self.actual_doj.is_none() {
            errors.push("actual_doj", "is required");
        }
        errors.into_result()
    }
}

/// Saved-report form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomReportDraft {
    pub name: String,
    pub description: String,
    pub kind: Option<ReportType>,
    pub filters: BTreeMap<String, String>,
    pub schedule: Option<String>,
    pub format: ReportFormat,
    /// Comma-separated recipient list as typed.
    pub recipients: String,
}

impl CustomReportDraft {
    /// Recipients split on commas and trimmed; blanks are dropped.
    #[must_use]
    pub fn recipient_list(&self) -> Vec<String> {
        self.recipients
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// # Errors
    ///
    /// Name and report type are required; every recipient must look like an
    /// email address.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        if self.kind.is_none() {
            errors.push("type", "is required");
        }
        if let Some(bad) = self
            .recipient_list()
            .into_iter()
            .find(|r| !looks_like_email(r))
        {
            errors.push("recipients", format!("'{bad}' is not a valid email address"));
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AllocationDraft, CandidateDraft, CustomReportDraft, JobDraft, ReturnDraft, dedup_items,
    };
    use crate::model::{ReportType, ReturnCondition};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).expect("valid date")
    }

    #[test]
    fn allocation_draft_reports_every_blank_field() {
        let err = AllocationDraft::default()
            .validate(day(10))
            .expect_err("blank form");
        assert_eq!(err.len(), 2);
        assert!(err.has("employee_id"));
        assert!(!err.has("job_id"));
        assert_eq!(
            err.to_string(),
            "employee_name is required; employee_id is required"
        );
    }

    #[test]
    fn allocation_return_date_cannot_be_in_the_past() {
        let draft = AllocationDraft {
            employee_name: "Dana Lee".to_string(),
            employee_id: "EMP-099".to_string(),
            job_id: None,
            expected_return_date: Some(day(9)),
            notes: None,
        };
        let err = draft.validate(day(10)).expect_err("past date");
        assert!(err.has("expected_return_date"));

        let ok = AllocationDraft {
            expected_return_date: Some(day(10)),
            ..draft
        };
        assert!(ok.validate(day(10)).is_ok());
    }

    #[test]
    fn damaged_return_needs_notes() {
        let draft = ReturnDraft {
            condition: ReturnCondition::Damaged,
            notes: Some("  ".to_string()),
        };
        assert!(draft.validate().is_err());
        let good = ReturnDraft {
            condition: ReturnCondition::Good,
            notes: None,
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn job_draft_ignores_duplicate_hardware() {
        let mut draft = JobDraft::default();
        draft.add_hardware("Laptop");
        draft.add_hardware(" Laptop ");
        draft.add_hardware("");
        draft.add_hardware("Monitor");
        draft.remove_hardware("Monitor");
        assert_eq!(draft.hardware_requirements, ["Laptop"]);

        let err = draft.validate().expect_err("blank required fields");
        for field in ["hod", "title", "doj", "description"] {
            assert!(err.has(field), "missing error for {field}");
        }
    }

    #[test]
    fn dedup_keeps_first_seen_order() {
        let items = ["b", "a", " b", "", "c", "a"].map(str::to_string);
        assert_eq!(dedup_items(&items), ["b", "a", "c"]);
    }

    #[test]
    fn candidate_email_shape_is_checked() {
        let draft = CandidateDraft {
            name: "Anita Rao".to_string(),
            email: "anita.example.com".to_string(),
            phone: "+91 99999 00000".to_string(),
            address: "12 MG Road".to_string(),
            actual_doj: Some(day(20)),
            ..CandidateDraft::default()
        };
        let err = draft.validate().expect_err("bad email");
        assert_eq!(err.len(), 1);
        assert!(err.has("email"));

        let fixed = CandidateDraft {
            email: "anita@example.com".to_string(),
            ..draft
        };
        assert!(fixed.validate().is_ok());
    }

    #[test]
    fn report_recipients_are_split_and_trimmed() {
        let draft = CustomReportDraft {
            name: "Monthly utilization".to_string(),
            kind: Some(ReportType::Utilization),
            recipients: " ops@example.com,  cfo@example.com ,".to_string(),
            ..CustomReportDraft::default()
        };
        assert_eq!(draft.recipient_list(), ["ops@example.com", "cfo@example.com"]);
        assert!(draft.validate().is_ok());

        let bad = CustomReportDraft {
            recipients: "ops".to_string(),
            kind: None,
            ..draft
        };
        let err = bad.validate().expect_err("invalid");
        assert!(err.has("type"));
        assert!(err.has("recipients"));
    }
}
