//! Typed records for every console entity.
//!
//! Status, priority and type values are closed enums. Each one serializes and
//! displays as the exact literal the console shows (`"Pending Approval"`,
//! `"In Use"`), and parses case-insensitively with `-`/`_` accepted in place
//! of spaces so command-line flags stay convenient.

use std::fmt;

/// Declare a closed enum whose wire form is a fixed display literal.
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($expected:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $literal:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $literal)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The display literal for this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $literal),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = $crate::model::normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| $crate::model::normalize(value.as_str()) == wanted)
                    .ok_or_else(|| $crate::model::ParseEnumError {
                        expected: $expected,
                        got: s.to_string(),
                    })
            }
        }
    };
}

pub mod asset;
pub mod clearance;
pub mod job;
pub mod procurement;
pub mod report;

pub use asset::{
    AllocationStatus, Asset, AssetAllocation, AssetRequest, AssetStatus, AssetType, Condition,
    RequestStatus, RequestType, ReturnCondition,
};
pub use clearance::{
    AssetClearance, AssetClearanceStatus, ClearanceAction, ClearanceRecord, ClearanceStatus,
    OffboardingTask, TaskStatus, TaskType,
};
pub use job::{Candidate, CandidateStatus, Job, JobStatus};
pub use procurement::{
    CandidateInfo, CandidateProfile, JobRequest, JobRequestStatus, ProvisioningTicket,
    TicketStatus, TicketType,
};
pub use report::{
    AuditLog, AuditStatus, CustomReport, ReportFormat, ReportStatus, ReportType, RiskLevel,
};

literal_enum! {
    /// Shared three-level priority used by jobs, requests, clearances and tasks.
    #[derive(Default)]
    pub enum Priority ("priority") {
        High => "High",
        #[default]
        Medium => "Medium",
        Low => "Low",
    }
}

literal_enum! {
    /// The entity collections owned by a console.
    pub enum Entity ("entity") {
        Job => "job",
        Candidate => "candidate",
        Asset => "asset",
        Allocation => "allocation",
        AssetRequest => "asset request",
        Clearance => "clearance",
        AssetClearance => "asset clearance",
        OffboardingTask => "offboarding task",
        AuditLog => "audit log",
        CustomReport => "custom report",
        JobRequest => "job request",
        ProvisioningTicket => "provisioning ticket",
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

/// Lowercase, trim, and fold `-`/`_` into spaces.
pub(crate) fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
