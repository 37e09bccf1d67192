//! Record ID formats.
//!
//! Time-based IDs use the Unix timestamp in milliseconds; the random parts
//! take any [`rand::Rng`] so tests can seed them.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

use crate::model::TicketType;

/// `JOB-<year>-<4 digits>`.
pub fn job_id<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> String {
    format!("JOB-{}-{:04}", now.year(), rng.gen_range(0..10_000))
}

/// `ALLOC-<millis>-<asset id>`.
#[must_use]
pub fn allocation_id(now: DateTime<Utc>, asset_id: &str) -> String {
    format!("ALLOC-{}-{asset_id}", now.timestamp_millis())
}

/// `CAND-<millis>`.
#[must_use]
pub fn candidate_id(now: DateTime<Utc>) -> String {
    format!("CAND-{}", now.timestamp_millis())
}

/// `TICKET-<millis + offset>`; one batch uses consecutive offsets.
#[must_use]
pub fn ticket_id(now: DateTime<Utc>, offset: usize) -> String {
    let offset = i64::try_from(offset).unwrap_or(i64::MAX);
    format!("TICKET-{}", now.timestamp_millis().saturating_add(offset))
}

/// `RPT-<millis>`.
#[must_use]
pub fn report_id(now: DateTime<Utc>) -> String {
    format!("RPT-{}", now.timestamp_millis())
}

/// `<TYPEUPPERNOSPACES>-<0..999>`, e.g. `DOMAINID-124`.
pub fn jira_ticket_id<R: Rng>(kind: TicketType, rng: &mut R) -> String {
    format!("{}-{}", kind.jira_prefix(), rng.gen_range(0..1_000))
}
