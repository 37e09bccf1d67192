//! `roster show`: one record in full.

use anyhow::Result;
use clap::Args;
use roster_core::model::{ClearanceRecord, Entity};
use roster_core::stats::AssetCounts;
use roster_core::{Record, Store};
use serde::Serialize;

use super::Context;
use crate::output::{Renderable, render_item};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Collection the record belongs to.
    pub entity: Entity,

    /// Record ID.
    pub id: String,
}

/// A clearance record with its asset recovery counts.
#[derive(Debug, Serialize)]
struct ClearanceDetail<'a> {
    #[serde(flatten)]
    record: &'a ClearanceRecord,
    assets_allocated: usize,
    assets_returned: usize,
    assets_pending: usize,
}

impl Renderable for ClearanceDetail<'_> {}

fn show_record<T: Record + Renderable>(store: &Store<T>, id: &str, ctx: &Context) -> Result<()> {
    render_item(store.require(id)?, ctx.mode)
}

/// Execute `roster show`.
///
/// # Errors
///
/// Missing snapshot, lock timeout, or an unknown ID.
pub fn run_show(args: &ShowArgs, ctx: &Context) -> Result<()> {
    let console = ctx.read()?;
    let id = args.id.as_str();
    match args.entity {
        Entity::Job => show_record(&console.jobs, id, ctx),
        Entity::Candidate => show_record(&console.candidates, id, ctx),
        Entity::Asset => show_record(&console.assets, id, ctx),
        Entity::Allocation => show_record(&console.allocations, id, ctx),
        Entity::AssetRequest => show_record(&console.asset_requests, id, ctx),
        Entity::Clearance => {
            let record = console.clearances.require(id)?;
            let counts = AssetCounts::derive(&record.employee_id, &console.asset_clearances);
            let detail = ClearanceDetail {
                record,
                assets_allocated: counts.allocated,
                assets_returned: counts.returned,
                assets_pending: counts.pending,
            };
            render_item(&detail, ctx.mode)
        }
        Entity::AssetClearance => show_record(&console.asset_clearances, id, ctx),
        Entity::OffboardingTask => show_record(&console.tasks, id, ctx),
        Entity::AuditLog => show_record(&console.audit_logs, id, ctx),
        Entity::CustomReport => show_record(&console.reports, id, ctx),
        Entity::JobRequest => show_record(&console.job_requests, id, ctx),
        Entity::ProvisioningTicket => show_record(&console.tickets, id, ctx),
    }
}
