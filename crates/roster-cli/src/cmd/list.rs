//! `roster list`: filtered listing of one entity collection.

use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use roster_core::model::{Entity, ParseEnumError};
use roster_core::{Queryable, Store};
use tracing::debug;

use super::{Context, FilterArgs};
use crate::output::{TableRow, render_list};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection to list (job, asset, allocation, clearance, job-request, ...).
    pub entity: Entity,

    #[command(flatten)]
    pub filter: FilterArgs,
}

fn list_store<T>(store: &Store<T>, filter: &FilterArgs, ctx: &Context) -> Result<()>
where
    T: Queryable + TableRow,
    T::Status: FromStr<Err = ParseEnumError>,
{
    let filter = filter.to_filter::<T::Status>()?;
    let visible = store.list(&filter);
    debug!(entity = %T::ENTITY, total = store.len(), visible = visible.len(), "listing");
    render_list(&visible, ctx.mode)
}

/// Execute `roster list`.
///
/// # Errors
///
/// Missing snapshot, lock timeout, or an unparseable status filter.
pub fn run_list(args: &ListArgs, ctx: &Context) -> Result<()> {
    let console = ctx.read()?;
    let filter = &args.filter;
    match args.entity {
        Entity::Job => list_store(&console.jobs, filter, ctx),
        Entity::Candidate => list_store(&console.candidates, filter, ctx),
        Entity::Asset => list_store(&console.assets, filter, ctx),
        Entity::Allocation => list_store(&console.allocations, filter, ctx),
        Entity::AssetRequest => list_store(&console.asset_requests, filter, ctx),
        Entity::Clearance => list_store(&console.clearances, filter, ctx),
        Entity::AssetClearance => list_store(&console.asset_clearances, filter, ctx),
        Entity::OffboardingTask => list_store(&console.tasks, filter, ctx),
        Entity::AuditLog => list_store(&console.audit_logs, filter, ctx),
        Entity::CustomReport => list_store(&console.reports, filter, ctx),
        Entity::JobRequest => list_store(&console.job_requests, filter, ctx),
        Entity::ProvisioningTicket => list_store(&console.tickets, filter, ctx),
    }
}
