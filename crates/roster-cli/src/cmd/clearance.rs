//! `roster clearance`: exit clearance records and bulk actions.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use roster_core::model::{ClearanceAction, ClearanceRecord, ClearanceStatus, Priority};
use roster_core::mutation;

use super::{Context, Targets, non_blank};
use crate::output::render_done;

#[derive(Subcommand, Debug)]
pub enum ClearanceCommand {
    /// Open a clearance for a departing employee.
    Open(OpenArgs),
    /// Approve, remind or escalate the selected clearances.
    Bulk(BulkArgs),
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub employee_id: String,

    #[arg(long)]
    pub employee_name: String,

    #[arg(long, default_value = "")]
    pub department: String,

    #[arg(long, default_value = "")]
    pub position: String,

    #[arg(long, default_value = "")]
    pub manager: String,

    /// Last working day (YYYY-MM-DD).
    #[arg(long)]
    pub lwd: NaiveDate,

    /// Resignation date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub resignation_date: Option<NaiveDate>,

    #[arg(long, default_value_t = Priority::Medium)]
    pub priority: Priority,

    /// Percent complete, 0-100.
    #[arg(long, default_value_t = 0)]
    pub progress: u8,

    #[arg(long)]
    pub notes: Option<String>,
}

impl OpenArgs {
    fn to_record(&self, today: NaiveDate) -> ClearanceRecord {
        ClearanceRecord {
            id: self.id.trim().to_string(),
            employee_id: self.employee_id.trim().to_string(),
            employee_name: self.employee_name.trim().to_string(),
            department: self.department.trim().to_string(),
            position: self.position.trim().to_string(),
            manager: self.manager.trim().to_string(),
            lwd: self.lwd,
            resignation_date: self.resignation_date.unwrap_or(today),
            clearance_status: ClearanceStatus::Pending,
            priority: self.priority,
            notes: non_blank(self.notes.as_ref()),
            created_date: today,
            last_updated: today,
            cleared_by: None,
            clearance_date: None,
            clearance_progress: self.progress,
        }
    }
}

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// approve, reminder or escalate.
    pub action: ClearanceAction,

    #[command(flatten)]
    pub targets: Targets,
}

/// Execute a `roster clearance` subcommand.
///
/// # Errors
///
/// Duplicate IDs, empty selection, unknown IDs, or an approve the lifecycle
/// forbids. A failing batch writes nothing.
pub fn run_clearance(command: &ClearanceCommand, ctx: &Context) -> Result<()> {
    match command {
        ClearanceCommand::Open(args) => {
            let id = args.id.trim();
            ctx.mutate(|console, session| {
                mutation::open_clearance(console, args.to_record(session.today()))
            })?;
            render_done(
                ctx.mode,
                ctx.quiet,
                &serde_json::json!({ "id": id, "clearance_status": ClearanceStatus::Pending }),
                &format!("Opened clearance {id}"),
            )
        }
        ClearanceCommand::Bulk(args) => {
            let outcome = ctx.mutate(|console, session| {
                let selected = args.targets.resolve(&console.clearances)?;
                mutation::apply_clearance_action(console, session, &selected, args.action)
            })?;
            let message = match outcome.action {
                ClearanceAction::Approve => format!("Approved {} clearance(s)", outcome.count),
                ClearanceAction::Reminder => format!("Sent {} reminder(s)", outcome.count),
                ClearanceAction::Escalate => format!("Escalated {} clearance(s)", outcome.count),
            };
            render_done(ctx.mode, ctx.quiet, &outcome, &message)
        }
    }
}
