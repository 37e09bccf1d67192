//! `roster job`: requisition lifecycle.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use roster_core::draft::JobDraft;
use roster_core::model::{JobStatus, Priority};
use roster_core::mutation;
use serde::Serialize;

use super::Context;
use crate::output::render_done;

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// Raise a requisition; it also lands in the procurement inbox.
    Create(CreateArgs),
    /// Approve a requisition awaiting approval.
    Approve {
        /// Job ID.
        id: String,
    },
    /// Move a requisition to another status.
    Status {
        /// Job ID.
        id: String,
        /// Target status (e.g. in-progress, filled, cancelled).
        status: JobStatus,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub department: String,

    /// Head of department raising the requisition.
    #[arg(long)]
    pub hod: String,

    #[arg(long, default_value = "")]
    pub experience: String,

    /// Expected date of joining (YYYY-MM-DD).
    #[arg(long)]
    pub doj: NaiveDate,

    #[arg(long)]
    pub description: String,

    #[arg(long, default_value = "")]
    pub skills: String,

    #[arg(long, default_value_t = Priority::Medium)]
    pub priority: Priority,

    /// Hardware requirement; repeat for more.
    #[arg(long = "hardware", value_name = "ITEM")]
    pub hardware: Vec<String>,

    /// Software requirement; repeat for more.
    #[arg(long = "software", value_name = "ITEM")]
    pub software: Vec<String>,
}

impl CreateArgs {
    fn to_draft(&self) -> JobDraft {
        let mut draft = JobDraft {
            hod: self.hod.clone(),
            department: self.department.clone(),
            title: self.title.clone(),
            experience: self.experience.clone(),
            doj: Some(self.doj),
            description: self.description.clone(),
            skills_required: self.skills.clone(),
            priority: self.priority,
            ..JobDraft::default()
        };
        for item in &self.hardware {
            draft.add_hardware(item);
        }
        for item in &self.software {
            draft.add_software(item);
        }
        draft
    }
}

#[derive(Debug, Serialize)]
struct StatusOutput<'a> {
    id: &'a str,
    previous_status: JobStatus,
    new_status: JobStatus,
}

/// Execute a `roster job` subcommand.
///
/// # Errors
///
/// Invalid draft, unknown job, or a transition the lifecycle forbids.
pub fn run_job(command: &JobCommand, ctx: &Context) -> Result<()> {
    match command {
        JobCommand::Create(args) => {
            let draft = args.to_draft();
            let mut rng = rand::thread_rng();
            let id = ctx.mutate(|console, session| {
                mutation::create_job(console, session, &draft, &mut rng)
            })?;
            render_done(
                ctx.mode,
                ctx.quiet,
                &serde_json::json!({ "id": id, "status": JobStatus::PendingApproval }),
                &format!("Created {id} (Pending Approval)"),
            )
        }
        JobCommand::Approve { id } => {
            let previous =
                ctx.mutate(|console, session| mutation::approve_job(console, session, id))?;
            let out = StatusOutput {
                id,
                previous_status: previous,
                new_status: JobStatus::Approved,
            };
            render_done(ctx.mode, ctx.quiet, &out, &format!("{id}: {previous} → Approved"))
        }
        JobCommand::Status { id, status } => {
            let status = *status;
            let previous = ctx.mutate(|console, session| {
                mutation::set_job_status(console, session, id, status)
            })?;
            let out = StatusOutput {
                id,
                previous_status: previous,
                new_status: status,
            };
            render_done(ctx.mode, ctx.quiet, &out, &format!("{id}: {previous} → {status}"))
        }
    }
}
