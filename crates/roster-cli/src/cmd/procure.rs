//! `roster procure`: candidate intake for the procurement inbox.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use roster_core::draft::CandidateDraft;
use roster_core::mutation;

use super::Context;
use crate::output::render_done;

#[derive(Subcommand, Debug)]
pub enum ProcureCommand {
    /// Attach a candidate to a job request and raise provisioning tickets.
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Job request ID (same as the job ID).
    pub request_id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub address: String,

    /// Actual date of joining (YYYY-MM-DD).
    #[arg(long)]
    pub doj: NaiveDate,

    #[arg(long, default_value = "")]
    pub experience: String,

    #[arg(long, default_value = "")]
    pub skills: String,

    #[arg(long, default_value = "")]
    pub previous_company: String,

    #[arg(long, default_value = "")]
    pub expected_salary: String,

    #[arg(long, default_value = "")]
    pub emergency_contact: String,

    #[arg(long, default_value = "")]
    pub emergency_phone: String,

    #[arg(long = "pan", default_value = "")]
    pub pan_number: String,

    #[arg(long = "aadhar", default_value = "")]
    pub aadhar_number: String,

    #[arg(long, default_value = "")]
    pub bank_account: String,

    #[arg(long = "ifsc", default_value = "")]
    pub ifsc_code: String,
}

impl SubmitArgs {
    fn to_draft(&self) -> CandidateDraft {
        CandidateDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            experience: self.experience.clone(),
            skills: self.skills.clone(),
            previous_company: self.previous_company.clone(),
            expected_salary: self.expected_salary.clone(),
            actual_doj: Some(self.doj),
            emergency_contact: self.emergency_contact.clone(),
            emergency_phone: self.emergency_phone.clone(),
            pan_number: self.pan_number.clone(),
            aadhar_number: self.aadhar_number.clone(),
            bank_account: self.bank_account.clone(),
            ifsc_code: self.ifsc_code.clone(),
        }
    }
}

/// Execute a `roster procure` subcommand.
///
/// # Errors
///
/// Invalid candidate details, unknown request, or a request that was
/// already processed.
pub fn run_procure(command: &ProcureCommand, ctx: &Context) -> Result<()> {
    match command {
        ProcureCommand::Submit(args) => {
            let draft = args.to_draft();
            let mut rng = rand::thread_rng();
            let submission = ctx.mutate(|console, session| {
                mutation::submit_candidate(console, session, &args.request_id, &draft, &mut rng)
            })?;
            let message = format!(
                "Submitted {} for {}; {} provisioning ticket(s) raised",
                draft.name.trim(),
                args.request_id,
                submission.ticket_ids.len()
            );
            render_done(ctx.mode, ctx.quiet, &submission, &message)
        }
    }
}
