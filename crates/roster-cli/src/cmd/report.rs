//! `roster report`: custom report definitions.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use roster_core::draft::CustomReportDraft;
use roster_core::model::{ReportFormat, ReportStatus, ReportType};
use roster_core::mutation;

use super::{Context, non_blank};
use crate::output::render_done;

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Save a custom report definition as a draft.
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Asset History, Utilization, Cost Analysis, Compliance or Custom Query.
    #[arg(long = "type")]
    pub kind: Option<ReportType>,

    /// Export format: PDF, Excel or CSV.
    #[arg(long = "export", id = "export", value_name = "FORMAT", default_value_t = ReportFormat::Pdf)]
    pub format: ReportFormat,

    /// Free-form schedule, e.g. "weekly".
    #[arg(long)]
    pub schedule: Option<String>,

    /// Comma-separated e-mail addresses.
    #[arg(long, default_value = "")]
    pub recipients: String,

    /// Saved filter as KEY=VALUE; repeat for more.
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

fn parse_filters(raw: &[String]) -> Result<BTreeMap<String, String>> {
    raw.iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("filter '{pair}' must look like KEY=VALUE"))?;
            Ok((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Execute a `roster report` subcommand.
///
/// # Errors
///
/// Malformed filters, an invalid draft, or an ID collision.
pub fn run_report(command: &ReportCommand, ctx: &Context) -> Result<()> {
    match command {
        ReportCommand::Create(args) => {
            let draft = CustomReportDraft {
                name: args.name.clone(),
                description: args.description.clone(),
                kind: args.kind,
                filters: parse_filters(&args.filters)?,
                schedule: non_blank(args.schedule.as_ref()),
                format: args.format,
                recipients: args.recipients.clone(),
            };
            let id = ctx.mutate(|console, session| {
                mutation::create_custom_report(console, session, &draft)
            })?;
            render_done(
                ctx.mode,
                ctx.quiet,
                &serde_json::json!({
                    "id": id,
                    "status": ReportStatus::Draft,
                    "recipients": draft.recipient_list(),
                }),
                &format!("Saved report {id} as Draft"),
            )
        }
    }
}
