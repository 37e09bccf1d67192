//! `roster asset`: inventory, allocation and returns.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use roster_core::draft::{AllocationDraft, ReturnDraft};
use roster_core::model::{Asset, AssetStatus, AssetType, Condition, ReturnCondition};
use roster_core::mutation;
use serde::Serialize;

use super::{Context, Targets, non_blank};
use crate::output::render_done;

#[derive(Subcommand, Debug)]
pub enum AssetCommand {
    /// Register a new asset as Available.
    Add(AddArgs),
    /// Allocate assets to one employee.
    Allocate(AllocateArgs),
    /// Close outstanding allocations and take the assets back.
    Return(ReturnArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long = "type", default_value_t = AssetType::Hardware)]
    pub kind: AssetType,

    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub serial: String,

    #[arg(long, default_value = "")]
    pub model: String,

    #[arg(long, default_value = "")]
    pub brand: String,

    #[arg(long, default_value_t = Condition::New)]
    pub condition: Condition,

    /// Purchase date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub purchase_date: Option<NaiveDate>,

    #[arg(long, default_value_t = 0)]
    pub price: u32,

    /// Warranty end date (YYYY-MM-DD); defaults to the purchase date.
    #[arg(long)]
    pub warranty: Option<NaiveDate>,

    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long)]
    pub notes: Option<String>,
}

impl AddArgs {
    fn to_asset(&self, today: NaiveDate) -> Asset {
        let purchase_date = self.purchase_date.unwrap_or(today);
        Asset {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            kind: self.kind,
            category: self.category.trim().to_string(),
            serial_number: self.serial.trim().to_string(),
            model: self.model.trim().to_string(),
            brand: self.brand.trim().to_string(),
            status: AssetStatus::Available,
            condition: self.condition,
            purchase_date,
            purchase_price: self.price,
            warranty: self.warranty.unwrap_or(purchase_date),
            location: self.location.trim().to_string(),
            assigned_to: None,
            assigned_date: None,
            job_id: None,
            notes: non_blank(self.notes.as_ref()),
            last_updated: today,
        }
    }
}

#[derive(Args, Debug)]
pub struct AllocateArgs {
    #[command(flatten)]
    pub targets: Targets,

    #[arg(long)]
    pub employee_name: String,

    #[arg(long)]
    pub employee_id: String,

    /// Requisition the allocation is for, if any.
    #[arg(long)]
    pub job_id: Option<String>,

    /// Expected return date (YYYY-MM-DD).
    #[arg(long)]
    pub return_date: Option<NaiveDate>,

    /// Hand-over note kept on the allocation record.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReturnArgs {
    /// Allocation IDs, or --all-visible over the allocation listing.
    #[command(flatten)]
    pub targets: Targets,

    #[arg(long, default_value_t = ReturnCondition::Good)]
    pub condition: ReturnCondition,

    /// Required when the condition is Damaged.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct AllocateOutput {
    allocations: Vec<String>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct ReturnOutput {
    returned: usize,
    condition: ReturnCondition,
}

/// Execute a `roster asset` subcommand.
///
/// # Errors
///
/// Empty selection, invalid draft, unknown IDs, or assets the lifecycle does
/// not allow to move. A failing batch writes nothing.
pub fn run_asset(command: &AssetCommand, ctx: &Context) -> Result<()> {
    match command {
        AssetCommand::Add(args) => {
            let id = args.id.trim();
            ctx.mutate(|console, session| {
                mutation::add_asset(console, args.to_asset(session.today()))
            })?;
            render_done(
                ctx.mode,
                ctx.quiet,
                &serde_json::json!({ "id": id, "status": AssetStatus::Available }),
                &format!("Added asset {id}"),
            )
        }
        AssetCommand::Allocate(args) => {
            let draft = AllocationDraft {
                employee_name: args.employee_name.clone(),
                employee_id: args.employee_id.clone(),
                job_id: non_blank(args.job_id.as_ref()),
                expected_return_date: args.return_date,
                notes: non_blank(args.notes.as_ref()),
            };
            let allocations = ctx.mutate(|console, session| {
                let selected = args.targets.resolve(&console.assets)?;
                mutation::allocate_assets(console, session, &selected, &draft)
            })?;
            let out = AllocateOutput {
                count: allocations.len(),
                allocations,
            };
            let message = format!(
                "Allocated {} asset(s) to {} ({})",
                out.count,
                args.employee_name.trim(),
                args.employee_id.trim()
            );
            render_done(ctx.mode, ctx.quiet, &out, &message)
        }
        AssetCommand::Return(args) => {
            let draft = ReturnDraft {
                condition: args.condition,
                notes: non_blank(args.notes.as_ref()),
            };
            let returned = ctx.mutate(|console, session| {
                let selected = args.targets.resolve(&console.allocations)?;
                mutation::return_assets(console, session, &selected, &draft)
            })?;
            let out = ReturnOutput {
                returned,
                condition: args.condition,
            };
            let message = format!(
                "Returned {returned} allocation(s) in {} condition",
                args.condition
            );
            render_done(ctx.mode, ctx.quiet, &out, &message)
        }
    }
}
