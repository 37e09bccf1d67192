//! `roster stats`: the overview dashboard.

use std::io::{self, Write};

use anyhow::Result;
use roster_core::stats::Dashboard;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render};

fn render_dashboard(d: &Dashboard, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Assets")?;
    pretty_kv(w, "Total", d.assets.total.to_string())?;
    pretty_kv(w, "Available", d.assets.available.to_string())?;
    pretty_kv(w, "Allocated", d.assets.allocated.to_string())?;
    pretty_kv(w, "Maintenance", d.assets.maintenance.to_string())?;
    pretty_kv(w, "Overdue returns", d.assets.overdue_returns.to_string())?;
    writeln!(w)?;

    pretty_section(w, "Jobs")?;
    pretty_kv(w, "Total", d.jobs.total.to_string())?;
    pretty_kv(w, "Active", d.jobs.active.to_string())?;
    pretty_kv(w, "Pending approval", d.jobs.pending_approval.to_string())?;
    pretty_kv(w, "Candidates", d.jobs.candidates.to_string())?;
    writeln!(w)?;

    pretty_section(w, "Clearance")?;
    pretty_kv(w, "Total", d.clearances.total.to_string())?;
    pretty_kv(w, "Pending", d.clearances.pending.to_string())?;
    pretty_kv(w, "In progress", d.clearances.in_progress.to_string())?;
    pretty_kv(w, "Completed", d.clearances.completed.to_string())?;
    pretty_kv(w, "Overdue", d.clearances.overdue.to_string())?;
    writeln!(w)?;

    pretty_section(w, "Procurement")?;
    pretty_kv(w, "New", d.procurement.new.to_string())?;
    pretty_kv(w, "In review", d.procurement.in_review.to_string())?;
    pretty_kv(w, "Candidate selected", d.procurement.candidate_selected.to_string())?;
    pretty_kv(w, "Processed", d.procurement.processed.to_string())?;

    if !d.utilization.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Utilization by category")?;
        for row in &d.utilization {
            pretty_kv(
                w,
                &row.category,
                format!("{}/{} ({:.1}%)", row.allocated, row.total, row.rate),
            )?;
        }
    }

    writeln!(w)?;
    pretty_section(w, "Trends")?;
    pretty_kv(w, "Asset utilization", format!("{}%", d.asset_utilization_pct))?;
    pretty_kv(w, "Clearance rate", format!("{}%", d.clearance_rate_pct))?;
    pretty_kv(w, "Job fill rate", format!("{}%", d.job_fill_rate_pct))?;
    pretty_kv(w, "Days overdue", d.days_overdue.to_string())
}

/// Execute `roster stats`.
///
/// # Errors
///
/// Missing snapshot or lock timeout.
pub fn run_stats(ctx: &Context) -> Result<()> {
    let console = ctx.read()?;
    let dashboard = Dashboard::compute(&console);
    render(ctx.mode, &dashboard, render_dashboard)
}
