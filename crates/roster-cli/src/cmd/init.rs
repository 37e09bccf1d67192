use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::Context;
use crate::output::{pretty_kv, render};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Replace an existing console with an empty one.
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TOML: &str = "[allocation]\n\
    allocated_by = \"Current User\"\n\
    \n\
    [clearance]\n\
    bulk_actor = \"Bulk Process\"\n\
    \n\
    [procurement]\n\
    ticket_due_days = 7\n\
    asset_team = \"Asset Team\"\n\
    it_team = \"IT Team\"\n\
    \n\
    [report]\n\
    created_by = \"Current User\"\n\
    \n\
    [storage]\n\
    lock_timeout_ms = 2000\n";

#[derive(Debug, Serialize)]
struct InitOutput {
    initialized: bool,
    snapshot: String,
    config_written: bool,
}

/// Execute `roster init`. Creates the project skeleton:
///
/// ```text
/// .roster/
///   console.json   (empty snapshot)
///   config.toml    (default project config, only if absent)
/// ```
///
/// Re-running without `--force` leaves an existing console untouched.
///
/// # Errors
///
/// Lock or filesystem failures.
pub fn run_init(args: &InitArgs, ctx: &Context) -> Result<()> {
    let paths = ctx.paths();
    let initialized = paths.init(args.force, ctx.timeout())?;

    let config_path = paths.dir().join("config.toml");
    let config_written = !config_path.exists();
    if config_written {
        std::fs::write(&config_path, CONFIG_TOML)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
    }
    info!(initialized, config_written, "init");

    let output = InitOutput {
        initialized,
        snapshot: paths.snapshot().display().to_string(),
        config_written,
    };
    render(ctx.mode, &output, |out, w| {
        if out.initialized {
            writeln!(w, "✓ Initialized roster console")?;
        } else {
            writeln!(w, "Console already initialized (use --force to reset)")?;
        }
        if !ctx.quiet {
            pretty_kv(w, "snapshot", &out.snapshot)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::CONFIG_TOML;
    use roster_core::config::ProjectConfig;

    #[test]
    fn template_matches_defaults() {
        let parsed: ProjectConfig = toml::from_str(CONFIG_TOML).expect("template parses");
        assert_eq!(parsed, ProjectConfig::default());
    }
}
