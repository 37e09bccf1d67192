#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error};
use roster_core::config::resolve_config;
use std::env;
use std::io;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "roster: associate lifecycle console",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides FORMAT and the user config).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// The format requested on the command line, if any.
    const fn cli_format(&self) -> Option<OutputMode> {
        if self.json {
            Some(OutputMode::Json)
        } else {
            self.format
        }
    }

    /// Mode used before config is resolved, e.g. for config errors.
    const fn fallback_mode(&self) -> OutputMode {
        match self.cli_format() {
            Some(mode) => mode,
            None => OutputMode::Text,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Console",
        about = "Initialize a roster console",
        long_about = "Create .roster/ with an empty snapshot and a default config.toml.",
        after_help = "EXAMPLES:\n    # Initialize in the current directory\n    roster init\n\n    # Wipe an existing console\n    roster init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Read",
        about = "List one entity collection",
        long_about = "List records of one collection, narrowed by search text, status, category and date range.",
        after_help = "EXAMPLES:\n    # Available hardware\n    roster list asset --status available --category Hardware\n\n    # Clearances with a last working day in March\n    roster list clearance --from 2024-03-01 --to 2024-03-31\n\n    # Emit machine-readable output\n    roster list job --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one record",
        long_about = "Show every field of a single record by ID.",
        after_help = "EXAMPLES:\n    # Show an asset\n    roster show asset AST-LP-001\n\n    # A clearance with its asset recovery counts\n    roster show clearance CLR-001 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show the overview dashboard",
        long_about = "Asset, job, clearance and procurement counts plus per-category utilization.",
        after_help = "EXAMPLES:\n    # Dashboard\n    roster stats\n\n    # Emit machine-readable output\n    roster stats --json"
    )]
    Stats,

    #[command(
        next_help_heading = "Lifecycle",
        about = "Create and approve job requisitions",
        after_help = "EXAMPLES:\n    # Raise a requisition\n    roster job create --title \"Data Analyst\" --hod \"Jane Doe\" --doj 2024-06-01 --description \"BI team\"\n\n    # Approve it\n    roster job approve JOB-2024-1234"
    )]
    Job {
        #[command(subcommand)]
        command: cmd::job::JobCommand,
    },

    #[command(
        next_help_heading = "Lifecycle",
        about = "Register, allocate and return assets",
        after_help = "EXAMPLES:\n    # Allocate two laptops\n    roster asset allocate AST-LP-001 AST-LP-002 --employee-name \"Dana Lee\" --employee-id EMP-099 --job-id JOB-2024-0001\n\n    # Return everything visible for one employee\n    roster asset return --all-visible --search EMP-099 --condition good"
    )]
    Asset {
        #[command(subcommand)]
        command: cmd::asset::AssetCommand,
    },

    #[command(
        next_help_heading = "Lifecycle",
        about = "Open and act on exit clearances",
        after_help = "EXAMPLES:\n    # Approve selected clearances\n    roster clearance bulk approve CLR-001 CLR-003\n\n    # Remind every pending clearance in Finance\n    roster clearance bulk reminder --all-visible --status pending --category Finance"
    )]
    Clearance {
        #[command(subcommand)]
        command: cmd::clearance::ClearanceCommand,
    },

    #[command(
        next_help_heading = "Lifecycle",
        about = "Submit candidates against job requests",
        after_help = "EXAMPLES:\n    # Submit a candidate\n    roster procure submit JOB-2024-1234 --name \"Alex Kim\" --email alex@example.com --phone 555-0100 --address \"1 Main St\" --doj 2024-06-01"
    )]
    Procure {
        #[command(subcommand)]
        command: cmd::procure::ProcureCommand,
    },

    #[command(
        next_help_heading = "Lifecycle",
        about = "Define custom reports",
        after_help = "EXAMPLES:\n    # Save a weekly utilization report\n    roster report create --name \"Weekly utilization\" --type utilization --schedule weekly --recipients ops@example.com"
    )]
    Report {
        #[command(subcommand)]
        command: cmd::report::ReportCommand,
    },

    #[command(
        next_help_heading = "Console",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    roster completions bash\n\n    # Generate zsh completions\n    roster completions zsh"
    )]
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ROSTER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "roster=debug,info"
        } else {
            "roster=info,warn"
        })
    });

    let format = env::var("ROSTER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, mode: &mut OutputMode) -> anyhow::Result<()> {
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "roster", &mut io::stdout());
        return Ok(());
    }

    let root = env::current_dir()?;
    let effective = resolve_config(&root, cli.cli_format().map(OutputMode::as_str))?;
    *mode = OutputMode::from_resolved(&effective.resolved_output);
    debug!(mode = mode.as_str(), root = %root.display(), "resolved config");

    let ctx = cmd::Context {
        root,
        config: effective.project,
        mode: *mode,
        quiet: cli.quiet,
    };

    match &cli.command {
        Commands::Init(args) => cmd::init::run_init(args, &ctx),
        Commands::List(args) => cmd::list::run_list(args, &ctx),
        Commands::Show(args) => cmd::show::run_show(args, &ctx),
        Commands::Stats => cmd::stats::run_stats(&ctx),
        Commands::Job { command } => cmd::job::run_job(command, &ctx),
        Commands::Asset { command } => cmd::asset::run_asset(command, &ctx),
        Commands::Clearance { command } => cmd::clearance::run_clearance(command, &ctx),
        Commands::Procure { command } => cmd::procure::run_procure(command, &ctx),
        Commands::Report { command } => cmd::report::run_report(command, &ctx),
        Commands::Completions { .. } => Ok(()),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let mut mode = cli.fallback_mode();

    match run(&cli, &mut mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            if let Err(render_err) = render_error(mode, &CliError::from(&err)) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["roster", "stats", "--json"]);
        assert_eq!(cli.cli_format(), Some(OutputMode::Json));
        assert_eq!(cli.fallback_mode(), OutputMode::Json);
    }

    #[test]
    fn json_flag_wins_over_format() {
        let cli = Cli::parse_from(["roster", "--format", "pretty", "--json", "stats"]);
        assert_eq!(cli.cli_format(), Some(OutputMode::Json));
    }

    #[test]
    fn default_has_no_cli_format() {
        let cli = Cli::parse_from(["roster", "stats"]);
        assert_eq!(cli.cli_format(), None);
        assert_eq!(cli.fallback_mode(), OutputMode::Text);
    }

    #[test]
    fn quiet_flag_parsed() {
        let cli = Cli::parse_from(["roster", "-q", "init"]);
        assert!(cli.quiet);
    }

    #[test]
    fn entity_accepts_dashed_literals() {
        let cli = Cli::parse_from(["roster", "list", "job-request", "--status", "new"]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.entity, roster_core::model::Entity::JobRequest);
                assert_eq!(args.filter.status.as_deref(), Some("new"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn all_visible_conflicts_with_explicit_ids() {
        let result = Cli::try_parse_from([
            "roster",
            "clearance",
            "bulk",
            "approve",
            "CLR-001",
            "--all-visible",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn filter_flags_conflict_with_explicit_ids() {
        for flag in [
            ["--search", "dana"],
            ["--status", "pending"],
            ["--category", "Finance"],
            ["--from", "2024-03-01"],
        ] {
            let mut args = vec!["roster", "clearance", "bulk", "approve", "CLR-001"];
            args.extend(flag);
            assert!(Cli::try_parse_from(&args).is_err(), "{args:?} should not parse");
        }
        let cli = Cli::try_parse_from([
            "roster", "clearance", "bulk", "approve", "--all-visible", "--status", "pending",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["roster", "init"],
            vec!["roster", "list", "asset"],
            vec!["roster", "show", "asset", "AST-1"],
            vec!["roster", "stats"],
            vec!["roster", "job", "approve", "JOB-2024-0001"],
            vec!["roster", "job", "status", "JOB-2024-0001", "in-progress"],
            vec!["roster", "asset", "return", "ALLOC-1", "--condition", "good"],
            vec!["roster", "clearance", "bulk", "escalate", "--all-visible"],
            vec!["roster", "report", "create", "--name", "x", "--filter", "a=b"],
            vec!["roster", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(result.is_ok(), "Failed to parse: {args:?}: {:?}", result.err());
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
