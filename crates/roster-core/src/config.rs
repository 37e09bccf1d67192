use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

/// Project settings from `.roster/config.toml`. Every key has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub clearance: ClearanceConfig,
    #[serde(default)]
    pub procurement: ProcurementConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Recorded as `allocated_by` on new allocations.
    #[serde(default = "default_actor")]
    pub allocated_by: String,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            allocated_by: default_actor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearanceConfig {
    /// Recorded as `cleared_by` when clearances are approved in bulk.
    #[serde(default = "default_bulk_actor")]
    pub bulk_actor: String,
}

impl Default for ClearanceConfig {
    fn default() -> Self {
        Self {
            bulk_actor: default_bulk_actor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcurementConfig {
    /// Days from submission until generated tickets are due.
    #[serde(default = "default_ticket_due_days")]
    pub ticket_due_days: u32,
    #[serde(default = "default_asset_team")]
    pub asset_team: String,
    #[serde(default = "default_it_team")]
    pub it_team: String,
}

impl Default for ProcurementConfig {
    fn default() -> Self {
        Self {
            ticket_due_days: default_ticket_due_days(),
            asset_team: default_asset_team(),
            it_team: default_it_team(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Recorded as `created_by` on saved reports.
    #[serde(default = "default_actor")]
    pub created_by: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            created_by: default_actor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl StorageConfig {
    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

/// Per-user settings from the platform config dir (`roster/config.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

/// Load `.roster/config.toml` under `project_root`, or defaults if absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".roster/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the user config, or defaults when there is no config dir or file.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("roster/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Merge project and user config and pick the output mode.
///
/// `cli_format` is the value of `--format` (or `"json"` for `--json`).
///
/// # Errors
///
/// Propagates config load failures.
pub fn resolve_config(project_root: &Path, cli_format: Option<&str>) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_format, user.output.as_deref(), env_format.as_deref());

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(
    cli_format: Option<&str>,
    user_output: Option<&str>,
    env_format: Option<&str>,
) -> String {
    let chosen = cli_format
        .and_then(normalize_output_mode)
        .or_else(|| env_format.and_then(normalize_output_mode))
        .or_else(|| user_output.and_then(normalize_output_mode));

    match chosen {
        Some(mode) => mode.to_string(),
        None if std::io::stdout().is_terminal() => "pretty".to_string(),
        None => "text".to_string(),
    }
}

fn default_actor() -> String {
    "Current User".to_string()
}

fn default_bulk_actor() -> String {
    "Bulk Process".to_string()
}

const fn default_ticket_due_days() -> u32 {
    7
}

fn default_asset_team() -> String {
    "Asset Team".to_string()
}

fn default_it_team() -> String {
    "IT Team".to_string()
}

const fn default_lock_timeout_ms() -> u64 {
    2_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.allocation.allocated_by, "Current User");
        assert_eq!(cfg.clearance.bulk_actor, "Bulk Process");
        assert_eq!(cfg.procurement.ticket_due_days, 7);
        assert_eq!(cfg.procurement.asset_team, "Asset Team");
        assert_eq!(cfg.procurement.it_team, "IT Team");
        assert_eq!(cfg.report.created_by, "Current User");
        assert_eq!(cfg.storage.lock_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn partial_project_config_keeps_other_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join(".roster")).expect("create .roster");
        std::fs::write(
            root.path().join(".roster/config.toml"),
            "[procurement]\nticket_due_days = 3\n\n[clearance]\nbulk_actor = \"HR Ops\"\n",
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.procurement.ticket_due_days, 3);
        assert_eq!(cfg.procurement.it_team, "IT Team");
        assert_eq!(cfg.clearance.bulk_actor, "HR Ops");
        assert_eq!(cfg.allocation.allocated_by, "Current User");
    }

    #[test]
    fn malformed_project_config_is_an_error() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join(".roster")).expect("create .roster");
        std::fs::write(root.path().join(".roster/config.toml"), "[storage\n").expect("write");

        let err = load_project_config(root.path()).expect_err("parse must fail");
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn cli_format_overrides_env_and_config() {
        let output = resolve_output(Some("json"), Some("pretty"), Some("text"));
        assert_eq!(output, "json");
    }

    #[test]
    fn env_beats_user_config() {
        assert_eq!(resolve_output(None, Some("json"), Some("text")), "text");
        assert_eq!(resolve_output(None, Some("json"), Some("bogus")), "json");
    }

    #[test]
    fn legacy_aliases_are_normalized() {
        assert_eq!(resolve_output(None, Some("table"), Some("human")), "pretty");
        assert_eq!(resolve_output(None, Some("human"), Some("table")), "text");
    }

    #[test]
    fn user_config_parses_output() {
        let cfg: UserConfig = toml::from_str("output = \"json\"\n").expect("parse");
        assert_eq!(cfg.output.as_deref(), Some("json"));
    }
}
