pub mod asset;
pub mod clearance;
pub mod init;
pub mod job;
pub mod list;
pub mod procure;
pub mod report;
pub mod rows;
pub mod show;
pub mod stats;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Args;
use roster_core::config::ProjectConfig;
use roster_core::model::ParseEnumError;
use roster_core::mutation::Session;
use roster_core::query::{Queryable, parse_category, parse_choice};
use roster_core::{Console, ConsolePaths, Filter, Selection, Store};

use crate::output::OutputMode;

/// Everything a command handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub mode: OutputMode,
    pub quiet: bool,
}

impl Context {
    pub fn paths(&self) -> ConsolePaths {
        ConsolePaths::new(&self.root)
    }

    pub fn timeout(&self) -> Duration {
        self.config.storage.lock_timeout()
    }

    /// Load the console under a shared lock.
    pub fn read(&self) -> Result<Console> {
        Ok(self.paths().read(self.timeout())?)
    }

    /// Run one mutation against the console under the exclusive lock.
    ///
    /// The clock is read once per command so every record touched by the
    /// command carries the same timestamp.
    pub fn mutate<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut Console, &Session<'_>) -> roster_core::Result<T>,
    {
        let session = Session::new(&self.config, Utc::now());
        Ok(self
            .paths()
            .update(self.timeout(), |console| apply(console, &session))?)
    }
}

/// Listing filter flags shared by `list` and the bulk commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive substring over the searchable fields.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Exact status literal, or "all".
    #[arg(long)]
    pub status: Option<String>,

    /// Exact category literal (department, type, ...), or "all".
    #[arg(long)]
    pub category: Option<String>,

    /// Start of the date range (YYYY-MM-DD). Ignored without --to.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End of the date range (YYYY-MM-DD). Ignored without --from.
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn to_filter<S>(&self) -> std::result::Result<Filter<S>, ParseEnumError>
    where
        S: FromStr<Err = ParseEnumError> + Copy + PartialEq,
    {
        Ok(Filter {
            text: self.search.clone().filter(|s| !s.trim().is_empty()),
            status: parse_choice(self.status.as_deref())?,
            category: parse_category(self.category.as_deref()),
            date_from: self.from,
            date_to: self.to,
        })
    }
}

/// Which records a bulk command acts on.
#[derive(Args, Debug, Clone, Default)]
pub struct Targets {
    /// Record IDs to act on. The filter flags only apply with --all-visible.
    #[arg(
        value_name = "ID",
        conflicts_with_all = ["search", "status", "category", "from", "to"]
    )]
    pub ids: Vec<String>,

    /// Select every record the filter flags leave visible.
    #[arg(long, conflicts_with = "ids")]
    pub all_visible: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

impl Targets {
    /// Resolve the selection against the current store contents.
    pub fn resolve<T>(&self, store: &Store<T>) -> roster_core::Result<Vec<String>>
    where
        T: Queryable,
        T::Status: FromStr<Err = ParseEnumError>,
    {
        if !self.all_visible {
            return Ok(self.ids.clone());
        }
        let filter = self.filter.to_filter::<T::Status>()?;
        let visible = store.visible_ids(&filter);
        let mut selection = Selection::new();
        selection.select_all(visible.iter().cloned());
        Ok(selection.effective(visible.iter().map(String::as_str)))
    }
}

/// Trim a free-text flag, treating blank as absent.
pub fn non_blank(raw: Option<&String>) -> Option<String> {
    raw.map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{FilterArgs, Targets};
    use chrono::NaiveDate;
    use roster_core::Store;
    use roster_core::model::{Asset, AssetStatus, AssetType, Condition};

    fn asset(id: &str, name: &str, status: AssetStatus) -> Asset {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        Asset {
            id: id.to_string(),
            name: name.to_string(),
            kind: AssetType::Hardware,
            category: "Laptop".to_string(),
            serial_number: format!("SN-{id}"),
            model: name.to_string(),
            brand: "Brand".to_string(),
            status,
            condition: Condition::Good,
            purchase_date: day,
            purchase_price: 900,
            warranty: day,
            location: "HQ".to_string(),
            assigned_to: None,
            assigned_date: None,
            job_id: None,
            notes: None,
            last_updated: day,
        }
    }

    #[test]
    fn all_and_blank_flags_mean_no_constraint() {
        let args = FilterArgs {
            search: Some("  ".to_string()),
            status: Some("ALL".to_string()),
            category: Some(String::new()),
            ..FilterArgs::default()
        };
        let filter = args.to_filter::<AssetStatus>().expect("parse");
        assert!(filter.is_unconstrained());
    }

    #[test]
    fn bad_status_is_reported() {
        let args = FilterArgs {
            status: Some("lent".to_string()),
            ..FilterArgs::default()
        };
        let err = args.to_filter::<AssetStatus>().expect_err("not a status");
        assert_eq!(err.expected, "asset status");
    }

    #[test]
    fn all_visible_follows_the_filter() {
        let store = Store::from_records(vec![
            asset("A", "MacBook Air", AssetStatus::Available),
            asset("B", "Dell XPS", AssetStatus::Available),
            asset("C", "MacBook Pro", AssetStatus::Allocated),
        ])
        .expect("unique ids");

        let targets = Targets {
            all_visible: true,
            filter: FilterArgs {
                search: Some("macbook".to_string()),
                status: Some("available".to_string()),
                ..FilterArgs::default()
            },
            ..Targets::default()
        };
        assert_eq!(targets.resolve(&store).expect("resolve"), ["A"]);

        let explicit = Targets {
            ids: vec!["C".to_string(), "B".to_string()],
            ..Targets::default()
        };
        assert_eq!(explicit.resolve(&store).expect("resolve"), ["C", "B"]);
    }
}
