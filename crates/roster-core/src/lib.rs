//! roster-core library.
//!
//! Entity stores for the associate lifecycle (requisitions, candidates,
//! assets, exit clearance, procurement and reporting), the filter engine that
//! drives every listing, multi-select state, validated mutation handlers and
//! dashboard aggregates.
//!
//! # Conventions
//!
//! - **Errors**: library functions return [`error::Result`]; the CLI wraps
//!   them in `anyhow` at the edge.
//! - **Logging**: `tracing` macros; mutations log at `info`, store internals
//!   at `debug`.

pub mod config;
pub mod console;
pub mod draft;
pub mod error;
pub mod ids;
pub mod lock;
pub mod model;
pub mod mutation;
pub mod query;
pub mod selection;
pub mod stats;
pub mod store;
pub mod transition;

pub use console::{Console, ConsolePaths};
pub use error::{ErrorCode, Result, RosterError};
pub use query::{Filter, Queryable};
pub use selection::Selection;
pub use store::{Record, Store};
pub use transition::Lifecycle;
