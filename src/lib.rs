//! sched-analyzer option resolution.
//!
//! Turns a `sched-analyzer` command line into a [`Configuration`] describing
//! which scheduler telemetry to collect and where the perfetto trace goes.
//! Collecting the data and writing the trace are left to the consumer of
//! that value.
//!
//! # Modules
//!
//! - [`schema`] - table of recognized flags
//! - [`parse`] - argument validators (sizes, pids, task names)
//! - [`implication`] - which categories each event flag turns on
//! - [`resolver`] - drives clap and the above into a [`Configuration`]
//!
//! # Example
//!
//! ```
//! use sched_analyzer::resolve;
//!
//! let config = resolve(["sched-analyzer", "--app", "--util_est", "--max_size", "0x400"])
//!     .expect("valid command line");
//! assert!(config.is_app());
//! assert!(config.toggles.util_est_cpu() && config.toggles.util_est_task());
//! assert_eq!(config.max_size, 1024 * 1024);
//! ```

pub mod config;
pub mod error;
pub mod implication;
pub mod parse;
pub mod resolver;
pub mod schema;
pub mod toggles;

pub use config::{Configuration, EmissionMode, TaskComm, TASK_COMM_LEN};
pub use error::ResolveError;
pub use resolver::{command, resolve, Resolver};
pub use schema::{OptionId, OptionSpec, OPTIONS};
pub use toggles::{Toggle, Toggles};
