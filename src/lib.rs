pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{ProcessSolver, SolverCommand};
pub use crate::config::{storage::OutputStorage, DriverConfig, Settings};
pub use crate::core::driver::{resolve_working_dir, run, Driver};
pub use crate::domain::model::{RunPlan, RunReport, SolveOptions};
pub use crate::domain::ports::{Solver, SolverFactory};
pub use crate::utils::error::{DriverError, Result, SolverError};
