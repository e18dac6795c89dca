pub mod discovery;
pub mod driver;

pub use crate::domain::model::{RunPlan, RunReport, SolveOptions};
pub use crate::domain::ports::{Solver, SolverFactory};
pub use crate::utils::error::Result;
