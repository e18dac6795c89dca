use crate::domain::model::SolveOptions;
use crate::utils::error::Result;
use std::path::Path;

/// Handle to the external solver engine.
pub trait Solver {
    /// Runs every solver stage on `model_file` and returns its status code,
    /// where zero means success.
    fn solve_all(&mut self, model_file: &Path, options: SolveOptions) -> Result<i32>;
}

/// Builds solver handles. The driver only calls this once a model file has
/// been found.
pub trait SolverFactory {
    type Solver: Solver;

    fn create(&self) -> Self::Solver;
}

impl<S, F> SolverFactory for F
where
    S: Solver,
    F: Fn() -> S,
{
    type Solver = S;

    fn create(&self) -> S {
        self()
    }
}
