// Adapters layer: concrete implementations of the domain ports.

pub mod process_solver;

pub use process_solver::{ProcessSolver, SolverCommand};
