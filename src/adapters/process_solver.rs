use crate::domain::model::SolveOptions;
use crate::domain::ports::Solver;
use crate::utils::error::{DriverError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::{Command, ExitStatus};

pub const DEFAULT_SOLVER_PROGRAM: &str = "fedem";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for SolverCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_SOLVER_PROGRAM.to_string(),
            args: Vec::new(),
        }
    }
}

/// Runs the simulation application in batch mode
/// (`<program> -f <model> -solve all`) and blocks until it exits.
///
/// Batch mode has no switches matching [`SolveOptions`], so the options are
/// only logged. Solvers embedding the engine directly can honor them.
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    command: SolverCommand,
}

impl ProcessSolver {
    pub fn new(command: SolverCommand) -> Self {
        Self { command }
    }

    fn build_command(&self, model_file: &Path) -> Command {
        let mut cmd = Command::new(&self.command.program);
        cmd.arg("-f")
            .arg(model_file)
            .arg("-solve")
            .arg("all")
            .args(&self.command.args);

        // 求解器會在模型旁邊建立 *_RDB 目錄
        if let Some(dir) = model_file.parent().filter(|d| !d.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl Solver for ProcessSolver {
    fn solve_all(&mut self, model_file: &Path, options: SolveOptions) -> Result<i32> {
        let mut cmd = self.build_command(model_file);
        tracing::debug!("Launching solver: {:?} ({:?})", cmd, options);

        let status = cmd
            .status()
            .map_err(|source| DriverError::SolverLaunchError {
                program: self.command.program.clone(),
                source,
            })?;

        Ok(status_code(status))
    }
}

/// 以訊號結束時回傳負的訊號編號
#[cfg(unix)]
fn status_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|sig| -sig))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn status_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
