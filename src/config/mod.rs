pub mod storage;
pub mod toml_config;

use crate::adapters::process_solver::SolverCommand;
use crate::core::discovery::{MODEL_FILE_PATTERN, RESULTS_DIR_PATTERN};
use crate::domain::model::SolveOptions;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storage::DEFAULT_RESULTS_DIR_NAME;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

/// Working directory used when the caller does not pass one.
pub const DEFAULT_WORKING_DIR: &str = "/var/fedem/model";

/// Everything one driver run needs. Environment lookups happen before this
/// value is built, never inside the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    pub working_dir: PathBuf,
    pub output_root: Option<String>,
    pub model_pattern: String,
    pub results_pattern: String,
    pub results_dir_name: String,
    pub solve_options: SolveOptions,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from(DEFAULT_WORKING_DIR),
            output_root: None,
            model_pattern: MODEL_FILE_PATTERN.to_string(),
            results_pattern: RESULTS_DIR_PATTERN.to_string(),
            results_dir_name: DEFAULT_RESULTS_DIR_NAME.to_string(),
            solve_options: SolveOptions::default(),
        }
    }
}

impl DriverConfig {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_output_root(mut self, output_root: Option<String>) -> Self {
        self.output_root = output_root;
        self
    }
}

impl Validate for DriverConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("working_dir", &self.working_dir.to_string_lossy())?;
        if let Some(root) = &self.output_root {
            if !root.trim().is_empty() {
                validation::validate_path("output_root", root)?;
            }
        }
        validation::validate_glob_pattern("model_pattern", &self.model_pattern)?;
        validation::validate_glob_pattern("results_pattern", &self.results_pattern)?;
        validation::validate_single_component("results_dir_name", &self.results_dir_name)?;
        Ok(())
    }
}

/// Driver settings plus the command used to launch the real solver.
#[derive(Debug, Clone)]
pub struct Settings {
    pub driver: DriverConfig,
    pub solver: SolverCommand,
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.driver.validate()?;
        validation::validate_non_empty_string("solver.program", &self.solver.program)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "fedem-driver")]
#[command(about = "Runs the structural solver on a model file and stores its results")]
pub struct CliConfig {
    /// Directory holding the .fmm model (falls back to the current directory)
    #[arg(long)]
    pub working_dir: Option<String>,

    /// Root directory for copied results
    #[arg(long, env = "PEI_SERVICE_FILE_STORAGE")]
    pub output_root: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Solver executable
    #[arg(long, env = "FEDEM_SOLVER")]
    pub solver: Option<String>,

    /// Extra argument passed to the solver (repeatable)
    #[arg(long = "solver-arg", allow_hyphen_values = true)]
    pub solver_args: Vec<String>,

    /// Locate model and results without running the solver
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定檔與命令列參數；命令列優先
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        // 直接執行時以目前目錄為工作目錄
        let working_dir = self
            .working_dir
            .clone()
            .or_else(|| file.driver.working_dir.clone())
            .unwrap_or_else(|| ".".to_string());

        let mut settings = file.into_settings();
        settings.driver.working_dir = PathBuf::from(working_dir);

        if self.output_root.is_some() {
            settings.driver.output_root = self.output_root.clone();
        }
        if let Some(program) = &self.solver {
            settings.solver.program = program.clone();
        }
        settings.solver.args.extend(self.solver_args.iter().cloned());

        Ok(settings)
    }
}
