use crate::config::storage::OutputStorage;
use crate::config::DriverConfig;
use crate::core::discovery;
use crate::domain::model::{RunPlan, RunReport};
use crate::domain::ports::{Solver, SolverFactory};
use crate::utils::error::{Result, SolverError};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Returns `candidate` if it is an existing directory, otherwise the
/// process's current directory.
pub fn resolve_working_dir(candidate: &Path) -> PathBuf {
    if candidate.is_dir() {
        return candidate.to_path_buf();
    }

    let fallback = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    tracing::warn!(
        "⚠️ Working directory {} does not exist, using {}",
        candidate.display(),
        fallback.display()
    );
    fallback
}

pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// 找出模型檔；多個時依字典序取第一個
    fn locate_model(&self, working_dir: &Path) -> Result<(PathBuf, Vec<PathBuf>)> {
        let mut models = discovery::find_model_files(working_dir, &self.config.model_pattern)?;
        if models.is_empty() {
            return Err(SolverError::NoModelFile {
                dir: working_dir.to_path_buf(),
            }
            .into());
        }

        let model = std::path::absolute(models.remove(0))?;
        if !models.is_empty() {
            tracing::warn!(
                "⚠️ {} model files found, using {}",
                models.len() + 1,
                model.display()
            );
        }
        Ok((model, models))
    }

    fn output_storage(&self) -> Result<OutputStorage> {
        Ok(OutputStorage::resolve(self.config.output_root.as_deref())?
            .with_results_dir_name(self.config.results_dir_name.clone()))
    }

    /// Discovers what a run would use without creating, solving or copying
    /// anything.
    pub fn plan(&self) -> Result<RunPlan> {
        let working_dir = resolve_working_dir(&self.config.working_dir);
        let (model_file, other_model_files) = self.locate_model(&working_dir)?;
        let results_source =
            discovery::find_results_dir(&working_dir, &self.config.results_pattern)?;

        let root = OutputStorage::root_for(self.config.output_root.as_deref());

        Ok(RunPlan {
            working_dir,
            model_file,
            other_model_files,
            results_source,
            results_destination: root.join(&self.config.results_dir_name),
        })
    }

    /// Runs the solver once and stores its results.
    ///
    /// The solver is only constructed after a model file was found. Results
    /// are copied before the return code is checked, so a failed solve can
    /// still leave partial results in the output directory.
    pub fn run<F: SolverFactory>(&self, factory: &F) -> Result<RunReport> {
        let started_at = Utc::now();
        let working_dir = resolve_working_dir(&self.config.working_dir);
        tracing::info!("📂 Working directory: {}", working_dir.display());

        let (model_file, _) = self.locate_model(&working_dir)?;
        tracing::info!("🔍 Model file: {}", model_file.display());

        let storage = self.output_storage()?;

        let mut solver = factory.create();
        tracing::info!("🚀 Solving all stages of {}", model_file.display());
        let timer = Instant::now();
        let return_code = solver.solve_all(&model_file, self.config.solve_options)?;
        tracing::info!(
            "Solver finished with code {} after {:?}",
            return_code,
            timer.elapsed()
        );

        let results_source =
            discovery::find_results_dir(&working_dir, &self.config.results_pattern)?;
        let results_destination = match &results_source {
            Some(source) => {
                let destination = storage.store_results(source)?;
                tracing::info!(
                    "📁 Copied {} to {}",
                    source.display(),
                    destination.display()
                );
                Some(destination)
            }
            None => {
                tracing::info!(
                    "No directory matching '{}' found, nothing to copy",
                    self.config.results_pattern
                );
                None
            }
        };

        if return_code != 0 {
            return Err(SolverError::Failed { code: return_code }.into());
        }

        Ok(RunReport {
            working_dir,
            model_file,
            return_code,
            results_source,
            results_destination,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Runs the driver with the default configuration rooted at `working_dir`.
pub fn run<F: SolverFactory>(
    working_dir: impl Into<PathBuf>,
    output_root: Option<String>,
    factory: &F,
) -> Result<RunReport> {
    Driver::new(DriverConfig::new(working_dir).with_output_root(output_root)).run(factory)
}
