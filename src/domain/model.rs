use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 傳給求解器 "solve all" 的兩個旗標，語意由求解器決定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveOptions {
    pub keep_old_results: bool,
    pub use_internal_state: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            keep_old_results: true,
            use_internal_state: true,
        }
    }
}

/// Discovery result, produced before anything is solved or copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPlan {
    pub working_dir: PathBuf,
    pub model_file: PathBuf,
    pub other_model_files: Vec<PathBuf>,
    pub results_source: Option<PathBuf>,
    pub results_destination: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub working_dir: PathBuf,
    pub model_file: PathBuf,
    pub return_code: i32,
    pub results_source: Option<PathBuf>,
    pub results_destination: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn results_copied(&self) -> bool {
        self.results_destination.is_some()
    }
}
