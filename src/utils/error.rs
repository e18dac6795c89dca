use std::path::PathBuf;
use thiserror::Error;

/// 求解器領域錯誤：找不到模型檔、或求解器回傳非零狀態碼
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("No model file found in {}", dir.display())]
    NoModelFile { dir: PathBuf },

    #[error("solver failed with code {code}")]
    Failed { code: i32 },
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    PatternError(#[from] globset::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to launch solver '{program}': {source}")]
    SolverLaunchError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Domain,
    Filesystem,
    Configuration,
    Solver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DriverError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DriverError::Solver(SolverError::NoModelFile { .. }) => ErrorCategory::Domain,
            DriverError::Solver(SolverError::Failed { .. }) => ErrorCategory::Solver,
            DriverError::SolverLaunchError { .. } => ErrorCategory::Solver,
            DriverError::IoError(_) | DriverError::SerializationError(_) => {
                ErrorCategory::Filesystem
            }
            DriverError::PatternError(_)
            | DriverError::ConfigError { .. }
            | DriverError::ConfigValidationError { .. }
            | DriverError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Domain | ErrorCategory::Solver => ErrorSeverity::High,
            ErrorCategory::Filesystem => ErrorSeverity::Critical,
        }
    }

    /// 每個錯誤都會終止執行，因此所有狀態碼皆非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DriverError::Solver(SolverError::NoModelFile { dir }) => format!(
                "Place exactly one .fmm model file in {} or pass --working-dir",
                dir.display()
            ),
            DriverError::Solver(SolverError::Failed { .. }) => {
                "Inspect the solver log files next to the model; partial results may have been copied"
                    .to_string()
            }
            DriverError::SolverLaunchError { program, .. } => format!(
                "Check that '{}' is installed and on PATH, or set FEDEM_SOLVER",
                program
            ),
            DriverError::IoError(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                "Remove or rename the existing results directory before re-running".to_string()
            }
            DriverError::IoError(_) => {
                "Check permissions and free space of the working and output directories".to_string()
            }
            DriverError::PatternError(_) => "Fix the glob pattern syntax in the configuration".to_string(),
            DriverError::SerializationError(_) => "Report this as a bug".to_string(),
            DriverError::ConfigError { .. }
            | DriverError::ConfigValidationError { .. }
            | DriverError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DriverError::Solver(e) => e.to_string(),
            DriverError::IoError(e) => format!("File system operation failed: {}", e),
            other => other.to_string(),
        }
    }

    /// 取得領域錯誤（若有）
    pub fn as_solver_error(&self) -> Option<&SolverError> {
        match self {
            DriverError::Solver(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DriverError>;
