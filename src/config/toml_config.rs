use crate::adapters::process_solver::SolverCommand;
use crate::config::{DriverConfig, Settings};
use crate::utils::error::{DriverError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub driver: DriverSection,
    pub storage: StorageSection,
    pub solver: SolverSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSection {
    pub working_dir: Option<String>,
    pub model_pattern: Option<String>,
    pub results_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub output_root: Option<String>,
    pub results_dir_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSection {
    pub program: Option<String>,
    pub args: Vec<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DriverError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PEI_SERVICE_FILE_STORAGE})；未設定的變數換成空字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            DriverError::ConfigError {
                message: format!("Invalid substitution pattern: {}", e),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::debug!("Environment variable {} is not set", var_name);
                String::new()
            })
        });

        Ok(result.to_string())
    }

    /// Builds settings from the file, filling gaps with the built-in defaults.
    pub fn into_settings(self) -> Settings {
        let defaults = DriverConfig::default();

        let driver = DriverConfig {
            working_dir: self
                .driver
                .working_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.working_dir),
            output_root: self.storage.output_root.filter(|r| !r.trim().is_empty()),
            model_pattern: self.driver.model_pattern.unwrap_or(defaults.model_pattern),
            results_pattern: self
                .driver
                .results_pattern
                .unwrap_or(defaults.results_pattern),
            results_dir_name: self
                .storage
                .results_dir_name
                .unwrap_or(defaults.results_dir_name),
            solve_options: defaults.solve_options,
        };

        let mut solver = SolverCommand::default();
        if let Some(program) = self.solver.program {
            solver.program = program;
        }
        solver.args = self.solver.args;

        Settings { driver, solver }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_settings().validate()
    }
}
