use crate::utils::error::{DriverError, Result};
use globset::Glob;
use std::path::{Component, Path};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DriverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DriverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DriverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 檢查 glob 樣式：不可為空、不可為絕對路徑、語法需正確
pub fn validate_glob_pattern(field_name: &str, pattern: &str) -> Result<()> {
    validate_non_empty_string(field_name, pattern)?;

    if pattern.starts_with('/') || pattern.split('/').any(|c| c.is_empty() || c == "..") {
        return Err(DriverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pattern.to_string(),
            reason: "Pattern must be relative to the working directory".to_string(),
        });
    }

    for component in pattern.split('/') {
        Glob::new(component).map_err(|e| DriverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pattern.to_string(),
            reason: format!("Invalid glob syntax: {}", e.kind()),
        })?;
    }

    Ok(())
}

/// 必須是單一路徑元件（例如 "results"），不能帶有分隔符號
pub fn validate_single_component(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(DriverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a single directory name".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("driver.working_dir", "/data/model").is_ok());
        assert!(validate_path("driver.working_dir", "").is_err());
        assert!(validate_path("driver.working_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_glob_pattern() {
        assert!(validate_glob_pattern("driver.model_pattern", "*.fmm").is_ok());
        assert!(validate_glob_pattern("driver.results_pattern", "*_RDB/response*").is_ok());
        assert!(validate_glob_pattern("driver.model_pattern", "").is_err());
        assert!(validate_glob_pattern("driver.model_pattern", "/abs/*.fmm").is_err());
        assert!(validate_glob_pattern("driver.model_pattern", "../*.fmm").is_err());
        assert!(validate_glob_pattern("driver.model_pattern", "[*.fmm").is_err());
    }

    #[test]
    fn test_validate_single_component() {
        assert!(validate_single_component("storage.results_dir_name", "results").is_ok());
        assert!(validate_single_component("storage.results_dir_name", "a/b").is_err());
        assert!(validate_single_component("storage.results_dir_name", "..").is_err());
        assert!(validate_single_component("storage.results_dir_name", " ").is_err());
    }
}
