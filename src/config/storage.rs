use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RESULTS_DIR_NAME: &str = "results";

/// 不分大小寫的平台上統一大小寫與分隔符號，其他平台維持原樣
#[cfg(windows)]
pub fn normalize_case(path: &str) -> PathBuf {
    PathBuf::from(path.replace('/', "\\").to_lowercase())
}

#[cfg(not(windows))]
pub fn normalize_case(path: &str) -> PathBuf {
    PathBuf::from(path)
}

/// Where copied solver results end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputStorage {
    root: PathBuf,
    results_dir_name: String,
}

impl OutputStorage {
    /// Resolves the output root. `None` (or a blank value) means the current
    /// directory; otherwise the path is case-normalized and created with all
    /// of its parents if it does not exist yet.
    pub fn resolve(root: Option<&str>) -> Result<Self> {
        let root = Self::root_for(root);
        if !root.exists() {
            tracing::info!("📁 Creating output directory {}", root.display());
            fs::create_dir_all(&root)?;
        }

        Ok(Self {
            root,
            results_dir_name: DEFAULT_RESULTS_DIR_NAME.to_string(),
        })
    }

    /// The root `resolve` would use, without touching the filesystem.
    pub fn root_for(root: Option<&str>) -> PathBuf {
        root.map(str::trim)
            .filter(|r| !r.is_empty())
            .map(normalize_case)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn with_results_dir_name(mut self, name: impl Into<String>) -> Self {
        self.results_dir_name = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn results_path(&self) -> PathBuf {
        self.root.join(&self.results_dir_name)
    }

    /// Copies `source` into the results directory. Fails with
    /// `AlreadyExists` when the results directory is already there.
    pub fn store_results(&self, source: &Path) -> Result<PathBuf> {
        let destination = self.results_path();
        copy_tree(source, &destination)?;
        Ok(destination)
    }
}

/// 複製整個目錄樹到一個全新的目的地；目的地已存在時回傳錯誤，不做合併
pub fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::create_dir(destination)?;
    copy_dir_contents(source, destination)
}

fn copy_dir_contents(source: &Path, destination: &Path) -> Result<()> {
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = destination.join(entry.file_name());

        // 符號連結一律跟隨，複製其內容
        if from.is_dir() {
            fs::create_dir(&to)?;
            copy_dir_contents(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}
