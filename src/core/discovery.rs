use crate::utils::error::Result;
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};

/// Pattern for the solver input model.
pub const MODEL_FILE_PATTERN: &str = "*.fmm";

/// Pattern for the solver's response folder inside its results database.
pub const RESULTS_DIR_PATTERN: &str = "*_RDB/response*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    fn accepts(self, path: &Path) -> bool {
        match self {
            EntryKind::File => path.is_file(),
            EntryKind::Directory => path.is_dir(),
        }
    }
}

fn compile_component(component: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(component).literal_separator(true).build()?;
    Ok(glob.compile_matcher())
}

/// 與 shell glob 相同：`*` 不會匹配以 `.` 開頭的名稱
fn is_hidden_for(component: &str, name: &str) -> bool {
    name.starts_with('.') && !component.starts_with('.')
}

/// Finds every entry under `base` matching the `/`-separated glob `pattern`.
///
/// Each pattern component matches exactly one directory level. The result is
/// sorted lexicographically so "first match" is reproducible across
/// filesystems. Unreadable nested directories are skipped; an unreadable
/// `base` is an error.
pub fn find_matches(base: &Path, pattern: &str, kind: EntryKind) -> Result<Vec<PathBuf>> {
    let components: Vec<&str> = pattern.split('/').collect();
    let matchers = components
        .iter()
        .map(|c| compile_component(c))
        .collect::<Result<Vec<_>>>()?;

    let mut frontier = vec![base.to_path_buf()];

    for (depth, (component, matcher)) in components.iter().zip(&matchers).enumerate() {
        let last = depth + 1 == matchers.len();
        let mut next = Vec::new();

        for dir in &frontier {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) if depth == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::debug!("Skipping unreadable directory {}: {}", dir.display(), e);
                    continue;
                }
            };

            for entry in entries {
                let entry = entry?;
                let name = entry.file_name();
                let name_str = name.to_string_lossy();
                if is_hidden_for(component, &name_str) || !matcher.is_match(&name) {
                    continue;
                }

                let path = entry.path();
                let wanted = if last { kind } else { EntryKind::Directory };
                if wanted.accepts(&path) {
                    next.push(path);
                }
            }
        }

        frontier = next;
        if frontier.is_empty() {
            break;
        }
    }

    frontier.sort();
    Ok(frontier)
}

pub fn find_model_files(working_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    find_matches(working_dir, pattern, EntryKind::File)
}

pub fn find_results_dir(working_dir: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    let mut matches = find_matches(working_dir, pattern, EntryKind::Directory)?;
    if matches.len() > 1 {
        tracing::debug!(
            "{} results directories match '{}', using {}",
            matches.len(),
            pattern,
            matches[0].display()
        );
    }
    Ok(if matches.is_empty() {
        None
    } else {
        Some(matches.swap_remove(0))
    })
}
