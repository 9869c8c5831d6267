//! Design sheet loading.

use std::path::{Path, PathBuf};

use armorsmith_core::data::DesignSheet;

use crate::error::{ToolError, ToolResult};

/// Load a design sheet from a RON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_sheet(path: &Path) -> ToolResult<DesignSheet> {
    let path_str = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path_str.clone(),
        source,
    })?;
    let sheet = DesignSheet::from_ron_str(&contents).map_err(|source| ToolError::Parse {
        path: path_str,
        source,
    })?;
    tracing::debug!(sheet = %sheet.name, path = %path.display(), "Loaded design sheet");
    Ok(sheet)
}

/// List the `.ron` files in a directory, sorted by path.
///
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn sheet_paths(dir: &Path) -> ToolResult<Vec<PathBuf>> {
    if !dir.exists() {
        tracing::warn!("Design directory does not exist: {}", dir.display());
        return Ok(Vec::new());
    }

    let io_error = |source| ToolError::Io {
        path: dir.display().to_string(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = std::env::temp_dir().join("armorsmith_no_such_designs");
        assert!(sheet_paths(&dir).unwrap().is_empty());
    }

    #[test]
    fn test_load_sheet_reports_path() {
        let dir = std::env::temp_dir().join("armorsmith_bad_sheet");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.ron");
        std::fs::write(&path, "DesignSheet(name: ").unwrap();

        let err = load_sheet(&path).unwrap_err();
        assert!(matches!(err, ToolError::Parse { .. }));
        assert!(err.to_string().contains("broken.ron"));

        let _ = std::fs::remove_dir_all(dir);
    }
}
