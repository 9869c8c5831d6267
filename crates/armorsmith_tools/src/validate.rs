//! Design sheet validation.
//!
//! Every sheet in a directory is loaded, built and checked against the
//! construction rules. One bad sheet does not stop the others.

use std::fmt;
use std::path::{Path, PathBuf};

use armorsmith_core::catalog::EquipmentCatalog;
use armorsmith_core::data::DesignSheet;
use armorsmith_core::validate::{validate, Validity};

use crate::error::{ToolError, ToolResult};
use crate::sheets::{load_sheet, sheet_paths};

/// Result of checking one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOutcome {
    /// Sheet file.
    pub path: PathBuf,
    /// `None` when legal, otherwise why it failed.
    pub failure: Option<String>,
}

impl fmt::Display for SheetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => write!(f, "ok    {}", self.path.display()),
            Some(reason) => write!(f, "FAIL  {}: {reason}", self.path.display()),
        }
    }
}

/// Outcomes for a whole directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// One outcome per sheet, sorted by path.
    pub outcomes: Vec<SheetOutcome>,
}

impl ValidationReport {
    /// Number of failing sheets.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.failure.is_some()).count()
    }

    /// Whether every sheet passed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    /// Convert into an error when any sheet failed.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::SheetsFailed`] if any sheet failed.
    pub fn into_result(self) -> ToolResult<()> {
        if self.is_clean() {
            return Ok(());
        }
        Err(ToolError::SheetsFailed {
            failed: self.failed(),
            total: self.outcomes.len(),
        })
    }
}

/// Build a sheet and check it.
///
/// # Errors
///
/// Returns an error if the sheet names something the catalog or tables
/// do not have.
pub fn validate_sheet(sheet: &DesignSheet, catalog: &EquipmentCatalog) -> ToolResult<Validity> {
    let config = sheet.build(catalog)?;
    Ok(validate(&config, catalog)?)
}

fn check_file(path: &Path, catalog: &EquipmentCatalog) -> Option<String> {
    let sheet = match load_sheet(path) {
        Ok(sheet) => sheet,
        Err(e) => return Some(e.to_string()),
    };
    match validate_sheet(&sheet, catalog) {
        Ok(Validity::Valid) => None,
        Ok(Validity::Invalid(reason)) => Some(reason),
        Err(e) => Some(e.to_string()),
    }
}

/// Validate all design sheets in a directory.
///
/// # Errors
///
/// Returns an error only if the directory itself cannot be read; sheet
/// failures are collected in the report.
pub fn validate_design_directory(
    dir: &Path,
    catalog: &EquipmentCatalog,
) -> ToolResult<ValidationReport> {
    let mut report = ValidationReport::default();
    for path in sheet_paths(dir)? {
        let failure = check_file(&path, catalog);
        if let Some(reason) = &failure {
            tracing::warn!(path = %path.display(), %reason, "Design sheet failed");
        }
        report.outcomes.push(SheetOutcome { path, failure });
    }
    tracing::info!(
        "Checked {} design sheets in {}, {} failed",
        report.outcomes.len(),
        dir.display(),
        report.failed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use armorsmith_test_utils::fixtures::GRENADIERS_SHEET;

    fn write_dir(name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        for (file, contents) in files {
            std::fs::write(dir.join(file), contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_clean_directory() {
        let dir = write_dir(
            "armorsmith_validate_clean",
            &[("grenadiers.ron", GRENADIERS_SHEET), ("notes.txt", "ignored")],
        );
        let report = validate_design_directory(&dir, &EquipmentCatalog::standard()).unwrap();
        assert_eq!(report.outcomes.len(), 1);
        assert!(report.is_clean());
        assert!(report.into_result().is_ok());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_failures_are_collected() {
        let dir = write_dir(
            "armorsmith_validate_failures",
            &[
                ("a_grenadiers.ron", GRENADIERS_SHEET),
                ("b_broken.ron", "DesignSheet("),
                ("c_quad.ron", r#"DesignSheet(name: "Bad Quad", shape: Quad, weight_class: Minimal)"#),
                ("d_unknown.ron", r#"DesignSheet(name: "Lost", torso: ["Railgun"])"#),
            ],
        );
        let report = validate_design_directory(&dir, &EquipmentCatalog::standard()).unwrap();
        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(report.failed(), 3);
        assert_eq!(
            report.outcomes[2].failure.as_deref(),
            Some("Quad chassis cannot be built in the Minimal weight class")
        );
        assert!(matches!(
            report.into_result(),
            Err(ToolError::SheetsFailed { failed: 3, total: 4 })
        ));
        let _ = std::fs::remove_dir_all(dir);
    }
}
