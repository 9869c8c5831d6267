//! Tests for the shipped design sheets.
//!
//! Every sheet under `assets/designs` must parse, build and pass
//! validation.

use std::path::{Path, PathBuf};

use armorsmith_core::budget;
use armorsmith_core::catalog::EquipmentCatalog;
use armorsmith_tools::sheets::{load_sheet, sheet_paths};
use armorsmith_tools::validate::validate_design_directory;

/// Helper to locate the design directory.
fn designs_dir() -> PathBuf {
    // Try multiple paths (running from workspace root or crate directory)
    let paths = [
        Path::new("crates/armorsmith_tools/assets/designs"),
        Path::new("assets/designs"),
    ];
    for path in &paths {
        if path.exists() {
            return path.to_path_buf();
        }
    }
    panic!("Could not find design directory. Tried: {paths:?}");
}

#[test]
fn test_shipped_designs_are_legal() {
    let catalog = EquipmentCatalog::standard();
    let report = validate_design_directory(&designs_dir(), &catalog).unwrap();
    assert_eq!(report.outcomes.len(), 3);
    for outcome in &report.outcomes {
        assert!(outcome.failure.is_none(), "{outcome}");
    }
}

#[test]
fn test_shipped_design_masses() {
    let catalog = EquipmentCatalog::standard();
    let mut masses: Vec<(String, u32)> = sheet_paths(&designs_dir())
        .unwrap()
        .iter()
        .map(|path| {
            let config = load_sheet(path).unwrap().build(&catalog).unwrap();
            (config.name.clone(), budget::total_mass(&config, &catalog).unwrap())
        })
        .collect();
    masses.sort();
    assert_eq!(
        masses,
        vec![
            ("Grenadiers".to_string(), 685),
            ("Quad Scouts".to_string(), 530),
            ("Strikers".to_string(), 720),
        ]
    );
}
