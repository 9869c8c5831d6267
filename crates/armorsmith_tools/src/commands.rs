//! Implementations behind the CLI subcommands.
//!
//! Each command returns its output as text so it can be tested without
//! capturing stdout.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use armorsmith_core::catalog::{EquipmentCatalog, Location};
use armorsmith_core::chassis::TechBase;
use armorsmith_core::collaborators::{FileUnitStore, PlayerId, StaticRoster, UnitStore};
use armorsmith_core::error::ConstructionError;
use armorsmith_core::export::UnitRecord;
use armorsmith_core::session::ConstructionSession;

use crate::error::{ToolError, ToolResult};
use crate::sheets::load_sheet;

/// List catalog entries, optionally restricted to a lineage and location.
#[must_use]
pub fn catalog_listing(
    catalog: &EquipmentCatalog,
    tech: Option<TechBase>,
    location: Option<Location>,
) -> String {
    let mut out = format!(
        "{:<26} {:<22} {:>6} {:>5} {:>8}\n",
        "Name", "Mount", "Mass", "Slots", "Cost"
    );
    let entries = catalog.iter().filter(|(_, def)| {
        tech.map_or(true, |t| def.tech.allows(t)) && location.map_or(true, |l| def.mount.allows(l))
    });
    for (_, def) in entries {
        let _ = writeln!(
            out,
            "{:<26} {:<22} {:>3} kg {:>5} {:>8}",
            def.name, def.mount_id, def.mass, def.slots, def.cost
        );
    }
    out
}

/// Build a design sheet and render its preview.
///
/// # Errors
///
/// Returns an error if the sheet cannot be loaded or built.
pub fn preview_sheet(path: &Path, catalog: &EquipmentCatalog) -> ToolResult<String> {
    let sheet = load_sheet(path)?;
    let config = sheet.build(catalog)?;
    let session = ConstructionSession::from_config(catalog, config)?;
    Ok(session.preview()?.to_string())
}

/// Load a roster from RON: a map of player names to numeric IDs.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_roster(path: &Path) -> ToolResult<StaticRoster> {
    let path_str = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path_str.clone(),
        source,
    })?;
    let players: HashMap<String, u32> =
        ron::from_str(&contents).map_err(|source| ToolError::Parse {
            path: path_str,
            source,
        })?;
    Ok(players
        .into_iter()
        .fold(StaticRoster::new(), |roster, (name, id)| {
            roster.with_player(name, PlayerId::new(id))
        }))
}

/// Commit a design sheet and save the record into `out`.
///
/// The record is saved under the squad name, or under the sheet's file stem
/// when the squad is unnamed.
///
/// # Errors
///
/// Returns an error if the sheet is illegal, the owner is unknown, or the
/// record cannot be saved.
pub fn commit_sheet(
    path: &Path,
    out: &Path,
    owner: Option<(&StaticRoster, &str)>,
    catalog: &EquipmentCatalog,
) -> ToolResult<UnitRecord> {
    let sheet = load_sheet(path)?;
    let mut session = ConstructionSession::from_config(catalog, sheet.build(catalog)?)?;
    if let Some((roster, name)) = owner {
        session = session.with_owner(roster, name)?;
    }
    let record = session.commit()?;
    let key = if record.name.trim().is_empty() {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| ConstructionError::NotFound(format!("name for '{}'", path.display())))?
    } else {
        record.name.clone()
    };
    let store = FileUnitStore::new(out);
    store.save(&record, &key)?;
    tracing::info!(unit = %key, path = %store.path_for(&key).display(), "Saved unit");
    Ok(record)
}

/// Load a saved record and describe it.
///
/// # Errors
///
/// Returns an error if the record cannot be loaded.
pub fn show_record(dir: &Path, name: &str) -> ToolResult<String> {
    let record = FileUnitStore::new(dir).load(name)?;
    Ok(describe_record(&record))
}

/// Human-readable summary of a unit record.
#[must_use]
pub fn describe_record(record: &UnitRecord) -> String {
    let mut out = format!("{} ({} troopers)\n", record.name, record.troopers);
    if let Some(owner) = record.owner {
        let _ = writeln!(out, "Owner: player {}", owner.0);
    }
    let _ = writeln!(
        out,
        "Chassis: {} {}, {} class, {} kg",
        record.tech.display_name(),
        record.shape.display_name(),
        record.weight_class.display_name(),
        record.mass
    );
    let _ = writeln!(
        out,
        "Movement: ground {}, {} {}",
        record.ground_mp,
        record.special_kind.display_name(),
        record.effective_special_mp
    );
    let _ = writeln!(out, "Armor: {} x{}", record.armor_name, record.armor_value);
    for system in record.equipment.iter().chain(&record.injected) {
        let _ = writeln!(out, "  {:<10} {}", system.location.display_name(), system.mount_id);
    }
    let _ = writeln!(
        out,
        "Score: {} per trooper, {} per squad",
        record.per_unit_score, record.squad_score
    );
    let _ = write!(
        out,
        "Cost: {} per trooper, {} per squad",
        record.per_unit_cost, record.squad_cost
    );
    out
}
