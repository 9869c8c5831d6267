//! Test fixtures and helpers.
//!
//! Canonical squads built the same way in every crate's tests. Every
//! fixture returns a refreshed configuration.

use armorsmith_core::catalog::{EquipmentCatalog, Location};
use armorsmith_core::chassis::{ChassisShape, SpecialMovement, WeightClass};
use armorsmith_core::config::Configuration;
use armorsmith_core::tables::ManipulatorId;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Design sheet for [`grenadiers`] in RON.
pub const GRENADIERS_SHEET: &str = r#"DesignSheet(
    name: "Grenadiers",
    special: Jump,
    special_mp: 2,
    armor: "Standard",
    armor_value: 5,
    left_manipulator: Some("Battle Claw"),
    right_manipulator: Some("Battle Claw"),
    torso: ["SRM-2", "SRM-2 Ammo"],
)
"#;

/// The built-in catalog.
#[must_use]
pub fn standard_catalog() -> EquipmentCatalog {
    EquipmentCatalog::standard()
}

/// Fit a catalog item by name.
///
/// # Panics
///
/// Panics if the name is unknown or the mount is illegal.
pub fn fit(config: &mut Configuration, catalog: &EquipmentCatalog, location: Location, name: &str) {
    let id = catalog
        .id_of(name)
        .unwrap_or_else(|e| panic!("unknown fixture item {name}: {e}"));
    config
        .add_equipment(catalog, location, id)
        .unwrap_or_else(|e| panic!("cannot fit {name} to {location:?}: {e}"));
}

fn refreshed(mut config: Configuration, catalog: &EquipmentCatalog) -> Configuration {
    config
        .refresh(catalog)
        .unwrap_or_else(|e| panic!("fixture failed to refresh: {e}"));
    config
}

/// Bare Minimal biped. 80 kg, legal.
#[must_use]
pub fn minimal_biped(catalog: &EquipmentCatalog) -> Configuration {
    let mut config = Configuration::new();
    config.name = "Minimal".to_string();
    config.weight_class = WeightClass::Minimal;
    refreshed(config, catalog)
}

/// Inner Medium jump squad with an SRM-2 and battle claws. 685 kg, legal
/// and under the class minimum.
#[must_use]
pub fn grenadiers(catalog: &EquipmentCatalog) -> Configuration {
    let mut config = Configuration::new();
    config.name = "Grenadiers".to_string();
    config.special_kind = SpecialMovement::Jump;
    config.special_mp = 2;
    config.armor_value = 5;
    config.left_manipulator = ManipulatorId::BATTLE_CLAW;
    config.right_manipulator = ManipulatorId::BATTLE_CLAW;
    fit(&mut config, catalog, Location::Torso, "SRM-2");
    fit(&mut config, catalog, Location::Torso, "SRM-2 Ammo");
    refreshed(config, catalog)
}

/// Inner Light quad with a machine gun and ECM. 530 kg, legal.
#[must_use]
pub fn quad_scouts(catalog: &EquipmentCatalog) -> Configuration {
    let mut config = Configuration::new();
    config.name = "Quad Scouts".to_string();
    config.shape = ChassisShape::Quad;
    config.weight_class = WeightClass::Light;
    config.ground_mp = 3;
    config.armor_value = 4;
    fit(&mut config, catalog, Location::Torso, "Machine Gun");
    fit(&mut config, catalog, Location::Torso, "ECM Suite");
    refreshed(config, catalog)
}

/// Medium biped with a pair of magnetic claws. 245 kg, legal.
#[must_use]
pub fn magnetic_pair(catalog: &EquipmentCatalog) -> Configuration {
    let mut config = Configuration::new();
    config.name = "Limpets".to_string();
    config.left_manipulator = ManipulatorId::MAGNETIC_CLAW;
    config.right_manipulator = ManipulatorId::MAGNETIC_CLAW;
    refreshed(config, catalog)
}

/// All legal fixtures.
#[must_use]
pub fn legal_fixtures(catalog: &EquipmentCatalog) -> Vec<Configuration> {
    vec![
        minimal_biped(catalog),
        grenadiers(catalog),
        quad_scouts(catalog),
        magnetic_pair(catalog),
    ]
}

/// Write a value as RON and read it back.
///
/// # Panics
///
/// Panics if either direction fails.
#[must_use]
pub fn ron_round_trip<T: Serialize + DeserializeOwned>(value: &T) -> T {
    let text = ron::ser::to_string(value).unwrap_or_else(|e| panic!("RON write failed: {e}"));
    ron::from_str(&text).unwrap_or_else(|e| panic!("RON read failed: {e}\n{text}"))
}
