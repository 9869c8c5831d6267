//! Proptest strategies for construction testing.
//!
//! Configurations are generated the way a player builds them: a random
//! sequence of [`Edit`]s applied to the default configuration. Edits the
//! engine rejects are skipped, so every generated configuration is
//! well-formed but not necessarily legal.

use armorsmith_core::catalog::{EquipmentCatalog, EquipmentId, Location};
use armorsmith_core::chassis::{ChassisShape, Side, SpecialMovement, TechBase, WeightClass};
use armorsmith_core::config::{Configuration, Edit};
use armorsmith_core::tables::{ArmorTypeId, ManipulatorId, ARMOR_TYPES, MANIPULATORS};
use proptest::prelude::*;

/// Generate a tech base.
pub fn arb_tech() -> impl Strategy<Value = TechBase> {
    prop_oneof![Just(TechBase::Inner), Just(TechBase::Outer)]
}

/// Generate a body plan.
pub fn arb_shape() -> impl Strategy<Value = ChassisShape> {
    prop_oneof![Just(ChassisShape::Biped), Just(ChassisShape::Quad)]
}

/// Generate a weight class.
pub fn arb_weight_class() -> impl Strategy<Value = WeightClass> {
    proptest::sample::select(WeightClass::ALL.to_vec())
}

/// Generate a special movement kind.
pub fn arb_special() -> impl Strategy<Value = SpecialMovement> {
    prop_oneof![
        Just(SpecialMovement::Jump),
        Just(SpecialMovement::Vtol),
        Just(SpecialMovement::Underwater),
    ]
}

/// Generate an armor type index inside the table.
pub fn arb_armor_type() -> impl Strategy<Value = ArmorTypeId> {
    (0..ARMOR_TYPES.len() as u8).prop_map(ArmorTypeId)
}

/// Generate a manipulator index inside the table.
pub fn arb_manipulator() -> impl Strategy<Value = ManipulatorId> {
    (0..MANIPULATORS.len() as u8).prop_map(ManipulatorId)
}

/// Generate a location.
pub fn arb_location() -> impl Strategy<Value = Location> {
    proptest::sample::select(Location::ALL.to_vec())
}

/// Generate an arm.
pub fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Left), Just(Side::Right)]
}

/// Generate a catalog ID valid for a catalog of `len` entries.
pub fn arb_equipment_id(len: usize) -> impl Strategy<Value = EquipmentId> {
    (0..len.max(1) as u16).prop_map(EquipmentId)
}

/// Generate an edit to a scalar setting. Numeric inputs deliberately
/// overshoot their legal ranges to exercise clamping.
pub fn arb_setting_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0u8..10).prop_map(Edit::SetTroopers),
        arb_tech().prop_map(Edit::SetTechBase),
        arb_shape().prop_map(Edit::SetChassis),
        arb_weight_class().prop_map(Edit::SetWeightClass),
        (0u32..8).prop_map(Edit::SetGroundMovement),
        (arb_special(), 0u32..10).prop_map(|(kind, mp)| Edit::SetSpecialMovement { kind, mp }),
        arb_armor_type().prop_map(Edit::SetArmorType),
        (0u32..25).prop_map(Edit::SetArmorValue),
    ]
}

/// Generate an edit to manipulators or fitted equipment.
pub fn arb_loadout_edit(catalog_len: usize) -> impl Strategy<Value = Edit> {
    prop_oneof![
        1 => (arb_side(), arb_manipulator()).prop_map(|(side, id)| Edit::SetManipulator { side, id }),
        3 => (arb_location(), arb_equipment_id(catalog_len))
            .prop_map(|(location, id)| Edit::AddEquipment { location, id }),
        1 => (arb_location(), 0usize..4)
            .prop_map(|(location, index)| Edit::RemoveEquipment { location, index }),
    ]
}

/// Generate one edit.
pub fn arb_edit(catalog_len: usize) -> impl Strategy<Value = Edit> {
    prop_oneof![
        2 => arb_setting_edit(),
        3 => arb_loadout_edit(catalog_len),
    ]
}

/// Generate a sequence of edits.
pub fn arb_edit_sequence(catalog_len: usize, max_len: usize) -> impl Strategy<Value = Vec<Edit>> {
    proptest::collection::vec(arb_edit(catalog_len), 0..max_len)
}

/// Apply edits to a default configuration, skipping rejected ones, and
/// refresh.
///
/// # Panics
///
/// Panics if the refreshed configuration references an index outside the
/// tables, which no sequence of accepted edits can produce.
#[must_use]
pub fn build_from_edits(catalog: &EquipmentCatalog, edits: &[Edit]) -> Configuration {
    let mut config = Configuration::new();
    for edit in edits {
        if let Err(e) = config.apply(catalog, edit) {
            tracing::debug!(?edit, %e, "Skipped rejected edit");
        }
    }
    config
        .refresh(catalog)
        .unwrap_or_else(|e| panic!("accepted edits produced a bad configuration: {e}"));
    config
}

/// Generate a well-formed configuration against the standard catalog.
pub fn arb_configuration() -> impl Strategy<Value = Configuration> {
    let len = EquipmentCatalog::standard().len();
    arb_edit_sequence(len, 24).prop_map(|edits| {
        let catalog = EquipmentCatalog::standard();
        build_from_edits(&catalog, &edits)
    })
}
