//! Property tests over arbitrary well-formed configurations.

use armorsmith_core::budget;
use armorsmith_core::catalog::{ConflictTags, EquipmentCatalog, Location};
use armorsmith_core::export::export;
use armorsmith_core::preview::preview;
use armorsmith_core::scoring;
use armorsmith_core::validate::validate;
use armorsmith_test_utils::fixtures::ron_round_trip;
use armorsmith_test_utils::repeatability::{verify_idempotent, verify_repeatable};
use armorsmith_test_utils::strategies::{
    arb_configuration, arb_edit_sequence, arb_equipment_id, build_from_edits,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Total mass is the sum of its independent parts.
    #[test]
    fn prop_mass_is_additive(config in arb_configuration()) {
        let catalog = EquipmentCatalog::standard();
        let total = budget::chassis_mass(config.weight_class, config.tech)
            + budget::ground_movement_mass(config.shape, config.weight_class, config.ground_mp).unwrap()
            + budget::special_movement_mass(config.special_kind, config.weight_class, config.special_mp).unwrap()
            + budget::armor_mass(config.tech, config.armor_type, config.armor_value).unwrap()
            + budget::manipulator_mass(config.left_manipulator, config.right_manipulator).unwrap()
            + budget::equipment_mass(&config, &catalog).unwrap();
        prop_assert_eq!(budget::total_mass(&config, &catalog).unwrap(), total);
        prop_assert_eq!(config.derived().current_mass, total);
    }

    /// Adding then removing the newest item restores the conflict mask.
    #[test]
    fn prop_conflicts_restored_after_removal(
        config in arb_configuration(),
        id in arb_equipment_id(EquipmentCatalog::standard().len()),
    ) {
        let catalog = EquipmentCatalog::standard();
        let before = config.conflicts();
        let mut edited = config.clone();
        if edited.add_equipment(&catalog, Location::Torso, id).is_ok() {
            let newest = edited.loadout(Location::Torso).len() - 1;
            prop_assert_eq!(edited.remove_equipment(&catalog, Location::Torso, newest).unwrap(), id);
            prop_assert_eq!(edited.conflicts(), before);
        }
    }

    /// The conflict mask is the union of the fitted items' tags.
    #[test]
    fn prop_conflicts_match_fitted_items(config in arb_configuration()) {
        let catalog = EquipmentCatalog::standard();
        let mut expected = ConflictTags::NONE;
        for location in Location::ALL {
            for def in config.fitted(&catalog, location).unwrap() {
                expected |= def.conflict;
            }
        }
        prop_assert_eq!(config.conflicts(), expected);
    }

    /// Validation is deterministic and idempotent.
    #[test]
    fn prop_validate_is_idempotent(config in arb_configuration()) {
        let catalog = EquipmentCatalog::standard();
        let mut state = config;
        let result = verify_idempotent(&mut state, 3, |c| {
            c.refresh(&catalog).unwrap();
            validate(c, &catalog).unwrap()
        });
        prop_assert!(result.is_repeatable());
    }

    /// The same edits always produce the same preview.
    #[test]
    fn prop_preview_is_repeatable(edits in arb_edit_sequence(EquipmentCatalog::standard().len(), 16)) {
        let catalog = EquipmentCatalog::standard();
        let result = verify_repeatable(
            2,
            || build_from_edits(&catalog, &edits),
            |c| preview(c, &catalog).unwrap().to_string(),
        );
        prop_assert!(result.is_repeatable());
    }

    /// Export loses nothing: restoring a record and re-exporting it gives
    /// the same record, mass, price and score.
    #[test]
    fn prop_export_round_trip(config in arb_configuration()) {
        let catalog = EquipmentCatalog::standard();
        let record = export(&config, &catalog).unwrap();
        let restored = record.restore(&catalog).unwrap();

        prop_assert_eq!(&restored, &config);
        prop_assert_eq!(budget::total_mass(&restored, &catalog).unwrap(), record.mass);
        let scores = scoring::score(&restored, &catalog).unwrap();
        prop_assert_eq!(scores.per_unit_cost, record.per_unit_cost);
        prop_assert_eq!(scores.squad_score, record.squad_score);
        prop_assert_eq!(export(&restored, &catalog).unwrap(), record.clone());

        prop_assert_eq!(ron_round_trip(&record), record.clone());
        let bytes = record.to_bytes().unwrap();
        prop_assert_eq!(armorsmith_core::export::UnitRecord::from_bytes(&bytes).unwrap(), record);
    }

    /// Squad totals scale with the trooper count.
    #[test]
    fn prop_squad_totals_scale(config in arb_configuration()) {
        let catalog = EquipmentCatalog::standard();
        let scores = scoring::score(&config, &catalog).unwrap();
        let troopers = u32::from(config.troopers);
        prop_assert_eq!(scores.squad_score, scores.per_unit_score * troopers);
        prop_assert_eq!(scores.squad_cost, scores.per_unit_cost * u64::from(troopers));
    }
}
