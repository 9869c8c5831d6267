//! Budget calculator: mass, movement and slot consumption.
//!
//! Pure functions over a [`Configuration`] and the fixed tables. They never
//! clamp; inputs are expected to be clamped by the edit layer, and table
//! indices that fall outside their table are reported as
//! [`ConstructionError::InvariantViolation`].

use crate::catalog::{ConflictTags, EquipmentCatalog, Location};
use crate::chassis::{ChassisShape, SpecialMovement, TechBase, WeightClass};
use crate::config::Configuration;
use crate::error::{ConstructionError, Result};
use crate::tables::{self, ArmorTypeId, ManipulatorId};

/// Chassis mass for a weight class and lineage.
#[must_use]
pub const fn chassis_mass(class: WeightClass, tech: TechBase) -> u32 {
    tables::chassis_mass(class, tech)
}

/// Mass of ground movement beyond the shape's free baseline.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] if `ground_mp` is below
/// the baseline or the mass does not fit in a `u32`.
pub fn ground_movement_mass(shape: ChassisShape, class: WeightClass, ground_mp: u32) -> Result<u32> {
    ground_mp
        .checked_sub(shape.baseline_mp())
        .and_then(|extra| extra.checked_mul(tables::GROUND_MP_MASS[class.index()]))
        .ok_or_else(|| ConstructionError::out_of_range("ground MP", ground_mp))
}

/// Mass of the special movement system.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] if the mass does not fit
/// in a `u32`.
pub fn special_movement_mass(kind: SpecialMovement, class: WeightClass, mp: u32) -> Result<u32> {
    mp.checked_mul(tables::SPECIAL_MP_MASS[kind.index()][class.index()])
        .ok_or_else(|| ConstructionError::out_of_range("special MP", mp))
}

/// Mass of the armor. A zero per-point weight marks armor the lineage may
/// not use; that is the validator's concern, so it simply weighs nothing here.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] for an unknown armor type
/// or a mass that does not fit in a `u32`.
pub fn armor_mass(tech: TechBase, armor_type: ArmorTypeId, points: u32) -> Result<u32> {
    points
        .checked_mul(tables::armor(armor_type)?.mass_per_point[tech.index()])
        .ok_or_else(|| ConstructionError::out_of_range("armor points", points))
}

/// Combined mass of both manipulators.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] for an unknown manipulator.
pub fn manipulator_mass(left: ManipulatorId, right: ManipulatorId) -> Result<u32> {
    Ok(tables::manipulator(left)?.mass + tables::manipulator(right)?.mass)
}

/// Mass of every fitted item across all three locations.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] if an ID is not in the
/// catalog or the mass does not fit in a `u32`.
pub fn equipment_mass(config: &Configuration, catalog: &EquipmentCatalog) -> Result<u32> {
    config.selected().try_fold(0u32, |total, id| {
        total
            .checked_add(catalog.get(id)?.mass)
            .ok_or_else(|| ConstructionError::out_of_range("equipment mass", total))
    })
}

/// Mass of one trooper, split by source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MassBreakdown {
    /// Chassis.
    pub chassis: u32,
    /// Ground movement beyond baseline.
    pub ground: u32,
    /// Special movement.
    pub special: u32,
    /// Armor.
    pub armor: u32,
    /// Both manipulators.
    pub manipulators: u32,
    /// Fitted equipment.
    pub equipment: u32,
}

impl MassBreakdown {
    /// Sum of all components, saturating at `u32::MAX`.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.chassis
            .saturating_add(self.ground)
            .saturating_add(self.special)
            .saturating_add(self.armor)
            .saturating_add(self.manipulators)
            .saturating_add(self.equipment)
    }
}

/// Compute every mass component of a configuration.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
pub fn mass_breakdown(config: &Configuration, catalog: &EquipmentCatalog) -> Result<MassBreakdown> {
    Ok(MassBreakdown {
        chassis: chassis_mass(config.weight_class, config.tech),
        ground: ground_movement_mass(config.shape, config.weight_class, config.ground_mp)?,
        special: special_movement_mass(config.special_kind, config.weight_class, config.special_mp)?,
        armor: armor_mass(config.tech, config.armor_type, config.armor_value)?,
        manipulators: manipulator_mass(config.left_manipulator, config.right_manipulator)?,
        equipment: equipment_mass(config, catalog)?,
    })
}

/// Mass of one trooper as built.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
pub fn total_mass(config: &Configuration, catalog: &EquipmentCatalog) -> Result<u32> {
    mass_breakdown(config, catalog).map(|mass| mass.total())
}

/// Special movement after augments: +1 MP per movement augment in the torso.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] if an ID is not in the catalog.
pub fn effective_special_movement(config: &Configuration, catalog: &EquipmentCatalog) -> Result<u32> {
    let mut mp = config.special_mp;
    for &id in config.loadout(Location::Torso) {
        if catalog.get(id)?.conflict.contains(ConflictTags::MOBILITY) {
            mp = mp.saturating_add(1);
        }
    }
    Ok(mp)
}

/// Slots used by the items fitted to one location.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] if an ID is not in the catalog.
pub fn slots_used(config: &Configuration, catalog: &EquipmentCatalog, location: Location) -> Result<u32> {
    config
        .loadout(location)
        .iter()
        .map(|&id| catalog.get(id).map(|def| def.slots))
        .sum()
}

/// Slot consumption and capacity of a configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotUsage {
    /// Slots used in the left arm.
    pub left: u32,
    /// Slots used in the right arm.
    pub right: u32,
    /// Slots used in the torso.
    pub torso: u32,
    /// Slots the armor needs.
    pub armor: u32,
    /// Ceiling of each arm (zero on quads).
    pub limb_capacity: u32,
    /// Ceiling of the torso.
    pub torso_capacity: u32,
}

impl SlotUsage {
    /// Slots used by equipment and armor together.
    #[must_use]
    pub const fn used(&self) -> u32 {
        self.left + self.right + self.torso + self.armor
    }

    /// Combined ceiling of every location.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.torso_capacity + 2 * self.limb_capacity
    }
}

/// Compute slot usage and ceilings.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
pub fn slot_usage(config: &Configuration, catalog: &EquipmentCatalog) -> Result<SlotUsage> {
    let class = config.weight_class.index();
    let (limb_capacity, torso_capacity) = match config.shape {
        ChassisShape::Biped => (tables::BIPED_LIMB_SLOTS[class], tables::BIPED_TORSO_SLOTS[class]),
        ChassisShape::Quad => (0, tables::QUAD_TORSO_SLOTS[class]),
    };
    Ok(SlotUsage {
        left: slots_used(config, catalog, Location::LeftLimb)?,
        right: slots_used(config, catalog, Location::RightLimb)?,
        torso: slots_used(config, catalog, Location::Torso)?,
        armor: tables::armor(config.armor_type)?.slots,
        limb_capacity,
        torso_capacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chassis_mass_tables() {
        assert_eq!(chassis_mass(WeightClass::Minimal, TechBase::Inner), 80);
        assert_eq!(chassis_mass(WeightClass::Assault, TechBase::Outer), 700);
    }

    #[test]
    fn test_ground_movement_mass() {
        assert_eq!(ground_movement_mass(ChassisShape::Biped, WeightClass::Light, 1), Ok(0));
        assert_eq!(ground_movement_mass(ChassisShape::Biped, WeightClass::Light, 3), Ok(60));
        assert_eq!(ground_movement_mass(ChassisShape::Quad, WeightClass::Heavy, 4), Ok(160));
        assert!(ground_movement_mass(ChassisShape::Quad, WeightClass::Heavy, 1).is_err());
    }

    #[test]
    fn test_special_movement_mass() {
        assert_eq!(special_movement_mass(SpecialMovement::Jump, WeightClass::Medium, 3), Ok(150));
        assert_eq!(special_movement_mass(SpecialMovement::Underwater, WeightClass::Minimal, 2), Ok(90));
        assert_eq!(special_movement_mass(SpecialMovement::Vtol, WeightClass::Heavy, 0), Ok(0));
    }

    #[test]
    fn test_oversized_inputs_are_errors() {
        assert!(matches!(
            armor_mass(TechBase::Inner, ArmorTypeId::STANDARD, 100_000_000),
            Err(ConstructionError::InvariantViolation { .. })
        ));
        assert!(special_movement_mass(SpecialMovement::Jump, WeightClass::Assault, u32::MAX).is_err());
        assert!(ground_movement_mass(ChassisShape::Biped, WeightClass::Assault, u32::MAX).is_err());
    }

    #[test]
    fn test_armor_mass() {
        assert_eq!(armor_mass(TechBase::Inner, ArmorTypeId::STANDARD, 6), Ok(300));
        assert_eq!(armor_mass(TechBase::Outer, ArmorTypeId::STANDARD, 6), Ok(150));
        // Not legal for this lineage: weighs nothing, validator rejects it.
        assert_eq!(armor_mass(TechBase::Inner, ArmorTypeId::FIRE_RESISTANT, 6), Ok(0));
        assert!(armor_mass(TechBase::Inner, ArmorTypeId(200), 1).is_err());
    }

    #[test]
    fn test_manipulator_mass() {
        assert_eq!(
            manipulator_mass(ManipulatorId::BATTLE_CLAW, ManipulatorId::HEAVY_BATTLE_VIBRO_CLAW),
            Ok(75)
        );
        assert!(manipulator_mass(ManipulatorId(40), ManipulatorId::NONE).is_err());
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.ground_mp = 2;
        config.special_mp = 2;
        config.armor_value = 5;
        config.left_manipulator = ManipulatorId::BATTLE_CLAW;
        config
            .add_equipment(&catalog, Location::Torso, catalog.id_of("SRM-2").unwrap())
            .unwrap();

        let parts = mass_breakdown(&config, &catalog).unwrap();
        assert_eq!(parts.chassis, 175);
        assert_eq!(parts.ground, 40);
        assert_eq!(parts.special, 100);
        assert_eq!(parts.armor, 250);
        assert_eq!(parts.manipulators, 15);
        assert_eq!(parts.equipment, 90);
        assert_eq!(total_mass(&config, &catalog), Ok(670));
    }

    #[test]
    fn test_effective_special_movement_counts_augments() {
        let catalog = EquipmentCatalog::standard();
        let booster = catalog.id_of("Jump Booster").unwrap();
        let mut config = Configuration::new();
        config.special_mp = 3;
        config.add_equipment(&catalog, Location::Torso, booster).unwrap();
        config.add_equipment(&catalog, Location::Torso, booster).unwrap();
        assert_eq!(effective_special_movement(&config, &catalog), Ok(5));
    }

    #[test]
    fn test_slot_usage() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.armor_type = ArmorTypeId::BASIC_STEALTH;
        config
            .add_equipment(&catalog, Location::Torso, catalog.id_of("Medium Laser").unwrap())
            .unwrap();
        config
            .add_equipment(&catalog, Location::LeftLimb, catalog.id_of("AP Auto-Rifle").unwrap())
            .unwrap();

        let slots = slot_usage(&config, &catalog).unwrap();
        assert_eq!(slots.torso, 3);
        assert_eq!(slots.left, 1);
        assert_eq!(slots.right, 0);
        assert_eq!(slots.armor, 3);
        assert_eq!(slots.used(), 7);
        assert_eq!(slots.capacity(), 10);
    }
}
