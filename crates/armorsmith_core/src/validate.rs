//! Legality validator.
//!
//! Checks run in a fixed order and stop at the first failure, so a
//! configuration only ever reports one reason at a time.

use crate::budget::{self, SlotUsage};
use crate::catalog::{EquipmentCatalog, InternalType, Location};
use crate::chassis::{ChassisShape, SpecialMovement, WeightClass};
use crate::config::Configuration;
use crate::error::Result;
use crate::tables::{self, ManipulatorId, MANIPULATORS};

/// Most weapons a quad torso may carry.
pub const QUAD_TORSO_WEAPONS: u32 = 4;

/// Most anti-unit weapons in a biped torso.
pub const BIPED_TORSO_ANTI_UNIT: u32 = 2;

/// Most anti-personnel weapons in a biped torso.
pub const BIPED_TORSO_ANTI_PERSONNEL: u32 = 2;

/// Most anti-unit weapons in each biped arm.
pub const BIPED_LIMB_ANTI_UNIT: u32 = 1;

/// Most weapons of any kind in each biped arm.
pub const BIPED_LIMB_WEAPONS: u32 = 2;

/// Outcome of validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    /// Every check passed.
    Valid,
    /// The first failing check's reason.
    Invalid(String),
}

impl Validity {
    /// Check if the configuration passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }
}

/// Weapon counts for one location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponCount {
    /// Weapons that can engage armored units.
    pub anti_unit: u32,
    /// Anti-personnel weapons.
    pub anti_personnel: u32,
}

impl WeaponCount {
    /// All weapon-class items.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.anti_unit + self.anti_personnel
    }
}

/// Count weapon-class items fitted to a location.
///
/// # Errors
///
/// Returns [`crate::error::ConstructionError::InvariantViolation`] if an ID is
/// not in the catalog.
pub fn count_weapons(
    config: &Configuration,
    catalog: &EquipmentCatalog,
    location: Location,
) -> Result<WeaponCount> {
    let mut count = WeaponCount::default();
    for def in config.fitted(catalog, location)? {
        match def.internal_type {
            InternalType::Weapon | InternalType::PreprocessedSystem => count.anti_unit += 1,
            InternalType::AntiPersonnelWeapon => count.anti_personnel += 1,
            InternalType::Ammunition | InternalType::Miscellaneous => {}
        }
    }
    Ok(count)
}

/// Check a configuration against every construction rule.
///
/// Returns `Ok(Validity::Invalid(reason))` for rule failures; `Err` is
/// reserved for out-of-range table indices.
///
/// # Errors
///
/// Returns [`crate::error::ConstructionError::InvariantViolation`] on any
/// out-of-range index.
pub fn validate(config: &Configuration, catalog: &EquipmentCatalog) -> Result<Validity> {
    let checks: [fn(&Configuration, &EquipmentCatalog) -> Result<Option<String>>; 6] = [
        check_shape,
        check_mass,
        check_armor,
        check_manipulators,
        check_slots,
        check_weapons,
    ];
    for check in checks {
        if let Some(reason) = check(config, catalog)? {
            return Ok(Validity::Invalid(reason));
        }
    }
    Ok(Validity::Valid)
}

fn check_shape(config: &Configuration, _catalog: &EquipmentCatalog) -> Result<Option<String>> {
    if config.shape == ChassisShape::Quad && config.weight_class == WeightClass::Minimal {
        return Ok(Some(
            "Quad chassis cannot be built in the Minimal weight class".to_string(),
        ));
    }
    Ok(None)
}

fn check_mass(config: &Configuration, catalog: &EquipmentCatalog) -> Result<Option<String>> {
    let mass = budget::total_mass(config, catalog)?;
    let (_, max) = tables::mass_range(config.weight_class);
    // Under the class minimum is legal.
    if mass > max {
        return Ok(Some(format!(
            "Over maximum mass: {mass} kg exceeds the {} limit of {max} kg",
            config.weight_class.display_name()
        )));
    }
    Ok(None)
}

fn check_armor(config: &Configuration, _catalog: &EquipmentCatalog) -> Result<Option<String>> {
    let armor = tables::armor(config.armor_type)?;
    if armor.mass_per_point[config.tech.index()] == 0 {
        return Ok(Some(format!(
            "{} armor is not legal for {} technology",
            armor.name,
            config.tech.display_name()
        )));
    }
    Ok(None)
}

fn check_manipulators(config: &Configuration, _catalog: &EquipmentCatalog) -> Result<Option<String>> {
    let left = config.left_manipulator;
    let right = config.right_manipulator;
    tables::manipulator(left)?;
    tables::manipulator(right)?;

    for (index, spec) in MANIPULATORS.iter().enumerate() {
        if !spec.must_pair {
            continue;
        }
        let kind = ManipulatorId(index as u8);
        if (left == kind) != (right == kind) {
            return Ok(Some(format!("{} must be fitted to both arms", spec.name)));
        }
    }
    Ok(None)
}

fn check_slots(config: &Configuration, catalog: &EquipmentCatalog) -> Result<Option<String>> {
    let slots = budget::slot_usage(config, catalog)?;
    let armor_name = tables::armor(config.armor_type)?.name;
    Ok(match config.shape {
        ChassisShape::Quad => quad_slots(&slots, armor_name),
        ChassisShape::Biped => biped_slots(&slots, armor_name),
    })
}

fn quad_slots(slots: &SlotUsage, armor_name: &str) -> Option<String> {
    let available = i64::from(slots.torso_capacity) - i64::from(slots.armor);
    if i64::from(slots.torso) > available {
        return Some(format!(
            "Body slots exceeded: {} used, {} available with {armor_name} armor",
            slots.torso,
            available.max(0)
        ));
    }
    None
}

fn biped_slots(slots: &SlotUsage, armor_name: &str) -> Option<String> {
    let locations = [
        (Location::LeftLimb, slots.left, slots.limb_capacity),
        (Location::RightLimb, slots.right, slots.limb_capacity),
        (Location::Torso, slots.torso, slots.torso_capacity),
    ];
    for (location, used, capacity) in locations {
        if used > capacity {
            return Some(format!(
                "{} slots exceeded: {used} used, {capacity} available",
                location.display_name()
            ));
        }
    }

    // Armor bulk is spread over whatever is left in every location.
    let free = slots.capacity() - (slots.left + slots.right + slots.torso);
    if free < slots.armor {
        return Some(format!(
            "Not enough free slots for {armor_name} armor: needs {}, {free} free",
            slots.armor
        ));
    }
    None
}

fn check_weapons(config: &Configuration, catalog: &EquipmentCatalog) -> Result<Option<String>> {
    let torso = count_weapons(config, catalog, Location::Torso)?;
    if config.shape == ChassisShape::Quad {
        if torso.total() > QUAD_TORSO_WEAPONS {
            return Ok(Some(format!(
                "Body can mount at most {QUAD_TORSO_WEAPONS} weapons ({} mounted)",
                torso.total()
            )));
        }
        return Ok(None);
    }

    if torso.anti_unit > BIPED_TORSO_ANTI_UNIT {
        return Ok(Some(format!(
            "Body can mount at most {BIPED_TORSO_ANTI_UNIT} anti-unit weapons ({} mounted)",
            torso.anti_unit
        )));
    }
    if torso.anti_personnel > BIPED_TORSO_ANTI_PERSONNEL {
        return Ok(Some(format!(
            "Body can mount at most {BIPED_TORSO_ANTI_PERSONNEL} anti-personnel weapons ({} mounted)",
            torso.anti_personnel
        )));
    }

    for location in [Location::LeftLimb, Location::RightLimb] {
        let limb = count_weapons(config, catalog, location)?;
        if limb.anti_unit > BIPED_LIMB_ANTI_UNIT {
            return Ok(Some(format!(
                "{} can mount at most {BIPED_LIMB_ANTI_UNIT} anti-unit weapon ({} mounted)",
                location.display_name(),
                limb.anti_unit
            )));
        }
        if limb.total() > BIPED_LIMB_WEAPONS {
            return Ok(Some(format!(
                "{} can mount at most {BIPED_LIMB_WEAPONS} weapons ({} mounted)",
                location.display_name(),
                limb.total()
            )));
        }
    }
    Ok(None)
}

/// Whether the squad can make anti-unit attacks (leg and swarm attacks).
///
/// Requires a biped no heavier than Medium, no active underwater movement,
/// and either a hand on both arms or a pair of magnetic claws.
///
/// # Errors
///
/// Returns [`crate::error::ConstructionError::InvariantViolation`] for an
/// unknown manipulator.
pub fn anti_unit_capable(config: &Configuration) -> Result<bool> {
    let left = tables::manipulator(config.left_manipulator)?;
    let right = tables::manipulator(config.right_manipulator)?;

    if config.shape == ChassisShape::Quad || config.weight_class >= WeightClass::Heavy {
        return Ok(false);
    }
    if config.special_kind == SpecialMovement::Underwater && config.special_mp > 0 {
        return Ok(false);
    }
    let both_handed = left.handed && right.handed;
    let magnetic_pair = config.left_manipulator == ManipulatorId::MAGNETIC_CLAW
        && config.right_manipulator == ManipulatorId::MAGNETIC_CLAW;
    Ok(both_handed || magnetic_pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EquipmentDefinition;
    use crate::chassis::TechBase;
    use crate::tables::ArmorTypeId;

    fn minimal_biped() -> Configuration {
        let mut config = Configuration::new();
        config.weight_class = WeightClass::Minimal;
        config
    }

    fn add(config: &mut Configuration, catalog: &EquipmentCatalog, location: Location, name: &str) {
        config
            .add_equipment(catalog, location, catalog.id_of(name).unwrap())
            .unwrap();
    }

    #[test]
    fn test_minimal_configuration_is_valid() {
        let catalog = EquipmentCatalog::standard();
        assert_eq!(validate(&minimal_biped(), &catalog), Ok(Validity::Valid));
    }

    #[test]
    fn test_quad_minimal_is_invalid_first() {
        let catalog = EquipmentCatalog::standard();
        let mut config = minimal_biped();
        config.shape = ChassisShape::Quad;
        config.ground_mp = 2;
        // Also broken in other ways; the shape reason still wins.
        config.armor_type = ArmorTypeId::FIRE_RESISTANT;
        config.left_manipulator = ManipulatorId::CARGO_LIFTER;

        let result = validate(&config, &catalog).unwrap();
        assert_eq!(
            result.reason(),
            Some("Quad chassis cannot be built in the Minimal weight class")
        );
    }

    #[test]
    fn test_mass_boundary() {
        let ballast = |mass| {
            EquipmentDefinition::new("Ballast", "Ballast", InternalType::Miscellaneous, mass, 0, 0.0)
        };
        // Minimal Inner biped: chassis 80, ceiling 400.
        let exact = EquipmentCatalog::new(vec![ballast(320)]).unwrap();
        let mut config = minimal_biped();
        add(&mut config, &exact, Location::Torso, "Ballast");
        assert_eq!(validate(&config, &exact), Ok(Validity::Valid));

        let over = EquipmentCatalog::new(vec![ballast(321)]).unwrap();
        let result = validate(&config, &over).unwrap();
        assert!(result.reason().unwrap().starts_with("Over maximum mass: 401 kg"));
    }

    #[test]
    fn test_under_minimum_is_valid() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.weight_class = WeightClass::Assault;
        assert!(budget::total_mass(&config, &catalog).unwrap() < 1501);
        assert!(validate(&config, &catalog).unwrap().is_valid());
    }

    #[test]
    fn test_armor_not_legal_for_tech() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.armor_type = ArmorTypeId::FIRE_RESISTANT;
        assert_eq!(
            validate(&config, &catalog).unwrap().reason(),
            Some("Fire Resistant armor is not legal for Inner technology")
        );

        config.tech = TechBase::Outer;
        assert!(validate(&config, &catalog).unwrap().is_valid());
    }

    #[test]
    fn test_paired_manipulators() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.left_manipulator = ManipulatorId::MAGNETIC_CLAW;
        config.right_manipulator = ManipulatorId::MAGNETIC_CLAW;
        assert!(validate(&config, &catalog).unwrap().is_valid());

        config.right_manipulator = ManipulatorId::BASIC;
        assert_eq!(
            validate(&config, &catalog).unwrap().reason(),
            Some("Magnetic Claw must be fitted to both arms")
        );
    }

    #[test]
    fn test_unpaired_kinds_may_differ() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.left_manipulator = ManipulatorId::BATTLE_CLAW;
        config.right_manipulator = ManipulatorId::INDUSTRIAL_DRILL;
        assert!(validate(&config, &catalog).unwrap().is_valid());
    }

    #[test]
    fn test_biped_location_slot_ceiling() {
        let catalog = EquipmentCatalog::standard();
        let mut config = minimal_biped();
        // Minimal torso holds 2 slots.
        for _ in 0..3 {
            add(&mut config, &catalog, Location::Torso, "Searchlight");
        }
        assert_eq!(
            validate(&config, &catalog).unwrap().reason(),
            Some("Body slots exceeded: 3 used, 2 available")
        );
    }

    #[test]
    fn test_biped_shared_slot_budget_for_armor() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.weight_class = WeightClass::Light;
        config.armor_type = ArmorTypeId::BASIC_STEALTH;
        // Light: torso 4, arms 2 each = 8 total. Stealth needs 3.
        add(&mut config, &catalog, Location::Torso, "SRM-2");
        add(&mut config, &catalog, Location::Torso, "Searchlight");
        add(&mut config, &catalog, Location::LeftLimb, "Machine Gun");
        assert!(validate(&config, &catalog).unwrap().is_valid());

        add(&mut config, &catalog, Location::RightLimb, "Searchlight");
        add(&mut config, &catalog, Location::RightLimb, "Searchlight");
        assert_eq!(
            validate(&config, &catalog).unwrap().reason(),
            Some("Not enough free slots for Basic Stealth armor: needs 3, 2 free")
        );
    }

    #[test]
    fn test_quad_slot_ceiling_includes_armor() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.shape = ChassisShape::Quad;
        config.weight_class = WeightClass::Light;
        config.ground_mp = 2;
        config.armor_type = ArmorTypeId::BASIC_STEALTH;
        // Light quad: 5 slots, 3 to stealth armor.
        add(&mut config, &catalog, Location::Torso, "SRM-2");
        assert!(validate(&config, &catalog).unwrap().is_valid());

        add(&mut config, &catalog, Location::Torso, "Searchlight");
        assert_eq!(
            validate(&config, &catalog).unwrap().reason(),
            Some("Body slots exceeded: 3 used, 2 available with Basic Stealth armor")
        );
    }

    #[test]
    fn test_biped_torso_weapon_caps() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.weight_class = WeightClass::Heavy;
        for _ in 0..3 {
            add(&mut config, &catalog, Location::Torso, "Machine Gun");
        }
        assert_eq!(
            validate(&config, &catalog).unwrap().reason(),
            Some("Body can mount at most 2 anti-unit weapons (3 mounted)")
        );
    }

    #[test]
    fn test_biped_limb_weapon_caps() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.weight_class = WeightClass::Assault;
        add(&mut config, &catalog, Location::RightLimb, "Machine Gun");
        add(&mut config, &catalog, Location::RightLimb, "AP Auto-Rifle");
        assert!(validate(&config, &catalog).unwrap().is_valid());

        add(&mut config, &catalog, Location::RightLimb, "Flamer");
        assert_eq!(
            validate(&config, &catalog).unwrap().reason(),
            Some("Right Arm can mount at most 1 anti-unit weapon (2 mounted)")
        );
    }

    #[test]
    fn test_limb_total_weapon_cap() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.weight_class = WeightClass::Assault;
        for _ in 0..3 {
            add(&mut config, &catalog, Location::LeftLimb, "AP Auto-Rifle");
        }
        assert_eq!(
            validate(&config, &catalog).unwrap().reason(),
            Some("Left Arm can mount at most 2 weapons (3 mounted)")
        );
    }

    #[test]
    fn test_quad_weapon_cap() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.shape = ChassisShape::Quad;
        config.weight_class = WeightClass::Assault;
        config.ground_mp = 2;
        for _ in 0..5 {
            add(&mut config, &catalog, Location::Torso, "Machine Gun");
        }
        assert_eq!(
            validate(&config, &catalog).unwrap().reason(),
            Some("Body can mount at most 4 weapons (5 mounted)")
        );
    }

    #[test]
    fn test_ammunition_is_not_a_weapon() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        add(&mut config, &catalog, Location::Torso, "SRM-2");
        add(&mut config, &catalog, Location::Torso, "SRM-2 Ammo");
        add(&mut config, &catalog, Location::Torso, "SRM-2 Ammo");
        let count = count_weapons(&config, &catalog, Location::Torso).unwrap();
        assert_eq!(count, WeaponCount { anti_unit: 1, anti_personnel: 0 });
    }

    #[test]
    fn test_validate_is_idempotent() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.left_manipulator = ManipulatorId::CARGO_LIFTER;
        let first = validate(&config, &catalog);
        assert_eq!(first, validate(&config, &catalog));
    }

    #[test]
    fn test_anti_unit_capable() {
        let mut config = Configuration::new();
        config.left_manipulator = ManipulatorId::ARMORED_GLOVE;
        config.right_manipulator = ManipulatorId::BATTLE_CLAW;
        assert_eq!(anti_unit_capable(&config), Ok(true));

        config.right_manipulator = ManipulatorId::HEAVY_BATTLE_CLAW;
        assert_eq!(anti_unit_capable(&config), Ok(false));

        config.left_manipulator = ManipulatorId::MAGNETIC_CLAW;
        config.right_manipulator = ManipulatorId::MAGNETIC_CLAW;
        assert_eq!(anti_unit_capable(&config), Ok(true));

        config.weight_class = WeightClass::Heavy;
        assert_eq!(anti_unit_capable(&config), Ok(false));

        config.weight_class = WeightClass::Light;
        config.special_kind = SpecialMovement::Underwater;
        config.special_mp = 1;
        assert_eq!(anti_unit_capable(&config), Ok(false));

        config.special_mp = 0;
        assert_eq!(anti_unit_capable(&config), Ok(true));

        config.shape = ChassisShape::Quad;
        assert_eq!(anti_unit_capable(&config), Ok(false));
    }
}
