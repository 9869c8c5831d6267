//! Fixed construction tables.
//!
//! Every weight-dependent table is indexed by [`WeightClass::index`].
//! Armor types and manipulators are referenced by newtype indices; an
//! index outside its table is a caller bug and surfaces as
//! [`ConstructionError::InvariantViolation`].
//!
//! Masses are in kilograms, prices in whole currency units.

use serde::{Deserialize, Serialize};

use crate::chassis::{ChassisShape, SpecialMovement, TechBase, WeightClass};
use crate::error::{ConstructionError, Result};

// ============================================================================
// Mass and movement
// ============================================================================

/// Legal mass range per weight class (inclusive).
pub const MASS_RANGE: [(u32, u32); 5] = [(80, 400), (401, 750), (751, 1000), (1001, 1500), (1501, 2000)];

/// Chassis mass per weight class, one row per tech base.
pub const CHASSIS_MASS: [[u32; 5]; 2] = [[80, 100, 175, 300, 550], [130, 150, 250, 400, 700]];

/// Mass of each ground MP beyond the shape baseline.
pub const GROUND_MP_MASS: [u32; 5] = [25, 30, 40, 80, 160];

/// Mass per special movement MP. Rows follow [`SpecialMovement::index`].
/// A zero entry means the system is unavailable at that weight.
pub const SPECIAL_MP_MASS: [[u32; 5]; 3] = [
    [25, 25, 50, 125, 250],
    [30, 40, 60, 0, 0],
    [45, 45, 85, 160, 250],
];

/// Highest ground MP a biped may buy.
pub const MAX_GROUND_MP_BIPED: [u32; 5] = [3, 3, 3, 2, 2];

/// Highest ground MP a quad may buy.
pub const MAX_GROUND_MP_QUAD: [u32; 5] = [2, 5, 5, 4, 4];

/// Highest special movement MP per system and weight class.
pub const MAX_SPECIAL_MP: [[u32; 5]; 3] = [[3, 3, 3, 2, 2], [7, 6, 5, 0, 0], [5, 5, 4, 3, 2]];

/// Maximum armor points per trooper.
pub const MAX_ARMOR_POINTS: [u32; 5] = [2, 6, 10, 14, 18];

// ============================================================================
// Slots
// ============================================================================

/// Torso slot ceiling for bipeds.
pub const BIPED_TORSO_SLOTS: [u32; 5] = [2, 4, 4, 6, 6];

/// Slot ceiling for each biped limb.
pub const BIPED_LIMB_SLOTS: [u32; 5] = [2, 2, 3, 3, 4];

/// Torso slot ceiling for quads. Quads have no other location.
pub const QUAD_TORSO_SLOTS: [u32; 5] = [0, 5, 7, 9, 11];

// ============================================================================
// Prices
// ============================================================================

/// Base chassis price per weight class.
pub const CHASSIS_PRICE: [u64; 5] = [50_000, 100_000, 200_000, 400_000, 800_000];

/// Price of each ground MP beyond the shape baseline.
pub const GROUND_MP_PRICE: u64 = 25_000;

/// Price per special movement MP. Rows follow [`SpecialMovement::index`].
pub const SPECIAL_MP_PRICE: [[u64; 5]; 3] = [
    [50_000, 50_000, 75_000, 150_000, 300_000],
    [50_000, 60_000, 75_000, 0, 0],
    [50_000, 50_000, 75_000, 100_000, 150_000],
];

/// Surcharge applied to the suit price of the rarer lineage, as a ratio.
pub const OUTER_SURCHARGE: (u64, u64) = (11, 10);

/// Flat crew training cost per tech base.
pub const TRAINING_COST: [u64; 2] = [150_000, 200_000];

/// Per-lineage chassis mass.
#[must_use]
pub const fn chassis_mass(class: WeightClass, tech: TechBase) -> u32 {
    CHASSIS_MASS[tech.index()][class.index()]
}

/// Inclusive (min, max) mass for a weight class.
#[must_use]
pub const fn mass_range(class: WeightClass) -> (u32, u32) {
    MASS_RANGE[class.index()]
}

/// Highest ground MP for a shape and weight class.
#[must_use]
pub const fn max_ground_mp(shape: ChassisShape, class: WeightClass) -> u32 {
    match shape {
        ChassisShape::Biped => MAX_GROUND_MP_BIPED[class.index()],
        ChassisShape::Quad => MAX_GROUND_MP_QUAD[class.index()],
    }
}

/// Highest special movement MP for a system and weight class.
#[must_use]
pub const fn max_special_mp(kind: SpecialMovement, class: WeightClass) -> u32 {
    MAX_SPECIAL_MP[kind.index()][class.index()]
}

/// Maximum armor points per trooper.
#[must_use]
pub const fn max_armor_points(class: WeightClass) -> u32 {
    MAX_ARMOR_POINTS[class.index()]
}

// ============================================================================
// Armor types
// ============================================================================

/// Index into [`ARMOR_TYPES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ArmorTypeId(pub u8);

impl ArmorTypeId {
    /// Standard armor.
    pub const STANDARD: Self = Self(0);
    /// Basic stealth armor.
    pub const BASIC_STEALTH: Self = Self(1);
    /// Improved stealth armor.
    pub const IMPROVED_STEALTH: Self = Self(2);
    /// Prototype stealth armor.
    pub const PROTOTYPE_STEALTH: Self = Self(3);
    /// Fire resistant armor.
    pub const FIRE_RESISTANT: Self = Self(4);
    /// Mimetic (camouflage) armor.
    pub const MIMETIC: Self = Self(5);
    /// Reactive armor.
    pub const REACTIVE: Self = Self(6);
    /// Reflective armor.
    pub const REFLECTIVE: Self = Self(7);

    /// Create a new armor type ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

/// One row of the armor table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmorSpec {
    /// Display name.
    pub name: &'static str,
    /// Kilograms per point, indexed by [`TechBase::index`]. Zero means
    /// the armor is not legal for that lineage.
    pub mass_per_point: [u32; 2],
    /// Slots consumed by the armor's bulk.
    pub slots: u32,
    /// Price per armor point.
    pub price_per_point: u64,
    /// Combat value per armor point.
    pub score_per_point: f64,
    /// Mobility bonus from stealth or camouflage.
    pub stealth_bonus: u32,
    /// System record injected on export.
    pub export_system: Option<&'static str>,
}

/// All armor types, indexed by [`ArmorTypeId`].
pub const ARMOR_TYPES: [ArmorSpec; 8] = [
    ArmorSpec {
        name: "Standard",
        mass_per_point: [50, 25],
        slots: 0,
        price_per_point: 10_000,
        score_per_point: 2.5,
        stealth_bonus: 0,
        export_system: None,
    },
    ArmorSpec {
        name: "Basic Stealth",
        mass_per_point: [55, 30],
        slots: 3,
        price_per_point: 12_000,
        score_per_point: 2.5,
        stealth_bonus: 1,
        export_system: Some("BABasicStealth"),
    },
    ArmorSpec {
        name: "Improved Stealth",
        mass_per_point: [60, 35],
        slots: 5,
        price_per_point: 15_000,
        score_per_point: 2.5,
        stealth_bonus: 2,
        export_system: Some("BAImprovedStealth"),
    },
    ArmorSpec {
        name: "Prototype Stealth",
        mass_per_point: [100, 0],
        slots: 4,
        price_per_point: 50_000,
        score_per_point: 2.5,
        stealth_bonus: 2,
        export_system: Some("BAPrototypeStealth"),
    },
    ArmorSpec {
        name: "Fire Resistant",
        mass_per_point: [0, 30],
        slots: 5,
        price_per_point: 10_000,
        score_per_point: 3.5,
        stealth_bonus: 0,
        export_system: Some("BAFireResistantArmor"),
    },
    ArmorSpec {
        name: "Mimetic",
        mass_per_point: [50, 0],
        slots: 5,
        price_per_point: 15_000,
        score_per_point: 2.5,
        stealth_bonus: 1,
        export_system: Some("BAMimeticArmor"),
    },
    ArmorSpec {
        name: "Reactive",
        mass_per_point: [60, 40],
        slots: 7,
        price_per_point: 37_000,
        score_per_point: 2.5,
        stealth_bonus: 0,
        export_system: None,
    },
    ArmorSpec {
        name: "Reflective",
        mass_per_point: [30, 35],
        slots: 7,
        price_per_point: 37_000,
        score_per_point: 2.5,
        stealth_bonus: 0,
        export_system: None,
    },
];

/// Look up an armor type.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] if the index is out of range.
pub fn armor(id: ArmorTypeId) -> Result<&'static ArmorSpec> {
    ARMOR_TYPES
        .get(id.0 as usize)
        .ok_or_else(|| ConstructionError::out_of_range("armor type", id.0))
}

/// Find an armor type by display name.
#[must_use]
pub fn armor_by_name(name: &str) -> Option<ArmorTypeId> {
    ARMOR_TYPES
        .iter()
        .position(|spec| spec.name == name)
        .map(|i| ArmorTypeId(i as u8))
}

// ============================================================================
// Manipulators
// ============================================================================

/// Index into [`MANIPULATORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ManipulatorId(pub u8);

impl ManipulatorId {
    /// Bare limb.
    pub const NONE: Self = Self(0);
    /// Armored glove.
    pub const ARMORED_GLOVE: Self = Self(1);
    /// Basic manipulator.
    pub const BASIC: Self = Self(2);
    /// Battle claw.
    pub const BATTLE_CLAW: Self = Self(3);
    /// Battle claw with vibro blades.
    pub const BATTLE_VIBRO_CLAW: Self = Self(4);
    /// Heavy battle claw.
    pub const HEAVY_BATTLE_CLAW: Self = Self(5);
    /// Heavy battle claw with vibro blades.
    pub const HEAVY_BATTLE_VIBRO_CLAW: Self = Self(6);
    /// Cargo lifter. Must be paired.
    pub const CARGO_LIFTER: Self = Self(7);
    /// Industrial drill.
    pub const INDUSTRIAL_DRILL: Self = Self(8);
    /// Salvage arm.
    pub const SALVAGE_ARM: Self = Self(9);
    /// Magnetic claw. Must be paired.
    pub const MAGNETIC_CLAW: Self = Self(10);
    /// Mine clearance equipment.
    pub const MINE_CLEARANCE: Self = Self(11);

    /// Create a new manipulator ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

/// One row of the manipulator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManipulatorSpec {
    /// Display name.
    pub name: &'static str,
    /// Mass in kilograms.
    pub mass: u32,
    /// Price.
    pub price: u64,
    /// Only legal when both limbs carry the same kind.
    pub must_pair: bool,
    /// Counts as a hand for anti-unit attacks.
    pub handed: bool,
    /// System record injected on export for this limb.
    pub export_system: Option<&'static str>,
}

const fn manipulator_row(name: &'static str, mass: u32, price: u64) -> ManipulatorSpec {
    ManipulatorSpec {
        name,
        mass,
        price,
        must_pair: false,
        handed: false,
        export_system: None,
    }
}

/// All manipulator kinds, indexed by [`ManipulatorId`].
pub const MANIPULATORS: [ManipulatorSpec; 12] = [
    manipulator_row("None", 0, 0),
    ManipulatorSpec {
        handed: true,
        ..manipulator_row("Armored Glove", 0, 2_500)
    },
    ManipulatorSpec {
        handed: true,
        ..manipulator_row("Basic Manipulator", 0, 5_000)
    },
    ManipulatorSpec {
        handed: true,
        ..manipulator_row("Battle Claw", 15, 10_000)
    },
    ManipulatorSpec {
        handed: true,
        export_system: Some("BAVibroClaw"),
        ..manipulator_row("Battle Vibro-Claw", 50, 10_000)
    },
    manipulator_row("Heavy Battle Claw", 20, 25_000),
    ManipulatorSpec {
        export_system: Some("BAVibroClaw"),
        ..manipulator_row("Heavy Battle Vibro-Claw", 60, 30_000)
    },
    ManipulatorSpec {
        must_pair: true,
        ..manipulator_row("Cargo Lifter", 30, 250)
    },
    manipulator_row("Industrial Drill", 30, 2_500),
    manipulator_row("Salvage Arm", 30, 50),
    ManipulatorSpec {
        must_pair: true,
        ..manipulator_row("Magnetic Claw", 35, 12_500)
    },
    ManipulatorSpec {
        export_system: Some("BAMineClearance"),
        ..manipulator_row("Mine Clearance", 15, 7_500)
    },
];

/// Look up a manipulator kind.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] if the index is out of range.
pub fn manipulator(id: ManipulatorId) -> Result<&'static ManipulatorSpec> {
    MANIPULATORS
        .get(id.0 as usize)
        .ok_or_else(|| ConstructionError::out_of_range("manipulator", id.0))
}

/// Find a manipulator kind by display name.
#[must_use]
pub fn manipulator_by_name(name: &str) -> Option<ManipulatorId> {
    MANIPULATORS
        .iter()
        .position(|spec| spec.name == name)
        .map(|i| ManipulatorId(i as u8))
}
