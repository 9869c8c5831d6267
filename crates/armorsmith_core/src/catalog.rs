//! Equipment catalog: the read-only registry of weapons, ammunition and
//! special systems a squad can carry.
//!
//! The catalog is built once before any configuration exists and is then
//! shared by reference. Entries are addressed by [`EquipmentId`], the
//! insertion index, so choice lists keep insertion order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::chassis::TechBase;
use crate::error::{ConstructionError, Result};

/// Numeric identifier for a catalog entry (its insertion index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EquipmentId(pub u16);

impl EquipmentId {
    /// Create a new equipment ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Index into the catalog's entry list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Mutually exclusive augment tags.
///
/// Once any selected item carries a tag, catalog filtering hides every
/// other item carrying it.
///
/// ```
/// use armorsmith_core::catalog::ConflictTags;
///
/// let tags = ConflictTags::MOBILITY.union(ConflictTags::ECM);
/// assert!(tags.contains(ConflictTags::ECM));
/// assert!(!tags.intersects(ConflictTags::SENSORS));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictTags(u32);

impl ConflictTags {
    /// No conflicts.
    pub const NONE: Self = Self(0);
    /// Movement augment. Each selected torso item grants +1 special MP.
    pub const MOBILITY: Self = Self(1 << 0);
    /// Sensor suite.
    pub const SENSORS: Self = Self(1 << 1);
    /// Electronic countermeasures.
    pub const ECM: Self = Self(1 << 2);
    /// Camouflage system.
    pub const CAMOUFLAGE: Self = Self(1 << 3);

    /// Create tags from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Combine two tag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if all of `other`'s tags are set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if any of `other`'s tags are set.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Check if no tags are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ConflictTags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for ConflictTags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Rules category of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternalType {
    /// Direct-fire anti-unit weapon.
    Weapon,
    /// Anti-personnel weapon, fitted to limb mounts.
    AntiPersonnelWeapon,
    /// Self-contained launcher (missiles and similar).
    PreprocessedSystem,
    /// Ammunition bin.
    Ammunition,
    /// Everything else.
    Miscellaneous,
}

/// Which technology lineage may use an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TechRestriction {
    /// Inner lineage only.
    Inner,
    /// Outer lineage only.
    Outer,
    /// Available to both.
    #[default]
    Either,
}

impl TechRestriction {
    /// Check if a tech base may use this entry.
    #[must_use]
    pub const fn allows(self, tech: TechBase) -> bool {
        match self {
            Self::Either => true,
            Self::Inner => matches!(tech, TechBase::Inner),
            Self::Outer => matches!(tech, TechBase::Outer),
        }
    }
}

/// Where an entry may be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MountRestriction {
    /// Any location.
    #[default]
    Any,
    /// Torso only.
    TorsoOnly,
    /// Limbs only. Never available to quads.
    LimbOnly,
}

/// A mounting location on the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Left arm.
    LeftLimb,
    /// Right arm.
    RightLimb,
    /// Torso (the single body location on a quad).
    Torso,
}

impl Location {
    /// All locations in loadout order.
    pub const ALL: [Self; 3] = [Self::LeftLimb, Self::RightLimb, Self::Torso];

    /// Check if this is an arm location.
    #[must_use]
    pub const fn is_limb(self) -> bool {
        matches!(self, Self::LeftLimb | Self::RightLimb)
    }

    /// Get the display name for this location.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::LeftLimb => "Left Arm",
            Self::RightLimb => "Right Arm",
            Self::Torso => "Body",
        }
    }
}

impl MountRestriction {
    /// Check if an entry with this restriction fits a location.
    #[must_use]
    pub const fn allows(self, location: Location) -> bool {
        match self {
            Self::Any => true,
            Self::TorsoOnly => matches!(location, Location::Torso),
            Self::LimbOnly => location.is_limb(),
        }
    }
}

/// Immutable definition of one piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDefinition {
    /// Unique display name.
    pub name: String,
    /// Identifier of the mounted system in exported unit records.
    pub mount_id: String,
    /// Mass in kilograms.
    pub mass: u32,
    /// Price.
    pub cost: u64,
    /// Combat value contribution.
    pub score: f64,
    /// Rules category.
    pub internal_type: InternalType,
    /// Slots consumed.
    #[serde(default)]
    pub slots: u32,
    /// Lineage restriction.
    #[serde(default)]
    pub tech: TechRestriction,
    /// Mounting restriction.
    #[serde(default)]
    pub mount: MountRestriction,
    /// Conflict tags set when this item is selected.
    #[serde(default)]
    pub conflict: ConflictTags,
}

impl EquipmentDefinition {
    /// Create a definition usable by either lineage in any location,
    /// taking one slot and carrying no conflict tags.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        mount_id: impl Into<String>,
        internal_type: InternalType,
        mass: u32,
        cost: u64,
        score: f64,
    ) -> Self {
        Self {
            name: name.into(),
            mount_id: mount_id.into(),
            mass,
            cost,
            score,
            internal_type,
            slots: 1,
            tech: TechRestriction::Either,
            mount: MountRestriction::Any,
            conflict: ConflictTags::NONE,
        }
    }

    /// Set the slot cost.
    #[must_use]
    pub fn with_slots(mut self, slots: u32) -> Self {
        self.slots = slots;
        self
    }

    /// Restrict to a lineage.
    #[must_use]
    pub fn with_tech(mut self, tech: TechRestriction) -> Self {
        self.tech = tech;
        self
    }

    /// Restrict the mounting location.
    #[must_use]
    pub fn with_mount(mut self, mount: MountRestriction) -> Self {
        self.mount = mount;
        self
    }

    /// Set conflict tags.
    #[must_use]
    pub fn with_conflict(mut self, conflict: ConflictTags) -> Self {
        self.conflict = conflict;
        self
    }

    /// Check if this entry may be offered for a location and lineage,
    /// given the tags already taken.
    #[must_use]
    pub fn is_selectable(&self, tech: TechBase, location: Location, taken: ConflictTags) -> bool {
        self.tech.allows(tech)
            && self.mount.allows(location)
            && (self.conflict.is_empty() || !taken.intersects(self.conflict))
    }
}

/// Read-only registry of equipment definitions in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    entries: Vec<EquipmentDefinition>,
    by_name: HashMap<String, EquipmentId>,
}

impl EquipmentCatalog {
    /// Build a catalog from definitions, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] on a duplicate name
    /// or when there are more entries than [`EquipmentId`] can address.
    pub fn new(definitions: Vec<EquipmentDefinition>) -> Result<Self> {
        if definitions.len() > u16::MAX as usize {
            return Err(ConstructionError::out_of_range(
                "catalog size",
                definitions.len(),
            ));
        }
        let mut by_name = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if by_name
                .insert(def.name.clone(), EquipmentId(i as u16))
                .is_some()
            {
                return Err(ConstructionError::InvariantViolation {
                    table: "catalog",
                    index: format!("duplicate entry '{}'", def.name),
                });
            }
        }
        Ok(Self {
            entries: definitions,
            by_name,
        })
    }

    /// The stock catalog.
    #[must_use]
    pub fn standard() -> Self {
        let entries = standard_definitions();
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, def)| (def.name.clone(), EquipmentId(i as u16)))
            .collect();
        Self { entries, by_name }
    }

    /// Look up an entry by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotFound`] if no entry has this name.
    pub fn lookup(&self, name: &str) -> Result<&EquipmentDefinition> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// Resolve a name to its ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotFound`] if no entry has this name.
    pub fn id_of(&self, name: &str) -> Result<EquipmentId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ConstructionError::NotFound(name.to_string()))
    }

    /// Get an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] if the ID is out of range.
    pub fn get(&self, id: EquipmentId) -> Result<&EquipmentDefinition> {
        self.entries
            .get(id.index())
            .ok_or_else(|| ConstructionError::out_of_range("catalog", id.0))
    }

    /// Resolve an exported mount identifier back to its entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotFound`] if no entry uses this mount ID.
    pub fn by_mount_id(&self, mount_id: &str) -> Result<EquipmentId> {
        self.entries
            .iter()
            .position(|def| def.mount_id == mount_id)
            .map(|i| EquipmentId(i as u16))
            .ok_or_else(|| ConstructionError::NotFound(mount_id.to_string()))
    }

    /// Iterate all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentId, &EquipmentDefinition)> + Clone {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, def)| (EquipmentId(i as u16), def))
    }

    /// Entries that may be offered for a location, in insertion order.
    ///
    /// Keeps entries whose lineage matches (`Either` always does), whose
    /// mount restriction fits `location`, and whose conflict tag is not
    /// already in `taken`.
    pub fn filter(
        &self,
        tech: TechBase,
        location: Location,
        taken: ConflictTags,
    ) -> impl Iterator<Item = (EquipmentId, &EquipmentDefinition)> + Clone {
        self.iter()
            .filter(move |(_, def)| def.is_selectable(tech, location, taken))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn standard_definitions() -> Vec<EquipmentDefinition> {
    use InternalType::{
        AntiPersonnelWeapon, Ammunition, Miscellaneous, PreprocessedSystem, Weapon,
    };
    use MountRestriction::{LimbOnly, TorsoOnly};
    use TechRestriction::{Inner, Outer};

    vec![
        // Direct fire
        EquipmentDefinition::new("Machine Gun", "BAMG", Weapon, 100, 5_000, 5.0),
        EquipmentDefinition::new("Heavy Machine Gun", "BAHeavyMG", Weapon, 150, 7_500, 6.0),
        EquipmentDefinition::new("Flamer", "BAFlamer", Weapon, 150, 7_500, 6.0),
        EquipmentDefinition::new("Small Laser", "ISBASmallLaser", Weapon, 200, 11_250, 9.0)
            .with_tech(Inner),
        EquipmentDefinition::new("ER Small Laser", "CLBAERSmallLaser", Weapon, 300, 11_250, 17.0)
            .with_tech(Outer),
        EquipmentDefinition::new("Medium Laser", "ISBAMediumLaser", Weapon, 500, 40_000, 46.0)
            .with_slots(3)
            .with_tech(Inner)
            .with_mount(TorsoOnly),
        EquipmentDefinition::new(
            "ER Medium Laser",
            "CLBAERMediumLaser",
            Weapon,
            800,
            80_000,
            108.0,
        )
        .with_slots(3)
        .with_tech(Outer)
        .with_mount(TorsoOnly),
        // Launchers
        EquipmentDefinition::new("SRM-2", "ISBASRM2", PreprocessedSystem, 90, 15_000, 21.0)
            .with_slots(2)
            .with_tech(Inner),
        EquipmentDefinition::new("LRM-3", "CLBALRM3", PreprocessedSystem, 150, 30_000, 33.0)
            .with_slots(2)
            .with_tech(Outer)
            .with_mount(TorsoOnly),
        // Anti-personnel mounts
        EquipmentDefinition::new(
            "AP Auto-Rifle",
            "BAAPAutoRifle",
            AntiPersonnelWeapon,
            10,
            1_000,
            1.5,
        )
        .with_mount(LimbOnly),
        EquipmentDefinition::new(
            "AP Gauss Rifle",
            "CLBAAPGaussRifle",
            AntiPersonnelWeapon,
            15,
            5_000,
            2.0,
        )
        .with_tech(Outer)
        .with_mount(LimbOnly),
        // Ammunition
        EquipmentDefinition::new("SRM-2 Ammo", "ISBASRM2Ammo", Ammunition, 40, 1_000, 0.0)
            .with_slots(0)
            .with_tech(Inner)
            .with_mount(TorsoOnly),
        EquipmentDefinition::new("LRM-3 Ammo", "CLBALRM3Ammo", Ammunition, 60, 1_500, 0.0)
            .with_slots(0)
            .with_tech(Outer)
            .with_mount(TorsoOnly),
        // Systems
        EquipmentDefinition::new(
            "Jump Booster",
            "ISBAJumpBooster",
            Miscellaneous,
            125,
            75_000,
            0.0,
        )
        .with_slots(2)
        .with_tech(Inner)
        .with_mount(TorsoOnly)
        .with_conflict(ConflictTags::MOBILITY),
        EquipmentDefinition::new(
            "Partial Wing",
            "CLBAPartialWing",
            Miscellaneous,
            200,
            50_000,
            0.0,
        )
        .with_tech(Outer)
        .with_mount(TorsoOnly)
        .with_conflict(ConflictTags::MOBILITY),
        EquipmentDefinition::new(
            "Improved Sensors",
            "ISBAImprovedSensors",
            Miscellaneous,
            65,
            35_000,
            0.0,
        )
        .with_tech(Inner)
        .with_mount(TorsoOnly)
        .with_conflict(ConflictTags::SENSORS),
        EquipmentDefinition::new(
            "Improved Sensors (Clan)",
            "CLBAImprovedSensors",
            Miscellaneous,
            45,
            35_000,
            0.0,
        )
        .with_tech(Outer)
        .with_mount(TorsoOnly)
        .with_conflict(ConflictTags::SENSORS),
        EquipmentDefinition::new(
            "Light Active Probe",
            "CLBALightActiveProbe",
            Miscellaneous,
            100,
            50_000,
            7.0,
        )
        .with_tech(Outer)
        .with_mount(TorsoOnly)
        .with_conflict(ConflictTags::SENSORS),
        EquipmentDefinition::new("ECM Suite", "BAECMSuite", Miscellaneous, 100, 50_000, 0.0)
            .with_mount(TorsoOnly)
            .with_conflict(ConflictTags::ECM),
        EquipmentDefinition::new("Camo System", "ISBACamoSystem", Miscellaneous, 200, 50_000, 0.0)
            .with_slots(2)
            .with_tech(Inner)
            .with_mount(TorsoOnly)
            .with_conflict(ConflictTags::CAMOUFLAGE),
        EquipmentDefinition::new("Searchlight", "BASearchlight", Miscellaneous, 5, 500, 0.0),
        EquipmentDefinition::new(
            "Extended Life Support",
            "BAExtendedLifeSupport",
            Miscellaneous,
            25,
            10_000,
            0.0,
        )
        .with_mount(TorsoOnly),
    ]
}
