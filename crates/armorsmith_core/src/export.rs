//! Conversion of a configuration into the finished unit record consumed by
//! the rest of the application.
//!
//! Export does not check legality. Callers must validate first (see
//! [`crate::preview::commit`]).

use serde::{Deserialize, Serialize};

use crate::budget;
use crate::catalog::{EquipmentCatalog, Location};
use crate::chassis::{ChassisShape, Side, SpecialMovement, TechBase, WeightClass};
use crate::collaborators::PlayerId;
use crate::config::{Configuration, Edit};
use crate::error::{ConstructionError, Result};
use crate::scoring;
use crate::tables::{self, ArmorTypeId, ManipulatorId};
use crate::validate;

/// Unit record format version.
pub const RECORD_VERSION: u32 = 1;

/// Mount identifier injected when both arms carry magnetic claws.
pub const MAGNETIC_CLAMP: &str = "BAMagneticClamp";

/// Tactical systems every anti-unit capable squad carries, in export order.
pub const ANTI_UNIT_SYSTEMS: [&str; 3] = ["BALegAttack", "BASwarmAttack", "BAStopSwarmAttack"];

/// A system mounted at a location, by its external identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountedSystem {
    /// External mount identifier.
    pub mount_id: String,
    /// Where it is mounted.
    pub location: Location,
}

impl MountedSystem {
    /// Create a new mounted system.
    #[must_use]
    pub fn new(mount_id: impl Into<String>, location: Location) -> Self {
        Self {
            mount_id: mount_id.into(),
            location,
        }
    }
}

/// Finished squad, ready to save or transmit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Record format version.
    pub version: u32,
    /// Squad name.
    pub name: String,
    /// Owning player, once attached.
    #[serde(default)]
    pub owner: Option<PlayerId>,
    /// Technology lineage.
    pub tech: TechBase,
    /// Body plan.
    pub shape: ChassisShape,
    /// Size tier.
    pub weight_class: WeightClass,
    /// Troopers per squad.
    pub troopers: u8,
    /// Ground MP.
    pub ground_mp: u32,
    /// Special movement system.
    pub special_kind: SpecialMovement,
    /// Special MP bought.
    pub special_mp: u32,
    /// Special MP after augments.
    pub effective_special_mp: u32,
    /// Armor type.
    pub armor_type: ArmorTypeId,
    /// Armor display name.
    pub armor_name: String,
    /// Armor points per trooper.
    pub armor_value: u32,
    /// Left arm manipulator.
    pub left_manipulator: ManipulatorId,
    /// Right arm manipulator.
    pub right_manipulator: ManipulatorId,
    /// Selected equipment, left arm then right arm then torso.
    pub equipment: Vec<MountedSystem>,
    /// Systems implied by the configuration.
    pub injected: Vec<MountedSystem>,
    /// Whether the squad may make anti-unit attacks.
    pub anti_unit_capable: bool,
    /// Mass of one trooper.
    pub mass: u32,
    /// Price of one trooper.
    pub per_unit_cost: u64,
    /// Price of the squad.
    pub squad_cost: u64,
    /// Combat value of one trooper.
    pub per_unit_score: u32,
    /// Combat value of the squad.
    pub squad_score: u32,
}

impl UnitRecord {
    /// Attach the owning player.
    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Rebuild the configuration this record was exported from.
    ///
    /// The record is replayed as editor [`Edit`]s, so it goes through the
    /// same clamps as interactive editing. Any field the clamps would change
    /// is out of range for the recorded chassis and is rejected rather than
    /// silently adjusted. Injected systems are derived, so they are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConstructionError::NotFound`] if a mount ID is
    /// not in the catalog, or an invariant violation for illegal mounts and
    /// out-of-range fields.
    pub fn restore(&self, catalog: &EquipmentCatalog) -> Result<Configuration> {
        let mut edits = vec![
            Edit::SetName(self.name.clone()),
            Edit::SetTroopers(self.troopers),
            Edit::SetTechBase(self.tech),
            Edit::SetChassis(self.shape),
            Edit::SetWeightClass(self.weight_class),
            Edit::SetGroundMovement(self.ground_mp),
            Edit::SetSpecialMovement {
                kind: self.special_kind,
                mp: self.special_mp,
            },
            Edit::SetArmorType(self.armor_type),
            Edit::SetArmorValue(self.armor_value),
            Edit::SetManipulator {
                side: Side::Left,
                id: self.left_manipulator,
            },
            Edit::SetManipulator {
                side: Side::Right,
                id: self.right_manipulator,
            },
        ];
        for mounted in &self.equipment {
            edits.push(Edit::AddEquipment {
                location: mounted.location,
                id: catalog.by_mount_id(&mounted.mount_id)?,
            });
        }

        let mut config = Configuration::new();
        for edit in &edits {
            config.apply(catalog, edit)?;
        }

        let fields = [
            ("troopers", u32::from(config.troopers), u32::from(self.troopers)),
            ("ground MP", config.ground_mp, self.ground_mp),
            ("special MP", config.special_mp, self.special_mp),
            ("armor points", config.armor_value, self.armor_value),
            (
                "left manipulator",
                u32::from(config.left_manipulator.0),
                u32::from(self.left_manipulator.0),
            ),
            (
                "right manipulator",
                u32::from(config.right_manipulator.0),
                u32::from(self.right_manipulator.0),
            ),
        ];
        for (field, restored, recorded) in fields {
            if restored != recorded {
                return Err(ConstructionError::out_of_range(field, recorded));
            }
        }

        config.refresh(catalog)?;
        Ok(config)
    }
}

/// Systems the configuration implies, in export order: armor system,
/// manipulator systems (left, right), magnetic clamp for a magnetic claw
/// pair, then the anti-unit attack systems.
///
/// # Errors
///
/// Returns [`crate::error::ConstructionError::InvariantViolation`] for unknown
/// armor or manipulator indices.
pub fn injected_systems(config: &Configuration) -> Result<Vec<MountedSystem>> {
    let mut injected = Vec::new();

    if let Some(system) = tables::armor(config.armor_type)?.export_system {
        injected.push(MountedSystem::new(system, Location::Torso));
    }

    let arms = [
        (config.left_manipulator, Location::LeftLimb),
        (config.right_manipulator, Location::RightLimb),
    ];
    for (manipulator, location) in arms {
        if let Some(system) = tables::manipulator(manipulator)?.export_system {
            injected.push(MountedSystem::new(system, location));
        }
    }

    if config.left_manipulator == ManipulatorId::MAGNETIC_CLAW
        && config.right_manipulator == ManipulatorId::MAGNETIC_CLAW
    {
        injected.push(MountedSystem::new(MAGNETIC_CLAMP, Location::Torso));
    }

    if validate::anti_unit_capable(config)? {
        injected.extend(
            ANTI_UNIT_SYSTEMS
                .iter()
                .map(|system| MountedSystem::new(*system, Location::Torso)),
        );
    }

    Ok(injected)
}

/// Convert a configuration into a unit record.
///
/// # Errors
///
/// Returns [`crate::error::ConstructionError::InvariantViolation`] on any
/// out-of-range index.
pub fn export(config: &Configuration, catalog: &EquipmentCatalog) -> Result<UnitRecord> {
    let mut equipment = Vec::new();
    for location in Location::ALL {
        for def in config.fitted(catalog, location)? {
            equipment.push(MountedSystem::new(def.mount_id.clone(), location));
        }
    }

    let scores = scoring::score(config, catalog)?;
    Ok(UnitRecord {
        version: RECORD_VERSION,
        name: config.name.clone(),
        owner: None,
        tech: config.tech,
        shape: config.shape,
        weight_class: config.weight_class,
        troopers: config.troopers,
        ground_mp: config.ground_mp,
        special_kind: config.special_kind,
        special_mp: config.special_mp,
        effective_special_mp: budget::effective_special_movement(config, catalog)?,
        armor_type: config.armor_type,
        armor_name: tables::armor(config.armor_type)?.name.to_string(),
        armor_value: config.armor_value,
        left_manipulator: config.left_manipulator,
        right_manipulator: config.right_manipulator,
        equipment,
        injected: injected_systems(config)?,
        anti_unit_capable: validate::anti_unit_capable(config)?,
        mass: budget::total_mass(config, catalog)?,
        per_unit_cost: scores.per_unit_cost,
        squad_cost: scores.squad_cost,
        per_unit_score: scores.per_unit_score,
        squad_score: scores.squad_score,
    })
}
