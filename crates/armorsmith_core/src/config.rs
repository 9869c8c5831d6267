//! Configuration state: every choice the player has made for one squad.
//!
//! A configuration owns its scalar choices and three ordered loadout
//! lists of catalog IDs. The conflict bitmask is kept in step with the
//! loadouts on every add and remove; the remaining derived fields are
//! recomputed by [`Configuration::refresh`].

use serde::{Deserialize, Serialize};

use crate::budget;
use crate::catalog::{ConflictTags, EquipmentCatalog, EquipmentDefinition, EquipmentId, Location};
use crate::chassis::{ChassisShape, Side, SpecialMovement, TechBase, WeightClass};
use crate::error::{ConstructionError, Result};
use crate::tables::{self, ArmorTypeId, ManipulatorId};
use crate::validate::{self, Validity};

/// Smallest legal squad.
pub const MIN_TROOPERS: u8 = 1;

/// Largest legal squad.
pub const MAX_TROOPERS: u8 = 6;

/// Values derived from the rest of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derived {
    /// Mass of one trooper as built.
    pub current_mass: u32,
    /// Lower bound of the weight class.
    pub min_mass: u32,
    /// Upper bound of the weight class.
    pub max_mass: u32,
    /// Reason from the last failed validation, if any.
    pub last_invalid_reason: Option<String>,
}

/// The mutable record of a squad under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Squad name. May be empty while editing.
    pub name: String,
    /// Troopers per squad (1-6).
    pub troopers: u8,
    /// Technology lineage.
    pub tech: TechBase,
    /// Body plan.
    pub shape: ChassisShape,
    /// Size tier.
    pub weight_class: WeightClass,
    /// Ground MP, including the shape's free baseline.
    pub ground_mp: u32,
    /// Special movement system.
    pub special_kind: SpecialMovement,
    /// Special movement MP, before augments.
    pub special_mp: u32,
    /// Armor type.
    pub armor_type: ArmorTypeId,
    /// Armor points per trooper.
    pub armor_value: u32,
    /// Left arm manipulator.
    pub left_manipulator: ManipulatorId,
    /// Right arm manipulator.
    pub right_manipulator: ManipulatorId,
    left_limb: Vec<EquipmentId>,
    right_limb: Vec<EquipmentId>,
    torso: Vec<EquipmentId>,
    conflicts: ConflictTags,
    derived: Derived,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    /// A fresh medium biped with nothing fitted.
    #[must_use]
    pub fn new() -> Self {
        let weight_class = WeightClass::Medium;
        let (min_mass, max_mass) = tables::mass_range(weight_class);
        let tech = TechBase::Inner;
        Self {
            name: String::new(),
            troopers: 4,
            tech,
            shape: ChassisShape::Biped,
            weight_class,
            ground_mp: ChassisShape::Biped.baseline_mp(),
            special_kind: SpecialMovement::Jump,
            special_mp: 0,
            armor_type: ArmorTypeId::STANDARD,
            armor_value: 0,
            left_manipulator: ManipulatorId::NONE,
            right_manipulator: ManipulatorId::NONE,
            left_limb: Vec::new(),
            right_limb: Vec::new(),
            torso: Vec::new(),
            conflicts: ConflictTags::NONE,
            derived: Derived {
                current_mass: tables::chassis_mass(weight_class, tech),
                min_mass,
                max_mass,
                last_invalid_reason: None,
            },
        }
    }

    /// Items fitted to a location, in selection order.
    #[must_use]
    pub fn loadout(&self, location: Location) -> &[EquipmentId] {
        match location {
            Location::LeftLimb => &self.left_limb,
            Location::RightLimb => &self.right_limb,
            Location::Torso => &self.torso,
        }
    }

    fn loadout_mut(&mut self, location: Location) -> &mut Vec<EquipmentId> {
        match location {
            Location::LeftLimb => &mut self.left_limb,
            Location::RightLimb => &mut self.right_limb,
            Location::Torso => &mut self.torso,
        }
    }

    /// Every selected item across all three locations.
    pub fn selected(&self) -> impl Iterator<Item = EquipmentId> + '_ {
        Location::ALL
            .into_iter()
            .flat_map(move |location| self.loadout(location).iter().copied())
    }

    /// Resolve the items fitted to a location.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] if an ID is not in the catalog.
    pub fn fitted<'c>(
        &self,
        catalog: &'c EquipmentCatalog,
        location: Location,
    ) -> Result<Vec<&'c EquipmentDefinition>> {
        self.loadout(location)
            .iter()
            .map(|&id| catalog.get(id))
            .collect()
    }

    /// OR of the conflict tags of every selected item.
    #[must_use]
    pub const fn conflicts(&self) -> ConflictTags {
        self.conflicts
    }

    /// Derived fields as of the last [`Configuration::refresh`].
    #[must_use]
    pub const fn derived(&self) -> &Derived {
        &self.derived
    }

    /// Manipulator on one arm.
    #[must_use]
    pub const fn manipulator(&self, side: Side) -> ManipulatorId {
        match side {
            Side::Left => self.left_manipulator,
            Side::Right => self.right_manipulator,
        }
    }

    /// Fit an item to a location, appending it and taking its conflict tag.
    ///
    /// Conflicts are a filtering concern, so an item whose tag is already
    /// taken is still accepted here.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] if the ID is not in the
    /// catalog, if the item may not be mounted at `location`, or if
    /// `location` is a limb on a quad.
    pub fn add_equipment(
        &mut self,
        catalog: &EquipmentCatalog,
        location: Location,
        id: EquipmentId,
    ) -> Result<()> {
        let def = catalog.get(id)?;
        if self.shape == ChassisShape::Quad && location.is_limb() {
            return Err(ConstructionError::InvariantViolation {
                table: "mount",
                index: format!("quad has no {}", location.display_name()),
            });
        }
        if !def.mount.allows(location) {
            return Err(ConstructionError::InvariantViolation {
                table: "mount",
                index: format!("{} cannot be mounted in {}", def.name, location.display_name()),
            });
        }
        self.loadout_mut(location).push(id);
        self.conflicts |= def.conflict;
        Ok(())
    }

    /// Remove the item at `index` of a location and rescan conflict tags.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] if `index` is past the
    /// end of the loadout.
    pub fn remove_equipment(
        &mut self,
        catalog: &EquipmentCatalog,
        location: Location,
        index: usize,
    ) -> Result<EquipmentId> {
        let list = self.loadout_mut(location);
        if index >= list.len() {
            return Err(ConstructionError::out_of_range(
                location.display_name(),
                index,
            ));
        }
        let removed = list.remove(index);
        self.recompute_conflicts(catalog)?;
        Ok(removed)
    }

    /// Rebuild the conflict bitmask from the current loadouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] if an ID is not in the catalog.
    pub fn recompute_conflicts(&mut self, catalog: &EquipmentCatalog) -> Result<()> {
        let mut conflicts = ConflictTags::NONE;
        for id in self.selected() {
            conflicts |= catalog.get(id)?.conflict;
        }
        self.conflicts = conflicts;
        Ok(())
    }

    /// Catalog entries that may still be fitted to a location.
    ///
    /// Quads only offer the torso; limb locations yield nothing.
    pub fn filter_choices<'c>(
        &self,
        catalog: &'c EquipmentCatalog,
        location: Location,
    ) -> Vec<(EquipmentId, &'c EquipmentDefinition)> {
        if self.shape == ChassisShape::Quad && location.is_limb() {
            return Vec::new();
        }
        catalog
            .filter(self.tech, location, self.conflicts)
            .collect()
    }

    /// Recompute mass bounds, current mass and the last invalid reason.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] if any table index is
    /// out of range.
    pub fn refresh(&mut self, catalog: &EquipmentCatalog) -> Result<()> {
        self.recompute_conflicts(catalog)?;
        let (min_mass, max_mass) = tables::mass_range(self.weight_class);
        let current_mass = budget::total_mass(self, catalog)?;
        let last_invalid_reason = match validate::validate(self, catalog)? {
            Validity::Valid => None,
            Validity::Invalid(reason) => Some(reason),
        };
        self.derived = Derived {
            current_mass,
            min_mass,
            max_mass,
            last_invalid_reason,
        };
        Ok(())
    }

    /// Apply one player edit, clamping numeric inputs to their legal ranges.
    ///
    /// Derived fields are not refreshed; [`crate::preview::on_edit`] does
    /// that after applying.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] for out-of-range table
    /// indices or illegal mounts.
    pub fn apply(&mut self, catalog: &EquipmentCatalog, edit: &Edit) -> Result<()> {
        match edit {
            Edit::SetName(name) => self.name.clone_from(name),
            Edit::SetTroopers(count) => {
                self.troopers = (*count).clamp(MIN_TROOPERS, MAX_TROOPERS);
            }
            Edit::SetTechBase(tech) => {
                self.tech = *tech;
                self.drop_unavailable(catalog)?;
            }
            Edit::SetChassis(shape) => {
                self.shape = *shape;
                if *shape == ChassisShape::Quad {
                    self.left_limb.clear();
                    self.right_limb.clear();
                    self.left_manipulator = ManipulatorId::NONE;
                    self.right_manipulator = ManipulatorId::NONE;
                    self.recompute_conflicts(catalog)?;
                }
                self.clamp_to_class();
            }
            Edit::SetWeightClass(class) => {
                self.weight_class = *class;
                self.clamp_to_class();
            }
            Edit::SetGroundMovement(mp) => {
                self.ground_mp = *mp;
                self.clamp_to_class();
            }
            Edit::SetSpecialMovement { kind, mp } => {
                self.special_kind = *kind;
                self.special_mp = *mp;
                self.clamp_to_class();
            }
            Edit::SetArmorType(id) => {
                tables::armor(*id)?;
                self.armor_type = *id;
            }
            Edit::SetArmorValue(points) => {
                self.armor_value = *points;
                self.clamp_to_class();
            }
            Edit::SetManipulator { side, id } => {
                tables::manipulator(*id)?;
                let id = if self.shape == ChassisShape::Quad {
                    ManipulatorId::NONE
                } else {
                    *id
                };
                match side {
                    Side::Left => self.left_manipulator = id,
                    Side::Right => self.right_manipulator = id,
                }
            }
            Edit::AddEquipment { location, id } => self.add_equipment(catalog, *location, *id)?,
            Edit::RemoveEquipment { location, index } => {
                self.remove_equipment(catalog, *location, *index)?;
            }
        }
        Ok(())
    }

    /// Clamp movement and armor into what the shape and weight class allow.
    pub fn clamp_to_class(&mut self) {
        let baseline = self.shape.baseline_mp();
        let max_ground = tables::max_ground_mp(self.shape, self.weight_class).max(baseline);
        self.ground_mp = self.ground_mp.clamp(baseline, max_ground);
        self.special_mp = self
            .special_mp
            .min(tables::max_special_mp(self.special_kind, self.weight_class));
        self.armor_value = self
            .armor_value
            .min(tables::max_armor_points(self.weight_class));
    }

    /// Drop fitted items the current lineage may not use.
    fn drop_unavailable(&mut self, catalog: &EquipmentCatalog) -> Result<()> {
        let tech = self.tech;
        for location in Location::ALL {
            let mut kept = Vec::with_capacity(self.loadout(location).len());
            for &id in self.loadout(location) {
                if catalog.get(id)?.tech.allows(tech) {
                    kept.push(id);
                }
            }
            *self.loadout_mut(location) = kept;
        }
        self.recompute_conflicts(catalog)
    }
}

/// One change requested by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    /// Rename the squad.
    SetName(String),
    /// Set the number of troopers.
    SetTroopers(u8),
    /// Switch lineage. Items the new lineage cannot use are dropped.
    SetTechBase(TechBase),
    /// Switch body plan. Quads lose both arm loadouts and manipulators.
    SetChassis(ChassisShape),
    /// Switch weight class.
    SetWeightClass(WeightClass),
    /// Set ground MP.
    SetGroundMovement(u32),
    /// Set the special movement system and its MP.
    SetSpecialMovement {
        /// Movement system.
        kind: SpecialMovement,
        /// MP bought.
        mp: u32,
    },
    /// Select an armor type.
    SetArmorType(ArmorTypeId),
    /// Set armor points per trooper.
    SetArmorValue(u32),
    /// Fit a manipulator to one arm.
    SetManipulator {
        /// Which arm.
        side: Side,
        /// Manipulator kind.
        id: ManipulatorId,
    },
    /// Fit a catalog item.
    AddEquipment {
        /// Where to mount it.
        location: Location,
        /// Catalog entry.
        id: EquipmentId,
    },
    /// Remove a fitted item by its position in the location's list.
    RemoveEquipment {
        /// Location to remove from.
        location: Location,
        /// Position in that location's list.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(catalog: &EquipmentCatalog, name: &str) -> EquipmentId {
        catalog.id_of(name).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::new();
        assert_eq!(config.troopers, 4);
        assert_eq!(config.shape, ChassisShape::Biped);
        assert_eq!(config.ground_mp, 1);
        assert!(config.name.is_empty());
        assert_eq!(config.selected().count(), 0);
        assert_eq!(config.derived().max_mass, 1000);
    }

    #[test]
    fn test_add_ors_conflict_tag() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config
            .add_equipment(&catalog, Location::Torso, id(&catalog, "ECM Suite"))
            .unwrap();
        assert_eq!(config.conflicts(), ConflictTags::ECM);
        assert_eq!(config.loadout(Location::Torso).len(), 1);
    }

    #[test]
    fn test_remove_rescans_conflicts() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config
            .add_equipment(&catalog, Location::Torso, id(&catalog, "Improved Sensors"))
            .unwrap();
        config
            .add_equipment(&catalog, Location::Torso, id(&catalog, "Jump Booster"))
            .unwrap();

        let removed = config
            .remove_equipment(&catalog, Location::Torso, 1)
            .unwrap();
        assert_eq!(removed, id(&catalog, "Jump Booster"));
        assert_eq!(config.conflicts(), ConflictTags::SENSORS);
    }

    #[test]
    fn test_remove_out_of_range() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        assert!(matches!(
            config.remove_equipment(&catalog, Location::LeftLimb, 0),
            Err(ConstructionError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_mount_restrictions_enforced() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        let laser = id(&catalog, "Medium Laser");
        let rifle = id(&catalog, "AP Auto-Rifle");
        assert!(config.add_equipment(&catalog, Location::LeftLimb, laser).is_err());
        assert!(config.add_equipment(&catalog, Location::Torso, rifle).is_err());
        assert!(config.add_equipment(&catalog, Location::LeftLimb, rifle).is_ok());
    }

    #[test]
    fn test_quad_has_no_limbs() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.shape = ChassisShape::Quad;
        let mg = id(&catalog, "Machine Gun");
        assert!(config.add_equipment(&catalog, Location::RightLimb, mg).is_err());
        assert!(config.filter_choices(&catalog, Location::RightLimb).is_empty());
        assert!(!config.filter_choices(&catalog, Location::Torso).is_empty());
    }

    #[test]
    fn test_switch_to_quad_clears_limbs() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        let mg = id(&catalog, "Machine Gun");
        config.apply(&catalog, &Edit::AddEquipment { location: Location::LeftLimb, id: mg }).unwrap();
        config.apply(&catalog, &Edit::AddEquipment { location: Location::Torso, id: mg }).unwrap();
        config
            .apply(&catalog, &Edit::SetManipulator { side: Side::Left, id: ManipulatorId::BATTLE_CLAW })
            .unwrap();

        config.apply(&catalog, &Edit::SetChassis(ChassisShape::Quad)).unwrap();
        assert!(config.loadout(Location::LeftLimb).is_empty());
        assert_eq!(config.loadout(Location::Torso), &[mg]);
        assert_eq!(config.left_manipulator, ManipulatorId::NONE);
        assert_eq!(config.ground_mp, 2);
    }

    #[test]
    fn test_tech_switch_drops_unavailable_items() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        let laser = id(&catalog, "Small Laser");
        let mg = id(&catalog, "Machine Gun");
        let booster = id(&catalog, "Jump Booster");
        for item in [laser, mg, booster] {
            config.add_equipment(&catalog, Location::Torso, item).unwrap();
        }

        config.apply(&catalog, &Edit::SetTechBase(TechBase::Outer)).unwrap();
        assert_eq!(config.loadout(Location::Torso), &[mg]);
        assert_eq!(config.conflicts(), ConflictTags::NONE);
    }

    #[test]
    fn test_clamping() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.apply(&catalog, &Edit::SetTroopers(9)).unwrap();
        assert_eq!(config.troopers, MAX_TROOPERS);
        config.apply(&catalog, &Edit::SetTroopers(0)).unwrap();
        assert_eq!(config.troopers, MIN_TROOPERS);

        config.apply(&catalog, &Edit::SetGroundMovement(10)).unwrap();
        assert_eq!(config.ground_mp, 3);
        config.apply(&catalog, &Edit::SetGroundMovement(0)).unwrap();
        assert_eq!(config.ground_mp, 1);

        config.apply(&catalog, &Edit::SetArmorValue(50)).unwrap();
        assert_eq!(config.armor_value, 10);

        config
            .apply(&catalog, &Edit::SetSpecialMovement { kind: SpecialMovement::Vtol, mp: 9 })
            .unwrap();
        assert_eq!(config.special_mp, 5);

        config.apply(&catalog, &Edit::SetWeightClass(WeightClass::Heavy)).unwrap();
        assert_eq!(config.special_mp, 0);
    }

    #[test]
    fn test_bad_table_indices_rejected() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        assert!(config.apply(&catalog, &Edit::SetArmorType(ArmorTypeId(99))).is_err());
        assert!(config
            .apply(&catalog, &Edit::SetManipulator { side: Side::Right, id: ManipulatorId(99) })
            .is_err());
        assert_eq!(config.armor_type, ArmorTypeId::STANDARD);
    }

    #[test]
    fn test_refresh_fills_derived() {
        let catalog = EquipmentCatalog::standard();
        let mut config = Configuration::new();
        config.weight_class = WeightClass::Light;
        config.refresh(&catalog).unwrap();
        assert_eq!(config.derived().min_mass, 401);
        assert_eq!(config.derived().max_mass, 750);
        assert_eq!(config.derived().current_mass, 100);
        assert!(config.derived().last_invalid_reason.is_none());

        config.shape = ChassisShape::Quad;
        config.weight_class = WeightClass::Minimal;
        config.ground_mp = 2;
        config.refresh(&catalog).unwrap();
        assert!(config.derived().last_invalid_reason.is_some());
    }
}
