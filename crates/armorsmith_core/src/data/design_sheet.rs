//! Human-authored squad designs.

use serde::{Deserialize, Serialize};

use crate::catalog::{EquipmentCatalog, Location};
use crate::chassis::{ChassisShape, Side, SpecialMovement, TechBase, WeightClass};
use crate::config::{Configuration, Edit};
use crate::error::{ConstructionError, Result};
use crate::tables::{self, ManipulatorId};

/// A squad design referencing armor, manipulators and equipment by name.
///
/// Building a sheet replays it as a sequence of [`Edit`]s, so every value
/// is clamped exactly as it would be in the interactive editor.
///
/// # Example RON
///
/// ```ron
/// DesignSheet(
///     name: "Grenadiers",
///     troopers: 4,
///     tech: Inner,
///     shape: Biped,
///     weight_class: Medium,
///     ground_mp: 1,
///     special: Jump,
///     special_mp: 2,
///     armor: "Standard",
///     armor_value: 5,
///     left_manipulator: Some("Battle Claw"),
///     right_manipulator: Some("Battle Claw"),
///     torso: ["SRM-2", "SRM-2 Ammo"],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSheet {
    /// Squad name.
    pub name: String,

    /// Troopers per squad.
    #[serde(default = "default_troopers")]
    pub troopers: u8,

    /// Technology lineage.
    #[serde(default)]
    pub tech: TechBase,

    /// Body plan.
    #[serde(default)]
    pub shape: ChassisShape,

    /// Size tier.
    #[serde(default)]
    pub weight_class: WeightClass,

    /// Ground MP.
    #[serde(default = "default_ground_mp")]
    pub ground_mp: u32,

    /// Special movement system.
    #[serde(default)]
    pub special: SpecialMovement,

    /// Special MP bought.
    #[serde(default)]
    pub special_mp: u32,

    /// Armor type by table name.
    #[serde(default = "default_armor")]
    pub armor: String,

    /// Armor points per trooper.
    #[serde(default)]
    pub armor_value: u32,

    /// Left arm manipulator by table name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_manipulator: Option<String>,

    /// Right arm manipulator by table name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_manipulator: Option<String>,

    /// Left arm equipment by catalog name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub left_arm: Vec<String>,

    /// Right arm equipment by catalog name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub right_arm: Vec<String>,

    /// Torso equipment by catalog name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub torso: Vec<String>,
}

const fn default_troopers() -> u8 {
    4
}

const fn default_ground_mp() -> u32 {
    1
}

fn default_armor() -> String {
    "Standard".to_string()
}

impl DesignSheet {
    /// Create a sheet with default values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            troopers: default_troopers(),
            tech: TechBase::default(),
            shape: ChassisShape::default(),
            weight_class: WeightClass::default(),
            ground_mp: default_ground_mp(),
            special: SpecialMovement::default(),
            special_mp: 0,
            armor: default_armor(),
            armor_value: 0,
            left_manipulator: None,
            right_manipulator: None,
            left_arm: Vec::new(),
            right_arm: Vec::new(),
            torso: Vec::new(),
        }
    }

    /// Parse a sheet from RON text.
    ///
    /// # Errors
    ///
    /// Returns the parser error with its position on malformed input.
    pub fn from_ron_str(text: &str) -> std::result::Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Write the sheet as pretty RON.
    ///
    /// # Errors
    ///
    /// Returns a serializer error if the sheet cannot be written.
    pub fn to_ron_string(&self) -> std::result::Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Describe an existing configuration as a sheet.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] for indices outside
    /// the tables or the catalog.
    pub fn from_config(config: &Configuration, catalog: &EquipmentCatalog) -> Result<Self> {
        let names = |location| -> Result<Vec<String>> {
            Ok(config
                .fitted(catalog, location)?
                .into_iter()
                .map(|def| def.name.clone())
                .collect())
        };
        let manipulator_name = |id: ManipulatorId| -> Result<Option<String>> {
            if id == ManipulatorId::NONE {
                return Ok(None);
            }
            Ok(Some(tables::manipulator(id)?.name.to_string()))
        };

        Ok(Self {
            name: config.name.clone(),
            troopers: config.troopers,
            tech: config.tech,
            shape: config.shape,
            weight_class: config.weight_class,
            ground_mp: config.ground_mp,
            special: config.special_kind,
            special_mp: config.special_mp,
            armor: tables::armor(config.armor_type)?.name.to_string(),
            armor_value: config.armor_value,
            left_manipulator: manipulator_name(config.left_manipulator)?,
            right_manipulator: manipulator_name(config.right_manipulator)?,
            left_arm: names(Location::LeftLimb)?,
            right_arm: names(Location::RightLimb)?,
            torso: names(Location::Torso)?,
        })
    }

    /// Translate the sheet into the edits that build it from a default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotFound`] for any name the tables or the
    /// catalog do not know.
    pub fn to_edits(&self, catalog: &EquipmentCatalog) -> Result<Vec<Edit>> {
        let armor = tables::armor_by_name(&self.armor)
            .ok_or_else(|| ConstructionError::NotFound(format!("armor '{}'", self.armor)))?;

        let mut edits = vec![
            Edit::SetName(self.name.clone()),
            Edit::SetTroopers(self.troopers),
            Edit::SetTechBase(self.tech),
            Edit::SetChassis(self.shape),
            Edit::SetWeightClass(self.weight_class),
            Edit::SetGroundMovement(self.ground_mp),
            Edit::SetSpecialMovement {
                kind: self.special,
                mp: self.special_mp,
            },
            Edit::SetArmorType(armor),
            Edit::SetArmorValue(self.armor_value),
        ];

        for (side, name) in [
            (Side::Left, &self.left_manipulator),
            (Side::Right, &self.right_manipulator),
        ] {
            let Some(name) = name else {
                continue;
            };
            let id = tables::manipulator_by_name(name)
                .ok_or_else(|| ConstructionError::NotFound(format!("manipulator '{name}'")))?;
            edits.push(Edit::SetManipulator { side, id });
        }

        for (location, names) in [
            (Location::LeftLimb, &self.left_arm),
            (Location::RightLimb, &self.right_arm),
            (Location::Torso, &self.torso),
        ] {
            for name in names {
                edits.push(Edit::AddEquipment {
                    location,
                    id: catalog.id_of(name)?,
                });
            }
        }

        Ok(edits)
    }

    /// Build the configuration this sheet describes.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotFound`] for unknown names, or
    /// [`ConstructionError::InvariantViolation`] for equipment placed where
    /// its mounting restriction forbids.
    pub fn build(&self, catalog: &EquipmentCatalog) -> Result<Configuration> {
        let mut config = Configuration::new();
        for edit in self.to_edits(catalog)? {
            config.apply(catalog, &edit)?;
        }
        config.refresh(catalog)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ArmorTypeId;

    const GRENADIERS: &str = r#"
        DesignSheet(
            name: "Grenadiers",
            special: Jump,
            special_mp: 2,
            armor_value: 5,
            left_manipulator: Some("Battle Claw"),
            right_manipulator: Some("Battle Claw"),
            torso: ["SRM-2", "SRM-2 Ammo"],
        )
    "#;

    #[test]
    fn test_parse_uses_defaults() {
        let sheet = DesignSheet::from_ron_str(GRENADIERS).unwrap();
        assert_eq!(sheet.troopers, 4);
        assert_eq!(sheet.tech, TechBase::Inner);
        assert_eq!(sheet.weight_class, WeightClass::Medium);
        assert_eq!(sheet.armor, "Standard");
        assert!(sheet.left_arm.is_empty());
    }

    #[test]
    fn test_build() {
        let catalog = EquipmentCatalog::standard();
        let config = DesignSheet::from_ron_str(GRENADIERS)
            .unwrap()
            .build(&catalog)
            .unwrap();
        assert_eq!(config.name, "Grenadiers");
        assert_eq!(config.special_mp, 2);
        assert_eq!(config.armor_type, ArmorTypeId::STANDARD);
        assert_eq!(config.left_manipulator, ManipulatorId::BATTLE_CLAW);
        assert_eq!(config.loadout(Location::Torso).len(), 2);
    }

    #[test]
    fn test_build_clamps_like_the_editor() {
        let catalog = EquipmentCatalog::standard();
        let mut sheet = DesignSheet::new("Overloaded");
        sheet.troopers = 9;
        sheet.ground_mp = 12;
        let config = sheet.build(&catalog).unwrap();
        assert_eq!(config.troopers, 6);
        assert_eq!(
            config.ground_mp,
            tables::max_ground_mp(ChassisShape::Biped, WeightClass::Medium)
        );
    }

    #[test]
    fn test_unknown_names() {
        let catalog = EquipmentCatalog::standard();

        let mut sheet = DesignSheet::new("Bad Armor");
        sheet.armor = "Adamantium".to_string();
        assert!(matches!(sheet.build(&catalog), Err(ConstructionError::NotFound(_))));

        let mut sheet = DesignSheet::new("Bad Claw");
        sheet.right_manipulator = Some("Pincer".to_string());
        assert!(matches!(sheet.build(&catalog), Err(ConstructionError::NotFound(_))));

        let mut sheet = DesignSheet::new("Bad Gun");
        sheet.torso.push("Railgun".to_string());
        assert!(matches!(sheet.build(&catalog), Err(ConstructionError::NotFound(_))));
    }

    #[test]
    fn test_from_config_rebuilds_same_configuration() {
        let catalog = EquipmentCatalog::standard();
        let config = DesignSheet::from_ron_str(GRENADIERS)
            .unwrap()
            .build(&catalog)
            .unwrap();
        let sheet = DesignSheet::from_config(&config, &catalog).unwrap();
        assert_eq!(sheet.build(&catalog).unwrap(), config);

        let text = sheet.to_ron_string().unwrap();
        assert_eq!(DesignSheet::from_ron_str(&text).unwrap(), sheet);
    }

    #[test]
    fn test_malformed_sheet() {
        assert!(DesignSheet::from_ron_str("DesignSheet(name: 4)").is_err());
    }
}
