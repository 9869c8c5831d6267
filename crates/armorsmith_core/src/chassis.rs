//! Chassis-level identifiers: technology lineage, shape, weight class and
//! special movement systems.

use serde::{Deserialize, Serialize};

use crate::error::{ConstructionError, Result};

/// Technology lineage a unit is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TechBase {
    /// The common lineage.
    #[default]
    Inner,
    /// The rarer lineage. Carries a cost surcharge.
    Outer,
}

impl TechBase {
    /// Table index for per-lineage tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Inner => 0,
            Self::Outer => 1,
        }
    }

    /// Get the display name for this lineage.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Inner => "Inner",
            Self::Outer => "Outer",
        }
    }
}

/// Body plan of the trooper suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChassisShape {
    /// Two legs, two arms. Three mounting locations.
    #[default]
    Biped,
    /// Four legs, no arms. Everything is mounted in the torso.
    Quad,
}

impl ChassisShape {
    /// Minimum legal ground MP; movement beyond this is paid for.
    #[must_use]
    pub const fn baseline_mp(self) -> u32 {
        match self {
            Self::Biped => 1,
            Self::Quad => 2,
        }
    }

    /// Get the display name for this shape.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Biped => "Biped",
            Self::Quad => "Quad",
        }
    }
}

/// Five ordinal size tiers. The ordinal indexes every weight-dependent table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum WeightClass {
    /// Powered armor, light. Not available to quads.
    Minimal,
    /// Light class.
    Light,
    /// Medium class.
    #[default]
    Medium,
    /// Heavy class.
    Heavy,
    /// Assault class.
    Assault,
}

impl WeightClass {
    /// All weight classes in ordinal order.
    pub const ALL: [Self; 5] = [
        Self::Minimal,
        Self::Light,
        Self::Medium,
        Self::Heavy,
        Self::Assault,
    ];

    /// Ordinal of this class (0..=4).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Convert an ordinal back into a class.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] for ordinals above 4.
    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| ConstructionError::out_of_range("weight class", index))
    }

    /// Get the display name for this class.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Heavy => "Heavy",
            Self::Assault => "Assault",
        }
    }
}

/// Movement system used in addition to ground movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpecialMovement {
    /// Jump jets.
    #[default]
    Jump,
    /// Rotor or ducted-fan flight.
    Vtol,
    /// Underwater maneuvering units.
    Underwater,
}

impl SpecialMovement {
    /// Row index into the 3x5 special movement tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Jump => 0,
            Self::Vtol => 1,
            Self::Underwater => 2,
        }
    }

    /// Get the display name for this movement system.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Jump => "Jump",
            Self::Vtol => "VTOL",
            Self::Underwater => "UMU",
        }
    }
}

/// Which limb a manipulator is fitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left arm.
    Left,
    /// Right arm.
    Right,
}
