//! Scoring engine: combat value and price.
//!
//! Both derivations are computed for every configuration, valid or not,
//! so the preview can show them live.

use crate::budget;
use crate::catalog::{EquipmentCatalog, InternalType};
use crate::chassis::TechBase;
use crate::config::Configuration;
use crate::error::{ConstructionError, Result};
use crate::tables;

/// Defensive value every trooper starts with.
pub const DEFENSIVE_BASE: f64 = 1.0;

/// Offensive multiplier by best MP, capped at the last entry.
pub const SPEED_FACTOR: [f64; 12] = [
    0.44, 0.54, 0.65, 0.77, 0.88, 1.0, 1.12, 1.24, 1.37, 1.5, 1.63, 1.76,
];

/// Speed factor for a movement value.
#[must_use]
pub fn speed_factor(mp: u32) -> f64 {
    SPEED_FACTOR[(mp as usize).min(SPEED_FACTOR.len() - 1)]
}

const fn movement_band(mp: u32) -> u32 {
    match mp {
        0..=2 => 0,
        3..=4 => 1,
        _ => 2,
    }
}

/// Evasion modifier earned by ground movement.
#[must_use]
pub const fn ground_modifier(ground_mp: u32) -> u32 {
    movement_band(ground_mp)
}

/// Evasion modifier earned by special movement. Any special movement is
/// worth one more than the same ground MP.
#[must_use]
pub const fn special_modifier(special_mp: u32) -> u32 {
    if special_mp == 0 {
        0
    } else {
        movement_band(special_mp) + 1
    }
}

/// Multiplier applied to the defensive value.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
pub fn mobility_factor(config: &Configuration, catalog: &EquipmentCatalog) -> Result<f64> {
    let special = budget::effective_special_movement(config, catalog)?;
    let evasion = ground_modifier(config.ground_mp).max(special_modifier(special));
    let stealth = tables::armor(config.armor_type)?.stealth_bonus;
    Ok(1.0 + f64::from(evasion + stealth) / 10.0)
}

/// Defensive value of one trooper.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
pub fn defensive_score(config: &Configuration, catalog: &EquipmentCatalog) -> Result<f64> {
    let armor = tables::armor(config.armor_type)?;
    let raw = DEFENSIVE_BASE + f64::from(config.armor_value) * armor.score_per_point;
    Ok(raw * mobility_factor(config, catalog)?)
}

/// Unscaled offensive value split by attack category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OffensiveBreakdown {
    /// Direct-fire weapons.
    pub direct_fire: f64,
    /// Missile and other preprocessed launchers.
    pub missile: f64,
    /// Leg and swarm attacks.
    pub anti_unit: f64,
    /// Anti-personnel weapons.
    pub anti_personnel: f64,
    /// Support equipment.
    pub squad_support: f64,
}

impl OffensiveBreakdown {
    /// Sum of every category.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.direct_fire + self.missile + self.anti_unit + self.anti_personnel + self.squad_support
    }
}

/// Source of the offensive sub-score.
///
/// The speed factor is applied by the caller, so implementations only
/// rate what is carried.
pub trait OffensiveRating {
    /// Rate the weapons and attacks of one trooper.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
    fn rate(&self, config: &Configuration, catalog: &EquipmentCatalog) -> Result<OffensiveBreakdown>;
}

/// Sums each fitted item's catalog score into its category.
///
/// Anti-unit attacks are not rated and contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogRating;

impl OffensiveRating for CatalogRating {
    fn rate(&self, config: &Configuration, catalog: &EquipmentCatalog) -> Result<OffensiveBreakdown> {
        let mut breakdown = OffensiveBreakdown::default();
        for id in config.selected() {
            let def = catalog.get(id)?;
            let bucket = match def.internal_type {
                InternalType::Weapon => &mut breakdown.direct_fire,
                InternalType::PreprocessedSystem => &mut breakdown.missile,
                InternalType::AntiPersonnelWeapon => &mut breakdown.anti_personnel,
                InternalType::Ammunition | InternalType::Miscellaneous => {
                    &mut breakdown.squad_support
                }
            };
            *bucket += def.score;
        }
        Ok(breakdown)
    }
}

/// Offensive value of one trooper, scaled by the speed factor.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
pub fn offensive_score(
    config: &Configuration,
    catalog: &EquipmentCatalog,
    rating: &dyn OffensiveRating,
) -> Result<f64> {
    let special = budget::effective_special_movement(config, catalog)?;
    let best_mp = config.ground_mp.max(special);
    Ok(rating.rate(config, catalog)?.total() * speed_factor(best_mp))
}

/// Price of one trooper, split by source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostBreakdown {
    /// Chassis, movement, armor and manipulators, after any lineage surcharge.
    pub suit: u64,
    /// Crew training.
    pub training: u64,
    /// Fitted equipment.
    pub equipment: u64,
}

impl CostBreakdown {
    /// Total price of one trooper.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.suit
            .saturating_add(self.training)
            .saturating_add(self.equipment)
    }
}

/// `units * price`, or an invariant violation naming `table` on overflow.
fn priced(table: &'static str, units: u32, price: u64) -> Result<u64> {
    u64::from(units)
        .checked_mul(price)
        .ok_or_else(|| ConstructionError::out_of_range(table, units))
}

/// Price one trooper.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index
/// or a price that does not fit in a `u64`.
pub fn cost_breakdown(config: &Configuration, catalog: &EquipmentCatalog) -> Result<CostBreakdown> {
    let class = config.weight_class.index();
    let extra_ground = config
        .ground_mp
        .checked_sub(config.shape.baseline_mp())
        .ok_or_else(|| ConstructionError::out_of_range("ground MP", config.ground_mp))?;
    let overflow = || ConstructionError::out_of_range("suit price", config.name.as_str());

    let parts = [
        tables::CHASSIS_PRICE[class],
        priced("ground MP", extra_ground, tables::GROUND_MP_PRICE)?,
        priced(
            "special MP",
            config.special_mp,
            tables::SPECIAL_MP_PRICE[config.special_kind.index()][class],
        )?,
        priced(
            "armor points",
            config.armor_value,
            tables::armor(config.armor_type)?.price_per_point,
        )?,
        tables::manipulator(config.left_manipulator)?.price,
        tables::manipulator(config.right_manipulator)?.price,
    ];
    let mut suit = parts
        .into_iter()
        .try_fold(0u64, u64::checked_add)
        .ok_or_else(overflow)?;
    if config.tech == TechBase::Outer {
        let (num, den) = tables::OUTER_SURCHARGE;
        suit = suit.checked_mul(num).ok_or_else(overflow)? / den;
    }

    let equipment = config.selected().try_fold(0u64, |total, id| {
        total
            .checked_add(catalog.get(id)?.cost)
            .ok_or_else(|| ConstructionError::out_of_range("equipment price", total))
    })?;

    Ok(CostBreakdown {
        suit,
        training: tables::TRAINING_COST[config.tech.index()],
        equipment,
    })
}

/// Score and price of a configuration, per trooper and per squad.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scores {
    /// Defensive sub-score of one trooper.
    pub defensive: f64,
    /// Offensive sub-score of one trooper.
    pub offensive: f64,
    /// Rounded combat value of one trooper.
    pub per_unit_score: u32,
    /// Combat value of the whole squad.
    pub squad_score: u32,
    /// Price of one trooper.
    pub per_unit_cost: u64,
    /// Price of the whole squad.
    pub squad_cost: u64,
}

/// Score a configuration with the catalog-sum offensive rating.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
pub fn score(config: &Configuration, catalog: &EquipmentCatalog) -> Result<Scores> {
    score_with(config, catalog, &CatalogRating)
}

/// Score a configuration with a custom offensive rating.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
pub fn score_with(
    config: &Configuration,
    catalog: &EquipmentCatalog,
    rating: &dyn OffensiveRating,
) -> Result<Scores> {
    let defensive = defensive_score(config, catalog)?;
    let offensive = offensive_score(config, catalog, rating)?;
    let per_unit_score = (defensive + offensive).round() as u32;
    let per_unit_cost = cost_breakdown(config, catalog)?.total();
    let troopers = config.troopers;
    Ok(Scores {
        defensive,
        offensive,
        per_unit_score,
        squad_score: per_unit_score.saturating_mul(u32::from(troopers)),
        per_unit_cost,
        squad_cost: per_unit_cost.saturating_mul(u64::from(troopers)),
    })
}
