//! Live preview and commit.
//!
//! Every edit is followed by a full recompute: budgets, validity and
//! scores. Nothing is cached between edits.

use std::fmt;

use crate::budget::{self, MassBreakdown, SlotUsage};
use crate::catalog::EquipmentCatalog;
use crate::config::{Configuration, Edit};
use crate::error::{ConstructionError, Result};
use crate::export::{self, UnitRecord};
use crate::scoring::{self, Scores};
use crate::tables;
use crate::validate::{self, Validity};

/// Everything the preview pane shows after an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSnapshot {
    /// Squad name.
    pub name: String,
    /// Troopers per squad.
    pub troopers: u8,
    /// Mass of one trooper by source.
    pub mass: MassBreakdown,
    /// Lower bound of the weight class.
    pub min_mass: u32,
    /// Upper bound of the weight class.
    pub max_mass: u32,
    /// Slot usage and ceilings.
    pub slots: SlotUsage,
    /// Special MP after augments.
    pub effective_special_mp: u32,
    /// Whether leg and swarm attacks are available.
    pub anti_unit_capable: bool,
    /// Validation outcome.
    pub validity: Validity,
    /// Score and price.
    pub scores: Scores,
    summary: Vec<(&'static str, String)>,
}

impl PreviewSnapshot {
    /// Mass of one trooper.
    #[must_use]
    pub const fn current_mass(&self) -> u32 {
        self.mass.total()
    }

    /// Check if the configuration may be committed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }
}

impl fmt::Display for PreviewSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            &self.name
        };
        writeln!(f, "{name} ({} troopers)", self.troopers)?;
        for (label, value) in &self.summary {
            writeln!(f, "{label}: {value}")?;
        }
        match &self.validity {
            Validity::Valid => write!(f, "Status: Valid"),
            Validity::Invalid(reason) => write!(f, "Status: Invalid - {reason}"),
        }
    }
}

/// Compute a snapshot without changing the configuration.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] on any out-of-range index.
pub fn preview(config: &Configuration, catalog: &EquipmentCatalog) -> Result<PreviewSnapshot> {
    let mass = budget::mass_breakdown(config, catalog)?;
    let (min_mass, max_mass) = tables::mass_range(config.weight_class);
    let slots = budget::slot_usage(config, catalog)?;
    let effective_special_mp = budget::effective_special_movement(config, catalog)?;
    let anti_unit_capable = validate::anti_unit_capable(config)?;
    let validity = validate::validate(config, catalog)?;
    let scores = scoring::score(config, catalog)?;
    let armor = tables::armor(config.armor_type)?;

    let summary = vec![
        (
            "Chassis",
            format!(
                "{} {}, {} class",
                config.tech.display_name(),
                config.shape.display_name(),
                config.weight_class.display_name()
            ),
        ),
        (
            "Mass",
            format!("{} kg ({min_mass}-{max_mass} kg)", mass.total()),
        ),
        (
            "Slots",
            format!("{}/{} (armor {})", slots.used(), slots.capacity(), slots.armor),
        ),
        (
            "Movement",
            format!(
                "ground {}, {} {} (effective {effective_special_mp})",
                config.ground_mp,
                config.special_kind.display_name(),
                config.special_mp
            ),
        ),
        ("Armor", format!("{} x{}", armor.name, config.armor_value)),
        (
            "Anti-unit attacks",
            if anti_unit_capable { "yes" } else { "no" }.to_string(),
        ),
        (
            "Score",
            format!(
                "{} per trooper, {} per squad",
                scores.per_unit_score, scores.squad_score
            ),
        ),
        (
            "Cost",
            format!(
                "{} per trooper, {} per squad",
                scores.per_unit_cost, scores.squad_cost
            ),
        ),
    ];

    Ok(PreviewSnapshot {
        name: config.name.clone(),
        troopers: config.troopers,
        mass,
        min_mass,
        max_mass,
        slots,
        effective_special_mp,
        anti_unit_capable,
        validity,
        scores,
        summary,
    })
}

/// Apply an edit, refresh derived state and return the new snapshot.
///
/// # Errors
///
/// Returns [`ConstructionError::InvariantViolation`] for out-of-range indices
/// or illegal mounts. The configuration is left unchanged by a rejected
/// equipment edit.
pub fn on_edit(
    config: &mut Configuration,
    catalog: &EquipmentCatalog,
    edit: &Edit,
) -> Result<PreviewSnapshot> {
    config.apply(catalog, edit)?;
    config.refresh(catalog)?;
    tracing::debug!(
        ?edit,
        mass = config.derived().current_mass,
        invalid = config.derived().last_invalid_reason.as_deref(),
        "Applied edit"
    );
    preview(config, catalog)
}

/// Validate and export a configuration.
///
/// # Errors
///
/// Returns [`ConstructionError::Validation`] with the first failing rule's
/// reason, or [`ConstructionError::InvariantViolation`] on bad indices.
pub fn commit(config: &Configuration, catalog: &EquipmentCatalog) -> Result<UnitRecord> {
    if let Validity::Invalid(reason) = validate::validate(config, catalog)? {
        tracing::warn!(unit = %config.name, %reason, "Commit refused");
        return Err(ConstructionError::Validation(reason));
    }
    let record = export::export(config, catalog)?;
    tracing::info!(
        unit = %record.name,
        squad_cost = record.squad_cost,
        squad_score = record.squad_score,
        "Committed unit"
    );
    Ok(record)
}
