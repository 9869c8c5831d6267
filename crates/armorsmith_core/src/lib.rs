//! # Armorsmith Core
//!
//! Construction rules engine for powered-armor squads.
//!
//! A player edits a [`config::Configuration`] one [`config::Edit`] at a
//! time. After every edit the engine recomputes mass and slot budgets,
//! checks legality and rescores the squad. A legal configuration can be
//! committed into a [`export::UnitRecord`] for the rest of the application.
//!
//! This crate is pure and synchronous. The only IO lives in
//! [`collaborators::FileUnitStore`].
//!
//! ## Crate Structure
//!
//! - [`chassis`] - Tech base, body plan, weight class and movement kinds
//! - [`tables`] - Fixed mass, price, armor and manipulator tables
//! - [`catalog`] - Equipment catalog and conflict tags
//! - [`config`] - Configuration state and edits
//! - [`budget`] - Mass and slot budgets
//! - [`validate`] - Legality rules
//! - [`scoring`] - Combat value and price
//! - [`export`] - Unit records
//! - [`preview`] - Live preview and commit
//! - [`session`] - Per-designer facade
//! - [`collaborators`] - Roster, persistence and transport seams
//! - [`data`] - RON design sheets

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod budget;
pub mod catalog;
pub mod chassis;
pub mod collaborators;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod preview;
pub mod scoring;
pub mod session;
pub mod tables;
pub mod validate;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{
        ConflictTags, EquipmentCatalog, EquipmentDefinition, EquipmentId, InternalType, Location,
        MountRestriction, TechRestriction,
    };
    pub use crate::chassis::{ChassisShape, Side, SpecialMovement, TechBase, WeightClass};
    pub use crate::collaborators::{
        ChannelTransport, FileUnitStore, PersistenceError, PlayerId, PlayerRoster, StaticRoster,
        UnitStore, UnitTransport,
    };
    pub use crate::config::{Configuration, Edit};
    pub use crate::data::DesignSheet;
    pub use crate::error::{ConstructionError, Result};
    pub use crate::export::{MountedSystem, UnitRecord};
    pub use crate::preview::{commit, on_edit, preview, PreviewSnapshot};
    pub use crate::scoring::{OffensiveRating, Scores};
    pub use crate::session::ConstructionSession;
    pub use crate::tables::{ArmorTypeId, ManipulatorId};
    pub use crate::validate::{validate, Validity};
}
