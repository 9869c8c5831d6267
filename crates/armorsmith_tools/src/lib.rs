//! # Armorsmith Designer Tools
//!
//! Command-line tools for squad designers:
//! - Catalog listing with lineage and location filters
//! - Design sheet loading and previews
//! - Directory-wide sheet validation
//! - Committing designs to saved unit records

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod commands;
pub mod error;
pub mod sheets;
pub mod validate;
