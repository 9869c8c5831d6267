//! Data structures for authored squad designs.
//!
//! This module contains pure data structures deserialized from RON files.
//!
//! **Note:** This module contains no IO. File loading is handled by
//! `armorsmith_tools`.

mod design_sheet;

pub use design_sheet::DesignSheet;
