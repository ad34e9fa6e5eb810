//! Core types for Hoard: item taxonomy, weighted tables, and roll results.
//!
//! This crate defines the vocabulary the table stores and the roll engine
//! share. It performs no I/O: tables are loaded elsewhere and handed in,
//! and randomness is always threaded through an explicit [`rand::rngs::StdRng`].

/// Error types used throughout the crate.
pub mod error;
/// Roll result types handed to the presentation layer.
pub mod item;
/// Integer-weighted categorical tables and uniform draws.
pub mod table;
/// Closed enumerations for rank, subrank, category, and slot.
pub mod taxonomy;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export roll result types.
pub use item::{RerollPath, RolledItem, SpellRequest};
/// Re-export weighted table types.
pub use table::{WeightedEntry, WeightedTable, draw_uniform};
/// Re-export taxonomy enums.
pub use taxonomy::{Category, Rank, Slot, Subrank};
