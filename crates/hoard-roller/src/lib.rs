//! Magic item assembly and the recursive roll dispatcher.
//!
//! The dispatcher turns a `(rank, subrank, category, extra)` request into
//! a concrete [`hoard_core::RolledItem`], drawing through the table
//! registry and following table cross-references with a bounded
//! recursion depth. Armor and weapons route through the assembler,
//! which builds an enchanted item step by step under the
//! square-of-bonus cost rule.

/// The magic weapon/armor assembler.
pub mod assemble;
/// The top-level recursive roll function.
pub mod dispatch;
/// Error types for the roll engine.
pub mod error;
/// The roll request and reroll-path parsing.
pub mod request;

/// Re-export the assembler cost model.
pub use assemble::CostModel;
/// Re-export the dispatcher entry point.
pub use dispatch::{MAX_REROLL_DEPTH, roll};
/// Re-export error types.
pub use error::{RollError, RollResult};
/// Re-export the request type.
pub use request::RollRequest;
