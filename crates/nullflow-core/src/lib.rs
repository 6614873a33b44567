//! # Nullflow Core
//!
//! Packed null-flow state engine: per-variable nullness knowledge encoded
//! as a fixed lattice of fifteen canonical states, transformed by
//! table-driven mark operators and combined at sequence and confluence
//! points by three combinators.
//!
//! ## Modules
//!
//! - **[`state`]** - The canonical state lattice and its predicates
//! - **[`tables`]** - Hydrated transformation tables for every operator
//! - **[`flow`]** - Packed multi-word flow state and copy-on-write operators
//!
//! ## Quick Start
//!
//! ```rust
//! use nullflow_core::prelude::*;
//!
//! let before = FlowInfo::new(2);
//! let then_branch = before.mark_as_definitely_non_null(0);
//! let else_branch = before.mark_as_definitely_null(0);
//!
//! let after = then_branch.merged_with(&else_branch);
//! assert!(after.is_potentially_null(0));
//! assert!(after.is_potentially_non_null(0));
//! assert_eq!(after.null_state_of(0), NullState::PotentiallyNullNonNull);
//! ```

pub mod flow;
pub mod state;
pub mod tables;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::flow::{FlowInfo, WORD_SLOTS};
    pub use crate::state::{InvalidStateError, NullState};
    pub use crate::tables::{BinaryTable, UnaryTable};
}

// Re-export main types at crate root for convenience
pub use flow::{FlowInfo, WORD_SLOTS};
pub use state::{InvalidStateError, NullState};
pub use tables::{BinaryTable, UnaryTable};
