//! # Nullflow Verify
//!
//! Verification harness for the nullflow state engine. Exhaustively
//! checks every operator against its transition table over the full state
//! space at several storage widths, and provides QuickCheck generators
//! for randomized cross-checks.
//!
//! ## Modules
//!
//! - **[`properties`]** - Exhaustive property checks and the [`Verifier`]
//! - **[`report`]** - Outcome types and JSON reporting
//! - **[`arbitrary`]** - QuickCheck generators for states and flow infos
//!
//! ## Quick Start
//!
//! ```rust
//! use nullflow_verify::prelude::*;
//!
//! let report = Verifier::default().verify_all();
//! assert!(report.passed());
//! ```

pub mod arbitrary;
pub mod properties;
pub mod report;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::arbitrary::{ArbFlowInfo, ArbState};
    pub use crate::properties::Verifier;
    pub use crate::report::{PropertyResult, PropertyStatus, VerificationReport};
}

// Re-export main types at crate root for convenience
pub use arbitrary::{ArbFlowInfo, ArbState};
pub use properties::Verifier;
pub use report::{PropertyResult, PropertyStatus, VerificationReport};
