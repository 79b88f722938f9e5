//! # a11ylint
//!
//! WCAG accessibility auditor and repairer for structured documents.
//!
//! This is the main facade crate: it re-exports the core framework, the
//! built-in checks and analytics, and provides the [`audit`] pipeline that
//! sequences parse → check → fix → score → render.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use a11ylint::{audit, AuditOptions, JsonConverter};
//!
//! let options = AuditOptions::default();
//! let outcome = audit(&source, &JsonConverter::new(), &options)?;
//! println!("{}", outcome.output);
//! for check in &outcome.check_results {
//!     eprintln!("{}: {} issue(s)", check.check_name, check.issues.len());
//! }
//! ```
//!
//! External collaborators (the vision/caption/link-text generators and the
//! language detector) plug in through [`GeneratorSet`]; none are bundled,
//! and fixes that need an absent generator are reported unfixed.

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use a11ylint_core::*;

/// Built-in accessibility checks.
pub mod checks {
    pub use a11ylint_checks::*;
}

/// Document analytics and the composite score.
pub mod analytics {
    pub use a11ylint_analytics::*;
}

/// Color science used by the contrast check.
pub mod color {
    pub use a11ylint_color::*;
}

mod pipeline;

pub use pipeline::{audit, AuditError, AuditOptions, AuditOutcome};
