//! # a11ylint-core
//!
//! Core framework for document accessibility auditing.
//!
//! This crate provides the foundational types for building accessibility
//! checkers over parsed document trees:
//!
//! - [`Document`] / [`ElementKind`] - an arena-based document tree with
//!   index-addressed, parent-mediated mutation
//! - [`Check`] / [`Analyzer`] - the stateful handler contracts
//! - [`Engine`] - the single-walk dispatch and finalize sequencing
//! - [`Issue`] / [`CheckResult`] and [`Metric`] / [`AnalyzerResult`] -
//!   the shared result model
//! - [`DocumentConverter`] and the generator traits - the external seams
//!
//! ## Example
//!
//! ```ignore
//! use a11ylint_core::{Engine, JsonConverter, DocumentConverter};
//!
//! let mut doc = JsonConverter::new().parse(source, "json")?;
//! let mut engine = Engine::new(checks, analyzers);
//! let outcome = engine.run(&mut doc, true);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyze;
mod check;
mod config;
mod convert;
mod engine;
mod generate;
mod metrics;
mod report;
mod tree;
mod types;

pub use analyze::{Analyzer, AnalyzerBox};
pub use check::{Check, CheckBox};
pub use config::{AuditConfig, Config, ConfigError, ToggleConfig};
pub use convert::{ConvertError, DocumentConverter, JsonConverter};
pub use engine::{Engine, RunOutcome};
pub use generate::{
    AltTextGenerator, AltTextOutcome, AltTextRequest, CaptionGenerator, GeneratorError,
    GeneratorSet, ImageClassification, LanguageDetector, LinkRewrite, LinkTextGenerator,
};
pub use metrics::{AnalyzerResult, Metric, MetricCategory, MetricValue};
pub use report::{AnalyticsReport, CheckReport, IssueReport, MetricReport, Report};
pub use tree::{AttrMap, Document, ElementKind, ElementType, NodeId};
pub use types::{CheckResult, Issue, IssueDiagnostic, IssueList, Severity};
