//! Decorator-aware extraction engine.
//!
//! Text flows through three layers:
//!
//! - [`statements`] rebuilds multi-line decorated declarations into flat statements
//! - [`patterns`] matches class headers, members, routes and relationship targets
//! - [`aggregator`] classifies files and attaches members to classes, using
//!   [`scope`] to find the enclosing class body
//!
//! Only `statements` and `patterns` know that matching is regex based.

pub mod aggregator;
pub mod engine;
pub mod patterns;
pub mod profile;
pub mod scope;
pub mod statements;

pub use aggregator::{extract_file, FileExtraction, MetadataAggregator};
pub use engine::ExtractionEngine;
pub use profile::DecoratorProfile;
pub use statements::{reconstruct_statements, Statement, StatementReconstructor};
