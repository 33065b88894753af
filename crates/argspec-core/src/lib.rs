//! # argspec-core — Typed Tool Arguments
//!
//! Declarative extraction and validation of the untyped argument maps that
//! remote tool calls carry. One declaration per argument drives both the
//! runtime check and the advertised input schema (see `argspec-schema`).
//!
//! ## Key Design Principles
//!
//! 1. **Builders end in a terminal call.** `arg::integer("limit", "..")
//!    .min(1).optional_or(100)` is the only way to obtain an [`Arg`], so every
//!    argument is explicitly required, optional, or defaulted.
//!
//! 2. **Extraction is total.** An extractor never panics and never blocks;
//!    it returns exactly one [`Validated`] case for any input map.
//!
//! 3. **Errors accumulate.** [`ArgList::validate`] runs every extractor and
//!    [`Validations::map_n`] reports all rejected arguments at once, keyed
//!    and ordered by declaration.
//!
//! 4. **Paths are vetted once.** [`ProjectRelativePath`] is constructed from
//!    raw input exactly once and cannot name a location outside its base.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `argspec-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod arg;
pub mod builder;
pub mod combine;
pub mod error;
pub mod path;
pub mod project;
pub mod validated;

/// Raw argument map as decoded from a tool call.
pub type Arguments = serde_json::Map<String, serde_json::Value>;

// Re-export primary types for ergonomic imports.
pub use arg::{Arg, ArgEnum, ArgSpec, SchemaType};
pub use combine::{combine, ArgList, AsArg, Mapped, Validations};
pub use error::{ArgError, ArgErrors, ExpectedType, RangeBound};
pub use path::{ContainmentError, PathError, ProjectLocation, ProjectRelativePath};
pub use project::{ProjectResolver, PROJECT_PATH_DESCRIPTION, PROJECT_PATH_KEY};
pub use validated::{Validated, ValidatedResult};
