//! # argspec-schema — Input Schemas from Argument Declarations
//!
//! Derives the `{type: "object", properties, required}` schema a tool
//! advertises from the same [`argspec_core::Arg`] declarations that validate
//! its calls, and checks raw arguments against such a schema with the
//! `jsonschema` crate.
//!
//! ## Crate Policy
//!
//! - Schemas are pure metadata, derived once per tool at registration.
//! - Every constraint mentioned in a property description comes from a
//!   refinement the extractor enforces.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod conformance;
pub mod params;
pub mod schema;

pub use conformance::{
    check_arguments, ConformanceError, SchemaChecker, SchemaViolation, SchemaViolations,
};
pub use params::Params;
pub use schema::{schema_for, InputSchema, ItemsSchema, Properties, PropertySchema, SchemaBuilder};
