#![deny(missing_docs)]

//! # Cannery Core
//!
//! Core library for the OpenAPI mock backend. Turns an OpenAPI v3
//! document into a normalized, reference-free model of operations and
//! example-bearing responses, and matches incoming requests against it.

/// Normalized API model.
pub mod api;

/// Operation builder: raw document -> normalized model.
pub mod builder;

/// Raw OpenAPI document model.
pub mod document;

/// Shared error types.
pub mod error;

/// Synthetic value generation.
pub mod faker;

/// Request matching over the normalized model.
pub mod matcher;

/// Schema resolution.
pub mod resolver;

pub use api::{Api, FieldType, Operation, Response, Schema};
pub use builder::{build, remove_trailing_slash, JSON_MEDIA_TYPE};
pub use document::{Document, SchemaNode};
pub use error::{AppError, AppResult};
pub use faker::{Faker, ValueGenerator};
pub use matcher::{find_response, path_matches_template, FindResponseParams};
pub use resolver::Resolver;

/// Parses a raw OpenAPI document (YAML or JSON) and builds the normalized
/// model in one pass, with the built-in value generator.
pub fn parse(content: &str) -> AppResult<Api> {
    let document = Document::parse(content)?;
    build(&document, &Faker::new())
}
