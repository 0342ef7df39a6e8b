//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Build-time variants abort the whole document load; match-time variants
/// (`OperationNotFound`, `RequestBodyDecode`, `MissingRequiredField`) abort
/// only the request that produced them.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Malformed YAML/JSON document.
    #[display("Deserialization Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A `$ref` that does not point at a known component schema.
    #[from(ignore)]
    #[display("unresolved reference {_0}")]
    UnresolvedReference(String),

    /// A `$ref` chain that re-enters a name already on the chain.
    #[from(ignore)]
    #[display("cyclic reference {_0}")]
    CyclicReference(String),

    /// A schema `type` tag outside the supported set.
    #[from(ignore)]
    #[display("unknown type {_0}")]
    UnknownSchemaType(String),

    /// An array schema that declares no `items`.
    #[display("empty items in array")]
    EmptyArrayItems,

    /// An array schema whose example is not a sequence.
    #[from(ignore)]
    #[display("unexpected type {_0} for array example")]
    ArrayExampleType(String),

    /// An object schema whose example is not a mapping.
    #[from(ignore)]
    #[display("unexpected type {_0} for object example")]
    ObjectExampleType(String),

    /// A response key that does not parse as a numeric status code.
    #[from(ignore)]
    #[display("invalid status code {_0}")]
    StatusCode(String),

    /// No operation matches the request method + path.
    #[from(ignore)]
    #[display("not specified operation: {method} {path}")]
    OperationNotFound {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
    },

    /// The body of a write-verb request is not a JSON object.
    #[display("Request Body Error: {_0}")]
    RequestBodyDecode(serde_json::Error),

    /// A required body field absent from the request.
    #[from(ignore)]
    #[display("empty required field {_0}")]
    MissingRequiredField(String),

    /// Generic errors.
    #[from(ignore)]
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
