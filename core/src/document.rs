//! # Raw Document Model
//!
//! Serde structs for the OpenAPI v3 subset the mock backend consumes:
//! paths, per-method operations, request/response content, and schemas
//! with optional `$ref` pointers. YAML is a superset of JSON, so one
//! `serde_yaml` decode path covers both input formats. Fields the mock
//! backend does not care about (info, servers, tags, ...) are ignored.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// The only reference form honored by the lookup: a local pointer into
/// `components/schemas`.
const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// The as-parsed OpenAPI v3 document, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// Path templates in declaration order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable component schemas.
    #[serde(default)]
    pub components: Components,
}

impl Document {
    /// Deserializes a raw YAML or JSON document.
    pub fn parse(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Resolves a `$ref` pointer to the component schema it names.
    ///
    /// Only `#/components/schemas/<Name>` pointers are supported; anything
    /// else (external files, other component sections, unknown names) is an
    /// `UnresolvedReference` error.
    pub fn lookup_by_reference(&self, reference: &str) -> AppResult<&SchemaNode> {
        reference
            .strip_prefix(SCHEMA_REF_PREFIX)
            .and_then(|name| self.components.schemas.get(name))
            .ok_or_else(|| AppError::UnresolvedReference(reference.to_string()))
    }
}

/// The `components` section of the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// Named schemas addressable by `$ref`.
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaNode>,
}

/// One path entry with its per-method operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    /// GET operation, if declared.
    pub get: Option<PathOperation>,
    /// POST operation, if declared.
    pub post: Option<PathOperation>,
    /// PUT operation, if declared.
    pub put: Option<PathOperation>,
    /// PATCH operation, if declared.
    pub patch: Option<PathOperation>,
    /// DELETE operation, if declared.
    pub delete: Option<PathOperation>,
}

impl PathItem {
    /// The five supported methods with their declared operations, in the
    /// fixed GET/POST/PUT/PATCH/DELETE order.
    pub fn operations(&self) -> [(&'static str, Option<&PathOperation>); 5] {
        [
            ("GET", self.get.as_ref()),
            ("POST", self.post.as_ref()),
            ("PUT", self.put.as_ref()),
            ("PATCH", self.patch.as_ref()),
            ("DELETE", self.delete.as_ref()),
        ]
    }
}

/// One declared operation: request body plus responses keyed by status code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathOperation {
    /// Request body declaration, if any.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by their string status code, in declaration order.
    #[serde(default)]
    pub responses: IndexMap<String, ResponseObject>,
}

/// A request body: media types mapped to their content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    /// Content keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaTypeObject>,
}

/// A declared response: media types mapped to their content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseObject {
    /// Content keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaTypeObject>,
}

/// The schema and example payloads declared for one media type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaTypeObject {
    /// Content schema. An absent schema behaves as an empty node.
    #[serde(default)]
    pub schema: SchemaNode,
    /// Literal example payload.
    pub example: Option<Value>,
    /// Named example payloads, in declaration order.
    #[serde(default)]
    pub examples: IndexMap<String, ExampleObject>,
}

/// One named example.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExampleObject {
    /// The example payload.
    pub value: Option<Value>,
}

/// A raw schema node. A node with a non-empty `reference` defers every
/// other field to the referenced node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaNode {
    /// `$ref` pointer to a component schema. Empty when inline.
    #[serde(default, rename = "$ref")]
    pub reference: String,
    /// Type tag: boolean|integer|number|string|array|object.
    #[serde(default, rename = "type")]
    pub schema_type: String,
    /// Element schema, for arrays.
    pub items: Option<Box<SchemaNode>>,
    /// Field schemas, for objects, in declaration order.
    #[serde(default)]
    pub properties: IndexMap<String, SchemaNode>,
    /// Names of required fields.
    #[serde(default)]
    pub required: Vec<String>,
    /// Untyped example payload.
    pub example: Option<Value>,
    /// Synthetic-value generator directive. Empty when unset.
    #[serde(default, rename = "x-faker")]
    pub faker: String,
}
