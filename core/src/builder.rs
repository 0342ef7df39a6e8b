//! # Operation Builder
//!
//! Walks every path and declared method of the raw document and produces
//! the normalized [`Api`]: body requirement maps, resolved response
//! schemas, and normalized example payloads. Any resolution error aborts
//! the whole build; no partial model is ever returned.

use crate::api::{Api, FieldType, Operation, Response};
use crate::document::{Document, MediaTypeObject, PathOperation, ResponseObject};
use crate::error::{AppError, AppResult};
use crate::faker::ValueGenerator;
use crate::resolver::Resolver;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// The single media type served by the mock backend.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Builds the normalized API model from a raw document.
pub fn build(document: &Document, generator: &dyn ValueGenerator) -> AppResult<Api> {
    let resolver = Resolver::new(document, generator);
    let mut operations = Vec::new();

    for (path, item) in &document.paths {
        for (method, declared) in item.operations() {
            if let Some(raw) = declared {
                operations.push(convert_operation(document, &resolver, path, method, raw)?);
            }
        }
    }

    Ok(Api { operations })
}

fn convert_operation(
    document: &Document,
    resolver: &Resolver<'_>,
    path: &str,
    method: &str,
    raw: &PathOperation,
) -> AppResult<Operation> {
    let mut operation = Operation {
        method: method.to_string(),
        path: remove_trailing_slash(path),
        body: IndexMap::new(),
        responses: Vec::new(),
    };

    if let Some(media) = raw
        .request_body
        .as_ref()
        .and_then(|body| body.content.get(JSON_MEDIA_TYPE))
    {
        operation.body = body_fields(document, media)?;
    }

    for (code, response) in &raw.responses {
        operation
            .responses
            .push(convert_response(resolver, code, response)?);
    }

    Ok(operation)
}

/// Builds the Field Requirement Map: every name in `required` first, then a
/// type overlay from `properties`. A name required but never declared as a
/// property keeps an empty type.
fn body_fields(
    document: &Document,
    media: &MediaTypeObject,
) -> AppResult<IndexMap<String, FieldType>> {
    let node = if media.schema.reference.is_empty() {
        &media.schema
    } else {
        document.lookup_by_reference(&media.schema.reference)?
    };

    let mut fields = IndexMap::new();

    for name in &node.required {
        fields.insert(
            name.clone(),
            FieldType {
                required: true,
                schema_type: String::new(),
            },
        );
    }

    for (name, property) in &node.properties {
        let required = fields.get(name).map_or(false, |field| field.required);
        fields.insert(
            name.clone(),
            FieldType {
                required,
                schema_type: property.schema_type.clone(),
            },
        );
    }

    Ok(fields)
}

fn convert_response(
    resolver: &Resolver<'_>,
    code: &str,
    raw: &ResponseObject,
) -> AppResult<Response> {
    let status_code: u16 = code
        .parse()
        .map_err(|_| AppError::StatusCode(code.to_string()))?;

    let media = match raw.content.get(JSON_MEDIA_TYPE) {
        Some(media) => media,
        // Responses without JSON content carry only their status code.
        None => {
            return Ok(Response {
                status_code,
                ..Response::default()
            })
        }
    };

    let mut examples = IndexMap::with_capacity(media.examples.len() + 1);
    for (name, example) in &media.examples {
        examples.insert(
            name.clone(),
            normalize_example(example.value.as_ref(), &media.schema.schema_type),
        );
    }
    // The reserved empty label is the single-default-example convention:
    // the lexicographically smallest declared name wins.
    if let Some(first) = media.examples.keys().min() {
        examples.insert(
            String::new(),
            normalize_example(media.examples[first].value.as_ref(), &media.schema.schema_type),
        );
    }

    Ok(Response {
        status_code,
        media_type: JSON_MEDIA_TYPE.to_string(),
        schema: Some(resolver.resolve(&media.schema)?),
        example: normalize_example(media.example.as_ref(), &media.schema.schema_type),
        examples,
    })
}

/// Object- and array-shaped examples pass through untouched; an absent
/// example becomes the empty container matching the declared schema type,
/// so consumers never see null.
fn normalize_example(example: Option<&Value>, schema_type: &str) -> Value {
    match example {
        None | Some(Value::Null) => {
            if schema_type == "array" {
                Value::Array(Vec::new())
            } else {
                Value::Object(Map::new())
            }
        }
        Some(value) => value.clone(),
    }
}

/// Strips exactly one trailing `/` from a non-empty path.
pub fn remove_trailing_slash(path: &str) -> String {
    path.strip_suffix('/').unwrap_or(path).to_string()
}
