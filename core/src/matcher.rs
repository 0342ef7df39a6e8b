//! # Request Matcher
//!
//! Maps an inbound method + path + body + media-type tuple to one canned
//! response of the normalized model. A pure, stateless query: the model is
//! passed in explicitly, nothing persists across calls, and concurrent use
//! needs no locking.

use crate::api::{Api, Operation, Response};
use crate::error::{AppError, AppResult};
use serde_json::{Map, Value};

/// One inbound request, as seen by the matcher.
#[derive(Debug, Clone, Copy)]
pub struct FindResponseParams<'a> {
    /// Request path, e.g. `/users/42`.
    pub path: &'a str,
    /// Request method, matched case-sensitively.
    pub method: &'a str,
    /// Raw request body. Only inspected for POST/PUT/PATCH.
    pub body: Option<&'a [u8]>,
    /// Desired response media type.
    pub media_type: &'a str,
}

/// Finds the response for a request.
///
/// Fails with `OperationNotFound` when no operation matches method + path,
/// `RequestBodyDecode` when a write verb carries a non-object body, and
/// `MissingRequiredField` when a required body field is absent. When no
/// response carries the desired media type, the first declared response is
/// returned as a best-effort fallback rather than an error.
pub fn find_response<'a>(
    api: &'a Api,
    params: &FindResponseParams<'_>,
) -> AppResult<&'a Response> {
    let operation =
        find_operation(api, params).ok_or_else(|| AppError::OperationNotFound {
            method: params.method.to_string(),
            path: params.path.to_string(),
        })?;

    if matches!(params.method, "POST" | "PUT" | "PATCH") {
        check_required_fields(operation, params.body.unwrap_or_default())?;
    }

    operation
        .responses
        .iter()
        .find(|response| response.media_type == params.media_type)
        .or_else(|| operation.responses.first())
        .ok_or_else(|| {
            AppError::General(format!(
                "no responses declared for {} {}",
                operation.method, operation.path
            ))
        })
}

fn find_operation<'a>(api: &'a Api, params: &FindResponseParams<'_>) -> Option<&'a Operation> {
    api.operations
        .iter()
        .find(|operation| {
            operation.method == params.method
                && path_matches_template(params.path, &operation.path)
        })
}

fn check_required_fields(operation: &Operation, body: &[u8]) -> AppResult<()> {
    let decoded: Map<String, Value> =
        serde_json::from_slice(body).map_err(AppError::RequestBodyDecode)?;

    for (name, field) in &operation.body {
        if field.required && !decoded.contains_key(name) {
            return Err(AppError::MissingRequiredField(name.clone()));
        }
    }

    Ok(())
}

/// Segment-wise path-template match: equal segment counts, and each
/// template segment either is a `{...}` placeholder or equals the request
/// segment byte for byte. No partial-segment wildcards, no regex.
pub fn path_matches_template(path: &str, template: &str) -> bool {
    let path_segments: Vec<&str> = path.split('/').collect();
    let template_segments: Vec<&str> = template.split('/').collect();

    if path_segments.len() != template_segments.len() {
        return false;
    }

    path_segments
        .iter()
        .zip(&template_segments)
        .all(|(given, declared)| {
            (declared.starts_with('{') && declared.ends_with('}')) || given == declared
        })
}
