//! # Normalized API Model
//!
//! The resolver's reference-free output: a flat list of operations, each
//! carrying its body requirements and candidate responses. Built once per
//! document load and immutable afterwards, so the matcher can read it from
//! any number of request-handling tasks without locking.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A schema with every reference resolved away, one variant per supported
/// shape. Every variant carries a concrete example; absent examples were
/// defaulted to the shape's zero value during resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// `type: boolean`.
    Boolean {
        /// Example value, `false` when the document had none.
        example: bool,
    },
    /// `type: integer`.
    Integer {
        /// Example value, `0` when the document had none.
        example: i64,
    },
    /// `type: number`.
    Float {
        /// Example value, `0.0` when the document had none.
        example: f64,
    },
    /// `type: string`.
    String {
        /// Example value, `""` when the document had none.
        example: String,
    },
    /// `type: array`.
    Array {
        /// Element schema.
        items: Box<Schema>,
        /// Example sequence, empty when the document had none.
        example: Vec<Value>,
    },
    /// `type: object`.
    Object {
        /// Field schemas, in declaration order.
        properties: IndexMap<String, Schema>,
        /// Example mapping, empty when the document had none.
        example: Map<String, Value>,
    },
    /// A schema with an `x-faker` directive; the generator's value stands
    /// in for the whole schema.
    Faked {
        /// The generated value.
        example: Value,
    },
}

impl Schema {
    /// Assembles a payload for this schema: scalar and faked examples
    /// verbatim; arrays and objects use their literal example when one was
    /// declared, otherwise a value built from the nested schemas (a
    /// one-element sequence for arrays, per-property examples for objects).
    pub fn example_value(&self) -> Value {
        match self {
            Schema::Boolean { example } => Value::Bool(*example),
            Schema::Integer { example } => Value::from(*example),
            Schema::Float { example } => Value::from(*example),
            Schema::String { example } => Value::String(example.clone()),
            Schema::Faked { example } => example.clone(),
            Schema::Array { items, example } => {
                if example.is_empty() {
                    Value::Array(vec![items.example_value()])
                } else {
                    Value::Array(example.clone())
                }
            }
            Schema::Object {
                properties,
                example,
            } => {
                if example.is_empty() {
                    let mut assembled = Map::new();
                    for (name, property) in properties {
                        assembled.insert(name.clone(), property.example_value());
                    }
                    Value::Object(assembled)
                } else {
                    Value::Object(example.clone())
                }
            }
        }
    }
}

/// Requirement and declared type of one request-body field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldType {
    /// Whether the field is listed in the schema's `required` set.
    pub required: bool,
    /// The raw type tag of the field. Empty when the field appears in
    /// `required` but not in `properties`.
    pub schema_type: String,
}

/// One method + path pair with its body requirements and responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    /// HTTP method: "GET", "POST", "PUT", "PATCH" or "DELETE".
    pub method: String,
    /// Path template with the trailing slash stripped.
    pub path: String,
    /// Field Requirement Map of the JSON request body. Empty for
    /// operations without one.
    pub body: IndexMap<String, FieldType>,
    /// Candidate responses, in declaration order. The first one doubles as
    /// the media-type fallback.
    pub responses: Vec<Response>,
}

/// One canned response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// HTTP status code.
    pub status_code: u16,
    /// Media type of the payload. Empty when the response declared no JSON
    /// content.
    pub media_type: String,
    /// Resolved payload schema. `None` when the response declared no JSON
    /// content.
    pub schema: Option<Schema>,
    /// Literal example payload, normalized to an empty container when the
    /// document had none.
    pub example: Value,
    /// Named example payloads. When any exist, the reserved `""` label
    /// holds the value of the lexicographically smallest name.
    pub examples: IndexMap<String, Value>,
}

impl Response {
    /// Picks the payload to serve: the named example for `name` if it
    /// exists, else the default (`""`) named example, else the literal
    /// example, else a value assembled from the schema.
    pub fn example_value(&self, name: &str) -> Value {
        if let Some(value) = self.examples.get(name) {
            return value.clone();
        }
        if let Some(value) = self.examples.get("") {
            return value.clone();
        }
        if self.has_literal_example() {
            return self.example.clone();
        }
        match &self.schema {
            Some(schema) => schema.example_value(),
            None => Value::Null,
        }
    }

    /// An empty container means the document declared no literal example;
    /// resolution fills those in so consumers never see null.
    fn has_literal_example(&self) -> bool {
        match &self.example {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        }
    }
}

/// The normalized API: every operation of the document, in declaration
/// order. The sole artifact handed to the request matcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Api {
    /// Operations in declaration order.
    pub operations: Vec<Operation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_schema() -> Schema {
        let mut properties = IndexMap::new();
        properties.insert(
            "id".to_string(),
            Schema::String {
                example: "42".to_string(),
            },
        );
        properties.insert("age".to_string(), Schema::Integer { example: 27 });
        Schema::Object {
            properties,
            example: Map::new(),
        }
    }

    #[test]
    fn test_object_example_assembled_from_properties() {
        assert_eq!(user_schema().example_value(), json!({"id": "42", "age": 27}));
    }

    #[test]
    fn test_array_example_wraps_element() {
        let schema = Schema::Array {
            items: Box::new(user_schema()),
            example: Vec::new(),
        };
        assert_eq!(schema.example_value(), json!([{"id": "42", "age": 27}]));
    }

    #[test]
    fn test_literal_array_example_wins() {
        let schema = Schema::Array {
            items: Box::new(Schema::Integer { example: 0 }),
            example: vec![json!(1), json!(2)],
        };
        assert_eq!(schema.example_value(), json!([1, 2]));
    }

    #[test]
    fn test_response_named_example_selection() {
        let mut examples = IndexMap::new();
        examples.insert("".to_string(), json!({"id": "a"}));
        examples.insert("alice".to_string(), json!({"id": "a"}));
        examples.insert("bob".to_string(), json!({"id": "b"}));

        let response = Response {
            status_code: 200,
            media_type: "application/json".to_string(),
            schema: Some(user_schema()),
            example: json!({}),
            examples,
        };

        assert_eq!(response.example_value("bob"), json!({"id": "b"}));
        // Unknown names fall back to the default label.
        assert_eq!(response.example_value("carol"), json!({"id": "a"}));
    }

    #[test]
    fn test_response_schema_fallback() {
        let response = Response {
            status_code: 200,
            media_type: "application/json".to_string(),
            schema: Some(user_schema()),
            example: json!({}),
            examples: IndexMap::new(),
        };

        assert_eq!(response.example_value(""), json!({"id": "42", "age": 27}));
    }

    #[test]
    fn test_response_literal_example_wins() {
        let response = Response {
            status_code: 200,
            media_type: "application/json".to_string(),
            schema: Some(user_schema()),
            example: json!({"id": "7"}),
            examples: IndexMap::new(),
        };

        assert_eq!(response.example_value(""), json!({"id": "7"}));
    }
}
