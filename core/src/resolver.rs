//! # Schema Resolver
//!
//! Converts raw schema nodes into the normalized [`Schema`] variants.
//! References are resolved eagerly and recursively against the document;
//! a visited stack of reference names turns a self-referential chain into
//! a deterministic `CyclicReference` error instead of unbounded recursion.

use crate::api::Schema;
use crate::document::{Document, SchemaNode};
use crate::error::{AppError, AppResult};
use crate::faker::ValueGenerator;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Resolves raw schema nodes against one document. Pure: no state survives
/// a `resolve` call, and the only side effect is invoking the generator.
pub struct Resolver<'a> {
    document: &'a Document,
    generator: &'a dyn ValueGenerator,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over the document and generator.
    pub fn new(document: &'a Document, generator: &'a dyn ValueGenerator) -> Self {
        Resolver {
            document,
            generator,
        }
    }

    /// Resolves one raw node into a normalized schema.
    pub fn resolve(&self, node: &SchemaNode) -> AppResult<Schema> {
        self.resolve_guarded(node, &mut Vec::new())
    }

    fn resolve_guarded(&self, node: &SchemaNode, chain: &mut Vec<String>) -> AppResult<Schema> {
        // 1. Reference wins over every inline field.
        if !node.reference.is_empty() {
            if chain.iter().any(|name| name == &node.reference) {
                return Err(AppError::CyclicReference(node.reference.clone()));
            }

            let target = self.document.lookup_by_reference(&node.reference)?;

            chain.push(node.reference.clone());
            let schema = self.resolve_guarded(target, chain)?;
            chain.pop();

            return Ok(schema);
        }

        // 2. A faker directive short-circuits the type dispatch.
        if !node.faker.is_empty() {
            return Ok(Schema::Faked {
                example: self.generator.generate(&node.faker),
            });
        }

        // 3. Type dispatch. Scalar example coercion is best effort: a
        // missing or mis-shaped example yields the zero value, not an error.
        match node.schema_type.as_str() {
            "boolean" => Ok(Schema::Boolean {
                example: node
                    .example
                    .as_ref()
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            }),
            "integer" => Ok(Schema::Integer {
                example: node.example.as_ref().and_then(Value::as_i64).unwrap_or(0),
            }),
            "number" => Ok(Schema::Float {
                example: node
                    .example
                    .as_ref()
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            }),
            "string" => Ok(Schema::String {
                example: node
                    .example
                    .as_ref()
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            }),
            "array" => {
                let items = node.items.as_deref().ok_or(AppError::EmptyArrayItems)?;
                let element = self.resolve_guarded(items, chain)?;

                Ok(Schema::Array {
                    items: Box::new(element),
                    example: parse_array_example(node.example.as_ref())?,
                })
            }
            "object" => {
                let mut properties = IndexMap::with_capacity(node.properties.len());
                for (name, property) in &node.properties {
                    properties.insert(name.clone(), self.resolve_guarded(property, chain)?);
                }

                Ok(Schema::Object {
                    properties,
                    example: parse_object_example(node.example.as_ref())?,
                })
            }
            other => Err(AppError::UnknownSchemaType(other.to_string())),
        }
    }
}

fn parse_array_example(example: Option<&Value>) -> AppResult<Vec<Value>> {
    match example {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(AppError::ArrayExampleType(json_type_name(other).into())),
    }
}

fn parse_object_example(example: Option<&Value>) -> AppResult<Map<String, Value>> {
    match example {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(AppError::ObjectExampleType(json_type_name(other).into())),
    }
}

/// JSON shape name used in example-type error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faker::Faker;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn node(yaml: &str) -> SchemaNode {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn resolve(document: &Document, raw: &SchemaNode) -> AppResult<Schema> {
        Resolver::new(document, &Faker::new()).resolve(raw)
    }

    #[test]
    fn test_scalar_examples_coerced() {
        let document = Document::default();

        let schema = resolve(&document, &node("{type: string, example: hi}")).unwrap();
        assert_eq!(schema, Schema::String { example: "hi".into() });

        let schema = resolve(&document, &node("{type: integer, example: 7}")).unwrap();
        assert_eq!(schema, Schema::Integer { example: 7 });

        let schema = resolve(&document, &node("{type: number, example: 1.5}")).unwrap();
        assert_eq!(schema, Schema::Float { example: 1.5 });

        let schema = resolve(&document, &node("{type: boolean, example: true}")).unwrap();
        assert_eq!(schema, Schema::Boolean { example: true });
    }

    #[test]
    fn test_mismatched_scalar_example_yields_zero_value() {
        let document = Document::default();

        let schema = resolve(&document, &node("{type: integer, example: nope}")).unwrap();
        assert_eq!(schema, Schema::Integer { example: 0 });

        let schema = resolve(&document, &node("{type: string}")).unwrap();
        assert_eq!(schema, Schema::String { example: "".into() });
    }

    #[test]
    fn test_object_without_example_gets_empty_mapping() {
        let document = Document::default();

        let schema = resolve(
            &document,
            &node("{type: object, properties: {id: {type: string}}}"),
        )
        .unwrap();

        match schema {
            Schema::Object { example, .. } => assert!(example.is_empty()),
            other => panic!("expected object schema, got {:?}", other),
        }
    }

    #[test]
    fn test_array_without_items_fails() {
        let document = Document::default();

        let err = resolve(&document, &node("{type: array}")).unwrap_err();
        assert!(matches!(err, AppError::EmptyArrayItems));
    }

    #[test]
    fn test_array_example_shape_checked() {
        let document = Document::default();

        let err = resolve(
            &document,
            &node("{type: array, items: {type: string}, example: oops}"),
        )
        .unwrap_err();
        match err {
            AppError::ArrayExampleType(shape) => assert_eq!(shape, "string"),
            other => panic!("expected ArrayExampleType, got {:?}", other),
        }
    }

    #[test]
    fn test_object_example_shape_checked() {
        let document = Document::default();

        let err = resolve(&document, &node("{type: object, example: [1, 2]}")).unwrap_err();
        match err {
            AppError::ObjectExampleType(shape) => assert_eq!(shape, "array"),
            other => panic!("expected ObjectExampleType, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_fails() {
        let document = Document::default();

        let err = resolve(&document, &node("{type: file}")).unwrap_err();
        match err {
            AppError::UnknownSchemaType(tag) => assert_eq!(tag, "file"),
            other => panic!("expected UnknownSchemaType, got {:?}", other),
        }
    }

    #[test]
    fn test_faker_directive_short_circuits_type() {
        let document = Document::default();

        let schema = resolve(&document, &node("{type: string, x-faker: firstname}")).unwrap();
        assert_eq!(
            schema,
            Schema::Faked {
                example: json!("Larry")
            }
        );
    }

    #[test]
    fn test_reference_resolves_like_the_target() {
        let document: Document = serde_yaml::from_str(
            r#"
components:
  schemas:
    User:
      type: object
      properties:
        id: {type: string, example: "42"}
"#,
        )
        .unwrap();

        let via_reference = resolve(&document, &node("{$ref: '#/components/schemas/User'}"));
        let direct = resolve(&document, &document.components.schemas["User"].clone());

        assert_eq!(via_reference.unwrap(), direct.unwrap());
    }

    #[test]
    fn test_nested_reference_resolved() {
        let document: Document = serde_yaml::from_str(
            r#"
components:
  schemas:
    User:
      type: object
      properties:
        address: {$ref: '#/components/schemas/Address'}
    Address:
      type: string
      example: Palo Alto
"#,
        )
        .unwrap();

        let schema = resolve(&document, &node("{$ref: '#/components/schemas/User'}")).unwrap();
        match schema {
            Schema::Object { properties, .. } => assert_eq!(
                properties["address"],
                Schema::String {
                    example: "Palo Alto".into()
                }
            ),
            other => panic!("expected object schema, got {:?}", other),
        }
    }

    #[test]
    fn test_cyclic_reference_rejected() {
        let document: Document = serde_yaml::from_str(
            r#"
components:
  schemas:
    Node:
      type: object
      properties:
        next: {$ref: '#/components/schemas/Node'}
"#,
        )
        .unwrap();

        let err = resolve(&document, &node("{$ref: '#/components/schemas/Node'}")).unwrap_err();
        assert!(matches!(err, AppError::CyclicReference(_)));
    }

    #[test]
    fn test_sibling_references_to_same_schema_allowed() {
        let document: Document = serde_yaml::from_str(
            r#"
components:
  schemas:
    Name:
      type: string
      example: Larry
    User:
      type: object
      properties:
        first: {$ref: '#/components/schemas/Name'}
        last: {$ref: '#/components/schemas/Name'}
"#,
        )
        .unwrap();

        resolve(&document, &node("{$ref: '#/components/schemas/User'}")).unwrap();
    }

    #[test]
    fn test_unresolved_reference_fails() {
        let document = Document::default();

        let err = resolve(&document, &node("{$ref: '#/components/schemas/Nope'}")).unwrap_err();
        assert!(matches!(err, AppError::UnresolvedReference(_)));
    }
}
