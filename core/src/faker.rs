//! # Value Generation
//!
//! Synthetic values for schemas that carry an `x-faker` directive instead
//! of an example. The resolver calls the generator opaquely; unknown
//! directive names are the generator's concern, not the resolver's.

use serde_json::{json, Value};

/// A named-directive value generator.
pub trait ValueGenerator {
    /// Returns a representative value for the directive name.
    fn generate(&self, name: &str) -> Value;
}

/// The built-in generator: a fixed table of representative values, one per
/// supported directive. Deterministic, which keeps mock payloads stable
/// across requests and test runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faker;

impl Faker {
    /// Creates the built-in generator.
    pub fn new() -> Self {
        Faker
    }
}

impl ValueGenerator for Faker {
    fn generate(&self, name: &str) -> Value {
        match name {
            "uuid" => json!("380ed0b7-eb21-4ad4-acd0-efa90cf69c6a"),
            "firstname" => json!("Larry"),
            "lastname" => json!("Page"),
            "username" => json!("lpage"),
            "email" => json!("larry.page@example.com"),
            "password" => json!("correct-horse-battery-staple"),
            "phone" => json!("+1-202-555-0147"),
            "url" => json!("https://example.com"),
            "address" => json!("1600 Amphitheatre Parkway"),
            "city" => json!("Mountain View"),
            "country" => json!("United States"),
            "zip" => json!("94043"),
            "date" => json!("2006-01-02"),
            "time" => json!("15:04:05"),
            "datetime" => json!("2006-01-02T15:04:05Z"),
            "integer" => json!(42),
            "float" => json!(2.718),
            "boolean" => json!(true),
            // Unknown directives degrade to an empty string rather than
            // failing the build.
            _ => json!(""),
        }
    }
}
