//! Naming style hints
//!
//! Protobuf convention is UpperCamelCase for messages, services and methods
//! and snake_case for fields. Hints are logged only; names are rendered as
//! given.

use heck::{ToSnakeCase, ToUpperCamelCase};
use protog::Schema;

/// A name that does not follow protobuf naming convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleHint {
    /// What kind of declaration (e.g., "message", "field")
    pub kind: &'static str,
    /// The name as declared
    pub name: String,
    /// The conventional spelling
    pub suggestion: String,
}

/// Collect naming hints for every declaration in `schema`
pub fn check(schema: &Schema) -> Vec<StyleHint> {
    let mut hints = Vec::new();

    for message in &schema.messages {
        push_if_differs(&mut hints, "message", &message.name, message.name.to_upper_camel_case());
        for field in &message.fields {
            push_if_differs(&mut hints, "field", &field.name, field.name.to_snake_case());
        }
    }

    for service in &schema.services {
        push_if_differs(&mut hints, "service", &service.name, service.name.to_upper_camel_case());
        for method in &service.methods {
            push_if_differs(&mut hints, "method", &method.name, method.name.to_upper_camel_case());
        }
    }

    hints
}

fn push_if_differs(hints: &mut Vec<StyleHint>, kind: &'static str, name: &str, suggestion: String) {
    if name != suggestion {
        hints.push(StyleHint {
            kind,
            name: name.to_string(),
            suggestion,
        });
    }
}
