//! Generic schema descriptions
//!
//! A description is a JSON-like map keyed by section name:
//!
//! ```text
//! {
//!   "syntax":  "proto3",
//!   "package": "greet.v1",
//!   "option":  [["go_package", "greetpb"]],
//!   "message": { "HelloRequest": { "name": "string" } },
//!   "service": { "Greeter": { "SayHello": { "in": "HelloRequest", "out": "" } } }
//! }
//! ```
//!
//! Sections are validated in canonical order and the first malformed one
//! fails the whole conversion. Unrecognized keys are ignored. Map order is
//! declaration order, which is what field tags are assigned from.

use serde_json::{Map, Value};

use crate::error::EncodeError;
use crate::schema::{Message, Method, Schema, Service, TypeRef};

/// Section key for the syntax declaration
pub const SYNTAX: &str = "syntax";
/// Section key for the package name
pub const PACKAGE: &str = "package";
/// Section key for file options
pub const OPTION: &str = "option";
/// Section key for messages
pub const MESSAGE: &str = "message";
/// Section key for services
pub const SERVICE: &str = "service";

/// Method descriptor key for the request type
pub const METHOD_IN: &str = "in";
/// Method descriptor key for the response type
pub const METHOD_OUT: &str = "out";

impl TryFrom<&Map<String, Value>> for Schema {
    type Error = EncodeError;

    fn try_from(description: &Map<String, Value>) -> Result<Self, Self::Error> {
        let mut schema = Schema::new();

        if let Some(value) = description.get(SYNTAX) {
            let syntax = value.as_str().ok_or(EncodeError::InvalidSyntaxType)?;
            schema = schema.with_syntax(syntax);
        }

        if let Some(value) = description.get(PACKAGE) {
            let package = value.as_str().ok_or(EncodeError::InvalidPackageType)?;
            schema = schema.with_package(package);
        }

        if let Some(value) = description.get(OPTION) {
            for (name, value) in parse_options(value)? {
                schema = schema.option(name, value);
            }
        }

        if let Some(value) = description.get(MESSAGE) {
            for message in parse_messages(value)? {
                schema = schema.message(message);
            }
        }

        if let Some(value) = description.get(SERVICE) {
            for service in parse_services(value)? {
                schema = schema.service(service);
            }
        }

        Ok(schema)
    }
}

/// Parse `[[name, value], ...]`
///
/// Pairs with fewer than two elements are skipped whatever they hold.
/// Otherwise the first two elements must be text; extra elements are ignored.
fn parse_options(value: &Value) -> Result<Vec<(&str, &str)>, EncodeError> {
    let pairs = value.as_array().ok_or(EncodeError::InvalidOptionType)?;

    let mut options = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let items = pair.as_array().ok_or(EncodeError::InvalidOptionType)?;
        if let [name, value, ..] = items.as_slice() {
            let name = name.as_str().ok_or(EncodeError::InvalidOptionType)?;
            let value = value.as_str().ok_or(EncodeError::InvalidOptionType)?;
            options.push((name, value));
        }
    }

    Ok(options)
}

/// Parse `{ MessageName: { field: type, ... }, ... }`
fn parse_messages(value: &Value) -> Result<Vec<Message>, EncodeError> {
    let messages = value.as_object().ok_or_else(|| {
        EncodeError::InvalidMessageType("expected a map of message names to fields".to_string())
    })?;

    let mut parsed = Vec::with_capacity(messages.len());
    for (name, fields) in messages {
        let fields = fields.as_object().ok_or_else(|| {
            EncodeError::InvalidMessageType(format!(
                "message `{name}` expects a map of field names to types"
            ))
        })?;

        let mut message = Message::new(name.as_str());
        for (field, type_name) in fields {
            let type_name = type_name.as_str().ok_or_else(|| {
                EncodeError::InvalidMessageType(format!(
                    "field `{name}.{field}` expects a type name"
                ))
            })?;
            message = message.field(field.as_str(), type_name);
        }
        parsed.push(message);
    }

    Ok(parsed)
}

/// Parse `{ ServiceName: { Method: { "in": type, "out": type }, ... }, ... }`
fn parse_services(value: &Value) -> Result<Vec<Service>, EncodeError> {
    let services = value.as_object().ok_or_else(|| {
        EncodeError::InvalidServiceType("expected a map of service names to methods".to_string())
    })?;

    let mut parsed = Vec::with_capacity(services.len());
    for (name, methods) in services {
        let methods = methods.as_object().ok_or_else(|| {
            EncodeError::InvalidServiceType(format!(
                "service `{name}` expects a map of method names to descriptors"
            ))
        })?;

        let mut service = Service::new(name.as_str());
        for (method, descriptor) in methods {
            service = service.rpc(parse_method(name, method, descriptor)?);
        }
        parsed.push(service);
    }

    Ok(parsed)
}

fn parse_method(service: &str, method: &str, descriptor: &Value) -> Result<Method, EncodeError> {
    let descriptor = descriptor.as_object().ok_or_else(|| {
        EncodeError::InvalidServiceMethodType(format!(
            "method `{service}.{method}` expects an object with `in` and `out`"
        ))
    })?;

    let type_token = |key: &str| -> Result<TypeRef, EncodeError> {
        match descriptor.get(key) {
            None | Some(Value::Null) => Ok(TypeRef::empty()),
            Some(Value::String(token)) => Ok(TypeRef::parse(token)),
            Some(_) => Err(EncodeError::InvalidServiceMethodType(format!(
                "method `{service}.{method}` expects `{key}` to be a type name"
            ))),
        }
    };

    Ok(Method {
        name: method.to_string(),
        input: type_token(METHOD_IN)?,
        output: type_token(METHOD_OUT)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> Result<Schema, EncodeError> {
        let map = value.as_object().cloned().unwrap_or_default();
        Schema::try_from(&map)
    }

    #[test]
    fn test_syntax_must_be_text() {
        assert_eq!(schema(json!({"syntax": 3})), Err(EncodeError::InvalidSyntaxType));
    }

    #[test]
    fn test_package_must_be_text() {
        assert_eq!(
            schema(json!({"syntax": "proto3", "package": ["a"]})),
            Err(EncodeError::InvalidPackageType)
        );
    }

    #[test]
    fn test_option_shapes() {
        assert_eq!(
            schema(json!({"option": "go_package"})),
            Err(EncodeError::InvalidOptionType)
        );
        assert_eq!(
            schema(json!({"option": ["go_package", "proto"]})),
            Err(EncodeError::InvalidOptionType)
        );
        assert_eq!(
            schema(json!({"option": [["go_package", 1]]})),
            Err(EncodeError::InvalidOptionType)
        );
    }

    #[test]
    fn test_short_option_pairs_are_skipped() {
        let parsed =
            schema(json!({"option": [["lonely"], [], [1], ["a", "b", 3]]})).unwrap();
        assert_eq!(parsed.options.len(), 1);
        assert_eq!(parsed.options[0].name, "a");
        assert_eq!(parsed.options[0].value, "b");
    }

    #[test]
    fn test_message_outer_and_inner_errors() {
        assert!(matches!(
            schema(json!({"message": "Hello"})),
            Err(EncodeError::InvalidMessageType(msg)) if msg.contains("map of message names")
        ));
        assert!(matches!(
            schema(json!({"message": {"Hello": "id"}})),
            Err(EncodeError::InvalidMessageType(msg)) if msg.contains("`Hello`")
        ));
        assert!(matches!(
            schema(json!({"message": {"Hello": {"id": 64}}})),
            Err(EncodeError::InvalidMessageType(msg)) if msg.contains("`Hello.id`")
        ));
    }

    #[test]
    fn test_service_errors() {
        assert!(matches!(
            schema(json!({"service": "Hello"})),
            Err(EncodeError::InvalidServiceType(_))
        ));
        assert!(matches!(
            schema(json!({"service": {"Hello": ["SayHello"]}})),
            Err(EncodeError::InvalidServiceType(msg)) if msg.contains("`Hello`")
        ));
        assert!(matches!(
            schema(json!({"service": {"Hello": {"SayHello": "Req"}}})),
            Err(EncodeError::InvalidServiceMethodType(_))
        ));
        assert!(matches!(
            schema(json!({"service": {"Hello": {"SayHello": {"in": 1, "out": ""}}}})),
            Err(EncodeError::InvalidServiceMethodType(msg)) if msg.contains("`in`")
        ));
    }

    #[test]
    fn test_first_error_in_canonical_order() {
        // Both sections are malformed; syntax is validated first.
        let result = schema(json!({"service": 1, "syntax": 3}));
        assert_eq!(result, Err(EncodeError::InvalidSyntaxType));
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let parsed = schema(json!({"syntax": "proto3", "import": "x.proto", "edition": 2023}));
        assert_eq!(parsed, Ok(Schema::new().with_syntax("proto3")));
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let parsed = schema(json!({
            "message": {"Zeta": {"z": "int32", "a": "int32"}, "Alpha": {}}
        }))
        .unwrap();

        let names: Vec<_> = parsed.messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        let fields: Vec<_> = parsed.messages[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["z", "a"]);
    }

    #[test]
    fn test_method_descriptor_defaults() {
        let parsed = schema(json!({
            "service": {"S": {"Ping": {}, "Watch": {"in": null, "out": "+Event"}}}
        }))
        .unwrap();

        let methods = &parsed.services[0].methods;
        assert!(methods[0].input.is_empty_type());
        assert!(methods[0].output.is_empty_type());
        assert!(methods[1].input.is_empty_type());
        assert_eq!(methods[1].output, TypeRef::stream("Event"));
    }
}
