//! Command-line mini-grammar parsing
//!
//! Messages, services and options are given on the command line as:
//! - `Name[field:type,field:type,...]`
//! - `Name[method:in:out,...]`, where `in`/`out` may be omitted and a
//!   leading `+` marks a stream
//! - `name:value`

use protog::{Message, Service};

/// Error parsing a command-line declaration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Message declaration is not `Name[...]`
    #[error("error parsing message `{0}`: expected Name[field:type,...]")]
    Message(String),

    /// Message field is not `field:type`
    #[error("error parsing message fields `{0}`: expected field:type")]
    MessageField(String),

    /// Service declaration is not `Name[...]`
    #[error("error parsing service `{0}`: expected Name[method:in:out,...]")]
    Service(String),

    /// Service method is not `method[:in[:out]]`
    #[error("error parsing service methods `{0}`: expected method:in:out")]
    ServiceMethod(String),

    /// Option is not `name:value`
    #[error("error parsing option `{0}`: expected name:value")]
    Option(String),
}

/// Parse `Name[field:type,...]`
pub fn parse_message(decl: &str) -> Result<Message, ParseError> {
    let (name, body) = split_declaration(decl).ok_or_else(|| ParseError::Message(decl.to_string()))?;

    let mut message = Message::new(name);
    for entry in entries(&body) {
        let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
        match parts.as_slice() {
            &[field, type_name] if !field.is_empty() && !type_name.is_empty() => {
                message = message.field(field, type_name);
            }
            _ => return Err(ParseError::MessageField(entry.to_string())),
        }
    }

    Ok(message)
}

/// Parse `Name[method:in:out,...]`
pub fn parse_service(decl: &str) -> Result<Service, ParseError> {
    let (name, body) = split_declaration(decl).ok_or_else(|| ParseError::Service(decl.to_string()))?;

    let mut service = Service::new(name);
    for entry in entries(&body) {
        let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
        let (method, input, output) = match parts.as_slice() {
            &[method] => (method, "", ""),
            &[method, input] => (method, input, ""),
            &[method, input, output] => (method, input, output),
            _ => return Err(ParseError::ServiceMethod(entry.to_string())),
        };
        if method.is_empty() {
            return Err(ParseError::ServiceMethod(entry.to_string()));
        }
        service = service.method(method, input, output);
    }

    Ok(service)
}

/// Parse `name:value`, splitting on the first `:`
pub fn parse_option(decl: &str) -> Result<(String, String), ParseError> {
    match decl.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ParseError::Option(decl.to_string())),
    }
}

/// Split `Name[body]` into the name and the body with `]` removed
fn split_declaration(decl: &str) -> Option<(&str, String)> {
    let (name, body) = decl.split_once('[')?;
    let name = name.trim();
    if name.is_empty() || body.contains('[') {
        return None;
    }
    Some((name, body.replace(']', "")))
}

/// Comma-separated entries; an empty body has none
fn entries(body: &str) -> Vec<&str> {
    if body.trim().is_empty() {
        return Vec::new();
    }
    body.split(',').map(str::trim).collect()
}
