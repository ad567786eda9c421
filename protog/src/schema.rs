//! Typed schema description
//!
//! The typed schema is what the renderer consumes. Every collection keeps
//! declaration order, which is the order fields are numbered and methods are
//! emitted in. Declaring a name twice replaces the earlier entry in place,
//! the same way inserting an existing key into an ordered map would.

use std::fmt;

/// The well-known empty message type
pub const EMPTY_TYPE: &str = "google.protobuf.Empty";

/// Leading marker on a type token for a streaming parameter
pub const STREAM_SENTINEL: char = '+';

/// A complete schema description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Syntax declaration (e.g., "proto3")
    pub syntax: Option<String>,

    /// Package name
    pub package: Option<String>,

    /// File-level options
    pub options: Vec<ProtoOption>,

    /// Message types
    pub messages: Vec<Message>,

    /// RPC services
    pub services: Vec<Service>,
}

/// A file-level `option "name" = "value";` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoOption {
    /// Option name
    pub name: String,

    /// Option value
    pub value: String,
}

/// A message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message name
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<Field>,
}

/// A message field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name
    pub name: String,

    /// Field type name (e.g., "int64", "HelloRequest")
    pub type_name: String,
}

/// An RPC service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Service name
    pub name: String,

    /// Methods in declaration order
    pub methods: Vec<Method>,
}

/// An RPC method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name
    pub name: String,

    /// Request type
    pub input: TypeRef,

    /// Response type
    pub output: TypeRef,
}

/// A request or response type of an RPC method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRef {
    /// Type name, `None` for the well-known empty type
    pub name: Option<String>,

    /// Whether the parameter is a stream
    pub streaming: bool,
}

impl TypeRef {
    /// A plain, non-streaming type; a blank name is the empty type
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: non_blank(name.into()),
            streaming: false,
        }
    }

    /// A streaming type; a blank name streams the empty type
    pub fn stream(name: impl Into<String>) -> Self {
        Self {
            name: non_blank(name.into()),
            streaming: true,
        }
    }

    /// The well-known empty type
    pub fn empty() -> Self {
        Self::default()
    }

    /// Interpret a raw type token
    ///
    /// A blank token is the empty type. A token starting with
    /// [`STREAM_SENTINEL`] is a stream of the remaining type, and a bare
    /// sentinel is a stream of the empty type.
    pub fn parse(token: &str) -> Self {
        if token.trim().is_empty() {
            return Self::empty();
        }

        match token.strip_prefix(STREAM_SENTINEL) {
            Some(rest) => Self::stream(rest),
            None => Self::named(token),
        }
    }

    /// Whether this resolves to the well-known empty type
    pub fn is_empty_type(&self) -> bool {
        self.declared_name().is_none()
    }

    /// The resolved type name, without the stream keyword
    pub fn type_name(&self) -> &str {
        self.declared_name().unwrap_or(EMPTY_TYPE)
    }

    /// The name as declared, if it is not blank
    fn declared_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

fn non_blank(name: String) -> Option<String> {
    if name.trim().is_empty() { None } else { Some(name) }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.streaming {
            write!(f, "stream {}", self.type_name())
        } else {
            f.write_str(self.type_name())
        }
    }
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the syntax declaration
    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    /// Set the package name
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Append a file-level option
    ///
    /// Options are a list, not a map: repeating a name emits it twice.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(ProtoOption {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a message, replacing any message with the same name
    pub fn message(mut self, message: Message) -> Self {
        upsert(&mut self.messages, message, |m| &m.name);
        self
    }

    /// Add a service, replacing any service with the same name
    pub fn service(mut self, service: Service) -> Self {
        upsert(&mut self.services, service, |s| &s.name);
        self
    }
}

impl Message {
    /// Create a message with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field, replacing any field with the same name
    pub fn field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let field = Field {
            name: name.into(),
            type_name: type_name.into(),
        };
        upsert(&mut self.fields, field, |f| &f.name);
        self
    }
}

impl Service {
    /// Create a service with no methods
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Add a method from raw `in`/`out` type tokens
    ///
    /// See [`TypeRef::parse`] for how the tokens are interpreted.
    pub fn method(self, name: impl Into<String>, input: &str, output: &str) -> Self {
        self.rpc(Method {
            name: name.into(),
            input: TypeRef::parse(input),
            output: TypeRef::parse(output),
        })
    }

    /// Add a method, replacing any method with the same name
    pub fn rpc(mut self, method: Method) -> Self {
        upsert(&mut self.methods, method, |m| &m.name);
        self
    }
}

/// Replace the entry with the same key in place, or append
fn upsert<T>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> &String) {
    match items.iter().position(|existing| key(existing) == key(&item)) {
        Some(index) => items[index] = item,
        None => items.push(item),
    }
}
