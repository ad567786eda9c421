//! protog: render protobuf schema descriptions into `.proto` documents
//!
//! The renderer is write-only: it turns a description into proto text and
//! never parses proto text back.
//!
//! Two entry points share one renderer:
//! - [`Renderer::render`] takes a typed [`Schema`] and cannot fail
//! - [`encode`] takes a generic, JSON-like description keyed by section name
//!   and validates it first
//!
//! ```
//! use protog::{Message, Renderer, Schema, Service};
//!
//! let schema = Schema::new()
//!     .with_syntax("proto3")
//!     .with_package("greet.v1")
//!     .message(Message::new("HelloRequest").field("name", "string"))
//!     .service(Service::new("Greeter").method("SayHello", "HelloRequest", ""));
//!
//! let proto = Renderer::new().render(&schema);
//! assert!(proto.contains("import \"google/protobuf/empty.proto\";"));
//! assert!(proto.contains("rpc SayHello (HelloRequest) returns (google.protobuf.Empty) {};"));
//! ```

#![deny(missing_docs)]

pub mod description;
mod error;
pub mod imports;
mod render;
pub mod schema;

pub use error::EncodeError;
pub use render::Renderer;
pub use schema::{Field, Message, Method, ProtoOption, Schema, Service, TypeRef};

use serde_json::{Map, Value};

/// Validate a generic description and render it with default settings
pub fn encode(description: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    encode_with(&Renderer::default(), description)
}

/// Validate a generic description and render it with `renderer`
///
/// Nothing is rendered unless every section is valid.
pub fn encode_with(
    renderer: &Renderer,
    description: &Map<String, Value>,
) -> Result<Vec<u8>, EncodeError> {
    let schema = Schema::try_from(description)?;
    Ok(renderer.render(&schema).into_bytes())
}
