//! Error types for schema encoding
//!
//! Only the generic description pathway can fail. Rendering a typed
//! [`Schema`](crate::Schema) is infallible.

/// Error raised while validating a generic schema description
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The `syntax` payload is not text
    #[error("syntax expects a string")]
    InvalidSyntaxType,

    /// The `package` payload is not text
    #[error("package expects a string")]
    InvalidPackageType,

    /// The `option` payload is not a list of text pairs
    #[error("option expects a list of [name, value] string pairs")]
    InvalidOptionType,

    /// The `message` payload is malformed, at the message or the field level
    #[error("invalid message: {0}")]
    InvalidMessageType(String),

    /// The `service` payload is malformed at the service level
    #[error("invalid service: {0}")]
    InvalidServiceType(String),

    /// A service method descriptor is malformed
    #[error("invalid service method: {0}")]
    InvalidServiceMethodType(String),
}
