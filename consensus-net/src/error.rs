//! Error types for subprotocol registration.

use thiserror::Error;

/// Errors raised while building the version table or registering protocols.
///
/// Both indicate a build or deployment mismatch and are fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// No message count is known for the requested version.
    #[error("unknown protocol version {name}/{version}")]
    UnknownProtocolVersion { name: String, version: u32 },

    /// A version is marked legacy but the table has no message count for it.
    #[error("legacy protocol {name}/{version} has no message count")]
    LegacyVersionWithoutLength { name: String, version: u32 },
}

/// Convenience result type for protocol registration.
pub type Result<T> = std::result::Result<T, ProtocolError>;
