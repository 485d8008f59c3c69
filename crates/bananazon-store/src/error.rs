//! # Store Error Types
//!
//! Error types for storage, the persisted-state codec and configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Errors Stop                                    │
//! │                                                                         │
//! │  CartStorage::save ──► StoreError::Io ───────────┐                      │
//! │                                                   │                      │
//! │  persist::decode ────► StoreError::Serialization  ├──► CartStore logs    │
//! │                        StoreError::UnsupportedVersion    (warn!) and    │
//! │                                                   │      carries on     │
//! │                                                                         │
//! │  StoreConfig::load ──► StoreError::ConfigParse ──────► caller, or       │
//! │                        StoreError::InvalidConfig       load_or_default  │
//! │                                                                         │
//! │  Cart operations on CartStore never return a StoreError.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for storage and config operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Reading or writing the storage backend failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No platform data directory could be determined for file storage.
    #[error("Could not determine a storage directory")]
    NoStorageDir,

    /// Key is not usable as a storage key.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    // =========================================================================
    // Codec Errors
    // =========================================================================
    /// Persisted value is not valid JSON for the envelope.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted envelope was written by an incompatible version.
    #[error("Unsupported persisted cart version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// store.toml could not be parsed.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written back out.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config parsed but holds unusable values.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::UnsupportedVersion {
            found: 3,
            expected: 0,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported persisted cart version 3 (expected 0)"
        );

        let err = StoreError::InvalidKey("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid storage key '../etc'");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
