// nfcemu/src/error.rs

use thiserror::Error;

/// Internal error type for repository and storage failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Backing-store I/O failure while loading or saving an image.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// An image source produced the wrong number of bytes.
    #[error("invalid tag image length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required image length in bytes.
        expected: usize,
        /// Length the source actually produced.
        actual: usize,
    },

    /// An operation needed a loaded record but none is present.
    #[error("no tag image loaded")]
    NoTagLoaded,

    /// An operation needed the decrypted layout but the loaded image is
    /// encrypted.
    #[error("tag image is not decrypted")]
    NotDecrypted,

    /// A caller declared an app-data size that does not match its buffer.
    #[error("app data length mismatch: declared {declared}, buffer {actual}")]
    AppDataLengthMismatch {
        /// Size the caller declared, after clamping to region capacity.
        declared: usize,
        /// Length of the buffer the caller actually supplied.
        actual: usize,
    },

    /// Writeback was requested but no backing path is known.
    #[error("no backing file recorded for the loaded tag")]
    NoBackingFile,
}

/// Crate-wide result alias for internal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Status codes reported back to guest software.
///
/// The numeric values match the description field of the result codes the
/// real module returns; all of them carry an invalid-state summary on the
/// wire except the reserved corruption pair.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceError {
    /// The operation is not legal in the current tag state.
    #[error("command invalid for current tag state")]
    CommandInvalidForState,

    /// No application data region has been initialized on this tag.
    #[error("app data has not been initialized on this tag")]
    AppDataUninitialized,

    /// The tag has never been through initial setup.
    #[error("tag settings have not been set up")]
    AmiiboNotSetup,

    /// The requested app id does not match the one stored on the tag.
    #[error("app id does not match the id stored on the tag")]
    AppIdMismatch,

    /// Reserved for the unimplemented image integrity check.
    #[error("tag data corruption detected")]
    DataCorruption0,

    /// Reserved for the unimplemented image integrity check.
    #[error("tag data corruption detected in backup area")]
    DataCorruption1,
}

impl ServiceError {
    /// Numeric description value of this status code.
    pub fn code(&self) -> u32 {
        match self {
            Self::CommandInvalidForState => 512,
            Self::DataCorruption0 => 524,
            Self::DataCorruption1 => 536,
            Self::AppDataUninitialized => 544,
            Self::AmiiboNotSetup => 552,
            Self::AppIdMismatch => 568,
        }
    }
}

/// Result alias for operations dispatched on behalf of guest software.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
