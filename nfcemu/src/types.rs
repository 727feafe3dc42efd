// nfcemu/src/types.rs

use std::convert::TryFrom;

use derive_more::Display;

use crate::Error;
use crate::constants::UUID_LEN;

/// Lifecycle state of the emulated tag session.
///
/// Every operation declares the subset of states it accepts and is
/// rejected with `CommandInvalidForState` outside it, before any side
/// effect. Discriminants are the values reported to guest software.
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagState {
    /// The module has not been initialized by the guest yet.
    Uninitialized = 0,
    /// Initialized but not looking for tags.
    NotScanning = 1,
    /// Actively polling for a tag to enter the field.
    Scanning = 2,
    /// A tag is present and ready to be read.
    TagInRange = 3,
    /// The tag left the field while a session was open.
    TagOutOfRange = 4,
    /// Tag data has been loaded for access.
    TagDataLoaded = 5,
    /// Post-load hold entered by command 0x1A.
    ExtendedHold = 6,
}

/// Reported communication status. Cosmetic only; not coupled to
/// [`TagState`] transitions in this core.
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommunicationStatus {
    /// Link not brought up.
    Uninitialized = 0,
    /// Link negotiation in progress.
    Connecting = 1,
    /// Link established. The emulated link is always in this state.
    Connected = 2,
}

/// Unique tag id - newtype over the 7-byte id both layouts carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagUuid([u8; UUID_LEN]);

impl TagUuid {
    /// Wrap a 7-byte id.
    pub fn from_bytes(bytes: [u8; UUID_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw id bytes.
    pub fn as_bytes(&self) -> &[u8; UUID_LEN] {
        &self.0
    }

    /// Lowercase hex rendering, for diagnostics.
    pub fn to_hex(&self) -> String {
        use std::fmt::Write;
        let mut s = String::with_capacity(UUID_LEN * 2);
        for b in self.0 {
            // write! never fails writing to a String
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }
}

impl TryFrom<&[u8]> for TagUuid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != UUID_LEN {
            return Err(Error::InvalidLength {
                expected: UUID_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; UUID_LEN];
        arr.copy_from_slice(&bytes[..UUID_LEN]);
        Ok(Self(arr))
    }
}

/// Application identifier scoping the app-data region (u32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppId(u32);

impl AppId {
    /// Wrap a raw app id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw id value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// On-tag byte form (the record stores the id big-endian).
    pub fn to_be_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Read an id from its on-tag byte form.
    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}
