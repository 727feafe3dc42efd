// nfcemu/src/record/layout.rs
//! Field offsets and endianness helpers for the two record layouts.
//!
//! Every multi-byte field has a fixed per-field endianness that must be
//! reproduced exactly for byte-for-byte compatibility with real tag
//! dumps: most fields are big-endian, the two character-id fields are
//! legacy little-endian.

use super::RecordBytes;
use crate::constants::{APP_DATA_LEN, MII_LEN, NICKNAME_CHARS, TAG_RECORD_LEN, UUID_LEN};

/// Offsets of the cipher-text-like layout.
pub mod raw {
    /// 7-byte unique id.
    pub const UUID: usize = 0x00;
    /// Numeric character id (u16, little-endian).
    pub const CHAR_ID: usize = 0x54;
    /// Character variant byte.
    pub const CHAR_VARIANT: usize = 0x56;
    /// Figure kind byte.
    pub const FIGURE_TYPE: usize = 0x57;
    /// Model number (u16, big-endian).
    pub const MODEL_NUMBER: usize = 0x58;
    /// Series byte.
    pub const SERIES: usize = 0x5A;
}

/// Offsets of the plain-text-like layout.
pub mod logical {
    /// Mirror of byte 3 of page 0x4 on the physical tag.
    pub const PAGEX4_BYTE3: usize = 0x2B;
    /// Flags byte; see [`crate::record::flags`].
    pub const FLAGS: usize = 0x2C;
    /// Country code byte.
    pub const COUNTRY: usize = 0x2D;
    /// CRC mismatch counter (u16 BE); stored, never validated.
    pub const CRC_MISMATCH_COUNT: usize = 0x2E;
    /// Packed setup date (u16 BE).
    pub const SETUP_DATE: usize = 0x30;
    /// Packed last-write date (u16 BE).
    pub const LAST_WRITE_DATE: usize = 0x32;
    /// Settings CRC32 (u32 BE); stored, never validated.
    pub const CRC32: usize = 0x34;
    /// Display name: 10 UTF-16 code units, each big-endian.
    pub const NICKNAME: usize = 0x38;
    /// Owner Mii blob.
    pub const MII: usize = 0x4C;
    /// Owning title id (u64 BE).
    pub const TITLE_ID: usize = 0xAC;
    /// Write counter (u16 BE).
    pub const WRITE_COUNT: usize = 0xB4;
    /// Application id (u32 BE).
    pub const APP_ID: usize = 0xB6;
    /// HMAC-SHA256 over the record; stored, never validated.
    pub const HMAC_SHA256: usize = 0xBC;
    /// Length of the HMAC field.
    pub const HMAC_SHA256_LEN: usize = 0x20;
    /// Guest-writable application data region.
    pub const APP_DATA: usize = 0xDC;
    /// 7-byte unique id (trailer copy).
    pub const UUID: usize = 0x1D4;
    /// Numeric character id (u16, little-endian).
    pub const CHAR_ID: usize = 0x1DC;
    /// Character variant byte.
    pub const CHAR_VARIANT: usize = 0x1DE;
    /// Figure kind byte.
    pub const FIGURE_TYPE: usize = 0x1DF;
    /// Model number (u16, big-endian).
    pub const MODEL_NUMBER: usize = 0x1E0;
    /// Series byte.
    pub const SERIES: usize = 0x1E2;
    /// Variant marker byte; 0x02 identifies a decrypted image.
    pub const VARIANT_MARKER: usize = 0x1E3;
    /// Reserved tail region closing the extent.
    pub const RESERVED_TAIL: usize = 0x1E4;
    /// Length of the reserved tail.
    pub const RESERVED_TAIL_LEN: usize = 0x38;
}

// Layout sanity: field spans tile the 0x21C-byte extent exactly.
const _: () = assert!(logical::NICKNAME + NICKNAME_CHARS * 2 == logical::MII);
const _: () = assert!(logical::MII + MII_LEN == logical::TITLE_ID);
const _: () = assert!(logical::HMAC_SHA256 + logical::HMAC_SHA256_LEN == logical::APP_DATA);
const _: () = assert!(logical::APP_DATA + APP_DATA_LEN == 0x1B4);
const _: () = assert!(logical::UUID + UUID_LEN + 1 == logical::CHAR_ID);
const _: () = assert!(logical::VARIANT_MARKER + 1 == logical::RESERVED_TAIL);
const _: () = assert!(logical::RESERVED_TAIL + logical::RESERVED_TAIL_LEN == TAG_RECORD_LEN);
const _: () = assert!(raw::UUID + UUID_LEN <= raw::CHAR_ID);
const _: () = assert!(raw::MODEL_NUMBER + 2 == raw::SERIES);

pub(super) fn le_u16(bytes: &RecordBytes, off: usize) -> u16 {
    u16::from_le_bytes([bytes[off], bytes[off + 1]])
}

pub(super) fn be_u16(bytes: &RecordBytes, off: usize) -> u16 {
    u16::from_be_bytes([bytes[off], bytes[off + 1]])
}

pub(super) fn be_u32(bytes: &RecordBytes, off: usize) -> u32 {
    u32::from_be_bytes([bytes[off], bytes[off + 1], bytes[off + 2], bytes[off + 3]])
}

pub(super) fn put_be_u16(bytes: &mut RecordBytes, off: usize, value: u16) {
    bytes[off..off + 2].copy_from_slice(&value.to_be_bytes());
}

pub(super) fn put_be_u32(bytes: &mut RecordBytes, off: usize, value: u32) {
    bytes[off..off + 4].copy_from_slice(&value.to_be_bytes());
}
