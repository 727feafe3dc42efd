// nfcemu/src/record/views.rs

use super::RecordBytes;
use super::date::PackedDate;
use super::layout::{self, logical, raw};
use crate::constants::{APP_DATA_LEN, MII_LEN, NICKNAME_CHARS, UUID_LEN};
use crate::types::{AppId, TagUuid};

/// Read access to a record through the cipher-text-like layout.
///
/// Only the identification block is meaningful before decryption; the
/// rest of the image is opaque.
pub struct RawView<'a> {
    pub(super) bytes: &'a RecordBytes,
}

impl RawView<'_> {
    /// Unique tag id.
    pub fn uuid(&self) -> TagUuid {
        let mut id = [0u8; UUID_LEN];
        id.copy_from_slice(&self.bytes[raw::UUID..raw::UUID + UUID_LEN]);
        TagUuid::from_bytes(id)
    }

    /// Numeric character id.
    pub fn char_id(&self) -> u16 {
        layout::le_u16(self.bytes, raw::CHAR_ID)
    }

    /// Character variant.
    pub fn char_variant(&self) -> u8 {
        self.bytes[raw::CHAR_VARIANT]
    }

    /// Figure kind.
    pub fn figure_type(&self) -> u8 {
        self.bytes[raw::FIGURE_TYPE]
    }

    /// Model number.
    pub fn model_number(&self) -> u16 {
        layout::be_u16(self.bytes, raw::MODEL_NUMBER)
    }

    /// Series the figure belongs to.
    pub fn series(&self) -> u8 {
        self.bytes[raw::SERIES]
    }
}

/// Read access to a record through the plain-text-like layout.
pub struct LogicalView<'a> {
    pub(super) bytes: &'a RecordBytes,
}

impl LogicalView<'_> {
    /// Unique tag id (trailer copy).
    pub fn uuid(&self) -> TagUuid {
        let mut id = [0u8; UUID_LEN];
        id.copy_from_slice(&self.bytes[logical::UUID..logical::UUID + UUID_LEN]);
        TagUuid::from_bytes(id)
    }

    /// Numeric character id.
    pub fn char_id(&self) -> u16 {
        layout::le_u16(self.bytes, logical::CHAR_ID)
    }

    /// Character variant.
    pub fn char_variant(&self) -> u8 {
        self.bytes[logical::CHAR_VARIANT]
    }

    /// Figure kind.
    pub fn figure_type(&self) -> u8 {
        self.bytes[logical::FIGURE_TYPE]
    }

    /// Model number.
    pub fn model_number(&self) -> u16 {
        layout::be_u16(self.bytes, logical::MODEL_NUMBER)
    }

    /// Series the figure belongs to.
    pub fn series(&self) -> u8 {
        self.bytes[logical::SERIES]
    }

    /// Mirror of byte 3 of page 0x4 on the physical tag.
    pub fn pagex4_byte3(&self) -> u8 {
        self.bytes[logical::PAGEX4_BYTE3]
    }

    /// Flags byte; see [`crate::record::flags`] for the bit tests.
    pub fn flags(&self) -> u8 {
        self.bytes[logical::FLAGS]
    }

    /// Country code.
    pub fn country(&self) -> u8 {
        self.bytes[logical::COUNTRY]
    }

    /// Packed date of initial setup.
    pub fn setup_date(&self) -> PackedDate {
        PackedDate::from_raw(layout::be_u16(self.bytes, logical::SETUP_DATE))
    }

    /// Packed date of the last writeback.
    pub fn last_write_date(&self) -> PackedDate {
        PackedDate::from_raw(layout::be_u16(self.bytes, logical::LAST_WRITE_DATE))
    }

    /// Number of times the tag has been written.
    pub fn write_count(&self) -> u16 {
        layout::be_u16(self.bytes, logical::WRITE_COUNT)
    }

    /// Id of the application owning the app-data region.
    pub fn app_id(&self) -> AppId {
        AppId::new(layout::be_u32(self.bytes, logical::APP_ID))
    }

    /// Display name as stored: 10 UTF-16 code units.
    pub fn nickname(&self) -> [u16; NICKNAME_CHARS] {
        let mut name = [0u16; NICKNAME_CHARS];
        for (i, slot) in name.iter_mut().enumerate() {
            *slot = layout::be_u16(self.bytes, logical::NICKNAME + i * 2);
        }
        name
    }

    /// Copy of the owner Mii blob.
    pub fn mii(&self) -> [u8; MII_LEN] {
        let mut mii = [0u8; MII_LEN];
        mii.copy_from_slice(&self.bytes[logical::MII..logical::MII + MII_LEN]);
        mii
    }

    /// Copy of the application data region.
    pub fn app_data(&self) -> [u8; APP_DATA_LEN] {
        let mut data = [0u8; APP_DATA_LEN];
        data.copy_from_slice(&self.bytes[logical::APP_DATA..logical::APP_DATA + APP_DATA_LEN]);
        data
    }
}

/// Mutable access to the fields writebacks and app-data writes touch.
pub struct LogicalViewMut<'a> {
    pub(super) bytes: &'a mut RecordBytes,
}

impl LogicalViewMut<'_> {
    /// Number of times the tag has been written.
    pub fn write_count(&self) -> u16 {
        layout::be_u16(self.bytes, logical::WRITE_COUNT)
    }

    /// Replace the write counter.
    pub fn set_write_count(&mut self, count: u16) {
        layout::put_be_u16(self.bytes, logical::WRITE_COUNT, count);
    }

    /// Replace the packed last-write date.
    pub fn set_last_write_date(&mut self, date: PackedDate) {
        layout::put_be_u16(self.bytes, logical::LAST_WRITE_DATE, date.as_raw());
    }

    /// Replace the owning application id.
    pub fn set_app_id(&mut self, app_id: AppId) {
        layout::put_be_u32(self.bytes, logical::APP_ID, app_id.as_u32());
    }

    /// Copy `data` into the head of the application data region. The
    /// caller must have validated `data.len()` against the region
    /// capacity.
    pub fn copy_app_data(&mut self, data: &[u8]) {
        debug_assert!(data.len() <= APP_DATA_LEN);
        self.bytes[logical::APP_DATA..logical::APP_DATA + data.len()].copy_from_slice(data);
    }
}
