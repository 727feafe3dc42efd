//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize record-image fixtures and module wiring so
//! tests across the crate and the tests/ directory share one setup.

use std::path::Path;
use std::sync::Arc;

use crate::constants::{
    APP_DATA_LEN, MII_LEN, TAG_RECORD_LEN, UUID_LEN, VARIANT_MARKER_LOGICAL,
};
use crate::record::date::PackedDate;
use crate::record::flags::{FLAG_APP_DATA_INITIALIZED, FLAG_SETTINGS_INITIALIZED};
use crate::record::layout::{logical, raw};
use crate::service::{Interface, install_interfaces};
use crate::storage::mock::MockStorage;

/// App id stored on the logical fixture image.
pub const TEST_APP_ID: u32 = 0x0004_0110;

/// Unique id stored on both fixture images.
pub const TEST_UUID: [u8; UUID_LEN] = [0x04, 0x92, 0x3A, 0xB1, 0x7C, 0x50, 0x80];

/// Encrypted-variant image with only the identification block filled in.
#[doc(hidden)]
pub fn raw_image() -> Vec<u8> {
    let mut bytes = vec![0u8; TAG_RECORD_LEN];
    bytes[raw::UUID..raw::UUID + UUID_LEN].copy_from_slice(&TEST_UUID);
    bytes[raw::CHAR_ID..raw::CHAR_ID + 2].copy_from_slice(&0x01C2u16.to_le_bytes());
    bytes[raw::CHAR_VARIANT] = 0x01;
    bytes[raw::FIGURE_TYPE] = 0x00;
    bytes[raw::MODEL_NUMBER..raw::MODEL_NUMBER + 2].copy_from_slice(&0x0C4Du16.to_be_bytes());
    bytes[raw::SERIES] = 0x05;
    bytes
}

/// Decrypted-variant image with settings and app data marked
/// initialized.
#[doc(hidden)]
pub fn logical_image() -> Vec<u8> {
    logical_image_with_flags(FLAG_SETTINGS_INITIALIZED | FLAG_APP_DATA_INITIALIZED | 0x03)
}

/// Decrypted-variant image with an explicit flags byte; everything else
/// matches [`logical_image`].
#[doc(hidden)]
pub fn logical_image_with_flags(flags: u8) -> Vec<u8> {
    let mut bytes = vec![0u8; TAG_RECORD_LEN];
    bytes[logical::VARIANT_MARKER] = VARIANT_MARKER_LOGICAL;
    bytes[logical::FLAGS] = flags;
    bytes[logical::COUNTRY] = 0x31;
    bytes[logical::SETUP_DATE..logical::SETUP_DATE + 2]
        .copy_from_slice(&PackedDate::pack(3, 14, 2015).as_raw().to_be_bytes());
    bytes[logical::LAST_WRITE_DATE..logical::LAST_WRITE_DATE + 2]
        .copy_from_slice(&PackedDate::pack(6, 2, 2016).as_raw().to_be_bytes());
    for (i, c) in "KOOPA".encode_utf16().enumerate() {
        let off = logical::NICKNAME + i * 2;
        bytes[off..off + 2].copy_from_slice(&c.to_be_bytes());
    }
    bytes[logical::MII..logical::MII + MII_LEN].copy_from_slice(&[0xAB; MII_LEN]);
    bytes[logical::WRITE_COUNT..logical::WRITE_COUNT + 2].copy_from_slice(&2u16.to_be_bytes());
    bytes[logical::APP_ID..logical::APP_ID + 4].copy_from_slice(&TEST_APP_ID.to_be_bytes());
    for i in 0..APP_DATA_LEN {
        bytes[logical::APP_DATA + i] = i as u8;
    }
    bytes[logical::UUID..logical::UUID + UUID_LEN].copy_from_slice(&TEST_UUID);
    bytes[logical::CHAR_ID..logical::CHAR_ID + 2].copy_from_slice(&0x01C2u16.to_le_bytes());
    bytes[logical::CHAR_VARIANT] = 0x01;
    bytes[logical::FIGURE_TYPE] = 0x00;
    bytes[logical::MODEL_NUMBER..logical::MODEL_NUMBER + 2]
        .copy_from_slice(&0x0C4Du16.to_be_bytes());
    bytes[logical::SERIES] = 0x05;
    bytes
}

/// Entry-group pair over a mock storage pre-seeded with `image` at
/// `path`. The storage handle stays usable for assertions.
#[doc(hidden)]
pub fn installed_with_image(path: &str, image: Vec<u8>) -> (Interface, Interface, Arc<MockStorage>) {
    let storage = Arc::new(MockStorage::new());
    storage.insert_image(path, image);
    let (user, manager) = install_interfaces(Box::new(Arc::clone(&storage)));
    (user, manager, storage)
}

/// Convenience: install, initialize, scan, and load `image` so the
/// returned interfaces sit at `TagInRange` with the record in place.
#[doc(hidden)]
pub fn interface_with_tag_in_range(
    path: &str,
    image: Vec<u8>,
) -> (Interface, Interface, Arc<MockStorage>) {
    let (user, manager, storage) = installed_with_image(path, image);
    user.initialize(1).expect("initialize");
    user.start_tag_scanning(0).expect("start scanning");
    assert!(user.load_tag(Path::new(path)), "fixture image must load");
    (user, manager, storage)
}
