// Byte-level layout checks: the codec must read and write images that
// stay byte-identical to real tag dumps.

#[path = "../common/mod.rs"]
mod common;

use std::path::Path;

use nfcemu::record::TagRecord;
use nfcemu::record::date::PackedDate;
use nfcemu::repository::TagRepository;
use nfcemu::storage::mock::MockStorage;
use nfcemu::test_support;
use nfcemu::types::AppId;
use nfcemu::{APP_DATA_LEN, TAG_RECORD_LEN};
use std::sync::Arc;

#[test]
fn logical_fields_sit_at_fixed_offsets() {
    let image = test_support::logical_image();
    assert_eq!(image.len(), TAG_RECORD_LEN);

    // Variant marker.
    assert_eq!(image[0x1E3], 0x02);
    // Packed setup date 2015-03-14, big-endian at 0x30.
    assert_eq!(&image[0x30..0x32], &hex::decode("718f").unwrap()[..]);
    // Write count 2, big-endian at 0xB4.
    assert_eq!(&image[0xB4..0xB6], &[0x00, 0x02]);
    // App id, big-endian at 0xB6.
    assert_eq!(
        &image[0xB6..0xBA],
        &test_support::TEST_APP_ID.to_be_bytes()[..]
    );
    // Character id is legacy little-endian, in the trailer at 0x1DC.
    assert_eq!(&image[0x1DC..0x1DE], &[0xC2, 0x01]);
    // Model number is big-endian right next to it at 0x1E0.
    assert_eq!(&image[0x1E0..0x1E2], &[0x0C, 0x4D]);

    // The typed view agrees with the hand-placed bytes.
    let record = TagRecord::try_from_slice(&image).unwrap();
    let view = record.logical().unwrap();
    assert_eq!(view.setup_date(), PackedDate::pack(3, 14, 2015));
    assert_eq!(view.write_count(), 2);
    assert_eq!(view.app_id(), AppId::new(test_support::TEST_APP_ID));
    assert_eq!(view.char_id(), 0x01C2);
    assert_eq!(view.model_number(), 0x0C4D);
}

#[test]
fn raw_fields_sit_at_fixed_offsets() {
    let image = test_support::raw_image();

    // Unique id at the head of the image.
    assert_eq!(&image[..7], &test_support::TEST_UUID);
    // Character id little-endian at 0x54, model number big-endian at 0x58.
    assert_eq!(&image[0x54..0x56], &[0xC2, 0x01]);
    assert_eq!(&image[0x58..0x5A], &[0x0C, 0x4D]);
}

#[test]
fn writeback_touches_only_write_metadata() {
    let storage = Arc::new(MockStorage::new());
    let original = test_support::logical_image();
    storage.insert_image(common::fixtures::TAG_PATH, original.clone());

    let mut repo = TagRepository::new(Box::new(Arc::clone(&storage)));
    repo.load(Path::new(common::fixtures::TAG_PATH)).unwrap();
    repo.persist_and_increment().unwrap();

    let saved = storage.saved();
    assert_eq!(saved.len(), 1);
    let written = &saved[0].1;
    assert_eq!(written.len(), TAG_RECORD_LEN);

    // Every byte outside last_write_date (0x32..0x34) and write_count
    // (0xB4..0xB6) must be untouched.
    for (off, (&before, &after)) in original.iter().zip(written.iter()).enumerate() {
        let is_write_meta = (0x32..0x34).contains(&off) || (0xB4..0xB6).contains(&off);
        if !is_write_meta {
            assert_eq!(before, after, "byte at offset {:#x} changed", off);
        }
    }
    assert_eq!(&written[0x32..0x34], &[0xAD, 0x8E]);
    assert_eq!(&written[0xB4..0xB6], &[0x00, 0x03]);
}

#[test]
fn app_data_region_spans_0xdc_to_0x1b4() {
    let image = test_support::logical_image();
    let record = TagRecord::try_from_slice(&image).unwrap();
    let data = record.logical().unwrap().app_data();
    assert_eq!(data.len(), APP_DATA_LEN);
    assert_eq!(data[0], image[0xDC]);
    assert_eq!(data[APP_DATA_LEN - 1], image[0x1B3]);
}
