#[path = "../common/mod.rs"]
mod common;

use nfcemu::types::{AppId, TagState};
use nfcemu::{APP_DATA_LEN, ServiceError};

#[test]
fn read_twice_returns_identical_bytes() {
    let (user, _manager, _storage) = common::fixtures::logical_in_range();
    let first = user.read_app_data().unwrap();
    let second = user.read_app_data().unwrap();
    assert_eq!(first, second);
}

#[test]
fn open_read_write_cycle() {
    let (user, _manager, _storage) = common::fixtures::logical_in_range();

    user.open_app_data(AppId::new(nfcemu::test_support::TEST_APP_ID))
        .unwrap();

    let mut data = user.read_app_data().unwrap();
    data[0] ^= 0xFF;
    user.write_app_data(&data, data.len()).unwrap();
    assert_eq!(user.read_app_data().unwrap(), data);
    assert_eq!(user.get_tag_state().unwrap(), TagState::TagDataLoaded);
}

#[test]
fn declared_size_mismatch_rejects_without_mutation() {
    let (user, _manager, _storage) = common::fixtures::logical_in_range();
    let before = user.read_app_data().unwrap();

    // Short declaration over a longer buffer.
    assert_eq!(
        user.write_app_data(&[1u8; 32], 16),
        Err(ServiceError::CommandInvalidForState)
    );
    // Oversized declaration clamps to capacity and then still mismatches
    // a short buffer.
    assert_eq!(
        user.write_app_data(&[1u8; 32], APP_DATA_LEN + 1),
        Err(ServiceError::CommandInvalidForState)
    );
    assert_eq!(user.read_app_data().unwrap(), before);
}

#[test]
fn partial_write_leaves_tail_untouched() {
    let (user, _manager, _storage) = common::fixtures::logical_in_range();
    let before = user.read_app_data().unwrap();

    user.write_app_data(&[0xCC; 16], 16).unwrap();
    let after = user.read_app_data().unwrap();
    assert_eq!(&after[..16], &[0xCC; 16]);
    assert_eq!(&after[16..], &before[16..]);
}

#[test]
fn initialize_write_rebinds_owner() {
    let (user, _manager, _storage) = common::fixtures::logical_in_range();
    let fresh = [0u8; APP_DATA_LEN];
    user.initialize_write_app_data(AppId::new(0x0102_0304), &fresh, APP_DATA_LEN)
        .unwrap();

    assert_eq!(
        user.open_app_data(AppId::new(nfcemu::test_support::TEST_APP_ID)),
        Err(ServiceError::AppIdMismatch)
    );
    user.open_app_data(AppId::new(0x0102_0304)).unwrap();
    assert_eq!(user.read_app_data().unwrap(), fresh);
}

#[test]
fn encrypted_tag_rejects_every_app_data_operation() {
    let (user, _manager, _storage) = {
        let (u, m, s) = common::fixtures::installed_raw();
        u.initialize(1).unwrap();
        u.start_tag_scanning(0).unwrap();
        assert!(u.load_tag(common::fixtures::tag_path()));
        (u, m, s)
    };

    assert_eq!(
        user.open_app_data(AppId::new(1)),
        Err(ServiceError::CommandInvalidForState)
    );
    assert_eq!(
        user.read_app_data(),
        Err(ServiceError::CommandInvalidForState)
    );
    assert_eq!(
        user.write_app_data(&[0; APP_DATA_LEN], APP_DATA_LEN),
        Err(ServiceError::CommandInvalidForState)
    );
    assert_eq!(
        user.initialize_write_app_data(AppId::new(1), &[0; APP_DATA_LEN], APP_DATA_LEN),
        Err(ServiceError::CommandInvalidForState)
    );
}
