#[path = "../common/mod.rs"]
mod common;

use nfcemu::record::TagRecord;
use nfcemu::types::{CommunicationStatus, TagState};
use nfcemu::{ServiceError, UUID_LEN};

// The full guest-visible session: initialize, scan, tag arrival, reads,
// writeback, tag departure.
#[test]
fn guest_session_walkthrough() {
    let (user, manager, storage) = common::fixtures::installed_logical();

    user.initialize(1).unwrap();
    assert_eq!(user.get_tag_state().unwrap(), TagState::NotScanning);
    assert_eq!(
        user.communication_get_status().unwrap(),
        CommunicationStatus::Connected
    );

    // Event handles are only available before scanning starts.
    let entered = user.get_tag_in_range_event().unwrap();
    let left = user.get_tag_out_of_range_event().unwrap();

    user.start_tag_scanning(0).unwrap();
    assert_eq!(user.get_tag_state().unwrap(), TagState::Scanning);

    // The host drops a tag into the field.
    assert!(user.load_tag(common::fixtures::tag_path()));
    assert_eq!(user.get_tag_state().unwrap(), TagState::TagInRange);
    assert!(entered.try_take());
    assert!(!entered.try_take());
    assert!(!left.try_take());

    // Identification works from either entry group.
    let info = manager.get_tag_info().unwrap();
    assert_eq!(info.id_offset_size, UUID_LEN as u16);
    assert_eq!(&info.id[..UUID_LEN], &nfcemu::test_support::TEST_UUID);

    user.load_amiibo_data().unwrap();
    assert_eq!(user.get_tag_state().unwrap(), TagState::TagDataLoaded);

    let block = user.get_identification_block().unwrap();
    assert_eq!(block.char_id, 0x01C2);

    let config = user.get_amiibo_config().unwrap();
    assert_eq!(config.write_count, 2);

    // Writeback persists and takes the tag out of range.
    user.update_stored_amiibo_data().unwrap();
    assert_eq!(user.get_tag_state().unwrap(), TagState::TagOutOfRange);
    assert!(left.try_take());
    assert!(!left.try_take());

    let saved = storage.saved();
    assert_eq!(saved.len(), 1);
    let written = TagRecord::try_from_slice(&saved[0].1).unwrap();
    assert_eq!(written.logical().unwrap().write_count(), 3);

    // The record is gone until the next load.
    assert_eq!(
        user.get_amiibo_config(),
        Err(ServiceError::CommandInvalidForState)
    );

    // Scanning again finds nothing until the host reloads a tag.
    user.start_tag_scanning(0).unwrap();
    assert_eq!(user.get_tag_state().unwrap(), TagState::Scanning);
    assert!(user.load_tag(common::fixtures::tag_path()));
    assert_eq!(user.get_tag_state().unwrap(), TagState::TagInRange);
    assert!(entered.try_take());

    user.shutdown(0).unwrap();
    assert_eq!(user.get_tag_state().unwrap(), TagState::Uninitialized);
}

#[test]
fn removal_during_hold_notifies_immediately() {
    let (user, _manager, _storage) = common::fixtures::logical_in_range();
    user.begin_extended_hold().unwrap();

    let module = user.module();
    let left = {
        let nfc = module.lock().unwrap();
        nfc.session().tag_out_of_range_event()
    };

    user.remove_tag();
    assert_eq!(user.get_tag_state().unwrap(), TagState::TagOutOfRange);
    assert!(left.try_take());
}

#[test]
fn both_entry_groups_see_one_tag() {
    let (user, manager, _storage) = common::fixtures::logical_in_range();

    // Privileged group holds the tag; ordinary group sees the transition.
    manager.load_amiibo_data().unwrap();
    assert_eq!(user.get_tag_state().unwrap(), TagState::TagDataLoaded);

    let from_user = user.get_tag_info().unwrap();
    let from_manager = manager.get_tag_info().unwrap();
    assert_eq!(from_user, from_manager);
}
