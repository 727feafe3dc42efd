#[path = "../common/mod.rs"]
mod common;

use nfcemu::ServiceError;
use nfcemu::record::flags::FLAG_APP_DATA_INITIALIZED;
use nfcemu::service::replies::AmiiboSettings;
use nfcemu::test_support;

#[test]
fn settings_flag_unset_yields_not_setup_and_zeroed_block() {
    // App data exists, but the settings app never ran.
    let image = test_support::logical_image_with_flags(FLAG_APP_DATA_INITIALIZED);
    let (user, _manager, _storage) =
        test_support::interface_with_tag_in_range(common::fixtures::TAG_PATH, image);

    let (status, settings) = user.get_amiibo_settings();
    assert_eq!(status, Err(ServiceError::AmiiboNotSetup));
    assert_eq!(settings, AmiiboSettings::default());
}

#[test]
fn settings_survive_repeated_queries() {
    let (user, _manager, _storage) = common::fixtures::logical_in_range();
    let (first_status, first) = user.get_amiibo_settings();
    let (second_status, second) = user.get_amiibo_settings();
    first_status.unwrap();
    second_status.unwrap();
    assert_eq!(first, second);
}

#[test]
fn settings_decode_the_stored_block() {
    let (user, _manager, _storage) = common::fixtures::logical_in_range();
    let (status, settings) = user.get_amiibo_settings();
    status.unwrap();

    // Nickname: stored characters plus the zero terminator slot.
    let name: String = settings
        .nickname
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| char::from_u32(c as u32).unwrap())
        .collect();
    assert_eq!(name, "KOOPA");
    assert_eq!(settings.nickname[10], 0);

    assert_eq!(settings.country, 0x31);
    assert_eq!(
        (settings.setup_year, settings.setup_month, settings.setup_day),
        (2015, 3, 14)
    );
    // Setup bits are masked off the reported flags.
    assert_eq!(settings.flags & 0xF0, 0);
}

#[test]
fn settings_against_encrypted_tag_reject() {
    let (user, _manager, _storage) = {
        let (u, m, s) = common::fixtures::installed_raw();
        u.initialize(1).unwrap();
        u.start_tag_scanning(0).unwrap();
        assert!(u.load_tag(common::fixtures::tag_path()));
        (u, m, s)
    };
    let (status, settings) = user.get_amiibo_settings();
    assert_eq!(status, Err(ServiceError::CommandInvalidForState));
    assert_eq!(settings, AmiiboSettings::default());
}
