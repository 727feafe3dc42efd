// nfcemu/src/constants.rs
//! Record-format constants shared across the crate

/// Fixed byte extent of a tag record image, common to both variants.
pub const TAG_RECORD_LEN: usize = 0x21C;

/// Length of the guest-writable application data region.
pub const APP_DATA_LEN: usize = 0xD8;

/// Length of a tag's unique id.
pub const UUID_LEN: usize = 7;

/// Length of the owner Mii blob stored on a decrypted tag.
pub const MII_LEN: usize = 0x60;

/// Number of display-name characters stored on a decrypted tag.
pub const NICKNAME_CHARS: usize = 10;

/// Length of the id buffer in a `GetTagInfo` reply.
pub const TAG_INFO_ID_LEN: usize = 0x28;

/// Value of the variant marker byte that identifies a decrypted image.
pub const VARIANT_MARKER_LOGICAL: u8 = 0x02;

/// Date stamped as `last_write_date` when a tag is written back, as
/// (month, day, year).
// TODO: stamp the real current date once the module grows a clock source.
pub const PLACEHOLDER_WRITE_DATE: (u8, u8, u16) = (11, 21, 2014);
