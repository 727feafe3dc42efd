// nfcemu/src/service/info.rs
//! Information queries over the loaded record.

use log::{debug, warn};

use super::Interface;
use super::replies::{AmiiboConfig, AmiiboSettings, IdentificationBlock, TagInfo};
use crate::constants::{APP_DATA_LEN, NICKNAME_CHARS, PLACEHOLDER_WRITE_DATE, TAG_INFO_ID_LEN, UUID_LEN};
use crate::record::{View, flags};
use crate::types::TagState;
use crate::{ServiceError, ServiceResult};

impl Interface {
    /// `GetTagInfo` (0x11). Identifies the tag in the field.
    pub fn get_tag_info(&self) -> ServiceResult<TagInfo> {
        let nfc = self.nfc();
        nfc.require_state(
            "GetTagInfo",
            &[
                TagState::TagInRange,
                TagState::TagDataLoaded,
                TagState::ExtendedHold,
            ],
        )?;
        let record = nfc.require_record("GetTagInfo")?;
        let uuid = match record.view() {
            View::Raw(v) => v.uuid(),
            View::Logical(v) => v.uuid(),
        };
        let mut id = [0u8; TAG_INFO_ID_LEN];
        id[..UUID_LEN].copy_from_slice(uuid.as_bytes());
        debug!("GetTagInfo called");
        Ok(TagInfo {
            id_offset_size: UUID_LEN as u16,
            reserved: 0x0,
            tag_type: 0x2,
            id,
        })
    }

    /// `GetAmiiboSettings` (0x17). Always produces a settings block: the
    /// populated one, or a zeroed one paired with `AmiiboNotSetup` when
    /// the tag has never been through setup.
    pub fn get_amiibo_settings(&self) -> (ServiceResult<()>, AmiiboSettings) {
        let nfc = self.nfc();
        let view = match nfc.require_logical("GetAmiiboSettings") {
            Ok(view) => view,
            Err(err) => return (Err(err), AmiiboSettings::default()),
        };
        if !flags::settings_initialized(view.flags()) {
            warn!("GetAmiiboSettings: tag has not been set up");
            return (Err(ServiceError::AmiiboNotSetup), AmiiboSettings::default());
        }

        let mut nickname = [0u16; NICKNAME_CHARS + 1];
        nickname[..NICKNAME_CHARS].copy_from_slice(&view.nickname());
        let setup = view.setup_date();
        let settings = AmiiboSettings {
            mii: view.mii(),
            nickname,
            // Only the low 4 bits are surfaced to the guest.
            flags: view.flags() & 0xF,
            country: view.country(),
            setup_year: setup.year(),
            setup_month: setup.month(),
            setup_day: setup.day(),
        };
        debug!("GetAmiiboSettings called");
        (Ok(()), settings)
    }

    /// `GetAmiiboConfig` (0x18). A raw image answers with fixed
    /// placeholder write metadata, since those fields are unreadable
    /// before decryption.
    pub fn get_amiibo_config(&self) -> ServiceResult<AmiiboConfig> {
        let nfc = self.nfc();
        let record = nfc.require_record("GetAmiiboConfig")?;
        let config = match record.view() {
            View::Raw(v) => {
                let (month, day, year) = PLACEHOLDER_WRITE_DATE;
                AmiiboConfig {
                    last_write_year: year,
                    last_write_month: month,
                    last_write_day: day,
                    write_count: 1,
                    char_id: v.char_id(),
                    char_variant: v.char_variant(),
                    series: v.series(),
                    model_number: v.model_number(),
                    figure_type: v.figure_type(),
                    pagex4_byte3: 0x0,
                    appdata_size: 0,
                }
            }
            View::Logical(v) => {
                let date = v.last_write_date();
                AmiiboConfig {
                    last_write_year: date.year(),
                    last_write_month: date.month(),
                    last_write_day: date.day(),
                    write_count: v.write_count(),
                    char_id: v.char_id(),
                    char_variant: v.char_variant(),
                    series: v.series(),
                    model_number: v.model_number(),
                    figure_type: v.figure_type(),
                    pagex4_byte3: 0x0,
                    appdata_size: APP_DATA_LEN as u16,
                }
            }
        };
        debug!("GetAmiiboConfig called");
        Ok(config)
    }

    /// `GetIdentificationBlock` (0x1B). The character identity, readable
    /// from either variant.
    pub fn get_identification_block(&self) -> ServiceResult<IdentificationBlock> {
        let nfc = self.nfc();
        nfc.require_state(
            "GetIdentificationBlock",
            &[TagState::TagDataLoaded, TagState::ExtendedHold],
        )?;
        let record = nfc.require_record("GetIdentificationBlock")?;
        let block = match record.view() {
            View::Raw(v) => IdentificationBlock {
                char_id: v.char_id(),
                char_variant: v.char_variant(),
                series: v.series(),
                model_number: v.model_number(),
                figure_type: v.figure_type(),
            },
            View::Logical(v) => IdentificationBlock {
                char_id: v.char_id(),
                char_variant: v.char_variant(),
                series: v.series(),
                model_number: v.model_number(),
                figure_type: v.figure_type(),
            },
        };
        debug!("GetIdentificationBlock called");
        Ok(block)
    }
}
