// nfcemu/src/service/app_data.rs
//! Application-data operations and the stored-data writeback.

use log::{debug, error, info};

use super::Interface;
use crate::constants::APP_DATA_LEN;
use crate::record::flags;
use crate::types::{AppId, TagState};
use crate::{ServiceError, ServiceResult};

impl Interface {
    /// `OpenAppData` (0x13). Checks the requested app against the one
    /// stored on the tag.
    pub fn open_app_data(&self, app_id: AppId) -> ServiceResult<()> {
        let nfc = self.nfc();
        let view = nfc.require_logical("OpenAppData")?;
        let result = if view.app_id() != app_id {
            Err(ServiceError::AppIdMismatch)
        } else if !flags::app_data_initialized(view.flags()) {
            Err(ServiceError::AppDataUninitialized)
        } else {
            Ok(())
        };
        info!("OpenAppData called");
        result
    }

    /// `InitializeWriteAppData` (0x14). Writes a fresh app-data region
    /// and records the owning app id. Length mismatches are rejected
    /// with no mutation.
    pub fn initialize_write_app_data(
        &self,
        app_id: AppId,
        data: &[u8],
        declared_size: usize,
    ) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        nfc.require_logical("InitializeWriteAppData")?;
        match nfc
            .repository_mut()
            .initialize_app_data(app_id, data, declared_size)
        {
            Ok(()) => {
                debug!("InitializeWriteAppData called");
                Ok(())
            }
            Err(err) => {
                error!("InitializeWriteAppData rejected: {}", err);
                Err(ServiceError::CommandInvalidForState)
            }
        }
    }

    /// `ReadAppData` (0x15). Copies out the app-data region and marks
    /// the tag data as loaded.
    pub fn read_app_data(&self) -> ServiceResult<[u8; APP_DATA_LEN]> {
        let mut nfc = self.nfc();
        nfc.require_logical("ReadAppData")?;
        let state = nfc.session().tag_state();
        if state == TagState::Uninitialized {
            error!("ReadAppData: invalid tag state {}", state);
            return Err(ServiceError::CommandInvalidForState);
        }
        let data = match nfc.repository().read_app_data() {
            Ok(data) => data,
            Err(err) => {
                error!("ReadAppData failed: {}", err);
                return Err(ServiceError::CommandInvalidForState);
            }
        };
        nfc.session_mut().set_tag_state(TagState::TagDataLoaded);
        info!("ReadAppData called");
        Ok(data)
    }

    /// `WriteAppData` (0x16). A `declared_size`/buffer mismatch is
    /// rejected with no mutation and no state change; on success the
    /// bytes land in the region and the tag data counts as loaded.
    pub fn write_app_data(&self, data: &[u8], declared_size: usize) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        nfc.require_logical("WriteAppData")?;
        let state = nfc.session().tag_state();
        if state == TagState::Uninitialized {
            error!("WriteAppData: invalid tag state {}", state);
            return Err(ServiceError::CommandInvalidForState);
        }
        match nfc.repository_mut().write_app_data(data, declared_size) {
            Ok(()) => {
                nfc.session_mut().set_tag_state(TagState::TagDataLoaded);
                info!("WriteAppData called");
                Ok(())
            }
            Err(err) => {
                error!("WriteAppData rejected: {}", err);
                Err(ServiceError::CommandInvalidForState)
            }
        }
    }

    /// `UpdateStoredAmiiboData` (0x09). Stamps the write metadata,
    /// persists the full image to its backing path, and takes the tag
    /// out of the field. Every precondition or I/O failure reports
    /// `CommandInvalidForState` and commits nothing.
    pub fn update_stored_amiibo_data(&self) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        let state = nfc.session().tag_state();
        if state != TagState::TagDataLoaded {
            error!(
                "UpdateStoredAmiiboData: tag state was {} instead of {}",
                state,
                TagState::TagDataLoaded
            );
            return Err(ServiceError::CommandInvalidForState);
        }
        match nfc.repository_mut().persist_and_increment() {
            Ok(()) => {
                nfc.sync_tag_state();
                info!("UpdateStoredAmiiboData called");
                Ok(())
            }
            Err(err) => {
                error!("UpdateStoredAmiiboData failed: {}", err);
                Err(ServiceError::CommandInvalidForState)
            }
        }
    }
}
