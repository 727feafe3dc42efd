// nfcemu/src/service/scanning.rs
//! Lifecycle and scan-loop operations.

use std::sync::Arc;

use log::{debug, error, warn};

use super::Interface;
use crate::event::SignalEvent;
use crate::types::{CommunicationStatus, TagState};
use crate::{ServiceError, ServiceResult};

impl Interface {
    /// `Initialize` (0x01). The module must not have been initialized
    /// yet. `param` is 1 or 2 on real callers; it is accepted and
    /// ignored.
    pub fn initialize(&self, param: u8) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        nfc.require_state("Initialize", &[TagState::Uninitialized])?;
        nfc.session_mut().set_tag_state(TagState::NotScanning);
        warn!("(STUBBED) Initialize called, param={}", param);
        Ok(())
    }

    /// `Shutdown` (0x02). Always succeeds; only the session state
    /// resets, the repository keeps whatever it holds.
    pub fn shutdown(&self, param: u8) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        nfc.session_mut().set_tag_state(TagState::Uninitialized);
        warn!("(STUBBED) Shutdown called, param={}", param);
        Ok(())
    }

    /// `StartCommunication` (0x03). Stub; the emulated link is always
    /// up.
    pub fn start_communication(&self) -> ServiceResult<()> {
        warn!("(STUBBED) StartCommunication called");
        Ok(())
    }

    /// `StopCommunication` (0x04). Stub.
    pub fn stop_communication(&self) -> ServiceResult<()> {
        warn!("(STUBBED) StopCommunication called");
        Ok(())
    }

    /// `StartTagScanning` (0x05). `in_val` is normally 0 and ignored.
    pub fn start_tag_scanning(&self, in_val: u16) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        nfc.require_state(
            "StartTagScanning",
            &[TagState::NotScanning, TagState::TagOutOfRange],
        )?;
        nfc.session_mut().set_tag_state(TagState::Scanning);
        nfc.sync_tag_state();
        warn!("(STUBBED) StartTagScanning called, in_val={:04x}", in_val);
        Ok(())
    }

    /// `StopTagScanning` (0x06).
    pub fn stop_tag_scanning(&self) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        let state = nfc.session().tag_state();
        if state == TagState::Uninitialized || state == TagState::NotScanning {
            error!("StopTagScanning: invalid tag state {}", state);
            return Err(ServiceError::CommandInvalidForState);
        }
        nfc.session_mut().set_tag_state(TagState::NotScanning);
        debug!("StopTagScanning called");
        Ok(())
    }

    /// `LoadAmiiboData` (0x07). Image decryption and the digest check
    /// are intentional stubs: nothing is verified, the two
    /// DataCorruption codes stay reserved, and until the check exists no
    /// state validation happens here either.
    pub fn load_amiibo_data(&self) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        nfc.session_mut().set_tag_state(TagState::TagDataLoaded);
        warn!("(STUBBED) LoadAmiiboData called");
        Ok(())
    }

    /// `ResetTagScanState` (0x08). Returns a held tag to plain
    /// in-range.
    pub fn reset_tag_scan_state(&self) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        nfc.require_state(
            "ResetTagScanState",
            &[TagState::TagDataLoaded, TagState::ExtendedHold],
        )?;
        nfc.session_mut().set_tag_state(TagState::TagInRange);
        nfc.sync_tag_state();
        debug!("ResetTagScanState called");
        Ok(())
    }

    /// `GetTagInRangeEvent` (0x0B). Hands out the entered-range event.
    pub fn get_tag_in_range_event(&self) -> ServiceResult<Arc<SignalEvent>> {
        let nfc = self.nfc();
        nfc.require_state("GetTagInRangeEvent", &[TagState::NotScanning])?;
        debug!("GetTagInRangeEvent called");
        Ok(nfc.session().tag_in_range_event())
    }

    /// `GetTagOutOfRangeEvent` (0x0C). Hands out the left-range event.
    pub fn get_tag_out_of_range_event(&self) -> ServiceResult<Arc<SignalEvent>> {
        let nfc = self.nfc();
        nfc.require_state("GetTagOutOfRangeEvent", &[TagState::NotScanning])?;
        debug!("GetTagOutOfRangeEvent called");
        Ok(nfc.session().tag_out_of_range_event())
    }

    /// `GetTagState` (0x0D).
    pub fn get_tag_state(&self) -> ServiceResult<TagState> {
        let state = self.nfc().session().tag_state();
        debug!("GetTagState called");
        Ok(state)
    }

    /// `CommunicationGetStatus` (0x0F).
    pub fn communication_get_status(&self) -> ServiceResult<CommunicationStatus> {
        let status = self.nfc().session().comm_status();
        debug!("(STUBBED) CommunicationGetStatus called");
        Ok(status)
    }

    /// Unnamed command 0x1A: hold the in-range tag past the usual read
    /// flow.
    pub fn begin_extended_hold(&self) -> ServiceResult<()> {
        let mut nfc = self.nfc();
        nfc.require_state("BeginExtendedHold", &[TagState::TagInRange])?;
        nfc.session_mut().set_tag_state(TagState::ExtendedHold);
        debug!("BeginExtendedHold called");
        Ok(())
    }
}
