// nfcemu/src/session.rs
//! Session lifecycle state and presence reconciliation.

use std::sync::Arc;

use log::debug;

use crate::event::SignalEvent;
use crate::types::{CommunicationStatus, TagState};

/// Direction of a presence change worth notifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeChange {
    /// A tag entered the field.
    Entered,
    /// The tag left the field.
    Left,
}

/// Pure transition function deriving the next lifecycle state from
/// physical presence. Returns the new state and the notification to
/// fire, if any. Reconciliation is the only source of range
/// notifications.
pub fn reconcile(state: TagState, tag_present: bool) -> (TagState, Option<RangeChange>) {
    match state {
        TagState::TagOutOfRange | TagState::Scanning if tag_present => {
            (TagState::TagInRange, Some(RangeChange::Entered))
        }
        TagState::TagInRange | TagState::TagDataLoaded | TagState::ExtendedHold
            if !tag_present =>
        {
            // A tag pulled mid-hold notifies immediately rather than
            // after first falling back to TagInRange.
            (TagState::TagOutOfRange, Some(RangeChange::Left))
        }
        _ => (state, None),
    }
}

/// Owns the lifecycle state, the reported communication status, and the
/// two range events. The events are created once for the lifetime of the
/// module and handed out to callers by reference count.
#[derive(Debug)]
pub struct Session {
    tag_state: TagState,
    comm_status: CommunicationStatus,
    tag_in_range_event: Arc<SignalEvent>,
    tag_out_of_range_event: Arc<SignalEvent>,
}

impl Session {
    /// Fresh session: uninitialized state, link reported up.
    pub fn new() -> Self {
        Self {
            tag_state: TagState::Uninitialized,
            comm_status: CommunicationStatus::Connected,
            tag_in_range_event: Arc::new(SignalEvent::new("nfc:tag_in_range_event")),
            tag_out_of_range_event: Arc::new(SignalEvent::new("nfc:tag_out_of_range_event")),
        }
    }

    /// Current lifecycle state.
    pub fn tag_state(&self) -> TagState {
        self.tag_state
    }

    /// Operation-driven state transition (presence-driven ones go through
    /// [`Session::reconcile`]).
    pub fn set_tag_state(&mut self, state: TagState) {
        self.tag_state = state;
    }

    /// Reported communication status.
    pub fn comm_status(&self) -> CommunicationStatus {
        self.comm_status
    }

    /// Handle to the entered-range event.
    pub fn tag_in_range_event(&self) -> Arc<SignalEvent> {
        Arc::clone(&self.tag_in_range_event)
    }

    /// Handle to the left-range event.
    pub fn tag_out_of_range_event(&self) -> Arc<SignalEvent> {
        Arc::clone(&self.tag_out_of_range_event)
    }

    /// Resynchronize the state with physical presence, firing at most one
    /// notification.
    pub fn reconcile(&mut self, tag_present: bool) {
        let (next, change) = reconcile(self.tag_state, tag_present);
        if next != self.tag_state {
            debug!(
                "tag state {} -> {} (present={})",
                self.tag_state, next, tag_present
            );
        }
        self.tag_state = next;
        match change {
            Some(RangeChange::Entered) => self.tag_in_range_event.signal(),
            Some(RangeChange::Left) => self.tag_out_of_range_event.signal(),
            None => {}
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
