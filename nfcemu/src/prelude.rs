// nfcemu/src/prelude.rs

//! Flat re-exports of the types most consumers need.

pub use crate::constants::{APP_DATA_LEN, TAG_RECORD_LEN, UUID_LEN};
pub use crate::event::SignalEvent;
pub use crate::record::date::PackedDate;
pub use crate::record::{
    LogicalView, LogicalViewMut, RawView, RecordBytes, TagRecord, Variant, View, classify, flags,
};
pub use crate::repository::TagRepository;
pub use crate::service::replies::{AmiiboConfig, AmiiboSettings, IdentificationBlock, TagInfo};
pub use crate::service::{Interface, NfcModule, SharedModule, install_interfaces};
pub use crate::session::{RangeChange, Session, reconcile};
pub use crate::storage::{FsStorage, TagStorage};
pub use crate::{
    AppId, CommunicationStatus, Error, Result, ServiceError, ServiceResult, TagState, TagUuid,
};
