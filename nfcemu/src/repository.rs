// nfcemu/src/repository.rs
//! Owner of the currently loaded tag image, its presence flag, and its
//! backing path.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::constants::{APP_DATA_LEN, PLACEHOLDER_WRITE_DATE};
use crate::record::date::PackedDate;
use crate::record::{LogicalView, TagRecord};
use crate::storage::TagStorage;
use crate::types::AppId;
use crate::{Error, Result};

/// Holds the single loaded tag shared by every session interface.
///
/// A record lives exactly from a successful [`TagRepository::load`] to
/// the next eviction. All mutating entry points run under the module
/// lock; nothing here is separately synchronized.
pub struct TagRepository {
    storage: Box<dyn TagStorage>,
    record: Option<TagRecord>,
    path: PathBuf,
    present: bool,
}

impl TagRepository {
    /// Empty repository over the given persistence collaborator.
    pub fn new(storage: Box<dyn TagStorage>) -> Self {
        Self {
            storage,
            record: None,
            path: PathBuf::new(),
            present: false,
        }
    }

    /// Load and classify the image at `path`, marking the tag physically
    /// present. On any failure nothing changes.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let bytes = self.storage.load(path)?;
        let record = TagRecord::try_from_slice(&bytes)?;
        info!(
            "loaded {} tag image from {}",
            if record.is_logical() {
                "a decrypted"
            } else {
                "an encrypted"
            },
            path.display()
        );
        self.record = Some(record);
        self.path = path.to_path_buf();
        self.present = true;
        Ok(())
    }

    /// Take the tag out of the field, destroying the loaded record. The
    /// path is retained for display until the next load.
    pub fn evict(&mut self) {
        self.present = false;
        self.record = None;
    }

    /// Whether a tag is physically in the field.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Backing path of the most recently loaded tag (empty when none).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded record, if any.
    pub fn record(&self) -> Option<&TagRecord> {
        self.record.as_ref()
    }

    fn logical(&self) -> Result<LogicalView<'_>> {
        let record = self.record.as_ref().ok_or(Error::NoTagLoaded)?;
        record.logical().ok_or(Error::NotDecrypted)
    }

    /// Copy out the application data region.
    pub fn read_app_data(&self) -> Result<[u8; APP_DATA_LEN]> {
        Ok(self.logical()?.app_data())
    }

    /// Validate `declared_size` and copy `data` into the application data
    /// region. A declared size over the region capacity is clamped before
    /// the comparison against the buffer length; a remaining mismatch
    /// rejects the write with no mutation.
    pub fn write_app_data(&mut self, data: &[u8], declared_size: usize) -> Result<()> {
        let size = validated_app_data_size(data, declared_size)?;
        let record = self.record.as_mut().ok_or(Error::NoTagLoaded)?;
        let mut view = record.logical_mut().ok_or(Error::NotDecrypted)?;
        view.copy_app_data(&data[..size]);
        Ok(())
    }

    /// Same validation as [`TagRepository::write_app_data`]; additionally
    /// records `app_id` as the region's owner.
    pub fn initialize_app_data(
        &mut self,
        app_id: AppId,
        data: &[u8],
        declared_size: usize,
    ) -> Result<()> {
        let size = validated_app_data_size(data, declared_size)?;
        let record = self.record.as_mut().ok_or(Error::NoTagLoaded)?;
        let mut view = record.logical_mut().ok_or(Error::NotDecrypted)?;
        view.copy_app_data(&data[..size]);
        view.set_app_id(app_id);
        Ok(())
    }

    /// Stamp the write date, bump the write counter, persist the full
    /// image to the backing path, then evict the tag.
    ///
    /// The metadata is stamped on a scratch copy first so a failed save
    /// leaves the loaded record, the path, and presence untouched.
    pub fn persist_and_increment(&mut self) -> Result<()> {
        let record = self.record.as_ref().ok_or(Error::NoTagLoaded)?;
        if !record.is_logical() {
            return Err(Error::NotDecrypted);
        }
        if self.path.as_os_str().is_empty() {
            return Err(Error::NoBackingFile);
        }

        let mut updated = record.clone();
        let count;
        {
            let Some(mut view) = updated.logical_mut() else {
                return Err(Error::NotDecrypted);
            };
            let (month, day, year) = PLACEHOLDER_WRITE_DATE;
            view.set_last_write_date(PackedDate::pack(month, day, year));
            count = view.write_count().wrapping_add(1);
            view.set_write_count(count);
        }

        self.storage.save(&self.path, updated.as_bytes())?;
        info!(
            "persisted tag image to {} (write count {})",
            self.path.display(),
            count
        );
        // Writeback ends the session with this tag; eviction destroys the
        // in-memory record, so the stamped copy lives on only in storage.
        self.evict();
        Ok(())
    }
}

fn validated_app_data_size(data: &[u8], declared_size: usize) -> Result<usize> {
    let mut size = declared_size;
    if size != APP_DATA_LEN {
        warn!(
            "app data write of unusual length ({} instead of {})",
            size, APP_DATA_LEN
        );
        if size > APP_DATA_LEN {
            size = APP_DATA_LEN;
        }
    }
    if size != data.len() {
        return Err(Error::AppDataLengthMismatch {
            declared: size,
            actual: data.len(),
        });
    }
    Ok(size)
}
