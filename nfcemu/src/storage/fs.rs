// nfcemu/src/storage/fs.rs

use std::path::Path;

use super::TagStorage;
use crate::Result;

/// Filesystem-backed tag image storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl FsStorage {
    /// Create a filesystem storage handle.
    pub fn new() -> Self {
        Self
    }
}

impl TagStorage for FsStorage {
    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }

    fn save(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
