// nfcemu/src/storage/mock.rs

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::TagStorage;
use crate::Result;

/// Mock storage for unit tests. Serves pre-seeded images and records
/// every save.
#[derive(Debug, Default)]
pub struct MockStorage {
    images: Mutex<HashMap<PathBuf, Vec<u8>>>,
    saved: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    /// Testing hook: number of save calls that should fail.
    fail_saves: Mutex<usize>,
}

impl MockStorage {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the image served for `path`.
    pub fn insert_image(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        lock(&self.images).insert(path.into(), bytes);
    }

    /// All (path, bytes) pairs passed to `save`, in call order.
    pub fn saved(&self) -> Vec<(PathBuf, Vec<u8>)> {
        lock(&self.saved).clone()
    }

    /// Make the next `n` save calls fail (for tests).
    pub fn set_fail_saves(&self, n: usize) {
        *lock(&self.fail_saves) = n;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TagStorage for MockStorage {
    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        lock(&self.images).get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no image at {}", path.display()),
            )
            .into()
        })
    }

    fn save(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        {
            let mut fail = lock(&self.fail_saves);
            if *fail > 0 {
                *fail -= 1;
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("write to {} refused", path.display()),
                )
                .into());
            }
        }
        // A saved image becomes loadable again, like a real file.
        lock(&self.images).insert(path.to_path_buf(), bytes.to_vec());
        lock(&self.saved).push((path.to_path_buf(), bytes.to_vec()));
        Ok(())
    }
}

// Lets tests keep a handle on the mock after the repository takes
// ownership of the boxed trait object.
impl TagStorage for Arc<MockStorage> {
    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        (**self).load(path)
    }

    fn save(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        (**self).save(path, bytes)
    }
}
