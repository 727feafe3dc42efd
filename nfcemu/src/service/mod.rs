// nfcemu/src/service/mod.rs
//! The operation dispatcher: one shared module behind two entry groups.
//!
//! Guest software reaches the module through a fixed menu of named
//! operations (handlers in `scanning`, `app_data`, and `info`). Each
//! handler validates the session state, delegates to the repository and
//! codec, and answers with a status code and a typed reply.

mod app_data;
mod info;
pub mod replies;
mod scanning;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::error;

use crate::record::{LogicalView, TagRecord};
use crate::repository::TagRepository;
use crate::session::Session;
use crate::storage::TagStorage;
use crate::types::TagState;
use crate::{ServiceError, ServiceResult};

/// The emulated module: session state machine plus tag repository,
/// always accessed together under one lock.
pub struct NfcModule {
    session: Session,
    repository: TagRepository,
}

impl NfcModule {
    /// Build a module over the given persistence collaborator.
    pub fn new(storage: Box<dyn TagStorage>) -> Self {
        Self {
            session: Session::new(),
            repository: TagRepository::new(storage),
        }
    }

    /// The session state machine.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access, for the host side (savestate restore and
    /// the like). Guest-driven transitions go through the operations.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The tag repository.
    pub fn repository(&self) -> &TagRepository {
        &self.repository
    }

    /// Mutable repository access, for the host side.
    pub fn repository_mut(&mut self) -> &mut TagRepository {
        &mut self.repository
    }

    /// Resynchronize the session with the repository's presence flag.
    pub(crate) fn sync_tag_state(&mut self) {
        let present = self.repository.is_present();
        self.session.reconcile(present);
    }

    /// Reject `op` unless the current state is in `accepted`.
    pub(crate) fn require_state(&self, op: &str, accepted: &[TagState]) -> ServiceResult<()> {
        let state = self.session.tag_state();
        if accepted.contains(&state) {
            Ok(())
        } else {
            error!("{}: invalid tag state {}", op, state);
            Err(ServiceError::CommandInvalidForState)
        }
    }

    /// Reject `op` unless a record is loaded.
    pub(crate) fn require_record(&self, op: &str) -> ServiceResult<&TagRecord> {
        match self.repository.record() {
            Some(record) => Ok(record),
            None => {
                error!("{}: no tag image loaded", op);
                Err(ServiceError::CommandInvalidForState)
            }
        }
    }

    /// Reject `op` unless a decrypted record is loaded.
    pub(crate) fn require_logical(&self, op: &str) -> ServiceResult<LogicalView<'_>> {
        match self.require_record(op)?.logical() {
            Some(view) => Ok(view),
            None => {
                error!("{}: tried to access an encrypted tag", op);
                Err(ServiceError::CommandInvalidForState)
            }
        }
    }
}

/// Handle to the shared module, as held by each entry group.
pub type SharedModule = Arc<Mutex<NfcModule>>;

/// Entry-group adapter. The ordinary and the privileged group expose the
/// same operations over the same shared module; the split is an
/// access-level distinction enforced by the host, not by this core.
pub struct Interface {
    name: &'static str,
    module: SharedModule,
}

impl Interface {
    /// Wrap a shared module under an entry-group name.
    pub fn new(name: &'static str, module: SharedModule) -> Self {
        Self { name, module }
    }

    /// Entry-group name this adapter was installed under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Clone of the underlying shared module handle.
    pub fn module(&self) -> SharedModule {
        Arc::clone(&self.module)
    }

    pub(crate) fn nfc(&self) -> MutexGuard<'_, NfcModule> {
        self.module.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Host-side entry point: a tag was placed in the field. Returns
    /// whether its image loaded.
    pub fn load_tag(&self, path: &Path) -> bool {
        let mut nfc = self.nfc();
        match nfc.repository_mut().load(path) {
            Ok(()) => {
                nfc.sync_tag_state();
                true
            }
            Err(err) => {
                error!("could not load tag image from {}: {}", path.display(), err);
                false
            }
        }
    }

    /// Host-side entry point: the tag left the field.
    pub fn remove_tag(&self) {
        let mut nfc = self.nfc();
        nfc.repository_mut().evict();
        nfc.sync_tag_state();
    }
}

/// Construct the module and its two entry groups ("nfc:u" for ordinary
/// software, "nfc:m" for privileged software) over one shared instance.
pub fn install_interfaces(storage: Box<dyn TagStorage>) -> (Interface, Interface) {
    let module = Arc::new(Mutex::new(NfcModule::new(storage)));
    (
        Interface::new("nfc:u", Arc::clone(&module)),
        Interface::new("nfc:m", module),
    )
}
