//! Keeps the local pet list in step with the remote store.
//!
//! # Design
//! `Synchronizer` owns the only mutable copy of the list and form state.
//! Each operation takes `&mut self` and makes at most one blocking store
//! call, so nothing else can touch the state between the request and the
//! application of its result. State is only replaced after the call
//! succeeds; a failed call leaves everything as it was.

use crate::config::StoreConfig;
use crate::error::SyncError;
use crate::form::PetForm;
use crate::list::PetList;
use crate::store::StoreClient;
use crate::transport::{Transport, UreqTransport};
use crate::types::Pet;

/// A delete the store refused. Kept for the host to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub id: i64,
    pub message: String,
}

#[derive(Debug)]
pub struct Synchronizer<T> {
    store: StoreClient<T>,
    list: PetList,
    form: PetForm,
    diagnostics: Vec<Diagnostic>,
}

impl Synchronizer<UreqTransport> {
    /// Synchronizer over HTTP at the configured location. Does not load.
    pub fn connect(config: &StoreConfig) -> Self {
        Self::new(StoreClient::new(config.client(), UreqTransport::new()))
    }
}

impl<T: Transport> Synchronizer<T> {
    pub fn new(store: StoreClient<T>) -> Self {
        Self {
            store,
            list: PetList::new(),
            form: PetForm::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn store(&self) -> &StoreClient<T> {
        &self.store
    }

    pub fn list(&self) -> &PetList {
        &self.list
    }

    pub fn form(&self) -> &PetForm {
        &self.form
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Replace the local list with the store's contents. Clears the query.
    pub fn load(&mut self) -> Result<usize, SyncError> {
        let pets = self.store.list()?;
        self.list = self.list.loaded(pets);
        tracing::info!(count = self.list.len(), "pets loaded");
        Ok(self.list.len())
    }

    pub fn begin_create(&mut self) {
        self.form.begin_create();
    }

    pub fn begin_edit(&mut self, pet: &Pet) -> Result<(), SyncError> {
        self.form.begin_edit(pet)
    }

    /// Dismiss the form without submitting.
    pub fn cancel_form(&mut self) {
        self.form.close();
    }

    /// Create or update depending on the form's edit target.
    ///
    /// In edit mode the draft is sent under the target's id whatever id it
    /// carries. On success the form closes; on failure nothing changes.
    pub fn submit_form(&mut self, draft: Pet) -> Result<Pet, SyncError> {
        let (saved, next) = match self.form.target().and_then(|target| target.id) {
            Some(id) => {
                let updated = self.store.update(&Pet {
                    id: Some(id),
                    ..draft
                })?;
                let next = self.list.replaced(updated.clone())?;
                tracing::info!(id, "pet updated");
                (updated, next)
            }
            None => {
                let created = self.store.create(&draft)?;
                let next = self.list.inserted(created.clone())?;
                tracing::info!(id = ?created.id, "pet created");
                (created, next)
            }
        };
        self.list = next;
        self.form.close();
        Ok(saved)
    }

    /// Delete remotely, then locally. Returns whether a local record was removed.
    ///
    /// Failures are logged and recorded in `diagnostics`, never returned.
    pub fn delete_record(&mut self, id: i64) -> bool {
        match self.store.delete(id) {
            Ok(()) => {
                let held = self.list.get(id).is_some();
                self.list = self.list.removed(id);
                tracing::info!(id, held, "pet deleted");
                held
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "failed to delete pet");
                self.diagnostics.push(Diagnostic {
                    id,
                    message: err.to_string(),
                });
                false
            }
        }
    }

    pub fn search(&mut self, query: &str) {
        self.list = self.list.searched(query);
    }

    /// Create all `drafts` in one request and append the results.
    pub fn bulk_import(&mut self, drafts: &[Pet]) -> Result<usize, SyncError> {
        let created = self.store.bulk_create(drafts)?;
        let count = created.len();
        let next = created
            .into_iter()
            .try_fold(self.list.clone(), |list, pet| list.inserted(pet))?;
        self.list = next;
        tracing::info!(count, "pets imported");
        Ok(count)
    }
}
