//! Create-or-edit form intent.

use crate::error::SyncError;
use crate::types::Pet;

/// What a form submission will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Open/closed flag plus the single-slot edit target.
///
/// An empty target means the next submission creates a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetForm {
    open: bool,
    target: Option<Pet>,
}

impl PetForm {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn target(&self) -> Option<&Pet> {
        self.target.as_ref()
    }

    pub fn mode(&self) -> FormMode {
        match self.target.as_ref().and_then(|pet| pet.id) {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    /// Values the form should be populated with when it opens.
    pub fn initial_values(&self) -> Pet {
        self.target.clone().unwrap_or_else(Pet::draft)
    }

    pub fn begin_create(&mut self) {
        self.target = None;
        self.open = true;
    }

    /// Only records that already carry an id can be edited.
    pub fn begin_edit(&mut self, pet: &Pet) -> Result<(), SyncError> {
        if pet.id.is_none() {
            return Err(SyncError::MissingId);
        }
        self.target = Some(pet.clone());
        self.open = true;
        Ok(())
    }

    pub fn close(&mut self) {
        self.target = None;
        self.open = false;
    }
}
