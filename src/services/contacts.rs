//! Contacts page: searchable customer list with create/update/delete.

use std::sync::Arc;

use crate::api::Api;
use crate::error::{ApiError, PageError};
use crate::filter::{contains_ci, filter_items};
use crate::invalidation::{keys, InvalidationBus};
use crate::loader::{ResourceLoader, ResourceState};
use crate::types::{Contact, ContactCreate, ContactStatus, ContactUpdate};

pub struct ContactsPage {
    api: Arc<dyn Api>,
    bus: Arc<InvalidationBus>,
    contacts: ResourceLoader<Contact>,
}

impl ContactsPage {
    pub fn new(api: Arc<dyn Api>, bus: Arc<InvalidationBus>) -> Self {
        Self {
            contacts: ResourceLoader::new(keys::CONTACTS, bus.clone()),
            api,
            bus,
        }
    }

    pub async fn load(&self) -> Result<(), PageError> {
        self.contacts.run(self.api.list_contacts()).await
    }

    pub fn state(&self) -> ResourceState<Contact> {
        self.contacts.state()
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.items()
    }

    pub fn error(&self) -> Option<PageError> {
        self.contacts.error()
    }

    /// Case-insensitive substring search over name and email.
    pub fn search(&self, query: &str) -> Vec<Contact> {
        filter_items(&self.contacts.items(), query, |c, q| {
            contains_ci(&c.name, q) || contains_ci(&c.email, q)
        })
    }

    pub fn active_count(&self) -> usize {
        self.count_with_status(ContactStatus::Active)
    }

    pub fn inactive_count(&self) -> usize {
        self.count_with_status(ContactStatus::Inactive)
    }

    fn count_with_status(&self, status: ContactStatus) -> usize {
        self.contacts
            .items()
            .iter()
            .filter(|c| c.status == status)
            .count()
    }

    pub async fn create(&self, draft: &ContactCreate) -> Result<Contact, PageError> {
        validate_draft(draft)?;
        match self.api.create_contact(draft).await {
            Ok(created) => {
                self.bus.invalidate(keys::CONTACTS);
                self.load().await?;
                Ok(created)
            }
            Err(err) => {
                log::warn!("Create contact failed: {}", err);
                Err(err.into())
            }
        }
    }

    pub async fn update(&self, id: &str, update: &ContactUpdate) -> Result<Contact, PageError> {
        match self.api.update_contact(id, update).await {
            Ok(updated) => {
                self.bus.invalidate(keys::CONTACTS);
                self.load().await?;
                Ok(updated)
            }
            Err(err) => {
                log::warn!("Update contact {} failed: {}", id, err);
                Err(err.into())
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), PageError> {
        match self.api.delete_contact(id).await {
            Ok(()) => {
                self.bus.invalidate(keys::CONTACTS);
                self.load().await
            }
            Err(err) => {
                log::warn!("Delete contact {} failed: {}", id, err);
                Err(err.into())
            }
        }
    }
}

fn validate_draft(draft: &ContactCreate) -> Result<(), ApiError> {
    let required = [
        (draft.name.as_str(), "Name"),
        (draft.email.as_str(), "Email"),
        (draft.phone.as_str(), "Phone"),
    ];
    for (value, field) in required {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} is required")));
        }
    }
    Ok(())
}
