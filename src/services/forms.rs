//! Forms page: intake form tracking with completion counters.

use std::sync::Arc;

use crate::api::Api;
use crate::error::{ApiError, PageError};
use crate::filter::{contains_ci, filter_items};
use crate::invalidation::{keys, InvalidationBus};
use crate::loader::{ResourceLoader, ResourceState};
use crate::types::{Form, FormCreate, FormStatus, FormUpdate};

pub struct FormsPage {
    api: Arc<dyn Api>,
    bus: Arc<InvalidationBus>,
    forms: ResourceLoader<Form>,
}

impl FormsPage {
    pub fn new(api: Arc<dyn Api>, bus: Arc<InvalidationBus>) -> Self {
        Self {
            forms: ResourceLoader::new(keys::FORMS, bus.clone()),
            api,
            bus,
        }
    }

    pub async fn load(&self) -> Result<(), PageError> {
        self.forms.run(self.api.list_forms()).await
    }

    pub fn state(&self) -> ResourceState<Form> {
        self.forms.state()
    }

    pub fn forms(&self) -> Vec<Form> {
        self.forms.items()
    }

    pub fn error(&self) -> Option<PageError> {
        self.forms.error()
    }

    /// Search over form name and customer name.
    pub fn search(&self, query: &str) -> Vec<Form> {
        filter_items(&self.forms.items(), query, |f, q| {
            contains_ci(&f.name, q) || contains_ci(&f.customer_name, q)
        })
    }

    pub fn completed_count(&self) -> usize {
        self.count_with_status(FormStatus::Completed)
    }

    pub fn pending_count(&self) -> usize {
        self.count_with_status(FormStatus::Pending)
    }

    pub fn overdue_count(&self) -> usize {
        self.count_with_status(FormStatus::Overdue)
    }

    fn count_with_status(&self, status: FormStatus) -> usize {
        self.forms
            .items()
            .iter()
            .filter(|f| f.status == status)
            .count()
    }

    pub async fn create(&self, draft: &FormCreate) -> Result<Form, PageError> {
        validate_draft(draft)?;
        match self.api.create_form(draft).await {
            Ok(created) => {
                self.bus.invalidate(keys::FORMS);
                self.load().await?;
                Ok(created)
            }
            Err(err) => {
                log::warn!("Create form failed: {}", err);
                Err(err.into())
            }
        }
    }

    pub async fn update(&self, id: &str, update: &FormUpdate) -> Result<Form, PageError> {
        match self.api.update_form(id, update).await {
            Ok(updated) => {
                self.bus.invalidate(keys::FORMS);
                self.load().await?;
                Ok(updated)
            }
            Err(err) => {
                log::warn!("Update form {} failed: {}", id, err);
                Err(err.into())
            }
        }
    }
}

fn validate_draft(draft: &FormCreate) -> Result<(), ApiError> {
    if draft.name.trim().is_empty() {
        return Err(ApiError::Validation("Form name is required".to_string()));
    }
    if draft.customer_name.trim().is_empty() {
        return Err(ApiError::Validation("Customer name is required".to_string()));
    }
    Ok(())
}
