//! Staff page: team roster with role/permission management.

use std::sync::Arc;

use crate::api::Api;
use crate::error::{ApiError, PageError};
use crate::filter::{contains_ci, filter_items};
use crate::invalidation::{keys, InvalidationBus};
use crate::loader::{ResourceLoader, ResourceState};
use crate::types::{StaffCreate, StaffMember, StaffStatus, StaffUpdate};

pub struct StaffPage {
    api: Arc<dyn Api>,
    bus: Arc<InvalidationBus>,
    staff: ResourceLoader<StaffMember>,
}

impl StaffPage {
    pub fn new(api: Arc<dyn Api>, bus: Arc<InvalidationBus>) -> Self {
        Self {
            staff: ResourceLoader::new(keys::STAFF, bus.clone()),
            api,
            bus,
        }
    }

    pub async fn load(&self) -> Result<(), PageError> {
        self.staff.run(self.api.list_staff()).await
    }

    pub fn state(&self) -> ResourceState<StaffMember> {
        self.staff.state()
    }

    pub fn staff(&self) -> Vec<StaffMember> {
        self.staff.items()
    }

    pub fn error(&self) -> Option<PageError> {
        self.staff.error()
    }

    /// Search over username and email.
    pub fn search(&self, query: &str) -> Vec<StaffMember> {
        filter_items(&self.staff.items(), query, |s, q| {
            contains_ci(&s.username, q) || contains_ci(&s.email, q)
        })
    }

    pub fn active_count(&self) -> usize {
        self.count_with_status(StaffStatus::Active)
    }

    pub fn inactive_count(&self) -> usize {
        self.count_with_status(StaffStatus::Inactive)
    }

    /// Distinct role titles in roster order.
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = Vec::new();
        for member in self.staff.items() {
            if !roles.contains(&member.role_title) {
                roles.push(member.role_title.clone());
            }
        }
        roles
    }

    fn count_with_status(&self, status: StaffStatus) -> usize {
        self.staff
            .items()
            .iter()
            .filter(|s| s.status == status)
            .count()
    }

    pub async fn create(&self, draft: &StaffCreate) -> Result<StaffMember, PageError> {
        validate_draft(draft)?;
        match self.api.create_staff(draft).await {
            Ok(created) => {
                self.bus.invalidate(keys::STAFF);
                self.load().await?;
                Ok(created)
            }
            Err(err) => {
                log::warn!("Create staff failed: {}", err);
                Err(err.into())
            }
        }
    }

    pub async fn update(&self, id: &str, update: &StaffUpdate) -> Result<StaffMember, PageError> {
        match self.api.update_staff(id, update).await {
            Ok(updated) => {
                self.bus.invalidate(keys::STAFF);
                self.load().await?;
                Ok(updated)
            }
            Err(err) => {
                log::warn!("Update staff {} failed: {}", id, err);
                Err(err.into())
            }
        }
    }

    pub async fn set_status(&self, id: &str, status: StaffStatus) -> Result<StaffMember, PageError> {
        let update = StaffUpdate {
            status: Some(status),
            ..Default::default()
        };
        self.update(id, &update).await
    }
}

/// Mirrors the backend's account rules so a doomed request is never sent.
fn validate_draft(draft: &StaffCreate) -> Result<(), ApiError> {
    if draft.email.trim().is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }
    if draft.username.trim().len() < 3 {
        return Err(ApiError::Validation(
            "Username must be at least 3 characters".to_string(),
        ));
    }
    if draft.password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}
