//! Bookings page: list, status counters, create/update/delete.

use std::sync::Arc;

use crate::api::Api;
use crate::error::{ApiError, PageError};
use crate::invalidation::{keys, InvalidationBus};
use crate::loader::{ResourceLoader, ResourceState};
use crate::types::{Booking, BookingCreate, BookingStatus, BookingUpdate};

pub struct BookingsPage {
    api: Arc<dyn Api>,
    bus: Arc<InvalidationBus>,
    bookings: ResourceLoader<Booking>,
}

impl BookingsPage {
    pub fn new(api: Arc<dyn Api>, bus: Arc<InvalidationBus>) -> Self {
        Self {
            bookings: ResourceLoader::new(keys::BOOKINGS, bus.clone()),
            api,
            bus,
        }
    }

    /// Fetch-on-mount entry point; also the explicit retry after an error.
    pub async fn load(&self) -> Result<(), PageError> {
        self.bookings.run(self.api.list_bookings()).await
    }

    pub fn state(&self) -> ResourceState<Booking> {
        self.bookings.state()
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.items()
    }

    pub fn error(&self) -> Option<PageError> {
        self.bookings.error()
    }

    pub fn count_with_status(&self, status: BookingStatus) -> usize {
        self.bookings
            .items()
            .iter()
            .filter(|b| b.status == status)
            .count()
    }

    pub fn pending_count(&self) -> usize {
        self.count_with_status(BookingStatus::Pending)
    }

    pub fn confirmed_count(&self) -> usize {
        self.count_with_status(BookingStatus::Confirmed)
    }

    pub async fn create(&self, draft: &BookingCreate) -> Result<Booking, PageError> {
        validate_draft(draft)?;
        match self.api.create_booking(draft).await {
            Ok(created) => {
                self.bus.invalidate(keys::BOOKINGS);
                self.load().await?;
                Ok(created)
            }
            Err(err) => {
                log::warn!("Create booking failed: {}", err);
                Err(err.into())
            }
        }
    }

    pub async fn update(&self, id: &str, update: &BookingUpdate) -> Result<Booking, PageError> {
        match self.api.update_booking(id, update).await {
            Ok(updated) => {
                self.bus.invalidate(keys::BOOKINGS);
                self.load().await?;
                Ok(updated)
            }
            Err(err) => {
                log::warn!("Update booking {} failed: {}", id, err);
                Err(err.into())
            }
        }
    }

    pub async fn set_status(&self, id: &str, status: BookingStatus) -> Result<Booking, PageError> {
        let update = BookingUpdate {
            status: Some(status),
            ..Default::default()
        };
        self.update(id, &update).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), PageError> {
        match self.api.delete_booking(id).await {
            Ok(()) => {
                self.bus.invalidate(keys::BOOKINGS);
                self.load().await
            }
            Err(err) => {
                log::warn!("Delete booking {} failed: {}", id, err);
                Err(err.into())
            }
        }
    }
}

fn validate_draft(draft: &BookingCreate) -> Result<(), ApiError> {
    let required = [
        (draft.customer_name.as_str(), "Customer name"),
        (draft.service.as_str(), "Service"),
        (draft.date.as_str(), "Date"),
        (draft.time.as_str(), "Time"),
        (draft.location.as_str(), "Location"),
    ];
    for (value, field) in required {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} is required")));
        }
    }
    Ok(())
}
