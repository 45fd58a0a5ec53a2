//! Inventory page: stock list plus the low/critical alert summary.
//!
//! Items and alerts load together, as the page does on mount. A failed
//! alert fetch degrades to "no summary" instead of failing the page.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::Api;
use crate::error::{ApiError, PageError};
use crate::filter::{contains_ci, filter_items};
use crate::invalidation::{keys, InvalidationBus};
use crate::loader::{ResourceLoader, ResourceState};
use crate::types::{
    InventoryAlerts, InventoryItem, InventoryItemCreate, InventoryItemUpdate, InventoryStatus,
};

pub struct InventoryPage {
    api: Arc<dyn Api>,
    bus: Arc<InvalidationBus>,
    items: ResourceLoader<InventoryItem>,
    alerts: RwLock<Option<InventoryAlerts>>,
}

impl InventoryPage {
    pub fn new(api: Arc<dyn Api>, bus: Arc<InvalidationBus>) -> Self {
        Self {
            items: ResourceLoader::new(keys::INVENTORY, bus.clone()),
            alerts: RwLock::new(None),
            api,
            bus,
        }
    }

    pub async fn load(&self) -> Result<(), PageError> {
        let (items_result, alerts_result) = tokio::join!(
            self.items.run(self.api.list_inventory()),
            self.api.inventory_alerts(),
        );

        match alerts_result {
            Ok(alerts) => *self.alerts.write() = Some(alerts),
            Err(err) => {
                log::warn!("Failed to load inventory alerts: {}", err);
                *self.alerts.write() = None;
            }
        }

        items_result
    }

    pub fn state(&self) -> ResourceState<InventoryItem> {
        self.items.state()
    }

    pub fn items(&self) -> Vec<InventoryItem> {
        self.items.items()
    }

    pub fn error(&self) -> Option<PageError> {
        self.items.error()
    }

    pub fn alerts(&self) -> Option<InventoryAlerts> {
        self.alerts.read().clone()
    }

    /// Search over item name and category.
    pub fn search(&self, query: &str) -> Vec<InventoryItem> {
        filter_items(&self.items.items(), query, |i, q| {
            contains_ci(&i.name, q) || contains_ci(&i.category, q)
        })
    }

    pub fn critical_count(&self) -> usize {
        self.count_with_status(InventoryStatus::Critical)
    }

    pub fn low_stock_count(&self) -> usize {
        self.count_with_status(InventoryStatus::Low)
    }

    /// Number of distinct categories across the loaded items.
    pub fn category_count(&self) -> usize {
        let items = self.items.items();
        let mut categories: Vec<&str> = Vec::new();
        for item in &items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories.len()
    }

    fn count_with_status(&self, status: InventoryStatus) -> usize {
        self.items
            .items()
            .iter()
            .filter(|i| i.status == status)
            .count()
    }

    pub async fn create(&self, draft: &InventoryItemCreate) -> Result<InventoryItem, PageError> {
        validate_draft(draft)?;
        match self.api.create_inventory_item(draft).await {
            Ok(created) => {
                self.bus.invalidate(keys::INVENTORY);
                self.bus.invalidate(keys::INVENTORY_ALERTS);
                self.load().await?;
                Ok(created)
            }
            Err(err) => {
                log::warn!("Create item failed: {}", err);
                Err(err.into())
            }
        }
    }

    pub async fn update(
        &self,
        id: &str,
        update: &InventoryItemUpdate,
    ) -> Result<InventoryItem, PageError> {
        match self.api.update_inventory_item(id, update).await {
            Ok(updated) => {
                self.bus.invalidate(keys::INVENTORY);
                self.bus.invalidate(keys::INVENTORY_ALERTS);
                self.load().await?;
                Ok(updated)
            }
            Err(err) => {
                log::warn!("Update item {} failed: {}", id, err);
                Err(err.into())
            }
        }
    }

    /// Restock convenience: set the available count; the backend
    /// recomputes the stock status.
    pub async fn set_available(&self, id: &str, available: u32) -> Result<InventoryItem, PageError> {
        let update = InventoryItemUpdate {
            available: Some(available),
            ..Default::default()
        };
        self.update(id, &update).await
    }
}

fn validate_draft(draft: &InventoryItemCreate) -> Result<(), ApiError> {
    if draft.name.trim().is_empty() {
        return Err(ApiError::Validation("Item name is required".to_string()));
    }
    if draft.category.trim().is_empty() {
        return Err(ApiError::Validation("Category is required".to_string()));
    }
    Ok(())
}
