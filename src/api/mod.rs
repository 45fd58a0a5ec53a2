//! Typed client for the CareOps REST backend.
//!
//! One method per endpoint, with the whole surface behind a dyn-compatible
//! trait so page services run against the reqwest-backed client in
//! production and an in-memory fake in tests.
//!
//! Modules:
//! - client: HTTP core (bearer auth, status→error mapping)
//! - endpoints: `Api` implementation for [`HttpApi`]

mod client;
mod endpoints;

pub use client::HttpApi;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{
    AuthResponse, Booking, BookingCreate, BookingUpdate, Contact, ContactCreate, ContactUpdate,
    Conversation, DashboardStats, Form, FormCreate, FormUpdate, InventoryAlerts, InventoryItem,
    InventoryItemCreate, InventoryItemUpdate, LoginPayload, Message, MessageCreate,
    RegisterPayload, RevenueStats, StaffCreate, StaffMember, StaffUpdate, User,
};

/// The full backend surface. Every call except `login`/`register` attaches
/// the session's bearer token.
#[async_trait]
pub trait Api: Send + Sync {
    // Auth
    async fn login(&self, payload: &LoginPayload) -> Result<AuthResponse, ApiError>;
    async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, ApiError>;
    async fn current_user(&self) -> Result<User, ApiError>;

    // Bookings
    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError>;
    async fn create_booking(&self, payload: &BookingCreate) -> Result<Booking, ApiError>;
    async fn update_booking(&self, id: &str, payload: &BookingUpdate)
        -> Result<Booking, ApiError>;
    async fn delete_booking(&self, id: &str) -> Result<(), ApiError>;

    // Contacts
    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError>;
    async fn create_contact(&self, payload: &ContactCreate) -> Result<Contact, ApiError>;
    async fn update_contact(&self, id: &str, payload: &ContactUpdate)
        -> Result<Contact, ApiError>;
    async fn delete_contact(&self, id: &str) -> Result<(), ApiError>;

    // Inventory
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError>;
    async fn inventory_alerts(&self) -> Result<InventoryAlerts, ApiError>;
    async fn create_inventory_item(
        &self,
        payload: &InventoryItemCreate,
    ) -> Result<InventoryItem, ApiError>;
    async fn update_inventory_item(
        &self,
        id: &str,
        payload: &InventoryItemUpdate,
    ) -> Result<InventoryItem, ApiError>;

    // Staff
    async fn list_staff(&self) -> Result<Vec<StaffMember>, ApiError>;
    async fn create_staff(&self, payload: &StaffCreate) -> Result<StaffMember, ApiError>;
    async fn update_staff(&self, id: &str, payload: &StaffUpdate)
        -> Result<StaffMember, ApiError>;

    // Forms
    async fn list_forms(&self) -> Result<Vec<Form>, ApiError>;
    async fn create_form(&self, payload: &FormCreate) -> Result<Form, ApiError>;
    async fn update_form(&self, id: &str, payload: &FormUpdate) -> Result<Form, ApiError>;

    // Analytics
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;
    async fn revenue_stats(&self) -> Result<RevenueStats, ApiError>;

    // Inbox
    async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError>;
    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>, ApiError>;
    async fn send_message(&self, payload: &MessageCreate) -> Result<Message, ApiError>;
}
