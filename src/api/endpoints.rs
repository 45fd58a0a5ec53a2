//! `Api` implementation for the HTTP client. Paths and failure wording
//! follow the backend's route table one-to-one.

use async_trait::async_trait;

use super::{Api, HttpApi};
use crate::error::ApiError;
use crate::types::{
    AuthResponse, Booking, BookingCreate, BookingUpdate, Contact, ContactCreate, ContactUpdate,
    Conversation, DashboardStats, Form, FormCreate, FormUpdate, InventoryAlerts, InventoryItem,
    InventoryItemCreate, InventoryItemUpdate, LoginPayload, Message, MessageCreate,
    RegisterPayload, RevenueStats, StaffCreate, StaffMember, StaffUpdate, User,
};

#[async_trait]
impl Api for HttpApi {
    async fn login(&self, payload: &LoginPayload) -> Result<AuthResponse, ApiError> {
        self.post_public("/auth/login", payload, "log in").await
    }

    async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, ApiError> {
        self.post_public("/auth/register", payload, "register").await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/auth/me", "get user").await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get("/bookings", "fetch bookings").await
    }

    async fn create_booking(&self, payload: &BookingCreate) -> Result<Booking, ApiError> {
        self.post("/bookings", payload, "create booking").await
    }

    async fn update_booking(
        &self,
        id: &str,
        payload: &BookingUpdate,
    ) -> Result<Booking, ApiError> {
        self.patch(&format!("/bookings/{id}"), payload, "update booking")
            .await
    }

    async fn delete_booking(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/bookings/{id}"), "delete booking").await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.get("/contacts", "fetch contacts").await
    }

    async fn create_contact(&self, payload: &ContactCreate) -> Result<Contact, ApiError> {
        self.post("/contacts", payload, "create contact").await
    }

    async fn update_contact(
        &self,
        id: &str,
        payload: &ContactUpdate,
    ) -> Result<Contact, ApiError> {
        self.patch(&format!("/contacts/{id}"), payload, "update contact")
            .await
    }

    async fn delete_contact(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/contacts/{id}"), "delete contact").await
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        self.get("/inventory", "fetch inventory").await
    }

    async fn inventory_alerts(&self) -> Result<InventoryAlerts, ApiError> {
        self.get("/inventory/alerts", "fetch alerts").await
    }

    async fn create_inventory_item(
        &self,
        payload: &InventoryItemCreate,
    ) -> Result<InventoryItem, ApiError> {
        self.post("/inventory", payload, "create item").await
    }

    async fn update_inventory_item(
        &self,
        id: &str,
        payload: &InventoryItemUpdate,
    ) -> Result<InventoryItem, ApiError> {
        self.patch(&format!("/inventory/{id}"), payload, "update item")
            .await
    }

    async fn list_staff(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.get("/staff", "fetch staff").await
    }

    async fn create_staff(&self, payload: &StaffCreate) -> Result<StaffMember, ApiError> {
        self.post("/staff", payload, "create staff").await
    }

    async fn update_staff(
        &self,
        id: &str,
        payload: &StaffUpdate,
    ) -> Result<StaffMember, ApiError> {
        self.patch(&format!("/staff/{id}"), payload, "update staff")
            .await
    }

    async fn list_forms(&self) -> Result<Vec<Form>, ApiError> {
        self.get("/forms", "fetch forms").await
    }

    async fn create_form(&self, payload: &FormCreate) -> Result<Form, ApiError> {
        self.post("/forms", payload, "create form").await
    }

    async fn update_form(&self, id: &str, payload: &FormUpdate) -> Result<Form, ApiError> {
        self.patch(&format!("/forms/{id}"), payload, "update form")
            .await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/analytics/dashboard", "fetch stats").await
    }

    async fn revenue_stats(&self) -> Result<RevenueStats, ApiError> {
        self.get("/analytics/revenue", "fetch revenue").await
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.get("/inbox/conversations", "fetch conversations").await
    }

    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>, ApiError> {
        self.get(
            &format!("/inbox/messages/{conversation_id}"),
            "fetch messages",
        )
        .await
    }

    async fn send_message(&self, payload: &MessageCreate) -> Result<Message, ApiError> {
        self.post("/inbox/messages", payload, "send message").await
    }
}
