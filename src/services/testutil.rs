//! In-memory backend for page-service tests.
//!
//! Implements the full `Api` trait over mutexed vectors, recording every
//! call so tests can assert which requests were (and were not) issued.
//! Server-side behavior that pages depend on is mirrored here: id
//! assignment, inventory status derivation, conversation last_message
//! updates.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::Api;
use crate::error::ApiError;
use crate::types::{
    AuthResponse, Booking, BookingCreate, BookingStatus, BookingUpdate, Contact, ContactCreate,
    ContactStatus, ContactUpdate, Conversation, DashboardStats, Form, FormCreate, FormStatus,
    FormUpdate, InventoryAlerts, InventoryItem, InventoryItemCreate, InventoryItemUpdate,
    InventoryStatus, LoginPayload, Message, MessageCreate, RegisterPayload, RevenueStats,
    StaffCreate, StaffMember, StaffStatus, StaffUpdate, User,
};

#[derive(Default)]
pub(crate) struct FakeApi {
    pub bookings: Mutex<Vec<Booking>>,
    pub contacts: Mutex<Vec<Contact>>,
    pub forms: Mutex<Vec<Form>>,
    pub inventory: Mutex<Vec<InventoryItem>>,
    pub staff: Mutex<Vec<StaffMember>>,
    pub conversations: Mutex<Vec<Conversation>>,
    pub messages: Mutex<HashMap<String, Vec<Message>>>,
    pub stats: Mutex<DashboardStats>,
    pub revenue: Mutex<RevenueStats>,
    pub alerts: Mutex<InventoryAlerts>,
    pub user: Mutex<Option<User>>,
    /// Error to return from the next recorded call, then cleared.
    pub fail_next: Mutex<Option<ApiError>>,
    /// Error to return the next time the named call is recorded.
    pub fail_when: Mutex<Option<(&'static str, ApiError)>>,
    calls: Mutex<Vec<&'static str>>,
    next_id: Mutex<u32>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_with(&self, err: ApiError) {
        *self.fail_next.lock() = Some(err);
    }

    pub fn fail_when(&self, name: &'static str, err: ApiError) {
        *self.fail_when.lock() = Some((name, err));
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str) -> Result<(), ApiError> {
        self.calls.lock().push(name);
        if let Some(err) = self.fail_next.lock().take() {
            return Err(err);
        }
        let mut targeted = self.fail_when.lock();
        if targeted.as_ref().is_some_and(|(target, _)| *target == name) {
            let (_, err) = targeted.take().unwrap();
            return Err(err);
        }
        Ok(())
    }

    fn assign_id(&self, prefix: &str) -> String {
        let mut n = self.next_id.lock();
        *n += 1;
        format!("{prefix}-{n}", n = *n)
    }

    fn fake_user() -> User {
        User {
            id: "u-1".to_string(),
            email: "owner@careops.test".to_string(),
            username: "owner".to_string(),
            phone_number: None,
            role: "admin".to_string(),
            created_at: None,
        }
    }
}

// Fixture builders used across service tests.

pub(crate) fn booking(id: &str, customer: &str, status: BookingStatus) -> Booking {
    Booking {
        id: id.to_string(),
        customer_name: customer.to_string(),
        customer_email: None,
        customer_phone: None,
        service: "Deep Clean".to_string(),
        date: "2026-08-06".to_string(),
        time: "09:00".to_string(),
        duration: Some("60 min".to_string()),
        location: Some("Downtown".to_string()),
        status,
        assigned_staff_id: None,
        assigned_staff_name: None,
        notes: None,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn contact(id: &str, name: &str, email: &str) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: "555-0100".to_string(),
        status: ContactStatus::Active,
        tags: Vec::new(),
        bookings_count: 0,
        total_revenue: 0.0,
        last_interaction: None,
        notes: None,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn form(id: &str, name: &str, customer: &str, status: FormStatus) -> Form {
    Form {
        id: id.to_string(),
        name: name.to_string(),
        customer_name: customer.to_string(),
        booking_id: None,
        status,
        progress: 0,
        fields: 10,
        completed_fields: 0,
        submitted_at: None,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn item(id: &str, name: &str, available: u32, threshold: u32) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        category: "Supplies".to_string(),
        available,
        threshold,
        status: derive_stock_status(available, threshold),
        usage_per_booking: 1.0,
        supplier: None,
        unit_price: None,
        last_restocked: None,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn staff_member(id: &str, username: &str, status: StaffStatus) -> StaffMember {
    StaffMember {
        id: id.to_string(),
        email: format!("{username}@careops.test"),
        username: username.to_string(),
        phone_number: None,
        role: "staff".to_string(),
        role_title: "Staff Member".to_string(),
        permissions: Vec::new(),
        status,
        joined_date: "2026-01-01".to_string(),
        last_active: None,
    }
}

pub(crate) fn conversation(id: &str, name: &str) -> Conversation {
    Conversation {
        id: id.to_string(),
        name: name.to_string(),
        participants: Vec::new(),
        last_message: None,
        last_message_time: None,
        status: Some("active".to_string()),
        unread: 0,
    }
}

/// The backend's stock-status rule, mirrored so fixtures stay honest.
fn derive_stock_status(available: u32, threshold: u32) -> InventoryStatus {
    if available == 0 {
        InventoryStatus::Critical
    } else if available <= threshold {
        InventoryStatus::Low
    } else {
        InventoryStatus::Normal
    }
}

#[async_trait]
impl Api for FakeApi {
    async fn login(&self, payload: &LoginPayload) -> Result<AuthResponse, ApiError> {
        self.record("login")?;
        let user = self.user.lock().clone().unwrap_or_else(|| {
            let mut u = Self::fake_user();
            u.email = payload.email.clone();
            u
        });
        Ok(AuthResponse {
            access_token: "fake-token".to_string(),
            token_type: "bearer".to_string(),
            user,
        })
    }

    async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, ApiError> {
        self.record("register")?;
        let user = User {
            id: self.assign_id("u"),
            email: payload.email.clone(),
            username: payload.username.clone(),
            phone_number: payload.phone_number.clone(),
            role: "customer".to_string(),
            created_at: None,
        };
        *self.user.lock() = Some(user.clone());
        Ok(AuthResponse {
            access_token: "fake-token".to_string(),
            token_type: "bearer".to_string(),
            user,
        })
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.record("current_user")?;
        Ok(self.user.lock().clone().unwrap_or_else(Self::fake_user))
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.record("list_bookings")?;
        Ok(self.bookings.lock().clone())
    }

    async fn create_booking(&self, payload: &BookingCreate) -> Result<Booking, ApiError> {
        self.record("create_booking")?;
        let created = Booking {
            id: self.assign_id("b"),
            customer_name: payload.customer_name.clone(),
            customer_email: payload.customer_email.clone(),
            customer_phone: payload.customer_phone.clone(),
            service: payload.service.clone(),
            date: payload.date.clone(),
            time: payload.time.clone(),
            duration: Some(payload.duration.clone()),
            location: Some(payload.location.clone()),
            status: BookingStatus::Pending,
            assigned_staff_id: None,
            assigned_staff_name: None,
            notes: payload.notes.clone(),
            created_at: None,
            updated_at: None,
        };
        self.bookings.lock().push(created.clone());
        Ok(created)
    }

    async fn update_booking(
        &self,
        id: &str,
        payload: &BookingUpdate,
    ) -> Result<Booking, ApiError> {
        self.record("update_booking")?;
        let mut bookings = self.bookings.lock();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ApiError::Http {
                status: 404,
                message: "Booking not found".to_string(),
            })?;
        if let Some(status) = payload.status {
            booking.status = status;
        }
        if let Some(ref service) = payload.service {
            booking.service = service.clone();
        }
        if let Some(ref notes) = payload.notes {
            booking.notes = Some(notes.clone());
        }
        Ok(booking.clone())
    }

    async fn delete_booking(&self, id: &str) -> Result<(), ApiError> {
        self.record("delete_booking")?;
        let mut bookings = self.bookings.lock();
        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        if bookings.len() == before {
            return Err(ApiError::Http {
                status: 404,
                message: "Booking not found".to_string(),
            });
        }
        Ok(())
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.record("list_contacts")?;
        Ok(self.contacts.lock().clone())
    }

    async fn create_contact(&self, payload: &ContactCreate) -> Result<Contact, ApiError> {
        self.record("create_contact")?;
        let created = Contact {
            id: self.assign_id("c"),
            name: payload.name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            status: ContactStatus::Active,
            tags: payload.tags.clone(),
            bookings_count: 0,
            total_revenue: 0.0,
            last_interaction: None,
            notes: payload.notes.clone(),
            created_at: None,
            updated_at: None,
        };
        self.contacts.lock().push(created.clone());
        Ok(created)
    }

    async fn update_contact(
        &self,
        id: &str,
        payload: &ContactUpdate,
    ) -> Result<Contact, ApiError> {
        self.record("update_contact")?;
        let mut contacts = self.contacts.lock();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ApiError::Http {
                status: 404,
                message: "Contact not found".to_string(),
            })?;
        if let Some(ref name) = payload.name {
            contact.name = name.clone();
        }
        if let Some(status) = payload.status {
            contact.status = status;
        }
        if let Some(ref tags) = payload.tags {
            contact.tags = tags.clone();
        }
        Ok(contact.clone())
    }

    async fn delete_contact(&self, id: &str) -> Result<(), ApiError> {
        self.record("delete_contact")?;
        self.contacts.lock().retain(|c| c.id != id);
        Ok(())
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        self.record("list_inventory")?;
        Ok(self.inventory.lock().clone())
    }

    async fn inventory_alerts(&self) -> Result<InventoryAlerts, ApiError> {
        self.record("inventory_alerts")?;
        Ok(self.alerts.lock().clone())
    }

    async fn create_inventory_item(
        &self,
        payload: &InventoryItemCreate,
    ) -> Result<InventoryItem, ApiError> {
        self.record("create_inventory_item")?;
        let created = InventoryItem {
            id: self.assign_id("i"),
            name: payload.name.clone(),
            category: payload.category.clone(),
            available: payload.available,
            threshold: payload.threshold,
            status: derive_stock_status(payload.available, payload.threshold),
            usage_per_booking: payload.usage_per_booking,
            supplier: payload.supplier.clone(),
            unit_price: payload.unit_price,
            last_restocked: None,
            created_at: None,
            updated_at: None,
        };
        self.inventory.lock().push(created.clone());
        Ok(created)
    }

    async fn update_inventory_item(
        &self,
        id: &str,
        payload: &InventoryItemUpdate,
    ) -> Result<InventoryItem, ApiError> {
        self.record("update_inventory_item")?;
        let mut inventory = self.inventory.lock();
        let item = inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ApiError::Http {
                status: 404,
                message: "Item not found".to_string(),
            })?;
        if let Some(available) = payload.available {
            item.available = available;
        }
        if let Some(threshold) = payload.threshold {
            item.threshold = threshold;
        }
        if payload.available.is_some() || payload.threshold.is_some() {
            item.status = derive_stock_status(item.available, item.threshold);
        }
        Ok(item.clone())
    }

    async fn list_staff(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.record("list_staff")?;
        Ok(self.staff.lock().clone())
    }

    async fn create_staff(&self, payload: &StaffCreate) -> Result<StaffMember, ApiError> {
        self.record("create_staff")?;
        let created = StaffMember {
            id: self.assign_id("s"),
            email: payload.email.clone(),
            username: payload.username.clone(),
            phone_number: payload.phone_number.clone(),
            role: "staff".to_string(),
            role_title: payload.role_title.clone(),
            permissions: payload.permissions.clone(),
            status: StaffStatus::Active,
            joined_date: "2026-08-06".to_string(),
            last_active: None,
        };
        self.staff.lock().push(created.clone());
        Ok(created)
    }

    async fn update_staff(
        &self,
        id: &str,
        payload: &StaffUpdate,
    ) -> Result<StaffMember, ApiError> {
        self.record("update_staff")?;
        let mut staff = self.staff.lock();
        let member = staff.iter_mut().find(|s| s.id == id).ok_or(ApiError::Http {
            status: 404,
            message: "Staff member not found".to_string(),
        })?;
        if let Some(status) = payload.status {
            member.status = status;
        }
        if let Some(ref title) = payload.role_title {
            member.role_title = title.clone();
        }
        if let Some(ref permissions) = payload.permissions {
            member.permissions = permissions.clone();
        }
        Ok(member.clone())
    }

    async fn list_forms(&self) -> Result<Vec<Form>, ApiError> {
        self.record("list_forms")?;
        Ok(self.forms.lock().clone())
    }

    async fn create_form(&self, payload: &FormCreate) -> Result<Form, ApiError> {
        self.record("create_form")?;
        let created = Form {
            id: self.assign_id("f"),
            name: payload.name.clone(),
            customer_name: payload.customer_name.clone(),
            booking_id: payload.booking_id.clone(),
            status: FormStatus::Pending,
            progress: 0,
            fields: 10,
            completed_fields: 0,
            submitted_at: None,
            created_at: None,
            updated_at: None,
        };
        self.forms.lock().push(created.clone());
        Ok(created)
    }

    async fn update_form(&self, id: &str, payload: &FormUpdate) -> Result<Form, ApiError> {
        self.record("update_form")?;
        let mut forms = self.forms.lock();
        let form = forms.iter_mut().find(|f| f.id == id).ok_or(ApiError::Http {
            status: 404,
            message: "Form not found".to_string(),
        })?;
        if let Some(status) = payload.status {
            form.status = status;
        }
        if let Some(completed) = payload.completed_fields {
            form.completed_fields = completed;
            if form.fields > 0 {
                form.progress = completed * 100 / form.fields;
            }
        }
        Ok(form.clone())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.record("dashboard_stats")?;
        Ok(self.stats.lock().clone())
    }

    async fn revenue_stats(&self) -> Result<RevenueStats, ApiError> {
        self.record("revenue_stats")?;
        Ok(self.revenue.lock().clone())
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.record("list_conversations")?;
        Ok(self.conversations.lock().clone())
    }

    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>, ApiError> {
        self.record("list_messages")?;
        Ok(self
            .messages
            .lock()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_message(&self, payload: &MessageCreate) -> Result<Message, ApiError> {
        self.record("send_message")?;
        let message = Message {
            id: self.assign_id("m"),
            conversation_id: Some(payload.conversation_id.clone()),
            sender_id: Some("u-1".to_string()),
            sender_name: Some("owner".to_string()),
            text: payload.text.clone(),
            is_me: true,
            is_read: false,
            created_at: None,
        };
        self.messages
            .lock()
            .entry(payload.conversation_id.clone())
            .or_default()
            .push(message.clone());
        if let Some(conv) = self
            .conversations
            .lock()
            .iter_mut()
            .find(|c| c.id == payload.conversation_id)
        {
            conv.last_message = Some(payload.text.clone());
        }
        Ok(message)
    }
}
