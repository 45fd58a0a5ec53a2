//! Wire models for the CareOps REST backend.
//!
//! One type per endpoint payload, deserialized at the boundary before any
//! view logic sees the data. The backend speaks snake_case JSON with string
//! ids; optional fields carry serde defaults so a sparse response renders
//! as empty/zero instead of failing the whole page.

use serde::{Deserialize, Serialize};

// ============================================================================
// Status enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    #[serde(rename = "no-show")]
    NoShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Pending,
    Completed,
    Overdue,
}

/// Stock level, derived server-side from `available` vs `threshold`.
/// The legacy front-end called the healthy state `ok`; the backend writes
/// `normal`. Both are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryStatus {
    #[serde(alias = "ok")]
    Normal,
    Low,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffStatus {
    Active,
    Inactive,
}

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    #[serde(alias = "customer")]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub service: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub status: BookingStatus,
    #[serde(default)]
    pub assigned_staff_id: Option<String>,
    #[serde(default)]
    pub assigned_staff_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: ContactStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub bookings_count: u32,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub last_interaction: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub name: String,
    #[serde(alias = "customer")]
    pub customer_name: String,
    #[serde(default)]
    pub booking_id: Option<String>,
    pub status: FormStatus,
    /// Completion percentage, 0–100.
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub fields: u32,
    #[serde(default)]
    pub completed_fields: u32,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub available: u32,
    pub threshold: u32,
    pub status: InventoryStatus,
    #[serde(default)]
    pub usage_per_booking: f64,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub last_restocked: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub email: String,
    #[serde(alias = "name")]
    pub username: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Access role (`admin` | `staff`), distinct from the display title.
    pub role: String,
    #[serde(default)]
    pub role_title: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub status: StaffStatus,
    #[serde(default)]
    pub joined_date: String,
    #[serde(default)]
    pub last_active: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default, alias = "updated_at")]
    pub last_message_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub unread: u32,
}

/// A single message within a conversation. The backend returns these
/// ordered by `created_at` ascending; the client keeps that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub text: String,
    #[serde(default)]
    pub is_me: bool,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ============================================================================
// Auth payloads
// ============================================================================

/// Response from `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

// ============================================================================
// Create / update payloads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BookingCreate {
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub service: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for BookingCreate {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_email: None,
            customer_phone: None,
            service: String::new(),
            date: String::new(),
            time: String::new(),
            duration: "60 min".to_string(),
            location: String::new(),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FormCreate {
    pub name: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FormUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FormStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_fields: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub category: String,
    pub available: u32,
    pub threshold: u32,
    pub usage_per_booking: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

impl Default for InventoryItemCreate {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            available: 0,
            threshold: 10,
            usage_per_booking: 1.0,
            supplier: None,
            unit_price: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InventoryItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_per_booking: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_restocked: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffCreate {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub role_title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl Default for StaffCreate {
    fn default() -> Self {
        Self {
            email: String::new(),
            username: String::new(),
            password: String::new(),
            phone_number: None,
            role_title: "Staff Member".to_string(),
            permissions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StaffUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StaffStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageCreate {
    pub conversation_id: String,
    pub text: String,
}

// ============================================================================
// Analytics
// ============================================================================

/// Aggregate metrics for the dashboard. Every field is optional on the
/// wire; a missing count renders as zero and a missing collection as
/// empty, never a crash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub pending_bookings: u64,
    #[serde(default)]
    pub completed_bookings: u64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_contacts: u64,
    #[serde(default)]
    pub active_staff: u64,
    #[serde(default)]
    pub low_stock_items: u64,
    #[serde(default)]
    pub overdue_forms: u64,
    #[serde(default)]
    pub alerts: Vec<DashboardAlert>,
    #[serde(default)]
    pub recent_bookings: Vec<Booking>,
    #[serde(default)]
    pub booking_trend: Vec<TrendPoint>,
    #[serde(default)]
    pub completion_data: Vec<CompletionSlice>,
}

/// An operational alert surfaced on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAlert {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One point of the booking-trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub name: String,
    #[serde(default)]
    pub bookings: u64,
}

/// One slice of the form-completion breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSlice {
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueStats {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub this_month: f64,
    #[serde(default)]
    pub last_month: f64,
    #[serde(default)]
    pub growth_percentage: f64,
}

/// Low/critical stock summary from `GET /inventory/alerts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryAlerts {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

// ============================================================================
// Tests
// ============================================================================
