//! Client core for the CareOps operations dashboard.
//!
//! Every screen is a thin view over the CareOps REST backend and follows
//! the same cycle: load on mount, filter and count in memory, mutate
//! through a typed endpoint, then re-fetch the collection so client state
//! stays authoritative from the server. This crate implements that cycle
//! once and exposes it per page:
//!
//! - `api`: typed endpoint surface (trait + reqwest client)
//! - `loader`: the idle/loading/loaded/error state machine
//! - `invalidation`: explicit resource-key invalidation for mutations
//! - `filter`: pure substring projections for search boxes
//! - `session`: durable token + user storage, injected into the client
//! - `services`: one view-model per page (bookings, contacts, forms,
//!   inventory, staff, inbox, dashboard, auth)
//!
//! The rendering shell (markup, routing, styling) lives elsewhere and
//! drives these services.

pub mod api;
pub mod error;
pub mod filter;
pub mod invalidation;
pub mod loader;
pub mod services;
pub mod session;
pub mod types;

pub use api::{Api, HttpApi};
pub use error::{ApiError, ErrorKind, PageError};
pub use invalidation::InvalidationBus;
pub use loader::{ResourceLoader, ResourceState};
pub use session::SessionStore;
