//! Page services — one module per screen, each a thin view-model over the
//! typed API. They all share the same cycle: fetch on mount, pure
//! filtered views and counters over the loaded collection, and
//! create/update/delete operations that invalidate and refetch on success.

pub mod auth;
pub mod bookings;
pub mod contacts;
pub mod dashboard;
pub mod forms;
pub mod inbox;
pub mod inventory;
pub mod staff;

#[cfg(test)]
pub(crate) mod testutil;
