//! Hosted-store adapters
//!
//! `StoreClient` speaks the backend's REST dialect; the per-entity adapters
//! implement the core store ports on top of it.

mod appointments;
mod calls;
mod client;
mod clients;
mod users;

pub use appointments::StoreAppointments;
pub use calls::StoreCalls;
pub use client::{Filter, StoreClient};
pub use clients::StoreClients;
pub use users::StoreUsers;
