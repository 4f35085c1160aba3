//! Session lifecycle for the capital dashboard.
//!
//! One persisted token slot is the source of truth for the bearer session.
//! `SessionManager` owns the slot and the outbound identity derived from
//! it; no other component writes either. A missing, expired or malformed
//! stored token degrades silently to the anonymous state. That is a
//! normal visit, not a fault.

pub mod error;
pub mod manager;
pub mod store;
pub mod token;

pub use {
    error::AuthError,
    manager::SessionManager,
    store::TokenSlot,
    token::{Claims, Role, Session},
};
