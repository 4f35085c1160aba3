//! Deployment-mode classification and per-navigation access decisions.
//!
//! One deployment serves two audiences from two hostnames: a public
//! deposit-only surface and a private full-control surface. Every view
//! request runs origin classification and the access gate before render;
//! both are pure functions so they can run on every navigation.

pub mod classify;
pub mod gate;
pub mod routes;

pub use {
    classify::{DomainClassifier, DomainMode, is_loopback},
    gate::{AccessDecision, AccessGate, Evaluation},
    routes::{Route, RouteId, RouteRequirement, RouteTable},
};
