//! Reconciliation of upstream LMS collections against local storage

pub mod engine;
pub mod ports;

pub use engine::SyncEngine;
