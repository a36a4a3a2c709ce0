//! # Edulink Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The offline-degradation controller
//! - Port/adapter interfaces (traits) for the LMS, record store, payment
//!   gateway and session collaborators
//! - The catalog read surface, sync engine and enrollment orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `edulink-domain`
//! - No HTTP or database code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod catalog;
pub mod enrollment;
pub mod offline;
pub mod sync;

// Re-export specific items to avoid ambiguity
pub use catalog::ports::{LmsPort, SessionPort};
pub use catalog::CatalogService;
pub use enrollment::ports::PaymentGateway;
pub use enrollment::EnrollmentOrchestrator;
pub use offline::{OfflineController, OfflineState};
pub use sync::ports::{CourseRepository, EnrollmentRepository, StudentRepository};
pub use sync::SyncEngine;
