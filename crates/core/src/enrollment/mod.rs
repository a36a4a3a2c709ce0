//! Enrollment orchestration: remote LMS, local record, payment gateway

pub mod orchestrator;
pub mod ports;

pub use orchestrator::EnrollmentOrchestrator;
