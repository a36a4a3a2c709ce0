//! Catalog surface: course/user listings with offline degradation

pub mod ports;
pub mod service;
pub mod simulated;

pub use service::CatalogService;
