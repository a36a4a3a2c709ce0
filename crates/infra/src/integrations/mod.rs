//! External service integrations

pub mod lms;
