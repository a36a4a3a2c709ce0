//! Bounded HTTP client shared by the LMS integration

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
