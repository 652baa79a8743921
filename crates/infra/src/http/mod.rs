//! HTTP transport

pub mod client;

pub use client::{transport_diagnostic, HttpClient, HttpClientBuilder};
