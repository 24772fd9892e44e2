//! HTTP client for the goshuin backend service.
//!
//! The backend is an opaque REST API owning authentication, persistence,
//! image storage, and export generation. [`BackendClient`] wraps its
//! endpoints with typed methods; every authenticated call takes the
//! caller's bearer token, and error responses surface the backend's
//! `detail` field through [`BackendError`].

pub mod auth;
pub mod client;
pub mod error;
pub mod export;
pub mod goshuin;
pub mod prefectures;
pub mod spots;

pub use client::BackendClient;
pub use error::BackendError;
