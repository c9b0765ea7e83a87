//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation, and business rules, and
//! expose a clean API to HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short code issuance and resolution

pub mod services;
