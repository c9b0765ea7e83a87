//! Domain layer containing business entities and the contracts the service
//! depends on.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Link store contract
//! - [`code_source`] - Source of candidate short codes
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Concrete stores live in [`crate::infrastructure::persistence`] and the
//! random code generator in [`crate::utils::code_generator`].

pub mod code_source;
pub mod entities;
pub mod repositories;
