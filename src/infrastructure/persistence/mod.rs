//! Link store implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Durable storage in PostgreSQL via SQLx
//! - [`MemoryLinkRepository`] - Process-local storage for development and tests

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
