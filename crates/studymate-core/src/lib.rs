//! # StudyMate Core
//!
//! Shared foundation for the StudyMate backend: configuration, the error
//! taxonomy, wire/domain types, the read-only topic catalog, and the traits
//! every external-service client implements.
//!
//! Components never reach for ambient singletons — each one receives the
//! clients it needs as `Arc<dyn Trait>` so tests can substitute fakes.

pub mod catalog;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use catalog::TopicCatalog;
pub use config::StudyMateConfig;
pub use error::{Result, StudyMateError};
