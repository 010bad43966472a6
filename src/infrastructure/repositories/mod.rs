//! Repository Implementations
//!
//! Implementations of the domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgPartnershipRepository** - PostgreSQL-backed partnerships
//! - **InMemoryPartnershipRepository** - process-local partnerships
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::PgPartnershipRepository;
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let partnership_repo = PgPartnershipRepository::new(pool);
//! }
//! ```

pub mod memory_partnership_repository;
pub mod partnership_repository;

pub use memory_partnership_repository::InMemoryPartnershipRepository;
pub use partnership_repository::PgPartnershipRepository;
