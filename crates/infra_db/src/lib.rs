//! Infrastructure Database Layer
//!
//! This crate provides persistence for the air-freight document system on
//! PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Each document repository
//! persists a header plus its ordered children as one atomic unit keyed by
//! the owning MAWB id: the header row is written with a single
//! insert-or-update, every existing child row is deleted, and the supplied
//! children are reinserted fresh. A unique constraint on the MAWB id keeps
//! the one-document-per-MAWB invariant under concurrent first-time upserts.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool_from_url, run_migrations, ManifestRepository};
//!
//! let pool = create_pool_from_url("postgres://localhost/freight").await?;
//! run_migrations(&pool).await?;
//! let repo = ManifestRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::{DatabaseError, DocumentOpError};
pub use pool::{
    create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool,
};
pub use repositories::draft_mawb::DraftMawbRepository;
pub use repositories::manifest::ManifestRepository;
pub use repositories::mawb_info::MawbInfoRepository;
