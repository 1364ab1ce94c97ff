//! Users Domain
//!
//! Complete domain implementation for the user resource: CRUD with
//! offset/limit pagination, partial updates, a uniqueness constraint over
//! `(first_name, last_name)`, and token-based login against a fixed principal.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, error translation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, pagination
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let repository = Arc::new(InMemoryUserRepository::new());
//! let service = Arc::new(UserService::new(repository));
//!
//! let router = handlers::router(service);
//! ```

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod page;
pub mod postgres_repository;
pub mod principal;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use auth_handlers::{AuthState, LoginRequest, TokenResponse, auth_router};
pub use error::{UserError, UserResult};
pub use models::{NewUser, User, UserPatch};
pub use page::{Page, PageRequest, Sort, SortDirection, SortField};
pub use postgres_repository::PostgresUserRepository;
pub use principal::{FixedPrincipalStore, Principal, PrincipalStore};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
