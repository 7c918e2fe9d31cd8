//! # Estate Users Crate
//!
//! Registration, login and dummy login for the estate backend.
//!
//! - **Repositories**: the [`UserRepo`] port and its SQLite adapter
//! - **Services**: [`UserService`], which owns the registration and login rules
//! - **Types**: [`UserError`] and result aliases
//! - **Utils**: input validation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estate_users::UserService;
//!
//! let service = UserService::new(pool, hasher, tokens);
//! let user_id = service.register("a@x.com", "pass1", "client").await?;
//! let token = service.login(user_id, "pass1").await?;
//! ```

pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;

pub use estate_database::{User, UserRepository};
pub use repositories::UserRepo;
pub use services::{InMemoryUserRepository, UserService};
pub use types::{UserError, UserResult};
