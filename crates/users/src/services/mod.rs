//! Business logic services for user accounts.

pub mod mock_repositories;
pub mod user_service;

pub use mock_repositories::InMemoryUserRepository;
pub use user_service::UserService;
