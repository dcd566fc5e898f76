//! User store adapters.
//!
//! `MongoUserRepository` is the production adapter; `InMemoryUserRepository`
//! backs tests and local runs. Both only translate between documents and
//! domain types; business rules stay in the domain service.
//!
//! # Example
//!
//! ```no_run
//! use userinfo::outbound::persistence::{MongoUserRepository, StoreConfig, connect};
//!
//! # async fn example() -> Result<(), userinfo::outbound::persistence::StoreError> {
//! let collection = connect(&StoreConfig::new("mongodb://localhost:27017")).await?;
//! let repo = MongoUserRepository::new(collection);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod documents;
mod memory_user_repository;
mod mongo_user_repository;
mod store;

pub use documents::UserDocument;
pub use memory_user_repository::InMemoryUserRepository;
pub use mongo_user_repository::MongoUserRepository;
pub use store::{StoreConfig, StoreError, connect};
