//! Storage adapters for the catalog repository ports.

pub mod memory;
pub mod product;
pub mod user;

pub use catalog_core::repository::{ProductRepository, RepositoryError, UserRepository};
pub use memory::{InMemoryProductRepository, InMemoryUserRepository};
pub use product::SqlProductRepository;
pub use user::SqlUserRepository;

fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
