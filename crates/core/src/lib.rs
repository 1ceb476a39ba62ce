pub mod config;
pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;

pub use domain::product::{NewProduct, Product, ProductDraft, ProductId};
pub use domain::user::{NewUser, User, UserId};
pub use errors::{CatalogError, InterfaceError};
pub use repository::{ProductRepository, RepositoryError, UserRepository};
pub use service::{ProductService, UserService};
