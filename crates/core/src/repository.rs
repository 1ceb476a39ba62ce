//! Persistence ports consumed by the catalog services.
//!
//! Adapters live in `catalog-db`; the services only ever see these traits.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::{NewProduct, Product, ProductId};
use crate::domain::user::{NewUser, User, UserId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl RepositoryError {
    pub fn storage(error: impl fmt::Display) -> Self {
        Self::Storage(error.to_string())
    }

    pub fn decode(error: impl fmt::Display) -> Self {
        Self::Decode(error.to_string())
    }
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Stores a new product and returns it with its assigned id.
    async fn save(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError>;

    /// Both bounds are inclusive.
    async fn find_by_price_between(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<Product>, RepositoryError>;

    async fn find_by_color(&self, color: &str) -> Result<Vec<Product>, RepositoryError>;

    async fn exists_by_id(&self, id: &ProductId) -> Result<bool, RepositoryError>;

    /// Returns `false` when no row matched.
    async fn delete_by_id(&self, id: &ProductId) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
}
