use std::sync::Arc;

use tracing::info;

use crate::domain::user::{NewUser, User, UserId};
use crate::errors::CatalogError;
use crate::repository::UserRepository;

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, user: NewUser) -> Result<User, CatalogError> {
        let user = self.repository.save(user).await?;
        info!(event_name = "catalog.user.created", user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<User, CatalogError> {
        self.repository
            .find_by_id(&UserId(id.to_string()))
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("User not found with id: {id}")))
    }
}
