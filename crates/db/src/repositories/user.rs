use chrono::Utc;
use sqlx::Row;

use catalog_core::domain::user::{NewUser, User, UserId};

use super::{new_id, RepositoryError, UserRepository};
use crate::DbPool;

pub struct SqlUserRepository {
    pool: DbPool,
}

impl SqlUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let id: String = row.try_get("id").map_err(RepositoryError::decode)?;
    let first_name: String = row.try_get("first_name").map_err(RepositoryError::decode)?;
    let last_name: String = row.try_get("last_name").map_err(RepositoryError::decode)?;
    let email: String = row.try_get("email").map_err(RepositoryError::decode)?;

    Ok(User { id: UserId(id), first_name, last_name, email })
}

#[async_trait::async_trait]
impl UserRepository for SqlUserRepository {
    async fn save(&self, user: NewUser) -> Result<User, RepositoryError> {
        let user = user.with_id(UserId(new_id()));

        sqlx::query(
            "INSERT INTO app_user (id, first_name, last_name, email, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id.0)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT id, first_name, last_name, email FROM app_user WHERE id = ?")
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        match row {
            Some(ref r) => Ok(Some(row_to_user(r)?)),
            None => Ok(None),
        }
    }
}
