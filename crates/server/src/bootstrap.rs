use std::sync::Arc;

use axum::Router;
use catalog_core::config::{AppConfig, ConfigError, LoadOptions};
use catalog_core::service::{ProductService, UserService};
use catalog_db::{connect_with_config, migrations, DbPool, SqlProductRepository, SqlUserRepository};
use thiserror::Error;
use tracing::info;

use crate::{api, health};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub api_state: api::ApiState,
}

impl Application {
    pub fn router(&self) -> Router {
        api::router(self.api_state.clone()).merge(health::router(self.db_pool.clone()))
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

/// Connects storage, applies migrations and wires the SQL repositories into
/// the services. This is the only place adapters are constructed.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool =
        connect_with_config(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let api_state = api::ApiState {
        products: ProductService::new(Arc::new(SqlProductRepository::new(db_pool.clone()))),
        users: UserService::new(Arc::new(SqlUserRepository::new(db_pool.clone()))),
    };

    Ok(Application { config, db_pool, api_state })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use catalog_core::config::{ConfigOverrides, LoadOptions};
    use catalog_core::domain::product::ProductDraft;
    use tower::ServiceExt;

    use crate::bootstrap::bootstrap;

    fn valid_overrides(database_url: &str) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some(database_url.to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_database_url() {
        let result = bootstrap(valid_overrides("postgres://localhost/catalog")).await;

        let message = result.err().expect("error").to_string();
        assert!(message.contains("database.url"));
    }

    #[tokio::test]
    async fn bootstrap_wires_sql_repositories_behind_the_services() {
        let app = bootstrap(valid_overrides("sqlite::memory:"))
            .await
            .expect("bootstrap should succeed with valid overrides");

        let created = app
            .api_state
            .products
            .create(ProductDraft {
                name: Some("Product C".to_string()),
                description: None,
                color: Some("Green".to_string()),
                price: 30.99,
                stock_quantity: 300,
            })
            .await
            .expect("create through sql repository");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product WHERE id = ?")
            .bind(&created.id.0)
            .fetch_one(&app.db_pool)
            .await
            .expect("product row should exist");
        assert_eq!(count, 1);

        let response = app
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("health response");
        assert_eq!(response.status(), StatusCode::OK);

        app.db_pool.close().await;
    }
}
