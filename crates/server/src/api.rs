//! JSON routes for the product and user catalog.
//!
//! - `POST   /api/products`                          — create a product (201)
//! - `GET    /api/products`                          — list every product
//! - `GET    /api/products/name/{name}`              — products with an exact name
//! - `GET    /api/products/price?minPrice=&maxPrice=` — products in an inclusive price range
//! - `GET    /api/products/color/{color}`            — products with an exact color
//! - `DELETE /api/products/{id}`                     — delete a product (204)
//! - `POST   /api/users`                             — create a user (201)
//! - `GET    /api/users/{id}`                        — fetch a user

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use catalog_core::domain::product::{Product, ProductDraft};
use catalog_core::domain::user::{NewUser, User};
use catalog_core::errors::{CatalogError, InterfaceError};
use catalog_core::service::{ProductService, UserService};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiState {
    pub products: ProductService,
    pub users: UserService,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeQuery {
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub error: String,
    pub correlation_id: String,
}

/// Service failure tagged with a fresh correlation id.
#[derive(Debug)]
pub struct ApiError(InterfaceError);

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        Self(error.into_interface(Uuid::new_v4().to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let interface = self.0;
        let (status, message) = match &interface {
            InterfaceError::BadRequest { message, .. } => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            InterfaceError::NotFound { message, .. } => (StatusCode::NOT_FOUND, message.clone()),
            InterfaceError::ServiceUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, interface.user_message().to_string())
            }
            InterfaceError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, interface.user_message().to_string())
            }
        };

        if status.is_server_error() {
            error!(
                event_name = "catalog.api.failure",
                correlation_id = %interface.correlation_id(),
                error = %interface,
                "request failed"
            );
        } else {
            warn!(
                event_name = "catalog.api.rejected",
                correlation_id = %interface.correlation_id(),
                status = status.as_u16(),
                error = %interface,
                "request rejected"
            );
        }

        let body =
            ApiErrorBody { error: message, correlation_id: interface.correlation_id().to_string() };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/products", post(create_product).get(list_products))
        .route("/api/products/name/{name}", get(products_by_name))
        .route("/api/products/price", get(products_by_price))
        .route("/api/products/color/{color}", get(products_by_color))
        .route("/api/products/{id}", delete(delete_product))
        .route("/api/users", post(create_user))
        .route("/api/users/{id}", get(get_user))
        .with_state(state)
}

async fn create_product(
    State(state): State<ApiState>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn list_products(State(state): State<ApiState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list_all().await?))
}

async fn products_by_name(
    Path(name): Path<String>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_by_name(&name).await?))
}

async fn products_by_price(
    Query(range): Query<PriceRangeQuery>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_by_price_range(range.min_price, range.max_price).await?))
}

async fn products_by_color(
    Path(color): Path<String>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_by_color(&color).await?))
}

async fn delete_product(
    Path(id): Path<String>,
    State(state): State<ApiState>,
) -> Result<StatusCode, ApiError> {
    state.products.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_user(
    State(state): State<ApiState>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.create(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    Path(id): Path<String>,
    State(state): State<ApiState>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.find_by_id(&id).await?))
}
