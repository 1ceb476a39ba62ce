use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::product::{NewProduct, Product, ProductDraft, ProductId};
use crate::errors::CatalogError;
use crate::repository::ProductRepository;

const NAME_REQUIRED: &str = "Product name cannot be null or empty.";
const PRICE_NEGATIVE: &str = "Product price cannot be negative.";
const STOCK_NEGATIVE: &str = "Stock quantity cannot be negative.";
const COLOR_REQUIRED: &str = "Product color cannot be null or empty.";
const ID_REQUIRED: &str = "Product ID cannot be null or empty.";
const RANGE_NEGATIVE: &str = "Price values cannot be negative.";
const RANGE_NOT_FINITE: &str = "Price values must be finite numbers.";
const RANGE_INVERTED: &str = "minPrice cannot be greater than maxPrice.";

/// Validation-then-delegate front of the product catalog.
///
/// Every check runs before the repository is touched, so a rejected call never
/// reaches storage.
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let candidate = validate_draft(draft)?;
        let product = self.repository.save(candidate).await?;

        info!(
            event_name = "catalog.product.created",
            product_id = %product.id,
            name = %product.name,
            "product created"
        );
        Ok(product)
    }

    pub async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.repository.find_all().await?;
        debug!(event_name = "catalog.product.listed", count = products.len(), "listed products");
        Ok(products)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, CatalogError> {
        require_text(name, NAME_REQUIRED)?;

        let products = self.repository.find_by_name(name).await?;
        if products.is_empty() {
            return Err(CatalogError::not_found(format!("No products found with name: {name}")));
        }
        Ok(products)
    }

    pub async fn find_by_price_range(
        &self,
        min_price: f64,
        max_price: f64,
    ) -> Result<Vec<Product>, CatalogError> {
        if min_price < 0.0 || max_price < 0.0 {
            return Err(CatalogError::invalid_argument(RANGE_NEGATIVE));
        }
        if !min_price.is_finite() || !max_price.is_finite() {
            return Err(CatalogError::invalid_argument(RANGE_NOT_FINITE));
        }
        if min_price > max_price {
            return Err(CatalogError::invalid_argument(RANGE_INVERTED));
        }

        let products = self.repository.find_by_price_between(min_price, max_price).await?;
        if products.is_empty() {
            return Err(CatalogError::not_found(format!(
                "No products found within price range: {min_price:?} - {max_price:?}"
            )));
        }
        Ok(products)
    }

    pub async fn find_by_color(&self, color: &str) -> Result<Vec<Product>, CatalogError> {
        require_text(color, COLOR_REQUIRED)?;

        let products = self.repository.find_by_color(color).await?;
        if products.is_empty() {
            return Err(CatalogError::not_found(format!("No products found with color: {color}")));
        }
        Ok(products)
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), CatalogError> {
        require_text(id, ID_REQUIRED)?;

        let product_id = ProductId(id.to_string());
        if !self.repository.exists_by_id(&product_id).await? {
            return Err(product_not_found(id));
        }

        // A concurrent delete can land between the two calls.
        if !self.repository.delete_by_id(&product_id).await? {
            return Err(product_not_found(id));
        }

        info!(event_name = "catalog.product.deleted", product_id = %product_id, "product deleted");
        Ok(())
    }
}

fn validate_draft(draft: ProductDraft) -> Result<NewProduct, CatalogError> {
    let name = match draft.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(CatalogError::invalid_argument(NAME_REQUIRED)),
    };
    if draft.price < 0.0 {
        return Err(CatalogError::invalid_argument(PRICE_NEGATIVE));
    }
    if draft.stock_quantity < 0 {
        return Err(CatalogError::invalid_argument(STOCK_NEGATIVE));
    }

    Ok(NewProduct {
        name,
        description: draft.description,
        color: draft.color,
        price: draft.price,
        stock_quantity: draft.stock_quantity,
    })
}

fn require_text(value: &str, message: &'static str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::invalid_argument(message));
    }
    Ok(())
}

fn product_not_found(id: &str) -> CatalogError {
    CatalogError::not_found(format!("Product not found with id: {id}"))
}
