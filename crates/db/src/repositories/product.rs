use chrono::Utc;
use sqlx::Row;

use catalog_core::domain::product::{NewProduct, Product, ProductId};

use super::{new_id, ProductRepository, RepositoryError};
use crate::DbPool;

const PRODUCT_COLUMNS: &str = "id, name, description, color, price, stock_quantity";

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(
        &self,
        predicate: &str,
        binds: &[Bind<'_>],
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product {predicate} ORDER BY rowid ASC");
        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = match bind {
                Bind::Text(value) => query.bind(*value),
                Bind::Real(value) => query.bind(*value),
            };
        }

        let rows = query.fetch_all(&self.pool).await.map_err(RepositoryError::storage)?;
        rows.iter().map(row_to_product).collect()
    }
}

enum Bind<'a> {
    Text(&'a str),
    Real(f64),
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let id: String = row.try_get("id").map_err(RepositoryError::decode)?;
    let name: String = row.try_get("name").map_err(RepositoryError::decode)?;
    let description: Option<String> =
        row.try_get("description").map_err(RepositoryError::decode)?;
    let color: Option<String> = row.try_get("color").map_err(RepositoryError::decode)?;
    let price: f64 = row.try_get("price").map_err(RepositoryError::decode)?;
    let stock_quantity: i64 = row.try_get("stock_quantity").map_err(RepositoryError::decode)?;

    Ok(Product { id: ProductId(id), name, description, color, price, stock_quantity })
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn save(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let product = product.with_id(ProductId(new_id()));

        sqlx::query(
            "INSERT INTO product (id, name, description, color, price, stock_quantity, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.id.0)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.color)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.fetch_where("", &[]).await
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ?"))
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        match row {
            Some(ref r) => Ok(Some(row_to_product(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError> {
        self.fetch_where("WHERE name = ?", &[Bind::Text(name)]).await
    }

    async fn find_by_price_between(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<Product>, RepositoryError> {
        self.fetch_where("WHERE price BETWEEN ? AND ?", &[Bind::Real(min), Bind::Real(max)]).await
    }

    async fn find_by_color(&self, color: &str) -> Result<Vec<Product>, RepositoryError> {
        self.fetch_where("WHERE color = ?", &[Bind::Text(color)]).await
    }

    async fn exists_by_id(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM product WHERE id = ?")
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        Ok(exists.is_some())
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?")
            .bind(&id.0)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        Ok(result.rows_affected() > 0)
    }
}
