use tokio::sync::RwLock;

use catalog_core::domain::product::{NewProduct, Product, ProductId};
use catalog_core::domain::user::{NewUser, User, UserId};

use super::{new_id, ProductRepository, RepositoryError, UserRepository};

/// Keeps products in insertion order, matching the SQL adapter's listing order.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    async fn filter(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        let products = self.products.read().await;
        products.iter().filter(|product| predicate(product)).cloned().collect()
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let product = product.with_id(ProductId(new_id()));
        let mut products = self.products.write().await;
        products.push(product.clone());
        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|product| &product.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.filter(|product| product.name == name).await)
    }

    async fn find_by_price_between(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.filter(|product| product.price >= min && product.price <= max).await)
    }

    async fn find_by_color(&self, color: &str) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.filter(|product| product.color.as_deref() == Some(color)).await)
    }

    async fn exists_by_id(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.iter().any(|product| &product.id == id))
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|product| &product.id != id);
        Ok(products.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: NewUser) -> Result<User, RepositoryError> {
        let user = user.with_id(UserId(new_id()));
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| &user.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::domain::product::NewProduct;
    use catalog_core::domain::user::NewUser;

    use crate::repositories::{
        InMemoryProductRepository, InMemoryUserRepository, ProductRepository, UserRepository,
    };

    fn new_product(name: &str, color: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            color: Some(color.to_string()),
            price,
            stock_quantity: 1,
        }
    }

    #[tokio::test]
    async fn in_memory_product_repo_filters_like_sql() {
        let repo = InMemoryProductRepository::default();
        let lamp = repo.save(new_product("Lamp", "Red", 10.0)).await.expect("save lamp");
        repo.save(new_product("Desk", "Oak", 50.0)).await.expect("save desk");
        repo.save(new_product("Chair", "Red", 50.01)).await.expect("save chair");

        assert_eq!(repo.find_by_name("Lamp").await.expect("by name"), vec![lamp.clone()]);
        assert_eq!(repo.find_by_color("Red").await.expect("by color").len(), 2);
        assert_eq!(repo.find_by_price_between(10.0, 50.0).await.expect("by price").len(), 2);
        assert_eq!(repo.find_all().await.expect("all").first(), Some(&lamp));
    }

    #[tokio::test]
    async fn in_memory_product_repo_delete_reports_whether_it_removed() {
        let repo = InMemoryProductRepository::default();
        let lamp = repo.save(new_product("Lamp", "Red", 10.0)).await.expect("save lamp");

        assert!(repo.exists_by_id(&lamp.id).await.expect("exists"));
        assert!(repo.delete_by_id(&lamp.id).await.expect("delete"));
        assert!(!repo.delete_by_id(&lamp.id).await.expect("second delete"));
        assert_eq!(repo.find_by_id(&lamp.id).await.expect("find"), None);
    }

    #[tokio::test]
    async fn in_memory_user_repo_round_trip() {
        let repo = InMemoryUserRepository::default();
        let user = repo
            .save(NewUser {
                first_name: "Janne".to_string(),
                last_name: "Jannesson".to_string(),
                email: "janne@gmail.com".to_string(),
            })
            .await
            .expect("save user");

        assert_eq!(repo.find_by_id(&user.id).await.expect("find user"), Some(user));
    }
}
