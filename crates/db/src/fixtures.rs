use catalog_core::domain::product::ProductDraft;
use catalog_core::errors::CatalogError;
use catalog_core::service::ProductService;

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    color: &'static str,
    price: f64,
    stock_quantity: i64,
}

/// Demo products loaded by `catalog seed`.
const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Product A",
        description: "Description for Product A",
        color: "Red",
        price: 10.99,
        stock_quantity: 100,
    },
    SeedProduct {
        name: "Product B",
        description: "Description for Product B",
        color: "Blue",
        price: 20.49,
        stock_quantity: 200,
    },
    SeedProduct {
        name: "Product C",
        description: "Description for Product C",
        color: "Red",
        price: 30.99,
        stock_quantity: 300,
    },
];

pub struct DemoCatalog;

#[derive(Clone, Debug, PartialEq)]
pub struct SeedResult {
    pub inserted: usize,
    pub skipped: usize,
}

impl DemoCatalog {
    pub fn drafts() -> Vec<ProductDraft> {
        SEED_PRODUCTS
            .iter()
            .map(|seed| ProductDraft {
                name: Some(seed.name.to_string()),
                description: Some(seed.description.to_string()),
                color: Some(seed.color.to_string()),
                price: seed.price,
                stock_quantity: seed.stock_quantity,
            })
            .collect()
    }

    /// Inserts every demo product whose name is not in the catalog yet, so
    /// repeated runs leave a single copy of each.
    pub async fn load(service: &ProductService) -> Result<SeedResult, CatalogError> {
        let mut result = SeedResult { inserted: 0, skipped: 0 };

        for draft in Self::drafts() {
            let name = draft.name.clone().unwrap_or_default();
            match service.find_by_name(&name).await {
                Ok(_) => {
                    result.skipped += 1;
                    continue;
                }
                Err(CatalogError::NotFound(_)) => {}
                Err(error) => return Err(error),
            }

            service.create(draft).await?;
            result.inserted += 1;
        }

        Ok(result)
    }
}
