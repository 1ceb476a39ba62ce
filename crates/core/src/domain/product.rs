use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored catalog product. Only the repository hands these out, so the id is
/// always assigned and the price/stock invariants were checked on the way in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
}

/// Caller-supplied candidate for a new product, exactly as it arrived.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock_quantity: i64,
}

/// A validated product that has not been persisted yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
}

impl NewProduct {
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            color: self.color,
            price: self.price,
            stock_quantity: self.stock_quantity,
        }
    }
}
