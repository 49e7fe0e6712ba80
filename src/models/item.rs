//! Catalog item model

use serde::{Deserialize, Serialize};

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Item {
    /// A plain catalog entry without description, tax or tags
    pub fn basic(id: i64, name: &str, category: &str, price: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            category: category.to_string(),
            price,
            description: None,
            tax: None,
            tags: Vec::new(),
        }
    }

    /// Price plus tax, when the item carries a tax
    pub fn price_with_tax(&self) -> Option<f64> {
        self.tax.map(|tax| self.price + tax)
    }
}

/// Input for adding an item to the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemInput {
    pub name: String,
    #[serde(default = "default_item_category")]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tax: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_item_category() -> String {
    "other".to_string()
}

/// Field to sort catalog items by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    Price,
    Category,
}

/// One page of a validated catalog search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPage {
    pub page: i64,
    pub size: i64,
    /// Matches across all pages
    pub total: usize,
    pub items: Vec<Item>,
}
