//! Product catalog

use tokio::sync::RwLock;

use crate::models::Item;

#[derive(Debug)]
struct CatalogData {
    items: Vec<Item>,
    next_id: i64,
}

/// Catalog items in id order
#[derive(Debug)]
pub struct ItemCatalog {
    data: RwLock<CatalogData>,
}

impl ItemCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        Self {
            data: RwLock::new(CatalogData { items, next_id }),
        }
    }

    /// The catalog with its ten sample products
    pub fn seeded() -> Self {
        Self::new(vec![
            Item::basic(1, "Laptop", "electronics", 999.99),
            Item::basic(2, "Headphones", "electronics", 99.99),
            Item::basic(3, "Coffee Mug", "kitchen", 9.99),
            Item::basic(4, "Book", "books", 19.99),
            Item::basic(5, "Smartphone", "electronics", 699.99),
            Item::basic(6, "Tablet", "electronics", 299.99),
            Item::basic(7, "Microwave", "appliances", 150.0),
            Item::basic(8, "Sofa", "furniture", 499.99),
            Item::basic(9, "Chair", "furniture", 199.99),
            Item::basic(10, "Desk", "furniture", 299.99),
        ])
    }

    /// Copy of every item
    pub async fn snapshot(&self) -> Vec<Item> {
        self.data.read().await.items.clone()
    }

    /// Append an item, assigning the next id
    pub async fn add(&self, mut item: Item) -> Item {
        let mut data = self.data.write().await;
        item.id = data.next_id;
        data.next_id += 1;
        data.items.push(item.clone());
        item
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_catalog() {
        let catalog = ItemCatalog::seeded();
        let items = catalog.snapshot().await;
        assert_eq!(items.len(), 10);
        assert_eq!(items[0].name, "Laptop");
        assert_eq!(items[9].id, 10);
    }

    #[tokio::test]
    async fn test_add_assigns_next_id() {
        let catalog = ItemCatalog::seeded();
        let added = catalog.add(Item::basic(0, "Lamp", "furniture", 39.5)).await;
        assert_eq!(added.id, 11);
        assert_eq!(catalog.snapshot().await.len(), 11);

        let empty = ItemCatalog::new(Vec::new());
        assert_eq!(empty.add(Item::basic(0, "First", "misc", 1.0)).await.id, 1);
    }
}
