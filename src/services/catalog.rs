//! Catalog service
//!
//! Read-mostly queries over the product catalog: paging, name search, price
//! and category filtering, sorting, and a validated paged search.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::models::{CreateItemInput, Item, ItemPage, SortBy};
use crate::services::validation;
use crate::store::ItemCatalog;

/// Largest page size accepted by `validated_page`
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub struct CatalogService {
    catalog: Arc<ItemCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<ItemCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn list(&self, skip: usize, limit: usize) -> Vec<Item> {
        self.catalog
            .snapshot()
            .await
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect()
    }

    /// Items whose name contains `query`, ignoring case; everything when absent
    pub async fn search(&self, query: Option<&str>) -> Vec<Item> {
        let items = self.catalog.snapshot().await;
        match query.filter(|q| !q.is_empty()) {
            Some(q) => name_matches(items, q),
            None => items,
        }
    }

    /// Items priced within `[min_price, max_price]`, optionally in `category`
    pub async fn filter(
        &self,
        min_price: f64,
        max_price: f64,
        category: Option<&str>,
    ) -> Vec<Item> {
        let category = category.filter(|c| !c.is_empty()).map(str::to_lowercase);
        self.catalog
            .snapshot()
            .await
            .into_iter()
            .filter(|item| item.price >= min_price && item.price <= max_price)
            .filter(|item| match category {
                Some(ref c) => item.category.to_lowercase() == *c,
                None => true,
            })
            .collect()
    }

    /// Every item ordered by `sort_by`; items that compare equal keep catalog order
    pub async fn sort(&self, sort_by: SortBy, descending: bool) -> Vec<Item> {
        let mut items = self.catalog.snapshot().await;
        items.sort_by(|a, b| {
            let ord = compare(a, b, sort_by);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        items
    }

    /// One page of the (optionally searched) catalog.
    ///
    /// `page` starts at 1; `total` counts every match, not just this page.
    pub async fn validated_page(
        &self,
        page: i64,
        size: i64,
        search: Option<&str>,
    ) -> Result<ItemPage, CatalogServiceError> {
        if page < 1 {
            return Err(CatalogServiceError::ValidationError(
                "page must be greater than 0".to_string(),
            ));
        }
        if size < 1 || size > MAX_PAGE_SIZE as i64 {
            return Err(CatalogServiceError::ValidationError(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if let Some(term) = search {
            validation::length_between("search", term, 3, 50)
                .map_err(CatalogServiceError::ValidationError)?;
        }

        let items = self.catalog.snapshot().await;
        let matches = match search {
            Some(term) => name_matches(items, term),
            None => items,
        };

        let start = usize::try_from(page - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(size as usize);
        let total = matches.len();
        let items = matches.into_iter().skip(start).take(size as usize).collect();

        Ok(ItemPage {
            page,
            size,
            total,
            items,
        })
    }

    pub async fn create(&self, input: CreateItemInput) -> Result<Item, CatalogServiceError> {
        if input.name.trim().is_empty() {
            return Err(CatalogServiceError::ValidationError(
                "name cannot be empty".to_string(),
            ));
        }
        if input.price <= 0.0 {
            return Err(CatalogServiceError::ValidationError(
                "price must be greater than 0".to_string(),
            ));
        }
        if let Some(tax) = input.tax {
            if tax < 0.0 {
                return Err(CatalogServiceError::ValidationError(
                    "tax cannot be negative".to_string(),
                ));
            }
        }
        if let Some(ref description) = input.description {
            validation::max_length("description", description, 300)
                .map_err(CatalogServiceError::ValidationError)?;
        }

        let item = self
            .catalog
            .add(Item {
                id: 0,
                name: input.name,
                category: input.category,
                price: input.price,
                description: input.description,
                tax: input.tax,
                tags: input.tags,
            })
            .await;
        tracing::info!(item_id = item.id, name = %item.name, "Item added");
        Ok(item)
    }
}

fn name_matches(items: Vec<Item>, query: &str) -> Vec<Item> {
    let query = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .collect()
}

fn compare(a: &Item, b: &Item, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Name => a.name.cmp(&b.name),
        SortBy::Price => a.price.total_cmp(&b.price),
        SortBy::Category => a.category.cmp(&b.category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(ItemCatalog::seeded()))
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_pages() {
        let service = service();
        assert_eq!(service.list(0, 10).await.len(), 10);
        assert_eq!(names(&service.list(8, 10).await), vec!["Chair", "Desk"]);
        assert!(service.list(20, 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_ignores_case() {
        let service = service();
        assert_eq!(names(&service.search(Some("LAP")).await), vec!["Laptop"]);
        assert_eq!(service.search(None).await.len(), 10);
        assert_eq!(service.search(Some("")).await.len(), 10);
        assert!(service.search(Some("zebra")).await.is_empty());
    }

    #[tokio::test]
    async fn test_filter_bounds_are_inclusive() {
        let service = service();
        let items = service.filter(99.99, 299.99, None).await;
        assert_eq!(
            names(&items),
            vec!["Headphones", "Tablet", "Microwave", "Chair", "Desk"]
        );

        let electronics = service
            .filter(0.0, f64::INFINITY, Some("Electronics"))
            .await;
        assert_eq!(electronics.len(), 4);
    }

    #[tokio::test]
    async fn test_sort_is_stable_both_ways() {
        let service = service();

        // Tablet and Desk share a price; catalog order survives either direction
        let asc = service.sort(SortBy::Price, false).await;
        assert_eq!(asc.first().unwrap().name, "Coffee Mug");
        let asc_names = names(&asc);
        let tablet = asc_names.iter().position(|n| *n == "Tablet").unwrap();
        assert_eq!(asc_names[tablet + 1], "Desk");

        let desc = service.sort(SortBy::Price, true).await;
        assert_eq!(desc.first().unwrap().name, "Laptop");
        let desc_names = names(&desc);
        let tablet = desc_names.iter().position(|n| *n == "Tablet").unwrap();
        assert_eq!(desc_names[tablet + 1], "Desk");

        let by_name = service.sort(SortBy::Name, false).await;
        assert_eq!(by_name.first().unwrap().name, "Book");
    }

    #[tokio::test]
    async fn test_validated_page() {
        let service = service();
        let page = service.validated_page(2, 3, None).await.unwrap();
        assert_eq!(page.total, 10);
        assert_eq!(names(&page.items), vec!["Book", "Smartphone", "Tablet"]);

        let searched = service.validated_page(1, 10, Some("cha")).await.unwrap();
        assert_eq!(searched.total, 1);
        assert_eq!(searched.items[0].name, "Chair");

        let past_end = service.validated_page(5, 10, None).await.unwrap();
        assert_eq!(past_end.total, 10);
        assert!(past_end.items.is_empty());

        let far = service.validated_page(4_294_967_297, 10, None).await.unwrap();
        assert_eq!(far.page, 4_294_967_297);
        assert!(far.items.is_empty());
    }

    #[tokio::test]
    async fn test_validated_page_rejects_bad_params() {
        let service = service();
        for (page, size, search) in [
            (0, 10, None),
            (1, 0, None),
            (1, 101, None),
            (1, 10, Some("ab")),
        ] {
            assert!(
                service.validated_page(page, size, search).await.is_err(),
                "page={} size={} search={:?}",
                page,
                size,
                search
            );
        }
    }

    #[tokio::test]
    async fn test_create_validates_and_assigns_id() {
        let service = service();
        let input = |name: &str, price: f64, tax: Option<f64>| CreateItemInput {
            name: name.to_string(),
            category: "other".to_string(),
            price,
            description: None,
            tax,
            tags: Vec::new(),
        };

        assert!(service.create(input("  ", 1.0, None)).await.is_err());
        assert!(service.create(input("Lamp", 0.0, None)).await.is_err());
        assert!(service.create(input("Lamp", 1.0, Some(-0.5))).await.is_err());

        let lamp = service.create(input("Lamp", 25.0, Some(2.5))).await.unwrap();
        assert_eq!(lamp.id, 11);
        assert_eq!(lamp.price_with_tax(), Some(27.5));
        assert_eq!(service.search(Some("lamp")).await.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_sort_orders_by_price(descending in any::<bool>()) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let items = rt.block_on(service().sort(SortBy::Price, descending));
            prop_assert_eq!(items.len(), 10);
            for pair in items.windows(2) {
                if descending {
                    prop_assert!(pair[0].price >= pair[1].price);
                } else {
                    prop_assert!(pair[0].price <= pair[1].price);
                }
            }
        }

        #[test]
        fn prop_filter_respects_bounds(min in 0.0f64..1000.0, span in 0.0f64..1000.0) {
            let max = min + span;
            let rt = tokio::runtime::Runtime::new().unwrap();
            let items = rt.block_on(service().filter(min, max, None));
            for item in &items {
                prop_assert!(item.price >= min && item.price <= max);
            }
        }
    }
}
