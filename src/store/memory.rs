//! In-memory model store used by the unit tests as the executable form of
//! the listing contract: same filtering, ordering, and page math as the
//! Postgres store, over a plain Vec.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{Model, ModelPage, ModelStore, StoreError};
use crate::listing::{ListingQuery, OrderBy};

pub struct MemoryModelStore {
    models: Vec<Model>,
}

impl MemoryModelStore {
    pub fn new(models: Vec<Model>) -> Self {
        Self { models }
    }

    fn matches(model: &Model, query: &ListingQuery) -> bool {
        if !query.tags.is_empty() && !query.tags.iter().any(|t| model.tags.contains(t)) {
            return false;
        }
        if let Some(search) = query.search.as_deref() {
            if !model.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }

    fn sort(items: &mut [Model], order_by: OrderBy) {
        match order_by {
            OrderBy::CreatedNewToOld => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            OrderBy::CreatedOldToNew => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            OrderBy::NameAsc => items.sort_by(|a, b| a.name.cmp(&b.name)),
            OrderBy::NameDesc => items.sort_by(|a, b| b.name.cmp(&a.name)),
        }
    }
}

#[async_trait]
impl ModelStore for MemoryModelStore {
    async fn find_page(&self, query: &ListingQuery) -> Result<ModelPage, StoreError> {
        let mut matching: Vec<Model> = self
            .models
            .iter()
            .filter(|m| Self::matches(m, query))
            .cloned()
            .collect();
        Self::sort(&mut matching, query.order_by);

        let total_pages = query.total_pages(matching.len() as u64);
        let items = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.per_page as usize)
            .collect();

        Ok(ModelPage {
            items,
            total_pages,
            current_page: query.page,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, StoreError> {
        Ok(self.models.iter().find(|m| m.id == id).cloned())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Test fixture: `n` models named model-00.. with ascending creation times.
pub fn seed_models(n: usize) -> Vec<Model> {
    let base = Utc::now() - Duration::days(n as i64);
    (0..n)
        .map(|i| Model {
            id: Uuid::new_v4(),
            name: format!("model-{:02}", i),
            file_url: format!("https://files.modelhub.example/model-{:02}.glb", i),
            tags: if i % 2 == 0 {
                vec!["chair".to_string()]
            } else {
                vec!["sofa".to_string(), "fabric".to_string()]
            },
            created_at: base + Duration::days(i as i64),
            updated_at: base + Duration::days(i as i64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_beyond_total_is_empty_but_reports_true_totals() {
        let store = MemoryModelStore::new(seed_models(45));
        let query = ListingQuery::new(9, 20); // only 3 pages exist

        let page = futures_block(store.find_page(&query)).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 9); // echoed unchanged, not clamped
    }

    #[test]
    fn pages_slice_without_overlap() {
        let store = MemoryModelStore::new(seed_models(45));

        let first = futures_block(store.find_page(&ListingQuery::new(1, 20))).unwrap();
        let second = futures_block(store.find_page(&ListingQuery::new(2, 20))).unwrap();
        let third = futures_block(store.find_page(&ListingQuery::new(3, 20))).unwrap();

        assert_eq!(first.items.len(), 20);
        assert_eq!(second.items.len(), 20);
        assert_eq!(third.items.len(), 5);
        assert_eq!(first.total_pages, 3);

        let mut ids: Vec<Uuid> = first
            .items
            .iter()
            .chain(&second.items)
            .chain(&third.items)
            .map(|m| m.id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 45);
    }

    #[test]
    fn default_ordering_is_newest_first() {
        let store = MemoryModelStore::new(seed_models(10));
        let page = futures_block(store.find_page(&ListingQuery::new(1, 10))).unwrap();

        for pair in page.items.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn tag_filter_is_set_overlap() {
        let store = MemoryModelStore::new(seed_models(10));
        let mut query = ListingQuery::new(1, 50);
        query.tags = vec!["fabric".to_string(), "metal".to_string()];

        let page = futures_block(store.find_page(&query)).unwrap();
        assert_eq!(page.items.len(), 5); // the odd-numbered seeds
        assert!(page
            .items
            .iter()
            .all(|m| m.tags.contains(&"fabric".to_string())));
    }

    #[test]
    fn search_is_case_insensitive_substring_on_name() {
        let store = MemoryModelStore::new(seed_models(12));
        let mut query = ListingQuery::new(1, 50);
        query.search = Some("MODEL-1".to_string());

        let page = futures_block(store.find_page(&query)).unwrap();
        // model-10 and model-11
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn empty_result_set_has_zero_pages() {
        let store = MemoryModelStore::new(vec![]);
        let page = futures_block(store.find_page(&ListingQuery::new(1, 20))).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 1);
    }

    // The store future has no suspension points in the memory impl, so a
    // minimal block_on is enough and the tests stay plain #[test] fns.
    fn futures_block<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }
}
