//! Part CRUD orchestration.
//!
//! [`PartService`] sits between the HTTP layer (or CLI) and a [`PartStore`].
//! It turns absent parts into [`Error::NotFound`] and otherwise passes domain
//! errors through untouched; it knows nothing about HTTP.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{NewPart, Part, PartUpdate, WordCount};
use crate::store::PartStore;
use crate::words::{self, TOP_WORDS};

#[derive(Clone)]
pub struct PartService {
    store: Arc<dyn PartStore>,
}

impl PartService {
    pub fn new(store: Arc<dyn PartStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: i64) -> Result<Part> {
        tracing::debug!(id, "reading part");
        self.store.get(id).await?.ok_or(Error::NotFound(id))
    }

    pub async fn create(&self, part: NewPart) -> Result<Part> {
        let created = self.store.insert(part).await?;
        tracing::info!(id = created.id, sku = %created.sku, "part created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, update: PartUpdate) -> Result<Part> {
        let updated = self
            .store
            .update(id, update)
            .await?
            .ok_or(Error::NotFound(id))?;
        tracing::info!(id, "part updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!(id, "part deleted");
        Ok(())
    }

    pub async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Part>> {
        self.store.list(skip, limit).await
    }

    /// The five most common words across all part descriptions.
    pub async fn most_common_words(&self) -> Result<Vec<WordCount>> {
        let descriptions = self.store.descriptions().await?;
        Ok(words::most_common(
            descriptions.iter().map(Option::as_deref),
            TOP_WORDS,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn service() -> PartService {
        PartService::new(Arc::new(InMemoryStore::new()))
    }

    fn new_part(sku: &str, description: Option<&str>) -> NewPart {
        NewPart {
            name: "Widget".to_string(),
            sku: sku.to_string(),
            description: description.map(str::to_string),
            weight_ounces: 15,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let svc = service();
        let created = svc.create(new_part("SKU001", Some("Test Part"))).await.unwrap();
        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.description.as_deref(), Some("Test Part"));
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn test_negative_weight_fails_validation() {
        let svc = service();
        let mut part = new_part("SKU001", None);
        part.weight_ounces = -5;
        let err = svc.create(part).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "Weight must be non-negative."));
        assert!(svc.list(0, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let svc = service();
        let created = svc.create(new_part("SKU001", Some("Original"))).await.unwrap();
        let updated = svc
            .update(
                created.id,
                PartUpdate {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.sku, "SKU001");
        assert_eq!(updated.description.as_deref(), Some("Original"));
        assert_eq!(updated.weight_ounces, 15);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let svc = service();
        let err = svc.update(99, PartUpdate::default()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(99)));
    }

    #[tokio::test]
    async fn test_delete_then_get_and_delete_again() {
        let svc = service();
        let created = svc.create(new_part("SKU001", None)).await.unwrap();
        svc.delete(created.id).await.unwrap();
        assert!(matches!(svc.get(created.id).await, Err(Error::NotFound(_))));
        assert!(matches!(svc.delete(created.id).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_respects_limit_and_skip() {
        let svc = service();
        for i in 0..4 {
            svc.create(new_part(&format!("SKU{}", i), None)).await.unwrap();
        }
        assert_eq!(svc.list(0, 3).await.unwrap().len(), 3);
        assert_eq!(svc.list(3, 10).await.unwrap().len(), 1);
        assert!(svc.list(4, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_most_common_words() {
        let svc = service();
        assert!(svc.most_common_words().await.unwrap().is_empty());

        let descriptions = [
            "This is the first test part",
            "This part is for testing",
            "Another test part description",
            "Part of the test suite",
            "Test the API with this part",
        ];
        for (i, d) in descriptions.iter().enumerate() {
            svc.create(new_part(&format!("SKU{}", i), Some(d))).await.unwrap();
        }
        svc.create(new_part("NODESC", None)).await.unwrap();

        let words = svc.most_common_words().await.unwrap();
        assert!(words.len() <= 5);
        assert_eq!(words[0].word, "part");
        assert!(words[0].count > 1);
    }
}
