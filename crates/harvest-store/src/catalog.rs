//! # Catalog Store
//!
//! Purchasable items. Every write validates its fields first, then
//! delegates to the backend; a successful write publishes a catalog event.

use harvest_core::validation::validate_item_fields;
use harvest_core::{Category, Item, ItemFields};
use tracing::{debug, info, warn};

use crate::backend::{ItemFilter, SharedBackend};
use crate::error::{StoreError, StoreResult};
use crate::events::{EventBus, StoreEvent};

const ENTITY: &str = "Item";

#[derive(Clone)]
pub struct CatalogStore {
    backend: SharedBackend,
    events: EventBus,
}

impl CatalogStore {
    pub fn new(backend: SharedBackend, events: EventBus) -> Self {
        CatalogStore { backend, events }
    }

    /// All items, newest first.
    pub async fn list_items(&self) -> StoreResult<Vec<Item>> {
        debug!("Listing items");
        Ok(self.backend.select_items(&ItemFilter::all()).await?)
    }

    pub async fn list_items_by_category(&self, category: Category) -> StoreResult<Vec<Item>> {
        debug!(category = %category, "Listing items by category");
        Ok(self
            .backend
            .select_items(&ItemFilter::by_category(category))
            .await?)
    }

    pub async fn get_item(&self, id: &str) -> StoreResult<Option<Item>> {
        debug!(item_id = %id, "Fetching item");
        let items = self.backend.select_items(&ItemFilter::by_id(id)).await?;
        Ok(items.into_iter().next())
    }

    /// Creates an item. The backend assigns the id.
    pub async fn add_item(&self, fields: ItemFields) -> StoreResult<Item> {
        let fields = normalize(fields);
        if let Err(e) = validate_item_fields(&fields) {
            warn!(error = %e, "Rejected new item");
            return Err(e.into());
        }

        let item = self.backend.insert_item(&fields).await?;
        info!(item_id = %item.id, name = %item.name, "Item added");
        self.events.publish(StoreEvent::ItemAdded {
            item_id: item.id.clone(),
        });
        Ok(item)
    }

    pub async fn update_item(&self, id: &str, fields: ItemFields) -> StoreResult<Item> {
        let fields = normalize(fields);
        if let Err(e) = validate_item_fields(&fields) {
            warn!(item_id = %id, error = %e, "Rejected item update");
            return Err(e.into());
        }

        let item = self
            .backend
            .update_item(id, &fields)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        info!(item_id = %item.id, "Item updated");
        self.events.publish(StoreEvent::ItemUpdated {
            item_id: item.id.clone(),
        });
        Ok(item)
    }

    /// Removes an item. Placed orders keep their line snapshots.
    pub async fn delete_item(&self, id: &str) -> StoreResult<()> {
        if !self.backend.delete_item(id).await? {
            return Err(StoreError::not_found(ENTITY, id));
        }
        info!(item_id = %id, "Item deleted");
        self.events.publish(StoreEvent::ItemDeleted {
            item_id: id.to_string(),
        });
        Ok(())
    }
}

fn normalize(fields: ItemFields) -> ItemFields {
    ItemFields {
        name: fields.name.trim().to_string(),
        unit: fields.unit.trim().to_string(),
        description: fields.description.trim().to_string(),
        image: fields.image.trim().to_string(),
        ..fields
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::MemoryBackend;
    use harvest_core::ValidationError;

    fn setup() -> (CatalogStore, Arc<MemoryBackend>, EventBus) {
        let backend = Arc::new(MemoryBackend::new());
        let events = EventBus::default();
        (CatalogStore::new(backend.clone(), events.clone()), backend, events)
    }

    fn carrots() -> ItemFields {
        ItemFields {
            name: "Fresh Carrots".to_string(),
            category: Category::Vegetable,
            price_cents: 199,
            unit: "kg".to_string(),
            description: "Crunchy and sweet".to_string(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_add_and_list_items() {
        let (catalog, _, events) = setup();
        let mut rx = events.subscribe();

        let mut padded = carrots();
        padded.name = "  Fresh Carrots ".to_string();
        let item = catalog.add_item(padded).await.unwrap();
        assert_eq!(item.name, "Fresh Carrots");
        assert_eq!(item.price_cents, 199);
        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::ItemAdded {
                item_id: item.id.clone()
            }
        );

        let mut apples = carrots();
        apples.name = "Green Apples".to_string();
        apples.category = Category::Fruit;
        catalog.add_item(apples).await.unwrap();

        assert_eq!(catalog.list_items().await.unwrap().len(), 2);
        let fruit = catalog.list_items_by_category(Category::Fruit).await.unwrap();
        assert_eq!(fruit.len(), 1);
        assert_eq!(fruit[0].name, "Green Apples");

        assert_eq!(catalog.get_item(&item.id).await.unwrap(), Some(item));
        assert_eq!(catalog.get_item("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_item_rejects_invalid_fields_before_backend() {
        let (catalog, backend, _) = setup();
        // Would fail with Persistence if the backend were reached.
        backend.set_unavailable(true);

        let mut blank = carrots();
        blank.name = "  ".to_string();
        let err = catalog.add_item(blank).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::Required { .. })
        ));

        let mut negative = carrots();
        negative.price_cents = -5;
        assert!(catalog.add_item(negative).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (catalog, backend, _) = setup();
        let item = catalog.add_item(carrots()).await.unwrap();

        let mut fields = ItemFields::from(&item);
        fields.price_cents = 249;
        let updated = catalog.update_item(&item.id, fields.clone()).await.unwrap();
        assert_eq!(updated.price_cents, 249);

        assert!(catalog.update_item("missing", fields).await.unwrap_err().is_not_found());

        catalog.delete_item(&item.id).await.unwrap();
        assert_eq!(backend.item_count().await, 0);
        assert!(catalog.delete_item(&item.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_backend_failure_is_persistence_and_silent() {
        let (catalog, backend, events) = setup();
        let mut rx = events.subscribe();
        backend.set_unavailable(true);

        assert!(catalog.add_item(carrots()).await.unwrap_err().is_persistence());
        assert!(rx.try_recv().is_err());
    }
}
