//! Inventory store

use super::item::{Category, ClothingItem, ItemAttributes, ItemFilter};
use super::tagging::TagSet;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Source of candidate items for a recommendation
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Items matching `filter`, in store order
    async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<ClothingItem>>;

    /// A single item by id
    async fn get_item(&self, id: i64) -> Result<Option<ClothingItem>>;
}

/// Input for creating an item
#[derive(Debug, Clone)]
pub struct NewItem {
    /// Optional display name
    pub name: Option<String>,
    /// Category chosen at upload
    pub category: Category,
    /// Reference to the processed image
    pub image_path: String,
}

/// Process-local inventory, optionally seeded from a JSON file
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    items: RwLock<Vec<ClothingItem>>,
}

impl InMemoryInventory {
    /// Create an inventory holding `items`
    #[must_use]
    pub fn new(items: Vec<ClothingItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Load a JSON array of items from `path`
    ///
    /// # Errors
    /// Returns error if the file can't be read or isn't a list of items
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let items: Vec<ClothingItem> = serde_json::from_str(&content)?;
        info!(path = %path.display(), items = items.len(), "Loaded wardrobe inventory");
        Ok(Self::new(items))
    }

    /// Load from `path`, or start empty if the file doesn't exist
    ///
    /// # Errors
    /// Returns error if the file exists but can't be parsed
    pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_json_file(path)
        } else {
            debug!(path = %path.display(), "No wardrobe file, starting empty");
            Ok(Self::default())
        }
    }

    /// Write all items to `path` as pretty JSON
    ///
    /// # Errors
    /// Returns error if the file can't be written
    pub async fn save_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let items = self.items.read().await;
        let json = serde_json::to_string_pretty(&*items)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Store a new item with whatever tags were detected (possibly none)
    ///
    /// # Errors
    /// Returns `Error::Inventory` if no further id can be assigned
    pub async fn add_item(&self, new: NewItem, tags: Option<TagSet>) -> Result<ClothingItem> {
        let attributes = tags
            .as_ref()
            .map(ItemAttributes::from_tags)
            .unwrap_or_default();

        let mut items = self.items.write().await;
        let id = items
            .iter()
            .map(|i| i.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| Error::Inventory("item id space exhausted".to_string()))?;
        let item = ClothingItem {
            id,
            name: new.name,
            category: new.category,
            image_path: new.image_path,
            created_at: Utc::now(),
            attributes,
        };
        items.push(item.clone());
        info!(id, category = %item.category, tagged = tags.is_some(), "Clothing item added");
        Ok(item)
    }

    /// Remove an item by id
    ///
    /// # Errors
    /// Returns `Error::Inventory` if no such item exists
    pub async fn remove_item(&self, id: i64) -> Result<ClothingItem> {
        let mut items = self.items.write().await;
        let pos = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| Error::Inventory(format!("item {id} not found")))?;
        Ok(items.remove(pos))
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the inventory is empty
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventory {
    async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<ClothingItem>> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|i| filter.matches(i)).cloned().collect())
    }

    async fn get_item(&self, id: i64) -> Result<Option<ClothingItem>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|i| i.id == id).cloned())
    }
}
