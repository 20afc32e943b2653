//! Wardrobe domain
//!
//! Clothing items, their detected attributes, and the inventory store the
//! recommender draws candidates from.

mod inventory;
mod item;
mod tagging;

pub use inventory::{InMemoryInventory, InventoryStore, NewItem};
pub use item::{Category, ClothingItem, ItemAttributes, ItemFilter, Role};
pub use tagging::{tag_or_none, Attribute, AttributeTag, AttributeTagger, TagSet};
