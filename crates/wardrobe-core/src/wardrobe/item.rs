//! Clothing items

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Garment category chosen at upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Shirts and t-shirts
    Shirt,
    /// Long trousers
    Pants,
    /// Shorts
    Shorts,
    /// Hoodies and sweatshirts
    Hoodie,
}

/// Slot an item fills in an outfit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Upper body
    Top,
    /// Lower body
    Bottom,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 4] = [Self::Shirt, Self::Pants, Self::Shorts, Self::Hoodie];

    /// Lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shirt => "shirt",
            Self::Pants => "pants",
            Self::Shorts => "shorts",
            Self::Hoodie => "hoodie",
        }
    }

    /// The outfit slot this category fills
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Shirt | Self::Hoodie => Role::Top,
            Self::Pants | Self::Shorts => Role::Bottom,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Inventory(format!("unknown category: {s}")))
    }
}

/// Attributes detected by the tagger (all optional)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemAttributes {
    /// Detected type, e.g. "t-shirt", "jeans"
    #[serde(default)]
    pub clothing_type: Option<String>,
    /// Primary color
    #[serde(default)]
    pub color: Option<String>,
    /// Secondary color
    #[serde(default)]
    pub secondary_color: Option<String>,
    /// spring, summer, fall, winter, all-season
    #[serde(default)]
    pub season: Option<String>,
    /// casual, formal, sporty, ...
    #[serde(default)]
    pub style: Option<String>,
    /// solid, striped, plaid, ...
    #[serde(default)]
    pub pattern: Option<String>,
    /// cotton, denim, leather, ...
    #[serde(default)]
    pub material: Option<String>,
    /// slim, regular, loose, oversized
    #[serde(default)]
    pub fit: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Confidence per attribute name
    #[serde(default)]
    pub confidence_scores: BTreeMap<String, f32>,
}

/// A stored clothing item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    /// Store-assigned identifier
    pub id: i64,
    /// User-given name
    #[serde(default)]
    pub name: Option<String>,
    /// Category chosen at upload
    pub category: Category,
    /// Reference to the processed image
    #[serde(default)]
    pub image_path: String,
    /// Creation time
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Detected attributes
    #[serde(flatten)]
    pub attributes: ItemAttributes,
}

impl ClothingItem {
    /// Bare item with no detected attributes
    #[must_use]
    pub fn new(id: i64, category: Category) -> Self {
        Self {
            id,
            name: None,
            category,
            image_path: String::new(),
            created_at: Utc::now(),
            attributes: ItemAttributes::default(),
        }
    }

    /// Set the name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the attributes
    #[must_use]
    pub fn with_attributes(mut self, attributes: ItemAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The outfit slot this item fills
    #[must_use]
    pub fn role(&self) -> Role {
        self.category.role()
    }
}

/// Optional criteria narrowing the candidate set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Match on season
    #[serde(default)]
    pub season: Option<String>,
    /// Match on style
    #[serde(default)]
    pub style: Option<String>,
    /// Match on category
    #[serde(default)]
    pub category: Option<Category>,
}

fn matches_attr(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.is_some_and(|a| a.eq_ignore_ascii_case(w)),
    }
}

impl ItemFilter {
    /// Whether no criteria are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.season.is_none() && self.style.is_none() && self.category.is_none()
    }

    /// Whether `item` satisfies every set criterion
    #[must_use]
    pub fn matches(&self, item: &ClothingItem) -> bool {
        matches_attr(self.season.as_deref(), item.attributes.season.as_deref())
            && matches_attr(self.style.as_deref(), item.attributes.style.as_deref())
            && self.category.map_or(true, |c| c == item.category)
    }
}
