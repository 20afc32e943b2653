//! Attribute tagging contract
//!
//! Tagging is best-effort: a failed tagger yields an item with no
//! detected attributes rather than a failed upload.

use super::item::ItemAttributes;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Attribute the tagger can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Garment type
    ClothingType,
    /// Primary color
    Color,
    /// Secondary color
    SecondaryColor,
    /// Season
    Season,
    /// Style
    Style,
    /// Pattern
    Pattern,
    /// Material
    Material,
    /// Fit
    Fit,
}

impl Attribute {
    /// Key used in `confidence_scores`
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClothingType => "clothing_type",
            Self::Color => "color",
            Self::SecondaryColor => "secondary_color",
            Self::Season => "season",
            Self::Style => "style",
            Self::Pattern => "pattern",
            Self::Material => "material",
            Self::Fit => "fit",
        }
    }
}

/// One detected label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeTag {
    /// The attribute
    pub attribute: Attribute,
    /// Winning label
    pub label: String,
    /// Classifier confidence in [0, 1]
    pub confidence: f32,
}

impl AttributeTag {
    /// Create a tag
    #[must_use]
    pub fn new(attribute: Attribute, label: impl Into<String>, confidence: f32) -> Self {
        Self {
            attribute,
            label: label.into(),
            confidence,
        }
    }
}

/// Everything the tagger found for one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagSet {
    /// Detected attributes (at most one per attribute is used)
    pub attributes: Vec<AttributeTag>,
    /// Free-form tags
    pub tags: Vec<String>,
}

impl TagSet {
    /// Add a detected attribute
    #[must_use]
    pub fn with(mut self, attribute: Attribute, label: impl Into<String>, confidence: f32) -> Self {
        self.attributes.push(AttributeTag::new(attribute, label, confidence));
        self
    }

    /// Add a free-form tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Zero-shot attribute classifier over a stored image
#[async_trait]
pub trait AttributeTagger: Send + Sync {
    /// Classify the image at `image_path`
    async fn tag(&self, image_path: &Path) -> Result<TagSet>;
}

/// Run the tagger, degrading any failure to "no tags".
pub async fn tag_or_none(tagger: &dyn AttributeTagger, image_path: &Path) -> Option<TagSet> {
    match tagger.tag(image_path).await {
        Ok(tags) => Some(tags),
        Err(e) => {
            warn!(
                path = %image_path.display(),
                error = %e,
                "Attribute tagging failed, storing item without tags"
            );
            None
        }
    }
}

impl ItemAttributes {
    /// Map detected tags onto item attributes; the first tag per attribute wins.
    #[must_use]
    pub fn from_tags(tags: &TagSet) -> Self {
        let mut attrs = Self {
            tags: tags.tags.clone(),
            ..Default::default()
        };

        for tag in &tags.attributes {
            let slot = match tag.attribute {
                Attribute::ClothingType => &mut attrs.clothing_type,
                Attribute::Color => &mut attrs.color,
                Attribute::SecondaryColor => &mut attrs.secondary_color,
                Attribute::Season => &mut attrs.season,
                Attribute::Style => &mut attrs.style,
                Attribute::Pattern => &mut attrs.pattern,
                Attribute::Material => &mut attrs.material,
                Attribute::Fit => &mut attrs.fit,
            };
            if slot.is_none() {
                *slot = Some(tag.label.clone());
                attrs
                    .confidence_scores
                    .insert(tag.attribute.as_str().to_string(), tag.confidence);
            }
        }

        attrs
    }
}
