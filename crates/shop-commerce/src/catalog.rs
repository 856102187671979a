//! Catalog types.

use crate::ids::ProductId;
use crate::money::Amount;
use serde::{Deserialize, Serialize};

/// A product as listed by the shop API.
///
/// Server-owned and read-only on the client. The API spells the image
/// fields in camel case; everything else is snake case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Long-form content.
    #[serde(default)]
    pub content: String,
    /// Selling price.
    pub price: Amount,
    /// List price before discount.
    #[serde(default)]
    pub origin_price: Amount,
    /// Unit label (e.g., "box").
    #[serde(default)]
    pub unit: String,
    /// Main image.
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    /// Additional images.
    #[serde(rename = "imagesUrl", default, skip_serializing_if = "Vec::is_empty")]
    pub images_url: Vec<String>,
}

impl Product {
    /// Whether the selling price is below the list price.
    pub fn is_discounted(&self) -> bool {
        self.price < self.origin_price
    }

    /// Format the selling price.
    pub fn price_display(&self) -> String {
        self.price.display()
    }

    /// Format the list price.
    pub fn origin_price_display(&self) -> String {
        self.origin_price.display()
    }

    /// Fragment of the product detail screen.
    pub fn detail_fragment(&self) -> String {
        format!("#/products/{}", self.id)
    }
}
