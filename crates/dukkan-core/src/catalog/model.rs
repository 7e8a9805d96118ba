//! Catalog domain models.
//!
//! These are the API-driven entity shapes; the server owns them and the
//! client holds possibly-stale in-memory copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product listing as returned by the collection endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Whether the listing is visible in the storefront. Subject to
    /// optimistic mutation on the vendor dashboard.
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    pub shop_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A shop as returned by the collection endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: u64,
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A top-level product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

/// A subcategory; valid only under its parent category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub slug: String,
    pub name: String,
    pub category_slug: String,
}

/// What a search suggestion points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Product,
    Shop,
    Category,
}

/// A single entry from the search-suggestions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub kind: SuggestionKind,
}

/// Payload for creating a product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_slug: Option<String>,
}

/// An uploaded product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: u64,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_with_minimal_fields() {
        let json = r#"{
            "id": 7,
            "slug": "blue-jeans",
            "name": "Blue Jeans",
            "price": 49.9,
            "currency": "TRY",
            "is_active": true,
            "shop_id": 3
        }"#;
        let product: Product = serde_json::from_str(json).expect("Should parse product");
        assert_eq!(product.slug, "blue-jeans");
        assert!(product.image_urls.is_empty());
        assert!(product.category_slug.is_none());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_suggestion_kind_wire_format() {
        let suggestion: Suggestion =
            serde_json::from_str(r#"{"text": "jeans", "kind": "product"}"#)
                .expect("Should parse suggestion");
        assert_eq!(suggestion.kind, SuggestionKind::Product);
    }
}
