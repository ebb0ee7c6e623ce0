//! Catalog entities derived from the storefront's export files.
//!
//! Field names serialize in camelCase so the JSON handed to the storefront
//! and admin UI keeps the shape those consumers already read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parent id carried by top-level categories.
pub const TOP_LEVEL_PARENT: &str = "0";

/// A sellable product, normalized from one export row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Export `ID` column, or `product-{row}` when the export has none.
    pub id: String,
    /// Title-cased product title. Never empty.
    pub name: String,
    /// URL slug, e.g. `"anavar-10mg"`. Never empty.
    pub slug: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: u32,
    pub images: Vec<String>,
    /// Resolved main category (see the ingest crate's taxonomy rules).
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Raw excerpt, or raw content when the excerpt is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub specifications: ProductSpecifications,
    #[serde(default)]
    pub seo: SeoMeta,
}

impl Product {
    #[must_use]
    pub fn has_specifications(&self) -> bool {
        !self.specifications.is_empty()
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Semi-structured attributes scraped out of a product's description HTML.
///
/// All four fields absent is the "no specifications" state; it is a normal
/// outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpecifications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_pack: Option<String>,
    /// Active ingredient description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ProductSpecifications {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.dosage.is_none()
            && self.product_pack.is_none()
            && self.content.is_none()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.company.is_some()
            && self.dosage.is_some()
            && self.product_pack.is_some()
            && self.content.is_some()
    }

    /// Overwrites each field that `other` carries; fields `other` lacks are kept.
    pub fn merge(&mut self, other: ProductSpecifications) {
        if other.company.is_some() {
            self.company = other.company;
        }
        if other.dosage.is_some() {
            self.dosage = other.dosage;
        }
        if other.product_pack.is_some() {
            self.product_pack = other.product_pack;
        }
        if other.content.is_some() {
            self.content = other.content;
        }
    }
}

/// SEO overrides carried through from the export's meta columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
}

/// A product category row from the category export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent category id; [`TOP_LEVEL_PARENT`] for top-level categories.
    pub parent: String,
}

impl Category {
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent == TOP_LEVEL_PARENT
    }
}

/// A top-level category with product counts, as listed in the admin UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    /// Products assigned to the category directly or to one of its children.
    pub product_count: usize,
    pub subcategory_count: usize,
}
