//! Export-file ingestion for the storefront catalog.
//!
//! Raw export text goes through [`delimited`] to become [`RawRecord`]s, then
//! [`normalize`] turns each record into a typed entity. [`loader`] ties both
//! to the filesystem and never fails the caller: a missing or unreadable
//! export yields an empty catalog.

pub mod delimited;
pub mod error;
pub mod html;
pub mod loader;
pub mod normalize;
pub(crate) mod parse_helpers;
pub mod query;
pub mod specs;
pub mod summary;
pub mod taxonomy;

pub use delimited::{parse_line, parse_records, RawRecord};
pub use error::{IngestError, SkipReason};
pub use html::clean_html;
pub use loader::{
    load_categories, load_products, parse_categories, parse_products, read_categories,
    read_products, CatalogSource,
};
pub use normalize::{normalize_category, normalize_product, DEFAULT_PRICE, DEFAULT_STOCK};
pub use query::{
    filter_options, find_category_by_slug, find_product_by_slug, query_products, FilterOptions,
    Pagination, PriceRange, ProductPage, ProductQuery,
};
pub use specs::{extract_specifications, has_specifications, MicroFormat};
pub use summary::summarize_categories;
pub use taxonomy::{category_slug, resolve_category, CategoryRule, ResolvedCategory};
