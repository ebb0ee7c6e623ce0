//! Normalization from export [`RawRecord`]s to catalog entities.
//!
//! Row-level derivation never aborts a batch: each function returns a
//! [`SkipReason`] for rows that cannot become an entity, and the loaders
//! drop those rows after logging them.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use s4u_core::catalog::TOP_LEVEL_PARENT;
use s4u_core::{Category, Product, SeoMeta};

use crate::delimited::RawRecord;
use crate::error::SkipReason;
use crate::parse_helpers::{parse_decimal_prefix, parse_int_prefix};
use crate::specs::extract_specifications;
use crate::taxonomy::{resolve_category, UNCATEGORIZED};

/// Price used when the export has no positive price for a product.
pub const DEFAULT_PRICE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Stock used when the export's stock is zero, missing or unparseable.
///
/// Zero is read as "unknown", so a product that is genuinely out of stock
/// in the export is listed with this value too.
pub const DEFAULT_STOCK: u32 = 100;

const BYTE_ORDER_MARK: char = '\u{feff}';

// Product export columns.
const COL_ID: &str = "ID";
const COL_TITLE: &str = "post_title";
const COL_SLUG: &str = "post_name";
const COL_EXCERPT: &str = "post_excerpt";
const COL_CONTENT: &str = "post_content";
const COL_PRICE: &str = "regular_price";
const COL_STOCK: &str = "stock";
const COL_IMAGES: &str = "images";
const COL_CATEGORIES: &str = "tax:product_cat";
const COL_TAGS: &str = "tax:product_tag";
const COL_BRAND: &str = "tax:product_brand";
const COL_SEO_TITLE: &str = "meta:_aioseo_title";
const COL_SEO_DESCRIPTION: &str = "meta:_aioseo_description";
const COL_SEO_KEYWORDS: &str = "meta:_aioseo_keywords";
const COL_SEO_OG_TITLE: &str = "meta:_aioseo_og_title";
const COL_SEO_OG_DESCRIPTION: &str = "meta:_aioseo_og_description";
const COL_SEO_TWITTER_TITLE: &str = "meta:_aioseo_twitter_title";
const COL_SEO_TWITTER_DESCRIPTION: &str = "meta:_aioseo_twitter_description";

// Category export columns.
const COL_TERM_ID: &str = "term_id";
const COL_NAME: &str = "name";
const COL_TERM_SLUG: &str = "slug";
const COL_DESCRIPTION: &str = "description";
const COL_PARENT: &str = "parent";

static IMAGE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s!]+").expect("valid image url regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalizes one product export row.
///
/// `row_index` is the record's position in the export and seeds the
/// fallback id `product-{row_index}`.
///
/// # Errors
///
/// Returns [`SkipReason::MissingTitle`] when neither the title column nor
/// its BOM-prefixed variant holds a non-blank value.
pub fn normalize_product(record: &RawRecord, row_index: usize) -> Result<Product, SkipReason> {
    let title = column_allowing_bom(record, COL_TITLE)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(SkipReason::MissingTitle)?;

    let short_description = trimmed(record, COL_EXCERPT);
    let content = trimmed(record, COL_CONTENT);
    let specifications =
        extract_specifications(short_description.as_deref(), content.as_deref());

    Ok(Product {
        id: non_empty(record, COL_ID).map_or_else(|| format!("product-{row_index}"), str::to_string),
        name: title_case(title),
        slug: non_empty(record, COL_SLUG).map_or_else(|| slugify(title), str::to_string),
        price: parse_price(record.get(COL_PRICE)),
        stock: parse_stock(record.get(COL_STOCK)),
        images: parse_images(record.get(COL_IMAGES)),
        category: resolve_category(record.get(COL_CATEGORIES)).name,
        brand: trimmed(record, COL_BRAND),
        description: non_empty(record, COL_EXCERPT)
            .or_else(|| non_empty(record, COL_CONTENT))
            .map(str::to_string),
        short_description,
        content,
        tags: parse_tags(record.get(COL_TAGS)),
        specifications,
        seo: SeoMeta {
            title: trimmed(record, COL_SEO_TITLE),
            description: trimmed(record, COL_SEO_DESCRIPTION),
            keywords: trimmed(record, COL_SEO_KEYWORDS),
            og_title: trimmed(record, COL_SEO_OG_TITLE),
            og_description: trimmed(record, COL_SEO_OG_DESCRIPTION),
            twitter_title: trimmed(record, COL_SEO_TWITTER_TITLE),
            twitter_description: trimmed(record, COL_SEO_TWITTER_DESCRIPTION),
        },
    })
}

/// Normalizes one category export row.
///
/// # Errors
///
/// Returns [`SkipReason::ExcludedCategory`] for the `Uncategorized`
/// placeholder and [`SkipReason::MissingField`] for rows without a name.
pub fn normalize_category(record: &RawRecord) -> Result<Category, SkipReason> {
    let name = record.get(COL_NAME).unwrap_or_default();
    if name == UNCATEGORIZED {
        return Err(SkipReason::ExcludedCategory {
            name: name.to_string(),
        });
    }
    if name.trim().is_empty() {
        return Err(SkipReason::MissingField { field: COL_NAME });
    }

    Ok(Category {
        id: column_allowing_bom(record, COL_TERM_ID)
            .unwrap_or_default()
            .to_string(),
        name: name.to_string(),
        slug: record.get(COL_TERM_SLUG).unwrap_or_default().to_string(),
        description: non_empty(record, COL_DESCRIPTION).map(str::to_string),
        parent: non_empty(record, COL_PARENT)
            .unwrap_or(TOP_LEVEL_PARENT)
            .to_string(),
    })
}

/// Reads `column`, falling back to the same name prefixed with a byte-order
/// mark when the plain column is absent or empty. Exports saved with a BOM
/// carry it on their first header.
fn column_allowing_bom<'a>(record: &'a RawRecord, column: &str) -> Option<&'a str> {
    non_empty(record, column).or_else(|| {
        let prefixed = format!("{BYTE_ORDER_MARK}{column}");
        non_empty(record, &prefixed)
    })
}

fn non_empty<'a>(record: &'a RawRecord, column: &str) -> Option<&'a str> {
    record.get(column).filter(|v| !v.is_empty())
}

fn trimmed(record: &RawRecord, column: &str) -> Option<String> {
    record
        .get(column)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_price(raw: Option<&str>) -> Decimal {
    raw.and_then(|p| parse_decimal_prefix(p.trim()))
        .filter(|p| *p > Decimal::ZERO)
        .unwrap_or(DEFAULT_PRICE)
}

// Zero and negative both fall back: see DEFAULT_STOCK.
fn parse_stock(raw: Option<&str>) -> u32 {
    match raw.and_then(parse_int_prefix) {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => DEFAULT_STOCK,
    }
}

/// Pulls the first URL out of each `|`-separated segment. Segments look like
/// `https://cdn.example.com/a.jpg ! alt : Anavar ! title : Anavar`.
fn parse_images(raw: Option<&str>) -> Vec<String> {
    raw.map(|images| {
        images
            .split('|')
            .filter_map(|segment| IMAGE_URL_RE.find(segment))
            .map(|m| m.as_str().trim().to_string())
            .collect()
    })
    .unwrap_or_default()
}

fn parse_tags(raw: Option<&str>) -> Option<Vec<String>> {
    let tags: Vec<String> = raw?
        .split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    (!tags.is_empty()).then_some(tags)
}

/// Upper-cases the first character of every space-separated word and
/// lower-cases the rest: `"aNAVAR 10mg"` → `"Anavar 10mg"`.
pub(crate) fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut capitalized: String = first.to_uppercase().collect();
                    capitalized.push_str(&chars.as_str().to_lowercase());
                    capitalized
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-cases `title` and replaces whitespace runs with `-`.
pub(crate) fn slugify(title: &str) -> String {
    WHITESPACE_RE
        .replace_all(&title.to_lowercase(), "-")
        .into_owned()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
