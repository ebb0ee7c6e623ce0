//! Storefront listing queries over a loaded catalog.

use std::collections::BTreeSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use s4u_core::{Category, Product};
use serde::Serialize;

use crate::taxonomy::category_slug;

const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 0);

/// Listing filters as sent by the storefront. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    /// Category slug, e.g. `"oral-steroids"`.
    pub category: Option<String>,
    /// Case-insensitive substring of the product name or brand.
    pub search: Option<String>,
    /// Comma-separated brand names.
    pub brands: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub price_range: PriceRange,
}

/// Filters `products` by `query` and returns the requested page.
///
/// Filters apply in order: category, search, brands, price range, stock.
/// `default_limit` is used when the query carries no limit. Page and limit
/// are clamped to at least 1; a page past the end is empty.
#[must_use]
pub fn query_products(
    products: Vec<Product>,
    query: &ProductQuery,
    default_limit: usize,
) -> ProductPage {
    let search = query.search.as_deref().map(str::to_lowercase);
    let brands: Option<Vec<String>> = query
        .brands
        .as_deref()
        .filter(|b| !b.is_empty())
        .map(|b| b.split(',').map(str::to_lowercase).collect());
    let min_price = query.min_price.unwrap_or(Decimal::ZERO);
    let max_price = query.max_price.unwrap_or(DEFAULT_MAX_PRICE);

    let matching: Vec<Product> = products
        .into_iter()
        .filter(|p| {
            query
                .category
                .as_deref()
                .filter(|c| !c.is_empty())
                .is_none_or(|c| in_category(p, c))
        })
        .filter(|p| {
            search
                .as_deref()
                .filter(|s| !s.is_empty())
                .is_none_or(|s| matches_search(p, s))
        })
        .filter(|p| {
            brands.as_ref().is_none_or(|selected| {
                p.brand
                    .as_deref()
                    .is_some_and(|brand| selected.contains(&brand.to_lowercase()))
            })
        })
        .filter(|p| p.price >= min_price && p.price <= max_price)
        .filter(|p| !query.in_stock || p.in_stock())
        .collect();

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(default_limit).max(1);
    let total = matching.len();
    let data = matching
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    ProductPage {
        data,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        },
    }
}

/// Brand list and whole-number price bounds for the listing sidebar,
/// optionally narrowed to one category slug.
#[must_use]
pub fn filter_options(products: &[Product], category: Option<&str>) -> FilterOptions {
    let scoped: Vec<&Product> = products
        .iter()
        .filter(|p| category.filter(|c| !c.is_empty()).is_none_or(|c| in_category(p, c)))
        .collect();

    let brands: BTreeSet<&str> = scoped.iter().filter_map(|p| p.brand.as_deref()).collect();

    let min = scoped.iter().map(|p| p.price).min();
    let max = scoped.iter().map(|p| p.price).max();

    FilterOptions {
        brands: brands.into_iter().map(str::to_string).collect(),
        price_range: PriceRange {
            min: min.and_then(|m| m.floor().to_i64()).unwrap_or_default(),
            max: max.and_then(|m| m.ceil().to_i64()).unwrap_or_default(),
        },
    }
}

#[must_use]
pub fn find_product_by_slug<'a>(products: &'a [Product], slug: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.slug == slug)
}

#[must_use]
pub fn find_category_by_slug<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.slug == slug)
}

fn in_category(product: &Product, slug: &str) -> bool {
    category_slug(&product.category) == slug.to_lowercase()
}

fn matches_search(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product
            .brand
            .as_deref()
            .is_some_and(|b| b.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use s4u_core::{ProductSpecifications, SeoMeta};

    use super::*;

    fn product(name: &str, category: &str, brand: Option<&str>, price: &str, stock: u32) -> Product {
        Product {
            id: name.to_lowercase(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            price: Decimal::from_str(price).unwrap(),
            stock,
            images: Vec::new(),
            category: category.to_string(),
            brand: brand.map(str::to_string),
            description: None,
            short_description: None,
            content: None,
            tags: None,
            specifications: ProductSpecifications::default(),
            seo: SeoMeta::default(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("Anavar 10mg", "ORAL STEROIDS", Some("Dragon Pharma"), "49.50", 3),
            product("Winstrol 50", "Oral Steroids", Some("Alpha Pharma"), "35", 10),
            product("Masteron 100", "INJECTABLE STEROIDS", Some("Dragon Pharma"), "80.25", 0),
            product("Clenbuterol", "FAT LOSS", None, "20", 5),
            product(
                "Ipamorelin",
                "GROWTH HORMONES (HGH) AND PEPTIDES",
                Some("Canada Peptides"),
                "120",
                2,
            ),
        ]
    }

    fn names(page: &ProductPage) -> Vec<&str> {
        page.data.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_first_page_with_default_limit() {
        let page = query_products(catalog(), &ProductQuery::default(), 2);
        assert_eq!(names(&page), vec!["Anavar 10mg", "Winstrol 50"]);
        assert_eq!(
            page.pagination,
            Pagination {
                page: 1,
                limit: 2,
                total: 5,
                total_pages: 3
            }
        );
    }

    #[test]
    fn category_matches_by_slug_across_casing() {
        let query = ProductQuery {
            category: Some("Oral-Steroids".to_string()),
            ..ProductQuery::default()
        };
        let page = query_products(catalog(), &query, 21);
        assert_eq!(names(&page), vec!["Anavar 10mg", "Winstrol 50"]);
    }

    #[test]
    fn category_slug_drops_punctuation() {
        let query = ProductQuery {
            category: Some("growth-hormones-hgh-and-peptides".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&query_products(catalog(), &query, 21)), vec!["Ipamorelin"]);
    }

    #[test]
    fn search_matches_name_or_brand() {
        let query = ProductQuery {
            search: Some("ALPHA".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&query_products(catalog(), &query, 21)), vec!["Winstrol 50"]);

        let query = ProductQuery {
            search: Some("clen".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&query_products(catalog(), &query, 21)), vec!["Clenbuterol"]);
    }

    #[test]
    fn brands_filter_excludes_unbranded() {
        let query = ProductQuery {
            brands: Some("dragon pharma,Canada Peptides".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(
            names(&query_products(catalog(), &query, 21)),
            vec!["Anavar 10mg", "Masteron 100", "Ipamorelin"]
        );
    }

    #[test]
    fn price_range_is_inclusive() {
        let query = ProductQuery {
            min_price: Some(Decimal::from(35)),
            max_price: Some(Decimal::from_str("80.25").unwrap()),
            ..ProductQuery::default()
        };
        assert_eq!(
            names(&query_products(catalog(), &query, 21)),
            vec!["Anavar 10mg", "Winstrol 50", "Masteron 100"]
        );
    }

    #[test]
    fn in_stock_excludes_zero_stock() {
        let query = ProductQuery {
            in_stock: true,
            ..ProductQuery::default()
        };
        let page = query_products(catalog(), &query, 21);
        assert_eq!(page.pagination.total, 4);
        assert!(page.data.iter().all(Product::in_stock));
    }

    #[test]
    fn page_past_end_is_empty_but_keeps_totals() {
        let query = ProductQuery {
            page: Some(9),
            limit: Some(2),
            ..ProductQuery::default()
        };
        let page = query_products(catalog(), &query, 21);
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn zero_page_and_limit_are_clamped() {
        let query = ProductQuery {
            page: Some(0),
            limit: Some(0),
            ..ProductQuery::default()
        };
        let page = query_products(catalog(), &query, 21);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.limit, 1);
        assert_eq!(names(&page), vec!["Anavar 10mg"]);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let query = ProductQuery {
            search: Some("nandrolone".to_string()),
            ..ProductQuery::default()
        };
        let page = query_products(catalog(), &query, 21);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let page = query_products(Vec::new(), &ProductQuery::default(), 21);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pagination"]["totalPages"], 0);
        assert_eq!(json["data"], serde_json::json!([]));
    }

    #[test]
    fn filter_options_sorted_distinct_brands_and_rounded_bounds() {
        let options = filter_options(&catalog(), None);
        assert_eq!(
            options.brands,
            vec!["Alpha Pharma", "Canada Peptides", "Dragon Pharma"]
        );
        assert_eq!(options.price_range, PriceRange { min: 20, max: 120 });
    }

    #[test]
    fn filter_options_scoped_to_category() {
        let options = filter_options(&catalog(), Some("oral-steroids"));
        assert_eq!(options.brands, vec!["Alpha Pharma", "Dragon Pharma"]);
        assert_eq!(options.price_range, PriceRange { min: 35, max: 50 });
    }

    #[test]
    fn filter_options_empty_set_is_zero_range() {
        let options = filter_options(&catalog(), Some("acne"));
        assert!(options.brands.is_empty());
        assert_eq!(options.price_range, PriceRange { min: 0, max: 0 });
    }

    #[test]
    fn filter_options_serializes_price_range_key() {
        let json = serde_json::to_value(filter_options(&[], None)).unwrap();
        assert_eq!(json["priceRange"], serde_json::json!({ "min": 0, "max": 0 }));
    }

    #[test]
    fn find_by_slug() {
        let products = catalog();
        assert_eq!(
            find_product_by_slug(&products, "winstrol-50").map(|p| p.name.as_str()),
            Some("Winstrol 50")
        );
        assert!(find_product_by_slug(&products, "missing").is_none());

        let categories = vec![Category {
            id: "15".to_string(),
            name: "Oral Steroids".to_string(),
            slug: "oral-steroids".to_string(),
            description: None,
            parent: "0".to_string(),
        }];
        assert_eq!(
            find_category_by_slug(&categories, "oral-steroids").map(|c| c.id.as_str()),
            Some("15")
        );
        assert!(find_category_by_slug(&categories, "fat-loss").is_none());
    }
}
