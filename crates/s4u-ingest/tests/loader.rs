//! Integration tests for loading export files from disk.
//!
//! Each test writes fixture exports into its own `TempDir`, so nothing
//! depends on the working directory.

use std::fs;
use std::path::PathBuf;

use rust_decimal::Decimal;
use tempfile::TempDir;

use s4u_ingest::{
    filter_options, query_products, read_categories, read_products, summarize_categories,
    CatalogSource, IngestError, ProductQuery, DEFAULT_STOCK,
};

/// Product export header as written by the shop's exporter, BOM included.
const PRODUCTS_HEADER: &str = "\u{feff}post_title,ID,post_name,post_excerpt,post_content,\
regular_price,stock,images,tax:product_cat,tax:product_tag,tax:product_brand\n";

/// Three rows: a multi-line quoted excerpt, a row without a title, and a
/// table-format description.
const PRODUCTS_ROWS: &str = r#"anavar 10mg,4127,anavar-10mg,"<strong>Company:</strong> Alpha Pharma<strong>Dosage:</strong> 10mg/tab
<strong>Product pack:</strong> 50 tabs<strong>Content (active):</strong> Oxandrolone",,19.99,0,https://cdn.example.com/anavar.jpg ! alt : Anavar,Oral Steroids > Anavar,oral|cutting,Alpha Pharma
,4128,no-title,,,10,5,,,,
Masteron 100,4129,,,"<table><tr><td><strong>ACTIVE SUBSTANCE:</strong></td><td>Drostanolone Propionate</td></tr><tr><td><strong>ALTERNATIVE STEROID NAMES:</strong></td><td>Masteron, Drolban</td></tr></table>",80.5,12,,Injectable Steroids,,Dragon Pharma
"#;

const CATEGORIES: &str = "term_id,name,slug,description,parent
15,Oral Steroids,oral-steroids,\"Tablets, capsules\",0
31,Anavar,anavar,,15
1,Uncategorized,uncategorized,,0
20,Injectable Steroids,injectable-steroids,,0

40,Acne,acne,,0
";

/// Writes both fixture exports and returns their paths.
fn write_fixtures(dir: &TempDir) -> (PathBuf, PathBuf) {
    let products = dir.path().join("products.csv");
    let categories = dir.path().join("categories.csv");
    fs::write(&products, format!("{PRODUCTS_HEADER}{PRODUCTS_ROWS}")).unwrap();
    fs::write(&categories, CATEGORIES).unwrap();
    (products, categories)
}

// ---------------------------------------------------------------------------
// products
// ---------------------------------------------------------------------------

#[test]
fn products_load_from_disk_and_skip_untitled_rows() {
    let tmp = TempDir::new().unwrap();
    let (products_path, _) = write_fixtures(&tmp);

    let products = read_products(&products_path).unwrap();
    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["4127", "4129"]);
}

#[test]
fn multi_line_excerpt_yields_structured_specifications() {
    let tmp = TempDir::new().unwrap();
    let (products_path, _) = write_fixtures(&tmp);

    let products = read_products(&products_path).unwrap();
    let anavar = &products[0];
    assert_eq!(anavar.name, "Anavar 10mg");
    assert_eq!(anavar.price, Decimal::new(1999, 2));
    assert_eq!(anavar.stock, DEFAULT_STOCK);
    assert_eq!(anavar.category, "ORAL STEROIDS");
    assert_eq!(anavar.images, vec!["https://cdn.example.com/anavar.jpg"]);
    assert_eq!(anavar.brand.as_deref(), Some("Alpha Pharma"));

    let specs = &anavar.specifications;
    assert_eq!(specs.company.as_deref(), Some("Alpha Pharma"));
    assert_eq!(specs.dosage.as_deref(), Some("10mg/tab"));
    assert_eq!(specs.product_pack.as_deref(), Some("50 tabs"));
    assert_eq!(specs.content.as_deref(), Some("Oxandrolone"));
}

#[test]
fn table_description_yields_remapped_specifications() {
    let tmp = TempDir::new().unwrap();
    let (products_path, _) = write_fixtures(&tmp);

    let products = read_products(&products_path).unwrap();
    let masteron = &products[1];
    assert_eq!(masteron.slug, "masteron-100");
    assert_eq!(masteron.category, "Injectable Steroids");
    assert_eq!(
        masteron.specifications.content.as_deref(),
        Some("Drostanolone Propionate")
    );
    assert_eq!(masteron.specifications.company.as_deref(), Some("Masteron"));
    assert!(masteron.specifications.dosage.is_none());
}

#[test]
fn missing_export_is_not_found_and_loads_empty() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("products.csv");

    let err = read_products(&path).unwrap_err();
    assert!(matches!(err, IngestError::NotFound { .. }));

    let source = CatalogSource::new(&path, tmp.path().join("categories.csv"));
    assert!(source.load_products().is_empty());
    assert!(source.load_categories().is_empty());
}

#[test]
fn unreadable_export_is_io_error_and_loads_empty() {
    let tmp = TempDir::new().unwrap();

    // A directory cannot be read as a file.
    let err = read_categories(tmp.path()).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));

    let source = CatalogSource::new(tmp.path(), tmp.path());
    assert!(source.load_categories().is_empty());
}

#[test]
fn invalid_utf8_is_replaced_not_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("products.csv");
    let mut bytes = b"post_title,stock\nCaf".to_vec();
    bytes.extend_from_slice(&[0xE9, b',', b'3', b'\n']);
    fs::write(&path, bytes).unwrap();

    let products = read_products(&path).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Caf\u{fffd}");
    assert_eq!(products[0].stock, 3);
}

// ---------------------------------------------------------------------------
// categories and catalog views
// ---------------------------------------------------------------------------

#[test]
fn categories_load_from_disk() {
    let tmp = TempDir::new().unwrap();
    let (_, categories_path) = write_fixtures(&tmp);

    let categories = read_categories(&categories_path).unwrap();
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Oral Steroids", "Anavar", "Injectable Steroids", "Acne"]
    );
    assert_eq!(
        categories[0].description.as_deref(),
        Some("Tablets, capsules")
    );
    assert_eq!(categories[1].parent, "15");
}

#[test]
fn catalog_views_over_loaded_exports() {
    let tmp = TempDir::new().unwrap();
    let (products_path, categories_path) = write_fixtures(&tmp);
    let source = CatalogSource::new(products_path, categories_path);

    let products = source.load_products();
    let categories = source.load_categories();

    let summaries = summarize_categories(&categories, &products);
    let summarized: Vec<(&str, usize, usize)> = summaries
        .iter()
        .map(|s| (s.category.name.as_str(), s.product_count, s.subcategory_count))
        .collect();
    // The breadcrumb-resolved "ORAL STEROIDS" does not equal "Oral Steroids".
    assert_eq!(summarized, vec![("Injectable Steroids", 1, 0)]);

    let options = filter_options(&products, None);
    assert_eq!(options.brands, vec!["Alpha Pharma", "Dragon Pharma"]);
    assert_eq!((options.price_range.min, options.price_range.max), (19, 81));

    let query = ProductQuery {
        category: Some("injectable-steroids".to_string()),
        ..ProductQuery::default()
    };
    let page = query_products(products, &query, 21);
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.data[0].id, "4129");
}
