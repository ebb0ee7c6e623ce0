//! Filesystem entry points for the product and category exports.
//!
//! `read_*` functions surface I/O failures as [`IngestError`]; `load_*`
//! functions log them and return an empty catalog instead.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use s4u_core::{AppConfig, Category, Product};

use crate::delimited::{parse_line, parse_records, RawRecord};
use crate::error::IngestError;
use crate::normalize::{normalize_category, normalize_product};

/// Parses a product export held in memory.
///
/// Rows that cannot become a product are logged at debug level and skipped.
#[must_use]
pub fn parse_products(content: &str) -> Vec<Product> {
    parse_records(content)
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match normalize_product(record, index) {
            Ok(product) => Some(product),
            Err(reason) => {
                tracing::debug!(row = index, %reason, "skipping product row");
                None
            }
        })
        .collect()
}

/// Parses a category export held in memory.
///
/// The category export never contains multi-line values, so each physical
/// line is one row. Blank lines are ignored.
#[must_use]
pub fn parse_categories(content: &str) -> Vec<Category> {
    let mut lines = content.split('\n');
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = parse_line(header_line);

    lines
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| {
            let record = RawRecord::from_values(&headers, parse_line(line));
            match normalize_category(&record) {
                Ok(category) => Some(category),
                Err(reason) => {
                    tracing::debug!(row = index, %reason, "skipping category row");
                    None
                }
            }
        })
        .collect()
}

/// Reads and parses the product export at `path`.
///
/// # Errors
///
/// Returns [`IngestError::NotFound`] when the file does not exist and
/// [`IngestError::Io`] for any other read failure.
pub fn read_products(path: &Path) -> Result<Vec<Product>, IngestError> {
    read_export(path).map(|content| parse_products(&content))
}

/// Reads and parses the category export at `path`.
///
/// # Errors
///
/// Same as [`read_products`].
pub fn read_categories(path: &Path) -> Result<Vec<Category>, IngestError> {
    read_export(path).map(|content| parse_categories(&content))
}

/// Loads products from `path`, returning an empty list if the export is
/// missing or unreadable.
#[must_use]
pub fn load_products(path: &Path) -> Vec<Product> {
    let products = read_products(path).unwrap_or_else(|e| log_load_failure(&e));
    tracing::info!(path = %path.display(), count = products.len(), "products loaded");
    products
}

/// Loads categories from `path`, returning an empty list if the export is
/// missing or unreadable.
#[must_use]
pub fn load_categories(path: &Path) -> Vec<Category> {
    let categories = read_categories(path).unwrap_or_else(|e| log_load_failure(&e));
    tracing::info!(path = %path.display(), count = categories.len(), "categories loaded");
    categories
}

fn log_load_failure<T>(err: &IngestError) -> Vec<T> {
    match err {
        IngestError::NotFound { path } => {
            tracing::warn!(path = %path.display(), "export file not found; using empty catalog");
        }
        IngestError::Io { path, source } => {
            tracing::error!(path = %path.display(), error = %source, "export file unreadable; using empty catalog");
        }
    }
    Vec::new()
}

// Invalid UTF-8 is replaced rather than rejected; exports are hand-edited.
fn read_export(path: &Path) -> Result<String, IngestError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(IngestError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(IngestError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// The pair of export files a catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub products_path: PathBuf,
    pub categories_path: PathBuf,
}

impl CatalogSource {
    #[must_use]
    pub fn new(products_path: impl Into<PathBuf>, categories_path: impl Into<PathBuf>) -> Self {
        Self {
            products_path: products_path.into(),
            categories_path: categories_path.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.products_path, &config.categories_path)
    }

    /// Re-reads the product export. Nothing is cached between calls.
    #[must_use]
    pub fn load_products(&self) -> Vec<Product> {
        load_products(&self.products_path)
    }

    #[must_use]
    pub fn load_categories(&self) -> Vec<Category> {
        load_categories(&self.categories_path)
    }
}
