//! Command handlers. Each one reloads the exports it needs and prints its
//! result to stdout as pretty JSON.

use anyhow::Context;
use serde::Serialize;

use s4u_ingest::{
    filter_options, find_category_by_slug, find_product_by_slug, query_products,
    summarize_categories, CatalogSource, ProductQuery,
};

use crate::Commands;

pub(crate) fn run(command: Commands, source: &CatalogSource, page_size: usize) -> anyhow::Result<()> {
    match command {
        Commands::Products {
            page,
            limit,
            category,
            search,
            brands,
            min_price,
            max_price,
            in_stock,
        } => {
            let query = ProductQuery {
                page,
                limit,
                category,
                search,
                brands,
                min_price,
                max_price,
                in_stock,
            };
            print_json(&query_products(source.load_products(), &query, page_size))
        }
        Commands::Product { slug } => {
            let products = source.load_products();
            let product = find_product_by_slug(&products, &slug)
                .with_context(|| format!("no product with slug \"{slug}\""))?;
            print_json(product)
        }
        Commands::Categories { slug: Some(slug) } => {
            let categories = source.load_categories();
            print_json(&find_category_by_slug(&categories, &slug))
        }
        Commands::Categories { slug: None } => print_json(&source.load_categories()),
        Commands::CategorySummary => {
            let categories = source.load_categories();
            let products = source.load_products();
            print_json(&summarize_categories(&categories, &products))
        }
        Commands::Filters { category } => {
            let products = source.load_products();
            print_json(&filter_options(&products, category.as_deref()))
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
