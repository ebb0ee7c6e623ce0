mod catalog;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "s4u-cli")]
#[command(about = "Inspect the storefront catalog exports")]
struct Cli {
    /// Product export to read instead of the configured one
    #[arg(long, global = true)]
    products_file: Option<PathBuf>,
    /// Category export to read instead of the configured one
    #[arg(long, global = true)]
    categories_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, filtered and paginated like the storefront listing
    Products {
        #[arg(long)]
        page: Option<usize>,
        /// Page size (defaults to `S4U_PAGE_SIZE`)
        #[arg(long)]
        limit: Option<usize>,
        /// Category slug, e.g. oral-steroids
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Comma-separated brand names
        #[arg(long)]
        brands: Option<String>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
        /// Only products with stock left
        #[arg(long)]
        in_stock: bool,
    },
    /// Show one product by slug
    Product { slug: String },
    /// List categories, or show one by slug
    Categories {
        #[arg(long)]
        slug: Option<String>,
    },
    /// Top-level categories with product and subcategory counts
    CategorySummary,
    /// Brands and price bounds available for the listing filters
    Filters {
        /// Category slug to scope the options to
        #[arg(long)]
        category: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = s4u_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut source = s4u_ingest::CatalogSource::from_config(&config);
    if let Some(path) = cli.products_file {
        source.products_path = path;
    }
    if let Some(path) = cli.categories_file {
        source.categories_path = path;
    }

    catalog::run(cli.command, &source, config.page_size)
}
