use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for loading the storefront's export files.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory the export files are resolved against when no explicit
    /// file path is configured.
    pub data_dir: PathBuf,
    /// Product export, e.g. `./products.csv`.
    pub products_path: PathBuf,
    /// Category export, e.g. `./categories.csv`.
    pub categories_path: PathBuf,
    /// Page size used by catalog listings when the caller does not pass one.
    pub page_size: usize,
}
