//! Remote lifecycle data retrieval and the on-disk cache.
//!
//! Lifecycle records come from the endoflife.date API. The full product
//! list and per-product detail files are cached under `~/.eolscan/` and
//! reused until an explicit update is requested, so routine scans work
//! offline. The configuration document lives beside them and is seeded
//! from a built-in default on first run.

use super::record::{records_to_schedules, ProductRecord};
use super::Catalog;
use crate::error::{EolscanError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base location of the endoflife.date service.
pub const EOL_BASE_URL: &str = "https://endoflife.date/api";

/// Cache directory base path, relative to the home directory.
pub const CACHE_ROOT: &str = ".eolscan";

/// Configuration document file name inside the cache directory.
pub const CONFIG_BASE: &str = "eolscan.yaml";

/// Product list file name inside the cache directory.
pub const PRODUCTS_LIST_BASE: &str = "products.json";

/// Per-product detail directory name inside the cache directory.
pub const PRODUCTS_DIR_BASE: &str = "products";

/// Built-in configuration seeded on first run.
pub const DEFAULT_CONFIG: &str = include_str!("default_config.yaml");

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Location of the eolscan cache directory.
pub fn cache_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CACHE_ROOT))
        .ok_or_else(|| EolscanError::Config("cannot determine home directory".to_string()))
}

/// Remove all cached artifacts.
pub fn clean() -> Result<()> {
    let dir = cache_dir()?;
    if dir.exists() {
        fs::remove_dir_all(&dir).map_err(|e| EolscanError::io(&dir, e))?;
    }
    Ok(())
}

/// Load the catalog, refreshing the cache first when `update` is set or
/// when no cache exists yet.
pub fn load(update: bool) -> Result<Catalog> {
    let dir = cache_dir()?;
    fs::create_dir_all(&dir).map_err(|e| EolscanError::io(&dir, e))?;

    let config_path = dir.join(CONFIG_BASE);
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| EolscanError::io(&config_path, e))?;
    }

    let products_list_path = dir.join(PRODUCTS_LIST_BASE);
    let products_dir = dir.join(PRODUCTS_DIR_BASE);

    if update || !products_list_path.exists() {
        cache_lifetime_data(&products_list_path, &products_dir)?;
    }

    let document =
        fs::read_to_string(&config_path).map_err(|e| EolscanError::io(&config_path, e))?;
    let mut catalog = Catalog::from_yaml(&document)?;

    let list_buf = fs::read_to_string(&products_list_path)
        .map_err(|e| EolscanError::io(&products_list_path, e))?;
    let products: Vec<String> = serde_json::from_str(&list_buf)?;

    for product in &products {
        let detail_path = products_dir.join(format!("{product}.json"));
        let detail_buf =
            fs::read_to_string(&detail_path).map_err(|e| EolscanError::io(&detail_path, e))?;
        let records: Vec<ProductRecord> = serde_json::from_str(&detail_buf)?;
        let schedules = records_to_schedules(product, &records)?;
        catalog.insert_schedules(product.clone(), schedules);
    }

    Ok(catalog)
}

/// Download the product list and every product detail file into the cache.
fn cache_lifetime_data(products_list_path: &Path, products_dir: &Path) -> Result<()> {
    tracing::info!("caching new lifecycle data");

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| EolscanError::Fetch(e.to_string()))?;

    let list_body = fetch(&client, &format!("{EOL_BASE_URL}/all.json"))?;
    fs::write(products_list_path, &list_body)
        .map_err(|e| EolscanError::io(products_list_path, e))?;

    let products: Vec<String> = serde_json::from_str(&list_body)?;
    fs::create_dir_all(products_dir).map_err(|e| EolscanError::io(products_dir, e))?;

    for product in &products {
        let body = fetch(&client, &format!("{EOL_BASE_URL}/{product}.json"))?;
        let detail_path = products_dir.join(format!("{product}.json"));
        fs::write(&detail_path, &body).map_err(|e| EolscanError::io(&detail_path, e))?;
    }

    Ok(())
}

fn fetch(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| EolscanError::Fetch(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(EolscanError::Fetch(format!("{url} returned {status}")));
    }

    response
        .text()
        .map_err(|e| EolscanError::Fetch(format!("{url}: {e}")))
}
