//! Catalog loading from files, strings, and HTTP URLs.

use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::types::Asset;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a catalog from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::InvalidJson` if it isn't a catalog, or
/// `LoadError::EmptyAsset` if an asset has no properties.
pub fn load_catalog(path: &Path) -> Result<Vec<Asset>, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "read catalog");
    load_catalog_str(&content)
}

/// Load a catalog from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't a catalog, or
/// `LoadError::EmptyAsset` if an asset has no properties.
pub fn load_catalog_str(content: &str) -> Result<Vec<Asset>, LoadError> {
    let assets: Vec<Asset> =
        serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })?;
    check_catalog(assets)
}

/// Load a catalog from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the request fails or the body
/// isn't a catalog.
#[cfg(feature = "remote")]
pub fn load_catalog_url(url: &str) -> Result<Vec<Asset>, LoadError> {
    let network_error = |source: reqwest::Error| LoadError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    debug!(url = %url, "fetching catalog");
    let assets: Vec<Asset> = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.json())
        .map_err(network_error)?;

    check_catalog(assets)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a catalog from a file path or URL.
///
/// URL loading requires the `remote` feature.
pub fn load_catalog_auto(source: &str) -> Result<Vec<Asset>, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_catalog_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_catalog(Path::new(source))
    }
}

fn check_catalog(assets: Vec<Asset>) -> Result<Vec<Asset>, LoadError> {
    if let Some(empty) = assets.iter().find(|asset| asset.fields.is_empty()) {
        return Err(LoadError::EmptyAsset {
            asset: empty.name.clone(),
        });
    }
    Ok(assets)
}
