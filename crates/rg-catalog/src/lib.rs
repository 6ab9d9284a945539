//! rg-catalog: component data, mixture specifications and session
//! configuration.

pub mod schema;
pub mod session;
pub mod source;

pub use schema::*;
pub use source::{Catalog, ComponentSource};

use rg_eos::EosError;
use std::path::Path;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Component not found: {id}")]
    NotFound { id: String },

    #[error("Invalid configuration: {what}")]
    Invalid { what: String },

    #[error(transparent)]
    Eos(#[from] EosError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a session configuration; `.json` files are read as JSON, anything else as YAML.
pub fn load_config(path: &Path) -> CatalogResult<SessionConfig> {
    let content = std::fs::read_to_string(path)?;
    if is_json(path) {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}

pub fn save_config(path: &Path, config: &SessionConfig) -> CatalogResult<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        serde_yaml::to_string(config)?
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a component file into a catalog.
pub fn load_components(path: &Path) -> CatalogResult<Catalog> {
    let content = std::fs::read_to_string(path)?;
    if is_json(path) {
        Catalog::from_json_str(&content)
    } else {
        Catalog::from_yaml_str(&content)
    }
}
