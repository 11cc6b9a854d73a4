//! Built-in option catalog for the project form.
//!
//! Boards, seed goals, component and communication options, and the initial
//! selections are defined in `catalog.toml` and embedded in the binary at
//! compile time.

use serde::Deserialize;
use thiserror::Error;

use crate::project::Language;

/// Initial form selections.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDefaults {
    pub board: String,
    pub modules: Vec<String>,
    pub communication: Vec<String>,
    pub language: Language,
    pub power: String,
}

/// All options the form offers.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub boards: Vec<String>,
    pub goals: Vec<String>,
    pub components: Vec<String>,
    pub communication: Vec<String>,
    pub defaults: CatalogDefaults,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("catalog must list at least one {0}")]
    Empty(&'static str),
}

/// The embedded catalog TOML.
static CATALOG_TOML: &str = include_str!("catalog.toml");

impl Catalog {
    /// Parse a catalog and check that every option list is populated.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        if catalog.boards.is_empty() {
            return Err(CatalogError::Empty("board"));
        }
        if catalog.goals.is_empty() {
            return Err(CatalogError::Empty("goal"));
        }
        if catalog.components.is_empty() {
            return Err(CatalogError::Empty("component"));
        }
        if catalog.communication.is_empty() {
            return Err(CatalogError::Empty("communication option"));
        }
        Ok(catalog)
    }

    /// Load the embedded catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. If the binary was built and
    /// its tests pass, it is not.
    pub fn builtin() -> Self {
        Self::parse(CATALOG_TOML).expect("embedded catalog.toml is invalid")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
