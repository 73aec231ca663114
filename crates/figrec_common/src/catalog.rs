//! Module catalog - the set of visualization modules eligible for recommendation.
//!
//! Loaded once at daemon startup from a JSON document and treated as read-only
//! afterwards. Only entries whose status marker equals "ok" are kept; nothing
//! else is ever surfaced to the model or to API consumers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Status marker an entry must carry to be eligible.
pub const STATUS_OK: &str = "ok";

/// One catalog entry. Fields missing in the source document default to empty
/// strings instead of failing the load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier.
    #[serde(default)]
    pub module: String,
    /// What need the module addresses.
    #[serde(default)]
    pub description: String,
    /// Typical usage scenario.
    #[serde(default)]
    pub use_case: String,
    /// Chart or image type the module produces.
    #[serde(default)]
    pub chart_type: String,
    /// Usability marker; only "ok" entries are eligible.
    #[serde(default)]
    pub status: String,
}

impl Module {
    pub fn is_eligible(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// On-disk document shape: `{ "generated_at"?: ..., "modules": [...] }`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    #[allow(dead_code)]
    generated_at: Option<String>,
    #[serde(default)]
    modules: Vec<Module>,
}

/// Catalog load errors. Both are fatal at startup - without a catalog there is
/// nothing to recommend.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog file {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The eligible-module set, preserving source-file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    modules: Vec<Module>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Load a catalog from a JSON file, keeping only eligible entries.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_modules(file.modules);
        info!("Loaded catalog from {}: {} eligible modules", path.display(), catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from in-memory entries, applying the same eligibility
    /// filter as [`Catalog::load`]. Duplicate identifiers resolve
    /// last-write-wins: the lookup index points at the later occurrence, while
    /// every eligible row stays in the context in source order.
    pub fn from_modules(modules: Vec<Module>) -> Self {
        let modules: Vec<Module> = modules.into_iter().filter(Module::is_eligible).collect();
        let by_name = modules
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.module.clone(), idx))
            .collect();
        Self { modules, by_name }
    }

    /// Eligible modules in source-file order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Look up an eligible module by identifier.
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.by_name.get(name).map(|&idx| &self.modules[idx])
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn module(name: &str, status: &str) -> Module {
        Module {
            module: name.to_string(),
            description: format!("{name} description"),
            use_case: format!("{name} use case"),
            chart_type: "scatter".to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn filters_non_ok_entries() {
        let catalog = Catalog::from_modules(vec![
            module("A", "ok"),
            module("B", "pending"),
            module("C", "ok"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("A").is_some());
        assert!(catalog.get("B").is_none());
        assert!(catalog.get("C").is_some());
    }

    #[test]
    fn duplicate_identifier_resolves_to_last_occurrence() {
        let mut first = module("A", "ok");
        first.description = "first".to_string();
        let mut second = module("A", "ok");
        second.description = "second".to_string();

        let catalog = Catalog::from_modules(vec![first, second]);
        assert_eq!(catalog.get("A").unwrap().description, "second");
    }

    #[test]
    fn load_defaults_missing_fields_to_empty_strings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"generated_at": "2024-11-02", "modules": [
                {{"module": "Volcano", "status": "ok"}},
                {{"module": "Heatmap", "description": "expression matrix", "status": "ok"}}
            ]}}"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);

        let volcano = catalog.get("Volcano").unwrap();
        assert_eq!(volcano.description, "");
        assert_eq!(volcano.use_case, "");
        assert_eq!(volcano.chart_type, "");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Catalog::load("/nonexistent/modules.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn load_invalid_json_is_malformed_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[test]
    fn empty_modules_array_is_a_valid_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"modules": []}}"#).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert!(catalog.is_empty());
    }
}
