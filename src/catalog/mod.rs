//! Read-only rate catalog.
//!
//! Functions and equipment are loaded once at startup from a JSON document
//! and never change afterwards, so the catalog is shared behind an `Arc`
//! without locking.

pub mod models;

pub use models::{EquipmentRecord, FunctionKind, FunctionRecord};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::pricing::PricingError;

/// Catalog loading error types
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {entity} {id}: {reason}")]
    InvalidRecord {
        entity: &'static str,
        id: i64,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    functions: Vec<FunctionRecord>,
    #[serde(default)]
    equipment: Vec<EquipmentRecord>,
}

/// Validated function and equipment records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    functions: Vec<FunctionRecord>,
    equipment: Vec<EquipmentRecord>,
}

impl Catalog {
    /// Load and validate a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded catalog from {}: {:?}",
            path.display(),
            catalog.stats()
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_records(document.functions, document.equipment)
    }

    /// Normalize function names and validate every record.
    ///
    /// Equipment names are kept as entered. Ids must be unique within each
    /// kind.
    pub fn from_records(
        mut functions: Vec<FunctionRecord>,
        equipment: Vec<EquipmentRecord>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for record in &mut functions {
            record.normalize();
            record.validate().map_err(|reason| CatalogError::InvalidRecord {
                entity: "function",
                id: record.id,
                reason,
            })?;
            if !seen.insert(record.id) {
                return Err(CatalogError::InvalidRecord {
                    entity: "function",
                    id: record.id,
                    reason: "duplicate id".to_string(),
                });
            }
        }

        seen.clear();
        for record in &equipment {
            record.validate().map_err(|reason| CatalogError::InvalidRecord {
                entity: "equipment",
                id: record.id,
                reason,
            })?;
            if !seen.insert(record.id) {
                return Err(CatalogError::InvalidRecord {
                    entity: "equipment",
                    id: record.id,
                    reason: "duplicate id".to_string(),
                });
            }
        }

        Ok(Self {
            functions,
            equipment,
        })
    }

    /// Get a function by id
    pub fn function(&self, id: i64) -> Result<&FunctionRecord, PricingError> {
        if id <= 0 {
            return Err(PricingError::invalid(
                "function_id",
                format!("must be positive, got {}", id),
            ));
        }
        self.functions
            .iter()
            .find(|f| f.id == id)
            .ok_or(PricingError::NotFound {
                entity: "function",
                id,
            })
    }

    /// Get an equipment by id
    pub fn equipment(&self, id: i64) -> Result<&EquipmentRecord, PricingError> {
        if id <= 0 {
            return Err(PricingError::invalid(
                "equipment_id",
                format!("must be positive, got {}", id),
            ));
        }
        self.equipment
            .iter()
            .find(|e| e.id == id)
            .ok_or(PricingError::NotFound {
                entity: "equipment",
                id,
            })
    }

    /// All functions, sorted by name
    pub fn functions_by_name(&self) -> Vec<&FunctionRecord> {
        let mut functions: Vec<&FunctionRecord> = self.functions.iter().collect();
        functions.sort_by(|a, b| a.name.cmp(&b.name));
        functions
    }

    /// Get catalog statistics for monitoring
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            functions: self.functions.len(),
            equipment: self.equipment.len(),
        }
    }
}

/// Catalog statistics for the health endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogStats {
    pub functions: usize,
    pub equipment: usize,
}
