//! Function and equipment records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::models::{EquipmentRate, FunctionRate};

pub const FUNCTION_NAME_MAX_LEN: usize = 25;
pub const EQUIPMENT_NAME_MAX_LEN: usize = 50;

/// Labor category of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    /// Indirect labor
    Moi,
    /// Direct labor
    Mod,
}

/// A labor role with its reference rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub id: i64,
    pub name: String,
    pub kind: FunctionKind,
    #[serde(flatten)]
    pub rate: FunctionRate,
}

/// A billable asset with its hourly cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub rate: EquipmentRate,
}

/// Function names are stored trimmed and uppercase
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

fn validate_name(name: &str, max_len: usize) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name must not be blank".to_string());
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(format!("name must be at most {} characters, got {}", max_len, len));
    }
    Ok(())
}

fn validate_id(id: i64) -> Result<(), String> {
    if id <= 0 {
        return Err(format!("id must be positive, got {}", id));
    }
    Ok(())
}

impl FunctionRecord {
    pub fn normalize(&mut self) {
        self.name = normalize_name(&self.name);
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_id(self.id)?;
        validate_name(&self.name, FUNCTION_NAME_MAX_LEN)?;
        if self.rate.base_value <= Decimal::ZERO {
            return Err(format!("base_value must be > 0, got {}", self.rate.base_value));
        }
        if self.rate.additional_value <= Decimal::ZERO {
            return Err(format!(
                "additional_value must be > 0, got {}",
                self.rate.additional_value
            ));
        }
        Ok(())
    }
}

impl EquipmentRecord {
    pub fn validate(&self) -> Result<(), String> {
        validate_id(self.id)?;
        validate_name(&self.name, EQUIPMENT_NAME_MAX_LEN)?;
        if self.rate.hourly_value <= Decimal::ZERO {
            return Err(format!("hourly_value must be > 0, got {}", self.rate.hourly_value));
        }
        Ok(())
    }
}
