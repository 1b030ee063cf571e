//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::FunctionKind;

use super::calculators::TotalsResult;
use super::services::{PricedEquipmentLine, PricedFunctionLine, PricedProposal};

/// Response for variation rate calculation
#[derive(Debug, Serialize)]
pub struct VariationRateResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub variation_rate: Decimal,
}

/// Response for labor and equipment sale values
#[derive(Debug, Serialize)]
pub struct SaleValueResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub sale_value: Decimal,
}

/// Response for variable costs markup
#[derive(Debug, Serialize)]
pub struct VariableCostsResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
}

/// Response for salary variation
#[derive(Debug, Serialize)]
pub struct SalaryVariationResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub percentage: Decimal,
}

/// Response for interactive totals
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub lines: Vec<LineSubtotalResponse>,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub submitted_total: Decimal,
}

/// Subtotal of one interactive line; `null` for inactive lines
#[derive(Debug, Serialize)]
pub struct LineSubtotalResponse {
    pub active: bool,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub subtotal: Option<Decimal>,
}

impl From<TotalsResult> for TotalsResponse {
    fn from(result: TotalsResult) -> Self {
        TotalsResponse {
            lines: result
                .line_subtotals
                .into_iter()
                .map(|subtotal| LineSubtotalResponse {
                    active: subtotal.is_some(),
                    subtotal,
                })
                .collect(),
            base_value: result.totals.base_value,
            margin_value: result.totals.margin_value,
            total_value: result.totals.total_value,
            submitted_total: result.submitted_total,
        }
    }
}

/// Response for proposal pricing
#[derive(Debug, Serialize)]
pub struct PricedProposalResponse {
    pub functions: Vec<PricedFunctionLineResponse>,
    pub equipment: Vec<PricedEquipmentLineResponse>,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_value: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PricedFunctionLineResponse {
    pub function_id: i64,
    pub name: String,
    pub kind: FunctionKind,
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub hourly_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub variation_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub sale_value: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PricedEquipmentLineResponse {
    pub equipment_id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub hourly_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub sale_value: Decimal,
}

impl From<PricedFunctionLine> for PricedFunctionLineResponse {
    fn from(line: PricedFunctionLine) -> Self {
        PricedFunctionLineResponse {
            function_id: line.function_id,
            name: line.name,
            kind: line.kind,
            hours: line.line.hours,
            hourly_value: line.line.hourly_value,
            variation_rate: line.variation_rate,
            sale_value: line.sale_value,
        }
    }
}

impl From<PricedEquipmentLine> for PricedEquipmentLineResponse {
    fn from(line: PricedEquipmentLine) -> Self {
        PricedEquipmentLineResponse {
            equipment_id: line.equipment_id,
            name: line.name,
            hours: line.line.hours,
            hourly_value: line.line.hourly_value,
            sale_value: line.sale_value,
        }
    }
}

impl From<PricedProposal> for PricedProposalResponse {
    fn from(priced: PricedProposal) -> Self {
        PricedProposalResponse {
            functions: priced.function_lines.into_iter().map(Into::into).collect(),
            equipment: priced.equipment_lines.into_iter().map(Into::into).collect(),
            subtotal: priced.subtotal,
            margin_rate: priced.margin_rate,
            total_value: priced.total_value,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
