//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::calculators::TotalsLineInput;
use super::models::ProposalLine;
use super::services::{EquipmentLineInput, FunctionLineInput, ProposalInput};

/// Request to calculate a function's variation rate
#[derive(Debug, Deserialize)]
pub struct VariationRateRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub additional_value: Decimal,
}

/// Request to calculate a labor sale value
#[derive(Debug, Deserialize)]
pub struct LaborSaleValueRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub hourly_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub variation_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
}

/// Request to calculate an equipment sale value
#[derive(Debug, Deserialize)]
pub struct EquipmentSaleValueRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub hourly_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub indirect_expense_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub fixed_margin_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
}

/// Request to mark up variable costs
#[derive(Debug, Deserialize)]
pub struct VariableCostsRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_rate: Decimal,
}

/// Request to calculate a salary variation ratio
#[derive(Debug, Deserialize)]
pub struct SalaryVariationRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub raised_value: Decimal,
}

/// Request to recalculate interactive totals.
///
/// Values are kept as typed; anything unparsable counts as zero.
#[derive(Debug, Deserialize)]
pub struct CalculateTotalsRequest {
    #[serde(default)]
    pub lines: Vec<TotalsLineRequest>,
    #[serde(default, deserialize_with = "raw_input")]
    pub margin_percent: String,
}

/// An interactive line in the request
#[derive(Debug, Deserialize)]
pub struct TotalsLineRequest {
    #[serde(default)]
    pub active: bool,
    #[serde(default, deserialize_with = "raw_input")]
    pub hours: String,
    #[serde(default, deserialize_with = "raw_input")]
    pub hourly_rate: String,
}

impl From<TotalsLineRequest> for TotalsLineInput {
    fn from(line: TotalsLineRequest) -> Self {
        TotalsLineInput {
            active: line.active,
            hours: line.hours,
            hourly_rate: line.hourly_rate,
        }
    }
}

/// Accept a string, a number or null as raw form text
fn raw_input<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Request to price a finalized proposal
#[derive(Debug, Deserialize)]
pub struct PriceProposalRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub indirect_expense_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub fixed_margin_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_rate: Decimal,
    #[serde(default)]
    pub functions: Vec<FunctionLineRequest>,
    #[serde(default)]
    pub equipment: Vec<EquipmentLineRequest>,
}

/// A function line in the request
#[derive(Debug, Deserialize)]
pub struct FunctionLineRequest {
    pub function_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub hourly_value: Decimal,
}

/// An equipment line in the request
#[derive(Debug, Deserialize)]
pub struct EquipmentLineRequest {
    pub equipment_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
}

impl From<PriceProposalRequest> for ProposalInput {
    fn from(req: PriceProposalRequest) -> Self {
        ProposalInput {
            indirect_expense_rate: req.indirect_expense_rate,
            fixed_margin_rate: req.fixed_margin_rate,
            tax_rate: req.tax_rate,
            margin_rate: req.margin_rate,
            function_lines: req
                .functions
                .into_iter()
                .map(|f| FunctionLineInput {
                    function_id: f.function_id,
                    line: ProposalLine {
                        hours: f.hours,
                        hourly_value: f.hourly_value,
                    },
                })
                .collect(),
            equipment_lines: req
                .equipment
                .into_iter()
                .map(|e| EquipmentLineInput {
                    equipment_id: e.equipment_id,
                    hours: e.hours,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_request_accepts_strings_numbers_and_nulls() {
        let req: CalculateTotalsRequest = serde_json::from_str(
            r#"{
                "lines": [
                    {"active": true, "hours": "10", "hourly_rate": 12.5},
                    {"active": false, "hours": null},
                    {"hourly_rate": "abc"}
                ],
                "margin_percent": 15
            }"#,
        )
        .unwrap();

        assert_eq!(req.margin_percent, "15");
        assert_eq!(req.lines[0].hours, "10");
        assert_eq!(req.lines[0].hourly_rate, "12.5");
        assert_eq!(req.lines[1].hours, "");
        assert!(!req.lines[2].active);
        assert_eq!(req.lines[2].hourly_rate, "abc");
    }

    #[test]
    fn test_totals_request_defaults() {
        let req: CalculateTotalsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.lines.is_empty());
        assert!(req.margin_percent.is_empty());
    }

    #[test]
    fn test_price_proposal_request_into_input() {
        let req: PriceProposalRequest = serde_json::from_str(
            r#"{
                "indirect_expense_rate": "1.0867",
                "fixed_margin_rate": "0.1133",
                "tax_rate": "0.1269",
                "margin_rate": "0.25",
                "functions": [{"function_id": 1, "hours": "10", "hourly_value": "10"}],
                "equipment": [{"equipment_id": 2, "hours": "8.5"}]
            }"#,
        )
        .unwrap();

        let input = ProposalInput::from(req);
        assert_eq!(input.indirect_expense_rate, dec!(1.0867));
        assert_eq!(input.function_lines[0].function_id, 1);
        assert_eq!(input.function_lines[0].line.hourly_value, dec!(10));
        assert_eq!(input.equipment_lines[0].equipment_id, 2);
        assert_eq!(input.equipment_lines[0].hours, dec!(8.5));
    }

    #[test]
    fn test_strict_requests_reject_malformed_decimals() {
        let result = serde_json::from_str::<VariableCostsRequest>(
            r#"{"cost": "abc", "margin_rate": "0.1"}"#,
        );
        assert!(result.is_err());
    }
}
