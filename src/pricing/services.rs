//! Proposal pricing with catalog access.
//!
//! Resolves function and equipment references against the rate catalog and
//! feeds the resolved rates through the calculators.

use rust_decimal::Decimal;
use tracing::debug;

use crate::catalog::{Catalog, FunctionKind};

use super::calculators;
use super::models::ProposalLine;

/// A function allocated to the proposal
#[derive(Debug, Clone)]
pub struct FunctionLineInput {
    pub function_id: i64,
    pub line: ProposalLine,
}

/// Equipment allocated to the proposal; the hourly value comes from the catalog
#[derive(Debug, Clone)]
pub struct EquipmentLineInput {
    pub equipment_id: i64,
    pub hours: Decimal,
}

/// Finalized proposal parameters
#[derive(Debug, Clone)]
pub struct ProposalInput {
    pub indirect_expense_rate: Decimal,
    pub fixed_margin_rate: Decimal,
    pub tax_rate: Decimal,
    pub margin_rate: Decimal,
    pub function_lines: Vec<FunctionLineInput>,
    pub equipment_lines: Vec<EquipmentLineInput>,
}

/// Priced labor line
#[derive(Debug, Clone)]
pub struct PricedFunctionLine {
    pub function_id: i64,
    pub name: String,
    pub kind: FunctionKind,
    pub line: ProposalLine,
    pub variation_rate: Decimal,
    pub sale_value: Decimal,
}

/// Priced equipment line
#[derive(Debug, Clone)]
pub struct PricedEquipmentLine {
    pub equipment_id: i64,
    pub name: String,
    pub line: ProposalLine,
    pub sale_value: Decimal,
}

/// Result of proposal pricing
#[derive(Debug, Clone)]
pub struct PricedProposal {
    pub function_lines: Vec<PricedFunctionLine>,
    pub equipment_lines: Vec<PricedEquipmentLine>,
    pub subtotal: Decimal,
    pub margin_rate: Decimal,
    pub total_value: Decimal,
}

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    InvalidArgument {
        parameter: &'static str,
        constraint: String,
    },
    NotFound {
        entity: &'static str,
        id: i64,
    },
}

impl PricingError {
    pub(crate) fn invalid(parameter: &'static str, constraint: impl Into<String>) -> Self {
        PricingError::InvalidArgument {
            parameter,
            constraint: constraint.into(),
        }
    }
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::InvalidArgument {
                parameter,
                constraint,
            } => {
                write!(f, "Invalid argument {}: {}", parameter, constraint)
            }
            PricingError::NotFound { entity, id } => {
                write!(f, "No {} found with id {}", entity, id)
            }
        }
    }
}

impl std::error::Error for PricingError {}

fn accumulate(subtotal: Decimal, sale_value: Decimal) -> Result<Decimal, PricingError> {
    subtotal
        .checked_add(sale_value)
        .ok_or_else(|| PricingError::invalid("subtotal", "result exceeds the decimal range"))
}

/// Price a finalized proposal.
///
/// Function lines are priced with the labor formula using the role's
/// variation rate; equipment lines are grossed up for indirect expenses,
/// fixed margin and tax. Line values are summed in order (functions first,
/// then equipment) and the profit margin is applied to the sum.
///
/// # Errors
/// * `NotFound` when a referenced function or equipment is not in the catalog
/// * `InvalidArgument` for negative quantities, margin plus tax >= 100%, a
///   proposal whose lines sum to zero, or values beyond the decimal range
pub fn price_proposal(
    catalog: &Catalog,
    input: &ProposalInput,
) -> Result<PricedProposal, PricingError> {
    let mut subtotal = Decimal::ZERO;

    let mut function_lines = Vec::with_capacity(input.function_lines.len());
    for requested in &input.function_lines {
        requested.line.validate()?;
        let function = catalog.function(requested.function_id)?;

        let variation_rate = function.rate.variation_rate()?;
        let sale_value = function
            .rate
            .sale_value(requested.line.hourly_value, requested.line.hours)?;
        subtotal = accumulate(subtotal, sale_value)?;

        function_lines.push(PricedFunctionLine {
            function_id: function.id,
            name: function.name.clone(),
            kind: function.kind,
            line: requested.line,
            variation_rate,
            sale_value,
        });
    }

    let mut equipment_lines = Vec::with_capacity(input.equipment_lines.len());
    for requested in &input.equipment_lines {
        let equipment = catalog.equipment(requested.equipment_id)?;
        let line = ProposalLine {
            hours: requested.hours,
            hourly_value: equipment.rate.hourly_value,
        };
        line.validate()?;

        let sale_value = equipment.rate.sale_value(
            input.indirect_expense_rate,
            input.fixed_margin_rate,
            input.tax_rate,
            line.hours,
        )?;
        subtotal = accumulate(subtotal, sale_value)?;

        equipment_lines.push(PricedEquipmentLine {
            equipment_id: equipment.id,
            name: equipment.name.clone(),
            line,
            sale_value,
        });
    }

    let total_value = calculators::variable_costs(subtotal, input.margin_rate)?;

    debug!(
        functions = function_lines.len(),
        equipment = equipment_lines.len(),
        %subtotal,
        %total_value,
        "Priced proposal"
    );

    Ok(PricedProposal {
        function_lines,
        equipment_lines,
        subtotal,
        margin_rate: input.margin_rate,
        total_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EquipmentRecord, FunctionRecord};
    use crate::pricing::models::{EquipmentRate, FunctionRate};
    use rust_decimal_macros::dec;

    fn catalog() -> Catalog {
        Catalog::from_records(
            vec![
                FunctionRecord {
                    id: 1,
                    name: "pedreiro".to_string(),
                    kind: FunctionKind::Mod,
                    rate: FunctionRate {
                        base_value: dec!(36.8520854931972),
                        additional_value: dec!(40.3245566310098),
                    },
                },
                FunctionRecord {
                    id: 2,
                    name: "engenheiro".to_string(),
                    kind: FunctionKind::Moi,
                    rate: FunctionRate {
                        base_value: dec!(100),
                        additional_value: dec!(120),
                    },
                },
            ],
            vec![EquipmentRecord {
                id: 7,
                name: "munck".to_string(),
                rate: EquipmentRate {
                    hourly_value: dec!(25.85),
                },
            }],
        )
        .unwrap()
    }

    fn input() -> ProposalInput {
        ProposalInput {
            indirect_expense_rate: dec!(1.0867),
            fixed_margin_rate: dec!(0.1133),
            tax_rate: dec!(0.1269),
            margin_rate: dec!(0.25),
            function_lines: vec![FunctionLineInput {
                function_id: 1,
                line: ProposalLine {
                    hours: dec!(10),
                    hourly_value: dec!(10),
                },
            }],
            equipment_lines: vec![EquipmentLineInput {
                equipment_id: 7,
                hours: dec!(10),
            }],
        }
    }

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::invalid("cost", "must be > 0, got 0");
        assert_eq!(err.to_string(), "Invalid argument cost: must be > 0, got 0");

        let err = PricingError::NotFound {
            entity: "function",
            id: 99,
        };
        assert_eq!(err.to_string(), "No function found with id 99");
    }

    #[test]
    fn test_price_proposal_combines_labor_and_equipment() {
        let priced = price_proposal(&catalog(), &input()).unwrap();

        assert_eq!(priced.function_lines.len(), 1);
        assert_eq!(priced.function_lines[0].name, "PEDREIRO");
        assert_eq!(priced.function_lines[0].variation_rate, dec!(3.4724711378126));
        assert_eq!(priced.equipment_lines.len(), 1);
        assert_eq!(priced.equipment_lines[0].name, "munck");
        assert_eq!(priced.equipment_lines[0].line.hourly_value, dec!(25.85));

        let expected_subtotal =
            priced.function_lines[0].sale_value + priced.equipment_lines[0].sale_value;
        assert_eq!(priced.subtotal, expected_subtotal);
        assert!((priced.subtotal - dec!(1085.486249839846)).abs() < dec!(0.000001));
        assert_eq!(
            priced.total_value,
            calculators::variable_costs(priced.subtotal, dec!(0.25)).unwrap()
        );
        assert!(priced.total_value > priced.subtotal);
    }

    #[test]
    fn test_price_proposal_labor_only() {
        let mut input = input();
        input.equipment_lines.clear();
        input.function_lines[0].function_id = 2;
        input.function_lines[0].line = ProposalLine {
            hours: dec!(2),
            hourly_value: dec!(1),
        };
        input.margin_rate = dec!(0);

        let priced = price_proposal(&catalog(), &input).unwrap();

        // ((1 * 20) + 100) * 2
        assert_eq!(priced.subtotal, dec!(240));
        assert_eq!(priced.total_value, dec!(240));
    }

    #[test]
    fn test_price_proposal_unknown_function() {
        let mut input = input();
        input.function_lines[0].function_id = 42;

        let err = price_proposal(&catalog(), &input).unwrap_err();
        assert_eq!(
            err,
            PricingError::NotFound {
                entity: "function",
                id: 42
            }
        );
    }

    #[test]
    fn test_price_proposal_unknown_equipment() {
        let mut input = input();
        input.equipment_lines[0].equipment_id = 8;

        let err = price_proposal(&catalog(), &input).unwrap_err();
        assert_eq!(
            err,
            PricingError::NotFound {
                entity: "equipment",
                id: 8
            }
        );
    }

    #[test]
    fn test_price_proposal_rejects_margin_plus_tax_over_one() {
        let mut input = input();
        input.fixed_margin_rate = dec!(0.6);
        input.tax_rate = dec!(0.5);

        let err = price_proposal(&catalog(), &input).unwrap_err();
        assert!(matches!(err, PricingError::InvalidArgument { .. }));
    }

    #[test]
    fn test_price_proposal_rejects_negative_hours() {
        let mut input = input();
        input.equipment_lines[0].hours = dec!(-2);

        let err = price_proposal(&catalog(), &input).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidArgument { parameter: "hours", .. }
        ));
    }

    #[test]
    fn test_price_proposal_empty_is_rejected() {
        let mut input = input();
        input.function_lines.clear();
        input.equipment_lines.clear();

        let err = price_proposal(&catalog(), &input).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidArgument { parameter: "cost", .. }
        ));
    }

    #[test]
    fn test_price_proposal_subtotal_out_of_range() {
        let mut input = input();
        input.function_lines[0].function_id = 2;
        input.function_lines[0].line = ProposalLine {
            hours: dec!(1),
            hourly_value: dec!(0),
        };
        input.equipment_lines = vec![
            EquipmentLineInput {
                equipment_id: 7,
                hours: dec!(3500000000000000000000000000),
            },
            EquipmentLineInput {
                equipment_id: 7,
                hours: dec!(3500000000000000000000000000),
            },
        ];
        input.indirect_expense_rate = dec!(0.5);
        input.fixed_margin_rate = dec!(0);
        input.tax_rate = dec!(0);

        // Each equipment line fits on its own; the running sum does not
        let err = price_proposal(&catalog(), &input).unwrap_err();
        assert!(matches!(err, PricingError::InvalidArgument { .. }));
    }
}
