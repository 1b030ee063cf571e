//! Value types for pricing calculations.
//!
//! None of these are persisted here; callers resolve them from their own
//! storage and hand them to the calculators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculators;
use super::services::PricingError;

/// A labor role's two reference rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRate {
    pub base_value: Decimal,
    pub additional_value: Decimal,
}

impl FunctionRate {
    /// Monetary difference between the additional and base values
    pub fn variation_rate(&self) -> Result<Decimal, PricingError> {
        calculators::variation_rate(self.base_value, self.additional_value)
    }

    /// Sale value for `hours` of this role billed at `hourly_value`
    pub fn sale_value(
        &self,
        hourly_value: Decimal,
        hours: Decimal,
    ) -> Result<Decimal, PricingError> {
        let variation_rate = self.variation_rate()?;
        calculators::labor_sale_value(hourly_value, self.base_value, variation_rate, hours)
    }
}

/// A piece of equipment's base hourly cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRate {
    pub hourly_value: Decimal,
}

impl EquipmentRate {
    /// Grossed-up sale value for `hours` of use
    pub fn sale_value(
        &self,
        indirect_expense_rate: Decimal,
        fixed_margin_rate: Decimal,
        tax_rate: Decimal,
        hours: Decimal,
    ) -> Result<Decimal, PricingError> {
        calculators::equipment_sale_value(
            self.hourly_value,
            indirect_expense_rate,
            fixed_margin_rate,
            tax_rate,
            hours,
        )
    }
}

/// Hours allocated to a function or equipment at a given hourly value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalLine {
    pub hours: Decimal,
    pub hourly_value: Decimal,
}

impl ProposalLine {
    /// Reject negative quantities before any formula sees them
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.hours < Decimal::ZERO {
            return Err(PricingError::invalid(
                "hours",
                format!("must be >= 0, got {}", self.hours),
            ));
        }
        if self.hourly_value < Decimal::ZERO {
            return Err(PricingError::invalid(
                "hourly_value",
                format!("must be >= 0, got {}", self.hourly_value),
            ));
        }
        Ok(())
    }
}

/// Aggregate of all active lines plus margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProposalTotals {
    pub base_value: Decimal,
    pub margin_value: Decimal,
    pub total_value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_function_rate_variation() {
        let rate = FunctionRate {
            base_value: dec!(100),
            additional_value: dec!(120),
        };
        assert_eq!(rate.variation_rate().unwrap(), dec!(20));
    }

    #[test]
    fn test_function_rate_sale_value() {
        let rate = FunctionRate {
            base_value: dec!(100),
            additional_value: dec!(100.2),
        };
        // variation 0.2: ((50 * 0.2) + 100) * 10
        assert_eq!(rate.sale_value(dec!(50), dec!(10)).unwrap(), dec!(1100));
    }

    #[test]
    fn test_function_rate_sale_value_out_of_range() {
        let rate = FunctionRate {
            base_value: dec!(1),
            additional_value: dec!(1000000000000001),
        };
        let err = rate
            .sale_value(dec!(1000000000000000), dec!(1000000))
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidArgument { .. }));
    }

    #[test]
    fn test_equipment_rate_sale_value() {
        let rate = EquipmentRate {
            hourly_value: dec!(150),
        };
        // 150 * (0.1 / (1 - 0.5)) * 8
        assert_eq!(
            rate.sale_value(dec!(0.1), dec!(0.3), dec!(0.2), dec!(8)).unwrap(),
            dec!(240)
        );
        assert!(rate.sale_value(dec!(0.1), dec!(0.7), dec!(0.3), dec!(8)).is_err());
    }

    #[test]
    fn test_proposal_line_validation() {
        let line = ProposalLine {
            hours: dec!(2.5),
            hourly_value: dec!(40),
        };
        assert!(line.validate().is_ok());

        let negative_hours = ProposalLine {
            hours: dec!(-1),
            hourly_value: dec!(40),
        };
        assert!(matches!(
            negative_hours.validate(),
            Err(PricingError::InvalidArgument { parameter: "hours", .. })
        ));

        let negative_rate = ProposalLine {
            hours: dec!(1),
            hourly_value: dec!(-40),
        };
        assert!(matches!(
            negative_rate.validate(),
            Err(PricingError::InvalidArgument {
                parameter: "hourly_value",
                ..
            })
        ));
    }
}
