use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MicroActivity;
use crate::calculations::common::is_unit_rate;
use crate::error::ConfigurationError;

/// Rates of the micro-entrepreneur regime for one activity category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroParameters {
    pub activity: MicroActivity,
    /// Contributions as a share of turnover.
    pub contribution_rate: Decimal,
    /// Flat expense allowance (abattement) deducted from turnover before
    /// income tax.
    pub flat_allowance_rate: Decimal,
    /// Turnover above which the micro regime no longer applies.
    pub turnover_ceiling: Decimal,
}

/// Yearly rates used by the simulator.
///
/// Loaded with the bracket tables; the values change every finance act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalParameters {
    pub fiscal_year: i32,

    /// Flat contribution rate for self-employed directors (TNS).
    pub self_employed_contribution_rate: Decimal,

    /// Flat contribution rate on the total salary budget of an
    /// assimilated-employee director.
    pub assimilated_employee_contribution_rate: Decimal,

    /// Non-deductible CSG/CRDS share, added back to the taxable income of
    /// self-employed directors.
    pub non_deductible_surtax_rate: Decimal,

    /// Flat tax on dividends (prélèvement forfaitaire unique).
    pub dividend_flat_tax_rate: Decimal,

    /// Income-tax part of the flat tax. Dividends that bear social
    /// contributions only pay this part on top.
    pub dividend_income_tax_rate: Decimal,

    /// Share of the share capital above which dividends of a self-employed
    /// director bear contributions.
    pub dividend_contribution_threshold_rate: Decimal,

    pub micro: Vec<MicroParameters>,
}

impl FiscalParameters {
    /// Checks every rate and the presence of micro parameters for each
    /// activity category.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for the first rate outside `[0, 1]`,
    /// a negative ceiling, or a missing activity.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_rate(
            "self_employed_contribution_rate",
            self.self_employed_contribution_rate,
        )?;
        check_rate(
            "assimilated_employee_contribution_rate",
            self.assimilated_employee_contribution_rate,
        )?;
        check_rate("non_deductible_surtax_rate", self.non_deductible_surtax_rate)?;
        check_rate("dividend_flat_tax_rate", self.dividend_flat_tax_rate)?;
        check_rate("dividend_income_tax_rate", self.dividend_income_tax_rate)?;
        check_rate(
            "dividend_contribution_threshold_rate",
            self.dividend_contribution_threshold_rate,
        )?;

        for micro in &self.micro {
            check_rate(
                &format!("{} contribution_rate", micro.activity),
                micro.contribution_rate,
            )?;
            check_rate(
                &format!("{} flat_allowance_rate", micro.activity),
                micro.flat_allowance_rate,
            )?;
            if micro.turnover_ceiling < Decimal::ZERO {
                return Err(ConfigurationError::NegativeAmount {
                    name: format!("{} turnover_ceiling", micro.activity),
                    value: micro.turnover_ceiling,
                });
            }
        }

        for activity in MicroActivity::ALL {
            self.micro(activity)?;
        }
        Ok(())
    }

    /// Micro parameters for `activity`.
    pub fn micro(
        &self,
        activity: MicroActivity,
    ) -> Result<&MicroParameters, ConfigurationError> {
        self.micro
            .iter()
            .find(|m| m.activity == activity)
            .ok_or(ConfigurationError::MissingMicroParameters(activity))
    }
}

fn check_rate(
    name: &str,
    value: Decimal,
) -> Result<(), ConfigurationError> {
    if !is_unit_rate(value) {
        return Err(ConfigurationError::RateOutOfRange {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}
