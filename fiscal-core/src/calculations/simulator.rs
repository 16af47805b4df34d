//! Per-status simulation.
//!
//! Turns a business profile into what the owner keeps under one legal form.
//! Three paths exist, chosen by the status's [`TaxRegime`]:
//!
//! | Regime        | Contributions on            | Income tax on                         | Corporate tax |
//! |---------------|-----------------------------|---------------------------------------|---------------|
//! | `Transparent` | operating profit            | profit - contributions (+ surtax)     | none          |
//! | `Micro`       | turnover                    | turnover - flat allowance             | none          |
//! | `Opaque`      | salary budget (+ dividends) | salary - contributions (+ surtax)     | profit - salary budget |
//!
//! Under the corporate-tax regime the operating profit is split first: the
//! salary budget (`profit × payout_split_ratio`) is a deductible expense of
//! the company, corporate tax is levied on the rest, and what remains after
//! corporate tax is distributed as dividends.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fiscal_core::{
//!     BracketTable, CapitalRaisingFriction, DirectorRegime, FiscalParameters, LegalStatusMeta,
//!     MicroActivity, MicroParameters, ReferenceData, SimulationProfile, StatusSimulator,
//!     StatusTable, TaxBracket, TaxRegime,
//! };
//!
//! let parameters = FiscalParameters {
//!     fiscal_year: 2024,
//!     self_employed_contribution_rate: dec!(0.30),
//!     assimilated_employee_contribution_rate: dec!(0.45),
//!     non_deductible_surtax_rate: dec!(0.029),
//!     dividend_flat_tax_rate: dec!(0.30),
//!     dividend_income_tax_rate: dec!(0.128),
//!     dividend_contribution_threshold_rate: dec!(0.10),
//!     micro: MicroActivity::ALL
//!         .into_iter()
//!         .map(|activity| MicroParameters {
//!             activity,
//!             contribution_rate: dec!(0.212),
//!             flat_allowance_rate: dec!(0.50),
//!             turnover_ceiling: dec!(77700),
//!         })
//!         .collect(),
//! };
//! let income_tax = BracketTable::new(vec![
//!     TaxBracket::bounded(dec!(10777), dec!(0)),
//!     TaxBracket::bounded(dec!(27478), dec!(0.11)),
//!     TaxBracket::bounded(dec!(78570), dec!(0.30)),
//!     TaxBracket::bounded(dec!(168994), dec!(0.41)),
//!     TaxBracket::unbounded(dec!(0.45)),
//! ])
//! .unwrap();
//! let corporate_tax = BracketTable::new(vec![
//!     TaxBracket::bounded(dec!(42500), dec!(0.15)),
//!     TaxBracket::unbounded(dec!(0.25)),
//! ])
//! .unwrap();
//! let statuses = StatusTable::new(vec![LegalStatusMeta {
//!     id: "EI".to_string(),
//!     name: "Entreprise individuelle".to_string(),
//!     tax_regime: TaxRegime::Transparent,
//!     micro_activity: None,
//!     can_pay_salary: false,
//!     can_pay_dividends: false,
//!     dividends_subject_to_contributions: false,
//!     director_regime: DirectorRegime::SelfEmployed,
//!     unemployment_benefit_compatible: true,
//!     capital_raising_friction: CapitalRaisingFriction::High,
//!     min_associates: 1,
//! }])
//! .unwrap();
//! let reference =
//!     ReferenceData::new(2024, parameters, income_tax, corporate_tax, statuses).unwrap();
//!
//! let simulator = StatusSimulator::new(&reference);
//! let profile = SimulationProfile::new(dec!(100000), dec!(0), dec!(1));
//! let result = simulator.simulate(&profile.for_status("EI")).unwrap();
//!
//! assert_eq!(result.social_contributions, dec!(30000));
//! // 100000 - 30000 + 2900 of non-deductible surtax
//! assert_eq!(result.taxable_income, dec!(72900));
//! assert_eq!(result.income_tax, dec!(15463.71));
//! assert_eq!(result.net_income, dec!(54536.29));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::is_unit_rate;
use crate::calculations::contributions::{ContributionCalculator, compute_contributions};
use crate::error::{ConfigurationError, SimulationError};
use crate::models::{
    LegalStatusMeta, PayoutBreakdown, ReferenceData, SimulationInput, SimulationProfile,
    SimulationResult, TaxRegime,
};

/// Levies on a dividend distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DividendLevies {
    withholding: Decimal,
    contributions: Decimal,
}

impl DividendLevies {
    const NONE: Self = Self {
        withholding: Decimal::ZERO,
        contributions: Decimal::ZERO,
    };
}

/// Simulates one legal status against one year's reference data.
#[derive(Debug, Clone, Copy)]
pub struct StatusSimulator<'a> {
    reference: &'a ReferenceData,
}

impl<'a> StatusSimulator<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    /// Runs the simulation for `input.status_id`.
    ///
    /// Pure: the same input always produces the same result.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::Validation`] when a profile value is out of range
    /// - [`SimulationError::NotFound`] when the status id is unknown
    /// - [`SimulationError::Configuration`] when a micro status has no rates
    pub fn simulate(
        &self,
        input: &SimulationInput,
    ) -> Result<SimulationResult, SimulationError> {
        validate_profile(&input.profile)?;
        let status = self.reference.statuses.get(&input.status_id)?;

        debug!(
            status = %status.id,
            regime = status.tax_regime.as_str(),
            gross_revenue = %input.profile.gross_revenue,
            "simulating legal status"
        );

        match status.tax_regime {
            TaxRegime::Transparent => Ok(self.simulate_transparent(status, &input.profile)),
            TaxRegime::Micro => self.simulate_micro(status, &input.profile),
            TaxRegime::Opaque => Ok(self.simulate_opaque(status, &input.profile)),
        }
    }

    fn contributions(&self) -> ContributionCalculator<'a> {
        ContributionCalculator::new(&self.reference.parameters)
    }

    /// The whole operating profit is the owner's income.
    fn simulate_transparent(
        &self,
        status: &LegalStatusMeta,
        profile: &SimulationProfile,
    ) -> SimulationResult {
        let profit = profile.operating_profit();
        let base = self
            .contributions()
            .reintegrated_taxable_base(profit, status.director_regime);
        let income_tax = self
            .reference
            .income_tax_brackets
            .tax_with_parts(base.taxable, profile.household_parts);
        let salary_net = base.net();

        SimulationResult {
            status_id: status.id.clone(),
            social_contributions: base.contributions,
            taxable_income: base.taxable,
            income_tax,
            net_income: salary_net - income_tax,
            breakdown: PayoutBreakdown {
                salary_gross: profit,
                salary_net,
                dividends_gross: Decimal::ZERO,
                dividends_net: Decimal::ZERO,
                dividend_withholding: Decimal::ZERO,
                corporate_tax: None,
                retained_earnings: Decimal::ZERO,
            },
        }
    }

    /// Contributions on turnover, income tax after the flat allowance. Real
    /// expenses still reduce what the owner keeps.
    fn simulate_micro(
        &self,
        status: &LegalStatusMeta,
        profile: &SimulationProfile,
    ) -> Result<SimulationResult, SimulationError> {
        let activity = status
            .micro_activity
            .ok_or_else(|| ConfigurationError::MissingMicroActivity(status.id.clone()))?;
        let micro = self.reference.parameters.micro(activity)?;
        let turnover = profile.gross_revenue;

        if turnover > micro.turnover_ceiling {
            warn!(
                status = %status.id,
                turnover = %turnover,
                ceiling = %micro.turnover_ceiling,
                "turnover exceeds the micro-enterprise ceiling"
            );
        }

        let contribution_profile = self.contributions().micro_profile(activity)?;
        let contributions = compute_contributions(turnover, &contribution_profile);
        let taxable_income = turnover * (Decimal::ONE - micro.flat_allowance_rate);
        let income_tax = self
            .reference
            .income_tax_brackets
            .tax_with_parts(taxable_income, profile.household_parts);
        let profit = profile.operating_profit();
        let salary_net = profit - contributions;

        Ok(SimulationResult {
            status_id: status.id.clone(),
            social_contributions: contributions,
            taxable_income,
            income_tax,
            net_income: salary_net - income_tax,
            breakdown: PayoutBreakdown {
                salary_gross: profit,
                salary_net,
                dividends_gross: Decimal::ZERO,
                dividends_net: Decimal::ZERO,
                dividend_withholding: Decimal::ZERO,
                corporate_tax: None,
                retained_earnings: Decimal::ZERO,
            },
        })
    }

    /// Salary budget first, corporate tax on the rest, then dividends.
    fn simulate_opaque(
        &self,
        status: &LegalStatusMeta,
        profile: &SimulationProfile,
    ) -> SimulationResult {
        let profit = profile.operating_profit();

        let split = if status.can_pay_salary {
            profile.payout_split_ratio
        } else {
            if profile.payout_split_ratio > Decimal::ZERO {
                debug!(
                    status = %status.id,
                    "status cannot pay a salary; whole profit stays in the company"
                );
            }
            Decimal::ZERO
        };

        let salary_budget = profit * split;
        let salary = self
            .contributions()
            .reintegrated_taxable_base(salary_budget, status.director_regime);

        let pre_tax_profit = profit - salary_budget;
        let corporate_tax = self
            .reference
            .corporate_tax_brackets
            .tax_for(pre_tax_profit);
        let after_tax_profit = pre_tax_profit - corporate_tax;

        let (dividends_gross, retained_earnings) = if status.can_pay_dividends {
            (after_tax_profit, Decimal::ZERO)
        } else {
            (Decimal::ZERO, after_tax_profit)
        };
        let levies = self.dividend_levies(status, dividends_gross, profile.share_capital);
        let dividends_net = dividends_gross - levies.withholding - levies.contributions;

        let income_tax = self
            .reference
            .income_tax_brackets
            .tax_with_parts(salary.taxable, profile.household_parts);
        let salary_net = salary.net();

        SimulationResult {
            status_id: status.id.clone(),
            social_contributions: salary.contributions + levies.contributions,
            taxable_income: salary.taxable,
            income_tax,
            net_income: salary_net - income_tax + dividends_net,
            breakdown: PayoutBreakdown {
                salary_gross: salary_budget,
                salary_net,
                dividends_gross,
                dividends_net,
                dividend_withholding: levies.withholding,
                corporate_tax: Some(corporate_tax),
                retained_earnings,
            },
        }
    }

    /// Flat tax on the whole distribution, unless the status subjects
    /// dividends to contributions: then the part above
    /// `threshold_rate × share_capital` bears director contributions plus
    /// the income-tax share of the flat tax.
    fn dividend_levies(
        &self,
        status: &LegalStatusMeta,
        dividends_gross: Decimal,
        share_capital: Decimal,
    ) -> DividendLevies {
        if dividends_gross <= Decimal::ZERO {
            return DividendLevies::NONE;
        }
        let params = &self.reference.parameters;

        let profile = match self.contributions().profile_for(status.director_regime) {
            Some(profile) if status.dividends_subject_to_contributions => profile,
            _ => {
                return DividendLevies {
                    withholding: dividends_gross * params.dividend_flat_tax_rate,
                    contributions: Decimal::ZERO,
                };
            }
        };

        let threshold = share_capital * params.dividend_contribution_threshold_rate;
        let below_threshold = dividends_gross.min(threshold);
        let above_threshold = dividends_gross - below_threshold;

        DividendLevies {
            withholding: below_threshold * params.dividend_flat_tax_rate
                + above_threshold * params.dividend_income_tax_rate,
            contributions: compute_contributions(above_threshold, &profile),
        }
    }
}

fn validate_profile(profile: &SimulationProfile) -> Result<(), SimulationError> {
    if profile.gross_revenue < Decimal::ZERO {
        return Err(SimulationError::validation(
            "gross_revenue",
            format!("must not be negative, got {}", profile.gross_revenue),
        ));
    }
    if !is_unit_rate(profile.expenses_rate) {
        return Err(SimulationError::validation(
            "expenses_rate",
            format!("must be between 0 and 1, got {}", profile.expenses_rate),
        ));
    }
    if !is_unit_rate(profile.payout_split_ratio) {
        return Err(SimulationError::validation(
            "payout_split_ratio",
            format!("must be between 0 and 1, got {}", profile.payout_split_ratio),
        ));
    }
    if profile.share_capital < Decimal::ZERO {
        return Err(SimulationError::validation(
            "share_capital",
            format!("must not be negative, got {}", profile.share_capital),
        ));
    }
    if profile.household_parts < Decimal::ONE {
        return Err(SimulationError::validation(
            "household_parts",
            format!("must be at least 1, got {}", profile.household_parts),
        ));
    }
    Ok(())
}
