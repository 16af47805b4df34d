//! Social-contribution calculator.
//!
//! Contributions are a flat share of the compensation. French schedules are
//! really tiered and regime-specific; the flat model is kept because the
//! figures users compare against were produced with it.
//!
//! Part of the CSG/CRDS paid by self-employed directors is not deductible
//! from taxable income. It has to be added back after the contributions are
//! subtracted, otherwise income tax comes out too low.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fiscal_core::calculations::{compute_contributions, compute_non_deductible_surtax};
//! use fiscal_core::ContributionProfile;
//!
//! let profile = ContributionProfile::self_employed(dec!(0.30));
//!
//! let contributions = compute_contributions(dec!(100000), &profile);
//! let surtax = compute_non_deductible_surtax(dec!(100000), dec!(0.029));
//!
//! assert_eq!(contributions, dec!(30000));
//! assert_eq!(surtax, dec!(2900));
//! assert_eq!(dec!(100000) - contributions + surtax, dec!(72900));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::{
    ContributionClass, ContributionProfile, DirectorRegime, FiscalParameters, MicroActivity,
};

/// Contributions owed on `compensation`: `compensation × rate`.
///
/// A compensation of zero or less owes nothing.
pub fn compute_contributions(
    compensation: Decimal,
    profile: &ContributionProfile,
) -> Decimal {
    if compensation <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    compensation * profile.rate
}

/// Non-deductible share of the CSG/CRDS on `compensation`.
pub fn compute_non_deductible_surtax(
    compensation: Decimal,
    surtax_rate: Decimal,
) -> Decimal {
    if compensation <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    compensation * surtax_rate
}

/// Contributions and resulting income-tax base of one compensation figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableBase {
    pub compensation: Decimal,
    pub contributions: Decimal,
    /// Non-deductible surtax added back; zero outside the self-employed
    /// regime.
    pub surtax: Decimal,
    /// `compensation - contributions + surtax`.
    pub taxable: Decimal,
}

impl TaxableBase {
    /// Compensation left after contributions.
    pub fn net(&self) -> Decimal {
        self.compensation - self.contributions
    }
}

/// Contribution calculator bound to one year's [`FiscalParameters`].
#[derive(Debug, Clone, Copy)]
pub struct ContributionCalculator<'a> {
    parameters: &'a FiscalParameters,
}

impl<'a> ContributionCalculator<'a> {
    pub fn new(parameters: &'a FiscalParameters) -> Self {
        Self { parameters }
    }

    /// Profile for a director regime; `None` when the regime carries no
    /// contributions.
    pub fn profile_for(
        &self,
        regime: DirectorRegime,
    ) -> Option<ContributionProfile> {
        regime.contribution_class().map(|class| match class {
            ContributionClass::SelfEmployed => {
                ContributionProfile::self_employed(self.parameters.self_employed_contribution_rate)
            }
            ContributionClass::AssimilatedEmployee => ContributionProfile::assimilated_employee(
                self.parameters.assimilated_employee_contribution_rate,
            ),
        })
    }

    /// Profile of a micro-entrepreneur, whose contributions are a share of
    /// turnover.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingMicroParameters`] when the year
    /// has no rates for `activity`.
    pub fn micro_profile(
        &self,
        activity: MicroActivity,
    ) -> Result<ContributionProfile, ConfigurationError> {
        let micro = self.parameters.micro(activity)?;
        Ok(ContributionProfile::self_employed(micro.contribution_rate))
    }

    /// Contributions owed by a director of `regime` on `compensation`.
    pub fn contributions(
        &self,
        compensation: Decimal,
        regime: DirectorRegime,
    ) -> Decimal {
        self.profile_for(regime)
            .map_or(Decimal::ZERO, |profile| {
                compute_contributions(compensation, &profile)
            })
    }

    /// Non-deductible surtax on `compensation` at this year's rate.
    pub fn non_deductible_surtax(
        &self,
        compensation: Decimal,
    ) -> Decimal {
        compute_non_deductible_surtax(compensation, self.parameters.non_deductible_surtax_rate)
    }

    /// Income-tax base of `compensation` once contributions are removed and,
    /// for self-employed directors, the non-deductible surtax is added back.
    pub fn reintegrated_taxable_base(
        &self,
        compensation: Decimal,
        regime: DirectorRegime,
    ) -> TaxableBase {
        let contributions = self.contributions(compensation, regime);
        let surtax = match regime {
            DirectorRegime::SelfEmployed => self.non_deductible_surtax(compensation),
            DirectorRegime::AssimilatedEmployee | DirectorRegime::None => Decimal::ZERO,
        };

        TaxableBase {
            compensation,
            contributions,
            surtax,
            taxable: compensation - contributions + surtax,
        }
    }
}
