use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Social-security classification of the person receiving a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionClass {
    /// Travailleur non salarié: independent worker regime.
    SelfEmployed,
    /// Assimilé salarié: general employee regime without unemployment cover.
    AssimilatedEmployee,
}

/// Flat contribution rate applied to a compensation figure.
///
/// Real French schedules are tiered and differ per regime; a single rate
/// per classification is a deliberate approximation and the figures produced
/// with it are estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionProfile {
    pub classification: ContributionClass,
    pub rate: Decimal,
}

impl ContributionProfile {
    pub fn self_employed(rate: Decimal) -> Self {
        Self {
            classification: ContributionClass::SelfEmployed,
            rate,
        }
    }

    pub fn assimilated_employee(rate: Decimal) -> Self {
        Self {
            classification: ContributionClass::AssimilatedEmployee,
            rate,
        }
    }

    pub fn is_self_employed(&self) -> bool {
        self.classification == ContributionClass::SelfEmployed
    }
}
