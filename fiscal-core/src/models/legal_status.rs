use std::fmt;

use serde::{Deserialize, Serialize};

use super::ContributionClass;

/// How the profit of a legal form reaches the tax administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxRegime {
    /// Profit is taxed directly in the owner's hands (impôt sur le revenu).
    #[serde(rename = "ir")]
    Transparent,
    /// The company pays corporate tax (impôt sur les sociétés) and then
    /// distributes salary and dividends.
    #[serde(rename = "is")]
    Opaque,
    /// Micro-entrepreneur regime: contributions on turnover and a regulated
    /// flat expense allowance.
    #[serde(rename = "micro")]
    Micro,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transparent => "ir",
            Self::Opaque => "is",
            Self::Micro => "micro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ir" => Some(Self::Transparent),
            "is" => Some(Self::Opaque),
            "micro" => Some(Self::Micro),
            _ => None,
        }
    }
}

/// Activity category of a micro-enterprise. Each one has its own
/// contribution rate, flat allowance and turnover ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicroActivity {
    /// Sale of goods (BIC vente).
    Sales,
    /// Commercial and craft services (BIC prestations).
    Services,
    /// Liberal professions (BNC).
    Liberal,
}

impl MicroActivity {
    pub const ALL: [MicroActivity; 3] = [Self::Sales, Self::Services, Self::Liberal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Services => "services",
            Self::Liberal => "liberal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sales" => Some(Self::Sales),
            "services" => Some(Self::Services),
            "liberal" => Some(Self::Liberal),
            _ => None,
        }
    }
}

impl fmt::Display for MicroActivity {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Social regime of the company director.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectorRegime {
    SelfEmployed,
    AssimilatedEmployee,
    /// No director social regime: payouts bear no contributions.
    None,
}

impl DirectorRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfEmployed => "self-employed",
            Self::AssimilatedEmployee => "assimilated-employee",
            Self::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "self-employed" | "tns" => Some(Self::SelfEmployed),
            "assimilated-employee" | "assimile" => Some(Self::AssimilatedEmployee),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Contribution classification matching this regime, if any.
    pub fn contribution_class(&self) -> Option<ContributionClass> {
        match self {
            Self::SelfEmployed => Some(ContributionClass::SelfEmployed),
            Self::AssimilatedEmployee => Some(ContributionClass::AssimilatedEmployee),
            Self::None => None,
        }
    }
}

/// How hard it is to bring in outside investors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapitalRaisingFriction {
    Low,
    Medium,
    High,
}

impl CapitalRaisingFriction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Static description of one legal form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalStatusMeta {
    /// Upper-case identifier such as `EURL` or `SASU`.
    pub id: String,
    pub name: String,
    pub tax_regime: TaxRegime,
    /// Only set for [`TaxRegime::Micro`] statuses.
    pub micro_activity: Option<MicroActivity>,
    pub can_pay_salary: bool,
    pub can_pay_dividends: bool,
    /// Dividends above a share-capital threshold bear social contributions
    /// (gérant majoritaire of an EURL/SARL/SELARL).
    pub dividends_subject_to_contributions: bool,
    pub director_regime: DirectorRegime,
    pub unemployment_benefit_compatible: bool,
    pub capital_raising_friction: CapitalRaisingFriction,
    pub min_associates: u32,
}
