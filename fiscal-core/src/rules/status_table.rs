//! Legal-status rule table.
//!
//! The table is built once from static rows and only read afterwards.
//! Besides lookups it answers the compatibility questions a business owner
//! asks before comparing figures: can I pay myself dividends, can I keep my
//! unemployment benefits, how easily can I bring in investors.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, StatusNotFound};
use crate::models::{CapitalRaisingFriction, DirectorRegime, LegalStatusMeta, TaxRegime};

/// Filter applied by [`StatusTable::filter`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCriteria {
    pub requires_salary: bool,
    pub requires_dividends: bool,
    pub requires_unemployment_compatibility: bool,
    pub max_capital_raising_friction: Option<CapitalRaisingFriction>,
    pub director_regime: Option<DirectorRegime>,
    pub tax_regime: Option<TaxRegime>,
}

impl StatusCriteria {
    pub fn matches(
        &self,
        status: &LegalStatusMeta,
    ) -> bool {
        (!self.requires_salary || status.can_pay_salary)
            && (!self.requires_dividends || status.can_pay_dividends)
            && (!self.requires_unemployment_compatibility
                || status.unemployment_benefit_compatible)
            && self
                .max_capital_raising_friction
                .is_none_or(|max| status.capital_raising_friction <= max)
            && self
                .director_regime
                .is_none_or(|regime| status.director_regime == regime)
            && self
                .tax_regime
                .is_none_or(|regime| status.tax_regime == regime)
    }
}

/// Validated, read-only collection of [`LegalStatusMeta`] rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LegalStatusMeta>", into = "Vec<LegalStatusMeta>")]
pub struct StatusTable {
    statuses: Vec<LegalStatusMeta>,
}

impl StatusTable {
    /// Builds the table, keeping row order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when an id appears twice (ids are
    /// compared case-insensitively), when a micro status has no activity
    /// category, or when a non-micro status declares one.
    pub fn new(statuses: Vec<LegalStatusMeta>) -> Result<Self, ConfigurationError> {
        for (index, status) in statuses.iter().enumerate() {
            if statuses[..index]
                .iter()
                .any(|other| other.id.eq_ignore_ascii_case(&status.id))
            {
                return Err(ConfigurationError::DuplicateStatus(status.id.clone()));
            }
            match (status.tax_regime, status.micro_activity) {
                (TaxRegime::Micro, None) => {
                    return Err(ConfigurationError::MissingMicroActivity(
                        status.id.clone(),
                    ));
                }
                (TaxRegime::Transparent | TaxRegime::Opaque, Some(_)) => {
                    return Err(ConfigurationError::UnexpectedMicroActivity(
                        status.id.clone(),
                    ));
                }
                _ => {}
            }
        }
        Ok(Self { statuses })
    }

    /// Looks up a status by id, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`StatusNotFound`] when no row carries this id.
    pub fn get(
        &self,
        status_id: &str,
    ) -> Result<&LegalStatusMeta, StatusNotFound> {
        let wanted = status_id.trim();
        self.statuses
            .iter()
            .find(|status| status.id.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StatusNotFound(status_id.to_string()))
    }

    pub fn contains(
        &self,
        status_id: &str,
    ) -> bool {
        self.get(status_id).is_ok()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.statuses.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LegalStatusMeta> {
        self.statuses.iter()
    }

    /// Statuses matching `criteria`, in table order.
    pub fn filter(
        &self,
        criteria: &StatusCriteria,
    ) -> Vec<&LegalStatusMeta> {
        self.statuses
            .iter()
            .filter(|status| criteria.matches(status))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl TryFrom<Vec<LegalStatusMeta>> for StatusTable {
    type Error = ConfigurationError;

    fn try_from(statuses: Vec<LegalStatusMeta>) -> Result<Self, Self::Error> {
        Self::new(statuses)
    }
}

impl From<StatusTable> for Vec<LegalStatusMeta> {
    fn from(table: StatusTable) -> Self {
        table.statuses
    }
}
