use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business profile shared by every status of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationProfile {
    /// Turnover (chiffre d'affaires) before any expense.
    pub gross_revenue: Decimal,

    /// Share of the turnover consumed by operating expenses, in `[0, 1]`.
    pub expenses_rate: Decimal,

    /// Share of the distributable profit paid as salary, in `[0, 1]`.
    /// The rest goes to dividends. Ignored by statuses that cannot pay both.
    pub payout_split_ratio: Decimal,

    /// Paid-up share capital, used by the dividend contribution threshold.
    #[serde(default)]
    pub share_capital: Decimal,

    /// Number of family-quotient parts of the tax household.
    #[serde(default = "default_household_parts")]
    pub household_parts: Decimal,
}

fn default_household_parts() -> Decimal {
    Decimal::ONE
}

impl SimulationProfile {
    /// Profile with no share capital and a single household part.
    pub fn new(
        gross_revenue: Decimal,
        expenses_rate: Decimal,
        payout_split_ratio: Decimal,
    ) -> Self {
        Self {
            gross_revenue,
            expenses_rate,
            payout_split_ratio,
            share_capital: Decimal::ZERO,
            household_parts: Decimal::ONE,
        }
    }

    pub fn with_share_capital(
        mut self,
        share_capital: Decimal,
    ) -> Self {
        self.share_capital = share_capital;
        self
    }

    pub fn with_household_parts(
        mut self,
        household_parts: Decimal,
    ) -> Self {
        self.household_parts = household_parts;
        self
    }

    /// Binds this profile to one legal status.
    pub fn for_status(
        &self,
        status_id: impl Into<String>,
    ) -> SimulationInput {
        SimulationInput {
            status_id: status_id.into(),
            profile: self.clone(),
        }
    }

    /// Profit before any payout: turnover minus operating expenses.
    pub fn operating_profit(&self) -> Decimal {
        self.gross_revenue * (Decimal::ONE - self.expenses_rate)
    }
}

/// One simulation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub status_id: String,
    #[serde(flatten)]
    pub profile: SimulationProfile,
}

/// How the profit was paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutBreakdown {
    /// Compensation before contributions (salary budget or TNS draw).
    pub salary_gross: Decimal,
    /// Compensation after contributions, before income tax.
    pub salary_net: Decimal,
    pub dividends_gross: Decimal,
    /// Dividends after flat tax and dividend contributions.
    pub dividends_net: Decimal,
    /// Flat tax withheld on dividends.
    pub dividend_withholding: Decimal,
    /// Only set for corporate-tax statuses.
    pub corporate_tax: Option<Decimal>,
    /// After-tax profit left in the company.
    pub retained_earnings: Decimal,
}

/// Outcome of one simulation. Amounts are unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub status_id: String,
    /// Contributions on salary plus contributions on dividends.
    pub social_contributions: Decimal,
    /// Base of the progressive income tax.
    pub taxable_income: Decimal,
    /// Progressive income tax; the dividend flat tax is in the breakdown.
    pub income_tax: Decimal,
    /// What the owner keeps.
    pub net_income: Decimal,
    pub breakdown: PayoutBreakdown,
}

/// Results of a comparison plus the ids that were not recognised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub results: Vec<SimulationResult>,
    pub skipped: Vec<String>,
}

impl ComparisonReport {
    /// Result with the highest net income. Ties keep the first one.
    pub fn best_by_net_income(&self) -> Option<&SimulationResult> {
        self.results.iter().reduce(|best, candidate| {
            if candidate.net_income > best.net_income {
                candidate
            } else {
                best
            }
        })
    }

    /// Results sorted by decreasing net income, for display.
    pub fn ranked(&self) -> Vec<&SimulationResult> {
        let mut ranked: Vec<_> = self.results.iter().collect();
        ranked.sort_by(|a, b| b.net_income.cmp(&a.net_income));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn result(
        id: &str,
        net_income: Decimal,
    ) -> SimulationResult {
        SimulationResult {
            status_id: id.to_string(),
            social_contributions: Decimal::ZERO,
            taxable_income: Decimal::ZERO,
            income_tax: Decimal::ZERO,
            net_income,
            breakdown: PayoutBreakdown {
                salary_gross: Decimal::ZERO,
                salary_net: Decimal::ZERO,
                dividends_gross: Decimal::ZERO,
                dividends_net: Decimal::ZERO,
                dividend_withholding: Decimal::ZERO,
                corporate_tax: None,
                retained_earnings: Decimal::ZERO,
            },
        }
    }

    #[test]
    fn operating_profit_deducts_expenses() {
        let profile = SimulationProfile::new(dec!(100000), dec!(0.25), dec!(0.5));

        assert_eq!(profile.operating_profit(), dec!(75000));
    }

    #[test]
    fn for_status_keeps_profile() {
        let profile = SimulationProfile::new(dec!(50000), dec!(0), dec!(1))
            .with_share_capital(dec!(1000))
            .with_household_parts(dec!(2));

        let input = profile.for_status("SASU");

        assert_eq!(input.status_id, "SASU");
        assert_eq!(input.profile, profile);
    }

    #[test]
    fn best_by_net_income_picks_highest() {
        let report = ComparisonReport {
            results: vec![
                result("EI", dec!(40000)),
                result("SASU", dec!(45000)),
                result("EURL", dec!(43000)),
            ],
            skipped: vec![],
        };

        assert_eq!(report.best_by_net_income().unwrap().status_id, "SASU");
    }

    #[test]
    fn best_by_net_income_keeps_first_on_tie() {
        let report = ComparisonReport {
            results: vec![result("EI", dec!(40000)), result("EURL", dec!(40000))],
            skipped: vec![],
        };

        assert_eq!(report.best_by_net_income().unwrap().status_id, "EI");
    }

    #[test]
    fn best_by_net_income_empty_report() {
        assert!(ComparisonReport::default().best_by_net_income().is_none());
    }

    #[test]
    fn ranked_sorts_descending_without_touching_results() {
        let report = ComparisonReport {
            results: vec![
                result("EI", dec!(40000)),
                result("SASU", dec!(45000)),
                result("EURL", dec!(43000)),
            ],
            skipped: vec![],
        };

        let ids: Vec<_> = report
            .ranked()
            .iter()
            .map(|r| r.status_id.as_str())
            .collect();

        assert_eq!(ids, vec!["SASU", "EURL", "EI"]);
        assert_eq!(report.results[0].status_id, "EI");
    }
}
