//! Fixtures shared by the unit tests.

use rust_decimal_macros::dec;

use crate::models::{
    BracketTable, CapitalRaisingFriction, DirectorRegime, FiscalParameters, LegalStatusMeta,
    MicroActivity, MicroParameters, ReferenceData, TaxBracket, TaxRegime,
};
use crate::rules::StatusTable;

/// Barème 2024 (income of 2023).
pub(crate) fn income_tax_brackets_2024() -> BracketTable {
    BracketTable::new(vec![
        TaxBracket::bounded(dec!(10777), dec!(0)),
        TaxBracket::bounded(dec!(27478), dec!(0.11)),
        TaxBracket::bounded(dec!(78570), dec!(0.30)),
        TaxBracket::bounded(dec!(168994), dec!(0.41)),
        TaxBracket::unbounded(dec!(0.45)),
    ])
    .unwrap()
}

pub(crate) fn corporate_tax_brackets() -> BracketTable {
    BracketTable::new(vec![
        TaxBracket::bounded(dec!(42500), dec!(0.15)),
        TaxBracket::unbounded(dec!(0.25)),
    ])
    .unwrap()
}

pub(crate) fn parameters_2024() -> FiscalParameters {
    FiscalParameters {
        fiscal_year: 2024,
        self_employed_contribution_rate: dec!(0.30),
        assimilated_employee_contribution_rate: dec!(0.45),
        non_deductible_surtax_rate: dec!(0.029),
        dividend_flat_tax_rate: dec!(0.30),
        dividend_income_tax_rate: dec!(0.128),
        dividend_contribution_threshold_rate: dec!(0.10),
        micro: vec![
            MicroParameters {
                activity: MicroActivity::Sales,
                contribution_rate: dec!(0.123),
                flat_allowance_rate: dec!(0.71),
                turnover_ceiling: dec!(188700),
            },
            MicroParameters {
                activity: MicroActivity::Services,
                contribution_rate: dec!(0.212),
                flat_allowance_rate: dec!(0.50),
                turnover_ceiling: dec!(77700),
            },
            MicroParameters {
                activity: MicroActivity::Liberal,
                contribution_rate: dec!(0.211),
                flat_allowance_rate: dec!(0.34),
                turnover_ceiling: dec!(77700),
            },
        ],
    }
}

/// A status with every capability switched off.
pub(crate) fn status(
    id: &str,
    tax_regime: TaxRegime,
    director_regime: DirectorRegime,
) -> LegalStatusMeta {
    LegalStatusMeta {
        id: id.to_string(),
        name: id.to_string(),
        tax_regime,
        micro_activity: None,
        can_pay_salary: false,
        can_pay_dividends: false,
        dividends_subject_to_contributions: false,
        director_regime,
        unemployment_benefit_compatible: false,
        capital_raising_friction: CapitalRaisingFriction::High,
        min_associates: 1,
    }
}

pub(crate) fn status_table() -> StatusTable {
    let mut micro = status(
        "MICRO_SERVICES",
        TaxRegime::Micro,
        DirectorRegime::SelfEmployed,
    );
    micro.micro_activity = Some(MicroActivity::Services);
    micro.unemployment_benefit_compatible = true;

    let mut ei = status("EI", TaxRegime::Transparent, DirectorRegime::SelfEmployed);
    ei.unemployment_benefit_compatible = true;

    let mut eurl = status("EURL", TaxRegime::Opaque, DirectorRegime::SelfEmployed);
    eurl.can_pay_salary = true;
    eurl.can_pay_dividends = true;
    eurl.dividends_subject_to_contributions = true;
    eurl.capital_raising_friction = CapitalRaisingFriction::Medium;

    let mut sasu = status("SASU", TaxRegime::Opaque, DirectorRegime::AssimilatedEmployee);
    sasu.can_pay_salary = true;
    sasu.can_pay_dividends = true;
    sasu.unemployment_benefit_compatible = true;
    sasu.capital_raising_friction = CapitalRaisingFriction::Low;

    let sci = status("SCI", TaxRegime::Transparent, DirectorRegime::None);

    StatusTable::new(vec![micro, ei, eurl, sasu, sci]).unwrap()
}

pub(crate) fn reference_2024() -> ReferenceData {
    ReferenceData::new(
        2024,
        parameters_2024(),
        income_tax_brackets_2024(),
        corporate_tax_brackets(),
        status_table(),
    )
    .unwrap()
}

