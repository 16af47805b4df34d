#![allow(dead_code)]

use rust_decimal_macros::dec;

use fiscal_core::{
    BracketTable, CapitalRaisingFriction, DirectorRegime, FiscalParameters, LegalStatusMeta,
    MicroActivity, MicroParameters, ReferenceData, StatusTable, TaxBracket, TaxRegime,
};

pub fn income_tax_brackets_2024() -> BracketTable {
    BracketTable::new(vec![
        TaxBracket::bounded(dec!(10777), dec!(0)),
        TaxBracket::bounded(dec!(27478), dec!(0.11)),
        TaxBracket::bounded(dec!(78570), dec!(0.30)),
        TaxBracket::bounded(dec!(168994), dec!(0.41)),
        TaxBracket::unbounded(dec!(0.45)),
    ])
    .unwrap()
}

fn micro(
    activity: MicroActivity,
    contribution_rate: rust_decimal::Decimal,
    flat_allowance_rate: rust_decimal::Decimal,
    turnover_ceiling: rust_decimal::Decimal,
) -> MicroParameters {
    MicroParameters {
        activity,
        contribution_rate,
        flat_allowance_rate,
        turnover_ceiling,
    }
}

fn company(
    id: &str,
    director_regime: DirectorRegime,
) -> LegalStatusMeta {
    LegalStatusMeta {
        id: id.to_string(),
        name: id.to_string(),
        tax_regime: TaxRegime::Opaque,
        micro_activity: None,
        can_pay_salary: true,
        can_pay_dividends: true,
        dividends_subject_to_contributions: director_regime == DirectorRegime::SelfEmployed,
        director_regime,
        unemployment_benefit_compatible: director_regime == DirectorRegime::AssimilatedEmployee,
        capital_raising_friction: CapitalRaisingFriction::Medium,
        min_associates: 1,
    }
}

pub fn reference_2024() -> ReferenceData {
    let parameters = FiscalParameters {
        fiscal_year: 2024,
        self_employed_contribution_rate: dec!(0.30),
        assimilated_employee_contribution_rate: dec!(0.45),
        non_deductible_surtax_rate: dec!(0.029),
        dividend_flat_tax_rate: dec!(0.30),
        dividend_income_tax_rate: dec!(0.128),
        dividend_contribution_threshold_rate: dec!(0.10),
        micro: vec![
            micro(MicroActivity::Sales, dec!(0.123), dec!(0.71), dec!(188700)),
            micro(MicroActivity::Services, dec!(0.212), dec!(0.50), dec!(77700)),
            micro(MicroActivity::Liberal, dec!(0.211), dec!(0.34), dec!(77700)),
        ],
    };
    let corporate = BracketTable::new(vec![
        TaxBracket::bounded(dec!(42500), dec!(0.15)),
        TaxBracket::unbounded(dec!(0.25)),
    ])
    .unwrap();

    let ei = LegalStatusMeta {
        tax_regime: TaxRegime::Transparent,
        can_pay_salary: false,
        can_pay_dividends: false,
        dividends_subject_to_contributions: false,
        unemployment_benefit_compatible: true,
        capital_raising_friction: CapitalRaisingFriction::High,
        ..company("EI", DirectorRegime::SelfEmployed)
    };
    let micro_sales = LegalStatusMeta {
        tax_regime: TaxRegime::Micro,
        micro_activity: Some(MicroActivity::Sales),
        ..ei.clone()
    };
    let micro_sales = LegalStatusMeta {
        id: "MICRO_SALES".to_string(),
        name: "MICRO_SALES".to_string(),
        ..micro_sales
    };
    let statuses = StatusTable::new(vec![
        micro_sales,
        ei,
        company("EURL", DirectorRegime::SelfEmployed),
        company("SASU", DirectorRegime::AssimilatedEmployee),
    ])
    .unwrap();

    ReferenceData::new(2024, parameters, income_tax_brackets_2024(), corporate, statuses).unwrap()
}
