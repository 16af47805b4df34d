mod common;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fiscal_core::calculations::common::round_to_euro;
use fiscal_core::calculations::{
    compute_contributions, compute_non_deductible_surtax, compute_progressive_tax,
};
use fiscal_core::{
    Comparator, ContributionProfile, SimulationError, SimulationProfile, StatusNotFound,
    StatusSimulator,
};

#[test]
fn income_tax_inside_second_band() {
    let brackets = common::income_tax_brackets_2024();

    let tax = compute_progressive_tax(dec!(20000), brackets.brackets()).unwrap();

    assert_eq!(tax, dec!(1014.53));
}

#[test]
fn income_tax_below_first_ceiling() {
    let brackets = common::income_tax_brackets_2024();

    let tax = compute_progressive_tax(dec!(10000), brackets.brackets()).unwrap();

    assert_eq!(tax, Decimal::ZERO);
}

#[test]
fn self_employed_reintegrated_base() {
    let profile = ContributionProfile::self_employed(dec!(0.30));

    let contributions = compute_contributions(dec!(100000), &profile);
    let surtax = compute_non_deductible_surtax(dec!(100000), dec!(0.029));

    assert_eq!(contributions, dec!(30000));
    assert_eq!(surtax, dec!(2900));
    assert_eq!((dec!(100000) - contributions) + surtax, dec!(72900));
}

#[test]
fn comparison_skips_unknown_status() {
    let reference = common::reference_2024();
    let comparator = Comparator::new(&reference);
    let profile = SimulationProfile::new(dec!(80000), dec!(0.2), dec!(0.6));

    let report = comparator
        .compare(&profile, &["UNKNOWN_STATUS", "EURL"])
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].status_id, "EURL");
    assert_eq!(report.skipped, vec!["UNKNOWN_STATUS"]);
}

#[test]
fn single_simulation_of_unknown_status_fails() {
    let reference = common::reference_2024();
    let simulator = StatusSimulator::new(&reference);
    let profile = SimulationProfile::new(dec!(80000), dec!(0.2), dec!(0.6));

    assert_eq!(
        simulator.simulate(&profile.for_status("UNKNOWN_STATUS")),
        Err(SimulationError::NotFound(StatusNotFound(
            "UNKNOWN_STATUS".to_string()
        )))
    );
}

#[test]
fn micro_sales_uses_its_own_rates() {
    let reference = common::reference_2024();
    let simulator = StatusSimulator::new(&reference);
    let profile = SimulationProfile::new(dec!(100000), dec!(0.6), Decimal::ZERO);

    let result = simulator.simulate(&profile.for_status("micro_sales")).unwrap();

    assert_eq!(result.status_id, "MICRO_SALES");
    assert_eq!(result.social_contributions, dec!(12300));
    assert_eq!(result.taxable_income, dec!(29000));
    // 1837.11 + 1522 × 0.30
    assert_eq!(result.income_tax, dec!(2293.71));
    // 40000 of profit, less contributions and income tax
    assert_eq!(round_to_euro(result.net_income), dec!(25406));
}

#[test]
fn whole_table_comparison_reports_every_status() {
    let reference = common::reference_2024();
    let comparator = Comparator::new(&reference);
    let profile = SimulationProfile::new(dec!(150000), dec!(0.3), dec!(0.4))
        .with_share_capital(dec!(20000))
        .with_household_parts(dec!(2.5));

    let report = comparator.compare_all(&profile).unwrap();

    let ids: Vec<_> = report.results.iter().map(|r| r.status_id.as_str()).collect();
    assert_eq!(ids, vec!["MICRO_SALES", "EI", "EURL", "SASU"]);
    assert!(report.skipped.is_empty());
    for result in &report.results {
        assert!(result.net_income > Decimal::ZERO, "{}", result.status_id);
        assert!(result.net_income < dec!(150000), "{}", result.status_id);
    }
}
