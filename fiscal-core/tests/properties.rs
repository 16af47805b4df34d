mod common;

use proptest::prelude::*;
use rust_decimal::Decimal;

use fiscal_core::calculations::compute_progressive_tax;
use fiscal_core::{SimulationProfile, StatusSimulator};

fn euros(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn ratio(percent: u32) -> Decimal {
    Decimal::new(i64::from(percent), 2)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(128))]

    #[test]
    fn no_tax_inside_zero_band(cents in 0i64..=1_077_700) {
        let brackets = common::income_tax_brackets_2024();

        let tax = compute_progressive_tax(euros(cents), brackets.brackets()).unwrap();

        prop_assert_eq!(tax, Decimal::ZERO);
    }

    #[test]
    fn tax_is_monotonic(low in 0i64..50_000_000, delta in 0i64..50_000_000) {
        let brackets = common::income_tax_brackets_2024();

        let lower = compute_progressive_tax(euros(low), brackets.brackets()).unwrap();
        let higher = compute_progressive_tax(euros(low + delta), brackets.brackets()).unwrap();

        prop_assert!(lower <= higher, "tax({}) = {} > tax({}) = {}", low, lower, low + delta, higher);
    }

    #[test]
    fn tax_never_exceeds_top_rate(cents in 0i64..100_000_000) {
        let brackets = common::income_tax_brackets_2024();
        let amount = euros(cents);

        let tax = compute_progressive_tax(amount, brackets.brackets()).unwrap();

        prop_assert!(tax <= amount * Decimal::new(45, 2));
    }

    #[test]
    fn simulate_is_idempotent(
        revenue in 0i64..50_000_000,
        expenses in 0u32..=100,
        split in 0u32..=100,
        capital in 0i64..10_000_000,
        status in prop::sample::select(vec!["MICRO_SALES", "EI", "EURL", "SASU"]),
    ) {
        let reference = common::reference_2024();
        let simulator = StatusSimulator::new(&reference);
        let input = SimulationProfile::new(euros(revenue), ratio(expenses), ratio(split))
            .with_share_capital(euros(capital))
            .for_status(status);

        let first = simulator.simulate(&input).unwrap();
        let second = simulator.simulate(&input).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn net_income_never_exceeds_profit(
        revenue in 0i64..50_000_000,
        expenses in 0u32..=100,
        split in 0u32..=100,
        status in prop::sample::select(vec!["EI", "EURL", "SASU"]),
    ) {
        let reference = common::reference_2024();
        let simulator = StatusSimulator::new(&reference);
        let profile = SimulationProfile::new(euros(revenue), ratio(expenses), ratio(split));

        let result = simulator.simulate(&profile.for_status(status)).unwrap();

        prop_assert!(result.net_income <= profile.operating_profit());
        prop_assert!(result.net_income >= Decimal::ZERO);
    }
}

#[test]
fn boundary_sums_match_direct_computation() {
    let brackets = common::income_tax_brackets_2024();
    let mut lower = Decimal::ZERO;
    let mut cumulative = Decimal::ZERO;

    for bracket in brackets.brackets() {
        let Some(upper) = bracket.upper_bound else {
            break;
        };
        cumulative += (upper - lower) * bracket.rate;
        lower = upper;

        assert_eq!(
            compute_progressive_tax(upper, brackets.brackets()).unwrap(),
            cumulative,
            "at boundary {upper}"
        );
    }
}
