//end-to-end regression tests over a small locked fixture
use approx::assert_relative_eq;
use chrono::NaiveDate;
use pozole::prelude::*;
use std::io::Write;

const FIXTURE_CLOSES: [f64; 11] = [
    100.0, 102.0, 101.0, 105.0, 108.0, 104.0, 95.0, 90.0, 88.0, 92.0, 97.0,
];

fn fixture_series() -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let points = FIXTURE_CLOSES
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(start + chrono::Days::new(i as u64), close))
        .collect();
    PriceSeries::new(points).unwrap()
}

fn fixture_result() -> BacktestResult {
    let engine = BacktestEngine::new(
        fixture_series(),
        MacdParams::default(),
        RsiParams::default(),
        TrendParams::default(),
    );
    engine.run().unwrap()
}

#[test]
fn fixture_first_buy_is_the_bar_one_crossover() {
    let result = fixture_result();

    //rsi(14) never warms up over 11 bars, so signals are crossover-only
    assert!(result.rsi.iter().all(|v| v.is_none()));

    let first_buy = result.signals.buy.iter().position(|&b| b);
    assert_eq!(first_buy, Some(1));
}

#[test]
fn fixture_sells_on_the_bar_six_downward_crossover() {
    let result = fixture_result();

    let first_sell = result.signals.sell.iter().position(|&s| s);
    assert_eq!(first_sell, Some(6));
}

#[test]
fn fixture_position_history_is_locked() {
    use PositionState::*;

    let result = fixture_result();
    let expected = vec![Flat, Long, Long, Long, Long, Long, Flat, Flat, Flat, Flat, Flat];

    assert_eq!(result.positions, expected);
    assert!(result.positions.last().unwrap().is_flat());
}

#[test]
fn fixture_equity_telescopes_over_the_long_block() {
    let result = fixture_result();

    //long over bars 1..=5 earns the returns of bars 2..=6, whose product
    //telescopes to close[6]/close[1]
    let final_equity = result.strategy_equity.last().unwrap().unwrap();
    assert_relative_eq!(final_equity, 95.0 / 102.0, epsilon = 1e-12);
    assert_relative_eq!(
        result.summary.cumulative_return,
        95.0 / 102.0 - 1.0,
        epsilon = 1e-12
    );

    let final_buy_hold = result.buy_hold_equity.last().unwrap().unwrap();
    assert_relative_eq!(final_buy_hold, 97.0 / 100.0, epsilon = 1e-12);
}

#[test]
fn fixture_is_too_short_for_the_optimizer() {
    //11 bars yield 10 return observations, below the eligibility cutoff
    let engine = BacktestEngine::new(
        fixture_series(),
        MacdParams::default(),
        RsiParams::default(),
        TrendParams::default(),
    );
    let result = engine.run().unwrap();

    assert!(matches!(
        engine.optimize(&result, &OptimizationGrid::default()),
        Err(OptimizeError::NoEligibleCandidate)
    ));
}

#[test]
fn csv_to_result_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "date,close").unwrap();
    for (i, close) in FIXTURE_CLOSES.iter().enumerate() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
        writeln!(file, "{},{}", date, close).unwrap();
    }

    let series = load_csv(file.path()).unwrap();
    assert_eq!(series, fixture_series());

    let engine = BacktestEngine::new(
        series,
        MacdParams::default(),
        RsiParams::default(),
        TrendParams::default(),
    );
    let result = engine.run().unwrap();

    let final_equity = result.strategy_equity.last().unwrap().unwrap();
    assert_relative_eq!(final_equity, 95.0 / 102.0, epsilon = 1e-12);
}
