use crate::config::{MacdParams, RsiParams, TrendParams};
use crate::data::PriceSeries;
use crate::engine::position::{simulate_positions, PositionState};
use crate::indicator::{macd, moving_average, rsi, MacdSeries};
use crate::metrics::summary::{MetricsError, SummaryMetrics};
use crate::metrics::timeseries::{buy_hold_equity, daily_returns, equity_curve, strategy_returns};
use crate::optimize::{search, OptimizationGrid, OptimizationResult, OptimizeError};
use crate::signal::{generate_signals, SignalSeries, SignalThresholds};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

//full per-bar output of a backtest plus the summary metrics
//every series is aligned 1:1 with the input price series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    pub ma_fast: Vec<Option<f64>>,
    pub ma_slow: Vec<Option<f64>>,
    pub macd: MacdSeries,
    pub rsi: Vec<Option<f64>>,
    pub signals: SignalSeries,
    pub positions: Vec<PositionState>,
    pub daily_returns: Vec<Option<f64>>,
    pub strategy_returns: Vec<Option<f64>>,
    pub strategy_equity: Vec<Option<f64>>,
    pub buy_hold_equity: Vec<Option<f64>>,
    pub summary: SummaryMetrics,
    //filled in by a successful parameter search
    pub optimization: Option<OptimizationResult>,
}

//runs the strategy pipeline over a validated price series:
//indicators, signals, position simulation, returns and summary metrics
pub struct BacktestEngine {
    series: PriceSeries,
    macd_params: MacdParams,
    rsi_params: RsiParams,
    trend_params: TrendParams,
}

impl BacktestEngine {
    pub fn new(
        series: PriceSeries,
        macd_params: MacdParams,
        rsi_params: RsiParams,
        trend_params: TrendParams,
    ) -> Self {
        BacktestEngine {
            series,
            macd_params,
            rsi_params,
            trend_params,
        }
    }

    //runs the full pipeline and assembles the results object
    pub fn run(&self) -> Result<BacktestResult, MetricsError> {
        let closes = self.series.closes();

        //indicators
        let ma_fast = moving_average(&closes, self.trend_params.fast_window);
        let ma_slow = moving_average(&closes, self.trend_params.slow_window);
        let macd_series = macd(
            &closes,
            self.macd_params.fast,
            self.macd_params.slow,
            self.macd_params.signal_span,
        );
        let rsi_series = rsi(&closes, self.rsi_params.window);

        //signals and positions
        let signals = generate_signals(
            &macd_series.macd_line,
            &macd_series.signal_line,
            &rsi_series,
            SignalThresholds::new(self.rsi_params.oversold, self.rsi_params.overbought),
        );
        let positions = simulate_positions(&signals);

        //returns and equity
        let daily = daily_returns(&closes);
        let strategy = strategy_returns(&daily, &positions);
        let strategy_equity = equity_curve(&strategy);
        let buy_hold = buy_hold_equity(&daily);

        let summary = SummaryMetrics::from_backtest(&strategy, &strategy_equity, &buy_hold)?;

        Ok(BacktestResult {
            dates: self.series.dates(),
            closes,
            ma_fast,
            ma_slow,
            macd: macd_series,
            rsi: rsi_series,
            signals,
            positions,
            daily_returns: daily,
            strategy_returns: strategy,
            strategy_equity,
            buy_hold_equity: buy_hold,
            summary,
            optimization: None,
        })
    }

    //grid-searches rsi parameters, reusing the run's macd lines and daily returns
    pub fn optimize(
        &self,
        result: &BacktestResult,
        grid: &OptimizationGrid,
    ) -> Result<OptimizationResult, OptimizeError> {
        search(&result.closes, &result.macd, &result.daily_returns, grid)
    }
}
