//a Rust-based rule-driven strategy backtester for daily price data

pub mod config;
pub mod data;
pub mod engine;
pub mod indicator;
pub mod metrics;
pub mod optimize;
pub mod signal;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{MacdParams, RsiParams, RunConfiguration, TrendParams};
    pub use crate::data::{load_csv, DataError, PricePoint, PriceSeries};
    pub use crate::engine::{simulate_positions, BacktestEngine, BacktestResult, PositionState};
    pub use crate::indicator::{exponential_average, macd, moving_average, rsi, MacdSeries};
    pub use crate::metrics::{
        buy_hold_equity, daily_returns, equity_curve, max_drawdown, strategy_returns,
        MetricsError, SummaryMetrics,
    };
    pub use crate::optimize::{
        Candidate, CandidateScore, OptimizationGrid, OptimizationResult, OptimizeError,
    };
    pub use crate::signal::{generate_signals, SignalSeries, SignalThresholds};
}
