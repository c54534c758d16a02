pub mod summary;
pub mod timeseries;

pub use summary::{calculate_sharpe_ratio, MetricsError, SummaryMetrics, TRADING_DAYS_PER_YEAR};
pub use timeseries::{
    buy_hold_equity, daily_returns, equity_curve, max_drawdown, strategy_returns,
};
