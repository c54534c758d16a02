use crate::metrics::timeseries::max_drawdown;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use thiserror::Error;

//trading days used to annualize daily figures
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("strategy equity series has no defined entries")]
    InsufficientData,
}

//summary risk/return metrics for a backtest
//sharpe_ratio is None when the return series has zero variance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub cumulative_return: f64,
    pub annualized_return: f64,
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown: f64,
    pub final_equity: f64,
    pub buy_hold_return: Option<f64>,
    pub num_observations: usize,
}

impl SummaryMetrics {
    //calculates summary metrics from the strategy return and equity series
    pub fn from_backtest(
        strategy_returns: &[Option<f64>],
        strategy_equity: &[Option<f64>],
        buy_hold_equity: &[Option<f64>],
    ) -> Result<Self, MetricsError> {
        let final_equity = strategy_equity
            .iter()
            .flatten()
            .last()
            .copied()
            .ok_or(MetricsError::InsufficientData)?;

        let returns: Vec<f64> = strategy_returns.iter().flatten().copied().collect();
        let num_observations = returns.len();

        let cumulative_return = final_equity - 1.0;

        let annualized_return = if num_observations > 0 {
            final_equity.powf(TRADING_DAYS_PER_YEAR / num_observations as f64) - 1.0
        } else {
            0.0
        };

        let sharpe_ratio = calculate_sharpe_ratio(&returns);

        let max_dd = max_drawdown(strategy_equity);

        let buy_hold_return = buy_hold_equity
            .iter()
            .flatten()
            .last()
            .map(|equity| equity - 1.0);

        Ok(SummaryMetrics {
            cumulative_return,
            annualized_return,
            sharpe_ratio,
            max_drawdown: max_dd,
            final_equity,
            buy_hold_return,
            num_observations,
        })
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Cumulative Return"),
            Cell::new(&format!("{:.2}%", self.cumulative_return * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Annualized Return"),
            Cell::new(&format!("{:.2}%", self.annualized_return * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sharpe Ratio"),
            Cell::new(
                &self
                    .sharpe_ratio
                    .map(|s| format!("{:.3}", s))
                    .unwrap_or_else(|| "undefined".to_string()),
            ),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Drawdown"),
            Cell::new(&format!("{:.2}%", self.max_drawdown * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Final Equity"),
            Cell::new(&format!("{:.4}", self.final_equity)),
        ]));

        if let Some(buy_hold) = self.buy_hold_return {
            table.add_row(Row::new(vec![
                Cell::new("Buy & Hold Return"),
                Cell::new(&format!("{:.2}%", buy_hold * 100.0)),
            ]));
        }

        table.add_row(Row::new(vec![
            Cell::new("Observations"),
            Cell::new(&format!("{}", self.num_observations)),
        ]));

        table.printstd();
    }
}

//annualized sharpe over defined daily returns
//None when fewer than two observations or zero variance
pub fn calculate_sharpe_ratio(returns: &[f64]) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }

    let mean = returns.mean();
    let std_dev = returns.std_dev();

    if std_dev == 0.0 {
        return None;
    }

    Some((mean / std_dev) * TRADING_DAYS_PER_YEAR.sqrt())
}
