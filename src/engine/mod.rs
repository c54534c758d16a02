pub mod backtest;
pub mod position;

pub use backtest::{BacktestEngine, BacktestResult};
pub use position::{simulate_positions, PositionState};
