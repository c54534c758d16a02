pub mod run_config;

pub use run_config::{MacdParams, RsiParams, RunConfiguration, TrendParams};
