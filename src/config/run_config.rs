use crate::optimize::OptimizationGrid;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//macd indicator parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal_span: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        MacdParams {
            fast: 12,
            slow: 26,
            signal_span: 9,
        }
    }
}

//rsi indicator and threshold parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RsiParams {
    pub window: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        RsiParams {
            window: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

//moving-average trend overlay windows (reported, not traded on)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendParams {
    pub fast_window: usize,
    pub slow_window: usize,
}

impl Default for TrendParams {
    fn default() -> Self {
        TrendParams {
            fast_window: 50,
            slow_window: 200,
        }
    }
}

//complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfiguration {
    //data
    pub data_path: PathBuf,

    //indicator parameters
    pub macd: MacdParams,
    pub rsi: RsiParams,
    pub trend: TrendParams,

    //optimizer grid
    pub grid: OptimizationGrid,

    //optional output paths
    pub output_equity_csv: Option<PathBuf>,
    pub output_signals_csv: Option<PathBuf>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        RunConfiguration {
            data_path: PathBuf::from("data.csv"),
            macd: MacdParams::default(),
            rsi: RsiParams::default(),
            trend: TrendParams::default(),
            grid: OptimizationGrid::default(),
            output_equity_csv: None,
            output_signals_csv: None,
        }
    }
}

impl RunConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RunConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_parameters() {
        let config = RunConfiguration::default();

        assert_eq!(config.macd.fast, 12);
        assert_eq!(config.macd.slow, 26);
        assert_eq!(config.macd.signal_span, 9);
        assert_eq!(config.rsi.window, 14);
        assert_eq!(config.rsi.oversold, 30.0);
        assert_eq!(config.rsi.overbought, 70.0);
        assert_eq!(config.trend.fast_window, 50);
        assert_eq!(config.trend.slow_window, 200);
        assert_eq!(config.grid.rsi_windows, vec![10, 14, 20]);
        assert_eq!(config.grid.oversold_levels, vec![25.0, 30.0]);
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        let mut config = RunConfiguration::default();
        config.rsi.window = 20;
        config.grid.oversold_levels = vec![20.0, 25.0, 30.0];

        config.to_json_file(&path).unwrap();
        let loaded = RunConfiguration::from_json_file(&path).unwrap();

        assert_eq!(loaded.rsi.window, 20);
        assert_eq!(loaded.grid.oversold_levels, vec![20.0, 25.0, 30.0]);
    }
}
