//converts indicator series into per-bar boolean buy/sell signals
use serde::{Deserialize, Serialize};

//rsi thresholds for signal generation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SignalThresholds {
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        SignalThresholds {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl SignalThresholds {
    pub fn new(oversold: f64, overbought: f64) -> Self {
        SignalThresholds {
            oversold,
            overbought,
        }
    }
}

//per-bar buy/sell booleans, aligned with the price series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalSeries {
    pub buy: Vec<bool>,
    pub sell: Vec<bool>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.buy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buy.is_empty()
    }
}

//buy on a macd upward crossover or when rsi drops below oversold
//sell on a macd downward crossover or when rsi rises above overbought
//the crossover term compares t against t-1 and is false at t=0
//an undefined rsi entry contributes false to both predicates
pub fn generate_signals(
    macd_line: &[f64],
    signal_line: &[f64],
    rsi: &[Option<f64>],
    thresholds: SignalThresholds,
) -> SignalSeries {
    let len = macd_line.len();
    let mut buy = vec![false; len];
    let mut sell = vec![false; len];

    for t in 0..len {
        let cross_up = t > 0
            && macd_line[t] > signal_line[t]
            && macd_line[t - 1] <= signal_line[t - 1];
        let cross_down = t > 0
            && macd_line[t] < signal_line[t]
            && macd_line[t - 1] >= signal_line[t - 1];

        let rsi_oversold = rsi[t].is_some_and(|v| v < thresholds.oversold);
        let rsi_overbought = rsi[t].is_some_and(|v| v > thresholds.overbought);

        buy[t] = cross_up || rsi_oversold;
        sell[t] = cross_down || rsi_overbought;
    }

    SignalSeries { buy, sell }
}
