//pure indicator functions over a close series
//warm-up entries are explicit None, never zero-filled
use serde::{Deserialize, Serialize};

//macd line and its signal line, aligned with the input series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdSeries {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
}

//simple trailing moving average
//undefined below index window-1; at window-1 equals the mean of the first window values
pub fn moving_average(series: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; series.len()];
    if window == 0 || series.len() < window {
        return out;
    }

    let mut sum: f64 = series[..window].iter().sum();
    out[window - 1] = Some(sum / window as f64);

    for i in window..series.len() {
        sum += series[i] - series[i - window];
        out[i] = Some(sum / window as f64);
    }

    out
}

//exponential moving average with alpha = 2/(span+1), seeded with series[0]
//defined from index 0, no warm-up gap
pub fn exponential_average(series: &[f64], span: usize) -> Vec<f64> {
    if series.is_empty() {
        return vec![];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(series.len());
    let mut ema = series[0];
    out.push(ema);

    for &value in &series[1..] {
        ema = alpha * value + (1.0 - alpha) * ema;
        out.push(ema);
    }

    out
}

//macd line = ema(fast) - ema(slow), signal line = ema(macd line, signal_span)
pub fn macd(series: &[f64], fast: usize, slow: usize, signal_span: usize) -> MacdSeries {
    let fast_ema = exponential_average(series, fast);
    let slow_ema = exponential_average(series, slow);

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = exponential_average(&macd_line, signal_span);

    MacdSeries {
        macd_line,
        signal_line,
    }
}

//relative strength index over rolling average gains and losses
//undefined below index window
//policy when avg_loss is zero: 100 if avg_gain positive, 50 if both are zero
pub fn rsi(series: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; series.len()];
    if window == 0 || series.len() < 2 {
        return out;
    }

    //per-bar gains and losses, aligned so index i covers the delta into bar i+1
    let mut gains = Vec::with_capacity(series.len() - 1);
    let mut losses = Vec::with_capacity(series.len() - 1);

    for i in 1..series.len() {
        let delta = series[i] - series[i - 1];
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let avg_gains = moving_average(&gains, window);
    let avg_losses = moving_average(&losses, window);

    for i in window..series.len() {
        if let (Some(avg_gain), Some(avg_loss)) = (avg_gains[i - 1], avg_losses[i - 1]) {
            out[i] = Some(if avg_loss == 0.0 {
                if avg_gain > 0.0 {
                    100.0
                } else {
                    50.0
                }
            } else {
                let rs = avg_gain / avg_loss;
                100.0 - (100.0 / (1.0 + rs))
            });
        }
    }

    out
}
