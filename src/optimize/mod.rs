//grid search over rsi parameters for the highest-sharpe configuration
use crate::engine::position::simulate_positions;
use crate::indicator::{rsi, MacdSeries};
use crate::metrics::summary::calculate_sharpe_ratio;
use crate::metrics::timeseries::strategy_returns;
use crate::signal::{generate_signals, SignalThresholds};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//a candidate needs more defined return observations than this to be scored
pub const MIN_OBSERVATIONS: usize = 10;

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("no eligible candidate: every combination produced too few return observations or an undefined Sharpe ratio")]
    NoEligibleCandidate,
}

//the parameter grid to search
//windows enumerate ascending in the outer loop, thresholds in the inner loop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizationGrid {
    pub rsi_windows: Vec<usize>,
    pub oversold_levels: Vec<f64>,
    pub overbought: f64,
}

impl Default for OptimizationGrid {
    fn default() -> Self {
        OptimizationGrid {
            rsi_windows: vec![10, 14, 20],
            oversold_levels: vec![25.0, 30.0],
            overbought: 70.0,
        }
    }
}

impl OptimizationGrid {
    //enumerates candidates in deterministic order
    pub fn candidates(&self) -> Vec<Candidate> {
        self.rsi_windows
            .iter()
            .flat_map(|&window| {
                self.oversold_levels.iter().map(move |&oversold| Candidate {
                    rsi_window: window,
                    oversold,
                })
            })
            .collect()
    }
}

//one (rsi window, oversold threshold) combination
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub rsi_window: usize,
    pub oversold: f64,
}

//a candidate and its score, sharpe is None when the candidate was
//ineligible or its return series had zero variance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateScore {
    pub candidate: Candidate,
    pub sharpe: Option<f64>,
    pub num_observations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub best: Candidate,
    pub best_sharpe: f64,
    //all candidate scores in enumeration order
    pub scores: Vec<CandidateScore>,
}

//evaluates every grid candidate against the shared macd lines and daily returns
//and selects the strictly greatest sharpe, ties broken by enumeration order
//
//candidates are independent, so they are scored in parallel; selection scans
//the order-preserving collected results sequentially, which keeps the
//tie-break deterministic regardless of completion order
pub fn search(
    closes: &[f64],
    macd: &MacdSeries,
    daily_returns: &[Option<f64>],
    grid: &OptimizationGrid,
) -> Result<OptimizationResult, OptimizeError> {
    let candidates = grid.candidates();

    let scores: Vec<CandidateScore> = candidates
        .par_iter()
        .map(|&candidate| evaluate(closes, macd, daily_returns, grid.overbought, candidate))
        .collect();

    let mut best: Option<(Candidate, f64)> = None;

    for score in &scores {
        if let Some(sharpe) = score.sharpe {
            let improves = match best {
                Some((_, best_sharpe)) => sharpe > best_sharpe,
                None => true,
            };
            if improves {
                best = Some((score.candidate, sharpe));
            }
        }
    }

    let (best, best_sharpe) = best.ok_or(OptimizeError::NoEligibleCandidate)?;

    Ok(OptimizationResult {
        best,
        best_sharpe,
        scores,
    })
}

//scores one candidate: fresh rsi, signals, flat-start simulation and returns
fn evaluate(
    closes: &[f64],
    macd: &MacdSeries,
    daily_returns: &[Option<f64>],
    overbought: f64,
    candidate: Candidate,
) -> CandidateScore {
    let rsi_series = rsi(closes, candidate.rsi_window);
    let signals = generate_signals(
        &macd.macd_line,
        &macd.signal_line,
        &rsi_series,
        SignalThresholds::new(candidate.oversold, overbought),
    );
    let positions = simulate_positions(&signals);
    let returns: Vec<f64> = strategy_returns(daily_returns, &positions)
        .iter()
        .flatten()
        .copied()
        .collect();

    let sharpe = if returns.len() > MIN_OBSERVATIONS {
        calculate_sharpe_ratio(&returns)
    } else {
        None
    };

    CandidateScore {
        candidate,
        sharpe,
        num_observations: returns.len(),
    }
}
