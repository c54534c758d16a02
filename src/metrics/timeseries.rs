use crate::engine::position::PositionState;

//daily percentage returns from a close series
//undefined at index 0 where no prior close exists
pub fn daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut returns = vec![None; closes.len()];

    for t in 1..closes.len() {
        returns[t] = Some(closes[t] / closes[t - 1] - 1.0);
    }

    returns
}

//strategy returns: each bar's daily return weighted by the prior bar's position
//the one-bar lag is deliberate, a position opened on bar t only earns bar t+1's return
pub fn strategy_returns(
    daily_returns: &[Option<f64>],
    positions: &[PositionState],
) -> Vec<Option<f64>> {
    daily_returns
        .iter()
        .enumerate()
        .map(|(t, ret)| {
            let weight = if t == 0 {
                //position before the first bar is flat
                0.0
            } else {
                positions[t - 1].weight()
            };
            ret.map(|r| r * weight)
        })
        .collect()
}

//cumulative product of (1 + return) over defined entries
//entries where the return is undefined stay undefined, the product carries across them
pub fn equity_curve(returns: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut equity = 1.0;

    returns
        .iter()
        .map(|ret| {
            ret.map(|r| {
                equity *= 1.0 + r;
                equity
            })
        })
        .collect()
}

//buy-and-hold equity from the raw daily returns
pub fn buy_hold_equity(daily_returns: &[Option<f64>]) -> Vec<Option<f64>> {
    equity_curve(daily_returns)
}

//maximum peak-to-trough decline over defined equity entries, as a non-positive fraction
pub fn max_drawdown(equity: &[Option<f64>]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0f64;

    for value in equity.iter().flatten() {
        if *value > peak {
            peak = *value;
        }
        worst = worst.min(value / peak - 1.0);
    }

    worst
}
