use crate::signal::SignalSeries;
use serde::{Deserialize, Serialize};

//long/flat position state for a single bar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PositionState {
    Flat,
    Long,
}

impl PositionState {
    //return weight applied to the next bar's return: 0 flat, 1 long
    pub fn weight(&self) -> f64 {
        match self {
            PositionState::Flat => 0.0,
            PositionState::Long => 1.0,
        }
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, PositionState::Flat)
    }

    pub fn is_long(&self) -> bool {
        matches!(self, PositionState::Long)
    }

    //single-bar transition: buy opens while flat, sell closes while long
    //at most one transition per bar, buy checked first
    fn step(self, buy: bool, sell: bool) -> PositionState {
        match self {
            PositionState::Flat if buy => PositionState::Long,
            PositionState::Long if sell => PositionState::Flat,
            unchanged => unchanged,
        }
    }
}

//folds the signal series into a position history, starting flat
//entry t records the post-transition state for bar t
pub fn simulate_positions(signals: &SignalSeries) -> Vec<PositionState> {
    signals
        .buy
        .iter()
        .zip(signals.sell.iter())
        .scan(PositionState::Flat, |state, (&buy, &sell)| {
            *state = state.step(buy, sell);
            Some(*state)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(buy: Vec<bool>, sell: Vec<bool>) -> SignalSeries {
        SignalSeries { buy, sell }
    }

    #[test]
    fn opens_on_buy_and_closes_on_sell() {
        use PositionState::*;

        let positions = simulate_positions(&signals(
            vec![false, true, false, false, false],
            vec![false, false, false, true, false],
        ));

        assert_eq!(positions, vec![Flat, Long, Long, Flat, Flat]);
    }

    #[test]
    fn sell_while_flat_is_ignored() {
        use PositionState::*;

        let positions = simulate_positions(&signals(
            vec![false, false, true],
            vec![true, false, false],
        ));

        assert_eq!(positions, vec![Flat, Flat, Long]);
    }

    #[test]
    fn buy_while_long_is_ignored() {
        use PositionState::*;

        let positions = simulate_positions(&signals(
            vec![true, true, false],
            vec![false, false, true],
        ));

        assert_eq!(positions, vec![Long, Long, Flat]);
    }

    #[test]
    fn buy_wins_same_bar_conflict_while_flat() {
        use PositionState::*;

        let positions = simulate_positions(&signals(vec![true], vec![true]));
        assert_eq!(positions, vec![Long]);
    }

    #[test]
    fn sell_wins_same_bar_conflict_while_long() {
        use PositionState::*;

        let positions = simulate_positions(&signals(vec![true, true], vec![false, true]));
        assert_eq!(positions, vec![Long, Flat]);
    }

    #[test]
    fn deterministic_across_runs() {
        let input = signals(
            vec![false, true, false, true, false, false],
            vec![false, false, true, false, false, true],
        );

        assert_eq!(simulate_positions(&input), simulate_positions(&input));
    }

    #[test]
    fn mutating_a_signal_never_changes_earlier_positions() {
        let base = signals(
            vec![false, true, false, false, false],
            vec![false, false, false, true, false],
        );
        let mut mutated = base.clone();
        mutated.sell[3] = false;

        let before = simulate_positions(&base);
        let after = simulate_positions(&mutated);

        assert_eq!(before[..3], after[..3]);
        assert_ne!(before[3..], after[3..]);
    }

    #[test]
    fn long_blocks_are_contiguous() {
        let input = signals(
            vec![true, false, false, true, false, false],
            vec![false, false, true, false, true, false],
        );
        let positions = simulate_positions(&input);

        //every long entry either starts a block on a buy bar or extends the prior long
        for (t, state) in positions.iter().enumerate() {
            if state.is_long() {
                let opened_here = input.buy[t] && (t == 0 || positions[t - 1].is_flat());
                let carried = t > 0 && positions[t - 1].is_long();
                assert!(opened_here || carried);
            }
        }
    }
}
