//! Monte-Carlo event simulator.
//!
//! Plays an event repeatedly under a fixed per-game win probability and
//! collects the prize level reached by each trial. No closed-form
//! distribution is computed; the empirical payout distribution converges by
//! the law of large numbers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::event::{EventStructure, PrizeLevel};

/// Trials per simulation unless the caller overrides.
pub const DEFAULT_TRIALS: usize = 10_000;
/// Fallback win-rate percentage for out-of-range input.
pub const DEFAULT_WIN_RATE: u32 = 50;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Caller-facing simulation knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParams {
    pub trials: usize,
    /// Valid range 1..=100; anything else degrades to 50 with a warning.
    pub win_rate_percentage: u32,
    /// Print per-match and per-trial records. Output only; outcomes are
    /// identical either way.
    pub verbose: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            win_rate_percentage: DEFAULT_WIN_RATE,
            verbose: false,
        }
    }
}

/// Clamp an out-of-range win rate to the default. Degraded, not fatal.
pub fn effective_win_rate(win_rate_percentage: u32) -> u32 {
    if !(1..=100).contains(&win_rate_percentage) {
        eprintln!("defaulting win rate percentage to {DEFAULT_WIN_RATE}");
        return DEFAULT_WIN_RATE;
    }
    win_rate_percentage
}

// ---------------------------------------------------------------------------
// Match progression
// ---------------------------------------------------------------------------

/// Running match wins and losses within a single trial.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchRecord {
    pub wins: u32,
    pub losses: u32,
}

impl MatchRecord {
    /// Matches played so far.
    pub fn played(&self) -> u32 {
        self.wins + self.losses
    }
}

/// How a trial decides whether to keep taking matches, chosen once per
/// event from its loss threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossPolicy {
    /// `losses == 0`: play exactly `matches` matches, win or lose.
    SingleElimination,
    /// Stop at the loss threshold or at `matches` wins-plus-losses,
    /// whichever comes first.
    LossThreshold,
}

impl LossPolicy {
    pub fn for_event(event: &EventStructure) -> Self {
        if event.losses() == 0 {
            LossPolicy::SingleElimination
        } else {
            LossPolicy::LossThreshold
        }
    }

    pub fn continue_matches(&self, record: &MatchRecord, event: &EventStructure) -> bool {
        match self {
            LossPolicy::SingleElimination => record.played() < event.matches(),
            LossPolicy::LossThreshold => {
                record.losses < event.losses() && record.played() < event.matches()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Round play
// ---------------------------------------------------------------------------

/// Game wins and losses of one decided round.
#[derive(Debug, Clone, Copy)]
struct RoundResult {
    wins: u32,
    losses: u32,
}

impl RoundResult {
    fn won(&self) -> bool {
        self.wins > self.losses
    }
}

/// Play one best-of-N round to a decision: games continue until either side
/// reaches `threshold` (`rounds_per_match / 2 + 1`, the majority, since
/// rounds_per_match is odd).
///
/// Each game draws a uniform integer in [1, 100]; a draw strictly below the
/// win-rate percentage is a win. A configured rate of 50 therefore plays as
/// 49/100, and a draw of exactly 100 loses even at a configured 100. This
/// matches the tool's published numbers and is kept as-is.
fn play_round<R: Rng>(rng: &mut R, threshold: u32, win_rate_percentage: u32) -> RoundResult {
    let mut result = RoundResult { wins: 0, losses: 0 };
    while result.wins < threshold && result.losses < threshold {
        let draw: u32 = rng.gen_range(1..=100);
        if draw < win_rate_percentage {
            result.wins += 1;
        } else {
            result.losses += 1;
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Trial loop
// ---------------------------------------------------------------------------

/// Run `params.trials` independent playthroughs of `event`, drawing from
/// the supplied RNG, and return each trial's prize level.
///
/// Never fails on a constructed [`EventStructure`]; every invariant the loop
/// relies on is enforced at event construction.
pub fn run_trials<R: Rng>(
    event: &EventStructure,
    params: &SimulationParams,
    rng: &mut R,
) -> Vec<PrizeLevel> {
    let win_rate = effective_win_rate(params.win_rate_percentage);
    let policy = LossPolicy::for_event(event);
    let threshold = event.rounds_per_match() / 2 + 1;

    let mut prizes_won = Vec::with_capacity(params.trials);
    for trial in 1..=params.trials {
        let mut record = MatchRecord::default();
        while policy.continue_matches(&record, event) {
            let round = play_round(rng, threshold, win_rate);
            if params.verbose {
                println!(
                    "Match {}: You went {}-{}",
                    record.played() + 1,
                    round.wins,
                    round.losses
                );
            }
            if round.won() {
                record.wins += 1;
            } else {
                record.losses += 1;
            }
        }
        if params.verbose {
            println!("Event {}: You went {}-{}", trial, record.wins, record.losses);
        }
        prizes_won.push(*event.prize_for_wins(record.wins));
    }
    prizes_won
}

/// Convenience entry point over the thread-local RNG.
pub fn simulate(event: &EventStructure, params: &SimulationParams) -> Vec<PrizeLevel> {
    run_trials(event, params, &mut rand::thread_rng())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ladder(levels: usize) -> Vec<PrizeLevel> {
        (0..levels)
            .map(|i| PrizeLevel::new(i as u32, 0, 0).expect("test: prize level"))
            .collect()
    }

    fn zero_loss_event() -> EventStructure {
        EventStructure::new("bo3 x3", 3, 0, 3, ladder(4), Some(10000.into()), None)
            .expect("test: zero-loss event")
    }

    fn threshold_event() -> EventStructure {
        EventStructure::new("7-3", 7, 3, 1, ladder(8), None, Some(1500.into()))
            .expect("test: loss-threshold event")
    }

    #[test]
    fn policy_selection() {
        assert_eq!(
            LossPolicy::for_event(&zero_loss_event()),
            LossPolicy::SingleElimination
        );
        assert_eq!(
            LossPolicy::for_event(&threshold_event()),
            LossPolicy::LossThreshold
        );
    }

    #[test]
    fn single_elimination_plays_exactly_matches() {
        let event = zero_loss_event();
        let policy = LossPolicy::for_event(&event);
        // Even a 0-3 record keeps playing until all matches are used.
        let mut record = MatchRecord::default();
        let mut played = 0;
        while policy.continue_matches(&record, &event) {
            record.losses += 1;
            played += 1;
        }
        assert_eq!(played, event.matches());
    }

    #[test]
    fn loss_threshold_stops_at_losses() {
        let event = threshold_event();
        let policy = LossPolicy::for_event(&event);
        let record = MatchRecord { wins: 2, losses: 3 };
        assert!(!policy.continue_matches(&record, &event));
        let record = MatchRecord { wins: 2, losses: 2 };
        assert!(policy.continue_matches(&record, &event));
    }

    #[test]
    fn loss_threshold_stops_at_match_cap() {
        let event = threshold_event();
        let policy = LossPolicy::for_event(&event);
        let record = MatchRecord { wins: 7, losses: 0 };
        assert!(!policy.continue_matches(&record, &event));
    }

    #[test]
    fn round_ends_at_first_to_majority() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        // Best-of-3: threshold 2. At most 3 games, and the winner holds
        // exactly 2 wins when the round is called.
        for _ in 0..200 {
            let round = play_round(&mut rng, 2, 50);
            assert_eq!(round.wins.max(round.losses), 2);
            assert!(round.wins + round.losses <= 3);
        }
    }

    #[test]
    fn win_rate_one_never_wins() {
        // Draws land in [1, 100] and a win needs draw < 1, which no draw
        // satisfies. Every trial ends at zero wins.
        let event = zero_loss_event();
        let params = SimulationParams {
            trials: 50,
            win_rate_percentage: 1,
            verbose: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let outcomes = run_trials(&event, &params, &mut rng);
        assert_eq!(outcomes.len(), 50);
        for outcome in &outcomes {
            assert_eq!(outcome, event.prize_for_wins(0));
        }
    }

    #[test]
    fn outcome_count_matches_trials() {
        let event = threshold_event();
        let params = SimulationParams { trials: 123, ..Default::default() };
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let outcomes = run_trials(&event, &params, &mut rng);
        assert_eq!(outcomes.len(), 123);
    }

    #[test]
    fn outcomes_come_from_the_ladder() {
        let event = threshold_event();
        let params = SimulationParams { trials: 500, ..Default::default() };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for outcome in run_trials(&event, &params, &mut rng) {
            assert!(
                event.prizes().contains(&outcome),
                "outcome {outcome:?} not in the prize ladder"
            );
        }
    }

    #[test]
    fn same_seed_same_outcomes() {
        let event = threshold_event();
        let params = SimulationParams { trials: 200, ..Default::default() };
        let a = run_trials(&event, &params, &mut ChaCha8Rng::seed_from_u64(11));
        let b = run_trials(&event, &params, &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_win_rate_degrades_to_default() {
        assert_eq!(effective_win_rate(0), DEFAULT_WIN_RATE);
        assert_eq!(effective_win_rate(101), DEFAULT_WIN_RATE);
        assert_eq!(effective_win_rate(100), 100);
        assert_eq!(effective_win_rate(1), 1);
    }
}
