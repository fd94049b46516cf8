//! Validated draft-event configuration -- match structure and prize ladder.

use serde::{Deserialize, Serialize};

use crate::amount::{Amount, AmountError, RawAmount};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Validation errors raised at event construction.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("amount of matches ({matches}) does not equal amount of prize levels ({prizes})")]
    PrizeCountMismatch { matches: u32, prizes: usize },

    #[error("must provide a prize structure")]
    NoPrizes,

    #[error("must have at least 1 round and 1 match. Rounds: {rounds_per_match}, Matches: {matches}")]
    NonPositiveCounts { matches: u32, rounds_per_match: u32 },

    #[error("rounds per match must be odd, got {0}")]
    EvenRounds(u32),

    #[error("cannot have an event with no valid fee; a free event sets a fee of 0")]
    NoEntryFee,

    #[error(transparent)]
    Amount(#[from] AmountError),
}

// ---------------------------------------------------------------------------
// PrizeLevel
// ---------------------------------------------------------------------------

/// Prizes awarded at one match-win count. Unspecified components are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeLevel {
    pub packs: Amount,
    pub gems: Amount,
    pub gold: Amount,
}

impl PrizeLevel {
    pub fn new(
        packs: impl Into<RawAmount>,
        gems: impl Into<RawAmount>,
        gold: impl Into<RawAmount>,
    ) -> Result<Self, AmountError> {
        Ok(Self {
            packs: Amount::normalize(packs)?,
            gems: Amount::normalize(gems)?,
            gold: Amount::normalize(gold)?,
        })
    }
}

// ---------------------------------------------------------------------------
// EventStructure
// ---------------------------------------------------------------------------

/// One event's match/round/loss structure, prize ladder, and entry fees.
///
/// Immutable after construction; every invariant the simulator relies on is
/// enforced here, so simulation itself never fails on a built event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStructure {
    name: String,
    matches: u32,
    losses: u32,
    rounds_per_match: u32,
    prizes: Vec<PrizeLevel>,
    gold_entry_fee: Option<Amount>,
    gems_entry_fee: Option<Amount>,
}

impl EventStructure {
    /// Validate and build an event.
    ///
    /// The prize ladder carries one level per win count from 0 to `matches`
    /// inclusive, so its length must be `matches + 1`. `rounds_per_match`
    /// must be odd (rounds are first-to-majority). At least one entry fee
    /// must be present; a free event passes `Some(0)`, not `None`.
    pub fn new(
        name: impl Into<String>,
        matches: u32,
        losses: u32,
        rounds_per_match: u32,
        prizes: Vec<PrizeLevel>,
        gold_entry_fee: Option<RawAmount>,
        gems_entry_fee: Option<RawAmount>,
    ) -> Result<Self, EventError> {
        if prizes.is_empty() {
            return Err(EventError::NoPrizes);
        }
        if prizes.len() != matches as usize + 1 {
            return Err(EventError::PrizeCountMismatch { matches, prizes: prizes.len() });
        }
        if matches < 1 || rounds_per_match < 1 {
            return Err(EventError::NonPositiveCounts { matches, rounds_per_match });
        }
        if rounds_per_match % 2 == 0 {
            return Err(EventError::EvenRounds(rounds_per_match));
        }
        if gold_entry_fee.is_none() && gems_entry_fee.is_none() {
            return Err(EventError::NoEntryFee);
        }

        Ok(Self {
            name: name.into(),
            matches,
            losses,
            rounds_per_match,
            prizes,
            gold_entry_fee: gold_entry_fee.map(Amount::normalize).transpose()?,
            gems_entry_fee: gems_entry_fee.map(Amount::normalize).transpose()?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Match wins needed to reach the top of the prize ladder.
    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Match losses before elimination; 0 means the event runs a fixed
    /// number of matches regardless of losses.
    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Games per match, always odd.
    pub fn rounds_per_match(&self) -> u32 {
        self.rounds_per_match
    }

    pub fn prizes(&self) -> &[PrizeLevel] {
        &self.prizes
    }

    /// Prize ladder entry for a final match-win count.
    pub fn prize_for_wins(&self, match_wins: u32) -> &PrizeLevel {
        &self.prizes[match_wins as usize]
    }

    pub fn gold_entry_fee(&self) -> Option<Amount> {
        self.gold_entry_fee
    }

    pub fn gems_entry_fee(&self) -> Option<Amount> {
        self.gems_entry_fee
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
