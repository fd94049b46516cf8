//! Earnings aggregation -- entry-fee resolution and EV statistics over a set
//! of simulated trial outcomes.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::amount::Amount;
use crate::event::{EventStructure, PrizeLevel};
use crate::pricing::{PricingError, PricingModel};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from earnings aggregation.
#[derive(Debug, thiserror::Error)]
pub enum EarningsError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Unreachable for a validated event, which always carries a fee.
    #[error("event has no resolvable entry fee")]
    NoEntryFee,

    #[error("cannot summarize an empty outcome list")]
    NoOutcomes,
}

// ---------------------------------------------------------------------------
// Entry fee resolution
// ---------------------------------------------------------------------------

/// Resolve the event's entry fee to a single local-currency value.
///
/// Converts whichever of the gold/gems fees is present; when both are, the
/// cheaper wins. An exact tie prefers gems, deterministically, with an
/// informational console note.
pub fn resolve_entry_fee(
    event: &EventStructure,
    pricing: &PricingModel,
) -> Result<Amount, EarningsError> {
    let currency = pricing.local_currency();

    let gold_fee = match event.gold_entry_fee() {
        Some(gold) => Some((pricing.convert_gold_to_local_currency(gold)?, gold)),
        None => None,
    };
    let gems_fee = match event.gems_entry_fee() {
        Some(gems) => Some((pricing.convert_gems_to_local_currency(gems)?, gems)),
        None => None,
    };

    match (gems_fee, gold_fee) {
        (Some((gems_local, gems)), Some((gold_local, gold))) => {
            if gems_local < gold_local {
                println!(
                    "Buying in with gems is cheaper: {gems_local} {currency} {gems} gems < {gold_local} {currency} {gold} gold"
                );
                Ok(gems_local)
            } else if gold_local < gems_local {
                println!(
                    "Buying in with gold is cheaper: {gold_local} {currency} {gold} gold < {gems_local} {currency} {gems} gems"
                );
                Ok(gold_local)
            } else {
                println!("No preference, defaulting to gems: {gems_local} {currency} {gems} gems");
                Ok(gems_local)
            }
        }
        (Some((gems_local, _)), None) => Ok(gems_local),
        (None, Some((gold_local, _))) => Ok(gold_local),
        (None, None) => Err(EarningsError::NoEntryFee),
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregate earnings statistics over one simulation's outcomes, all in
/// local currency. `total_earnings` and `ev` may be negative.
#[derive(Debug, Clone, Serialize)]
pub struct EarningsSummary {
    pub entry_fee: Amount,
    pub trial_count: usize,
    pub total_buyins: Amount,
    pub total_winnings: Amount,
    pub total_earnings: Amount,
    pub avg_winnings_per_buyin: Amount,
    pub ev: Amount,
}

impl EarningsSummary {
    /// Console report in the tool's traditional shape.
    pub fn print_report(&self) {
        println!("Single Buyin Costs: {}", self.entry_fee);
        println!("Total Buyins ({}): {}", self.trial_count, self.total_buyins);
        println!("Total Winnings: {}", self.total_winnings);
        println!("Total Earnings: {}", self.total_earnings);
        println!("Average Winnings Per Buyin: {}", self.avg_winnings_per_buyin);
        println!("EV: {}", self.ev);
    }
}

/// Convert every trial outcome to local currency, accumulate one entry fee
/// per trial, and compute the summary statistics.
pub fn summarize(
    event: &EventStructure,
    outcomes: &[PrizeLevel],
    pricing: &PricingModel,
) -> Result<EarningsSummary, EarningsError> {
    if outcomes.is_empty() {
        return Err(EarningsError::NoOutcomes);
    }

    let entry_fee = resolve_entry_fee(event, pricing)?;

    let mut total_buyins = Amount::zero();
    let mut total_winnings = Amount::zero();
    for prize in outcomes {
        let packs = pricing.convert_packs_to_local_currency(prize.packs)?;
        let gems = pricing.convert_gems_to_local_currency(prize.gems)?;
        let gold = pricing.convert_gold_to_local_currency(prize.gold)?;
        total_winnings += packs + gems + gold;
        total_buyins += entry_fee;
    }

    let trial_count = outcomes.len();
    let avg_winnings_per_buyin =
        Amount::from_decimal(total_winnings.0 / Decimal::from(trial_count as u64));

    Ok(EarningsSummary {
        entry_fee,
        trial_count,
        total_buyins,
        total_winnings,
        total_earnings: total_winnings - total_buyins,
        avg_winnings_per_buyin,
        ev: avg_winnings_per_buyin - entry_fee,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd_model() -> PricingModel {
        PricingModel::with_defaults("usd").expect("test: usd model")
    }

    fn ladder() -> Vec<PrizeLevel> {
        vec![
            PrizeLevel::new(1, 0, 0).expect("test: p0"),
            PrizeLevel::new(1, 0, 0).expect("test: p1"),
            PrizeLevel::new(4, 1000, 0).expect("test: p2"),
            PrizeLevel::new(6, 3000, 0).expect("test: p3"),
        ]
    }

    fn ikoria_event() -> EventStructure {
        EventStructure::new(
            "Traditional Ikoria Draft",
            3,
            0,
            3,
            ladder(),
            Some(10000.into()),
            Some(1500.into()),
        )
        .expect("test: ikoria event")
    }

    #[test]
    fn entry_fee_takes_the_cheaper_conversion() {
        // 10000 gold -> $10.00, 1500 gems -> $7.50
        let fee = resolve_entry_fee(&ikoria_event(), &usd_model()).expect("test: fee");
        assert_eq!(fee.0, dec!(7.50));
    }

    #[test]
    fn entry_fee_single_gold_fee() {
        let event = EventStructure::new("gold only", 3, 0, 3, ladder(), Some(5000.into()), None)
            .expect("test: gold-only event");
        let fee = resolve_entry_fee(&event, &usd_model()).expect("test: fee");
        assert_eq!(fee.0, dec!(5));
    }

    #[test]
    fn entry_fee_tie_prefers_gems() {
        // 2000 gold -> $2.00 and 400 gems -> $2.00: equal, gems chosen.
        let event =
            EventStructure::new("tied", 3, 0, 3, ladder(), Some(2000.into()), Some(400.into()))
                .expect("test: tied event");
        let fee = resolve_entry_fee(&event, &usd_model()).expect("test: fee");
        assert_eq!(fee.0, dec!(2));
    }

    #[test]
    fn summary_accumulates_one_fee_per_trial() {
        let event = ikoria_event();
        let pricing = usd_model();
        // Four trials that each finished at zero wins: one pack apiece.
        let outcomes = vec![*event.prize_for_wins(0); 4];
        let summary = summarize(&event, &outcomes, &pricing).expect("test: summary");

        assert_eq!(summary.trial_count, 4);
        assert_eq!(summary.total_buyins.0, dec!(30.00)); // 4 x $7.50
        assert_eq!(summary.total_winnings.0, dec!(4)); // 4 x $1 pack
        assert_eq!(summary.total_earnings.0, dec!(-26.00));
        assert_eq!(summary.avg_winnings_per_buyin.0, dec!(1));
        assert_eq!(summary.ev.0, dec!(-6.50));
    }

    #[test]
    fn top_prize_converts_all_components() {
        let event = ikoria_event();
        let pricing = usd_model();
        // 6 packs = $6, 3000 gems = $15, 0 gold
        let outcomes = vec![*event.prize_for_wins(3)];
        let summary = summarize(&event, &outcomes, &pricing).expect("test: summary");
        assert_eq!(summary.total_winnings.0, dec!(21));
        assert_eq!(summary.ev.0, dec!(13.50));
    }

    #[test]
    fn empty_outcomes_is_an_error() {
        let err = summarize(&ikoria_event(), &[], &usd_model());
        assert!(
            matches!(err, Err(EarningsError::NoOutcomes)),
            "expected NoOutcomes, got {err:?}"
        );
    }
}
