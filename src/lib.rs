// Draft Event EV Engine
// Monte-Carlo prize simulation over a pack-pegged in-game economy.

pub mod amount;
pub mod earnings;
pub mod event;
pub mod pricing;
pub mod simulation;

pub use amount::{Amount, AmountError, RawAmount};
pub use earnings::{resolve_entry_fee, summarize, EarningsError, EarningsSummary};
pub use event::{EventError, EventStructure, PrizeLevel};
pub use pricing::{PricingConfig, PricingError, PricingModel, UnitPrice, GEMS, GOLD};
pub use simulation::{
    run_trials, simulate, LossPolicy, MatchRecord, SimulationParams, DEFAULT_TRIALS,
    DEFAULT_WIN_RATE,
};
