//! Pricing model -- pegging gold, gems, and a local real-money currency to a
//! common per-pack value.
//!
//! Packs are the common denominator of the whole economy: every unit's value
//! is expressed as "value per pack", so converting between any two units is
//! one division and one multiplication. Adding a unit means adding one
//! per-pack entry, not a row of pairwise rates.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::amount::{Amount, AmountError, RawAmount};

/// Unit name for the gold reference entry.
pub const GOLD: &str = "gold";
/// Unit name for the gems reference entry.
pub const GEMS: &str = "gems";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from pricing construction and conversion.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("could not find currency mapping: from: {from}, to: {to}")]
    UnknownUnit { from: String, to: String },

    #[error("currency {0} has no configured price")]
    UnconfiguredCurrency(String),

    #[error("pricing pegs must have a non-zero cost and quantity")]
    ZeroPeg,

    #[error("currency {0} has a zero configured price")]
    ZeroCurrencyPrice(String),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Static peg constants handed to [`PricingModel::new`].
///
/// An explicit configuration struct rather than module statics, so tests and
/// callers can run independently-priced models side by side. A currency code
/// mapped to `None` is known but unpriced; converting through it fails until
/// someone fills in their local market rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub gold_cost: Decimal,
    pub gold_quantity: Decimal,
    pub gems_cost: Decimal,
    pub gems_quantity: Decimal,
    /// Largest gems bundle purchasable for real money.
    pub maximum_buyable_gems: Decimal,
    /// Price of that bundle per currency code (lowercase).
    pub currency_prices: HashMap<String, Option<Decimal>>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        // 2020 Spring economy: 1000 gold or 600-gems-for-3 buys packs, and
        // the best real-money deal is 20,000 gems for $100.
        let mut currency_prices = HashMap::new();
        currency_prices.insert("usd".to_string(), Some(dec!(100.00)));
        for code in ["eur", "cad", "jpy", "brl", "gbp"] {
            currency_prices.insert(code.to_string(), None);
        }
        Self {
            gold_cost: dec!(1000),
            gold_quantity: dec!(1),
            gems_cost: dec!(600),
            gems_quantity: dec!(3),
            maximum_buyable_gems: dec!(20000),
            currency_prices,
        }
    }
}

impl PricingConfig {
    /// Real-money price of the maximum gems bundle in `currency`.
    fn currency_price(&self, currency: &str) -> Result<Decimal, PricingError> {
        let lookup = currency.to_lowercase();
        match self.currency_prices.get(&lookup) {
            Some(Some(price)) if price.is_zero() => {
                Err(PricingError::ZeroCurrencyPrice(lookup))
            }
            Some(Some(price)) => Ok(*price),
            _ => Err(PricingError::UnconfiguredCurrency(lookup)),
        }
    }
}

// ---------------------------------------------------------------------------
// Reference table
// ---------------------------------------------------------------------------

/// One unit's entry in the pricing reference table.
///
/// `per_pack = cost / quantity`, computed once at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitPrice {
    pub cost: Amount,
    pub quantity: Amount,
    pub per_pack: Amount,
}

impl UnitPrice {
    fn new(cost: Decimal, quantity: Decimal) -> Result<Self, PricingError> {
        let cost = Amount::normalize(cost)?;
        let quantity = Amount::normalize(quantity)?;
        // A zero quantity has no per-pack value, and a zero cost would make
        // every later conversion divide by zero.
        if cost.is_zero() || quantity.is_zero() {
            return Err(PricingError::ZeroPeg);
        }
        let per_pack = Amount::from_decimal(cost.0 / quantity.0);
        Ok(Self { cost, quantity, per_pack })
    }
}

// ---------------------------------------------------------------------------
// PricingModel
// ---------------------------------------------------------------------------

/// Immutable unit-name → per-pack-value table plus conversion operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingModel {
    local_currency: String,
    reference: HashMap<String, UnitPrice>,
}

impl PricingModel {
    /// Build the reference table: fixed gold and gems entries from the peg
    /// constants, then a derived local-currency entry anchored through the
    /// gems real-money price.
    ///
    /// Fails with [`PricingError::UnconfiguredCurrency`] when the requested
    /// local currency has no configured rate.
    pub fn new(local_currency: &str, config: &PricingConfig) -> Result<Self, PricingError> {
        let local_currency = local_currency.to_lowercase();

        let gold = UnitPrice::new(config.gold_cost, config.gold_quantity)?;
        let gems = UnitPrice::new(config.gems_cost, config.gems_quantity)?;

        if config.maximum_buyable_gems.is_zero() {
            return Err(PricingError::ZeroPeg);
        }

        // Baseline conversion: how many gems one unit of local currency
        // buys at the best bundle rate, then gems-per-pack priced in it.
        let bundle_price = config.currency_price(&local_currency)?;
        let gems_by_spend = config.maximum_buyable_gems / bundle_price;
        let local_per_pack = Amount::from_decimal(gems.per_pack.0 / gems_by_spend);

        let mut reference = HashMap::new();
        reference.insert(GOLD.to_string(), gold);
        reference.insert(GEMS.to_string(), gems);
        reference.insert(
            local_currency.clone(),
            UnitPrice {
                cost: local_per_pack,
                quantity: Amount::from_decimal(Decimal::ONE),
                per_pack: local_per_pack,
            },
        );

        Ok(Self { local_currency, reference })
    }

    /// Build with the default 2020-era peg constants.
    pub fn with_defaults(local_currency: &str) -> Result<Self, PricingError> {
        Self::new(local_currency, &PricingConfig::default())
    }

    /// The settlement currency this model was built for (lowercase).
    pub fn local_currency(&self) -> &str {
        &self.local_currency
    }

    /// Per-pack value of a unit, if it is in the reference table.
    pub fn per_pack(&self, unit: &str) -> Option<Amount> {
        self.reference.get(unit).map(|entry| entry.per_pack)
    }

    fn entry(&self, unit: &str, from: &str, to: &str) -> Result<&UnitPrice, PricingError> {
        self.reference.get(unit).ok_or_else(|| PricingError::UnknownUnit {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Convert `amount` between any two units in the reference table.
    ///
    /// The amount is normalized, divided by the source per-pack value into a
    /// unit-agnostic pack-equivalent quantity, then multiplied by the
    /// destination per-pack value. The result keeps full decimal precision;
    /// only the boundary input is truncated.
    pub fn convert(
        &self,
        amount: impl Into<RawAmount>,
        from: &str,
        to: &str,
    ) -> Result<Amount, PricingError> {
        let amount = Amount::normalize(amount)?;
        let source = self.entry(from, from, to)?;
        let destination = self.entry(to, from, to)?;

        let pack_equivalent = amount.0 / source.per_pack.0;
        Ok(Amount::from_decimal(pack_equivalent * destination.per_pack.0))
    }

    pub fn convert_gold_to_local_currency(
        &self,
        gold: impl Into<RawAmount>,
    ) -> Result<Amount, PricingError> {
        self.convert(gold, GOLD, &self.local_currency)
    }

    pub fn convert_local_currency_to_gold(
        &self,
        amount: impl Into<RawAmount>,
    ) -> Result<Amount, PricingError> {
        self.convert(amount, &self.local_currency, GOLD)
    }

    pub fn convert_gems_to_local_currency(
        &self,
        gems: impl Into<RawAmount>,
    ) -> Result<Amount, PricingError> {
        self.convert(gems, GEMS, &self.local_currency)
    }

    pub fn convert_local_currency_to_gems(
        &self,
        amount: impl Into<RawAmount>,
    ) -> Result<Amount, PricingError> {
        self.convert(amount, &self.local_currency, GEMS)
    }

    pub fn convert_gold_to_gems(
        &self,
        gold: impl Into<RawAmount>,
    ) -> Result<Amount, PricingError> {
        self.convert(gold, GOLD, GEMS)
    }

    pub fn convert_gems_to_gold(
        &self,
        gems: impl Into<RawAmount>,
    ) -> Result<Amount, PricingError> {
        self.convert(gems, GEMS, GOLD)
    }

    /// Packs are already the denominator -- a direct multiply, no routing
    /// through the generic path.
    pub fn convert_packs_to_gems(
        &self,
        packs: impl Into<RawAmount>,
    ) -> Result<Amount, PricingError> {
        let packs = Amount::normalize(packs)?;
        let gems = self.entry(GEMS, "packs", GEMS)?;
        Ok(Amount::from_decimal(packs.0 * gems.per_pack.0))
    }

    pub fn convert_packs_to_local_currency(
        &self,
        packs: impl Into<RawAmount>,
    ) -> Result<Amount, PricingError> {
        let packs = Amount::normalize(packs)?;
        let local = self.entry(&self.local_currency, "packs", &self.local_currency)?;
        Ok(Amount::from_decimal(packs.0 * local.per_pack.0))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn usd_model() -> PricingModel {
        PricingModel::with_defaults("usd").expect("test: default usd model")
    }

    #[test]
    fn default_pegs_per_pack() {
        let model = usd_model();
        assert_eq!(model.per_pack(GOLD).expect("test: gold entry").0, dec!(1000));
        assert_eq!(model.per_pack(GEMS).expect("test: gems entry").0, dec!(200));
    }

    #[test]
    fn derived_usd_per_pack_is_one_dollar() {
        // 20,000 gems for $100 -> 200 gems/$ -> 200 gems-per-pack / 200 = $1
        let model = usd_model();
        assert_eq!(model.per_pack("usd").expect("test: usd entry").0, dec!(1));
    }

    #[test]
    fn gold_and_gems_to_usd() {
        let model = usd_model();
        let dollar = model
            .convert_gold_to_local_currency(1000)
            .expect("test: gold conversion");
        assert_eq!(dollar.0, dec!(1));

        // 600 gems buys 3 packs at the 600-for-3 peg: $3.00, not $1.00.
        let dollars = model
            .convert_gems_to_local_currency(600)
            .expect("test: gems conversion");
        assert_eq!(dollars.0, dec!(3));
    }

    #[test]
    fn packs_to_gems() {
        let model = usd_model();
        let gems = model.convert_packs_to_gems(3).expect("test: packs conversion");
        assert_eq!(gems.0, dec!(600));
    }

    #[test]
    fn packs_to_usd() {
        let model = usd_model();
        let dollars = model
            .convert_packs_to_local_currency(6)
            .expect("test: packs to usd");
        assert_eq!(dollars.0, dec!(6));
    }

    #[test]
    fn gold_gems_round_trip() {
        let model = usd_model();
        let gems = model.convert_gold_to_gems(1000).expect("test: gold to gems");
        assert_eq!(gems.0, dec!(200));
        let gold = model.convert_gems_to_gold(gems).expect("test: gems to gold");
        assert_eq!(gold.0, dec!(1000));
    }

    #[test]
    fn round_trip_within_truncation_tolerance() {
        let model = usd_model();
        let there = model
            .convert("123.45", GOLD, GEMS)
            .expect("test: forward hop");
        let back = model
            .convert(there, GEMS, GOLD)
            .expect("test: return hop");
        let drift = (back.0 - dec!(123.45)).abs();
        assert!(drift <= dec!(0.01), "round trip drifted by {drift}");
    }

    #[test]
    fn unpriced_currency_fails_construction() {
        let err = PricingModel::with_defaults("eur");
        assert!(
            matches!(err, Err(PricingError::UnconfiguredCurrency(ref c)) if c == "eur"),
            "expected UnconfiguredCurrency, got {err:?}"
        );
    }

    #[test]
    fn unknown_currency_fails_construction() {
        let err = PricingModel::with_defaults("doubloons");
        assert!(matches!(err, Err(PricingError::UnconfiguredCurrency(_))));
    }

    #[test]
    fn currency_code_is_case_insensitive() {
        let model = PricingModel::with_defaults("USD").expect("test: uppercase code");
        assert_eq!(model.local_currency(), "usd");
    }

    #[test]
    fn unknown_unit_in_conversion() {
        let model = usd_model();
        let err = model.convert(100, "pesos", GEMS);
        assert!(
            matches!(err, Err(PricingError::UnknownUnit { .. })),
            "expected UnknownUnit, got {err:?}"
        );
    }

    #[test]
    fn negative_amount_rejected_at_boundary() {
        let model = usd_model();
        let err = model.convert(-100, GOLD, GEMS);
        assert!(matches!(err, Err(PricingError::Amount(_))));
    }

    #[test]
    fn independent_configs_do_not_share_rates() {
        let mut config = PricingConfig::default();
        config
            .currency_prices
            .insert("eur".to_string(), Some(dec!(90.00)));
        let eur = PricingModel::new("eur", &config).expect("test: priced eur model");
        // 20,000 gems / 90 EUR -> 222.2 gems/EUR; 200 / (20000/90) = 0.90.
        // The intermediate division is not exact, so compare at two digits.
        let per_pack = eur.per_pack("eur").expect("test: eur entry").0;
        assert_eq!(per_pack.round_dp(2), dec!(0.90));

        // The default config is untouched.
        assert!(PricingModel::with_defaults("eur").is_err());
    }

    #[test]
    fn local_currency_converts_back_to_gold_and_gems() {
        let model = usd_model();
        let gold = model
            .convert_local_currency_to_gold(1)
            .expect("test: usd to gold");
        assert_eq!(gold.0, dec!(1000));
        let gems = model
            .convert_local_currency_to_gems(1)
            .expect("test: usd to gems");
        assert_eq!(gems.0, dec!(200));
    }

    #[test]
    fn zero_peg_quantity_rejected() {
        let config = PricingConfig {
            gems_quantity: dec!(0),
            ..PricingConfig::default()
        };
        let err = PricingModel::new("usd", &config);
        assert!(
            matches!(err, Err(PricingError::ZeroPeg)),
            "expected ZeroPeg, got {err:?}"
        );
    }

    #[test]
    fn zero_peg_cost_rejected() {
        let config = PricingConfig {
            gold_cost: dec!(0),
            ..PricingConfig::default()
        };
        assert!(matches!(
            PricingModel::new("usd", &config),
            Err(PricingError::ZeroPeg)
        ));
    }

    #[test]
    fn zero_maximum_buyable_gems_rejected() {
        let config = PricingConfig {
            maximum_buyable_gems: dec!(0),
            ..PricingConfig::default()
        };
        assert!(matches!(
            PricingModel::new("usd", &config),
            Err(PricingError::ZeroPeg)
        ));
    }

    #[test]
    fn zero_bundle_price_rejected() {
        let mut config = PricingConfig::default();
        config
            .currency_prices
            .insert("usd".to_string(), Some(dec!(0)));
        let err = PricingModel::new("usd", &config);
        assert!(
            matches!(err, Err(PricingError::ZeroCurrencyPrice(ref c)) if c == "usd"),
            "expected ZeroCurrencyPrice, got {err:?}"
        );
    }
}
