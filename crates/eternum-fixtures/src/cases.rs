//! Fixture case schema and evaluation.
//!
//! A fixture file is a JSON document with a `cases` array. Each case names
//! one engine computation, its inputs, and the output the contracts
//! produced for the same inputs.

use eternum_engine::{
    EngineConfig, EngineError, MapSnapshot, MarketPrice, OccupancyCache, compute_balance,
    compute_market_price, compute_output_amount, compute_stamina, find_shortest_path,
    get_chances_of_success,
};
use eternum_types::{ResourceAccount, StaminaState, StorageState, TroopForce};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureFile {
    /// Cases in file order.
    pub cases: Vec<FixtureCase>,
}

/// One named case.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureCase {
    /// Human-readable name used in logs.
    pub name: String,
    /// The computation and its expected output.
    pub check: Check,
}

/// A computation with recorded inputs and the contract's answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Projected resource balance.
    Balance {
        /// Stored account.
        account: ResourceAccount,
        /// Storehouse state.
        storage: StorageState,
        /// Tick to project to.
        current_tick: u64,
        /// Expected whole-unit balance.
        expected: u128,
    },
    /// Projected stamina.
    Stamina {
        /// Stored stamina.
        state: StaminaState,
        /// Armies tick to project to.
        current_tick: u64,
        /// Expected stamina.
        expected: u64,
    },
    /// AMM swap output.
    Swap {
        /// Amount paid in.
        input: u128,
        /// Reserve of the paid asset.
        input_reserve: u128,
        /// Reserve of the received asset.
        output_reserve: u128,
        /// LP fee numerator.
        fee_numerator: u128,
        /// LP fee denominator.
        fee_denominator: u128,
        /// Expected output.
        expected: u128,
    },
    /// Spot price; `null` means infinite.
    Price {
        /// LORDS reserve.
        lords_reserve: u128,
        /// Resource reserve.
        resource_reserve: u128,
        /// Expected price.
        expected: Option<Decimal>,
    },
    /// Battle odds.
    Chance {
        /// Attacking force.
        attacker: TroopForce,
        /// Defending force.
        defender: TroopForce,
        /// Expected probability.
        expected: Decimal,
    },
    /// Shortest path length.
    Path {
        /// Origin hex.
        start: eternum_types::HexCoord,
        /// Target hex.
        end: eternum_types::HexCoord,
        /// Search radius.
        max_distance: u64,
        /// Map state at the time.
        map: MapFixture,
        /// Expected number of hexes, both ends included; 0 when unreachable.
        expected_len: usize,
    },
}

/// Map occupancy for a path case.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapFixture {
    /// Explored tiles.
    pub explored: Vec<eternum_types::ExploredTile>,
    /// Structures.
    pub structures: Vec<eternum_types::StructureOccupant>,
    /// Armies.
    pub armies: Vec<eternum_types::ArmyOccupant>,
}

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The engine agrees with the contract.
    Pass,
    /// The engine disagrees.
    Mismatch {
        /// Recorded contract output.
        expected: String,
        /// Engine output.
        actual: String,
    },
}

fn compare<T: PartialEq + std::fmt::Debug>(expected: T, actual: T) -> Outcome {
    if expected == actual {
        Outcome::Pass
    } else {
        Outcome::Mismatch {
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}

impl Check {
    /// Short label for the computation.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Balance { .. } => "balance",
            Self::Stamina { .. } => "stamina",
            Self::Swap { .. } => "swap",
            Self::Price { .. } => "price",
            Self::Chance { .. } => "chance",
            Self::Path { .. } => "path",
        }
    }

    /// Run the computation under `config` and compare with the recording.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the engine reports an overflow.
    pub fn evaluate(&self, config: &EngineConfig) -> Result<Outcome, EngineError> {
        let outcome = match self {
            Self::Balance {
                account,
                storage,
                current_tick,
                expected,
            } => {
                let precision = config.precision.precision();
                let projection = compute_balance(account, storage, *current_tick, precision)?;
                compare(*expected, projection.balance)
            }
            Self::Stamina {
                state,
                current_tick,
                expected,
            } => compare(*expected, compute_stamina(state, *current_tick).current),
            Self::Swap {
                input,
                input_reserve,
                output_reserve,
                fee_numerator,
                fee_denominator,
                expected,
            } => compare(
                *expected,
                compute_output_amount(
                    *input,
                    *input_reserve,
                    *output_reserve,
                    *fee_numerator,
                    *fee_denominator,
                )?,
            ),
            Self::Price {
                lords_reserve,
                resource_reserve,
                expected,
            } => {
                let expected = expected.map_or(MarketPrice::Infinite, MarketPrice::Finite);
                compare(expected, compute_market_price(*lords_reserve, *resource_reserve)?)
            }
            Self::Chance {
                attacker,
                defender,
                expected,
            } => compare(
                *expected,
                get_chances_of_success(Some(attacker), Some(defender), &config.troops)?,
            ),
            Self::Path {
                start,
                end,
                max_distance,
                map,
                expected_len,
            } => {
                let cache = OccupancyCache::from_snapshot(MapSnapshot {
                    explored: map.explored.clone(),
                    structures: map.structures.clone(),
                    armies: map.armies.clone(),
                });
                let path = find_shortest_path(*start, *end, &cache.grid(), *max_distance);
                compare(*expected_len, path.len())
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FixtureFile {
        serde_json::from_str(json).unwrap_or(FixtureFile { cases: Vec::new() })
    }

    #[test]
    fn swap_case_passes() {
        let file = parse(
            r#"{"cases": [{"name": "three percent fee", "check": {"swap": {
                "input": 1000, "input_reserve": 10000, "output_reserve": 10000,
                "fee_numerator": 30, "fee_denominator": 1000, "expected": 884}}}]}"#,
        );
        let outcomes: Vec<_> = file
            .cases
            .iter()
            .map(|case| case.check.evaluate(&EngineConfig::default()))
            .collect();
        assert_eq!(outcomes, vec![Ok(Outcome::Pass)]);
    }

    #[test]
    fn mismatch_is_reported() {
        let file = parse(
            r#"{"cases": [{"name": "stamina", "check": {"stamina": {
                "state": {"current_amount": 90, "last_update_tick": 0, "max_stamina": 100,
                          "regen_per_tick": 5, "boost": 0},
                "current_tick": 1, "expected": 100}}}]}"#,
        );
        let outcome = file
            .cases
            .first()
            .map(|case| case.check.evaluate(&EngineConfig::default()));
        assert_eq!(
            outcome,
            Some(Ok(Outcome::Mismatch {
                expected: "100".to_owned(),
                actual: "95".to_owned(),
            }))
        );
    }

    #[test]
    fn infinite_price_is_null() {
        let file = parse(
            r#"{"cases": [{"name": "empty pool", "check": {"price": {
                "lords_reserve": 5, "resource_reserve": 0, "expected": null}}}]}"#,
        );
        assert_eq!(file.cases.len(), 1);
        let kinds: Vec<_> = file.cases.iter().map(|case| case.check.kind()).collect();
        assert_eq!(kinds, vec!["price"]);
        let outcome = file
            .cases
            .first()
            .map(|case| case.check.evaluate(&EngineConfig::default()));
        assert_eq!(outcome, Some(Ok(Outcome::Pass)));
    }

    #[test]
    fn bundled_fixtures_parse() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("cases.json");
        let contents = std::fs::read_to_string(path).unwrap_or_default();
        let file: Result<FixtureFile, _> = serde_json::from_str(&contents);
        assert!(file.is_ok(), "{file:?}");
        let all_pass = file.ok().is_some_and(|file| {
            file.cases.iter().all(|case| {
                case.check.evaluate(&EngineConfig::default()) == Ok(Outcome::Pass)
            })
        });
        assert!(all_pass);
    }
}
