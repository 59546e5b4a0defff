//! Property-based tests for the prediction engine.
//!
//! These pin down the guarantees the client relies on when it renders
//! predictions between chain updates.

#![allow(missing_docs)]
#![allow(clippy::arithmetic_side_effects)] // Test arithmetic is bounded by the strategies
#![allow(clippy::cast_sign_loss)] // Grid coordinates in strategies are non-negative

use proptest::prelude::*;

use eternum_engine::fixed::Precision;
use eternum_engine::hex::{chebyshev_distance, direction_to, hex_distance, neighbors};
use eternum_engine::occupancy::{ArmyMap, ExploredMap, StructureMap};
use eternum_engine::production::max_units_from_storage;
use eternum_engine::{
    BankConfig, HexGrid, MapSnapshot, OccupancyCache, SwapDirection, TroopConfig,
    compute_balance, compute_output_amount, compute_stamina, find_shortest_path,
    get_chances_of_success, quote_swap,
};
use eternum_types::{
    ArmyId, ArmyOccupant, BiomeType, ContractAddress, ExploredTile, HexCoord, MarketPool,
    ResourceAccount, StaminaState, StorageState, StructureCategory, StructureId,
    StructureOccupant, TroopForce, TroopTier, TroopType,
};
use rust_decimal::Decimal;

const PRECISION: u128 = 1_000_000_000;
const GRID: i32 = 12;

fn coord() -> impl Strategy<Value = HexCoord> {
    (0..GRID, 0..GRID).prop_map(|(col, row)| HexCoord::new(col, row))
}

fn tier() -> impl Strategy<Value = TroopTier> {
    prop_oneof![Just(TroopTier::T1), Just(TroopTier::T2), Just(TroopTier::T3)]
}

fn force() -> impl Strategy<Value = TroopForce> {
    (0u128..1_000_000, 0u128..1_000_000, 0u128..1_000_000, tier()).prop_map(
        |(knights, paladins, crossbowmen, tier)| {
            let health = (knights + paladins + crossbowmen) * PRECISION;
            TroopForce {
                knight_count: knights * PRECISION,
                paladin_count: paladins * PRECISION,
                crossbowman_count: crossbowmen * PRECISION,
                tier,
                current_health: health,
                lifetime_health: health,
            }
        },
    )
}

fn explored_grid() -> ExploredMap {
    let mut explored = ExploredMap::new();
    for col in 0..GRID {
        for row in 0..GRID {
            explored.insert(HexCoord::new(col, row), BiomeType::Grassland);
        }
    }
    explored
}

fn structure(id: u32, coord: HexCoord) -> StructureOccupant {
    StructureOccupant {
        structure_id: StructureId::new(id),
        coord,
        owner: ContractAddress::new("0x1"),
        category: StructureCategory::Village,
    }
}

fn army(id: u32, coord: HexCoord) -> ArmyOccupant {
    ArmyOccupant {
        army_id: ArmyId::new(id),
        coord,
        owner: ContractAddress::new("0x2"),
        troop_type: TroopType::Paladin,
        tier: TroopTier::T1,
        count: PRECISION,
        stamina: StaminaState::default(),
        battle_cooldown_end: 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Production without a cap or storage limit is linear in elapsed ticks.
    #[test]
    fn prop_food_production_is_linear(
        stored in 0u128..1_000_000,
        rate in 1u128..10_000_000_000,
        last in 0u64..1_000_000,
        elapsed in 0u64..1_000_000,
    ) {
        let account = ResourceAccount {
            raw_balance: stored * PRECISION,
            production_rate_per_tick: rate,
            last_updated_tick: last,
            output_amount_left: 0,
            building_count: 1,
            is_food: true,
        };
        let storage = StorageState { capacity_kg: 0, used_kg: 0, resource_weight_kg: 0 };
        let projection = compute_balance(&account, &storage, last + elapsed, Precision::DEFAULT);

        let expected = stored + u128::from(elapsed) * rate / PRECISION;
        prop_assert_eq!(projection.map(|p| p.balance), Ok(expected));
    }

    /// Production never pushes a balance past the storehouse ceiling, and never
    /// lowers what is already held.
    #[test]
    fn prop_balance_respects_storage(
        stored in 0u128..10_000,
        rate in 0u128..100_000_000_000,
        elapsed in 0u64..100_000,
        capacity in 0u128..1_000_000,
        used in 0u128..1_000_000,
        weight in 1u128..1_000,
        is_food in any::<bool>(),
    ) {
        let account = ResourceAccount {
            raw_balance: stored * PRECISION,
            production_rate_per_tick: rate,
            last_updated_tick: 0,
            output_amount_left: 1_000_000 * PRECISION,
            building_count: 2,
            is_food,
        };
        let storage = StorageState {
            capacity_kg: capacity,
            used_kg: used,
            resource_weight_kg: weight,
        };
        let projection = compute_balance(&account, &storage, elapsed, Precision::DEFAULT);
        prop_assert!(projection.is_ok());

        if let (Ok(projection), Some(max_units)) = (projection, max_units_from_storage(&storage)) {
            // Production never eats into units already held
            prop_assert!(projection.balance >= stored);
            prop_assert_eq!(projection.balance, stored + projection.amount_produced);
            prop_assert!(projection.balance <= max_units.max(stored));
            if projection.at_max_capacity {
                prop_assert_eq!(projection.balance, max_units.max(stored));
            }
        }
    }

    /// Stamina never exceeds its maximum and never falls as ticks pass.
    #[test]
    fn prop_stamina_bounded_and_monotone(
        amount in 0u64..200,
        max in 1u64..200,
        regen in 0u64..50,
        boost in 0u64..10,
        last in 0u64..10_000,
        step in 0u64..1_000,
    ) {
        let state = StaminaState {
            current_amount: amount,
            last_update_tick: last,
            max_stamina: max,
            regen_per_tick: regen,
            boost,
        };
        let now = compute_stamina(&state, last + step);
        let later = compute_stamina(&state, last + step + 1);
        prop_assert!(now.current <= now.max);
        prop_assert!(later.current >= now.current);
        if now.current == now.max {
            prop_assert_eq!(now.ticks_until_full, Some(0));
        }
    }

    /// Zero input always yields zero output.
    #[test]
    fn prop_zero_input_zero_output(
        input_reserve in 0u128..u128::from(u64::MAX),
        output_reserve in 0u128..u128::from(u64::MAX),
        fee in 0u128..100,
    ) {
        prop_assert_eq!(
            compute_output_amount(0, input_reserve, output_reserve, fee, 100),
            Ok(0)
        );
    }

    /// A swap never drains the pool and never shrinks the product of reserves.
    #[test]
    fn prop_swap_keeps_invariant(
        lords in 1u128..1_000_000_000_000,
        resource in 1u128..1_000_000_000_000,
        amount in 0u128..1_000_000_000_000,
        buy in any::<bool>(),
    ) {
        let pool = MarketPool {
            lords_reserve: lords,
            resource_reserve: resource,
            fee_numerator: 15,
            fee_denominator: 100,
        };
        let direction = if buy { SwapDirection::BuyResource } else { SwapDirection::SellResource };
        let quote = quote_swap(&pool, direction, amount, &BankConfig::default());
        prop_assert!(quote.is_ok());
        if let Ok(quote) = quote {
            let after = quote.pool_after;
            prop_assert!(after.lords_reserve > 0);
            prop_assert!(after.resource_reserve > 0);
            prop_assert!(after.lords_reserve * after.resource_reserve >= lords * resource);
        }
    }

    /// Odds are always a probability.
    #[test]
    fn prop_chances_are_probabilities(attacker in force(), defender in force()) {
        let troops = TroopConfig::default();
        let chance = get_chances_of_success(Some(&attacker), Some(&defender), &troops);
        prop_assert!(chance.is_ok());
        if let Ok(chance) = chance {
            prop_assert!(chance >= Decimal::ZERO);
            prop_assert!(chance <= Decimal::ONE);
        }
    }

    /// Adjacency is symmetric.
    #[test]
    fn prop_neighbours_are_mutual(col in -1_000i32..1_000, row in -1_000i32..1_000) {
        let origin = HexCoord::new(col, row);
        for (_, next) in neighbors(origin) {
            prop_assert!(direction_to(next, origin).is_some());
            prop_assert_eq!(hex_distance(origin, next), 1);
        }
    }

    /// Targets beyond the search radius are rejected outright.
    #[test]
    fn prop_far_targets_rejected(start in coord(), end in coord(), max in 0u64..6) {
        let explored = explored_grid();
        let (structures, armies) = (StructureMap::new(), ArmyMap::new());
        let grid = HexGrid::new(&explored, &structures, &armies);
        let path = find_shortest_path(start, end, &grid, max);
        if chebyshev_distance(start, end) > max {
            prop_assert!(path.is_empty());
        }
        if hex_distance(start, end) <= max {
            prop_assert_eq!(path.len() as u64, hex_distance(start, end) + 1);
        }
    }

    /// Paths never cross structures and only end on armies.
    #[test]
    fn prop_paths_avoid_occupants(
        start in coord(),
        end in coord(),
        walls in proptest::collection::vec(coord(), 0..30),
        troops in proptest::collection::vec(coord(), 0..10),
    ) {
        let explored = explored_grid();
        let structures: StructureMap = walls
            .iter()
            .filter(|&&c| c != start)
            .zip(1u32..)
            .map(|(&c, id)| (c, structure(id, c)))
            .collect();
        let armies: ArmyMap = troops
            .iter()
            .filter(|&&c| c != start)
            .zip(1u32..)
            .map(|(&c, id)| (c, army(id, c)))
            .collect();
        let grid = HexGrid::new(&explored, &structures, &armies);

        let path = find_shortest_path(start, end, &grid, 30);
        for (index, hex) in path.iter().enumerate() {
            prop_assert!(!structures.contains_key(hex) || *hex == start);
            if armies.contains_key(hex) {
                prop_assert!(*hex == end || *hex == start);
                prop_assert!(index + 1 == path.len() || index == 0);
            }
        }
        for pair in path.windows(2) {
            if let [a, b] = pair {
                prop_assert!(direction_to(*a, *b).is_some());
            }
        }
    }

    /// A refresh leaves exactly what the latest snapshot reports.
    #[test]
    fn prop_refresh_does_not_accumulate(
        first in proptest::collection::vec(coord(), 0..20),
        second in proptest::collection::vec(coord(), 0..20),
    ) {
        let snapshot = |coords: &[HexCoord]| MapSnapshot {
            explored: coords
                .iter()
                .map(|&coord| ExploredTile { coord, biome: BiomeType::Taiga })
                .collect(),
            structures: Vec::new(),
            armies: coords.iter().zip(1u32..).map(|(&c, id)| army(id, c)).collect(),
        };

        let mut cache = OccupancyCache::from_snapshot(snapshot(&first));
        cache.refresh(snapshot(&second));
        prop_assert_eq!(&cache, &OccupancyCache::from_snapshot(snapshot(&second)));
        for hex in &first {
            if !second.contains(hex) {
                prop_assert!(!cache.armies().contains_key(hex));
                prop_assert!(!cache.explored().contains_key(hex));
            }
        }
    }
}
