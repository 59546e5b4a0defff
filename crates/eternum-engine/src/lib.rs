//! Deterministic game-state prediction for the Eternum client.
//!
//! Every function here is a pure computation over snapshots read from the
//! indexer: given the same inputs and the same tick it returns the same
//! answer the contracts would. The client calls it on every frame to show
//! balances, stamina, battle odds, swap quotes, and army paths without
//! waiting for the chain. Nothing in this crate performs I/O or reads a
//! clock; the current tick and all tunables are passed in.
//!
//! # Modules
//!
//! - [`config`] -- Balance tunables grouped per component, with defaults.
//! - [`error`] -- Overflow reporting for arithmetic outside the documented
//!   domain.
//! - [`fixed`] -- Fixed-point scale and tick arithmetic helpers.
//! - [`production`] -- Resource balances, storage clamping, depletion.
//! - [`stamina`] -- Stamina regeneration and travel costs.
//! - [`combat`] -- Troop strength, modifiers, odds, and loot.
//! - [`market`] -- Constant-product AMM quotes, slippage, and price.
//! - [`hex`] -- Offset hex grid geometry.
//! - [`occupancy`] -- Map occupancy cache and the per-army grid view.
//! - [`pathfinding`] -- A* shortest path between two hexes.
//! - [`movement`] -- Stamina-bounded action reachability and batching.

pub mod combat;
pub mod config;
pub mod error;
pub mod fixed;
pub mod hex;
pub mod market;
pub mod movement;
pub mod occupancy;
pub mod pathfinding;
pub mod production;
pub mod stamina;

// Re-export primary types at crate root.
pub use combat::{
    CombatSide, Combatant, EngagementPreview, TroopLosses, calculate_remaining_troops,
    get_chances_of_success, get_max_resource_amount_stolen, preview_engagement,
};
pub use config::{
    BankConfig, CombatConfig, EngineConfig, PrecisionConfig, StaminaConfig, TickConfig,
    TroopConfig,
};
pub use error::EngineError;
pub use fixed::Precision;
pub use market::{
    MarketPrice, SwapDirection, SwapQuote, compute_market_price, compute_output_amount,
    compute_slippage, quote_swap,
};
pub use movement::{
    ActionBatch, ActionBudget, ActionPaths, ActionStep, find_action_paths, plan_action_batches,
};
pub use occupancy::{
    HexGrid, HexOccupancy, MapSnapshot, OccupancyCache, resolve_occupancy_at_hex,
};
pub use pathfinding::find_shortest_path;
pub use production::{
    BalanceChange, BalanceProjection, DepletionEstimate, compute_balance, compute_depletion_time,
};
pub use stamina::{
    Provisions, StaminaProjection, army_stamina_state, compute_stamina, fresh_stamina_state,
    max_explore_steps, max_travel_steps, spend_stamina,
};
