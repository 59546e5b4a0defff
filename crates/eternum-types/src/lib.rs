//! Shared snapshot types for the Eternum prediction engine.
//!
//! This crate is the single source of truth for the data the engine reads
//! from the indexer-backed state cache. Types flow to `TypeScript` via
//! `ts-rs` for the client that renders engine output.
//!
//! # Modules
//!
//! - [`ids`] -- Typed entity ids and owner addresses
//! - [`enums`] -- Troops, tiers, biomes, hex directions, action types
//! - [`structs`] -- Entity snapshots (resources, storage, stamina, troops,
//!   pools, map occupants)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ActionType, BiomeType, HexDirection, StructureCategory, TroopTier, TroopType};
pub use ids::{ArmyId, ContractAddress, StructureId};
pub use structs::{
    ArmyOccupant, ExploredTile, HexCoord, MarketPool, ResourceAccount, StaminaState,
    StorageState, StructureOccupant, TroopForce,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Exporting writes each type to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::ArmyId::export_all();
        let _ = crate::ids::StructureId::export_all();
        let _ = crate::ids::ContractAddress::export_all();

        // Enums
        let _ = crate::enums::TroopType::export_all();
        let _ = crate::enums::TroopTier::export_all();
        let _ = crate::enums::BiomeType::export_all();
        let _ = crate::enums::HexDirection::export_all();
        let _ = crate::enums::StructureCategory::export_all();
        let _ = crate::enums::ActionType::export_all();

        // Structs
        let _ = crate::structs::HexCoord::export_all();
        let _ = crate::structs::ResourceAccount::export_all();
        let _ = crate::structs::StorageState::export_all();
        let _ = crate::structs::StaminaState::export_all();
        let _ = crate::structs::TroopForce::export_all();
        let _ = crate::structs::MarketPool::export_all();
        let _ = crate::structs::ExploredTile::export_all();
        let _ = crate::structs::StructureOccupant::export_all();
        let _ = crate::structs::ArmyOccupant::export_all();
    }
}
