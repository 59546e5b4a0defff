//! Type-safe identifier wrappers for on-chain entities.
//!
//! The contract addresses every army and structure by a numeric entity id.
//! Wrapping them keeps an army id from being passed where a structure id is
//! expected. Player identity is the hex-encoded [`ContractAddress`] of the
//! owning account.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around a `u32` entity id with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
        )]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw entity id.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the inner entity id.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Entity id of an army (explorer troops on the world map).
    ArmyId
}

define_id! {
    /// Entity id of a structure (realm, village, bank, mine, hyperstructure).
    StructureId
}

/// Hex-encoded account address that owns an entity.
///
/// Addresses are compared case-insensitively and ignoring leading zeros
/// after the `0x` prefix, since the indexer and the wallet do not agree on
/// padding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ContractAddress(pub String);

impl ContractAddress {
    /// Wrap an address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Whether two addresses refer to the same account.
    pub fn same_account(&self, other: &Self) -> bool {
        normalize(&self.0) == normalize(&other.0)
    }
}

impl core::fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize(address: &str) -> String {
    let lower = address.trim().to_ascii_lowercase();
    let digits = lower.strip_prefix("0x").unwrap_or(&lower);
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_matches_raw() {
        let id = ArmyId::new(190);
        assert_eq!(id.to_string(), "190");
        assert_eq!(u32::from(id), 190);
    }

    #[test]
    fn id_serializes_transparently() {
        let json = serde_json::to_string(&StructureId::new(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));
    }

    #[test]
    fn addresses_ignore_case_and_padding() {
        let a = ContractAddress::new("0x00ABC");
        let b = ContractAddress::new("0xabc");
        assert!(a.same_account(&b));
        assert!(!a.same_account(&ContractAddress::new("0xabd")));
    }

    #[test]
    fn zero_address_normalizes() {
        assert!(ContractAddress::new("0x0").same_account(&ContractAddress::new("0x000")));
    }
}
