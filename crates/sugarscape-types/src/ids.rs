//! Type-safe identifier wrappers around `u64`.
//!
//! Every entity in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. IDs are handed out by a
//! single [`IdSequence`] in bootstrap order, so two runs built from the same
//! seed and landscape assign identical IDs.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw identifier value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner `u64` value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a sugar or spice patch.
    PatchId
}

define_id! {
    /// Unique identifier for a trader agent.
    TraderId
}

/// Monotonic source of identifiers shared by patches and traders.
///
/// Patches and traders draw from the same counter, so no patch ever shares
/// a raw value with a trader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Create a sequence starting at zero.
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next patch identifier.
    pub const fn next_patch(&mut self) -> PatchId {
        PatchId(self.advance())
    }

    /// Allocate the next trader identifier.
    pub const fn next_trader(&mut self) -> TraderId {
        TraderId(self.advance())
    }

    /// Number of identifiers handed out so far.
    pub const fn allocated(&self) -> u64 {
        self.next
    }

    const fn advance(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}
