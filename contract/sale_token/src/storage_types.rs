use soroban_sdk::{contracterror, contracttype, Address};
use sale_common::OwnershipError;

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    TotalSupply,
    TransfersEnabled,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Balance(Address),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    TransfersLocked = 4,
    InvalidAmount = 5,
    InsufficientBalance = 6,
    Overflow = 7,
}

impl From<OwnershipError> for TokenError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NotInitialized => TokenError::NotInitialized,
            OwnershipError::NotOwner | OwnershipError::NotPendingOwner => TokenError::Unauthorized,
        }
    }
}

// Constants
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
