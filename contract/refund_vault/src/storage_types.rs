use soroban_sdk::{contracterror, contracttype, Address};
use sale_common::OwnershipError;

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Wallet,
    SaleToken,
    PaymentToken,
    State,
    RefundDeadline,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Deposit(Address),
}

/// Escrowed payment and the token credit reserved against it.
#[derive(Clone, Debug, Default, PartialEq)]
#[contracttype]
pub struct VaultDeposit {
    pub paid: i128,
    pub tokens: i128,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidState = 4,
    RefundWindowClosed = 5,
    InvalidAmount = 6,
    InsufficientDeposit = 7,
    Overflow = 8,
}

impl From<OwnershipError> for VaultError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NotInitialized => VaultError::NotInitialized,
            OwnershipError::NotOwner | OwnershipError::NotPendingOwner => VaultError::Unauthorized,
        }
    }
}

// Constants
pub const REFUND_TIME_FRAME_DAYS: u64 = 60;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
