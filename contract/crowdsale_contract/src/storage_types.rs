use soroban_sdk::{contracterror, contracttype, Address};
use sale_common::OwnershipError;

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Finalized,
    NativeRaised,
    ExternalRaised,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Grantee(Address),
    GranteeKeys,
}

// Accounts receiving the stakeholder pools at finalization
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct StakeholderWallets {
    pub founder: Address,
    pub oem: Address,
    pub bounties: Address,
    pub reserve: Address,
}

// Campaign configuration, fixed at initialization
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct CampaignConfig {
    pub start_time: u64,               // First second of the sale
    pub end_time: u64,                 // First second after the sale
    pub wallet: Address,               // Receives direct purchases and closed escrow
    pub stakeholders: StakeholderWallets,
    pub sale_token: Address,           // Ledger minted by this contract
    pub vault: Address,                // Refund vault owned by this contract
    pub payment_token: Address,        // Native asset contract contributions are paid in
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum CampaignPhase {
    Pending = 0,
    Active = 1,
    Ended = 2,
    Finalized = 3,
}

// What happens to the escrow at finalization
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum VaultDisposition {
    Refunding = 0,
    Closed = 1,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdsaleError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    OutsideWindow = 4,
    InvalidAccount = 5,
    InvalidAmount = 6,
    GranteeNotFound = 7,
    RegistryFull = 8,
    AlreadyFinalized = 9,
    InvalidConfig = 10,
    Overflow = 11,
}

impl From<OwnershipError> for CrowdsaleError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NotInitialized => CrowdsaleError::NotInitialized,
            OwnershipError::NotOwner | OwnershipError::NotPendingOwner => {
                CrowdsaleError::Unauthorized
            }
        }
    }
}

// Constants
pub const MAX_GRANTEES: u32 = 100;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
