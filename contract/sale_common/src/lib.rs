#![no_std]

pub mod interfaces;
pub mod ownership;


use soroban_sdk::contracttype;

pub use ownership::OwnershipError;

/// Lifecycle of the refund vault. Moves forward only: `Active` to either
/// `Refunding` or `Closed`, both terminal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VaultState {
    Active = 0,
    Refunding = 1,
    Closed = 2,
}

pub const SECONDS_PER_DAY: u64 = 86_400;
