//! Client-side views of the sale token and the refund vault.
//!
//! The crowdsale and the vault call each other through these traits instead of
//! linking the other contract crates, so every contract keeps its own exports.

use soroban_sdk::{contractclient, Address, Env};

use crate::VaultState;

#[contractclient(name = "LedgerClient")]
pub trait LedgerInterface {
    fn mint(env: Env, caller: Address, to: Address, amount: i128);
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
    fn total_supply(env: Env) -> i128;
    fn enable_transfers(env: Env, caller: Address);
    fn transfers_enabled(env: Env) -> bool;
    fn transfer_ownership(env: Env, caller: Address, candidate: Address);
    fn claim_ownership(env: Env, caller: Address);
    fn owner(env: Env) -> Address;
}

#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn deposit(env: Env, caller: Address, contributor: Address, paid: i128, tokens: i128);
    fn enable_refunds(env: Env, caller: Address);
    fn close(env: Env, caller: Address);
    fn state(env: Env) -> VaultState;
    fn transfer_ownership(env: Env, caller: Address, candidate: Address);
    fn claim_ownership(env: Env, caller: Address);
    fn owner(env: Env) -> Address;
}
