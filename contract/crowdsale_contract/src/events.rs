use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::allocation::StakeholderAllocation;
use crate::storage_types::VaultDisposition;

#[contracttype]
#[derive(Clone)]
pub struct GrantAddedEvent {
    pub grantee: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct GrantUpdatedEvent {
    pub grantee: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct GrantDeletedEvent {
    pub grantee: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct ExternalRaisedUpdatedEvent {
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct TokensPurchasedEvent {
    pub purchaser: Address,
    pub paid: i128,
    pub tokens: i128,
    pub rate: u32,
    pub escrowed: bool,
}

#[contracttype]
#[derive(Clone)]
pub struct FinalizedEvent {
    pub allocation: StakeholderAllocation,
    pub disposition: VaultDisposition,
    pub grantees: u32,
}

pub fn emit_grant_added(env: &Env, event: GrantAddedEvent) {
    env.events()
        .publish((Symbol::new(env, "grant_added"),), event);
}

pub fn emit_grant_updated(env: &Env, event: GrantUpdatedEvent) {
    env.events()
        .publish((Symbol::new(env, "grant_updated"),), event);
}

pub fn emit_grant_deleted(env: &Env, event: GrantDeletedEvent) {
    env.events()
        .publish((Symbol::new(env, "grant_deleted"),), event);
}

pub fn emit_external_raised_updated(env: &Env, event: ExternalRaisedUpdatedEvent) {
    env.events()
        .publish((Symbol::new(env, "external_raised_updated"),), event);
}

pub fn emit_tokens_purchased(env: &Env, event: TokensPurchasedEvent) {
    env.events()
        .publish((Symbol::new(env, "tokens_purchased"),), event);
}

pub fn emit_finalized(env: &Env, event: FinalizedEvent) {
    env.events()
        .publish((Symbol::new(env, "finalized"),), event);
}
