//! Presale grantees: a bounded map from account to token amount plus an
//! insertion-ordered key list, so finalization can mint every grantee exactly
//! once in a deterministic order.

use soroban_sdk::{Address, Env, Vec};

use crate::storage_types::{CrowdsaleError, PersistentKey, MAX_GRANTEES, TTL_PERSISTENT};

pub fn keys(e: &Env) -> Vec<Address> {
    e.storage()
        .persistent()
        .get(&PersistentKey::GranteeKeys)
        .unwrap_or_else(|| Vec::new(e))
}

pub fn amount_of(e: &Env, grantee: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&PersistentKey::Grantee(grantee.clone()))
        .unwrap_or(0)
}

/// Inserts or overwrites a grant. Returns `true` when the account is new.
/// Only new accounts count against `MAX_GRANTEES`.
pub fn upsert(e: &Env, grantee: &Address, amount: i128) -> Result<bool, CrowdsaleError> {
    let key = PersistentKey::Grantee(grantee.clone());
    let added = !e.storage().persistent().has(&key);

    if added {
        let mut keys = keys(e);
        if keys.len() >= MAX_GRANTEES {
            return Err(CrowdsaleError::RegistryFull);
        }
        keys.push_back(grantee.clone());
        write_keys(e, &keys);
    }

    e.storage().persistent().set(&key, &amount);
    extend_persistent(e, &key);
    Ok(added)
}

pub fn remove(e: &Env, grantee: &Address) -> Result<(), CrowdsaleError> {
    let key = PersistentKey::Grantee(grantee.clone());
    if !e.storage().persistent().has(&key) {
        return Err(CrowdsaleError::GranteeNotFound);
    }

    let mut keys = keys(e);
    if let Some(index) = keys.first_index_of(grantee.clone()) {
        keys.remove(index);
    }
    write_keys(e, &keys);
    e.storage().persistent().remove(&key);
    Ok(())
}

fn write_keys(e: &Env, keys: &Vec<Address>) {
    e.storage().persistent().set(&PersistentKey::GranteeKeys, keys);
    extend_persistent(e, &PersistentKey::GranteeKeys);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}
