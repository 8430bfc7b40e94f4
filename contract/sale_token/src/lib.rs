#![no_std]

#[cfg(test)]
mod test;

mod storage_types;
pub use storage_types::TokenError;
use storage_types::{DataKey, PersistentKey, TTL_INSTANCE, TTL_PERSISTENT};

use sale_common::ownership;
use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

/// Sale token ledger. Minting belongs to the owner (the crowdsale while the
/// sale runs); transfers and burns stay locked until the owner unlocks them
/// at finalization.
#[contract]
pub struct SaleToken;

#[contractimpl]
impl SaleToken {
    pub fn initialize(e: Env, owner: Address) -> Result<(), TokenError> {
        if ownership::has_owner(&e) {
            return Err(TokenError::AlreadyInitialized);
        }
        owner.require_auth();

        ownership::init_owner(&e, &owner);
        e.storage().instance().set(&DataKey::TotalSupply, &0i128);
        e.storage().instance().set(&DataKey::TransfersEnabled, &false);
        extend_instance(&e);
        Ok(())
    }

    /// Mint new tokens. Allowed while transfers are locked.
    pub fn mint(e: Env, caller: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        ownership::require_owner(&e, &caller)?;
        check_mint_amount(amount)?;

        let supply = total_supply(&e)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = read_balance(&e, &to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        e.storage().instance().set(&DataKey::TotalSupply, &supply);
        write_balance(&e, &to, balance);
        extend_instance(&e);

        e.events().publish(
            (Symbol::new(&e, "token"), Symbol::new(&e, "mint")),
            (to, amount),
        );
        Ok(())
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        check_unlocked(&e)?;
        check_amount(amount)?;

        spend_balance(&e, &from, amount)?;
        let balance = read_balance(&e, &to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        write_balance(&e, &to, balance);

        e.events().publish(
            (Symbol::new(&e, "token"), Symbol::new(&e, "transfer")),
            (from, to, amount),
        );
        Ok(())
    }

    /// Destroy `amount` of the holder's own tokens.
    pub fn burn(e: Env, from: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        check_unlocked(&e)?;
        check_amount(amount)?;

        spend_balance(&e, &from, amount)?;
        let supply = total_supply(&e) - amount;
        e.storage().instance().set(&DataKey::TotalSupply, &supply);
        extend_instance(&e);

        e.events().publish(
            (Symbol::new(&e, "token"), Symbol::new(&e, "burn")),
            (from, amount),
        );
        Ok(())
    }

    /// Lift the transfer lock. Irreversible.
    pub fn enable_transfers(e: Env, caller: Address) -> Result<(), TokenError> {
        ownership::require_owner(&e, &caller)?;
        e.storage().instance().set(&DataKey::TransfersEnabled, &true);
        extend_instance(&e);

        e.events().publish(
            (Symbol::new(&e, "token"), Symbol::new(&e, "unlocked")),
            caller,
        );
        Ok(())
    }

    pub fn transfer_ownership(e: Env, caller: Address, candidate: Address) -> Result<(), TokenError> {
        ownership::transfer_ownership(&e, &caller, &candidate)?;
        extend_instance(&e);
        Ok(())
    }

    pub fn claim_ownership(e: Env, caller: Address) -> Result<(), TokenError> {
        ownership::claim_ownership(&e, &caller)?;
        extend_instance(&e);
        Ok(())
    }

    /// View functions
    pub fn balance(e: Env, id: Address) -> i128 {
        read_balance(&e, &id)
    }

    pub fn total_supply(e: Env) -> i128 {
        total_supply(&e)
    }

    pub fn transfers_enabled(e: Env) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::TransfersEnabled)
            .unwrap_or(false)
    }

    pub fn owner(e: Env) -> Result<Address, TokenError> {
        Ok(ownership::owner(&e)?)
    }

    pub fn pending_owner(e: Env) -> Option<Address> {
        ownership::pending_owner(&e)
    }
}

// Helper functions
fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

// Zero is accepted so finalization can mint empty pools.
fn check_mint_amount(amount: i128) -> Result<(), TokenError> {
    if amount < 0 {
        return Err(TokenError::InvalidAmount);
    }
    Ok(())
}

fn check_amount(amount: i128) -> Result<(), TokenError> {
    if amount <= 0 {
        return Err(TokenError::InvalidAmount);
    }
    Ok(())
}

fn check_unlocked(e: &Env) -> Result<(), TokenError> {
    let enabled: bool = e
        .storage()
        .instance()
        .get(&DataKey::TransfersEnabled)
        .ok_or(TokenError::NotInitialized)?;
    if !enabled {
        return Err(TokenError::TransfersLocked);
    }
    Ok(())
}

fn total_supply(e: &Env) -> i128 {
    e.storage().instance().get(&DataKey::TotalSupply).unwrap_or(0)
}

fn read_balance(e: &Env, id: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&PersistentKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn write_balance(e: &Env, id: &Address, amount: i128) {
    let key = PersistentKey::Balance(id.clone());
    e.storage().persistent().set(&key, &amount);
    extend_persistent(e, &key);
}

fn spend_balance(e: &Env, id: &Address, amount: i128) -> Result<(), TokenError> {
    let balance = read_balance(e, id);
    if balance < amount {
        return Err(TokenError::InsufficientBalance);
    }
    write_balance(e, id, balance - amount);
    Ok(())
}
