//! Two-phase ownership shared by every contract of the sale.
//!
//! Ownership only moves when the proposed candidate signs `claim_ownership`,
//! so a mistyped or unreachable address can never end up owning a resource.
//! The owner and candidate live in the host contract's instance storage.

use soroban_sdk::{contracterror, contracttype, Address, Env, Symbol};

#[derive(Clone)]
#[contracttype]
pub enum OwnershipKey {
    Owner,
    PendingOwner,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum OwnershipError {
    NotInitialized = 1,
    NotOwner = 2,
    NotPendingOwner = 3,
}

pub fn init_owner(e: &Env, owner: &Address) {
    e.storage().instance().set(&OwnershipKey::Owner, owner);
}

pub fn has_owner(e: &Env) -> bool {
    e.storage().instance().has(&OwnershipKey::Owner)
}

pub fn owner(e: &Env) -> Result<Address, OwnershipError> {
    e.storage()
        .instance()
        .get(&OwnershipKey::Owner)
        .ok_or(OwnershipError::NotInitialized)
}

pub fn pending_owner(e: &Env) -> Option<Address> {
    e.storage().instance().get(&OwnershipKey::PendingOwner)
}

/// Authenticates `caller` and checks it is the current owner.
pub fn require_owner(e: &Env, caller: &Address) -> Result<(), OwnershipError> {
    caller.require_auth();
    if *caller != owner(e)? {
        return Err(OwnershipError::NotOwner);
    }
    Ok(())
}

/// Proposes `candidate` as the next owner. A later proposal replaces an
/// earlier one that was never claimed.
pub fn transfer_ownership(
    e: &Env,
    caller: &Address,
    candidate: &Address,
) -> Result<(), OwnershipError> {
    require_owner(e, caller)?;
    e.storage().instance().set(&OwnershipKey::PendingOwner, candidate);

    e.events().publish(
        (Symbol::new(e, "ownership"), Symbol::new(e, "proposed")),
        (caller.clone(), candidate.clone()),
    );
    Ok(())
}

/// Completes a transfer started by `transfer_ownership`. Returns the previous
/// owner.
pub fn claim_ownership(e: &Env, caller: &Address) -> Result<Address, OwnershipError> {
    caller.require_auth();
    let candidate = pending_owner(e).ok_or(OwnershipError::NotPendingOwner)?;
    if *caller != candidate {
        return Err(OwnershipError::NotPendingOwner);
    }

    let previous = owner(e)?;
    e.storage().instance().set(&OwnershipKey::Owner, caller);
    e.storage().instance().remove(&OwnershipKey::PendingOwner);

    e.events().publish(
        (Symbol::new(e, "ownership"), Symbol::new(e, "claimed")),
        (previous.clone(), caller.clone()),
    );
    Ok(previous)
}
