//! Raised-funds accounting. Payments through this contract accumulate; the
//! externally attested figure is a running total supplied by the owner and
//! replaces the previous value on every update.

use soroban_sdk::Env;

use crate::storage_types::{CrowdsaleError, DataKey};

pub fn init(e: &Env) {
    e.storage().instance().set(&DataKey::NativeRaised, &0i128);
    e.storage().instance().set(&DataKey::ExternalRaised, &0i128);
}

pub fn record_contribution(e: &Env, amount: i128) -> Result<(), CrowdsaleError> {
    let raised = native_raised(e)
        .checked_add(amount)
        .ok_or(CrowdsaleError::Overflow)?;
    e.storage().instance().set(&DataKey::NativeRaised, &raised);
    Ok(())
}

pub fn set_external_raised(e: &Env, amount: i128) {
    e.storage().instance().set(&DataKey::ExternalRaised, &amount);
}

pub fn native_raised(e: &Env) -> i128 {
    e.storage().instance().get(&DataKey::NativeRaised).unwrap_or(0)
}

pub fn external_raised(e: &Env) -> i128 {
    e.storage().instance().get(&DataKey::ExternalRaised).unwrap_or(0)
}

pub fn total_raised(e: &Env) -> Result<i128, CrowdsaleError> {
    native_raised(e)
        .checked_add(external_raised(e))
        .ok_or(CrowdsaleError::Overflow)
}
