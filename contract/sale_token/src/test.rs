#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env};

fn create_token<'a>(e: &Env, owner: &Address) -> SaleTokenClient<'a> {
    let token = SaleTokenClient::new(e, &e.register(SaleToken, ()));
    token.initialize(owner);
    token
}

#[test]
fn test_initialize_once() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let token = create_token(&env, &owner);

    assert_eq!(token.owner(), owner);
    assert_eq!(token.total_supply(), 0);
    assert!(!token.transfers_enabled());
    assert_eq!(token.try_initialize(&owner), Err(Ok(TokenError::AlreadyInitialized)));
}

#[test]
fn test_mint_is_owner_only() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let holder = Address::generate(&env);
    let token = create_token(&env, &owner);

    token.mint(&owner, &holder, &1_000);
    assert_eq!(token.balance(&holder), 1_000);
    assert_eq!(token.total_supply(), 1_000);

    assert_eq!(
        token.try_mint(&holder, &holder, &1_000),
        Err(Ok(TokenError::Unauthorized))
    );
    assert_eq!(token.try_mint(&owner, &holder, &-1), Err(Ok(TokenError::InvalidAmount)));
    assert_eq!(token.total_supply(), 1_000);
}

#[test]
fn test_transfer_and_burn_locked_until_enabled() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let holder = Address::generate(&env);
    let other = Address::generate(&env);
    let token = create_token(&env, &owner);
    token.mint(&owner, &holder, &500);

    assert_eq!(
        token.try_transfer(&holder, &other, &1),
        Err(Ok(TokenError::TransfersLocked))
    );
    assert_eq!(token.try_burn(&holder, &20), Err(Ok(TokenError::TransfersLocked)));

    assert_eq!(
        token.try_enable_transfers(&holder),
        Err(Ok(TokenError::Unauthorized))
    );
    token.enable_transfers(&owner);
    assert!(token.transfers_enabled());

    token.transfer(&holder, &other, &100);
    assert_eq!(token.balance(&holder), 400);
    assert_eq!(token.balance(&other), 100);

    token.burn(&holder, &20);
    assert_eq!(token.balance(&holder), 380);
    assert_eq!(token.total_supply(), 480);
}

#[test]
fn test_transfer_rejects_overdraft() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let holder = Address::generate(&env);
    let other = Address::generate(&env);
    let token = create_token(&env, &owner);
    token.mint(&owner, &holder, &50);
    token.enable_transfers(&owner);

    assert_eq!(
        token.try_transfer(&holder, &other, &51),
        Err(Ok(TokenError::InsufficientBalance))
    );
    assert_eq!(token.try_burn(&other, &1), Err(Ok(TokenError::InsufficientBalance)));
    assert_eq!(token.balance(&holder), 50);
}

#[test]
fn test_amount_validation() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let holder = Address::generate(&env);
    let other = Address::generate(&env);
    let token = create_token(&env, &owner);
    token.mint(&owner, &holder, &50);
    token.enable_transfers(&owner);

    // empty mints are allowed, empty moves are not
    token.mint(&owner, &holder, &0);
    assert_eq!(token.try_transfer(&holder, &other, &0), Err(Ok(TokenError::InvalidAmount)));
    assert_eq!(token.try_transfer(&holder, &other, &-5), Err(Ok(TokenError::InvalidAmount)));
    assert_eq!(token.try_burn(&holder, &0), Err(Ok(TokenError::InvalidAmount)));
    assert_eq!(token.balance(&holder), 50);
    assert_eq!(token.total_supply(), 50);
}

#[test]
fn test_two_phase_ownership() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let crowdsale = Address::generate(&env);
    let holder = Address::generate(&env);
    let token = create_token(&env, &owner);

    token.transfer_ownership(&owner, &crowdsale);
    assert_eq!(token.owner(), owner);
    assert_eq!(token.pending_owner(), Some(crowdsale.clone()));

    assert_eq!(token.try_claim_ownership(&holder), Err(Ok(TokenError::Unauthorized)));
    token.claim_ownership(&crowdsale);
    assert_eq!(token.owner(), crowdsale);

    // the previous owner lost the mint right
    assert_eq!(token.try_mint(&owner, &holder, &1), Err(Ok(TokenError::Unauthorized)));
    token.mint(&crowdsale, &holder, &1);
}
