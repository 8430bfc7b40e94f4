#![no_std]


mod allocation;
mod events;
mod funds;
mod rate;
mod registry;
mod storage_types;

pub use allocation::StakeholderAllocation;
pub use rate::{rate_at, RATE_SCHEDULE};
pub use storage_types::{
    CampaignConfig, CampaignPhase, CrowdsaleError, StakeholderWallets, VaultDisposition,
    MAX_GRANTEES,
};
use storage_types::{DataKey, TTL_INSTANCE};

use sale_common::interfaces::{LedgerClient, VaultClient};
use sale_common::ownership;
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Vec};

/// Tiered-rate crowdsale.
///
/// Sells the sale token for the payment asset during `[start_time, end_time)`
/// either directly or escrowed in the refund vault, keeps the presale grantee
/// registry, and at finalization mints grantees and stakeholder pools, unlocks
/// the token and settles the vault. The deployer proposes this contract as
/// owner of the token and the vault; `claim_token_ownership` and
/// `claim_vault_ownership` complete the hand-over before the sale opens.
#[contract]
pub struct CrowdsaleContract;

#[contractimpl]
impl CrowdsaleContract {
    /// Initialize the crowdsale
    pub fn initialize(e: Env, owner: Address, config: CampaignConfig) -> Result<(), CrowdsaleError> {
        if ownership::has_owner(&e) {
            return Err(CrowdsaleError::AlreadyInitialized);
        }
        owner.require_auth();
        validate_config(&e, &config)?;

        ownership::init_owner(&e, &owner);
        e.storage().instance().set(&DataKey::Config, &config);
        e.storage().instance().set(&DataKey::Finalized, &false);
        funds::init(&e);

        extend_instance(&e);
        Ok(())
    }

    /// Accept the token ownership proposed by the deployer.
    pub fn claim_token_ownership(e: Env, caller: Address) -> Result<(), CrowdsaleError> {
        ownership::require_owner(&e, &caller)?;
        let config = load_config(&e)?;
        LedgerClient::new(&e, &config.sale_token).claim_ownership(&e.current_contract_address());
        Ok(())
    }

    /// Accept the vault ownership proposed by the deployer.
    pub fn claim_vault_ownership(e: Env, caller: Address) -> Result<(), CrowdsaleError> {
        ownership::require_owner(&e, &caller)?;
        let config = load_config(&e)?;
        VaultClient::new(&e, &config.vault).claim_ownership(&e.current_contract_address());
        Ok(())
    }

    /// Buy tokens outright: the payment goes straight to the wallet and the
    /// tokens are minted to the buyer. Returns the minted amount.
    pub fn buy_tokens(e: Env, buyer: Address, amount: i128) -> Result<i128, CrowdsaleError> {
        buyer.require_auth();
        let config = load_config(&e)?;
        let (rate, tokens) = price_purchase(&e, &config, amount)?;

        token::Client::new(&e, &config.payment_token).transfer(&buyer, &config.wallet, &amount);
        LedgerClient::new(&e, &config.sale_token).mint(
            &e.current_contract_address(),
            &buyer,
            &tokens,
        );
        extend_instance(&e);

        events::emit_tokens_purchased(
            &e,
            events::TokensPurchasedEvent {
                purchaser: buyer,
                paid: amount,
                tokens,
                rate,
                escrowed: false,
            },
        );
        Ok(tokens)
    }

    /// Buy tokens with a refund guarantee: the payment and the tokens stay in
    /// the vault until the contributor refunds or claims after finalization.
    /// Returns the credited amount.
    pub fn contribute(e: Env, contributor: Address, amount: i128) -> Result<i128, CrowdsaleError> {
        contributor.require_auth();
        let config = load_config(&e)?;
        let (rate, tokens) = price_purchase(&e, &config, amount)?;
        let this = e.current_contract_address();

        token::Client::new(&e, &config.payment_token).transfer(&contributor, &config.vault, &amount);
        LedgerClient::new(&e, &config.sale_token).mint(&this, &config.vault, &tokens);
        VaultClient::new(&e, &config.vault).deposit(&this, &contributor, &amount, &tokens);
        extend_instance(&e);

        events::emit_tokens_purchased(
            &e,
            events::TokensPurchasedEvent {
                purchaser: contributor,
                paid: amount,
                tokens,
                rate,
                escrowed: true,
            },
        );
        Ok(tokens)
    }

    /// Add a presale grantee or change the amount of an existing one.
    pub fn add_update_grantee(
        e: Env,
        caller: Address,
        grantee: Address,
        amount: i128,
    ) -> Result<(), CrowdsaleError> {
        ownership::require_owner(&e, &caller)?;
        let config = load_config(&e)?;
        require_active(&e, &config)?;
        require_usable(&e, &grantee)?;
        if amount <= 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }

        if registry::upsert(&e, &grantee, amount)? {
            events::emit_grant_added(&e, events::GrantAddedEvent { grantee, amount });
        } else {
            events::emit_grant_updated(&e, events::GrantUpdatedEvent { grantee, amount });
        }
        Ok(())
    }

    pub fn delete_grantee(e: Env, caller: Address, grantee: Address) -> Result<(), CrowdsaleError> {
        ownership::require_owner(&e, &caller)?;
        let config = load_config(&e)?;
        require_active(&e, &config)?;
        require_usable(&e, &grantee)?;

        registry::remove(&e, &grantee)?;
        events::emit_grant_deleted(&e, events::GrantDeletedEvent { grantee });
        Ok(())
    }

    /// Set the running total raised outside the payment asset. Overwrites the
    /// previous figure; callers pass the cumulative amount, not a delta.
    pub fn set_external_raised(e: Env, caller: Address, amount: i128) -> Result<(), CrowdsaleError> {
        ownership::require_owner(&e, &caller)?;
        let config = load_config(&e)?;
        require_active(&e, &config)?;
        if amount < 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }

        funds::set_external_raised(&e, amount);
        extend_instance(&e);
        events::emit_external_raised_updated(&e, events::ExternalRaisedUpdatedEvent { amount });
        Ok(())
    }

    /// Close the sale. Mints the grantees, then sizes the stakeholder pools
    /// against the resulting supply, unlocks the token, settles the vault and
    /// proposes the owner as the next token owner. Runs once.
    pub fn finalize(
        e: Env,
        caller: Address,
        disposition: VaultDisposition,
    ) -> Result<StakeholderAllocation, CrowdsaleError> {
        ownership::require_owner(&e, &caller)?;
        let config = load_config(&e)?;
        if read_finalized(&e) {
            return Err(CrowdsaleError::AlreadyFinalized);
        }
        if e.ledger().timestamp() < config.end_time {
            return Err(CrowdsaleError::OutsideWindow);
        }

        let this = e.current_contract_address();
        let ledger = LedgerClient::new(&e, &config.sale_token);

        let grantees = registry::keys(&e);
        for grantee in grantees.iter() {
            let amount = registry::amount_of(&e, &grantee);
            ledger.mint(&this, &grantee, &amount);
        }

        let allocation =
            allocation::solve(ledger.total_supply()).ok_or(CrowdsaleError::Overflow)?;
        let wallets = &config.stakeholders;
        ledger.mint(&this, &wallets.founder, &allocation.founder);
        ledger.mint(&this, &wallets.oem, &allocation.oem);
        ledger.mint(&this, &wallets.bounties, &allocation.bounties);
        ledger.mint(&this, &wallets.reserve, &allocation.reserve);

        e.storage().instance().set(&DataKey::Finalized, &true);
        extend_instance(&e);

        ledger.enable_transfers(&this);

        let vault = VaultClient::new(&e, &config.vault);
        match disposition {
            VaultDisposition::Refunding => vault.enable_refunds(&this),
            VaultDisposition::Closed => vault.close(&this),
        }
        ledger.transfer_ownership(&this, &caller);

        log!(
            &e,
            "finalized: supply {} -> {}",
            allocation.pre_supply,
            allocation.final_supply
        );
        events::emit_finalized(
            &e,
            events::FinalizedEvent {
                allocation: allocation.clone(),
                disposition,
                grantees: grantees.len(),
            },
        );
        Ok(allocation)
    }

    pub fn transfer_ownership(e: Env, caller: Address, candidate: Address) -> Result<(), CrowdsaleError> {
        ownership::transfer_ownership(&e, &caller, &candidate)?;
        extend_instance(&e);
        Ok(())
    }

    pub fn claim_ownership(e: Env, caller: Address) -> Result<(), CrowdsaleError> {
        ownership::claim_ownership(&e, &caller)?;
        extend_instance(&e);
        Ok(())
    }

    /// View functions
    pub fn config(e: Env) -> Result<CampaignConfig, CrowdsaleError> {
        load_config(&e)
    }

    pub fn phase(e: Env) -> Result<CampaignPhase, CrowdsaleError> {
        let config = load_config(&e)?;
        Ok(current_phase(&e, &config))
    }

    pub fn is_finalized(e: Env) -> bool {
        read_finalized(&e)
    }

    pub fn get_rate(e: Env) -> Result<u32, CrowdsaleError> {
        let config = load_config(&e)?;
        Ok(rate::current_rate(&e, config.start_time))
    }

    pub fn rate_schedule(e: Env) -> Vec<u32> {
        Vec::from_array(&e, RATE_SCHEDULE)
    }

    pub fn grantee_amount(e: Env, grantee: Address) -> i128 {
        registry::amount_of(&e, &grantee)
    }

    pub fn grantee_at(e: Env, index: u32) -> Option<Address> {
        registry::keys(&e).get(index)
    }

    pub fn grantees(e: Env) -> Vec<Address> {
        registry::keys(&e)
    }

    pub fn grantee_count(e: Env) -> u32 {
        registry::keys(&e).len()
    }

    pub fn max_grantees(_e: Env) -> u32 {
        MAX_GRANTEES
    }

    pub fn native_raised(e: Env) -> i128 {
        funds::native_raised(&e)
    }

    pub fn external_raised(e: Env) -> i128 {
        funds::external_raised(&e)
    }

    pub fn total_raised(e: Env) -> Result<i128, CrowdsaleError> {
        funds::total_raised(&e)
    }

    pub fn owner(e: Env) -> Result<Address, CrowdsaleError> {
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

fn load_config(e: &Env) -> Result<CampaignConfig, CrowdsaleError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(CrowdsaleError::NotInitialized)
}

fn read_finalized(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Finalized).unwrap_or(false)
}

fn current_phase(e: &Env, config: &CampaignConfig) -> CampaignPhase {
    let now = e.ledger().timestamp();
    if read_finalized(e) {
        CampaignPhase::Finalized
    } else if now < config.start_time {
        CampaignPhase::Pending
    } else if now < config.end_time {
        CampaignPhase::Active
    } else {
        CampaignPhase::Ended
    }
}

fn require_active(e: &Env, config: &CampaignConfig) -> Result<(), CrowdsaleError> {
    if current_phase(e, config) != CampaignPhase::Active {
        return Err(CrowdsaleError::OutsideWindow);
    }
    Ok(())
}

// Tokens minted here would be unreachable, so this contract stands in for
// the null account.
fn require_usable(e: &Env, account: &Address) -> Result<(), CrowdsaleError> {
    if *account == e.current_contract_address() {
        return Err(CrowdsaleError::InvalidAccount);
    }
    Ok(())
}

fn validate_config(e: &Env, config: &CampaignConfig) -> Result<(), CrowdsaleError> {
    if config.start_time >= config.end_time || config.start_time < e.ledger().timestamp() {
        return Err(CrowdsaleError::InvalidConfig);
    }
    if config.sale_token == config.vault {
        return Err(CrowdsaleError::InvalidConfig);
    }

    let wallets = &config.stakeholders;
    for account in [
        &config.wallet,
        &wallets.founder,
        &wallets.oem,
        &wallets.bounties,
        &wallets.reserve,
        &config.sale_token,
        &config.vault,
        &config.payment_token,
    ] {
        require_usable(e, account)?;
    }
    Ok(())
}

/// Window and amount checks shared by both purchase paths. Records the
/// payment and returns the rate applied and the tokens bought.
fn price_purchase(
    e: &Env,
    config: &CampaignConfig,
    amount: i128,
) -> Result<(u32, i128), CrowdsaleError> {
    require_active(e, config)?;
    if amount <= 0 {
        return Err(CrowdsaleError::InvalidAmount);
    }

    let rate = rate::current_rate(e, config.start_time);
    let tokens = amount
        .checked_mul(rate as i128)
        .ok_or(CrowdsaleError::Overflow)?;
    funds::record_contribution(e, amount)?;
    Ok((rate, tokens))
}
