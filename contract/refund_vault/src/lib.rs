#![no_std]


mod storage_types;
pub use storage_types::{VaultDeposit, VaultError, REFUND_TIME_FRAME_DAYS};
use storage_types::{DataKey, PersistentKey, TTL_INSTANCE, TTL_PERSISTENT};

use sale_common::interfaces::LedgerClient;
use sale_common::{ownership, VaultState, SECONDS_PER_DAY};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol};

/// Escrow for guaranteed contributions.
///
/// While `Active` the owning crowdsale records deposits: the payment sits in
/// this contract and the tokens bought with it are minted to this contract.
/// At finalization the crowdsale either enables refunds for a limited time or
/// closes the vault and forwards the payments to the wallet. Each deposited
/// unit is settled once, either refunded (its tokens are burned) or claimed
/// (its tokens are released to the contributor).
#[contract]
pub struct RefundVault;

#[contractimpl]
impl RefundVault {
    pub fn initialize(
        e: Env,
        owner: Address,
        wallet: Address,
        sale_token: Address,
        payment_token: Address,
    ) -> Result<(), VaultError> {
        if ownership::has_owner(&e) {
            return Err(VaultError::AlreadyInitialized);
        }
        owner.require_auth();

        ownership::init_owner(&e, &owner);
        e.storage().instance().set(&DataKey::Wallet, &wallet);
        e.storage().instance().set(&DataKey::SaleToken, &sale_token);
        e.storage().instance().set(&DataKey::PaymentToken, &payment_token);
        e.storage().instance().set(&DataKey::State, &VaultState::Active);
        extend_instance(&e);
        Ok(())
    }

    /// Record a contribution whose payment and tokens were already moved here.
    pub fn deposit(
        e: Env,
        caller: Address,
        contributor: Address,
        paid: i128,
        tokens: i128,
    ) -> Result<(), VaultError> {
        ownership::require_owner(&e, &caller)?;
        require_state(&e, VaultState::Active)?;
        if paid <= 0 || tokens <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let mut deposit = read_deposit(&e, &contributor);
        deposit.paid = deposit.paid.checked_add(paid).ok_or(VaultError::Overflow)?;
        deposit.tokens = deposit.tokens.checked_add(tokens).ok_or(VaultError::Overflow)?;
        write_deposit(&e, &contributor, &deposit);

        e.events().publish(
            (Symbol::new(&e, "vault"), Symbol::new(&e, "deposited")),
            (contributor, paid, tokens),
        );
        Ok(())
    }

    /// Open the refund window. Refunds are accepted until
    /// `now + REFUND_TIME_FRAME_DAYS`.
    pub fn enable_refunds(e: Env, caller: Address) -> Result<(), VaultError> {
        ownership::require_owner(&e, &caller)?;
        require_state(&e, VaultState::Active)?;

        let deadline = e.ledger().timestamp() + REFUND_TIME_FRAME_DAYS * SECONDS_PER_DAY;
        e.storage().instance().set(&DataKey::State, &VaultState::Refunding);
        e.storage().instance().set(&DataKey::RefundDeadline, &deadline);
        extend_instance(&e);

        log!(&e, "vault refunding until {}", deadline);
        e.events().publish(
            (Symbol::new(&e, "vault"), Symbol::new(&e, "refunding")),
            deadline,
        );
        Ok(())
    }

    /// Close the vault and forward every escrowed payment to the wallet.
    pub fn close(e: Env, caller: Address) -> Result<(), VaultError> {
        ownership::require_owner(&e, &caller)?;
        require_state(&e, VaultState::Active)?;

        e.storage().instance().set(&DataKey::State, &VaultState::Closed);
        extend_instance(&e);

        let payment = payment_client(&e)?;
        let vault = e.current_contract_address();
        let balance = payment.balance(&vault);
        if balance > 0 {
            payment.transfer(&vault, &wallet(&e)?, &balance);
        }

        log!(&e, "vault closed, forwarded {}", balance);
        e.events().publish(
            (Symbol::new(&e, "vault"), Symbol::new(&e, "closed")),
            balance,
        );
        Ok(())
    }

    /// Return `amount` of the contributor's escrowed payment and burn the
    /// matching share of its token credit.
    pub fn refund(e: Env, contributor: Address, amount: i128) -> Result<(), VaultError> {
        contributor.require_auth();
        require_state(&e, VaultState::Refunding)?;

        let deadline: u64 = e
            .storage()
            .instance()
            .get(&DataKey::RefundDeadline)
            .ok_or(VaultError::NotInitialized)?;
        if e.ledger().timestamp() > deadline {
            return Err(VaultError::RefundWindowClosed);
        }
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let mut deposit = read_deposit(&e, &contributor);
        if amount > deposit.paid {
            return Err(VaultError::InsufficientDeposit);
        }
        let tokens = share_rounded_up(deposit.tokens, amount, deposit.paid)?;

        // debit before any outbound transfer
        deposit.paid -= amount;
        deposit.tokens -= tokens;
        write_deposit(&e, &contributor, &deposit);

        let vault = e.current_contract_address();
        if tokens > 0 {
            ledger_client(&e)?.burn(&vault, &tokens);
        }
        payment_client(&e)?.transfer(&vault, &contributor, &amount);

        e.events().publish(
            (Symbol::new(&e, "vault"), Symbol::new(&e, "refunded")),
            (contributor, amount, tokens),
        );
        Ok(())
    }

    /// Release `amount` credited tokens to the contributor.
    pub fn claim_tokens(e: Env, contributor: Address, amount: i128) -> Result<(), VaultError> {
        contributor.require_auth();
        Self::settle_claim(&e, &contributor, amount)
    }

    /// Release the whole token credit. Returns the claimed amount.
    pub fn claim_all_tokens(e: Env, contributor: Address) -> Result<i128, VaultError> {
        contributor.require_auth();
        let amount = read_deposit(&e, &contributor).tokens;
        if amount == 0 {
            return Err(VaultError::InsufficientDeposit);
        }
        Self::settle_claim(&e, &contributor, amount)?;
        Ok(amount)
    }

    pub fn transfer_ownership(e: Env, caller: Address, candidate: Address) -> Result<(), VaultError> {
        ownership::transfer_ownership(&e, &caller, &candidate)?;
        extend_instance(&e);
        Ok(())
    }

    pub fn claim_ownership(e: Env, caller: Address) -> Result<(), VaultError> {
        ownership::claim_ownership(&e, &caller)?;
        extend_instance(&e);
        Ok(())
    }

    /// View functions
    pub fn deposited_paid(e: Env, account: Address) -> i128 {
        read_deposit(&e, &account).paid
    }

    pub fn deposited_tokens(e: Env, account: Address) -> i128 {
        read_deposit(&e, &account).tokens
    }

    pub fn state(e: Env) -> Result<VaultState, VaultError> {
        state(&e)
    }

    pub fn refund_deadline(e: Env) -> Option<u64> {
        e.storage().instance().get(&DataKey::RefundDeadline)
    }

    pub fn wallet(e: Env) -> Result<Address, VaultError> {
        wallet(&e)
    }

    pub fn refund_time_frame(_e: Env) -> u64 {
        REFUND_TIME_FRAME_DAYS
    }

    pub fn owner(e: Env) -> Result<Address, VaultError> {
        Ok(ownership::owner(&e)?)
    }

    pub fn pending_owner(e: Env) -> Option<Address> {
        ownership::pending_owner(&e)
    }
}

impl RefundVault {
    fn settle_claim(e: &Env, contributor: &Address, amount: i128) -> Result<(), VaultError> {
        let state = state(e)?;
        if state == VaultState::Active {
            return Err(VaultError::InvalidState);
        }
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let mut deposit = read_deposit(e, contributor);
        if amount > deposit.tokens {
            return Err(VaultError::InsufficientDeposit);
        }
        let released = share_rounded_up(deposit.paid, amount, deposit.tokens)?;

        deposit.paid -= released;
        deposit.tokens -= amount;
        write_deposit(e, contributor, &deposit);

        let vault = e.current_contract_address();
        ledger_client(e)?.transfer(&vault, contributor, &amount);
        // a closed vault already forwarded everything it held
        if state == VaultState::Refunding && released > 0 {
            payment_client(e)?.transfer(&vault, &wallet(e)?, &released);
        }

        e.events().publish(
            (Symbol::new(e, "vault"), Symbol::new(e, "claimed")),
            (contributor.clone(), amount, released),
        );
        Ok(())
    }
}

// Helper functions
fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn state(e: &Env) -> Result<VaultState, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(VaultError::NotInitialized)
}

fn require_state(e: &Env, expected: VaultState) -> Result<(), VaultError> {
    if state(e)? != expected {
        return Err(VaultError::InvalidState);
    }
    Ok(())
}

fn read_address(e: &Env, key: &DataKey) -> Result<Address, VaultError> {
    e.storage()
        .instance()
        .get(key)
        .ok_or(VaultError::NotInitialized)
}

fn wallet(e: &Env) -> Result<Address, VaultError> {
    read_address(e, &DataKey::Wallet)
}

fn ledger_client(e: &Env) -> Result<LedgerClient<'_>, VaultError> {
    Ok(LedgerClient::new(e, &read_address(e, &DataKey::SaleToken)?))
}

fn payment_client(e: &Env) -> Result<token::Client<'_>, VaultError> {
    Ok(token::Client::new(e, &read_address(e, &DataKey::PaymentToken)?))
}

fn read_deposit(e: &Env, account: &Address) -> VaultDeposit {
    e.storage()
        .persistent()
        .get(&PersistentKey::Deposit(account.clone()))
        .unwrap_or_default()
}

fn write_deposit(e: &Env, account: &Address, deposit: &VaultDeposit) {
    let key = PersistentKey::Deposit(account.clone());
    if deposit.paid == 0 && deposit.tokens == 0 {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, deposit);
        extend_persistent(e, &key);
    }
}

/// `ceil(total * part / whole)` for `0 < part <= whole`. A fraction of a unit
/// always goes with the settled side, never back to the contributor.
fn share_rounded_up(total: i128, part: i128, whole: i128) -> Result<i128, VaultError> {
    if part == whole {
        return Ok(total);
    }
    total
        .checked_mul(part)
        .and_then(|v| v.checked_add(whole - 1))
        .map(|v| v / whole)
        .ok_or(VaultError::Overflow)
}
