use soroban_sdk::contracttype;

pub const FOUNDER_PERCENT: i128 = 10;
pub const OEM_PERCENT: i128 = 10;
pub const BOUNTIES_PERCENT: i128 = 5;
pub const RESERVE_PERCENT: i128 = 35;

/// Part of the final supply held by contributors and grantees.
pub const SALE_PERCENT: i128 =
    100 - FOUNDER_PERCENT - OEM_PERCENT - BOUNTIES_PERCENT - RESERVE_PERCENT;

/// Stakeholder mints computed at finalization.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct StakeholderAllocation {
    pub pre_supply: i128,
    pub final_supply: i128,
    pub founder: i128,
    pub oem: i128,
    pub bounties: i128,
    pub reserve: i128,
}

/// Sizes the four pools so that, once minted, each holds its fixed percentage
/// of the final supply: `final = pre * 100 / SALE_PERCENT`, each pool
/// `final * percent / 100`, all truncating. `None` on overflow.
pub fn solve(pre_supply: i128) -> Option<StakeholderAllocation> {
    let final_supply = pre_supply.checked_mul(100)? / SALE_PERCENT;
    let share = |percent: i128| final_supply.checked_mul(percent).map(|v| v / 100);

    Some(StakeholderAllocation {
        pre_supply,
        final_supply,
        founder: share(FOUNDER_PERCENT)?,
        oem: share(OEM_PERCENT)?,
        bounties: share(BOUNTIES_PERCENT)?,
        reserve: share(RESERVE_PERCENT)?,
    })
}
