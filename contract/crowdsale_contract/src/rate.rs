use sale_common::SECONDS_PER_DAY;
use soroban_sdk::Env;

/// Tokens per payment unit for each whole day since the sale started.
pub const RATE_SCHEDULE: [u32; 14] = [
    1000, 950, 900, 855, 810, 770, 730, 690, 650, 615, 580, 550, 525, 500,
];

/// Rate for a day index; the last tier holds for the rest of the sale.
pub fn rate_at(elapsed_days: u64) -> u32 {
    let last = (RATE_SCHEDULE.len() - 1) as u64;
    RATE_SCHEDULE[elapsed_days.min(last) as usize]
}

pub fn current_rate(e: &Env, start_time: u64) -> u32 {
    let elapsed = e.ledger().timestamp().saturating_sub(start_time);
    rate_at(elapsed / SECONDS_PER_DAY)
}
