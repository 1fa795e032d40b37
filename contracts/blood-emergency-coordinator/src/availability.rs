// availability.rs - Donor Availability Calculator
// Pure functions of the last-donation clock; no storage access.

use crate::types::{AvailabilityInfo, AvailabilityStatus};

/// Standard inter-donation interval for whole blood.
pub const DONATION_COOLDOWN_DAYS: u64 = 56;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// A donor is available when they have never donated, or the cooldown
/// window has fully elapsed. A last-donation date in the future (clock
/// skew, out-of-order writes) counts as unavailable.
pub fn is_available(last_donation_date: Option<u64>, now: u64, cooldown_days: u64) -> bool {
    match last_donation_date {
        None => true,
        Some(date) => now >= date && now - date >= cooldown_days * SECONDS_PER_DAY,
    }
}

/// Display-oriented status including the next eligible date while the
/// donor is cooling down.
pub fn availability_info(
    last_donation_date: Option<u64>,
    now: u64,
    cooldown_days: u64,
) -> AvailabilityInfo {
    if is_available(last_donation_date, now, cooldown_days) {
        AvailabilityInfo {
            status: AvailabilityStatus::Available,
            next_eligible_date: None,
        }
    } else {
        // is_available returned false, so last_donation_date is Some
        let date = last_donation_date.unwrap_or(now);
        AvailabilityInfo {
            status: AvailabilityStatus::CoolingDown,
            next_eligible_date: Some(date + cooldown_days * SECONDS_PER_DAY),
        }
    }
}
