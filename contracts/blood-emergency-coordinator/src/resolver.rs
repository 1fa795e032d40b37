// resolver.rs - Donor Candidate Resolver
// Combines compatibility, cell proximity, and availability into the
// notify-list for an alert. Output is unordered and may be empty; an
// empty list is a valid "no donors" outcome the caller must handle.

use soroban_sdk::{Address, Env, Vec};

use crate::availability;
use crate::compatibility;
use crate::error::ContractError;
use crate::geo;
use crate::storage;
use crate::types::EmergencyAlert;

/// Scan the donor index and collect every donor who is blood-compatible
/// with the alert, inside the search cells, flagged available, and past
/// their cooldown. The requester is never their own candidate.
///
/// The donor snapshot is read at call time; a donor flipping unavailable
/// moments later is an accepted race, not a defect.
pub fn resolve_candidates(
    env: &Env,
    alert: &EmergencyAlert,
) -> Result<Vec<Address>, ContractError> {
    let config = storage::get_config(env)?;
    let compatible_types = compatibility::donors_who_can_help(env, &alert.blood_type);
    let search_cells = geo::cells_within_radius(env, &alert.location_cell, alert.radius_km)?;
    let now = env.ledger().timestamp();

    let mut candidates = Vec::new(env);
    for index in 0..storage::donor_count(env) {
        let donor = match storage::donor_by_index(env, index) {
            Some(donor) => donor,
            None => continue,
        };

        if donor.address == alert.requester {
            continue;
        }
        if !donor.is_available {
            continue;
        }
        if !compatible_types.contains(&donor.blood_type) {
            continue;
        }
        if !search_cells.contains(&donor.cell) {
            continue;
        }
        if !availability::is_available(donor.last_donation_date, now, config.cooldown_days) {
            continue;
        }

        candidates.push_back(donor.address);
    }
    Ok(candidates)
}
