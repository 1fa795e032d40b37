// ledger.rs - Append-only Donation Ledger
// Records completed donations and advances the donor's last-donation
// clock, which feeds back into future availability checks.

use soroban_sdk::{Address, Env, Vec};

use crate::error::ContractError;
use crate::storage;
use crate::types::{BloodType, DonationRecord};

/// Append a donation record and index it under the donor's history.
pub fn append(
    env: &Env,
    donor: &Address,
    donation_date: u64,
    blood_type: BloodType,
    bags_donated: u32,
    alert_id: Option<u64>,
) -> DonationRecord {
    let record = DonationRecord {
        id: storage::next_record_id(env),
        donor: donor.clone(),
        donation_date,
        alert_id,
        blood_type,
        bags_donated,
        created_at: env.ledger().timestamp(),
    };

    storage::set_record(env, &record);
    storage::add_donation_history(env, donor, record.id);
    record
}

/// Advance the donor's last-donation date. Monotonic: an older date never
/// regresses the cooldown clock, which guards against out-of-order
/// completions.
pub fn update_last_donation(
    env: &Env,
    donor: &Address,
    date: u64,
) -> Result<(), ContractError> {
    let mut profile = storage::get_donor(env, donor).ok_or(ContractError::DonorNotFound)?;

    let should_update = match profile.last_donation_date {
        None => true,
        Some(current) => date > current,
    };
    if should_update {
        profile.last_donation_date = Some(date);
        storage::set_donor(env, &profile);
    }
    Ok(())
}

/// Full donation history for a donor, newest last.
pub fn donation_history(env: &Env, donor: &Address) -> Vec<DonationRecord> {
    let mut records = Vec::new(env);
    for record_id in storage::donation_history_ids(env, donor).iter() {
        if let Some(record) = storage::get_record(env, record_id) {
            records.push_back(record);
        }
    }
    records
}
