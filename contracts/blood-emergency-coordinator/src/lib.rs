#![no_std]

mod alerts;
mod availability;
mod compatibility;
mod error;
mod events;
mod geo;
mod ledger;
mod resolver;
mod responses;
mod storage;
mod types;

#[cfg(test)]
mod tests;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

pub use error::*;
pub use events::*;
pub use types::*;

#[contract]
pub struct BloodEmergencyCoordinator;

#[contractimpl]
impl BloodEmergencyCoordinator {
    /// Initialize the coordinator with its admin and tunables. A
    /// cooldown of 0 falls back to the standard 56-day interval.
    pub fn initialize(
        env: Env,
        admin: Address,
        cooldown_days: u64,
        default_radius_km: u32,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        if storage::has_config(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        let config = Config {
            admin,
            cooldown_days: if cooldown_days == 0 {
                availability::DONATION_COOLDOWN_DAYS
            } else {
                cooldown_days
            },
            default_radius_km: if default_radius_km == 0 {
                10
            } else {
                default_radius_km
            },
        };
        storage::set_config(&env, &config);
        Ok(())
    }

    // ── Donor directory sync ─────────────────────────────────

    /// Register or refresh a donor projection. Coordinates are signed
    /// micro-degrees; the stored cell is precision 5.
    pub fn register_donor(
        env: Env,
        donor: Address,
        blood_type: BloodType,
        lat_udeg: i64,
        lng_udeg: i64,
        is_available: bool,
    ) -> Result<(), ContractError> {
        donor.require_auth();
        storage::get_config(&env)?;

        let cell = geo::encode(&env, lat_udeg, lng_udeg, geo::CELL_PRECISION)?;
        let existing = storage::get_donor(&env, &donor);
        let profile = DonorProfile {
            address: donor.clone(),
            blood_type,
            cell,
            is_available,
            last_donation_date: existing.as_ref().and_then(|p| p.last_donation_date),
            registered_at: existing
                .map(|p| p.registered_at)
                .unwrap_or(env.ledger().timestamp()),
        };
        storage::set_donor(&env, &profile);
        Ok(())
    }

    pub fn update_donor_location(
        env: Env,
        donor: Address,
        lat_udeg: i64,
        lng_udeg: i64,
    ) -> Result<(), ContractError> {
        donor.require_auth();
        let mut profile = storage::get_donor(&env, &donor).ok_or(ContractError::DonorNotFound)?;
        profile.cell = geo::encode(&env, lat_udeg, lng_udeg, geo::CELL_PRECISION)?;
        storage::set_donor(&env, &profile);
        Ok(())
    }

    pub fn set_donor_availability(
        env: Env,
        donor: Address,
        is_available: bool,
    ) -> Result<(), ContractError> {
        donor.require_auth();
        let mut profile = storage::get_donor(&env, &donor).ok_or(ContractError::DonorNotFound)?;
        profile.is_available = is_available;
        storage::set_donor(&env, &profile);
        Ok(())
    }

    pub fn get_donor(env: Env, donor: Address) -> Option<DonorProfile> {
        storage::get_donor(&env, &donor)
    }

    /// Availability read model: current status plus the next eligible
    /// date while cooling down.
    pub fn donor_availability(env: Env, donor: Address) -> Result<AvailabilityInfo, ContractError> {
        let config = storage::get_config(&env)?;
        let profile = storage::get_donor(&env, &donor).ok_or(ContractError::DonorNotFound)?;
        Ok(availability::availability_info(
            profile.last_donation_date,
            env.ledger().timestamp(),
            config.cooldown_days,
        ))
    }

    // ── Compatibility queries ────────────────────────────────

    /// Donor blood types able to cover an emergency needing `need`.
    pub fn compatible_donor_types(env: Env, need: BloodType) -> Vec<BloodType> {
        compatibility::donors_who_can_help(&env, &need)
    }

    /// Recipient blood types a donor of type `donor_type` can help.
    pub fn compatible_recipient_types(env: Env, donor_type: BloodType) -> Vec<BloodType> {
        compatibility::recipients_this_donor_helps(&env, &donor_type)
    }

    /// Parse a conventional blood type label ("A+", "O-", ...).
    pub fn parse_blood_type(env: Env, label: String) -> Result<BloodType, ContractError> {
        compatibility::blood_type_from_str(&env, &label)
    }

    // ── Alert lifecycle ──────────────────────────────────────

    pub fn create_alert(
        env: Env,
        requester: Address,
        blood_type: BloodType,
        lat_udeg: i64,
        lng_udeg: i64,
        radius_km: u32,
        required_bags: u32,
        ttl_secs: u64,
    ) -> Result<u64, ContractError> {
        requester.require_auth();
        alerts::create_alert(
            &env,
            &requester,
            blood_type,
            lat_udeg,
            lng_udeg,
            radius_km,
            required_bags,
            ttl_secs,
        )
    }

    pub fn get_alert(env: Env, alert_id: u64) -> Option<EmergencyAlert> {
        storage::get_alert(&env, alert_id)
    }

    pub fn get_active_alerts(env: Env) -> Vec<u64> {
        storage::active_alerts(&env)
    }

    /// Candidate notify-list for an alert: compatible, in-radius,
    /// available donors. Empty is a valid "no donors" outcome.
    pub fn find_candidates(env: Env, alert_id: u64) -> Result<Vec<Address>, ContractError> {
        let alert = storage::get_alert(&env, alert_id).ok_or(ContractError::AlertNotFound)?;
        resolver::resolve_candidates(&env, &alert)
    }

    /// Record a notify batch handed to the external channel. Requester
    /// or admin only. Returns the running total.
    pub fn record_notification(
        env: Env,
        alert_id: u64,
        count: u32,
        caller: Address,
    ) -> Result<u32, ContractError> {
        caller.require_auth();
        alerts::record_notification(&env, alert_id, count, &caller)
    }

    /// Expire every Active alert past its deadline. Callable by anyone;
    /// an off-chain ticker invokes this periodically.
    pub fn expire_alerts(env: Env) -> u32 {
        alerts::expire_alerts(&env)
    }

    // ── Response coordination ────────────────────────────────

    pub fn submit_response(
        env: Env,
        alert_id: u64,
        responder: Address,
        can_donate_immediately: bool,
    ) -> Result<u64, ContractError> {
        responder.require_auth();
        responses::submit_response(&env, alert_id, &responder, can_donate_immediately)
    }

    pub fn get_response(env: Env, response_id: u64) -> Option<EmergencyResponse> {
        storage::get_response(&env, response_id)
    }

    /// Responses for an alert, visible only to its requester.
    pub fn get_responses(
        env: Env,
        alert_id: u64,
        caller: Address,
    ) -> Result<Vec<EmergencyResponse>, ContractError> {
        let alert = storage::get_alert(&env, alert_id).ok_or(ContractError::AlertNotFound)?;
        if caller != alert.requester {
            return Err(ContractError::Forbidden);
        }

        let mut result = Vec::new(&env);
        for response_id in storage::alert_response_ids(&env, alert_id).iter() {
            if let Some(response) = storage::get_response(&env, response_id) {
                result.push_back(response);
            }
        }
        Ok(result)
    }

    /// Pick one responder; all other pending responses are cancelled and
    /// the alert moves to InProgress, atomically.
    pub fn select_responder(
        env: Env,
        response_id: u64,
        by: Address,
    ) -> Result<SelectionOutcome, ContractError> {
        by.require_auth();
        responses::select_responder(&env, response_id, &by)
    }

    /// Complete a selected donation: response Completed, alert
    /// Fulfilled, ledger entry appended, cooldown clock advanced.
    pub fn complete_donation(
        env: Env,
        response_id: u64,
        by: Address,
    ) -> Result<EmergencyResponse, ContractError> {
        by.require_auth();
        responses::complete_donation(&env, response_id, &by)
    }

    /// Fulfill an alert by picking a donor directly, bypassing the
    /// response flow.
    pub fn select_donor_direct(
        env: Env,
        alert_id: u64,
        donor: Address,
        by: Address,
    ) -> Result<DonationRecord, ContractError> {
        by.require_auth();
        responses::select_donor_direct(&env, alert_id, &donor, &by)
    }

    // ── Donation ledger ──────────────────────────────────────

    pub fn get_donation_record(env: Env, record_id: u64) -> Option<DonationRecord> {
        storage::get_record(&env, record_id)
    }

    pub fn get_donation_history(env: Env, donor: Address) -> Vec<DonationRecord> {
        ledger::donation_history(&env, &donor)
    }
}
