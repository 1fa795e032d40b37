use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

use crate::error::ContractError;
use crate::types::{Config, DonationRecord, DonorProfile, EmergencyAlert, EmergencyResponse};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Donor(Address),
    DonorIndex(u32),
    Alert(u64),
    /// alert_id -> Vec<response_id>
    AlertResponses(u64),
    /// (alert_id, responder) -> response_id, the one-response-per-donor guard
    ResponseByResponder(u64, Address),
    Response(u64),
    /// Index of alerts still in Active status, scanned by the expiry sweep
    ActiveAlerts,
    DonationRecord(u64),
    /// donor -> Vec<record_id>
    DonationHistory(Address),
}

// Counters for generating unique IDs
const ALERT_COUNTER: Symbol = symbol_short!("ALRT_CTR");
const RESPONSE_COUNTER: Symbol = symbol_short!("RESP_CTR");
const RECORD_COUNTER: Symbol = symbol_short!("REC_CTR");
const DONOR_COUNT: Symbol = symbol_short!("DONOR_CNT");

// Persistent entry TTL maintenance (in ledgers)
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn extend_entry_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Config ───────────────────────────────────────────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<Config, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

// ── Counters ─────────────────────────────────────────────────

pub fn next_alert_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&ALERT_COUNTER).unwrap_or(0);
    let next = current + 1;
    env.storage().instance().set(&ALERT_COUNTER, &next);
    next
}

pub fn next_response_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&RESPONSE_COUNTER).unwrap_or(0);
    let next = current + 1;
    env.storage().instance().set(&RESPONSE_COUNTER, &next);
    next
}

pub fn next_record_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&RECORD_COUNTER).unwrap_or(0);
    let next = current + 1;
    env.storage().instance().set(&RECORD_COUNTER, &next);
    next
}

// ── Donors ───────────────────────────────────────────────────

pub fn get_donor(env: &Env, donor: &Address) -> Option<DonorProfile> {
    env.storage()
        .persistent()
        .get(&DataKey::Donor(donor.clone()))
}

/// Stores a donor profile, appending it to the scan index on first insert.
pub fn set_donor(env: &Env, profile: &DonorProfile) {
    let key = DataKey::Donor(profile.address.clone());
    let is_new = !env.storage().persistent().has(&key);
    env.storage().persistent().set(&key, profile);
    extend_entry_ttl(env, &key);

    if is_new {
        let count = donor_count(env);
        env.storage()
            .instance()
            .set(&DataKey::DonorIndex(count), &profile.address);
        env.storage().instance().set(&DONOR_COUNT, &(count + 1));
    }
}

pub fn donor_count(env: &Env) -> u32 {
    env.storage().instance().get(&DONOR_COUNT).unwrap_or(0)
}

pub fn donor_by_index(env: &Env, index: u32) -> Option<DonorProfile> {
    let address: Address = env.storage().instance().get(&DataKey::DonorIndex(index))?;
    get_donor(env, &address)
}

// ── Alerts ───────────────────────────────────────────────────

pub fn get_alert(env: &Env, alert_id: u64) -> Option<EmergencyAlert> {
    env.storage().persistent().get(&DataKey::Alert(alert_id))
}

pub fn set_alert(env: &Env, alert: &EmergencyAlert) {
    let key = DataKey::Alert(alert.id);
    env.storage().persistent().set(&key, alert);
    extend_entry_ttl(env, &key);
}

pub fn active_alerts(env: &Env) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&DataKey::ActiveAlerts)
        .unwrap_or(Vec::new(env))
}

pub fn add_active_alert(env: &Env, alert_id: u64) {
    let mut ids = active_alerts(env);
    ids.push_back(alert_id);
    env.storage().instance().set(&DataKey::ActiveAlerts, &ids);
}

pub fn remove_active_alert(env: &Env, alert_id: u64) {
    let mut ids = active_alerts(env);
    if let Some(pos) = ids.first_index_of(alert_id) {
        ids.remove(pos);
        env.storage().instance().set(&DataKey::ActiveAlerts, &ids);
    }
}

// ── Responses ────────────────────────────────────────────────

pub fn get_response(env: &Env, response_id: u64) -> Option<EmergencyResponse> {
    env.storage()
        .persistent()
        .get(&DataKey::Response(response_id))
}

pub fn set_response(env: &Env, response: &EmergencyResponse) {
    let key = DataKey::Response(response.id);
    env.storage().persistent().set(&key, response);
    extend_entry_ttl(env, &key);
}

pub fn alert_response_ids(env: &Env, alert_id: u64) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::AlertResponses(alert_id))
        .unwrap_or(Vec::new(env))
}

pub fn add_alert_response(env: &Env, alert_id: u64, response_id: u64) {
    let key = DataKey::AlertResponses(alert_id);
    let mut ids = alert_response_ids(env, alert_id);
    ids.push_back(response_id);
    env.storage().persistent().set(&key, &ids);
    extend_entry_ttl(env, &key);
}

pub fn has_responder_response(env: &Env, alert_id: u64, responder: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::ResponseByResponder(alert_id, responder.clone()))
}

pub fn set_responder_response(env: &Env, alert_id: u64, responder: &Address, response_id: u64) {
    let key = DataKey::ResponseByResponder(alert_id, responder.clone());
    env.storage().persistent().set(&key, &response_id);
    extend_entry_ttl(env, &key);
}

// ── Donation records ─────────────────────────────────────────

pub fn get_record(env: &Env, record_id: u64) -> Option<DonationRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::DonationRecord(record_id))
}

pub fn set_record(env: &Env, record: &DonationRecord) {
    let key = DataKey::DonationRecord(record.id);
    env.storage().persistent().set(&key, record);
    extend_entry_ttl(env, &key);
}

pub fn donation_history_ids(env: &Env, donor: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::DonationHistory(donor.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn add_donation_history(env: &Env, donor: &Address, record_id: u64) {
    let key = DataKey::DonationHistory(donor.clone());
    let mut ids = donation_history_ids(env, donor);
    ids.push_back(record_id);
    env.storage().persistent().set(&key, &ids);
    extend_entry_ttl(env, &key);
}

// ── Serial numbers ───────────────────────────────────────────

/// Builds the human-readable serial for an alert, e.g. "BD-00000042".
pub fn make_serial(env: &Env, id: u64) -> String {
    let mut buf = [b'0'; 11];
    buf[0] = b'B';
    buf[1] = b'D';
    buf[2] = b'-';
    let mut n = id % 100_000_000;
    let mut i = 10;
    while n > 0 && i >= 3 {
        buf[i] = b'0' + (n % 10) as u8;
        n /= 10;
        i -= 1;
    }
    String::from_bytes(env, &buf)
}
