// alerts.rs - Emergency Alert Lifecycle
// Owns the alert state machine (Active -> InProgress/Fulfilled/Expired)
// and the notification/response counters. Every transition is guarded;
// an illegal source state fails without mutating anything.

use soroban_sdk::{Address, Env};

use crate::error::ContractError;
use crate::events;
use crate::geo;
use crate::storage;
use crate::types::{AlertStatus, BloodType, EmergencyAlert};

/// Create a new Active alert for a patient needing `blood_type` near the
/// given coordinates. A radius of 0 falls back to the configured default.
pub fn create_alert(
    env: &Env,
    requester: &Address,
    blood_type: BloodType,
    lat_udeg: i64,
    lng_udeg: i64,
    radius_km: u32,
    required_bags: u32,
    ttl_secs: u64,
) -> Result<u64, ContractError> {
    let config = storage::get_config(env)?;

    if required_bags == 0 {
        return Err(ContractError::InvalidBagCount);
    }
    if ttl_secs == 0 {
        return Err(ContractError::InvalidExpiry);
    }

    let location_cell = geo::encode(env, lat_udeg, lng_udeg, geo::CELL_PRECISION)?;
    let radius_km = if radius_km == 0 {
        config.default_radius_km
    } else {
        radius_km
    };

    let now = env.ledger().timestamp();
    let alert_id = storage::next_alert_id(env);
    let alert = EmergencyAlert {
        id: alert_id,
        serial_number: storage::make_serial(env, alert_id),
        requester: requester.clone(),
        blood_type,
        location_cell: location_cell.clone(),
        radius_km,
        required_bags,
        status: AlertStatus::Active,
        donors_notified: 0,
        donors_responded: 0,
        selected_donor: None,
        created_at: now,
        expires_at: now + ttl_secs,
    };

    storage::set_alert(env, &alert);
    storage::add_active_alert(env, alert_id);

    events::emit_alert_created(
        env,
        alert_id,
        alert.serial_number.clone(),
        requester.clone(),
        blood_type,
        location_cell,
        required_bags,
        alert.expires_at,
    );
    Ok(alert_id)
}

/// Record that a batch of `count` donors was handed to the notification
/// channel. At-least-once semantics: a retried notify batch double
/// counts. The counter is informational, not an invariant.
pub fn record_notification(
    env: &Env,
    alert_id: u64,
    count: u32,
    caller: &Address,
) -> Result<u32, ContractError> {
    let config = storage::get_config(env)?;
    let mut alert = storage::get_alert(env, alert_id).ok_or(ContractError::AlertNotFound)?;

    if *caller != alert.requester && *caller != config.admin {
        return Err(ContractError::Forbidden);
    }
    if alert.status != AlertStatus::Active {
        return Err(ContractError::AlertNotActive);
    }

    alert.donors_notified += count;
    storage::set_alert(env, &alert);

    events::emit_donors_notified(
        env,
        alert_id,
        count,
        alert.donors_notified,
        env.ledger().timestamp(),
    );
    Ok(alert.donors_notified)
}

/// Bump the responded counter. Called once per accepted response.
pub fn record_response(env: &Env, alert_id: u64) -> Result<(), ContractError> {
    let mut alert = storage::get_alert(env, alert_id).ok_or(ContractError::AlertNotFound)?;
    alert.donors_responded += 1;
    storage::set_alert(env, &alert);
    Ok(())
}

/// Active -> InProgress, with the selected donor pinned on the alert.
pub fn mark_in_progress(
    env: &Env,
    alert_id: u64,
    selected_donor: &Address,
) -> Result<(), ContractError> {
    let mut alert = storage::get_alert(env, alert_id).ok_or(ContractError::AlertNotFound)?;
    if alert.status != AlertStatus::Active {
        return Err(ContractError::InvalidAlertTransition);
    }

    alert.status = AlertStatus::InProgress;
    alert.selected_donor = Some(selected_donor.clone());
    storage::set_alert(env, &alert);
    storage::remove_active_alert(env, alert_id);
    Ok(())
}

/// Active|InProgress -> Fulfilled. The Active source covers the
/// direct-select shortcut, which never passes through InProgress.
pub fn mark_fulfilled(
    env: &Env,
    alert_id: u64,
    selected_donor: &Address,
) -> Result<(), ContractError> {
    let mut alert = storage::get_alert(env, alert_id).ok_or(ContractError::AlertNotFound)?;
    match alert.status {
        AlertStatus::Active | AlertStatus::InProgress => {}
        _ => return Err(ContractError::InvalidAlertTransition),
    }

    let was_active = alert.status == AlertStatus::Active;
    alert.status = AlertStatus::Fulfilled;
    alert.selected_donor = Some(selected_donor.clone());
    storage::set_alert(env, &alert);
    if was_active {
        storage::remove_active_alert(env, alert_id);
    }
    Ok(())
}

/// Active -> Expired. Only the sweep path uses this.
pub fn mark_expired(env: &Env, alert_id: u64) -> Result<(), ContractError> {
    let mut alert = storage::get_alert(env, alert_id).ok_or(ContractError::AlertNotFound)?;
    if alert.status != AlertStatus::Active {
        return Err(ContractError::InvalidAlertTransition);
    }

    alert.status = AlertStatus::Expired;
    storage::set_alert(env, &alert);
    storage::remove_active_alert(env, alert_id);
    events::emit_alert_expired(env, alert_id, env.ledger().timestamp());
    Ok(())
}

/// Sweep the active index, expiring every alert past its deadline.
/// Returns the number expired. An alert missed here lingers Active for
/// one extra sweep tick, which is acceptable.
pub fn expire_alerts(env: &Env) -> u32 {
    let now = env.ledger().timestamp();
    let mut expired = 0u32;

    for alert_id in storage::active_alerts(env).iter() {
        if let Some(alert) = storage::get_alert(env, alert_id) {
            if alert.status == AlertStatus::Active && now > alert.expires_at {
                if mark_expired(env, alert_id).is_ok() {
                    expired += 1;
                }
            }
        }
    }
    expired
}

/// An alert accepts responses only while Active and not past its
/// deadline. The deadline check makes a stale Active alert reject
/// submissions even before the sweep reaches it.
pub fn is_open_for_responses(alert: &EmergencyAlert, now: u64) -> bool {
    alert.status == AlertStatus::Active && now <= alert.expires_at
}
