// responses.rs - Response Coordinator
// Owns per-donor response records, the one-response-per-donor rule, the
// exclusivity transaction that picks a single responder, and the
// completion path that writes the donation ledger. Contract invocations
// are ledger-serialized and atomic, so the multi-row updates here can
// never be observed half-applied; a losing racer sees ResponseNotPending
// or AlertNotActive on its own invocation.

use soroban_sdk::{Address, Env};

use crate::alerts;
use crate::compatibility;
use crate::error::ContractError;
use crate::events;
use crate::ledger;
use crate::storage;
use crate::types::{
    AlertStatus, DonationRecord, EmergencyResponse, ResponseStatus, SelectionOutcome,
};

/// A candidate donor offers to cover an alert. One response per
/// (alert, responder); the responder must be a registered, compatible
/// donor and may not be the requester.
pub fn submit_response(
    env: &Env,
    alert_id: u64,
    responder: &Address,
    can_donate_immediately: bool,
) -> Result<u64, ContractError> {
    let alert = storage::get_alert(env, alert_id).ok_or(ContractError::AlertNotFound)?;
    let now = env.ledger().timestamp();

    if !alerts::is_open_for_responses(&alert, now) {
        return Err(ContractError::AlertNotActive);
    }
    if *responder == alert.requester {
        return Err(ContractError::Forbidden);
    }
    if storage::has_responder_response(env, alert_id, responder) {
        return Err(ContractError::DuplicateResponse);
    }

    let donor = storage::get_donor(env, responder).ok_or(ContractError::DonorNotFound)?;
    if !compatibility::is_compatible(env, &donor.blood_type, &alert.blood_type) {
        return Err(ContractError::IncompatibleDonor);
    }

    let response = EmergencyResponse {
        id: storage::next_response_id(env),
        alert_id,
        responder: responder.clone(),
        status: ResponseStatus::Pending,
        can_donate_immediately,
        created_at: now,
    };

    storage::set_response(env, &response);
    storage::add_alert_response(env, alert_id, response.id);
    storage::set_responder_response(env, alert_id, responder, response.id);
    alerts::record_response(env, alert_id)?;

    events::emit_response_submitted(env, alert_id, response.id, responder.clone(), now);
    Ok(response.id)
}

/// The exclusivity transaction: flip the target response to Selected,
/// cancel every sibling still Pending, and move the alert to InProgress,
/// all in one invocation.
pub fn select_responder(
    env: &Env,
    response_id: u64,
    by: &Address,
) -> Result<SelectionOutcome, ContractError> {
    let mut response =
        storage::get_response(env, response_id).ok_or(ContractError::ResponseNotFound)?;
    let alert =
        storage::get_alert(env, response.alert_id).ok_or(ContractError::AlertNotFound)?;

    if *by != alert.requester {
        return Err(ContractError::Forbidden);
    }
    if response.status != ResponseStatus::Pending {
        return Err(ContractError::ResponseNotPending);
    }
    if alert.status != AlertStatus::Active {
        return Err(ContractError::AlertNotActive);
    }

    let cancelled_count = cancel_pending_siblings(env, response.alert_id, Some(response_id));

    response.status = ResponseStatus::Selected;
    storage::set_response(env, &response);

    alerts::mark_in_progress(env, response.alert_id, &response.responder)?;

    events::emit_response_selected(
        env,
        response.alert_id,
        response_id,
        response.responder.clone(),
        cancelled_count,
        env.ledger().timestamp(),
    );

    Ok(SelectionOutcome {
        selected: response,
        cancelled_count,
    })
}

/// Completion of a negotiated donation: the Selected response flips to
/// Completed, the alert is Fulfilled, and the ledger entry plus the
/// donor's cooldown clock land in the same invocation (all or nothing).
/// Either the requester or the responder themselves may complete.
pub fn complete_donation(
    env: &Env,
    response_id: u64,
    by: &Address,
) -> Result<EmergencyResponse, ContractError> {
    let mut response =
        storage::get_response(env, response_id).ok_or(ContractError::ResponseNotFound)?;
    let alert =
        storage::get_alert(env, response.alert_id).ok_or(ContractError::AlertNotFound)?;

    if *by != alert.requester && *by != response.responder {
        return Err(ContractError::Forbidden);
    }
    if response.status != ResponseStatus::Selected {
        return Err(ContractError::ResponseNotSelected);
    }

    let donor =
        storage::get_donor(env, &response.responder).ok_or(ContractError::DonorNotFound)?;
    let now = env.ledger().timestamp();

    response.status = ResponseStatus::Completed;
    storage::set_response(env, &response);

    alerts::mark_fulfilled(env, response.alert_id, &response.responder)?;

    let record = ledger::append(
        env,
        &response.responder,
        now,
        donor.blood_type,
        alert.required_bags,
        Some(response.alert_id),
    );
    ledger::update_last_donation(env, &response.responder, now)?;

    events::emit_alert_fulfilled(
        env,
        response.alert_id,
        response.responder.clone(),
        record.id,
        now,
    );
    events::emit_donation_recorded(
        env,
        record.id,
        response.responder.clone(),
        Some(response.alert_id),
        alert.required_bags,
        now,
    );
    Ok(response)
}

/// Direct-select shortcut: the requester fulfills the alert by picking a
/// donor outright, without a response row for that donor. Skips
/// InProgress entirely. Any Pending responses are cancelled so none are
/// left stranded on a fulfilled alert.
pub fn select_donor_direct(
    env: &Env,
    alert_id: u64,
    donor_address: &Address,
    by: &Address,
) -> Result<DonationRecord, ContractError> {
    let alert = storage::get_alert(env, alert_id).ok_or(ContractError::AlertNotFound)?;

    if *by != alert.requester {
        return Err(ContractError::Forbidden);
    }
    if alert.status != AlertStatus::Active {
        return Err(ContractError::AlertNotActive);
    }

    let donor = storage::get_donor(env, donor_address).ok_or(ContractError::DonorNotFound)?;
    if !compatibility::is_compatible(env, &donor.blood_type, &alert.blood_type) {
        return Err(ContractError::IncompatibleDonor);
    }

    cancel_pending_siblings(env, alert_id, None);

    let now = env.ledger().timestamp();
    alerts::mark_fulfilled(env, alert_id, donor_address)?;

    let record = ledger::append(
        env,
        donor_address,
        now,
        donor.blood_type,
        alert.required_bags,
        Some(alert_id),
    );
    ledger::update_last_donation(env, donor_address, now)?;

    events::emit_alert_fulfilled(env, alert_id, donor_address.clone(), record.id, now);
    events::emit_donation_recorded(
        env,
        record.id,
        donor_address.clone(),
        Some(alert_id),
        alert.required_bags,
        now,
    );
    Ok(record)
}

/// Cancel every Pending response for an alert except `keep`, returning
/// the number cancelled.
fn cancel_pending_siblings(env: &Env, alert_id: u64, keep: Option<u64>) -> u32 {
    let mut cancelled = 0u32;
    for sibling_id in storage::alert_response_ids(env, alert_id).iter() {
        if Some(sibling_id) == keep {
            continue;
        }
        if let Some(mut sibling) = storage::get_response(env, sibling_id) {
            if sibling.status == ResponseStatus::Pending {
                sibling.status = ResponseStatus::Cancelled;
                storage::set_response(env, &sibling);
                cancelled += 1;
            }
        }
    }
    cancelled
}
