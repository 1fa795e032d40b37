use soroban_sdk::{contracttype, Address, Env, String};

use crate::types::BloodType;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlertCreatedEvent {
    pub alert_id: u64,
    pub serial_number: String,
    pub requester: Address,
    pub blood_type: BloodType,
    pub location_cell: String,
    pub required_bags: u32,
    pub expires_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonorsNotifiedEvent {
    pub alert_id: u64,
    pub batch_count: u32,
    pub total_notified: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResponseSubmittedEvent {
    pub alert_id: u64,
    pub response_id: u64,
    pub responder: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResponseSelectedEvent {
    pub alert_id: u64,
    pub response_id: u64,
    pub responder: Address,
    pub cancelled_count: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlertFulfilledEvent {
    pub alert_id: u64,
    pub donor: Address,
    pub record_id: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlertExpiredEvent {
    pub alert_id: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationRecordedEvent {
    pub record_id: u64,
    pub donor: Address,
    pub alert_id: Option<u64>,
    pub bags_donated: u32,
    pub timestamp: u64,
}

pub fn emit_alert_created(
    env: &Env,
    alert_id: u64,
    serial_number: String,
    requester: Address,
    blood_type: BloodType,
    location_cell: String,
    required_bags: u32,
    expires_at: u64,
) {
    let event = AlertCreatedEvent {
        alert_id,
        serial_number,
        requester,
        blood_type,
        location_cell,
        required_bags,
        expires_at,
    };
    env.events().publish(("alert_created",), event);
}

pub fn emit_donors_notified(
    env: &Env,
    alert_id: u64,
    batch_count: u32,
    total_notified: u32,
    timestamp: u64,
) {
    let event = DonorsNotifiedEvent {
        alert_id,
        batch_count,
        total_notified,
        timestamp,
    };
    env.events().publish(("donors_notified",), event);
}

pub fn emit_response_submitted(
    env: &Env,
    alert_id: u64,
    response_id: u64,
    responder: Address,
    timestamp: u64,
) {
    let event = ResponseSubmittedEvent {
        alert_id,
        response_id,
        responder,
        timestamp,
    };
    env.events().publish(("response_submitted",), event);
}

pub fn emit_response_selected(
    env: &Env,
    alert_id: u64,
    response_id: u64,
    responder: Address,
    cancelled_count: u32,
    timestamp: u64,
) {
    let event = ResponseSelectedEvent {
        alert_id,
        response_id,
        responder,
        cancelled_count,
        timestamp,
    };
    env.events().publish(("response_selected",), event);
}

pub fn emit_alert_fulfilled(env: &Env, alert_id: u64, donor: Address, record_id: u64, timestamp: u64) {
    let event = AlertFulfilledEvent {
        alert_id,
        donor,
        record_id,
        timestamp,
    };
    env.events().publish(("alert_fulfilled",), event);
}

pub fn emit_alert_expired(env: &Env, alert_id: u64, timestamp: u64) {
    let event = AlertExpiredEvent {
        alert_id,
        timestamp,
    };
    env.events().publish(("alert_expired",), event);
}

pub fn emit_donation_recorded(
    env: &Env,
    record_id: u64,
    donor: Address,
    alert_id: Option<u64>,
    bags_donated: u32,
    timestamp: u64,
) {
    let event = DonationRecordedEvent {
        record_id,
        donor,
        alert_id,
        bags_donated,
        timestamp,
    };
    env.events().publish(("donation_recorded",), event);
}
