use soroban_sdk::{contracttype, Address, String};

/// ABO/Rh blood groups. Used only as a lookup key into the
/// compatibility tables in `compatibility.rs`.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BloodType {
    APos,
    ANeg,
    BPos,
    BNeg,
    AbPos,
    AbNeg,
    OPos,
    ONeg,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AlertStatus {
    Active,
    InProgress,
    Fulfilled,
    Expired,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResponseStatus {
    Pending,
    Selected,
    Cancelled,
    Completed,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AvailabilityStatus {
    Available,
    CoolingDown,
}

/// Display-oriented availability read model for a donor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AvailabilityInfo {
    pub status: AvailabilityStatus,
    pub next_eligible_date: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Minimum days between donations before a donor is eligible again.
    pub cooldown_days: u64,
    /// Search radius applied when an alert is created with radius 0.
    pub default_radius_km: u32,
}

/// Projection of a donor maintained by the profile sync surface.
/// The coordinator reads it; it never drives profile edits of its own
/// beyond the last-donation clock.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonorProfile {
    pub address: Address,
    pub blood_type: BloodType,
    /// Precision-5 geohash cell of the donor's registered location.
    pub cell: String,
    pub is_available: bool,
    pub last_donation_date: Option<u64>,
    pub registered_at: u64,
}

/// An emergency blood request. Never physically deleted; its lifecycle
/// ends at Fulfilled or Expired.
///
/// Invariant: `selected_donor` is Some iff status is InProgress or
/// Fulfilled. `donors_responded <= donors_notified` is best effort only,
/// since notification delivery happens off-chain.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyAlert {
    pub id: u64,
    pub serial_number: String,
    pub requester: Address,
    pub blood_type: BloodType,
    pub location_cell: String,
    pub radius_km: u32,
    pub required_bags: u32,
    pub status: AlertStatus,
    pub donors_notified: u32,
    pub donors_responded: u32,
    pub selected_donor: Option<Address>,
    pub created_at: u64,
    pub expires_at: u64,
}

/// A donor's offer to cover an alert. Exactly one per (alert, responder);
/// at most one per alert ever reaches Selected or Completed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyResponse {
    pub id: u64,
    pub alert_id: u64,
    pub responder: Address,
    pub status: ResponseStatus,
    pub can_donate_immediately: bool,
    pub created_at: u64,
}

/// Append-only record of a completed donation. Feeds the donor's
/// last-donation clock and therefore future availability checks.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationRecord {
    pub id: u64,
    pub donor: Address,
    pub donation_date: u64,
    pub alert_id: Option<u64>,
    pub blood_type: BloodType,
    pub bags_donated: u32,
    pub created_at: u64,
}

/// Result of the exclusivity transaction in `select_responder`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectionOutcome {
    pub selected: EmergencyResponse,
    pub cancelled_count: u32,
}
