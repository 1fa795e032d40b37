#![cfg(test)]

extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{BloodEmergencyCoordinator, BloodEmergencyCoordinatorClient, BloodType};

// Central London
pub const LONDON_LAT: i64 = 51_507_400;
pub const LONDON_LNG: i64 = -127_800;

// ~1 km from LONDON, same precision-5 cell neighborhood
pub const NEARBY_LAT: i64 = 51_512_000;
pub const NEARBY_LNG: i64 = -120_000;

// Manchester, ~260 km away
pub const FAR_LAT: i64 = 53_480_800;
pub const FAR_LNG: i64 = -2_242_600;

pub const DAY: u64 = 86_400;

pub fn setup() -> (Env, BloodEmergencyCoordinatorClient<'static>, Address) {
    let env = Env::default();
    let contract_id = env.register(BloodEmergencyCoordinator {}, ());
    let client = BloodEmergencyCoordinatorClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    env.mock_all_auths();

    client.initialize(&admin, &56, &10);
    (env, client, admin)
}

/// Registers an available donor at the given coordinates.
pub fn register_donor_at(
    env: &Env,
    client: &BloodEmergencyCoordinatorClient,
    blood_type: BloodType,
    lat: i64,
    lng: i64,
) -> Address {
    let donor = Address::generate(env);
    client.register_donor(&donor, &blood_type, &lat, &lng, &true);
    donor
}

/// Creates an alert for one bag of `blood_type` centered on LONDON with
/// a 10 km radius and a one-day deadline.
pub fn create_london_alert(
    env: &Env,
    client: &BloodEmergencyCoordinatorClient,
    blood_type: BloodType,
) -> (Address, u64) {
    let requester = Address::generate(env);
    let alert_id = client.create_alert(
        &requester,
        &blood_type,
        &LONDON_LAT,
        &LONDON_LNG,
        &10,
        &1,
        &DAY,
    );
    (requester, alert_id)
}
