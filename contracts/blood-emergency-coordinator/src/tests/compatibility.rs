#![cfg(test)]

extern crate std;

use soroban_sdk::{Env, String};

use crate::compatibility::{
    blood_type_from_str, blood_type_to_string, can_donate_to, donors_who_can_help, is_compatible,
    recipients_this_donor_helps, ALL_BLOOD_TYPES,
};
use crate::error::ContractError;
use crate::types::BloodType;

#[test]
fn every_type_is_self_compatible() {
    let env = Env::default();
    for blood_type in ALL_BLOOD_TYPES {
        assert!(
            donors_who_can_help(&env, &blood_type).contains(&blood_type),
            "self-compatibility failed"
        );
    }
}

#[test]
fn o_negative_is_universal_donor() {
    let env = Env::default();
    for blood_type in ALL_BLOOD_TYPES {
        assert!(donors_who_can_help(&env, &blood_type).contains(&BloodType::ONeg));
    }
    assert_eq!(can_donate_to(&env, &BloodType::ONeg).len(), 8);
}

#[test]
fn ab_positive_is_universal_recipient() {
    let env = Env::default();
    assert_eq!(donors_who_can_help(&env, &BloodType::AbPos).len(), 8);
    for blood_type in ALL_BLOOD_TYPES {
        assert!(is_compatible(&env, &blood_type, &BloodType::AbPos));
    }
}

#[test]
fn a_positive_donor_rows() {
    let env = Env::default();

    // A+ can help only A+ and AB+
    let recipients = recipients_this_donor_helps(&env, &BloodType::APos);
    assert_eq!(recipients.len(), 2);
    assert!(recipients.contains(&BloodType::APos));
    assert!(recipients.contains(&BloodType::AbPos));

    // A+ patients can receive from A+, A-, O+, O-
    let donors = donors_who_can_help(&env, &BloodType::APos);
    assert_eq!(donors.len(), 4);
    assert!(donors.contains(&BloodType::ANeg));
    assert!(donors.contains(&BloodType::OPos));
}

#[test]
fn rh_positive_cannot_donate_to_rh_negative() {
    let env = Env::default();
    assert!(!is_compatible(&env, &BloodType::APos, &BloodType::ANeg));
    assert!(!is_compatible(&env, &BloodType::OPos, &BloodType::ONeg));
    assert!(!is_compatible(&env, &BloodType::APos, &BloodType::ONeg));
}

#[test]
fn label_round_trip() {
    let env = Env::default();
    for blood_type in ALL_BLOOD_TYPES {
        let label = blood_type_to_string(&env, &blood_type);
        assert_eq!(blood_type_from_str(&env, &label), Ok(blood_type));
    }
}

#[test]
fn unknown_label_is_rejected() {
    let env = Env::default();
    let label = String::from_str(&env, "C+");
    assert_eq!(
        blood_type_from_str(&env, &label),
        Err(ContractError::InvalidBloodType)
    );
}
