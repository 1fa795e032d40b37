// compatibility.rs - ABO/Rh Blood Compatibility Engine
// Constant lookup tables, never runtime inference, so the medical rules
// cannot drift with refactoring.

use soroban_sdk::{Env, String, Vec};

use crate::error::ContractError;
use crate::types::BloodType;

pub const ALL_BLOOD_TYPES: [BloodType; 8] = [
    BloodType::APos,
    BloodType::ANeg,
    BloodType::BPos,
    BloodType::BNeg,
    BloodType::AbPos,
    BloodType::AbNeg,
    BloodType::OPos,
    BloodType::ONeg,
];

/// Recipient types this donor type may donate to.
pub fn can_donate_to(env: &Env, donor: &BloodType) -> Vec<BloodType> {
    let mut types = Vec::new(env);
    let table: &[BloodType] = match donor {
        BloodType::ONeg => &ALL_BLOOD_TYPES, // Universal donor
        BloodType::OPos => &[
            BloodType::OPos,
            BloodType::APos,
            BloodType::BPos,
            BloodType::AbPos,
        ],
        BloodType::ANeg => &[
            BloodType::ANeg,
            BloodType::APos,
            BloodType::AbNeg,
            BloodType::AbPos,
        ],
        BloodType::APos => &[BloodType::APos, BloodType::AbPos],
        BloodType::BNeg => &[
            BloodType::BNeg,
            BloodType::BPos,
            BloodType::AbNeg,
            BloodType::AbPos,
        ],
        BloodType::BPos => &[BloodType::BPos, BloodType::AbPos],
        BloodType::AbNeg => &[BloodType::AbNeg, BloodType::AbPos],
        BloodType::AbPos => &[BloodType::AbPos],
    };
    for t in table {
        types.push_back(*t);
    }
    types
}

/// Donor types this recipient type may receive from.
pub fn can_receive_from(env: &Env, recipient: &BloodType) -> Vec<BloodType> {
    let mut types = Vec::new(env);
    let table: &[BloodType] = match recipient {
        BloodType::AbPos => &ALL_BLOOD_TYPES, // Universal recipient
        BloodType::AbNeg => &[
            BloodType::AbNeg,
            BloodType::ANeg,
            BloodType::BNeg,
            BloodType::ONeg,
        ],
        BloodType::APos => &[
            BloodType::APos,
            BloodType::ANeg,
            BloodType::OPos,
            BloodType::ONeg,
        ],
        BloodType::ANeg => &[BloodType::ANeg, BloodType::ONeg],
        BloodType::BPos => &[
            BloodType::BPos,
            BloodType::BNeg,
            BloodType::OPos,
            BloodType::ONeg,
        ],
        BloodType::BNeg => &[BloodType::BNeg, BloodType::ONeg],
        BloodType::OPos => &[BloodType::OPos, BloodType::ONeg],
        BloodType::ONeg => &[BloodType::ONeg],
    };
    for t in table {
        types.push_back(*t);
    }
    types
}

/// Donor types able to cover an emergency needing `need` blood.
/// This is the pre-filter the candidate resolver applies.
pub fn donors_who_can_help(env: &Env, need: &BloodType) -> Vec<BloodType> {
    can_receive_from(env, need)
}

/// Recipient types a voluntary donor of type `donor` can help, used by
/// the general donor-search surface rather than emergencies.
pub fn recipients_this_donor_helps(env: &Env, donor: &BloodType) -> Vec<BloodType> {
    can_donate_to(env, donor)
}

pub fn is_compatible(env: &Env, donor: &BloodType, recipient: &BloodType) -> bool {
    can_donate_to(env, donor).contains(*recipient)
}

/// Convert blood type to its conventional label for display and export.
pub fn blood_type_to_string(env: &Env, blood_type: &BloodType) -> String {
    match blood_type {
        BloodType::APos => String::from_str(env, "A+"),
        BloodType::ANeg => String::from_str(env, "A-"),
        BloodType::BPos => String::from_str(env, "B+"),
        BloodType::BNeg => String::from_str(env, "B-"),
        BloodType::AbPos => String::from_str(env, "AB+"),
        BloodType::AbNeg => String::from_str(env, "AB-"),
        BloodType::OPos => String::from_str(env, "O+"),
        BloodType::ONeg => String::from_str(env, "O-"),
    }
}

/// Parse a conventional label ("A+", "O-", ...) into a blood type.
/// Unknown labels fail with InvalidBloodType; callers validate upstream.
pub fn blood_type_from_str(env: &Env, label: &String) -> Result<BloodType, ContractError> {
    for blood_type in ALL_BLOOD_TYPES {
        if blood_type_to_string(env, &blood_type) == *label {
            return Ok(blood_type);
        }
    }
    Err(ContractError::InvalidBloodType)
}
