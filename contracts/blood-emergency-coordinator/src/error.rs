use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Authorization errors
    Forbidden = 3,

    // Validation errors
    InvalidBloodType = 4,
    InvalidCoordinate = 5,
    InvalidBagCount = 6,
    InvalidExpiry = 7,

    // Lookup errors
    AlertNotFound = 8,
    ResponseNotFound = 9,
    DonorNotFound = 10,

    // Alert state errors
    InvalidAlertTransition = 11,
    AlertNotActive = 12,

    // Response state errors
    DuplicateResponse = 13,
    IncompatibleDonor = 14,
    ResponseNotPending = 15,
    ResponseNotSelected = 16,
}
