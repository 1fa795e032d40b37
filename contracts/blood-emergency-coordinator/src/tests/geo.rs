#![cfg(test)]

extern crate std;

use soroban_sdk::{Env, String};

use crate::error::ContractError;
use crate::geo::{cells_within_radius, decode_center, encode, neighbors, CELL_PRECISION};

#[test]
fn encode_matches_known_geohash_vectors() {
    let env = Env::default();

    // 42.605, -5.603 is the classic "ezs42" cell
    let cell = encode(&env, 42_605_000, -5_603_000, 5).unwrap();
    assert_eq!(cell, String::from_str(&env, "ezs42"));

    // 57.64911, 10.40744 -> u4pruydqqvj
    let cell = encode(&env, 57_649_110, 10_407_440, 11).unwrap();
    assert_eq!(cell, String::from_str(&env, "u4pruydqqvj"));
}

#[test]
fn encode_is_deterministic() {
    let env = Env::default();
    let first = encode(&env, 51_507_400, -127_800, CELL_PRECISION).unwrap();
    let second = encode(&env, 51_507_400, -127_800, CELL_PRECISION).unwrap();
    assert_eq!(first, second);
}

#[test]
fn encode_is_hierarchical() {
    let env = Env::default();
    // A coarser cell is a prefix of the finer cell for the same point
    let coarse = encode(&env, 57_649_110, 10_407_440, 4).unwrap();
    assert_eq!(coarse, String::from_str(&env, "u4pr"));
}

#[test]
fn encode_rejects_out_of_range_inputs() {
    let env = Env::default();
    assert_eq!(
        encode(&env, 90_000_001, 0, 5),
        Err(ContractError::InvalidCoordinate)
    );
    assert_eq!(
        encode(&env, 0, -180_000_001, 5),
        Err(ContractError::InvalidCoordinate)
    );
    assert_eq!(encode(&env, 0, 0, 0), Err(ContractError::InvalidCoordinate));
    assert_eq!(encode(&env, 0, 0, 13), Err(ContractError::InvalidCoordinate));
}

#[test]
fn decode_center_stays_inside_the_cell() {
    let env = Env::default();
    let cell = encode(&env, 51_507_400, -127_800, CELL_PRECISION).unwrap();
    let (lat, lng) = decode_center(&cell).unwrap();

    // Precision 5 cells are ~0.044 x 0.044 degrees, so the center is
    // within half a span of the original point
    assert!((lat - 51_507_400).abs() < 44_000);
    assert!((lng - -127_800).abs() < 44_000);

    // Re-encoding the center lands back in the same cell
    assert_eq!(encode(&env, lat, lng, CELL_PRECISION).unwrap(), cell);
}

#[test]
fn decode_rejects_invalid_cells() {
    let env = Env::default();
    // 'a' is not in the geohash alphabet
    let bad = String::from_str(&env, "ezsa2");
    assert_eq!(decode_center(&bad), Err(ContractError::InvalidCoordinate));

    let empty = String::from_str(&env, "");
    assert_eq!(decode_center(&empty), Err(ContractError::InvalidCoordinate));
}

#[test]
fn neighbor_ring_has_eight_distinct_cells() {
    let env = Env::default();
    let cell = encode(&env, 51_507_400, -127_800, CELL_PRECISION).unwrap();
    let ring = neighbors(&env, &cell).unwrap();

    assert_eq!(ring.len(), 8);
    assert!(!ring.contains(&cell));
    for i in 0..ring.len() {
        let a = ring.get(i).unwrap();
        assert_eq!(a.len(), CELL_PRECISION);
        for j in (i + 1)..ring.len() {
            assert_ne!(a, ring.get(j).unwrap());
        }
    }
}

#[test]
fn cells_within_radius_contains_center_and_ring() {
    let env = Env::default();
    let cell = encode(&env, 51_507_400, -127_800, CELL_PRECISION).unwrap();

    let cells = cells_within_radius(&env, &cell, 10).unwrap();
    assert!(cells.contains(&cell));
    for neighbor in neighbors(&env, &cell).unwrap().iter() {
        assert!(cells.contains(&neighbor));
    }

    // A cell 260 km away is never part of a 10 km search
    let far = encode(&env, 53_480_800, -2_242_600, CELL_PRECISION).unwrap();
    assert!(!cells.contains(&far));
}

#[test]
fn zero_radius_returns_only_the_center_cell() {
    let env = Env::default();
    let cell = encode(&env, 51_507_400, -127_800, CELL_PRECISION).unwrap();
    let cells = cells_within_radius(&env, &cell, 0).unwrap();
    assert_eq!(cells.len(), 1);
    assert!(cells.contains(&cell));
}

#[test]
fn ring_expansion_is_bounded() {
    let env = Env::default();
    let cell = encode(&env, 51_507_400, -127_800, CELL_PRECISION).unwrap();
    // A hostile radius cannot expand past the ring cap (8 rings -> 17x17)
    let cells = cells_within_radius(&env, &cell, 40_000).unwrap();
    assert!(cells.len() <= 289);
}
