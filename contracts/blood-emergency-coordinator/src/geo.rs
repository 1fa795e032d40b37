// geo.rs - Geospatial Cell Index
// Hierarchical geohash cells over integer micro-degree coordinates.
// Soroban values carry no floats, so all subdivision math runs in fixed
// point: micro-degrees shifted left FP_SHIFT bits, which keeps full
// precision through the 60 binary splits of a precision-12 cell.
//
// Cell output is a coarse recall-over-precision filter. Consumers must
// treat it as a superset and do any exact distance check downstream.

use soroban_sdk::{Env, String, Vec};

use crate::error::ContractError;

/// Standard geohash base32 alphabet.
const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Precision used for donor and alert cells (~4.9 km x 4.9 km).
pub const CELL_PRECISION: u32 = 5;

const MAX_PRECISION: u32 = 12;

/// Bound on ring expansion so a hostile radius cannot exhaust the
/// invocation's instruction limit. 8 rings at precision 5 covers ~39 km.
const MAX_SEARCH_RINGS: i64 = 8;

const FP_SHIFT: u32 = 20;
const LAT_MAX_FP: i64 = 90_000_000 << FP_SHIFT;
const LNG_MAX_FP: i64 = 180_000_000 << FP_SHIFT;

/// Meters per micro-degree of latitude, scaled by 1e5 (0.11132 m).
const METERS_PER_UDEG_E5: u64 = 11_132;

struct CellBounds {
    lat_min: i64,
    lat_max: i64,
    lng_min: i64,
    lng_max: i64,
}

impl CellBounds {
    fn lat_center(&self) -> i64 {
        (self.lat_min + self.lat_max) / 2
    }

    fn lng_center(&self) -> i64 {
        (self.lng_min + self.lng_max) / 2
    }

    fn lat_span(&self) -> i64 {
        self.lat_max - self.lat_min
    }

    fn lng_span(&self) -> i64 {
        self.lng_max - self.lng_min
    }
}

/// Encode a coordinate into its geohash cell at the given precision.
/// Deterministic and total over lat in [-90, 90] and lng in [-180, 180]
/// (micro-degrees); anything else fails with InvalidCoordinate.
pub fn encode(
    env: &Env,
    lat_udeg: i64,
    lng_udeg: i64,
    precision: u32,
) -> Result<String, ContractError> {
    if lat_udeg < -90_000_000 || lat_udeg > 90_000_000 {
        return Err(ContractError::InvalidCoordinate);
    }
    if lng_udeg < -180_000_000 || lng_udeg > 180_000_000 {
        return Err(ContractError::InvalidCoordinate);
    }
    if precision == 0 || precision > MAX_PRECISION {
        return Err(ContractError::InvalidCoordinate);
    }
    Ok(encode_fp(
        env,
        lat_udeg << FP_SHIFT,
        lng_udeg << FP_SHIFT,
        precision,
    ))
}

/// Core bit-interleaving encoder over fixed-point coordinates already
/// known to be in range.
fn encode_fp(env: &Env, lat_fp: i64, lng_fp: i64, precision: u32) -> String {
    let mut lat_min = -LAT_MAX_FP;
    let mut lat_max = LAT_MAX_FP;
    let mut lng_min = -LNG_MAX_FP;
    let mut lng_max = LNG_MAX_FP;

    let mut buf = [0u8; MAX_PRECISION as usize];
    let mut even_bit = true; // even bits subdivide longitude

    for pos in 0..precision as usize {
        let mut char_index: u32 = 0;
        let mut bit_count: u32 = 0;
        while bit_count < 5 {
            char_index <<= 1;
            if even_bit {
                let mid = (lng_min + lng_max) / 2;
                if lng_fp >= mid {
                    char_index |= 1;
                    lng_min = mid;
                } else {
                    lng_max = mid;
                }
            } else {
                let mid = (lat_min + lat_max) / 2;
                if lat_fp >= mid {
                    char_index |= 1;
                    lat_min = mid;
                } else {
                    lat_max = mid;
                }
            }
            even_bit = !even_bit;
            bit_count += 1;
        }
        buf[pos] = BASE32[char_index as usize];
    }

    String::from_bytes(env, &buf[..precision as usize])
}

fn base32_index(ch: u8) -> Option<u32> {
    for (i, b) in BASE32.iter().enumerate() {
        if *b == ch {
            return Some(i as u32);
        }
    }
    None
}

fn decode_bounds(cell_bytes: &[u8]) -> Result<CellBounds, ContractError> {
    let mut bounds = CellBounds {
        lat_min: -LAT_MAX_FP,
        lat_max: LAT_MAX_FP,
        lng_min: -LNG_MAX_FP,
        lng_max: LNG_MAX_FP,
    };

    let mut even_bit = true;
    for ch in cell_bytes {
        let index = base32_index(*ch).ok_or(ContractError::InvalidCoordinate)?;
        for shift in (0..5).rev() {
            let bit = (index >> shift) & 1;
            if even_bit {
                let mid = (bounds.lng_min + bounds.lng_max) / 2;
                if bit == 1 {
                    bounds.lng_min = mid;
                } else {
                    bounds.lng_max = mid;
                }
            } else {
                let mid = (bounds.lat_min + bounds.lat_max) / 2;
                if bit == 1 {
                    bounds.lat_min = mid;
                } else {
                    bounds.lat_max = mid;
                }
            }
            even_bit = !even_bit;
        }
    }
    Ok(bounds)
}

/// Copies a cell string into a stack buffer, validating length.
fn cell_to_bytes(cell: &String) -> Result<([u8; MAX_PRECISION as usize], u32), ContractError> {
    let len = cell.len();
    if len == 0 || len > MAX_PRECISION {
        return Err(ContractError::InvalidCoordinate);
    }
    let mut buf = [0u8; MAX_PRECISION as usize];
    cell.copy_into_slice(&mut buf[..len as usize]);
    Ok((buf, len))
}

/// Center of a cell in micro-degrees, mostly useful for display and for
/// downstream exact-distance checks.
pub fn decode_center(cell: &String) -> Result<(i64, i64), ContractError> {
    let (buf, len) = cell_to_bytes(cell)?;
    let bounds = decode_bounds(&buf[..len as usize])?;
    Ok((
        bounds.lat_center() >> FP_SHIFT,
        bounds.lng_center() >> FP_SHIFT,
    ))
}

/// The 8-connected ring of same-precision cells around `cell`.
/// Compensates for points near a cell edge whose neighbors fall in an
/// adjacent cell. Cells past a pole are skipped; longitude wraps.
pub fn neighbors(env: &Env, cell: &String) -> Result<Vec<String>, ContractError> {
    let (buf, len) = cell_to_bytes(cell)?;
    let bounds = decode_bounds(&buf[..len as usize])?;
    let mut ring = Vec::new(env);

    for dlat in -1i64..=1 {
        for dlng in -1i64..=1 {
            if dlat == 0 && dlng == 0 {
                continue;
            }
            if let Some(neighbor) = offset_cell(env, &bounds, dlat, dlng, len) {
                ring.push_back(neighbor);
            }
        }
    }
    Ok(ring)
}

/// Approximate a radius around a cell by expanding rings of neighbors
/// until the accumulated ring height covers the radius. Always contains
/// the center cell. Over-includes square-cell corners relative to a true
/// circle; that is intentional (recall over precision).
pub fn cells_within_radius(
    env: &Env,
    cell: &String,
    radius_km: u32,
) -> Result<Vec<String>, ContractError> {
    let (buf, len) = cell_to_bytes(cell)?;
    let bounds = decode_bounds(&buf[..len as usize])?;

    let cell_height_m = cell_height_meters(&bounds);
    let radius_m = radius_km as u64 * 1000;

    let mut rings: i64 = 0;
    let mut covered_m: u64 = 0;
    while covered_m < radius_m && rings < MAX_SEARCH_RINGS {
        rings += 1;
        covered_m += cell_height_m;
    }

    let mut cells = Vec::new(env);
    cells.push_back(String::from_bytes(env, &buf[..len as usize]));

    for ring in 1..=rings {
        for dlat in -ring..=ring {
            for dlng in -ring..=ring {
                if dlat.abs() != ring && dlng.abs() != ring {
                    continue; // interior of the ring, already collected
                }
                if let Some(neighbor) = offset_cell(env, &bounds, dlat, dlng, len) {
                    if !cells.contains(&neighbor) {
                        cells.push_back(neighbor);
                    }
                }
            }
        }
    }
    Ok(cells)
}

/// Height of a cell in meters, from its latitude span.
fn cell_height_meters(bounds: &CellBounds) -> u64 {
    let span_udeg = (bounds.lat_span() >> FP_SHIFT) as u64;
    span_udeg * METERS_PER_UDEG_E5 / 100_000
}

/// Cell at a (dlat, dlng) cell-size offset from `bounds`, re-encoded at
/// the same precision. None when the offset crosses a pole.
fn offset_cell(
    env: &Env,
    bounds: &CellBounds,
    dlat: i64,
    dlng: i64,
    precision: u32,
) -> Option<String> {
    let lat = bounds.lat_center() + dlat * bounds.lat_span();
    if lat > LAT_MAX_FP || lat < -LAT_MAX_FP {
        return None;
    }

    let mut lng = bounds.lng_center() + dlng * bounds.lng_span();
    if lng >= LNG_MAX_FP {
        lng -= 2 * LNG_MAX_FP;
    } else if lng < -LNG_MAX_FP {
        lng += 2 * LNG_MAX_FP;
    }

    Some(encode_fp(env, lat, lng, precision))
}
