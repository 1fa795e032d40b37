#![cfg(test)]

pub mod utils;

mod compatibility;
mod geo;
