//! String and byte formatters: hex, numbers, booleans and dates.

pub mod boolean;
pub mod datetime;
pub mod hex;
pub mod number;
