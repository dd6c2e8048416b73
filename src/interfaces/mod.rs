//! Readers turning serialized datasets into `Transaction` records.

pub mod csv;
pub mod json;
